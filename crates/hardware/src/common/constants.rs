//! Global Simulator Constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Address Constants:** Width of a simulated address and the widest legal field split.
//! 2. **Workload Constants:** Element size and matrix placement used by the transpose driver.

/// Width of a simulated address in bits.
pub const ADDRESS_BITS: u32 = 64;

/// Largest legal value of `set_index_bits + block_offset_bits`.
///
/// At least one bit must remain for the tag so that `address >> (s + b)` is a
/// defined shift on a 64-bit value.
pub const MAX_INDEX_OFFSET_BITS: u32 = ADDRESS_BITS - 1;

/// Largest number of lines a single cache store may allocate (2^26).
///
/// Larger geometries are rejected at configuration time instead of aborting
/// on allocation.
pub const MAX_TOTAL_LINES: u64 = 1 << 26;

/// Size in bytes of one matrix element (`int` in the transpose workload).
pub const ELEMENT_BYTES: u64 = 4;

/// Largest matrix dimension the transpose driver lays out in memory.
///
/// Matrix B is placed immediately after a `MAX_MATRIX_DIM x MAX_MATRIX_DIM`
/// matrix A, so A and B map onto the same sets of a small cache.
pub const MAX_MATRIX_DIM: usize = 256;

/// Base address of matrix A in the transpose workload.
pub const MATRIX_A_BASE: u64 = 0x0030_a080;
