//! Matrices, their memory placement, and the traced transpose workspace.
//!
//! Every element a transpose strategy reads from A or B, or writes to B, is
//! recorded as a load or store at the element's simulated address. The
//! resulting trace is what the cache simulator scores.

use crate::common::WorkloadError;
use crate::common::constants::{ELEMENT_BYTES, MATRIX_A_BASE, MAX_MATRIX_DIM};
use crate::common::Operation;
use crate::trace::DataRecord;

/// Dense row-major matrix of `i32`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl Matrix {
    /// Creates a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Creates a `rows x cols` matrix whose elements are `1, 2, 3, ...` in
    /// row-major order, so no two elements are equal and none is zero.
    pub fn sequential(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: (1..=rows * cols).map(|v| v as i32).collect(),
        }
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Element at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> i32 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j]
    }

    /// Overwrites the element at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, value: i32) {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j] = value;
    }
}

/// Returns true if `b` is the transpose of `a`.
pub fn is_transpose(a: &Matrix, b: &Matrix) -> bool {
    a.rows == b.cols
        && a.cols == b.rows
        && (0..a.rows).all(|i| (0..a.cols).all(|j| a.get(i, j) == b.get(j, i)))
}

/// Simulated base addresses of the source and destination matrices.
///
/// The default places B directly after a `256 x 256` A, as the lab driver's
/// static arrays are laid out. Both bases are then congruent modulo any
/// power-of-two cache size up to 256 KiB, so `A[i][j]` and `B[i][j]` compete
/// for the same set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixLayout {
    /// Address of `A[0][0]`.
    pub a_base: u64,
    /// Address of `B[0][0]`.
    pub b_base: u64,
}

impl Default for MatrixLayout {
    fn default() -> Self {
        let span = (MAX_MATRIX_DIM * MAX_MATRIX_DIM) as u64 * ELEMENT_BYTES;
        Self {
            a_base: MATRIX_A_BASE,
            b_base: MATRIX_A_BASE + span,
        }
    }
}

/// Source matrix A, destination matrix B, and the trace of every element access.
///
/// A is `rows x cols`; B is `cols x rows`. Strategies may only touch the
/// matrices through the traced accessors.
#[derive(Debug)]
pub struct Workspace {
    a: Matrix,
    b: Matrix,
    layout: MatrixLayout,
    trace: Vec<DataRecord>,
}

impl Workspace {
    /// Creates a workspace with a sequential A and a zeroed B.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError::UnsupportedDimensions`] if either dimension
    /// is zero or larger than 256.
    pub fn new(rows: usize, cols: usize, layout: MatrixLayout) -> Result<Self, WorkloadError> {
        let valid = 1..=MAX_MATRIX_DIM;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(WorkloadError::UnsupportedDimensions {
                rows,
                cols,
                max: MAX_MATRIX_DIM,
            });
        }
        Ok(Self {
            a: Matrix::sequential(rows, cols),
            b: Matrix::zeros(cols, rows),
            layout,
            trace: Vec::with_capacity(rows * cols * 2),
        })
    }

    /// Rows of A (columns of B).
    pub const fn rows(&self) -> usize {
        self.a.rows
    }

    /// Columns of A (rows of B).
    pub const fn cols(&self) -> usize {
        self.a.cols
    }

    /// The source matrix.
    pub const fn a(&self) -> &Matrix {
        &self.a
    }

    /// The destination matrix.
    pub const fn b(&self) -> &Matrix {
        &self.b
    }

    /// The recorded element accesses, in program order.
    pub fn trace(&self) -> &[DataRecord] {
        &self.trace
    }

    /// Consumes the workspace, returning the recorded accesses.
    pub fn into_trace(self) -> Vec<DataRecord> {
        self.trace
    }

    /// Simulated address of `A[i][j]`.
    pub const fn addr_a(&self, i: usize, j: usize) -> u64 {
        self.layout.a_base + ((i * self.a.cols + j) as u64) * ELEMENT_BYTES
    }

    /// Simulated address of `B[i][j]`.
    pub const fn addr_b(&self, i: usize, j: usize) -> u64 {
        self.layout.b_base + ((i * self.b.cols + j) as u64) * ELEMENT_BYTES
    }

    fn record(&mut self, op: Operation, address: u64) {
        self.trace
            .push(DataRecord::new(op, address, ELEMENT_BYTES as u32));
    }

    /// Reads `A[i][j]`, recording a load.
    pub fn load_a(&mut self, i: usize, j: usize) -> i32 {
        let address = self.addr_a(i, j);
        self.record(Operation::Load, address);
        self.a.get(i, j)
    }

    /// Reads `B[i][j]`, recording a load.
    pub fn load_b(&mut self, i: usize, j: usize) -> i32 {
        let address = self.addr_b(i, j);
        self.record(Operation::Load, address);
        self.b.get(i, j)
    }

    /// Writes `B[i][j]`, recording a store.
    pub fn store_b(&mut self, i: usize, j: usize, value: i32) {
        let address = self.addr_b(i, j);
        self.record(Operation::Store, address);
        self.b.set(i, j, value);
    }

    /// Whether B currently holds the transpose of A.
    pub fn is_transposed(&self) -> bool {
        is_transpose(&self.a, &self.b)
    }
}
