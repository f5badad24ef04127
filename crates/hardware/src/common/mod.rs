//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Address Decomposition:** Tag, set-index and block-offset extraction.
//! 2. **Constants:** Address width limits and transpose workload placement.
//! 3. **Memory Operations:** Classification of trace records as load, store or modify.
//! 4. **Error Handling:** Configuration, parse, trace and run errors.

/// Address layout and decoding.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory operation definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressLayout, DecodedAddr};
pub use constants::{ADDRESS_BITS, MAX_INDEX_OFFSET_BITS};
pub use data::Operation;
pub use error::{ConfigError, ParseError, SimError, TraceError, WorkloadError};
