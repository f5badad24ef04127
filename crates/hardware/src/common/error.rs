//! Error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Geometries that cannot be simulated, and unreadable config files.
//! 2. **Parse Errors:** Reasons a single trace record failed to parse.
//! 3. **Trace Errors:** Parse errors located at a trace line, and trace I/O failures.
//! 4. **Run Errors:** The union reported by the simulation driver and workloads.
//!
//! The decoder and replacement engine are total and have no error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `lines_per_set` was zero; such a set can neither hit nor be filled.
    #[error("lines per set (E) must be at least 1")]
    ZeroAssociativity,

    /// The set-index and block-offset fields leave no room for a tag.
    #[error(
        "set index bits (s={set_index_bits}) plus block offset bits (b={block_offset_bits}) must not exceed {max}"
    )]
    FieldsTooWide {
        /// Configured set-index width.
        set_index_bits: u32,
        /// Configured block-offset width.
        block_offset_bits: u32,
        /// Largest legal combined width.
        max: u32,
    },

    /// The geometry would allocate more lines than the simulator supports.
    #[error("cache with 2^{set_index_bits} sets x {lines_per_set} lines exceeds {max} lines")]
    TooManyLines {
        /// Configured set-index width.
        set_index_bits: u32,
        /// Configured associativity.
        lines_per_set: usize,
        /// Largest supported line count.
        max: u64,
    },

    /// A configuration file could not be read.
    #[error("cannot read config file '{path}': {source}")]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A configuration document was not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reason a single trace record failed to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The record had no operation code.
    #[error("missing operation")]
    MissingOperation,

    /// The operation code was not `I`, `L`, `S` or `M`.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// The record had no `<address>,<size>` field.
    #[error("missing address")]
    MissingAddress,

    /// The address was not a 64-bit hexadecimal value.
    #[error("invalid hex address '{0}'")]
    InvalidAddress(String),

    /// The address was not followed by `,<size>`.
    #[error("missing access size")]
    MissingSize,

    /// The access size was not a decimal integer.
    #[error("invalid access size '{0}'")]
    InvalidSize(String),

    /// Unexpected text followed the size field.
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// Failure while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace source could not be read.
    #[error("trace read failed: {0}")]
    Io(#[from] io::Error),

    /// A data record could not be parsed.
    #[error("malformed trace record at line {line} ('{text}'): {source}")]
    Malformed {
        /// One-based line number of the record.
        line: usize,
        /// Offending line, without its line terminator.
        text: String,
        /// Parse failure.
        #[source]
        source: ParseError,
    },
}

/// Failure of a transpose workload.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// Matrix dimensions are zero or exceed the laid-out memory region.
    #[error("unsupported matrix dimensions {rows}x{cols} (each must be in 1..={max})")]
    UnsupportedDimensions {
        /// Rows of A.
        rows: usize,
        /// Columns of A.
        cols: usize,
        /// Largest supported dimension.
        max: usize,
    },

    /// A strategy was asked to transpose a shape it does not handle.
    #[error("strategy '{strategy}' cannot transpose a {rows}x{cols} matrix")]
    UnsupportedShape {
        /// Strategy name.
        strategy: String,
        /// Rows of A.
        rows: usize,
        /// Columns of A.
        cols: usize,
    },

    /// The strategy finished but B is not the transpose of A.
    #[error("strategy '{0}' did not produce the transpose")]
    IncorrectTranspose(String),
}

/// Failure of a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace could not be read or parsed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The trace file could not be opened.
    #[error("cannot open trace file '{path}': {source}")]
    Open {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A transpose workload failed.
    #[error(transparent)]
    Workload(#[from] WorkloadError),

    /// Writing verbose output or a results file failed.
    #[error("output failed: {0}")]
    Output(#[from] io::Error),
}
