//! Memory reference traces.
//!
//! Parsing of the textual trace format and a streaming reader that feeds the
//! simulator one data record at a time.

/// Streaming reader over a buffered source.
pub mod reader;

/// Record types and line parsing.
pub mod record;

pub use reader::TraceReader;
pub use record::{DataRecord, TraceRecord, parse_line};
