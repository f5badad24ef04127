//! Trace Record Parsing.
//!
//! One trace line is either an instruction fetch or a data reference:
//!
//! ```text
//! I 0400d7d4,8
//!  L 7ff0005c8,8
//!  S 7ff0005d0,4
//!  M 0421c7f0,4
//! ```
//!
//! Instruction lines are recognised by their leading `I` and never parsed
//! further. Data lines carry a one-letter operation, a hexadecimal address
//! and a decimal access size.

use std::fmt;
use std::str::FromStr;

use crate::common::{Operation, ParseError};

/// A data reference from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DataRecord {
    /// Load, store or modify.
    pub op: Operation,
    /// Byte address of the reference.
    pub address: u64,
    /// Number of bytes touched. Carried through but not used by the cache model.
    pub size: u32,
}

/// A classified trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceRecord {
    /// An instruction fetch; ignored by the simulator.
    Instruction,
    /// A data reference.
    Data(DataRecord),
}

impl DataRecord {
    /// Creates a data record.
    pub const fn new(op: Operation, address: u64, size: u32) -> Self {
        Self { op, address, size }
    }
}

impl fmt::Display for DataRecord {
    /// Formats the record as a trace line (leading space, no newline).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {} {:x},{}", self.op, self.address, self.size)
    }
}

/// Classifies one trace line.
///
/// Returns `Ok(None)` for blank lines.
///
/// # Errors
///
/// Returns a [`ParseError`] if a data line cannot be parsed.
pub fn parse_line(line: &str) -> Result<Option<TraceRecord>, ParseError> {
    let text = line.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if text.starts_with('I') {
        return Ok(Some(TraceRecord::Instruction));
    }
    text.parse().map(|rec| Some(TraceRecord::Data(rec)))
}

impl FromStr for DataRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (code, rest) = match s.split_once(char::is_whitespace) {
            Some((code, rest)) => (code, rest.trim_start()),
            None => (s, ""),
        };
        if code.is_empty() {
            return Err(ParseError::MissingOperation);
        }

        let mut chars = code.chars();
        let op = match (chars.next(), chars.next()) {
            (Some(c), None) => Operation::from_code(c),
            _ => None,
        }
        .ok_or_else(|| ParseError::UnknownOperation(code.to_string()))?;

        if rest.is_empty() {
            return Err(ParseError::MissingAddress);
        }

        let (addr_text, size_text) = match rest.split_once(',') {
            Some((addr, size)) => (addr.trim(), Some(size.trim())),
            None => (rest.trim(), None),
        };
        let address = parse_hex(addr_text)?;

        let size_text = match size_text {
            Some(text) if !text.is_empty() => text,
            _ => return Err(ParseError::MissingSize),
        };
        let mut fields = size_text.split_whitespace();
        let size_field = fields.next().unwrap_or_default();
        let size = size_field
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidSize(size_field.to_string()))?;
        if let Some(extra) = fields.next() {
            return Err(ParseError::TrailingInput(extra.to_string()));
        }

        Ok(Self { op, address, size })
    }
}

/// Parses a hexadecimal address with an optional `0x` prefix.
fn parse_hex(text: &str) -> Result<u64, ParseError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidAddress(text.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidAddress(text.to_string()))
}
