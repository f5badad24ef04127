//! Memory Operation Types.
//!
//! This module defines the classification of data references found in a trace.
//! These types are used for the following:
//! 1. **Trace Parsing:** Mapping the one-letter operation code of a record to a variant.
//! 2. **Access Expansion:** Determining how many cache accesses a record triggers.
//! 3. **Trace Emission:** Rendering records generated by workloads back to text.

use std::fmt;

/// Type of data memory operation.
///
/// Instruction fetches never reach the cache model and therefore have no
/// variant here; the trace reader drops them before classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Data load (`L`).
    Load,

    /// Data store (`S`).
    Store,

    /// Data modify (`M`).
    ///
    /// A load immediately followed by a store to the same address. Counted
    /// as two cache accesses, the second of which always hits.
    Modify,
}

impl Operation {
    /// Number of cache accesses this operation performs.
    #[inline(always)]
    pub const fn accesses(self) -> usize {
        match self {
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }

    /// One-letter code used in trace files.
    pub const fn code(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Classifies a one-letter trace code.
    ///
    /// Returns `None` for anything other than `L`, `S` or `M`.
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
