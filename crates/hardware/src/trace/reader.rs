//! Streaming trace reader.
//!
//! Reads a trace one line at a time and yields only data records. Instruction
//! and blank lines are consumed silently; a malformed data line is reported
//! with its one-based line number.

use std::io::BufRead;

use super::record::{self, DataRecord, TraceRecord};
use crate::common::TraceError;

/// Iterator over the data records of a trace.
///
/// Yields `Err` at most once; after an error the iterator is exhausted.
#[derive(Debug)]
pub struct TraceReader<R> {
    source: R,
    buffer: String,
    line: usize,
    instructions: u64,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered trace source.
    pub const fn new(source: R) -> Self {
        Self {
            source,
            buffer: String::new(),
            line: 0,
            instructions: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far.
    pub const fn lines_read(&self) -> usize {
        self.line
    }

    /// Number of instruction records skipped so far.
    pub const fn instructions_skipped(&self) -> u64 {
        self.instructions
    }

    fn read_record(&mut self) -> Result<Option<DataRecord>, TraceError> {
        loop {
            self.buffer.clear();
            if self.source.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            match record::parse_line(&self.buffer) {
                Ok(Some(TraceRecord::Data(rec))) => return Ok(Some(rec)),
                Ok(Some(TraceRecord::Instruction)) => self.instructions += 1,
                Ok(None) => {}
                Err(source) => {
                    return Err(TraceError::Malformed {
                        line: self.line,
                        text: self.buffer.trim_end_matches(['\r', '\n']).to_string(),
                        source,
                    });
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<DataRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for TraceReader<R> {}
