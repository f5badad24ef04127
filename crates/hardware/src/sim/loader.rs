//! Trace loading and file-based runs.
//!
//! This module provides the file-facing entry points of the simulator. It performs:
//! 1. **Trace opening:** Opens a trace file behind a buffered streaming reader.
//! 2. **File runs:** Replays a whole trace file through a fresh simulator.
//! 3. **Results output:** Writes the space-separated results file used by graders.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use tracing::debug;

use super::simulator::Simulator;
use crate::common::SimError;
use crate::config::CacheConfig;
use crate::stats::CacheStats;
use crate::trace::TraceReader;

/// Opens a trace file for streaming.
///
/// # Errors
///
/// Returns [`SimError::Open`] if the file cannot be opened.
pub fn open_trace(path: impl AsRef<Path>) -> Result<TraceReader<BufReader<File>>, SimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SimError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TraceReader::new(BufReader::new(file)))
}

/// Simulates the trace at `path` on a fresh cache built from `config`.
///
/// # Arguments
///
/// * `config` - Cache geometry and policy.
/// * `path` - Trace file.
/// * `verbose` - Optional sink for per-record outcome lines.
///
/// # Errors
///
/// Fails on an invalid configuration, an unreadable trace, a malformed
/// record, or a failed verbose write. No counters are returned on failure.
pub fn simulate_file(
    config: &CacheConfig,
    path: impl AsRef<Path>,
    verbose: Option<&mut dyn Write>,
) -> Result<CacheStats, SimError> {
    let mut sim = Simulator::new(config)?;
    let mut reader = open_trace(path)?;
    let stats = sim.run(reader.by_ref(), verbose)?;
    debug!(
        lines = reader.lines_read(),
        instructions = reader.instructions_skipped(),
        "trace file consumed"
    );
    Ok(stats)
}

/// Writes `"<hits> <misses> <evictions>\n"` to `path`, replacing its contents.
///
/// # Errors
///
/// Returns [`SimError::Output`] if the file cannot be written.
pub fn write_results(path: impl AsRef<Path>, stats: &CacheStats) -> Result<(), SimError> {
    fs::write(path, stats.results_line())?;
    Ok(())
}
