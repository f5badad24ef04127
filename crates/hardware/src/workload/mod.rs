//! Transpose workloads scored by the cache simulator.
//!
//! A workload runs a transpose strategy over traced matrices, checks that the
//! result is correct, and replays the recorded accesses through a fresh
//! [`Simulator`]. Each score uses its own cache, so strategies never affect
//! one another's counts.

/// Matrices, memory layout and the traced workspace.
pub mod matrix;

/// Transpose strategies and strategy selection.
pub mod transpose;

use std::io::Write;

use tracing::debug;

pub use matrix::{Matrix, MatrixLayout, Workspace, is_transpose};
pub use transpose::{
    Blocked, BufferedBlocked, RowWise, SplitBlocked, TransposeStrategy, select_strategy,
};

use crate::common::{SimError, TraceError, WorkloadError};
use crate::config::CacheConfig;
use crate::sim::Simulator;
use crate::stats::CacheStats;
use crate::trace::DataRecord;

/// Description the grading driver looks for to find the submitted strategy.
pub const SUBMISSION_DESC: &str = "Transpose submission";

/// Description of the row-wise baseline.
pub const BASELINE_DESC: &str = "Simple row-wise scan transpose";

/// Result of scoring one strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Score {
    /// Name of the strategy that was scored.
    pub strategy: String,
    /// Counters from replaying the strategy's accesses.
    pub stats: CacheStats,
    /// Number of element accesses the strategy made.
    pub accesses: usize,
}

/// A strategy registered for evaluation, with its description.
#[derive(Debug)]
pub struct Registered {
    /// Human-readable description.
    pub description: &'static str,
    /// The strategy.
    pub strategy: Box<dyn TransposeStrategy>,
}

/// Runs `strategy` on a `rows x cols` matrix and returns its access trace.
///
/// # Errors
///
/// Fails if the dimensions are unsupported, the strategy does not handle the
/// shape, or the strategy does not produce the transpose.
pub fn record(
    strategy: &dyn TransposeStrategy,
    rows: usize,
    cols: usize,
    layout: MatrixLayout,
) -> Result<Vec<DataRecord>, WorkloadError> {
    if !strategy.supports(rows, cols) {
        return Err(WorkloadError::UnsupportedShape {
            strategy: strategy.name(),
            rows,
            cols,
        });
    }
    let mut ws = Workspace::new(rows, cols, layout)?;
    strategy.transpose(&mut ws);
    if !ws.is_transposed() {
        return Err(WorkloadError::IncorrectTranspose(strategy.name()));
    }
    Ok(ws.into_trace())
}

/// Scores `strategy` on a `rows x cols` matrix against a fresh `cache`.
///
/// # Errors
///
/// Fails on an invalid cache configuration, or any error from [`record`].
pub fn score(
    strategy: &dyn TransposeStrategy,
    rows: usize,
    cols: usize,
    cache: &CacheConfig,
) -> Result<Score, SimError> {
    let mut sim = Simulator::new(cache)?;
    let trace = record(strategy, rows, cols, MatrixLayout::default())?;
    let stats = sim.run(trace.iter().copied().map(Ok::<_, TraceError>), None)?;
    debug!(
        strategy = %strategy.name(),
        rows,
        cols,
        misses = stats.misses,
        "scored transpose"
    );
    Ok(Score {
        strategy: strategy.name(),
        stats,
        accesses: trace.len(),
    })
}

/// The strategies evaluated for a `rows x cols` matrix on `cache`:
/// the selected submission first, then the row-wise baseline.
pub fn registered_strategies(rows: usize, cols: usize, cache: &CacheConfig) -> Vec<Registered> {
    vec![
        Registered {
            description: SUBMISSION_DESC,
            strategy: select_strategy(rows, cols, cache),
        },
        Registered {
            description: BASELINE_DESC,
            strategy: Box::new(RowWise),
        },
    ]
}

/// Writes `trace` in the textual trace format, one record per line.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_trace(out: &mut dyn Write, trace: &[DataRecord]) -> std::io::Result<()> {
    for rec in trace {
        writeln!(out, "{rec}")?;
    }
    Ok(())
}
