//! Simulation driver and trace loading.
//!
//! Provides the run object that replays data records through a cache, and
//! helpers for running trace files end to end.

/// Trace files and results output.
pub mod loader;

/// The run object and per-record stepping.
pub mod simulator;

pub use simulator::{Simulator, StepResult};
