
/// Record stepping and trace replay.
pub mod simulator;
