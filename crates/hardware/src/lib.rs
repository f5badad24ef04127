//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays memory reference traces through a model of one
//! set-associative cache and counts hits, misses and evictions. It includes:
//! 1. **Decoding:** Splitting addresses into tag, set index and block offset.
//! 2. **Cache:** A flat set-associative store with LRU or FIFO replacement.
//! 3. **Traces:** Parsing and streaming of the textual trace format.
//! 4. **Simulation:** A run object that owns the cache, the access clock and the counters.
//! 5. **Workloads:** Cache-aware matrix transpose strategies scored by the simulator.

/// Common types and constants (address layout, operations, errors).
pub mod common;
/// Simulator configuration (defaults, geometry, replacement policy).
pub mod config;
/// Set-associative cache store and replacement policies.
pub mod cache;
/// Trace simulation driver and file loading.
pub mod sim;
/// Hit/miss/eviction counters and summary formatting.
pub mod stats;
/// Trace record parsing and streaming.
pub mod trace;
/// Matrix transpose workloads.
pub mod workload;

/// Cache geometry and policy; use `CacheConfig::new(s, e, b)` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Cache store; classifies each access as hit, fill or eviction.
pub use crate::cache::{CacheSim, Outcome};
/// Run object owning one cache and its clock.
pub use crate::sim::Simulator;
/// Final counters of a run.
pub use crate::stats::CacheStats;
