//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome counters of a cache simulation. It provides:
//! 1. **Counters:** Hits, misses and evictions, updated only by the cache on each access.
//! 2. **Derived metrics:** Access count and miss rate.
//! 3. **Summary:** The machine-parseable `hits:<n> misses:<n> evictions:<n>` line and the
//!    space-separated results-file format consumed by grading tools.

use std::fmt;

/// Outcome counters of one simulation run.
///
/// Every counter is monotonically non-decreasing over a run, and
/// `evictions <= misses` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to bring their block in.
    pub misses: u64,
    /// Misses that displaced a valid block.
    pub evictions: u64,
}

impl CacheStats {
    /// Total number of cache accesses (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that missed, or 0.0 when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    /// The summary line, e.g. `hits:4 misses:5 evictions:3`.
    pub fn summary(&self) -> String {
        self.to_string()
    }

    /// The results-file line: `"<hits> <misses> <evictions>\n"`.
    pub fn results_line(&self) -> String {
        format!("{} {} {}\n", self.hits, self.misses, self.evictions)
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}
