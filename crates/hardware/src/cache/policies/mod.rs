//! Cache Replacement Policies.
//!
//! Implements the algorithms that maintain line age and select victim lines in
//! a full set. Empty lines are always filled first (lowest index wins) by the
//! cache itself; a policy is only consulted for its recency bookkeeping and
//! when every line of the set is valid.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Fifo`: First-In, First-Out.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use super::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Age is tracked in each line's `recency` field as a logical timestamp
/// supplied by the caller; smaller means older.
pub trait ReplacementPolicy: Send + Sync + std::fmt::Debug {
    /// Updates line state when an access hits `line`.
    ///
    /// # Arguments
    ///
    /// * `line` - The valid line whose tag matched.
    /// * `now` - Timestamp of the current access.
    fn on_hit(&self, line: &mut CacheLine, now: u64);

    /// Updates line state when `line` receives a new block (fill or eviction).
    fn on_fill(&self, line: &mut CacheLine, now: u64) {
        line.recency = now;
    }

    /// Selects the way to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `set` - The set's lines; every line is valid and the slice is non-empty.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn victim(&self, set: &[CacheLine]) -> usize {
        oldest(set)
    }
}

/// Returns the index of the line with the smallest `recency`.
///
/// Ties resolve to the lowest index. Returns 0 for an empty slice.
pub fn oldest(set: &[CacheLine]) -> usize {
    set.iter()
        .enumerate()
        .min_by_key(|&(way, line)| (line.recency, way))
        .map_or(0, |(way, _)| way)
}

/// Builds the policy implementation selected by `kind`.
pub fn build(kind: PolicyType) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
    }
}
