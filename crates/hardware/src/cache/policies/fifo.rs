//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest-filled line in a set, regardless of how recently
//! it was accessed. The fill timestamp is written once when a block arrives and
//! never refreshed by hits.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1)
//!   - `victim()`: O(W)
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::ReplacementPolicy;
use crate::cache::CacheLine;

/// FIFO Policy. Stateless; fill order lives in the lines themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn on_hit(&self, _line: &mut CacheLine, _now: u64) {}
}
