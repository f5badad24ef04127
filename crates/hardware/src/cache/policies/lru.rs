//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been touched for the longest time.
//! Every hit and every fill stamps the line with the access timestamp, so the
//! line with the smallest stamp in a full set is the least recently used one.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1)
//!   - `victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** one 64-bit stamp per line
//! - **Best Case:** Working sets that fit the set's ways with good temporal locality
//! - **Worst Case:** Cyclic scans one block larger than the set (every access misses)

use super::ReplacementPolicy;
use crate::cache::CacheLine;

/// LRU Policy. Stateless; age lives in the lines themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Refreshes the line's stamp, making it the most recently used.
    fn on_hit(&self, line: &mut CacheLine, now: u64) {
        line.recency = now;
    }
}
