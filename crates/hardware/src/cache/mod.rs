//! Set-Associative Cache Simulator.
//!
//! This module implements the cache store and its replacement engine. It models
//! which blocks are resident in each set and classifies every access as a hit,
//! a miss that fills an empty line, or a miss that evicts a valid line. Data,
//! dirty state and timing are not modeled.

/// Cache replacement policy implementations (LRU, FIFO).
pub mod policies;

use std::fmt;

use tracing::{debug, trace};

use self::policies::ReplacementPolicy;
use crate::common::{AddressLayout, ConfigError};
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Cache line entry containing validity, tag and recency stamp.
///
/// An invalid line is empty regardless of its tag and recency contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the resident block.
    pub tag: u64,
    /// Logical timestamp used by the replacement policy to order lines.
    pub recency: u64,
}

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The block was resident.
    Hit,
    /// The block was absent and was placed in an empty line.
    MissFill,
    /// The block was absent and displaced the set's victim line.
    MissEvict,
}

impl Outcome {
    /// Whether the access hit.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Whether the access displaced a valid block.
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::MissEvict)
    }
}

impl fmt::Display for Outcome {
    /// Formats the outcome the way verbose trace output reports it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::MissFill => write!(f, "miss"),
            Self::MissEvict => write!(f, "miss eviction"),
        }
    }
}

/// Cache simulator implementing a set-associative cache with a configurable policy.
///
/// Lines live in one flat buffer indexed by `set * ways + way`. The store is
/// allocated once with every line invalid and never resized.
#[derive(Debug)]
pub struct CacheSim {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    layout: AddressLayout,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
}

impl CacheSim {
    /// Creates a new cache simulator with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache geometry and replacement policy.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CacheConfig::validate`] if the
    /// geometry cannot be simulated.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let num_sets = config.num_sets();
        let ways = config.lines_per_set;
        debug!(
            sets = num_sets,
            ways,
            block_bytes = config.block_bytes(),
            policy = ?config.policy,
            "allocating cache store"
        );

        Ok(Self {
            lines: vec![CacheLine::default(); num_sets * ways],
            num_sets,
            ways,
            layout: config.layout(),
            policy: policies::build(config.policy),
            stats: CacheStats::default(),
        })
    }

    /// Number of sets in the store.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity (lines per set).
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Address field layout used to decode addresses.
    pub const fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The lines of set `set_index`.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= self.num_sets()`.
    pub fn set(&self, set_index: usize) -> &[CacheLine] {
        let base = set_index * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// Iterates over every set in index order.
    pub fn sets(&self) -> impl Iterator<Item = &[CacheLine]> {
        self.lines.chunks_exact(self.ways)
    }

    /// Checks whether the block containing `addr` is resident, without
    /// touching counters or recency.
    pub fn contains(&self, addr: u64) -> bool {
        let fields = self.layout.decode(addr);
        self.set(fields.set_index as usize)
            .iter()
            .any(|line| line.valid && line.tag == fields.tag)
    }

    /// Accesses the block containing `addr` at logical time `now`.
    ///
    /// Decodes the address with the configured layout and delegates to
    /// [`access_block`](Self::access_block).
    pub fn access(&mut self, addr: u64, now: u64) -> Outcome {
        let fields = self.layout.decode(addr);
        self.access_block(fields.set_index as usize, fields.tag, now)
    }

    /// Looks up `tag` in set `set_index`, updating counters and recency.
    ///
    /// 1. A valid line with a matching tag is a hit; the policy refreshes it.
    /// 2. Otherwise the access misses and the lowest-indexed empty line is filled.
    /// 3. If the set is full, the policy's victim is overwritten and counted as an eviction.
    ///
    /// After this call a valid line holding `tag` is always present in the
    /// set, so an immediate repeat of the same access hits.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= self.num_sets()`. Indices produced by
    /// [`AddressLayout::decode`] for this cache's layout are always in range.
    pub fn access_block(&mut self, set_index: usize, tag: u64, now: u64) -> Outcome {
        let base = set_index * self.ways;
        let set = &mut self.lines[base..base + self.ways];

        if let Some(line) = set.iter_mut().find(|line| line.valid && line.tag == tag) {
            self.policy.on_hit(line, now);
            self.stats.hits += 1;
            trace!(set = set_index, tag, "hit");
            return Outcome::Hit;
        }

        self.stats.misses += 1;

        let (way, outcome) = match set.iter().position(|line| !line.valid) {
            Some(way) => (way, Outcome::MissFill),
            None => {
                self.stats.evictions += 1;
                (self.policy.victim(set), Outcome::MissEvict)
            }
        };

        let line = &mut set[way];
        if outcome.is_eviction() {
            trace!(set = set_index, way, victim = line.tag, tag, "evict");
        } else {
            trace!(set = set_index, way, tag, "fill");
        }
        line.valid = true;
        line.tag = tag;
        self.policy.on_fill(line, now);

        outcome
    }
}
