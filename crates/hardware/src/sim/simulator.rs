//! Simulator: owns the cache store and the run-wide access clock.
//!
//! One `Simulator` is one run. Counters and cache contents are never shared,
//! so several configurations (or several transpose strategies) can be scored
//! side by side by creating several simulators.

use std::fmt;
use std::io::Write;

use tracing::debug;

use crate::cache::{CacheSim, Outcome};
use crate::common::{ConfigError, Operation, SimError, TraceError};
use crate::config::CacheConfig;
use crate::stats::CacheStats;
use crate::trace::DataRecord;

/// Outcomes of the one or two cache accesses performed for a data record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepResult {
    /// Outcome of the load, store, or the load half of a modify.
    pub first: Outcome,
    /// Outcome of the store half of a modify; always [`Outcome::Hit`].
    pub second: Option<Outcome>,
}

impl StepResult {
    /// Iterates over the outcomes in access order.
    pub fn outcomes(&self) -> impl Iterator<Item = Outcome> {
        std::iter::once(self.first).chain(self.second)
    }
}

impl fmt::Display for StepResult {
    /// Formats the outcomes space-separated, e.g. `miss eviction hit`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        if let Some(second) = self.second {
            write!(f, " {second}")?;
        }
        Ok(())
    }
}

/// Top-level simulator: cache state plus the logical clock.
#[derive(Debug)]
pub struct Simulator {
    /// Cache store and counters.
    pub cache: CacheSim,
    clock: u64,
}

impl Simulator {
    /// Creates a simulator with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is rejected.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: CacheSim::new(config)?,
            clock: 0,
        })
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of cache accesses issued so far.
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Issues one cache access, advancing the clock.
    fn tick(&mut self, addr: u64) -> Outcome {
        self.clock += 1;
        self.cache.access(addr, self.clock)
    }

    /// Applies one data record to the cache.
    ///
    /// Loads and stores access the cache once. A modify accesses it twice at
    /// the same address; the first access leaves the block resident, so the
    /// second is always a hit.
    pub fn step(&mut self, rec: &DataRecord) -> StepResult {
        let first = self.tick(rec.address);
        let second = match rec.op {
            Operation::Load | Operation::Store => None,
            Operation::Modify => {
                let second = self.tick(rec.address);
                debug_assert!(second.is_hit(), "store half of a modify must hit");
                Some(second)
            }
        };
        StepResult { first, second }
    }

    /// Replays a stream of data records and returns the final counters.
    ///
    /// When `verbose` is set, one line per record is written to it in the form
    /// `L 10,1 miss eviction`.
    ///
    /// # Errors
    ///
    /// Stops at the first trace error and returns it; counters accumulated
    /// up to that point are not reported. Also fails if writing verbose
    /// output fails.
    pub fn run<I>(
        &mut self,
        records: I,
        mut verbose: Option<&mut dyn Write>,
    ) -> Result<CacheStats, SimError>
    where
        I: IntoIterator<Item = Result<DataRecord, TraceError>>,
    {
        let mut count = 0u64;
        for rec in records {
            let rec = rec?;
            let result = self.step(&rec);
            count += 1;
            if let Some(out) = verbose.as_deref_mut() {
                writeln!(out, "{} {:x},{} {}", rec.op, rec.address, rec.size, result)?;
            }
        }

        let stats = self.stats();
        debug!(
            records = count,
            accesses = self.clock,
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            "trace replay finished"
        );
        Ok(stats)
    }
}
