//! Simulator Tests.
//!
//! End-to-end replays of short traces: per-record outcomes, modify expansion,
//! the access clock, verbose output and error propagation.

use std::io::{self, Cursor};

use cachesim_core::cache::Outcome;
use cachesim_core::common::{Operation, ParseError, SimError, TraceError};
use cachesim_core::config::CacheConfig;
use cachesim_core::sim::{Simulator, StepResult};
use cachesim_core::stats::CacheStats;
use cachesim_core::trace::{DataRecord, TraceReader};
use pretty_assertions::assert_eq;

use crate::common::builder::trace::TraceBuilder;
use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Record stepping
// ══════════════════════════════════════════════════════════

/// One set, one line, one-byte blocks: every distinct address conflicts.
#[test]
fn direct_mapped_single_line_thrash() {
    let mut ctx = TestContext::new(0, 1, 0);
    let trace = TraceBuilder::new().load(0).load(1).load(0);

    assert_eq!(
        ctx.outcomes(&trace.records()),
        vec![Outcome::MissFill, Outcome::MissEvict, Outcome::MissEvict]
    );
    assert_eq!(ctx.stats().to_string(), "hits:0 misses:3 evictions:2");
}

#[test]
fn modify_is_a_miss_then_a_hit() {
    let mut ctx = TestContext::new(0, 1, 4);
    let results = ctx.run(&TraceBuilder::new().modify(0x10).records());

    assert_eq!(
        results,
        vec![StepResult {
            first: Outcome::MissFill,
            second: Some(Outcome::Hit),
        }]
    );
    assert_eq!(ctx.stats(), CacheStats { hits: 1, misses: 1, evictions: 0 });
    assert_eq!(ctx.sim.clock(), 2);
}

#[test]
fn modify_of_resident_block_is_two_hits() {
    let mut ctx = TestContext::new(1, 1, 4);
    let trace = TraceBuilder::new().load(0x20).modify(0x24);
    assert_eq!(
        ctx.outcomes(&trace.records()),
        vec![Outcome::MissFill, Outcome::Hit, Outcome::Hit]
    );
}

/// The store half of a modify never evicts, even when the load half did.
#[test]
fn modify_after_conflict_evicts_once() {
    let mut ctx = TestContext::new(0, 1, 4);
    let trace = TraceBuilder::new().load(0x00).modify(0x10);
    assert_eq!(
        ctx.outcomes(&trace.records()),
        vec![Outcome::MissFill, Outcome::MissEvict, Outcome::Hit]
    );
    assert_eq!(ctx.stats(), CacheStats { hits: 1, misses: 2, evictions: 1 });
}

/// Load and store are identical for the cache model.
#[test]
fn store_behaves_like_load() {
    let mut loads = TestContext::new(2, 2, 3);
    let mut stores = TestContext::new(2, 2, 3);
    let addrs = [0x00, 0x40, 0x80, 0x00, 0xc0, 0x40, 0x08];

    let load_trace = addrs.iter().fold(TraceBuilder::new(), |t, &a| t.load(a));
    let store_trace = addrs.iter().fold(TraceBuilder::new(), |t, &a| t.store(a));

    assert_eq!(
        loads.outcomes(&load_trace.records()),
        stores.outcomes(&store_trace.records())
    );
    assert_eq!(loads.stats(), stores.stats());
}

#[test]
fn step_result_display_joins_outcomes() {
    let result = StepResult {
        first: Outcome::MissEvict,
        second: Some(Outcome::Hit),
    };
    assert_eq!(result.to_string(), "miss eviction hit");
    assert_eq!(result.outcomes().count(), 2);
}

// ══════════════════════════════════════════════════════════
// 2. Trace replay
// ══════════════════════════════════════════════════════════

/// A mixed trace on a 4-set, 2-way cache with 16-byte blocks.
#[test]
fn run_replays_reader_to_completion() {
    let trace = TraceBuilder::new()
        .instruction(0x400)
        .load(0x10)
        .modify(0x20)
        .load(0x22)
        .store(0x18)
        .load(0x110)
        .load(0x210)
        .modify(0x12);
    let mut sim = Simulator::new(&CacheConfig::new(2, 2, 4)).unwrap();

    let stats = sim
        .run(TraceReader::new(Cursor::new(trace.text().to_owned())), None)
        .unwrap();

    // 0x10 miss; 0x20 miss+hit; 0x22 hit; 0x18 hit; 0x110 miss (set 1 full);
    // 0x210 miss evicts 0x10; 0x12 miss evicts 0x110, then hits.
    assert_eq!(stats, CacheStats { hits: 4, misses: 5, evictions: 2 });
    assert_eq!(sim.clock(), 9);
}

#[test]
fn verbose_output_lists_each_record() {
    let trace = TraceBuilder::new().load(0x10).modify(0x20).load(0x10);
    let mut sim = Simulator::new(&CacheConfig::new(0, 1, 4)).unwrap();
    let mut out: Vec<u8> = Vec::new();

    let records = trace.records().into_iter().map(Ok::<_, TraceError>);
    let stats = sim.run(records, Some(&mut out)).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "L 10,1 miss\nM 20,1 miss eviction hit\nL 10,1 miss eviction\n"
    );
    assert_eq!(stats.to_string(), "hits:1 misses:3 evictions:2");
}

#[test]
fn run_stops_at_first_trace_error() {
    let mut sim = Simulator::new(&CacheConfig::new(0, 1, 0)).unwrap();
    let err = sim
        .run(TraceReader::new(Cursor::new(" L 0,1\n L 0,1\nbogus\n L 1,1\n")), None)
        .unwrap_err();

    match err {
        SimError::Trace(TraceError::Malformed { line, source, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(source, ParseError::UnknownOperation("bogus".into()));
        }
        other => panic!("unexpected error: {other}"),
    }
    // The two records before the bad line were still applied.
    assert_eq!(sim.stats(), CacheStats { hits: 1, misses: 1, evictions: 0 });
}

/// A verbose sink that rejects every write.
#[derive(Debug)]
struct BrokenSink;

impl io::Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn verbose_write_failure_is_reported() {
    let mut sim = Simulator::new(&CacheConfig::new(0, 1, 0)).unwrap();
    let records = vec![Ok::<_, TraceError>(DataRecord::new(Operation::Load, 0, 1))];
    let err = sim.run(records, Some(&mut BrokenSink)).unwrap_err();
    assert!(matches!(err, SimError::Output(_)), "{err}");
}

#[test]
fn invalid_geometry_is_rejected() {
    assert!(Simulator::new(&CacheConfig::new(40, 1, 30)).is_err());
}
