//! `csim` End-to-End Tests.
//!
//! Runs the built binary on temporary trace and config files and checks
//! stdout, stderr and the exit status.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

/// Two one-byte blocks fighting over a single one-line set.
const PING_PONG: &str = " L 0,1\n L 1,1\n L 0,1\n";

fn csim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_csim"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Successful runs
// ══════════════════════════════════════════════════════════

#[test]
fn prints_summary_for_flag_geometry() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);

    let out = csim(&["-s", "0", "-E", "1", "-b", "0", "-t", path_str(&trace)]);

    assert!(out.status.success());
    assert_eq!(stdout(&out), "hits:0 misses:3 evictions:2\n");
}

#[test]
fn verbose_flag_prints_each_record() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);

    let out = csim(&["-v", "-s", "0", "-E", "1", "-b", "0", "-t", path_str(&trace)]);

    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "L 0,1 miss\nL 1,1 miss eviction\nL 0,1 miss eviction\nhits:0 misses:3 evictions:2\n"
    );
}

#[test]
fn results_file_holds_counts() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);
    let results = dir.path().join(".csim_results");

    let out = csim(&[
        "-s", "0", "-E", "2", "-b", "0", "-t", path_str(&trace), "--results", path_str(&results),
    ]);

    assert!(out.status.success());
    assert_eq!(fs::read_to_string(&results).unwrap(), "1 2 0\n");
}

// ══════════════════════════════════════════════════════════
// 2. Configuration files
// ══════════════════════════════════════════════════════════

#[test]
fn config_file_supplies_geometry_and_verbosity() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);
    let config = write_file(
        &dir,
        "cache.json",
        r#"{ "general": { "verbose": true },
             "cache": { "set_index_bits": 0, "lines_per_set": 1, "block_offset_bits": 0 } }"#,
    );

    let out = csim(&["--config", path_str(&config), "-t", path_str(&trace)]);

    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "L 0,1 miss\nL 1,1 miss eviction\nL 0,1 miss eviction\nhits:0 misses:3 evictions:2\n"
    );
}

#[test]
fn flags_override_config_file() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);
    let config = write_file(
        &dir,
        "cache.json",
        r#"{ "cache": { "set_index_bits": 0, "lines_per_set": 1, "block_offset_bits": 0 } }"#,
    );

    let out = csim(&["--config", path_str(&config), "-E", "2", "-t", path_str(&trace)]);

    assert!(out.status.success());
    assert_eq!(stdout(&out), "hits:1 misses:2 evictions:0\n");
}

#[test]
fn unreadable_config_file_fails() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);
    let config = write_file(&dir, "cache.json", "{ not json");

    let out = csim(&["--config", path_str(&config), "-t", path_str(&trace)]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains("invalid config"));
}

// ══════════════════════════════════════════════════════════
// 3. Usage errors (exit 2)
// ══════════════════════════════════════════════════════════

#[test]
fn zero_associativity_prints_usage() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);

    let out = csim(&["-s", "0", "-E", "0", "-b", "0", "-t", path_str(&trace)]);

    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());
    let err = stderr(&out);
    assert!(err.contains("lines per set (E) must be at least 1"));
    assert!(err.contains("Usage"));
}

#[test]
fn oversized_cache_prints_usage() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);

    let out = csim(&["-s", "20", "-E", "128", "-b", "4", "-t", path_str(&trace)]);

    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());
}

#[test]
fn invalid_override_of_valid_config_prints_usage() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);
    let config = write_file(&dir, "cache.json", r#"{ "cache": { "lines_per_set": 2 } }"#);

    let out = csim(&["--config", path_str(&config), "-E", "0", "-t", path_str(&trace)]);

    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());
}

#[test]
fn missing_geometry_without_config_prints_usage() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "pp.trace", PING_PONG);

    let out = csim(&["-E", "1", "-b", "0", "-t", path_str(&trace)]);

    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("Usage"));
}

#[test]
fn help_mentions_line_limit() {
    let out = csim(&["-h"]);

    assert!(out.status.success());
    assert!(stdout(&out).contains("2^26"));
}

// ══════════════════════════════════════════════════════════
// 4. Run failures (exit 1, no summary)
// ══════════════════════════════════════════════════════════

#[test]
fn malformed_trace_fails_without_summary() {
    let dir = tempdir().unwrap();
    let trace = write_file(&dir, "bad.trace", " L 0,1\n L 1,1\n L zz,1\n");

    let out = csim(&["-s", "0", "-E", "1", "-b", "0", "-t", path_str(&trace)]);

    assert_eq!(out.status.code(), Some(1));
    assert!(!stdout(&out).contains("hits:"));
    let err = stderr(&out);
    assert!(err.contains("line 3"));
    assert_eq!(err.matches("line 3").count(), 1);
}

#[test]
fn missing_trace_file_fails_without_summary() {
    let dir = tempdir().unwrap();
    let absent = dir.path().join("absent.trace");

    let out = csim(&["-s", "4", "-E", "1", "-b", "4", "-t", path_str(&absent)]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains("absent.trace"));
}
