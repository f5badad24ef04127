//! Trace-driven cache simulator CLI.
//!
//! Replays a memory trace through one set-associative cache and prints
//! `hits:<n> misses:<n> evictions:<n>`. Flags follow the reference lab simulator:
//!
//! ```text
//! csim [-hv] -s <num> -E <num> -b <num> -t <file>
//! ```
//!
//! With `--config <file.json>` the geometry comes from the file and `-s`,
//! `-E`, `-b` become optional overrides.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::info;

use cachesim_cli::FlagOverrides;
use cachesim_core::config::{Config, ReplacementPolicy};
use cachesim_core::sim::loader;

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a memory trace through a set-associative cache and count hits, misses and evictions.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace\n  csim --config cache.json -E 4 -t traces/yi.trace"
)]
struct Cli {
    /// Print the outcome of every data record.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Number of set index bits (the cache has 2^s sets; 2^s * E may not exceed 2^26 lines).
    #[arg(short = 's', value_name = "num", required_unless_present = "config")]
    set_index_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', value_name = "num", required_unless_present = "config")]
    lines_per_set: Option<usize>,

    /// Number of block offset bits (blocks are 2^b bytes).
    #[arg(short = 'b', value_name = "num", required_unless_present = "config")]
    block_offset_bits: Option<u32>,

    /// Trace file.
    #[arg(short = 't', value_name = "file")]
    trace: PathBuf,

    /// Replacement policy (lru or fifo). Defaults to lru.
    #[arg(long)]
    policy: Option<ReplacementPolicy>,

    /// JSON configuration file; flags given on the command line override it.
    #[arg(long, value_name = "file")]
    config: Option<PathBuf>,

    /// Also write "<hits> <misses> <evictions>" to this file.
    #[arg(long, value_name = "file")]
    results: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> FlagOverrides {
        FlagOverrides {
            set_index_bits: self.set_index_bits,
            lines_per_set: self.lines_per_set,
            block_offset_bits: self.block_offset_bits,
            policy: self.policy,
            verbose: self.verbose,
        }
    }
}

fn main() -> ExitCode {
    cachesim_cli::init_tracing();
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("csim: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    let config = cli.overrides().apply(base);
    if let Err(e) = config.cache.validate() {
        Cli::command().error(ErrorKind::ValueValidation, e).exit();
    }
    info!(cache = ?config.cache, trace = %cli.trace.display(), "starting simulation");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let verbose: Option<&mut dyn Write> = if config.general.verbose {
        Some(&mut out)
    } else {
        None
    };

    let stats = match loader::simulate_file(&config.cache, &cli.trace, verbose) {
        Ok(stats) => stats,
        Err(e) => {
            let _ = out.flush();
            eprintln!("csim: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = writeln!(out, "{stats}").and_then(|()| out.flush()) {
        eprintln!("csim: cannot write summary: {e}");
        return ExitCode::FAILURE;
    }

    if let Some(path) = &cli.results {
        if let Err(e) = loader::write_results(path, &stats) {
            eprintln!("csim: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
