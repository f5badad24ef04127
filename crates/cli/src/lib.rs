//! Shared setup for the cachesim command-line tools.

use tracing_subscriber::EnvFilter;

use cachesim_core::config::{Config, ReplacementPolicy};

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Diagnostics go to stderr so that summaries and verbose traces on stdout
/// stay machine-parseable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Settings given as command-line flags.
///
/// Each flag that is present replaces the matching field of a loaded
/// [`Config`]; `verbose` is OR-ed with the file's `general.verbose`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    /// `-s`
    pub set_index_bits: Option<u32>,
    /// `-E`
    pub lines_per_set: Option<usize>,
    /// `-b`
    pub block_offset_bits: Option<u32>,
    /// `--policy`
    pub policy: Option<ReplacementPolicy>,
    /// `-v`
    pub verbose: bool,
}

impl FlagOverrides {
    /// Applies the flags on top of `config`.
    ///
    /// The result is not validated; call
    /// [`CacheConfig::validate`](cachesim_core::config::CacheConfig::validate)
    /// on `cache` before simulating.
    pub fn apply(&self, mut config: Config) -> Config {
        let cache = &mut config.cache;
        if let Some(s) = self.set_index_bits {
            cache.set_index_bits = s;
        }
        if let Some(e) = self.lines_per_set {
            cache.lines_per_set = e;
        }
        if let Some(b) = self.block_offset_bits {
            cache.block_offset_bits = b;
        }
        if let Some(policy) = self.policy {
            cache.policy = policy;
        }
        config.general.verbose |= self.verbose;
        config
    }
}
