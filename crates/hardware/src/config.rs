//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** The lab's reference geometry (1 KiB direct-mapped, 32-byte blocks).
//! 2. **Structures:** Cache geometry and general run settings.
//! 3. **Enums:** Replacement policy selection.
//! 4. **Validation:** Rejection of geometries the simulator cannot model.
//!
//! Configuration is built from command-line flags or deserialized from JSON.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{MAX_INDEX_OFFSET_BITS, MAX_TOTAL_LINES};
use crate::common::{AddressLayout, ConfigError};

/// Default configuration constants for the simulator.
///
/// These match the cache the transpose workload is graded against.
mod defaults {
    /// Default number of set-index bits (32 sets).
    pub const SET_INDEX_BITS: u32 = 5;

    /// Default associativity (1 line per set = direct-mapped).
    pub const LINES_PER_SET: usize = 1;

    /// Default number of block-offset bits (32-byte blocks).
    pub const BLOCK_OFFSET_BITS: u32 = 5;
}

/// Cache replacement policy algorithms.
///
/// Specifies how the victim line is chosen when a miss lands in a full set.
/// Both policies fill the lowest-indexed empty line first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line whose last access (hit or fill) is oldest.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// First In First Out replacement policy.
    ///
    /// Evicts the line that was filled earliest; hits do not refresh age.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
}

impl std::str::FromStr for ReplacementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            other => Err(format!("unknown replacement policy '{other}' (expected lru or fifo)")),
        }
    }
}

/// Geometry and policy of the simulated cache.
///
/// The cache has `2^set_index_bits` sets of `lines_per_set` lines, each
/// holding a `2^block_offset_bits`-byte block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Number of set-index bits (`s`).
    #[serde(default = "CacheConfig::default_set_index_bits")]
    pub set_index_bits: u32,

    /// Associativity, i.e. lines per set (`E`).
    #[serde(default = "CacheConfig::default_lines_per_set")]
    pub lines_per_set: usize,

    /// Number of block-offset bits (`b`).
    #[serde(default = "CacheConfig::default_block_offset_bits")]
    pub block_offset_bits: u32,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Creates an LRU cache configuration with the given `s`, `E` and `b`.
    pub const fn new(set_index_bits: u32, lines_per_set: usize, block_offset_bits: u32) -> Self {
        Self {
            set_index_bits,
            lines_per_set,
            block_offset_bits,
            policy: ReplacementPolicy::Lru,
        }
    }

    /// Returns a copy of this configuration using `policy`.
    pub const fn with_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn default_set_index_bits() -> u32 {
        defaults::SET_INDEX_BITS
    }

    fn default_lines_per_set() -> usize {
        defaults::LINES_PER_SET
    }

    fn default_block_offset_bits() -> u32 {
        defaults::BLOCK_OFFSET_BITS
    }

    /// Checks that the geometry can be simulated.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroAssociativity`] when `lines_per_set == 0`.
    /// - [`ConfigError::FieldsTooWide`] when `s + b` leaves no tag bit.
    /// - [`ConfigError::TooManyLines`] when `2^s * E` exceeds the supported line count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines_per_set == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if self.set_index_bits.saturating_add(self.block_offset_bits) > MAX_INDEX_OFFSET_BITS {
            return Err(ConfigError::FieldsTooWide {
                set_index_bits: self.set_index_bits,
                block_offset_bits: self.block_offset_bits,
                max: MAX_INDEX_OFFSET_BITS,
            });
        }
        let total = 1u64
            .checked_shl(self.set_index_bits)
            .and_then(|sets| sets.checked_mul(self.lines_per_set as u64));
        match total {
            Some(lines) if lines <= MAX_TOTAL_LINES => Ok(()),
            _ => Err(ConfigError::TooManyLines {
                set_index_bits: self.set_index_bits,
                lines_per_set: self.lines_per_set,
                max: MAX_TOTAL_LINES,
            }),
        }
    }

    /// Address field layout implied by this geometry.
    pub const fn layout(&self) -> AddressLayout {
        AddressLayout::new(self.set_index_bits, self.block_offset_bits)
    }

    /// Number of sets (`2^s`).
    ///
    /// Only meaningful for a configuration that passed [`validate`](Self::validate).
    pub const fn num_sets(&self) -> usize {
        1usize << self.set_index_bits
    }

    /// Block size in bytes (`2^b`).
    pub const fn block_bytes(&self) -> u64 {
        1u64 << self.block_offset_bits
    }

    /// Total data capacity in bytes (`2^s * E * 2^b`), saturating on overflow.
    pub const fn size_bytes(&self) -> u64 {
        (self.num_sets() as u64)
            .saturating_mul(self.lines_per_set as u64)
            .saturating_mul(self.block_bytes())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(
            defaults::SET_INDEX_BITS,
            defaults::LINES_PER_SET,
            defaults::BLOCK_OFFSET_BITS,
        )
    }
}

/// General run settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Print the outcome of every data record.
    #[serde(default)]
    pub verbose: bool,
}

/// Root configuration for a simulation run.
///
/// Every section is optional in JSON; missing fields take the defaults.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Config, ReplacementPolicy};
///
/// let json = r#"{
///     "general": { "verbose": true },
///     "cache": { "set_index_bits": 4, "lines_per_set": 2, "block_offset_bits": 4, "policy": "FIFO" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.verbose);
/// assert_eq!(config.cache.lines_per_set, 2);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Fifo);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General run settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache geometry and policy
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON, or any error from
    /// [`CacheConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.cache.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_json`](Self::from_json).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
