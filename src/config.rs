//! Configuration for section loading and decoding.
//!
//! Every field has a default, so a partial JSON document only needs to name
//! the values it overrides.

use crate::error::Result;
use crate::io::IOLimits;
use serde::{Deserialize, Serialize};

/// Master configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArangesConfig {
    /// Limits for reading object files from disk.
    pub io: IoConfig,
    /// Limits applied while decoding the section.
    pub decode: DecodeLimits,
}

impl ArangesConfig {
    /// Parse a configuration from JSON, filling unspecified fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// File reading limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Maximum object file size to open (default: 512MB).
    pub max_file_size: u64,
    /// Maximum bytes read from one file (default: 512MB).
    pub max_read_bytes: u64,
}

impl Default for IoConfig {
    fn default() -> Self {
        let limits = IOLimits::default();
        Self {
            max_file_size: limits.max_file_size,
            max_read_bytes: limits.max_read_bytes,
        }
    }
}

impl From<&IoConfig> for IOLimits {
    fn from(cfg: &IoConfig) -> Self {
        IOLimits {
            max_file_size: cfg.max_file_size,
            max_read_bytes: cfg.max_read_bytes,
        }
    }
}

/// Bounds on how much a single section may produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum number of sets (CUs) in one section (default: 1M).
    pub max_sets: usize,
    /// Maximum number of range entries across all sets (default: 16M).
    pub max_entries: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_sets: 1_000_000,
            max_entries: 16_000_000,
        }
    }
}

impl DecodeLimits {
    /// No bounds beyond available memory.
    pub fn unbounded() -> Self {
        Self {
            max_sets: usize::MAX,
            max_entries: usize::MAX,
        }
    }
}
