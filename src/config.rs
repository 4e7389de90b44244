//! Configuration for the dispatch engine and its demo driver
//!
//! Loaded from a TOML file; every field has a default so an absent file or
//! an empty document yields a working configuration. The `[queue]` section
//! maps directly onto the per-level capacity policy.

use crate::queue::{CapacityMap, OrderPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TransactorConfig {
    /// Per-level queue capacities
    pub queue: CapacityMap,
    /// Demo driver knobs
    pub demo: DemoSection,
}

/// Settings for the producer/arbiter demo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSection {
    /// Number of producer threads
    pub producers: usize,
    /// Requests each producer registers
    pub requests_per_producer: usize,
    /// Lane visiting order used by the demo arbiter
    pub order: OrderPolicy,
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            producers: 2,
            requests_per_producer: 8,
            order: OrderPolicy::Descending,
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl TransactorConfig {
    /// Load and validate a configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field consistency. Zero queue capacities are deliberately
    /// legal; a lane with no room simply settles or rejects.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.demo.producers == 0 {
            return Err(ConfigError::Invalid(
                "demo.producers must be at least 1".to_string(),
            ));
        }
        if self.demo.requests_per_producer == 0 {
            return Err(ConfigError::Invalid(
                "demo.requests_per_producer must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
