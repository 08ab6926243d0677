//! `dbids-core` Configuration Module
//!
//! Provides configuration file support via `dbids.toml` and environment
//! variables.
//!
//! # Priority (highest to lowest)
//!
//! 1. Environment variables (`DBIDS_*`, sections separated by `__`, e.g.
//!    `DBIDS_KNN__SORTED_MAX_K=32`)
//! 2. Configuration file (`dbids.toml`)
//! 3. Default values
//!
//! # Example
//!
//! ```toml
//! [allocator]
//! strategy = "reusing"
//!
//! [knn]
//! sorted_max_k = 32
//!
//! [collections]
//! initial_capacity = 64
//! set_conversion_threshold = 16
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::allocator::AllocatorStrategy;
use crate::collections::array::{DEFAULT_INITIAL_CAPACITY, SET_CONVERSION_THRESHOLD};

/// Largest accepted `knn.sorted_max_k`.
const MAX_SORTED_K: usize = 4096;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Allocator configuration section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Allocation strategy.
    pub strategy: AllocatorStrategy,
}

/// KNN configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnConfig {
    /// Largest `k` served by the sorted-array accumulator; larger `k` use
    /// the heap. `0` always selects the heap.
    pub sorted_max_k: usize,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self { sorted_max_k: 16 }
    }
}

/// Collections configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    /// Initial capacity of new growable arrays.
    pub initial_capacity: usize,
    /// Size above which set algebra converts an array operand to a hash
    /// set before probing it.
    pub set_conversion_threshold: usize,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            set_conversion_threshold: SET_CONVERSION_THRESHOLD,
        }
    }
}

/// Main `dbids-core` configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbidsConfig {
    /// Allocator configuration.
    pub allocator: AllocatorConfig,
    /// KNN configuration.
    pub knn: KnnConfig,
    /// Collections configuration.
    pub collections: CollectionsConfig,
}

impl DbidsConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("dbids.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading DBID configuration");
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Self::default()))
                .merge(Toml::file(path))
                .merge(Env::prefixed("DBIDS_").split("__")),
        )
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Self::default()))
                .merge(Toml::string(toml_str)),
        )
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        tracing::debug!(
            strategy = %config.allocator.strategy,
            sorted_max_k = config.knn.sorted_max_k,
            initial_capacity = config.collections.initial_capacity,
            "DBID configuration loaded"
        );
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.knn.sorted_max_k > MAX_SORTED_K {
            return Err(ConfigError::InvalidValue {
                key: "knn.sorted_max_k".to_string(),
                message: format!(
                    "value {} is out of range [0, {MAX_SORTED_K}]",
                    self.knn.sorted_max_k
                ),
            });
        }

        if self.collections.initial_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "collections.initial_capacity".to_string(),
                message: "value must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
