// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for fillscan
//!
//! # Example: Using defaults
//!
//! ```rust
//! use fillscan::FillscanConfig;
//!
//! // Reads ./trades.csv and simulates ~864ms of latency per day of range
//! let config = FillscanConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use fillscan::FillscanConfigBuilder;
//! use std::time::Duration;
//!
//! let config = FillscanConfigBuilder::with_defaults()
//!     .trades_path("data/fills.csv")
//!     .fetch_latency_per_day(Duration::from_millis(100))
//!     .coalesce_ranges(true)
//!     .build();
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

pub mod constants;

use constants::{env, DEFAULT_FETCH_LATENCY_PER_DAY, DEFAULT_TRADES_PATH};

/// Configuration for loading the fill log and answering queries
///
/// Use [`FillscanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillscanConfig {
    /// Fill log CSV loaded at startup
    /// Default: `./trades.csv`
    pub trades_path: PathBuf,

    /// Simulated latency of a fetch covering one day of range
    /// Default: 864ms. `Duration::ZERO` disables the simulation.
    pub fetch_latency_per_day: Duration,

    /// Replace the cache entries inside each answered query with one entry for the whole query
    /// Default: false
    pub coalesce_ranges: bool,
}

impl Default for FillscanConfig {
    fn default() -> Self {
        Self {
            trades_path: PathBuf::from(DEFAULT_TRADES_PATH),
            fetch_latency_per_day: DEFAULT_FETCH_LATENCY_PER_DAY,
            coalesce_ranges: false,
        }
    }
}

impl FillscanConfig {
    /// Create minimal config with no simulated latency
    ///
    /// Suitable for testing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fillscan::FillscanConfig;
    /// use std::time::Duration;
    ///
    /// let config = FillscanConfig::minimal();
    /// assert_eq!(config.fetch_latency_per_day, Duration::ZERO);
    /// ```
    pub fn minimal() -> Self {
        Self {
            fetch_latency_per_day: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Build a config from environment variables, falling back to defaults
    ///
    /// Reads the variables named in [`constants::env`]. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` uses the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = FillscanConfigBuilder::with_defaults();

        if let Some(path) = lookup(env::TRADES_PATH) {
            builder = builder.trades_path(path);
        }

        if let Some(raw) = lookup(env::FETCH_LATENCY_MS_PER_DAY) {
            let millis = u64::from_str(raw.trim())
                .map_err(|e| ConfigError::invalid_value(env::FETCH_LATENCY_MS_PER_DAY, &raw, e))?;
            builder = builder.fetch_latency_per_day(Duration::from_millis(millis));
        }

        if let Some(raw) = lookup(env::COALESCE_RANGES) {
            let enabled = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::invalid_value(
                        env::COALESCE_RANGES,
                        &raw,
                        "expected true or false",
                    ))
                }
            };
            builder = builder.coalesce_ranges(enabled);
        }

        Ok(builder.build())
    }
}

/// Builder for [`FillscanConfig`]
///
/// # Example
///
/// ```rust
/// use fillscan::FillscanConfigBuilder;
///
/// let config = FillscanConfigBuilder::new()
///     .trades_path("trades.csv")
///     .build();
/// ```
pub struct FillscanConfigBuilder {
    config: FillscanConfig,
}

impl Default for FillscanConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FillscanConfigBuilder {
    /// Create a new builder with minimal defaults (no simulated latency)
    pub fn new() -> Self {
        Self {
            config: FillscanConfig::minimal(),
        }
    }

    /// Start with [`FillscanConfig::default`]
    pub fn with_defaults() -> Self {
        Self {
            config: FillscanConfig::default(),
        }
    }

    /// Set the fill log path
    pub fn trades_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.trades_path = path.into();
        self
    }

    /// Set the simulated latency for one day of range
    pub fn fetch_latency_per_day(mut self, latency: Duration) -> Self {
        self.config.fetch_latency_per_day = latency;
        self
    }

    /// Enable or disable coalescing of answered query ranges
    pub fn coalesce_ranges(mut self, enabled: bool) -> Self {
        self.config.coalesce_ranges = enabled;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> FillscanConfig {
        self.config
    }
}
