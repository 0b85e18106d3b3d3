// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Defaults and well-known names
//!
//! This module centralizes magic constants used throughout the fillscan crate.

use std::time::Duration;

/// Seconds in one day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Fill log read when no path is configured
pub const DEFAULT_TRADES_PATH: &str = "./trades.csv";

/// Simulated fetch latency for one day of range (about 10 µs per second of range)
pub const DEFAULT_FETCH_LATENCY_PER_DAY: Duration = Duration::from_millis(864);

/// Timestamp format of the `time` column in the fill log (UTC)
pub const FILL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Environment variable names read by [`FillscanConfig::from_env`](super::FillscanConfig::from_env)
pub mod env {
    /// Path of the fill log CSV
    pub const TRADES_PATH: &str = "FILLSCAN_TRADES_PATH";

    /// Simulated latency in milliseconds for one day of range; `0` disables it
    pub const FETCH_LATENCY_MS_PER_DAY: &str = "FILLSCAN_FETCH_LATENCY_MS_PER_DAY";

    /// `true`/`false`: merge cache entries into one per answered query
    pub const COALESCE_RANGES: &str = "FILLSCAN_COALESCE_RANGES";
}
