// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Interval-keyed caching of aggregate metrics.
//!
//! - [`IntervalCache`]: sorted store of disjoint ranges and their metrics
//! - `resolver`: classifies cached entries against a query ([`IntervalCache::resolve`])
//! - `updater`: folds fetched gaps back in ([`IntervalCache::apply_gap`])

use std::fmt;

use serde::{Deserialize, Serialize};

mod interval_cache;
mod resolver;
mod updater;

pub use interval_cache::IntervalCache;
pub use resolver::{Gap, GapKind, Overlap, Resolution, StaleEntry};

/// Statistics about cache effectiveness across queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Queries answered
    pub queries: u64,
    /// Queries answered without any fetch
    pub full_hits: u64,
    /// Gap ranges fetched from the event source
    pub gap_fetches: u64,
    /// Seconds of range fetched from the event source
    pub seconds_fetched: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Percentage of queries served entirely from cache (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        if self.queries == 0 {
            0.0
        } else {
            (self.full_hits as f64 / self.queries as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "queries={}, full_hits={}, gap_fetches={}, seconds_fetched={}, entries={}, hit_rate={:.1}%",
            self.queries,
            self.full_hits,
            self.gap_fetches,
            self.seconds_fetched,
            self.entries,
            self.hit_rate()
        )
    }
}
