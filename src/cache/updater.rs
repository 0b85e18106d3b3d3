// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Folding freshly fetched gap metrics back into the cache

use tracing::debug;

use crate::cache::{Gap, GapKind, IntervalCache, StaleEntry};
use crate::errors::CacheError;
use crate::types::{Interval, Metrics};

impl IntervalCache {
    /// Store the metrics fetched for `gap`, splitting the stale entries it refetched
    ///
    /// For a [`GapKind::Refetch`] gap, every stale entry whose refetch range is
    /// `gap.range` is handled first:
    /// - left/right overlaps are replaced by their residual range, holding
    ///   `stale.metrics - gap_metrics`
    /// - a containing entry is removed
    ///
    /// Then `gap.range` itself is inserted. Stale entries belonging to other
    /// gaps are left alone, and uncovered gaps never touch stale entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if an insert would overlap an existing entry,
    /// which means the stale list did not describe the current cache.
    pub fn apply_gap(
        &mut self,
        gap: &Gap,
        gap_metrics: &Metrics,
        stale: &[StaleEntry],
    ) -> Result<(), CacheError> {
        if gap.kind == GapKind::Refetch {
            for entry in stale.iter().filter(|entry| entry.refetch == gap.range) {
                self.remove(&entry.cached);

                if let Some(residual_range) = entry.residual_range() {
                    let residual = entry.metrics.residual(gap_metrics);
                    debug!(
                        stale = %entry.cached,
                        residual = %residual_range,
                        residual_count = residual.count,
                        "Split stale cache entry"
                    );
                    self.insert(residual_range, residual)?;
                } else {
                    debug!(stale = %entry.cached, "Dropped cache entry containing the query");
                }
            }
        }

        self.insert(gap.range, gap_metrics.clone())?;

        debug_assert!(
            self.check_disjoint().is_ok(),
            "cache entries overlap after applying gap {}",
            gap.range
        );
        Ok(())
    }

    /// Replace every entry inside `query` with a single entry for the whole range
    ///
    /// Returns `false` without touching the cache when some entry overlapping the
    /// query is not contained in it, or when the entries do not tile the query.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if reinsertion fails.
    pub fn coalesce(&mut self, query: Interval, total: Metrics) -> Result<bool, CacheError> {
        let inside: Vec<Interval> = self
            .overlapping(&query)
            .into_iter()
            .map(|(range, _)| range)
            .collect();

        let tiles = inside.first().map(Interval::start) == Some(query.start())
            && inside.last().map(Interval::end) == Some(query.end())
            && inside.windows(2).all(|pair| pair[0].end() == pair[1].start());
        if !tiles {
            return Ok(false);
        }

        for range in &inside {
            self.remove(range);
        }
        self.insert(query, total)?;

        debug!(query = %query, merged = inside.len(), "Coalesced cache entries");
        Ok(true)
    }
}
