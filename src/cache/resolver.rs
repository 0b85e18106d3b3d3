// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Classification of cached ranges against a query range
//!
//! Resolution never modifies the cache. It reports which cached entries can be
//! summed as they are, which ones are stale, and which sub-ranges must be
//! fetched again. The cache is only updated after every fetch has succeeded.

use std::cmp::max;

use crate::cache::IntervalCache;
use crate::types::{Interval, Metrics};

/// How a stale cached entry intersects the query range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Starts before the query and ends inside it (or at its end)
    Left,
    /// Starts inside the query (or at its start) and ends after it
    Right,
    /// Starts before and ends after the query; discarded wholesale
    Contains,
}

/// A cached entry that only partly lies inside the query range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleEntry {
    /// Range of the cached entry
    pub cached: Interval,
    /// Metrics stored for `cached`
    pub metrics: Metrics,
    pub overlap: Overlap,
    /// Part of `cached` inside the query, which is fetched again
    pub refetch: Interval,
}

impl StaleEntry {
    /// Part of the cached entry that survives the refetch
    ///
    /// `None` for [`Overlap::Contains`]: the two pieces outside the query cannot
    /// be told apart without another fetch, so the entry is dropped.
    pub fn residual_range(&self) -> Option<Interval> {
        match self.overlap {
            Overlap::Left => Interval::new(self.cached.start(), self.refetch.start()).ok(),
            Overlap::Right => Interval::new(self.refetch.end(), self.cached.end()).ok(),
            Overlap::Contains => None,
        }
    }
}

/// Why a gap has to be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapKind {
    /// No cached entry covers this space
    Uncovered,
    /// The in-query part of a stale entry
    Refetch,
}

/// A sub-range of the query that must be fetched from the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub range: Interval,
    pub kind: GapKind,
}

/// Outcome of resolving a query range against the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub query: Interval,
    /// Entries fully inside the query, summed without refetching
    pub hits: Vec<(Interval, Metrics)>,
    /// Ranges to fetch, in ascending order
    pub gaps: Vec<Gap>,
    /// Entries to split or drop once their refetch has completed
    pub stale: Vec<StaleEntry>,
}

impl Resolution {
    /// Whether the query can be answered from the cache alone
    pub fn is_full_hit(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Sum of the metrics of every full hit
    pub fn cached_total(&self) -> Metrics {
        let mut total = Metrics::default();
        for (_, metrics) in &self.hits {
            total.merge(metrics);
        }
        total
    }
}

impl IntervalCache {
    /// Calculate which parts of `query` are cached and which must be fetched
    ///
    /// # Behavior
    ///
    /// 1. Entries disjoint from the query are ignored
    /// 2. Entries inside the query are hits
    /// 3. Entries crossing one edge of the query are stale; their in-query part
    ///    becomes a [`GapKind::Refetch`] gap and the rest survives as a residual
    /// 4. An entry strictly containing the query is stale and the whole query
    ///    becomes a single refetch gap
    /// 5. Space covered by neither hits nor refetches becomes
    ///    [`GapKind::Uncovered`] gaps
    ///
    /// Refetch gaps are never merged with neighbouring uncovered space, so the
    /// metrics fetched for them can be subtracted from the stale entry exactly.
    pub fn resolve(&self, query: Interval) -> Resolution {
        let mut hits = Vec::new();
        let mut stale = Vec::new();

        for (cached, metrics) in self.overlapping(&query) {
            if query.contains_interval(&cached) {
                hits.push((cached, metrics.clone()));
                continue;
            }

            let Some(refetch) = cached.intersection(&query) else {
                continue;
            };
            let overlap = if cached.start() < query.start() && cached.end() > query.end() {
                Overlap::Contains
            } else if cached.start() < query.start() {
                Overlap::Left
            } else {
                Overlap::Right
            };

            stale.push(StaleEntry {
                cached,
                metrics: metrics.clone(),
                overlap,
                refetch,
            });
        }

        let mut covered: Vec<Interval> = hits
            .iter()
            .map(|(range, _)| *range)
            .chain(stale.iter().map(|entry| entry.refetch))
            .collect();
        covered.sort_by_key(Interval::start);

        let mut gaps: Vec<Gap> = stale
            .iter()
            .map(|entry| Gap {
                range: entry.refetch,
                kind: GapKind::Refetch,
            })
            .collect();

        let mut last = query.start();
        for range in covered {
            if let Ok(uncovered) = Interval::new(last, range.start()) {
                gaps.push(Gap {
                    range: uncovered,
                    kind: GapKind::Uncovered,
                });
            }
            last = max(last, range.end());
        }
        if let Ok(tail) = Interval::new(last, query.end()) {
            gaps.push(Gap {
                range: tail,
                kind: GapKind::Uncovered,
            });
        }

        gaps.sort_by_key(|gap| gap.range.start());

        Resolution {
            query,
            hits,
            gaps,
            stale,
        }
    }
}
