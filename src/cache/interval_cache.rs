// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Sorted cache of disjoint time ranges
//!
//! This module stores previously computed [`Metrics`] keyed by half-open time
//! ranges. Entries never overlap: every insert is checked against its
//! neighbours and refused if it would collide with one.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::errors::CacheError;
use crate::types::{Interval, Metrics};

/// Cache of metrics for disjoint half-open time ranges
///
/// Entries are kept in a `BTreeMap` keyed by range start. Because entries are
/// disjoint, ordering by start also orders by end, and the only entry starting
/// before a query range that can still overlap it is the immediate predecessor.
///
/// # Features
///
/// - **Overlap queries**: `overlapping` walks only the entries that touch a range
/// - **Checked inserts**: an insert that would overlap an entry returns [`CacheError::Overlap`]
/// - **Ordered iteration**: entries come back in ascending time order
#[derive(Debug, Clone, Default)]
pub struct IntervalCache {
    entries: BTreeMap<i64, (Interval, Metrics)>,
}

impl IntervalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve the metrics stored for exactly this range
    pub fn get(&self, range: &Interval) -> Option<&Metrics> {
        match self.entries.get(&range.start()) {
            Some((cached, metrics)) if cached == range => Some(metrics),
            _ => None,
        }
    }

    /// Find all cached entries sharing at least one second with `range`, in
    /// ascending order
    pub fn overlapping(&self, range: &Interval) -> Vec<(Interval, &Metrics)> {
        let mut overlapping = Vec::new();

        // The predecessor is the only entry starting before the range that can reach into it
        if let Some((_, (cached, metrics))) = self.entries.range(..range.start()).next_back() {
            if cached.overlaps(range) {
                overlapping.push((*cached, metrics));
            }
        }

        for (_, (cached, metrics)) in self
            .entries
            .range((Bound::Included(range.start()), Bound::Excluded(range.end())))
        {
            overlapping.push((*cached, metrics));
        }

        overlapping
    }

    /// Insert metrics for a range that must not overlap any cached entry
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Overlap`] and leaves the cache unchanged if the
    /// range shares time with an existing entry.
    pub fn insert(&mut self, range: Interval, metrics: Metrics) -> Result<(), CacheError> {
        if let Some((existing, _)) = self.overlapping(&range).first() {
            return Err(CacheError::Overlap {
                inserted: range,
                existing: *existing,
            });
        }
        self.entries.insert(range.start(), (range, metrics));
        Ok(())
    }

    /// Remove the entry stored for exactly this range
    pub fn remove(&mut self, range: &Interval) -> Option<Metrics> {
        if self.get(range).is_none() {
            return None;
        }
        self.entries
            .remove(&range.start())
            .map(|(_, metrics)| metrics)
    }

    /// Iterate over all entries in ascending time order
    pub fn iter(&self) -> impl Iterator<Item = (Interval, &Metrics)> {
        self.entries
            .values()
            .map(|(range, metrics)| (*range, metrics))
    }

    /// Get the total number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache contains no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of seconds covered by cached entries
    pub fn covered_seconds(&self) -> u64 {
        self.iter()
            .fold(0u64, |total, (range, _)| total.saturating_add(range.len()))
    }

    /// Verify that no two entries overlap
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotDisjoint`] naming the first offending pair.
    pub fn check_disjoint(&self) -> Result<(), CacheError> {
        let mut previous: Option<Interval> = None;
        for (range, _) in self.iter() {
            if let Some(prev) = previous {
                if prev.overlaps(&range) {
                    return Err(CacheError::NotDisjoint {
                        first: prev,
                        second: range,
                    });
                }
            }
            previous = Some(range);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i64, end: i64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    fn count(count: u64) -> Metrics {
        Metrics {
            count,
            ..Metrics::default()
        }
    }

    #[test]
    fn test_cache_empty_get_returns_none() {
        let cache = IntervalCache::new();
        assert!(cache.get(&iv(100, 200)).is_none(), "Empty cache should return None");
        assert!(cache.overlapping(&iv(100, 200)).is_empty());
    }

    #[test]
    fn test_cache_exact_match() {
        let mut cache = IntervalCache::new();
        cache.insert(iv(100, 200), count(5)).unwrap();

        assert_eq!(cache.get(&iv(100, 200)), Some(&count(5)));
        assert!(cache.get(&iv(100, 150)).is_none(), "Get only matches exact ranges");
    }

    #[test]
    fn test_overlapping_includes_predecessor_reaching_in() {
        let mut cache = IntervalCache::new();
        cache.insert(iv(0, 50), count(1)).unwrap();
        cache.insert(iv(50, 120), count(2)).unwrap();
        cache.insert(iv(150, 160), count(3)).unwrap();
        cache.insert(iv(200, 300), count(4)).unwrap();

        let found: Vec<Interval> = cache
            .overlapping(&iv(100, 200))
            .into_iter()
            .map(|(range, _)| range)
            .collect();
        assert_eq!(found, vec![iv(50, 120), iv(150, 160)]);
    }

    #[test]
    fn test_overlapping_skips_adjacent_entries() {
        let mut cache = IntervalCache::new();
        cache.insert(iv(0, 10), count(1)).unwrap();
        cache.insert(iv(20, 30), count(1)).unwrap();

        assert!(cache.overlapping(&iv(10, 20)).is_empty());
    }

    #[test]
    fn test_insert_overlap_is_refused() {
        let mut cache = IntervalCache::new();
        cache.insert(iv(100, 200), count(5)).unwrap();

        let err = cache.insert(iv(150, 250), count(3)).unwrap_err();
        assert_eq!(
            err,
            CacheError::Overlap {
                inserted: iv(150, 250),
                existing: iv(100, 200),
            }
        );
        assert_eq!(cache.len(), 1, "A refused insert must not modify the cache");

        // Containment in either direction is also an overlap
        assert!(cache.insert(iv(120, 130), count(1)).is_err());
        assert!(cache.insert(iv(0, 1000), count(1)).is_err());
    }

    #[test]
    fn test_insert_adjacent_ranges() {
        let mut cache = IntervalCache::new();
        cache.insert(iv(0, 10), count(1)).unwrap();
        cache.insert(iv(10, 20), count(2)).unwrap();
        cache.insert(iv(-10, 0), count(3)).unwrap();

        assert_eq!(cache.len(), 3);
        assert!(cache.check_disjoint().is_ok());
        assert_eq!(cache.covered_seconds(), 30);
    }

    #[test]
    fn test_remove_requires_exact_range() {
        let mut cache = IntervalCache::new();
        cache.insert(iv(0, 10), count(1)).unwrap();

        assert!(cache.remove(&iv(0, 5)).is_none());
        assert_eq!(cache.remove(&iv(0, 10)), Some(count(1)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut cache = IntervalCache::new();
        cache.insert(iv(50, 60), count(1)).unwrap();
        cache.insert(iv(0, 10), count(2)).unwrap();
        cache.insert(iv(20, 30), count(3)).unwrap();

        let starts: Vec<i64> = cache.iter().map(|(range, _)| range.start()).collect();
        assert_eq!(starts, vec![0, 20, 50]);
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut cache = IntervalCache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());

        cache.insert(iv(100, 200), count(1)).unwrap();
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
    }
}
