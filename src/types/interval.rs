// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Half-open time ranges over Unix seconds

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// A half-open range `[start, end)` of Unix timestamps in seconds
///
/// A timestamp `t` belongs to the interval iff `start <= t < end`. The same
/// convention is used by the resolver, the updater and every event source, so
/// adjacent intervals such as `[0, 10)` and `[10, 20)` never share a fill.
///
/// Construction enforces `start < end`; empty or inverted ranges cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    start: i64,
    end: i64,
}

impl Interval {
    /// Create a new interval, rejecting `start >= end`
    ///
    /// # Examples
    ///
    /// ```
    /// use fillscan::Interval;
    ///
    /// let range = Interval::new(0, 10).unwrap();
    /// assert_eq!(range.len(), 10);
    /// assert!(Interval::new(10, 10).is_err());
    /// ```
    pub fn new(start: i64, end: i64) -> Result<Self, ParseError> {
        if start >= end {
            return Err(ParseError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive lower bound
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Exclusive upper bound
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Number of seconds covered by this interval (always at least 1)
    pub fn len(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    /// Always `false`; kept for parity with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check whether a timestamp falls inside `[start, end)`
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp < self.end
    }

    /// Check whether `other` lies entirely within this interval
    pub fn contains_interval(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Check whether the two intervals share at least one second
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection of two intervals, `None` when they are disjoint
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Interval { start, end })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
