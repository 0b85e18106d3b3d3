// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for fillscan integration tests
//!
//! Provides a mock event source that records every fetch so tests can assert
//! exactly which ranges were requested.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use fillscan::{Direction, EventSource, FetchError, Fill, Interval};

/// Mock EventSource for testing QueryProcessor logic
///
/// Serves fills from memory using the half-open range convention, records
/// each requested range, and can be switched into a failing mode.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockEventSource::new(vec![fill(5, 1, 10, 2, 1)]);
/// let mut processor = QueryProcessor::new(source);
/// processor.process_line("C 0 10").await?;
/// assert_eq!(processor.source().fetch_count(), 1);
/// ```
pub struct MockEventSource {
    fills: Vec<Fill>,
    requests: Mutex<Vec<Interval>>,
    failing: AtomicBool,
}

impl MockEventSource {
    /// Create a mock serving the given fills
    pub fn new(fills: Vec<Fill>) -> Self {
        Self {
            fills,
            requests: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent fetch fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of fetch calls so far, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every requested range, sorted by start
    pub fn requested(&self) -> Vec<Interval> {
        let mut requests = self.requests.lock().unwrap().clone();
        requests.sort();
        requests
    }

    /// Forget recorded requests
    pub fn reset(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    async fn fetch(&self, range: Interval) -> Result<Vec<Fill>, FetchError> {
        self.requests.lock().unwrap().push(range);

        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::unavailable(range, "mock source is failing"));
        }

        Ok(self
            .fills
            .iter()
            .filter(|fill| range.contains(fill.timestamp))
            .cloned()
            .collect())
    }
}

/// Build a fill with integer price and quantity; `direction` is a raw sign
pub fn fill(timestamp: i64, direction: i64, price: i64, quantity: i64, seq: u64) -> Fill {
    Fill {
        timestamp,
        direction: Direction::from_sign(direction),
        price: BigDecimal::from(price),
        quantity: BigDecimal::from(quantity),
        sequence_number: seq,
    }
}

/// Shorthand for a valid interval
pub fn iv(start: i64, end: i64) -> Interval {
    Interval::new(start, end).unwrap()
}
