// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for fillscan operations.
//!
//! Telemetry concerns are kept out of business logic: instead of using
//! `#[instrument]` attributes, each instrumented operation has a corresponding
//! span helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::query::Request;
use crate::types::Interval;

/// Create span for answering a single query.
///
/// Parent: None (root span for this operation)
/// Children: fetch_gap spans, apply_gap spans
#[inline]
pub(crate) fn process_query(request: &Request) -> Span {
    tracing::span!(
        Level::INFO,
        "fillscan.process_query",
        kind = %request.kind,
        start = request.range.start(),
        end = request.range.end(),
    )
}

/// Create span for fetching and aggregating one gap of a query.
///
/// Parent: process_query span
/// Children: fetch_range span of the event source
#[inline]
pub(crate) fn fetch_gap(gap: Interval) -> Span {
    tracing::debug_span!(
        "fillscan.fetch_gap",
        start = gap.start(),
        end = gap.end(),
        seconds = gap.len(),
    )
}

/// Create span for an event source serving a range.
///
/// Parent: fetch_gap span
#[inline]
pub(crate) fn fetch_range(range: Interval) -> Span {
    tracing::trace_span!("fillscan.fetch_range", start = range.start(), end = range.end())
}

/// Create span for folding one fetched gap into the cache.
///
/// Parent: process_query span
#[inline]
pub(crate) fn apply_gap(gap: Interval) -> Span {
    tracing::debug_span!("fillscan.apply_gap", start = gap.start(), end = gap.end())
}
