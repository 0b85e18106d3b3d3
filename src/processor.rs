// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Query orchestration: parse, resolve, fetch, aggregate, update, answer

use futures::future::try_join_all;
use tracing::{debug, Instrument};

use crate::aggregate::aggregate;
use crate::cache::{CacheStats, IntervalCache};
use crate::config::FillscanConfig;
use crate::errors::{FetchError, QueryError};
use crate::query::{parse_query, Request};
use crate::source::EventSource;
use crate::spans;
use crate::types::{Interval, MetricValue, Metrics};

/// The answer to one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub request: Request,
    /// The requested metric summed over cached hits and fetched gaps
    pub value: MetricValue,
    /// Gap ranges fetched from the event source to answer this query
    pub fetched: Vec<Interval>,
}

/// Answers metric queries over time ranges, memoizing aggregates per range
///
/// The processor owns its [`IntervalCache`]. Each query is resolved against the
/// cache, every gap is fetched from the [`EventSource`] and aggregated, and only
/// once all fetches have succeeded is the cache updated. A failed fetch leaves
/// the cache exactly as it was.
///
/// Queries are processed one at a time (`&mut self`); the gaps of a single
/// query are fetched concurrently.
///
/// # Example
///
/// ```rust
/// use fillscan::{FillLog, QueryProcessor};
///
/// # tokio_test_block_on(async {
/// let mut processor = QueryProcessor::new(FillLog::default());
/// let answer = processor.process_line("C 0 10").await.unwrap();
/// assert_eq!(answer.value.to_string(), "0");
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug)]
pub struct QueryProcessor<S> {
    source: S,
    cache: IntervalCache,
    stats: CacheStats,
    coalesce_ranges: bool,
}

impl<S: EventSource> QueryProcessor<S> {
    /// Create a processor with an empty cache
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: IntervalCache::new(),
            stats: CacheStats::default(),
            coalesce_ranges: false,
        }
    }

    /// Create a processor using the query settings of `config`
    pub fn with_config(source: S, config: &FillscanConfig) -> Self {
        Self::new(source).with_coalescing(config.coalesce_ranges)
    }

    /// Merge the cache entries inside each answered query into one entry
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.coalesce_ranges = enabled;
        self
    }

    /// The cache built up by previous queries
    pub fn cache(&self) -> &IntervalCache {
        &self.cache
    }

    /// The event source gaps are fetched from
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cache effectiveness so far
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.len(),
            ..self.stats.clone()
        }
    }

    /// Parse and answer one query line
    ///
    /// # Errors
    ///
    /// - [`QueryError::Parse`] if the line is malformed; nothing else happens
    /// - see [`process`](Self::process)
    pub async fn process_line(&mut self, line: &str) -> Result<Answer, QueryError> {
        let request = parse_query(line)?;
        self.process(request).await
    }

    /// Answer a parsed request
    ///
    /// # Errors
    ///
    /// - [`QueryError::Fetch`] if any gap fetch fails; the cache is unchanged
    /// - [`QueryError::Cache`] if the cache invariant is violated; the
    ///   processor should not be used afterwards
    pub async fn process(&mut self, request: Request) -> Result<Answer, QueryError> {
        let span = spans::process_query(&request);
        async move {
            let resolution = self.cache.resolve(request.range);
            debug!(
                hits = resolution.hits.len(),
                gaps = resolution.gaps.len(),
                stale = resolution.stale.len(),
                "Resolved query range"
            );

            let fetches = resolution.gaps.iter().map(|gap| self.fetch_gap(gap.range));
            let gap_metrics = try_join_all(fetches).await?;

            let mut total = resolution.cached_total();
            for (gap, metrics) in resolution.gaps.iter().zip(&gap_metrics) {
                let _guard = spans::apply_gap(gap.range).entered();
                self.cache.apply_gap(gap, metrics, &resolution.stale)?;
                total.merge(metrics);
            }

            if self.coalesce_ranges {
                self.cache.coalesce(request.range, total.clone())?;
            }

            let fetched: Vec<Interval> = resolution.gaps.iter().map(|gap| gap.range).collect();
            self.record(&fetched);

            let value = total.select(request.kind);
            debug!(value = %value, fetched = fetched.len(), "Answered query");

            Ok(Answer {
                request,
                value,
                fetched,
            })
        }
        .instrument(span)
        .await
    }

    async fn fetch_gap(&self, gap: Interval) -> Result<Metrics, FetchError> {
        async {
            let fills = self.source.fetch(gap).await?;
            let metrics = aggregate(&fills);
            debug!(fills = fills.len(), count = metrics.count, "Aggregated gap");
            Ok(metrics)
        }
        .instrument(spans::fetch_gap(gap))
        .await
    }

    fn record(&mut self, fetched: &[Interval]) {
        self.stats.queries += 1;
        if fetched.is_empty() {
            self.stats.full_hits += 1;
        }
        self.stats.gap_fetches += fetched.len() as u64;
        self.stats.seconds_fetched = fetched
            .iter()
            .fold(self.stats.seconds_fetched, |total, gap| {
                total.saturating_add(gap.len())
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FillLog;
    use crate::types::{Direction, Fill};
    use bigdecimal::BigDecimal;

    fn fill(timestamp: i64, direction: Direction, price: i64, quantity: i64, seq: u64) -> Fill {
        Fill {
            timestamp,
            direction,
            price: BigDecimal::from(price),
            quantity: BigDecimal::from(quantity),
            sequence_number: seq,
        }
    }

    fn two_fill_log() -> FillLog {
        FillLog::new(vec![
            fill(5, Direction::Buy, 10, 2, 1),
            fill(15, Direction::Sell, 3, 1, 2),
        ])
    }

    #[tokio::test]
    async fn test_combined_entry_serves_every_metric() {
        let mut processor = QueryProcessor::new(two_fill_log());

        let count = processor.process_line("C 0 10").await.unwrap();
        assert_eq!(count.value, MetricValue::Integer(1));
        assert_eq!(count.fetched.len(), 1);

        for (line, expected) in [("B 0 10", "1"), ("S 0 10", "0"), ("V 0 10", "20")] {
            let answer = processor.process_line(line).await.unwrap();
            assert_eq!(answer.value.to_string(), expected, "query {line}");
            assert!(answer.fetched.is_empty(), "query {line} should be a full hit");
        }

        let stats = processor.stats();
        assert_eq!(stats.queries, 4);
        assert_eq!(stats.full_hits, 3);
        assert_eq!(stats.gap_fetches, 1);
        assert_eq!(stats.seconds_fetched, 10);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_parse_error_leaves_state_untouched() {
        let mut processor = QueryProcessor::new(two_fill_log());
        processor.process_line("C 0 10").await.unwrap();

        let err = processor.process_line("Q 0 10").await.unwrap_err();
        assert!(matches!(err, QueryError::Parse(_)));
        assert!(err.is_recoverable());
        assert_eq!(processor.cache().len(), 1);
        assert_eq!(processor.stats().queries, 1);
    }

    #[tokio::test]
    async fn test_coalescing_keeps_one_entry_per_query() {
        let mut processor = QueryProcessor::new(two_fill_log()).with_coalescing(true);

        processor.process_line("C 0 10").await.unwrap();
        let answer = processor.process_line("C -10 30").await.unwrap();
        assert_eq!(answer.value, MetricValue::Integer(2));

        let entries: Vec<Interval> = processor.cache().iter().map(|(range, _)| range).collect();
        assert_eq!(entries, vec![Interval::new(-10, 30).unwrap()]);

        let again = processor.process_line("V -10 30").await.unwrap();
        assert!(again.fetched.is_empty());
        assert_eq!(again.value.to_string(), "23");
    }
}
