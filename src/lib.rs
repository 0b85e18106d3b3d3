// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Range-query caching engine for trade fill aggregates.
//!
//! fillscan answers questions such as "how many fills, buys and sells, and how
//! much volume traded between `start` and `end`?" over a slow backing
//! [`EventSource`]. Every range it fetches is aggregated once into all four
//! [`Metrics`] and memoized in an [`IntervalCache`] of disjoint half-open
//! ranges. Later queries reuse cached ranges that fall inside them, split
//! cached ranges that stick out of them, and only fetch the gaps.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use fillscan::{FillLog, QueryProcessor};
//!
//! let log = FillLog::from_csv_path("trades.csv")?;
//! let mut processor = QueryProcessor::new(log);
//!
//! let answer = processor.process_line("V 1700000000 1700086400").await?;
//! println!("{}", answer.value);
//! ```
//!
//! # Modules
//!
//! - [`query`]: query line parsing
//! - [`cache`]: interval cache, gap resolution and cache updates
//! - [`aggregate`]: single-pass aggregation of fills
//! - [`source`]: the [`EventSource`] trait and the CSV-backed [`FillLog`]
//! - [`processor`]: the [`QueryProcessor`] tying them together

pub mod aggregate;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod errors;
pub mod processor;
pub mod query;
pub mod source;
mod spans;
pub mod types;

pub use aggregate::aggregate;
pub use cache::{CacheStats, Gap, GapKind, IntervalCache, Overlap, Resolution, StaleEntry};
pub use config::{FillscanConfig, FillscanConfigBuilder};
pub use errors::{
    CacheError, ConfigError, FetchError, FillscanError, LoadError, ParseError, QueryError,
};
pub use processor::{Answer, QueryProcessor};
pub use query::{parse_query, Request};
pub use source::{EventSource, FillLog};
pub use types::{Direction, Fill, Interval, MetricKind, MetricValue, Metrics};
