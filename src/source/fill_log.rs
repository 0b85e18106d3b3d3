// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory fill log loaded from CSV, with simulated fetch latency

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use tracing::{debug, info, Instrument};

use crate::config::constants::{FILL_TIME_FORMAT, SECONDS_PER_DAY};
use crate::errors::{FetchError, LoadError};
use crate::source::EventSource;
use crate::spans;
use crate::types::{Direction, Fill, Interval};

/// Fills held in memory and served by time range
///
/// Fills are sorted by timestamp once at load time so each fetch is two binary
/// searches. Every fetch sleeps in proportion to the length of the requested
/// range to model a remote backend.
#[derive(Debug, Clone, Default)]
pub struct FillLog {
    fills: Vec<Fill>,
    latency_per_day: Duration,
}

impl FillLog {
    /// Build a log from fills in any order, with no simulated latency
    pub fn new(mut fills: Vec<Fill>) -> Self {
        fills.sort_by_key(|fill| fill.timestamp);
        Self {
            fills,
            latency_per_day: Duration::ZERO,
        }
    }

    /// Set how long a fetch covering one day of range takes
    ///
    /// `Duration::ZERO` disables the simulated latency.
    pub fn with_latency_per_day(mut self, latency_per_day: Duration) -> Self {
        self.latency_per_day = latency_per_day;
        self
    }

    /// Load fills from a CSV file
    ///
    /// The first line is a header and is skipped. Every other non-blank line
    /// must have the columns `time,direction,price,quantity,sequence_number`,
    /// where `time` is a UTC timestamp formatted `%Y-%m-%d %H:%M:%S`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be read, has no header, or any
    /// row is malformed. Errors name the 1-based line number.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = contents.lines().enumerate();
        if lines.next().is_none() {
            return Err(LoadError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        let mut fills = Vec::new();
        for (index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            fills.push(parse_row(index + 1, line)?);
        }

        info!(path = %path.display(), fills = fills.len(), "Loaded fill log");
        Ok(Self::new(fills))
    }

    /// Number of fills in the log
    pub fn len(&self) -> usize {
        self.fills.len()
    }

    /// Check if the log holds no fills
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }

    /// Fills with `range.start() <= timestamp < range.end()`, without latency
    pub fn fills_in(&self, range: Interval) -> &[Fill] {
        let lo = self
            .fills
            .partition_point(|fill| fill.timestamp < range.start());
        let hi = self
            .fills
            .partition_point(|fill| fill.timestamp < range.end());
        &self.fills[lo..hi]
    }

    /// Simulated latency for fetching `range`
    pub fn latency_for(&self, range: Interval) -> Duration {
        if self.latency_per_day.is_zero() {
            return Duration::ZERO;
        }
        let nanos = self
            .latency_per_day
            .as_nanos()
            .saturating_mul(u128::from(range.len()))
            / SECONDS_PER_DAY as u128;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

#[async_trait]
impl EventSource for FillLog {
    async fn fetch(&self, range: Interval) -> Result<Vec<Fill>, FetchError> {
        let latency = self.latency_for(range);
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            let fills = self.fills_in(range).to_vec();
            debug!(
                fills = fills.len(),
                latency_ms = latency.as_millis() as u64,
                "Served range"
            );
            Ok(fills)
        }
        .instrument(spans::fetch_range(range))
        .await
    }
}

fn parse_row(line: usize, row: &str) -> Result<Fill, LoadError> {
    let columns: Vec<&str> = row.split(',').map(str::trim).collect();
    let [time, direction, price, quantity, sequence_number] = columns.as_slice() else {
        return Err(LoadError::ColumnCount {
            line,
            found: columns.len(),
        });
    };

    let timestamp = NaiveDateTime::parse_from_str(time, FILL_TIME_FORMAT)
        .map_err(|e| LoadError::invalid_field(line, "time", *time, e))?
        .and_utc()
        .timestamp();
    let direction = direction
        .parse::<i64>()
        .map(Direction::from_sign)
        .map_err(|e| LoadError::invalid_field(line, "direction", *direction, e))?;
    let price = BigDecimal::from_str(price)
        .map_err(|e| LoadError::invalid_field(line, "price", *price, e))?;
    let quantity = BigDecimal::from_str(quantity)
        .map_err(|e| LoadError::invalid_field(line, "quantity", *quantity, e))?;
    let sequence_number = sequence_number
        .parse::<u64>()
        .map_err(|e| LoadError::invalid_field(line, "sequence_number", *sequence_number, e))?;

    Ok(Fill {
        timestamp,
        direction,
        price,
        quantity,
        sequence_number,
    })
}
