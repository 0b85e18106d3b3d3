// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for query parsing and query processing.

use super::{CacheError, FetchError};

/// A query line could not be turned into a request.
///
/// Every variant names the offending field so the message can be reported
/// verbatim on stderr. Parse errors only skip the offending line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line did not contain exactly three whitespace-separated fields.
    #[error("expected 3 fields (<C|B|S|V> <start> <end>), found {found}: {line:?}")]
    FieldCount {
        /// Number of fields found
        found: usize,
        /// The raw line
        line: String,
    },

    /// The metric selector was not one of `C`, `B`, `S`, `V`.
    #[error("invalid metric selector {field:?}: expected one of C, B, S, V")]
    InvalidSelector {
        /// The selector field as given
        field: String,
    },

    /// The start timestamp was not a 64-bit integer.
    #[error("invalid start timestamp {field:?}")]
    InvalidStart {
        /// The start field as given
        field: String,
    },

    /// The end timestamp was not a 64-bit integer.
    #[error("invalid end timestamp {field:?}")]
    InvalidEnd {
        /// The end field as given
        field: String,
    },

    /// The range was empty or inverted (`start >= end`).
    #[error("empty range: start {start} must be before end {end}")]
    EmptyRange {
        /// Parsed start timestamp
        start: i64,
        /// Parsed end timestamp
        end: i64,
    },
}

/// Errors from processing a single query.
///
/// `Parse` and `Fetch` are recoverable: the cache is left exactly as it was
/// before the query. `Cache` means the disjointness invariant was violated and
/// the processor must not be used further.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The query line was malformed.
    #[error("failed to parse query: {0}")]
    Parse(#[from] ParseError),

    /// The event source failed while fetching a gap.
    #[error("failed to fetch gap: {0}")]
    Fetch(#[from] FetchError),

    /// The interval cache is corrupted.
    #[error("cache invariant violated: {0}")]
    Cache(#[from] CacheError),
}

impl QueryError {
    /// Whether processing may continue with the next query.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, QueryError::Cache(_))
    }
}
