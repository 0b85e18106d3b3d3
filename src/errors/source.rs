// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for event sources.

use std::path::PathBuf;

use crate::Interval;

/// Errors returned by [`EventSource::fetch`](crate::EventSource::fetch).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The backing source could not serve the range.
    #[error("source unavailable for {range}: {reason}")]
    Unavailable {
        /// Requested range
        range: Interval,
        /// Why the source failed
        reason: String,
    },
}

impl FetchError {
    /// Create an `Unavailable` error for a range.
    pub fn unavailable(range: Interval, reason: impl Into<String>) -> Self {
        FetchError::Unavailable {
            range,
            reason: reason.into(),
        }
    }
}

/// Errors from the one-time startup load of the fill log.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The fill log file could not be read.
    #[error("failed to read fill log at {path}: {source}")]
    Io {
        /// Path of the fill log
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file had no header row.
    #[error("fill log at {path} is empty (missing header row)")]
    MissingHeader {
        /// Path of the fill log
        path: PathBuf,
    },

    /// A row had the wrong number of columns.
    #[error("line {line}: expected 5 columns, found {found}")]
    ColumnCount {
        /// 1-based line number
        line: usize,
        /// Number of columns found
        found: usize,
    },

    /// A column could not be parsed.
    #[error("line {line}: invalid {column} {value:?}: {details}")]
    InvalidField {
        /// 1-based line number
        line: usize,
        /// Column name
        column: &'static str,
        /// Raw column value
        value: String,
        /// Parser error message
        details: String,
    },
}

impl LoadError {
    /// Create an `InvalidField` error from any displayable parse error.
    pub fn invalid_field(
        line: usize,
        column: &'static str,
        value: impl Into<String>,
        details: impl ToString,
    ) -> Self {
        LoadError::InvalidField {
            line,
            column,
            value: value.into(),
            details: details.to_string(),
        }
    }
}
