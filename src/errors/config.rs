// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for configuration loading.

/// An environment variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create an `InvalidValue` error.
    pub fn invalid_value(key: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        ConfigError::InvalidValue {
            key,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
