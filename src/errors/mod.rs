// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the fillscan library.
//!
//! This module provides strongly-typed errors for all public APIs in fillscan.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`ParseError`,
//!   `FetchError`, etc.)
//! - **Unified error type** (`FillscanError`) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Architecture
//!
//! - [`ParseError`] - Malformed query lines
//! - [`FetchError`] - Event source failures while fetching a gap
//! - [`CacheError`] - Interval cache invariant violations (fatal)
//! - [`QueryError`] - Everything that can go wrong while answering one query
//! - [`LoadError`] - Startup load of the fill log
//! - [`ConfigError`] - Invalid configuration values
//!
//! # Examples
//!
//! ```rust,ignore
//! use fillscan::{QueryError, QueryProcessor};
//!
//! match processor.process_line(line).await {
//!     Ok(answer) => println!("{}", answer.value),
//!     Err(QueryError::Parse(e)) => eprintln!("skipping: {e}"),
//!     Err(e) if e.is_recoverable() => eprintln!("query failed: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

mod cache;
mod config;
mod query;
mod source;

pub use cache::CacheError;
pub use config::ConfigError;
pub use query::{ParseError, QueryError};
pub use source::{FetchError, LoadError};

/// Unified error type for all fillscan operations.
///
/// All module-specific error types automatically convert to `FillscanError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum FillscanError {
    /// Error while answering a query.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Error while loading the fill log.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Error in configuration.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error reading queries or writing answers.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
