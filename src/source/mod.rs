// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Backing sources of trade fills
//!
//! The query processor never reads fills directly. It asks an [`EventSource`]
//! for the fills of each gap range it could not answer from cache. Fetching is
//! assumed to be slow, with latency growing with the length of the range.
//!
//! # Range convention
//!
//! Implementations must return exactly the fills with
//! `range.start() <= timestamp < range.end()`. Returning fills on the other
//! side of a boundary would double count them when adjacent cached ranges are
//! summed.
//!
//! # Example: Implementing EventSource
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use fillscan::{EventSource, FetchError, Fill, Interval};
//!
//! struct HttpFills { client: reqwest::Client, base_url: String }
//!
//! #[async_trait]
//! impl EventSource for HttpFills {
//!     async fn fetch(&self, range: Interval) -> Result<Vec<Fill>, FetchError> {
//!         let url = format!("{}/fills?start={}&end={}", self.base_url, range.start(), range.end());
//!         let response = self.client.get(url).send().await
//!             .map_err(|e| FetchError::unavailable(range, e.to_string()))?;
//!         response.json().await.map_err(|e| FetchError::unavailable(range, e.to_string()))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::types::{Fill, Interval};

mod fill_log;

pub use fill_log::FillLog;

/// A slow backing store that can return all fills in a time range
///
/// The trait is object-safe, allowing runtime pluggability via
/// `Box<dyn EventSource>`.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch every fill with `range.start() <= timestamp < range.end()`
    ///
    /// Order of the returned fills is unspecified.
    async fn fetch(&self, range: Interval) -> Result<Vec<Fill>, FetchError>;
}

#[async_trait]
impl<S: EventSource + ?Sized> EventSource for Box<S> {
    async fn fetch(&self, range: Interval) -> Result<Vec<Fill>, FetchError> {
        (**self).fetch(range).await
    }
}
