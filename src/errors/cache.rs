// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the interval cache.

use crate::Interval;

/// The interval cache found two entries that share time.
///
/// This is never caused by user input. It means the resolver and updater
/// disagreed about the cache contents, and every later answer could be wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// An insert would overlap an existing entry.
    #[error("inserting {inserted} would overlap cached range {existing}")]
    Overlap {
        /// Range being inserted
        inserted: Interval,
        /// Cached range it collides with
        existing: Interval,
    },

    /// Two stored entries overlap.
    #[error("cached ranges {first} and {second} overlap")]
    NotDisjoint {
        /// Earlier entry
        first: Interval,
        /// Later entry
        second: Interval,
    },
}
