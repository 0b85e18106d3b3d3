// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Single-pass aggregation of fetched fills into [`Metrics`]

use std::collections::HashSet;

use crate::types::{Direction, Fill, Metrics};

/// Compute count, buys, sells and volume for one fetched range
///
/// `count`, `buys` and `sells` only consider the first fill seen for each
/// sequence number. `volume` adds `price * quantity` for every fill, repeated
/// sequence numbers included.
///
/// Deduplication is scoped to this call: fills fetched for a different range
/// are never compared against these.
///
/// # Examples
///
/// ```
/// use bigdecimal::BigDecimal;
/// use fillscan::{aggregate, Direction, Fill};
///
/// let fill = Fill {
///     timestamp: 5,
///     direction: Direction::Buy,
///     price: BigDecimal::from(10),
///     quantity: BigDecimal::from(2),
///     sequence_number: 1,
/// };
/// let metrics = aggregate(&[fill.clone(), fill]);
/// assert_eq!(metrics.count, 1);
/// assert_eq!(metrics.volume, BigDecimal::from(40));
/// ```
pub fn aggregate(fills: &[Fill]) -> Metrics {
    let mut metrics = Metrics::default();
    let mut seen = HashSet::with_capacity(fills.len());

    for fill in fills {
        if seen.insert(fill.sequence_number) {
            metrics.count += 1;
            match fill.direction {
                Direction::Buy => metrics.buys += 1,
                Direction::Sell => metrics.sells += 1,
                Direction::Neutral => {}
            }
        }
        metrics.volume += fill.notional();
    }

    metrics
}
