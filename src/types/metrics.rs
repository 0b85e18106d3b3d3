// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Aggregate metrics cached per interval
//!
//! All four metrics are computed together in one scan of a range and cached as
//! a unit, so a `C` query followed by a `V` query over the same range needs a
//! single fetch.

use std::fmt;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Which metric a query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// Number of distinct fills (`C`)
    Count,
    /// Number of distinct buy fills (`B`)
    Buys,
    /// Number of distinct sell fills (`S`)
    Sells,
    /// Sum of `price * quantity` over every fill (`V`)
    Volume,
}

impl MetricKind {
    /// Map a query selector character to a metric kind
    pub fn from_selector(selector: char) -> Option<Self> {
        match selector {
            'C' => Some(Self::Count),
            'B' => Some(Self::Buys),
            'S' => Some(Self::Sells),
            'V' => Some(Self::Volume),
            _ => None,
        }
    }

    /// The selector character used on the query line
    pub const fn selector(&self) -> char {
        match self {
            Self::Count => 'C',
            Self::Buys => 'B',
            Self::Sells => 'S',
            Self::Volume => 'V',
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Count => "count",
            Self::Buys => "buys",
            Self::Sells => "sells",
            Self::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// Aggregates over one interval
///
/// Invariant: `buys + sells <= count`. Fills with a neutral direction only
/// contribute to `count` (and `volume`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub count: u64,
    pub buys: u64,
    pub sells: u64,
    pub volume: BigDecimal,
}

impl Metrics {
    /// Add another interval's metrics into this one
    pub fn merge(&mut self, other: &Self) {
        self.count += other.count;
        self.buys += other.buys;
        self.sells += other.sells;
        self.volume += &other.volume;
    }

    /// Field-wise `self - refetched`, the metrics left for the part of a range
    /// that was not refetched
    ///
    /// Counts are clamped at zero. A sequence number seen on both sides of a
    /// split is counted once in `self` but may be counted again, with another
    /// direction, in `refetched`, so `refetched.buys` can exceed `self.buys`.
    pub fn residual(&self, refetched: &Self) -> Self {
        Self {
            count: self.count.saturating_sub(refetched.count),
            buys: self.buys.saturating_sub(refetched.buys),
            sells: self.sells.saturating_sub(refetched.sells),
            volume: &self.volume - &refetched.volume,
        }
    }

    /// Extract the single metric a query asked for
    pub fn select(&self, kind: MetricKind) -> MetricValue {
        match kind {
            MetricKind::Count => MetricValue::Integer(self.count),
            MetricKind::Buys => MetricValue::Integer(self.buys),
            MetricKind::Sells => MetricValue::Integer(self.sells),
            MetricKind::Volume => MetricValue::Decimal(self.volume.clone()),
        }
    }
}

/// The scalar answer to a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricValue {
    Integer(u64),
    Decimal(BigDecimal),
}

impl fmt::Display for MetricValue {
    /// Integers print as-is; decimals print in plain notation with trailing
    /// zeros trimmed and no rounding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => f.write_str(&value.normalized().to_plain_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn metrics(count: u64, buys: u64, sells: u64, volume: &str) -> Metrics {
        Metrics {
            count,
            buys,
            sells,
            volume: BigDecimal::from_str(volume).unwrap(),
        }
    }

    #[test]
    fn test_selector_mapping() {
        for kind in [
            MetricKind::Count,
            MetricKind::Buys,
            MetricKind::Sells,
            MetricKind::Volume,
        ] {
            assert_eq!(MetricKind::from_selector(kind.selector()), Some(kind));
        }
        assert_eq!(MetricKind::from_selector('X'), None);
        assert_eq!(MetricKind::from_selector('c'), None);
    }

    #[test]
    fn test_merge_adds_fieldwise() {
        let mut total = metrics(3, 1, 1, "10.5");
        total.merge(&metrics(2, 2, 0, "4.5"));
        assert_eq!(total, metrics(5, 3, 1, "15"));
    }

    #[test]
    fn test_residual_undoes_merge() {
        let part = metrics(4, 1, 2, "7.25");
        let mut whole = metrics(6, 2, 3, "10");
        let original = whole.clone();
        let residual = whole.residual(&part);
        assert_eq!(residual, metrics(2, 1, 1, "2.75"));

        whole = residual;
        whole.merge(&part);
        assert_eq!(whole, original);
    }

    #[test]
    fn test_residual_clamps_counts_at_zero() {
        // seq first seen as a sell in the whole range, as a buy in the refetch
        let whole = metrics(1, 0, 1, "2");
        let refetched = metrics(1, 1, 0, "1");
        assert_eq!(whole.residual(&refetched), metrics(0, 0, 1, "1"));
    }

    #[test]
    fn test_select() {
        let m = metrics(7, 3, 2, "1.5");
        assert_eq!(m.select(MetricKind::Count), MetricValue::Integer(7));
        assert_eq!(m.select(MetricKind::Buys), MetricValue::Integer(3));
        assert_eq!(m.select(MetricKind::Sells), MetricValue::Integer(2));
        assert_eq!(
            m.select(MetricKind::Volume),
            MetricValue::Decimal(BigDecimal::from_str("1.5").unwrap())
        );
    }

    #[test]
    fn test_decimal_display_is_plain_and_trimmed() {
        let show = |s: &str| MetricValue::Decimal(BigDecimal::from_str(s).unwrap()).to_string();
        assert_eq!(show("20"), "20");
        assert_eq!(show("21.500"), "21.5");
        assert_eq!(show("0"), "0");
        assert_eq!(show("1E+3"), "1000");
        assert_eq!(show("0.000001"), "0.000001");
    }
}
