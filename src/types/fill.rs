// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Trade fills returned by an event source

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Side of a fill, derived from the sign of the raw direction field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
    Neutral,
}

impl Direction {
    /// Positive values are buys, negative values are sells, zero is neutral
    pub fn from_sign(raw: i64) -> Self {
        match raw.signum() {
            1 => Self::Buy,
            -1 => Self::Sell,
            _ => Self::Neutral,
        }
    }
}

/// A single trade fill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// Unix timestamp in seconds
    pub timestamp: i64,
    pub direction: Direction,
    pub price: BigDecimal,
    pub quantity: BigDecimal,
    /// Identifier used to drop repeated observations of the same fill within one fetch
    pub sequence_number: u64,
}

impl Fill {
    /// Notional value of the fill (`price * quantity`)
    pub fn notional(&self) -> BigDecimal {
        &self.price * &self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Direction::from_sign(1), Direction::Buy);
        assert_eq!(Direction::from_sign(42), Direction::Buy);
        assert_eq!(Direction::from_sign(-1), Direction::Sell);
        assert_eq!(Direction::from_sign(0), Direction::Neutral);
    }

    #[test]
    fn test_notional() {
        let fill = Fill {
            timestamp: 5,
            direction: Direction::Buy,
            price: BigDecimal::from(10),
            quantity: BigDecimal::from(2),
            sequence_number: 1,
        };
        assert_eq!(fill.notional(), BigDecimal::from(20));
    }
}
