// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Query line parsing
//!
//! A query line has the form `<C|B|S|V> <start> <end>`, where `start` and `end`
//! are Unix timestamps in seconds describing the half-open range `[start, end)`.

use std::fmt;

use crate::errors::ParseError;
use crate::types::{Interval, MetricKind};

/// A parsed query: which metric, over which range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub kind: MetricKind,
    pub range: Interval,
}

impl Request {
    pub const fn new(kind: MetricKind, range: Interval) -> Self {
        Self { kind, range }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.kind.selector(),
            self.range.start(),
            self.range.end()
        )
    }
}

/// Parse one query line
///
/// # Errors
///
/// Returns a [`ParseError`] naming the offending field when the line does not
/// have exactly three fields, the selector is unknown, a timestamp is not a
/// 64-bit integer, or `start >= end`.
///
/// # Examples
///
/// ```
/// use fillscan::{parse_query, MetricKind};
///
/// let request = parse_query("V 0 10").unwrap();
/// assert_eq!(request.kind, MetricKind::Volume);
/// assert_eq!(request.range.end(), 10);
/// ```
pub fn parse_query(line: &str) -> Result<Request, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [selector, start, end] = fields.as_slice() else {
        return Err(ParseError::FieldCount {
            found: fields.len(),
            line: line.to_string(),
        });
    };

    let mut chars = selector.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(c), None) => MetricKind::from_selector(c),
        _ => None,
    }
    .ok_or_else(|| ParseError::InvalidSelector {
        field: selector.to_string(),
    })?;

    let start = start
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidStart {
            field: start.to_string(),
        })?;
    let end = end.parse::<i64>().map_err(|_| ParseError::InvalidEnd {
        field: end.to_string(),
    })?;

    Ok(Request::new(kind, Interval::new(start, end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_selector() {
        for (line, kind) in [
            ("C 0 10", MetricKind::Count),
            ("B 0 10", MetricKind::Buys),
            ("S 0 10", MetricKind::Sells),
            ("V 0 10", MetricKind::Volume),
        ] {
            let request = parse_query(line).unwrap();
            assert_eq!(request.kind, kind);
            assert_eq!(request.range, Interval::new(0, 10).unwrap());
        }
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let request = parse_query("  C\t1700000000   1700086400 ").unwrap();
        assert_eq!(request.range.start(), 1_700_000_000);
        assert_eq!(request.range.end(), 1_700_086_400);
    }

    #[test]
    fn test_parse_negative_timestamps() {
        let request = parse_query("S -20 -10").unwrap();
        assert_eq!(request.range, Interval::new(-20, -10).unwrap());
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(matches!(
            parse_query("C 0"),
            Err(ParseError::FieldCount { found: 2, .. })
        ));
        assert!(matches!(
            parse_query("C 0 10 20"),
            Err(ParseError::FieldCount { found: 4, .. })
        ));
        assert!(matches!(
            parse_query(""),
            Err(ParseError::FieldCount { found: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_selector() {
        assert_eq!(
            parse_query("X 0 10"),
            Err(ParseError::InvalidSelector {
                field: "X".to_string()
            })
        );
        assert_eq!(
            parse_query("CC 0 10"),
            Err(ParseError::InvalidSelector {
                field: "CC".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_timestamps() {
        assert_eq!(
            parse_query("C abc 10"),
            Err(ParseError::InvalidStart {
                field: "abc".to_string()
            })
        );
        assert_eq!(
            parse_query("C 0 1.5"),
            Err(ParseError::InvalidEnd {
                field: "1.5".to_string()
            })
        );
        assert!(matches!(
            parse_query("C 0 99999999999999999999"),
            Err(ParseError::InvalidEnd { .. })
        ));
    }

    #[test]
    fn test_empty_or_inverted_range_rejected() {
        assert_eq!(
            parse_query("C 10 10"),
            Err(ParseError::EmptyRange { start: 10, end: 10 })
        );
        assert_eq!(
            parse_query("V 20 10"),
            Err(ParseError::EmptyRange { start: 20, end: 10 })
        );
    }

    #[test]
    fn test_request_display_round_trips() {
        let request = parse_query("B   5 15").unwrap();
        assert_eq!(request.to_string(), "B 5 15");
    }
}
