// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Core domain types shared across the crate

mod fill;
mod interval;
mod metrics;

pub use fill::{Direction, Fill};
pub use interval::Interval;
pub use metrics::{MetricKind, MetricValue, Metrics};
