// ABOUTME: Visit-to-visit laboratory and weight trend comparison
// ABOUTME: Shared percent-change convention and direction classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Lab & Weight Trend Comparator
//!
//! Percent changes are rounded to two decimals before any threshold is
//! applied, and every "decline of N %" threshold is inclusive. A potassium
//! fall from 4.0 to 3.6 is therefore exactly a 10 % decline. The refeeding
//! diagnosis uses the same helper so both paths agree at the boundary.

pub mod labs;
pub mod weight;

pub use labs::{compare_labs, ConcernLevel, ElectrolyteConcern, LabChange, LabComparison};
pub use weight::{
    compare_weight, weight_loss_percent_over, WeightObservation, WeightTrend, WeightWarning,
};

use serde::{Deserialize, Serialize};

/// Direction of a change between two observations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// |change| below the no-change threshold
    NoChange,
    /// Rose by at least the threshold
    Increase,
    /// Fell by at least the threshold
    Decrease,
    /// Only a current value exists
    NewValue,
}

/// Round to two decimals
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Signed percent change from `previous` to `current`, rounded to two decimals
///
/// Defined only when both values are finite and `previous` is positive.
#[must_use]
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if !previous.is_finite() || !current.is_finite() || previous <= 0.0 {
        return None;
    }
    Some(round2((current - previous) / previous * 100.0))
}

/// Percent decline (positive when the value fell), rounded to two decimals
#[must_use]
pub fn percent_decline(initial: f64, current: f64) -> Option<f64> {
    percent_change(initial, current).map(|change| -change)
}

/// Classify a percent change against the no-change threshold
#[must_use]
pub fn classify_direction(percent: f64, no_change_percent: f64) -> Direction {
    if percent.abs() < no_change_percent {
        Direction::NoChange
    } else if percent > 0.0 {
        Direction::Increase
    } else {
        Direction::Decrease
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_decline_is_exact() {
        let decline = percent_decline(4.0, 3.6).unwrap();
        assert!(decline >= 10.0);
        assert!((decline - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_reference_is_undefined() {
        assert!(percent_change(0.0, 3.0).is_none());
        assert!(percent_change(f64::NAN, 3.0).is_none());
    }

    #[test]
    fn test_direction() {
        assert_eq!(classify_direction(4.99, 5.0), Direction::NoChange);
        assert_eq!(classify_direction(-5.0, 5.0), Direction::Decrease);
        assert_eq!(classify_direction(12.0, 5.0), Direction::Increase);
    }
}
