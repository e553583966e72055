// ABOUTME: Weight trend between two dated observations and loss over history windows
// ABOUTME: Calendar-day velocity in kg/week and %/week with rapid loss or gain warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{classify_direction, percent_change, percent_decline, round2, Direction};
use crate::config::TrendConfig;
use chrono::NaiveDate;
use clinutri_core::constants::units::DAYS_PER_WEEK;
use clinutri_core::models::HistoryEntry;
use clinutri_core::{AppError, AppResult, ErrorDetail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A dated weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightObservation {
    /// Date weighed
    pub on: NaiveDate,
    /// Weight (kg)
    pub weight_kg: f64,
}

impl WeightObservation {
    /// Create an observation
    #[must_use]
    pub const fn new(on: NaiveDate, weight_kg: f64) -> Self {
        Self { on, weight_kg }
    }
}

/// Velocity warning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeightWarning {
    /// Loss faster than the configured kg/week
    RapidLoss,
    /// Gain faster than the configured kg/week
    RapidGain,
}

/// Weight comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    /// Reference weight (kg)
    pub previous_kg: f64,
    /// Current weight (kg)
    pub current_kg: f64,
    /// Signed change (kg)
    pub change_kg: f64,
    /// Signed percent change, two decimals
    pub percent_change: Option<f64>,
    /// Direction of change
    pub direction: Option<Direction>,
    /// Calendar days between observations
    pub days_elapsed: i64,
    /// Signed velocity (kg/week); undefined for same-day observations
    pub kg_per_week: Option<f64>,
    /// Signed velocity (%/week)
    pub percent_per_week: Option<f64>,
    /// Rapid change warning
    pub warning: Option<WeightWarning>,
    /// Why velocity could not be computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_error: Option<ErrorDetail>,
}

fn require_weight(weight_kg: f64, field: &str) -> AppResult<f64> {
    if weight_kg.is_finite() && weight_kg > 0.0 {
        Ok(weight_kg)
    } else {
        Err(AppError::invalid_input(format!("{field} must be positive")).with_field(field))
    }
}

/// Compare two dated weights
///
/// Days are the calendar difference between the two dates.
///
/// # Errors
///
/// Returns `InvalidInput` when a weight is not positive or the current
/// observation predates the previous one
pub fn compare_weight(
    previous: WeightObservation,
    current: WeightObservation,
    config: &TrendConfig,
) -> AppResult<WeightTrend> {
    let before = require_weight(previous.weight_kg, "previous_weight_kg")?;
    let now = require_weight(current.weight_kg, "current_weight_kg")?;
    let days = (current.on - previous.on).num_days();
    if days < 0 {
        return Err(
            AppError::invalid_input("Current weight predates the previous weight")
                .with_field("assessed_on"),
        );
    }

    let change_kg = now - before;
    let percent = percent_change(before, now);
    let direction = percent.map(|p| classify_direction(p, config.no_change_percent));

    let (kg_per_week, percent_per_week, velocity_error) = if days == 0 {
        let error = AppError::indeterminate("Velocity needs observations on different days")
            .with_field("assessed_on");
        (None, None, Some(ErrorDetail::from(error)))
    } else {
        let weeks = days as f64 / DAYS_PER_WEEK;
        (
            Some(round2(change_kg / weeks)),
            percent.map(|p| round2(p / weeks)),
            None,
        )
    };

    let warning = kg_per_week.and_then(|v| {
        if -v > config.rapid_loss_kg_per_week {
            Some(WeightWarning::RapidLoss)
        } else if v > config.rapid_gain_kg_per_week {
            Some(WeightWarning::RapidGain)
        } else {
            None
        }
    });
    debug!(days, change_kg, ?kg_per_week, ?warning, "Weight trend computed");

    Ok(WeightTrend {
        previous_kg: before,
        current_kg: now,
        change_kg: round2(change_kg),
        percent_change: percent,
        direction,
        days_elapsed: days,
        kg_per_week,
        percent_per_week,
        warning,
        velocity_error,
    })
}

/// Percent weight loss over a look-back window
///
/// Uses the oldest weighed entry no more than `window_days` before the
/// current observation. Positive values are losses. `history` may be in any
/// order.
#[must_use]
pub fn weight_loss_percent_over(
    history: &[HistoryEntry],
    current: WeightObservation,
    window_days: i64,
) -> Option<f64> {
    history
        .iter()
        .filter(|entry| {
            let age = (current.on - entry.assessed_on).num_days();
            age > 0 && age <= window_days
        })
        .filter_map(|entry| entry.weight_kg.map(|w| (entry.assessed_on, w)))
        .min_by_key(|(on, _)| *on)
        .and_then(|(_, reference)| percent_decline(reference, current.weight_kg))
}
