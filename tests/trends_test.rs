// ABOUTME: Integration tests for lab panel and weight trend comparison
// ABOUTME: Direction, concern escalation, unit mismatches, and weight velocity warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use clinutri::config::{LabReferenceConfig, TrendConfig};
use clinutri::models::{Analyte, AssessmentKind, LabPanel, ThiamineResult, ThiamineUnit};
use clinutri::trends::{
    compare_labs, compare_weight, percent_change, weight_loss_percent_over, ConcernLevel,
    Direction, LabComparison, WeightObservation, WeightWarning,
};
use clinutri::ErrorCode;

fn compare(previous: &LabPanel, current: &LabPanel) -> LabComparison {
    compare_labs(
        previous,
        current,
        &LabReferenceConfig::default(),
        &TrendConfig::default(),
    )
}

// ============================================================================
// Labs
// ============================================================================

#[test]
fn test_potassium_ten_percent_fall_is_critical() {
    let comparison = compare(&common::potassium(4.0), &common::potassium(3.6));
    let change = comparison.change(Analyte::Potassium).unwrap();

    assert!((change.percent_change.unwrap() + 10.0).abs() < 1e-9);
    assert_eq!(change.direction, Some(Direction::Decrease));
    assert_eq!(change.concern, Some(ConcernLevel::Critical));
    assert!(comparison.has_significant_change);
    assert_eq!(comparison.electrolyte_concerns.len(), 1);
}

#[test]
fn test_five_percent_fall_raises_alert() {
    let comparison = compare(&common::potassium(4.0), &common::potassium(3.8));
    let change = comparison.change(Analyte::Potassium).unwrap();
    assert_eq!(change.direction, Some(Direction::Decrease));
    assert_eq!(change.concern, Some(ConcernLevel::Alert));
    assert!(!comparison.has_significant_change);
}

#[test]
fn test_value_below_cutoff_is_critical_without_decline() {
    let comparison = compare(&common::potassium(3.4), &common::potassium(3.4));
    let change = comparison.change(Analyte::Potassium).unwrap();
    assert_eq!(change.direction, Some(Direction::NoChange));
    assert_eq!(change.concern, Some(ConcernLevel::Critical));
}

#[test]
fn test_new_and_dropped_analytes() {
    let previous = LabPanel::default()
        .with_value(Analyte::Potassium, 4.0)
        .with_value(Analyte::Crp, 80.0);
    let current = LabPanel::default()
        .with_value(Analyte::Potassium, 4.4)
        .with_value(Analyte::Sodium, 138.0);
    let comparison = compare(&previous, &current);

    let sodium = comparison.change(Analyte::Sodium).unwrap();
    assert_eq!(sodium.direction, Some(Direction::NewValue));
    assert!(sodium.concern.is_none());
    assert!(comparison.change(Analyte::Crp).is_none());

    let potassium = comparison.change(Analyte::Potassium).unwrap();
    assert_eq!(potassium.direction, Some(Direction::Increase));
    assert_eq!(potassium.concern, Some(ConcernLevel::Normal));
}

#[test]
fn test_thiamine_unit_mismatch_is_reported() {
    let mut previous = LabPanel::default();
    previous.thiamine = Some(ThiamineResult::measured(100.0, ThiamineUnit::NmolPerL));
    let mut current = LabPanel::default();
    current.thiamine = Some(ThiamineResult::measured(30.0, ThiamineUnit::NgPerMl));

    let comparison = compare(&previous, &current);
    let thiamine = comparison.change(Analyte::Thiamine).unwrap();
    assert!(thiamine.percent_change.is_none());
    assert!(thiamine.direction.is_none());
    assert_eq!(thiamine.unit, "ng/mL");
    assert_eq!(comparison.issues.len(), 1);
    assert_eq!(comparison.issues[0].code, ErrorCode::UnitMismatch);
}

#[test]
fn test_zero_reference_is_indeterminate() {
    let previous = LabPanel::default().with_value(Analyte::Crp, 0.0);
    let current = LabPanel::default().with_value(Analyte::Crp, 12.0);
    let comparison = compare(&previous, &current);
    assert!(comparison
        .change(Analyte::Crp)
        .unwrap()
        .percent_change
        .is_none());
    assert_eq!(
        comparison.issues[0].code,
        ErrorCode::IndeterminateClassification
    );
}

#[test]
fn test_percent_change_rounds_to_two_decimals() {
    assert!((percent_change(3.0, 2.0).unwrap() + 33.33).abs() < 1e-9);
    assert!(percent_change(0.0, 2.0).is_none());
}

#[test]
fn test_lab_comparison_is_idempotent() {
    let previous = common::electrolytes(4.0, 3.0, 2.0);
    let current = common::electrolytes(3.5, 2.4, 1.9);
    assert_eq!(compare(&previous, &current), compare(&previous, &current));
}

// ============================================================================
// Weight
// ============================================================================

#[test]
fn test_rapid_weight_loss_warning() {
    let previous = WeightObservation::new(common::date(2025, 3, 1), 70.0);
    let current = WeightObservation::new(common::date(2025, 3, 8), 67.0);
    let trend = compare_weight(previous, current, &TrendConfig::default()).unwrap();

    assert!((trend.change_kg + 3.0).abs() < 1e-9);
    assert!((trend.kg_per_week.unwrap() + 3.0).abs() < 1e-9);
    assert_eq!(trend.warning, Some(WeightWarning::RapidLoss));
    assert_eq!(trend.days_elapsed, 7);
}

#[test]
fn test_rapid_gain_threshold_is_exclusive() {
    let previous = WeightObservation::new(common::date(2025, 3, 1), 70.0);
    let at_limit = WeightObservation::new(common::date(2025, 3, 8), 73.0);
    let trend = compare_weight(previous, at_limit, &TrendConfig::default()).unwrap();
    assert!(trend.warning.is_none());

    let above = WeightObservation::new(common::date(2025, 3, 8), 73.5);
    let trend = compare_weight(previous, above, &TrendConfig::default()).unwrap();
    assert_eq!(trend.warning, Some(WeightWarning::RapidGain));
}

#[test]
fn test_same_day_weights_have_no_velocity() {
    let previous = WeightObservation::new(common::today(), 70.0);
    let current = WeightObservation::new(common::today(), 69.0);
    let trend = compare_weight(previous, current, &TrendConfig::default()).unwrap();
    assert!(trend.kg_per_week.is_none());
    assert_eq!(
        trend.velocity_error.unwrap().code,
        ErrorCode::IndeterminateClassification
    );
    assert_eq!(trend.direction, Some(Direction::NoChange));
}

#[test]
fn test_out_of_order_weights_rejected() {
    let previous = WeightObservation::new(common::date(2025, 3, 8), 70.0);
    let current = WeightObservation::new(common::date(2025, 3, 1), 69.0);
    let error = compare_weight(previous, current, &TrendConfig::default()).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_non_positive_weight_rejected() {
    let previous = WeightObservation::new(common::date(2025, 3, 1), 0.0);
    let current = WeightObservation::new(common::date(2025, 3, 8), 69.0);
    assert!(compare_weight(previous, current, &TrendConfig::default()).is_err());
}

#[test]
fn test_weight_loss_over_window_uses_oldest_entry_in_window() {
    let history = vec![
        common::history_entry(10, AssessmentKind::FollowUp, Some(78.0)),
        common::history_entry(25, AssessmentKind::FollowUp, Some(80.0)),
        common::history_entry(60, AssessmentKind::Initial, Some(90.0)),
    ];
    let current = WeightObservation::new(common::today(), 76.0);

    let month = weight_loss_percent_over(&history, current, 30).unwrap();
    assert!((month - 5.0).abs() < 1e-9);

    let quarter = weight_loss_percent_over(&history, current, 90).unwrap();
    assert!((quarter - 15.56).abs() < 1e-9);

    assert!(weight_loss_percent_over(&history, current, 5).is_none());
}
