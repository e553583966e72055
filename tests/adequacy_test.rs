// ABOUTME: Integration tests for delivered-intake adequacy against calorie and protein goals
// ABOUTME: Band edges, missing goals, mixed enteral/parenteral support, and goal lookup in history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use clinutri::adequacy::{
    evaluate_adequacy, evaluate_intake, latest_nutrition_goal, ActualIntake, AdequacyBand,
    Nutrient, RouteIntake,
};
use clinutri::config::AdequacyConfig;
use clinutri::models::{AssessmentKind, NutritionGoal};
use clinutri::ErrorCode;

fn band(actual: f64, goal: f64) -> AdequacyBand {
    evaluate_adequacy(
        Nutrient::Calories,
        actual,
        Some(goal),
        &AdequacyConfig::default(),
    )
    .unwrap()
    .band
}

#[test]
fn test_full_goal_is_met() {
    let assessment = evaluate_adequacy(
        Nutrient::Calories,
        1000.0,
        Some(1000.0),
        &AdequacyConfig::default(),
    )
    .unwrap();
    assert_eq!(assessment.band, AdequacyBand::GoalMet);
    assert!((assessment.percent_of_goal.unwrap() - 100.0).abs() < 1e-9);
    assert!(assessment.delta.unwrap().abs() < 1e-9);
    assert_eq!(assessment.band.to_string(), "goal met");
}

#[test]
fn test_seventy_percent_is_deficient() {
    assert_eq!(band(700.0, 1000.0), AdequacyBand::Deficient);
}

#[test]
fn test_band_edges_are_inclusive_where_documented() {
    assert_eq!(band(800.0, 1000.0), AdequacyBand::SlightlyLow);
    assert_eq!(band(900.0, 1000.0), AdequacyBand::GoalMet);
    assert_eq!(band(1100.0, 1000.0), AdequacyBand::GoalMet);
    assert_eq!(band(1200.0, 1000.0), AdequacyBand::SlightlyHigh);
    assert_eq!(band(1250.0, 1000.0), AdequacyBand::Excessive);
}

#[test]
fn test_missing_goal_is_indeterminate() {
    let assessment =
        evaluate_adequacy(Nutrient::Protein, 60.0, None, &AdequacyConfig::default()).unwrap();
    assert_eq!(assessment.band, AdequacyBand::NoGoalDefined);
    assert!(assessment.percent_of_goal.is_none());
    assert_eq!(
        assessment.error.unwrap().code,
        ErrorCode::IndeterminateClassification
    );

    let zero_goal =
        evaluate_adequacy(Nutrient::Protein, 60.0, Some(0.0), &AdequacyConfig::default())
            .unwrap();
    assert_eq!(zero_goal.band, AdequacyBand::NoGoalDefined);
}

#[test]
fn test_negative_intake_rejected() {
    let error = evaluate_adequacy(
        Nutrient::Calories,
        -1.0,
        Some(1000.0),
        &AdequacyConfig::default(),
    )
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_mixed_support_sums_routes_and_recommends() {
    let intake = ActualIntake {
        enteral: RouteIntake {
            calories_kcal: 800.0,
            protein_g: 40.0,
        },
        parenteral: RouteIntake {
            calories_kcal: 600.0,
            protein_g: 30.0,
        },
        non_nutritional_kcal: 100.0,
    };
    let result = evaluate_intake(
        &intake,
        Some(&common::goal(1600.0, 80.0)),
        &AdequacyConfig::default(),
    )
    .unwrap();

    assert!(result.mixed);
    assert!((result.calories.actual - 1500.0).abs() < 1e-9);
    assert_eq!(result.calories.band, AdequacyBand::GoalMet);
    assert_eq!(result.protein.band, AdequacyBand::SlightlyLow);
    assert!(result.calories.recommendation.is_some());
}

#[test]
fn test_single_route_has_no_mixed_recommendation() {
    let result = evaluate_intake(
        &ActualIntake::enteral(1500.0, 75.0),
        Some(&common::goal(1500.0, 75.0)),
        &AdequacyConfig::default(),
    )
    .unwrap();
    assert!(!result.mixed);
    assert!(result.calories.recommendation.is_none());
    assert_eq!(result.protein.band, AdequacyBand::GoalMet);
}

#[test]
fn test_partial_goal_only_classifies_defined_nutrient() {
    let goal = NutritionGoal {
        calories_kcal: Some(2000.0),
        protein_g: None,
    };
    let result = evaluate_intake(
        &ActualIntake::enteral(1000.0, 50.0),
        Some(&goal),
        &AdequacyConfig::default(),
    )
    .unwrap();
    assert_eq!(result.calories.band, AdequacyBand::Deficient);
    assert_eq!(result.protein.band, AdequacyBand::NoGoalDefined);
}

#[test]
fn test_latest_goal_comes_from_most_recent_entry() {
    let mut recent = common::history_entry(1, AssessmentKind::FollowUp, None);
    recent.goal = Some(common::goal(1800.0, 90.0));
    let mut older = common::history_entry(8, AssessmentKind::Initial, None);
    older.goal = Some(common::goal(1500.0, 70.0));
    let unset = common::history_entry(0, AssessmentKind::FollowUp, None);

    let goal = latest_nutrition_goal(&[unset, recent, older]).unwrap();
    assert_eq!(goal.calories_kcal, Some(1800.0));
}
