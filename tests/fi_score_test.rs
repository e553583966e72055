// ABOUTME: Integration tests for the feeding intolerance score
// ABOUTME: Point totals, tolerance bands, and gastric residual volume overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use clinutri::config::FiScoreConfig;
use clinutri::fi_score::{
    score_feeding_intolerance, Diarrhea, DistensionPain, FiScoreInput, FiScoreResult,
    NauseaVomiting, ToleranceBand,
};
use clinutri::ErrorCode;

fn score(input: &FiScoreInput) -> FiScoreResult {
    score_feeding_intolerance(input, &FiScoreConfig::default()).unwrap()
}

#[test]
fn test_no_symptoms_is_acceptable() {
    let result = score(&FiScoreInput::default());
    assert_eq!(result.total, 0);
    assert_eq!(result.band, ToleranceBand::Acceptable);
    assert!(!result.residual_volume_override);
}

#[test]
fn test_large_residual_forces_severe_vomiting() {
    let result = score(&FiScoreInput {
        gastric_residual_ml: Some(600.0),
        ..FiScoreInput::default()
    });
    assert_eq!(result.nausea_vomiting, NauseaVomiting::SevereVomiting);
    assert_eq!(result.nausea_vomiting_points, 5);
    assert_eq!(result.total, 5);
    assert_eq!(result.band, ToleranceBand::SevereIntolerance);
    assert!(result.residual_volume_override);
}

#[test]
fn test_small_residual_keeps_manual_selection() {
    let result = score(&FiScoreInput {
        nausea_vomiting: NauseaVomiting::Nausea,
        gastric_residual_ml: Some(100.0),
        ..FiScoreInput::default()
    });
    assert_eq!(result.nausea_vomiting, NauseaVomiting::Nausea);
    assert_eq!(result.nausea_vomiting_points, 1);
    assert!(!result.residual_volume_override);
}

#[test]
fn test_moderate_residual_forces_mild_vomiting() {
    let result = score(&FiScoreInput {
        nausea_vomiting: NauseaVomiting::SevereVomiting,
        gastric_residual_ml: Some(300.0),
        ..FiScoreInput::default()
    });
    assert_eq!(result.nausea_vomiting, NauseaVomiting::MildVomiting);
    assert_eq!(result.nausea_vomiting_points, 2);
    assert!(result.residual_volume_override);
}

#[test]
fn test_mild_moderate_band() {
    let result = score(&FiScoreInput {
        distension_pain: DistensionPain::Mild,
        nausea_vomiting: NauseaVomiting::Nausea,
        diarrhea: Diarrhea::Moderate,
        gastric_residual_ml: None,
    });
    assert_eq!(result.total, 4);
    assert_eq!(result.band, ToleranceBand::MildModerateIntolerance);
    assert_eq!(
        result.recommendation,
        ToleranceBand::MildModerateIntolerance.recommendation()
    );
}

#[test]
fn test_point_lookup_accepts_only_scored_values() {
    assert_eq!(DistensionPain::from_points(5).unwrap(), DistensionPain::Severe);
    assert_eq!(NauseaVomiting::from_points(2).unwrap(), NauseaVomiting::MildVomiting);
    assert_eq!(
        Diarrhea::from_points(4).unwrap_err().code,
        ErrorCode::InvalidInput
    );
}

#[test]
fn test_negative_residual_rejected() {
    let input = FiScoreInput {
        gastric_residual_ml: Some(-10.0),
        ..FiScoreInput::default()
    };
    let error = score_feeding_intolerance(&input, &FiScoreConfig::default()).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
