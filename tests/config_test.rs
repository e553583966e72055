// ABOUTME: Integration tests for engine configuration loading and validation
// ABOUTME: Environment overrides, parse failures, misordered thresholds, and custom cutoffs in use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use clinutri::config::{ConfigError, EngineConfig};
use clinutri::refeeding::{evaluate_refeeding_risk, RefeedingRiskInput, RiskLevel};
use serial_test::serial;
use std::env;

const OVERRIDE_VARS: &[&str] = &[
    "CLINUTRI_POTASSIUM_LOW",
    "CLINUTRI_POTASSIUM_ALERT",
    "CLINUTRI_TREND_RAPID_LOSS_KG_WEEK",
    "CLINUTRI_REFEEDING_TEMPORALITY_DAYS",
    "CLINUTRI_GRV_SEVERE_ML",
    "CLINUTRI_GRV_MILD_ML",
];

fn clear_overrides() {
    for var in OVERRIDE_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_without_overrides_matches_defaults() {
    clear_overrides();
    let config = EngineConfig::load().unwrap();
    let defaults = EngineConfig::default();
    assert!(
        (config.lab_reference.potassium_low - defaults.lab_reference.potassium_low).abs()
            < f64::EPSILON
    );
    assert_eq!(config.refeeding.temporality_window_days, 5);
}

#[test]
#[serial]
fn test_env_overrides_apply() {
    clear_overrides();
    env::set_var("CLINUTRI_POTASSIUM_LOW", "3.4");
    env::set_var("CLINUTRI_TREND_RAPID_LOSS_KG_WEEK", "1.5");
    env::set_var("CLINUTRI_REFEEDING_TEMPORALITY_DAYS", "7");

    let config = EngineConfig::load().unwrap();
    clear_overrides();

    assert!((config.lab_reference.potassium_low - 3.4).abs() < f64::EPSILON);
    assert!((config.trends.rapid_loss_kg_per_week - 1.5).abs() < f64::EPSILON);
    assert_eq!(config.refeeding.temporality_window_days, 7);
}

#[test]
#[serial]
fn test_unparseable_override_is_rejected() {
    clear_overrides();
    env::set_var("CLINUTRI_GRV_SEVERE_ML", "five hundred");
    let result = EngineConfig::load();
    clear_overrides();

    match result {
        Err(ConfigError::Parse(message)) => assert!(message.contains("CLINUTRI_GRV_SEVERE_ML")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_override_that_breaks_ordering_fails_validation() {
    clear_overrides();
    env::set_var("CLINUTRI_POTASSIUM_ALERT", "3.0");
    let result = EngineConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_validation_rejects_misordered_thresholds() {
    let mut config = EngineConfig::default();
    config.refeeding.moderate_bmi = 15.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));

    let mut config = EngineConfig::default();
    config.adequacy.met_from_percent = 115.0;
    assert!(config.validate().is_err());

    let mut config = EngineConfig::default();
    config.lab_reference.thiamine_ng_per_ml.high = 20.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));

    let mut config = EngineConfig::default();
    config.refeeding.moderate_criteria_required = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = EngineConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
    assert!(parsed.validate().is_ok());
    assert!((parsed.fi_score.grv_severe_ml - 500.0).abs() < f64::EPSILON);
}

#[test]
fn test_site_cutoffs_change_risk_outcome() {
    let input = RefeedingRiskInput {
        bmi: Some(22.0),
        labs: common::potassium(3.45),
        ..RefeedingRiskInput::default()
    };
    let defaults = EngineConfig::default();
    let assessment =
        evaluate_refeeding_risk(&input, &defaults.lab_reference, &defaults.refeeding).unwrap();
    assert_eq!(assessment.level, RiskLevel::Significant);

    let mut site = EngineConfig::default();
    site.lab_reference.potassium_low = 3.4;
    site.lab_reference.potassium_alert = 3.6;
    let assessment =
        evaluate_refeeding_risk(&input, &site.lab_reference, &site.refeeding).unwrap();
    assert_eq!(assessment.level, RiskLevel::Low);
}
