// ABOUTME: Integration tests for ordered protein requirement rules
// ABOUTME: Obesity, hypercatabolic, acute-phase, and default targets with their base weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use clinutri::anthropometrics::{derive, DerivedAnthropometrics};
use clinutri::config::ProteinConfig;
use clinutri::models::{DiseasePhase, Sex};
use clinutri::protein::{
    calculate_protein, ProteinInput, ProteinRule, Qualifier, SourceGuideline, WeightBasis,
};
use clinutri::ErrorCode;

fn input(weight_kg: f64, anthropometrics: DerivedAnthropometrics) -> ProteinInput {
    ProteinInput {
        weight_kg: Some(weight_kg),
        anthropometrics,
        burns: false,
        polytrauma: false,
        disease_phase: DiseasePhase::GeneralWard,
    }
}

#[test]
fn test_obese_patient_uses_adjusted_weight() {
    let anthropometrics = DerivedAnthropometrics {
        bmi: Some(32.0),
        ibw_kg: Some(65.0),
        abw_kg: Some(80.0),
    };
    let result = calculate_protein(&input(98.0, anthropometrics), &ProteinConfig::default()).unwrap();

    assert_eq!(result.rule, ProteinRule::Obesity);
    assert_eq!(result.weight_basis, WeightBasis::Adjusted);
    assert_eq!(result.target.to_string(), "1.3 g/kg");
    assert!((result.total.low_g - 104.0).abs() < 1e-9);
    assert_eq!(result.total.to_string(), "104 g/day");

    let alternate = result.alternate.unwrap();
    assert_eq!(alternate.weight_basis, WeightBasis::Ideal);
    assert!((alternate.total.low_g - 130.0).abs() < 1e-9);
}

#[test]
fn test_class_iii_obesity_alternate_is_upper_limit_on_ideal_weight() {
    let anthropometrics = DerivedAnthropometrics {
        bmi: Some(42.0),
        ibw_kg: Some(70.0),
        abw_kg: Some(90.0),
    };
    let result =
        calculate_protein(&input(128.0, anthropometrics), &ProteinConfig::default()).unwrap();

    assert_eq!(result.weight_basis, WeightBasis::Adjusted);
    assert!((result.total.low_g - 117.0).abs() < 1e-9);

    let alternate = result.alternate.unwrap();
    assert_eq!(alternate.weight_basis, WeightBasis::Ideal);
    assert_eq!(alternate.source_guideline, SourceGuideline::AspenSccm2016);
    assert_eq!(alternate.target.qualifier, Qualifier::UpTo);
    assert_eq!(alternate.target.to_string(), "up to 2.5 g/kg");
    assert_eq!(alternate.total.to_string(), "up to 175 g/day");
}

#[test]
fn test_obesity_falls_back_to_ideal_weight_without_adjusted() {
    let anthropometrics = DerivedAnthropometrics {
        bmi: Some(33.0),
        ibw_kg: Some(60.0),
        abw_kg: None,
    };
    let result =
        calculate_protein(&input(100.0, anthropometrics), &ProteinConfig::default()).unwrap();

    assert_eq!(result.rule, ProteinRule::Obesity);
    assert_eq!(result.weight_basis, WeightBasis::Ideal);
    assert!((result.base_weight_kg - 60.0).abs() < f64::EPSILON);
    assert!((result.total.low_g - 78.0).abs() < 1e-9);
    assert!(result
        .considerations
        .iter()
        .any(|c| c.contains("ideal body weight used")));
    assert_eq!(result.alternate.unwrap().target.to_string(), "2 g/kg");
}

#[test]
fn test_obesity_outranks_hypercatabolism() {
    let anthropometrics = derive(Some(120.0), Some(170.0), Sex::Male);
    let mut protein_input = input(120.0, anthropometrics);
    protein_input.burns = true;
    protein_input.disease_phase = DiseasePhase::EarlyAcute;
    let result = calculate_protein(&protein_input, &ProteinConfig::default()).unwrap();
    assert_eq!(result.rule, ProteinRule::Obesity);
}

#[test]
fn test_polytrauma_uses_actual_weight_range() {
    let anthropometrics = derive(Some(70.0), Some(175.0), Sex::Male);
    let mut protein_input = input(70.0, anthropometrics);
    protein_input.polytrauma = true;
    let result = calculate_protein(&protein_input, &ProteinConfig::default()).unwrap();

    assert_eq!(result.rule, ProteinRule::Hypercatabolic);
    assert_eq!(result.weight_basis, WeightBasis::Actual);
    assert!((result.total.low_g - 140.0).abs() < 1e-9);
    assert!((result.total.high_g.unwrap() - 175.0).abs() < 1e-9);
}

#[test]
fn test_acute_phase_target_is_progressive() {
    let anthropometrics = derive(Some(70.0), Some(175.0), Sex::Male);
    let mut protein_input = input(70.0, anthropometrics);
    protein_input.disease_phase = DiseasePhase::LateAcute;
    let result = calculate_protein(&protein_input, &ProteinConfig::default()).unwrap();

    assert_eq!(result.rule, ProteinRule::AcutePhase);
    assert!((result.total.low_g - 91.0).abs() < 1e-9);
    assert!(result.alternate.is_none());
}

#[test]
fn test_general_ward_falls_through_to_default() {
    let anthropometrics = derive(Some(70.0), Some(175.0), Sex::Male);
    let result = calculate_protein(&input(70.0, anthropometrics), &ProteinConfig::default()).unwrap();
    assert_eq!(result.rule, ProteinRule::Default);
    assert!((result.total.low_g - 84.0).abs() < 1e-9);
}

#[test]
fn test_missing_weight_is_invalid_input() {
    let protein_input = ProteinInput {
        weight_kg: None,
        ..input(70.0, DerivedAnthropometrics::default())
    };
    let error = calculate_protein(&protein_input, &ProteinConfig::default()).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
