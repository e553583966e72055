// ABOUTME: Integration tests for energy expenditure formulas and comparison bundles
// ABOUTME: Reference values for Mifflin-St Jeor, Harris-Benedict, Weir, and infusion adjustment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use clinutri::config::{BmrConfig, EnergyConfig};
use clinutri::energy::{
    compute_energy, mifflin_st_jeor_bmr, weir_ree, ClinicalCondition, ClinicalModifiers,
    ComparisonBundle, EnergyInput, EnergySelection, Formula, HospitalActivity, InfusionInput,
    WeirInput,
};
use clinutri::models::Sex;
use clinutri::ErrorCode;

fn sea_level_capnography() -> WeirInput {
    WeirInput {
        etco2_mmhg: 35.0,
        minute_ventilation_l_min: 6.0,
        altitude_m: 0.0,
        temperature_c: 37.0,
    }
}

fn adult_input() -> EnergyInput {
    EnergyInput::from_snapshot(&common::adult_male())
}

#[test]
fn test_mifflin_reference_male() {
    let bmr = mifflin_st_jeor_bmr(70.0, 175.0, 30, Sex::Male, &BmrConfig::default()).unwrap();
    assert!((bmr - 1648.75).abs() < 1e-9);

    let report = compute_energy(
        EnergySelection::Single(Formula::MifflinStJeor),
        &adult_input(),
        &EnergyConfig::default(),
    );
    let result = report.result(Formula::MifflinStJeor).unwrap();
    assert!((result.basal_kcal.unwrap() - 1649.0).abs() < f64::EPSILON);
    assert!(result.error.is_none());
}

#[test]
fn test_mifflin_female_constant() {
    let male = mifflin_st_jeor_bmr(60.0, 165.0, 40, Sex::Male, &BmrConfig::default()).unwrap();
    let female = mifflin_st_jeor_bmr(60.0, 165.0, 40, Sex::Female, &BmrConfig::default()).unwrap();
    assert!((male - female - 166.0).abs() < 1e-9);
}

#[test]
fn test_sedentary_activity_without_clinical_modifiers() {
    let report = compute_energy(
        EnergySelection::Single(Formula::MifflinStJeor),
        &adult_input(),
        &EnergyConfig::default(),
    );
    let result = report.result(Formula::MifflinStJeor).unwrap();
    assert!((result.factors.activity.unwrap() - 1.2).abs() < f64::EPSILON);
    assert!(result.factors.clinical.is_none());
    assert!((result.total_kcal.unwrap() - 1979.0).abs() <= 1.0);
}

#[test]
fn test_clinical_path_replaces_activity_factor() {
    let input = adult_input().with_modifiers(ClinicalModifiers {
        condition: ClinicalCondition::InfectionSevere,
        hospital_activity: HospitalActivity::BedRest,
        ..ClinicalModifiers::default()
    });
    let report = compute_energy(
        EnergySelection::Single(Formula::MifflinStJeor),
        &input,
        &EnergyConfig::default(),
    );
    let result = report.result(Formula::MifflinStJeor).unwrap();
    assert!(result.factors.activity.is_none());
    assert!((result.factors.clinical.unwrap() - 1.45).abs() < f64::EPSILON);
    assert!((result.factors.hospital.unwrap() - 1.2).abs() < f64::EPSILON);
    let expected = (1648.75_f64 * 1.45 * 1.2).round();
    assert!((result.total_kcal.unwrap() - expected).abs() <= 1.0);
}

#[test]
fn test_fever_triggers_clinical_path() {
    let mut input = adult_input();
    input.temperature_c = Some(39.0);
    let report = compute_energy(
        EnergySelection::Single(Formula::MifflinStJeor),
        &input,
        &EnergyConfig::default(),
    );
    let result = report.result(Formula::MifflinStJeor).unwrap();
    assert!((result.factors.fever.unwrap() - 1.2).abs() < 1e-9);
    assert!(result.factors.activity.is_none());
}

#[test]
fn test_weir_sea_level_reference() {
    let ree = weir_ree(&sea_level_capnography()).unwrap();
    assert!((ree - 2412.0).abs() <= 1.0, "REE was {ree}");
}

#[test]
fn test_weir_rejects_infeasible_altitude() {
    let input = WeirInput {
        altitude_m: 20_000.0,
        ..sea_level_capnography()
    };
    let error = weir_ree(&input).unwrap_err();
    assert_eq!(error.code, ErrorCode::DomainInfeasible);
}

#[test]
fn test_weir_rejects_zero_ventilation() {
    let input = WeirInput {
        minute_ventilation_l_min: 0.0,
        ..sea_level_capnography()
    };
    assert_eq!(weir_ree(&input).unwrap_err().code, ErrorCode::InvalidInput);
}

#[test]
fn test_four_way_bundle_averages_successful_formulas() {
    let input = adult_input().with_weir(sea_level_capnography());
    let report = compute_energy(
        EnergySelection::Bundle(ComparisonBundle::FourWay),
        &input,
        &EnergyConfig::default(),
    );
    assert_eq!(report.results.len(), 4);
    assert!(report.results.iter().all(|r| r.error.is_none()));

    let basal: Vec<f64> = report.results.iter().filter_map(|r| r.basal_kcal).collect();
    let mean = basal.iter().sum::<f64>() / basal.len() as f64;
    assert!((report.average_basal_kcal.unwrap() - mean).abs() <= 2.0);
}

#[test]
fn test_bundle_failure_is_local_to_one_formula() {
    let report = compute_energy(
        EnergySelection::Bundle(ComparisonBundle::MifflinWeir),
        &adult_input(),
        &EnergyConfig::default(),
    );
    let weir = report.result(Formula::Weir).unwrap();
    assert_eq!(weir.error.as_ref().unwrap().code, ErrorCode::InvalidInput);
    assert!(weir.total_kcal.is_none());

    let mifflin = report.result(Formula::MifflinStJeor).unwrap();
    assert!(mifflin.error.is_none());
    assert!((report.average_basal_kcal.unwrap() - 1649.0).abs() < f64::EPSILON);
}

#[test]
fn test_single_formula_has_no_average() {
    let report = compute_energy(
        EnergySelection::Single(Formula::WeightBased),
        &adult_input(),
        &EnergyConfig::default(),
    );
    assert!(report.average_basal_kcal.is_none());
    let result = report.result(Formula::WeightBased).unwrap();
    assert!((result.total_kcal.unwrap() - 1750.0).abs() < f64::EPSILON);
}

#[test]
fn test_burns_outside_range_is_domain_infeasible() {
    let input = adult_input().with_modifiers(ClinicalModifiers {
        condition: ClinicalCondition::Burns { percent_bsa: 120.0 },
        ..ClinicalModifiers::default()
    });
    let report = compute_energy(
        EnergySelection::Single(Formula::MifflinStJeor),
        &input,
        &EnergyConfig::default(),
    );
    let result = report.result(Formula::MifflinStJeor).unwrap();
    assert_eq!(
        result.error.as_ref().unwrap().code,
        ErrorCode::DomainInfeasible
    );
}

#[test]
fn test_infusions_reduce_adjusted_total() {
    let input = adult_input().with_infusions(InfusionInput {
        propofol_ml_per_hour: 10.0,
        propofol_hours_per_day: 24.0,
        dextrose_percent: 5.0,
        dextrose_ml_per_day: 1000.0,
    });
    let report = compute_energy(
        EnergySelection::Single(Formula::WeightBased),
        &input,
        &EnergyConfig::default(),
    );
    let non_nutritional = report.non_nutritional_kcal.unwrap();
    assert!((non_nutritional - 434.0).abs() < 1e-6);

    let result = report.result(Formula::WeightBased).unwrap();
    assert!((result.adjusted_for_infusions_kcal.unwrap() - 1316.0).abs() < f64::EPSILON);
}

#[test]
fn test_measured_ree_is_reported_unchanged() {
    let input = adult_input().with_measured_ree(1825.4);
    let report = compute_energy(
        EnergySelection::Single(Formula::IndirectCalorimetry),
        &input,
        &EnergyConfig::default(),
    );
    let result = report.result(Formula::IndirectCalorimetry).unwrap();
    assert!((result.total_kcal.unwrap() - 1825.0).abs() < f64::EPSILON);
}

#[test]
fn test_missing_age_fails_predictive_formulas_only() {
    let mut input = adult_input();
    input.age_years = None;
    let report = compute_energy(
        EnergySelection::Bundle(ComparisonBundle::MifflinWeight),
        &input,
        &EnergyConfig::default(),
    );
    assert!(report.result(Formula::MifflinStJeor).unwrap().error.is_some());
    assert!(report.result(Formula::WeightBased).unwrap().error.is_none());
}

#[test]
fn test_energy_is_idempotent() {
    let input = adult_input().with_weir(sea_level_capnography());
    let selection = EnergySelection::Bundle(ComparisonBundle::FourWay);
    let config = EnergyConfig::default();
    assert_eq!(
        compute_energy(selection, &input, &config),
        compute_energy(selection, &input, &config)
    );
}
