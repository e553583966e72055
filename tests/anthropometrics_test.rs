// ABOUTME: Integration tests for BMI, Hamwi ideal body weight, and adjusted body weight
// ABOUTME: Covers the ABW trigger, short stature, and insufficient-data handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use clinutri::anthropometrics::{
    adjusted_body_weight, bmi, derive, derive_for, ideal_body_weight,
};
use clinutri::models::{PatientId, PatientSnapshot, Sex};

#[test]
fn test_bmi_for_standard_adult() {
    let value = bmi(70.0, 175.0).unwrap();
    assert!((value - 22.857).abs() < 0.001);
}

#[test]
fn test_bmi_rejects_non_positive_inputs() {
    assert!(bmi(0.0, 175.0).is_none());
    assert!(bmi(70.0, -1.0).is_none());
    assert!(bmi(f64::NAN, 175.0).is_none());
}

#[test]
fn test_hamwi_ibw_by_sex() {
    let male = ideal_body_weight(175.0, Sex::Male).unwrap();
    let female = ideal_body_weight(175.0, Sex::Female).unwrap();
    assert!((male - 70.46).abs() < 0.01);
    assert!((female - 65.96).abs() < 0.01);
}

#[test]
fn test_short_stature_returns_base_weight() {
    let ibw = ideal_body_weight(150.0, Sex::Female).unwrap();
    assert!((ibw - 45.5).abs() < f64::EPSILON);
}

#[test]
fn test_abw_equals_actual_weight_below_trigger() {
    let ibw = ideal_body_weight(175.0, Sex::Male).unwrap();
    let abw = adjusted_body_weight(80.0, ibw).unwrap();
    assert!((abw - 80.0).abs() < f64::EPSILON);
}

#[test]
fn test_abw_applies_above_120_percent_of_ibw() {
    let ibw = ideal_body_weight(175.0, Sex::Male).unwrap();
    let abw = adjusted_body_weight(120.0, ibw).unwrap();
    let expected = 0.4f64.mul_add(120.0 - ibw, ibw);
    assert!((abw - expected).abs() < 1e-9);
    assert!(abw < 120.0);
    assert!(abw > ibw);
}

#[test]
fn test_derived_values_are_non_negative() {
    for (weight, height) in [(40.0, 150.0), (70.0, 175.0), (160.0, 190.0)] {
        for sex in [Sex::Male, Sex::Female] {
            let derived = derive(Some(weight), Some(height), sex);
            assert!(derived.is_complete());
            assert!(derived.bmi.unwrap() > 0.0);
            assert!(derived.ibw_kg.unwrap() > 0.0);
            assert!(derived.abw_kg.unwrap() > 0.0);
        }
    }
}

#[test]
fn test_missing_height_is_insufficient_data() {
    let derived = derive(Some(70.0), None, Sex::Male);
    assert!(derived.bmi.is_none());
    assert!(derived.ibw_kg.is_none());
    assert!(derived.abw_kg.is_none());
}

#[test]
fn test_snapshot_without_age_is_insufficient_data() {
    let snapshot = PatientSnapshot::new(PatientId::new("no-age"), common::today(), Sex::Male)
        .with_height(175.0)
        .with_weight(70.0);
    assert!(!derive_for(&snapshot).is_complete());

    let derived = derive_for(&common::adult_male());
    assert!(derived.is_complete());
}
