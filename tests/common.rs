// ABOUTME: Shared fixtures for clinutri integration tests
// ABOUTME: Snapshot, lab panel, and history builders plus quiet test logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `clinutri`

use chrono::{Duration, NaiveDate};
use clinutri::models::{
    Analyte, AssessmentKind, HistoryEntry, LabPanel, NutritionGoal, PatientId, PatientSnapshot,
    Sex,
};
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Default assessment date used across tests
pub fn today() -> NaiveDate {
    date(2025, 3, 15)
}

/// Adult male, 70 kg, 175 cm, 30 years, no labs
pub fn adult_male() -> PatientSnapshot {
    PatientSnapshot::new(PatientId::new("patient-001"), today(), Sex::Male)
        .with_age(30)
        .with_height(175.0)
        .with_weight(70.0)
}

/// Snapshot with an arbitrary id, weight and height
pub fn snapshot(id: &str, sex: Sex, weight_kg: f64, height_cm: f64) -> PatientSnapshot {
    PatientSnapshot::new(PatientId::new(id), today(), sex)
        .with_age(55)
        .with_height(height_cm)
        .with_weight(weight_kg)
}

/// Panel with potassium, phosphorus and magnesium
pub fn electrolytes(potassium: f64, phosphorus: f64, magnesium: f64) -> LabPanel {
    LabPanel::default()
        .with_value(Analyte::Potassium, potassium)
        .with_value(Analyte::Phosphorus, phosphorus)
        .with_value(Analyte::Magnesium, magnesium)
}

/// Panel with potassium only
pub fn potassium(value: f64) -> LabPanel {
    LabPanel::default().with_value(Analyte::Potassium, value)
}

/// History entry recorded `days_ago` before [`today`]
pub fn history_entry(days_ago: i64, kind: AssessmentKind, weight_kg: Option<f64>) -> HistoryEntry {
    HistoryEntry {
        assessed_on: today() - Duration::days(days_ago),
        kind,
        weight_kg,
        labs: LabPanel::default(),
        goal: None,
    }
}

/// Goal with both calories and protein set
pub const fn goal(calories_kcal: f64, protein_g: f64) -> NutritionGoal {
    NutritionGoal {
        calories_kcal: Some(calories_kcal),
        protein_g: Some(protein_g),
    }
}
