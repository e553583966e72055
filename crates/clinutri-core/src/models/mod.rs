// ABOUTME: Core data models for clinical nutrition assessment
// ABOUTME: Re-exports patient snapshot, lab panel, and assessment history types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Core data models
//!
//! A [`PatientSnapshot`] is created once per assessment occasion and never
//! mutated; the `with_*` methods consume it and return a new snapshot.

/// Assessment history records and the history service contract
pub mod history;
/// Laboratory panel, analytes, and thiamine results
pub mod labs;
/// Patient snapshot and demographic/clinical enums
pub mod patient;

pub use history::{AssessmentKind, HistoryEntry, HistoryProvider, InMemoryHistory, NutritionGoal};
pub use labs::{Analyte, Electrolyte, LabPanel, ThiamineResult, ThiamineStatus, ThiamineUnit};
pub use patient::{
    DiseasePhase, NutritionRoute, PatientId, PatientSnapshot, RespiratoryStatus, Sex,
};
