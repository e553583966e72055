// ABOUTME: Assessment history records and the history service contract
// ABOUTME: HistoryProvider trait returning prior assessments most-recent-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Assessment history
//!
//! The engine never reads storage. The surrounding application implements
//! [`HistoryProvider`] and hands the engine a slice of [`HistoryEntry`] values
//! ordered most-recent-first; every engine function that walks history relies
//! on that ordering.

use super::labs::LabPanel;
use super::patient::PatientId;
use crate::errors::AppResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether an entry was the initial assessment or a follow-up
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    /// First assessment of the admission; holds the stored baseline labs
    Initial,
    /// Any later reassessment
    FollowUp,
}

/// Calorie and protein objectives set at an assessment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionGoal {
    /// Energy goal (kcal/day)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_kcal: Option<f64>,
    /// Protein goal (g/day)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
}

impl NutritionGoal {
    /// Whether either objective was recorded
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.calories_kcal.is_some() || self.protein_g.is_some()
    }
}

/// One prior assessment as supplied by the history service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Date of the prior assessment
    pub assessed_on: NaiveDate,
    /// Initial or follow-up
    pub kind: AssessmentKind,
    /// Weight recorded at that assessment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Labs drawn at that assessment
    #[serde(default)]
    pub labs: LabPanel,
    /// Objectives set at that assessment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<NutritionGoal>,
}

/// History service contract
///
/// Implementations must return entries ordered most-recent-first.
pub trait HistoryProvider: Send + Sync {
    /// Prior assessments for a patient, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot produce the history
    fn recent_first(&self, patient: &PatientId) -> AppResult<Vec<HistoryEntry>>;
}

/// In-memory history keeping each patient's entries sorted most-recent-first
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    entries: HashMap<PatientId, Vec<HistoryEntry>>,
}

impl InMemoryHistory {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry, keeping the patient's list ordered by date descending
    pub fn record(&mut self, patient: PatientId, entry: HistoryEntry) {
        let list = self.entries.entry(patient).or_default();
        let position = list.partition_point(|existing| existing.assessed_on >= entry.assessed_on);
        list.insert(position, entry);
    }

    /// Build a history for one patient from unordered entries
    #[must_use]
    pub fn from_entries(patient: &PatientId, entries: Vec<HistoryEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            history.record(patient.clone(), entry);
        }
        history
    }
}

impl HistoryProvider for InMemoryHistory {
    fn recent_first(&self, patient: &PatientId) -> AppResult<Vec<HistoryEntry>> {
        Ok(self.entries.get(patient).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn entry(day: u32) -> HistoryEntry {
        HistoryEntry {
            assessed_on: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            kind: AssessmentKind::FollowUp,
            weight_kg: None,
            labs: LabPanel::default(),
            goal: None,
        }
    }

    #[test]
    fn test_in_memory_history_orders_most_recent_first() {
        let patient = PatientId::new("bed-12");
        let history = InMemoryHistory::from_entries(&patient, vec![entry(3), entry(9), entry(1)]);

        let days: Vec<u32> = history
            .recent_first(&patient)
            .unwrap()
            .iter()
            .map(|e| e.assessed_on.day())
            .collect();
        assert_eq!(days, vec![9, 3, 1]);
    }

    #[test]
    fn test_unknown_patient_has_empty_history() {
        let history = InMemoryHistory::new();
        assert!(history
            .recent_first(&PatientId::new("nobody"))
            .unwrap()
            .is_empty());
    }
}
