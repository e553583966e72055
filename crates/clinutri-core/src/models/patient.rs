// ABOUTME: Patient snapshot model for a single assessment occasion
// ABOUTME: Sex, disease phase, respiratory status, nutrition route, and builder-style updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::labs::LabPanel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque patient identifier supplied by the surrounding application
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    /// Wrap an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Biological sex used by the predictive equations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

/// Phase of critical illness
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiseasePhase {
    /// Early acute phase (ICU days 1-2)
    EarlyAcute,
    /// Late acute phase (ICU days 3-7)
    LateAcute,
    /// Stable on the general ward
    #[default]
    GeneralWard,
    /// Recovery / rehabilitation
    Recovery,
}

impl DiseasePhase {
    /// Whether the patient is in either acute phase
    #[must_use]
    pub const fn is_acute(self) -> bool {
        matches!(self, Self::EarlyAcute | Self::LateAcute)
    }
}

/// Ventilatory support status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RespiratoryStatus {
    /// Breathing without support
    #[default]
    SpontaneousBreathing,
    /// Non-invasive ventilation
    NonInvasiveVentilation,
    /// Invasive mechanical ventilation
    MechanicalVentilation,
}

/// Current route of nutrition support
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NutritionRoute {
    /// Oral diet
    #[default]
    Oral,
    /// Enteral (tube) feeding
    Enteral,
    /// Parenteral nutrition
    Parenteral,
    /// Combined enteral and parenteral
    Mixed,
    /// Nil by mouth, no support
    None,
}

/// Immutable record of one assessment occasion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    /// Opaque patient identifier
    pub id: PatientId,
    /// Calendar date of the assessment
    pub assessed_on: NaiveDate,
    /// Biological sex
    pub sex: Sex,
    /// Age in whole years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Actual body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Body temperature in °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    /// Phase of illness
    #[serde(default)]
    pub disease_phase: DiseasePhase,
    /// Ventilatory status
    #[serde(default)]
    pub respiratory_status: RespiratoryStatus,
    /// Nutrition support route
    #[serde(default)]
    pub nutrition_route: NutritionRoute,
    /// Laboratory values drawn for this assessment
    #[serde(default)]
    pub labs: LabPanel,
}

impl PatientSnapshot {
    /// Create a snapshot with only identity, date, and sex populated
    #[must_use]
    pub fn new(id: PatientId, assessed_on: NaiveDate, sex: Sex) -> Self {
        Self {
            id,
            assessed_on,
            sex,
            age_years: None,
            height_cm: None,
            weight_kg: None,
            temperature_c: None,
            disease_phase: DiseasePhase::default(),
            respiratory_status: RespiratoryStatus::default(),
            nutrition_route: NutritionRoute::default(),
            labs: LabPanel::default(),
        }
    }

    /// New snapshot with a different age
    #[must_use]
    pub fn with_age(mut self, age_years: u32) -> Self {
        self.age_years = Some(age_years);
        self
    }

    /// New snapshot with a different height
    #[must_use]
    pub fn with_height(mut self, height_cm: f64) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    /// New snapshot with a different weight
    #[must_use]
    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// New snapshot with a different body temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature_c = Some(temperature_c);
        self
    }

    /// New snapshot with a different disease phase
    #[must_use]
    pub fn with_disease_phase(mut self, phase: DiseasePhase) -> Self {
        self.disease_phase = phase;
        self
    }

    /// New snapshot with a different respiratory status
    #[must_use]
    pub fn with_respiratory_status(mut self, status: RespiratoryStatus) -> Self {
        self.respiratory_status = status;
        self
    }

    /// New snapshot with a different nutrition route
    #[must_use]
    pub fn with_nutrition_route(mut self, route: NutritionRoute) -> Self {
        self.nutrition_route = route;
        self
    }

    /// New snapshot with a different lab panel
    #[must_use]
    pub fn with_labs(mut self, labs: LabPanel) -> Self {
        self.labs = labs;
        self
    }
}
