// ABOUTME: GLIM malnutrition diagnosis from phenotypic and etiologic criteria
// ABOUTME: Requires one criterion of each kind; stage 2 for severe phenotypic findings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! GLIM Criteria
//!
//! Reference: Cederholm, T., et al. (2019). GLIM criteria for the diagnosis of malnutrition.
//! *Clinical Nutrition*, 38(1), 1-9. <https://doi.org/10.1016/j.clnu.2018.08.002>

use super::{Instrument, RiskScore};
use clinutri_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ELDERLY_AGE: u32 = 70;

/// Clinician-assessed muscle mass
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MuscleMassStatus {
    /// Not reduced, or not assessed
    #[default]
    Normal,
    /// Mild to moderate deficit
    Reduced,
    /// Severe deficit
    SeverelyReduced,
}

/// GLIM inputs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlimInput {
    /// Age (years)
    pub age_years: Option<u32>,
    /// Body mass index
    pub bmi: Option<f64>,
    /// Weight loss within the past 6 months (%)
    pub weight_loss_percent_within_6_months: Option<f64>,
    /// Weight loss beyond 6 months (%)
    pub weight_loss_percent_beyond_6_months: Option<f64>,
    /// Clinician-assessed muscle mass
    pub muscle_mass: MuscleMassStatus,
    /// Calf circumference screen was positive
    pub calf_screen_positive: bool,
    /// Reduced food intake or assimilation
    pub reduced_intake_or_assimilation: bool,
    /// Inflammation or disease burden
    pub inflammation: bool,
}

/// Phenotypic criterion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GlimPhenotypic {
    /// Non-volitional weight loss
    WeightLoss,
    /// Low BMI for age
    LowBmi,
    /// Reduced muscle mass
    ReducedMuscleMass,
}

/// Etiologic criterion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GlimEtiologic {
    /// Reduced food intake or assimilation
    ReducedIntake,
    /// Inflammation or disease burden
    Inflammation,
}

/// GLIM diagnosis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GlimDiagnosis {
    /// Criteria for malnutrition not met
    NoMalnutrition,
    /// Stage 1, moderate malnutrition
    Stage1Moderate,
    /// Stage 2, severe malnutrition
    Stage2Severe,
}

impl GlimDiagnosis {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoMalnutrition => "no malnutrition",
            Self::Stage1Moderate => "moderate malnutrition (stage 1)",
            Self::Stage2Severe => "severe malnutrition (stage 2)",
        }
    }
}

/// GLIM result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlimResult {
    /// Phenotypic criteria met
    pub phenotypic: Vec<GlimPhenotypic>,
    /// Etiologic criteria met
    pub etiologic: Vec<GlimEtiologic>,
    /// Diagnosis
    pub diagnosis: GlimDiagnosis,
    /// Findings that drove the diagnosis
    pub contributing_factors: Vec<String>,
}

impl RiskScore for GlimResult {
    fn instrument(&self) -> Instrument {
        Instrument::Glim
    }

    fn score(&self) -> Option<u8> {
        None
    }

    fn band_label(&self) -> &'static str {
        self.diagnosis.label()
    }

    fn is_positive(&self) -> bool {
        self.diagnosis != GlimDiagnosis::NoMalnutrition
    }

    fn contributing_factors(&self) -> &[String] {
        &self.contributing_factors
    }
}

fn validate_percent(value: Option<f64>, field: &str) -> AppResult<f64> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::invalid_input(format!(
            "{field} must be a non-negative percentage"
        ))
        .with_field(field)),
        Some(v) => Ok(v),
        None => Ok(0.0),
    }
}

/// BMI thresholds (moderate, severe) for an age
const fn bmi_thresholds(age_years: u32) -> (f64, f64) {
    if age_years >= ELDERLY_AGE {
        (22.0, 20.0)
    } else {
        (20.0, 18.5)
    }
}

/// Apply the GLIM criteria
///
/// The BMI criterion needs both age and BMI; when either is missing it is
/// not evaluated and the omission is listed in the contributing factors.
///
/// # Errors
///
/// Returns `InvalidInput` when a weight-loss percentage is negative or non-finite
pub fn assess_glim(input: &GlimInput) -> AppResult<GlimResult> {
    let loss_recent = validate_percent(
        input.weight_loss_percent_within_6_months,
        "weight_loss_percent_within_6_months",
    )?;
    let loss_remote = validate_percent(
        input.weight_loss_percent_beyond_6_months,
        "weight_loss_percent_beyond_6_months",
    )?;

    let mut phenotypic = Vec::new();
    let mut factors = Vec::new();
    let mut severe = false;

    if loss_recent > 5.0 || loss_remote > 10.0 {
        phenotypic.push(GlimPhenotypic::WeightLoss);
        factors.push("Weight loss > 5 % within 6 months or > 10 % beyond 6 months".to_owned());
        severe |= loss_recent > 10.0 || loss_remote > 20.0;
    }

    match (input.age_years, input.bmi.filter(|b| b.is_finite() && *b > 0.0)) {
        (Some(age), Some(bmi)) => {
            let (moderate, severe_bmi) = bmi_thresholds(age);
            if bmi < moderate {
                phenotypic.push(GlimPhenotypic::LowBmi);
                factors.push(format!("BMI {bmi:.1} < {moderate} for age"));
                severe |= bmi < severe_bmi;
            }
        }
        _ => factors.push("BMI criterion not evaluated (age or BMI missing)".to_owned()),
    }

    if input.muscle_mass != MuscleMassStatus::Normal || input.calf_screen_positive {
        phenotypic.push(GlimPhenotypic::ReducedMuscleMass);
        factors.push("Reduced muscle mass".to_owned());
        severe |= input.muscle_mass == MuscleMassStatus::SeverelyReduced;
    }

    let mut etiologic = Vec::new();
    if input.reduced_intake_or_assimilation {
        etiologic.push(GlimEtiologic::ReducedIntake);
        factors.push("Reduced food intake or assimilation".to_owned());
    }
    if input.inflammation {
        etiologic.push(GlimEtiologic::Inflammation);
        factors.push("Inflammation or disease burden".to_owned());
    }

    let diagnosis = match (phenotypic.is_empty() || etiologic.is_empty(), severe) {
        (true, _) => GlimDiagnosis::NoMalnutrition,
        (false, true) => GlimDiagnosis::Stage2Severe,
        (false, false) => GlimDiagnosis::Stage1Moderate,
    };
    debug!(?phenotypic, ?etiologic, ?diagnosis, "GLIM criteria applied");

    Ok(GlimResult {
        phenotypic,
        etiologic,
        diagnosis,
        contributing_factors: factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elderly_bmi_thresholds() {
        let (moderate, severe) = bmi_thresholds(75);
        assert!((moderate - 22.0).abs() < f64::EPSILON);
        assert!((severe - 20.0).abs() < f64::EPSILON);
        let (moderate, severe) = bmi_thresholds(40);
        assert!((moderate - 20.0).abs() < f64::EPSILON);
        assert!((severe - 18.5).abs() < f64::EPSILON);
    }
}
