// ABOUTME: Calf circumference screen for reduced muscle mass with BMI adjustment
// ABOUTME: Sex-specific cutoffs applied to the BMI-adjusted circumference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calf Circumference
//!
//! Reference: Gonzalez, M.C., et al. (2021). Calf circumference: cutoff values from the
//! NHANES 1999-2006. *American Journal of Clinical Nutrition*, 113(6), 1679-1687.
//! <https://doi.org/10.1093/ajcn/nqab029>

use super::{Instrument, RiskScore};
use clinutri_core::models::Sex;
use clinutri_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MALE_CUTOFF_CM: f64 = 34.0;
const FEMALE_CUTOFF_CM: f64 = 33.0;

/// Calf circumference inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalfCircumferenceInput {
    /// Measured circumference (cm)
    pub circumference_cm: f64,
    /// Sex
    pub sex: Sex,
    /// Body mass index, used for the adiposity adjustment
    #[serde(default)]
    pub bmi: Option<f64>,
}

/// Calf circumference result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalfCircumferenceResult {
    /// Measured circumference (cm)
    pub measured_cm: f64,
    /// Subtracted BMI adjustment (cm)
    pub adjustment_cm: f64,
    /// Adjusted circumference (cm)
    pub adjusted_cm: f64,
    /// Sex-specific cutoff (cm)
    pub cutoff_cm: f64,
    /// Reduced muscle mass suspected
    pub reduced_muscle_mass: bool,
    /// Findings that drove the result
    pub contributing_factors: Vec<String>,
}

impl RiskScore for CalfCircumferenceResult {
    fn instrument(&self) -> Instrument {
        Instrument::CalfCircumference
    }

    fn score(&self) -> Option<u8> {
        None
    }

    fn band_label(&self) -> &'static str {
        if self.reduced_muscle_mass {
            "reduced muscle mass suspected"
        } else {
            "adequate muscle mass"
        }
    }

    fn is_positive(&self) -> bool {
        self.reduced_muscle_mass
    }

    fn contributing_factors(&self) -> &[String] {
        &self.contributing_factors
    }
}

fn bmi_adjustment(bmi: Option<f64>) -> f64 {
    match bmi {
        Some(bmi) if bmi >= 40.0 => 12.0,
        Some(bmi) if bmi >= 30.0 => 7.0,
        Some(bmi) if bmi >= 25.0 => 3.0,
        _ => 0.0,
    }
}

/// Screen muscle mass by calf circumference
///
/// # Errors
///
/// Returns `InvalidInput` when the circumference is not positive
pub fn assess_calf_circumference(
    input: &CalfCircumferenceInput,
) -> AppResult<CalfCircumferenceResult> {
    let measured = input.circumference_cm;
    if !measured.is_finite() || measured <= 0.0 {
        return Err(
            AppError::invalid_input("Calf circumference must be positive")
                .with_field("circumference_cm"),
        );
    }

    let adjustment = bmi_adjustment(input.bmi.filter(|b| b.is_finite()));
    let adjusted = measured - adjustment;
    let cutoff = match input.sex {
        Sex::Male => MALE_CUTOFF_CM,
        Sex::Female => FEMALE_CUTOFF_CM,
    };
    let reduced = adjusted < cutoff;

    let mut contributing_factors = Vec::new();
    if adjustment > 0.0 {
        contributing_factors.push(format!("BMI adjustment of -{adjustment:.0} cm applied"));
    }
    if reduced {
        contributing_factors.push(format!(
            "Adjusted circumference {adjusted:.1} cm below {cutoff:.0} cm"
        ));
    }
    debug!(measured, adjusted, cutoff, reduced, "Calf circumference screened");

    Ok(CalfCircumferenceResult {
        measured_cm: measured,
        adjustment_cm: adjustment,
        adjusted_cm: adjusted,
        cutoff_cm: cutoff,
        reduced_muscle_mass: reduced,
        contributing_factors,
    })
}
