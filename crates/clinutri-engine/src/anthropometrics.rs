// ABOUTME: Derived anthropometrics: BMI, Hamwi ideal body weight, and adjusted body weight
// ABOUTME: Missing or non-positive inputs yield None rather than errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Derived Anthropometrics
//!
//! # Scientific References
//!
//! - Hamwi, G.J. (1964). Therapy: changing dietary concepts. In *Diabetes Mellitus:
//!   Diagnosis and Treatment*, 73-78.
//! - Krenitsky, J. (2005). Adjusted body weight, pro: evidence to support the use of
//!   adjusted body weight in calculating calorie requirements. *Nutr Clin Pract*, 20(4), 468-473.

use clinutri_core::constants::anthropometry::{
    ABW_EXCESS_FRACTION, ABW_TRIGGER_RATIO, IBW_BASE_FEMALE_KG, IBW_BASE_HEIGHT_INCHES,
    IBW_BASE_MALE_KG, IBW_KG_PER_INCH,
};
use clinutri_core::constants::units::{CM_PER_INCH, CM_PER_METER};
use clinutri_core::models::{PatientSnapshot, Sex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// BMI, IBW and ABW derived from one snapshot
///
/// Each field is `None` when inputs are insufficient; dependents treat that
/// as "insufficient data".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedAnthropometrics {
    /// Body mass index (kg/m²)
    pub bmi: Option<f64>,
    /// Ideal body weight (kg)
    pub ibw_kg: Option<f64>,
    /// Adjusted body weight (kg); equals actual weight unless weight > 120 % IBW
    pub abw_kg: Option<f64>,
}

impl DerivedAnthropometrics {
    /// Whether all three values could be derived
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.bmi.is_some() && self.ibw_kg.is_some() && self.abw_kg.is_some()
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Body mass index from weight (kg) and height (cm)
#[must_use]
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    let weight = positive(Some(weight_kg))?;
    let height_m = positive(Some(height_cm))? / CM_PER_METER;
    Some(weight / (height_m * height_m))
}

/// Hamwi ideal body weight
///
/// 50 kg (male) or 45.5 kg (female) plus 2.3 kg per inch above 60 inches.
/// At or below 60 inches the base constant is returned unchanged.
#[must_use]
pub fn ideal_body_weight(height_cm: f64, sex: Sex) -> Option<f64> {
    let height_in = positive(Some(height_cm))? / CM_PER_INCH;
    let base = match sex {
        Sex::Male => IBW_BASE_MALE_KG,
        Sex::Female => IBW_BASE_FEMALE_KG,
    };
    if height_in <= IBW_BASE_HEIGHT_INCHES {
        return Some(base);
    }
    Some((height_in - IBW_BASE_HEIGHT_INCHES).mul_add(IBW_KG_PER_INCH, base))
}

/// Adjusted body weight
///
/// `IBW + 0.4 × (weight − IBW)` when weight exceeds 120 % of IBW, otherwise
/// the actual weight.
#[must_use]
pub fn adjusted_body_weight(weight_kg: f64, ibw_kg: f64) -> Option<f64> {
    let weight = positive(Some(weight_kg))?;
    let ibw = positive(Some(ibw_kg))?;
    if weight > ABW_TRIGGER_RATIO * ibw {
        Some((weight - ibw).mul_add(ABW_EXCESS_FRACTION, ibw))
    } else {
        Some(weight)
    }
}

/// Derive all three values from raw inputs
///
/// Returns all-`None` when weight or height is missing, non-finite or non-positive.
#[must_use]
pub fn derive(weight_kg: Option<f64>, height_cm: Option<f64>, sex: Sex) -> DerivedAnthropometrics {
    let (Some(weight), Some(height)) = (positive(weight_kg), positive(height_cm)) else {
        return DerivedAnthropometrics::default();
    };

    let bmi = bmi(weight, height);
    let ibw_kg = ideal_body_weight(height, sex);
    let abw_kg = ibw_kg.and_then(|ibw| adjusted_body_weight(weight, ibw));

    debug!(?bmi, ?ibw_kg, ?abw_kg, "Derived anthropometrics");

    DerivedAnthropometrics {
        bmi,
        ibw_kg,
        abw_kg,
    }
}

/// Derive anthropometrics for a snapshot
///
/// The snapshot path also requires a recorded age so that every dependent
/// calculator sees the same "insufficient data" state.
#[must_use]
pub fn derive_for(snapshot: &PatientSnapshot) -> DerivedAnthropometrics {
    if snapshot.age_years.is_none() {
        return DerivedAnthropometrics::default();
    }
    derive(snapshot.weight_kg, snapshot.height_cm, snapshot.sex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ibw_at_base_height_is_constant() {
        // 152.4 cm is exactly 60 inches
        assert!((ideal_body_weight(152.4, Sex::Male).unwrap() - 50.0).abs() < 1e-9);
        assert!((ideal_body_weight(140.0, Sex::Female).unwrap() - 45.5).abs() < 1e-9);
    }

    #[test]
    fn test_abw_only_applies_above_trigger() {
        // IBW 70 → trigger 84
        assert!((adjusted_body_weight(84.0, 70.0).unwrap() - 84.0).abs() < 1e-9);
        assert!((adjusted_body_weight(100.0, 70.0).unwrap() - 82.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_inputs_yield_none() {
        let derived = derive(Some(0.0), Some(170.0), Sex::Male);
        assert_eq!(derived, DerivedAnthropometrics::default());
        let derived = derive(Some(70.0), Some(f64::NAN), Sex::Male);
        assert!(derived.bmi.is_none());
    }
}
