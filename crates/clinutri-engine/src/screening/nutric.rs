// ABOUTME: NUTRIC and modified NUTRIC (without IL-6) critical-care nutrition risk scores
// ABOUTME: Age, APACHE II, SOFA, comorbidities, pre-ICU hospital days, and optional IL-6
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! NUTRIC Score
//!
//! # Scientific References
//!
//! - Heyland, D.K., et al. (2011). Identifying critically ill patients who benefit the most
//!   from nutrition therapy: the development and initial validation of a novel risk
//!   assessment tool. *Critical Care*, 15(6), R268. <https://doi.org/10.1186/cc10546>
//!
//! - Rahman, A., et al. (2016). Identifying critically-ill patients who will benefit most from
//!   nutritional therapy: Further validation of the "modified NUTRIC" nutritional risk
//!   assessment tool. *Clinical Nutrition*, 35(1), 158-162.
//!   <https://doi.org/10.1016/j.clnu.2015.01.015>

use super::{Instrument, RiskScore};
use clinutri_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Score variant, determined by whether IL-6 was measured
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NutricVariant {
    /// Full NUTRIC with IL-6 (0-10, high risk ≥ 6)
    Nutric,
    /// Modified NUTRIC without IL-6 (0-9, high risk ≥ 5)
    Modified,
}

impl NutricVariant {
    /// Lowest high-risk score
    #[must_use]
    pub const fn high_risk_threshold(self) -> u8 {
        match self {
            Self::Nutric => 6,
            Self::Modified => 5,
        }
    }

    /// Maximum attainable score
    #[must_use]
    pub const fn max_score(self) -> u8 {
        match self {
            Self::Nutric => 10,
            Self::Modified => 9,
        }
    }
}

/// NUTRIC inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutricInput {
    /// Age (years)
    pub age_years: u32,
    /// APACHE II score
    pub apache_ii: u32,
    /// SOFA score
    pub sofa: u32,
    /// Number of comorbidities
    pub comorbidities: u32,
    /// Days from hospital admission to ICU admission
    pub days_hospital_to_icu: u32,
    /// Interleukin-6 (pg/mL); absent for the modified score
    #[serde(default)]
    pub il6_pg_ml: Option<f64>,
}

/// Per-variable points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutricSubScores {
    /// Age points (0-2)
    pub age: u8,
    /// APACHE II points (0-3)
    pub apache_ii: u8,
    /// SOFA points (0-2)
    pub sofa: u8,
    /// Comorbidity points (0-1)
    pub comorbidities: u8,
    /// Pre-ICU hospital stay points (0-1)
    pub days_hospital_to_icu: u8,
    /// IL-6 points (0-1), full variant only
    pub il6: Option<u8>,
}

impl NutricSubScores {
    fn total(&self) -> u8 {
        self.age
            + self.apache_ii
            + self.sofa
            + self.comorbidities
            + self.days_hospital_to_icu
            + self.il6.unwrap_or(0)
    }
}

/// NUTRIC risk band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NutricRisk {
    /// Low malnutrition risk
    Low,
    /// High risk; most likely to benefit from aggressive nutrition therapy
    High,
}

/// NUTRIC result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutricResult {
    /// Variant used
    pub variant: NutricVariant,
    /// Per-variable points
    pub sub_scores: NutricSubScores,
    /// Total score
    pub total_score: u8,
    /// Maximum attainable score for the variant
    pub max_score: u8,
    /// Risk band
    pub risk: NutricRisk,
    /// Variables that scored points
    pub contributing_factors: Vec<String>,
}

impl RiskScore for NutricResult {
    fn instrument(&self) -> Instrument {
        Instrument::Nutric
    }

    fn score(&self) -> Option<u8> {
        Some(self.total_score)
    }

    fn band_label(&self) -> &'static str {
        match self.risk {
            NutricRisk::Low => "low risk",
            NutricRisk::High => "high risk",
        }
    }

    fn is_positive(&self) -> bool {
        self.risk == NutricRisk::High
    }

    fn contributing_factors(&self) -> &[String] {
        &self.contributing_factors
    }
}

const fn age_points(age: u32) -> u8 {
    match age {
        0..=49 => 0,
        50..=74 => 1,
        _ => 2,
    }
}

const fn apache_points(apache: u32) -> u8 {
    match apache {
        0..=14 => 0,
        15..=19 => 1,
        20..=27 => 2,
        _ => 3,
    }
}

const fn sofa_points(sofa: u32) -> u8 {
    match sofa {
        0..=5 => 0,
        6..=9 => 1,
        _ => 2,
    }
}

/// Score NUTRIC, or modified NUTRIC when IL-6 is absent
///
/// # Errors
///
/// Returns `InvalidInput` when IL-6 is negative or non-finite
pub fn score_nutric(input: &NutricInput) -> AppResult<NutricResult> {
    let il6 = match input.il6_pg_ml {
        Some(value) if !value.is_finite() || value < 0.0 => {
            return Err(AppError::invalid_input("IL-6 must be non-negative").with_field("il6_pg_ml"));
        }
        Some(value) => Some(u8::from(value >= 400.0)),
        None => None,
    };
    let sub_scores = NutricSubScores {
        age: age_points(input.age_years),
        apache_ii: apache_points(input.apache_ii),
        sofa: sofa_points(input.sofa),
        comorbidities: u8::from(input.comorbidities >= 2),
        days_hospital_to_icu: u8::from(input.days_hospital_to_icu >= 1),
        il6,
    };
    let variant = if il6.is_some() {
        NutricVariant::Nutric
    } else {
        NutricVariant::Modified
    };

    let total_score = sub_scores.total();
    let risk = if total_score >= variant.high_risk_threshold() {
        NutricRisk::High
    } else {
        NutricRisk::Low
    };

    let contributing_factors = [
        ("Age", sub_scores.age),
        ("APACHE II", sub_scores.apache_ii),
        ("SOFA", sub_scores.sofa),
        ("Comorbidities", sub_scores.comorbidities),
        ("Days from hospital to ICU admission", sub_scores.days_hospital_to_icu),
        ("IL-6", sub_scores.il6.unwrap_or(0)),
    ]
    .into_iter()
    .filter(|(_, points)| *points > 0)
    .map(|(name, points)| format!("{name} ({points} pt)"))
    .collect();

    debug!(?variant, total_score, ?risk, "NUTRIC scored");

    Ok(NutricResult {
        variant,
        sub_scores,
        total_score,
        max_score: variant.max_score(),
        risk,
        contributing_factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(age_points(49), 0);
        assert_eq!(age_points(75), 2);
        assert_eq!(apache_points(15), 1);
        assert_eq!(apache_points(28), 3);
        assert_eq!(sofa_points(10), 2);
    }
}
