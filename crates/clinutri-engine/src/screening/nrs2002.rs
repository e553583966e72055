// ABOUTME: NRS-2002 nutritional risk screening with initial and final screens
// ABOUTME: Nutritional status, disease severity, and age adjustment scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! NRS-2002
//!
//! Reference: Kondrup, J., et al. (2003). Nutritional risk screening (NRS 2002): a new method
//! based on an analysis of controlled clinical trials. *Clinical Nutrition*, 22(3), 321-336.
//! <https://doi.org/10.1016/S0261-5614(02)00214-5>

use super::{Instrument, RiskScore};
use clinutri_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

const INITIAL_SCREEN_BMI: f64 = 20.5;
const LOW_BMI: f64 = 18.5;
const ELDERLY_AGE: u32 = 70;
const AT_RISK_SCORE: u8 = 3;

/// Period over which more than 5 % of body weight was lost
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecentWeightLoss {
    /// Lost within 3 months (1 point)
    WithinThreeMonths,
    /// Lost within 2 months (2 points)
    WithinTwoMonths,
    /// Lost within 1 month (3 points)
    WithinOneMonth,
}

impl RecentWeightLoss {
    const fn points(self) -> u8 {
        match self {
            Self::WithinThreeMonths => 1,
            Self::WithinTwoMonths => 2,
            Self::WithinOneMonth => 3,
        }
    }
}

/// Clinician-graded severity of disease (stress metabolism)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseSeverity {
    /// Normal nutritional requirements
    #[default]
    Absent,
    /// Hip fracture, chronic patients with acute complications
    Mild,
    /// Major abdominal surgery, stroke, severe pneumonia
    Moderate,
    /// Head injury, bone marrow transplant, ICU (APACHE > 10)
    Severe,
}

impl DiseaseSeverity {
    /// Points for this grade
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
        }
    }
}

/// NRS-2002 inputs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nrs2002Input {
    /// Body mass index
    pub bmi: Option<f64>,
    /// Age (years)
    pub age_years: Option<u32>,
    /// Initial screen: weight lost within the last 3 months
    pub weight_loss_last_3_months: bool,
    /// Initial screen: reduced intake in the last week
    pub reduced_intake_last_week: bool,
    /// Initial screen: severely ill
    pub severely_ill: bool,
    /// Final screen: > 5 % weight loss and its period
    pub weight_loss_over_5_percent: Option<RecentWeightLoss>,
    /// Final screen: impaired general condition
    pub general_condition_impaired: bool,
    /// Final screen: intake in the preceding week as percent of requirement
    pub intake_percent_of_needs: Option<f64>,
    /// Final screen: severity of disease
    pub disease_severity: DiseaseSeverity,
}

/// NRS-2002 outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Nrs2002Classification {
    /// Initial screen negative; repeat weekly
    NoRiskRescreenWeekly,
    /// Final score below 3; repeat weekly
    NotAtRisk,
    /// Final score of 3 or more; start a nutrition care plan
    AtRisk,
}

impl Nrs2002Classification {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoRiskRescreenWeekly => "no risk - rescreen weekly",
            Self::NotAtRisk => "not at nutritional risk - rescreen weekly",
            Self::AtRisk => "at nutritional risk",
        }
    }
}

/// NRS-2002 result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nrs2002Result {
    /// Whether any initial screening question was answered yes
    pub initial_screen_positive: bool,
    /// Nutritional status sub-score (0-3), final screen only
    pub nutritional_status_score: Option<u8>,
    /// Disease severity sub-score (0-3), final screen only
    pub disease_severity_score: Option<u8>,
    /// Age adjustment (0-1), final screen only
    pub age_adjustment: Option<u8>,
    /// Total score (0-7), final screen only
    pub total_score: Option<u8>,
    /// Outcome
    pub classification: Nrs2002Classification,
    /// Findings that contributed
    pub contributing_factors: Vec<String>,
}

impl RiskScore for Nrs2002Result {
    fn instrument(&self) -> Instrument {
        Instrument::Nrs2002
    }

    fn score(&self) -> Option<u8> {
        self.total_score
    }

    fn band_label(&self) -> &'static str {
        self.classification.label()
    }

    fn is_positive(&self) -> bool {
        self.classification == Nrs2002Classification::AtRisk
    }

    fn contributing_factors(&self) -> &[String] {
        &self.contributing_factors
    }
}

fn intake_points(percent: f64) -> u8 {
    if percent <= 25.0 {
        3
    } else if percent <= 50.0 {
        2
    } else if percent <= 75.0 {
        1
    } else {
        0
    }
}

fn nutritional_status(input: &Nrs2002Input, factors: &mut Vec<String>) -> u8 {
    let weight = input
        .weight_loss_over_5_percent
        .map_or(0, RecentWeightLoss::points);
    if weight > 0 {
        factors.push(format!("Weight loss > 5 % ({weight} pt)"));
    }

    let bmi = match input.bmi {
        Some(bmi) if input.general_condition_impaired && bmi < LOW_BMI => 3,
        Some(bmi) if input.general_condition_impaired && bmi < INITIAL_SCREEN_BMI => 2,
        _ => 0,
    };
    if bmi > 0 {
        factors.push(format!("Low BMI with impaired general condition ({bmi} pt)"));
    }

    let intake = input.intake_percent_of_needs.map_or(0, intake_points);
    if intake > 0 {
        factors.push(format!("Reduced intake in the preceding week ({intake} pt)"));
    }

    weight.max(bmi).max(intake)
}

/// Screen a patient with NRS-2002
///
/// # Errors
///
/// Returns `InvalidInput` when BMI or intake is non-finite or negative
pub fn screen_nrs2002(input: &Nrs2002Input) -> AppResult<Nrs2002Result> {
    if input.bmi.is_some_and(|bmi| !bmi.is_finite() || bmi <= 0.0) {
        return Err(AppError::invalid_input("BMI must be positive").with_field("bmi"));
    }
    if input
        .intake_percent_of_needs
        .is_some_and(|p| !p.is_finite() || p < 0.0)
    {
        return Err(
            AppError::invalid_input("Intake percentage must be non-negative")
                .with_field("intake_percent_of_needs"),
        );
    }

    let mut factors = Vec::new();
    let low_bmi = input.bmi.is_some_and(|bmi| bmi < INITIAL_SCREEN_BMI);
    let initial = [
        (low_bmi, "BMI < 20.5"),
        (input.weight_loss_last_3_months, "Weight loss in the last 3 months"),
        (input.reduced_intake_last_week, "Reduced intake in the last week"),
        (input.severely_ill, "Severely ill"),
    ];
    factors.extend(
        initial
            .iter()
            .filter(|(answered_yes, _)| *answered_yes)
            .map(|(_, label)| (*label).to_owned()),
    );

    if factors.is_empty() {
        return Ok(Nrs2002Result {
            initial_screen_positive: false,
            nutritional_status_score: None,
            disease_severity_score: None,
            age_adjustment: None,
            total_score: None,
            classification: Nrs2002Classification::NoRiskRescreenWeekly,
            contributing_factors: factors,
        });
    }

    let status = nutritional_status(input, &mut factors);
    let severity = input.disease_severity.points();
    if severity > 0 {
        factors.push(format!("Disease severity ({severity} pt)"));
    }
    let age = u8::from(input.age_years.is_some_and(|age| age >= ELDERLY_AGE));
    if age > 0 {
        factors.push("Age ≥ 70 (1 pt)".to_owned());
    }
    let total = status + severity + age;
    let classification = if total >= AT_RISK_SCORE {
        Nrs2002Classification::AtRisk
    } else {
        Nrs2002Classification::NotAtRisk
    };
    debug!(status, severity, age, total, ?classification, "NRS-2002 scored");

    Ok(Nrs2002Result {
        initial_screen_positive: true,
        nutritional_status_score: Some(status),
        disease_severity_score: Some(severity),
        age_adjustment: Some(age),
        total_score: Some(total),
        classification,
        contributing_factors: factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intake_bands() {
        assert_eq!(intake_points(10.0), 3);
        assert_eq!(intake_points(25.0), 3);
        assert_eq!(intake_points(40.0), 2);
        assert_eq!(intake_points(75.0), 1);
        assert_eq!(intake_points(90.0), 0);
    }
}
