// ABOUTME: Pre-feeding refeeding syndrome risk stratification from baseline data
// ABOUTME: Significant triggers short-circuit; otherwise moderate criteria are counted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{LabReferenceConfig, RefeedingConfig};
use clinutri_core::models::{Electrolyte, LabPanel, ThiamineUnit};
use clinutri_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Comorbid conditions that raise refeeding risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskCondition {
    /// Alcohol use disorder
    AlcoholUseDisorder,
    /// Anorexia nervosa
    AnorexiaNervosa,
    /// Malabsorptive syndromes (short bowel, inflammatory bowel disease)
    Malabsorption,
    /// Active cancer
    Cancer,
    /// Uncontrolled diabetes mellitus
    UncontrolledDiabetes,
    /// Prior bariatric surgery
    BariatricSurgery,
}

/// Baseline data for risk stratification
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefeedingRiskInput {
    /// Body mass index
    pub bmi: Option<f64>,
    /// Weight loss over the last month (%)
    pub weight_loss_percent_1_month: Option<f64>,
    /// Weight loss over the last 3 months (%)
    pub weight_loss_percent_3_months: Option<f64>,
    /// Weight loss over the last 6 months (%)
    pub weight_loss_percent_6_months: Option<f64>,
    /// Recent intake as percent of estimated needs
    pub intake_percent_of_needs: Option<f64>,
    /// Consecutive days at that intake
    pub low_intake_days: u32,
    /// Baseline laboratory values
    pub labs: LabPanel,
    /// Comorbid risk conditions
    pub conditions: Vec<RiskCondition>,
}

/// Refeeding risk level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Fewer than two moderate criteria
    Low,
    /// Two or more moderate criteria
    Moderate,
    /// At least one significant criterion
    Significant,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("Low Risk"),
            Self::Moderate => f.write_str("Moderate Risk"),
            Self::Significant => f.write_str("Significant Risk"),
        }
    }
}

/// A criterion that fired
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", tag = "factor", content = "detail")]
pub enum RiskFactor {
    /// BMI below 16
    VeryLowBmi,
    /// Weight loss above 7.5 % over 3 months
    WeightLoss3Months,
    /// Weight loss above 10 % over 6 months
    WeightLoss6Months,
    /// Baseline electrolyte below normal
    LowBaselineElectrolyte(Electrolyte),
    /// Negligible intake for 7 days or more
    ProlongedNegligibleIntake,
    /// BMI 16 to 18.5
    LowBmi,
    /// Weight loss of 5 % or more over 1 month
    WeightLoss1Month,
    /// Negligible intake for 5 days or more
    NegligibleIntake,
    /// Comorbid risk condition
    Comorbidity(RiskCondition),
}

impl RiskFactor {
    /// Level this criterion contributes to
    #[must_use]
    pub const fn level(self) -> RiskLevel {
        match self {
            Self::VeryLowBmi
            | Self::WeightLoss3Months
            | Self::WeightLoss6Months
            | Self::LowBaselineElectrolyte(_)
            | Self::ProlongedNegligibleIntake => RiskLevel::Significant,
            Self::LowBmi | Self::WeightLoss1Month | Self::NegligibleIntake | Self::Comorbidity(_) => {
                RiskLevel::Moderate
            }
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VeryLowBmi => f.write_str("BMI < 16"),
            Self::WeightLoss3Months => f.write_str("Weight loss > 7.5 % in 3 months"),
            Self::WeightLoss6Months => f.write_str("Weight loss > 10 % in 6 months"),
            Self::LowBaselineElectrolyte(e) => write!(f, "Low baseline {e}"),
            Self::ProlongedNegligibleIntake => f.write_str("Negligible intake for ≥ 7 days"),
            Self::LowBmi => f.write_str("BMI 16-18.5"),
            Self::WeightLoss1Month => f.write_str("Weight loss ≥ 5 % in 1 month"),
            Self::NegligibleIntake => f.write_str("Negligible intake for ≥ 5 days"),
            Self::Comorbidity(condition) => write!(f, "Comorbidity: {condition:?}"),
        }
    }
}

/// Risk stratification outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefeedingRiskAssessment {
    /// Risk level
    pub level: RiskLevel,
    /// Criteria that fired
    pub triggered_factors: Vec<RiskFactor>,
    /// Number of moderate criteria met
    pub moderate_criteria_met: usize,
}

fn validated(value: Option<f64>, field: &str) -> AppResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(AppError::invalid_input(format!("{field} must be non-negative")).with_field(field))
        }
        other => Ok(other),
    }
}

fn significant_factors(
    input: &RefeedingRiskInput,
    negligible_intake: bool,
    labs: &LabReferenceConfig,
    config: &RefeedingConfig,
) -> Vec<RiskFactor> {
    let mut factors = Vec::new();
    if input.bmi.is_some_and(|bmi| bmi < config.significant_bmi) {
        factors.push(RiskFactor::VeryLowBmi);
    }
    if input
        .weight_loss_percent_3_months
        .is_some_and(|loss| loss > config.significant_loss_3_months_percent)
    {
        factors.push(RiskFactor::WeightLoss3Months);
    }
    if input
        .weight_loss_percent_6_months
        .is_some_and(|loss| loss > config.significant_loss_6_months_percent)
    {
        factors.push(RiskFactor::WeightLoss6Months);
    }
    for electrolyte in Electrolyte::ALL {
        let cutoff = labs.low_cutoff(electrolyte.analyte(), ThiamineUnit::default());
        let low = input
            .labs
            .electrolyte(electrolyte)
            .zip(cutoff)
            .is_some_and(|(value, cutoff)| value < cutoff);
        if low {
            factors.push(RiskFactor::LowBaselineElectrolyte(electrolyte));
        }
    }
    if negligible_intake && input.low_intake_days >= config.significant_low_intake_days {
        factors.push(RiskFactor::ProlongedNegligibleIntake);
    }
    factors
}

fn moderate_factors(
    input: &RefeedingRiskInput,
    negligible_intake: bool,
    config: &RefeedingConfig,
) -> Vec<RiskFactor> {
    let mut factors = Vec::new();
    if input
        .bmi
        .is_some_and(|bmi| bmi >= config.significant_bmi && bmi < config.moderate_bmi)
    {
        factors.push(RiskFactor::LowBmi);
    }
    if input
        .weight_loss_percent_1_month
        .is_some_and(|loss| loss >= config.moderate_loss_1_month_percent)
    {
        factors.push(RiskFactor::WeightLoss1Month);
    }
    if negligible_intake && input.low_intake_days >= config.moderate_low_intake_days {
        factors.push(RiskFactor::NegligibleIntake);
    }
    let mut conditions = input.conditions.clone();
    conditions.sort_unstable();
    conditions.dedup();
    factors.extend(conditions.into_iter().map(RiskFactor::Comorbidity));
    factors
}

/// Stratify refeeding risk from baseline data
///
/// Any significant criterion yields `Significant`. Otherwise each moderate
/// criterion is counted and the configured number of them yields `Moderate`.
/// Comorbidities are counted together as one criterion.
///
/// # Errors
///
/// Returns `InvalidInput` when a weight-loss or intake percentage is negative or non-finite
pub fn evaluate_refeeding_risk(
    input: &RefeedingRiskInput,
    labs: &LabReferenceConfig,
    config: &RefeedingConfig,
) -> AppResult<RefeedingRiskAssessment> {
    validated(input.weight_loss_percent_1_month, "weight_loss_percent_1_month")?;
    validated(input.weight_loss_percent_3_months, "weight_loss_percent_3_months")?;
    validated(input.weight_loss_percent_6_months, "weight_loss_percent_6_months")?;
    let intake = validated(input.intake_percent_of_needs, "intake_percent_of_needs")?;
    let negligible_intake = intake.is_some_and(|p| p <= config.negligible_intake_percent);

    let significant = significant_factors(input, negligible_intake, labs, config);
    if !significant.is_empty() {
        debug!(?significant, "Significant refeeding risk");
        return Ok(RefeedingRiskAssessment {
            level: RiskLevel::Significant,
            triggered_factors: significant,
            moderate_criteria_met: 0,
        });
    }

    let moderate = moderate_factors(input, negligible_intake, config);
    let comorbidity_present = moderate
        .iter()
        .any(|f| matches!(f, RiskFactor::Comorbidity(_)));
    let criteria_met = moderate
        .iter()
        .filter(|f| !matches!(f, RiskFactor::Comorbidity(_)))
        .count()
        + usize::from(comorbidity_present);

    let level = if criteria_met >= config.moderate_criteria_required {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };
    debug!(?level, criteria_met, "Refeeding risk stratified");

    Ok(RefeedingRiskAssessment {
        level,
        triggered_factors: moderate,
        moderate_criteria_met: criteria_met,
    })
}
