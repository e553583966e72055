// ABOUTME: Nutritional adequacy of delivered calories and protein against a goal
// ABOUTME: Percent-of-goal bands, mixed enteral/parenteral totals, and goal lookup from history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutritional Adequacy Evaluator
//!
//! Delivered intake is compared with the prescribed goal as a percentage.
//! A missing or non-positive goal is reported as [`AdequacyBand::NoGoalDefined`]
//! rather than falling into any numeric band.
//!
//! # Scientific References
//!
//! - Singer, P., et al. (2019). ESPEN guideline on clinical nutrition in the
//!   intensive care unit. *Clin Nutr*, 38(1), 48-79.
//!   DOI: 10.1016/j.clnu.2018.08.037

use crate::config::AdequacyConfig;
use crate::trends::round2;
use clinutri_core::models::{HistoryEntry, NutritionGoal};
use clinutri_core::{AppError, AppResult, ErrorDetail};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Nutrient being evaluated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    /// Energy (kcal/day)
    Calories,
    /// Protein (g/day)
    Protein,
}

impl Nutrient {
    /// Unit label
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Calories => "kcal/day",
            Self::Protein => "g/day",
        }
    }
}

/// Percent-of-goal band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AdequacyBand {
    /// No usable goal
    NoGoalDefined,
    /// Below 80 %
    Deficient,
    /// 80 % to below 90 %
    SlightlyLow,
    /// 90 % to 110 %
    GoalMet,
    /// Above 110 % to 120 %
    SlightlyHigh,
    /// Above 120 %
    Excessive,
}

impl AdequacyBand {
    /// Band for a percent of goal
    #[must_use]
    pub fn classify(percent: f64, config: &AdequacyConfig) -> Self {
        if percent < config.deficient_below_percent {
            Self::Deficient
        } else if percent < config.met_from_percent {
            Self::SlightlyLow
        } else if percent <= config.met_to_percent {
            Self::GoalMet
        } else if percent <= config.excessive_above_percent {
            Self::SlightlyHigh
        } else {
            Self::Excessive
        }
    }

    /// Fixed description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoGoalDefined => "No nutritional goal defined",
            Self::Deficient => "Intake well below goal",
            Self::SlightlyLow => "Intake slightly below goal",
            Self::GoalMet => "Goal met",
            Self::SlightlyHigh => "Intake slightly above goal",
            Self::Excessive => "Intake well above goal; risk of overfeeding",
        }
    }

    /// Recommendation when enteral and parenteral routes are combined
    #[must_use]
    pub const fn mixed_recommendation(self) -> &'static str {
        match self {
            Self::NoGoalDefined => "Define a calorie and protein goal before adjusting support",
            Self::Deficient => {
                "Advance enteral feeding as tolerated and increase supplemental parenteral nutrition"
            }
            Self::SlightlyLow => "Advance enteral feeding; review parenteral supplementation",
            Self::GoalMet => "Maintain current combined regimen",
            Self::SlightlyHigh => "Reduce parenteral supplementation as enteral delivery improves",
            Self::Excessive => {
                "Reduce parenteral nutrition first and monitor glucose and triglycerides"
            }
        }
    }
}

impl fmt::Display for AdequacyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoGoalDefined => "no goal defined",
            Self::Deficient => "deficient",
            Self::SlightlyLow => "slightly low",
            Self::GoalMet => "goal met",
            Self::SlightlyHigh => "slightly high",
            Self::Excessive => "excessive",
        };
        f.write_str(label)
    }
}

/// Adequacy of one nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdequacyAssessment {
    /// Nutrient
    pub nutrient: Nutrient,
    /// Delivered amount
    pub actual: f64,
    /// Goal, when defined
    pub goal: Option<f64>,
    /// Actual as percent of goal, two decimals
    pub percent_of_goal: Option<f64>,
    /// Band
    pub band: AdequacyBand,
    /// Actual minus goal
    pub delta: Option<f64>,
    /// Fixed description of the band
    pub description: String,
    /// Recommendation (mixed nutrition only)
    pub recommendation: Option<String>,
    /// Why no band could be computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Delivered amounts from one route
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteIntake {
    /// Calories delivered (kcal/day)
    pub calories_kcal: f64,
    /// Protein delivered (g/day)
    pub protein_g: f64,
}

impl RouteIntake {
    /// Whether anything was delivered on this route
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.calories_kcal > 0.0 || self.protein_g > 0.0
    }
}

/// Delivered intake across routes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActualIntake {
    /// Oral or enteral delivery
    pub enteral: RouteIntake,
    /// Parenteral delivery
    pub parenteral: RouteIntake,
    /// Calories from propofol, dextrose and similar infusions
    pub non_nutritional_kcal: f64,
}

impl ActualIntake {
    /// Single-route intake
    #[must_use]
    pub const fn enteral(calories_kcal: f64, protein_g: f64) -> Self {
        Self {
            enteral: RouteIntake {
                calories_kcal,
                protein_g,
            },
            parenteral: RouteIntake {
                calories_kcal: 0.0,
                protein_g: 0.0,
            },
            non_nutritional_kcal: 0.0,
        }
    }

    /// Both enteral and parenteral routes deliver nutrition
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        self.enteral.is_active() && self.parenteral.is_active()
    }

    /// Total calories including non-nutritional sources
    #[must_use]
    pub fn total_calories_kcal(&self) -> f64 {
        self.enteral.calories_kcal + self.parenteral.calories_kcal + self.non_nutritional_kcal
    }

    /// Total protein
    #[must_use]
    pub fn total_protein_g(&self) -> f64 {
        self.enteral.protein_g + self.parenteral.protein_g
    }

    fn validate(&self) -> AppResult<()> {
        let fields = [
            ("enteral.calories_kcal", self.enteral.calories_kcal),
            ("enteral.protein_g", self.enteral.protein_g),
            ("parenteral.calories_kcal", self.parenteral.calories_kcal),
            ("parenteral.protein_g", self.parenteral.protein_g),
            ("non_nutritional_kcal", self.non_nutritional_kcal),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(
                    AppError::invalid_input(format!("{field} must be non-negative"))
                        .with_field(field),
                );
            }
        }
        Ok(())
    }
}

/// Calorie and protein adequacy together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeAdequacy {
    /// Calories
    pub calories: AdequacyAssessment,
    /// Protein
    pub protein: AdequacyAssessment,
    /// Enteral and parenteral combined
    pub mixed: bool,
}

/// Evaluate one nutrient against its goal
///
/// # Errors
///
/// Returns `InvalidInput` when `actual` is negative or non-finite
pub fn evaluate_adequacy(
    nutrient: Nutrient,
    actual: f64,
    goal: Option<f64>,
    config: &AdequacyConfig,
) -> AppResult<AdequacyAssessment> {
    if !actual.is_finite() || actual < 0.0 {
        return Err(
            AppError::invalid_input(format!("Delivered {nutrient:?} must be non-negative"))
                .with_field("actual"),
        );
    }

    let Some(goal) = goal.filter(|g| g.is_finite() && *g > 0.0) else {
        let band = AdequacyBand::NoGoalDefined;
        return Ok(AdequacyAssessment {
            nutrient,
            actual,
            goal: None,
            percent_of_goal: None,
            band,
            delta: None,
            description: band.description().to_owned(),
            recommendation: None,
            error: Some(ErrorDetail::from(
                AppError::indeterminate(format!("No {} goal defined", nutrient.unit()))
                    .with_field("goal"),
            )),
        });
    };

    let percent = round2(actual / goal * 100.0);
    let band = AdequacyBand::classify(percent, config);
    debug!(?nutrient, actual, goal, percent, %band, "Adequacy evaluated");
    Ok(AdequacyAssessment {
        nutrient,
        actual,
        goal: Some(goal),
        percent_of_goal: Some(percent),
        band,
        delta: Some(round2(actual - goal)),
        description: band.description().to_owned(),
        recommendation: None,
        error: None,
    })
}

/// Evaluate delivered calories and protein against a goal
///
/// Non-nutritional calories count toward calories only. When both routes
/// deliver nutrition each band also carries a recommendation.
///
/// # Errors
///
/// Returns `InvalidInput` when any delivered amount is negative or non-finite
pub fn evaluate_intake(
    intake: &ActualIntake,
    goal: Option<&NutritionGoal>,
    config: &AdequacyConfig,
) -> AppResult<IntakeAdequacy> {
    intake.validate()?;
    let mixed = intake.is_mixed();
    let with_recommendation = |mut assessment: AdequacyAssessment| {
        if mixed {
            assessment.recommendation = Some(assessment.band.mixed_recommendation().to_owned());
        }
        assessment
    };

    let calories = evaluate_adequacy(
        Nutrient::Calories,
        intake.total_calories_kcal(),
        goal.and_then(|g| g.calories_kcal),
        config,
    )?;
    let protein = evaluate_adequacy(
        Nutrient::Protein,
        intake.total_protein_g(),
        goal.and_then(|g| g.protein_g),
        config,
    )?;
    Ok(IntakeAdequacy {
        calories: with_recommendation(calories),
        protein: with_recommendation(protein),
        mixed,
    })
}

/// Most recent nutrition goal in a most-recent-first history
#[must_use]
pub fn latest_nutrition_goal(history: &[HistoryEntry]) -> Option<NutritionGoal> {
    history
        .iter()
        .filter_map(|entry| entry.goal)
        .find(NutritionGoal::is_set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        let config = AdequacyConfig::default();
        assert_eq!(AdequacyBand::classify(79.99, &config), AdequacyBand::Deficient);
        assert_eq!(AdequacyBand::classify(80.0, &config), AdequacyBand::SlightlyLow);
        assert_eq!(AdequacyBand::classify(90.0, &config), AdequacyBand::GoalMet);
        assert_eq!(AdequacyBand::classify(110.0, &config), AdequacyBand::GoalMet);
        assert_eq!(AdequacyBand::classify(110.01, &config), AdequacyBand::SlightlyHigh);
        assert_eq!(AdequacyBand::classify(120.0, &config), AdequacyBand::SlightlyHigh);
        assert_eq!(AdequacyBand::classify(120.01, &config), AdequacyBand::Excessive);
    }

    #[test]
    fn test_zero_goal_short_circuits() {
        let result =
            evaluate_adequacy(Nutrient::Calories, 500.0, Some(0.0), &AdequacyConfig::default())
                .unwrap();
        assert_eq!(result.band, AdequacyBand::NoGoalDefined);
        assert!(result.percent_of_goal.is_none());
        assert!(result.error.is_some());
    }
}
