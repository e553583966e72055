// ABOUTME: Feeding intolerance score over distension, nausea/vomiting, and diarrhea
// ABOUTME: Gastric residual volume can force the vomiting domain; totals map to tolerance bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feeding Intolerance (FI) Score
//!
//! Each domain scores 0, 1, 2 or 5 points. A supplied gastric residual
//! volume of 250 mL or more replaces the nausea/vomiting selection; smaller
//! volumes leave the clinician's selection untouched.
//!
//! # Scientific References
//!
//! - Reintam Blaser, A., et al. (2017). Early enteral nutrition in critically
//!   ill patients: ESICM clinical practice guidelines. *Intensive Care Med*,
//!   43(3), 380-398. DOI: 10.1007/s00134-016-4665-0

use crate::config::FiScoreConfig;
use clinutri_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

fn unknown_points(domain: &str, points: u8) -> AppError {
    AppError::invalid_input(format!("{domain} accepts 0, 1, 2 or 5 points, got {points}"))
        .with_field(domain)
}

/// Abdominal distension or pain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistensionPain {
    /// None
    #[default]
    None,
    /// Mild distension, no pain
    Mild,
    /// Moderate distension or pain
    Moderate,
    /// Severe distension or pain
    Severe,
}

impl DistensionPain {
    /// Points for this selection
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 5,
        }
    }

    /// Selection for a point value
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for anything other than 0, 1, 2 or 5
    pub fn from_points(points: u8) -> AppResult<Self> {
        match points {
            0 => Ok(Self::None),
            1 => Ok(Self::Mild),
            2 => Ok(Self::Moderate),
            5 => Ok(Self::Severe),
            other => Err(unknown_points("distension", other)),
        }
    }
}

/// Nausea or vomiting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NauseaVomiting {
    /// None
    #[default]
    None,
    /// Nausea without vomiting
    Nausea,
    /// Vomiting, mild
    MildVomiting,
    /// Vomiting, severe
    SevereVomiting,
}

impl NauseaVomiting {
    /// Points for this selection
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Nausea => 1,
            Self::MildVomiting => 2,
            Self::SevereVomiting => 5,
        }
    }

    /// Selection for a point value
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for anything other than 0, 1, 2 or 5
    pub fn from_points(points: u8) -> AppResult<Self> {
        match points {
            0 => Ok(Self::None),
            1 => Ok(Self::Nausea),
            2 => Ok(Self::MildVomiting),
            5 => Ok(Self::SevereVomiting),
            other => Err(unknown_points("vomiting", other)),
        }
    }
}

/// Diarrhea
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Diarrhea {
    /// None
    #[default]
    None,
    /// 3 to 5 loose stools per day
    Mild,
    /// More than 5 loose stools per day
    Moderate,
    /// More than 5 loose stools per day and over 1000 mL
    Severe,
}

impl Diarrhea {
    /// Points for this selection
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 5,
        }
    }

    /// Selection for a point value
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for anything other than 0, 1, 2 or 5
    pub fn from_points(points: u8) -> AppResult<Self> {
        match points {
            0 => Ok(Self::None),
            1 => Ok(Self::Mild),
            2 => Ok(Self::Moderate),
            5 => Ok(Self::Severe),
            other => Err(unknown_points("diarrhea", other)),
        }
    }
}

/// Clinician selections plus optional gastric residual volume
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FiScoreInput {
    /// Distension or pain
    pub distension_pain: DistensionPain,
    /// Manual nausea/vomiting selection
    pub nausea_vomiting: NauseaVomiting,
    /// Diarrhea
    pub diarrhea: Diarrhea,
    /// Gastric residual volume (mL)
    pub gastric_residual_ml: Option<f64>,
}

/// Tolerance band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceBand {
    /// 0 to 2 points
    Acceptable,
    /// 3 to 4 points
    MildModerateIntolerance,
    /// 5 points or more
    SevereIntolerance,
}

impl ToleranceBand {
    /// Fixed clinical recommendation
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Acceptable => "Continue enteral nutrition and advance toward goal rate",
            Self::MildModerateIntolerance => {
                "Maintain current rate, consider prokinetics, and reassess within 6 hours"
            }
            Self::SevereIntolerance => {
                "Hold or reduce enteral feeding, evaluate abdomen, and consider post-pyloric or parenteral support"
            }
        }
    }
}

impl fmt::Display for ToleranceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Acceptable => "acceptable tolerance",
            Self::MildModerateIntolerance => "mild-moderate intolerance",
            Self::SevereIntolerance => "severe intolerance",
        };
        f.write_str(label)
    }
}

/// FI score outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiScoreResult {
    /// Distension or pain points
    pub distension_pain_points: u8,
    /// Nausea/vomiting selection actually scored
    pub nausea_vomiting: NauseaVomiting,
    /// Nausea/vomiting points
    pub nausea_vomiting_points: u8,
    /// Diarrhea points
    pub diarrhea_points: u8,
    /// Residual volume replaced the manual selection
    pub residual_volume_override: bool,
    /// Sum of the three domains
    pub total: u8,
    /// Tolerance band
    pub band: ToleranceBand,
    /// Recommendation for the band
    pub recommendation: String,
}

fn effective_vomiting(
    manual: NauseaVomiting,
    gastric_residual_ml: Option<f64>,
    config: &FiScoreConfig,
) -> NauseaVomiting {
    match gastric_residual_ml {
        Some(grv) if grv >= config.grv_severe_ml => NauseaVomiting::SevereVomiting,
        Some(grv) if grv >= config.grv_mild_ml => NauseaVomiting::MildVomiting,
        _ => manual,
    }
}

/// Score feeding intolerance
///
/// # Errors
///
/// Returns `InvalidInput` when the residual volume is negative or non-finite
pub fn score_feeding_intolerance(
    input: &FiScoreInput,
    config: &FiScoreConfig,
) -> AppResult<FiScoreResult> {
    if let Some(grv) = input.gastric_residual_ml {
        if !grv.is_finite() || grv < 0.0 {
            return Err(
                AppError::invalid_input("Gastric residual volume must be non-negative")
                    .with_field("gastric_residual_ml"),
            );
        }
    }

    let vomiting = effective_vomiting(input.nausea_vomiting, input.gastric_residual_ml, config);
    let total = input.distension_pain.points() + vomiting.points() + input.diarrhea.points();
    let band = if total <= config.acceptable_max_points {
        ToleranceBand::Acceptable
    } else if total <= config.mild_moderate_max_points {
        ToleranceBand::MildModerateIntolerance
    } else {
        ToleranceBand::SevereIntolerance
    };
    let overridden = vomiting != input.nausea_vomiting;
    debug!(total, %band, overridden, "FI score computed");

    Ok(FiScoreResult {
        distension_pain_points: input.distension_pain.points(),
        nausea_vomiting: vomiting,
        nausea_vomiting_points: vomiting.points(),
        diarrhea_points: input.diarrhea.points(),
        residual_volume_override: overridden,
        total,
        band,
        recommendation: band.recommendation().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residual_volume_thresholds() {
        let config = FiScoreConfig::default();
        assert_eq!(
            effective_vomiting(NauseaVomiting::None, Some(500.0), &config),
            NauseaVomiting::SevereVomiting
        );
        assert_eq!(
            effective_vomiting(NauseaVomiting::SevereVomiting, Some(250.0), &config),
            NauseaVomiting::MildVomiting
        );
        assert_eq!(
            effective_vomiting(NauseaVomiting::Nausea, Some(249.0), &config),
            NauseaVomiting::Nausea
        );
    }

    #[test]
    fn test_points_reject_unknown_values() {
        assert!(Diarrhea::from_points(3).is_err());
        assert_eq!(Diarrhea::from_points(5).unwrap(), Diarrhea::Severe);
    }
}
