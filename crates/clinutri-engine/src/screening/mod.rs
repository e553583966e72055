// ABOUTME: Nutrition risk screening and malnutrition diagnosis instruments
// ABOUTME: NRS-2002, (m)NUTRIC, GLIM, and calf circumference with a shared RiskScore view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Risk & Screening Calculators
//!
//! Each instrument is a pure scoring function over patient data plus a small
//! amount of clinician-entered categorical input. Results share the
//! [`RiskScore`] view so a consolidated assessment can list them uniformly.

pub mod calf;
pub mod glim;
pub mod nrs2002;
pub mod nutric;

pub use calf::{assess_calf_circumference, CalfCircumferenceInput, CalfCircumferenceResult};
pub use glim::{
    assess_glim, GlimDiagnosis, GlimEtiologic, GlimInput, GlimPhenotypic, GlimResult,
    MuscleMassStatus,
};
pub use nrs2002::{
    screen_nrs2002, DiseaseSeverity, Nrs2002Classification, Nrs2002Input, Nrs2002Result,
    RecentWeightLoss,
};
pub use nutric::{
    score_nutric, NutricInput, NutricResult, NutricRisk, NutricSubScores, NutricVariant,
};

use serde::{Deserialize, Serialize};

/// Screening instrument identifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    /// Nutritional Risk Screening 2002
    Nrs2002,
    /// NUTRIC or modified NUTRIC
    Nutric,
    /// Global Leadership Initiative on Malnutrition criteria
    Glim,
    /// Calf circumference muscle-mass screen
    CalfCircumference,
}

/// Common read-only view of a screening result
pub trait RiskScore {
    /// Instrument that produced the result
    fn instrument(&self) -> Instrument;

    /// Numeric score, when the instrument produces one
    fn score(&self) -> Option<u8>;

    /// Band or classification label
    fn band_label(&self) -> &'static str;

    /// Whether the result calls for nutrition intervention
    fn is_positive(&self) -> bool;

    /// Findings that drove the result
    fn contributing_factors(&self) -> &[String];
}

/// Flat summary of any screening result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    /// Instrument
    pub instrument: Instrument,
    /// Numeric score
    pub score: Option<u8>,
    /// Band label
    pub band: String,
    /// Positive screen
    pub positive: bool,
    /// Findings that drove the result
    pub contributing_factors: Vec<String>,
}

impl ScreeningSummary {
    /// Summarise any screening result
    pub fn of(result: &impl RiskScore) -> Self {
        Self {
            instrument: result.instrument(),
            score: result.score(),
            band: result.band_label().to_owned(),
            positive: result.is_positive(),
            contributing_factors: result.contributing_factors().to_vec(),
        }
    }
}
