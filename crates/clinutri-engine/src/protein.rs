// ABOUTME: Protein requirement calculator with guideline-driven weight-basis selection
// ABOUTME: Ordered rules for obesity, hypercatabolism, acute phase, and general critical care
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Protein Requirement Calculator
//!
//! The weight basis and g/kg target come from the first matching rule in
//! [`RULE_ORDER`]. Targets are structured values; the legacy text forms
//! ("1.2 - 2.5 g/kg", "~91 g/day (progressive)") are produced by `Display`.
//!
//! # Scientific References
//!
//! - Singer, P., et al. (2019). ESPEN guideline on clinical nutrition in the intensive care unit.
//!   *Clinical Nutrition*, 38(1), 48-79. <https://doi.org/10.1016/j.clnu.2018.08.037>
//!
//! - McClave, S.A., et al. (2016). Guidelines for the provision and assessment of nutrition
//!   support therapy in the adult critically ill patient. *JPEN*, 40(2), 159-211.
//!   <https://doi.org/10.1177/0148607115621863>

use crate::anthropometrics::DerivedAnthropometrics;
use crate::config::ProteinConfig;
use clinutri_core::models::DiseasePhase;
use clinutri_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Textual qualifier attached to a target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    /// Plain value or range
    #[default]
    None,
    /// Approximate ("~")
    Approximate,
    /// Approximate, reached progressively over several days
    Progressive,
    /// Upper limit ("up to")
    UpTo,
}

/// Target in g/kg/day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProteinTarget {
    /// Lower bound, or the point value
    pub low_g_per_kg: f64,
    /// Upper bound for ranges
    pub high_g_per_kg: Option<f64>,
    /// Qualifier for point values
    pub qualifier: Qualifier,
}

impl ProteinTarget {
    const fn range(low: f64, high: f64) -> Self {
        Self {
            low_g_per_kg: low,
            high_g_per_kg: Some(high),
            qualifier: Qualifier::None,
        }
    }

    const fn point(value: f64, qualifier: Qualifier) -> Self {
        Self {
            low_g_per_kg: value,
            high_g_per_kg: None,
            qualifier,
        }
    }

    fn total(&self, base_weight_kg: f64) -> ProteinTotal {
        ProteinTotal {
            low_g: (self.low_g_per_kg * base_weight_kg).round(),
            high_g: self.high_g_per_kg.map(|high| (high * base_weight_kg).round()),
            qualifier: self.qualifier,
        }
    }
}

/// Daily total in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProteinTotal {
    /// Lower bound, or the point value (g/day)
    pub low_g: f64,
    /// Upper bound for ranges (g/day)
    pub high_g: Option<f64>,
    /// Qualifier carried over from the target
    pub qualifier: Qualifier,
}

fn write_qualified(
    f: &mut fmt::Formatter<'_>,
    low: &dyn fmt::Display,
    high: Option<&dyn fmt::Display>,
    qualifier: Qualifier,
    unit: &str,
) -> fmt::Result {
    if let Some(high) = high {
        return write!(f, "{low} - {high} {unit}");
    }
    match qualifier {
        Qualifier::None => write!(f, "{low} {unit}"),
        Qualifier::Approximate => write!(f, "~{low} {unit}"),
        Qualifier::Progressive => write!(f, "~{low} {unit} (progressive)"),
        Qualifier::UpTo => write!(f, "up to {low} {unit}"),
    }
}

impl fmt::Display for ProteinTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let high = self.high_g_per_kg;
        write_qualified(
            f,
            &self.low_g_per_kg,
            high.as_ref().map(|h| h as &dyn fmt::Display),
            self.qualifier,
            "g/kg",
        )
    }
}

impl fmt::Display for ProteinTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let high = self.high_g;
        write_qualified(
            f,
            &self.low_g,
            high.as_ref().map(|h| h as &dyn fmt::Display),
            self.qualifier,
            "g/day",
        )
    }
}

/// Body weight the target is multiplied by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeightBasis {
    /// Actual body weight
    Actual,
    /// Ideal body weight
    Ideal,
    /// Adjusted body weight
    Adjusted,
}

impl WeightBasis {
    /// Short clinical label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Actual => "actual weight",
            Self::Ideal => "IBW",
            Self::Adjusted => "ABW",
        }
    }
}

/// Guideline a target comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceGuideline {
    /// ESPEN ICU guideline (2019)
    Espen2019,
    /// ASPEN/SCCM critical care guideline (2016)
    AspenSccm2016,
}

impl fmt::Display for SourceGuideline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Espen2019 => f.write_str("ESPEN 2019"),
            Self::AspenSccm2016 => f.write_str("ASPEN/SCCM 2016"),
        }
    }
}

/// Clinical inputs for weight-basis selection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProteinInput {
    /// Actual body weight (kg)
    pub weight_kg: Option<f64>,
    /// BMI, IBW and ABW
    pub anthropometrics: DerivedAnthropometrics,
    /// Burn injury present
    pub burns: bool,
    /// Polytrauma present
    pub polytrauma: bool,
    /// Disease phase
    pub disease_phase: DiseasePhase,
}

/// Selection rules, evaluated top to bottom
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProteinRule {
    /// BMI ≥ 30
    Obesity,
    /// Burns or polytrauma
    Hypercatabolic,
    /// Early or late acute phase
    AcutePhase,
    /// General critical care
    Default,
}

/// Rule evaluation order; the first match wins
pub const RULE_ORDER: [ProteinRule; 4] = [
    ProteinRule::Obesity,
    ProteinRule::Hypercatabolic,
    ProteinRule::AcutePhase,
    ProteinRule::Default,
];

impl ProteinRule {
    fn matches(self, input: &ProteinInput, config: &ProteinConfig) -> bool {
        match self {
            Self::Obesity => input
                .anthropometrics
                .bmi
                .is_some_and(|bmi| bmi >= config.obesity_bmi),
            Self::Hypercatabolic => input.burns || input.polytrauma,
            Self::AcutePhase => input.disease_phase.is_acute(),
            Self::Default => true,
        }
    }

    /// First rule matching the input
    #[must_use]
    pub fn select(input: &ProteinInput, config: &ProteinConfig) -> Self {
        RULE_ORDER
            .into_iter()
            .find(|rule| rule.matches(input, config))
            .unwrap_or(Self::Default)
    }
}

/// Secondary recommendation reported alongside the primary one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlternateProtein {
    /// Target (g/kg/day)
    pub target: ProteinTarget,
    /// Base weight (kg)
    pub base_weight_kg: f64,
    /// Which weight the base is
    pub weight_basis: WeightBasis,
    /// Guideline
    pub source_guideline: SourceGuideline,
    /// Daily total
    pub total: ProteinTotal,
}

/// Protein recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinResult {
    /// Rule that selected the target
    pub rule: ProteinRule,
    /// Target (g/kg/day)
    pub target: ProteinTarget,
    /// Base weight multiplied by the target (kg)
    pub base_weight_kg: f64,
    /// Which weight the base is
    pub weight_basis: WeightBasis,
    /// Guideline
    pub source_guideline: SourceGuideline,
    /// Daily total
    pub total: ProteinTotal,
    /// Secondary recommendation (obesity only)
    pub alternate: Option<AlternateProtein>,
    /// Clinical considerations
    pub considerations: Vec<String>,
}

fn positive_weight(value: Option<f64>, basis: WeightBasis) -> AppResult<f64> {
    value
        .filter(|w| w.is_finite() && *w > 0.0)
        .ok_or_else(|| {
            AppError::invalid_input(format!(
                "Base weight ({}) must be positive to compute protein needs",
                basis.label()
            ))
            .with_field("base_weight_kg")
        })
}

fn obesity_alternate(
    input: &ProteinInput,
    bmi: f64,
    config: &ProteinConfig,
) -> Option<AlternateProtein> {
    let ibw = positive_weight(input.anthropometrics.ibw_kg, WeightBasis::Ideal).ok()?;
    let target = if bmi < config.class_iii_obesity_bmi {
        ProteinTarget::point(config.obese_aspen_g_per_kg, Qualifier::None)
    } else {
        ProteinTarget::point(config.obese_aspen_class_iii_g_per_kg, Qualifier::UpTo)
    };
    Some(AlternateProtein {
        target,
        base_weight_kg: ibw,
        weight_basis: WeightBasis::Ideal,
        source_guideline: SourceGuideline::AspenSccm2016,
        total: target.total(ibw),
    })
}

fn obesity_result(input: &ProteinInput, config: &ProteinConfig) -> AppResult<ProteinResult> {
    let mut considerations = vec!["Obesity (BMI ≥ 30): protein based on reduced body weight".to_owned()];
    let (base, basis) = if let Some(abw) = input.anthropometrics.abw_kg {
        (positive_weight(Some(abw), WeightBasis::Adjusted)?, WeightBasis::Adjusted)
    } else {
        considerations.push("Adjusted body weight unavailable, ideal body weight used".to_owned());
        (
            positive_weight(input.anthropometrics.ibw_kg, WeightBasis::Ideal)?,
            WeightBasis::Ideal,
        )
    };
    let bmi = input.anthropometrics.bmi.unwrap_or(config.obesity_bmi);
    let alternate = obesity_alternate(input, bmi, config);
    if alternate.is_some() {
        considerations.push("ASPEN/SCCM alternative computed on ideal body weight".to_owned());
    }
    let target = ProteinTarget::point(config.obese_espen_g_per_kg, Qualifier::None);

    Ok(ProteinResult {
        rule: ProteinRule::Obesity,
        target,
        base_weight_kg: base,
        weight_basis: basis,
        source_guideline: SourceGuideline::Espen2019,
        total: target.total(base),
        alternate,
        considerations,
    })
}

fn actual_weight_result(
    rule: ProteinRule,
    input: &ProteinInput,
    config: &ProteinConfig,
) -> AppResult<ProteinResult> {
    let base = positive_weight(input.weight_kg, WeightBasis::Actual)?;
    let (target, source, consideration) = match rule {
        ProteinRule::Hypercatabolic => (
            ProteinTarget::range(
                config.hypercatabolic_low_g_per_kg,
                config.hypercatabolic_high_g_per_kg,
            ),
            SourceGuideline::AspenSccm2016,
            "Hypercatabolic state (burns or polytrauma): higher protein needs",
        ),
        ProteinRule::AcutePhase => (
            ProteinTarget::point(config.acute_phase_g_per_kg, Qualifier::Progressive),
            SourceGuideline::Espen2019,
            "Acute phase: advance protein progressively toward target",
        ),
        ProteinRule::Obesity | ProteinRule::Default => (
            ProteinTarget::range(config.default_low_g_per_kg, config.default_high_g_per_kg),
            SourceGuideline::AspenSccm2016,
            "General critical care range; adjust for renal and hepatic function",
        ),
    };

    Ok(ProteinResult {
        rule,
        target,
        base_weight_kg: base,
        weight_basis: WeightBasis::Actual,
        source_guideline: source,
        total: target.total(base),
        alternate: None,
        considerations: vec![consideration.to_owned()],
    })
}

/// Calculate the protein recommendation
///
/// # Errors
///
/// Returns `InvalidInput` when the selected base weight is missing or not positive
pub fn calculate_protein(input: &ProteinInput, config: &ProteinConfig) -> AppResult<ProteinResult> {
    let rule = ProteinRule::select(input, config);
    let result = match rule {
        ProteinRule::Obesity => obesity_result(input, config),
        other => actual_weight_result(other, input, config),
    }?;
    debug!(?rule, target = %result.target, total = %result.total, "Protein target selected");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(ProteinTarget::range(1.2, 2.5).to_string(), "1.2 - 2.5 g/kg");
        assert_eq!(
            ProteinTarget::point(1.3, Qualifier::Progressive).to_string(),
            "~1.3 g/kg (progressive)"
        );
        assert_eq!(
            ProteinTarget::point(2.5, Qualifier::UpTo).total(70.0).to_string(),
            "up to 175 g/day"
        );
        assert_eq!(ProteinTarget::range(1.2, 2.5).total(70.0).to_string(), "84 - 175 g/day");
    }

    #[test]
    fn test_rule_order_is_first_match() {
        let config = ProteinConfig::default();
        let input = ProteinInput {
            weight_kg: Some(120.0),
            anthropometrics: DerivedAnthropometrics {
                bmi: Some(35.0),
                ibw_kg: Some(70.0),
                abw_kg: Some(90.0),
            },
            burns: true,
            polytrauma: false,
            disease_phase: DiseasePhase::EarlyAcute,
        };
        assert_eq!(ProteinRule::select(&input, &config), ProteinRule::Obesity);
    }
}
