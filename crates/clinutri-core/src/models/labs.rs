// ABOUTME: Laboratory panel model with the analytes tracked across assessments
// ABOUTME: Analyte and Electrolyte enums, thiamine results with unit-aware status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every analyte the engine compares between visits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Analyte {
    /// Serum potassium (mEq/L)
    Potassium,
    /// Serum phosphorus (mg/dL)
    Phosphorus,
    /// Serum magnesium (mg/dL)
    Magnesium,
    /// Serum sodium (mEq/L)
    Sodium,
    /// Blood glucose (mg/dL)
    Glucose,
    /// Serum creatinine (mg/dL)
    Creatinine,
    /// Blood urea nitrogen (mg/dL)
    Bun,
    /// Aspartate aminotransferase (U/L)
    Ast,
    /// Alanine aminotransferase (U/L)
    Alt,
    /// Alkaline phosphatase (U/L)
    AlkalinePhosphatase,
    /// Triglycerides (mg/dL)
    Triglycerides,
    /// C-reactive protein (mg/L)
    Crp,
    /// Thiamine (unit carried by the result)
    Thiamine,
}

impl Analyte {
    /// All analytes in display order
    pub const ALL: [Self; 13] = [
        Self::Potassium,
        Self::Phosphorus,
        Self::Magnesium,
        Self::Sodium,
        Self::Glucose,
        Self::Creatinine,
        Self::Bun,
        Self::Ast,
        Self::Alt,
        Self::AlkalinePhosphatase,
        Self::Triglycerides,
        Self::Crp,
        Self::Thiamine,
    ];

    /// Fixed reporting unit; thiamine returns `None` because its unit travels with the value
    #[must_use]
    pub const fn fixed_unit(self) -> Option<&'static str> {
        match self {
            Self::Potassium | Self::Sodium => Some("mEq/L"),
            Self::Phosphorus
            | Self::Magnesium
            | Self::Glucose
            | Self::Creatinine
            | Self::Bun
            | Self::Triglycerides => Some("mg/dL"),
            Self::Ast | Self::Alt | Self::AlkalinePhosphatase => Some("U/L"),
            Self::Crp => Some("mg/L"),
            Self::Thiamine => None,
        }
    }

    /// Whether this analyte is watched for refeeding syndrome
    #[must_use]
    pub const fn is_refeeding_relevant(self) -> bool {
        matches!(
            self,
            Self::Potassium | Self::Phosphorus | Self::Magnesium | Self::Thiamine
        )
    }

    /// The electrolyte counterpart, if this analyte is one of K/P/Mg
    #[must_use]
    pub const fn as_electrolyte(self) -> Option<Electrolyte> {
        match self {
            Self::Potassium => Some(Electrolyte::Potassium),
            Self::Phosphorus => Some(Electrolyte::Phosphorus),
            Self::Magnesium => Some(Electrolyte::Magnesium),
            _ => None,
        }
    }
}

impl fmt::Display for Analyte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Potassium => "potassium",
            Self::Phosphorus => "phosphorus",
            Self::Magnesium => "magnesium",
            Self::Sodium => "sodium",
            Self::Glucose => "glucose",
            Self::Creatinine => "creatinine",
            Self::Bun => "BUN",
            Self::Ast => "AST",
            Self::Alt => "ALT",
            Self::AlkalinePhosphatase => "alkaline phosphatase",
            Self::Triglycerides => "triglycerides",
            Self::Crp => "CRP",
            Self::Thiamine => "thiamine",
        };
        f.write_str(name)
    }
}

/// The three refeeding-critical electrolytes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Electrolyte {
    /// Potassium
    Potassium,
    /// Phosphorus
    Phosphorus,
    /// Magnesium
    Magnesium,
}

impl Electrolyte {
    /// All electrolytes in display order
    pub const ALL: [Self; 3] = [Self::Potassium, Self::Phosphorus, Self::Magnesium];

    /// The general analyte for this electrolyte
    #[must_use]
    pub const fn analyte(self) -> Analyte {
        match self {
            Self::Potassium => Analyte::Potassium,
            Self::Phosphorus => Analyte::Phosphorus,
            Self::Magnesium => Analyte::Magnesium,
        }
    }
}

impl fmt::Display for Electrolyte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.analyte().fmt(f)
    }
}

/// Reporting unit for thiamine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThiamineUnit {
    /// Nanomoles per liter (whole-blood TDP)
    #[default]
    NmolPerL,
    /// Nanograms per milliliter
    NgPerMl,
}

impl fmt::Display for ThiamineUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NmolPerL => f.write_str("nmol/L"),
            Self::NgPerMl => f.write_str("ng/mL"),
        }
    }
}

/// Qualitative thiamine status recorded by the laboratory or clinician
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThiamineStatus {
    /// Below the reference interval
    Low,
    /// Within the reference interval
    Normal,
    /// Above the reference interval
    High,
}

/// A thiamine measurement together with its unit and any recorded status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThiamineResult {
    /// Numeric value, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Unit of `value`
    #[serde(default)]
    pub unit: ThiamineUnit,
    /// Status flag recorded alongside the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ThiamineStatus>,
}

impl ThiamineResult {
    /// A numeric result without a status flag
    #[must_use]
    pub const fn measured(value: f64, unit: ThiamineUnit) -> Self {
        Self {
            value: Some(value),
            unit,
            status: None,
        }
    }

    /// A status-only result (no numeric value)
    #[must_use]
    pub const fn flagged(status: ThiamineStatus, unit: ThiamineUnit) -> Self {
        Self {
            value: None,
            unit,
            status: Some(status),
        }
    }

    /// Re-express the result in a different unit.
    ///
    /// A unit change discards the recorded status: the status was judged against
    /// the previous unit's cutoffs and must not be carried over to the new one.
    #[must_use]
    pub const fn with_unit(self, unit: ThiamineUnit) -> Self {
        if matches!(
            (self.unit, unit),
            (ThiamineUnit::NmolPerL, ThiamineUnit::NmolPerL)
                | (ThiamineUnit::NgPerMl, ThiamineUnit::NgPerMl)
        ) {
            return self;
        }
        Self {
            value: self.value,
            unit,
            status: None,
        }
    }
}

/// Laboratory values drawn for one assessment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabPanel {
    /// Potassium (mEq/L)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
    /// Phosphorus (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
    /// Magnesium (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnesium: Option<f64>,
    /// Sodium (mEq/L)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    /// Glucose (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glucose: Option<f64>,
    /// Creatinine (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creatinine: Option<f64>,
    /// Blood urea nitrogen (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bun: Option<f64>,
    /// AST (U/L)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast: Option<f64>,
    /// ALT (U/L)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
    /// Alkaline phosphatase (U/L)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alkaline_phosphatase: Option<f64>,
    /// Triglycerides (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triglycerides: Option<f64>,
    /// CRP (mg/L)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crp: Option<f64>,
    /// Thiamine result with unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thiamine: Option<ThiamineResult>,
}

impl LabPanel {
    /// Numeric value for an analyte (thiamine in its own unit)
    #[must_use]
    pub fn value(&self, analyte: Analyte) -> Option<f64> {
        match analyte {
            Analyte::Potassium => self.potassium,
            Analyte::Phosphorus => self.phosphorus,
            Analyte::Magnesium => self.magnesium,
            Analyte::Sodium => self.sodium,
            Analyte::Glucose => self.glucose,
            Analyte::Creatinine => self.creatinine,
            Analyte::Bun => self.bun,
            Analyte::Ast => self.ast,
            Analyte::Alt => self.alt,
            Analyte::AlkalinePhosphatase => self.alkaline_phosphatase,
            Analyte::Triglycerides => self.triglycerides,
            Analyte::Crp => self.crp,
            Analyte::Thiamine => self.thiamine.and_then(|t| t.value),
        }
    }

    /// Value for one of the refeeding electrolytes
    #[must_use]
    pub fn electrolyte(&self, electrolyte: Electrolyte) -> Option<f64> {
        self.value(electrolyte.analyte())
    }

    /// Set an analyte value, returning the updated panel
    #[must_use]
    pub fn with_value(mut self, analyte: Analyte, value: f64) -> Self {
        let slot = match analyte {
            Analyte::Potassium => &mut self.potassium,
            Analyte::Phosphorus => &mut self.phosphorus,
            Analyte::Magnesium => &mut self.magnesium,
            Analyte::Sodium => &mut self.sodium,
            Analyte::Glucose => &mut self.glucose,
            Analyte::Creatinine => &mut self.creatinine,
            Analyte::Bun => &mut self.bun,
            Analyte::Ast => &mut self.ast,
            Analyte::Alt => &mut self.alt,
            Analyte::AlkalinePhosphatase => &mut self.alkaline_phosphatase,
            Analyte::Triglycerides => &mut self.triglycerides,
            Analyte::Crp => &mut self.crp,
            Analyte::Thiamine => {
                let unit = self.thiamine.map(|t| t.unit).unwrap_or_default();
                self.thiamine = Some(ThiamineResult::measured(value, unit));
                return self;
            }
        };
        *slot = Some(value);
        self
    }

    /// Whether no analyte carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Analyte::ALL.iter().all(|a| self.value(*a).is_none())
            && self.thiamine.and_then(|t| t.status).is_none()
    }
}
