// ABOUTME: Laboratory reference ranges and trend-comparison thresholds
// ABOUTME: Low-normal cutoffs, near-cutoff alert margins, and percent-change significance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Laboratory Reference Configuration
//!
//! Reference: da Silva, J.S.V., et al. (2020). ASPEN consensus recommendations
//! for refeeding syndrome. *Nutr Clin Pract*, 35(2), 178-195. DOI: 10.1002/ncp.10474

use clinutri_core::models::{Analyte, ThiamineStatus, ThiamineUnit};
use serde::{Deserialize, Serialize};

/// Low-normal cutoffs and alert margins for refeeding-relevant analytes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabReferenceConfig {
    /// Potassium low-normal cutoff (mEq/L): 3.5
    pub potassium_low: f64,
    /// Potassium near-cutoff alert threshold (mEq/L): 3.7
    pub potassium_alert: f64,
    /// Phosphorus low-normal cutoff (mg/dL): 2.5
    pub phosphorus_low: f64,
    /// Phosphorus near-cutoff alert threshold (mg/dL): 2.8
    pub phosphorus_alert: f64,
    /// Magnesium low-normal cutoff (mg/dL): 1.7
    pub magnesium_low: f64,
    /// Magnesium near-cutoff alert threshold (mg/dL): 1.9
    pub magnesium_alert: f64,
    /// Thiamine cutoffs when reported in nmol/L
    pub thiamine_nmol_per_l: ThiamineCutoffs,
    /// Thiamine cutoffs when reported in ng/mL
    pub thiamine_ng_per_ml: ThiamineCutoffs,
}

/// Unit-specific thiamine interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThiamineCutoffs {
    /// Values below this are deficient
    pub low: f64,
    /// Upper end of the normal interval
    pub high: f64,
    /// Values below this (but not below `low`) raise an alert
    pub alert: f64,
}

impl ThiamineCutoffs {
    /// Status of a value reported in this interval's unit
    #[must_use]
    pub fn classify(&self, value: f64) -> ThiamineStatus {
        if value < self.low {
            ThiamineStatus::Low
        } else if value > self.high {
            ThiamineStatus::High
        } else {
            ThiamineStatus::Normal
        }
    }
}

impl Default for LabReferenceConfig {
    fn default() -> Self {
        Self {
            potassium_low: 3.5,
            potassium_alert: 3.7,
            phosphorus_low: 2.5,
            phosphorus_alert: 2.8,
            magnesium_low: 1.7,
            magnesium_alert: 1.9,
            thiamine_nmol_per_l: ThiamineCutoffs {
                low: 70.0,
                high: 180.0,
                alert: 80.0,
            },
            thiamine_ng_per_ml: ThiamineCutoffs {
                low: 21.0,
                high: 54.0,
                alert: 24.0,
            },
        }
    }
}

impl LabReferenceConfig {
    /// Thiamine interval for a reporting unit
    #[must_use]
    pub const fn thiamine(&self, unit: ThiamineUnit) -> ThiamineCutoffs {
        match unit {
            ThiamineUnit::NmolPerL => self.thiamine_nmol_per_l,
            ThiamineUnit::NgPerMl => self.thiamine_ng_per_ml,
        }
    }

    /// Low-normal cutoff for a refeeding-relevant analyte
    #[must_use]
    pub const fn low_cutoff(&self, analyte: Analyte, unit: ThiamineUnit) -> Option<f64> {
        match analyte {
            Analyte::Potassium => Some(self.potassium_low),
            Analyte::Phosphorus => Some(self.phosphorus_low),
            Analyte::Magnesium => Some(self.magnesium_low),
            Analyte::Thiamine => Some(self.thiamine(unit).low),
            _ => None,
        }
    }

    /// Near-cutoff alert threshold for a refeeding-relevant analyte
    #[must_use]
    pub const fn alert_cutoff(&self, analyte: Analyte, unit: ThiamineUnit) -> Option<f64> {
        match analyte {
            Analyte::Potassium => Some(self.potassium_alert),
            Analyte::Phosphorus => Some(self.phosphorus_alert),
            Analyte::Magnesium => Some(self.magnesium_alert),
            Analyte::Thiamine => Some(self.thiamine(unit).alert),
            _ => None,
        }
    }
}

/// Percent-change and weight-velocity thresholds for visit-to-visit comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// |change| below this is "no change" (%): 5
    pub no_change_percent: f64,
    /// Decline at or above this raises an alert (%): 5
    pub alert_decline_percent: f64,
    /// Decline at or above this is critical (%): 10
    pub critical_decline_percent: f64,
    /// Default significant change (%): 5
    pub significant_change_percent: f64,
    /// Significant change for K/P/Mg (%): 10
    pub electrolyte_significant_change_percent: f64,
    /// Loss faster than this is rapid (kg/week): 2
    pub rapid_loss_kg_per_week: f64,
    /// Gain faster than this is rapid (kg/week): 3
    pub rapid_gain_kg_per_week: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            no_change_percent: 5.0,
            alert_decline_percent: 5.0,
            critical_decline_percent: 10.0,
            significant_change_percent: 5.0,
            electrolyte_significant_change_percent: 10.0,
            rapid_loss_kg_per_week: 2.0,
            rapid_gain_kg_per_week: 3.0,
        }
    }
}
