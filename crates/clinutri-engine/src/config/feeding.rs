// ABOUTME: Feeding adequacy bands and feeding-intolerance score cutoffs
// ABOUTME: Percent-of-goal band edges and gastric residual volume thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Percent-of-goal band edges for adequacy evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdequacyConfig {
    /// Below this is deficient (%): 80
    pub deficient_below_percent: f64,
    /// Goal met from this value, inclusive (%): 90
    pub met_from_percent: f64,
    /// Goal met up to this value, inclusive (%): 110
    pub met_to_percent: f64,
    /// Above this is excessive (%): 120
    pub excessive_above_percent: f64,
}

impl Default for AdequacyConfig {
    fn default() -> Self {
        Self {
            deficient_below_percent: 80.0,
            met_from_percent: 90.0,
            met_to_percent: 110.0,
            excessive_above_percent: 120.0,
        }
    }
}

/// Feeding intolerance score thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiScoreConfig {
    /// GRV at or above this forces severe vomiting (mL): 500
    pub grv_severe_ml: f64,
    /// GRV at or above this forces mild vomiting (mL): 250
    pub grv_mild_ml: f64,
    /// Highest total still read as acceptable tolerance: 2
    pub acceptable_max_points: u8,
    /// Highest total still read as mild-moderate intolerance: 4
    pub mild_moderate_max_points: u8,
}

impl Default for FiScoreConfig {
    fn default() -> Self {
        Self {
            grv_severe_ml: 500.0,
            grv_mild_ml: 250.0,
            acceptable_max_points: 2,
            mild_moderate_max_points: 4,
        }
    }
}
