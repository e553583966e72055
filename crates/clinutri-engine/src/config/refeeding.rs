// ABOUTME: Refeeding syndrome risk and diagnosis thresholds
// ABOUTME: BMI, weight-loss, low-intake, and electrolyte-decline severity cutoffs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Refeeding Syndrome Configuration
//!
//! Reference: da Silva, J.S.V., et al. (2020). ASPEN consensus recommendations
//! for refeeding syndrome. *Nutr Clin Pract*, 35(2), 178-195. DOI: 10.1002/ncp.10474

use serde::{Deserialize, Serialize};

/// Refeeding risk stratification and diagnosis thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefeedingConfig {
    /// BMI below this is significant risk: 16
    pub significant_bmi: f64,
    /// BMI below this (and >= `significant_bmi`) is a moderate criterion: 18.5
    pub moderate_bmi: f64,
    /// Weight loss over 3 months above this is significant risk (%): 7.5
    pub significant_loss_3_months_percent: f64,
    /// Weight loss over 6 months above this is significant risk (%): 10
    pub significant_loss_6_months_percent: f64,
    /// Weight loss over 1 month at or above this is a moderate criterion (%): 5
    pub moderate_loss_1_month_percent: f64,
    /// Upper bound of "negligible intake" as percent of needs: 25
    pub negligible_intake_percent: f64,
    /// Days of negligible intake for significant risk: 7
    pub significant_low_intake_days: u32,
    /// Days of negligible intake for a moderate criterion: 5
    pub moderate_low_intake_days: u32,
    /// Moderate criteria required for moderate risk: 2
    pub moderate_criteria_required: usize,
    /// Electrolyte decline that contributes to the diagnosis (%, inclusive): 10
    pub contributing_decline_percent: f64,
    /// Decline at or above this is moderate severity (%): 20
    pub moderate_decline_percent: f64,
    /// Decline above this is severe (%): 30
    pub severe_decline_percent: f64,
    /// Days after a nutrition change within which findings satisfy temporality: 5
    pub temporality_window_days: i64,
}

impl Default for RefeedingConfig {
    fn default() -> Self {
        Self {
            significant_bmi: 16.0,
            moderate_bmi: 18.5,
            significant_loss_3_months_percent: 7.5,
            significant_loss_6_months_percent: 10.0,
            moderate_loss_1_month_percent: 5.0,
            negligible_intake_percent: 25.0,
            significant_low_intake_days: 7,
            moderate_low_intake_days: 5,
            moderate_criteria_required: 2,
            contributing_decline_percent: 10.0,
            moderate_decline_percent: 20.0,
            severe_decline_percent: 30.0,
            temporality_window_days: 5,
        }
    }
}
