// ABOUTME: Energy expenditure configuration for predictive equations and stress factors
// ABOUTME: Mifflin-St Jeor coefficients, activity, hospital, and clinical condition factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy Expenditure Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Stress factors: Long, C.L., et al. (1979). Metabolic response to injury and illness.
//!   *JPEN*, 3(6), 452-456. DOI: 10.1177/014860717900300609

use serde::{Deserialize, Serialize};

/// Energy calculator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Mifflin-St Jeor coefficients
    pub bmr: BmrConfig,
    /// General (outpatient) activity factors
    pub activity_factors: ActivityFactorsConfig,
    /// In-hospital mobility factors
    pub hospital_activity: HospitalActivityConfig,
    /// Condition-specific stress factors
    pub clinical_factors: ClinicalFactorsConfig,
}

/// BMR (Basal Metabolic Rate) coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers applied when no clinical modifier is active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light activity: 1.375
    pub light: f64,
    /// Moderate activity: 1.55
    pub moderate: f64,
    /// Intense activity: 1.725
    pub intense: f64,
    /// Very intense activity: 1.9
    pub very_intense: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            intense: 1.725,
            very_intense: 1.9,
        }
    }
}

/// Hospital mobility factors (multiplied with the clinical factor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalActivityConfig {
    /// Confined to bed: 1.2
    pub bed_rest: f64,
    /// Ambulatory on the ward: 1.3
    pub ambulatory: f64,
}

impl Default for HospitalActivityConfig {
    fn default() -> Self {
        Self {
            bed_rest: 1.2,
            ambulatory: 1.3,
        }
    }
}

/// Condition-specific stress factors for the Mifflin clinical path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalFactorsConfig {
    /// Minor surgery: 1.10
    pub surgery_minor: f64,
    /// Major elective surgery: 1.20
    pub surgery_major_elective: f64,
    /// Major complicated surgery: 1.35
    pub surgery_major_complicated: f64,
    /// Mild infection: 1.15
    pub infection_mild: f64,
    /// Moderate infection: 1.30
    pub infection_moderate: f64,
    /// Severe infection / sepsis: 1.45
    pub infection_severe: f64,
    /// Mild skeletal trauma: 1.15
    pub trauma_skeletal_mild: f64,
    /// Head injury: 1.45
    pub trauma_head_injury: f64,
    /// Polytrauma: 1.35
    pub trauma_polytrauma: f64,
    /// Cancer: 1.27
    pub cancer: f64,
    /// Burns up to the moderate threshold (%BSA > 0): 1.30
    pub burns_minor: f64,
    /// Burns from the moderate threshold up to the major threshold: 1.65
    pub burns_moderate: f64,
    /// Burns above the major threshold: 1.90
    pub burns_major: f64,
    /// %BSA at which the moderate burns factor starts (inclusive): 20
    pub burns_moderate_min_bsa: f64,
    /// %BSA above which the major burns factor applies (exclusive): 40
    pub burns_major_above_bsa: f64,
}

impl Default for ClinicalFactorsConfig {
    fn default() -> Self {
        Self {
            surgery_minor: 1.10,
            surgery_major_elective: 1.20,
            surgery_major_complicated: 1.35,
            infection_mild: 1.15,
            infection_moderate: 1.30,
            infection_severe: 1.45,
            trauma_skeletal_mild: 1.15,
            trauma_head_injury: 1.45,
            trauma_polytrauma: 1.35,
            cancer: 1.27,
            burns_minor: 1.30,
            burns_moderate: 1.65,
            burns_major: 1.90,
            burns_moderate_min_bsa: 20.0,
            burns_major_above_bsa: 40.0,
        }
    }
}
