// ABOUTME: Protein requirement configuration for critical-care guideline targets
// ABOUTME: ESPEN and ASPEN/SCCM g/kg values for obesity, hypercatabolism, and acute phases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Protein Requirement Configuration
//!
//! # Scientific References
//!
//! - Singer, P., et al. (2019). ESPEN guideline on clinical nutrition in the ICU.
//!   *Clinical Nutrition*, 38(1), 48-79. DOI: 10.1016/j.clnu.2018.08.037
//! - McClave, S.A., et al. (2016). ASPEN/SCCM guidelines for nutrition support therapy
//!   in the adult critically ill patient. *JPEN*, 40(2), 159-211. DOI: 10.1177/0148607115621863

use serde::{Deserialize, Serialize};

/// Protein target configuration (g/kg/day)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProteinConfig {
    /// BMI at or above which obesity rules apply: 30
    pub obesity_bmi: f64,
    /// BMI at or above which the class III ASPEN target applies: 40
    pub class_iii_obesity_bmi: f64,
    /// ESPEN obese target on adjusted weight: 1.3
    pub obese_espen_g_per_kg: f64,
    /// ASPEN/SCCM class I-II target on ideal weight: 2.0
    pub obese_aspen_g_per_kg: f64,
    /// ASPEN/SCCM class III upper target on ideal weight: 2.5
    pub obese_aspen_class_iii_g_per_kg: f64,
    /// Burns / polytrauma lower bound: 2.0
    pub hypercatabolic_low_g_per_kg: f64,
    /// Burns / polytrauma upper bound: 2.5
    pub hypercatabolic_high_g_per_kg: f64,
    /// Acute phase progressive target: 1.3
    pub acute_phase_g_per_kg: f64,
    /// General critical care lower bound: 1.2
    pub default_low_g_per_kg: f64,
    /// General critical care upper bound: 2.5
    pub default_high_g_per_kg: f64,
}

impl Default for ProteinConfig {
    fn default() -> Self {
        Self {
            obesity_bmi: 30.0,
            class_iii_obesity_bmi: 40.0,
            obese_espen_g_per_kg: 1.3,
            obese_aspen_g_per_kg: 2.0,
            obese_aspen_class_iii_g_per_kg: 2.5,
            hypercatabolic_low_g_per_kg: 2.0,
            hypercatabolic_high_g_per_kg: 2.5,
            acute_phase_g_per_kg: 1.3,
            default_low_g_per_kg: 1.2,
            default_high_g_per_kg: 2.5,
        }
    }
}
