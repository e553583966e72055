// ABOUTME: Engine configuration for clinical thresholds, factors, and reference ranges
// ABOUTME: Orchestrates domain-specific configs and provides env overrides and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `energy` - Mifflin coefficients, activity, hospital, and stress factors
//! - `protein` - guideline g/kg targets
//! - `labs` - reference cutoffs and trend thresholds
//! - `refeeding` - risk stratification and diagnosis thresholds
//! - `feeding` - adequacy bands and feeding-intolerance cutoffs
//!
//! Calculators always receive their config section explicitly so they stay
//! pure functions of their arguments. Front ends build one with
//! [`EngineConfig::load`] and pass it down.

pub mod energy;
pub mod error;
pub mod feeding;
pub mod labs;
pub mod protein;
pub mod refeeding;

pub use energy::{
    ActivityFactorsConfig, BmrConfig, ClinicalFactorsConfig, EnergyConfig, HospitalActivityConfig,
};
pub use error::ConfigError;
pub use feeding::{AdequacyConfig, FiScoreConfig};
pub use labs::{LabReferenceConfig, ThiamineCutoffs, TrendConfig};
pub use protein::ProteinConfig;
pub use refeeding::RefeedingConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Main engine configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Energy expenditure formulas and factors
    pub energy: EnergyConfig,
    /// Protein targets
    pub protein: ProteinConfig,
    /// Laboratory reference cutoffs
    pub lab_reference: LabReferenceConfig,
    /// Visit-to-visit trend thresholds
    pub trends: TrendConfig,
    /// Refeeding syndrome thresholds
    pub refeeding: RefeedingConfig,
    /// Adequacy band edges
    pub adequacy: AdequacyConfig,
    /// Feeding intolerance score cutoffs
    pub fi_score: FiScoreConfig,
}

impl EngineConfig {
    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error when factors are out of range or thresholds are misordered
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_energy()?;
        self.validate_protein()?;
        self.validate_labs()?;
        self.validate_refeeding()?;
        self.validate_feeding()
    }

    fn validate_energy(&self) -> Result<(), ConfigError> {
        let bmr = &self.energy.bmr;
        if bmr.msj_weight_coef <= 0.0 || bmr.msj_height_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR weight and height coefficients must be positive",
            ));
        }

        let activity = &self.energy.activity_factors;
        if activity.sedentary < 1.0 || activity.very_intense > 2.5 {
            return Err(ConfigError::ValueOutOfRange(
                "Activity factors must be between 1.0 and 2.5",
            ));
        }
        if activity.sedentary >= activity.light
            || activity.light >= activity.moderate
            || activity.moderate >= activity.intense
            || activity.intense >= activity.very_intense
        {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }

        let clinical = &self.energy.clinical_factors;
        if clinical.burns_moderate_min_bsa <= 0.0
            || clinical.burns_moderate_min_bsa > clinical.burns_major_above_bsa
            || clinical.burns_major_above_bsa > 100.0
        {
            return Err(ConfigError::InvalidRange(
                "Burns %BSA thresholds must satisfy 0 < moderate <= major <= 100",
            ));
        }
        if clinical.burns_minor >= clinical.burns_moderate
            || clinical.burns_moderate >= clinical.burns_major
        {
            return Err(ConfigError::InvalidRange(
                "Burns factors must increase with %BSA",
            ));
        }
        Ok(())
    }

    fn validate_protein(&self) -> Result<(), ConfigError> {
        let protein = &self.protein;
        if protein.default_low_g_per_kg <= 0.0 || protein.default_high_g_per_kg > 3.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Protein targets must be between 0 and 3.0 g/kg",
            ));
        }
        if protein.default_low_g_per_kg > protein.default_high_g_per_kg
            || protein.hypercatabolic_low_g_per_kg > protein.hypercatabolic_high_g_per_kg
        {
            return Err(ConfigError::InvalidRange(
                "Protein range lower bounds must not exceed upper bounds",
            ));
        }
        if protein.obesity_bmi >= protein.class_iii_obesity_bmi {
            return Err(ConfigError::InvalidRange(
                "obesity_bmi must be < class_iii_obesity_bmi",
            ));
        }
        Ok(())
    }

    fn validate_labs(&self) -> Result<(), ConfigError> {
        let reference = &self.lab_reference;
        let pairs = [
            (reference.potassium_low, reference.potassium_alert),
            (reference.phosphorus_low, reference.phosphorus_alert),
            (reference.magnesium_low, reference.magnesium_alert),
            (
                reference.thiamine_nmol_per_l.low,
                reference.thiamine_nmol_per_l.alert,
            ),
            (
                reference.thiamine_ng_per_ml.low,
                reference.thiamine_ng_per_ml.alert,
            ),
        ];
        if pairs.iter().any(|(low, alert)| *low <= 0.0 || alert < low) {
            return Err(ConfigError::InvalidRange(
                "Lab alert thresholds must be >= positive low-normal cutoffs",
            ));
        }
        let thiamine = [reference.thiamine_nmol_per_l, reference.thiamine_ng_per_ml];
        if thiamine.iter().any(|cutoffs| cutoffs.high <= cutoffs.alert) {
            return Err(ConfigError::InvalidRange(
                "Thiamine upper normal limit must exceed the alert cutoff",
            ));
        }

        let trends = &self.trends;
        if trends.alert_decline_percent > trends.critical_decline_percent {
            return Err(ConfigError::InvalidRange(
                "alert_decline_percent must be <= critical_decline_percent",
            ));
        }
        if trends.no_change_percent < 0.0
            || trends.rapid_loss_kg_per_week <= 0.0
            || trends.rapid_gain_kg_per_week <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Trend thresholds must be positive",
            ));
        }
        Ok(())
    }

    fn validate_refeeding(&self) -> Result<(), ConfigError> {
        let refeeding = &self.refeeding;
        if refeeding.significant_bmi >= refeeding.moderate_bmi {
            return Err(ConfigError::InvalidRange(
                "significant_bmi must be < moderate_bmi",
            ));
        }
        if refeeding.moderate_low_intake_days > refeeding.significant_low_intake_days {
            return Err(ConfigError::InvalidRange(
                "moderate_low_intake_days must be <= significant_low_intake_days",
            ));
        }
        if refeeding.contributing_decline_percent > refeeding.moderate_decline_percent
            || refeeding.moderate_decline_percent > refeeding.severe_decline_percent
        {
            return Err(ConfigError::InvalidRange(
                "Electrolyte decline severity thresholds must be ascending",
            ));
        }
        if refeeding.moderate_criteria_required == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "moderate_criteria_required must be at least 1",
            ));
        }
        Ok(())
    }

    fn validate_feeding(&self) -> Result<(), ConfigError> {
        let adequacy = &self.adequacy;
        if !(adequacy.deficient_below_percent <= adequacy.met_from_percent
            && adequacy.met_from_percent <= adequacy.met_to_percent
            && adequacy.met_to_percent <= adequacy.excessive_above_percent)
        {
            return Err(ConfigError::InvalidRange(
                "Adequacy band edges must be ascending",
            ));
        }

        let fi = &self.fi_score;
        if fi.grv_mild_ml <= 0.0 || fi.grv_mild_ml >= fi.grv_severe_ml {
            return Err(ConfigError::InvalidRange(
                "GRV thresholds must satisfy 0 < mild < severe",
            ));
        }
        if fi.acceptable_max_points >= fi.mild_moderate_max_points {
            return Err(ConfigError::InvalidRange(
                "FI score band limits must be ascending",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Lab reference overrides (site-specific assay ranges)
        Self::apply_env_var(
            "CLINUTRI_POTASSIUM_LOW",
            &mut self.lab_reference.potassium_low,
        )?;
        Self::apply_env_var(
            "CLINUTRI_POTASSIUM_ALERT",
            &mut self.lab_reference.potassium_alert,
        )?;
        Self::apply_env_var(
            "CLINUTRI_PHOSPHORUS_LOW",
            &mut self.lab_reference.phosphorus_low,
        )?;
        Self::apply_env_var(
            "CLINUTRI_PHOSPHORUS_ALERT",
            &mut self.lab_reference.phosphorus_alert,
        )?;
        Self::apply_env_var(
            "CLINUTRI_MAGNESIUM_LOW",
            &mut self.lab_reference.magnesium_low,
        )?;
        Self::apply_env_var(
            "CLINUTRI_MAGNESIUM_ALERT",
            &mut self.lab_reference.magnesium_alert,
        )?;

        // Trend overrides
        Self::apply_env_var(
            "CLINUTRI_TREND_NO_CHANGE_PERCENT",
            &mut self.trends.no_change_percent,
        )?;
        Self::apply_env_var(
            "CLINUTRI_TREND_RAPID_LOSS_KG_WEEK",
            &mut self.trends.rapid_loss_kg_per_week,
        )?;
        Self::apply_env_var(
            "CLINUTRI_TREND_RAPID_GAIN_KG_WEEK",
            &mut self.trends.rapid_gain_kg_per_week,
        )?;

        // Refeeding overrides
        Self::apply_env_var(
            "CLINUTRI_REFEEDING_TEMPORALITY_DAYS",
            &mut self.refeeding.temporality_window_days,
        )?;

        // Feeding overrides
        Self::apply_env_var(
            "CLINUTRI_GRV_SEVERE_ML",
            &mut self.fi_score.grv_severe_ml,
        )?;
        Self::apply_env_var("CLINUTRI_GRV_MILD_ML", &mut self.fi_score.grv_mild_ml)?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_misordered_activity_factors_rejected() {
        let mut config = EngineConfig::default();
        config.energy.activity_factors.light = 1.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_alert_below_low_cutoff_rejected() {
        let mut config = EngineConfig::default();
        config.lab_reference.potassium_alert = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_grv_thresholds_must_ascend() {
        let mut config = EngineConfig::default();
        config.fi_score.grv_mild_ml = 600.0;
        assert!(config.validate().is_err());
    }
}
