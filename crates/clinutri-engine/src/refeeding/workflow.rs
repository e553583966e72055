// ABOUTME: Refeeding assessment state machine over risk, symptom review, and diagnosis
// ABOUTME: Pure value transitions; the stage is derived from what has been recorded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::diagnosis::{
    diagnose_refeeding, DiagnosisBaseline, DiagnosisInput, DiagnosisLabel, RefeedingDiagnosis,
    SymptomChecklist,
};
use super::risk::{evaluate_refeeding_risk, RefeedingRiskAssessment, RefeedingRiskInput};
use crate::config::{LabReferenceConfig, RefeedingConfig};
use clinutri_core::models::LabPanel;
use clinutri_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stage of the refeeding assessment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RefeedingStage {
    /// Nothing recorded
    NotAssessed,
    /// Baseline risk stratified
    RiskEvaluated,
    /// Symptoms under review, or findings awaiting temporality
    DiagnosticPending,
    /// Refeeding syndrome confirmed
    DiagnosisConfirmed,
    /// Electrolytes fell without meeting syndrome criteria
    DiagnosisNotConfirmed,
    /// No refeeding syndrome
    NoSyndrome,
}

/// Refeeding assessment for one patient episode
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RefeedingWorkflow {
    risk: Option<RefeedingRiskAssessment>,
    symptoms: Option<SymptomChecklist>,
    diagnosis: Option<RefeedingDiagnosis>,
}

impl RefeedingWorkflow {
    /// Fresh workflow
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage
    #[must_use]
    pub const fn stage(&self) -> RefeedingStage {
        match (&self.risk, &self.symptoms, &self.diagnosis) {
            (None, _, _) => RefeedingStage::NotAssessed,
            (Some(_), _, Some(diagnosis)) => match diagnosis.label {
                DiagnosisLabel::CriteriaPending => RefeedingStage::DiagnosticPending,
                DiagnosisLabel::RefeedingSyndrome(_) => RefeedingStage::DiagnosisConfirmed,
                DiagnosisLabel::ElectrolyteChangesWithoutSyndrome => {
                    RefeedingStage::DiagnosisNotConfirmed
                }
                DiagnosisLabel::NoRefeedingSyndrome => RefeedingStage::NoSyndrome,
            },
            (Some(_), Some(_), None) => RefeedingStage::DiagnosticPending,
            (Some(_), None, None) => RefeedingStage::RiskEvaluated,
        }
    }

    /// Recorded risk assessment
    #[must_use]
    pub const fn risk(&self) -> Option<&RefeedingRiskAssessment> {
        self.risk.as_ref()
    }

    /// Recorded diagnosis
    #[must_use]
    pub const fn diagnosis(&self) -> Option<&RefeedingDiagnosis> {
        self.diagnosis.as_ref()
    }

    /// Stratify baseline risk
    ///
    /// Always allowed; a new baseline discards any earlier review and diagnosis.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from risk stratification
    pub fn evaluate_risk(
        self,
        input: &RefeedingRiskInput,
        labs: &LabReferenceConfig,
        config: &RefeedingConfig,
    ) -> AppResult<Self> {
        let risk = evaluate_refeeding_risk(input, labs, config)?;
        debug!(level = %risk.level, "Refeeding workflow risk recorded");
        Ok(Self {
            risk: Some(risk),
            symptoms: None,
            diagnosis: None,
        })
    }

    /// Record the clinician's symptom review
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` before risk has been evaluated
    pub fn record_symptom_review(self, symptoms: SymptomChecklist) -> AppResult<Self> {
        self.require_risk()?;
        Ok(Self {
            symptoms: Some(symptoms),
            diagnosis: None,
            ..self
        })
    }

    /// Diagnose against a baseline using the recorded symptom review
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` before risk has been evaluated, and propagates
    /// validation errors from the diagnosis
    pub fn diagnose(
        self,
        baseline: DiagnosisBaseline,
        current: LabPanel,
        temporality_confirmed: Option<bool>,
        labs: &LabReferenceConfig,
        config: &RefeedingConfig,
    ) -> AppResult<Self> {
        self.require_risk()?;
        let input = DiagnosisInput {
            baseline,
            current,
            symptoms: self.symptoms.clone().unwrap_or_default(),
            temporality_confirmed,
        };
        let diagnosis = diagnose_refeeding(&input, labs, config)?;
        let next = Self {
            diagnosis: Some(diagnosis),
            ..self
        };
        debug!(stage = ?next.stage(), "Refeeding workflow diagnosed");
        Ok(next)
    }

    fn require_risk(&self) -> AppResult<()> {
        if self.risk.is_some() {
            Ok(())
        } else {
            Err(AppError::invalid_input("Refeeding risk must be evaluated first")
                .with_field("refeeding_risk"))
        }
    }
}
