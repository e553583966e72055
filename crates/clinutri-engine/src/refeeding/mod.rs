// ABOUTME: Refeeding syndrome engine: baseline risk, diagnosis, and assessment workflow
// ABOUTME: ASPEN 2020 consensus criteria with temporality-gated diagnostic labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Refeeding Syndrome Engine
//!
//! Risk stratification uses baseline data only. Diagnosis compares current
//! potassium, phosphorus and magnesium against a reference panel, which is
//! either the stored baseline or the preceding follow-up. Declines use the
//! same rounded, inclusive convention as the trend comparator.
//!
//! # Scientific References
//!
//! - da Silva, J.S.V., et al. (2020). ASPEN consensus recommendations for
//!   refeeding syndrome. *Nutr Clin Pract*, 35(2), 178-195.
//!   DOI: 10.1002/ncp.10474
//! - National Institute for Health and Care Excellence (2006). Nutrition
//!   support for adults (CG32).

pub mod diagnosis;
pub mod risk;
pub mod workflow;

pub use diagnosis::{
    diagnose_refeeding, temporality_from_dates, DiagnosisBaseline, DiagnosisInput, DiagnosisLabel,
    DiagnosticAnalyte, ElectrolyteChange, RefeedingDiagnosis, Severity, Symptom, SymptomChecklist,
    ThiamineFinding,
};
pub use risk::{
    evaluate_refeeding_risk, RefeedingRiskAssessment, RefeedingRiskInput, RiskCondition,
    RiskFactor, RiskLevel,
};
pub use workflow::{RefeedingStage, RefeedingWorkflow};
