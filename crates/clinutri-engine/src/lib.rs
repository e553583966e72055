// ABOUTME: Clinical nutrition calculators, screening, refeeding engine, and assessment pipeline
// ABOUTME: Pure synchronous functions over clinutri-core types with env-tunable thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Clinutri Engine
//!
//! Decision logic for clinical nutrition assessment. Every calculator is a
//! deterministic function of its inputs and a borrowed configuration; nothing
//! holds state between calls, so independent assessments can run in parallel.
//!
//! ## Modules
//!
//! - **anthropometrics**: BMI, ideal and adjusted body weight
//! - **energy**: Predictive equations, Weir capnography, and indirect calorimetry
//! - **protein**: Ordered guideline rules for protein targets
//! - **screening**: NRS-2002, (m)NUTRIC, GLIM, calf circumference
//! - **refeeding**: Risk stratification, diagnosis, and workflow stages
//! - **trends**: Lab panel and weight comparison between visits
//! - **adequacy**: Delivered intake against goals
//! - **`fi_score`**: Feeding intolerance score
//! - **assessment**: Consolidated pipeline and parallel batch assessment
//! - **config**: Thresholds with environment overrides

/// Adequacy of delivered calories and protein
pub mod adequacy;

/// BMI, IBW (Hamwi) and ABW
pub mod anthropometrics;

/// Consolidated pipeline over every calculator
pub mod assessment;

/// Engine thresholds and environment overrides
pub mod config;

/// Energy expenditure formulas and comparison bundles
pub mod energy;

/// Feeding intolerance score
pub mod fi_score;

/// Protein requirement rules
pub mod protein;

/// Refeeding syndrome risk, diagnosis, and workflow
pub mod refeeding;

/// Screening and malnutrition diagnosis instruments
pub mod screening;

/// Lab and weight trend comparison
pub mod trends;

pub use assessment::{assess, assess_batch, AssessmentRequest, ConsolidatedAssessment};
pub use config::EngineConfig;
