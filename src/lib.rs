// ABOUTME: Main library entry point for the clinutri clinical nutrition decision engine
// ABOUTME: Re-exports core types and calculators and provides logging setup for binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Clinutri
//!
//! Clinical nutrition decision engine: anthropometrics, energy and protein
//! requirements, nutrition risk screening, refeeding syndrome risk and
//! diagnosis, lab and weight trends, intake adequacy, and feeding tolerance.
//!
//! ## Architecture
//!
//! - **`clinutri-core`**: Errors, patient snapshots, lab panels, history contract
//! - **`clinutri-engine`**: Calculators, configuration, and the consolidated pipeline
//! - **logging**: `tracing-subscriber` setup for the CLI
//!
//! ## Quick Start
//!
//! ```bash
//! clinutri-cli assess --input snapshot.json --pretty
//! clinutri-cli fi-score --distension 1 --vomiting 0 --diarrhea 2 --grv 300
//! ```

/// Logging configuration and subscriber setup
pub mod logging;

pub use clinutri_core::{constants, errors, models, AppError, AppResult, ErrorCode, ErrorDetail};
pub use clinutri_engine::{
    adequacy, anthropometrics, assess, assess_batch, assessment, config, energy, fi_score,
    protein, refeeding, screening, trends, AssessmentRequest, ConsolidatedAssessment, EngineConfig,
};
