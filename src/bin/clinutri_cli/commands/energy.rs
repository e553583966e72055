// ABOUTME: Energy expenditure command for clinutri-cli
// ABOUTME: Single Mifflin-St Jeor estimate or a formula comparison bundle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::input::read_json;
use clinutri::energy::{compute_energy, ComparisonBundle, EnergyInput, EnergySelection};
use clinutri::{AppError, AppResult, EngineConfig};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Estimate energy expenditure from an input file
///
/// # Errors
///
/// Returns an error if the input file cannot be read or parsed
pub fn run(
    input: &Path,
    bundle: Option<ComparisonBundle>,
    config: &EngineConfig,
) -> AppResult<Value> {
    let energy_input: EnergyInput = read_json(input)?;
    let selection = bundle.map_or_else(EnergySelection::default, EnergySelection::Bundle);
    let report = compute_energy(selection, &energy_input, &config.energy);
    info!(
        formulas = report.results.len(),
        average = ?report.average_basal_kcal,
        "Energy estimated"
    );
    serde_json::to_value(&report)
        .map_err(|e| AppError::serialization(format!("Failed to serialize report: {e}")))
}
