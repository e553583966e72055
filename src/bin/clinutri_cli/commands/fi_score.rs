// ABOUTME: Feeding intolerance score command for clinutri-cli
// ABOUTME: Converts point selections to domain answers and applies residual volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use clinutri::fi_score::{
    score_feeding_intolerance, Diarrhea, DistensionPain, FiScoreInput, NauseaVomiting,
};
use clinutri::{AppError, AppResult, EngineConfig};
use serde_json::Value;

/// Score feeding intolerance from point selections
///
/// # Errors
///
/// Returns `InvalidInput` for point values other than 0, 1, 2 or 5 and for a
/// negative residual volume
pub fn run(
    distension: u8,
    vomiting: u8,
    diarrhea: u8,
    gastric_residual_ml: Option<f64>,
    config: &EngineConfig,
) -> AppResult<Value> {
    let input = FiScoreInput {
        distension_pain: DistensionPain::from_points(distension)?,
        nausea_vomiting: NauseaVomiting::from_points(vomiting)?,
        diarrhea: Diarrhea::from_points(diarrhea)?,
        gastric_residual_ml,
    };
    let result = score_feeding_intolerance(&input, &config.fi_score)?;
    serde_json::to_value(&result)
        .map_err(|e| AppError::serialization(format!("Failed to serialize score: {e}")))
}
