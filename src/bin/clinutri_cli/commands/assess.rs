// ABOUTME: Consolidated assessment commands for clinutri-cli
// ABOUTME: Single request with optional history file, or a parallel batch of requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::input::read_json;
use clinutri::models::{HistoryEntry, HistoryProvider, InMemoryHistory};
use clinutri::{assess, assess_batch, AppError, AppResult, AssessmentRequest, EngineConfig};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;

fn to_value(value: &impl Serialize) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::serialization(format!("Failed to serialize result: {e}")))
}

/// Assess one request; history entries may be supplied in any order
///
/// # Errors
///
/// Returns an error if an input file cannot be read or parsed
pub fn single(input: &Path, history: Option<&Path>, config: &EngineConfig) -> AppResult<Value> {
    let mut request: AssessmentRequest = read_json(input)?;
    if let Some(path) = history {
        let entries: Vec<HistoryEntry> = read_json(path)?;
        let patient = request.current.id.clone();
        let store = InMemoryHistory::from_entries(&patient, entries);
        request.history = store.recent_first(&patient)?;
    }

    let assessment = assess(&request, config);
    info!(
        patient = %assessment.patient_id,
        failed_sections = assessment.section_errors().len(),
        "Assessment finished"
    );
    to_value(&assessment)
}

/// Assess an array of requests in parallel
///
/// # Errors
///
/// Returns an error if the input file cannot be read or parsed
pub fn batch(input: &Path, config: &EngineConfig) -> AppResult<Value> {
    let requests: Vec<AssessmentRequest> = read_json(input)?;
    let assessments = assess_batch(&requests, config);
    info!(count = assessments.len(), "Batch finished");
    to_value(&assessments)
}
