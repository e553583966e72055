// ABOUTME: JSON file loading for clinutri-cli commands
// ABOUTME: Maps read and parse failures onto structured engine errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use clinutri::{AppError, AppResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and deserialize a JSON file
///
/// # Errors
///
/// Returns `InvalidInput` if the file cannot be read and `SerializationError`
/// if it is not valid JSON for `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}: {e}", path.display()))
            .with_field("input")
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "Input file read");
    serde_json::from_str(&raw).map_err(|e| {
        AppError::serialization(format!("Invalid JSON in {}: {e}", path.display()))
    })
}
