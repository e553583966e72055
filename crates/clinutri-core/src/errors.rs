// ABOUTME: Unified error types for clinical nutrition calculators
// ABOUTME: ErrorCode taxonomy, AppError with context, and serialisable ErrorDetail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Calculators never abort sibling calculations. Each one either returns an
//! [`AppResult`] or embeds an [`ErrorDetail`] inside its own result record so
//! a partially completed form can still render every other section.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Calculator input errors (3000-3999)
    /// Missing, non-positive, or non-finite numeric input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Value reported in a different unit than the reference it is compared with
    #[serde(rename = "UNIT_MISMATCH")]
    UnitMismatch = 3001,
    /// Inputs are individually valid but the formula has no solution for them
    #[serde(rename = "DOMAIN_INFEASIBLE")]
    DomainInfeasible = 3002,
    /// A band or percent change cannot be computed because a reference is absent
    #[serde(rename = "INDETERMINATE_CLASSIFICATION")]
    IndeterminateClassification = 3003,

    // Internal errors (9000-9999)
    /// Request or result (de)serialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided clinical input is missing or invalid",
            Self::UnitMismatch => "Values are reported in incompatible units",
            Self::DomainInfeasible => "The formula has no valid solution for these inputs",
            Self::IndeterminateClassification => {
                "Classification is not possible without a reference value"
            }
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the error only affects the calculator that raised it
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::UnitMismatch
                | Self::DomainInfeasible
                | Self::IndeterminateClassification
        )
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Name of the input field that caused the error, if any
    pub field: Option<String>,
    /// Additional structured context
    pub details: Value,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            details: Value::Object(Map::new()),
        }
    }

    /// Attach the offending input field name
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Missing, non-positive or non-finite input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Incompatible units between compared values
    pub fn unit_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnitMismatch, message)
    }

    /// Formula has no solution for the given inputs
    pub fn domain_infeasible(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DomainInfeasible, message)
    }

    /// Band or percent change cannot be computed
    pub fn indeterminate(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IndeterminateClassification, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {} ({field})", self.code.description(), self.message),
            None => write!(f, "{}: {}", self.code.description(), self.message),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Serialisable projection of an [`AppError`] embedded inside result records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable reason
    pub message: String,
    /// Offending input field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&AppError> for ErrorDetail {
    fn from(error: &AppError) -> Self {
        Self {
            code: error.code,
            message: error.message.clone(),
            field: error.field.clone(),
        }
    }
}

impl From<AppError> for ErrorDetail {
    fn from(error: AppError) -> Self {
        Self {
            code: error.code,
            message: error.message,
            field: error.field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_local_for_calculator_failures() {
        assert!(ErrorCode::InvalidInput.is_local());
        assert!(ErrorCode::DomainInfeasible.is_local());
        assert!(!ErrorCode::SerializationError.is_local());
    }

    #[test]
    fn test_error_detail_serialization() {
        let error = AppError::domain_infeasible("PB <= PH2O").with_field("altitude_m");
        let detail = ErrorDetail::from(&error);

        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.contains("DOMAIN_INFEASIBLE"));
        assert!(json.contains("altitude_m"));
    }

    #[test]
    fn test_display_includes_field() {
        let error = AppError::invalid_input("Weight must be positive").with_field("weight_kg");
        assert!(error.to_string().contains("(weight_kg)"));
    }
}
