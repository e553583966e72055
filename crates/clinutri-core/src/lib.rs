// ABOUTME: Core types and constants for the clinutri clinical nutrition engine
// ABOUTME: Foundation crate with error handling, patient snapshots, lab panels, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Clinutri Core
//!
//! Foundation crate providing the shared vocabulary of the clinical nutrition
//! engine. It changes infrequently so the calculator crate can compile
//! incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorDetail`
//! - **constants**: Physical and clinical constants organized by domain
//! - **models**: Patient snapshots, lab panels, and assessment history records

/// Unified error handling system with standard error codes
pub mod errors;

/// Physical, unit-conversion, and clinical constants organized by domain
pub mod constants;

/// Core data models (`PatientSnapshot`, `LabPanel`, history records)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode, ErrorDetail};
