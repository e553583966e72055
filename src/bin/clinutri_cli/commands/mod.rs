// ABOUTME: Subcommand implementations for clinutri-cli
// ABOUTME: Assessment, batch, energy, and feeding intolerance commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod assess;
pub mod energy;
pub mod fi_score;
