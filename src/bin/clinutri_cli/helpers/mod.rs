// ABOUTME: Shared helpers for clinutri-cli
// ABOUTME: JSON file input and stdout output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod input;
pub mod output;
