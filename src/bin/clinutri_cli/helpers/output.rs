// ABOUTME: JSON output for clinutri-cli commands
// ABOUTME: Compact by default, pretty-printed on request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use serde_json::Value;
use std::io::{self, Write};

/// Write a JSON value to stdout followed by a newline
///
/// # Errors
///
/// Returns an error if stdout cannot be written
pub fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
