// ABOUTME: Laboratory panel comparison between a reference and a current draw
// ABOUTME: Per-analyte percent change, direction, and refeeding concern escalation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{classify_direction, percent_change, Direction};
use crate::config::{LabReferenceConfig, TrendConfig};
use clinutri_core::models::{Analyte, LabPanel, ThiamineUnit};
use clinutri_core::{AppError, ErrorDetail};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Concern level for refeeding-relevant analytes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ConcernLevel {
    /// Within range and stable
    Normal,
    /// Near the low cutoff or falling
    Alert,
    /// Below the low cutoff or falling sharply
    Critical,
}

/// Comparison of one analyte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabChange {
    /// Analyte
    pub analyte: Analyte,
    /// Reporting unit
    pub unit: String,
    /// Reference value
    pub previous: Option<f64>,
    /// Current value
    pub current: f64,
    /// Signed percent change, two decimals
    pub percent_change: Option<f64>,
    /// Direction of change; `None` when the reference cannot be compared
    pub direction: Option<Direction>,
    /// Concern level (refeeding-relevant analytes only)
    pub concern: Option<ConcernLevel>,
}

/// Refeeding-relevant analyte needing attention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectrolyteConcern {
    /// Analyte
    pub analyte: Analyte,
    /// Alert or critical
    pub level: ConcernLevel,
    /// Why
    pub reasons: Vec<String>,
}

/// Full panel comparison
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabComparison {
    /// Per-analyte changes, in panel order
    pub changes: Vec<LabChange>,
    /// Refeeding-relevant analytes at alert or critical level
    pub electrolyte_concerns: Vec<ElectrolyteConcern>,
    /// Any change at or above its significance threshold
    pub has_significant_change: bool,
    /// Analytes that could not be compared
    pub issues: Vec<ErrorDetail>,
}

impl LabComparison {
    /// Change for an analyte
    #[must_use]
    pub fn change(&self, analyte: Analyte) -> Option<&LabChange> {
        self.changes.iter().find(|c| c.analyte == analyte)
    }
}

fn unit_label(analyte: Analyte, unit: ThiamineUnit) -> String {
    analyte
        .fixed_unit()
        .map_or_else(|| unit.to_string(), ToOwned::to_owned)
}

/// Concern for a refeeding-relevant analyte, with the reasons that raised it
fn concern(
    analyte: Analyte,
    current: f64,
    percent: Option<f64>,
    unit: ThiamineUnit,
    reference: &LabReferenceConfig,
    trends: &TrendConfig,
) -> Option<(ConcernLevel, Vec<String>)> {
    let low = reference.low_cutoff(analyte, unit)?;
    let alert = reference.alert_cutoff(analyte, unit)?;
    let decline = percent.map_or(0.0, |p| -p);

    let mut critical = Vec::new();
    if current < low {
        critical.push(format!("{analyte} {current} below {low}"));
    }
    if decline >= trends.critical_decline_percent {
        critical.push(format!("{analyte} fell {decline:.2} %"));
    }
    if !critical.is_empty() {
        return Some((ConcernLevel::Critical, critical));
    }

    let mut alerts = Vec::new();
    if current < alert {
        alerts.push(format!("{analyte} {current} near low cutoff {low}"));
    }
    if decline >= trends.alert_decline_percent {
        alerts.push(format!("{analyte} fell {decline:.2} %"));
    }
    if alerts.is_empty() {
        Some((ConcernLevel::Normal, Vec::new()))
    } else {
        Some((ConcernLevel::Alert, alerts))
    }
}

fn significance_threshold(analyte: Analyte, trends: &TrendConfig) -> f64 {
    if analyte.as_electrolyte().is_some() {
        trends.electrolyte_significant_change_percent
    } else {
        trends.significant_change_percent
    }
}

/// Thiamine values are only comparable when both are in the same unit
fn units_comparable(
    analyte: Analyte,
    previous: &LabPanel,
    current: &LabPanel,
) -> Result<(), ErrorDetail> {
    if analyte != Analyte::Thiamine {
        return Ok(());
    }
    let units = previous
        .thiamine
        .map(|t| t.unit)
        .zip(current.thiamine.map(|t| t.unit));
    match units {
        Some((before, now)) if before != now => {
            warn!(%before, %now, "Thiamine units differ between draws");
            Err(ErrorDetail::from(
                AppError::unit_mismatch(format!(
                    "Thiamine reported in {before} previously and {now} now"
                ))
                .with_field("thiamine"),
            ))
        }
        _ => Ok(()),
    }
}

/// Compare a current panel against a reference panel
///
/// Analytes present only in the reference are skipped; analytes present only
/// now are reported as new values.
#[must_use]
pub fn compare_labs(
    previous: &LabPanel,
    current: &LabPanel,
    reference: &LabReferenceConfig,
    trends: &TrendConfig,
) -> LabComparison {
    let mut comparison = LabComparison::default();
    let thiamine_unit = current.thiamine.map(|t| t.unit).unwrap_or_default();

    for analyte in Analyte::ALL {
        let Some(now) = current.value(analyte) else {
            continue;
        };
        let before = previous.value(analyte);
        let percent = match (before, units_comparable(analyte, previous, current)) {
            (Some(b), Ok(())) => {
                let percent = percent_change(b, now);
                if percent.is_none() {
                    comparison.issues.push(ErrorDetail::from(
                        AppError::indeterminate(format!("Reference {analyte} is not positive"))
                            .with_field(analyte.to_string()),
                    ));
                }
                percent
            }
            (Some(_), Err(issue)) => {
                comparison.issues.push(issue);
                None
            }
            (None, _) => None,
        };

        let direction = match (before, percent) {
            (None, _) => Some(Direction::NewValue),
            (Some(_), Some(p)) => Some(classify_direction(p, trends.no_change_percent)),
            (Some(_), None) => None,
        };
        if percent.is_some_and(|p| p.abs() >= significance_threshold(analyte, trends)) {
            comparison.has_significant_change = true;
        }

        let assessed = concern(analyte, now, percent, thiamine_unit, reference, trends);
        if let Some((level, reasons)) = &assessed {
            if *level != ConcernLevel::Normal {
                comparison.electrolyte_concerns.push(ElectrolyteConcern {
                    analyte,
                    level: *level,
                    reasons: reasons.clone(),
                });
            }
        }

        comparison.changes.push(LabChange {
            analyte,
            unit: unit_label(analyte, thiamine_unit),
            previous: before,
            current: now,
            percent_change: percent,
            direction,
            concern: assessed.map(|(level, _)| level),
        });
    }

    debug!(
        changes = comparison.changes.len(),
        concerns = comparison.electrolyte_concerns.len(),
        significant = comparison.has_significant_change,
        "Lab panels compared"
    );
    comparison
}
