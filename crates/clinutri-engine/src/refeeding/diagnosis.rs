// ABOUTME: Refeeding syndrome diagnosis from electrolyte declines, thiamine, and symptoms
// ABOUTME: Ordered severity rules and temporality-gated label resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{LabReferenceConfig, RefeedingConfig};
use crate::trends::percent_decline;
use chrono::NaiveDate;
use clinutri_core::models::{
    AssessmentKind, Electrolyte, HistoryEntry, LabPanel, ThiamineStatus, ThiamineUnit,
};
use clinutri_core::{AppError, AppResult, ErrorDetail};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info};

/// Analytes whose symptoms are reviewed during diagnosis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticAnalyte {
    /// Potassium
    Potassium,
    /// Phosphorus
    Phosphorus,
    /// Magnesium
    Magnesium,
    /// Thiamine
    Thiamine,
}

impl From<Electrolyte> for DiagnosticAnalyte {
    fn from(electrolyte: Electrolyte) -> Self {
        match electrolyte {
            Electrolyte::Potassium => Self::Potassium,
            Electrolyte::Phosphorus => Self::Phosphorus,
            Electrolyte::Magnesium => Self::Magnesium,
        }
    }
}

impl fmt::Display for DiagnosticAnalyte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Potassium => "potassium",
            Self::Phosphorus => "phosphorus",
            Self::Magnesium => "magnesium",
            Self::Thiamine => "thiamine",
        };
        f.write_str(name)
    }
}

/// Clinical manifestation attributable to a deficit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    /// Cardiac arrhythmia
    Arrhythmia,
    /// Muscle weakness
    MuscleWeakness,
    /// Paralysis or ileus
    Paralysis,
    /// Respiratory failure or ventilator dependence
    RespiratoryFailure,
    /// Heart failure
    HeartFailure,
    /// Rhabdomyolysis
    Rhabdomyolysis,
    /// Seizures
    Seizures,
    /// Confusion or delirium
    Confusion,
    /// Tremor
    Tremor,
    /// Tetany
    Tetany,
    /// Ataxia
    Ataxia,
    /// Ophthalmoplegia or nystagmus
    Ophthalmoplegia,
    /// Lactic acidosis
    LacticAcidosis,
}

impl Symptom {
    /// Symptoms attributable to each analyte
    #[must_use]
    pub const fn typical(analyte: DiagnosticAnalyte) -> &'static [Self] {
        match analyte {
            DiagnosticAnalyte::Potassium => &[
                Self::Arrhythmia,
                Self::MuscleWeakness,
                Self::Paralysis,
                Self::Rhabdomyolysis,
            ],
            DiagnosticAnalyte::Phosphorus => &[
                Self::RespiratoryFailure,
                Self::HeartFailure,
                Self::MuscleWeakness,
                Self::Rhabdomyolysis,
                Self::Seizures,
                Self::Confusion,
            ],
            DiagnosticAnalyte::Magnesium => &[
                Self::Arrhythmia,
                Self::Tremor,
                Self::Tetany,
                Self::Seizures,
            ],
            DiagnosticAnalyte::Thiamine => &[
                Self::Confusion,
                Self::Ataxia,
                Self::Ophthalmoplegia,
                Self::LacticAcidosis,
                Self::HeartFailure,
            ],
        }
    }

    /// Whether this symptom is attributable to `analyte`
    #[must_use]
    pub fn typical_for(self, analyte: DiagnosticAnalyte) -> bool {
        Self::typical(analyte).contains(&self)
    }
}

type CheckedSymptoms = BTreeMap<DiagnosticAnalyte, BTreeSet<Symptom>>;

/// Clinician-checked symptoms per analyte
///
/// Deserialization applies the same attribution rule as [`Self::check`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CheckedSymptoms", into = "CheckedSymptoms")]
pub struct SymptomChecklist {
    checked: CheckedSymptoms,
}

impl TryFrom<CheckedSymptoms> for SymptomChecklist {
    type Error = AppError;

    fn try_from(checked: CheckedSymptoms) -> Result<Self, Self::Error> {
        checked
            .into_iter()
            .flat_map(|(analyte, symptoms)| symptoms.into_iter().map(move |s| (analyte, s)))
            .try_fold(Self::new(), |list, (analyte, symptom)| {
                list.check(analyte, symptom)
            })
    }
}

impl From<SymptomChecklist> for CheckedSymptoms {
    fn from(list: SymptomChecklist) -> Self {
        list.checked
    }
}

impl SymptomChecklist {
    /// Empty checklist
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a symptom under an analyte
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the symptom is not attributable to the analyte
    pub fn check(mut self, analyte: DiagnosticAnalyte, symptom: Symptom) -> AppResult<Self> {
        if !symptom.typical_for(analyte) {
            return Err(AppError::invalid_input(format!(
                "{symptom:?} is not a recognised manifestation of low {analyte}"
            ))
            .with_field("symptoms"));
        }
        self.checked.entry(analyte).or_default().insert(symptom);
        Ok(self)
    }

    /// Symptoms checked under an analyte
    #[must_use]
    pub fn for_analyte(&self, analyte: DiagnosticAnalyte) -> Vec<Symptom> {
        self.checked
            .get(&analyte)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether any symptom is checked under an analyte
    #[must_use]
    pub fn has_any(&self, analyte: DiagnosticAnalyte) -> bool {
        self.checked.get(&analyte).is_some_and(|set| !set.is_empty())
    }

    /// Whether nothing is checked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checked.values().all(BTreeSet::is_empty)
    }
}

/// Where the "initial" labs came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "labs")]
pub enum DiagnosisBaseline {
    /// Baseline stored at the initial assessment
    Stored(LabPanel),
    /// Labs from the immediately preceding follow-up
    PreviousFollowUp(LabPanel),
}

impl DiagnosisBaseline {
    /// Choose the reference labs
    ///
    /// `history` must be most-recent-first. The first follow-up entry carrying
    /// labs wins; otherwise the stored baseline is used.
    #[must_use]
    pub fn select(stored: LabPanel, history: &[HistoryEntry]) -> Self {
        history
            .iter()
            .find(|entry| entry.kind == AssessmentKind::FollowUp && !entry.labs.is_empty())
            .map_or(Self::Stored(stored), |entry| {
                Self::PreviousFollowUp(entry.labs.clone())
            })
    }

    /// Reference labs
    #[must_use]
    pub const fn labs(&self) -> &LabPanel {
        match self {
            Self::Stored(labs) | Self::PreviousFollowUp(labs) => labs,
        }
    }
}

/// Change in one electrolyte between baseline and now
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectrolyteChange {
    /// Reference value
    pub initial: f64,
    /// Current value
    pub current: f64,
    /// Signed percent change, two decimals
    pub percent_change: f64,
    /// Current value below the low-normal cutoff
    pub is_low: bool,
    /// Decline large enough to count toward the syndrome
    pub contributing: bool,
}

impl ElectrolyteChange {
    /// Percent decline, zero when the value did not fall
    #[must_use]
    pub fn decline_percent(&self) -> f64 {
        (-self.percent_change).max(0.0)
    }
}

/// Thiamine status at diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThiamineFinding {
    /// Measured value
    pub value: Option<f64>,
    /// Reporting unit
    pub unit: ThiamineUnit,
    /// Recorded flag, or the value classified against the unit's interval
    pub status: Option<ThiamineStatus>,
    /// Deficient by flag or by unit cutoff
    pub deficient: bool,
}

/// Severity of a refeeding syndrome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No qualifying decline
    None,
    /// Decline of 10 % or more
    Mild,
    /// Decline of 20 % or more
    Moderate,
    /// Decline above 30 % or organ dysfunction
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        };
        f.write_str(label)
    }
}

/// Final diagnostic label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", tag = "label", content = "severity")]
pub enum DiagnosisLabel {
    /// Findings present but temporality not confirmed
    CriteriaPending,
    /// Confirmed refeeding syndrome
    RefeedingSyndrome(Severity),
    /// Electrolytes fell without meeting syndrome criteria
    ElectrolyteChangesWithoutSyndrome,
    /// No refeeding syndrome
    NoRefeedingSyndrome,
}

impl fmt::Display for DiagnosisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CriteriaPending => f.write_str("criteria pending — temporality not met"),
            Self::RefeedingSyndrome(severity) => write!(f, "REFEEDING SYNDROME ({severity})"),
            Self::ElectrolyteChangesWithoutSyndrome => {
                f.write_str("electrolyte changes without refeeding syndrome")
            }
            Self::NoRefeedingSyndrome => f.write_str("no refeeding syndrome"),
        }
    }
}

/// Inputs to a diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisInput {
    /// Reference labs and their source
    pub baseline: DiagnosisBaseline,
    /// Current labs
    pub current: LabPanel,
    /// Clinician-checked symptoms
    #[serde(default)]
    pub symptoms: SymptomChecklist,
    /// Changes occurred within the window after feeding began; `None` if unanswered
    #[serde(default)]
    pub temporality_confirmed: Option<bool>,
}

/// Diagnosis outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefeedingDiagnosis {
    /// True when the reference came from the preceding follow-up
    pub baseline_from_follow_up: bool,
    /// Per-electrolyte changes
    pub electrolyte_changes: BTreeMap<Electrolyte, ElectrolyteChange>,
    /// Thiamine status, when reported
    pub thiamine: Option<ThiamineFinding>,
    /// Checked symptoms per analyte
    pub symptoms_by_analyte: BTreeMap<DiagnosticAnalyte, Vec<Symptom>>,
    /// Temporality answer
    pub temporality_confirmed: Option<bool>,
    /// A contributing deficit has a checked symptom
    pub organ_dysfunction_present: bool,
    /// Syndrome criteria met, independent of temporality
    pub has_syndrome: bool,
    /// Severity of the findings
    pub severity: Severity,
    /// Final label
    pub label: DiagnosisLabel,
    /// Electrolytes that could not be compared
    pub issues: Vec<ErrorDetail>,
}

impl RefeedingDiagnosis {
    /// Whether the label is a confirmed syndrome
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self.label, DiagnosisLabel::RefeedingSyndrome(_))
    }

    /// Largest electrolyte decline (%)
    #[must_use]
    pub fn max_decline_percent(&self) -> f64 {
        self.electrolyte_changes
            .values()
            .map(ElectrolyteChange::decline_percent)
            .fold(0.0, f64::max)
    }
}

/// Evidence the severity rules look at
struct SeverityEvidence {
    max_decline: f64,
    organ_dysfunction: bool,
}

type SeverityRule = fn(&SeverityEvidence, &RefeedingConfig) -> bool;

fn severe(evidence: &SeverityEvidence, config: &RefeedingConfig) -> bool {
    evidence.organ_dysfunction || evidence.max_decline > config.severe_decline_percent
}

fn moderate(evidence: &SeverityEvidence, config: &RefeedingConfig) -> bool {
    evidence.max_decline >= config.moderate_decline_percent
}

fn mild(evidence: &SeverityEvidence, config: &RefeedingConfig) -> bool {
    evidence.max_decline >= config.contributing_decline_percent
}

/// Most severe first; the first match wins
const SEVERITY_RULES: [(Severity, SeverityRule); 3] = [
    (Severity::Severe, severe),
    (Severity::Moderate, moderate),
    (Severity::Mild, mild),
];

fn grade_severity(evidence: &SeverityEvidence, config: &RefeedingConfig) -> Severity {
    SEVERITY_RULES
        .iter()
        .find(|(_, applies)| applies(evidence, config))
        .map_or(Severity::None, |(severity, _)| *severity)
}

fn resolve_label(
    has_syndrome: bool,
    any_decline: bool,
    temporality: Option<bool>,
    severity: Severity,
) -> DiagnosisLabel {
    let confirmed = temporality == Some(true);
    match (has_syndrome, confirmed) {
        (true, false) => DiagnosisLabel::CriteriaPending,
        (true, true) => DiagnosisLabel::RefeedingSyndrome(severity),
        (false, true) if any_decline => DiagnosisLabel::ElectrolyteChangesWithoutSyndrome,
        _ => DiagnosisLabel::NoRefeedingSyndrome,
    }
}

fn require_value(value: Option<f64>, field: &str) -> AppResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::invalid_input(format!(
            "{field} must be a non-negative number"
        ))
        .with_field(field)),
        other => Ok(other),
    }
}

fn electrolyte_changes(
    input: &DiagnosisInput,
    labs: &LabReferenceConfig,
    config: &RefeedingConfig,
    issues: &mut Vec<ErrorDetail>,
) -> AppResult<BTreeMap<Electrolyte, ElectrolyteChange>> {
    let mut changes = BTreeMap::new();
    for electrolyte in Electrolyte::ALL {
        let field = electrolyte.to_string();
        let initial = require_value(input.baseline.labs().electrolyte(electrolyte), &field)?;
        let current = require_value(input.current.electrolyte(electrolyte), &field)?;
        let (Some(initial), Some(current)) = (initial, current) else {
            continue;
        };
        let Some(decline) = percent_decline(initial, current) else {
            issues.push(ErrorDetail::from(
                AppError::indeterminate(format!("Reference {electrolyte} is not positive"))
                    .with_field(field),
            ));
            continue;
        };
        let is_low = labs
            .low_cutoff(electrolyte.analyte(), ThiamineUnit::default())
            .is_some_and(|cutoff| current < cutoff);
        changes.insert(
            electrolyte,
            ElectrolyteChange {
                initial,
                current,
                percent_change: -decline,
                is_low,
                contributing: current < initial && decline >= config.contributing_decline_percent,
            },
        );
    }
    Ok(changes)
}

fn thiamine_finding(input: &DiagnosisInput, labs: &LabReferenceConfig) -> Option<ThiamineFinding> {
    let result = input
        .current
        .thiamine
        .or_else(|| input.baseline.labs().thiamine)?;
    let cutoffs = labs.thiamine(result.unit);
    let below_cutoff = result.value.is_some_and(|v| v < cutoffs.low);
    Some(ThiamineFinding {
        value: result.value,
        unit: result.unit,
        status: result
            .status
            .or_else(|| result.value.map(|v| cutoffs.classify(v))),
        deficient: result.status == Some(ThiamineStatus::Low) || below_cutoff,
    })
}

/// Diagnose refeeding syndrome
///
/// Temporality gates the label only; findings and severity are always
/// reported. The same rules apply whether the baseline is the stored initial
/// panel or the preceding follow-up.
///
/// # Errors
///
/// Returns `InvalidInput` when an electrolyte value is negative or non-finite
pub fn diagnose_refeeding(
    input: &DiagnosisInput,
    labs: &LabReferenceConfig,
    config: &RefeedingConfig,
) -> AppResult<RefeedingDiagnosis> {
    let mut issues = Vec::new();
    let changes = electrolyte_changes(input, labs, config, &mut issues)?;
    let thiamine = thiamine_finding(input, labs);
    let thiamine_deficient = thiamine.is_some_and(|t| t.deficient);

    let electrolyte_dysfunction = changes.iter().any(|(electrolyte, change)| {
        change.contributing && input.symptoms.has_any(DiagnosticAnalyte::from(*electrolyte))
    });
    let thiamine_symptoms = input.symptoms.has_any(DiagnosticAnalyte::Thiamine);
    let organ_dysfunction = electrolyte_dysfunction || (thiamine_deficient && thiamine_symptoms);

    let any_contributing = changes.values().any(|c| c.contributing);
    let any_decline = changes.values().any(|c| c.current < c.initial);
    let has_syndrome = any_contributing || (thiamine_deficient && thiamine_symptoms);

    let evidence = SeverityEvidence {
        max_decline: changes
            .values()
            .map(ElectrolyteChange::decline_percent)
            .fold(0.0, f64::max),
        organ_dysfunction,
    };
    let severity = if has_syndrome {
        grade_severity(&evidence, config)
    } else {
        Severity::None
    };
    let label = resolve_label(
        has_syndrome,
        any_decline,
        input.temporality_confirmed,
        severity,
    );

    let symptoms_by_analyte = [
        DiagnosticAnalyte::Potassium,
        DiagnosticAnalyte::Phosphorus,
        DiagnosticAnalyte::Magnesium,
        DiagnosticAnalyte::Thiamine,
    ]
    .into_iter()
    .filter(|analyte| input.symptoms.has_any(*analyte))
    .map(|analyte| (analyte, input.symptoms.for_analyte(analyte)))
    .collect();

    if matches!(label, DiagnosisLabel::RefeedingSyndrome(_)) {
        info!(%severity, "Refeeding syndrome confirmed");
    } else {
        debug!(%label, has_syndrome, "Refeeding diagnosis resolved");
    }

    Ok(RefeedingDiagnosis {
        baseline_from_follow_up: matches!(input.baseline, DiagnosisBaseline::PreviousFollowUp(_)),
        electrolyte_changes: changes,
        thiamine,
        symptoms_by_analyte,
        temporality_confirmed: input.temporality_confirmed,
        organ_dysfunction_present: organ_dysfunction,
        has_syndrome,
        severity,
        label,
        issues,
    })
}

/// Temporality from dates: findings within the window after feeding changed
///
/// Findings dated before the feeding change are not temporally associated.
#[must_use]
pub fn temporality_from_dates(
    feeding_changed_on: NaiveDate,
    findings_on: NaiveDate,
    config: &RefeedingConfig,
) -> bool {
    let days = (findings_on - feeding_changed_on).num_days();
    (0..=config.temporality_window_days).contains(&days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(max_decline: f64, organ_dysfunction: bool) -> SeverityEvidence {
        SeverityEvidence {
            max_decline,
            organ_dysfunction,
        }
    }

    #[test]
    fn test_severity_rules_most_severe_wins() {
        let config = RefeedingConfig::default();
        assert_eq!(grade_severity(&evidence(35.0, false), &config), Severity::Severe);
        assert_eq!(grade_severity(&evidence(30.0, false), &config), Severity::Moderate);
        assert_eq!(grade_severity(&evidence(12.0, true), &config), Severity::Severe);
        assert_eq!(grade_severity(&evidence(10.0, false), &config), Severity::Mild);
        assert_eq!(grade_severity(&evidence(9.99, false), &config), Severity::None);
    }

    #[test]
    fn test_label_requires_confirmed_temporality() {
        assert_eq!(
            resolve_label(true, true, None, Severity::Mild),
            DiagnosisLabel::CriteriaPending
        );
        assert_eq!(
            resolve_label(true, true, Some(false), Severity::Mild),
            DiagnosisLabel::CriteriaPending
        );
        assert_eq!(
            resolve_label(false, true, None, Severity::None),
            DiagnosisLabel::NoRefeedingSyndrome
        );
        assert_eq!(
            resolve_label(false, true, Some(true), Severity::None),
            DiagnosisLabel::ElectrolyteChangesWithoutSyndrome
        );
    }

    #[test]
    fn test_label_display_text() {
        assert_eq!(
            DiagnosisLabel::CriteriaPending.to_string(),
            "criteria pending — temporality not met"
        );
        assert_eq!(
            DiagnosisLabel::RefeedingSyndrome(Severity::Moderate).to_string(),
            "REFEEDING SYNDROME (moderate)"
        );
    }

    #[test]
    fn test_checklist_rejects_unrelated_symptom() {
        let result = SymptomChecklist::new().check(DiagnosticAnalyte::Potassium, Symptom::Ataxia);
        assert!(result.is_err());
    }

    #[test]
    fn test_checklist_json_applies_attribution_rule() {
        let parsed: Result<SymptomChecklist, _> =
            serde_json::from_str(r#"{"potassium":["ataxia"]}"#);
        assert!(parsed.is_err());

        let parsed: SymptomChecklist =
            serde_json::from_str(r#"{"thiamine":["ataxia","confusion"]}"#).unwrap();
        assert_eq!(
            parsed.for_analyte(DiagnosticAnalyte::Thiamine),
            vec![Symptom::Confusion, Symptom::Ataxia]
        );
    }
}
