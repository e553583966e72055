// ABOUTME: Consolidated assessment pipeline over every calculator for one snapshot
// ABOUTME: Per-section errors never abort siblings; batches run in parallel with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Consolidated Assessment
//!
//! Runs anthropometrics first, then energy, protein, screening, refeeding,
//! trends, adequacy and feeding tolerance. Each section carries either a
//! value or the error that stopped it, so a partially completed form still
//! yields every section that could be computed. The result is plain data for
//! a persistence service to store verbatim.

use crate::adequacy::{evaluate_intake, latest_nutrition_goal, ActualIntake, IntakeAdequacy};
use crate::anthropometrics::{derive_for, DerivedAnthropometrics};
use crate::config::EngineConfig;
use crate::energy::{
    compute_energy, ClinicalModifiers, EnergyInput, EnergyReport, EnergySelection, InfusionInput,
    WeirInput,
};
use crate::fi_score::{score_feeding_intolerance, FiScoreInput, FiScoreResult};
use crate::protein::{calculate_protein, ProteinInput, ProteinResult};
use crate::refeeding::{
    DiagnosisBaseline, RefeedingRiskInput, RefeedingStage, RefeedingWorkflow, SymptomChecklist,
};
use crate::screening::{
    assess_calf_circumference, assess_glim, score_nutric, screen_nrs2002,
    CalfCircumferenceInput, CalfCircumferenceResult, GlimInput, GlimResult, Nrs2002Input,
    Nrs2002Result, NutricInput, NutricResult, RiskScore, ScreeningSummary,
};
use crate::trends::{
    compare_labs, compare_weight, weight_loss_percent_over, LabComparison, WeightObservation,
    WeightTrend,
};
use chrono::NaiveDate;
use clinutri_core::models::{HistoryEntry, LabPanel, NutritionGoal, PatientId, PatientSnapshot};
use clinutri_core::{AppResult, ErrorDetail};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const ONE_MONTH_DAYS: i64 = 30;
const THREE_MONTHS_DAYS: i64 = 90;
const SIX_MONTHS_DAYS: i64 = 180;

/// One section of the consolidated result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    /// Computed value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    /// Why the value is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self::not_requested()
    }
}

impl<T> Section<T> {
    /// Section with no input supplied
    #[must_use]
    pub const fn not_requested() -> Self {
        Self {
            value: None,
            error: None,
        }
    }

    /// Section from a calculator outcome
    pub fn from_result(section: &str, result: AppResult<T>) -> Self {
        match result {
            Ok(value) => Self {
                value: Some(value),
                error: None,
            },
            Err(error) => {
                warn!(section, code = ?error.code, message = %error.message, "Section not computed");
                Self {
                    value: None,
                    error: Some(ErrorDetail::from(error)),
                }
            }
        }
    }

    /// Computed value, if any
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether the section failed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Clinician-entered inputs accompanying a snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicianInputs {
    /// Energy formula or comparison bundle
    pub energy_selection: EnergySelection,
    /// Activity, hospital mobility, and clinical condition
    pub modifiers: ClinicalModifiers,
    /// Capnography for the Weir formula
    pub weir: Option<WeirInput>,
    /// Measured REE (kcal/day)
    pub measured_ree_kcal: Option<f64>,
    /// Non-nutritional infusions
    pub infusions: InfusionInput,
    /// NRS-2002 answers; BMI and age default to the snapshot
    pub nrs2002: Option<Nrs2002Input>,
    /// NUTRIC inputs
    pub nutric: Option<NutricInput>,
    /// GLIM answers; BMI and age default to the snapshot
    pub glim: Option<GlimInput>,
    /// Calf circumference (cm)
    pub calf_circumference_cm: Option<f64>,
    /// Refeeding baseline data; BMI, labs and weight loss default to the snapshot and history
    pub refeeding_risk: Option<RefeedingRiskInput>,
    /// Symptoms checked for the refeeding diagnosis
    pub symptoms: SymptomChecklist,
    /// Temporality answer for the refeeding diagnosis
    pub temporality_confirmed: Option<bool>,
    /// Delivered intake
    pub intake: Option<ActualIntake>,
    /// Explicit goal; otherwise the latest goal in history is used
    pub goal: Option<NutritionGoal>,
    /// Feeding intolerance selections
    pub fi_score: Option<FiScoreInput>,
}

/// Everything needed to assess one patient occasion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// Current snapshot
    pub current: PatientSnapshot,
    /// Previous snapshot for trend comparison
    #[serde(default)]
    pub reference: Option<PatientSnapshot>,
    /// Prior assessments, most recent first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Labs stored at the initial assessment
    #[serde(default)]
    pub stored_baseline_labs: Option<LabPanel>,
    /// Clinician-entered inputs
    #[serde(default)]
    pub clinician: ClinicianInputs,
}

impl AssessmentRequest {
    /// Request with a snapshot only
    #[must_use]
    pub fn new(current: PatientSnapshot) -> Self {
        Self {
            current,
            reference: None,
            history: Vec::new(),
            stored_baseline_labs: None,
            clinician: ClinicianInputs::default(),
        }
    }

    /// Attach a previous snapshot
    #[must_use]
    pub fn with_reference(mut self, reference: PatientSnapshot) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Attach history (most recent first)
    #[must_use]
    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    /// Attach clinician inputs
    #[must_use]
    pub fn with_clinician(mut self, clinician: ClinicianInputs) -> Self {
        self.clinician = clinician;
        self
    }

    /// Attach the stored initial labs
    #[must_use]
    pub fn with_stored_baseline(mut self, labs: LabPanel) -> Self {
        self.stored_baseline_labs = Some(labs);
        self
    }
}

/// Screening results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreeningSections {
    /// NRS-2002
    pub nrs2002: Section<Nrs2002Result>,
    /// NUTRIC / mNUTRIC
    pub nutric: Section<NutricResult>,
    /// GLIM
    pub glim: Section<GlimResult>,
    /// Calf circumference
    pub calf_circumference: Section<CalfCircumferenceResult>,
    /// Uniform summaries of every computed instrument
    pub summaries: Vec<ScreeningSummary>,
}

/// Refeeding workflow outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefeedingSection {
    /// Workflow stage reached
    pub stage: RefeedingStage,
    /// Full workflow state
    pub workflow: RefeedingWorkflow,
    /// Why the diagnosis step was skipped; the risk result still stands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_error: Option<ErrorDetail>,
}

/// Output of one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedAssessment {
    /// Patient
    pub patient_id: PatientId,
    /// Assessment date
    pub assessed_on: NaiveDate,
    /// BMI, IBW, ABW
    pub anthropometrics: DerivedAnthropometrics,
    /// Energy estimates
    pub energy: EnergyReport,
    /// Protein requirement
    pub protein: Section<ProteinResult>,
    /// Screening instruments
    pub screening: ScreeningSections,
    /// Refeeding risk and diagnosis
    pub refeeding: Section<RefeedingSection>,
    /// Lab trends against the reference panel
    pub lab_trends: Option<LabComparison>,
    /// Weight trend against the reference weight
    pub weight_trend: Section<WeightTrend>,
    /// Intake adequacy
    pub adequacy: Section<IntakeAdequacy>,
    /// Feeding intolerance
    pub fi_score: Section<FiScoreResult>,
}

impl ConsolidatedAssessment {
    /// Errors from every section that failed
    #[must_use]
    pub fn section_errors(&self) -> Vec<&ErrorDetail> {
        [
            self.protein.error.as_ref(),
            self.screening.nrs2002.error.as_ref(),
            self.screening.nutric.error.as_ref(),
            self.screening.glim.error.as_ref(),
            self.screening.calf_circumference.error.as_ref(),
            self.refeeding.error.as_ref(),
            self.refeeding
                .value()
                .and_then(|section| section.diagnosis_error.as_ref()),
            self.weight_trend.error.as_ref(),
            self.adequacy.error.as_ref(),
            self.fi_score.error.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn energy_section(request: &AssessmentRequest, config: &EngineConfig) -> EnergyReport {
    let clinician = &request.clinician;
    let mut input = EnergyInput::from_snapshot(&request.current)
        .with_modifiers(clinician.modifiers)
        .with_infusions(clinician.infusions);
    input.weir = clinician.weir;
    input.measured_ree_kcal = clinician.measured_ree_kcal;
    compute_energy(clinician.energy_selection, &input, &config.energy)
}

fn protein_section(
    request: &AssessmentRequest,
    anthropometrics: DerivedAnthropometrics,
    config: &EngineConfig,
) -> Section<ProteinResult> {
    let condition = request.clinician.modifiers.condition;
    let input = ProteinInput {
        weight_kg: request.current.weight_kg,
        anthropometrics,
        burns: condition.is_burns(),
        polytrauma: condition.is_polytrauma(),
        disease_phase: request.current.disease_phase,
    };
    Section::from_result("protein", calculate_protein(&input, &config.protein))
}

fn summarize<T: RiskScore>(section: &Section<T>, summaries: &mut Vec<ScreeningSummary>) {
    if let Some(result) = section.value() {
        summaries.push(ScreeningSummary::of(result));
    }
}

fn screening_sections(
    request: &AssessmentRequest,
    anthropometrics: DerivedAnthropometrics,
) -> ScreeningSections {
    let snapshot = &request.current;
    let clinician = &request.clinician;
    let mut sections = ScreeningSections::default();

    if let Some(circumference_cm) = clinician.calf_circumference_cm {
        let input = CalfCircumferenceInput {
            circumference_cm,
            sex: snapshot.sex,
            bmi: anthropometrics.bmi,
        };
        sections.calf_circumference =
            Section::from_result("calf_circumference", assess_calf_circumference(&input));
    }
    let calf_positive = sections
        .calf_circumference
        .value()
        .is_some_and(|result| result.is_positive());

    if let Some(mut input) = clinician.nrs2002 {
        input.bmi = input.bmi.or(anthropometrics.bmi);
        input.age_years = input.age_years.or(snapshot.age_years);
        sections.nrs2002 = Section::from_result("nrs2002", screen_nrs2002(&input));
    }
    if let Some(input) = clinician.nutric {
        sections.nutric = Section::from_result("nutric", score_nutric(&input));
    }
    if let Some(mut input) = clinician.glim {
        input.bmi = input.bmi.or(anthropometrics.bmi);
        input.age_years = input.age_years.or(snapshot.age_years);
        input.calf_screen_positive |= calf_positive;
        sections.glim = Section::from_result("glim", assess_glim(&input));
    }

    let mut summaries = Vec::new();
    summarize(&sections.nrs2002, &mut summaries);
    summarize(&sections.nutric, &mut summaries);
    summarize(&sections.glim, &mut summaries);
    summarize(&sections.calf_circumference, &mut summaries);
    sections.summaries = summaries;
    sections
}

/// Reference labs for trends: previous snapshot, else the latest history entry with labs
fn reference_labs(request: &AssessmentRequest) -> Option<&LabPanel> {
    request
        .reference
        .as_ref()
        .map(|snapshot| &snapshot.labs)
        .filter(|labs| !labs.is_empty())
        .or_else(|| {
            request
                .history
                .iter()
                .map(|entry| &entry.labs)
                .find(|labs| !labs.is_empty())
        })
}

fn reference_weight(request: &AssessmentRequest) -> Option<WeightObservation> {
    request
        .reference
        .as_ref()
        .and_then(|s| s.weight_kg.map(|w| WeightObservation::new(s.assessed_on, w)))
        .or_else(|| {
            request.history.iter().find_map(|entry| {
                entry
                    .weight_kg
                    .map(|w| WeightObservation::new(entry.assessed_on, w))
            })
        })
}

fn refeeding_risk_input(
    request: &AssessmentRequest,
    anthropometrics: DerivedAnthropometrics,
) -> RefeedingRiskInput {
    let mut input = request.clinician.refeeding_risk.clone().unwrap_or_default();
    input.bmi = input.bmi.or(anthropometrics.bmi);
    if input.labs.is_empty() {
        input.labs = request
            .stored_baseline_labs
            .clone()
            .unwrap_or_else(|| request.current.labs.clone());
    }
    if let Some(weight_kg) = request.current.weight_kg {
        let now = WeightObservation::new(request.current.assessed_on, weight_kg);
        // Gain shows up as a negative loss and is not a risk factor
        let loss_over = |days| {
            weight_loss_percent_over(&request.history, now, days).map(|v| v.max(0.0))
        };
        input.weight_loss_percent_1_month = input
            .weight_loss_percent_1_month
            .or_else(|| loss_over(ONE_MONTH_DAYS));
        input.weight_loss_percent_3_months = input
            .weight_loss_percent_3_months
            .or_else(|| loss_over(THREE_MONTHS_DAYS));
        input.weight_loss_percent_6_months = input
            .weight_loss_percent_6_months
            .or_else(|| loss_over(SIX_MONTHS_DAYS));
    }
    input
}

fn run_refeeding(
    request: &AssessmentRequest,
    anthropometrics: DerivedAnthropometrics,
    config: &EngineConfig,
) -> AppResult<RefeedingSection> {
    let risk_input = refeeding_risk_input(request, anthropometrics);
    let mut workflow = RefeedingWorkflow::new().evaluate_risk(
        &risk_input,
        &config.lab_reference,
        &config.refeeding,
    )?;
    if !request.clinician.symptoms.is_empty() {
        workflow = workflow.record_symptom_review(request.clinician.symptoms.clone())?;
    }

    let stored = request
        .stored_baseline_labs
        .clone()
        .or_else(|| request.reference.as_ref().map(|s| s.labs.clone()))
        .unwrap_or_default();
    let baseline = DiagnosisBaseline::select(stored, &request.history);
    let mut diagnosis_error = None;
    if !baseline.labs().is_empty() && !request.current.labs.is_empty() {
        match workflow.clone().diagnose(
            baseline,
            request.current.labs.clone(),
            request.clinician.temporality_confirmed,
            &config.lab_reference,
            &config.refeeding,
        ) {
            Ok(diagnosed) => workflow = diagnosed,
            Err(error) => {
                warn!(code = ?error.code, message = %error.message, "Refeeding diagnosis skipped");
                diagnosis_error = Some(ErrorDetail::from(error));
            }
        }
    }
    Ok(RefeedingSection {
        stage: workflow.stage(),
        workflow,
        diagnosis_error,
    })
}

fn adequacy_section(request: &AssessmentRequest, config: &EngineConfig) -> Section<IntakeAdequacy> {
    let Some(intake) = request.clinician.intake else {
        return Section::not_requested();
    };
    let goal = request
        .clinician
        .goal
        .or_else(|| latest_nutrition_goal(&request.history));
    Section::from_result(
        "adequacy",
        evaluate_intake(&intake, goal.as_ref(), &config.adequacy),
    )
}

/// Assess one patient occasion
///
/// Never fails as a whole: a section whose inputs are invalid records its
/// error and the remaining sections are still computed.
#[must_use]
pub fn assess(request: &AssessmentRequest, config: &EngineConfig) -> ConsolidatedAssessment {
    let snapshot = &request.current;
    let anthropometrics = derive_for(snapshot);
    let energy = energy_section(request, config);
    let protein = protein_section(request, anthropometrics, config);
    let screening = screening_sections(request, anthropometrics);
    let refeeding = Section::from_result(
        "refeeding",
        run_refeeding(request, anthropometrics, config),
    );

    let lab_trends = reference_labs(request)
        .filter(|_| !snapshot.labs.is_empty())
        .map(|previous| {
            compare_labs(
                previous,
                &snapshot.labs,
                &config.lab_reference,
                &config.trends,
            )
        });
    let weight_trend = match (reference_weight(request), snapshot.weight_kg) {
        (Some(previous), Some(weight_kg)) => Section::from_result(
            "weight_trend",
            compare_weight(
                previous,
                WeightObservation::new(snapshot.assessed_on, weight_kg),
                &config.trends,
            ),
        ),
        _ => Section::not_requested(),
    };

    let adequacy = adequacy_section(request, config);
    let fi_score = request.clinician.fi_score.map_or_else(Section::not_requested, |input| {
        Section::from_result(
            "fi_score",
            score_feeding_intolerance(&input, &config.fi_score),
        )
    });

    let assessment = ConsolidatedAssessment {
        patient_id: snapshot.id.clone(),
        assessed_on: snapshot.assessed_on,
        anthropometrics,
        energy,
        protein,
        screening,
        refeeding,
        lab_trends,
        weight_trend,
        adequacy,
        fi_score,
    };
    debug!(
        patient = %assessment.patient_id,
        failed_sections = assessment.section_errors().len(),
        "Assessment complete"
    );
    assessment
}

/// Assess many independent occasions in parallel
///
/// Output order matches input order.
#[must_use]
pub fn assess_batch(
    requests: &[AssessmentRequest],
    config: &EngineConfig,
) -> Vec<ConsolidatedAssessment> {
    info!(count = requests.len(), "Assessing batch");
    requests
        .par_iter()
        .map(|request| assess(request, config))
        .collect()
}
