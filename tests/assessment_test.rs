// ABOUTME: Integration tests for the consolidated assessment pipeline and parallel batches
// ABOUTME: Section isolation, reference selection from history, and refeeding workflow staging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use clinutri::adequacy::{ActualIntake, AdequacyBand};
use clinutri::assessment::ClinicianInputs;
use clinutri::energy::Formula;
use clinutri::fi_score::FiScoreInput;
use clinutri::models::{Analyte, AssessmentKind, Sex};
use clinutri::refeeding::{
    DiagnosisLabel, DiagnosticAnalyte, RefeedingStage, RiskLevel, Severity, Symptom,
    SymptomChecklist,
};
use clinutri::screening::{GlimDiagnosis, GlimInput, Nrs2002Input};
use clinutri::trends::{ConcernLevel, WeightWarning};
use clinutri::{assess, assess_batch, AssessmentRequest, EngineConfig, ErrorCode};

fn follow_up_request() -> AssessmentRequest {
    let current = common::adult_male()
        .with_weight(67.0)
        .with_labs(common::electrolytes(3.2, 2.0, 1.6));

    let mut previous = common::history_entry(7, AssessmentKind::FollowUp, Some(70.0));
    previous.labs = common::electrolytes(4.0, 3.0, 2.0);
    let mut initial = common::history_entry(14, AssessmentKind::Initial, Some(71.0));
    initial.goal = Some(common::goal(1800.0, 84.0));

    let symptoms = SymptomChecklist::new()
        .check(DiagnosticAnalyte::Potassium, Symptom::Arrhythmia)
        .unwrap();
    let clinician = ClinicianInputs {
        symptoms,
        temporality_confirmed: Some(true),
        intake: Some(ActualIntake::enteral(1500.0, 80.0)),
        fi_score: Some(FiScoreInput::default()),
        ..ClinicianInputs::default()
    };

    AssessmentRequest::new(current)
        .with_history(vec![previous, initial])
        .with_clinician(clinician)
}

#[test]
fn test_full_pipeline_on_follow_up() {
    common::init_test_logging();
    let result = assess(&follow_up_request(), &EngineConfig::default());

    assert_eq!(result.patient_id.as_str(), "patient-001");
    assert_eq!(result.assessed_on, common::today());
    assert!((result.anthropometrics.bmi.unwrap() - 21.88).abs() < 0.01);

    let mifflin = result.energy.result(Formula::MifflinStJeor).unwrap();
    assert!((mifflin.basal_kcal.unwrap() - 1619.0).abs() < f64::EPSILON);
    assert!(result.protein.value().is_some());

    assert!(result.section_errors().is_empty());
}

#[test]
fn test_refeeding_confirmed_against_previous_follow_up() {
    let result = assess(&follow_up_request(), &EngineConfig::default());
    let refeeding = result.refeeding.value().unwrap();

    assert_eq!(refeeding.stage, RefeedingStage::DiagnosisConfirmed);
    assert_eq!(
        refeeding.workflow.risk().unwrap().level,
        RiskLevel::Significant
    );
    let diagnosis = refeeding.workflow.diagnosis().unwrap();
    assert!(diagnosis.baseline_from_follow_up);
    assert_eq!(
        diagnosis.label,
        DiagnosisLabel::RefeedingSyndrome(Severity::Severe)
    );
}

#[test]
fn test_trends_use_history_when_no_reference_snapshot() {
    let result = assess(&follow_up_request(), &EngineConfig::default());

    let labs = result.lab_trends.as_ref().unwrap();
    assert_eq!(
        labs.change(Analyte::Potassium).unwrap().concern,
        Some(ConcernLevel::Critical)
    );
    assert!(labs.has_significant_change);

    let weight = result.weight_trend.value().unwrap();
    assert_eq!(weight.warning, Some(WeightWarning::RapidLoss));
}

#[test]
fn test_adequacy_uses_latest_goal_from_history() {
    let result = assess(&follow_up_request(), &EngineConfig::default());
    let adequacy = result.adequacy.value().unwrap();

    assert_eq!(adequacy.calories.goal, Some(1800.0));
    assert_eq!(adequacy.calories.band, AdequacyBand::SlightlyLow);
    assert_eq!(adequacy.protein.band, AdequacyBand::GoalMet);
    assert_eq!(result.fi_score.value().unwrap().total, 0);
}

#[test]
fn test_reference_snapshot_takes_priority_for_trends() {
    let reference = common::adult_male()
        .with_weight(68.0)
        .with_labs(common::potassium(3.3));
    let request = follow_up_request().with_reference(reference);

    let result = assess(&request, &EngineConfig::default());
    let potassium = result
        .lab_trends
        .as_ref()
        .unwrap()
        .change(Analyte::Potassium)
        .unwrap();
    assert!((potassium.previous.unwrap() - 3.3).abs() < f64::EPSILON);
    // Same-day reference weight has no velocity
    assert!(result.weight_trend.value().unwrap().kg_per_week.is_none());
}

#[test]
fn test_failing_sections_do_not_abort_siblings() {
    let clinician = ClinicianInputs {
        nrs2002: Some(Nrs2002Input {
            intake_percent_of_needs: Some(-10.0),
            ..Nrs2002Input::default()
        }),
        fi_score: Some(FiScoreInput {
            gastric_residual_ml: Some(-1.0),
            ..FiScoreInput::default()
        }),
        ..ClinicianInputs::default()
    };
    let request = AssessmentRequest::new(common::adult_male()).with_clinician(clinician);
    let result = assess(&request, &EngineConfig::default());

    assert!(result.screening.nrs2002.is_error());
    assert!(result.fi_score.is_error());
    assert!(result.protein.value().is_some());
    assert!(result.refeeding.value().is_some());
    assert_eq!(result.section_errors().len(), 2);
    assert!(result
        .section_errors()
        .iter()
        .all(|e| e.code == ErrorCode::InvalidInput));
}

#[test]
fn test_missing_weight_fails_weight_dependent_sections_only() {
    let mut snapshot = common::adult_male();
    snapshot.weight_kg = None;
    let result = assess(&AssessmentRequest::new(snapshot), &EngineConfig::default());

    assert!(result.anthropometrics.bmi.is_none());
    assert!(result.protein.is_error());
    assert!(result
        .energy
        .result(Formula::MifflinStJeor)
        .unwrap()
        .error
        .is_some());
    assert!(result.refeeding.value().is_some());
    assert!(!result.weight_trend.is_error());
}

#[test]
fn test_risk_only_workflow_without_labs() {
    let result = assess(
        &AssessmentRequest::new(common::adult_male()),
        &EngineConfig::default(),
    );
    let refeeding = result.refeeding.value().unwrap();
    assert_eq!(refeeding.stage, RefeedingStage::RiskEvaluated);
    assert_eq!(refeeding.workflow.risk().unwrap().level, RiskLevel::Low);
    assert!(result.lab_trends.is_none());
    assert!(result.adequacy.value().is_none());
    assert!(!result.adequacy.is_error());
}

#[test]
fn test_calf_circumference_feeds_glim() {
    let clinician = ClinicianInputs {
        calf_circumference_cm: Some(30.0),
        glim: Some(GlimInput {
            inflammation: true,
            ..GlimInput::default()
        }),
        ..ClinicianInputs::default()
    };
    let request = AssessmentRequest::new(common::adult_male()).with_clinician(clinician);
    let result = assess(&request, &EngineConfig::default());

    assert!(
        result
            .screening
            .calf_circumference
            .value()
            .unwrap()
            .reduced_muscle_mass
    );
    assert_eq!(
        result.screening.glim.value().unwrap().diagnosis,
        GlimDiagnosis::Stage1Moderate
    );
    assert_eq!(result.screening.summaries.len(), 2);
}

#[test]
fn test_batch_preserves_order_and_matches_sequential() {
    let requests: Vec<AssessmentRequest> = (0..12)
        .map(|i| {
            let sex = if i % 2 == 0 { Sex::Male } else { Sex::Female };
            let snapshot = common::snapshot(
                &format!("patient-{i:03}"),
                sex,
                55.0 + f64::from(i),
                160.0 + f64::from(i),
            );
            AssessmentRequest::new(snapshot)
        })
        .collect();
    let config = EngineConfig::default();

    let batch = assess_batch(&requests, &config);
    assert_eq!(batch.len(), requests.len());
    for (request, result) in requests.iter().zip(&batch) {
        assert_eq!(result.patient_id, request.current.id);
        assert_eq!(result, &assess(request, &config));
    }
}

#[test]
fn test_invalid_current_lab_keeps_refeeding_risk() {
    // BMI 14.7 with a valid stored baseline but an impossible current value
    let current = common::snapshot("patient-rf", Sex::Female, 42.5, 170.0)
        .with_labs(common::potassium(-1.0));
    let request = AssessmentRequest::new(current).with_stored_baseline(common::potassium(4.0));

    let result = assess(&request, &EngineConfig::default());
    assert!(!result.refeeding.is_error());

    let refeeding = result.refeeding.value().unwrap();
    assert_eq!(refeeding.stage, RefeedingStage::RiskEvaluated);
    assert_eq!(
        refeeding.workflow.risk().unwrap().level,
        RiskLevel::Significant
    );
    assert!(refeeding.workflow.diagnosis().is_none());

    let error = refeeding.diagnosis_error.as_ref().unwrap();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.field.as_deref(), Some("potassium"));
    assert_eq!(result.section_errors(), vec![error]);
}

#[test]
fn test_request_with_atypical_symptom_is_rejected() {
    let json = r#"{
        "current": {"id": "p", "assessed_on": "2025-03-15", "sex": "male"},
        "clinician": {"symptoms": {"potassium": ["ataxia"]}}
    }"#;
    assert!(serde_json::from_str::<AssessmentRequest>(json).is_err());
}
