//! Integration test for the full assessment lifecycle.
//!
//! Wires the engine against the in-memory store and a manual clock and
//! drives one run end to end: start, branching edits, debounced autosave,
//! progress, a rejected incomplete submit, successful submit with scoring,
//! and the cooldown gate on the next run.

use std::sync::Arc;

use impact_compass::adapters::clock::ManualClock;
use impact_compass::adapters::store::InMemoryRunStore;
use impact_compass::application::handlers::{
    GetProgressHandler, GetResultHandler, RecordAnswerCommand, RecordAnswerHandler,
    StartRunCommand, StartRunHandler, SubmitRunHandler,
};
use impact_compass::application::Autosave;
use impact_compass::domain::catalog::{
    Catalog, ChoiceOption, Condition, ConditionOperator, Question, QuestionPayload,
    QuestionType, Section, SliderDimension,
};
use impact_compass::domain::foundation::{
    DimensionCode, QuestionCode, RunStatus, SectionCode, UserId,
};
use impact_compass::domain::run::{AnswerValue, RunError};
use impact_compass::domain::scoring::ScoringPolicy;

// =============================================================================
// Test Infrastructure
// =============================================================================

const COOLDOWN_SECS: u64 = 30 * 24 * 3600;

fn option(label: &str, value: &str, points: f64) -> ChoiceOption {
    ChoiceOption {
        label: label.to_string(),
        value: value.to_string(),
        points,
    }
}

fn qcode(code: &str) -> QuestionCode {
    QuestionCode::new(code).unwrap()
}

/// RISK: a registration gate revealing a follow-up slider.
/// IMPACT: one weighted rating question.
/// RETURN: one single-choice question.
/// FEEDBACK: optional, weight zero.
fn catalog() -> Arc<Catalog> {
    let q_registered = Question {
        code: qcode("q_registered"),
        text: "Is the organization formally registered?".to_string(),
        question_type: QuestionType::SingleChoice,
        required: true,
        weight: 1.0,
        order: 1,
        payload: QuestionPayload::Options(vec![
            option("Yes", "yes", 10.0),
            option("No", "no", 0.0),
        ]),
        conditions: Vec::new(),
    };
    let q_years = Question {
        code: qcode("q_years"),
        text: "Years since registration?".to_string(),
        question_type: QuestionType::Slider,
        required: true,
        weight: 1.0,
        order: 2,
        payload: QuestionPayload::Dimensions(vec![SliderDimension {
            code: DimensionCode::new("years").unwrap(),
            label: "Years".to_string(),
            min: 0.0,
            max: 10.0,
            points_per_unit: 1.0,
            weight: 1.0,
        }]),
        conditions: vec![Condition {
            question: qcode("q_registered"),
            operator: ConditionOperator::Equals,
            expected: "yes".to_string(),
            section: Some(SectionCode::new("RISK").unwrap()),
        }],
    };
    let q_reach = Question {
        code: qcode("q_reach"),
        text: "How many people does the organization reach yearly?".to_string(),
        question_type: QuestionType::Rating,
        required: true,
        weight: 2.0,
        order: 1,
        payload: QuestionPayload::Options(vec![
            option("Under 1k", "under_1k", 2.0),
            option("1k-10k", "mid", 6.0),
            option("Over 10k", "over_10k", 10.0),
        ]),
        conditions: Vec::new(),
    };
    let q_revenue = Question {
        code: qcode("q_revenue"),
        text: "Does the organization have recurring revenue?".to_string(),
        question_type: QuestionType::SingleChoice,
        required: true,
        weight: 1.0,
        order: 1,
        payload: QuestionPayload::Options(vec![
            option("Yes", "yes", 10.0),
            option("No", "no", 0.0),
        ]),
        conditions: Vec::new(),
    };
    let q_feedback = Question {
        code: qcode("q_feedback"),
        text: "Which financing options interest you?".to_string(),
        question_type: QuestionType::MultiChoice,
        required: false,
        weight: 1.0,
        order: 1,
        payload: QuestionPayload::Options(vec![
            option("Grants", "grants", 0.0),
            option("Debt", "debt", 0.0),
            option("Equity", "equity", 0.0),
        ]),
        conditions: Vec::new(),
    };

    Arc::new(
        Catalog::new(vec![
            Section {
                code: SectionCode::new("RISK").unwrap(),
                title: "Risk".to_string(),
                weight: 0.3,
                questions: vec![q_registered, q_years],
            },
            Section {
                code: SectionCode::new("IMPACT").unwrap(),
                title: "Impact".to_string(),
                weight: 0.4,
                questions: vec![q_reach],
            },
            Section {
                code: SectionCode::new("RETURN").unwrap(),
                title: "Return".to_string(),
                weight: 0.3,
                questions: vec![q_revenue],
            },
            Section {
                code: SectionCode::new("FEEDBACK").unwrap(),
                title: "Feedback".to_string(),
                weight: 0.0,
                questions: vec![q_feedback],
            },
        ])
        .unwrap(),
    )
}

struct Engine {
    store: Arc<InMemoryRunStore>,
    clock: Arc<ManualClock>,
    autosave: Arc<Autosave>,
    start: StartRunHandler,
    record: RecordAnswerHandler,
    submit: SubmitRunHandler,
    progress: GetProgressHandler,
    result: GetResultHandler,
}

fn engine() -> Engine {
    let catalog = catalog();
    let store = Arc::new(InMemoryRunStore::new());
    let clock = Arc::new(ManualClock::at_unix_secs(1_700_000_000));
    let autosave = Arc::new(Autosave::new(store.clone(), clock.clone(), 500));

    Engine {
        start: StartRunHandler::new(store.clone(), clock.clone()),
        record: RecordAnswerHandler::new(catalog.clone(), autosave.clone(), clock.clone()),
        submit: SubmitRunHandler::new(
            catalog.clone(),
            store.clone(),
            autosave.clone(),
            clock.clone(),
            ScoringPolicy::default(),
            COOLDOWN_SECS,
        ),
        progress: GetProgressHandler::new(catalog.clone(), store.clone()),
        result: GetResultHandler::new(store.clone()),
        store,
        clock,
        autosave,
    }
}

fn user() -> UserId {
    UserId::new("org-acme").unwrap()
}

fn choice(value: &str) -> AnswerValue {
    AnswerValue::Choice {
        value: value.to_string(),
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn full_run_lifecycle() {
    let engine = engine();

    // Start a run.
    let mut run = engine
        .start
        .handle(StartRunCommand { user_id: user() })
        .await
        .unwrap();
    assert_eq!(run.status(), RunStatus::Draft);

    // Before answering, the RISK follow-up is unreachable: 3 required.
    let report = engine.progress.handle(run.id()).await.unwrap();
    assert_eq!(report.required, 3);
    assert_eq!(report.percent, 0);

    // Answering the gate question reveals the follow-up slider.
    let report = engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_registered"),
                value: choice("yes"),
            },
        )
        .unwrap();
    assert_eq!(report.required, 4);
    assert_eq!(report.answered, 1);

    // Two quick slider edits coalesce into one autosave batch carrying
    // the latest value.
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_years"),
                value: AnswerValue::Scale { value: 3.0 },
            },
        )
        .unwrap();
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_years"),
                value: AnswerValue::Scale { value: 6.0 },
            },
        )
        .unwrap();

    engine.clock.advance_millis(499);
    assert!(!engine.autosave.fire_due().await.unwrap());
    engine.clock.advance_millis(1);
    assert!(engine.autosave.fire_due().await.unwrap());
    assert_eq!(engine.store.save_call_count(), 1);
    let batch = engine.store.last_batch(run.id()).await.unwrap();
    assert_eq!(
        batch.get(&qcode("q_years")),
        Some(&AnswerValue::Scale { value: 6.0 })
    );

    // Submitting with IMPACT and RETURN unanswered is rejected with the
    // missing codes, and nothing further reaches the store.
    let saves_before = engine.store.save_call_count();
    let err = engine.submit.handle(&mut run).await.unwrap_err();
    match err {
        RunError::IncompleteSubmission { missing } => {
            let codes: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
            assert_eq!(codes, vec!["q_reach", "q_revenue"]);
        }
        other => panic!("Expected IncompleteSubmission, got {:?}", other),
    }
    assert_eq!(engine.store.save_call_count(), saves_before);
    assert_eq!(run.status(), RunStatus::Draft);

    // Finish the required questions; the optional FEEDBACK multi-choice
    // stays open.
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_reach"),
                value: choice("mid"),
            },
        )
        .unwrap();
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_revenue"),
                value: choice("no"),
            },
        )
        .unwrap();
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_feedback"),
                value: AnswerValue::Choices {
                    values: vec!["grants".to_string()],
                },
            },
        )
        .unwrap();

    let report = engine.progress.handle(run.id()).await.unwrap();
    assert_eq!(report.answered, 4);
    assert_eq!(report.required, 4);
    assert!(report.is_complete());

    // Submit: the pending autosave batch is flushed first, then the run
    // is scored and parked in cooldown.
    let result = engine.submit.handle(&mut run).await.unwrap();
    assert_eq!(run.status(), RunStatus::Cooldown);
    assert!(!engine.autosave.has_pending());

    // RISK: (10 + 6) of (10 + 10) => 80; IMPACT: 12/20 => 60;
    // RETURN: 0/10 => 0; FEEDBACK unscored.
    let risk = result.section(&SectionCode::new("RISK").unwrap()).unwrap();
    assert_eq!(risk.normalized.value(), 80.0);
    let impact = result
        .section(&SectionCode::new("IMPACT").unwrap())
        .unwrap();
    assert_eq!(impact.normalized.value(), 60.0);
    let ret = result
        .section(&SectionCode::new("RETURN").unwrap())
        .unwrap();
    assert_eq!(ret.normalized.value(), 0.0);

    // Overall: 80*0.3 + 60*0.4 + 0*0.3 = 48; eligible at threshold 10.
    assert!((result.overall.value() - 48.0).abs() < 1e-9);
    assert!(result.eligible);

    // RISK 80 blocks grant and debt rules; RETURN 0 blocks equity.
    assert_eq!(result.instrument, "Mezzanine Financing");

    // The result is retrievable and stable.
    let fetched = engine.result.handle(run.id()).await.unwrap();
    assert_eq!(fetched, result);

    // A new run is blocked during cooldown and allowed after it.
    let blocked = engine
        .start
        .handle(StartRunCommand { user_id: user() })
        .await;
    assert!(matches!(blocked, Err(RunError::CooldownActive { .. })));

    engine.clock.advance_secs(COOLDOWN_SECS + 1);
    let next = engine
        .start
        .handle(StartRunCommand { user_id: user() })
        .await;
    assert!(next.is_ok());
}

#[tokio::test]
async fn grant_funding_profile_is_recommended() {
    let engine = engine();
    let mut run = engine
        .start
        .handle(StartRunCommand { user_id: user() })
        .await
        .unwrap();

    // Low risk (unregistered), high impact, no revenue:
    // RISK 0, IMPACT 100, RETURN 0 => Grant Funding.
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_registered"),
                value: choice("no"),
            },
        )
        .unwrap();
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_reach"),
                value: choice("over_10k"),
            },
        )
        .unwrap();
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_revenue"),
                value: choice("no"),
            },
        )
        .unwrap();

    let result = engine.submit.handle(&mut run).await.unwrap();
    assert_eq!(result.instrument, "Grant Funding");
    // 0*0.3 + 100*0.4 + 0*0.3 = 40
    assert!((result.overall.value() - 40.0).abs() < 1e-9);
}

#[tokio::test]
async fn hidden_branch_answers_survive_toggling() {
    let engine = engine();
    let mut run = engine
        .start
        .handle(StartRunCommand { user_id: user() })
        .await
        .unwrap();

    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_registered"),
                value: choice("yes"),
            },
        )
        .unwrap();
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_years"),
                value: AnswerValue::Scale { value: 8.0 },
            },
        )
        .unwrap();

    // Toggle the gate off: the follow-up stops being required but its
    // answer is preserved.
    let report = engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_registered"),
                value: choice("no"),
            },
        )
        .unwrap();
    assert_eq!(report.required, 3);
    assert!(run.snapshot().is_answered(&qcode("q_years")));

    // Toggle back on: the stored answer counts again immediately.
    let report = engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_registered"),
                value: choice("yes"),
            },
        )
        .unwrap();
    assert_eq!(report.required, 4);
    assert_eq!(report.answered, 2);
}

#[tokio::test]
async fn failed_autosave_is_surfaced_and_recovered_by_next_edit() {
    let engine = engine();
    let mut run = engine
        .start
        .handle(StartRunCommand { user_id: user() })
        .await
        .unwrap();

    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_registered"),
                value: choice("yes"),
            },
        )
        .unwrap();

    engine.store.fail_saves(true);
    engine.clock.advance_millis(500);
    let err = engine.autosave.fire_due().await.unwrap_err();
    assert!(matches!(err, RunError::SaveFailed { .. }));

    // No automatic retry: nothing pending until the next edit re-stages.
    assert!(!engine.autosave.has_pending());

    engine.store.fail_saves(false);
    engine
        .record
        .handle(
            &mut run,
            RecordAnswerCommand {
                question: qcode("q_revenue"),
                value: choice("yes"),
            },
        )
        .unwrap();
    engine.clock.advance_millis(500);
    assert!(engine.autosave.fire_due().await.unwrap());
    let batch = engine.store.last_batch(run.id()).await.unwrap();
    assert!(batch.is_answered(&qcode("q_registered")));
    assert!(batch.is_answered(&qcode("q_revenue")));
}
