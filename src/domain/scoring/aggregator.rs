//! Scoring aggregator - answers in, weighted result out.
//!
//! Reads a snapshot of a completed run and the catalog; never mutates
//! either. Scoring fails loudly when a required reachable question lacks
//! an answer instead of defaulting it to zero.

use crate::domain::branching;
use crate::domain::catalog::{Catalog, Question, QuestionType, Section};
use crate::domain::foundation::{RunId, Score, SectionCode, Timestamp};
use crate::domain::run::{AnswerSnapshot, AnswerValue, RunError};

use super::{instrument, AssessmentResult, SectionScore};

/// Tunable scoring policy, supplied by configuration.
#[derive(Debug, Clone)]
pub struct ScoringPolicy {
    /// Inclusive overall-score threshold for eligibility.
    pub eligibility_threshold: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            eligibility_threshold: 10.0,
        }
    }
}

/// Scores a run's answers against the catalog.
///
/// # Errors
///
/// - `IncompleteSubmission` naming every required reachable question
///   without a non-empty answer; the check runs before any arithmetic
/// - `TypeMismatch` if a stored answer no longer fits its question (a
///   reconstituted run scored against an edited catalog)
pub fn score_run(
    catalog: &Catalog,
    answers: &AnswerSnapshot,
    policy: &ScoringPolicy,
    run_id: RunId,
    now: Timestamp,
) -> Result<AssessmentResult, RunError> {
    let missing = branching::missing_required(catalog, answers);
    if !missing.is_empty() {
        return Err(RunError::IncompleteSubmission { missing });
    }

    let mut sections = Vec::with_capacity(catalog.sections().len());
    for section in catalog.sections() {
        sections.push(score_section(section, answers)?);
    }

    let overall = Score::new(
        sections
            .iter()
            .map(|s| s.normalized.value() * s.weight)
            .sum(),
    );

    let normalized: Vec<(SectionCode, Score)> = sections
        .iter()
        .map(|s| (s.section.clone(), s.normalized))
        .collect();

    Ok(AssessmentResult {
        run_id,
        computed_at: now,
        eligible: overall.meets(policy.eligibility_threshold),
        instrument: instrument::recommend(&normalized).to_string(),
        sections,
        overall,
    })
}

fn score_section(
    section: &Section,
    answers: &AnswerSnapshot,
) -> Result<SectionScore, RunError> {
    let reachable = branching::reachable_questions(section, answers);

    let mut raw_points = 0.0;
    let mut max_points = 0.0;
    for question in &reachable {
        if question.required {
            max_points += question.weight * question.max_points();
        }
        if let Some(answer) = answers.get(&question.code) {
            if !answer.is_empty() {
                raw_points += question.weight * question_points(question, answer)?;
            }
        }
    }

    // Answered optional questions can push raw past the required-only
    // maximum; the normalized score is capped at 100.
    let normalized = if max_points > 0.0 {
        Score::new(100.0 * raw_points / max_points)
    } else {
        Score::ZERO
    };

    Ok(SectionScore {
        section: section.code.clone(),
        raw_points,
        max_points,
        normalized,
        weight: section.weight,
    })
}

/// Raw points for one answered question, before the question weight.
fn question_points(question: &Question, answer: &AnswerValue) -> Result<f64, RunError> {
    let mismatch = |reason: String| RunError::TypeMismatch {
        question: question.code.clone(),
        expected: question.question_type.to_string(),
        reason,
    };

    match (question.question_type, answer) {
        (
            QuestionType::SingleChoice | QuestionType::Rating | QuestionType::Nps,
            AnswerValue::Choice { value },
        ) => question
            .find_option(value)
            .map(|o| o.points)
            .ok_or_else(|| mismatch(format!("'{}' is not a configured option", value))),
        (QuestionType::MultiChoice, AnswerValue::Choices { values }) => {
            let mut points = 0.0;
            for value in values {
                points += question
                    .find_option(value)
                    .map(|o| o.points)
                    .ok_or_else(|| mismatch(format!("'{}' is not a configured option", value)))?;
            }
            Ok(points)
        }
        (QuestionType::Slider, AnswerValue::Scale { value }) => {
            let Some([dim]) = question.dimensions() else {
                return Err(mismatch("slider has no dimension".to_string()));
            };
            Ok(dim.weight * dim.points_per_unit * (value - dim.min))
        }
        (QuestionType::MultiSlider, AnswerValue::Scales { values }) => {
            let mut points = 0.0;
            for (code, value) in values {
                let dim = question
                    .find_dimension(code)
                    .ok_or_else(|| mismatch(format!("unknown dimension '{}'", code)))?;
                points += dim.weight * dim.points_per_unit * (value - dim.min);
            }
            Ok(points)
        }
        (_, other) => Err(mismatch(format!("got a {} value", other.shape()))),
    }
}
