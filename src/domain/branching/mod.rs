//! Branching evaluator - which questions are reachable now.
//!
//! Reachability is a pure function of the catalog and an answer snapshot.
//! Evaluation never mutates answers: hiding a question by changing an
//! upstream answer leaves its stored answer in place, it simply stops
//! counting as required or answered until re-reached.

use crate::domain::catalog::{Catalog, Condition, ConditionOperator, Question, Section};
use crate::domain::foundation::QuestionCode;
use crate::domain::run::{AnswerSnapshot, AnswerValue};

/// Returns true if a single condition holds against the current answers.
///
/// The referenced question must have a non-empty answer; comparison is a
/// case-sensitive exact value match (numeric equality for slider answers,
/// any-selected-value for multi-choice answers).
pub fn condition_holds(condition: &Condition, answers: &AnswerSnapshot) -> bool {
    let Some(answer) = answers.get(&condition.question) else {
        return false;
    };
    if answer.is_empty() {
        return false;
    }

    let matches = match answer {
        AnswerValue::Choice { value } => value == &condition.expected,
        AnswerValue::Choices { values } => values.iter().any(|v| v == &condition.expected),
        AnswerValue::Scale { value } => condition
            .expected
            .parse::<f64>()
            .map(|expected| expected == *value)
            .unwrap_or(false),
        // Catalog validation rejects conditions on MULTI_SLIDER questions.
        AnswerValue::Scales { .. } => false,
    };

    match condition.operator {
        ConditionOperator::Equals => matches,
        ConditionOperator::NotEquals => !matches,
    }
}

/// Returns true if the question is currently reachable.
///
/// No conditions means always reachable; otherwise reachable if ANY
/// condition holds (conditions on one question are OR-ed).
pub fn is_reachable(question: &Question, answers: &AnswerSnapshot) -> bool {
    question.conditions.is_empty()
        || question
            .conditions
            .iter()
            .any(|c| condition_holds(c, answers))
}

/// Returns the section's reachable questions, in `order`.
pub fn reachable_questions<'a>(
    section: &'a Section,
    answers: &AnswerSnapshot,
) -> Vec<&'a Question> {
    section
        .questions
        .iter()
        .filter(|q| is_reachable(q, answers))
        .collect()
}

/// Returns the codes of required, reachable questions without a non-empty
/// answer, across the whole catalog in section/order sequence.
///
/// An empty result means the run is complete enough to submit.
pub fn missing_required(catalog: &Catalog, answers: &AnswerSnapshot) -> Vec<QuestionCode> {
    catalog
        .sections()
        .iter()
        .flat_map(|section| reachable_questions(section, answers))
        .filter(|q| q.required && !answers.is_answered(&q.code))
        .map(|q| q.code.clone())
        .collect()
}
