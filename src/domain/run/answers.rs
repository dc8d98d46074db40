//! Answer Store - keyed answers with dirty tracking.
//!
//! Holds one answer per question code, shaped by the question's type.
//! The store is owned by exactly one run; readers (branching, progress,
//! scoring, persistence) work from immutable snapshots.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::catalog::{Question, QuestionType};
use crate::domain::foundation::{DimensionCode, QuestionCode};

use super::RunError;

/// A submitted answer, tagged by the shape the question type demands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerValue {
    /// SINGLE_CHOICE / RATING / NPS: one selected option value.
    Choice { value: String },
    /// MULTI_CHOICE: the set of selected option values.
    Choices { values: Vec<String> },
    /// SLIDER: the chosen position.
    Scale { value: f64 },
    /// MULTI_SLIDER: one position per dimension.
    Scales { values: BTreeMap<DimensionCode, f64> },
}

impl AnswerValue {
    /// Short label used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            AnswerValue::Choice { .. } => "choice",
            AnswerValue::Choices { .. } => "choices",
            AnswerValue::Scale { .. } => "scale",
            AnswerValue::Scales { .. } => "scales",
        }
    }

    /// Returns true if this value carries no actual answer for its shape.
    ///
    /// An empty multi-choice selection or an empty dimension map does not
    /// count as answered; neither does a blank choice value.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Choice { value } => value.trim().is_empty(),
            AnswerValue::Choices { values } => values.is_empty(),
            AnswerValue::Scale { .. } => false,
            AnswerValue::Scales { values } => values.is_empty(),
        }
    }
}

/// Immutable copy of the store's contents.
///
/// Taken atomically; persistence and scoring never observe a torn state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSnapshot {
    answers: BTreeMap<QuestionCode, AnswerValue>,
}

impl AnswerSnapshot {
    /// Returns the answer for a question, if any.
    pub fn get(&self, code: &QuestionCode) -> Option<&AnswerValue> {
        self.answers.get(code)
    }

    /// Returns true if the question has a non-empty answer.
    pub fn is_answered(&self, code: &QuestionCode) -> bool {
        self.answers.get(code).is_some_and(|v| !v.is_empty())
    }

    /// Returns the number of stored answers (including empty-shaped ones).
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterates over stored answers in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionCode, &AnswerValue)> {
        self.answers.iter()
    }
}

/// Mutable answer store with dirty tracking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerStore {
    answers: BTreeMap<QuestionCode, AnswerValue>,
    #[serde(skip)]
    dirty: BTreeSet<QuestionCode>,
}

impl AnswerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the answer for a question, returning the
    /// previous value.
    ///
    /// The caller supplies the owning `Question` so the value's shape can
    /// be checked against the declared type; choice values must name a
    /// configured option and scale values must lie within the dimension's
    /// bounds.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` on any shape, option or range violation; the store
    ///   is left unchanged and nothing is marked dirty
    pub fn set(
        &mut self,
        question: &Question,
        value: AnswerValue,
    ) -> Result<Option<AnswerValue>, RunError> {
        Self::check_shape(question, &value)?;

        self.dirty.insert(question.code.clone());
        Ok(self.answers.insert(question.code.clone(), value))
    }

    /// Empties all answers and dirty marks; used on run reset.
    pub fn clear(&mut self) {
        self.answers.clear();
        self.dirty.clear();
    }

    /// Returns an immutable copy for persistence or scoring.
    pub fn snapshot(&self) -> AnswerSnapshot {
        AnswerSnapshot {
            answers: self.answers.clone(),
        }
    }

    /// Returns the answer for a question, if any.
    pub fn get(&self, code: &QuestionCode) -> Option<&AnswerValue> {
        self.answers.get(code)
    }

    /// Returns true if any edits have not been drained yet.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Drains and returns the set of edited question codes.
    pub fn take_dirty(&mut self) -> BTreeSet<QuestionCode> {
        std::mem::take(&mut self.dirty)
    }

    fn check_shape(question: &Question, value: &AnswerValue) -> Result<(), RunError> {
        let mismatch = |reason: String| RunError::TypeMismatch {
            question: question.code.clone(),
            expected: question.question_type.to_string(),
            reason,
        };

        match (question.question_type, value) {
            (
                QuestionType::SingleChoice | QuestionType::Rating | QuestionType::Nps,
                AnswerValue::Choice { value },
            ) => {
                if !value.trim().is_empty() && question.find_option(value).is_none() {
                    return Err(mismatch(format!("'{}' is not a configured option", value)));
                }
            }
            (QuestionType::MultiChoice, AnswerValue::Choices { values }) => {
                for v in values {
                    if question.find_option(v).is_none() {
                        return Err(mismatch(format!("'{}' is not a configured option", v)));
                    }
                }
            }
            (QuestionType::Slider, AnswerValue::Scale { value }) => {
                // SLIDER has exactly one dimension by catalog validation.
                let Some([dim]) = question.dimensions() else {
                    return Err(mismatch("slider has no dimension".to_string()));
                };
                if !(dim.min..=dim.max).contains(value) {
                    return Err(mismatch(format!(
                        "{} is outside [{}, {}]",
                        value, dim.min, dim.max
                    )));
                }
            }
            (QuestionType::MultiSlider, AnswerValue::Scales { values }) => {
                for (code, v) in values {
                    let Some(dim) = question.find_dimension(code) else {
                        return Err(mismatch(format!("unknown dimension '{}'", code)));
                    };
                    if !(dim.min..=dim.max).contains(v) {
                        return Err(mismatch(format!(
                            "dimension '{}' value {} is outside [{}, {}]",
                            code, v, dim.min, dim.max
                        )));
                    }
                }
            }
            (_, other) => {
                return Err(mismatch(format!("got a {} value", other.shape())));
            }
        }
        Ok(())
    }
}
