//! Branching conditions attached to questions.
//!
//! A condition gates a question's reachability on the answer to another
//! question. Conditions are admin-authored configuration and are validated
//! once at catalog load; evaluation against live answers lives in
//! `domain::branching`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::foundation::{QuestionCode, SectionCode};

use super::CatalogError;

/// Comparison applied between the referenced answer and `expected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConditionOperator::Equals => "EQUALS",
            ConditionOperator::NotEquals => "NOT_EQUALS",
        };
        write!(f, "{}", s)
    }
}

/// A reachability predicate: `(question, operator, expected)`.
///
/// The referenced question must be answered for the predicate to hold at
/// all; NOT_EQUALS on an unanswered question is false, not true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Code of the question whose answer is inspected.
    pub question: QuestionCode,
    pub operator: ConditionOperator,
    /// Expected value; compared case-sensitively against choice values,
    /// numerically against slider values.
    pub expected: String,
    /// Optional scope restricting the condition to one section's flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionCode>,
}

impl Condition {
    /// Validates this condition against the set of known question codes.
    ///
    /// # Errors
    ///
    /// - `InvalidReference` if the referenced code is absent from `known`
    ///   or the condition references the question it is attached to
    pub fn validate(
        &self,
        owner: &QuestionCode,
        known: &BTreeSet<QuestionCode>,
    ) -> Result<(), CatalogError> {
        if &self.question == owner {
            return Err(CatalogError::InvalidReference {
                question: owner.clone(),
                referenced: self.question.clone(),
                reason: "condition references its own question".to_string(),
            });
        }
        if !known.contains(&self.question) {
            return Err(CatalogError::InvalidReference {
                question: owner.clone(),
                referenced: self.question.clone(),
                reason: "referenced question code does not exist".to_string(),
            });
        }
        Ok(())
    }
}
