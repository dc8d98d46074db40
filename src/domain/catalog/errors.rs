//! Catalog configuration errors.
//!
//! All variants are detected once at catalog load and are fatal: a catalog
//! that fails validation never reaches the engine.

use thiserror::Error;

use crate::domain::foundation::{QuestionCode, SectionCode};

/// Errors raised while validating an admin-authored catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Condition on '{question}' references '{referenced}': {reason}")]
    InvalidReference {
        question: QuestionCode,
        referenced: QuestionCode,
        reason: String,
    },

    #[error("Question code '{0}' appears more than once in the catalog")]
    DuplicateQuestionCode(QuestionCode),

    #[error("Section code '{0}' appears more than once in the catalog")]
    DuplicateSectionCode(SectionCode),

    #[error("Section '{section}' has two questions with order {order}")]
    DuplicateOrder { section: SectionCode, order: u32 },

    #[error("Section weights sum to {actual}, expected 1.0")]
    WeightSumMismatch { actual: f64 },

    #[error("Question '{question}' is {question_type} but its payload is {payload}")]
    PayloadMismatch {
        question: QuestionCode,
        question_type: String,
        payload: String,
    },

    #[error("Question '{question}': {reason}")]
    InvalidPayload {
        question: QuestionCode,
        reason: String,
    },

    #[error("Catalog has no sections")]
    Empty,
}
