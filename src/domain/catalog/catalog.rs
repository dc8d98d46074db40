//! Catalog aggregate - the validated question/section/condition model.
//!
//! A `Catalog` is built once from admin-authored configuration and is
//! read-only afterwards. Construction runs every structural invariant, so
//! the rest of the engine can assume a well-formed model.

use std::collections::{BTreeSet, HashMap};

use crate::domain::foundation::{QuestionCode, SectionCode};

use super::{CatalogError, Question, QuestionPayload, QuestionType, Section};

/// Tolerance when checking that section weights sum to 1.0.
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// The validated assessment catalog.
///
/// # Invariants
///
/// - at least one section; section and question codes unique
/// - question `order` unique within each section; questions held sorted
/// - payload shape matches the question type
/// - option points, dimension rates and weights non-negative; `min < max`
/// - conditions reference existing, non-self, non-MULTI_SLIDER questions
/// - section weights sum to 1.0
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Section>,
    index: HashMap<QuestionCode, (usize, usize)>,
}

impl Catalog {
    /// Builds and validates a catalog from its sections.
    ///
    /// Questions are sorted by `order` within each section.
    ///
    /// # Errors
    ///
    /// Any violated invariant from the list above, as a `CatalogError`
    /// naming the offending code.
    pub fn new(mut sections: Vec<Section>) -> Result<Self, CatalogError> {
        if sections.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut section_codes: BTreeSet<SectionCode> = BTreeSet::new();
        for section in &sections {
            if !section_codes.insert(section.code.clone()) {
                return Err(CatalogError::DuplicateSectionCode(section.code.clone()));
            }
        }

        let weight_sum: f64 = sections.iter().map(|s| s.weight).sum();
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(CatalogError::WeightSumMismatch { actual: weight_sum });
        }

        for section in &mut sections {
            let mut orders: BTreeSet<u32> = BTreeSet::new();
            for question in &section.questions {
                if !orders.insert(question.order) {
                    return Err(CatalogError::DuplicateOrder {
                        section: section.code.clone(),
                        order: question.order,
                    });
                }
            }
            section.questions.sort_by_key(|q| q.order);
        }

        let mut index: HashMap<QuestionCode, (usize, usize)> = HashMap::new();
        for (si, section) in sections.iter().enumerate() {
            for (qi, question) in section.questions.iter().enumerate() {
                if index.insert(question.code.clone(), (si, qi)).is_some() {
                    return Err(CatalogError::DuplicateQuestionCode(question.code.clone()));
                }
                Self::validate_payload(question)?;
            }
        }

        let known: BTreeSet<QuestionCode> = index.keys().cloned().collect();
        for section in &sections {
            for question in &section.questions {
                for condition in &question.conditions {
                    condition.validate(&question.code, &known)?;

                    let (rsi, rqi) = index[&condition.question];
                    let referenced = &sections[rsi].questions[rqi];
                    if referenced.question_type == QuestionType::MultiSlider {
                        return Err(CatalogError::InvalidReference {
                            question: question.code.clone(),
                            referenced: condition.question.clone(),
                            reason: "MULTI_SLIDER answers have no single value to compare"
                                .to_string(),
                        });
                    }
                }
            }
        }

        Ok(Self { sections, index })
    }

    fn validate_payload(question: &Question) -> Result<(), CatalogError> {
        let mismatch = |payload: &str| CatalogError::PayloadMismatch {
            question: question.code.clone(),
            question_type: question.question_type.to_string(),
            payload: payload.to_string(),
        };
        let invalid = |reason: &str| CatalogError::InvalidPayload {
            question: question.code.clone(),
            reason: reason.to_string(),
        };

        if question.weight < 0.0 {
            return Err(invalid("question weight must be non-negative"));
        }

        match &question.payload {
            QuestionPayload::Options(options) => {
                if !question.question_type.is_choice() {
                    return Err(mismatch("options"));
                }
                if options.is_empty() {
                    return Err(invalid("choice question has no options"));
                }
                if options.iter().any(|o| o.points < 0.0) {
                    return Err(invalid("option points must be non-negative"));
                }
                let mut values: BTreeSet<&str> = BTreeSet::new();
                if !options.iter().all(|o| values.insert(o.value.as_str())) {
                    return Err(invalid("option values must be unique"));
                }
            }
            QuestionPayload::Dimensions(dimensions) => {
                if !question.question_type.is_scale() {
                    return Err(mismatch("dimensions"));
                }
                if dimensions.is_empty() {
                    return Err(invalid("slider question has no dimensions"));
                }
                if question.question_type == QuestionType::Slider && dimensions.len() != 1 {
                    return Err(invalid("SLIDER must have exactly one dimension"));
                }
                for d in dimensions {
                    if d.min >= d.max {
                        return Err(invalid("dimension min must be below max"));
                    }
                    if d.points_per_unit < 0.0 || d.weight < 0.0 {
                        return Err(invalid(
                            "dimension rate and weight must be non-negative",
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns all sections in catalog order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Looks up a section by code.
    pub fn section(&self, code: &SectionCode) -> Option<&Section> {
        self.sections.iter().find(|s| &s.code == code)
    }

    /// Looks up a question by code, along with its owning section.
    pub fn question(&self, code: &QuestionCode) -> Option<(&Section, &Question)> {
        let (si, qi) = *self.index.get(code)?;
        Some((&self.sections[si], &self.sections[si].questions[qi]))
    }

    /// Returns the total question count across all sections.
    pub fn question_count(&self) -> usize {
        self.index.len()
    }
}
