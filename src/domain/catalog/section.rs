//! Section model - a weighted grouping of questions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SectionCode;

use super::Question;

/// Well-known section codes used by the scoring dimensions.
pub const RISK: &str = "RISK";
pub const IMPACT: &str = "IMPACT";
pub const RETURN: &str = "RETURN";
pub const SECTOR_MATURITY: &str = "SECTOR_MATURITY";
pub const FEEDBACK: &str = "FEEDBACK";

/// A weighted grouping of questions (e.g. RISK, IMPACT, RETURN).
///
/// `weight` is this section's fixed fraction of the overall score; the
/// weights of all sections in a catalog sum to 1.0 (FEEDBACK-style sections
/// carry weight 0.0 and never influence the overall score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub code: SectionCode,
    pub title: String,
    /// Fraction of the overall score contributed by this section.
    pub weight: f64,
    /// Questions in authoring order; sorted by `order` at catalog load.
    pub questions: Vec<Question>,
}

impl Section {
    /// Returns the question count.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Returns true if this section contributes to the overall score.
    pub fn is_scored(&self) -> bool {
        self.weight > 0.0
    }
}
