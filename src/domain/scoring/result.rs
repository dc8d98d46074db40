//! Assessment result - the immutable scoring read model.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RunId, Score, SectionCode, Timestamp};

/// Scores for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section: SectionCode,
    /// Weighted points earned by answered reachable questions.
    pub raw_points: f64,
    /// Theoretical maximum over reachable required questions.
    pub max_points: f64,
    /// `raw_points` scaled to 0-100 against `max_points`.
    pub normalized: Score,
    /// This section's fraction of the overall score.
    pub weight: f64,
}

/// The outcome of scoring a submitted run.
///
/// Immutable once computed; a new value is produced only by re-running
/// the aggregator against the same submitted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub run_id: RunId,
    pub computed_at: Timestamp,
    pub sections: Vec<SectionScore>,
    /// Weighted sum of normalized section scores.
    pub overall: Score,
    /// True when `overall` meets the eligibility threshold (inclusive).
    pub eligible: bool,
    /// Recommended financing instrument label.
    pub instrument: String,
}

impl AssessmentResult {
    /// Returns one section's scores.
    pub fn section(&self, code: &SectionCode) -> Option<&SectionScore> {
        self.sections.iter().find(|s| &s.section == code)
    }
}
