//! Section progress tracking.
//!
//! Derives per-section and overall completion counts from the catalog and
//! an answer snapshot. Only required questions that are currently
//! reachable count toward the totals; a question is answered when its
//! stored value is non-empty for its declared shape.

use serde::{Deserialize, Serialize};

use crate::domain::branching;
use crate::domain::catalog::{Catalog, Section};
use crate::domain::foundation::SectionCode;
use crate::domain::run::AnswerSnapshot;

/// Completion counts for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProgress {
    pub section: SectionCode,
    /// Required reachable questions with a non-empty answer.
    pub answered: usize,
    /// Required reachable questions.
    pub required: usize,
    /// `round(100 * answered / required)`; 100 when nothing is required.
    pub percent: u8,
}

impl SectionProgress {
    fn compute(section: &Section, answers: &AnswerSnapshot) -> Self {
        let reachable = branching::reachable_questions(section, answers);
        let required = reachable.iter().filter(|q| q.required).count();
        let answered = reachable
            .iter()
            .filter(|q| q.required && answers.is_answered(&q.code))
            .count();

        Self {
            section: section.code.clone(),
            answered,
            required,
            percent: percent(answered, required),
        }
    }

    /// Returns true if every required reachable question is answered.
    pub fn is_complete(&self) -> bool {
        self.answered == self.required
    }
}

/// Completion counts for a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub sections: Vec<SectionProgress>,
    pub answered: usize,
    pub required: usize,
    pub percent: u8,
}

impl ProgressReport {
    /// Computes progress for every section in catalog order.
    pub fn compute(catalog: &Catalog, answers: &AnswerSnapshot) -> Self {
        let sections: Vec<SectionProgress> = catalog
            .sections()
            .iter()
            .map(|s| SectionProgress::compute(s, answers))
            .collect();

        let answered = sections.iter().map(|s| s.answered).sum();
        let required = sections.iter().map(|s| s.required).sum();

        Self {
            sections,
            answered,
            required,
            percent: percent(answered, required),
        }
    }

    /// Returns one section's progress.
    pub fn section(&self, code: &SectionCode) -> Option<&SectionProgress> {
        self.sections.iter().find(|s| &s.section == code)
    }

    /// Returns true if the run could be submitted right now.
    pub fn is_complete(&self) -> bool {
        self.answered == self.required
    }

    /// Returns the first section that still has unanswered required
    /// questions, in catalog order.
    pub fn first_incomplete(&self) -> Option<&SectionProgress> {
        self.sections.iter().find(|s| !s.is_complete())
    }
}

fn percent(answered: usize, required: usize) -> u8 {
    if required == 0 {
        100
    } else {
        ((answered * 100) / required) as u8
    }
}
