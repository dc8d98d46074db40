//! Instrument recommendation - an ordered decision table over score bands.
//!
//! Rules are evaluated top to bottom against the normalized RISK, IMPACT
//! and RETURN section scores; the first rule whose bands all hold wins.
//! The final rule has no bands and always matches.

use once_cell::sync::Lazy;

use crate::domain::catalog::{IMPACT, RETURN, RISK};
use crate::domain::foundation::{Score, SectionCode};

/// One banded constraint on a scoring dimension.
#[derive(Debug, Clone, Copy)]
pub enum Band {
    /// Dimension score strictly below the bound.
    Below(&'static str, f64),
    /// Dimension score strictly above the bound.
    Above(&'static str, f64),
}

impl Band {
    fn holds(&self, lookup: &dyn Fn(&str) -> f64) -> bool {
        match self {
            Band::Below(dimension, bound) => lookup(dimension) < *bound,
            Band::Above(dimension, bound) => lookup(dimension) > *bound,
        }
    }
}

/// One row of the decision table.
#[derive(Debug, Clone)]
pub struct InstrumentRule {
    pub label: &'static str,
    pub bands: Vec<Band>,
}

/// The built-in decision table, in evaluation order.
pub static INSTRUMENT_RULES: Lazy<Vec<InstrumentRule>> = Lazy::new(|| {
    vec![
        InstrumentRule {
            label: "Grant Funding",
            bands: vec![
                Band::Below(RISK, 10.0),
                Band::Above(IMPACT, 50.0),
                Band::Below(RETURN, 30.0),
            ],
        },
        InstrumentRule {
            label: "Commercial Debt with Impact Linked Financing",
            bands: vec![Band::Below(RISK, 30.0), Band::Above(RETURN, 50.0)],
        },
        InstrumentRule {
            label: "Equity Investment",
            bands: vec![Band::Above(RETURN, 70.0)],
        },
        InstrumentRule {
            label: "Mezzanine Financing",
            bands: vec![],
        },
    ]
});

/// Picks the instrument for a set of normalized section scores.
///
/// A dimension with no scored section counts as 0.0.
pub fn recommend(scores: &[(SectionCode, Score)]) -> &'static str {
    let lookup = |dimension: &str| -> f64 {
        scores
            .iter()
            .find(|(code, _)| code.as_str() == dimension)
            .map(|(_, score)| score.value())
            .unwrap_or(0.0)
    };

    INSTRUMENT_RULES
        .iter()
        .find(|rule| rule.bands.iter().all(|band| band.holds(&lookup)))
        .map(|rule| rule.label)
        // The table ends with a catch-all, so this is unreachable.
        .unwrap_or("Mezzanine Financing")
}
