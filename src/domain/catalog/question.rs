//! Question model - typed questions with choice or slider payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DimensionCode, QuestionCode};

use super::Condition;

/// The answer widget a question renders as, which fixes its answer shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    SingleChoice,
    MultiChoice,
    Slider,
    MultiSlider,
    Rating,
    Nps,
}

impl QuestionType {
    /// Returns true for types answered by picking from configured options.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionType::SingleChoice
                | QuestionType::MultiChoice
                | QuestionType::Rating
                | QuestionType::Nps
        )
    }

    /// Returns true for types answered on a numeric scale.
    pub fn is_scale(&self) -> bool {
        matches!(self, QuestionType::Slider | QuestionType::MultiSlider)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionType::SingleChoice => "SINGLE_CHOICE",
            QuestionType::MultiChoice => "MULTI_CHOICE",
            QuestionType::Slider => "SLIDER",
            QuestionType::MultiSlider => "MULTI_SLIDER",
            QuestionType::Rating => "RATING",
            QuestionType::Nps => "NPS",
        };
        write!(f, "{}", s)
    }
}

/// One selectable option of a choice-style question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Text shown to the user.
    pub label: String,
    /// Stable value stored in answers and referenced by conditions.
    pub value: String,
    /// Points awarded when this option is selected.
    pub points: f64,
}

/// One axis of a slider-style question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderDimension {
    pub code: DimensionCode,
    pub label: String,
    /// Lower bound of the scale (inclusive).
    pub min: f64,
    /// Upper bound of the scale (inclusive).
    pub max: f64,
    /// Points awarded per unit above `min`.
    pub points_per_unit: f64,
    /// Relative weight of this dimension within the question.
    pub weight: f64,
}

impl SliderDimension {
    /// Maximum points this dimension can contribute, before question weight.
    pub fn max_points(&self) -> f64 {
        self.weight * self.points_per_unit * (self.max - self.min)
    }
}

/// Type-specific scoring payload.
///
/// Tagged so branching and scoring can match exhaustively instead of
/// probing a loosely-typed option bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionPayload {
    /// Options for SINGLE_CHOICE, MULTI_CHOICE, RATING and NPS questions.
    Options(Vec<ChoiceOption>),
    /// Dimensions for SLIDER (exactly one) and MULTI_SLIDER questions.
    Dimensions(Vec<SliderDimension>),
}

/// A single assessment question.
///
/// Belongs to exactly one section; `code` is its stable identity across
/// catalog edits and is the key answers are stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub code: QuestionCode,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub required: bool,
    /// Multiplier applied to this question's raw points within its section.
    pub weight: f64,
    /// Position within the section; unique per section.
    pub order: u32,
    pub payload: QuestionPayload,
    /// Branching conditions; the question is reachable if ANY holds.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Question {
    /// Returns the configured options, if this is a choice-style question.
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match &self.payload {
            QuestionPayload::Options(options) => Some(options),
            QuestionPayload::Dimensions(_) => None,
        }
    }

    /// Returns the configured dimensions, if this is a slider-style question.
    pub fn dimensions(&self) -> Option<&[SliderDimension]> {
        match &self.payload {
            QuestionPayload::Dimensions(dimensions) => Some(dimensions),
            QuestionPayload::Options(_) => None,
        }
    }

    /// Looks up an option by its stored value.
    pub fn find_option(&self, value: &str) -> Option<&ChoiceOption> {
        self.options()?.iter().find(|o| o.value == value)
    }

    /// Looks up a dimension by its code.
    pub fn find_dimension(&self, code: &DimensionCode) -> Option<&SliderDimension> {
        self.dimensions()?.iter().find(|d| &d.code == code)
    }

    /// Maximum raw points an answer to this question can earn.
    ///
    /// Best option for single-valued choice types, sum of all options for
    /// MULTI_CHOICE (points are non-negative by catalog validation), full
    /// range across dimensions for slider types.
    pub fn max_points(&self) -> f64 {
        match (&self.payload, self.question_type) {
            (QuestionPayload::Options(options), QuestionType::MultiChoice) => {
                options.iter().map(|o| o.points).sum()
            }
            (QuestionPayload::Options(options), _) => options
                .iter()
                .map(|o| o.points)
                .fold(0.0, f64::max),
            (QuestionPayload::Dimensions(dimensions), _) => {
                dimensions.iter().map(SliderDimension::max_points).sum()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: &str, points: f64) -> ChoiceOption {
        ChoiceOption {
            label: value.to_uppercase(),
            value: value.to_string(),
            points,
        }
    }

    fn single_choice(code: &str, options: Vec<ChoiceOption>) -> Question {
        Question {
            code: QuestionCode::new(code).unwrap(),
            text: "What is your legal status?".to_string(),
            question_type: QuestionType::SingleChoice,
            required: true,
            weight: 1.0,
            order: 1,
            payload: QuestionPayload::Options(options),
            conditions: Vec::new(),
        }
    }

    fn dimension(code: &str, min: f64, max: f64, ppu: f64, weight: f64) -> SliderDimension {
        SliderDimension {
            code: DimensionCode::new(code).unwrap(),
            label: code.to_string(),
            min,
            max,
            points_per_unit: ppu,
            weight,
        }
    }

    #[test]
    fn question_type_classifies_choice_and_scale() {
        assert!(QuestionType::SingleChoice.is_choice());
        assert!(QuestionType::Nps.is_choice());
        assert!(!QuestionType::Slider.is_choice());
        assert!(QuestionType::MultiSlider.is_scale());
        assert!(!QuestionType::Rating.is_scale());
    }

    #[test]
    fn question_type_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&QuestionType::MultiSlider).unwrap(),
            "\"MULTI_SLIDER\""
        );
        let t: QuestionType = serde_json::from_str("\"SINGLE_CHOICE\"").unwrap();
        assert_eq!(t, QuestionType::SingleChoice);
    }

    #[test]
    fn find_option_matches_by_value() {
        let q = single_choice("q1", vec![option("yes", 10.0), option("no", 0.0)]);
        assert_eq!(q.find_option("yes").unwrap().points, 10.0);
        assert!(q.find_option("maybe").is_none());
    }

    #[test]
    fn find_option_is_case_sensitive() {
        let q = single_choice("q1", vec![option("yes", 10.0)]);
        assert!(q.find_option("Yes").is_none());
    }

    #[test]
    fn options_accessor_returns_none_for_slider() {
        let q = Question {
            payload: QuestionPayload::Dimensions(vec![dimension("d1", 0.0, 10.0, 1.0, 1.0)]),
            question_type: QuestionType::Slider,
            ..single_choice("q1", vec![])
        };
        assert!(q.options().is_none());
        assert!(q.dimensions().is_some());
    }

    #[test]
    fn max_points_single_choice_is_best_option() {
        let q = single_choice(
            "q1",
            vec![option("a", 5.0), option("b", 12.0), option("c", 3.0)],
        );
        assert_eq!(q.max_points(), 12.0);
    }

    #[test]
    fn max_points_multi_choice_sums_options() {
        let mut q = single_choice("q1", vec![option("a", 5.0), option("b", 12.0)]);
        q.question_type = QuestionType::MultiChoice;
        assert_eq!(q.max_points(), 17.0);
    }

    #[test]
    fn max_points_slider_uses_full_range() {
        let q = Question {
            payload: QuestionPayload::Dimensions(vec![
                dimension("d1", 0.0, 10.0, 2.0, 1.0),
                dimension("d2", 5.0, 15.0, 1.0, 0.5),
            ]),
            question_type: QuestionType::MultiSlider,
            ..single_choice("q1", vec![])
        };
        // d1: 1.0 * 2.0 * 10 = 20, d2: 0.5 * 1.0 * 10 = 5
        assert_eq!(q.max_points(), 25.0);
    }

    #[test]
    fn max_points_of_empty_options_is_zero() {
        let q = single_choice("q1", vec![]);
        assert_eq!(q.max_points(), 0.0);
    }

    #[test]
    fn dimension_max_points_accounts_for_weight() {
        let d = dimension("d1", 2.0, 7.0, 3.0, 0.5);
        assert_eq!(d.max_points(), 0.5 * 3.0 * 5.0);
    }

    #[test]
    fn question_deserializes_from_catalog_document() {
        let json = r#"{
            "code": "q_team",
            "text": "How large is the team?",
            "type": "SLIDER",
            "required": true,
            "weight": 2.0,
            "order": 3,
            "payload": {
                "dimensions": [
                    {"code": "size", "label": "Size", "min": 0, "max": 50,
                     "points_per_unit": 0.2, "weight": 1.0}
                ]
            }
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.question_type, QuestionType::Slider);
        assert_eq!(q.order, 3);
        assert!(q.conditions.is_empty());
        assert_eq!(q.dimensions().unwrap().len(), 1);
    }
}
