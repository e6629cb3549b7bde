//! Reference range model and the generic classifier.
//!
//! A [`ReferenceTable`] is organised as
//! `category → parameter → (sex →) classification → [min, max] + narrative`.
//!
//! ## Group shapes
//!
//! Each parameter holds one [`RangeGroup`]:
//!
//! 1. **Unisex**: one ordered list of entries, used for every patient.
//! 2. **By sex**: one list for women (`mujer`) and one for men (`hombre`).
//!
//! ## Matching rules
//!
//! - Entries are walked in declaration order.
//! - Intervals are closed: a value equal to `min` or `max` matches.
//! - The first matching entry wins, so adjacent bands may share a bound and
//!   the band declared first owns it.
//! - No match falls back to the first declared entry and is reported as
//!   [`MatchKind::OutOfRange`] so callers can tell it from a real match.
//! - Unknown category/parameter degrades to `"desconocido"` instead of failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Severity, Sex};

/// Classification returned for unknown categories or parameters.
pub const UNKNOWN_CLASSIFICATION: &str = "desconocido";
/// Narrative returned for unknown categories or parameters.
pub const UNKNOWN_PARAMETER_TEXT: &str = "parámetro no encontrado";
/// Narrative returned when a sex-specific parameter is evaluated without sex.
pub const SEX_REQUIRED_TEXT: &str = "sexo no especificado";

/// One classification band of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    /// Classification name (e.g., "normal", "estenosis aórtica severa").
    pub classification: String,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Sentence used in the report when this band matches.
    pub narrative: String,
}

impl ReferenceRange {
    pub fn new(
        classification: impl Into<String>,
        min: f64,
        max: f64,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            classification: classification.into(),
            min,
            max,
            narrative: narrative.into(),
        }
    }

    /// Closed-interval membership.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when the bands share more than a single bound.
    pub fn overlaps(&self, other: &ReferenceRange) -> bool {
        self.min < other.max && other.min < self.max
    }
}

/// Entries of one parameter, optionally split by sex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RangeGroup {
    Unisex(Vec<ReferenceRange>),
    BySex {
        female: Vec<ReferenceRange>,
        male: Vec<ReferenceRange>,
    },
}

impl RangeGroup {
    pub fn is_sex_specific(&self) -> bool {
        matches!(self, RangeGroup::BySex { .. })
    }

    /// Entries applicable to the given sex.
    ///
    /// Returns `None` only for a sex-specific group evaluated without sex.
    pub fn entries(&self, sex: Option<Sex>) -> Option<&[ReferenceRange]> {
        match (self, sex) {
            (RangeGroup::Unisex(entries), _) => Some(entries),
            (RangeGroup::BySex { female, .. }, Some(Sex::Female)) => Some(female),
            (RangeGroup::BySex { male, .. }, Some(Sex::Male)) => Some(male),
            (RangeGroup::BySex { .. }, None) => None,
        }
    }

    /// Every entry list with its sex qualifier (`None` for unisex groups).
    pub fn variants(&self) -> Vec<(Option<Sex>, &[ReferenceRange])> {
        match self {
            RangeGroup::Unisex(entries) => vec![(None, entries.as_slice())],
            RangeGroup::BySex { female, male } => vec![
                (Some(Sex::Female), female.as_slice()),
                (Some(Sex::Male), male.as_slice()),
            ],
        }
    }
}

/// How a [`ClassificationResult`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    /// The value fell inside a declared band.
    Matched,
    /// No band contained the value; the first declared band was used.
    OutOfRange,
    /// Category or parameter not present in the table.
    UnknownParameter,
    /// Sex-specific parameter evaluated without a sex.
    SexRequired,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Matched => "matched",
            MatchKind::OutOfRange => "out-of-range",
            MatchKind::UnknownParameter => "unknown-parameter",
            MatchKind::SexRequired => "sex-required",
        }
    }
}

/// Outcome of classifying one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub classification: String,
    pub narrative: String,
    pub match_kind: MatchKind,
}

impl ClassificationResult {
    pub fn unknown() -> Self {
        Self {
            classification: UNKNOWN_CLASSIFICATION.to_string(),
            narrative: UNKNOWN_PARAMETER_TEXT.to_string(),
            match_kind: MatchKind::UnknownParameter,
        }
    }

    pub fn sex_required() -> Self {
        Self {
            classification: UNKNOWN_CLASSIFICATION.to_string(),
            narrative: SEX_REQUIRED_TEXT.to_string(),
            match_kind: MatchKind::SexRequired,
        }
    }

    fn from_range(range: &ReferenceRange, match_kind: MatchKind) -> Self {
        Self {
            classification: range.classification.clone(),
            narrative: range.narrative.clone(),
            match_kind,
        }
    }

    pub fn is_match(&self) -> bool {
        self.match_kind == MatchKind::Matched
    }

    /// True when the value was measured but no declared band contains it.
    pub fn is_out_of_range(&self) -> bool {
        self.match_kind == MatchKind::OutOfRange
    }

    /// Severity of the classification. Only a real match is graded; the
    /// fallback label of an out-of-range value says nothing about the value.
    pub fn severity(&self) -> Severity {
        match self.match_kind {
            MatchKind::Matched => Severity::from_label(&self.classification),
            MatchKind::OutOfRange | MatchKind::UnknownParameter | MatchKind::SexRequired => {
                Severity::Indeterminate
            }
        }
    }
}

/// Walk an entry list with the first-match / first-entry-fallback policy.
///
/// Returns `None` only for an empty list.
pub fn classify_entries(entries: &[ReferenceRange], value: f64) -> Option<ClassificationResult> {
    if let Some(range) = entries.iter().find(|range| range.contains(value)) {
        return Some(ClassificationResult::from_range(range, MatchKind::Matched));
    }
    entries
        .first()
        .map(|range| ClassificationResult::from_range(range, MatchKind::OutOfRange))
}

/// A named parameter and its range group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRanges {
    /// Parameter name as declared (e.g., "volumenIndexado").
    pub name: String,
    pub group: RangeGroup,
}

/// A category of parameters (usually one anatomical structure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCategory {
    /// Category name as declared (e.g., "auriculaIzquierda").
    pub name: String,
    /// Parameters keyed by lowercase name.
    pub parameters: BTreeMap<String, ParameterRanges>,
}

impl ReferenceCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn add_parameter(&mut self, name: impl Into<String>, group: RangeGroup) {
        let name = name.into();
        self.parameters
            .insert(name.to_lowercase(), ParameterRanges { name, group });
    }

    pub fn get(&self, parameter: &str) -> Option<&ParameterRanges> {
        self.parameters.get(&parameter.to_lowercase())
    }
}

/// Read-only reference range table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    /// Where the table came from (file name or "embedded").
    pub source: Option<String>,
    /// Categories keyed by lowercase name.
    pub categories: BTreeMap<String, ReferenceCategory>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&mut self, category: ReferenceCategory) {
        self.categories
            .insert(category.name.to_lowercase(), category);
    }

    pub fn category(&self, name: &str) -> Option<&ReferenceCategory> {
        self.categories.get(&name.to_lowercase())
    }

    /// Range group of a parameter (case-insensitive lookup).
    pub fn group(&self, category: &str, parameter: &str) -> Option<&RangeGroup> {
        self.category(category)
            .and_then(|c| c.get(parameter))
            .map(|p| &p.group)
    }

    /// Number of parameters across all categories.
    pub fn parameter_count(&self) -> usize {
        self.categories.values().map(|c| c.parameters.len()).sum()
    }

    /// Classify a value against one parameter.
    pub fn classify(
        &self,
        category: &str,
        parameter: &str,
        value: f64,
        sex: Option<Sex>,
    ) -> ClassificationResult {
        let Some(group) = self.group(category, parameter) else {
            return ClassificationResult::unknown();
        };
        let Some(entries) = group.entries(sex) else {
            return ClassificationResult::sex_required();
        };
        classify_entries(entries, value).unwrap_or_else(ClassificationResult::unknown)
    }
}
