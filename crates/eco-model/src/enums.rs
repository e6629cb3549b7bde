//! Type-safe enumerations for examination metadata.
//!
//! The report forms carry these concepts as free text ("M", "femenino",
//! "dubois"); the enums give the engine a closed set to match on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EcoError;

/// Patient sex as used by sex-specific reference ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Short code used on the input boundary.
    pub fn as_code(&self) -> &'static str {
        match self {
            Sex::Female => "F",
            Sex::Male => "M",
        }
    }

    /// Key of the sex-specific sub-table in the reference range data.
    pub fn table_key(&self) -> &'static str {
        match self {
            Sex::Female => "mujer",
            Sex::Male => "hombre",
        }
    }

    /// Long form printed in the report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "femenino",
            Sex::Male => "masculino",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = EcoError;

    /// Accepts the short codes and the long Spanish/English forms
    /// (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        match normalized.as_str() {
            "f" | "femenino" | "mujer" | "female" => Ok(Sex::Female),
            "m" | "masculino" | "hombre" | "male" => Ok(Sex::Male),
            _ => Err(EcoError::UnknownSex(s.to_string())),
        }
    }
}

/// Body surface area formula selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BsaFormula {
    /// Du Bois: `0.007184 × height^0.725 × weight^0.425`.
    #[default]
    DuBois,
    /// Mosteller: `sqrt(height × weight / 3600)`.
    Mosteller,
}

impl BsaFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            BsaFormula::DuBois => "dubois",
            BsaFormula::Mosteller => "mosteller",
        }
    }
}

impl fmt::Display for BsaFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BsaFormula {
    type Err = EcoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '-' && *ch != '_')
            .collect();

        match normalized.as_str() {
            "dubois" => Ok(BsaFormula::DuBois),
            "mosteller" => Ok(BsaFormula::Mosteller),
            _ => Err(EcoError::UnknownBsaFormula(s.to_string())),
        }
    }
}

/// How wall-thickness operands are interpreted when computing relative
/// wall thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitPolicy {
    /// Any operand below 10 is taken as centimetres and multiplied by 10.
    #[default]
    MagnitudeHeuristic,
    /// All operands are millimetres, used as given.
    Millimetres,
}

impl UnitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitPolicy::MagnitudeHeuristic => "magnitude-heuristic",
            UnitPolicy::Millimetres => "millimetres",
        }
    }
}

impl FromStr for UnitPolicy {
    type Err = EcoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "magnitude-heuristic" | "heuristic" => Ok(UnitPolicy::MagnitudeHeuristic),
            "millimetres" | "millimeters" | "mm" => Ok(UnitPolicy::Millimetres),
            _ => Err(EcoError::UnknownUnitPolicy(s.to_string())),
        }
    }
}

/// Ordinal severity derived from a classification label.
///
/// Ordering follows clinical weight, so `max()` over a set of
/// classifications yields the most severe one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Not evaluated or label not recognised.
    Indeterminate,
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Infer the severity from a classification name such as
    /// "levemente anormal" or "estenosis aórtica severa".
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.contains("sever") {
            Severity::Severe
        } else if label.contains("moderad") {
            Severity::Moderate
        } else if label.contains("leve") {
            Severity::Mild
        } else if label.contains("normal") && !label.contains("anormal") {
            Severity::Normal
        } else if ABNORMAL_MARKERS.iter().any(|marker| label.contains(marker)) {
            Severity::Mild
        } else {
            Severity::Indeterminate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Indeterminate => "indeterminado",
            Severity::Normal => "normal",
            Severity::Mild => "leve",
            Severity::Moderate => "moderado",
            Severity::Severe => "severo",
        }
    }

    /// True for anything past normal.
    pub fn is_abnormal(&self) -> bool {
        matches!(
            self,
            Severity::Mild | Severity::Moderate | Severity::Severe
        )
    }
}

const ABNORMAL_MARKERS: &[&str] = &[
    "anormal",
    "aumentad",
    "dilatad",
    "disminuid",
    "elevad",
    "hiperdin",
    "reducid",
];

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
