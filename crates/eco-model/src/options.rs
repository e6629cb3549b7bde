//! Configuration options for report compilation.

use serde::{Deserialize, Serialize};

use crate::enums::{BsaFormula, UnitPolicy};

/// Text written into the report for fields that could not be evaluated.
pub const DEFAULT_ABSENT_TEXT: &str = "no evaluado";

/// Options controlling report compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Body surface area formula used when the examination does not name one.
    pub bsa_formula: BsaFormula,

    /// Unit interpretation for relative wall thickness operands.
    pub unit_policy: UnitPolicy,

    /// Sentinel written for absent values in the report record.
    pub absent_text: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            bsa_formula: BsaFormula::default(),
            unit_policy: UnitPolicy::default(),
            absent_text: DEFAULT_ABSENT_TEXT.to_string(),
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that read every wall measurement as millimetres.
    pub fn strict_units() -> Self {
        Self {
            unit_policy: UnitPolicy::Millimetres,
            ..Default::default()
        }
    }

    pub fn with_bsa_formula(mut self, formula: BsaFormula) -> Self {
        self.bsa_formula = formula;
        self
    }

    pub fn with_unit_policy(mut self, policy: UnitPolicy) -> Self {
        self.unit_policy = policy;
        self
    }

    pub fn with_absent_text(mut self, text: impl Into<String>) -> Self {
        self.absent_text = text.into();
        self
    }
}
