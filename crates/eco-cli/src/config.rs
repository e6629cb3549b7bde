//! Engine options from a TOML file and command-line overrides.
//!
//! ```toml
//! bsa_formula = "mosteller"
//! unit_policy = "millimetres"
//! absent_text = "n/e"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use eco_core::ExamInput;
use eco_core::compiler::Field;
use eco_model::{BsaFormula, EngineOptions, UnitPolicy};

/// Flags given on the command line; unset flags keep the file value.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub bsa_formula: Option<BsaFormula>,
    pub strict_units: bool,
    pub absent_text: Option<String>,
}

/// Read engine options from a TOML file, or the defaults when no file is
/// given. Missing keys keep their default value.
pub fn load_engine_options(path: Option<&Path>) -> Result<EngineOptions> {
    let Some(path) = path else {
        return Ok(EngineOptions::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options: EngineOptions =
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
    info!(path = %path.display(), "loaded engine options");
    Ok(options)
}

pub fn apply_overrides(mut options: EngineOptions, overrides: &OptionOverrides) -> EngineOptions {
    if let Some(formula) = overrides.bsa_formula {
        options.bsa_formula = formula;
    }
    if overrides.strict_units {
        options.unit_policy = UnitPolicy::Millimetres;
    }
    if let Some(text) = &overrides.absent_text {
        options.absent_text.clone_from(text);
    }
    debug!(
        bsa_formula = %options.bsa_formula,
        unit_policy = options.unit_policy.as_str(),
        absent_text = %options.absent_text,
        "effective engine options"
    );
    options
}

/// Use `today` as the study date when the examination leaves it blank.
pub fn fill_study_date(exam: &mut ExamInput, today: NaiveDate) {
    if exam.patient.study_date.is_blank() {
        exam.patient.study_date = Field::new(today.format("%Y-%m-%d").to_string());
    }
}
