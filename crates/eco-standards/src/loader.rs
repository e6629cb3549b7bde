//! Reference range loader.
//!
//! Loads the declarative JSON table into `eco_model::ranges`.
//!
//! ## File structure
//!
//! ```text
//! { category: { parameter: { classification: { min, max, texto } } } }
//! { category: { parameter: { mujer: {...}, hombre: {...} } } }
//! ```
//!
//! Key order inside a parameter is the declaration order used by the
//! classifier, so the JSON is read with insertion order preserved.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use eco_model::ranges::{RangeGroup, ReferenceCategory, ReferenceRange, ReferenceTable};

use crate::error::StandardsError;
use crate::paths::{REFERENCE_RANGES_FILE, reference_ranges_path, standards_override};

/// Reference range table compiled into the binary.
pub const EMBEDDED_REFERENCE_RANGES: &str = include_str!("../standards/reference_ranges.json");

const FEMALE_KEY: &str = "mujer";
const MALE_KEY: &str = "hombre";

/// Load the default reference table.
///
/// Uses `reference_ranges.json` from `ECO_STANDARDS_DIR` when the variable is
/// set, the embedded table otherwise.
pub fn load_default_reference_table() -> Result<ReferenceTable, StandardsError> {
    match standards_override() {
        Some(dir) => load_reference_table(&reference_ranges_path(dir)),
        None => parse_reference_table(EMBEDDED_REFERENCE_RANGES, "embedded"),
    }
}

/// Load a reference table from a JSON file.
pub fn load_reference_table(path: &Path) -> Result<ReferenceTable, StandardsError> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let source = path
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or(REFERENCE_RANGES_FILE);
    parse_reference_table(&text, source)
}

/// Parse a reference table from JSON text.
pub fn parse_reference_table(json: &str, source: &str) -> Result<ReferenceTable, StandardsError> {
    let root: Value = serde_json::from_str(json).map_err(|e| StandardsError::Json {
        source_name: source.to_string(),
        source: e,
    })?;
    let categories = as_object(&root, source)?;

    let mut table = ReferenceTable::new();
    table.source = Some(source.to_string());

    for (category_name, parameters) in categories {
        let parameters = as_object(parameters, category_name)?;
        let mut category = ReferenceCategory::new(category_name.clone());
        for (parameter_name, body) in parameters {
            let location = format!("{category_name}.{parameter_name}");
            let group = parse_group(body, &location)?;
            category.add_parameter(parameter_name.clone(), group);
        }
        table.add_category(category);
    }

    debug!(
        source,
        categories = table.categories.len(),
        parameters = table.parameter_count(),
        "loaded reference table"
    );
    Ok(table)
}

fn parse_group(body: &Value, location: &str) -> Result<RangeGroup, StandardsError> {
    let object = as_object(body, location)?;
    let female = object.get(FEMALE_KEY);
    let male = object.get(MALE_KEY);

    match (female, male) {
        (Some(female), Some(male)) => Ok(RangeGroup::BySex {
            female: parse_entries(female, &format!("{location}.{FEMALE_KEY}"))?,
            male: parse_entries(male, &format!("{location}.{MALE_KEY}"))?,
        }),
        (None, None) => Ok(RangeGroup::Unisex(parse_entries(body, location)?)),
        _ => Err(StandardsError::IncompleteSexSplit {
            location: location.to_string(),
        }),
    }
}

fn parse_entries(body: &Value, location: &str) -> Result<Vec<ReferenceRange>, StandardsError> {
    let object = as_object(body, location)?;
    if object.is_empty() {
        return Err(StandardsError::EmptyGroup {
            location: location.to_string(),
        });
    }

    let mut entries = Vec::with_capacity(object.len());
    for (classification, entry) in object {
        let entry_location = format!("{location}.{classification}");
        let fields = as_object(entry, &entry_location)?;
        let min = number_field(fields, "min", &entry_location)?;
        let max = number_field(fields, "max", &entry_location)?;
        if min > max {
            return Err(StandardsError::invalid(
                &entry_location,
                format!("min {min} is greater than max {max}"),
            ));
        }
        let narrative = fields
            .get("texto")
            .and_then(Value::as_str)
            .ok_or_else(|| StandardsError::invalid(&entry_location, "missing 'texto'"))?;
        entries.push(ReferenceRange::new(
            classification.clone(),
            min,
            max,
            narrative,
        ));
    }
    Ok(entries)
}

fn number_field(
    fields: &Map<String, Value>,
    key: &str,
    location: &str,
) -> Result<f64, StandardsError> {
    fields
        .get(key)
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
        .ok_or_else(|| StandardsError::invalid(location, format!("missing numeric '{key}'")))
}

fn as_object<'a>(
    value: &'a Value,
    location: &str,
) -> Result<&'a Map<String, Value>, StandardsError> {
    value.as_object().ok_or_else(|| StandardsError::NotAnObject {
        location: location.to_string(),
    })
}
