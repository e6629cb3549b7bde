//! Classification of raw form values against the reference table.

use eco_model::{ClassificationResult, MatchKind, ReferenceTable, Sex};
use eco_normalization::parse_clinical_number;
use tracing::{debug, warn};

/// Read-only view over a [`ReferenceTable`] that parses raw form strings
/// and reports suspicious lookups.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    table: &'a ReferenceTable,
}

impl<'a> Classifier<'a> {
    pub fn new(table: &'a ReferenceTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a ReferenceTable {
        self.table
    }

    /// Classify a numeric value.
    pub fn classify(
        &self,
        category: &str,
        parameter: &str,
        value: f64,
        sex: Option<Sex>,
    ) -> ClassificationResult {
        let result = self.table.classify(category, parameter, value, sex);
        match result.match_kind {
            MatchKind::Matched => {}
            MatchKind::OutOfRange => warn!(
                category,
                parameter,
                value,
                fallback = %result.classification,
                "value outside every declared range"
            ),
            MatchKind::UnknownParameter => {
                warn!(category, parameter, "parameter not in reference table");
            }
            MatchKind::SexRequired => {
                debug!(category, parameter, "sex-specific parameter without sex");
            }
        }
        result
    }

    /// Classify a raw form string; `None` when the field is absent or not
    /// numeric.
    pub fn classify_raw(
        &self,
        category: &str,
        parameter: &str,
        raw: &str,
        sex: Option<Sex>,
    ) -> Option<ClassificationResult> {
        let value = parse_clinical_number(raw)?;
        Some(self.classify(category, parameter, value, sex))
    }
}

#[cfg(test)]
mod tests {
    use eco_model::{RangeGroup, ReferenceCategory, ReferenceRange};

    use super::*;

    fn table() -> ReferenceTable {
        let mut category = ReferenceCategory::new("auriculaDerecha");
        category.add_parameter(
            "area",
            RangeGroup::Unisex(vec![
                ReferenceRange::new("normal", 0.0, 18.0, "AD normal."),
                ReferenceRange::new("levemente dilatada", 18.1, 24.0, "AD levemente dilatada."),
            ]),
        );
        let mut table = ReferenceTable::new();
        table.add_category(category);
        table
    }

    #[test]
    fn raw_values_use_clinical_parsing() {
        let table = table();
        let classifier = Classifier::new(&table);
        let result = classifier
            .classify_raw("auriculaDerecha", "area", "18,1", None)
            .expect("present value");
        assert_eq!(result.classification, "levemente dilatada");
        assert!(classifier.classify_raw("auriculaDerecha", "area", " ", None).is_none());
    }

    #[test]
    fn out_of_range_is_flagged() {
        let table = table();
        let result = Classifier::new(&table).classify("auriculaDerecha", "area", 40.0, None);
        assert_eq!(result.classification, "normal");
        assert_eq!(result.match_kind, MatchKind::OutOfRange);
    }
}
