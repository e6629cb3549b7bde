//! Reference table health check.
//!
//! Overlapping bands make the declaration order decide the classification
//! and are reported as errors. Adjacent bands may share a bound. Any gap
//! between bands leaves values that only match through the first-entry
//! fallback and is reported as a warning.

use serde::Serialize;

use eco_model::ranges::{ReferenceRange, ReferenceTable};
use eco_model::Sex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorIssue {
    pub severity: IssueSeverity,
    /// `category.parameter[.sex]`
    pub location: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorReport {
    pub source: Option<String>,
    pub categories: usize,
    pub parameters: usize,
    pub issues: Vec<DoctorIssue>,
}

impl DoctorReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check every group of the table for overlaps and gaps.
pub fn doctor(table: &ReferenceTable) -> DoctorReport {
    let mut issues = Vec::new();
    for category in table.categories.values() {
        for parameter in category.parameters.values() {
            for (sex, entries) in parameter.group.variants() {
                let location = match sex {
                    Some(sex) => format!("{}.{}.{}", category.name, parameter.name, sex.table_key()),
                    None => format!("{}.{}", category.name, parameter.name),
                };
                check_group(&location, entries, &mut issues);
            }
        }
    }
    DoctorReport {
        source: table.source.clone(),
        categories: table.categories.len(),
        parameters: table.parameter_count(),
        issues,
    }
}

fn check_group(location: &str, entries: &[ReferenceRange], issues: &mut Vec<DoctorIssue>) {
    for (idx, first) in entries.iter().enumerate() {
        for second in &entries[idx + 1..] {
            if first.overlaps(second) {
                issues.push(DoctorIssue {
                    severity: IssueSeverity::Error,
                    location: location.to_string(),
                    message: format!(
                        "'{}' [{}, {}] overlaps '{}' [{}, {}]",
                        first.classification,
                        first.min,
                        first.max,
                        second.classification,
                        second.min,
                        second.max
                    ),
                });
            }
        }
    }

    let mut sorted: Vec<&ReferenceRange> = entries.iter().collect();
    sorted.sort_by(|a, b| a.min.total_cmp(&b.min));
    for pair in sorted.windows(2) {
        if pair[1].min > pair[0].max {
            issues.push(DoctorIssue {
                severity: IssueSeverity::Warning,
                location: location.to_string(),
                message: format!(
                    "gap between '{}' (max {}) and '{}' (min {})",
                    pair[0].classification, pair[0].max, pair[1].classification, pair[1].min
                ),
            });
        }
    }
}

/// Convenience used by callers that only care about one sex.
pub fn sex_label(sex: Option<Sex>) -> &'static str {
    sex.map_or("-", |s| s.table_key())
}
