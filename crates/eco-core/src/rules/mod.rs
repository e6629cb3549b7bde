//! Composite diagnostic rules.
//!
//! Each rule combines classifier output and raw values into the sentence
//! printed for one report section. Missing inputs always produce explicit
//! "no evaluado" text.

pub mod chambers;
pub mod diastolic;
pub mod hypertrophy;
pub mod pulmonary;
pub mod regurgitation;
pub mod rule_table;
pub mod stenosis;
pub mod vena_cava;

use eco_model::{ClassificationResult, Severity};

pub use chambers::{
    aorta_finding, left_atrium_finding, left_ventricle_dimension_finding,
    left_ventricle_systolic_finding, left_ventricle_wall_finding, pericardium_finding,
    right_atrium_finding, right_ventricle_finding,
};
pub use diastolic::{
    DiastolicAssessment, DiastolicGrade, DiastolicInput, assess_diastolic_function,
    grade_diastolic_function,
};
pub use hypertrophy::{
    GeometryInput, HypertrophyPattern, MassLevel, VolumeLevel, WallThickness, classify_geometry,
    hypertrophy_pattern,
};
pub use pulmonary::{PulmonaryAssessment, assess_pulmonary_pressure, hypertension_probability};
pub use regurgitation::{
    RegurgitationGrade, RegurgitationReading, parse_regurgitation_grade,
    quantify_mitral_regurgitation, regurgitation_text,
};
pub use rule_table::{Rule, RuleMetadata, RuleOutcome, RuleTable};
pub use stenosis::{StenosisAssessment, StenosisMeasurements, assess_stenosis};
pub use vena_cava::{VenaCavaInput, VenaCavaTier, classify_vena_cava, vena_cava_text};

/// Cardiac valves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Valve {
    Aortic,
    Mitral,
    Tricuspid,
    Pulmonary,
}

impl Valve {
    /// Adjective used in report sentences ("estenosis aórtica").
    pub fn adjective(&self) -> &'static str {
        match self {
            Valve::Aortic => "aórtica",
            Valve::Mitral => "mitral",
            Valve::Tricuspid => "tricuspídea",
            Valve::Pulmonary => "pulmonar",
        }
    }

    /// Reference table category holding the stenosis ranges.
    pub fn category(&self) -> Option<&'static str> {
        match self {
            Valve::Aortic => Some("valvulaAortica"),
            Valve::Mitral => Some("valvulaMitral"),
            Valve::Pulmonary => Some("valvulaPulmonar"),
            Valve::Tricuspid => None,
        }
    }

    fn has_stenosis_parameter(&self, parameter: &str) -> bool {
        match self {
            Valve::Aortic | Valve::Mitral => true,
            Valve::Pulmonary => parameter == "vmax",
            Valve::Tricuspid => false,
        }
    }
}

/// Sentence for a measured value that no declared band contains.
pub fn out_of_range_text(subject: &str) -> String {
    format!("{subject}: valor fuera de rango declarado.")
}

/// A report sentence with the severity it conveys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub text: String,
    pub severity: Severity,
    /// Sentences carried into the report summary.
    summary: Vec<String>,
}

impl Finding {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        let text = text.into();
        let summary = if severity.is_abnormal() {
            vec![text.clone()]
        } else {
            Vec::new()
        };
        Self {
            text,
            severity,
            summary,
        }
    }

    pub fn not_evaluated(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Indeterminate)
    }

    /// A measured value that could not be classified. Graded as
    /// indeterminate but still listed in the summary.
    pub fn unclassified(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            summary: vec![text.clone()],
            text,
            severity: Severity::Indeterminate,
        }
    }

    pub fn is_abnormal(&self) -> bool {
        self.severity.is_abnormal()
    }

    /// Sentences for the report summary: the abnormal and unclassified
    /// parts, without the normal parts of a combined finding.
    pub fn summary_sentences(&self) -> &[String] {
        &self.summary
    }

    /// Join several findings into one sentence group carrying the worst
    /// severity.
    pub fn combine<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Finding>,
    {
        let mut texts = Vec::new();
        let mut summary = Vec::new();
        let mut severity = Severity::Indeterminate;
        for part in parts {
            severity = severity.max(part.severity);
            summary.extend(part.summary);
            if !part.text.is_empty() {
                texts.push(part.text);
            }
        }
        Self {
            text: texts.join(" "),
            severity,
            summary,
        }
    }
}

/// Finding for a single classification.
pub fn classification_finding(result: &ClassificationResult, subject: &str) -> Finding {
    if result.is_out_of_range() {
        Finding::unclassified(out_of_range_text(subject))
    } else {
        Finding::new(result.narrative.clone(), result.severity())
    }
}

/// Most severe of a set of optional classifications.
///
/// Absent entries are skipped; on equal severity the earliest wins.
pub fn most_severe<I>(results: I) -> Option<ClassificationResult>
where
    I: IntoIterator<Item = Option<ClassificationResult>>,
{
    results
        .into_iter()
        .flatten()
        .fold(None, |worst, candidate| match worst {
            Some(current) if current.severity() >= candidate.severity() => Some(current),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use eco_model::MatchKind;

    use super::*;

    fn result(classification: &str) -> ClassificationResult {
        ClassificationResult {
            classification: classification.to_string(),
            narrative: format!("{classification}."),
            match_kind: MatchKind::Matched,
        }
    }

    #[test]
    fn most_severe_keeps_first_on_tie() {
        let worst = most_severe([
            Some(result("normal")),
            Some(result("levemente dilatada")),
            None,
            Some(result("levemente anormal")),
        ]);
        assert_eq!(worst.map(|r| r.classification).as_deref(), Some("levemente dilatada"));
    }

    #[test]
    fn combined_finding_keeps_abnormal_parts() {
        let finding = Finding::combine([
            Finding::new("Dimensiones normales.", Severity::Normal),
            Finding::new("Septum engrosado.", Severity::Mild),
            Finding::not_evaluated("Pared no evaluada."),
        ]);
        assert_eq!(
            finding.text,
            "Dimensiones normales. Septum engrosado. Pared no evaluada."
        );
        assert_eq!(finding.severity, Severity::Mild);
        assert_eq!(finding.summary_sentences(), ["Septum engrosado."]);
    }

    #[test]
    fn unclassified_value_reaches_the_summary() {
        let fallback = ClassificationResult {
            classification: "normal".to_string(),
            narrative: "Aorta normal.".to_string(),
            match_kind: MatchKind::OutOfRange,
        };
        let finding = classification_finding(&fallback, "Aorta");
        assert_eq!(finding.text, "Aorta: valor fuera de rango declarado.");
        assert_eq!(finding.severity, Severity::Indeterminate);
        assert!(!finding.is_abnormal());
        assert_eq!(finding.summary_sentences(), [finding.text.as_str()]);

        let matched = classification_finding(&result("levemente dilatada"), "Aorta");
        assert_eq!(matched.text, "levemente dilatada.");
    }

    #[test]
    fn most_severe_of_nothing() {
        assert_eq!(most_severe([None, None]), None);
    }
}
