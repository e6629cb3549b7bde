//! Pulmonary pressure and pulmonary hypertension probability.

use std::sync::LazyLock;

use eco_model::{ClassificationResult, Severity};

use super::rule_table::RuleTable;
use super::{Finding, out_of_range_text};
use crate::classifier::Classifier;

pub const PULMONARY_PRESSURE_NOT_EVALUATED: &str = "Presión pulmonar no evaluada.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulmonaryAssessment {
    pub text: String,
    /// Probability phrase; empty when RVSP was not measured.
    pub probability: String,
    pub severity: Severity,
    /// A pressure fell outside every declared band and nothing abnormal
    /// outranked it.
    pub out_of_range: bool,
}

impl PulmonaryAssessment {
    pub fn finding(&self) -> Finding {
        if self.out_of_range {
            Finding::unclassified(self.text.clone())
        } else {
            Finding::new(self.text.clone(), self.severity)
        }
    }
}

static PROBABILITY_RULES: LazyLock<RuleTable<Severity, &'static str>> = LazyLock::new(|| {
    RuleTable::<Severity, &'static str>::new("pulmonary_probability", "")
        .rule(
            "low",
            "RVSP within normal limits",
            |s| *s == Severity::Normal,
            "Baja probabilidad ecocardiográfica de hipertensión pulmonar.",
        )
        .rule(
            "intermediate",
            "RVSP mildly raised",
            |s| *s == Severity::Mild,
            "Probabilidad ecocardiográfica intermedia de hipertensión pulmonar.",
        )
        .rule(
            "high",
            "RVSP moderately or severely raised",
            |s| *s >= Severity::Moderate,
            "Alta probabilidad ecocardiográfica de hipertensión pulmonar.",
        )
});

/// Probability phrase for an RVSP severity.
pub fn hypertension_probability(rvsp: Severity) -> &'static str {
    *PROBABILITY_RULES.evaluate(&rvsp).outcome
}

/// RVSP text is preferred; the mean pulmonary pressure is reported only
/// when RVSP is normal or absent.
///
/// The probability phrase follows RVSP alone while the severity is the
/// worse of both pressures, so a normal RVSP with a raised mean pressure
/// reads as a moderate finding with a low probability of hypertension.
/// An out-of-range pressure is reported unless the other one is abnormal.
pub fn assess_pulmonary_pressure(
    classifier: &Classifier<'_>,
    rvsp_mmhg: &str,
    mean_pressure_mmhg: &str,
) -> PulmonaryAssessment {
    let rvsp = classifier.classify_raw("presionPulmonar", "psvd", rvsp_mmhg, None);
    let mean = classifier.classify_raw("presionPulmonar", "pmap", mean_pressure_mmhg, None);
    let rvsp_severity = rvsp
        .as_ref()
        .map_or(Severity::Indeterminate, ClassificationResult::severity);

    let any_out_of_range = rvsp
        .iter()
        .chain(mean.iter())
        .any(ClassificationResult::is_out_of_range);

    let (text, severity, out_of_range) = match (&rvsp, &mean) {
        (Some(rvsp), _) if rvsp_severity.is_abnormal() => {
            (rvsp.narrative.clone(), rvsp_severity, false)
        }
        (_, Some(mean)) if mean.severity().is_abnormal() => (
            mean.narrative.clone(),
            mean.severity().max(rvsp_severity),
            false,
        ),
        _ if any_out_of_range => (
            out_of_range_text("Presión pulmonar"),
            Severity::Indeterminate,
            true,
        ),
        (_, Some(mean)) if mean.is_match() => (mean.narrative.clone(), mean.severity(), false),
        (Some(rvsp), _) if rvsp.is_match() => (rvsp.narrative.clone(), rvsp_severity, false),
        _ => (
            PULMONARY_PRESSURE_NOT_EVALUATED.to_string(),
            Severity::Indeterminate,
            false,
        ),
    };
    PulmonaryAssessment {
        text,
        probability: hypertension_probability(rvsp_severity).to_string(),
        severity,
        out_of_range,
    }
}

#[cfg(test)]
mod tests {
    use eco_model::{RangeGroup, ReferenceCategory, ReferenceRange, ReferenceTable};

    use super::*;

    #[test]
    fn probability_by_rvsp_severity() {
        assert!(hypertension_probability(Severity::Normal).starts_with("Baja"));
        assert!(hypertension_probability(Severity::Mild).contains("intermedia"));
        assert!(hypertension_probability(Severity::Severe).starts_with("Alta"));
        assert_eq!(hypertension_probability(Severity::Indeterminate), "");
    }

    fn pressure_table() -> ReferenceTable {
        let mut category = ReferenceCategory::new("presionPulmonar");
        category.add_parameter(
            "psvd",
            RangeGroup::Unisex(vec![
                ReferenceRange::new("normal", 0.0, 35.0, "PSVD normal."),
                ReferenceRange::new("hipertensión pulmonar severa", 35.0, 200.0, "PSVD elevada."),
            ]),
        );
        category.add_parameter(
            "pmap",
            RangeGroup::Unisex(vec![
                ReferenceRange::new("normal", 0.0, 20.0, "PMAP normal."),
                ReferenceRange::new("hipertensión pulmonar moderada", 20.0, 80.0, "PMAP elevada."),
            ]),
        );
        let mut table = ReferenceTable::new();
        table.add_category(category);
        table
    }

    #[test]
    fn raised_mean_pressure_keeps_low_probability() {
        let table = pressure_table();
        let classifier = Classifier::new(&table);

        let assessment = assess_pulmonary_pressure(&classifier, "30", "35");
        assert_eq!(assessment.text, "PMAP elevada.");
        assert_eq!(assessment.severity, Severity::Moderate);
        assert!(assessment.probability.starts_with("Baja"));
    }

    #[test]
    fn out_of_range_rvsp_is_flagged() {
        let table = pressure_table();
        let classifier = Classifier::new(&table);

        let assessment = assess_pulmonary_pressure(&classifier, "250", "");
        assert_eq!(assessment.text, "Presión pulmonar: valor fuera de rango declarado.");
        assert!(assessment.out_of_range);
        assert_eq!(assessment.probability, "");
        assert_eq!(assessment.finding().summary_sentences().len(), 1);
    }
}
