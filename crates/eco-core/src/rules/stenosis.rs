//! Valve stenosis severity: most severe of velocity, mean gradient and area.

use eco_model::{ClassificationResult, Severity};

use super::{Finding, Valve, most_severe, out_of_range_text};
use crate::classifier::Classifier;

/// Raw stenosis measurements of one valve.
#[derive(Debug, Clone, Copy, Default)]
pub struct StenosisMeasurements<'a> {
    /// Peak velocity, cm/s.
    pub peak_velocity: &'a str,
    /// Mean gradient, mmHg.
    pub mean_gradient: &'a str,
    /// Valve area, cm².
    pub area: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StenosisAssessment {
    /// Deciding classification, when any measurement was present.
    pub worst: Option<ClassificationResult>,
    pub text: String,
    /// A measurement fell outside every declared band and nothing abnormal
    /// outranked it.
    pub out_of_range: bool,
}

impl StenosisAssessment {
    pub fn severity(&self) -> Severity {
        self.worst
            .as_ref()
            .map_or(Severity::Indeterminate, ClassificationResult::severity)
    }

    pub fn finding(&self) -> Finding {
        if self.out_of_range {
            Finding::unclassified(self.text.clone())
        } else {
            Finding::new(self.text.clone(), self.severity())
        }
    }
}

/// Classify each measurement on its own and keep the most severe; on a tie
/// the first of velocity, gradient, area wins. An out-of-range measurement
/// is reported unless another one is abnormal.
pub fn assess_stenosis(
    classifier: &Classifier<'_>,
    valve: Valve,
    measurements: &StenosisMeasurements<'_>,
) -> StenosisAssessment {
    let Some(category) = valve.category() else {
        return not_evaluated(valve);
    };
    let readings = [
        ("vmax", measurements.peak_velocity),
        ("gradienteMedio", measurements.mean_gradient),
        ("area", measurements.area),
    ];
    let results: Vec<ClassificationResult> = readings
        .iter()
        .filter(|(parameter, _)| valve.has_stenosis_parameter(parameter))
        .filter_map(|(parameter, raw)| classifier.classify_raw(category, parameter, raw, None))
        .collect();
    let worst = most_severe(results.iter().cloned().map(Some));
    let Some(result) = &worst else {
        return not_evaluated(valve);
    };
    let severity = result.severity();
    let out_of_range =
        !severity.is_abnormal() && results.iter().any(ClassificationResult::is_out_of_range);
    let text = if out_of_range {
        out_of_range_text(&format!("Estenosis {}", valve.adjective()))
    } else {
        match severity {
            Severity::Normal => format!("Sin evidencia de estenosis {}.", valve.adjective()),
            Severity::Indeterminate => format!("Estenosis {} no evaluada.", valve.adjective()),
            _ => result.narrative.clone(),
        }
    };
    StenosisAssessment {
        worst,
        text,
        out_of_range,
    }
}

fn not_evaluated(valve: Valve) -> StenosisAssessment {
    StenosisAssessment {
        worst: None,
        text: format!("Estenosis {} no evaluada.", valve.adjective()),
        out_of_range: false,
    }
}
