//! Chamber, wall, aorta and pericardium findings.

use eco_model::{ClassificationResult, Severity, Sex};
use eco_normalization::{normalize_token, parse_clinical_number};

use super::{Finding, most_severe, out_of_range_text};
use crate::classifier::Classifier;

const LV: &str = "ventriculoIzquierdo";
const RV: &str = "ventriculoDerecho";

/// Finding from the worst classification, with fixed text for the all
/// normal and nothing-measured cases. An abnormal reading outranks an
/// out-of-range one, which outranks normal readings.
fn worst_finding<I>(
    results: I,
    subject: &str,
    normal_text: Option<&str>,
    not_evaluated: &str,
) -> Finding
where
    I: IntoIterator<Item = Option<ClassificationResult>>,
{
    let results: Vec<ClassificationResult> = results.into_iter().flatten().collect();
    let Some(worst) = most_severe(results.iter().cloned().map(Some)) else {
        return Finding::not_evaluated(not_evaluated);
    };
    match worst.severity() {
        severity if severity.is_abnormal() => Finding::new(worst.narrative, severity),
        _ if results.iter().any(ClassificationResult::is_out_of_range) => {
            Finding::unclassified(out_of_range_text(subject))
        }
        Severity::Normal => Finding::new(
            normal_text.map_or_else(|| worst.narrative.clone(), str::to_string),
            Severity::Normal,
        ),
        _ => Finding::not_evaluated(not_evaluated),
    }
}

/// Left atrium: most severe of diameter, area and indexed volume.
pub fn left_atrium_finding(
    classifier: &Classifier<'_>,
    sex: Option<Sex>,
    diameter_mm: &str,
    area_cm2: &str,
    indexed_volume: &str,
) -> Finding {
    let readings = [
        classifier.classify_raw("auriculaIzquierda", "diametro", diameter_mm, sex),
        classifier.classify_raw("auriculaIzquierda", "area", area_cm2, sex),
        classifier.classify_raw("auriculaIzquierda", "volumenIndexado", indexed_volume, sex),
    ];
    worst_finding(
        readings,
        "Aurícula izquierda",
        Some("Aurícula izquierda de dimensiones normales."),
        "Aurícula izquierda no evaluada.",
    )
}

pub fn right_atrium_finding(classifier: &Classifier<'_>, area_cm2: &str) -> Finding {
    worst_finding(
        [classifier.classify_raw("auriculaDerecha", "area", area_cm2, None)],
        "Aurícula derecha",
        None,
        "Aurícula derecha no evaluada.",
    )
}

/// Right ventricle: basal dimension followed by the worst of TAPSE, S' and
/// fractional area change.
pub fn right_ventricle_finding(
    classifier: &Classifier<'_>,
    basal_diameter_mm: &str,
    tapse_mm: &str,
    s_wave_cm_s: &str,
    area_change_pct: &str,
) -> Finding {
    let dimension = worst_finding(
        [classifier.classify_raw(RV, "diametroBasal", basal_diameter_mm, None)],
        "Dimensiones del ventrículo derecho",
        None,
        "Dimensiones del ventrículo derecho no evaluadas.",
    );
    let function_readings = [
        classifier.classify_raw(RV, "tapse", tapse_mm, None),
        classifier.classify_raw(RV, "ondaS", s_wave_cm_s, None),
        classifier.classify_raw(RV, "caf", area_change_pct, None),
    ];
    let function = match most_severe(function_readings.clone()) {
        Some(result) if result.severity().is_abnormal() => Finding::new(
            format!(
                "Disfunción sistólica del ventrículo derecho. {}",
                result.narrative
            ),
            result.severity(),
        ),
        _ => worst_finding(
            function_readings,
            "Función sistólica del ventrículo derecho",
            Some("Función sistólica del ventrículo derecho conservada."),
            "Función sistólica del ventrículo derecho no evaluada.",
        ),
    };
    Finding::combine([dimension, function])
}

pub fn left_ventricle_dimension_finding(
    classifier: &Classifier<'_>,
    sex: Option<Sex>,
    diastolic_diameter_mm: &str,
) -> Finding {
    worst_finding(
        [classifier.classify_raw(LV, "ddvi", diastolic_diameter_mm, sex)],
        "Dimensiones del ventrículo izquierdo",
        None,
        "Dimensiones del ventrículo izquierdo no evaluadas.",
    )
}

/// Worst of septum and posterior wall.
pub fn left_ventricle_wall_finding(
    classifier: &Classifier<'_>,
    sex: Option<Sex>,
    septum_mm: &str,
    posterior_mm: &str,
) -> Finding {
    let readings = [
        classifier.classify_raw(LV, "septum", septum_mm, sex),
        classifier.classify_raw(LV, "paredPosterior", posterior_mm, sex),
    ];
    worst_finding(
        readings,
        "Espesores parietales del ventrículo izquierdo",
        Some("Espesores parietales del ventrículo izquierdo normales."),
        "Espesores parietales del ventrículo izquierdo no evaluados.",
    )
}

/// Systolic function from the Simpson ejection fraction, or the linear one
/// when no volumetric value is available.
pub fn left_ventricle_systolic_finding(
    classifier: &Classifier<'_>,
    sex: Option<Sex>,
    simpson_fe: &str,
    linear_fe: &str,
) -> Finding {
    let fe = if parse_clinical_number(simpson_fe).is_some() {
        simpson_fe
    } else {
        linear_fe
    };
    worst_finding(
        [classifier.classify_raw(LV, "fe", fe, sex)],
        "Función sistólica del ventrículo izquierdo",
        None,
        "Función sistólica del ventrículo izquierdo no evaluada.",
    )
}

/// Worst of aortic root and ascending aorta.
pub fn aorta_finding(
    classifier: &Classifier<'_>,
    sex: Option<Sex>,
    root_mm: &str,
    ascending_mm: &str,
) -> Finding {
    let readings = [
        classifier.classify_raw("aorta", "raiz", root_mm, sex),
        classifier.classify_raw("aorta", "ascendente", ascending_mm, sex),
    ];
    worst_finding(
        readings,
        "Aorta",
        Some("Raíz aórtica y aorta ascendente de dimensiones normales."),
        "Aorta no evaluada.",
    )
}

const NO_EFFUSION_TOKENS: &[&str] = &["no", "0", "-", "ausente", "sin derrame", "normal"];

/// Pericardium from the effusion field; unknown text passes through.
pub fn pericardium_finding(effusion: &str) -> Finding {
    let token = normalize_token(effusion);
    if token.is_empty() {
        return Finding::not_evaluated("Pericardio no evaluado.");
    }
    if NO_EFFUSION_TOKENS.contains(&token.as_str()) {
        return Finding::new("Pericardio sin derrame.", Severity::Normal);
    }
    let severity = Severity::from_label(&token);
    let grade = match severity {
        Severity::Mild => "leve",
        Severity::Moderate => "moderado",
        Severity::Severe => "severo",
        Severity::Normal | Severity::Indeterminate => {
            return Finding::new(effusion.trim(), Severity::Indeterminate);
        }
    };
    Finding::new(format!("Derrame pericárdico {grade}."), severity)
}
