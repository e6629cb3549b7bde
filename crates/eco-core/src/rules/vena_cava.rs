//! Inferior vena cava assessment and right atrial pressure estimate.

use std::sync::LazyLock;

use eco_model::Severity;
use eco_normalization::parse_clinical_number;

use super::rule_table::RuleTable;

/// Text emitted when diameter or collapse is missing.
pub const VENA_CAVA_NOT_EVALUATED: &str = "Vena cava inferior no evaluada.";

/// Diameter (mm) separating a normal from a dilated cava.
const DIAMETER_THRESHOLD_MM: f64 = 21.0;
/// Inspiratory collapse (%) separating a preserved from a blunted response.
const COLLAPSE_THRESHOLD_PCT: f64 = 50.0;

/// IVC measurements in the units they are entered in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VenaCavaInput {
    pub diameter_mm: f64,
    pub collapse_pct: f64,
}

/// Estimated right atrial pressure tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VenaCavaTier {
    /// Small cava with preserved collapse, 3 mmHg.
    Normal,
    /// Indeterminate behaviour, 8 mmHg.
    Intermediate,
    /// Dilated cava with blunted collapse, 15 mmHg.
    Elevated,
}

impl VenaCavaTier {
    pub fn right_atrial_pressure(&self) -> u8 {
        match self {
            VenaCavaTier::Normal => 3,
            VenaCavaTier::Intermediate => 8,
            VenaCavaTier::Elevated => 15,
        }
    }

    pub fn narrative(&self) -> &'static str {
        match self {
            VenaCavaTier::Normal => {
                "Vena cava inferior de diámetro normal con colapso inspiratorio \
                 conservado. Presión estimada de aurícula derecha: 3 mmHg."
            }
            VenaCavaTier::Intermediate => {
                "Vena cava inferior con comportamiento intermedio. Presión \
                 estimada de aurícula derecha: 8 mmHg."
            }
            VenaCavaTier::Elevated => {
                "Vena cava inferior dilatada con colapso inspiratorio disminuido. \
                 Presión estimada de aurícula derecha: 15 mmHg."
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            VenaCavaTier::Normal => Severity::Normal,
            VenaCavaTier::Intermediate => Severity::Mild,
            VenaCavaTier::Elevated => Severity::Moderate,
        }
    }
}

static VENA_CAVA_RULES: LazyLock<RuleTable<VenaCavaInput, VenaCavaTier>> = LazyLock::new(|| {
    RuleTable::<VenaCavaInput, VenaCavaTier>::new("vena_cava", VenaCavaTier::Intermediate)
        .rule(
            "ivc-normal",
            "diameter < 21 mm and collapse >= 50 %",
            |ivc| {
                ivc.diameter_mm < DIAMETER_THRESHOLD_MM
                    && ivc.collapse_pct >= COLLAPSE_THRESHOLD_PCT
            },
            VenaCavaTier::Normal,
        )
        .rule(
            "ivc-elevated",
            "diameter > 21 mm and collapse < 50 %",
            |ivc| {
                ivc.diameter_mm > DIAMETER_THRESHOLD_MM
                    && ivc.collapse_pct < COLLAPSE_THRESHOLD_PCT
            },
            VenaCavaTier::Elevated,
        )
});

/// Tier for a measured cava.
pub fn vena_cava_tier(input: &VenaCavaInput) -> VenaCavaTier {
    *VENA_CAVA_RULES.evaluate(input).outcome
}

/// Classify raw form strings; `None` when either measurement is absent.
pub fn classify_vena_cava(diameter_mm: &str, collapse_pct: &str) -> Option<VenaCavaTier> {
    let diameter_mm = parse_clinical_number(diameter_mm).filter(|v| *v >= 0.0)?;
    let collapse_pct = parse_clinical_number(collapse_pct).filter(|v| *v >= 0.0)?;
    Some(vena_cava_tier(&VenaCavaInput {
        diameter_mm,
        collapse_pct,
    }))
}

/// Report sentence for the cava.
pub fn vena_cava_text(diameter_mm: &str, collapse_pct: &str) -> String {
    classify_vena_cava(diameter_mm, collapse_pct)
        .map_or(VENA_CAVA_NOT_EVALUATED, |tier| tier.narrative())
        .to_string()
}
