//! Left ventricular geometry (hypertrophy typing).
//!
//! Combines three independent classifications: indexed mass (normal or
//! elevated), relative wall thickness (low, normal or high) and indexed
//! end-diastolic volume (normal or elevated). The volume axis defaults to
//! normal when no indexed volume is available.

use std::sync::LazyLock;

use eco_model::{ClassificationResult, Severity};

use super::rule_table::RuleTable;

/// Sentence emitted when mass index or wall thickness is missing.
pub const GEOMETRY_NOT_EVALUATED: &str = "Geometría del ventrículo izquierdo no evaluada.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassLevel {
    Normal,
    Elevated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallThickness {
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeLevel {
    Normal,
    Elevated,
}

/// One cell of the geometry matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryInput {
    pub mass: MassLevel,
    pub wall: WallThickness,
    pub volume: VolumeLevel,
}

/// Named geometric pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HypertrophyPattern {
    Normal,
    PhysiologicHypertrophy,
    ConcentricRemodeling,
    EccentricRemodeling,
    ConcentricHypertrophy,
    MixedHypertrophy,
    DilatedHypertrophy,
    EccentricHypertrophy,
    /// Matrix cell with no named pattern.
    Indeterminate,
}

impl HypertrophyPattern {
    /// Short label as printed in the report.
    pub fn label(&self) -> &'static str {
        match self {
            HypertrophyPattern::Normal => "Normal",
            HypertrophyPattern::PhysiologicHypertrophy => "Hipertrofia Fisiológica",
            HypertrophyPattern::ConcentricRemodeling => "Remodelado Concéntrico",
            HypertrophyPattern::EccentricRemodeling => "Remodelado Excéntrico",
            HypertrophyPattern::ConcentricHypertrophy => "Hipertrofia Concéntrica",
            HypertrophyPattern::MixedHypertrophy => "Hipertrofia Mixta",
            HypertrophyPattern::DilatedHypertrophy => "Hipertrofia Dilatada",
            HypertrophyPattern::EccentricHypertrophy => "Hipertrofia Excéntrica",
            HypertrophyPattern::Indeterminate => "Patrón Indeterminado",
        }
    }

    pub fn narrative(&self) -> String {
        match self {
            HypertrophyPattern::Normal => {
                "Geometría del ventrículo izquierdo normal.".to_string()
            }
            HypertrophyPattern::Indeterminate => {
                "Patrón geométrico del ventrículo izquierdo indeterminado.".to_string()
            }
            pattern => format!(
                "Geometría del ventrículo izquierdo: {}.",
                pattern.label().to_lowercase()
            ),
        }
    }

    pub fn is_abnormal(&self) -> bool {
        !matches!(
            self,
            HypertrophyPattern::Normal | HypertrophyPattern::Indeterminate
        )
    }
}

static GEOMETRY_RULES: LazyLock<RuleTable<GeometryInput, HypertrophyPattern>> =
    LazyLock::new(|| {
        use MassLevel as M;
        use VolumeLevel as V;
        use WallThickness as W;

        RuleTable::<GeometryInput, HypertrophyPattern>::new(
            "hypertrophy",
            HypertrophyPattern::Indeterminate,
        )
        .rule(
            "geometry-normal",
            "normal mass, normal wall, normal volume",
            |g| g.mass == M::Normal && g.wall == W::Normal && g.volume == V::Normal,
            HypertrophyPattern::Normal,
        )
        .rule(
            "concentric-remodeling",
            "normal mass, high wall, normal volume",
            |g| g.mass == M::Normal && g.wall == W::High && g.volume == V::Normal,
            HypertrophyPattern::ConcentricRemodeling,
        )
        .rule(
            "eccentric-remodeling",
            "normal mass, low or normal wall, elevated volume",
            |g| g.mass == M::Normal && g.wall != W::High && g.volume == V::Elevated,
            HypertrophyPattern::EccentricRemodeling,
        )
        .rule(
            "physiologic-hypertrophy",
            "elevated mass, normal wall, normal volume",
            |g| g.mass == M::Elevated && g.wall == W::Normal && g.volume == V::Normal,
            HypertrophyPattern::PhysiologicHypertrophy,
        )
        .rule(
            "concentric-hypertrophy",
            "elevated mass, high wall, normal volume",
            |g| g.mass == M::Elevated && g.wall == W::High && g.volume == V::Normal,
            HypertrophyPattern::ConcentricHypertrophy,
        )
        .rule(
            "mixed-hypertrophy",
            "elevated mass, high wall, elevated volume",
            |g| g.mass == M::Elevated && g.wall == W::High && g.volume == V::Elevated,
            HypertrophyPattern::MixedHypertrophy,
        )
        .rule(
            "dilated-hypertrophy",
            "elevated mass, normal wall, elevated volume",
            |g| g.mass == M::Elevated && g.wall == W::Normal && g.volume == V::Elevated,
            HypertrophyPattern::DilatedHypertrophy,
        )
        .rule(
            "eccentric-hypertrophy",
            "elevated mass, low wall, elevated volume",
            |g| g.mass == M::Elevated && g.wall == W::Low && g.volume == V::Elevated,
            HypertrophyPattern::EccentricHypertrophy,
        )
    });

/// Pattern for one matrix cell.
pub fn hypertrophy_pattern(input: &GeometryInput) -> HypertrophyPattern {
    *GEOMETRY_RULES.evaluate(input).outcome
}

/// Mass axis from the indexed mass classification; out-of-range and
/// unclassifiable values give `None`.
pub fn mass_level(imvi: &ClassificationResult) -> Option<MassLevel> {
    match imvi.severity() {
        Severity::Normal => Some(MassLevel::Normal),
        Severity::Indeterminate => None,
        _ => Some(MassLevel::Elevated),
    }
}

/// Wall axis from the relative wall thickness classification; `None` for
/// anything but a real match.
pub fn wall_thickness(grp: &ClassificationResult) -> Option<WallThickness> {
    if grp.is_match() && grp.classification.to_lowercase().contains("disminu") {
        return Some(WallThickness::Low);
    }
    match grp.severity() {
        Severity::Normal => Some(WallThickness::Normal),
        Severity::Indeterminate => None,
        _ => Some(WallThickness::High),
    }
}

/// Volume axis from the indexed end-diastolic volume; absent or unusable
/// classifications count as normal.
pub fn volume_level(vdfi: Option<&ClassificationResult>) -> VolumeLevel {
    match vdfi.map(ClassificationResult::severity) {
        Some(severity) if severity.is_abnormal() => VolumeLevel::Elevated,
        _ => VolumeLevel::Normal,
    }
}

/// Type the geometry from table classifications; `None` when mass index or
/// wall thickness is unavailable.
pub fn classify_geometry(
    imvi: Option<&ClassificationResult>,
    grp: Option<&ClassificationResult>,
    vdfi: Option<&ClassificationResult>,
) -> Option<HypertrophyPattern> {
    let input = GeometryInput {
        mass: mass_level(imvi?)?,
        wall: wall_thickness(grp?)?,
        volume: volume_level(vdfi),
    };
    Some(hypertrophy_pattern(&input))
}
