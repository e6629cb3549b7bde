//! One mapping function per input section.
//!
//! Each function writes the section's measurements, derived indices and
//! diagnostic sentences into the [`ReportBuilder`]. Values are written as
//! computed; empty strings are replaced by the absent text at the end.

use eco_model::{BsaFormula, ClassificationResult, EngineOptions, ReportRecord, Severity, Sex};
use eco_normalization::{parse_bsa_formula, parse_clinical_number, parse_sex};
use tracing::debug;

use super::input::{
    AortaSection, AorticValveSection, DiastolicSection, ExamInput, Field, LeftAtriumSection,
    LeftVentricleSection, MitralValveSection, PatientSection, PericardiumSection,
    RightHeartSection, TricuspidPulmonarySection,
};
use super::keys::CONCLUSIONS_KEY;
use crate::classifier::Classifier;
use crate::formulas::{self, body_surface_area_value, number, render};
use crate::rules::hypertrophy::GEOMETRY_NOT_EVALUATED;
use crate::rules::{
    self, DiastolicInput, Finding, HypertrophyPattern, StenosisMeasurements, Valve,
    assess_diastolic_function, assess_pulmonary_pressure, assess_stenosis, classify_geometry,
    classify_vena_cava, parse_regurgitation_grade, quantify_mitral_regurgitation,
};

pub(crate) const NORMAL_STUDY_TEXT: &str = "Estudio ecocardiográfico dentro de límites normales.";

/// Values shared by every section mapping.
pub(crate) struct SectionContext<'a> {
    pub classifier: Classifier<'a>,
    pub options: &'a EngineOptions,
    pub sex: Option<Sex>,
    pub bsa_formula: BsaFormula,
    /// Rendered body surface area, `""` when unavailable.
    pub bsa: String,
    /// Supplied right atrial pressure, or the one estimated from the cava.
    pub right_atrial_pressure: String,
}

impl<'a> SectionContext<'a> {
    pub fn new(exam: &ExamInput, classifier: Classifier<'a>, options: &'a EngineOptions) -> Self {
        let patient = &exam.patient;
        let bsa_formula =
            parse_bsa_formula(patient.bsa_formula.as_str()).unwrap_or(options.bsa_formula);
        let bsa = render(
            body_surface_area_value(patient.weight.as_str(), patient.height.as_str(), bsa_formula),
            2,
        );
        let heart = &exam.right_heart;
        let supplied_pressure = heart.right_atrial_pressure.as_str();
        let right_atrial_pressure = match parse_clinical_number(supplied_pressure) {
            Some(pressure) if pressure >= 0.0 => supplied_pressure.trim().to_string(),
            _ => formulas::estimate_right_atrial_pressure(
                heart.ivc_diameter.as_str(),
                heart.ivc_collapse.as_str(),
            ),
        };
        Self {
            classifier,
            options,
            sex: parse_sex(patient.sex.as_str()),
            bsa_formula,
            bsa,
            right_atrial_pressure,
        }
    }
}

/// Accumulates the flat record and the abnormal or unclassified findings
/// for the summary.
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    record: ReportRecord,
    findings: Vec<Finding>,
    evaluated: bool,
}

impl ReportBuilder {
    fn value(&mut self, key: &str, value: impl Into<String>) {
        self.record.insert(key, value);
    }

    fn echo(&mut self, key: &str, field: &Field) {
        self.record.insert(key, field.as_str().trim());
    }

    fn finding(&mut self, key: &str, finding: Finding) {
        self.record.insert(key, finding.text.clone());
        let summarized = !finding.summary_sentences().is_empty();
        self.evaluated |= summarized || finding.severity != Severity::Indeterminate;
        if summarized {
            self.findings.push(finding);
        }
    }

    /// Write the summary and hand back the record.
    pub fn finish(mut self) -> ReportRecord {
        let conclusions = if !self.findings.is_empty() {
            self.findings
                .iter()
                .flat_map(Finding::summary_sentences)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        } else if self.evaluated {
            NORMAL_STUDY_TEXT.to_string()
        } else {
            String::new()
        };
        self.record.insert(CONCLUSIONS_KEY, conclusions);
        self.record
    }
}

pub(crate) fn map_patient(s: &PatientSection, ctx: &SectionContext<'_>, out: &mut ReportBuilder) {
    out.echo("nombre", &s.name);
    out.echo("documento", &s.document);
    out.echo("fechaNacimiento", &s.birth_date);
    out.echo("fechaEstudio", &s.study_date);
    out.echo("peso", &s.weight);
    out.echo("talla", &s.height);
    out.echo("frecuenciaCardiaca", &s.heart_rate);

    let age = formulas::age(s.birth_date.as_str(), s.study_date.as_str());
    let age = if age.is_empty() && parse_clinical_number(s.age.as_str()).is_some() {
        s.age.as_str().trim().to_string()
    } else {
        age
    };
    out.value("edad", age);
    let sex = ctx
        .sex
        .map_or_else(|| s.sex.as_str().trim().to_string(), |sex| sex.as_str().to_string());
    out.value("sexo", sex);
    out.value("formulaSc", ctx.bsa_formula.as_str());
    out.value("superficieCorporal", ctx.bsa.as_str());
    debug!(sex = ?ctx.sex, bsa = %ctx.bsa, formula = %ctx.bsa_formula, "patient section mapped");
}

pub(crate) fn map_left_ventricle(
    s: &LeftVentricleSection,
    ctx: &SectionContext<'_>,
    out: &mut ReportBuilder,
) {
    let ddvi = s.diastolic_diameter.as_str();
    let dsvi = s.systolic_diameter.as_str();
    let septum = s.septum.as_str();
    let posterior = s.posterior_wall.as_str();
    let vdf = s.end_diastolic_volume.as_str();
    let vsf = s.end_systolic_volume.as_str();
    out.echo("ddvi", &s.diastolic_diameter);
    out.echo("dsvi", &s.systolic_diameter);
    out.echo("septum", &s.septum);
    out.echo("paredPosterior", &s.posterior_wall);
    out.echo("vdf", &s.end_diastolic_volume);
    out.echo("vsf", &s.end_systolic_volume);

    let fe_linear = formulas::linear_ejection_fraction(ddvi, dsvi);
    let fe_simpson = formulas::simpson_ejection_fraction(vdf, vsf);
    let mass = formulas::left_ventricular_mass(ddvi, septum, posterior);
    let imvi = formulas::indexed_value(&mass, &ctx.bsa, 1);
    let grp = formulas::relative_wall_thickness(septum, posterior, ddvi, ctx.options.unit_policy);
    let vdfi = formulas::indexed_value(vdf, &ctx.bsa, 1);

    let classifier = &ctx.classifier;
    let lv = "ventriculoIzquierdo";
    let imvi_class = classifier.classify_raw(lv, "imvi", &imvi, ctx.sex);
    let grp_class = classifier.classify_raw(lv, "grp", &grp, ctx.sex);
    let pattern = classify_geometry(
        imvi_class.as_ref(),
        grp_class.as_ref(),
        classifier.classify_raw(lv, "vdfi", &vdfi, ctx.sex).as_ref(),
    );
    let axis_out_of_range = imvi_class
        .iter()
        .chain(grp_class.iter())
        .any(ClassificationResult::is_out_of_range);
    let geometry = match pattern {
        Some(pattern) => {
            let severity = match pattern {
                HypertrophyPattern::Normal => Severity::Normal,
                HypertrophyPattern::Indeterminate => Severity::Indeterminate,
                _ => Severity::Mild,
            };
            Finding::new(pattern.narrative(), severity)
        }
        None if axis_out_of_range => {
            Finding::unclassified(rules::out_of_range_text("Geometría del ventrículo izquierdo"))
        }
        None => Finding::not_evaluated(GEOMETRY_NOT_EVALUATED),
    };
    let structure = Finding::combine([
        rules::left_ventricle_dimension_finding(classifier, ctx.sex, ddvi),
        rules::left_ventricle_wall_finding(classifier, ctx.sex, septum, posterior),
    ]);
    let systolic =
        rules::left_ventricle_systolic_finding(classifier, ctx.sex, &fe_simpson, &fe_linear);

    out.value("fa", formulas::fractional_shortening(ddvi, dsvi));
    out.value("volumenLatido", formulas::stroke_volume(vdf, vsf));
    out.value("tipoHipertrofia", pattern.map(|p| p.label()).unwrap_or_default());
    out.value("feLineal", fe_linear);
    out.value("feSimpson", fe_simpson);
    out.value("masaVi", mass);
    out.value("imvi", imvi);
    out.value("grp", grp);
    out.value("vdfi", vdfi);
    out.finding("diag_ventriculoIzquierdo", structure);
    out.finding("diag_funcionSistolica", systolic);
    out.finding("diag_geometria", geometry);
    debug!(pattern = ?pattern, "left ventricle section mapped");
}

pub(crate) fn map_diastolic(
    s: &DiastolicSection,
    ctx: &SectionContext<'_>,
    out: &mut ReportBuilder,
) {
    out.echo("ondaE", &s.e_wave);
    out.echo("ondaA", &s.a_wave);
    out.echo("tiempoDesaceleracion", &s.deceleration_time);
    out.echo("trivi", &s.ivrt);
    out.echo("ondaSPulmonar", &s.pulmonary_s_wave);
    out.echo("ondaDPulmonar", &s.pulmonary_d_wave);
    out.echo("duracionAr", &s.ar_duration);
    out.echo("duracionA", &s.a_duration);
    out.echo("ePrimaSeptal", &s.e_prime_septal);
    out.echo("ePrimaLateral", &s.e_prime_lateral);

    let e_a = formulas::ratio(s.e_wave.as_str(), s.a_wave.as_str(), 2);
    let s_d = formulas::ratio(s.pulmonary_s_wave.as_str(), s.pulmonary_d_wave.as_str(), 2);
    let ar_a = formulas::difference(s.ar_duration.as_str(), s.a_duration.as_str(), 0);
    let e_prime = formulas::average(s.e_prime_septal.as_str(), s.e_prime_lateral.as_str(), 1);
    let e_over_e_prime = formulas::ratio(s.e_wave.as_str(), &e_prime, 2);

    let input = DiastolicInput {
        e_a_ratio: number(&e_a),
        deceleration_ms: number(s.deceleration_time.as_str()),
        ivrt_ms: number(s.ivrt.as_str()),
        s_d_ratio: number(&s_d),
        ar_minus_a_ms: number(&ar_a),
    };
    let e_over_e_prime_class = ctx.classifier.classify_raw(
        "funcionDiastolica",
        "relacionEePrima",
        &e_over_e_prime,
        None,
    );
    let assessment = assess_diastolic_function(&input, e_over_e_prime_class.as_ref());

    out.value("relacionEA", e_a);
    out.value("relacionSD", s_d);
    out.value("diferenciaArA", ar_a);
    out.value("ePrimaPromedio", e_prime);
    out.value("relacionEePrima", e_over_e_prime);
    out.finding("diag_funcionDiastolica", assessment.finding());
    debug!(grade = ?assessment.grade, "diastolic section mapped");
}

pub(crate) fn map_right_heart(
    s: &RightHeartSection,
    ctx: &SectionContext<'_>,
    out: &mut ReportBuilder,
) {
    out.echo("diametroBasalVd", &s.rv_basal_diameter);
    out.echo("diametroLongitudinalVd", &s.rv_longitudinal_diameter);
    out.echo("diametroBasalVi", &s.lv_basal_diameter);
    out.echo("tapse", &s.tapse);
    out.echo("ondaSTricuspidea", &s.tricuspid_s_wave);
    out.echo("areaDiastolicaVd", &s.rv_diastolic_area);
    out.echo("areaSistolicaVd", &s.rv_systolic_area);
    out.echo("areaAd", &s.ra_area);
    out.echo("diametroVci", &s.ivc_diameter);
    out.echo("colapsoVci", &s.ivc_collapse);
    out.echo("pad", &s.right_atrial_pressure);

    let classifier = &ctx.classifier;
    let basal = s.rv_basal_diameter.as_str();
    let fac =
        formulas::fractional_area_change(s.rv_diastolic_area.as_str(), s.rv_systolic_area.as_str());
    let rv_lv = formulas::rv_lv_ratio(basal, s.lv_basal_diameter.as_str());
    let eccentricity = formulas::eccentricity_index(basal, s.rv_longitudinal_diameter.as_str());

    let mut ventricle = rules::right_ventricle_finding(
        classifier,
        basal,
        s.tapse.as_str(),
        s.tricuspid_s_wave.as_str(),
        &fac,
    );
    if let Some(ratio) = classifier
        .classify_raw("ventriculoDerecho", "relacionVDVI", &rv_lv, None)
        .filter(|result| result.severity().is_abnormal() || result.is_out_of_range())
    {
        ventricle = Finding::combine([
            ventricle,
            rules::classification_finding(&ratio, "Relación VD/VI"),
        ]);
    }
    let cava = match classify_vena_cava(s.ivc_diameter.as_str(), s.ivc_collapse.as_str()) {
        Some(tier) => Finding::new(tier.narrative(), tier.severity()),
        None => Finding::not_evaluated(rules::vena_cava::VENA_CAVA_NOT_EVALUATED),
    };

    out.value("caf", fac);
    out.value("indiceExcentricidad", eccentricity);
    out.value("relacionVdVi", rv_lv);
    out.value(
        "padEstimada",
        formulas::estimate_right_atrial_pressure(s.ivc_diameter.as_str(), s.ivc_collapse.as_str()),
    );
    out.finding("diag_ventriculoDerecho", ventricle);
    out.finding(
        "diag_auriculaDerecha",
        rules::right_atrium_finding(classifier, s.ra_area.as_str()),
    );
    out.finding("diag_venaCava", cava);
    debug!(rap = %ctx.right_atrial_pressure, "right heart section mapped");
}

pub(crate) fn map_left_atrium(
    s: &LeftAtriumSection,
    ctx: &SectionContext<'_>,
    out: &mut ReportBuilder,
) {
    out.echo("diametroAi", &s.diameter);
    out.echo("areaAi", &s.area);
    out.echo("area4c", &s.area_4c);
    out.echo("area2c", &s.area_2c);
    out.echo("longitudAi", &s.length);

    let volume =
        formulas::left_atrial_volume(s.area_4c.as_str(), s.area_2c.as_str(), s.length.as_str());
    let indexed = formulas::indexed_value(&volume, &ctx.bsa, 1);
    let finding = rules::left_atrium_finding(
        &ctx.classifier,
        ctx.sex,
        s.diameter.as_str(),
        s.area.as_str(),
        &indexed,
    );

    out.value("volumenAi", volume);
    out.value("volumenAiIndexado", indexed);
    out.finding("diag_auriculaIzquierda", finding);
    debug!("left atrium section mapped");
}

pub(crate) fn map_aortic_valve(
    s: &AorticValveSection,
    ctx: &SectionContext<'_>,
    out: &mut ReportBuilder,
) {
    out.echo("vmaxAortica", &s.peak_velocity);
    out.echo("gradienteMedioAortico", &s.mean_gradient);
    out.echo("diametroTsvi", &s.lvot_diameter);
    out.echo("itvTsvi", &s.lvot_vti);
    out.echo("itvAortica", &s.aortic_vti);
    out.echo("insuficienciaAortica", &s.regurgitation);

    let area = formulas::aortic_valve_area(
        s.lvot_diameter.as_str(),
        s.lvot_vti.as_str(),
        s.aortic_vti.as_str(),
    );
    let stenosis = assess_stenosis(
        &ctx.classifier,
        Valve::Aortic,
        &StenosisMeasurements {
            peak_velocity: s.peak_velocity.as_str(),
            mean_gradient: s.mean_gradient.as_str(),
            area: &area,
        },
    );
    let finding = Finding::combine([
        stenosis.finding(),
        regurgitation_finding(Valve::Aortic, &s.regurgitation),
    ]);

    out.value(
        "gradientePicoAortico",
        formulas::peak_gradient_from_velocity(s.peak_velocity.as_str()),
    );
    out.value("areaValvularAortica", area);
    out.finding("diag_valvulaAortica", finding);
    debug!(stenosis = %stenosis.severity(), "aortic valve section mapped");
}

pub(crate) fn map_mitral_valve(
    s: &MitralValveSection,
    ctx: &SectionContext<'_>,
    out: &mut ReportBuilder,
) {
    out.echo("vmaxMitral", &s.peak_velocity);
    out.echo("gradienteMedioMitral", &s.mean_gradient);
    out.echo("thpMitral", &s.pressure_half_time);
    out.echo("insuficienciaMitral", &s.regurgitation);
    out.echo("radioPisa", &s.pisa_radius);
    out.echo("velocidadAliasing", &s.aliasing_velocity);
    out.echo("vmaxRegurgitanteMitral", &s.regurgitant_peak_velocity);
    out.echo("itvRegurgitanteMitral", &s.regurgitant_vti);

    let area = formulas::mitral_area_pht(s.pressure_half_time.as_str());
    let ero = formulas::effective_regurgitant_orifice(
        s.pisa_radius.as_str(),
        s.aliasing_velocity.as_str(),
        s.regurgitant_peak_velocity.as_str(),
    );
    let regurgitant_volume = formulas::regurgitant_volume(&ero, s.regurgitant_vti.as_str());
    let stenosis = assess_stenosis(
        &ctx.classifier,
        Valve::Mitral,
        &StenosisMeasurements {
            peak_velocity: s.peak_velocity.as_str(),
            mean_gradient: s.mean_gradient.as_str(),
            area: &area,
        },
    );
    let quantification = quantify_mitral_regurgitation(&ctx.classifier, &ero, &regurgitant_volume)
        .map(|result| {
            rules::classification_finding(&result, "Cuantificación de insuficiencia mitral")
        });
    let finding = Finding::combine(
        [
            Some(stenosis.finding()),
            Some(regurgitation_finding(Valve::Mitral, &s.regurgitation)),
            quantification,
        ]
        .into_iter()
        .flatten(),
    );

    out.value(
        "gradientePicoMitral",
        formulas::peak_gradient_from_velocity(s.peak_velocity.as_str()),
    );
    out.value("areaValvularMitral", area);
    out.value("ore", ero);
    out.value("volumenRegurgitante", regurgitant_volume);
    out.finding("diag_valvulaMitral", finding);
    debug!(stenosis = %stenosis.severity(), "mitral valve section mapped");
}

pub(crate) fn map_tricuspid_pulmonary(
    s: &TricuspidPulmonarySection,
    ctx: &SectionContext<'_>,
    out: &mut ReportBuilder,
) {
    out.echo("vmaxTricuspidea", &s.tricuspid_regurgitant_velocity);
    out.echo("insuficienciaTricuspidea", &s.tricuspid_regurgitation);
    out.echo("vmaxPulmonar", &s.pulmonary_peak_velocity);
    out.echo("insuficienciaPulmonar", &s.pulmonary_regurgitation);
    out.echo("tiempoAceleracionPulmonar", &s.pulmonary_acceleration_time);

    let rvsp = formulas::rv_systolic_pressure(
        s.tricuspid_regurgitant_velocity.as_str(),
        &ctx.right_atrial_pressure,
    );
    let mean_pressure =
        formulas::mean_pulmonary_pressure_from_acceleration(s.pulmonary_acceleration_time.as_str());
    let stenosis = assess_stenosis(
        &ctx.classifier,
        Valve::Pulmonary,
        &StenosisMeasurements {
            peak_velocity: s.pulmonary_peak_velocity.as_str(),
            ..StenosisMeasurements::default()
        },
    );
    let pulmonary_valve = Finding::combine([
        stenosis.finding(),
        regurgitation_finding(Valve::Pulmonary, &s.pulmonary_regurgitation),
    ]);
    let pressure = assess_pulmonary_pressure(&ctx.classifier, &rvsp, &mean_pressure);

    out.value(
        "gradientePicoTricuspideo",
        formulas::peak_gradient_from_velocity(s.tricuspid_regurgitant_velocity.as_str()),
    );
    out.value(
        "gradientePicoPulmonar",
        formulas::peak_gradient_from_velocity(s.pulmonary_peak_velocity.as_str()),
    );
    out.value("psvd", rvsp);
    out.value("pmap", mean_pressure);
    out.finding(
        "diag_valvulaTricuspide",
        regurgitation_finding(Valve::Tricuspid, &s.tricuspid_regurgitation),
    );
    out.finding("diag_valvulaPulmonar", pulmonary_valve);
    out.finding("diag_presionPulmonar", pressure.finding());
    out.value("diag_probabilidadHp", pressure.probability);
    debug!(severity = %pressure.severity, "tricuspid and pulmonary section mapped");
}

pub(crate) fn map_aorta(s: &AortaSection, ctx: &SectionContext<'_>, out: &mut ReportBuilder) {
    out.echo("raizAortica", &s.root);
    out.echo("aortaAscendente", &s.ascending);
    out.finding(
        "diag_aorta",
        rules::aorta_finding(&ctx.classifier, ctx.sex, s.root.as_str(), s.ascending.as_str()),
    );
    debug!("aorta section mapped");
}

pub(crate) fn map_pericardium(s: &PericardiumSection, out: &mut ReportBuilder) {
    out.echo("derramePericardico", &s.effusion);
    out.finding("diag_pericardio", rules::pericardium_finding(s.effusion.as_str()));
    debug!("pericardium section mapped");
}

fn regurgitation_finding(valve: Valve, grade: &Field) -> Finding {
    let reading = parse_regurgitation_grade(grade.as_str());
    Finding::new(
        rules::regurgitation::reading_text(valve, &reading),
        reading.severity(),
    )
}
