//! End-to-end report compilation against the bundled reference ranges.
#![recursion_limit = "256"]

use eco_core::{ExamInput, REPORT_KEYS, compile_report};
use eco_model::{BsaFormula, EngineOptions, ReferenceTable, ReportRecord, UnitPolicy};
use eco_standards::load_default_reference_table;
use serde_json::json;

fn table() -> ReferenceTable {
    load_default_reference_table().expect("bundled reference ranges")
}

/// A complete study of a 53 year old woman with mild findings.
fn full_exam() -> ExamInput {
    let raw = json!({
        "nombre": "Ana Pérez",
        "documento": "12345678",
        "fechaNacimiento": "1970-05-20",
        "fechaEstudio": "2024-03-10",
        "sexo": "F",
        "peso": "60",
        "talla": "165",
        "frecuenciaCardiaca": "72",
        "ddvi": "48",
        "dsvi": "32",
        "septum": "10",
        "paredPosterior": "10",
        "vdf": "100",
        "vsf": "40",
        "ondaE": "80",
        "ondaA": "100",
        "tiempoDesaceleracion": "240",
        "trivi": "110",
        "ondaSPulmonar": "60",
        "ondaDPulmonar": "40",
        "duracionAr": "120",
        "duracionA": "130",
        "ePrimaSeptal": "6",
        "ePrimaLateral": "8",
        "diametroBasalVd": "35",
        "diametroLongitudinalVd": "70",
        "diametroBasalVi": "50",
        "tapse": "20",
        "ondaSTricuspidea": "12",
        "areaDiastolicaVd": "20",
        "areaSistolicaVd": "11",
        "areaAd": "15",
        "diametroVci": "18",
        "colapsoVci": "60",
        "diametroAi": "36",
        "areaAi": "18",
        "area4c": "18",
        "area2c": "17",
        "longitudAi": "50",
        "vmaxAortica": "150",
        "gradienteMedioAortico": "5",
        "diametroTsvi": "20",
        "itvTsvi": "20",
        "itvAortica": "25",
        "vmaxMitral": "80",
        "insuficienciaMitral": "+",
        "radioPisa": "0.5",
        "velocidadAliasing": "40",
        "vmaxRegurgitanteMitral": "500",
        "itvRegurgitanteMitral": "150",
        "vmaxTricuspidea": "250",
        "insuficienciaTricuspidea": "+",
        "vmaxPulmonar": "90",
        "insuficienciaPulmonar": "no",
        "tiempoAceleracionPulmonar": "140",
        "raizAortica": "30",
        "aortaAscendente": "32",
        "derramePericardico": "no"
    });
    ExamInput::from_json_str(&raw.to_string()).expect("valid exam")
}

fn get<'a>(record: &'a ReportRecord, key: &str) -> &'a str {
    record
        .get(key)
        .unwrap_or_else(|| panic!("missing report key {key}"))
}

fn assert_exact_key_set(record: &ReportRecord) {
    assert_eq!(record.len(), REPORT_KEYS.len());
    assert!(record.missing_keys(REPORT_KEYS).is_empty());
    for (key, _) in record.iter() {
        assert!(REPORT_KEYS.contains(&key), "unexpected key {key}");
    }
}

#[test]
fn empty_exam_reports_every_key_as_absent() {
    let record = compile_report(&ExamInput::default(), &table(), &EngineOptions::default());
    assert_exact_key_set(&record);

    assert_eq!(get(&record, "ddvi"), "no evaluado");
    assert_eq!(get(&record, "superficieCorporal"), "no evaluado");
    assert_eq!(get(&record, "diag_funcionDiastolica"), "Función diastólica no evaluada.");
    assert_eq!(get(&record, "diag_conclusiones"), "no evaluado");
    // the BSA formula falls back to the configured default
    assert_eq!(get(&record, "formulaSc"), "dubois");
}

#[test]
fn full_exam_reports_every_key() {
    let record = compile_report(&full_exam(), &table(), &EngineOptions::default());
    assert_exact_key_set(&record);
}

#[test]
fn compilation_is_deterministic() {
    let table = table();
    let options = EngineOptions::default();
    let exam = full_exam();
    assert_eq!(
        compile_report(&exam, &table, &options),
        compile_report(&exam, &table, &options)
    );
}

#[test]
fn derived_measurements() {
    let record = compile_report(&full_exam(), &table(), &EngineOptions::default());
    let derived = [
        ("edad", "53"),
        ("sexo", "femenino"),
        ("superficieCorporal", "1.66"),
        ("feLineal", "70.37"),
        ("fa", "33.33"),
        ("feSimpson", "60.00"),
        ("volumenLatido", "60.0"),
        ("masaVi", "170.2"),
        ("imvi", "102.5"),
        ("grp", "0.42"),
        ("vdfi", "60.2"),
        ("relacionEA", "0.80"),
        ("relacionSD", "1.50"),
        ("diferenciaArA", "-10"),
        ("ePrimaPromedio", "7.0"),
        ("relacionEePrima", "11.43"),
        ("caf", "45.00"),
        ("indiceExcentricidad", "0.50"),
        ("relacionVdVi", "0.70"),
        ("padEstimada", "3"),
        ("volumenAi", "52.0"),
        ("volumenAiIndexado", "31.3"),
        ("gradientePicoAortico", "9.0"),
        ("areaValvularAortica", "2.51"),
        ("gradientePicoMitral", "2.6"),
        ("ore", "0.13"),
        ("volumenRegurgitante", "19.5"),
        ("gradientePicoTricuspideo", "25.0"),
        ("gradientePicoPulmonar", "3.2"),
        ("psvd", "28.0"),
        ("pmap", "16.0"),
    ];
    for (key, expected) in derived {
        assert_eq!(get(&record, key), expected, "{key}");
    }
    // no pressure half time, so no mitral area
    assert_eq!(get(&record, "areaValvularMitral"), "no evaluado");
    assert_eq!(get(&record, "tipoHipertrofia"), "Hipertrofia Fisiológica");
}

#[test]
fn diagnostic_statements() {
    let record = compile_report(&full_exam(), &table(), &EngineOptions::default());
    insta::assert_snapshot!(get(&record, "diag_ventriculoIzquierdo"), @"Ventrículo izquierdo de dimensiones normales. Septum interventricular levemente engrosado.");
    insta::assert_snapshot!(get(&record, "diag_funcionSistolica"), @"Función sistólica del ventrículo izquierdo conservada.");
    insta::assert_snapshot!(get(&record, "diag_geometria"), @"Geometría del ventrículo izquierdo: hipertrofia fisiológica.");
    insta::assert_snapshot!(get(&record, "diag_funcionDiastolica"), @"Disfunción diastólica grado I (alteración de la relajación).");
    insta::assert_snapshot!(get(&record, "diag_ventriculoDerecho"), @"Ventrículo derecho de dimensiones normales. Función sistólica del ventrículo derecho conservada.");
    insta::assert_snapshot!(get(&record, "diag_auriculaIzquierda"), @"Aurícula izquierda de dimensiones normales.");
    insta::assert_snapshot!(get(&record, "diag_valvulaAortica"), @"Sin evidencia de estenosis aórtica. Insuficiencia aórtica no evaluada.");
    insta::assert_snapshot!(get(&record, "diag_valvulaMitral"), @"Sin evidencia de estenosis mitral. Insuficiencia mitral leve. Orificio regurgitante efectivo compatible con insuficiencia mitral leve.");
    insta::assert_snapshot!(get(&record, "diag_presionPulmonar"), @"Presión media de arteria pulmonar normal.");
    insta::assert_snapshot!(get(&record, "diag_probabilidadHp"), @"Baja probabilidad ecocardiográfica de hipertensión pulmonar.");
    insta::assert_snapshot!(get(&record, "diag_aorta"), @"Raíz aórtica y aorta ascendente de dimensiones normales.");
}

#[test]
fn conclusions_list_only_abnormal_sentences() {
    let record = compile_report(&full_exam(), &table(), &EngineOptions::default());
    assert_eq!(
        get(&record, "diag_conclusiones"),
        "Septum interventricular levemente engrosado. \
         Geometría del ventrículo izquierdo: hipertrofia fisiológica. \
         Disfunción diastólica grado I (alteración de la relajación). \
         Insuficiencia mitral leve. \
         Orificio regurgitante efectivo compatible con insuficiencia mitral leve. \
         Insuficiencia tricuspídea leve."
    );
}

#[test]
fn normal_study_summary() {
    let exam = ExamInput::from_fields([
        ("sexo", "M"),
        ("ddvi", "50"),
        ("raizAortica", "32"),
        ("aortaAscendente", "34"),
    ])
    .expect("valid exam");
    let record = compile_report(&exam, &table(), &EngineOptions::default());
    assert_eq!(
        get(&record, "diag_conclusiones"),
        "Estudio ecocardiográfico dentro de límites normales."
    );
}

#[test]
fn values_between_declared_limits_are_classified() {
    let exam = ExamInput::from_fields([
        ("sexo", "M"),
        ("gradienteMedioAortico", "39,95"),
        ("gradienteMedioMitral", "4.95"),
        ("tapse", "16.95"),
        ("raizAortica", "40.05"),
    ])
    .expect("valid exam");
    let record = compile_report(&exam, &table(), &EngineOptions::default());
    assert!(get(&record, "diag_valvulaAortica").starts_with("Estenosis aórtica severa."));
    assert!(get(&record, "diag_valvulaMitral").starts_with("Estenosis mitral moderada."));
    assert!(get(&record, "diag_ventriculoDerecho").contains("TAPSE disminuido."));
    assert_eq!(get(&record, "diag_aorta"), "Raíz aórtica levemente dilatada.");
    assert_ne!(
        get(&record, "diag_conclusiones"),
        "Estudio ecocardiográfico dentro de límites normales."
    );
}

#[test]
fn out_of_range_values_are_never_reported_as_normal() {
    let exam = ExamInput::from_fields([("sexo", "F"), ("vmaxAortica", "1050"), ("ddvi", "180")])
        .expect("valid exam");
    let record = compile_report(&exam, &table(), &EngineOptions::default());

    let aortic = "Estenosis aórtica: valor fuera de rango declarado.";
    let ventricle = "Dimensiones del ventrículo izquierdo: valor fuera de rango declarado.";
    assert!(get(&record, "diag_valvulaAortica").starts_with(aortic));
    assert!(get(&record, "diag_ventriculoIzquierdo").starts_with(ventricle));

    let conclusions = get(&record, "diag_conclusiones");
    assert!(conclusions.contains(aortic));
    assert!(conclusions.contains(ventricle));
    assert!(!conclusions.contains("dentro de límites normales"));
}

#[test]
fn numeric_json_values_are_accepted() {
    let exam = ExamInput::from_json_str(r#"{"ddvi": 50, "dsvi": 30, "sexo": "masculino"}"#)
        .expect("valid exam");
    let record = compile_report(&exam, &table(), &EngineOptions::default());
    assert_eq!(get(&record, "ddvi"), "50");
    assert_eq!(get(&record, "feLineal"), "78.40");
    assert_eq!(get(&record, "fa"), "40.00");
}

#[test]
fn examination_bsa_formula_overrides_options() {
    let mut fields = vec![("peso", "90"), ("talla", "170")];
    let options = EngineOptions::default();

    let exam = ExamInput::from_fields(fields.clone()).expect("valid exam");
    let record = compile_report(&exam, &table(), &options);
    assert_eq!(get(&record, "superficieCorporal"), "2.01");

    fields.push(("formulaSc", "Mosteller"));
    let exam = ExamInput::from_fields(fields).expect("valid exam");
    let record = compile_report(&exam, &table(), &options);
    assert_eq!(get(&record, "formulaSc"), "mosteller");
    assert_eq!(get(&record, "superficieCorporal"), "2.06");

    let exam = ExamInput::from_fields([("peso", "90"), ("talla", "170")]).expect("valid exam");
    let options = EngineOptions::default().with_bsa_formula(BsaFormula::Mosteller);
    let record = compile_report(&exam, &table(), &options);
    assert_eq!(get(&record, "superficieCorporal"), "2.06");
}

#[test]
fn strict_units_disable_the_centimetre_heuristic() {
    let exam = ExamInput::from_fields([("septum", "9"), ("paredPosterior", "9"), ("ddvi", "45")])
        .expect("valid exam");

    let heuristic = compile_report(&exam, &table(), &EngineOptions::default());
    assert_eq!(get(&heuristic, "grp"), "4.00");

    let strict = compile_report(&exam, &table(), &EngineOptions::strict_units());
    assert_eq!(get(&strict, "grp"), "0.40");

    let explicit = EngineOptions::default().with_unit_policy(UnitPolicy::Millimetres);
    assert_eq!(compile_report(&exam, &table(), &explicit), strict);
}

#[test]
fn supplied_right_atrial_pressure_wins() {
    let exam = ExamInput::from_fields([
        ("vmaxTricuspidea", "300"),
        ("diametroVci", "25"),
        ("colapsoVci", "30"),
        ("pad", "5"),
    ])
    .expect("valid exam");
    let record = compile_report(&exam, &table(), &EngineOptions::default());
    assert_eq!(get(&record, "padEstimada"), "15");
    assert_eq!(get(&record, "psvd"), "41.0");
    assert_eq!(
        get(&record, "diag_presionPulmonar"),
        "Presión sistólica del ventrículo derecho levemente elevada, compatible con hipertensión pulmonar leve."
    );
}
