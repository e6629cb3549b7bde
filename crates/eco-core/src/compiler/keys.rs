//! Field names of the compiled report record.
//!
//! The document template substitutes these names; every one of them is
//! present in every compiled record.

/// All report keys, grouped by input section.
pub const REPORT_KEYS: &[&str] = &[
    // patient
    "nombre",
    "documento",
    "fechaNacimiento",
    "fechaEstudio",
    "edad",
    "sexo",
    "peso",
    "talla",
    "formulaSc",
    "superficieCorporal",
    "frecuenciaCardiaca",
    // left ventricle
    "ddvi",
    "dsvi",
    "septum",
    "paredPosterior",
    "vdf",
    "vsf",
    "feLineal",
    "fa",
    "feSimpson",
    "volumenLatido",
    "masaVi",
    "imvi",
    "grp",
    "vdfi",
    "tipoHipertrofia",
    "diag_ventriculoIzquierdo",
    "diag_funcionSistolica",
    "diag_geometria",
    // diastolic function
    "ondaE",
    "ondaA",
    "tiempoDesaceleracion",
    "trivi",
    "ondaSPulmonar",
    "ondaDPulmonar",
    "duracionAr",
    "duracionA",
    "ePrimaSeptal",
    "ePrimaLateral",
    "relacionEA",
    "relacionSD",
    "diferenciaArA",
    "ePrimaPromedio",
    "relacionEePrima",
    "diag_funcionDiastolica",
    // right heart
    "diametroBasalVd",
    "diametroLongitudinalVd",
    "diametroBasalVi",
    "tapse",
    "ondaSTricuspidea",
    "areaDiastolicaVd",
    "areaSistolicaVd",
    "areaAd",
    "diametroVci",
    "colapsoVci",
    "pad",
    "caf",
    "indiceExcentricidad",
    "relacionVdVi",
    "padEstimada",
    "diag_ventriculoDerecho",
    "diag_auriculaDerecha",
    "diag_venaCava",
    // left atrium
    "diametroAi",
    "areaAi",
    "area4c",
    "area2c",
    "longitudAi",
    "volumenAi",
    "volumenAiIndexado",
    "diag_auriculaIzquierda",
    // aortic valve
    "vmaxAortica",
    "gradienteMedioAortico",
    "diametroTsvi",
    "itvTsvi",
    "itvAortica",
    "insuficienciaAortica",
    "gradientePicoAortico",
    "areaValvularAortica",
    "diag_valvulaAortica",
    // mitral valve
    "vmaxMitral",
    "gradienteMedioMitral",
    "thpMitral",
    "insuficienciaMitral",
    "radioPisa",
    "velocidadAliasing",
    "vmaxRegurgitanteMitral",
    "itvRegurgitanteMitral",
    "gradientePicoMitral",
    "areaValvularMitral",
    "ore",
    "volumenRegurgitante",
    "diag_valvulaMitral",
    // tricuspid and pulmonary valves, pulmonary pressure
    "vmaxTricuspidea",
    "insuficienciaTricuspidea",
    "vmaxPulmonar",
    "insuficienciaPulmonar",
    "tiempoAceleracionPulmonar",
    "gradientePicoTricuspideo",
    "gradientePicoPulmonar",
    "psvd",
    "pmap",
    "diag_valvulaTricuspide",
    "diag_valvulaPulmonar",
    "diag_presionPulmonar",
    "diag_probabilidadHp",
    // aorta
    "raizAortica",
    "aortaAscendente",
    "diag_aorta",
    // pericardium
    "derramePericardico",
    "diag_pericardio",
    // summary
    "diag_conclusiones",
];

/// Key holding the summary of abnormal findings.
pub const CONCLUSIONS_KEY: &str = "diag_conclusiones";

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn keys_are_unique() {
        let unique: BTreeSet<_> = REPORT_KEYS.iter().collect();
        assert_eq!(unique.len(), REPORT_KEYS.len());
        assert!(REPORT_KEYS.contains(&CONCLUSIONS_KEY));
    }
}
