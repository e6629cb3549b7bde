//! Typed examination input.
//!
//! The form arrives as one flat object of named fields. Each section struct
//! picks its own fields out of that object (`#[serde(flatten)]`), so the
//! JSON shape stays flat while the compiler works with typed sections.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// One raw form value. Strings, numbers and booleans are accepted; `null`
/// reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Field(String);

impl Field {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string, number or null")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Field, E> {
        Ok(Field::new(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Field, E> {
        Ok(Field(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Field, E> {
        Ok(Field(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Field, E> {
        Ok(Field(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Field, E> {
        Ok(Field(value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Field, E> {
        Ok(Field(value.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Field, E> {
        Ok(Field::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Field, E> {
        Ok(Field::default())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldVisitor)
    }
}

/// Patient demographics and anthropometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientSection {
    #[serde(rename = "nombre")]
    pub name: Field,
    #[serde(rename = "documento")]
    pub document: Field,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: Field,
    #[serde(rename = "fechaEstudio")]
    pub study_date: Field,
    /// Age typed by hand; used when the dates cannot be read.
    #[serde(rename = "edad")]
    pub age: Field,
    #[serde(rename = "sexo")]
    pub sex: Field,
    /// Weight, kg.
    #[serde(rename = "peso")]
    pub weight: Field,
    /// Height, cm.
    #[serde(rename = "talla")]
    pub height: Field,
    /// BSA formula selector; overrides the engine default when readable.
    #[serde(rename = "formulaSc")]
    pub bsa_formula: Field,
    #[serde(rename = "frecuenciaCardiaca")]
    pub heart_rate: Field,
}

/// M-mode/2D left ventricle measurements (mm, ml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeftVentricleSection {
    #[serde(rename = "ddvi")]
    pub diastolic_diameter: Field,
    #[serde(rename = "dsvi")]
    pub systolic_diameter: Field,
    #[serde(rename = "septum")]
    pub septum: Field,
    #[serde(rename = "paredPosterior")]
    pub posterior_wall: Field,
    #[serde(rename = "vdf")]
    pub end_diastolic_volume: Field,
    #[serde(rename = "vsf")]
    pub end_systolic_volume: Field,
}

/// Mitral inflow, pulmonary vein and tissue Doppler (cm/s, ms).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiastolicSection {
    #[serde(rename = "ondaE")]
    pub e_wave: Field,
    #[serde(rename = "ondaA")]
    pub a_wave: Field,
    #[serde(rename = "tiempoDesaceleracion")]
    pub deceleration_time: Field,
    #[serde(rename = "trivi")]
    pub ivrt: Field,
    #[serde(rename = "ondaSPulmonar")]
    pub pulmonary_s_wave: Field,
    #[serde(rename = "ondaDPulmonar")]
    pub pulmonary_d_wave: Field,
    #[serde(rename = "duracionAr")]
    pub ar_duration: Field,
    #[serde(rename = "duracionA")]
    pub a_duration: Field,
    #[serde(rename = "ePrimaSeptal")]
    pub e_prime_septal: Field,
    #[serde(rename = "ePrimaLateral")]
    pub e_prime_lateral: Field,
}

/// Right ventricle, right atrium and inferior vena cava.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RightHeartSection {
    #[serde(rename = "diametroBasalVd")]
    pub rv_basal_diameter: Field,
    #[serde(rename = "diametroLongitudinalVd")]
    pub rv_longitudinal_diameter: Field,
    #[serde(rename = "diametroBasalVi")]
    pub lv_basal_diameter: Field,
    #[serde(rename = "tapse")]
    pub tapse: Field,
    #[serde(rename = "ondaSTricuspidea")]
    pub tricuspid_s_wave: Field,
    #[serde(rename = "areaDiastolicaVd")]
    pub rv_diastolic_area: Field,
    #[serde(rename = "areaSistolicaVd")]
    pub rv_systolic_area: Field,
    #[serde(rename = "areaAd")]
    pub ra_area: Field,
    #[serde(rename = "diametroVci")]
    pub ivc_diameter: Field,
    #[serde(rename = "colapsoVci")]
    pub ivc_collapse: Field,
    /// Right atrial pressure supplied by the operator, mmHg.
    #[serde(rename = "pad")]
    pub right_atrial_pressure: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeftAtriumSection {
    #[serde(rename = "diametroAi")]
    pub diameter: Field,
    #[serde(rename = "areaAi")]
    pub area: Field,
    #[serde(rename = "area4c")]
    pub area_4c: Field,
    #[serde(rename = "area2c")]
    pub area_2c: Field,
    #[serde(rename = "longitudAi")]
    pub length: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AorticValveSection {
    #[serde(rename = "vmaxAortica")]
    pub peak_velocity: Field,
    #[serde(rename = "gradienteMedioAortico")]
    pub mean_gradient: Field,
    #[serde(rename = "diametroTsvi")]
    pub lvot_diameter: Field,
    #[serde(rename = "itvTsvi")]
    pub lvot_vti: Field,
    #[serde(rename = "itvAortica")]
    pub aortic_vti: Field,
    #[serde(rename = "insuficienciaAortica")]
    pub regurgitation: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MitralValveSection {
    #[serde(rename = "vmaxMitral")]
    pub peak_velocity: Field,
    #[serde(rename = "gradienteMedioMitral")]
    pub mean_gradient: Field,
    #[serde(rename = "thpMitral")]
    pub pressure_half_time: Field,
    #[serde(rename = "insuficienciaMitral")]
    pub regurgitation: Field,
    #[serde(rename = "radioPisa")]
    pub pisa_radius: Field,
    #[serde(rename = "velocidadAliasing")]
    pub aliasing_velocity: Field,
    #[serde(rename = "vmaxRegurgitanteMitral")]
    pub regurgitant_peak_velocity: Field,
    #[serde(rename = "itvRegurgitanteMitral")]
    pub regurgitant_vti: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TricuspidPulmonarySection {
    /// Tricuspid regurgitation peak velocity, cm/s.
    #[serde(rename = "vmaxTricuspidea")]
    pub tricuspid_regurgitant_velocity: Field,
    #[serde(rename = "insuficienciaTricuspidea")]
    pub tricuspid_regurgitation: Field,
    #[serde(rename = "vmaxPulmonar")]
    pub pulmonary_peak_velocity: Field,
    #[serde(rename = "insuficienciaPulmonar")]
    pub pulmonary_regurgitation: Field,
    #[serde(rename = "tiempoAceleracionPulmonar")]
    pub pulmonary_acceleration_time: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AortaSection {
    #[serde(rename = "raizAortica")]
    pub root: Field,
    #[serde(rename = "aortaAscendente")]
    pub ascending: Field,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PericardiumSection {
    #[serde(rename = "derramePericardico")]
    pub effusion: Field,
}

/// One complete examination snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamInput {
    #[serde(flatten)]
    pub patient: PatientSection,
    #[serde(flatten)]
    pub left_ventricle: LeftVentricleSection,
    #[serde(flatten)]
    pub diastolic: DiastolicSection,
    #[serde(flatten)]
    pub right_heart: RightHeartSection,
    #[serde(flatten)]
    pub left_atrium: LeftAtriumSection,
    #[serde(flatten)]
    pub aortic_valve: AorticValveSection,
    #[serde(flatten)]
    pub mitral_valve: MitralValveSection,
    #[serde(flatten)]
    pub tricuspid_pulmonary: TricuspidPulmonarySection,
    #[serde(flatten)]
    pub aorta: AortaSection,
    #[serde(flatten)]
    pub pericardium: PericardiumSection,
}

impl ExamInput {
    /// Parse a flat JSON object of form fields.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build from `(field, value)` pairs; unknown field names are ignored.
    pub fn from_fields<'a, I>(fields: I) -> serde_json::Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let map: serde_json::Map<String, serde_json::Value> = fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), serde_json::Value::from(value)))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map))
    }
}
