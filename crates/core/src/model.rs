//! Wire-faithful data model for the patient REST contract.
//!
//! Field names on the wire are Spanish (the contract predates this codebase);
//! Rust identifiers are English and mapped with `#[serde(rename)]`. The same
//! types are used on both sides of the HTTP boundary, so any change here is a
//! contract change.

use crate::study::StudyKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Patient sex as recorded on the study order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Human-readable label for display.
    pub fn display_name(self) -> &'static str {
        match self {
            Sex::Male => "Masculino",
            Sex::Female => "Femenino",
        }
    }
}

impl Default for Sex {
    fn default() -> Self {
        Sex::Male
    }
}

impl std::str::FromStr for Sex {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            other => Err(crate::CoreError::InvalidInput(format!(
                "unknown sex {other:?} (expected M or F)"
            ))),
        }
    }
}

/// Personal data block of a patient record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PersonalData {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "apellido_paterno")]
    pub paternal_surname: String,

    /// ISO date (`YYYY-MM-DD`).
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: String,

    #[serde(rename = "sexo")]
    pub sex: Sex,

    /// Age in whole years, computed by the backend on create/update.
    #[serde(rename = "edad", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl PersonalData {
    /// `"{name} {paternal_surname}"` for table rows and headers.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.paternal_surname)
    }
}

/// Address block. `municipality` and `state` are always derived from the
/// postal code by the directory lookup, never hand-entered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    #[serde(rename = "codigo_postal")]
    pub postal_code: String,

    #[serde(rename = "colonia")]
    pub colony: String,

    #[serde(rename = "municipio")]
    pub municipality: String,

    #[serde(rename = "estado")]
    pub state: String,
}

/// Study metadata stamped by the backend when the patient is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Study {
    #[serde(rename = "tipo")]
    pub kind: StudyKind,

    /// Full panel name (denormalised for display).
    #[serde(rename = "nombre")]
    pub display_name: String,

    /// ISO timestamp of when the study was generated.
    #[serde(rename = "fecha_creacion")]
    pub created_at: String,
}

/// A single lab parameter result.
///
/// Quantitative parameters are evaluated against a numeric `[min, max]`
/// range; qualitative ones against an expected categorical value. The
/// `normal` flag is computed by the backend when the value is drawn and is
/// authoritative; clients must not re-derive it from the bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "tipo")]
pub enum LabResult {
    #[serde(rename = "cuantitativo")]
    Quantitative {
        #[serde(rename = "parametro")]
        parameter: String,

        #[serde(rename = "valor")]
        value: f64,

        #[serde(rename = "unidad", default)]
        unit: String,

        #[serde(rename = "valor_minimo")]
        minimum: f64,

        #[serde(rename = "valor_maximo")]
        maximum: f64,

        /// True when `value` lies within `[minimum, maximum]`, inclusive.
        normal: bool,
    },
    #[serde(rename = "cualitativo")]
    Qualitative {
        #[serde(rename = "parametro")]
        parameter: String,

        #[serde(rename = "valor")]
        value: String,

        #[serde(rename = "unidad", default)]
        unit: String,

        /// The value considered normal for this parameter, when defined.
        #[serde(rename = "valor_normal", default)]
        expected: Option<String>,

        normal: bool,
    },
}

impl LabResult {
    /// Parameter name, independent of kind.
    pub fn parameter(&self) -> &str {
        match self {
            LabResult::Quantitative { parameter, .. } => parameter,
            LabResult::Qualitative { parameter, .. } => parameter,
        }
    }

    /// Measurement unit; empty for most qualitative parameters.
    pub fn unit(&self) -> &str {
        match self {
            LabResult::Quantitative { unit, .. } => unit,
            LabResult::Qualitative { unit, .. } => unit,
        }
    }

    /// The backend-computed normality flag.
    pub fn is_normal(&self) -> bool {
        match self {
            LabResult::Quantitative { normal, .. } => *normal,
            LabResult::Qualitative { normal, .. } => *normal,
        }
    }

    /// The measured value rendered as display text.
    pub fn value_text(&self) -> String {
        match self {
            LabResult::Quantitative { value, .. } => value.to_string(),
            LabResult::Qualitative { value, .. } => value.clone(),
        }
    }
}

/// A full patient record as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    /// Backend-assigned opaque identifier.
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "datos_personales")]
    pub personal: PersonalData,

    #[serde(rename = "direccion")]
    pub address: Address,

    #[serde(rename = "estudio")]
    pub study: Study,

    #[serde(rename = "resultados", default)]
    pub results: Vec<LabResult>,
}

impl Patient {
    /// Short display form of the identifier (last six characters, uppercased),
    /// matching what the dashboard prints in patient headers.
    pub fn short_id(&self) -> String {
        let chars: Vec<char> = self.id.chars().collect();
        let start = chars.len().saturating_sub(6);
        chars[start..].iter().collect::<String>().to_uppercase()
    }
}

/// The write payload for create and update operations. Never carries an
/// identifier: on update the identifier travels in the URL path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientPayload {
    #[serde(rename = "datos_personales")]
    pub personal: PersonalData,

    #[serde(rename = "direccion")]
    pub address: Address,

    #[serde(rename = "tipo_estudio")]
    pub study_kind: StudyKind,
}

/// Aggregate dashboard statistics, computed entirely by the backend.
///
/// `pending` and `in_process` are optional on the wire: a backend without
/// workflow states omits them, and the dashboard renders those cards in an
/// explicit "unavailable" state rather than inventing numbers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Statistics {
    #[serde(rename = "total_pacientes", default)]
    pub total_patients: u64,

    #[serde(rename = "estudios_hoy", default)]
    pub studies_today: u64,

    /// Active patient count per study-kind wire identifier.
    #[serde(rename = "por_tipo_estudio", default)]
    pub by_study_kind: BTreeMap<String, u64>,

    #[serde(rename = "pendientes", default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<u64>,

    #[serde(rename = "en_proceso", default, skip_serializing_if = "Option::is_none")]
    pub in_process: Option<u64>,
}

/// Directory answer for one postal code. Ephemeral: owned by the directory
/// service and never persisted on a patient beyond the chosen colony.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostalCodeInfo {
    #[serde(rename = "colonias", default)]
    pub colonies: Vec<String>,

    #[serde(rename = "municipio", default)]
    pub municipality: String,

    #[serde(rename = "estado", default)]
    pub state: String,
}

/// Response envelope for `GET /api/pacientes`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct PatientListRes {
    #[serde(rename = "pacientes", default)]
    pub patients: Vec<Patient>,

    #[serde(default)]
    pub total: u64,
}

/// Response envelope for create and update operations.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub message: String,

    #[serde(rename = "paciente")]
    pub patient: Patient,
}

/// Plain confirmation envelope (delete).
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

/// Error body shape used by every failing endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient_json() -> &'static str {
        r#"{
            "_id": "665f1c2ab8d34e0012a7f3c9",
            "datos_personales": {
                "nombre": "Laura",
                "apellido_paterno": "Mendoza",
                "fecha_nacimiento": "1991-04-02",
                "sexo": "F",
                "edad": 33
            },
            "direccion": {
                "codigo_postal": "22000",
                "colonia": "Centro",
                "municipio": "Tijuana",
                "estado": "Baja California"
            },
            "estudio": {
                "tipo": "biometria_hematica",
                "nombre": "Biometría Hemática Completa",
                "fecha_creacion": "2024-06-15T09:30:00-07:00"
            },
            "resultados": [
                {
                    "tipo": "cuantitativo",
                    "parametro": "Hemoglobina",
                    "valor": 12.1,
                    "unidad": "g/dL",
                    "valor_minimo": 12.0,
                    "valor_maximo": 16.0,
                    "normal": true
                },
                {
                    "tipo": "cualitativo",
                    "parametro": "Color",
                    "valor": "Amarillo claro",
                    "unidad": "",
                    "valor_normal": "Amarillo claro",
                    "normal": true
                }
            ]
        }"#
    }

    #[test]
    fn deserializes_full_patient() {
        let patient: Patient = serde_json::from_str(sample_patient_json()).expect("parse patient");
        assert_eq!(patient.personal.full_name(), "Laura Mendoza");
        assert_eq!(patient.personal.sex, Sex::Female);
        assert_eq!(patient.study.kind, StudyKind::BiometriaHematica);
        assert_eq!(patient.results.len(), 2);
        assert_eq!(patient.results[0].parameter(), "Hemoglobina");
        assert!(patient.results[1].is_normal());
    }

    #[test]
    fn lab_result_kind_dispatch_follows_tipo_tag() {
        let patient: Patient = serde_json::from_str(sample_patient_json()).expect("parse patient");
        assert!(matches!(patient.results[0], LabResult::Quantitative { .. }));
        assert!(matches!(patient.results[1], LabResult::Qualitative { .. }));
    }

    #[test]
    fn patient_round_trips_through_json() {
        let patient: Patient = serde_json::from_str(sample_patient_json()).expect("parse patient");
        let json = serde_json::to_string(&patient).expect("serialize");
        let back: Patient = serde_json::from_str(&json).expect("reparse");
        assert_eq!(patient, back);
    }

    #[test]
    fn payload_uses_contract_field_names() {
        let payload = PatientPayload {
            personal: PersonalData {
                name: "Juan".into(),
                paternal_surname: "Pérez".into(),
                birth_date: "2000-06-15".into(),
                sex: Sex::Male,
                age: None,
            },
            address: Address {
                postal_code: "64000".into(),
                colony: "Centro".into(),
                municipality: "Monterrey".into(),
                state: "Nuevo León".into(),
            },
            study_kind: StudyKind::ExamenOrina,
        };

        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["datos_personales"]["nombre"], "Juan");
        assert_eq!(value["datos_personales"]["apellido_paterno"], "Pérez");
        assert_eq!(value["direccion"]["codigo_postal"], "64000");
        assert_eq!(value["tipo_estudio"], "examen_orina");
        // No identifier and no backend-computed age on the write payload.
        assert!(value.get("_id").is_none());
        assert!(value["datos_personales"].get("edad").is_none());
    }

    #[test]
    fn short_id_uppercases_last_six_characters() {
        let patient: Patient = serde_json::from_str(sample_patient_json()).expect("parse patient");
        assert_eq!(patient.short_id(), "A7F3C9");
    }

    #[test]
    fn statistics_tolerate_absent_workflow_counts() {
        let stats: Statistics = serde_json::from_str(
            r#"{"total_pacientes": 4, "estudios_hoy": 1,
                "por_tipo_estudio": {"biometria_hematica": 3, "examen_orina": 1}}"#,
        )
        .expect("parse statistics");
        assert_eq!(stats.total_patients, 4);
        assert_eq!(stats.pending, None);
        assert_eq!(stats.in_process, None);
        assert_eq!(stats.by_study_kind.get("biometria_hematica"), Some(&3));
    }
}
