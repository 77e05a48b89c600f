//! Study panels offered by the laboratory.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A laboratory test panel that can be ordered for a patient.
///
/// The wire identifiers are fixed by the REST contract; `display_name`
/// returns the human-readable panel name shown in the dashboard.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum StudyKind {
    /// Complete blood count.
    #[serde(rename = "biometria_hematica")]
    BiometriaHematica,
    /// Metabolic blood-chemistry profile.
    #[serde(rename = "quimica_sanguinea")]
    QuimicaSanguinea,
    /// General urinalysis.
    #[serde(rename = "examen_orina")]
    ExamenOrina,
}

impl StudyKind {
    /// All panels, in menu order.
    pub const ALL: [StudyKind; 3] = [
        StudyKind::BiometriaHematica,
        StudyKind::QuimicaSanguinea,
        StudyKind::ExamenOrina,
    ];

    /// Wire identifier used in payloads and statistics keys.
    pub fn to_wire(self) -> &'static str {
        match self {
            StudyKind::BiometriaHematica => "biometria_hematica",
            StudyKind::QuimicaSanguinea => "quimica_sanguinea",
            StudyKind::ExamenOrina => "examen_orina",
        }
    }

    /// Parse a wire identifier.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "biometria_hematica" => Some(StudyKind::BiometriaHematica),
            "quimica_sanguinea" => Some(StudyKind::QuimicaSanguinea),
            "examen_orina" => Some(StudyKind::ExamenOrina),
            _ => None,
        }
    }

    /// Full panel name for display.
    pub fn display_name(self) -> &'static str {
        match self {
            StudyKind::BiometriaHematica => "Biometría Hemática Completa",
            StudyKind::QuimicaSanguinea => "Química Sanguínea (Perfil Metabólico)",
            StudyKind::ExamenOrina => "Examen General de Orina",
        }
    }
}

impl Default for StudyKind {
    fn default() -> Self {
        StudyKind::BiometriaHematica
    }
}

impl std::fmt::Display for StudyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_wire())
    }
}

impl std::str::FromStr for StudyKind {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StudyKind::from_wire(s).ok_or_else(|| {
            crate::CoreError::InvalidInput(format!(
                "unknown study kind {s:?} (expected one of: biometria_hematica, quimica_sanguinea, examen_orina)"
            ))
        })
    }
}
