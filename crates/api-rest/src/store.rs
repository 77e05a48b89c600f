//! In-memory patient store.
//!
//! Records live for the lifetime of the process. Deletion is soft: the
//! record is flagged inactive and disappears from listings and statistics,
//! but keeps its data. Listing returns records in insertion order.

use crate::results::generate_results;
use chrono::Local;
use clinilab_core::dates::age_in_years_today;
use clinilab_core::{Patient, PatientPayload, PersonalData, Statistics, Study, StudyKind};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// A stored patient: the wire-visible record plus bookkeeping fields.
///
/// Serializes with the patient fields inline, so clients that only know the
/// `Patient` shape read it unchanged.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientRecord {
    #[serde(flatten)]
    pub patient: Patient,

    #[serde(rename = "fecha_registro")]
    pub registered_at: String,

    #[serde(rename = "activo")]
    pub active: bool,

    #[serde(rename = "fecha_modificacion", default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,

    #[serde(rename = "fecha_eliminacion", default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

/// Local timestamp in the ISO shape the dashboard's date parser accepts.
fn now_iso() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Process-lifetime patient storage.
#[derive(Debug, Default)]
pub struct PatientStore {
    records: RwLock<Vec<PatientRecord>>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a patient: assign an identifier, compute the age, stamp the
    /// study metadata and generate its results.
    pub async fn create(&self, payload: PatientPayload) -> PatientRecord {
        let results = generate_results(payload.study_kind, payload.personal.sex);
        let record = PatientRecord {
            patient: Patient {
                id: uuid::Uuid::new_v4().simple().to_string(),
                personal: PersonalData {
                    age: age_in_years_today(&payload.personal.birth_date),
                    ..payload.personal
                },
                address: payload.address,
                study: Study {
                    kind: payload.study_kind,
                    display_name: payload.study_kind.display_name().to_owned(),
                    created_at: now_iso(),
                },
                results,
            },
            registered_at: now_iso(),
            active: true,
            modified_at: None,
            deleted_at: None,
        };

        self.records.write().await.push(record.clone());
        tracing::info!(id = %record.patient.id, study = %record.patient.study.kind, "patient created");
        record
    }

    /// All active patients, in insertion order.
    pub async fn list(&self) -> Vec<Patient> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.active)
            .map(|r| r.patient.clone())
            .collect()
    }

    /// One active patient record by identifier.
    pub async fn get(&self, id: &str) -> Option<PatientRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.active && r.patient.id == id)
            .cloned()
    }

    /// Update an active patient's personal data, address and study type.
    ///
    /// The identifier is preserved and the age recomputed from the new birth
    /// date. Results are kept as generated at creation time. Returns `None`
    /// when no active record matches.
    pub async fn update(&self, id: &str, payload: PatientPayload) -> Option<Patient> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.active && r.patient.id == id)?;

        record.patient.personal = PersonalData {
            age: age_in_years_today(&payload.personal.birth_date),
            ..payload.personal
        };
        record.patient.address = payload.address;
        record.patient.study.kind = payload.study_kind;
        record.patient.study.display_name = payload.study_kind.display_name().to_owned();
        record.modified_at = Some(now_iso());

        tracing::info!(id = %record.patient.id, "patient updated");
        Some(record.patient.clone())
    }

    /// Soft-delete an active patient. Returns false when no active record
    /// matches.
    pub async fn delete(&self, id: &str) -> bool {
        let mut records = self.records.write().await;
        match records
            .iter_mut()
            .find(|r| r.active && r.patient.id == id)
        {
            Some(record) => {
                record.active = false;
                record.deleted_at = Some(now_iso());
                tracing::info!(id, "patient soft-deleted");
                true
            }
            None => false,
        }
    }

    /// Dashboard statistics over the active records.
    ///
    /// `pendientes`/`en_proceso` stay unset: this store has no workflow
    /// states, and the dashboard shows those cards as unavailable.
    pub async fn statistics(&self) -> Statistics {
        let records = self.records.read().await;
        let today = Local::now().format("%Y-%m-%d").to_string();

        let mut statistics = Statistics::default();
        for kind in StudyKind::ALL {
            statistics.by_study_kind.insert(kind.to_wire().to_owned(), 0);
        }

        for record in records.iter().filter(|r| r.active) {
            statistics.total_patients += 1;
            if record.patient.study.created_at.starts_with(&today) {
                statistics.studies_today += 1;
            }
            *statistics
                .by_study_kind
                .entry(record.patient.study.kind.to_wire().to_owned())
                .or_insert(0) += 1;
        }

        statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinilab_core::{Address, Sex};

    fn payload(name: &str, kind: StudyKind) -> PatientPayload {
        PatientPayload {
            personal: PersonalData {
                name: name.to_owned(),
                paternal_surname: "Pruebas".to_owned(),
                birth_date: "1990-01-15".to_owned(),
                sex: Sex::Male,
                age: None,
            },
            address: Address {
                postal_code: "22000".to_owned(),
                colony: "Centro".to_owned(),
                municipality: "Tijuana".to_owned(),
                state: "Baja California".to_owned(),
            },
            study_kind: kind,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_age_and_fifteen_results() {
        let store = PatientStore::new();
        let record = store.create(payload("Ana", StudyKind::BiometriaHematica)).await;

        assert_eq!(record.patient.id.len(), 32);
        assert!(record.patient.personal.age.is_some());
        assert_eq!(record.patient.results.len(), 15);
        assert_eq!(
            record.patient.study.display_name,
            "Biometría Hemática Completa"
        );
        assert!(record.active);
    }

    #[tokio::test]
    async fn list_returns_active_records_in_insertion_order() {
        let store = PatientStore::new();
        store.create(payload("Ana", StudyKind::BiometriaHematica)).await;
        store.create(payload("Beto", StudyKind::ExamenOrina)).await;

        let names: Vec<String> = store
            .list()
            .await
            .into_iter()
            .map(|p| p.personal.name)
            .collect();
        assert_eq!(names, ["Ana", "Beto"]);
    }

    #[tokio::test]
    async fn soft_delete_hides_record_from_list_get_and_statistics() {
        let store = PatientStore::new();
        let record = store.create(payload("Ana", StudyKind::BiometriaHematica)).await;
        let id = record.patient.id.clone();

        assert!(store.delete(&id).await);
        assert!(store.list().await.is_empty());
        assert!(store.get(&id).await.is_none());
        assert_eq!(store.statistics().await.total_patients, 0);

        // Second delete finds no active record.
        assert!(!store.delete(&id).await);
    }

    #[tokio::test]
    async fn update_preserves_identity_and_results() {
        let store = PatientStore::new();
        let record = store.create(payload("Ana", StudyKind::BiometriaHematica)).await;
        let id = record.patient.id.clone();
        let original_results = record.patient.results.clone();

        let mut changed = payload("Ana María", StudyKind::QuimicaSanguinea);
        changed.personal.birth_date = "1985-12-01".to_owned();
        let updated = store.update(&id, changed).await.expect("active record");

        assert_eq!(updated.id, id);
        assert_eq!(updated.personal.name, "Ana María");
        assert_eq!(updated.study.kind, StudyKind::QuimicaSanguinea);
        assert_eq!(updated.results, original_results);
        assert_ne!(updated.personal.age, record.patient.personal.age);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_none() {
        let store = PatientStore::new();
        assert!(store
            .update("missing", payload("Ana", StudyKind::ExamenOrina))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn statistics_count_today_and_by_study_kind() {
        let store = PatientStore::new();
        store.create(payload("Ana", StudyKind::BiometriaHematica)).await;
        store.create(payload("Beto", StudyKind::BiometriaHematica)).await;
        store.create(payload("Carla", StudyKind::ExamenOrina)).await;

        let statistics = store.statistics().await;
        assert_eq!(statistics.total_patients, 3);
        assert_eq!(statistics.studies_today, 3);
        assert_eq!(statistics.by_study_kind.get("biometria_hematica"), Some(&2));
        assert_eq!(statistics.by_study_kind.get("quimica_sanguinea"), Some(&0));
        assert_eq!(statistics.by_study_kind.get("examen_orina"), Some(&1));
        assert_eq!(statistics.pending, None);
        assert_eq!(statistics.in_process, None);
    }
}
