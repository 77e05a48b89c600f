//! Patient list coordinator.
//!
//! Owns the authoritative in-memory patient collection. The collection is
//! replaced wholesale by a completed reload and never patched field by field;
//! mutations (save, delete) go to the backend and then trigger a reload, so
//! the source of truth is always the backend's current state.

use crate::gateway::PatientGateway;
use crate::view::{results_view, ResultsView};
use crate::{DashboardError, DashboardResult};
use clinilab_core::{Patient, Statistics};

/// Evidence that the user asked to delete a specific patient.
///
/// Deletion is two-step: [`ListCoordinator::request_delete`] produces this
/// token and only [`ListCoordinator::confirm_delete`] performs the call.
/// Dropping the token cancels the deletion with no backend traffic.
#[derive(Debug)]
pub struct DeleteRequest {
    id: String,
    display_name: String,
}

impl DeleteRequest {
    pub fn patient_id(&self) -> &str {
        &self.id
    }

    /// Name to show in the confirmation prompt.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Holds the loaded patient collection and statistics, and dispatches the
/// list-level actions.
#[derive(Debug, Default)]
pub struct ListCoordinator {
    patients: Vec<Patient>,
    statistics: Option<Statistics>,
    loading: bool,
    notice: Option<String>,
}

impl ListCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection as of the last completed reload.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Statistics as of the last completed reload; `None` until the first
    /// load commits.
    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    /// True while a load is in flight. Renderers show the loading indicator
    /// instead of partial data.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Load (or reload) statistics and the patient list.
    ///
    /// The two fetches run concurrently and their results commit only after
    /// both settle successfully; on any failure the previously committed
    /// collection and statistics are kept untouched and a notice is
    /// recorded.
    pub async fn load<G: PatientGateway>(&mut self, gateway: &G) -> DashboardResult<()> {
        self.loading = true;
        let (statistics, patients) = tokio::join!(gateway.statistics(), gateway.list_patients());
        self.loading = false;

        match (statistics, patients) {
            (Ok(statistics), Ok(patients)) => {
                tracing::debug!(total = patients.len(), "dashboard data loaded");
                self.patients = patients;
                self.statistics = Some(statistics);
                self.notice = None;
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(error = %err, "dashboard load failed");
                self.notice = Some(format!("No se pudieron cargar los datos: {err}"));
                Err(DashboardError::Api(err))
            }
        }
    }

    /// Find a loaded patient by identifier.
    pub fn find(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Read-only results view for a loaded patient.
    pub fn view_results(&self, id: &str) -> Option<ResultsView> {
        self.find(id).map(results_view)
    }

    /// Begin deleting a patient. Returns `None` for identifiers not in the
    /// loaded collection.
    pub fn request_delete(&self, id: &str) -> Option<DeleteRequest> {
        self.find(id).map(|p| DeleteRequest {
            id: p.id.clone(),
            display_name: p.personal.full_name(),
        })
    }

    /// Execute a confirmed deletion: exactly one delete call, then one full
    /// reload. The collection is never edited locally: even the deleted row
    /// disappears only once the reload commits.
    ///
    /// # Errors
    ///
    /// On delete or reload failure the collection stays as it was and the
    /// failure is recorded as a notice.
    pub async fn confirm_delete<G: PatientGateway>(
        &mut self,
        gateway: &G,
        request: DeleteRequest,
    ) -> DashboardResult<()> {
        if let Err(err) = gateway.delete_patient(&request.id).await {
            tracing::warn!(id = %request.id, error = %err, "delete failed");
            self.notice = Some(format!("No se pudo eliminar el paciente: {err}"));
            return Err(DashboardError::Api(err));
        }
        tracing::info!(id = %request.id, "patient deleted");
        self.load(gateway).await
    }
}
