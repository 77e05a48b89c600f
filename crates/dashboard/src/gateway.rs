//! Backend seams the controllers depend on.
//!
//! The traits strip the REST envelopes down to the values the controllers
//! actually consume; [`api_client::ApiClient`] implements both for the real
//! backend and tests provide in-memory fakes.

use api_client::{ApiClient, ApiResult};
use async_trait::async_trait;
use clinilab_core::{Patient, PatientPayload, PostalCode, PostalCodeInfo, Statistics};

/// Patient CRUD and statistics, as consumed by the coordinator and the form
/// controller.
#[async_trait]
pub trait PatientGateway: Send + Sync {
    async fn list_patients(&self) -> ApiResult<Vec<Patient>>;

    async fn statistics(&self) -> ApiResult<Statistics>;

    /// Create a patient; the backend assigns the identifier and generates
    /// the study results.
    async fn create_patient(&self, payload: &PatientPayload) -> ApiResult<Patient>;

    /// Update the patient behind `id`, which is preserved by the backend.
    async fn update_patient(&self, id: &str, payload: &PatientPayload) -> ApiResult<Patient>;

    async fn delete_patient(&self, id: &str) -> ApiResult<()>;
}

/// Postal-code directory lookup, as consumed by the address resolver.
#[async_trait]
pub trait PostalLookup: Send + Sync {
    async fn resolve(&self, code: &PostalCode) -> ApiResult<PostalCodeInfo>;
}

#[async_trait]
impl PatientGateway for ApiClient {
    async fn list_patients(&self) -> ApiResult<Vec<Patient>> {
        Ok(self.list_patients().await?.patients)
    }

    async fn statistics(&self) -> ApiResult<Statistics> {
        self.statistics().await
    }

    async fn create_patient(&self, payload: &PatientPayload) -> ApiResult<Patient> {
        Ok(self.create_patient(payload).await?.patient)
    }

    async fn update_patient(&self, id: &str, payload: &PatientPayload) -> ApiResult<Patient> {
        Ok(self.update_patient(id, payload).await?.patient)
    }

    async fn delete_patient(&self, id: &str) -> ApiResult<()> {
        self.delete_patient(id).await.map(|_| ())
    }
}

#[async_trait]
impl PostalLookup for ApiClient {
    async fn resolve(&self, code: &PostalCode) -> ApiResult<PostalCodeInfo> {
        self.postal_code_info(code).await
    }
}
