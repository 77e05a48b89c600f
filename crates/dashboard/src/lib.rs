//! # CliniLab Dashboard
//!
//! Controllers for the patient dashboard, kept free of any rendering or
//! transport concern:
//!
//! - [`coordinator::ListCoordinator`] owns the authoritative patient
//!   collection and the joined statistics/list load
//! - [`form::FormController`] owns one modal's lifecycle (create or edit),
//!   validation, and save dispatch
//! - [`resolver::AddressResolver`] keeps the address sub-form consistent with
//!   the asynchronous postal-code lookup, discarding stale responses
//! - [`stats`] and [`view`] turn wire data into display models
//!
//! Controllers talk to the backend exclusively through the traits in
//! [`gateway`], so tests substitute deterministic in-memory gateways.
//!
//! Everything runs on a single cooperative task: controllers are `&mut self`
//! state machines whose only suspension points are the gateway calls.

pub mod coordinator;
pub mod form;
pub mod gateway;
pub mod resolver;
pub mod stats;
pub mod view;

pub use coordinator::{DeleteRequest, ListCoordinator};
pub use form::{FormController, FormMode};
pub use gateway::{PatientGateway, PostalLookup};
pub use resolver::{AddressResolver, Applied, LookupTicket};
pub use stats::{CardValue, StatisticsCards};
pub use view::{patient_row, results_view, PatientRow, ResultRow, ResultsView};

use clinilab_core::CoreError;

/// Errors surfaced by the dashboard controllers.
///
/// Either a local validation failure (inline, blocks submission) or a
/// backend/API failure (dismissible notice, state preserved). None are fatal.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] api_client::ApiError),
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;
