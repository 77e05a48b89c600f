//! # CliniLab Core
//!
//! Core domain logic for the CliniLab patient dashboard.
//!
//! This crate contains the pure, transport-free parts of the system:
//! - The wire-faithful data model shared by the REST backend and its clients
//! - Lab-result classification and summary computation
//! - Age and display-date formatting
//! - Patient-form drafts, required-field validation and payload construction
//! - Client runtime configuration
//!
//! **No I/O concerns**: HTTP servers, HTTP clients, and terminal rendering
//! belong in `api-rest`, `api-client`, and `clinilab-dashboard`.

pub mod classify;
pub mod config;
pub mod dates;
pub mod error;
pub mod form;
pub mod model;
pub mod study;

pub use classify::{classify, summarize, Classification, ResultStatus, ResultsSummary};
pub use config::ClientConfig;
pub use error::{CoreError, CoreResult};
pub use form::{FormField, PatientDraft};
pub use model::{
    Address, ErrorRes, LabResult, MessageRes, Patient, PatientListRes, PatientPayload, PatientRes,
    PersonalData, PostalCodeInfo, Sex, Statistics, Study,
};
pub use study::StudyKind;

pub use clinilab_types::{NonEmptyText, PostalCode, TextError};
