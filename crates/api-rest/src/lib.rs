//! # API REST
//!
//! REST backend for the CliniLab dashboard.
//!
//! Handles:
//! - Patient CRUD over an in-memory store (soft delete, wholesale listing)
//! - Automatic lab-result generation when a patient is created
//! - Dashboard statistics
//! - The postal-code directory endpoint (`/api-externa/cp/{code}`)
//! - OpenAPI/Swagger documentation
//!
//! Storage is process-lifetime only; persistence is out of scope for this
//! system.

#![warn(rust_2018_idioms)]

pub mod handlers;
pub mod postal;
pub mod results;
pub mod store;

pub use handlers::{router, ApiDoc, AppState};
pub use store::PatientStore;
