//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! HTTP client, so nothing reads process-wide environment variables during
//! request handling.

use crate::error::{CoreError, CoreResult};
use std::time::Duration;

/// Fixed transport timeout for every backend request. A hung request is
/// aborted after this long and surfaced as a network error.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const API_PREFIX: &str = "/api";
const EXTERNAL_PREFIX: &str = "/api-externa";

/// Where the dashboard finds its backend.
///
/// The backend mounts the patient API under `/api` and the postal-code
/// directory under `/api-externa` on the same host; both prefixes hang off
/// one base URL.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Create a config for the given backend base URL (scheme + host + port,
    /// no trailing path).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if the URL is empty or lacks an
    /// `http`/`https` scheme.
    pub fn new(base_url: impl Into<String>) -> CoreResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(CoreError::InvalidInput("base URL cannot be empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CoreError::InvalidInput(format!(
                "base URL must start with http:// or https://, got {base_url:?}"
            )));
        }
        Ok(Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Resolve from an optional environment value (`CLINILAB_BASE_URL`),
    /// falling back to the local development default.
    pub fn from_env_value(value: Option<String>) -> CoreResult<Self> {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self::new(value.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a patient-API path (`path` starts with `/`).
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Full URL for a postal-code directory path (`path` starts with `/`).
    pub fn external_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, EXTERNAL_PREFIX, path)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
