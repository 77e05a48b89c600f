//! # API Client
//!
//! Typed HTTP client for the CliniLab REST contract.
//!
//! One method per endpoint, all returning the wire types from
//! `clinilab-core`. The underlying `reqwest` client is built once with the
//! fixed transport timeout from [`ClientConfig`]; a hung request aborts and
//! surfaces as [`ApiError::Network`].

use clinilab_core::{
    ClientConfig, ErrorRes, MessageRes, Patient, PatientListRes, PatientPayload, PatientRes,
    PostalCode, PostalCodeInfo, Statistics,
};
use serde::de::DeserializeOwned;

/// Errors surfaced by REST calls.
///
/// Every variant is recoverable: the caller reports it and returns to its
/// previous state. Nothing here is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure or timeout; the request may never have reached the
    /// backend.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered 404 for the requested resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend answered with a non-success status other than 404.
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The client itself could not be constructed.
    #[error("client configuration error: {0}")]
    Config(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network(format!("request timed out: {err}"))
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Typed client over the patient API and the postal-code directory.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET /api/pacientes`: every active patient.
    pub async fn list_patients(&self) -> ApiResult<PatientListRes> {
        let res = self.http.get(self.config.api_url("/pacientes")).send().await?;
        decode(res, "list patients").await
    }

    /// `GET /api/pacientes/{id}`: one patient with results.
    pub async fn get_patient(&self, id: &str) -> ApiResult<Patient> {
        let url = self.config.api_url(&format!("/pacientes/{id}"));
        let res = self.http.get(url).send().await?;
        decode(res, "get patient").await
    }

    /// `POST /api/pacientes`: create a patient; the backend generates the
    /// study results and assigns the identifier.
    pub async fn create_patient(&self, payload: &PatientPayload) -> ApiResult<PatientRes> {
        let res = self
            .http
            .post(self.config.api_url("/pacientes"))
            .json(payload)
            .send()
            .await?;
        decode(res, "create patient").await
    }

    /// `PUT /api/pacientes/{id}`: update an existing patient.
    pub async fn update_patient(&self, id: &str, payload: &PatientPayload) -> ApiResult<PatientRes> {
        let url = self.config.api_url(&format!("/pacientes/{id}"));
        let res = self.http.put(url).json(payload).send().await?;
        decode(res, "update patient").await
    }

    /// `DELETE /api/pacientes/{id}`: remove a patient from the active set.
    pub async fn delete_patient(&self, id: &str) -> ApiResult<MessageRes> {
        let url = self.config.api_url(&format!("/pacientes/{id}"));
        let res = self.http.delete(url).send().await?;
        decode(res, "delete patient").await
    }

    /// `GET /api/estadisticas`: dashboard statistics.
    pub async fn statistics(&self) -> ApiResult<Statistics> {
        let res = self
            .http
            .get(self.config.api_url("/estadisticas"))
            .send()
            .await?;
        decode(res, "statistics").await
    }

    /// `GET /api-externa/cp/{code}`: postal-code directory lookup.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when the directory has no entry for the code.
    pub async fn postal_code_info(&self, code: &PostalCode) -> ApiResult<PostalCodeInfo> {
        let url = self.config.external_url(&format!("/cp/{code}"));
        let res = self.http.get(url).send().await?;
        decode(res, "postal code lookup").await
    }
}

/// Turn a response into the expected body, mapping failure statuses to the
/// error taxonomy. Failure bodies carry `{"error": "..."}`; when that shape
/// is absent the HTTP reason phrase is used instead.
async fn decode<T: DeserializeOwned>(res: reqwest::Response, context: &str) -> ApiResult<T> {
    let status = res.status();
    if status.is_success() {
        return res.json::<T>().await.map_err(|e| {
            tracing::error!(context, error = %e, "undecodable response body");
            ApiError::Decode(e.to_string())
        });
    }

    let message = match res.json::<ErrorRes>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    tracing::warn!(context, status = status.as_u16(), message, "backend call failed");

    if status == reqwest::StatusCode::NOT_FOUND {
        Err(ApiError::NotFound(message))
    } else {
        Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> reqwest::Response {
        let http_res = http::Response::builder()
            .status(status)
            .body(body.to_string())
            .expect("valid response");
        reqwest::Response::from(http_res)
    }

    #[tokio::test]
    async fn decodes_success_body() {
        let res = response(200, r#"{"message": "Paciente eliminado exitosamente"}"#);
        let body: MessageRes = decode(res, "test").await.expect("decodes");
        assert_eq!(body.message, "Paciente eliminado exitosamente");
    }

    #[tokio::test]
    async fn maps_404_with_error_body_to_not_found() {
        let res = response(404, r#"{"error": "Paciente no encontrado"}"#);
        let err = decode::<MessageRes>(res, "test").await.unwrap_err();
        match err {
            ApiError::NotFound(message) => assert_eq!(message, "Paciente no encontrado"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn maps_other_failures_to_backend_error() {
        let res = response(500, r#"{"error": "boom"}"#);
        let err = decode::<MessageRes>(res, "test").await.unwrap_err();
        match err {
            ApiError::Backend { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn falls_back_to_reason_phrase_without_error_body() {
        let res = response(502, "gateway exploded in plain text");
        let err = decode::<MessageRes>(res, "test").await.unwrap_err();
        match err {
            ApiError::Backend { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_success_body_is_a_decode_error() {
        let res = response(200, "not json");
        let err = decode::<MessageRes>(res, "test").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
