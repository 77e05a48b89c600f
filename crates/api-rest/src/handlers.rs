//! HTTP endpoints with axum.
//!
//! Every failing response carries an `{"error": "..."}` body alongside its
//! status code, matching what the dashboard's client decodes.

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::postal;
use crate::store::{PatientRecord, PatientStore};
use clinilab_core::{
    Address, ErrorRes, LabResult, MessageRes, Patient, PatientListRes, PatientPayload, PatientRes,
    PersonalData, PostalCode, PostalCodeInfo, Sex, Statistics, Study, StudyKind,
};

/// Application state shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PatientStore>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list_patients,
        get_patient,
        create_patient,
        update_patient,
        delete_patient,
        statistics,
        postal_code_lookup,
    ),
    components(schemas(
        Patient,
        PatientRecord,
        PersonalData,
        Address,
        Study,
        StudyKind,
        Sex,
        LabResult,
        PatientPayload,
        PatientListRes,
        PatientRes,
        MessageRes,
        ErrorRes,
        Statistics,
        PostalCodeInfo,
    ))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
}

/// Build the full application router with a fresh, empty store.
pub fn router() -> Router {
    router_with_store(Arc::new(PatientStore::new()))
}

/// Build the full application router over an existing store.
pub fn router_with_store(store: Arc<PatientStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/api/pacientes", get(list_patients).post(create_patient))
        .route(
            "/api/pacientes/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/api/estadisticas", get(statistics))
        .route("/api-externa/cp/:codigo", get(postal_code_lookup))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/pacientes",
    responses(
        (status = 200, description = "All active patients", body = PatientListRes)
    )
)]
/// List every active patient.
///
/// Soft-deleted records are excluded. The order is insertion order, which
/// the dashboard presents as-is.
#[axum::debug_handler]
async fn list_patients(State(state): State<AppState>) -> Json<PatientListRes> {
    let patients = state.store.list().await;
    let total = patients.len() as u64;
    Json(PatientListRes { patients, total })
}

#[utoipa::path(
    get,
    path = "/api/pacientes/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "The patient with its results", body = PatientRecord),
        (status = 404, description = "No active patient with this identifier", body = ErrorRes)
    )
)]
/// Fetch one active patient, results included.
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<PatientRecord>, ApiError> {
    match state.store.get(&id).await {
        Some(record) => Ok(Json(record)),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            "Paciente no encontrado",
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/pacientes",
    request_body = PatientPayload,
    responses(
        (status = 201, description = "Patient created with generated results", body = PatientRes),
        (status = 400, description = "Incomplete personal data", body = ErrorRes)
    )
)]
/// Create a patient and generate its lab results.
///
/// The study panel and the patient's sex drive the generated parameter set;
/// the identifier and the age are assigned here.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(payload): Json<PatientPayload>,
) -> Result<(StatusCode, Json<PatientRes>), ApiError> {
    validate_payload(&payload)?;

    let record = state.store.create(payload).await;
    Ok((
        StatusCode::CREATED,
        Json(PatientRes {
            message: "Paciente creado exitosamente".to_owned(),
            patient: record.patient,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/pacientes/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    request_body = PatientPayload,
    responses(
        (status = 200, description = "Patient updated", body = PatientRes),
        (status = 400, description = "Incomplete personal data", body = ErrorRes),
        (status = 404, description = "No active patient with this identifier", body = ErrorRes)
    )
)]
/// Update an active patient under its original identifier.
///
/// Personal data, address and study type are replaced; the age is recomputed
/// from the new birth date. Results stay as generated at creation.
#[axum::debug_handler]
async fn update_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(payload): Json<PatientPayload>,
) -> Result<Json<PatientRes>, ApiError> {
    validate_payload(&payload)?;

    match state.store.update(&id, payload).await {
        Some(patient) => Ok(Json(PatientRes {
            message: "Paciente actualizado exitosamente".to_owned(),
            patient,
        })),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            "Paciente no encontrado",
        )),
    }
}

#[utoipa::path(
    delete,
    path = "/api/pacientes/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient removed from the active set", body = MessageRes),
        (status = 404, description = "No active patient with this identifier", body = ErrorRes)
    )
)]
/// Soft-delete a patient.
///
/// The record is flagged inactive rather than removed, so it vanishes from
/// listings and statistics while its data is retained.
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MessageRes>, ApiError> {
    if state.store.delete(&id).await {
        Ok(Json(MessageRes {
            message: "Paciente eliminado exitosamente".to_owned(),
        }))
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            "Paciente no encontrado",
        ))
    }
}

#[utoipa::path(
    get,
    path = "/api/estadisticas",
    responses(
        (status = 200, description = "Dashboard statistics", body = Statistics)
    )
)]
/// Dashboard statistics over the active records.
#[axum::debug_handler]
async fn statistics(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.store.statistics().await)
}

#[utoipa::path(
    get,
    path = "/api-externa/cp/{codigo}",
    params(("codigo" = String, Path, description = "Five-digit postal code")),
    responses(
        (status = 200, description = "Colonies, municipality and state", body = PostalCodeInfo),
        (status = 400, description = "Malformed postal code", body = ErrorRes),
        (status = 404, description = "Postal code not in the directory", body = ErrorRes)
    )
)]
/// Postal-code directory lookup.
#[axum::debug_handler]
async fn postal_code_lookup(
    AxumPath(codigo): AxumPath<String>,
) -> Result<Json<PostalCodeInfo>, ApiError> {
    let code = PostalCode::parse(&codigo).map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("Código postal inválido: {codigo}. Debe ser de 5 dígitos."),
        )
    })?;

    match postal::lookup(code.as_str()) {
        Some(info) => Ok(Json(info)),
        None => {
            tracing::debug!(code = %code, "postal code not in directory");
            Err(api_error(
                StatusCode::NOT_FOUND,
                format!("Código postal no encontrado: {code}"),
            ))
        }
    }
}

/// Reject payloads whose textual required fields are blank. The typed
/// payload already guarantees structure; this guards the contents.
fn validate_payload(payload: &PatientPayload) -> Result<(), ApiError> {
    let personal = &payload.personal;
    if personal.name.trim().is_empty()
        || personal.paternal_surname.trim().is_empty()
        || personal.birth_date.trim().is_empty()
    {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Faltan datos personales",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn payload_json(name: &str) -> String {
        serde_json::json!({
            "datos_personales": {
                "nombre": name,
                "apellido_paterno": "García",
                "fecha_nacimiento": "1990-01-15",
                "sexo": "F"
            },
            "direccion": {
                "codigo_postal": "22000",
                "colonia": "Centro",
                "municipio": "Tijuana",
                "estado": "Baja California"
            },
            "tipo_estudio": "quimica_sanguinea"
        })
        .to_string()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("valid request")
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    #[tokio::test]
    async fn empty_store_lists_no_patients() {
        let response = router()
            .oneshot(get_req("/api/pacientes"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["total"], 0);
        assert_eq!(body["pacientes"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let store = Arc::new(PatientStore::new());

        let response = router_with_store(store.clone())
            .oneshot(post("/api/pacientes", payload_json("Laura")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Paciente creado exitosamente");
        let id = body["paciente"]["_id"].as_str().expect("id").to_owned();
        assert_eq!(body["paciente"]["resultados"].as_array().expect("results").len(), 15);

        let response = router_with_store(store)
            .oneshot(get_req(&format!("/api/pacientes/{id}")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["datos_personales"]["nombre"], "Laura");
        assert_eq!(body["activo"], true);
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_storage() {
        let store = Arc::new(PatientStore::new());

        let response = router_with_store(store.clone())
            .oneshot(post("/api/pacientes", payload_json("   ")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Faltan datos personales");
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_from_list_and_404s_afterwards() {
        let store = Arc::new(PatientStore::new());
        let record = store
            .create(serde_json::from_str(&payload_json("Laura")).expect("payload"))
            .await;
        let id = record.patient.id;

        let response = router_with_store(store.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/pacientes/{id}"))
                    .body(Body::empty())
                    .expect("valid request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router_with_store(store)
            .oneshot(get_req(&format!("/api/pacientes/{id}")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Paciente no encontrado");
    }

    #[tokio::test]
    async fn statistics_reflect_created_patients() {
        let store = Arc::new(PatientStore::new());
        store
            .create(serde_json::from_str(&payload_json("Laura")).expect("payload"))
            .await;

        let response = router_with_store(store)
            .oneshot(get_req("/api/estadisticas"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["total_pacientes"], 1);
        assert_eq!(body["por_tipo_estudio"]["quimica_sanguinea"], 1);
        assert!(body.get("pendientes").is_none());
    }

    #[tokio::test]
    async fn postal_lookup_answers_200_404_and_400() {
        let response = router()
            .oneshot(get_req("/api-externa/cp/22000"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["municipio"], "Tijuana");
        assert_eq!(body["colonias"][0], "Centro");

        let response = router()
            .oneshot(get_req("/api-externa/cp/99999"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = router()
            .oneshot(get_req("/api-externa/cp/12ab"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
