//! End-to-end flow against the real server.
//!
//! Binds the actual router on an ephemeral port and drives it with the real
//! HTTP client through the dashboard controllers: load, create (with postal
//! lookup), edit, view results, delete, statistics.

use api_client::{ApiClient, ApiError};
use clinilab_core::{ClientConfig, PostalCode, Sex, StudyKind};
use clinilab_dashboard::{results_view, FormController, ListCoordinator};

async fn start_backend() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, api_rest::router())
            .await
            .expect("server runs");
    });

    let config = ClientConfig::new(format!("http://{addr}")).expect("valid base url");
    ApiClient::new(config).expect("client builds")
}

#[tokio::test]
async fn full_patient_lifecycle() {
    let client = start_backend().await;

    // Initial load: empty collection, zeroed statistics, no workflow counts.
    let mut coordinator = ListCoordinator::new();
    coordinator.load(&client).await.expect("initial load");
    assert!(coordinator.patients().is_empty());
    let statistics = coordinator.statistics().expect("statistics committed");
    assert_eq!(statistics.total_patients, 0);
    assert_eq!(statistics.pending, None);

    // Create through the form controller, postal lookup included.
    let mut form = FormController::new();
    form.open_create();
    form.set_name("Laura");
    form.set_paternal_surname("Mendoza");
    form.set_birth_date("1991-04-02");
    form.set_sex(Sex::Female);
    form.set_study_kind(StudyKind::BiometriaHematica);
    let ticket = form.postal_code_input("22000").expect("complete code");
    form.lookup_postal_code(&client, ticket).await;
    assert_eq!(form.draft().colony, "Centro");
    assert_eq!(form.address().municipality(), "Tijuana");

    let created = form.submit(&client).await.expect("create succeeds");
    assert!(!form.is_open());
    assert_eq!(created.results.len(), 15);
    assert_eq!(created.address.state, "Baja California");
    assert_eq!(created.personal.age, Some(
        clinilab_core::dates::age_in_years_today("1991-04-02").expect("valid birth date")
    ));

    // The save signals a reload; the collection now holds the new patient.
    coordinator.load(&client).await.expect("reload");
    assert_eq!(coordinator.patients().len(), 1);
    assert_eq!(
        coordinator.statistics().expect("statistics").total_patients,
        1
    );
    assert_eq!(
        coordinator
            .statistics()
            .expect("statistics")
            .studies_today,
        1
    );

    // Results view over the fetched record classifies every row.
    let fetched = client.get_patient(&created.id).await.expect("get patient");
    let view = results_view(&fetched);
    assert_eq!(view.rows.len(), 15);
    assert_eq!(view.summary.total, 15);

    // Edit under the original identifier.
    let mut form = FormController::new();
    let ticket = form.open_edit(&fetched).expect("stored postal code");
    form.lookup_postal_code(&client, ticket).await;
    form.set_name("Laura Elena");
    let updated = form.submit(&client).await.expect("update succeeds");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.personal.name, "Laura Elena");
    // Results are kept, not regenerated.
    assert_eq!(updated.results, created.results);

    // Confirmed delete: one DELETE, then the reload empties the collection.
    coordinator.load(&client).await.expect("reload before delete");
    let request = coordinator.request_delete(&created.id).expect("known id");
    coordinator
        .confirm_delete(&client, request)
        .await
        .expect("delete succeeds");
    assert!(coordinator.patients().is_empty());
    assert_eq!(
        coordinator.statistics().expect("statistics").total_patients,
        0
    );

    // The soft-deleted record is gone from the API's point of view.
    let err = client.get_patient(&created.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn postal_directory_round_trip() {
    let client = start_backend().await;

    let code = PostalCode::parse("64000").expect("valid code");
    let info = client.postal_code_info(&code).await.expect("known code");
    assert_eq!(info.municipality, "Monterrey");
    assert_eq!(info.state, "Nuevo León");
    assert!(!info.colonies.is_empty());

    let unknown = PostalCode::parse("99999").expect("valid code");
    let err = client.postal_code_info(&unknown).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn validation_failure_never_reaches_the_backend() {
    let client = start_backend().await;

    let mut form = FormController::new();
    form.open_create();
    form.set_name("Laura");
    // Surname, birth date, postal code and colony all missing.

    let err = form.submit(&client).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("apellido_paterno"));
    assert!(message.contains("colonia"));
    assert!(form.is_open());

    let mut coordinator = ListCoordinator::new();
    coordinator.load(&client).await.expect("load");
    assert!(coordinator.patients().is_empty());
}
