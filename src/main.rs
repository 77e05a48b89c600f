//! Main entry point for the CliniLab backend.
//!
//! Boots the REST API that the dashboard clients (the `clinilab` CLI, or any
//! HTTP consumer) talk to. Swagger UI is served at `/swagger-ui`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Start the CliniLab REST server.
///
/// # Environment Variables
/// - `CLINILAB_ADDR`: server address (default: "0.0.0.0:5000")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinilab=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CLINILAB_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    tracing::info!("++ Starting CliniLab REST on {}", addr);
    tracing::info!("++ Swagger UI at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, api_rest::router()).await?;

    Ok(())
}
