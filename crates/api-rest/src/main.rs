//! Standalone REST API server binary.
//!
//! Runs the CliniLab backend on its own, with Swagger UI at `/swagger-ui`.
//! The workspace's main `clinilab-run` binary does the same; this one exists
//! so the API crate can be run and debugged in isolation.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the CliniLab REST API server.
///
/// # Environment Variables
/// - `CLINILAB_ADDR`: server address (default: "0.0.0.0:5000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CLINILAB_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    tracing::info!("-- Starting CliniLab REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, api_rest::router()).await?;

    Ok(())
}
