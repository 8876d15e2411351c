use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patientor_core::{CoreConfig, PatientService};

/// Main entry point for the patientor service
///
/// Loads the seed data once, builds the shared patient service and serves the REST API.
/// All state lives in memory: a restart returns to the seed data.
///
/// # Environment Variables
/// - `PATIENTOR_REST_ADDR`: REST server address (default: "0.0.0.0:3001")
/// - `PATIENTOR_SEED_DIR`: Directory holding `patients.json` and `diagnoses.json`
///   (default: the seed compiled into the binary)
/// - `RUST_LOG`: tracing filter directives
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the seed directory or seed data is invalid,
/// - the server address cannot be parsed or bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor_run=info".parse()?)
                .add_directive("patientor_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        api_rest::listen_addr_from_env_value(std::env::var("PATIENTOR_REST_ADDR").ok())?;
    let seed_dir = std::env::var("PATIENTOR_SEED_DIR").ok().map(PathBuf::from);

    let cfg = CoreConfig::new(seed_dir)?;
    let patient_service = PatientService::from_config(&cfg)?;

    tracing::info!("++ Starting patientor REST on {}", rest_addr);

    api_rest::serve(rest_addr, patient_service).await
}
