//! # API REST
//!
//! REST API implementation for patientor.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation
//! - REST-specific concerns (JSON serialization, status codes, CORS)
//!
//! All data operations go through [`patientor_core::PatientService`].

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Json, Router,
};
use patientor_core::{Diagnosis, NonSensitivePatient, Patient, PatientService};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub use error::{ApiError, ErrorRes, JsonBody};

/// Default listen address when `PATIENTOR_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3001";

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::ping,
        handlers::list_diagnoses,
        handlers::list_patients,
        handlers::create_patient,
        handlers::get_patient,
        handlers::add_entry,
    ),
    components(schemas(Diagnosis, NonSensitivePatient, Patient, ErrorRes))
)]
pub struct ApiDoc;

/// Builds the REST application around an already seeded patient service.
pub fn router(patient_service: PatientService) -> Router {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/api/diagnoses", get(handlers::list_diagnoses))
        .route(
            "/api/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route("/api/patients/:id", get(handlers::get_patient))
        .route("/api/patients/:id/entries", post(handlers::add_entry))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { patient_service })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Parse the listen address from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_REST_ADDR`].
pub fn listen_addr_from_env_value(value: Option<String>) -> anyhow::Result<SocketAddr> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen address '{value}': {e}"))
}

/// Binds `addr` and serves the application until the process is stopped.
pub async fn serve(addr: SocketAddr, patient_service: PatientService) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Patientor REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(patient_service)).await?;
    Ok(())
}
