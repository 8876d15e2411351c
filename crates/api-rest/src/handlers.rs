//! REST endpoint handlers.

use axum::{
    extract::{Path, State},
    response::Json,
};
use patientor_core::{Diagnosis, NonSensitivePatient, Patient};
use serde_json::Value;

use crate::error::{ApiError, ErrorRes, JsonBody};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/ping",
    responses(
        (status = 200, description = "Liveness check", body = String, content_type = "text/plain")
    )
)]
#[axum::debug_handler]
pub async fn ping() -> &'static str {
    tracing::info!("someone pinged here");
    "pong"
}

#[utoipa::path(
    get,
    path = "/api/diagnoses",
    responses(
        (status = 200, description = "Diagnosis reference list", body = [Diagnosis])
    )
)]
/// Returns the diagnosis catalogue verbatim, in seed order.
#[axum::debug_handler]
pub async fn list_diagnoses(State(state): State<AppState>) -> Json<Vec<Diagnosis>> {
    Json(state.patient_service.diagnoses().to_vec())
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "List of patients without ssn or entries", body = [NonSensitivePatient]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all patients in the system
///
/// Sensitive fields (`ssn`) and the medical history are left out of the listing; fetch a
/// single patient for those.
///
/// # Errors
/// Returns `500 Internal Server Error` if the store cannot be read.
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<NonSensitivePatient>>, ApiError> {
    Ok(Json(state.patient_service.list_patients()?))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    responses(
        (status = 200, description = "Patient created", body = NonSensitivePatient),
        (status = 400, description = "Invalid patient payload", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a new patient record
///
/// The body must carry `name`, `occupation`, `dateOfBirth`, `gender`, `ssn` and `entries`.
/// The patient (and each initial entry) gets a generated id.
///
/// # Errors
/// Returns `400 Bad Request` with the validation message if the body is not a valid patient,
/// or is not a JSON document at all.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<Json<NonSensitivePatient>, ApiError> {
    Ok(Json(state.patient_service.add_patient(&payload)?))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Full patient record", body = Patient),
        (status = 404, description = "No patient with this id", body = ErrorRes)
    )
)]
/// Fetch a patient including ssn and all entries.
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.patient_service.get_patient(&id)?))
}

#[utoipa::path(
    post,
    path = "/api/patients/{id}/entries",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Updated patient with the new entry last", body = Patient),
        (status = 400, description = "Invalid entry payload", body = ErrorRes),
        (status = 404, description = "No patient with this id", body = ErrorRes)
    )
)]
/// Append an entry to a patient's history
///
/// The body is a single entry whose `type` is `HealthCheck`, `Hospital` or
/// `OccupationalHealthcare`. The entry gets a generated id and the updated patient is
/// returned.
///
/// # Errors
/// - `404 Not Found` if the patient does not exist.
/// - `400 Bad Request` with the validation message if the body is not a valid entry, or is
///   not a JSON document at all.
#[axum::debug_handler]
pub async fn add_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.patient_service.add_entry(&id, &payload)?))
}
