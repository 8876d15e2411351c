//! Mapping of core errors onto HTTP responses.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use patientor_core::PatientError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Error returned by REST handlers.
#[derive(Debug)]
pub enum ApiError {
    Patient(PatientError),
    /// The request body was not a JSON document.
    Body(JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Patient(PatientError::Validation { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Patient(PatientError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Patient(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Patient(err) => err.to_string(),
            ApiError::Body(rejection) => rejection.body_text(),
        }
    }
}

impl From<PatientError> for ApiError {
    fn from(err: PatientError) -> Self {
        ApiError::Patient(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("Internal error: {:?}", self);
            "Internal error".to_string()
        } else {
            let message = self.message();
            tracing::warn!("{}: {}", status, message);
            message
        };

        (status, Json(ErrorRes { error: message })).into_response()
    }
}

/// `Json` extractor whose rejections are reported as [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
