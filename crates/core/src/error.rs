use patientor_types::TypesError;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    /// A request payload field is missing, mistyped or malformed.
    ///
    /// `field` names the offending field, using a dotted path for nested values
    /// (`discharge.date`, `entries[0].type`).
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Cannot find patient with id: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid seed data in {file} at {path}: {source}")]
    Seed {
        file: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate {kind} in seed data: {key}")]
    DuplicateSeedKey { kind: &'static str, key: String },

    #[error("failed to read seed file: {0}")]
    FileRead(std::io::Error),

    #[error("patient store is unavailable")]
    StoreUnavailable,
}

impl PatientError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PatientError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Converts a primitive validation failure into a field-scoped validation error.
    pub fn from_types(field: impl Into<String>, err: TypesError) -> Self {
        PatientError::validation(field, err.to_string())
    }

    /// Re-scopes a validation error under `prefix`, e.g. `date` becomes `entries[2].date`.
    ///
    /// Non-validation errors are returned unchanged.
    pub fn nest(self, prefix: &str, context: &str) -> Self {
        match self {
            PatientError::Validation { field, message } => PatientError::Validation {
                field: format!("{prefix}.{field}"),
                message: format!("{context}: {message}"),
            },
            other => other,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PatientError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PatientError::NotFound(_))
    }
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
