//! Seed data loading.
//!
//! The store starts from a fixed list of patients and a fixed diagnosis catalogue. By default
//! both come from JSON compiled into the crate; a seed directory configured in
//! [`CoreConfig`](crate::CoreConfig) replaces them.
//!
//! Seed records are trusted to be well-typed and are not run through the request validators,
//! but they must still deserialise into the typed models. Deserialisation goes through
//! `serde_path_to_error` so a malformed seed reports the failing path (e.g. `[2].entries[0].date`).

use crate::constants::{
    DIAGNOSES_SEED_FILENAME, EMBEDDED_DIAGNOSES_SEED, EMBEDDED_PATIENTS_SEED,
    PATIENTS_SEED_FILENAME,
};
use crate::models::{Diagnosis, Patient};
use crate::{CoreConfig, PatientError, PatientResult};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Initial contents of the store.
#[derive(Clone, Debug)]
pub struct SeedData {
    pub patients: Vec<Patient>,
    pub diagnoses: Vec<Diagnosis>,
}

impl SeedData {
    /// Loads the seed data compiled into the crate.
    pub fn embedded() -> PatientResult<Self> {
        Ok(Self {
            patients: parse_seed(EMBEDDED_PATIENTS_SEED, PATIENTS_SEED_FILENAME)?,
            diagnoses: parse_seed(EMBEDDED_DIAGNOSES_SEED, DIAGNOSES_SEED_FILENAME)?,
        })
    }

    /// Loads `patients.json` and `diagnoses.json` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::FileRead`] if either file cannot be read, or
    /// [`PatientError::Seed`] if either does not match the model.
    pub fn from_dir(dir: &Path) -> PatientResult<Self> {
        let read = |name: &str| {
            std::fs::read_to_string(dir.join(name)).map_err(PatientError::FileRead)
        };

        Ok(Self {
            patients: parse_seed(&read(PATIENTS_SEED_FILENAME)?, PATIENTS_SEED_FILENAME)?,
            diagnoses: parse_seed(&read(DIAGNOSES_SEED_FILENAME)?, DIAGNOSES_SEED_FILENAME)?,
        })
    }

    /// Loads the seed selected by `cfg`.
    pub fn load(cfg: &CoreConfig) -> PatientResult<Self> {
        let seed = match cfg.seed_dir() {
            Some(dir) => {
                tracing::info!("loading seed data from {}", dir.display());
                Self::from_dir(dir)?
            }
            None => Self::embedded()?,
        };
        tracing::info!(
            patients = seed.patients.len(),
            diagnoses = seed.diagnoses.len(),
            "seed data loaded"
        );
        Ok(seed)
    }
}

fn parse_seed<T: DeserializeOwned>(json: &str, file: &str) -> PatientResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        PatientError::Seed {
            file: file.to_owned(),
            path: if path.is_empty() || path == "." {
                "<root>".to_owned()
            } else {
                path
            },
            source: err.into_inner(),
        }
    })
}
