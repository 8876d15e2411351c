//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Environment variables are read by the binaries, never during request handling.

use crate::constants::{DIAGNOSES_SEED_FILENAME, PATIENTS_SEED_FILENAME};
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    seed_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `seed_dir` overrides the compiled-in seed data; see [`resolve_seed_dir`].
    pub fn new(seed_dir: Option<PathBuf>) -> PatientResult<Self> {
        Ok(Self {
            seed_dir: resolve_seed_dir(seed_dir)?,
        })
    }

    pub fn seed_dir(&self) -> Option<&Path> {
        self.seed_dir.as_deref()
    }
}

/// Validate an optional seed directory override.
///
/// `None`, or a value that is empty once trimmed, means "use the compiled-in seed". Otherwise
/// the path must be a directory containing both `patients.json` and `diagnoses.json`.
pub fn resolve_seed_dir(override_dir: Option<PathBuf>) -> PatientResult<Option<PathBuf>> {
    let Some(dir) = override_dir.filter(|d| !d.as_os_str().to_string_lossy().trim().is_empty())
    else {
        return Ok(None);
    };

    if !dir.is_dir() {
        return Err(PatientError::InvalidInput(format!(
            "seed directory does not exist: {}",
            dir.display()
        )));
    }

    for name in [PATIENTS_SEED_FILENAME, DIAGNOSES_SEED_FILENAME] {
        if !dir.join(name).is_file() {
            return Err(PatientError::InvalidInput(format!(
                "seed directory {} is missing {name}",
                dir.display()
            )));
        }
    }

    Ok(Some(dir))
}
