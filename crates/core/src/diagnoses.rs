//! Read-only diagnosis reference data.

use crate::models::Diagnosis;
use crate::{PatientError, PatientResult};
use patientor_types::DiagnosisCode;
use std::collections::HashSet;

/// The fixed list of known diagnoses, in seed order, indexed by code.
#[derive(Clone, Debug, Default)]
pub struct DiagnosisCatalogue {
    diagnoses: Vec<Diagnosis>,
    codes: HashSet<DiagnosisCode>,
}

impl DiagnosisCatalogue {
    /// Builds the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::DuplicateSeedKey`] if two diagnoses share a code.
    pub fn new(diagnoses: Vec<Diagnosis>) -> PatientResult<Self> {
        let mut codes = HashSet::with_capacity(diagnoses.len());
        for diagnosis in &diagnoses {
            if !codes.insert(diagnosis.code.clone()) {
                return Err(PatientError::DuplicateSeedKey {
                    kind: "diagnosis code",
                    key: diagnosis.code.to_string(),
                });
            }
        }
        Ok(Self { diagnoses, codes })
    }

    /// All diagnoses, in the order they were loaded.
    pub fn all(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    pub fn contains(&self, code: &DiagnosisCode) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.diagnoses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
    }

    /// Checks that every code in `codes` is known.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::Validation`] on `diagnosisCodes` naming the first unknown code.
    pub fn check_codes(&self, codes: &[DiagnosisCode]) -> PatientResult<()> {
        match codes.iter().find(|c| !self.contains(c)) {
            Some(unknown) => Err(PatientError::validation(
                "diagnosisCodes",
                format!("Unknown diagnosis code: {unknown}"),
            )),
            None => Ok(()),
        }
    }
}
