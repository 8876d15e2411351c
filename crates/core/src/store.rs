//! In-memory patient store.
//!
//! The store owns every patient record for the life of the process. It starts from seed data
//! and is only ever grown: patients are inserted and entries appended, nothing is updated in
//! place or removed. Nothing is written back to disk.

use crate::diagnoses::DiagnosisCatalogue;
use crate::entry::to_new_entry;
use crate::models::{NewEntry, NewPatient, NonSensitivePatient, Patient};
use crate::{PatientError, PatientResult};
use patientor_uuid::RecordId;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

pub struct PatientStore {
    patients: Vec<Patient>,
    diagnoses: Arc<DiagnosisCatalogue>,
}

impl PatientStore {
    /// Creates a store holding `patients`, in the given order.
    ///
    /// Seed patients are trusted to be well-typed; only identifier uniqueness is checked.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::DuplicateSeedKey`] if two patients share an id.
    pub fn new(patients: Vec<Patient>, diagnoses: Arc<DiagnosisCatalogue>) -> PatientResult<Self> {
        let mut seen = HashSet::with_capacity(patients.len());
        for patient in &patients {
            if !seen.insert(&patient.id) {
                return Err(PatientError::DuplicateSeedKey {
                    kind: "patient id",
                    key: patient.id.to_string(),
                });
            }
        }
        Ok(Self {
            patients,
            diagnoses,
        })
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Every patient, projected to its non-sensitive fields.
    pub fn list_all(&self) -> Vec<NonSensitivePatient> {
        self.patients.iter().map(NonSensitivePatient::from).collect()
    }

    /// Returns the full patient, including entries.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::NotFound`] if no patient has this id.
    pub fn get_by_id(&self, id: &str) -> PatientResult<&Patient> {
        self.position(id).map(|i| &self.patients[i])
    }

    /// Assigns identifiers to `new_patient` and its entries, and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::Validation`] if an entry references an unknown diagnosis code.
    /// The store is unchanged on error.
    pub fn insert(&mut self, new_patient: NewPatient) -> PatientResult<NonSensitivePatient> {
        for entry in &new_patient.entries {
            self.diagnoses.check_codes(entry.diagnosis_codes())?;
        }

        let patient = new_patient.into_patient();
        let summary = NonSensitivePatient::from(&patient);
        tracing::info!(
            patient_id = %patient.id,
            entries = patient.entries.len(),
            "patient added"
        );
        self.patients.push(patient);
        Ok(summary)
    }

    /// Validates `payload` as an entry and appends it to the patient's history.
    ///
    /// # Returns
    ///
    /// The full updated patient.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::NotFound`] if the patient does not exist, or
    /// [`PatientError::Validation`] if the payload is not a valid entry or references an
    /// unknown diagnosis code. The store is unchanged on error.
    pub fn append_entry(&mut self, patient_id: &str, payload: &Value) -> PatientResult<Patient> {
        self.position(patient_id)?;
        let new_entry = to_new_entry(payload)?;
        self.append_new_entry(patient_id, new_entry)
    }

    /// Appends an already reconstructed entry, assigning it an id.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::NotFound`] if the patient does not exist, or
    /// [`PatientError::Validation`] if the entry references an unknown diagnosis code.
    pub fn append_new_entry(
        &mut self,
        patient_id: &str,
        new_entry: NewEntry,
    ) -> PatientResult<Patient> {
        let index = self.position(patient_id)?;
        self.diagnoses.check_codes(new_entry.diagnosis_codes())?;
        let entry = new_entry.with_id(RecordId::generate());

        tracing::info!(
            patient_id,
            entry_id = %entry.id,
            entry_type = %entry.entry_type(),
            "entry added"
        );

        let patient = &mut self.patients[index];
        patient.entries.push(entry);
        Ok(patient.clone())
    }

    fn position(&self, id: &str) -> PatientResult<usize> {
        self.patients
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| PatientError::NotFound(id.to_owned()))
    }
}
