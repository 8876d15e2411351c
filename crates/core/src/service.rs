//! Shared handle over the patient store.
//!
//! A single [`PatientService`] is built at startup and cloned into every request handler.
//! Clones share the same store; reads take a shared lock and mutations an exclusive one, so
//! each insert or append runs to completion before the next one starts.

use crate::diagnoses::DiagnosisCatalogue;
use crate::entry::to_new_entry;
use crate::models::{Diagnosis, NonSensitivePatient, Patient};
use crate::patient::to_new_patient;
use crate::seed::SeedData;
use crate::store::PatientStore;
use crate::{CoreConfig, PatientError, PatientResult};
use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    store: Arc<RwLock<PatientStore>>,
    diagnoses: Arc<DiagnosisCatalogue>,
}

impl PatientService {
    /// Builds the service from already loaded seed data.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::DuplicateSeedKey`] if patient ids or diagnosis codes repeat.
    pub fn new(seed: SeedData) -> PatientResult<Self> {
        let diagnoses = Arc::new(DiagnosisCatalogue::new(seed.diagnoses)?);
        let store = PatientStore::new(seed.patients, diagnoses.clone())?;
        Ok(Self {
            store: Arc::new(RwLock::new(store)),
            diagnoses,
        })
    }

    /// Loads the seed selected by `cfg` and builds the service.
    pub fn from_config(cfg: &CoreConfig) -> PatientResult<Self> {
        Self::new(SeedData::load(cfg)?)
    }

    pub fn list_patients(&self) -> PatientResult<Vec<NonSensitivePatient>> {
        Ok(self.read()?.list_all())
    }

    pub fn patient_count(&self) -> PatientResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns a copy of the full patient record.
    pub fn get_patient(&self, id: &str) -> PatientResult<Patient> {
        tracing::debug!(patient_id = id, "patient lookup");
        self.read()?.get_by_id(id).cloned()
    }

    /// Validates a create-patient payload and inserts it.
    ///
    /// Validation happens before the write lock is taken.
    pub fn add_patient(&self, payload: &Value) -> PatientResult<NonSensitivePatient> {
        let new_patient = to_new_patient(payload).inspect_err(|e| {
            tracing::warn!("rejected patient payload: {e}");
        })?;
        self.write()?.insert(new_patient)
    }

    /// Validates an entry payload and appends it to the patient's history.
    ///
    /// An unknown patient is reported before the payload is looked at. Reconstruction runs
    /// without holding any lock; only the append itself takes the write lock.
    pub fn add_entry(&self, patient_id: &str, payload: &Value) -> PatientResult<Patient> {
        self.try_add_entry(patient_id, payload).inspect_err(|e| {
            tracing::warn!(patient_id, "entry not added: {e}");
        })
    }

    fn try_add_entry(&self, patient_id: &str, payload: &Value) -> PatientResult<Patient> {
        self.read()?.get_by_id(patient_id)?;
        let new_entry = to_new_entry(payload)?;
        self.write()?.append_new_entry(patient_id, new_entry)
    }

    pub fn diagnoses(&self) -> &[Diagnosis] {
        self.diagnoses.all()
    }

    fn read(&self) -> PatientResult<RwLockReadGuard<'_, PatientStore>> {
        self.store.read().map_err(|_| PatientError::StoreUnavailable)
    }

    fn write(&self) -> PatientResult<RwLockWriteGuard<'_, PatientStore>> {
        self.store.write().map_err(|_| PatientError::StoreUnavailable)
    }
}
