//! Patient, entry and diagnosis models.
//!
//! These are the typed shapes stored in memory and rendered on the wire. Untyped request
//! payloads are turned into them by [`crate::entry`] and [`crate::patient`]; seed data is
//! deserialised into them directly.
//!
//! Wire field names are camelCase. An entry is a flat JSON object whose `type` key selects the
//! variant-specific fields:
//!
//! ```json
//! { "id": "…", "type": "Hospital", "date": "2015-01-02", "description": "…",
//!   "specialist": "MD House", "diagnosisCodes": ["S62.5"],
//!   "discharge": { "date": "2015-01-16", "criteria": "Thumb has healed." } }
//! ```

use patientor_types::{CalendarDate, DiagnosisCode, Gender, HealthCheckRating};
use patientor_uuid::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

// ============================================================================
// Diagnoses
// ============================================================================

/// Read-only reference record mapping a diagnosis code to its name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Diagnosis {
    #[schema(value_type = String, example = "S62.5")]
    pub code: DiagnosisCode,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

// ============================================================================
// Entries
// ============================================================================

/// Hospital release details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Discharge {
    pub date: CalendarDate,
    pub criteria: String,
}

/// Date range of a sick leave granted during an occupational healthcare visit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SickLeave {
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
}

/// Discriminator of the entry variants, as carried in the `type` key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryType {
    HealthCheck,
    Hospital,
    OccupationalHealthcare,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [
        EntryType::HealthCheck,
        EntryType::Hospital,
        EntryType::OccupationalHealthcare,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::HealthCheck => "HealthCheck",
            EntryType::Hospital => "Hospital",
            EntryType::OccupationalHealthcare => "OccupationalHealthcare",
        }
    }
}

impl FromStr for EntryType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific part of an entry, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryKind {
    HealthCheck {
        #[serde(rename = "healthCheckRating")]
        health_check_rating: HealthCheckRating,
    },
    Hospital {
        discharge: Discharge,
    },
    OccupationalHealthcare {
        #[serde(rename = "employerName")]
        employer_name: String,
        #[serde(
            rename = "sickLeave",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        sick_leave: Option<SickLeave>,
    },
}

impl EntryKind {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryKind::HealthCheck { .. } => EntryType::HealthCheck,
            EntryKind::Hospital { .. } => EntryType::Hospital,
            EntryKind::OccupationalHealthcare { .. } => EntryType::OccupationalHealthcare,
        }
    }
}

/// A validated entry that has not yet been given an identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub date: CalendarDate,
    pub description: String,
    pub specialist: String,
    /// `None` when the payload carried no `diagnosisCodes` key at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<DiagnosisCode>>,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl NewEntry {
    pub fn diagnosis_codes(&self) -> &[DiagnosisCode] {
        self.diagnosis_codes.as_deref().unwrap_or_default()
    }

    pub(crate) fn with_id(self, id: RecordId) -> Entry {
        Entry { id, details: self }
    }
}

/// A dated medical record belonging to a patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: RecordId,
    #[serde(flatten)]
    pub details: NewEntry,
}

impl Entry {
    pub fn entry_type(&self) -> EntryType {
        self.details.kind.entry_type()
    }
}

// ============================================================================
// Patients
// ============================================================================

/// A patient and their full medical history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[schema(value_type = String, example = "d27736ec-f723-11e9-8f0b-362b9e155667")]
    pub id: RecordId,
    pub name: String,
    #[schema(value_type = String, example = "1970-04-25")]
    pub date_of_birth: CalendarDate,
    pub ssn: String,
    #[schema(value_type = String, example = "other")]
    pub gender: Gender,
    pub occupation: String,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub entries: Vec<Entry>,
}

/// Projection of a [`Patient`] used for list views; omits `ssn` and `entries`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonSensitivePatient {
    #[schema(value_type = String, example = "d27736ec-f723-11e9-8f0b-362b9e155667")]
    pub id: RecordId,
    pub name: String,
    #[schema(value_type = String, example = "1970-04-25")]
    pub date_of_birth: CalendarDate,
    #[schema(value_type = String, example = "other")]
    pub gender: Gender,
    pub occupation: String,
}

impl From<&Patient> for NonSensitivePatient {
    fn from(patient: &Patient) -> Self {
        NonSensitivePatient {
            id: patient.id.clone(),
            name: patient.name.clone(),
            date_of_birth: patient.date_of_birth.clone(),
            gender: patient.gender,
            occupation: patient.occupation.clone(),
        }
    }
}

/// A validated create-patient payload, before identifiers are assigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub date_of_birth: CalendarDate,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
    pub entries: Vec<NewEntry>,
}

impl NewPatient {
    /// Assigns a fresh identifier to the patient and to each of its entries.
    pub(crate) fn into_patient(self) -> Patient {
        Patient {
            id: RecordId::generate(),
            name: self.name,
            date_of_birth: self.date_of_birth,
            ssn: self.ssn,
            gender: self.gender,
            occupation: self.occupation,
            entries: self
                .entries
                .into_iter()
                .map(|e| e.with_id(RecordId::generate()))
                .collect(),
        }
    }
}
