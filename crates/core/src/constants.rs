//! Constants used throughout the patientor core crate.

/// Filename of the patient seed list inside a seed directory.
pub const PATIENTS_SEED_FILENAME: &str = "patients.json";

/// Filename of the diagnosis reference list inside a seed directory.
pub const DIAGNOSES_SEED_FILENAME: &str = "diagnoses.json";

/// Patient seed list compiled into the binary.
pub const EMBEDDED_PATIENTS_SEED: &str = include_str!("../data/patients.json");

/// Diagnosis reference list compiled into the binary.
pub const EMBEDDED_DIAGNOSES_SEED: &str = include_str!("../data/diagnoses.json");

/// Keys a create-patient payload must carry.
pub const NEW_PATIENT_REQUIRED_KEYS: [&str; 6] = [
    "name",
    "occupation",
    "dateOfBirth",
    "gender",
    "ssn",
    "entries",
];
