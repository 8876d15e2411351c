//! Patient reconstruction from untyped payloads.

use crate::constants::NEW_PATIENT_REQUIRED_KEYS;
use crate::entry::to_new_entry;
use crate::models::{NewEntry, NewPatient};
use crate::validation::{
    as_object, parse_date, parse_gender, parse_name, parse_occupation, parse_ssn,
};
use crate::{PatientError, PatientResult};
use serde_json::Value;

/// Builds a validated create-patient request from a raw payload.
///
/// All of `name`, `occupation`, `dateOfBirth`, `gender`, `ssn` and `entries` must be present.
/// `entries` must be an array; each element goes through [`to_new_entry`] and must therefore
/// carry a `type` tag. Identifiers are not read from the payload; they are assigned on insert.
///
/// # Errors
///
/// Returns [`PatientError::Validation`] naming the first missing or malformed field. Errors
/// inside `entries` are scoped as `entries[<index>].<field>`.
pub fn to_new_patient(payload: &Value) -> PatientResult<NewPatient> {
    let object = as_object(payload, "patient")?;

    if let Some(missing) = NEW_PATIENT_REQUIRED_KEYS
        .iter()
        .find(|key| !object.contains_key(**key))
    {
        return Err(PatientError::validation(
            *missing,
            format!("Incorrect data: a field missing: {missing}"),
        ));
    }

    Ok(NewPatient {
        name: parse_name(&object["name"])?,
        occupation: parse_occupation(&object["occupation"])?,
        date_of_birth: parse_date(&object["dateOfBirth"], "dateOfBirth")?,
        gender: parse_gender(&object["gender"])?,
        ssn: parse_ssn(&object["ssn"])?,
        entries: parse_entries(&object["entries"])?,
    })
}

fn parse_entries(entries: &Value) -> PatientResult<Vec<NewEntry>> {
    let Value::Array(items) = entries else {
        return Err(PatientError::validation(
            "entries",
            "Invalid entries: not an array",
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            to_new_entry(item).map_err(|e| {
                e.nest(
                    &format!("entries[{index}]"),
                    &format!("Invalid entry at index {index}"),
                )
            })
        })
        .collect()
}
