//! Entry reconstruction from untyped payloads.
//!
//! [`to_new_entry`] turns an arbitrary JSON value into exactly one typed [`NewEntry`] or fails.
//! The base fields (`date`, `description`, `specialist`) are required for every variant and are
//! checked before the `type` tag is looked at. No partially built entry is ever returned.

use crate::models::{EntryKind, EntryType, NewEntry};
use crate::validation::{
    as_object, parse_date, parse_description, parse_diagnosis_codes, parse_discharge,
    parse_employer_name, parse_health_check_rating, parse_sick_leave, parse_specialist, require,
    Object,
};
use crate::{PatientError, PatientResult};
use serde_json::Value;

/// Builds a validated entry (without identifier) from a raw payload.
///
/// # Errors
///
/// Returns [`PatientError::Validation`] if:
/// - the payload is not a JSON object,
/// - any base field is missing or malformed,
/// - `type` is missing or not one of `HealthCheck`, `Hospital`, `OccupationalHealthcare`,
/// - a field required by the selected variant is missing or malformed.
pub fn to_new_entry(payload: &Value) -> PatientResult<NewEntry> {
    let object = as_object(payload, "entry")?;

    let date = parse_date(require(object, "date", "entry")?, "date")?;
    let description = parse_description(require(object, "description", "entry")?)?;
    let specialist = parse_specialist(require(object, "specialist", "entry")?)?;
    let diagnosis_codes = if object.contains_key("diagnosisCodes") {
        Some(parse_diagnosis_codes(object)?)
    } else {
        None
    };

    let kind = parse_kind(object, parse_entry_type(object)?)?;

    Ok(NewEntry {
        date,
        description,
        specialist,
        diagnosis_codes,
        kind,
    })
}

fn parse_entry_type(object: &Object) -> PatientResult<EntryType> {
    match object.get("type") {
        None => Err(PatientError::validation("type", "Missing entry type")),
        Some(Value::String(tag)) => tag
            .parse::<EntryType>()
            .map_err(|_| PatientError::validation("type", format!("Invalid entry type: {tag}"))),
        Some(other) => Err(PatientError::validation(
            "type",
            format!("Invalid entry type: {other}"),
        )),
    }
}

fn parse_kind(object: &Object, entry_type: EntryType) -> PatientResult<EntryKind> {
    let context = format!("{entry_type} entry");

    match entry_type {
        EntryType::Hospital => Ok(EntryKind::Hospital {
            discharge: parse_discharge(require(object, "discharge", &context)?)?,
        }),
        EntryType::OccupationalHealthcare => {
            let employer_name = parse_employer_name(require(object, "employerName", &context)?)?;
            let sick_leave = object.get("sickLeave").map(parse_sick_leave).transpose()?;
            Ok(EntryKind::OccupationalHealthcare {
                employer_name,
                sick_leave,
            })
        }
        EntryType::HealthCheck => Ok(EntryKind::HealthCheck {
            health_check_rating: parse_health_check_rating(require(
                object,
                "healthCheckRating",
                &context,
            )?)?,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Discharge, SickLeave};
    use patientor_types::{CalendarDate, HealthCheckRating};
    use serde_json::json;

    fn validation_field(err: PatientError) -> String {
        match err {
            PatientError::Validation { field, .. } => field,
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    fn base() -> Value {
        json!({
            "date": "2020-01-01",
            "description": "d",
            "specialist": "s"
        })
    }

    fn with(mut payload: Value, extra: Value) -> Value {
        let target = payload.as_object_mut().expect("object");
        for (k, v) in extra.as_object().expect("object") {
            target.insert(k.clone(), v.clone());
        }
        payload
    }

    #[test]
    fn builds_health_check_entry() {
        let entry = to_new_entry(&with(
            base(),
            json!({ "type": "HealthCheck", "healthCheckRating": 1 }),
        ))
        .expect("valid entry");

        assert_eq!(entry.date.as_str(), "2020-01-01");
        assert_eq!(entry.description, "d");
        assert_eq!(entry.specialist, "s");
        assert_eq!(entry.diagnosis_codes, None);
        assert_eq!(
            entry.kind,
            EntryKind::HealthCheck {
                health_check_rating: HealthCheckRating::LowRisk
            }
        );
    }

    #[test]
    fn hospital_entry_requires_discharge() {
        let err = to_new_entry(&with(base(), json!({ "type": "Hospital" })))
            .expect_err("missing discharge");
        assert_eq!(err.to_string(), "Missing discharge for Hospital entry");
        assert_eq!(validation_field(err), "discharge");
    }

    #[test]
    fn hospital_entry_keeps_discharge_verbatim() {
        let discharge = json!({ "date": "2015-01-16", "criteria": "Thumb has healed." });
        let entry = to_new_entry(&with(
            base(),
            json!({ "type": "Hospital", "discharge": discharge }),
        ))
        .expect("valid entry");

        assert_eq!(
            entry.kind,
            EntryKind::Hospital {
                discharge: Discharge {
                    date: CalendarDate::new("2015-01-16").expect("date"),
                    criteria: "Thumb has healed.".into(),
                }
            }
        );
        let rendered = serde_json::to_value(&entry).expect("serialise");
        assert_eq!(rendered["discharge"], discharge);
    }

    #[test]
    fn occupational_entry_requires_employer_name() {
        let err = to_new_entry(&with(base(), json!({ "type": "OccupationalHealthcare" })))
            .expect_err("missing employer");
        assert_eq!(validation_field(err), "employerName");
    }

    #[test]
    fn occupational_entry_sick_leave_is_optional() {
        let entry = to_new_entry(&with(
            base(),
            json!({ "type": "OccupationalHealthcare", "employerName": "HyPD" }),
        ))
        .expect("valid entry");
        assert_eq!(
            entry.kind,
            EntryKind::OccupationalHealthcare {
                employer_name: "HyPD".into(),
                sick_leave: None
            }
        );

        let entry = to_new_entry(&with(
            base(),
            json!({
                "type": "OccupationalHealthcare",
                "employerName": "HyPD",
                "sickLeave": { "startDate": "2019-08-05", "endDate": "2019-08-28" }
            }),
        ))
        .expect("valid entry");
        assert_eq!(
            entry.kind,
            EntryKind::OccupationalHealthcare {
                employer_name: "HyPD".into(),
                sick_leave: Some(SickLeave {
                    start_date: CalendarDate::new("2019-08-05").expect("date"),
                    end_date: CalendarDate::new("2019-08-28").expect("date"),
                })
            }
        );
    }

    #[test]
    fn invalid_sick_leave_fails_the_whole_entry() {
        let err = to_new_entry(&with(
            base(),
            json!({
                "type": "OccupationalHealthcare",
                "employerName": "HyPD",
                "sickLeave": { "startDate": "2019-08-05" }
            }),
        ))
        .expect_err("incomplete sick leave");
        assert_eq!(validation_field(err), "sickLeave");
    }

    #[test]
    fn health_check_requires_rating() {
        let err = to_new_entry(&with(base(), json!({ "type": "HealthCheck" })))
            .expect_err("missing rating");
        assert_eq!(validation_field(err), "healthCheckRating");

        let err = to_new_entry(&with(
            base(),
            json!({ "type": "HealthCheck", "healthCheckRating": 9 }),
        ))
        .expect_err("out of range rating");
        assert_eq!(validation_field(err), "healthCheckRating");
    }

    #[test]
    fn unknown_or_missing_type_fails() {
        let err = to_new_entry(&base()).expect_err("no type");
        assert_eq!(err.to_string(), "Missing entry type");

        let err = to_new_entry(&with(base(), json!({ "type": "Dental" }))).expect_err("bad type");
        assert_eq!(err.to_string(), "Invalid entry type: Dental");

        let err = to_new_entry(&with(base(), json!({ "type": 3 }))).expect_err("numeric type");
        assert_eq!(validation_field(err), "type");
    }

    #[test]
    fn missing_base_fields_fail_before_dispatch() {
        for key in ["date", "description", "specialist"] {
            let mut payload = with(base(), json!({ "type": "HealthCheck", "healthCheckRating": 0 }));
            payload.as_object_mut().expect("object").remove(key);
            let err = to_new_entry(&payload).expect_err("missing base field");
            assert_eq!(validation_field(err), key);
        }
    }

    #[test]
    fn diagnosis_codes_are_attached_only_when_present() {
        let entry = to_new_entry(&with(
            base(),
            json!({ "type": "HealthCheck", "healthCheckRating": 0, "diagnosisCodes": [] }),
        ))
        .expect("valid entry");
        assert_eq!(entry.diagnosis_codes, Some(vec![]));

        let entry = to_new_entry(&with(
            base(),
            json!({ "type": "HealthCheck", "healthCheckRating": 0, "diagnosisCodes": ["L20"] }),
        ))
        .expect("valid entry");
        assert_eq!(entry.diagnosis_codes().len(), 1);
        assert_eq!(entry.diagnosis_codes()[0].as_str(), "L20");
    }

    #[test]
    fn fields_of_other_variants_are_ignored() {
        let entry = to_new_entry(&with(
            base(),
            json!({
                "type": "HealthCheck",
                "healthCheckRating": 2,
                "employerName": "ignored",
                "discharge": { "date": "2020-01-02", "criteria": "ignored" }
            }),
        ))
        .expect("valid entry");

        let rendered = serde_json::to_value(&entry).expect("serialise");
        assert!(rendered.get("employerName").is_none());
        assert!(rendered.get("discharge").is_none());
        assert_eq!(rendered["type"], "HealthCheck");
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        for bad in [json!(null), json!([]), json!("entry"), json!(1)] {
            let err = to_new_entry(&bad).expect_err("not an object");
            assert_eq!(validation_field(err), "entry");
        }
    }
}
