//! Field-level parsers for untyped request payloads.
//!
//! Every parser takes a raw JSON value and either returns the narrowed, typed value or a
//! [`PatientError::Validation`] naming the offending field. Parsers never coerce: a number is
//! not accepted where a string is expected, and vice versa.

use crate::models::{Discharge, SickLeave};
use crate::{PatientError, PatientResult};
use patientor_types::{CalendarDate, DiagnosisCode, Gender, HealthCheckRating};
use serde_json::{Map, Value};

/// A JSON object payload.
pub type Object = Map<String, Value>;

/// Narrows `value` to a JSON object.
pub(crate) fn as_object<'a>(value: &'a Value, field: &str) -> PatientResult<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| PatientError::validation(field, "Incorrect or missing data"))
}

/// Looks up a key that must be present on `object`.
pub(crate) fn require<'a>(
    object: &'a Object,
    key: &str,
    context: &str,
) -> PatientResult<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| PatientError::validation(key, format!("Missing {key} for {context}")))
}

fn parse_string(value: &Value, field: &str) -> PatientResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(PatientError::validation(
            field,
            format!("Incorrect or missing {field}"),
        )),
    }
}

pub fn parse_name(name: &Value) -> PatientResult<String> {
    parse_string(name, "name")
}

pub fn parse_occupation(occupation: &Value) -> PatientResult<String> {
    parse_string(occupation, "occupation")
}

pub fn parse_ssn(ssn: &Value) -> PatientResult<String> {
    parse_string(ssn, "ssn")
}

pub fn parse_description(description: &Value) -> PatientResult<String> {
    parse_string(description, "description")
}

pub fn parse_specialist(specialist: &Value) -> PatientResult<String> {
    parse_string(specialist, "specialist")
}

pub fn parse_employer_name(employer_name: &Value) -> PatientResult<String> {
    parse_string(employer_name, "employerName")
}

pub fn parse_criteria(criteria: &Value) -> PatientResult<String> {
    parse_string(criteria, "criteria")
}

/// Parses a date field. The accepted string is returned unchanged.
///
/// `field` is used to name the field in the error, e.g. `dateOfBirth`.
pub fn parse_date(date: &Value, field: &str) -> PatientResult<CalendarDate> {
    match date {
        Value::String(s) => {
            CalendarDate::new(s.as_str()).map_err(|e| PatientError::from_types(field, e))
        }
        other => Err(PatientError::validation(
            field,
            format!("Incorrect date: {other}"),
        )),
    }
}

pub fn parse_gender(gender: &Value) -> PatientResult<Gender> {
    match gender {
        Value::String(s) => s
            .parse::<Gender>()
            .map_err(|e| PatientError::from_types("gender", e)),
        other => Err(PatientError::validation(
            "gender",
            format!("Incorrect gender: {other}"),
        )),
    }
}

/// Parses a health check rating: a JSON number equal to one of 0, 1, 2 or 3.
pub fn parse_health_check_rating(rating: &Value) -> PatientResult<HealthCheckRating> {
    let invalid = || {
        PatientError::validation(
            "healthCheckRating",
            format!("Incorrect or missing healthCheckRating: {rating}"),
        )
    };

    let Value::Number(n) = rating else {
        return Err(invalid());
    };

    let parsed = match (n.as_u64(), n.as_f64()) {
        (Some(u), _) => HealthCheckRating::try_from(u),
        (None, Some(f)) => HealthCheckRating::try_from(f),
        (None, None) => return Err(invalid()),
    };
    parsed.map_err(|_| invalid())
}

/// Reads `diagnosisCodes` from the carrying object.
///
/// A missing key yields an empty list. A present key must hold an array of non-empty strings;
/// order is preserved.
pub fn parse_diagnosis_codes(object: &Object) -> PatientResult<Vec<DiagnosisCode>> {
    let Some(raw) = object.get("diagnosisCodes") else {
        return Ok(Vec::new());
    };

    let Value::Array(items) = raw else {
        return Err(PatientError::validation(
            "diagnosisCodes",
            "Incorrect diagnosisCodes: expected an array of codes",
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => DiagnosisCode::new(s)
                .map_err(|e| PatientError::from_types(format!("diagnosisCodes[{index}]"), e)),
            other => Err(PatientError::validation(
                format!("diagnosisCodes[{index}]"),
                format!("Incorrect diagnosis code at index {index}: {other}"),
            )),
        })
        .collect()
}

pub fn parse_discharge(discharge: &Value) -> PatientResult<Discharge> {
    let object = match discharge {
        Value::Object(o) if o.contains_key("date") && o.contains_key("criteria") => o,
        other => {
            return Err(PatientError::validation(
                "discharge",
                format!("Incorrect or missing discharge: {other}"),
            ))
        }
    };

    Ok(Discharge {
        date: parse_date(&object["date"], "discharge.date")?,
        criteria: parse_criteria(&object["criteria"])
            .map_err(|e| e.nest("discharge", "Incorrect discharge"))?,
    })
}

pub fn parse_sick_leave(sick_leave: &Value) -> PatientResult<SickLeave> {
    let object = match sick_leave {
        Value::Object(o) if o.contains_key("startDate") && o.contains_key("endDate") => o,
        other => {
            return Err(PatientError::validation(
                "sickLeave",
                format!("Incorrect or missing sickLeave: {other}"),
            ))
        }
    };

    Ok(SickLeave {
        start_date: parse_date(&object["startDate"], "sickLeave.startDate")?,
        end_date: parse_date(&object["endDate"], "sickLeave.endDate")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_of(err: PatientError) -> String {
        match err {
            PatientError::Validation { field, .. } => field,
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn string_parsers_reject_non_strings() {
        assert_eq!(parse_name(&json!("Sho Hirano")).expect("string"), "Sho Hirano");
        assert_eq!(parse_name(&json!("")).expect("empty is still a string"), "");

        for bad in [json!(null), json!(42), json!(true), json!(["a"]), json!({})] {
            assert_eq!(field_of(parse_name(&bad).expect_err("non-string")), "name");
            assert_eq!(field_of(parse_ssn(&bad).expect_err("non-string")), "ssn");
            assert_eq!(
                field_of(parse_employer_name(&bad).expect_err("non-string")),
                "employerName"
            );
        }
    }

    #[test]
    fn valid_dates_are_returned_unchanged() {
        for s in ["1997-01-29", "2019-08-05T10:00:00Z", "2020"] {
            let date = parse_date(&json!(s), "date").expect("valid date");
            assert_eq!(date.as_str(), s);
        }
    }

    #[test]
    fn invalid_dates_fail_and_name_the_field() {
        for bad in [json!("not a date"), json!("2020-02-30"), json!(20200101), json!(null)] {
            let err = parse_date(&bad, "dateOfBirth").expect_err("invalid date");
            assert!(err.to_string().starts_with("Incorrect date"));
            assert_eq!(field_of(err), "dateOfBirth");
        }
    }

    #[test]
    fn gender_accepts_exactly_the_three_values() {
        for g in ["male", "female", "other"] {
            assert_eq!(parse_gender(&json!(g)).expect("known").as_str(), g);
        }
        for bad in [json!("Male"), json!("unknown"), json!(""), json!(1)] {
            assert_eq!(field_of(parse_gender(&bad).expect_err("unknown")), "gender");
        }
    }

    #[test]
    fn health_check_rating_accepts_zero_to_three() {
        for n in 0..=3u8 {
            assert_eq!(
                parse_health_check_rating(&json!(n)).expect("in range").value(),
                n
            );
        }
        assert_eq!(
            parse_health_check_rating(&json!(2.0)).expect("integral float"),
            HealthCheckRating::HighRisk
        );
        for bad in [json!(4), json!(-1), json!(1.5), json!("1"), json!(null)] {
            let err = parse_health_check_rating(&bad).expect_err("out of range");
            assert_eq!(field_of(err), "healthCheckRating");
        }
    }

    #[test]
    fn diagnosis_codes_default_to_empty_and_keep_order() {
        let absent = json!({ "date": "2020-01-01" });
        assert!(parse_diagnosis_codes(absent.as_object().expect("object"))
            .expect("absent key")
            .is_empty());

        let present = json!({ "diagnosisCodes": ["Z57.1", "M24.2", "Z57.1"] });
        let codes = parse_diagnosis_codes(present.as_object().expect("object")).expect("codes");
        let codes: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes, ["Z57.1", "M24.2", "Z57.1"]);
    }

    #[test]
    fn diagnosis_codes_must_be_strings() {
        let not_array = json!({ "diagnosisCodes": "Z57.1" });
        assert_eq!(
            field_of(parse_diagnosis_codes(not_array.as_object().expect("object")).expect_err("bad")),
            "diagnosisCodes"
        );

        let bad_element = json!({ "diagnosisCodes": ["Z57.1", 7] });
        assert_eq!(
            field_of(
                parse_diagnosis_codes(bad_element.as_object().expect("object")).expect_err("bad")
            ),
            "diagnosisCodes[1]"
        );
    }

    #[test]
    fn padded_diagnosis_code_is_rejected_not_rewritten() {
        let padded = json!({ "diagnosisCodes": ["Z57.1", " L20 "] });
        let err = parse_diagnosis_codes(padded.as_object().expect("object")).expect_err("padded");
        assert_eq!(err.to_string(), r#"Incorrect diagnosis code: " L20 ""#);
        assert_eq!(field_of(err), "diagnosisCodes[1]");
    }

    #[test]
    fn discharge_requires_both_keys() {
        let ok = parse_discharge(&json!({ "date": "2015-01-16", "criteria": "Thumb has healed." }))
            .expect("valid discharge");
        assert_eq!(ok.date.as_str(), "2015-01-16");
        assert_eq!(ok.criteria, "Thumb has healed.");

        assert_eq!(
            field_of(parse_discharge(&json!({ "date": "2015-01-16" })).expect_err("no criteria")),
            "discharge"
        );
        assert_eq!(
            field_of(parse_discharge(&json!("2015-01-16")).expect_err("not an object")),
            "discharge"
        );
        assert_eq!(
            field_of(
                parse_discharge(&json!({ "date": "soon", "criteria": "x" })).expect_err("bad date")
            ),
            "discharge.date"
        );
        assert_eq!(
            field_of(
                parse_discharge(&json!({ "date": "2015-01-16", "criteria": 1 }))
                    .expect_err("bad criteria")
            ),
            "discharge.criteria"
        );
    }

    #[test]
    fn sick_leave_requires_two_valid_dates() {
        let ok = parse_sick_leave(&json!({ "startDate": "2019-08-05", "endDate": "2019-08-28" }))
            .expect("valid sick leave");
        assert_eq!(ok.start_date.as_str(), "2019-08-05");
        assert_eq!(ok.end_date.as_str(), "2019-08-28");

        assert_eq!(
            field_of(parse_sick_leave(&json!({ "startDate": "2019-08-05" })).expect_err("no end")),
            "sickLeave"
        );
        assert_eq!(
            field_of(
                parse_sick_leave(&json!({ "startDate": "2019-08-05", "endDate": 3 }))
                    .expect_err("bad end")
            ),
            "sickLeave.endDate"
        );
    }
}
