//! Validated primitive types shared across patientor crates.
//!
//! Each type here can only be constructed through a checking constructor, so holding one
//! means the value already passed the field-level rules applied to request payloads.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when creating validated primitive types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// The input is not a parseable calendar date.
    #[error("Incorrect date: {0}")]
    InvalidDate(String),
    /// The input is not one of the known genders.
    #[error("Incorrect gender: {0}")]
    InvalidGender(String),
    /// The input is not one of the four health check rating levels.
    #[error("Incorrect healthCheckRating: {0}")]
    InvalidHealthCheckRating(String),
    /// The diagnosis code was empty or whitespace.
    #[error("Diagnosis code cannot be empty")]
    EmptyDiagnosisCode,
    /// The diagnosis code has leading or trailing whitespace.
    #[error("Incorrect diagnosis code: {0:?}")]
    PaddedDiagnosisCode(String),
}

// ============================================================================
// CalendarDate
// ============================================================================

/// A date string that is known to parse as a calendar date.
///
/// The original text is kept verbatim; validation only decides whether it is accepted.
/// Accepted forms:
/// - `YYYY`
/// - `YYYY-MM`
/// - `YYYY-MM-DD`
/// - `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS[.fff]`
/// - RFC 3339 timestamps (`2020-01-01T10:00:00Z`, `2020-01-01T10:00:00+02:00`)
///
/// Day and month values must exist in the calendar, so `2019-02-30` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalendarDate(String);

impl CalendarDate {
    /// Validates `input` and wraps it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidDate`] if `input` is not in one of the accepted forms.
    pub fn new(input: impl Into<String>) -> Result<Self, TypesError> {
        let input = input.into();
        if Self::is_date(&input) {
            Ok(Self(input))
        } else {
            Err(TypesError::InvalidDate(input))
        }
    }

    /// Returns true if `input` parses as a calendar date in one of the accepted forms.
    pub fn is_date(input: &str) -> bool {
        DateTime::parse_from_rfc3339(input).is_ok()
            || NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
            || NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M").is_ok()
            || NaiveDate::parse_from_str(input, "%Y-%m-%d").is_ok()
            || is_year_month(input)
            || is_year(input)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_year(input: &str) -> bool {
    input.len() == 4 && input.bytes().all(|b| b.is_ascii_digit())
}

fn is_year_month(input: &str) -> bool {
    match input.split_once('-') {
        Some((year, month)) => {
            is_year(year)
                && month.len() == 2
                && month
                    .parse::<u32>()
                    .is_ok_and(|m| (1..=12).contains(&m))
        }
        None => false,
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CalendarDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CalendarDate::new(s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Gender
// ============================================================================

/// Administrative gender of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Wire form of the gender.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| TypesError::InvalidGender(s.to_owned()))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// HealthCheckRating
// ============================================================================

/// Ordinal risk level recorded by a health check entry.
///
/// Serialised as its bare number (`0` to `3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u64> for HealthCheckRating {
    type Error = TypesError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HealthCheckRating::Healthy),
            1 => Ok(HealthCheckRating::LowRisk),
            2 => Ok(HealthCheckRating::HighRisk),
            3 => Ok(HealthCheckRating::CriticalRisk),
            other => Err(TypesError::InvalidHealthCheckRating(other.to_string())),
        }
    }
}

impl TryFrom<f64> for HealthCheckRating {
    type Error = TypesError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.fract() != 0.0 || !(0.0..=3.0).contains(&value) {
            return Err(TypesError::InvalidHealthCheckRating(value.to_string()));
        }
        HealthCheckRating::try_from(value as u64)
    }
}

impl serde::Serialize for HealthCheckRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> serde::Deserialize<'de> for HealthCheckRating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let n = u64::deserialize(deserializer)?;
        HealthCheckRating::try_from(n).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// DiagnosisCode
// ============================================================================

/// Reference to a diagnosis in the catalogue, e.g. `M24.2` or `Z57.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiagnosisCode(String);

impl DiagnosisCode {
    /// Creates a code from `input`, kept exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::EmptyDiagnosisCode`] for an empty or blank code, and
    /// [`TypesError::PaddedDiagnosisCode`] if it has surrounding whitespace.
    pub fn new(input: impl Into<String>) -> Result<Self, TypesError> {
        let input = input.into();
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyDiagnosisCode);
        }
        if trimmed.len() != input.len() {
            return Err(TypesError::PaddedDiagnosisCode(input));
        }
        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiagnosisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for DiagnosisCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for DiagnosisCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DiagnosisCode::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_date_forms() {
        for input in [
            "2019",
            "2019-08",
            "2019-08-05",
            "1997-01-29",
            "2019-08-05T10:30",
            "2019-08-05T10:30:15",
            "2019-08-05T10:30:15.250",
            "2019-08-05T10:30:15Z",
            "2019-08-05T10:30:15+02:00",
        ] {
            let date = CalendarDate::new(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(date.as_str(), input);
        }
    }

    #[test]
    fn rejects_non_dates() {
        for input in [
            "",
            "yesterday",
            "2019-13",
            "2019-02-30",
            "05/08/2019",
            "2019-08-05 trailing",
            "19",
        ] {
            let err = CalendarDate::new(input).expect_err(input);
            assert_eq!(err, TypesError::InvalidDate(input.to_string()));
        }
    }

    #[test]
    fn calendar_date_deserialisation_validates() {
        let ok: CalendarDate = serde_json::from_str("\"2015-01-02\"").expect("valid date");
        assert_eq!(ok.to_string(), "2015-01-02");

        let err = serde_json::from_str::<CalendarDate>("\"not a date\"").expect_err("invalid");
        assert!(err.to_string().contains("Incorrect date"));
    }

    #[test]
    fn gender_parses_only_known_values() {
        for g in Gender::ALL {
            assert_eq!(g.as_str().parse::<Gender>().expect("known gender"), g);
        }
        assert!("Male".parse::<Gender>().is_err());
        assert!("unknown".parse::<Gender>().is_err());
        assert_eq!(
            serde_json::to_string(&Gender::Female).expect("serialise"),
            "\"female\""
        );
    }

    #[test]
    fn health_check_rating_bounds() {
        for n in 0..=3u64 {
            assert_eq!(HealthCheckRating::try_from(n).expect("in range").value() as u64, n);
        }
        assert!(HealthCheckRating::try_from(4u64).is_err());
        assert_eq!(
            HealthCheckRating::try_from(2.0f64).expect("integral float"),
            HealthCheckRating::HighRisk
        );
        assert!(HealthCheckRating::try_from(1.5f64).is_err());
        assert!(HealthCheckRating::try_from(-1.0f64).is_err());
    }

    #[test]
    fn health_check_rating_serialises_as_number() {
        let json = serde_json::to_string(&HealthCheckRating::CriticalRisk).expect("serialise");
        assert_eq!(json, "3");
        let back: HealthCheckRating = serde_json::from_str("1").expect("deserialise");
        assert_eq!(back, HealthCheckRating::LowRisk);
        assert!(serde_json::from_str::<HealthCheckRating>("7").is_err());
    }

    #[test]
    fn diagnosis_code_is_kept_verbatim_and_non_empty() {
        let code = DiagnosisCode::new("M24.2").expect("valid code");
        assert_eq!(code.as_str(), "M24.2");
        assert_eq!(
            DiagnosisCode::new("   ").expect_err("empty"),
            TypesError::EmptyDiagnosisCode
        );
        assert_eq!(
            DiagnosisCode::new(" L20 ").expect_err("padded"),
            TypesError::PaddedDiagnosisCode(" L20 ".to_owned())
        );
        assert!(serde_json::from_str::<DiagnosisCode>(r#""L20 ""#).is_err());
    }
}
