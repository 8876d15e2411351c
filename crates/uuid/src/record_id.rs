//! Opaque record identifiers.

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Longest identifier accepted from outside the process.
const MAX_ID_LEN: usize = 64;

/// Unique identifier of a patient or an entry.
///
/// # Construction
/// - [`RecordId::generate`] mints a fresh identifier for a newly inserted record.
/// - [`RecordId::parse`] accepts an externally supplied identifier (seed data, CLI input).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Validates an identifier supplied from outside.
    ///
    /// The value is otherwise opaque: it must be non-empty, at most 64 bytes, and consist of
    /// ASCII letters, digits, `-` or `_` so that it can be embedded in a URL path.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if any of those rules is broken.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if Self::is_valid(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(UuidError::InvalidInput(format!(
            "identifier must be 1-{MAX_ID_LEN} characters of [A-Za-z0-9_-], got: '{input}'"
        )))
    }

    /// Returns true if `input` would be accepted by [`RecordId::parse`].
    pub fn is_valid(input: &str) -> bool {
        !input.is_empty()
            && input.len() <= MAX_ID_LEN
            && input
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_hyphenated_uuids() {
        let id = RecordId::generate();
        assert_eq!(id.as_str().len(), 36);
        let parsed = Uuid::parse_str(id.as_str()).expect("generated id is a uuid");
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id.as_str(), id.as_str().to_lowercase());
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids: HashSet<RecordId> = (0..1000).map(|_| RecordId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn parse_accepts_seed_style_identifiers() {
        let id = RecordId::parse("d27736ec-f723-11e9-8f0b-362b9e155667").expect("valid id");
        assert_eq!(id.to_string(), "d27736ec-f723-11e9-8f0b-362b9e155667");
        assert!(RecordId::parse("patient_42").is_ok());
    }

    #[test]
    fn parse_rejects_unusable_identifiers() {
        let too_long = "x".repeat(65);
        for input in ["", "has space", "a/b", "naïve", too_long.as_str()] {
            let err = RecordId::parse(input).expect_err("should reject");
            assert!(matches!(err, UuidError::InvalidInput(msg) if msg.contains("identifier")));
        }
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let id = RecordId::parse("abc-123").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"abc-123\"");
        assert!(serde_json::from_str::<RecordId>("\"a b\"").is_err());
    }
}
