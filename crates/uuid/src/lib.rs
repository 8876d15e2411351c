//! Record identifier utilities.
//!
//! Patients and entries are keyed by an opaque string identifier. Identifiers minted by this
//! crate are random (version 4) UUIDs in their hyphenated lowercase form, for example
//! `d2773336-f723-11e9-8f0b-362b9e155667`. Identifiers that arrive from seed data are kept as
//! given, as long as they are usable as a URL path segment.
//!
//! Uniqueness is the only property callers rely on; no ordering or time information is
//! encoded.

mod record_id;

pub use record_id::{RecordId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
