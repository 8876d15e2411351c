//! # Patientor Core
//!
//! Core business logic for the patientor record service.
//!
//! This crate contains the pure data operations:
//! - Typed patient, entry and diagnosis models
//! - Field parsers and reconstructors that turn untyped JSON payloads into typed records
//! - The in-memory patient store, seeded at startup, and a shared handle over it
//!
//! **No API concerns**: HTTP routing, status codes and CLI output belong in `api-rest` and
//! `patientor-cli`.

pub mod config;
pub mod constants;
pub mod diagnoses;
pub mod entry;
pub mod error;
pub mod models;
pub mod patient;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use diagnoses::DiagnosisCatalogue;
pub use entry::to_new_entry;
pub use error::{PatientError, PatientResult};
pub use models::{
    Diagnosis, Discharge, Entry, EntryKind, EntryType, NewEntry, NewPatient, NonSensitivePatient,
    Patient, SickLeave,
};
pub use patient::to_new_patient;
pub use seed::SeedData;
pub use service::PatientService;
pub use store::PatientStore;

pub use patientor_types::{CalendarDate, DiagnosisCode, Gender, HealthCheckRating};
pub use patientor_uuid::RecordId;
