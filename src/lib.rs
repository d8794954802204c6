//! Flattens experiment session exports into uniform, export-ready rows.
//!
//! An export holds participants, each with sessions of answered questions
//! (timing plus keystroke telemetry) and an optional post-session survey.
//! [`document`] unwraps the export and drives [`flatten_record`] over every
//! participant; [`export`] writes the resulting rows as JSON and CSV.

pub mod document;
pub mod export;
pub mod flatten_record;
pub mod summary;

pub use flatten_record::Row;
