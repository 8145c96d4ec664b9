//! Error types for the deadline engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a case computation can report: reference data that
//! cannot be loaded, pipeline inputs missing for the selected mode, lookup
//! tables without an entry for a required year, and rejected cases.

use thiserror::Error;

/// The main error type for the deadline engine.
///
/// All operations in the engine return this error type. None of them panic;
/// a failed computation surfaces exactly one of these variants to the caller.
///
/// # Example
///
/// ```
/// use deadline_engine::error::EngineError;
///
/// let error = EngineError::ReferenceDataMissing {
///     table: "minimum_wage".to_string(),
///     year: 2030,
/// };
/// assert_eq!(error.to_string(), "No minimum_wage entry for year 2030");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A reference-table file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A reference-table file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A reference table parsed but is internally inconsistent.
    #[error("Invalid reference data: {message}")]
    InvalidReferenceData {
        /// A description of the inconsistency.
        message: String,
    },

    /// A fixed-date term mode was selected without supplying its date.
    #[error("Missing required field '{field}' for fixed-date mode")]
    MissingFixedDate {
        /// The input field that must be present.
        field: String,
    },

    /// A positive conditional term was declared but compliance was never acknowledged.
    #[error(
        "Compliance with the conditional obligation ({term_days} business days) was not acknowledged"
    )]
    UnacknowledgedCompliance {
        /// The declared conditional term.
        term_days: u32,
    },

    /// A yearly reference table has no entry for a required year.
    #[error("No {table} entry for year {year}")]
    ReferenceDataMissing {
        /// The name of the table that was consulted.
        table: String,
        /// The year that was requested.
        year: i32,
    },

    /// The case validator reported violations; the pipeline was not run.
    #[error("Case validation failed: {}", messages.join("; "))]
    ValidationFailed {
        /// The violation messages, in check order.
        messages: Vec<String>,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
