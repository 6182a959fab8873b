//! Error types for the Income Accrual Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while parsing, validating and
//! aggregating income sources.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Income Accrual Engine.
///
/// Per-source problems are turned into diagnostics by the aggregator and never
/// abort a computation; only configuration failures and a bad top-level
/// `as_of` date reach the caller as `Err`.
///
/// # Example
///
/// ```
/// use accrual_engine::error::EngineError;
///
/// let error = EngineError::InvalidCadence {
///     value: "fortnightly-ish".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid pay cadence: fortnightly-ish");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A cadence name that is not one of the supported pay cadences.
    #[error("Invalid pay cadence: {value}")]
    InvalidCadence {
        /// The unrecognized cadence name.
        value: String,
    },

    /// A date was unparsable or outside the supported range.
    #[error("Invalid date in field '{field}': {message}")]
    InvalidDate {
        /// The field holding the date.
        field: String,
        /// A description of what made the date invalid.
        message: String,
    },

    /// An amount was negative, non-finite or unparsable.
    #[error("Invalid amount in field '{field}': {message}")]
    InvalidAmount {
        /// The field holding the amount.
        field: String,
        /// A description of what made the amount invalid.
        message: String,
    },

    /// A source was internally inconsistent.
    #[error("Invalid income source '{source_id}': {message}")]
    InvalidSource {
        /// The ID of the invalid source.
        source_id: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// The reference date of a computation was not supplied.
    #[error("Missing as-of date")]
    MissingAsOfDate,

    /// The reference date of a computation is outside the supported range.
    #[error("As-of date {date} is outside the supported range {min_year}-{max_year}")]
    AsOfDateOutOfRange {
        /// The rejected date.
        date: NaiveDate,
        /// The first supported year.
        min_year: i32,
        /// The last supported year.
        max_year: i32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
