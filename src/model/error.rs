//! Error types for cashlens.
//!
//! The recomputation core never fails: offers, filters and sort keys are
//! always well-formed by the time they reach it. Every failure mode lives
//! at the boundaries, in catalog ingestion, input reading, configuration
//! and the terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the binary
//!   - [`InputError`] - Catalog file/stdin reading failures
//!     - [`CatalogError`] - Payload that does not satisfy the data contract
//!   - [`crate::config::ConfigError`] - Config file read/parse failures
//!   - [`crate::logging::LoggingError`] - Log sink setup failures
//!   - [`crate::view::TuiError`] - Terminal failures

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All variants are fatal for the binary: a catalog that cannot be loaded
/// leaves nothing to browse.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read or validate the catalog.
    #[error("Failed to load catalog: {0}")]
    Input(#[from] InputError),

    /// Config file exists but is unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log sink could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal setup or rendering failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] crate::view::TuiError),
}

/// Errors encountered when reading the catalog from a file or stdin.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use cashlens::model::error::InputError;
///
/// let err = InputError::FileNotFound {
///     path: PathBuf::from("/tmp/missing.json"),
/// };
/// assert!(err.to_string().contains("/tmp/missing.json"));
/// ```
#[derive(Debug, Error)]
pub enum InputError {
    /// The catalog path does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path as given on the command line.
        path: PathBuf,
    },

    /// No path was given and stdin is an interactive terminal.
    #[error("No input source: provide a catalog file path or pipe JSON to stdin")]
    NoInput,

    /// Any other I/O failure while reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload was read but violates the catalog contract.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Position of a rate record inside one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// Current offer, by index in `offers`.
    Offer(usize),
    /// Past offer, by index in `history`.
    History(usize),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Offer(index) => write!(f, "offer #{index}"),
            Record::History(index) => write!(f, "history entry #{index}"),
        }
    }
}

/// Catalog payload that violates the data contract.
///
/// Raised only at ingestion. Store and record positions are zero-based
/// indices into the payload so the offending record can be located.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Payload is not valid JSON or a field has the wrong JSON type.
    #[error("Invalid catalog JSON: {reason}")]
    Json {
        /// serde_json error text, including line and column.
        reason: String,
        /// 1-based line of the failure, 0 when unknown.
        line: usize,
        /// 1-based column of the failure, 0 when unknown.
        column: usize,
    },

    /// A store has no name, or only whitespace.
    #[error("Store #{store} has an empty or missing name")]
    InvalidStoreName {
        /// Store index in the payload.
        store: usize,
    },

    /// A record has no platform id.
    #[error("Store '{store}' {record} is missing platform_id")]
    MissingPlatformId {
        /// Store name.
        store: String,
        /// Offending record.
        record: Record,
    },

    /// A record's platform id is not an integer.
    #[error("Store '{store}' {record} has non-integer platform_id {raw}")]
    InvalidPlatformId {
        /// Store name.
        store: String,
        /// Offending record.
        record: Record,
        /// The rejected JSON value.
        raw: String,
    },

    /// An entry of the top-level platforms list has a non-integer id.
    #[error("Platform #{index} has non-integer id {raw}")]
    InvalidPlatformListId {
        /// Index in the platforms list.
        index: usize,
        /// The rejected JSON value.
        raw: String,
    },

    /// A record has no base value.
    #[error("Store '{store}' {record} is missing value")]
    MissingValue {
        /// Store name.
        store: String,
        /// Offending record.
        record: Record,
    },

    /// A rate is not a JSON number.
    #[error("Store '{store}' {record} has non-numeric {field} {raw}")]
    InvalidValueType {
        /// Store name.
        store: String,
        /// Offending record.
        record: Record,
        /// `value` or `value_specific`.
        field: &'static str,
        /// The rejected JSON value.
        raw: String,
    },

    /// A rate is negative or not finite.
    #[error("Store '{store}' {record} has invalid {field} {value}")]
    InvalidValue {
        /// Store name.
        store: String,
        /// Offending record.
        record: Record,
        /// `value` or `value_specific`.
        field: &'static str,
        /// The rejected number.
        value: f64,
    },
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Json {
            line: err.line(),
            column: err.column(),
            reason: err.to_string(),
        }
    }
}
