//! Error types for the income tax engine.
//!
//! The calculation functions themselves are total and never fail. Errors only
//! arise around them: loading and validating configuration, reading and
//! writing the persisted monthly log, and validating raw input at the HTTP
//! boundary.

use thiserror::Error;

/// The main error type for the income tax engine.
///
/// # Example
///
/// ```
/// use income_tax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/brackets.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/brackets.yaml");
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

    /// The bracket table is not contiguous, not ordered, or has invalid rates.
    #[error("Invalid bracket table: {message}")]
    InvalidBracketTable {
        /// A description of the violated invariant.
        message: String,
    },

    /// A configuration value outside the bracket table was invalid.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No default exchange rate is configured for a currency.
    #[error("Unknown currency: {code}")]
    UnknownCurrency {
        /// The currency code that was looked up.
        code: String,
    },

    /// A caller-supplied input value was invalid.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The monthly log store failed to read or write.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
