//! Error types for the household tax engine.
//!
//! The calculation pipeline itself is total and never fails: every numeric
//! guard clamps instead of rejecting. Errors only arise at the configuration
//! boundary, when rate tables are read from disk and validated.

use thiserror::Error;

/// The main error type for the household tax engine.
///
/// # Example
///
/// ```
/// use household_tax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/medicare.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/medicare.yaml");
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

    /// Configuration parsed but describes an unusable rate table.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field, e.g. `income_tax.brackets[2].threshold`.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
