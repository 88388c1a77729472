//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the few error conditions the engine can report: malformed bracket
//! tables and rejected compensation inputs.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// Calculations themselves never fail; errors only come from loading the
/// bracket tables or from explicitly rejecting invalid input.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidTable {
///     table: "withholding".to_string(),
///     message: "no brackets defined".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid withholding table: no brackets defined");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Table configuration could not be parsed.
    #[error("Failed to parse table configuration '{source_name}': {message}")]
    ConfigParseError {
        /// The name of the configuration source that failed to parse.
        source_name: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bracket table failed structural validation.
    #[error("Invalid {table} table: {message}")]
    InvalidTable {
        /// The table that was invalid (e.g., "withholding", "income_tax").
        table: String,
        /// A description of what made the table invalid.
        message: String,
    },

    /// An overtime category label did not match any known premium tier.
    #[error("Unrecognized overtime category: {label}")]
    UnknownOvertimeCategory {
        /// The label that could not be recognized.
        label: String,
    },

    /// A compensation input was rejected by validation.
    #[error("Invalid compensation input: {}", .violations.join("; "))]
    InvalidInput {
        /// The human-readable violations found.
        violations: Vec<String>,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
