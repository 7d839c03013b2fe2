//! Error types for the Settlement Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing settlements and
//! moving separation requests through their workflow.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Settlement Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use settlement_engine::error::EngineError;
///
/// let error = EngineError::ValidationError {
///     field: "basic_salary".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field 'basic_salary': must not be negative");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds unusable values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input violated a precondition of the calculation or workflow.
    #[error("Invalid field '{field}': {message}")]
    ValidationError {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee exists with the given ID.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The ID that was looked up.
        employee_id: String,
    },

    /// No separation request exists with the given ID.
    #[error("Separation request not found: {id}")]
    SeparationNotFound {
        /// The ID that was looked up.
        id: Uuid,
    },

    /// A status change was requested that the state machine does not allow.
    #[error("Invalid transition for '{entity}': {from} -> {to}")]
    InvalidTransition {
        /// What was being transitioned (e.g. "separation", "settlement").
        entity: String,
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
    },

    /// Departments still have open clearance items.
    #[error("Clearance pending for departments: {}", departments.join(", "))]
    ClearancePending {
        /// Departments whose clearance is neither cleared nor not applicable.
        departments: Vec<String>,
    },

    /// A settlement was already computed for the separation request.
    #[error("Settlement already calculated for separation {id}")]
    SettlementAlreadyCalculated {
        /// The separation request ID.
        id: Uuid,
    },

    /// The separation request has no settlement yet.
    #[error("No settlement calculated for separation {id}")]
    SettlementMissing {
        /// The separation request ID.
        id: Uuid,
    },

    /// The backing store failed.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::ValidationError`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
