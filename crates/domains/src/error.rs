//! Centralized error handling for the Conecta Vila crates.
//!
//! Nothing in this system is fatal to the process; the worst case is a
//! user-visible toast and an unchanged data view.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found (e.g. a business id unknown to the directory).
    #[error("{0} not found with id {1}")]
    NotFound(&'static str, String),

    /// User input failed a required/min-length/shape check. Surfaced inline
    /// next to the offending field, never fatal.
    #[error("validation failed: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// A simulated-network operation rejected. The store state is left
    /// unchanged; optimistic callers restore their pre-mutation snapshot.
    #[error("transport error: {0}")]
    Transport(String),

    /// Slot store (local persistence) failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Operation not permitted for the current viewer.
    #[error("forbidden: {0}")]
    Forbidden(String),
}

/// A specialized Result type for Conecta Vila logic.
pub type Result<T> = std::result::Result<T, Error>;

/// A single validation failure, addressed to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Convenience constructor for a single-field validation error.
    pub fn validation(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Validation(vec![ValidationIssue::new(field, code, message)])
    }
}
