//! Error types for the vehicle registry domain

use crate::kind::VehicleKind;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name to message map produced by DTO validation
pub type FieldErrors = BTreeMap<String, String>;

/// Result type alias for domain operations
pub type VehicleResult<T> = Result<T, VehicleError>;

/// Errors surfaced by repository and service ports
///
/// Ports never catch or rewrite these; they reach the transport boundary as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VehicleError {
    /// No record of this kind has the given id
    #[error("Could not find {kind} with id {id}")]
    NotFound { kind: VehicleKind, id: i64 },

    /// DTO failed field validation
    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(FieldErrors),

    /// Numeric path or query parameter was not a non-negative integer
    #[error("Invalid value '{value}' for {field}: Input must be numeric")]
    MalformedIdentifier { field: String, value: String },

    /// Storage collaborator failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VehicleError {
    /// Build a not-found error for the given kind and id
    pub fn not_found(kind: VehicleKind, id: i64) -> Self {
        VehicleError::NotFound { kind, id }
    }

    /// Build a malformed-identifier error
    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        VehicleError::MalformedIdentifier {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether this error should be reported as a client mistake
    pub fn is_client_error(&self) -> bool {
        !matches!(self, VehicleError::Storage(_))
    }
}

fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join(", ")
}
