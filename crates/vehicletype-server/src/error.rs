//! Server error types
//!
//! Domain errors travel unchanged through the service and repository ports
//! and are translated to HTTP responses here, in one place.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::error;
use vehicletype_core::{FieldErrors, VehicleError, VehicleKind};

/// Message reported for non-numeric path and query parameters
pub const NUMERIC_MESSAGE: &str = "Input must be numeric";

/// Timestamp layout of error bodies (12-hour clock, no meridiem)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S";

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: String,
    pub status: u16,
    pub errors: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, errors: BTreeMap<String, String>) -> Self {
        Self {
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            status: status.as_u16(),
            errors,
        }
    }
}

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// No record of this kind under the requested id
    NotFound { kind: VehicleKind, message: String },

    /// Request body failed field validation
    Validation(FieldErrors),

    /// Path or query parameter is not numeric
    MalformedParameter { field: String },

    /// Request body is not valid JSON for the record shape
    MalformedBody(String),

    /// Internal server error
    InternalError(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound { message, .. } => write!(f, "Not found: {}", message),
            ServerError::Validation(errors) => {
                write!(f, "Validation failed for {} field(s)", errors.len())
            }
            ServerError::MalformedParameter { field } => {
                write!(f, "Invalid {}: {}", field, NUMERIC_MESSAGE)
            }
            ServerError::MalformedBody(msg) => write!(f, "Invalid request body: {}", msg),
            ServerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::Validation(_)
            | ServerError::MalformedParameter { .. }
            | ServerError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Key to message map placed in the response body
    pub fn errors(self) -> BTreeMap<String, String> {
        match self {
            ServerError::NotFound { kind, message } => {
                BTreeMap::from([(kind.label().to_string(), message)])
            }
            ServerError::Validation(errors) => errors,
            ServerError::MalformedParameter { field } => {
                BTreeMap::from([(field, NUMERIC_MESSAGE.to_string())])
            }
            ServerError::MalformedBody(msg) => BTreeMap::from([("body".to_string(), msg)]),
            ServerError::InternalError(msg) => BTreeMap::from([("error".to_string(), msg)]),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse::new(status, self.errors());
        (status, Json(body)).into_response()
    }
}

impl From<VehicleError> for ServerError {
    fn from(err: VehicleError) -> Self {
        match err {
            VehicleError::NotFound { kind, .. } => ServerError::NotFound {
                kind,
                message: err.to_string(),
            },
            VehicleError::Validation(errors) => ServerError::Validation(errors),
            VehicleError::MalformedIdentifier { field, .. } => {
                ServerError::MalformedParameter { field }
            }
            VehicleError::Storage(msg) => ServerError::InternalError(msg),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
