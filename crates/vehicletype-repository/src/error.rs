//! Error types for the storage layer

use thiserror::Error;
use vehicletype_core::{VehicleError, VehicleKind};

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur inside a storage collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    /// A stored row could not be mapped to the requested kind
    #[error("Record {id} is a {actual}, not a {expected}")]
    KindMismatch {
        id: i64,
        expected: VehicleKind,
        actual: VehicleKind,
    },

    /// A stored row is missing its kind-specific columns
    #[error("Record {id} has no {kind} details")]
    MissingDetails { id: i64, kind: VehicleKind },

    /// Identity sequence exhausted
    #[error("Identity sequence exhausted")]
    IdentityExhausted,

    /// Database error (when database feature is enabled)
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// Generic error
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<StoreError> for VehicleError {
    fn from(err: StoreError) -> Self {
        VehicleError::Storage(err.to_string())
    }
}
