//! Storage configuration
//!
//! Selects the backend the registry persists to (process memory or
//! PostgreSQL) and opens it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::error::StoreResult;
use crate::memory::InMemoryStore;
use crate::traits::VehicleStore;

/// Storage backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreSource {
    /// Keep records in process memory
    #[default]
    Memory,
    /// PostgreSQL (requires the `postgres` feature)
    Postgres,
}

/// Storage configuration
///
/// # Examples
///
/// ```rust
/// use vehicletype_repository::StoreConfig;
///
/// let config = StoreConfig::memory();
/// assert!(config.validate().is_ok());
///
/// let config = StoreConfig::postgres("postgresql://localhost/vehicletype").with_migrations();
/// assert!(config.run_migrations);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub source: StoreSource,

    /// Connection URL (required for the Postgres source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Apply the bundled schema on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn postgres(url: impl Into<String>) -> Self {
        Self {
            source: StoreSource::Postgres,
            database_url: Some(url.into()),
            run_migrations: false,
        }
    }

    pub fn with_migrations(mut self) -> Self {
        self.run_migrations = true;
        self
    }

    /// Check that the selected source has everything it needs
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source {
            StoreSource::Memory => Ok(()),
            StoreSource::Postgres => {
                if self.database_url.as_deref().map_or(true, str::is_empty) {
                    return Err(ConfigError::MissingField {
                        backend: "postgres",
                        field: "database_url",
                    });
                }
                if !cfg!(feature = "postgres") {
                    return Err(ConfigError::Unsupported("postgres"));
                }
                Ok(())
            }
        }
    }

    /// Open the configured store
    pub async fn open(&self) -> StoreResult<Arc<dyn VehicleStore>> {
        self.validate()
            .map_err(|e| crate::StoreError::Other(e.to_string()))?;

        match self.source {
            StoreSource::Memory => {
                info!("Using in-memory vehicle store");
                Ok(Arc::new(InMemoryStore::new()))
            }
            StoreSource::Postgres => self.open_postgres().await,
        }
    }

    #[cfg(feature = "postgres")]
    async fn open_postgres(&self) -> StoreResult<Arc<dyn VehicleStore>> {
        let url = self.database_url.as_deref().unwrap_or_default();
        let store = crate::postgres::PostgresStore::new(url).await?;
        if self.run_migrations {
            store.migrate().await?;
        }
        info!("Using PostgreSQL vehicle store");
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "postgres"))]
    async fn open_postgres(&self) -> StoreResult<Arc<dyn VehicleStore>> {
        Err(crate::StoreError::Other(
            ConfigError::Unsupported("postgres").to_string(),
        ))
    }
}

// Connection URLs may carry credentials
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("source", &self.source)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required field is missing for the selected source
    #[error("{backend} source requires {field} to be set")]
    MissingField {
        backend: &'static str,
        field: &'static str,
    },

    /// The source was not compiled in
    #[error("{0} support is not enabled in this build")]
    Unsupported(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config() {
        let config = StoreConfig::memory();

        assert_eq!(config.source, StoreSource::Memory);
        assert!(config.database_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let config = StoreConfig {
            source: StoreSource::Postgres,
            database_url: None,
            run_migrations: false,
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingField {
                backend: "postgres",
                field: "database_url"
            })
        );
    }

    #[cfg(not(feature = "postgres"))]
    #[test]
    fn test_postgres_without_feature() {
        let config = StoreConfig::postgres("postgresql://localhost/vehicletype");
        assert_eq!(config.validate(), Err(ConfigError::Unsupported("postgres")));
    }

    #[test]
    fn test_source_deserializes_lowercase() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"source":"postgres","database_url":"postgresql://db"}"#)
                .unwrap();

        assert_eq!(config.source, StoreSource::Postgres);
        assert_eq!(config.database_url.as_deref(), Some("postgresql://db"));
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = StoreConfig::postgres("postgresql://admin:hunter2@db/vehicletype");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("Postgres"));
    }

    #[test]
    fn test_default_source() {
        assert_eq!(StoreSource::default(), StoreSource::Memory);
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = StoreConfig::memory().open().await.unwrap();
        assert!(!store
            .exists_by_id(vehicletype_core::VehicleKind::Car, 1)
            .await
            .unwrap());
    }
}
