//! Server configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vehicletype_core::event::DEFAULT_EVENT_CAPACITY;
use vehicletype_core::DeleteEventPolicy;
use vehicletype_repository::{CacheConfig, StoreConfig};

/// Environment variable prefix, e.g. `VEHICLETYPE_PORT`
pub const ENV_PREFIX: &str = "VEHICLETYPE";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Cache settings applied to every vehicle kind's region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    /// Entry time-to-live in seconds
    pub ttl_secs: u64,
    /// Entry cap per region; `None` for unbounded
    pub max_entries: Option<usize>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let defaults = CacheConfig::default();
        Self {
            enabled: defaults.enabled,
            ttl_secs: defaults.default_ttl.as_secs(),
            max_entries: defaults.max_entries,
        }
    }
}

impl CacheSettings {
    pub fn to_cache_config(&self) -> CacheConfig {
        let base = if self.enabled {
            CacheConfig::new()
        } else {
            CacheConfig::disabled()
        };
        let config = base.with_ttl(Duration::from_secs(self.ttl_secs));

        match self.max_entries {
            Some(max) => config.with_max_entries(max),
            None => config.unlimited_entries(),
        }
    }
}

/// Domain event settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Broadcast buffer size per vehicle kind
    pub capacity: usize,
    pub delete_policy: DeleteEventPolicy,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_EVENT_CAPACITY,
            delete_policy: DeleteEventPolicy::default(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Log output format
    pub log_format: LogFormat,

    /// Page size used by `/all` when the request has none
    pub default_page_size: u32,

    /// Storage backend
    pub storage: StoreConfig,

    /// Record cache
    pub cache: CacheSettings,

    /// Domain events
    pub events: EventSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_format: LogFormat::default(),
            default_page_size: 10,
            storage: StoreConfig::default(),
            cache: CacheSettings::default(),
            events: EventSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, `config/server.*` and environment variables
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        Self::load_from("config/server")
    }

    /// Load configuration from the given file stem and environment variables
    ///
    /// The file is optional; its extension (`yaml`, `toml`, `json`) is probed.
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to read config: {}", e))?;

        settings
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
