//! Cache storage factory - selects the connection strategy once at startup

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::domain::cache::{
    CacheStorage, DefaultKeyGenerator, StorageOptions, StoreConnection, DEFAULT_TTL,
};
use crate::domain::DomainError;

use super::direct::DirectConnection;
use super::pool::RedisPooledConnection;
use super::settings::{resolve_settings, ConnectionSettings};

/// How commands reach Redis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientMode {
    /// One shared multiplexed connection
    #[default]
    Direct,
    /// A connection checked out of a pool per command
    Pooled,
}

impl std::fmt::Display for ClientMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientMode::Direct => write!(f, "direct"),
            ClientMode::Pooled => write!(f, "pooled"),
        }
    }
}

impl std::str::FromStr for ClientMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(ClientMode::Direct),
            "pooled" | "pool" => Ok(ClientMode::Pooled),
            _ => Err(DomainError::configuration(format!(
                "Unknown client mode: {}. Valid modes: direct, pooled",
                s
            ))),
        }
    }
}

/// Configuration for building a cache storage
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Explicit connection settings; the environment fills in a missing url
    pub redis: Option<ConnectionSettings>,
    pub mode: ClientMode,
    /// Maximum pool size (pooled mode only)
    pub max_connections: usize,
    /// Default TTL for entries, in seconds
    pub default_ttl_secs: u64,
    /// Namespace prepended to every key
    pub key_prefix: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            redis: None,
            mode: ClientMode::Direct,
            max_connections: 16,
            default_ttl_secs: DEFAULT_TTL.as_secs(),
            key_prefix: None,
        }
    }
}

impl ProviderConfig {
    /// Creates a configuration for the given Redis URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            redis: Some(ConnectionSettings::from_url(url)),
            ..Default::default()
        }
    }

    /// Sets explicit connection settings
    pub fn with_settings(mut self, settings: ConnectionSettings) -> Self {
        self.redis = Some(settings);
        self
    }

    /// Uses a connection pool of the given size
    pub fn pooled(mut self, max_connections: usize) -> Self {
        self.mode = ClientMode::Pooled;
        self.max_connections = max_connections;
        self
    }

    /// Sets the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl_secs = ttl.as_secs();
        self
    }

    /// Sets the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Storage options derived from this configuration
    pub fn storage_options(&self) -> StorageOptions {
        let mut key_generator = DefaultKeyGenerator::new();
        if let Some(prefix) = &self.key_prefix {
            key_generator = key_generator.with_namespace(prefix.clone());
        }

        StorageOptions::default()
            .with_ttl(self.default_ttl())
            .with_key_generator(Arc::new(key_generator))
    }
}

/// Factory for creating cache storages
#[derive(Debug, Default)]
pub struct CacheStorageFactory;

impl CacheStorageFactory {
    /// Creates a new cache storage factory
    pub fn new() -> Self {
        Self
    }

    /// Resolves settings and opens a connection in the configured mode
    pub async fn create(&self, config: &ProviderConfig) -> Result<CacheStorage, DomainError> {
        let connection = self.connect(config).await?;
        Ok(self.create_with_client(config, connection))
    }

    /// Creates a storage around an already built connection
    pub fn create_with_client(
        &self,
        config: &ProviderConfig,
        connection: Arc<dyn StoreConnection>,
    ) -> CacheStorage {
        CacheStorage::new(connection, config.storage_options())
    }

    /// Opens the connection strategy for the configuration
    ///
    /// Fails when there are no `cache.redis` settings and the environment
    /// names no server. Settings without a url or host target 127.0.0.1.
    pub async fn connect(
        &self,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn StoreConnection>, DomainError> {
        let settings = resolve_settings(config.redis.clone()).ok_or_else(|| {
            DomainError::configuration(
                "No Redis connection configured: set cache.redis or one of \
                 REDIS_PROVIDER, REDIS_URL, REDIS_SERVER",
            )
        })?;

        info!(mode = %config.mode, "Opening Redis cache storage");

        match config.mode {
            ClientMode::Direct => Ok(Arc::new(DirectConnection::connect(&settings).await?)),
            ClientMode::Pooled => Ok(Arc::new(RedisPooledConnection::connect(
                &settings,
                config.max_connections,
            )?)),
        }
    }
}
