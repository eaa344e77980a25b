//! Cache storage adapter

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::connection::StoreConnection;
use super::key::{CacheKeyParams, DefaultKeyGenerator, KeyGenerator};
use super::marshal::{JsonMarshaler, Marshaler};
use crate::domain::DomainError;

/// Default TTL applied to writes without an explicit one
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Collaborators and defaults for a [`CacheStorage`]
///
/// `StorageOptions::default()` gives a one hour TTL, an un-namespaced
/// [`DefaultKeyGenerator`] and the [`JsonMarshaler`].
#[derive(Debug, Clone)]
pub struct StorageOptions<M = JsonMarshaler> {
    pub ttl: Duration,
    pub key_generator: Arc<dyn KeyGenerator>,
    pub marshaler: M,
}

impl Default for StorageOptions<JsonMarshaler> {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            key_generator: Arc::new(DefaultKeyGenerator::new()),
            marshaler: JsonMarshaler,
        }
    }
}

impl<M: Marshaler> StorageOptions<M> {
    /// Sets the default TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the key generator
    pub fn with_key_generator(mut self, key_generator: Arc<dyn KeyGenerator>) -> Self {
        self.key_generator = key_generator;
        self
    }

    /// Replaces the marshaler
    pub fn with_marshaler<N: Marshaler>(self, marshaler: N) -> StorageOptions<N> {
        StorageOptions {
            ttl: self.ttl,
            key_generator: self.key_generator,
            marshaler,
        }
    }
}

/// Redis-backed cache storage
///
/// Every operation namespaces the key through the key generator and hands a
/// single command to the connection strategy chosen at construction.
/// Failures from the store or the marshaler are returned as-is.
pub struct CacheStorage<M = JsonMarshaler> {
    connection: Arc<dyn StoreConnection>,
    key_generator: Arc<dyn KeyGenerator>,
    marshaler: M,
    ttl: Duration,
}

impl<M: Marshaler> fmt::Debug for CacheStorage<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStorage")
            .field("connection", &self.connection.strategy())
            .field("key_generator", &self.key_generator)
            .field("marshaler", &self.marshaler)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl<M: Marshaler> CacheStorage<M> {
    pub fn new(connection: Arc<dyn StoreConnection>, options: StorageOptions<M>) -> Self {
        Self {
            connection,
            key_generator: options.key_generator,
            marshaler: options.marshaler,
            ttl: options.ttl,
        }
    }

    /// Stores a value, expiring after `ttl` or the default TTL
    pub async fn set<V>(&self, key: &str, value: &V, ttl: Option<Duration>) -> Result<(), DomainError>
    where
        V: Serialize + Sync + ?Sized,
    {
        let key = self.prefixed(key);
        let data = self.marshaler.dump(value)?;
        let ttl = ttl.unwrap_or(self.ttl);

        debug!(key = %key, ttl_secs = ttl.as_secs(), "Cache set");
        self.connection.set_ex(&key, &data, ttl).await
    }

    /// Reads a value, returning `None` on a miss
    pub async fn get<V>(&self, key: &str) -> Result<Option<V>, DomainError>
    where
        V: DeserializeOwned,
    {
        let key = self.prefixed(key);
        let data = self.connection.get(&key).await?;

        debug!(key = %key, hit = data.is_some(), "Cache get");
        data.map(|data| self.marshaler.load(&data)).transpose()
    }

    /// Deletes a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let key = self.prefixed(key);

        debug!(key = %key, "Cache delete");
        self.connection.del(&key).await
    }

    /// Checks if a key is currently stored
    pub async fn contains_key(&self, key: &str) -> Result<bool, DomainError> {
        self.connection.exists(&self.prefixed(key)).await
    }

    /// Produces a new cache key from the key generator
    pub fn next_key(&self, obj: Option<&CacheKeyParams>) -> String {
        self.key_generator.key(obj)
    }

    /// The key as it is stored in Redis
    pub fn prefixed(&self, key: &str) -> String {
        self.key_generator.prefix(key)
    }

    pub fn default_ttl(&self) -> Duration {
        self.ttl
    }

    pub fn strategy(&self) -> &'static str {
        self.connection.strategy()
    }
}
