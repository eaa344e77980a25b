//! Connection strategy trait

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// The command set the storage adapter needs from Redis
///
/// Implementations decide how a connection is obtained for each call
/// (a shared multiplexed connection, or a checkout from a pool). All keys
/// passed here are already namespaced.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StoreConnection: Send + Sync + Debug {
    /// Short name of the strategy, for logs
    fn strategy(&self) -> &'static str;

    /// Writes a value that expires after `ttl` (SETEX)
    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), DomainError>;

    /// Reads a raw value (GET)
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;

    /// Deletes a key, returning whether anything was removed (DEL)
    async fn del(&self, key: &str) -> Result<bool, DomainError>;

    /// Checks if a key exists (EXISTS)
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;
}

/// Converts a TTL to the whole seconds accepted by SETEX
///
/// SETEX rejects zero, so sub-second TTLs round up to one second.
pub fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}
