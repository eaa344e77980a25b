//! Direct (non-pooled) Redis connection

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionLike, ConnectionManager};
use redis::{AsyncCommands, Client};
use tracing::info;

use crate::domain::cache::{ttl_seconds, StoreConnection};
use crate::domain::DomainError;

use super::settings::ConnectionSettings;

/// Issues every command on one shared connection
///
/// `C` is a multiplexed connection handle; each call works on a clone of
/// it, so concurrent callers share the underlying socket.
#[derive(Clone)]
pub struct DirectConnection<C = ConnectionManager> {
    connection: C,
}

impl<C> fmt::Debug for DirectConnection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectConnection")
            .field("connection", &std::any::type_name::<C>())
            .finish()
    }
}

impl DirectConnection<ConnectionManager> {
    /// Opens a managed connection to the configured server
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self, DomainError> {
        let info = settings.connection_info()?;
        info!(addr = %info.addr, db = info.redis.db, "Connecting to Redis");

        let client = Client::open(info)?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self::new(connection))
    }
}

impl<C> DirectConnection<C>
where
    C: ConnectionLike + Clone + Send + Sync,
{
    /// Wraps an existing connection handle
    pub fn new(connection: C) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl<C> StoreConnection for DirectConnection<C>
where
    C: ConnectionLike + Clone + Send + Sync + 'static,
{
    fn strategy(&self) -> &'static str {
        "direct"
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();
        let _: () = conn.set_ex(key, value, ttl_seconds(ttl)).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let mut conn = self.connection.clone();
        Ok(conn.get(key).await?)
    }

    async fn del(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();
        let deleted: u64 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();
        Ok(conn.exists(key).await?)
    }
}
