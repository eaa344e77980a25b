//! Pooled Redis connections

use std::fmt;
use std::ops::DerefMut;
use std::time::Duration;

use async_trait::async_trait;
use deadpool::managed::{Manager, Object, Pool, PoolError, Status};
use redis::aio::ConnectionLike;
use redis::AsyncCommands;
use tracing::info;

use crate::domain::cache::{ttl_seconds, StoreConnection};
use crate::domain::DomainError;

use super::settings::ConnectionSettings;

/// Pooled connection over deadpool-redis
pub type RedisPooledConnection =
    PooledConnection<deadpool_redis::Manager, deadpool_redis::Connection>;

/// Checks a connection out of a pool for every command
///
/// The checkout guard hands the connection back when it is dropped, which
/// happens at the end of each call whether the command succeeded or not.
pub struct PooledConnection<M, W = Object<M>>
where
    M: Manager,
    W: From<Object<M>>,
{
    pool: Pool<M, W>,
}

impl<M, W> fmt::Debug for PooledConnection<M, W>
where
    M: Manager,
    W: From<Object<M>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledConnection")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl RedisPooledConnection {
    /// Builds a pool for the configured server
    ///
    /// Connections are opened lazily on first checkout. A `max_size` of zero
    /// is rejected since no checkout could ever succeed.
    pub fn connect(settings: &ConnectionSettings, max_size: usize) -> Result<Self, DomainError> {
        if max_size == 0 {
            return Err(DomainError::configuration("Redis pool size must be at least 1"));
        }

        let info = settings.connection_info()?;
        info!(addr = %info.addr, db = info.redis.db, max_size, "Creating Redis connection pool");

        let manager = deadpool_redis::Manager::new(info)?;
        let pool = deadpool_redis::Pool::builder(manager)
            .max_size(max_size)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build Redis pool: {}", e)))?;

        Ok(Self::new(pool))
    }
}

impl<M, W> PooledConnection<M, W>
where
    M: Manager,
    W: From<Object<M>>,
{
    /// Wraps an existing pool
    pub fn new(pool: Pool<M, W>) -> Self {
        Self { pool }
    }

    /// Current size and availability of the pool
    pub fn status(&self) -> Status {
        self.pool.status()
    }
}

impl<M, W> PooledConnection<M, W>
where
    M: Manager,
    M::Error: Into<DomainError>,
    W: From<Object<M>>,
{
    async fn checkout(&self) -> Result<W, DomainError> {
        self.pool.get().await.map_err(|e| match e {
            PoolError::Backend(e) => e.into(),
            PoolError::Timeout(kind) => {
                DomainError::cache(format!("Timed out waiting for a pooled connection: {:?}", kind))
            }
            PoolError::Closed => DomainError::cache("Connection pool is closed"),
            PoolError::NoRuntimeSpecified => {
                DomainError::cache("Connection pool has no runtime for timeouts")
            }
            PoolError::PostCreateHook(_) => {
                DomainError::cache("Connection pool post-create hook failed")
            }
        })
    }
}

#[async_trait]
impl<M, W> StoreConnection for PooledConnection<M, W>
where
    M: Manager + 'static,
    M::Type: ConnectionLike + Send,
    M::Error: Into<DomainError>,
    W: From<Object<M>> + DerefMut<Target = M::Type> + Send + Sync + 'static,
{
    fn strategy(&self) -> &'static str {
        "pooled"
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.checkout().await?;
        let _: () = (*conn).set_ex(key, value, ttl_seconds(ttl)).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let mut conn = self.checkout().await?;
        Ok((*conn).get(key).await?)
    }

    async fn del(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.checkout().await?;
        let deleted: u64 = (*conn).del(key).await?;
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.checkout().await?;
        Ok((*conn).exists(key).await?)
    }
}
