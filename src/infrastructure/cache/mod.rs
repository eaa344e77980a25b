//! Cache infrastructure - Redis connection strategies and storage factory

mod direct;
mod factory;
mod pool;
mod settings;

#[cfg(test)]
pub(crate) mod mock;

pub use direct::DirectConnection;
pub use factory::{CacheStorageFactory, ClientMode, ProviderConfig};
pub use pool::{PooledConnection, RedisPooledConnection};
pub use settings::{resolve_settings, resolve_settings_with, ConnectionSettings, URL_ENV_VARS};
