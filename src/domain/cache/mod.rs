//! Cache domain - Redis-backed cache storage and its collaborators

mod connection;
mod key;
mod marshal;
mod storage;

pub use connection::{ttl_seconds, StoreConnection};
pub use key::{CacheKeyParams, DefaultKeyGenerator, KeyGenerator};
pub use marshal::{JsonMarshaler, Marshaler};
pub use storage::{CacheStorage, StorageOptions, DEFAULT_TTL};

#[cfg(test)]
pub use connection::mock::InMemoryConnection;
#[cfg(test)]
pub use connection::MockStoreConnection;
