//! Redis cache provider
//!
//! Maps a small cache interface (get, set, delete, exists, next key) onto
//! Redis with:
//! - Direct or pooled connections, chosen once at construction
//! - Key namespacing through a pluggable key generator
//! - Default and per-write TTLs
//! - Pluggable value marshaling (JSON by default)

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::cache::{CacheStorage, StorageOptions};
pub use domain::DomainError;
pub use infrastructure::cache::{CacheStorageFactory, ProviderConfig};
