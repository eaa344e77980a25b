//! Domain layer - Cache storage and its collaborator traits

pub mod cache;
pub mod error;

pub use cache::{
    CacheKeyParams, CacheStorage, DefaultKeyGenerator, JsonMarshaler, KeyGenerator, Marshaler,
    StorageOptions, StoreConnection,
};
pub use error::DomainError;
