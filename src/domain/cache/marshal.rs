//! Value marshaling between application types and stored bytes

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Converts values to their stored representation and back
pub trait Marshaler: Send + Sync + Debug {
    /// Serializes a value for storage
    fn dump<V>(&self, value: &V) -> Result<Vec<u8>, DomainError>
    where
        V: Serialize + ?Sized;

    /// Deserializes a stored value
    fn load<V>(&self, data: &[u8]) -> Result<V, DomainError>
    where
        V: DeserializeOwned;
}

/// JSON marshaler backed by serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaler;

impl Marshaler for JsonMarshaler {
    fn dump<V>(&self, value: &V) -> Result<Vec<u8>, DomainError>
    where
        V: Serialize + ?Sized,
    {
        Ok(serde_json::to_vec(value)?)
    }

    fn load<V>(&self, data: &[u8]) -> Result<V, DomainError>
    where
        V: DeserializeOwned,
    {
        Ok(serde_json::from_slice(data)?)
    }
}
