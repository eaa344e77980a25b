//! Cache key generation and namespacing

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use uuid::Uuid;

/// Produces cache keys and their namespaced wire form
pub trait KeyGenerator: Send + Sync + Debug {
    /// Produces a key for the given input, or a fresh key when there is none
    fn key(&self, obj: Option<&CacheKeyParams>) -> String;

    /// Maps a caller-facing key to the key stored in Redis
    fn prefix(&self, key: &str) -> String;
}

/// Parameters for cache key generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKeyParams {
    /// Primary identifier (e.g., user ID, resource name)
    pub primary: String,
    /// Secondary components (sorted for consistency)
    pub components: BTreeMap<String, String>,
}

impl CacheKeyParams {
    /// Creates new cache key parameters with a primary identifier
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            components: BTreeMap::new(),
        }
    }

    /// Adds a component to the key parameters
    pub fn with_component(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }
}

/// Default key generator
///
/// Keys without input are random UUIDs. Keys built from parameters are
/// `primary:k=v:...`, optionally collapsed to a 16 hex digit hash.
#[derive(Debug, Clone, Default)]
pub struct DefaultKeyGenerator {
    namespace: Option<String>,
    use_short_hash: bool,
}

impl DefaultKeyGenerator {
    /// Creates a new default key generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the namespace prepended to every stored key
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Creates a generator that produces short hash keys
    ///
    /// The hash comes from std's `DefaultHasher`, whose output is not
    /// guaranteed across Rust releases. Short keys written by one toolchain
    /// may not be found after upgrading it.
    pub fn with_short_hash(mut self) -> Self {
        self.use_short_hash = true;
        self
    }

    fn hash_string(input: &str) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        input.hash(&mut hasher);
        hasher.finish()
    }

    fn compose(&self, params: &CacheKeyParams) -> String {
        let mut parts = vec![params.primary.clone()];

        for (k, v) in &params.components {
            parts.push(format!("{}={}", k, v));
        }

        let combined = parts.join(":");

        if self.use_short_hash {
            format!("{:016x}", Self::hash_string(&combined))
        } else {
            combined
        }
    }
}

impl KeyGenerator for DefaultKeyGenerator {
    fn key(&self, obj: Option<&CacheKeyParams>) -> String {
        match obj {
            Some(params) => self.compose(params),
            None => Uuid::new_v4().simple().to_string(),
        }
    }

    fn prefix(&self, key: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}:{}", namespace, key),
            None => key.to_string(),
        }
    }
}
