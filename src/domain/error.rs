use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Errors raised by the Redis client, passed through untouched
    #[error(transparent)]
    Store(#[from] redis::RedisError),

    /// Errors raised by the marshaler, passed through untouched
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let error = DomainError::configuration("No Redis connection settings");
        assert_eq!(
            error.to_string(),
            "Configuration error: No Redis connection settings"
        );
    }

    #[test]
    fn test_cache_error() {
        let error = DomainError::cache("Pool closed");
        assert_eq!(error.to_string(), "Cache error: Pool closed");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let redis_error = redis::RedisError::from((redis::ErrorKind::IoError, "connection reset"));
        let expected = redis_error.to_string();

        let error: DomainError = redis_error.into();
        assert!(matches!(error, DomainError::Store(_)));
        assert_eq!(error.to_string(), expected);
    }
}
