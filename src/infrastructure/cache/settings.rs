//! Redis connection settings and their resolution

use redis::{ConnectionAddr, ConnectionInfo, IntoConnectionInfo, RedisConnectionInfo};
use serde::Deserialize;

use crate::domain::DomainError;

/// Environment variables consulted for a connection URL, in priority order
pub const URL_ENV_VARS: [&str; 3] = ["REDIS_PROVIDER", "REDIS_URL", "REDIS_SERVER"];

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 6379;

/// Settings used to open a Redis client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConnectionSettings {
    /// Full connection URL (e.g., "redis://127.0.0.1:6379/0")
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db: Option<i64>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConnectionSettings {
    /// Creates settings pointing at a URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Creates settings pointing at a host
    pub fn from_host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Default::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_db(mut self, db: i64) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_credentials(
        mut self,
        username: Option<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username;
        self.password = Some(password.into());
        self
    }

    /// Whether the settings already name a server
    pub fn has_endpoint(&self) -> bool {
        self.url.is_some() || self.host.is_some()
    }

    /// Builds the client connection info; a URL takes precedence over a host
    ///
    /// Without a URL, a missing host means `127.0.0.1` and a missing port 6379.
    pub fn connection_info(&self) -> Result<ConnectionInfo, DomainError> {
        if let Some(url) = &self.url {
            return Ok(url.as_str().into_connection_info()?);
        }

        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST).to_string();

        Ok(ConnectionInfo {
            addr: ConnectionAddr::Tcp(host, self.port.unwrap_or(DEFAULT_PORT)),
            redis: RedisConnectionInfo {
                db: self.db.unwrap_or(0),
                username: self.username.clone(),
                password: self.password.clone(),
                ..Default::default()
            },
        })
    }
}

/// Resolves settings against the process environment
pub fn resolve_settings(explicit: Option<ConnectionSettings>) -> Option<ConnectionSettings> {
    resolve_settings_with(explicit, |name| std::env::var(name).ok())
}

/// Resolves settings using `lookup` to read environment variables
///
/// Explicit settings that name a url or host are returned unchanged.
/// Otherwise the first non-empty variable in [`URL_ENV_VARS`] becomes the
/// url, keeping any other explicit fields. With no match the input is
/// returned as-is.
pub fn resolve_settings_with<F>(
    explicit: Option<ConnectionSettings>,
    lookup: F,
) -> Option<ConnectionSettings>
where
    F: Fn(&str) -> Option<String>,
{
    if explicit.as_ref().is_some_and(ConnectionSettings::has_endpoint) {
        return explicit;
    }

    let url = URL_ENV_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.is_empty()));

    match url {
        Some(url) => {
            let mut settings = explicit.unwrap_or_default();
            settings.url = Some(url);
            Some(settings)
        }
        None => explicit,
    }
}
