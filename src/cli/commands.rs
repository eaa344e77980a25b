//! Cache subcommands

use std::time::Duration;

use serde_json::Value;
use tracing::info;

use super::{Cli, Command, ConnectionArgs};
use crate::config::AppConfig;
use crate::domain::cache::{CacheKeyParams, CacheStorage, KeyGenerator};
use crate::infrastructure::cache::{CacheStorageFactory, ConnectionSettings, ProviderConfig};
use crate::infrastructure::logging;

/// Load configuration, connect, and run one cache command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging)?;

    let provider = apply_overrides(config.cache, &cli.connection);

    let output = match &cli.command {
        // Key generation never touches Redis.
        Command::NextKey {
            primary,
            components,
        } => {
            let params = key_params(primary.as_deref(), components);
            provider.storage_options().key_generator.key(params.as_ref())
        }
        command => {
            let storage = CacheStorageFactory::new().create(&provider).await?;
            info!(strategy = storage.strategy(), "Connected");
            execute(&storage, command).await?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Applies command line overrides on top of the loaded configuration
pub fn apply_overrides(mut config: ProviderConfig, args: &ConnectionArgs) -> ProviderConfig {
    if let Some(url) = &args.url {
        config.redis = Some(ConnectionSettings::from_url(url.clone()));
    }

    if let Some(size) = args.pool_size {
        config = config.pooled(size);
    }

    if let Some(prefix) = &args.prefix {
        config.key_prefix = Some(prefix.clone());
    }

    config
}

/// Runs a command against a storage and renders its result
pub async fn execute(storage: &CacheStorage, command: &Command) -> anyhow::Result<String> {
    let output = match command {
        Command::Get { key } => match storage.get::<Value>(key).await? {
            Some(value) => serde_json::to_string_pretty(&value)?,
            None => "(nil)".to_string(),
        },
        Command::Set { key, value, ttl } => {
            let value = parse_value(value);
            storage
                .set(key, &value, ttl.map(Duration::from_secs))
                .await?;
            "OK".to_string()
        }
        Command::Delete { key } => storage.delete(key).await?.to_string(),
        Command::Exists { key } => storage.contains_key(key).await?.to_string(),
        Command::NextKey {
            primary,
            components,
        } => {
            let params = key_params(primary.as_deref(), components);
            storage.next_key(params.as_ref())
        }
    };

    Ok(output)
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn key_params(primary: Option<&str>, components: &[(String, String)]) -> Option<CacheKeyParams> {
    primary.map(|primary| {
        components
            .iter()
            .fold(CacheKeyParams::new(primary), |params, (k, v)| {
                params.with_component(k.clone(), v.clone())
            })
    })
}
