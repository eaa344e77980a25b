//! CLI module for the Redis cache provider
//!
//! Runs single cache operations against a live server, using the same
//! configuration as an embedding application:
//! - `get`, `set`, `delete`, `exists` on one key
//! - `next-key` to preview generated keys

pub mod commands;

use clap::{Args, Parser, Subcommand};

/// Redis cache provider - inspect and edit cached entries
#[derive(Parser, Debug)]
#[command(name = "cache-provider")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the configured connection
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Redis URL (overrides configuration and environment)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Use a connection pool of this size
    #[arg(long, global = true)]
    pub pool_size: Option<usize>,

    /// Key namespace (overrides configuration)
    #[arg(long, global = true)]
    pub prefix: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the JSON value stored under a key
    Get { key: String },

    /// Store a JSON value under a key
    Set {
        key: String,

        /// JSON value; bare words are stored as strings
        value: String,

        /// Expiration in seconds (defaults to the configured TTL)
        #[arg(long)]
        ttl: Option<u64>,
    },

    /// Delete a key
    Delete { key: String },

    /// Check whether a key exists
    Exists { key: String },

    /// Generate a key, random when no primary identifier is given
    NextKey {
        primary: Option<String>,

        /// Extra key component as name=value (repeatable)
        #[arg(long = "component", value_parser = parse_component)]
        components: Vec<(String, String)>,
    },
}

fn parse_component(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_with_ttl() {
        let cli = Cli::parse_from(["cache-provider", "set", "user:1", r#"{"name":"a"}"#, "--ttl", "30"]);

        match cli.command {
            Command::Set { key, value, ttl } => {
                assert_eq!(key, "user:1");
                assert_eq!(value, r#"{"name":"a"}"#);
                assert_eq!(ttl, Some(30));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_connection_args() {
        let cli = Cli::parse_from([
            "cache-provider",
            "exists",
            "k",
            "--url",
            "redis://localhost:6390",
            "--pool-size",
            "4",
        ]);

        assert_eq!(cli.connection.url.as_deref(), Some("redis://localhost:6390"));
        assert_eq!(cli.connection.pool_size, Some(4));
    }

    #[test]
    fn test_parse_next_key_components() {
        let cli = Cli::parse_from([
            "cache-provider",
            "next-key",
            "report",
            "--component",
            "page=2",
            "--component",
            "lang=en",
        ]);

        match cli.command {
            Command::NextKey {
                primary,
                components,
            } => {
                assert_eq!(primary.as_deref(), Some("report"));
                assert_eq!(
                    components,
                    vec![
                        ("page".to_string(), "2".to_string()),
                        ("lang".to_string(), "en".to_string())
                    ]
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_component_is_rejected() {
        let result = Cli::try_parse_from(["cache-provider", "next-key", "--component", "oops"]);
        assert!(result.is_err());
    }
}
