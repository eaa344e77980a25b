use clap::Parser;
use redis_cache_provider::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::commands::run(Cli::parse()).await
}
