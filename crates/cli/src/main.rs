//! `squad-service` entry-point.
//!
//! Available sub-commands:
//! - `serve` — start the HTTP server.
//!
//! Database credentials come from `DOPAMINE_DB_HOST`, `DOPAMINE_DB_USER`,
//! `DOPAMINE_DB_PASS` and `DOPAMINE_DB_NAME`, optionally via a `.env` file.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::AppState;
use db::{DbConfig, MySqlStore};

const DEFAULT_LOG_FILTER: &str = "cli=info,api=info,engine=info,db=info,store=info,tower_http=debug";

#[derive(Parser)]
#[command(
    name = "squad-service",
    about = "Creates squads for existing users and lists them",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve {
        #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8080")]
        bind: String,
        /// Database pool ceiling.
        #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
        max_connections: u32,
        /// Seconds a request waits for a pooled connection.
        #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
        acquire_timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Absent .env is fine; the variables may already be set.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, max_connections, acquire_timeout_secs } => {
            let config = DbConfig::from_env()
                .context("invalid database configuration")?
                .with_pool_limits(max_connections, Duration::from_secs(acquire_timeout_secs));
            info!(?config, "Loaded database configuration");

            let store = MySqlStore::from_config(&config);
            api::serve(&bind, AppState::new(Arc::new(store)))
                .await
                .with_context(|| format!("server on {bind} failed"))?;
        }
    }

    Ok(())
}
