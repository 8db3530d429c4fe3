//! MySQL connection pool.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use crate::DbConfig;

/// Type alias for the shared MySQL pool used across the whole application.
pub type DbPool = MySqlPool;

/// Build the pool described by `config`.
///
/// No connection is opened here.  Connections are established on first use,
/// so an unreachable server shows up as a failed `begin` on the request that
/// needed it rather than as a startup failure.
pub fn create_pool(config: &DbConfig) -> DbPool {
    info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "Configuring database pool (max_connections={})",
        config.max_connections
    );
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(config.connect_options())
}
