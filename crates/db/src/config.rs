//! Database connection settings, read once at startup.

use std::fmt;
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;

use crate::ConfigError;

pub const HOST_VAR: &str = "DOPAMINE_DB_HOST";
pub const USER_VAR: &str = "DOPAMINE_DB_USER";
pub const PASS_VAR: &str = "DOPAMINE_DB_PASS";
pub const NAME_VAR: &str = "DOPAMINE_DB_NAME";

const DEFAULT_PORT: u16 = 3306;

/// Everything needed to reach the squad database.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Pool ceiling.
    pub max_connections: u32,
    /// How long a request waits for a pooled connection before giving up.
    pub acquire_timeout: Duration,
}

impl DbConfig {
    /// Read the `DOPAMINE_DB_*` variables from the process environment.
    ///
    /// `.env` loading is the caller's business; this only reads what is
    /// already in the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// `DOPAMINE_DB_HOST` may be `host` or `host:port`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |key: &str| lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let raw_host = require(HOST_VAR)?;
        let (host, port) = split_host_port(&raw_host)?;

        Ok(Self {
            host,
            port,
            user: require(USER_VAR)?,
            password: require(PASS_VAR)?,
            database: require(NAME_VAR)?,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        })
    }

    /// Override the pool limits.
    pub fn with_pool_limits(mut self, max_connections: u32, acquire_timeout: Duration) -> Self {
        self.max_connections = max_connections;
        self.acquire_timeout = acquire_timeout;
        self
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .charset("utf8mb4")
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

fn split_host_port(raw: &str) -> Result<(String, u16), ConfigError> {
    match raw.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;
            Ok((host.to_string(), port))
        }
        None => Ok((raw.to_string(), DEFAULT_PORT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full_env(host: &str) -> impl Fn(&str) -> Option<String> {
        lookup(&[
            (HOST_VAR, host),
            (USER_VAR, "squad"),
            (PASS_VAR, "s3cret"),
            (NAME_VAR, "dopamine"),
        ])
    }

    #[test]
    fn host_without_port_uses_mysql_default() {
        let config = DbConfig::from_lookup(full_env("db.internal")).unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3306);
        assert_eq!(config.user, "squad");
        assert_eq!(config.database, "dopamine");
    }

    #[test]
    fn host_with_port_is_split() {
        let config = DbConfig::from_lookup(full_env("127.0.0.1:3307")).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3307);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = DbConfig::from_lookup(full_env("localhost:mysql")).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("localhost:mysql".into()));
    }

    #[test]
    fn missing_variable_is_named() {
        let err = DbConfig::from_lookup(lookup(&[(HOST_VAR, "localhost"), (USER_VAR, "u")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar(PASS_VAR.into()));
    }

    #[test]
    fn debug_output_hides_password() {
        let config = DbConfig::from_lookup(full_env("localhost")).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn pool_limits_can_be_overridden() {
        let config = DbConfig::from_lookup(full_env("localhost"))
            .unwrap()
            .with_pool_limits(2, Duration::from_millis(250));
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_millis(250));
    }
}
