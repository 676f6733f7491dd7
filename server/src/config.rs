//! Server configuration.
//!
//! Defaults reproduce the fixed constants the service has always used
//! (`:9000`, `localhost:27017`, database `demo_table`, collection `todo`).
//! Each value can be overridden with a `TODO_*` environment variable.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which `TodoStore` implementation to open at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

/// What to do when the store cannot be reached at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectPolicy {
    /// Give up after the first failed attempt.
    FailFast,
    /// Retry `retries` more times, sleeping `backoff` before the first retry
    /// and doubling it after each one.
    Retry { retries: u32, backoff: Duration },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
    pub store: StoreKind,
    pub connect: ConnectPolicy,
    /// Applied to every request. Stands in for the read/write/idle timeouts.
    pub request_timeout: Duration,
    /// How long in-flight requests get to finish after the interrupt.
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9000)),
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            database: "demo_table".to_string(),
            collection: "todo".to_string(),
            store: StoreKind::Mongo,
            connect: ConnectPolicy::FailFast,
            request_timeout: Duration::from_secs(60),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("TODO_LISTEN_ADDR") {
            config.listen_addr = parse("TODO_LISTEN_ADDR", &value)?;
        }
        if let Some(value) = lookup("TODO_MONGODB_URI") {
            config.mongodb_uri = value;
        }
        if let Some(value) = lookup("TODO_DB_NAME") {
            config.database = value;
        }
        if let Some(value) = lookup("TODO_COLLECTION") {
            config.collection = value;
        }
        if let Some(value) = lookup("TODO_STORE") {
            config.store = match value.to_ascii_lowercase().as_str() {
                "mongo" | "mongodb" => StoreKind::Mongo,
                "memory" => StoreKind::Memory,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TODO_STORE",
                        value,
                        reason: "expected `mongo` or `memory`".to_string(),
                    })
                }
            };
        }

        let retries: u32 = match lookup("TODO_CONNECT_RETRIES") {
            Some(value) => parse("TODO_CONNECT_RETRIES", &value)?,
            None => 0,
        };
        let backoff_ms: u64 = match lookup("TODO_CONNECT_BACKOFF_MS") {
            Some(value) => parse("TODO_CONNECT_BACKOFF_MS", &value)?,
            None => 500,
        };
        if retries > 0 {
            config.connect = ConnectPolicy::Retry {
                retries,
                backoff: Duration::from_millis(backoff_ms),
            };
        }

        if let Some(value) = lookup("TODO_REQUEST_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse("TODO_REQUEST_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = lookup("TODO_SHUTDOWN_TIMEOUT_SECS") {
            config.shutdown_timeout =
                Duration::from_secs(parse("TODO_SHUTDOWN_TIMEOUT_SECS", &value)?);
        }

        Ok(config)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
