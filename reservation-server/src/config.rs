//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::reservations::ReservationPolicy;

/// Address to listen on.
pub const BIND_ADDR_VAR: &str = "RESERVATION_BIND_ADDR";

/// Directory for the JSON document store. Unset means in-memory only.
pub const DATA_DIR_VAR: &str = "RESERVATION_DATA_DIR";

/// Override for the booking window, in days.
pub const CREATION_WINDOW_VAR: &str = "RESERVATION_CREATION_WINDOW_DAYS";

/// Override for the lock window, in days.
pub const LOCK_WINDOW_VAR: &str = "RESERVATION_LOCK_WINDOW_DAYS";

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind_addr: SocketAddr,

    /// Where the document store keeps its files, if anywhere.
    pub data_dir: Option<PathBuf>,

    /// Reservation date windows.
    pub policy: ReservationPolicy,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = value.parse().map_err(|_| ConfigError {
                var: BIND_ADDR_VAR,
                value,
            })?;
        }

        config.data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        if let Some(days) = parse_days(&lookup, CREATION_WINDOW_VAR)? {
            config.policy.creation_window_days = days;
        }
        if let Some(days) = parse_days(&lookup, LOCK_WINDOW_VAR)? {
            config.policy.lock_window_days = days;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: None,
            policy: ReservationPolicy::default(),
        }
    }
}

fn parse_days<F>(lookup: &F, var: &'static str) -> Result<Option<i64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.parse::<i64>() {
        Ok(days) if days >= 0 => Ok(Some(days)),
        _ => Err(ConfigError { var, value }),
    }
}
