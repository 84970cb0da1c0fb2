//! Server configuration

use std::env;
use std::time::Duration;

use tracing::warn;

use protocol::{DEFAULT_SERVER_ADDR, ROOM_IDLE_TIMEOUT, ROOM_SWEEP_INTERVAL};

/// Server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds
    pub bind_addr: String,
    /// How long a room may sit idle before the sweep removes it
    pub room_ttl: Duration,
    /// How often the idle sweep runs
    pub sweep_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_SERVER_ADDR.to_string(),
            room_ttl: ROOM_IDLE_TIMEOUT,
            sweep_interval: ROOM_SWEEP_INTERVAL,
        }
    }
}

impl ServerConfig {
    /// Read settings from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = env::var("CHESS_SERVER_ADDR") {
            if !addr.is_empty() {
                config.bind_addr = addr;
            }
        }

        if let Ok(value) = env::var("CHESS_ROOM_TTL_SECS") {
            match value.parse::<u64>() {
                Ok(secs) => config.room_ttl = Duration::from_secs(secs),
                Err(_) => warn!("Ignoring invalid CHESS_ROOM_TTL_SECS: {}", value),
            }
        }

        config
    }
}
