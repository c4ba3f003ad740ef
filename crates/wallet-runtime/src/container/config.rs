//! # Runtime Configuration
//!
//! Unified configuration for the hub, with defaults overridable from the
//! environment.

use std::env;

use thiserror::Error;

/// Complete hub configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Client-facing listener settings.
    pub network: NetworkConfig,
    /// Coin selection defaults.
    pub selection: SelectionConfig,
    /// Per-session notification queues.
    pub notifications: NotificationConfig,
    /// Wallet event bus.
    pub bus: BusConfig,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroCapacity(&'static str),

    #[error("Port 0 is not a valid listening port")]
    ZeroPort,
}

/// Network configuration.
///
/// The hub does not open a socket itself. These settings are validated and
/// logged at startup, then read by whichever client transport embeds the
/// runtime and drives [`WalletApi`](crate::handlers::WalletApi).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Bind address for the client transport.
    pub host: String,
    /// Listening port for the client transport.
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8090,
        }
    }
}

/// Coin selection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Confirmations required when a query does not specify any.
    pub min_confirmations: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_confirmations: 1,
        }
    }
}

/// Notification delivery configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Notifications buffered per session before new ones are dropped.
    pub session_queue_capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            session_queue_capacity: 256,
        }
    }
}

/// Event bus configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// Events buffered per bus subscriber before it lags.
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    let parsed: Result<T, _> = value.trim().parse();
    parsed.map_err(|_| ConfigError::InvalidValue { key, value })
}

impl RuntimeConfig {
    /// Defaults overridden by `WH_*` environment variables.
    ///
    /// - `WH_HOST`, `WH_PORT`
    /// - `WH_MIN_CONFIRMATIONS`
    /// - `WH_SESSION_QUEUE`
    /// - `WH_BUS_CAPACITY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("WH_HOST") {
            config.network.host = host;
        }
        if let Some(port) = lookup("WH_PORT") {
            config.network.port = parse("WH_PORT", port)?;
        }
        if let Some(depth) = lookup("WH_MIN_CONFIRMATIONS") {
            config.selection.min_confirmations = parse("WH_MIN_CONFIRMATIONS", depth)?;
        }
        if let Some(queue) = lookup("WH_SESSION_QUEUE") {
            config.notifications.session_queue_capacity = parse("WH_SESSION_QUEUE", queue)?;
        }
        if let Some(capacity) = lookup("WH_BUS_CAPACITY") {
            config.bus.capacity = parse("WH_BUS_CAPACITY", capacity)?;
        }

        Ok(config)
    }

    /// Reject settings the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.notifications.session_queue_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("session queue capacity"));
        }
        if self.bus.capacity == 0 {
            return Err(ConfigError::ZeroCapacity("bus capacity"));
        }
        Ok(())
    }
}
