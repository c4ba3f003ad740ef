//! Telemetry configuration from environment variables.

use std::env;

/// Logging and metrics settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line.
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error or a full
    /// `EnvFilter` directive such as `wh_02_address_subscriptions=debug`).
    pub log_level: String,

    /// Whether to write logs to stdout at all.
    pub console_output: bool,

    /// JSON log lines instead of the human format.
    pub json_logs: bool,

    /// Whether to register the Prometheus collectors.
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "wallet-hub".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

fn flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WH_SERVICE_NAME`: Service name (default: wallet-hub)
    /// - `WH_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `WH_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `WH_JSON_LOGS`: JSON logs (default: false, true in containers)
    /// - `WH_METRICS`: Register Prometheus metrics (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("WH_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: lookup("WH_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            console_output: lookup("WH_CONSOLE_OUTPUT")
                .map(|v| flag(&v))
                .unwrap_or(defaults.console_output),
            json_logs: lookup("WH_JSON_LOGS")
                .map(|v| flag(&v))
                .unwrap_or(is_container),
            metrics_enabled: lookup("WH_METRICS")
                .map(|v| flag(&v))
                .unwrap_or(defaults.metrics_enabled),
        }
    }
}
