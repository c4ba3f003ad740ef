//! # Wallet Telemetry
//!
//! Structured logging and Prometheus metrics for the wallet hub.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wallet_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // Logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WH_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `WH_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `WH_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `WH_METRICS` | `true` | Register Prometheus collectors |
//! | `WH_SERVICE_NAME` | `wallet-hub` | Service name in the startup log |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    gather_metrics, register_metrics, ADDRESS_SINK_DEPTH, BALANCE_QUERIES, BLOCKS_BROADCAST,
    BUS_LAGGED_EVENTS, BUS_WATCHED_ADDRESSES, CONNECTED_SESSIONS, LISTENER_TRANSITIONS,
    NOTIFICATIONS_DELIVERED, NOTIFICATIONS_DROPPED, WATCHED_ADDRESSES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize metrics (if enabled) and the global log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    if config.metrics_enabled {
        register_metrics()?;
    }
    init_logging(config)
}

/// Record an increment, optionally with label values.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
