//! Prometheus metrics for the wallet hub.
//!
//! All metrics follow the naming convention: `wh_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SUBSCRIPTIONS (Subsystem 2)
    // =========================================================================

    /// Addresses with at least one subscribed session
    pub static ref WATCHED_ADDRESSES: IntGauge = IntGauge::new(
        "wh_subscriptions_watched_addresses",
        "Number of addresses with a live wallet listener"
    ).expect("metric creation failed");

    /// Connected client sessions
    pub static ref CONNECTED_SESSIONS: IntGauge = IntGauge::new(
        "wh_sessions_connected",
        "Number of connected client sessions"
    ).expect("metric creation failed");

    /// Listener lifecycle transitions
    pub static ref LISTENER_TRANSITIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("wh_subscriptions_listener_transitions_total", "Address listener attaches and detaches"),
        &["transition"]  // transition: attach/detach
    ).expect("metric creation failed");

    // =========================================================================
    // NOTIFICATIONS
    // =========================================================================

    /// Notifications queued for a session
    pub static ref NOTIFICATIONS_DELIVERED: IntCounterVec = IntCounterVec::new(
        Opts::new("wh_notifications_delivered_total", "Notifications queued for client sessions"),
        &["event"]  // event: transactionReceived/newBlock
    ).expect("metric creation failed");

    /// Notifications dropped because the session was gone or too slow
    pub static ref NOTIFICATIONS_DROPPED: IntCounter = IntCounter::new(
        "wh_notifications_dropped_total",
        "Notifications dropped for disconnected or lagging sessions"
    ).expect("metric creation failed");

    /// New best blocks broadcast to all sessions
    pub static ref BLOCKS_BROADCAST: IntCounter = IntCounter::new(
        "wh_notifications_blocks_broadcast_total",
        "New best block notifications broadcast"
    ).expect("metric creation failed");

    /// Address events waiting for the notification pump
    pub static ref ADDRESS_SINK_DEPTH: IntGauge = IntGauge::new(
        "wh_notifications_sink_depth",
        "Address events queued between listeners and the notification pump"
    ).expect("metric creation failed");

    // =========================================================================
    // EVENT BUS
    // =========================================================================

    /// Addresses named by a live bus subscription
    pub static ref BUS_WATCHED_ADDRESSES: IntGauge = IntGauge::new(
        "wh_bus_watched_addresses",
        "Addresses with at least one live bus subscription"
    ).expect("metric creation failed");

    /// Events skipped by bus subscribers that fell behind
    pub static ref BUS_LAGGED_EVENTS: IntCounter = IntCounter::new(
        "wh_bus_lagged_events_total",
        "Events skipped by lagging bus subscribers"
    ).expect("metric creation failed");

    // =========================================================================
    // COIN SELECTION (Subsystem 1)
    // =========================================================================

    /// Balance and spend queries
    pub static ref BALANCE_QUERIES: IntCounterVec = IntCounterVec::new(
        Opts::new("wh_selection_queries_total", "Balance and spend queries"),
        &["kind", "outcome"]  // kind: received/spend, outcome: ok/error
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; collectors already present are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(WATCHED_ADDRESSES.clone()),
        Box::new(CONNECTED_SESSIONS.clone()),
        Box::new(LISTENER_TRANSITIONS.clone()),
        Box::new(NOTIFICATIONS_DELIVERED.clone()),
        Box::new(NOTIFICATIONS_DROPPED.clone()),
        Box::new(BLOCKS_BROADCAST.clone()),
        Box::new(ADDRESS_SINK_DEPTH.clone()),
        Box::new(BUS_WATCHED_ADDRESSES.clone()),
        Box::new(BUS_LAGGED_EVENTS.clone()),
        Box::new(BALANCE_QUERIES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
