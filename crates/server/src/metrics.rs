//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the board server:
//! - HTTP request metrics (latency, counts)
//! - Board availability (collected dynamically)
//! - Core metrics (loads, cache size, views built)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use kanban_core::BoardStatus;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "kanban_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kanban_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "kanban_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Board Metrics (collected dynamically)
// =============================================================================

/// Whether a board payload is available (1) or not (0).
pub static BOARD_AVAILABLE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "kanban_board_available",
        "Whether a board payload is cached and servable",
    )
    .unwrap()
});

/// Whether the most recent load failed (1) or not (0).
pub static BOARD_LAST_LOAD_FAILED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "kanban_board_last_load_failed",
        "Whether the most recent board load failed",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Board
    registry
        .register(Box::new(BOARD_AVAILABLE.clone()))
        .unwrap();
    registry
        .register(Box::new(BOARD_LAST_LOAD_FAILED.clone()))
        .unwrap();

    // Core metrics (loads, cache, views)
    for metric in kanban_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Collect dynamic metrics from current application state.
///
/// This is called before encoding metrics to update gauges with the current
/// board status.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let (available, failed) = match state.session().status().await {
        BoardStatus::NotLoaded => (false, false),
        BoardStatus::Loaded { .. } => (true, false),
        BoardStatus::Failed { has_data, .. } => (has_data, true),
    };
    BOARD_AVAILABLE.set(i64::from(available));
    BOARD_LAST_LOAD_FAILED.set(i64::from(failed));
}
