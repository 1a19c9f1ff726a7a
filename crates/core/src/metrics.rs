//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Board loads from the configured source
//! - The size of the cached payload
//! - Board views built by the grouping engine

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Board Source Metrics
// =============================================================================

/// Board load attempts by result.
pub static BOARD_LOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kanban_board_loads_total", "Total board load attempts"),
        &["result"], // "success", "error", "stale"
    )
    .unwrap()
});

/// Board load duration in seconds.
pub static BOARD_LOAD_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "kanban_board_load_duration_seconds",
            "Duration of a board load from the source",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["result"],
    )
    .unwrap()
});

// =============================================================================
// Cache Metrics
// =============================================================================

/// Tickets held in the session cache.
pub static TICKETS_CACHED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("kanban_tickets_cached", "Number of tickets in the cache").unwrap()
});

/// Users held in the session cache.
pub static USERS_CACHED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("kanban_users_cached", "Number of users in the cache").unwrap()
});

// =============================================================================
// Engine Metrics
// =============================================================================

/// Board views built, by grouping and sorting option.
pub static BOARD_VIEWS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kanban_board_views_total", "Total board views built"),
        &["grouping", "sorting"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(BOARD_LOADS.clone()),
        Box::new(BOARD_LOAD_DURATION.clone()),
        Box::new(TICKETS_CACHED.clone()),
        Box::new(USERS_CACHED.clone()),
        Box::new(BOARD_VIEWS.clone()),
    ]
}
