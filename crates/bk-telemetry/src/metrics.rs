//! Prometheus metrics for the ledger node.
//!
//! All metrics live in one process-wide [`REGISTRY`]. Names carry the `bk_`
//! prefix.

use std::sync::Arc;

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // ASSET METRICS
    // =========================================================================

    /// Tokens successfully issued
    pub static ref BK_ASSET_TOKENS_ISSUED: Counter = Counter::new(
        "bk_asset_tokens_issued_total",
        "Total tokens issued"
    ).expect("metric creation failed");

    /// Successful mint operations
    pub static ref BK_ASSET_MINT_OPERATIONS: Counter = Counter::new(
        "bk_asset_mint_operations_total",
        "Total successful mint operations"
    ).expect("metric creation failed");

    /// Rejected asset messages by result code
    pub static ref BK_ASSET_REJECTIONS: CounterVec = CounterVec::new(
        Opts::new("bk_asset_rejections_total", "Rejected asset messages by result code"),
        &["code"]
    ).expect("metric creation failed");

    // =========================================================================
    // UPGRADE METRICS
    // =========================================================================

    /// Upgrade hooks fired by block phase
    pub static ref BK_UPGRADE_HOOKS_FIRED: CounterVec = CounterVec::new(
        Opts::new("bk_upgrade_hooks_fired_total", "Upgrade hooks fired by block phase"),
        &["phase"]  // begin_first/begin_last/end_first/end_last
    ).expect("metric creation failed");

    // =========================================================================
    // CHAIN METRICS
    // =========================================================================

    /// Current block height
    pub static ref BK_CHAIN_HEIGHT: Gauge = Gauge::new(
        "bk_chain_height",
        "Height of the block being executed"
    ).expect("metric creation failed");

    /// Delivered transactions by outcome
    pub static ref BK_TXS_DELIVERED: CounterVec = CounterVec::new(
        Opts::new("bk_txs_delivered_total", "Delivered transactions by outcome"),
        &["outcome"]  // ok/rejected
    ).expect("metric creation failed");

    /// Time spent delivering one transaction
    pub static ref BK_TX_DELIVER_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "bk_tx_deliver_duration_seconds",
            "Time spent delivering one transaction"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Handle to the registry the metrics were registered with.
#[derive(Clone)]
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Register all metrics with the global registry. Calling it again is a
/// no-op for metrics that are already registered.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Asset
        Box::new(BK_ASSET_TOKENS_ISSUED.clone()),
        Box::new(BK_ASSET_MINT_OPERATIONS.clone()),
        Box::new(BK_ASSET_REJECTIONS.clone()),
        // Upgrades
        Box::new(BK_UPGRADE_HOOKS_FIRED.clone()),
        // Chain
        Box::new(BK_CHAIN_HEIGHT.clone()),
        Box::new(BK_TXS_DELIVERED.clone()),
        Box::new(BK_TX_DELIVER_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn gather_text() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
