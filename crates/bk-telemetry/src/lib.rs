//! # Barkis Telemetry
//!
//! Observability for the ledger node.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber`, plain text
//!   for development and JSON inside containers.
//! - **Metrics**: Prometheus counters and gauges in a process-wide registry,
//!   rendered as text by [`gather_text`]. This crate serves no endpoint;
//!   exposing the text is up to the embedding process.
//!
//! Metrics are observability only. Nothing in the state machine reads them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bk_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Node runs here.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUST_LOG` | unset | Full filter directive, wins over `BK_LOG_LEVEL` |
//! | `BK_LOG_LEVEL` | `info` | Log level filter |
//! | `BK_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `BK_SERVICE_NAME` | `barkis-ledger` | Service name attached to logs |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingHandle};
pub use metrics::{
    gather_text, register_metrics, HistogramTimer, MetricsHandle, BK_ASSET_MINT_OPERATIONS,
    BK_ASSET_REJECTIONS, BK_ASSET_TOKENS_ISSUED, BK_CHAIN_HEIGHT, BK_TXS_DELIVERED,
    BK_TX_DELIVER_DURATION, BK_UPGRADE_HOOKS_FIRED, REGISTRY,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Metrics are registered first, so a failed subscriber install (for
/// instance, a second call in the same process) still leaves them usable.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    let logging = init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
        _logging: logging,
        _metrics: metrics,
    })
}

/// Keeps telemetry alive for the lifetime of the node.
pub struct TelemetryGuard {
    service_name: String,
    _logging: LoggingHandle,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::HistogramTimer::new(&$histogram)
    };
}
