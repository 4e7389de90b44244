//! Observability: structured logging and dispatch metrics

pub mod logging;
pub mod metrics;

pub use logging::{init_default_logging, init_logging, LogFormat};
pub use metrics::{metrics, DispatchMetrics, MetricsSnapshot};
