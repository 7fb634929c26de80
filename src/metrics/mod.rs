//! Operational counters for the summary (feature `metrics`).
//!
//! Recording lives in [`metrics_impl::TopNMetrics`], read-out in
//! [`snapshot::TopNMetricsSnapshot`], publishing in
//! [`exporter::PrometheusTextExporter`].

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
