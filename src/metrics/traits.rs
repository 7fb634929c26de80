//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so the
//! summary's algorithms never depend on how numbers are consumed.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐   ┌──────────────────────────────┐
//!   │ TopNMetricsRecorder (&mut)   │   │ TopNMetricsReadRecorder (&)  │
//!   │ offer/evict/scan/bucket/     │   │ peek/top_k/point lookups     │
//!   │ merge/retain/import          │   │                              │
//!   └──────────────┬───────────────┘   └──────────────┬───────────────┘
//!                  └──────────────┬───────────────────┘
//!                                 ▼
//!                         ┌──────────────┐
//!                         │ TopNMetrics  │
//!                         └──────┬───────┘
//!                                │ metrics_snapshot()
//!   Consumption:                 ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written by mutating operations.
pub trait TopNMetricsRecorder {
    fn record_offer_call(&mut self);
    fn record_offer_hit(&mut self);
    fn record_offer_new(&mut self);
    fn record_eviction(&mut self);
    fn record_scan_step(&mut self);
    fn record_bucket_created(&mut self);
    fn record_bucket_removed(&mut self);
    /// Whole chain dropped at once by `clear` or an import.
    fn record_buckets_dropped(&mut self, buckets: u64);
    fn record_merge_call(&mut self);
    fn record_merged_item(&mut self);
    fn record_merge_eviction(&mut self);
    fn record_retain_call(&mut self);
    fn record_retain_dropped(&mut self, items: u64);
    fn record_import_call(&mut self);
    fn record_clear(&mut self);
}

/// Counters bumped from `&self` methods (interior mutability).
pub trait TopNMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_top_k_call(&self);
    fn record_lookup_call(&self);
    fn record_lookup_found(&self);
}

/// Produce a point-in-time snapshot for benches and tests.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
