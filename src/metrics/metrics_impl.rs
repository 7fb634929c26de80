use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{MetricsReset, TopNMetricsReadRecorder, TopNMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct TopNMetrics {
    pub offer_calls: u64,
    pub offer_hits: u64,
    pub offer_new: u64,
    pub evictions: u64,
    pub scan_steps: u64,
    pub buckets_created: u64,
    pub buckets_removed: u64,
    pub merge_calls: u64,
    pub merged_items: u64,
    pub merge_evictions: u64,
    pub retain_calls: u64,
    pub retain_dropped: u64,
    pub import_calls: u64,
    pub clear_calls: u64,
    pub peek_calls: MetricsCell,
    pub top_k_calls: MetricsCell,
    pub lookup_calls: MetricsCell,
    pub lookup_found: MetricsCell,
}

impl TopNMetricsRecorder for TopNMetrics {
    fn record_offer_call(&mut self) {
        self.offer_calls += 1;
    }

    fn record_offer_hit(&mut self) {
        self.offer_hits += 1;
    }

    fn record_offer_new(&mut self) {
        self.offer_new += 1;
    }

    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn record_scan_step(&mut self) {
        self.scan_steps += 1;
    }

    fn record_bucket_created(&mut self) {
        self.buckets_created += 1;
    }

    fn record_bucket_removed(&mut self) {
        self.buckets_removed += 1;
    }

    fn record_buckets_dropped(&mut self, buckets: u64) {
        self.buckets_removed += buckets;
    }

    fn record_merge_call(&mut self) {
        self.merge_calls += 1;
    }

    fn record_merged_item(&mut self) {
        self.merged_items += 1;
    }

    fn record_merge_eviction(&mut self) {
        self.merge_evictions += 1;
    }

    fn record_retain_call(&mut self) {
        self.retain_calls += 1;
    }

    fn record_retain_dropped(&mut self, items: u64) {
        self.retain_dropped += items;
    }

    fn record_import_call(&mut self) {
        self.import_calls += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl TopNMetricsReadRecorder for TopNMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_top_k_call(&self) {
        self.top_k_calls.incr();
    }

    fn record_lookup_call(&self) {
        self.lookup_calls.incr();
    }

    fn record_lookup_found(&self) {
        self.lookup_found.incr();
    }
}

impl MetricsReset for TopNMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}
