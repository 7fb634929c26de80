#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TopNMetricsSnapshot {
    pub offer_calls: u64,
    pub offer_hits: u64,
    pub offer_new: u64,
    pub evictions: u64,
    pub scan_steps: u64, // buckets walked past while repositioning

    pub buckets_created: u64,
    pub buckets_removed: u64,

    pub merge_calls: u64,
    pub merged_items: u64,
    pub merge_evictions: u64, // evictions caused by merge, not in `evictions`
    pub retain_calls: u64,
    pub retain_dropped: u64,
    pub import_calls: u64,
    pub clear_calls: u64,

    pub peek_calls: u64,
    pub top_k_calls: u64,
    pub lookup_calls: u64,
    pub lookup_found: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
    pub bucket_count: usize,
}

impl TopNMetricsSnapshot {
    /// Fraction of offers that hit an already tracked item.
    pub fn hit_ratio(&self) -> f64 {
        if self.offer_calls == 0 {
            0.0
        } else {
            self.offer_hits as f64 / self.offer_calls as f64
        }
    }

    /// Average number of buckets walked per offer.
    pub fn scan_steps_per_offer(&self) -> f64 {
        if self.offer_calls == 0 {
            0.0
        } else {
            self.scan_steps as f64 / self.offer_calls as f64
        }
    }
}
