use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::metrics::snapshot::TopNMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for summary metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<TopNMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &TopNMetricsSnapshot) {
        let counters = [
            ("offer_calls_total", snapshot.offer_calls),
            ("offer_hits_total", snapshot.offer_hits),
            ("offer_new_total", snapshot.offer_new),
            ("evictions_total", snapshot.evictions),
            ("scan_steps_total", snapshot.scan_steps),
            ("buckets_created_total", snapshot.buckets_created),
            ("buckets_removed_total", snapshot.buckets_removed),
            ("merge_calls_total", snapshot.merge_calls),
            ("merged_items_total", snapshot.merged_items),
            ("merge_evictions_total", snapshot.merge_evictions),
            ("retain_calls_total", snapshot.retain_calls),
            ("retain_dropped_total", snapshot.retain_dropped),
            ("import_calls_total", snapshot.import_calls),
            ("clear_calls_total", snapshot.clear_calls),
            ("peek_calls_total", snapshot.peek_calls),
            ("top_k_calls_total", snapshot.top_k_calls),
            ("lookup_calls_total", snapshot.lookup_calls),
            ("lookup_found_total", snapshot.lookup_found),
        ];
        for (suffix, value) in counters {
            self.write_counter(&self.metric_name(suffix), value);
        }
        self.write_gauge(&self.metric_name("len"), snapshot.len as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
        self.write_gauge(
            &self.metric_name("bucket_count"),
            snapshot.bucket_count as u64,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("topn", Vec::new());
        let snapshot = TopNMetricsSnapshot {
            offer_calls: 7,
            evictions: 2,
            len: 3,
            capacity: 4,
            bucket_count: 2,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE topn_offer_calls_total counter\ntopn_offer_calls_total 7\n"));
        assert!(text.contains("topn_evictions_total 2\n"));
        assert!(text.contains("# TYPE topn_capacity gauge\ntopn_capacity 4\n"));
        assert!(text.contains("topn_bucket_count 2\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&TopNMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.starts_with("# TYPE offer_calls_total counter\n"));
    }
}
