//! Combining and shrinking summaries.
//!
//! `merge` folds another summary into this one, adding each side's floor to
//! items the other side never tracked:
//!
//! ```text
//!   m1 = self.floor()      m2 = other.floor()
//!
//!   x in both      : offer(x, other.count)   error = e_self + e_other
//!   x only in self : offer(x, m2)            error = e_self + m2
//!   y only in other: offer(y, count + m1)    error = e_other + m1
//! ```
//!
//! Items of `self` are visited from the highest count down, then the rest of
//! `other` likewise, so when the combined set overflows the capacity the
//! smallest estimates are the ones evicted.

use std::hash::Hash;

#[cfg(feature = "metrics")]
use crate::metrics::traits::TopNMetricsRecorder;
use crate::topn::TopNCounter;

impl<T> TopNCounter<T>
where
    T: Eq + Hash + Clone,
{
    /// Folds `other` into `self` and returns `self` for chaining.
    ///
    /// `other` is consumed; keep a [`clone`](Clone::clone) if it is still
    /// needed. After a merge every reported count is still an upper bound on
    /// the combined true count.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut left = TopNCounter::new(2);
    /// left.offer_weighted("x", 5.0);
    /// left.offer_weighted("y", 3.0);
    ///
    /// let mut right = TopNCounter::new(2);
    /// right.offer_weighted("y", 4.0);
    /// right.offer_weighted("z", 2.0);
    ///
    /// left.merge(right);
    /// assert_eq!(left.len(), 2);
    /// assert_eq!(left.count(&"y"), Some(7.0));
    /// ```
    pub fn merge(&mut self, mut other: Self) -> &mut Self {
        let m1 = self.floor();
        let m2 = other.floor();

        #[cfg(feature = "metrics")]
        self.metrics.record_merge_call();
        #[cfg(feature = "trace")]
        tracing::debug!(
            self_len = self.len(),
            other_len = other.len(),
            m1,
            m2,
            "merging top-n summaries"
        );

        let ours: Vec<(T, f64)> = self
            .ids_descending()
            .into_iter()
            .filter_map(|cid| {
                self.counters
                    .get(cid)
                    .map(|counter| (counter.item.clone(), counter.error))
            })
            .collect();

        for (item, error) in ours {
            let (increment, error) = match other.remove_item(&item) {
                Some((other_count, other_error)) => (other_count, error + other_error),
                None => (m2, error + m2),
            };
            let (cid, _outcome) = self.upsert(item, increment);
            self.set_error(cid, error);
            #[cfg(feature = "metrics")]
            self.record_merged(&_outcome);
        }

        for cid in other.ids_descending() {
            let Some(counter) = other.detach_counter(cid) else {
                continue;
            };
            let (cid, _outcome) = self.upsert(counter.item, counter.count + m1);
            self.set_error(cid, counter.error + m1);
            #[cfg(feature = "metrics")]
            self.record_merged(&_outcome);
        }

        self
    }

    #[cfg(feature = "metrics")]
    fn record_merged(&mut self, outcome: &crate::topn::OfferOutcome<T>) {
        self.metrics.record_merged_item();
        if outcome.evicted.is_some() {
            self.metrics.record_merge_eviction();
        }
    }

    /// Lowers the capacity to `new_capacity`, dropping whole minimum buckets
    /// until the summary fits.
    ///
    /// Items sharing the boundary count go together, so the result may hold
    /// fewer than `new_capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(6);
    /// for (item, weight) in [("a", 1.0), ("b", 1.0), ("c", 2.0), ("d", 5.0)] {
    ///     counter.offer_weighted(item, weight);
    /// }
    ///
    /// // a and b tie at the boundary and leave together.
    /// counter.retain(3);
    /// assert_eq!(counter.capacity(), 3);
    /// assert_eq!(counter.peek(3), vec![&"d", &"c"]);
    /// ```
    pub fn retain(&mut self, new_capacity: usize) {
        assert!(new_capacity > 0, "new_capacity must be > 0");

        #[cfg(feature = "metrics")]
        self.metrics.record_retain_call();
        #[cfg(feature = "trace")]
        tracing::debug!(new_capacity, len = self.len(), "retaining top-n summary");

        self.capacity = new_capacity;
        while self.len() > new_capacity {
            let Some(bucket) = self.buckets.pop_front() else {
                break;
            };
            let mut members = bucket.members;
            while let Some(cid) = members.front() {
                let Some(counter) = self.counters.remove(&mut members, cid) else {
                    break;
                };
                self.index.remove(&counter.item);
                #[cfg(feature = "metrics")]
                self.metrics.record_retain_dropped(1);
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_bucket_removed();
        }
    }
}
