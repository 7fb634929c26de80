//! Two-array external form: `counts` ascending and `items` index-aligned.
//!
//! ```text
//!   counts: [1.0, 1.0, 2.0, 3.0]
//!   items:  [ C ,  E ,  D ,  A ]     (min end first)
//! ```
//!
//! Importing groups consecutive equal counts into one bucket in a single
//! forward pass and resets every error to 0. The input is trusted:
//! descending counts or repeated items produce a summary that
//! [`check_invariants`](TopNCounter::check_invariants) rejects.
//! [`with_external`](TopNCounter::with_external) runs that check for you.

use std::hash::Hash;

use crate::ds::ListEnds;
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::traits::TopNMetricsRecorder;
use crate::topn::TopNCounter;
use crate::topn::counter::{Bucket, Counter};

impl<T> TopNCounter<T>
where
    T: Eq + Hash + Clone,
{
    /// All counts from the minimum end to the maximum end.
    pub fn counts(&self) -> Vec<f64> {
        self.iter_ascending().map(|meta| meta.count).collect()
    }

    /// All items, aligned with [`counts`](Self::counts).
    pub fn items(&self) -> Vec<&T> {
        self.iter_ascending().map(|meta| meta.item).collect()
    }

    /// Owned `(counts, items)` pair for persistence.
    pub fn to_external(&self) -> (Vec<f64>, Vec<T>) {
        self.iter_ascending()
            .map(|meta| (meta.count, meta.item.clone()))
            .unzip()
    }

    /// Replaces the contents with the first `size` entries of `counts` and
    /// `items`. Capacity is kept; the result may exceed it until the next
    /// [`retain`](Self::retain).
    ///
    /// # Panics
    ///
    /// Panics if either slice is shorter than `size`.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(4);
    /// counter.offer("stale");
    ///
    /// counter.from_external(3, &[1.0, 1.0, 4.0], vec!["b", "c", "a"]);
    /// assert!(!counter.contains(&"stale"));
    /// assert_eq!(counter.bucket_count(), 2);
    /// assert_eq!(counter.peek(1), vec![&"a"]);
    /// assert_eq!(counter.error(&"a"), Some(0.0));
    /// ```
    pub fn from_external(&mut self, size: usize, counts: &[f64], items: Vec<T>) {
        assert!(
            size <= counts.len() && size <= items.len(),
            "size {} exceeds counts ({}) or items ({})",
            size,
            counts.len(),
            items.len()
        );

        #[cfg(feature = "metrics")]
        self.metrics.record_import_call();
        #[cfg(feature = "trace")]
        tracing::debug!(size, capacity = self.capacity, "importing top-n summary");

        self.reset_storage();
        self.index.reserve(size);

        for (&count, item) in counts.iter().zip(items).take(size) {
            let extends_last = self
                .buckets
                .back()
                .is_some_and(|last| last.count == count);
            let bid = match self.buckets.back_id() {
                Some(bid) if extends_last => bid,
                _ => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_bucket_created();
                    self.buckets.push_back(Bucket {
                        count,
                        members: ListEnds::new(),
                    })
                },
            };
            let Some(bucket) = self.buckets.get_mut(bid) else {
                continue;
            };
            let cid = self.counters.push_back(
                &mut bucket.members,
                Counter {
                    item: item.clone(),
                    count,
                    error: 0.0,
                    bucket: bid,
                },
            );
            self.index.insert(item, cid);
        }
    }

    /// Builds a summary from its external form, rejecting malformed input.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let counter = TopNCounter::with_external(4, vec![1.0, 1.0, 3.0], vec!["b", "c", "a"])
    ///     .unwrap();
    /// assert_eq!(counter.peek(1), vec![&"a"]);
    ///
    /// let unsorted = TopNCounter::with_external(4, vec![3.0, 1.0], vec!["a", "b"]);
    /// assert!(unsorted.is_err());
    /// ```
    pub fn with_external(
        capacity: usize,
        counts: Vec<f64>,
        items: Vec<T>,
    ) -> Result<Self, ConfigError> {
        if counts.len() != items.len() {
            return Err(ConfigError::new(format!(
                "counts ({}) and items ({}) differ in length",
                counts.len(),
                items.len()
            )));
        }
        let mut counter = Self::try_new(capacity)?;
        counter.from_external(counts.len(), &counts, items);
        counter
            .check_invariants()
            .map_err(|e| ConfigError::new(format!("malformed external form: {}", e)))?;
        Ok(counter)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::hash::Hash;

    use serde::de::Error as _;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::topn::TopNCounter;

    #[derive(Deserialize)]
    #[serde(rename = "TopNCounter")]
    struct ExternalForm<T> {
        capacity: usize,
        counts: Vec<f64>,
        items: Vec<T>,
    }

    impl<T> Serialize for TopNCounter<T>
    where
        T: Eq + Hash + Clone + Serialize,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut state = serializer.serialize_struct("TopNCounter", 3)?;
            state.serialize_field("capacity", &self.capacity())?;
            state.serialize_field("counts", &self.counts())?;
            state.serialize_field("items", &self.items())?;
            state.end()
        }
    }

    impl<'de, T> Deserialize<'de> for TopNCounter<T>
    where
        T: Eq + Hash + Clone + Deserialize<'de>,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let form = ExternalForm::<T>::deserialize(deserializer)?;
            TopNCounter::with_external(form.capacity, form.counts, form.items)
                .map_err(D::Error::custom)
        }
    }
}


#[cfg(test)]
mod property_tests {
    use std::collections::HashMap;

    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: export then import reproduces the (item, count) multiset
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_external_round_trip(
            capacity in 1usize..16,
            ops in prop::collection::vec((0u16..40, 1u8..4), 0..200)
        ) {
            let mut counter = TopNCounter::new(capacity);
            for (item, weight) in ops {
                counter.offer_weighted(item, weight as f64);
            }

            let (counts, items) = counter.to_external();
            let mut restored = TopNCounter::new(capacity);
            restored.from_external(counts.len(), &counts, items);

            prop_assert!(restored.check_invariants().is_ok());
            prop_assert_eq!(restored.bucket_count(), counter.bucket_count());
            let before: HashMap<u16, f64> =
                counter.iter().map(|meta| (*meta.item, meta.count)).collect();
            let after: HashMap<u16, f64> =
                restored.iter().map(|meta| (*meta.item, meta.count)).collect();
            prop_assert_eq!(before, after);
            prop_assert!(restored.iter().all(|meta| meta.error == 0.0));
        }
    }
}
