//! Space-Saving summary over a Stream-Summary bucket chain.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<T, SlotId> ──────────────┐
//!                                             ▼
//!   counters (LinkedSlab<Counter<T>>):  { item, count, error, bucket }
//!
//!   buckets (IndexedList<Bucket>, ascending count):
//!
//!     min                                                        max
//!   ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!   │ count: 1.0   │◄──►│ count: 2.0   │◄──►│ count: 3.0   │
//!   │ members:     │    │ members:     │    │ members:     │
//!   │  C ◄──► E    │    │  D           │    │  A           │
//!   └──────────────┘    └──────────────┘    └──────────────┘
//!     front = least recently attached = next victim
//! ```
//!
//! Every bucket member list is threaded through the one shared counter slab,
//! so a counter keeps its [`SlotId`] while it moves between buckets and the
//! item index never needs rewriting on promotion.
//!
//! ## Offer
//!
//! - tracked item: increment in place and reposition.
//! - untracked, room left: new counter `{item, 0, 0}`, then increment.
//! - untracked, full: take over the front member of the minimum bucket; the
//!   new item inherits `error = min.count`.
//!
//! Reposition scans from the counter's current bucket toward larger counts
//! and attaches to the bucket whose count equals the new count, creating one
//! after the last smaller bucket when none matches. Cost is O(D) for D
//! distinct counts passed.
//!
//! ## Guarantees
//!
//! For every tracked item `reported - error <= true <= reported`, and any item
//! that is not tracked occurred at most `min_count()` times.
//!
//! ## Thread Safety
//!
//! Not synchronized. Build one summary per stream partition and combine them
//! with [`merge`](TopNCounter::merge) on a single thread.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IndexedList, LinkedSlab, ListEnds, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TopNMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TopNMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, TopNMetricsReadRecorder, TopNMetricsRecorder,
};
use crate::traits::TopK;

/// Counters to allocate per requested top-N entry.
pub const EXTRA_SPACE_RATE: usize = 50;

/// Upper bound on slots reserved up front, however large the capacity.
pub const DEFAULT_COUNTER_PREALLOC: usize = 1024;

/// Buckets reserved up front unless a hint is given.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

#[derive(Debug, Clone)]
pub(super) struct Bucket {
    pub(super) count: f64,
    pub(super) members: ListEnds,
}

#[derive(Debug, Clone)]
pub(super) struct Counter<T> {
    pub(super) item: T,
    pub(super) count: f64,
    pub(super) error: f64,
    pub(super) bucket: SlotId,
}

/// Read-only view of one tracked item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterMeta<'a, T> {
    pub item: &'a T,
    /// Estimated count; never below the true count.
    pub count: f64,
    /// Maximum overestimation included in `count`.
    pub error: f64,
}

impl<T> CounterMeta<'_, T> {
    /// Certified lower bound on the true count.
    pub fn guaranteed_count(&self) -> f64 {
        self.count - self.error
    }
}

/// Result of [`TopNCounter::offer_weighted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferOutcome<T> {
    /// `true` if the item was not tracked before this offer.
    pub is_new: bool,
    /// The item displaced to make room, if any.
    pub evicted: Option<T>,
}

/// Bounded-memory approximate top-K counter (Space-Saving).
///
/// # Example
///
/// ```
/// use topnkit::TopNCounter;
///
/// let mut counter = TopNCounter::new(3);
/// for word in ["a", "b", "c", "a", "a"] {
///     counter.offer(word);
/// }
///
/// let outcome = counter.offer("d");
/// assert!(outcome.is_new);
/// assert_eq!(outcome.evicted, Some("b"));
///
/// assert_eq!(counter.peek(2), vec![&"a", &"d"]);
/// assert_eq!(counter.count(&"d"), Some(2.0));
/// assert_eq!(counter.error(&"d"), Some(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct TopNCounter<T> {
    pub(super) capacity: usize,
    pub(super) buckets: IndexedList<Bucket>,
    pub(super) counters: LinkedSlab<Counter<T>>,
    pub(super) index: FxHashMap<T, SlotId>,
    #[cfg(feature = "metrics")]
    pub(super) metrics: TopNMetrics,
}

impl<T> TopNCounter<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates a summary tracking at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) for
    /// user-supplied sizes.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(counter) => counter,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_bucket_hint(capacity, capacity.min(DEFAULT_BUCKET_PREALLOC))
    }

    /// Sizes the summary for answering top-`n` queries
    /// (`n * EXTRA_SPACE_RATE` counters).
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero or the capacity overflows.
    pub fn for_top_n(n: usize) -> Self {
        match crate::builder::TopNBuilder::for_top_n(n).try_build() {
            Ok(counter) => counter,
            Err(e) => panic!("{}", e),
        }
    }

    pub(crate) fn try_with_bucket_hint(
        capacity: usize,
        bucket_hint: usize,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        let prealloc = capacity.min(DEFAULT_COUNTER_PREALLOC);
        Ok(Self {
            capacity,
            buckets: IndexedList::with_capacity(bucket_hint.min(prealloc)),
            counters: LinkedSlab::with_capacity(prealloc),
            index: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            #[cfg(feature = "metrics")]
            metrics: TopNMetrics::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tracked items.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of distinct count values currently held.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Smallest tracked count, the bound on anything not tracked.
    pub fn min_count(&self) -> Option<f64> {
        self.buckets.front().map(|bucket| bucket.count)
    }

    /// The count an item absent from this summary may have reached:
    /// `min_count()` once the summary is full, otherwise 0.
    pub fn floor(&self) -> f64 {
        if self.len() >= self.capacity {
            self.min_count().unwrap_or(0.0)
        } else {
            0.0
        }
    }

    /// Records one occurrence of `item`.
    pub fn offer(&mut self, item: T) -> OfferOutcome<T> {
        self.offer_weighted(item, 1.0)
    }

    /// Records `increment` occurrences of `item`.
    ///
    /// Zero is allowed and only moves the item to the back of its bucket, so
    /// it becomes the last of its ties to be evicted.
    ///
    /// # Panics
    ///
    /// Panics if `increment` is negative or NaN.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(2);
    /// counter.offer_weighted("a", 4.0);
    /// counter.offer_weighted("b", 1.5);
    ///
    /// let outcome = counter.offer_weighted("c", 1.0);
    /// assert_eq!(outcome.evicted, Some("b"));
    /// assert_eq!(counter.count(&"c"), Some(2.5));
    /// assert_eq!(counter.error(&"c"), Some(1.5));
    /// ```
    pub fn offer_weighted(&mut self, item: T, increment: f64) -> OfferOutcome<T> {
        let (_, outcome) = self.upsert(item, increment);
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_offer_call();
            if outcome.is_new {
                self.metrics.record_offer_new();
            } else {
                self.metrics.record_offer_hit();
            }
            if outcome.evicted.is_some() {
                self.metrics.record_eviction();
            }
        }
        outcome
    }

    /// Same as [`offer_weighted`](Self::offer_weighted).
    pub fn offer_return_all(&mut self, item: T, increment: f64) -> OfferOutcome<T> {
        self.offer_weighted(item, increment)
    }

    /// Offers `item` and returns only the displaced item, if any.
    pub fn offer_return_dropped(&mut self, item: T, increment: f64) -> Option<T> {
        self.offer_weighted(item, increment).evicted
    }

    /// Space-Saving update shared by offers and merges; returns the handle
    /// of the item's counter. Offer statistics are left to the caller.
    pub(super) fn upsert(&mut self, item: T, increment: f64) -> (SlotId, OfferOutcome<T>) {
        assert!(
            increment >= 0.0,
            "increment must be non-negative, got {increment}"
        );

        if let Some(&cid) = self.index.get(&item) {
            self.increment_counter(cid, increment);
            return (
                cid,
                OfferOutcome {
                    is_new: false,
                    evicted: None,
                },
            );
        }

        if self.len() < self.capacity {
            let cid = self.insert_new(item, increment);
            return (
                cid,
                OfferOutcome {
                    is_new: true,
                    evicted: None,
                },
            );
        }

        let victim = self
            .buckets
            .front()
            .and_then(|min| min.members.front().map(|cid| (cid, min.count)));
        let Some((cid, min_count)) = victim else {
            let cid = self.insert_new(item, increment);
            return (
                cid,
                OfferOutcome {
                    is_new: true,
                    evicted: None,
                },
            );
        };

        #[cfg(feature = "trace")]
        tracing::trace!(min_count, "evicting front member of minimum bucket");

        let mut evicted = None;
        if let Some(counter) = self.counters.get_mut(cid) {
            evicted = Some(std::mem::replace(&mut counter.item, item.clone()));
            counter.error = min_count;
        }
        if let Some(old) = &evicted {
            self.index.remove(old);
        }
        self.index.insert(item, cid);
        self.increment_counter(cid, increment);

        (
            cid,
            OfferOutcome {
                is_new: true,
                evicted,
            },
        )
    }

    /// Adds a fresh counter `{item, increment, 0}` to the bucket matching its
    /// count, scanning from the minimum end.
    fn insert_new(&mut self, item: T, increment: f64) -> SlotId {
        let bid = self.bucket_for_new(increment);
        let counter = Counter {
            item: item.clone(),
            count: increment,
            error: 0.0,
            bucket: bid,
        };
        let cid = self.counters.insert_detached(counter);
        if let Some(bucket) = self.buckets.get_mut(bid) {
            self.counters.link_back(&mut bucket.members, cid);
        }
        self.index.insert(item, cid);
        cid
    }

    fn bucket_for_new(&mut self, count: f64) -> SlotId {
        let mut below = None;
        let mut cursor = self.buckets.front_id();
        while let Some(bid) = cursor {
            let Some(bucket) = self.buckets.get(bid) else {
                break;
            };
            if bucket.count == count {
                return bid;
            }
            if bucket.count > count {
                break;
            }
            below = Some(bid);
            cursor = self.buckets.next(bid);
            #[cfg(feature = "metrics")]
            self.metrics.record_scan_step();
        }
        self.create_bucket(below, count)
    }

    fn create_bucket(&mut self, after: Option<SlotId>, count: f64) -> SlotId {
        #[cfg(feature = "metrics")]
        self.metrics.record_bucket_created();
        let bucket = Bucket {
            count,
            members: ListEnds::new(),
        };
        match after {
            Some(at) => self.buckets.insert_after(at, bucket),
            None => self.buckets.push_front(bucket),
        }
    }

    /// Adds `amount` to the counter behind `cid` and moves it to the bucket
    /// for its new count.
    pub(super) fn increment_counter(&mut self, cid: SlotId, amount: f64) {
        let Some((old_bid, new_count)) = self
            .counters
            .get(cid)
            .map(|counter| (counter.bucket, counter.count + amount))
        else {
            return;
        };

        if let Some(bucket) = self.buckets.get_mut(old_bid) {
            self.counters.unlink(&mut bucket.members, cid);
        }

        // Starts at the old bucket so a zero increment lands back in it.
        let mut below = old_bid;
        let mut target = None;
        let mut cursor = Some(old_bid);
        while let Some(bid) = cursor {
            let Some(bucket) = self.buckets.get(bid) else {
                break;
            };
            if bucket.count == new_count {
                target = Some(bid);
                break;
            }
            if bucket.count > new_count {
                break;
            }
            below = bid;
            cursor = self.buckets.next(bid);
            #[cfg(feature = "metrics")]
            self.metrics.record_scan_step();
        }
        let target = match target {
            Some(bid) => bid,
            None => self.create_bucket(Some(below), new_count),
        };

        if let Some(bucket) = self.buckets.get_mut(target) {
            self.counters.link_back(&mut bucket.members, cid);
        }
        if let Some(counter) = self.counters.get_mut(cid) {
            counter.count = new_count;
            counter.bucket = target;
        }

        if target != old_bid {
            self.remove_bucket_if_empty(old_bid);
        }
    }

    fn remove_bucket_if_empty(&mut self, bid: SlotId) {
        if self
            .buckets
            .get(bid)
            .is_some_and(|bucket| bucket.members.is_empty())
        {
            self.buckets.remove(bid);
            #[cfg(feature = "metrics")]
            self.metrics.record_bucket_removed();
        }
    }

    /// Unlinks and frees one counter, dropping its bucket when it empties.
    pub(super) fn detach_counter(&mut self, cid: SlotId) -> Option<Counter<T>> {
        let bid = self.counters.get(cid)?.bucket;
        let bucket = self.buckets.get_mut(bid)?;
        let counter = self.counters.remove(&mut bucket.members, cid)?;
        self.remove_bucket_if_empty(bid);
        self.index.remove(&counter.item);
        Some(counter)
    }

    /// Stops tracking `item`; returns its `(count, error)`.
    pub(super) fn remove_item<Q>(&mut self, item: &Q) -> Option<(f64, f64)>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let cid = *self.index.get(item)?;
        self.detach_counter(cid)
            .map(|counter| (counter.count, counter.error))
    }

    pub(super) fn set_error(&mut self, cid: SlotId, error: f64) {
        if let Some(counter) = self.counters.get_mut(cid) {
            counter.error = error;
        }
    }

    /// Counter handles from the maximum end, oldest attachment first inside
    /// each bucket.
    pub(super) fn ids_descending(&self) -> Vec<SlotId> {
        let mut ids = Vec::with_capacity(self.len());
        for bucket in self.buckets.iter_rev() {
            ids.extend(self.counters.iter_entries(bucket.members).map(|(id, _)| id));
        }
        ids
    }

    /// Whether `item` currently holds a counter.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(1);
    /// counter.offer("old".to_string());
    /// counter.offer("new".to_string());
    /// assert!(counter.contains("new"));
    /// assert!(!counter.contains("old"));
    /// ```
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(item)
    }

    /// Full view of a tracked item.
    pub fn get<Q>(&self, item: &Q) -> Option<CounterMeta<'_, T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_lookup_call();
        let counter = self.counters.get(*self.index.get(item)?)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_lookup_found();
        Some(CounterMeta {
            item: &counter.item,
            count: counter.count,
            error: counter.error,
        })
    }

    /// Estimated count of `item`, an upper bound on its true count.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(2);
    /// counter.offer('a');
    /// counter.offer('a');
    /// counter.offer('b');
    /// counter.offer('c'); // takes over b's counter
    ///
    /// assert_eq!(counter.count(&'a'), Some(2.0));
    /// assert_eq!(counter.count(&'c'), Some(2.0));
    /// assert_eq!(counter.count(&'b'), None);
    /// ```
    pub fn count<Q>(&self, item: &Q) -> Option<f64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(item).map(|meta| meta.count)
    }

    /// How much of `count(item)` may come from items it displaced.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(1);
    /// counter.offer_weighted("x", 3.0);
    /// counter.offer("y");
    ///
    /// assert_eq!(counter.count(&"y"), Some(4.0));
    /// assert_eq!(counter.error(&"y"), Some(3.0));
    /// assert_eq!(counter.guaranteed_count(&"y"), Some(1.0));
    /// ```
    pub fn error<Q>(&self, item: &Q) -> Option<f64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(item).map(|meta| meta.error)
    }

    /// `count - error`: occurrences certainly seen.
    pub fn guaranteed_count<Q>(&self, item: &Q) -> Option<f64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(item).map(|meta| meta.guaranteed_count())
    }

    /// Tracked items from the highest count down; ties in attachment order.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(8);
    /// for item in [3, 1, 3, 2, 3, 1] {
    ///     counter.offer(item);
    /// }
    /// let ranked: Vec<(i32, f64)> = counter.iter().map(|m| (*m.item, m.count)).collect();
    /// assert_eq!(ranked, vec![(3, 3.0), (1, 2.0), (2, 1.0)]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = CounterMeta<'_, T>> + '_ {
        self.buckets
            .iter_rev()
            .flat_map(move |bucket| self.counters.iter(bucket.members))
            .map(Counter::meta)
    }

    /// Tracked items from the lowest count up; ties in attachment order.
    pub fn iter_ascending(&self) -> impl Iterator<Item = CounterMeta<'_, T>> + '_ {
        self.buckets
            .iter()
            .flat_map(move |bucket| self.counters.iter(bucket.members))
            .map(Counter::meta)
    }

    /// Up to `k` items with the highest estimated counts.
    ///
    /// Items that share a count come out in the order they reached it.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(8);
    /// for word in "b a c a b".split(' ') {
    ///     counter.offer(word);
    /// }
    /// assert_eq!(counter.peek(2), vec![&"a", &"b"]);
    /// assert_eq!(counter.peek(10).len(), 3);
    /// ```
    pub fn peek(&self, k: usize) -> Vec<&T> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();
        self.iter().take(k).map(|meta| meta.item).collect()
    }

    /// Like [`peek`](Self::peek) but with counts and error bounds.
    pub fn top_k(&self, k: usize) -> Vec<CounterMeta<'_, T>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_top_k_call();
        self.iter().take(k).collect()
    }

    /// Drops every tracked item; capacity is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(4);
    /// counter.offer(1u32);
    /// counter.clear();
    /// assert!(counter.is_empty());
    /// assert_eq!(counter.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.reset_storage();
    }

    /// Empties the chain, the slab and the index together.
    pub(super) fn reset_storage(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_buckets_dropped(self.buckets.len() as u64);
        self.buckets.clear();
        self.counters.clear();
        self.index.clear();
    }

    /// Releases memory left over from a larger past state, typically after
    /// [`retain`](Self::retain) or [`clear`](Self::clear).
    ///
    /// # Example
    ///
    /// ```
    /// use topnkit::TopNCounter;
    ///
    /// let mut counter = TopNCounter::new(10_000);
    /// for i in (0..10_000u32).rev() {
    ///     counter.offer_weighted(i, f64::from(i));
    /// }
    /// let before = counter.approx_bytes();
    ///
    /// counter.retain(10);
    /// counter.shrink_to_fit();
    /// assert_eq!(counter.len(), 10);
    /// assert!(counter.approx_bytes() < before);
    /// assert!(counter.check_invariants().is_ok());
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.buckets.shrink_to_fit();
        self.counters.shrink_to_fit();
        self.index.shrink_to_fit();
    }

    /// Approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.buckets.approx_bytes()
            + self.counters.approx_bytes()
            + self.index.capacity() * (std::mem::size_of::<(T, SlotId)>() + 1)
    }

    /// Verifies the bucket chain, member lists and item index agree.
    ///
    /// Cheap enough for tests and for validating imported data; normal
    /// operations never leave the summary in a state this rejects.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.capacity == 0 {
            return Err(InvariantError::new("capacity is zero"));
        }

        let mut members_seen = 0usize;
        let mut prev_count: Option<f64> = None;
        for (bid, bucket) in self.buckets.iter_entries() {
            if bucket.count.is_nan() {
                return Err(InvariantError::new(format!(
                    "bucket {} has a NaN count",
                    bid.index()
                )));
            }
            if let Some(prev) = prev_count {
                if prev >= bucket.count {
                    return Err(InvariantError::new(format!(
                        "bucket counts not strictly ascending: {:?} then {:?}",
                        prev, bucket.count
                    )));
                }
            }
            prev_count = Some(bucket.count);

            if bucket.members.is_empty() {
                return Err(InvariantError::new(format!(
                    "bucket with count {:?} is empty",
                    bucket.count
                )));
            }

            let mut in_bucket = 0usize;
            for (cid, counter) in self.counters.iter_entries(bucket.members) {
                in_bucket += 1;
                if in_bucket > self.counters.len() {
                    return Err(InvariantError::new("member list cycles"));
                }
                if counter.bucket != bid {
                    return Err(InvariantError::new(format!(
                        "counter {} points at bucket {}, owned by bucket {}",
                        cid.index(),
                        counter.bucket.index(),
                        bid.index()
                    )));
                }
                if counter.count != bucket.count {
                    return Err(InvariantError::new(format!(
                        "counter {} has count {:?} in bucket {:?}",
                        cid.index(),
                        counter.count,
                        bucket.count
                    )));
                }
                if !(0.0 <= counter.error && counter.error <= counter.count) {
                    return Err(InvariantError::new(format!(
                        "counter {} error {:?} outside [0, {:?}]",
                        cid.index(),
                        counter.error,
                        counter.count
                    )));
                }
                if self.index.get(&counter.item) != Some(&cid) {
                    return Err(InvariantError::new(format!(
                        "counter {} is not indexed under its item",
                        cid.index()
                    )));
                }
            }
            if in_bucket != bucket.members.len() {
                return Err(InvariantError::new(format!(
                    "bucket {:?} records {} members, holds {}",
                    bucket.count,
                    bucket.members.len(),
                    in_bucket
                )));
            }
            members_seen += in_bucket;
        }

        if members_seen != self.index.len() || members_seen != self.counters.len() {
            return Err(InvariantError::new(format!(
                "size mismatch: {} in buckets, {} indexed, {} allocated",
                members_seen,
                self.index.len(),
                self.counters.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.buckets.debug_validate_invariants();
        for bucket in self.buckets.iter() {
            self.counters.debug_validate_list(bucket.members);
        }
        if let Err(e) = self.check_invariants() {
            panic!("{}", e);
        }
    }
}

impl<T> Counter<T> {
    fn meta(&self) -> CounterMeta<'_, T> {
        CounterMeta {
            item: &self.item,
            count: self.count,
            error: self.error,
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> TopNCounter<T>
where
    T: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> TopNMetricsSnapshot {
        TopNMetricsSnapshot {
            offer_calls: self.metrics.offer_calls,
            offer_hits: self.metrics.offer_hits,
            offer_new: self.metrics.offer_new,
            evictions: self.metrics.evictions,
            scan_steps: self.metrics.scan_steps,
            buckets_created: self.metrics.buckets_created,
            buckets_removed: self.metrics.buckets_removed,
            merge_calls: self.metrics.merge_calls,
            merged_items: self.metrics.merged_items,
            merge_evictions: self.metrics.merge_evictions,
            retain_calls: self.metrics.retain_calls,
            retain_dropped: self.metrics.retain_dropped,
            import_calls: self.metrics.import_calls,
            clear_calls: self.metrics.clear_calls,
            peek_calls: self.metrics.peek_calls.get(),
            top_k_calls: self.metrics.top_k_calls.get(),
            lookup_calls: self.metrics.lookup_calls.get(),
            lookup_found: self.metrics.lookup_found.get(),
            len: self.len(),
            capacity: self.capacity,
            bucket_count: self.bucket_count(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<TopNMetricsSnapshot> for TopNCounter<T>
where
    T: Eq + Hash + Clone,
{
    fn snapshot(&self) -> TopNMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsReset for TopNCounter<T> {
    fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

impl<T> TopK<T> for TopNCounter<T>
where
    T: Eq + Hash + Clone,
{
    fn capacity(&self) -> usize {
        TopNCounter::capacity(self)
    }

    fn len(&self) -> usize {
        TopNCounter::len(self)
    }

    fn offer_weighted(&mut self, item: T, increment: f64) -> bool {
        TopNCounter::offer_weighted(self, item, increment).is_new
    }

    fn peek(&self, k: usize) -> Vec<&T> {
        TopNCounter::peek(self, k)
    }
}

/// `[{count:[{item:error},...]},...]` from the highest bucket down.
impl<T> fmt::Display for TopNCounter<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, bucket) in self.buckets.iter_rev().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{{{:?}:[", bucket.count)?;
            for (j, counter) in self.counters.iter(bucket.members).enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{{{}:{:?}}}", counter.item, counter.error)?;
            }
            f.write_str("]}")?;
        }
        f.write_str("]")
    }
}
