//! # Ranked Approximate Counter Trait
//!
//! [`TopK`] is the capability a stream feeder needs: push items (optionally
//! weighted) and read back the current ranking. It says nothing about how
//! counts are estimated, so a feeder written against it works with any
//! bounded-memory counter.
//!
//! ```text
//!   ┌──────────────────────────────────────┐
//!   │              TopK<T>                 │
//!   │                                      │
//!   │  capacity(&) → usize                 │
//!   │  len(&) → usize                      │
//!   │  is_empty(&) → bool                  │
//!   │  offer(&mut, T) → bool               │  true if T was not tracked
//!   │  offer_weighted(&mut, T, f64) → bool │
//!   │  peek(&, k) → Vec<&T>                │  highest estimate first
//!   └──────────────────┬───────────────────┘
//!                      │
//!                      ▼
//!              TopNCounter<T>
//! ```
//!
//! ## Example
//!
//! ```
//! use topnkit::TopNCounter;
//! use topnkit::traits::TopK;
//!
//! fn feed<C: TopK<u32>>(counter: &mut C, stream: &[u32]) -> usize {
//!     stream.iter().filter(|&&x| counter.offer(x)).count()
//! }
//!
//! let mut counter = TopNCounter::new(8);
//! let first_seen = feed(&mut counter, &[1, 2, 1, 3, 1]);
//! assert_eq!(first_seen, 3);
//! assert_eq!(TopK::peek(&counter, 1), vec![&1]);
//! ```

/// Ranked approximate counter over a stream of `T`.
pub trait TopK<T> {
    /// Maximum number of items tracked at once.
    fn capacity(&self) -> usize;

    /// Number of items currently tracked.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records one occurrence; returns `true` if `item` was not tracked.
    fn offer(&mut self, item: T) -> bool {
        self.offer_weighted(item, 1.0)
    }

    /// Records `increment` occurrences; returns `true` if `item` was not
    /// tracked.
    fn offer_weighted(&mut self, item: T, increment: f64) -> bool;

    /// Up to `k` items, highest estimated count first.
    fn peek(&self, k: usize) -> Vec<&T>;
}
