//! Builder for [`TopNCounter`].
//!
//! Sizes a summary either by raw capacity or by the number of results the
//! caller wants back, and validates the numbers before anything is
//! allocated.
//!
//! ## Example
//!
//! ```rust
//! use topnkit::builder::TopNBuilder;
//!
//! // 10 results, 50 counters per result.
//! let counter = TopNBuilder::for_top_n(10).build::<String>();
//! assert_eq!(counter.capacity(), 500);
//!
//! let tight = TopNBuilder::for_top_n(10)
//!     .extra_space_rate(4)
//!     .bucket_hint(16)
//!     .try_build::<u64>()
//!     .unwrap();
//! assert_eq!(tight.capacity(), 40);
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::topn::{DEFAULT_BUCKET_PREALLOC, EXTRA_SPACE_RATE, TopNCounter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sizing {
    Capacity(usize),
    TopN(usize),
}

/// Builder for creating [`TopNCounter`] instances.
#[derive(Debug, Clone)]
pub struct TopNBuilder {
    sizing: Sizing,
    extra_space_rate: usize,
    bucket_hint: Option<usize>,
}

impl TopNBuilder {
    /// Summary holding exactly `capacity` counters.
    pub fn new(capacity: usize) -> Self {
        Self {
            sizing: Sizing::Capacity(capacity),
            extra_space_rate: EXTRA_SPACE_RATE,
            bucket_hint: None,
        }
    }

    /// Summary meant to answer top-`n` queries, holding
    /// `n * extra_space_rate` counters.
    pub fn for_top_n(n: usize) -> Self {
        Self {
            sizing: Sizing::TopN(n),
            extra_space_rate: EXTRA_SPACE_RATE,
            bucket_hint: None,
        }
    }

    /// Counters per requested result; only used with [`for_top_n`](Self::for_top_n).
    pub fn extra_space_rate(mut self, rate: usize) -> Self {
        self.extra_space_rate = rate;
        self
    }

    /// Expected number of distinct counts, to pre-size the bucket chain.
    pub fn bucket_hint(mut self, buckets: usize) -> Self {
        self.bucket_hint = Some(buckets);
        self
    }

    /// Capacity the built summary will have.
    pub fn capacity(&self) -> Result<usize, ConfigError> {
        match self.sizing {
            Sizing::Capacity(0) => Err(ConfigError::new("capacity must be > 0")),
            Sizing::Capacity(capacity) => Ok(capacity),
            Sizing::TopN(0) => Err(ConfigError::new("top_n must be > 0")),
            Sizing::TopN(n) => {
                if self.extra_space_rate == 0 {
                    return Err(ConfigError::new("extra_space_rate must be > 0"));
                }
                n.checked_mul(self.extra_space_rate).ok_or_else(|| {
                    ConfigError::new(format!(
                        "top_n {} * extra_space_rate {} overflows usize",
                        n, self.extra_space_rate
                    ))
                })
            },
        }
    }

    pub fn try_build<T>(self) -> Result<TopNCounter<T>, ConfigError>
    where
        T: Eq + Hash + Clone,
    {
        let capacity = self.capacity()?;
        let hint = self
            .bucket_hint
            .unwrap_or_else(|| capacity.min(DEFAULT_BUCKET_PREALLOC));
        TopNCounter::try_with_bucket_hint(capacity, hint)
    }

    /// # Panics
    ///
    /// Panics when [`try_build`](Self::try_build) would return an error.
    pub fn build<T>(self) -> TopNCounter<T>
    where
        T: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(counter) => counter,
            Err(e) => panic!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_sizing_is_passed_through() {
        let counter = TopNBuilder::new(7).build::<u32>();
        assert_eq!(counter.capacity(), 7);
        assert!(counter.is_empty());
    }

    #[test]
    fn top_n_sizing_uses_rate() {
        assert_eq!(TopNBuilder::for_top_n(3).capacity(), Ok(150));
        assert_eq!(
            TopNBuilder::for_top_n(3).extra_space_rate(2).capacity(),
            Ok(6)
        );
        // Rate is ignored for explicit capacities.
        assert_eq!(TopNBuilder::new(5).extra_space_rate(9).capacity(), Ok(5));
    }

    #[test]
    fn invalid_parameters_are_reported() {
        let zero = TopNBuilder::new(0).try_build::<u8>().unwrap_err();
        assert!(zero.message().contains("capacity"));

        let no_rate = TopNBuilder::for_top_n(4)
            .extra_space_rate(0)
            .try_build::<u8>()
            .unwrap_err();
        assert!(no_rate.message().contains("extra_space_rate"));

        let overflow = TopNBuilder::for_top_n(usize::MAX)
            .try_build::<u8>()
            .unwrap_err();
        assert!(overflow.message().contains("overflows"));
    }

    #[test]
    #[should_panic(expected = "top_n must be > 0")]
    fn build_panics_on_invalid_config() {
        let _ = TopNBuilder::for_top_n(0).build::<u8>();
    }

    #[test]
    fn built_counter_behaves_like_new() {
        let mut built = TopNBuilder::new(2).bucket_hint(1).build();
        let mut plain = TopNCounter::new(2);
        for item in ["a", "b", "a", "c"] {
            assert_eq!(built.offer(item), plain.offer(item));
        }
        assert_eq!(built.to_external(), plain.to_external());
    }
}
