//! Space-Saving top-N summary.
//!
//! - [`counter`]: the engine (offer, reposition, eviction, queries).
//! - `merge`: combining summaries and shrinking capacity.
//! - `external`: the two-array external form and serde support.

pub mod counter;
mod external;
mod merge;

pub use counter::{
    CounterMeta, DEFAULT_BUCKET_PREALLOC, DEFAULT_COUNTER_PREALLOC, EXTRA_SPACE_RATE,
    OfferOutcome, TopNCounter,
};
