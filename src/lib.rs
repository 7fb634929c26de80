//! topnkit: bounded-memory approximate top-K counting (Space-Saving).
//!
//! See `DESIGN.md` for internal architecture and invariants.
//!
//! ```
//! use topnkit::prelude::*;
//!
//! let mut counter = TopNCounter::new(64);
//! for word in "the cat saw the dog and the bird".split(' ') {
//!     counter.offer(word);
//! }
//! assert_eq!(counter.peek(1), vec![&"the"]);
//! ```

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod topn;
pub mod traits;

pub use topn::TopNCounter;
