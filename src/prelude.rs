pub use crate::builder::TopNBuilder;
pub use crate::ds::{IndexedList, LinkedSlab, ListEnds, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::TopNMetricsSnapshot;
pub use crate::topn::{CounterMeta, EXTRA_SPACE_RATE, OfferOutcome, TopNCounter};
pub use crate::traits::TopK;
