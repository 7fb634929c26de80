use std::cell::Cell;

/// A counter that can be bumped through `&self`.
///
/// Used by read paths such as `peek` and `top_k` that only borrow the
/// summary. Holding one makes the owner `!Sync`; the summary is documented as
/// single-threaded, so nothing is lost.
#[repr(transparent)]
#[derive(Debug, Default, Clone)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}
