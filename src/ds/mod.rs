pub mod linked_slab;
pub mod slot_arena;

pub use linked_slab::{EntryIter, IndexedList, Iter, LinkedSlab, ListEnds};
pub use slot_arena::{SlotArena, SlotId};
