//! Doubly linked sequences backed by a shared `SlotArena`.
//!
//! A [`LinkedSlab`] owns the nodes; a [`ListEnds`] describes one list threaded
//! through them. Any number of lists can share one slab, which is how the
//! summary keeps one member list per count bucket while every counter keeps a
//! single stable [`SlotId`] for its whole life: moving a counter to another
//! bucket is an `unlink` from one list and a `link_back` onto another, with no
//! reallocation.
//!
//! ## Architecture
//!
//! ```text
//!   slab (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ id_0   │ { value: A, prev: None,       next: id_2 }   │  list x
//!   │ id_1   │ { value: B, prev: None,       next: None }   │  list y
//!   │ id_2   │ { value: C, prev: Some(id_0), next: None }   │  list x
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   x: ListEnds { head: id_0, tail: id_2, len: 2 }   [id_0] ◄──► [id_2]
//!   y: ListEnds { head: id_1, tail: id_1, len: 1 }   [id_1]
//! ```
//!
//! [`IndexedList`] bundles a slab with a single `ListEnds` for the common
//! one-list case (the bucket chain).
//!
//! ## Performance
//! - `push_back` / `push_front` / `insert_after`: O(1)
//! - `unlink` / `link_back` / `remove`: O(1)
//! - `next` / `prev`: O(1)
//! - `iter` / `iter_rev`: O(n)
//!
//! Passing a `ListEnds` that does not own the node is a caller bug; the slab
//! cannot detect it. `debug_validate_list()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Head, tail and length of one list threaded through a [`LinkedSlab`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListEnds {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl ListEnds {
    /// An empty list.
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// First node (oldest attachment for lists grown with `push_back`).
    pub fn front(&self) -> Option<SlotId> {
        self.head
    }

    /// Last node.
    pub fn back(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Node storage shared by any number of doubly linked lists.
///
/// # Example
///
/// ```
/// use topnkit::ds::{LinkedSlab, ListEnds};
///
/// let mut slab = LinkedSlab::new();
/// let mut ones = ListEnds::new();
/// let mut twos = ListEnds::new();
///
/// let a = slab.push_back(&mut ones, "a");
/// let b = slab.push_back(&mut ones, "b");
/// slab.push_back(&mut twos, "c");
///
/// // `a` moves to the other list and keeps its handle.
/// slab.unlink(&mut ones, a);
/// slab.link_back(&mut twos, a);
///
/// assert_eq!(slab.iter(ones).copied().collect::<Vec<_>>(), vec!["b"]);
/// assert_eq!(slab.iter(twos).copied().collect::<Vec<_>>(), vec!["c", "a"]);
/// assert_eq!(ones.front(), Some(b));
/// assert_eq!(slab.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct LinkedSlab<T> {
    arena: SlotArena<Node<T>>,
}

impl<T> LinkedSlab<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
        }
    }

    /// Total number of allocated nodes, linked or detached.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Successor of `id` in whichever list holds it.
    pub fn next(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id)?.next
    }

    /// Predecessor of `id` in whichever list holds it.
    pub fn prev(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id)?.prev
    }

    /// Allocates `value` and appends it to `ends`.
    pub fn push_back(&mut self, ends: &mut ListEnds, value: T) -> SlotId {
        let id = self.alloc(value);
        self.link_back(ends, id);
        id
    }

    /// Allocates `value` and prepends it to `ends`.
    pub fn push_front(&mut self, ends: &mut ListEnds, value: T) -> SlotId {
        let id = self.alloc(value);
        self.link_front(ends, id);
        id
    }

    /// Allocates `value` and links it directly after `at`.
    ///
    /// Falls back to appending when `at` is not a live node.
    pub fn insert_after(&mut self, ends: &mut ListEnds, at: SlotId, value: T) -> SlotId {
        let id = self.alloc(value);
        if !self.link_after(ends, at, id) {
            self.link_back(ends, id);
        }
        id
    }

    /// Allocates `value` without linking it into any list.
    pub fn insert_detached(&mut self, value: T) -> SlotId {
        self.alloc(value)
    }

    /// Unlinks and frees `id`, returning its value.
    pub fn remove(&mut self, ends: &mut ListEnds, id: SlotId) -> Option<T> {
        self.unlink(ends, id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Detaches `id` from `ends` but keeps the node allocated so it can be
    /// relinked elsewhere under the same id.
    pub fn unlink(&mut self, ends: &mut ListEnds, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => ends.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => ends.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        ends.len -= 1;
        Some(())
    }

    /// Links a detached node at the back of `ends`; `false` if `id` is not live.
    pub fn link_back(&mut self, ends: &mut ListEnds, id: SlotId) -> bool {
        let old_tail = ends.tail;
        match self.arena.get_mut(id) {
            Some(node) => {
                node.prev = old_tail;
                node.next = None;
            },
            None => return false,
        }
        match old_tail.and_then(|tail| self.arena.get_mut(tail)) {
            Some(tail_node) => tail_node.next = Some(id),
            None => ends.head = Some(id),
        }
        ends.tail = Some(id);
        ends.len += 1;
        true
    }

    fn link_front(&mut self, ends: &mut ListEnds, id: SlotId) -> bool {
        let old_head = ends.head;
        match self.arena.get_mut(id) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            },
            None => return false,
        }
        match old_head.and_then(|head| self.arena.get_mut(head)) {
            Some(head_node) => head_node.prev = Some(id),
            None => ends.tail = Some(id),
        }
        ends.head = Some(id);
        ends.len += 1;
        true
    }

    /// Links a detached node directly after `at`; `false` if either is not live.
    pub fn link_after(&mut self, ends: &mut ListEnds, at: SlotId, id: SlotId) -> bool {
        if at == id || !self.arena.contains(id) {
            return false;
        }
        let after = match self.arena.get(at) {
            Some(node) => node.next,
            None => return false,
        };

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = Some(at);
            node.next = after;
        }
        if let Some(node) = self.arena.get_mut(at) {
            node.next = Some(id);
        }
        match after.and_then(|next| self.arena.get_mut(next)) {
            Some(next_node) => next_node.prev = Some(id),
            None => ends.tail = Some(id),
        }
        ends.len += 1;
        true
    }

    /// Iterates the values of `ends` from front to back.
    pub fn iter(&self, ends: ListEnds) -> Iter<'_, T> {
        Iter {
            slab: self,
            current: ends.head,
            forward: true,
        }
    }

    /// Iterates the values of `ends` from back to front.
    pub fn iter_rev(&self, ends: ListEnds) -> Iter<'_, T> {
        Iter {
            slab: self,
            current: ends.tail,
            forward: false,
        }
    }

    /// Iterates `(SlotId, &T)` pairs of `ends` from front to back.
    pub fn iter_entries(&self, ends: ListEnds) -> EntryIter<'_, T> {
        EntryIter {
            slab: self,
            current: ends.head,
            forward: true,
        }
    }

    /// Frees every node of every list. All outstanding `ListEnds` become stale.
    pub fn clear(&mut self) {
        self.arena.clear();
    }

    /// Releases spare node storage. Live ids stay valid.
    pub fn shrink_to_fit(&mut self) {
        self.arena.shrink_to_fit();
    }

    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.arena.approx_bytes()
    }

    fn alloc(&mut self, value: T) -> SlotId {
        self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        })
    }

    #[cfg(any(test, debug_assertions))]
    /// Walks `ends` in both directions and checks every link.
    pub fn debug_validate_list(&self, ends: ListEnds) {
        if ends.head.is_none() || ends.tail.is_none() {
            assert!(ends.head.is_none());
            assert!(ends.tail.is_none());
            assert_eq!(ends.len, 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = ends.head;
        let mut prev = None;
        while let Some(id) = current {
            assert!(seen.insert(id), "cycle through {:?}", id);
            let node = self.arena.get(id).expect("linked node missing");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(ends.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }
        assert_eq!(count, ends.len);
    }
}

impl<T> Default for LinkedSlab<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the values of one list.
pub struct Iter<'a, T> {
    slab: &'a LinkedSlab<T>,
    current: Option<SlotId>,
    forward: bool,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.slab.arena.get(id)?;
        self.current = if self.forward { node.next } else { node.prev };
        Some(&node.value)
    }
}

/// Iterator over `(SlotId, &T)` pairs of one list.
pub struct EntryIter<'a, T> {
    slab: &'a LinkedSlab<T>,
    current: Option<SlotId>,
    forward: bool,
}

impl<'a, T> Iterator for EntryIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.slab.arena.get(id)?;
        self.current = if self.forward { node.next } else { node.prev };
        Some((id, &node.value))
    }
}

/// A single doubly linked list with stable handles.
///
/// # Example
///
/// ```
/// use topnkit::ds::IndexedList;
///
/// let mut list = IndexedList::new();
/// let low = list.push_back(1.0);
/// let high = list.push_back(3.0);
/// let mid = list.insert_after(low, 2.0);
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
/// assert_eq!(list.next(mid), Some(high));
/// assert_eq!(list.prev(mid), Some(low));
///
/// list.remove(mid);
/// assert_eq!(list.next(low), Some(high));
/// ```
#[derive(Debug, Clone)]
pub struct IndexedList<T> {
    slab: LinkedSlab<T>,
    ends: ListEnds,
}

impl<T> IndexedList<T> {
    pub fn new() -> Self {
        Self {
            slab: LinkedSlab::new(),
            ends: ListEnds::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slab: LinkedSlab::with_capacity(capacity),
            ends: ListEnds::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.slab.contains(id)
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.ends.front()
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.ends.back()
    }

    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.slab.get(id))
    }

    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.slab.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slab.get(id)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slab.get_mut(id)
    }

    pub fn next(&self, id: SlotId) -> Option<SlotId> {
        self.slab.next(id)
    }

    pub fn prev(&self, id: SlotId) -> Option<SlotId> {
        self.slab.prev(id)
    }

    pub fn push_back(&mut self, value: T) -> SlotId {
        self.slab.push_back(&mut self.ends, value)
    }

    pub fn push_front(&mut self, value: T) -> SlotId {
        self.slab.push_front(&mut self.ends, value)
    }

    pub fn insert_after(&mut self, at: SlotId, value: T) -> SlotId {
        self.slab.insert_after(&mut self.ends, at, value)
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.slab.remove(&mut self.ends, id)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.front_id()?;
        self.remove(id)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.slab.iter(self.ends)
    }

    pub fn iter_rev(&self) -> Iter<'_, T> {
        self.slab.iter_rev(self.ends)
    }

    pub fn iter_entries(&self) -> EntryIter<'_, T> {
        self.slab.iter_entries(self.ends)
    }

    pub fn clear(&mut self) {
        self.slab.clear();
        self.ends = ListEnds::new();
    }

    pub fn shrink_to_fit(&mut self) {
        self.slab.shrink_to_fit();
    }

    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<ListEnds>() + self.slab.approx_bytes()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.slab.debug_validate_list(self.ends);
        assert_eq!(self.slab.len(), self.ends.len());
    }
}

impl<T> Default for IndexedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_list_basic_ops() {
        let mut list = IndexedList::new();
        let b = list.push_back("b");
        let a = list.push_front("a");
        let c = list.push_back("c");

        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"c"));
        assert_eq!(list.len(), 3);
        assert_eq!(list.next(a), Some(b));
        assert_eq!(list.prev(c), Some(b));
        assert_eq!(list.prev(a), None);
        assert_eq!(list.next(c), None);

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(list.next(a), Some(c));
        assert_eq!(list.pop_front(), Some("a"));
        assert_eq!(list.pop_front(), Some("c"));
        assert!(list.is_empty());
        assert!(!list.contains(a));
        list.debug_validate_invariants();
    }

    #[test]
    fn indexed_list_insert_after_tail_moves_tail() {
        let mut list = IndexedList::new();
        let a = list.push_back(1);
        let b = list.insert_after(a, 2);
        let c = list.insert_after(b, 3);
        assert_eq!(list.back_id(), Some(c));
        let between = list.insert_after(a, 10);
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec![1, 10, 2, 3]);
        assert_eq!(list.prev(b), Some(between));
        list.debug_validate_invariants();
    }

    #[test]
    fn indexed_list_reverse_iteration() {
        let mut list = IndexedList::new();
        for v in 0..5 {
            list.push_back(v);
        }
        let values: Vec<_> = list.iter_rev().copied().collect();
        assert_eq!(values, vec![4, 3, 2, 1, 0]);

        let ids: Vec<_> = list.iter_entries().map(|(id, _)| id).collect();
        assert_eq!(ids.first().copied(), list.front_id());
        assert_eq!(ids.last().copied(), list.back_id());
    }

    #[test]
    fn indexed_list_clear_resets_state() {
        let mut list = IndexedList::new();
        list.push_back(1);
        list.push_back(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn shared_slab_moves_node_between_lists_without_new_id() {
        let mut slab = LinkedSlab::new();
        let mut low = ListEnds::new();
        let mut high = ListEnds::new();

        let a = slab.push_back(&mut low, "a");
        let b = slab.push_back(&mut low, "b");
        let c = slab.push_back(&mut high, "c");

        slab.unlink(&mut low, a).unwrap();
        assert!(slab.link_back(&mut high, a));

        assert_eq!(slab.iter(low).copied().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(slab.iter(high).copied().collect::<Vec<_>>(), vec!["c", "a"]);
        assert_eq!(slab.get(a), Some(&"a"));
        assert_eq!(low.front(), Some(b));
        assert_eq!(high.back(), Some(a));
        assert_eq!(slab.len(), 3);

        slab.debug_validate_list(low);
        slab.debug_validate_list(high);
        assert_eq!(slab.remove(&mut high, c), Some("c"));
        assert_eq!(high.front(), Some(a));
        slab.debug_validate_list(high);
    }

    #[test]
    fn link_after_rejects_dead_or_self_nodes() {
        let mut slab = LinkedSlab::new();
        let mut ends = ListEnds::new();
        let a = slab.push_back(&mut ends, 1);
        let b = slab.push_back(&mut ends, 2);
        slab.unlink(&mut ends, b).unwrap();

        assert!(!slab.link_after(&mut ends, a, a));
        slab.remove(&mut ends, a);
        assert!(!slab.link_after(&mut ends, a, b));
        assert!(slab.link_back(&mut ends, b));
        assert_eq!(ends.len(), 1);
        slab.debug_validate_list(ends);
    }
}
