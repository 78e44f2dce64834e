use core::num::NonZero;

use alloc::vec::Vec;

/// Stable position of a node inside the tree storage.
///
/// Stored off by one so that `Option<NodeIndex>` is the same size as `NodeIndex`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct NodeIndex(NonZero<usize>);

impl NodeIndex {
    #[inline]
    pub(crate) const fn from_slot(slot: usize) -> Self {
        Self(NonZero::<usize>::MIN.saturating_add(slot))
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0.get() - 1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum NodeColor {
    #[default]
    Red,
    Black,
}

#[derive(Clone, Debug)]
pub(crate) struct ThreadwoodNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: NodeColor,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) left: Option<NodeIndex>,
    pub(crate) right: Option<NodeIndex>,
    // Order list neighbours, independent of the tree shape.
    pub(crate) prev: Option<NodeIndex>,
    pub(crate) next: Option<NodeIndex>,
}

impl<K, V> ThreadwoodNode<K, V> {
    /// A red leaf hanging below `parent`, not yet threaded into the order list.
    pub(crate) fn new_leaf(key: K, value: V, parent: Option<NodeIndex>) -> Self {
        Self {
            key,
            value,
            color: NodeColor::default(),
            parent,
            left: None,
            right: None,
            prev: None,
            next: None,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == NodeColor::Red
    }
}

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Occupied(ThreadwoodNode<K, V>),
    Vacant { next_free: Option<NodeIndex> },
}

/// Vector backed node storage.
///
/// Vacant cells are chained through `next_free`, the head of that chain is kept in `free_head`:
/// - a new node takes the head cell, and the new head becomes that cell's `next_free`
/// - a freed cell points to the old head, and becomes the new head
#[derive(Clone, Debug)]
pub(crate) struct NodeStorage<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Option<NodeIndex>,
    len: usize,
}

impl<K, V> NodeStorage<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Makes room for `additional` more nodes, counting vacant cells as available room.
    pub(crate) fn reserve(&mut self, additional: usize) {
        let vacant = self.slots.len() - self.len;
        self.slots.reserve(additional.saturating_sub(vacant));
    }

    pub(crate) fn alloc(&mut self, node: ThreadwoodNode<K, V>) -> NodeIndex {
        self.len += 1;

        if let Some(idx) = self.free_head {
            self.free_head = match &self.slots[idx.slot()] {
                Slot::Vacant { next_free } => *next_free,
                Slot::Occupied(_) => {
                    unreachable!("`NodeStorage::alloc()` - free list points to an occupied cell")
                }
            };
            self.slots[idx.slot()] = Slot::Occupied(node);

            return idx;
        }

        self.slots.push(Slot::Occupied(node));
        NodeIndex::from_slot(self.slots.len() - 1)
    }

    /// Removes the node at `idx` and hands it back, its cell joins the free list.
    pub(crate) fn free(&mut self, idx: NodeIndex) -> ThreadwoodNode<K, V> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };

        match core::mem::replace(&mut self.slots[idx.slot()], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(idx);
                self.len -= 1;
                node
            }
            Slot::Vacant { .. } => panic!("`NodeStorage::free()` - `idx` is not occupied!"),
        }
    }

    #[inline]
    pub(crate) fn get(&self, idx: NodeIndex) -> &ThreadwoodNode<K, V> {
        match &self.slots[idx.slot()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("`NodeStorage::get()` - `idx` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, idx: NodeIndex) -> &mut ThreadwoodNode<K, V> {
        match &mut self.slots[idx.slot()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("`NodeStorage::get_mut()` - `idx` is invalid!"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: u32) -> ThreadwoodNode<u32, ()> {
        ThreadwoodNode::new_leaf(key, (), None)
    }

    #[test]
    fn index_is_niche_optimized() {
        assert_eq!(
            core::mem::size_of::<NodeIndex>(),
            core::mem::size_of::<Option<NodeIndex>>()
        );
    }

    #[test]
    fn index_slot_round_trip() {
        for slot in [0, 1, 17, 4096] {
            assert_eq!(NodeIndex::from_slot(slot).slot(), slot);
        }
    }

    #[test]
    fn new_leaf_is_red_and_isolated() {
        let node = leaf(3);

        assert!(node.is_red());
        assert!(node.left.is_none() && node.right.is_none());
        assert!(node.prev.is_none() && node.next.is_none());
    }

    #[test]
    fn freed_cells_are_reused_last_in_first_out() {
        let mut storage = NodeStorage::new();

        let a = storage.alloc(leaf(1));
        let b = storage.alloc(leaf(2));
        let c = storage.alloc(leaf(3));
        assert_eq!(storage.len(), 3);

        assert_eq!(storage.free(a).key, 1);
        assert_eq!(storage.free(c).key, 3);
        assert_eq!(storage.len(), 1);

        assert_eq!(storage.alloc(leaf(4)), c);
        assert_eq!(storage.alloc(leaf(5)), a);
        assert_eq!(storage.get(b).key, 2);
        assert_eq!(storage.get(a).key, 5);
        assert_eq!(storage.len(), 3);
    }

    #[test]
    fn reserve_counts_vacant_cells() {
        let mut storage = NodeStorage::with_capacity(4);
        let handles: Vec<_> = (0..4).map(|k| storage.alloc(leaf(k))).collect();
        let capacity = storage.capacity();

        for idx in handles {
            storage.free(idx);
        }

        storage.reserve(4);
        assert_eq!(storage.capacity(), capacity);
    }

    #[test]
    #[should_panic(expected = "`NodeStorage::get()` - `idx` is invalid!")]
    fn freed_index_is_dangling() {
        let mut storage = NodeStorage::new();
        let idx = storage.alloc(leaf(1));

        storage.free(idx);
        let _ = storage.get(idx);
    }

    #[test]
    fn clear_resets_free_list() {
        let mut storage = NodeStorage::new();
        let idx = storage.alloc(leaf(1));
        storage.free(idx);

        storage.clear();

        assert_eq!(storage.len(), 0);
        assert_eq!(storage.alloc(leaf(2)), NodeIndex::from_slot(0));
    }
}
