use core::cmp::Ordering;

use crate::{NodeIndex, Threadwood};

// Maintenance of the order list, the chain of `prev`/`next` links through every node in
// ascending key order. `smallest` and `biggest` are its head and tail.
impl<K: Ord, V> Threadwood<K, V> {
    /// Threads a freshly created leaf into the order list.
    ///
    /// The in-order neighbours of a new leaf are always among its ancestors: the nearest one
    /// holding a smaller key is its predecessor, the nearest one holding a bigger key is its
    /// successor.
    pub(crate) fn thread_inserted(&mut self, idx: NodeIndex) {
        if !self.thread_after_lesser_ancestor(idx) && !self.thread_before_greater_ancestor(idx) {
            // Lone node.
            self.smallest = Some(idx);
            self.biggest = Some(idx);
        }
    }

    /// Places `idx` right after its nearest smaller ancestor, returns `false` if there is none.
    fn thread_after_lesser_ancestor(&mut self, idx: NodeIndex) -> bool {
        let Some(prev) = self.nearest_ancestor(idx, Ordering::Less) else {
            return false;
        };
        let next = self.node(prev).next;

        let node = self.node_mut(idx);
        node.prev = Some(prev);
        node.next = next;

        self.node_mut(prev).next = Some(idx);
        match next {
            Some(next) => self.node_mut(next).prev = Some(idx),
            None => self.biggest = Some(idx),
        }

        true
    }

    /// Places `idx` right before its nearest bigger ancestor, returns `false` if there is none.
    fn thread_before_greater_ancestor(&mut self, idx: NodeIndex) -> bool {
        let Some(next) = self.nearest_ancestor(idx, Ordering::Greater) else {
            return false;
        };
        let prev = self.node(next).prev;

        let node = self.node_mut(idx);
        node.next = Some(next);
        node.prev = prev;

        self.node_mut(next).prev = Some(idx);
        match prev {
            Some(prev) => self.node_mut(prev).next = Some(idx),
            None => self.smallest = Some(idx),
        }

        true
    }

    /// Walks up from the parent of `idx` to the first ancestor whose key compares as `ordering`
    /// against the key of `idx`.
    fn nearest_ancestor(&self, idx: NodeIndex, ordering: Ordering) -> Option<NodeIndex> {
        let key = &self.node(idx).key;
        let mut current_node = self.node(idx).parent;

        while let Some(ancestor) = current_node {
            let node = self.node(ancestor);
            if node.key.cmp(key) == ordering {
                return Some(ancestor);
            }

            current_node = node.parent;
        }

        None
    }
}

impl<K, V> Threadwood<K, V> {
    /// Takes `idx` out of the order list, linking its neighbours to each other.
    pub(crate) fn unthread(&mut self, idx: NodeIndex) {
        let node = self.node_mut(idx);
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.smallest = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.biggest = prev,
        }
    }

    /// Threads the unlinked node `idx` between `prev` and `next`, which must be adjacent.
    pub(crate) fn thread_between(
        &mut self,
        idx: NodeIndex,
        prev: Option<NodeIndex>,
        next: Option<NodeIndex>,
    ) {
        let node = self.node_mut(idx);
        node.prev = prev;
        node.next = next;

        match prev {
            Some(prev) => self.node_mut(prev).next = Some(idx),
            None => self.smallest = Some(idx),
        }
        match next {
            Some(next) => self.node_mut(next).prev = Some(idx),
            None => self.biggest = Some(idx),
        }
    }
}
