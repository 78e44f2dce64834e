use core::{cmp::Ordering, mem};

use crate::{NodeColor, NodeIndex, Threadwood, ThreadwoodNode};

impl<K: Ord, V> Threadwood<K, V> {
    /// Inserts a key-value pair.
    ///
    /// If `key` was already present its value is overwritten in place and the old value is
    /// returned, the tree shape stays untouched.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, replaced) = self.insert_at(self.root, None, key, value);

        // Rebalancing may leave a red root.
        self.node_mut(root).color = NodeColor::Black;
        self.root = Some(root);

        replaced
    }

    fn insert_at(
        &mut self,
        current_node: Option<NodeIndex>,
        parent: Option<NodeIndex>,
        key: K,
        value: V,
    ) -> (NodeIndex, Option<V>) {
        let Some(t) = current_node else {
            return (self.create_leaf(key, value, parent), None);
        };

        match key.cmp(&self.node(t).key) {
            Ordering::Less => {
                let (left, replaced) = self.insert_at(self.node(t).left, Some(t), key, value);
                if replaced.is_some() {
                    return (t, replaced);
                }

                self.node_mut(t).left = Some(left);
                (self.balance_insert(t), None)
            }
            Ordering::Greater => {
                let (right, replaced) = self.insert_at(self.node(t).right, Some(t), key, value);
                if replaced.is_some() {
                    return (t, replaced);
                }

                self.node_mut(t).right = Some(right);
                (self.balance_insert(t), None)
            }
            Ordering::Equal => (t, Some(mem::replace(&mut self.node_mut(t).value, value))),
        }
    }

    fn create_leaf(&mut self, key: K, value: V, parent: Option<NodeIndex>) -> NodeIndex {
        let idx = self
            .storage
            .alloc(ThreadwoodNode::new_leaf(key, value, parent));
        self.thread_inserted(idx);

        idx
    }

    /// Repairs a red node with a red child right below `t`.
    ///
    /// Insertion only ever adds one red leaf, and violations are fixed one level at a time on
    /// the way back up, so a black `t` with a red child and red grandchild is the only shape
    /// to handle. The repaired subtree gets a red root with two black children.
    fn balance_insert(&mut self, t: NodeIndex) -> NodeIndex {
        if self.node(t).is_red() {
            return t;
        }

        let left = self.node(t).left;
        if let Some(left) = left.filter(|&left| self.node(left).is_red()) {
            if self.is_red(self.node(left).left) {
                let top = self.rotate_right(t);
                self.paint(self.node(top).left, NodeColor::Black);
                return top;
            } else if self.is_red(self.node(left).right) {
                let top = self.rotate_left_right(t);
                self.paint(self.node(top).left, NodeColor::Black);
                return top;
            }
        }

        let right = self.node(t).right;
        if let Some(right) = right.filter(|&right| self.node(right).is_red()) {
            if self.is_red(self.node(right).left) {
                let top = self.rotate_right_left(t);
                self.paint(self.node(top).right, NodeColor::Black);
                return top;
            } else if self.is_red(self.node(right).right) {
                let top = self.rotate_left(t);
                self.paint(self.node(top).right, NodeColor::Black);
                return top;
            }
        }

        t
    }
}
