use core::{borrow::Borrow, cmp::Ordering, mem};

use crate::{NodeColor, NodeIndex, Threadwood, ThreadwoodNode};

/// Outcome of one step of the deletion unwind.
#[derive(Clone, Copy, Debug)]
struct Repaired {
    /// Root of the repaired subtree, to be stored in the parent's child slot.
    subtree: Option<NodeIndex>,
    /// The subtree holds one black node less on every path than before the deletion.
    deficit: bool,
}

impl Repaired {
    const fn balanced(subtree: Option<NodeIndex>) -> Self {
        Self {
            subtree,
            deficit: false,
        }
    }
}

impl<K: Ord, V> Threadwood<K, V> {
    /// Removes `key` from the tree, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the tree, returning the stored key and value if it was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let root = self.root?;

        let (repaired, removed) = self.remove_at(Some(root), key);
        if removed.is_some() {
            self.replace_root(repaired.subtree);
        }

        removed
    }

    /// Removes `key` if present, otherwise does nothing.
    pub fn delete<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key);
    }

    fn remove_at<Q>(&mut self, current_node: Option<NodeIndex>, key: &Q) -> (Repaired, Option<(K, V)>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(t) = current_node else {
            return (Repaired::balanced(None), None);
        };

        match key.cmp(self.node(t).key.borrow()) {
            Ordering::Less => {
                let (left, removed) = self.remove_at(self.node(t).left, key);
                if removed.is_none() {
                    return (Repaired::balanced(Some(t)), None);
                }

                self.node_mut(t).left = left.subtree;
                (self.balance_after_left_delete(t, left.deficit), removed)
            }
            Ordering::Greater => {
                let (right, removed) = self.remove_at(self.node(t).right, key);
                if removed.is_none() {
                    return (Repaired::balanced(Some(t)), None);
                }

                self.node_mut(t).right = right.subtree;
                (self.balance_after_right_delete(t, right.deficit), removed)
            }
            Ordering::Equal => match self.node(t).left {
                None => {
                    self.unthread(t);
                    let (repaired, node) = self.detach_promoting(t, self.node(t).right);

                    (repaired, Some((node.key, node.value)))
                }
                Some(left) => {
                    // `t` stays in the tree and takes over the key of its in-order predecessor,
                    // whose node is the one physically removed.
                    self.unthread(t);
                    let (left, predecessor) = self.remove_max(left);
                    self.thread_between(t, predecessor.prev, predecessor.next);

                    let node = self.node_mut(t);
                    let key = mem::replace(&mut node.key, predecessor.key);
                    let value = mem::replace(&mut node.value, predecessor.value);
                    node.left = left.subtree;

                    (self.balance_after_left_delete(t, left.deficit), Some((key, value)))
                }
            },
        }
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let (root, first) = (self.root?, self.smallest?);

        self.unthread(first);
        let (repaired, node) = self.remove_min(root);
        self.replace_root(repaired.subtree);

        Some((node.key, node.value))
    }

    /// Removes and returns the entry with the biggest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let (root, last) = (self.root?, self.biggest?);

        self.unthread(last);
        let (repaired, node) = self.remove_max(root);
        self.replace_root(repaired.subtree);

        Some((node.key, node.value))
    }
}

impl<K, V> Threadwood<K, V> {
    fn replace_root(&mut self, root: Option<NodeIndex>) {
        self.root = root;

        if let Some(root) = root {
            let node = self.node_mut(root);
            node.color = NodeColor::Black;
            node.parent = None;
        }
    }

    /// Frees `t`, which has at most the one child `child`, and moves that child into its place.
    ///
    /// Removing a black node shortens every path through it by one black node.
    fn detach_promoting(
        &mut self,
        t: NodeIndex,
        child: Option<NodeIndex>,
    ) -> (Repaired, ThreadwoodNode<K, V>) {
        let parent = self.node(t).parent;
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }

        let node = self.storage.free(t);
        let repaired = Repaired {
            subtree: child,
            deficit: !node.is_red(),
        };

        (repaired, node)
    }

    /// Physically removes the node with the biggest key of the subtree rooted at `t`.
    ///
    /// The order list is left alone, the removed node is returned with its list links so the
    /// caller can thread its key elsewhere.
    fn remove_max(&mut self, t: NodeIndex) -> (Repaired, ThreadwoodNode<K, V>) {
        match self.node(t).right {
            None => self.detach_promoting(t, self.node(t).left),
            Some(right) => {
                let (right, max) = self.remove_max(right);
                self.node_mut(t).right = right.subtree;

                (self.balance_after_right_delete(t, right.deficit), max)
            }
        }
    }

    /// Physically removes the node with the smallest key of the subtree rooted at `t`.
    fn remove_min(&mut self, t: NodeIndex) -> (Repaired, ThreadwoodNode<K, V>) {
        match self.node(t).left {
            None => self.detach_promoting(t, self.node(t).right),
            Some(left) => {
                let (left, min) = self.remove_min(left);
                self.node_mut(t).left = left.subtree;

                (self.balance_after_left_delete(t, left.deficit), min)
            }
        }
    }

    /// Restores the black height of `t` after its left subtree lost one black node.
    fn balance_after_left_delete(&mut self, t: NodeIndex, deficit: bool) -> Repaired {
        if !deficit {
            return Repaired::balanced(Some(t));
        }

        let color = self.node(t).color;
        let Some(sibling) = self.node(t).right else {
            unreachable!("left deletion rebalancing: node has no right sibling");
        };
        let sibling_node = self.node(sibling);
        let (sibling_color, near_red, far_red) = (
            sibling_node.color,
            self.is_red(sibling_node.left),
            self.is_red(sibling_node.right),
        );

        match (sibling_color, near_red, far_red) {
            (NodeColor::Black, true, _) => {
                let top = self.rotate_right_left(t);
                self.node_mut(top).color = color;
                self.node_mut(t).color = NodeColor::Black;

                Repaired::balanced(Some(top))
            }
            (NodeColor::Black, false, true) => {
                let top = self.rotate_left(t);
                self.node_mut(top).color = color;
                self.node_mut(t).color = NodeColor::Black;
                self.paint(self.node(top).right, NodeColor::Black);

                Repaired::balanced(Some(top))
            }
            (NodeColor::Black, false, false) => {
                self.node_mut(t).color = NodeColor::Black;
                self.node_mut(sibling).color = NodeColor::Red;

                // A red `t` turned black pays back the missing black node.
                Repaired {
                    subtree: Some(t),
                    deficit: color == NodeColor::Black,
                }
            }
            (NodeColor::Red, _, _) => {
                let top = self.rotate_left(t);
                self.node_mut(top).color = NodeColor::Black;
                self.node_mut(t).color = NodeColor::Red;

                // `t` now has a black sibling, one of the cases above settles it.
                let lower = self.balance_after_left_delete(t, true);
                debug_assert!(!lower.deficit, "left deletion rebalancing did not settle");
                self.node_mut(top).left = lower.subtree;

                Repaired::balanced(Some(top))
            }
        }
    }

    /// Restores the black height of `t` after its right subtree lost one black node.
    fn balance_after_right_delete(&mut self, t: NodeIndex, deficit: bool) -> Repaired {
        if !deficit {
            return Repaired::balanced(Some(t));
        }

        let color = self.node(t).color;
        let Some(sibling) = self.node(t).left else {
            unreachable!("right deletion rebalancing: node has no left sibling");
        };
        let sibling_node = self.node(sibling);
        let (sibling_color, near_red, far_red) = (
            sibling_node.color,
            self.is_red(sibling_node.right),
            self.is_red(sibling_node.left),
        );

        match (sibling_color, near_red, far_red) {
            (NodeColor::Black, true, _) => {
                let top = self.rotate_left_right(t);
                self.node_mut(top).color = color;
                self.node_mut(t).color = NodeColor::Black;

                Repaired::balanced(Some(top))
            }
            (NodeColor::Black, false, true) => {
                let top = self.rotate_right(t);
                self.node_mut(top).color = color;
                self.node_mut(t).color = NodeColor::Black;
                self.paint(self.node(top).left, NodeColor::Black);

                Repaired::balanced(Some(top))
            }
            (NodeColor::Black, false, false) => {
                self.node_mut(t).color = NodeColor::Black;
                self.node_mut(sibling).color = NodeColor::Red;

                Repaired {
                    subtree: Some(t),
                    deficit: color == NodeColor::Black,
                }
            }
            (NodeColor::Red, _, _) => {
                let top = self.rotate_right(t);
                self.node_mut(top).color = NodeColor::Black;
                self.node_mut(t).color = NodeColor::Red;

                let lower = self.balance_after_right_delete(t, true);
                debug_assert!(!lower.deficit, "right deletion rebalancing did not settle");
                self.node_mut(top).right = lower.subtree;

                Repaired::balanced(Some(top))
            }
        }
    }
}
