//! Red-black tree based ordered containers with a threaded in-order node list.
//!
//! Every node of a [`Threadwood`] keeps, on top of the usual parent/children links, a link to
//! the node holding the next smaller key and to the node holding the next bigger key. The tree
//! also remembers its smallest and biggest nodes. Both links are maintained incrementally while
//! inserting and removing, which gives:
//!
//! - O(1) access to the first and last entries
//! - O(1) predecessor / successor steps from any entry
//! - full ascending or descending iteration without walking the tree
//!
//! # Example
//!
//! ```
//! use threadwood::{Direction, Threadwood};
//!
//! let mut tree = Threadwood::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key, key * 10);
//! }
//!
//! assert_eq!(tree.to_string(), "1 -> 3 -> 4 -> 5 -> 7 -> 8 -> 9");
//!
//! tree.delete(&5);
//! assert_eq!(tree.to_string_with(Direction::Descending), "9 -> 8 -> 7 -> 4 -> 3 -> 1");
//! assert_eq!(tree.successor(&4), Some((&7, &70)));
//! ```
//!
//! The containers are mutated in place and hold no internal locking, wrap them in a lock if they
//! have to be shared between threads.

#![no_std]
#![forbid(unsafe_code)]
#![warn(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod insert;
mod iter;
mod listing;
mod node;
mod remove;
mod rotate;
mod set;
mod thread;
mod validate;

use core::{borrow::Borrow, cmp::Ordering, fmt};

pub use iter::{IntoIter, Iter, Keys, Values};
pub use listing::{Direction, Listing};
pub use set::ThreadwoodSet;
pub use validate::InvariantViolation;

use node::{NodeColor, NodeIndex, NodeStorage, ThreadwoodNode};

/// An ordered map, storing key-value pairs in a red-black tree whose nodes are also threaded in
/// ascending key order.
#[derive(Clone)]
pub struct Threadwood<K, V> {
    storage: NodeStorage<K, V>,
    root: Option<NodeIndex>,
    // Head and tail of the order list.
    smallest: Option<NodeIndex>,
    biggest: Option<NodeIndex>,
}

impl<K, V> Threadwood<K, V> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: NodeStorage::new(),
            root: None,
            smallest: None,
            biggest: None,
        }
    }

    /// Creates an empty tree able to hold `capacity` entries without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: NodeStorage::with_capacity(capacity),
            root: None,
            smallest: None,
            biggest: None,
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.storage.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.root = None;
        self.smallest = None;
        self.biggest = None;
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.smallest.map(|idx| self.entry(idx))
    }

    /// Returns the entry with the biggest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.biggest.map(|idx| self.entry(idx))
    }

    #[inline]
    pub(crate) fn node(&self, idx: NodeIndex) -> &ThreadwoodNode<K, V> {
        self.storage.get(idx)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: NodeIndex) -> &mut ThreadwoodNode<K, V> {
        self.storage.get_mut(idx)
    }

    #[inline]
    fn entry(&self, idx: NodeIndex) -> (&K, &V) {
        let node = self.node(idx);
        (&node.key, &node.value)
    }

    #[inline]
    pub(crate) fn is_red(&self, idx: Option<NodeIndex>) -> bool {
        idx.is_some_and(|idx| self.node(idx).is_red())
    }

    #[inline]
    pub(crate) fn paint(&mut self, idx: Option<NodeIndex>, color: NodeColor) {
        if let Some(idx) = idx {
            self.node_mut(idx).color = color;
        }
    }
}

impl<K: Ord, V> Threadwood<K, V> {
    /// Binary search descent from the root.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<NodeIndex>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current_node = self.root;

        while let Some(idx) = current_node {
            let node = self.node(idx);

            match key.cmp(node.key.borrow()) {
                Ordering::Less => {
                    current_node = node.left;
                }
                Ordering::Equal => {
                    return Some(idx);
                }
                Ordering::Greater => {
                    current_node = node.right;
                }
            }
        }

        None
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|idx| &self.node(idx).value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.find(key)?;
        Some(&mut self.node_mut(idx).value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|idx| self.entry(idx))
    }

    /// Returns the entry ordered right before `key`, if `key` is present.
    pub fn predecessor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let prev = self.node(self.find(key)?).prev?;
        Some(self.entry(prev))
    }

    /// Returns the entry ordered right after `key`, if `key` is present.
    pub fn successor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let next = self.node(self.find(key)?).next?;
        Some(self.entry(next))
    }
}

impl<K, V> Default for Threadwood<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Threadwood<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Threadwood<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Threadwood<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for Threadwood<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Threadwood<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
