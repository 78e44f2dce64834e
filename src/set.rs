use core::{borrow::Borrow, fmt};

use alloc::string::String;

use crate::{Direction, InvariantViolation, Keys, Listing, Threadwood};

/// An ordered set, backed by a [`Threadwood`] storing no values.
#[derive(Clone, PartialEq, Eq)]
pub struct ThreadwoodSet<K> {
    tree: Threadwood<K, ()>,
}

impl<K> ThreadwoodSet<K> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: Threadwood::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: Threadwood::with_capacity(capacity),
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.tree.reserve(additional);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.tree.first_key_value().map(|(key, _)| key)
    }

    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.tree.last_key_value().map(|(key, _)| key)
    }

    /// Iterates over the keys in ascending order, `.rev()` for descending.
    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.tree.keys()
    }

    pub fn listing(&self, direction: Direction) -> Listing<'_, K, ()> {
        self.tree.listing(direction)
    }
}

impl<K: Ord> ThreadwoodSet<K> {
    /// Adds `key` to the set, returns `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.insert(key, ()).is_none()
    }

    /// Removes `key` from the set, returns `false` if it was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).is_some()
    }

    /// Removes `key` if present, otherwise does nothing.
    pub fn delete<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.delete(key);
    }

    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove_entry(key).map(|(key, _)| key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_key_value(key).map(|(key, _)| key)
    }

    /// Returns the key ordered right before `key`, if `key` is present.
    pub fn predecessor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.predecessor(key).map(|(key, _)| key)
    }

    /// Returns the key ordered right after `key`, if `key` is present.
    pub fn successor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.successor(key).map(|(key, _)| key)
    }

    pub fn pop_first(&mut self) -> Option<K> {
        self.tree.pop_first().map(|(key, _)| key)
    }

    pub fn pop_last(&mut self) -> Option<K> {
        self.tree.pop_last().map(|(key, _)| key)
    }

    /// Checks every structural invariant of the underlying tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.tree.validate()
    }
}

impl<K> Default for ThreadwoodSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Display> ThreadwoodSet<K> {
    pub fn to_string_with(&self, direction: Direction) -> String {
        self.tree.to_string_with(direction)
    }
}

impl<K: fmt::Display> fmt::Display for ThreadwoodSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}

impl<K: fmt::Debug> fmt::Debug for ThreadwoodSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for ThreadwoodSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord> Extend<K> for ThreadwoodSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a ThreadwoodSet<K> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
