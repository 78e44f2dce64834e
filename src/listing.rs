use core::fmt;

use alloc::string::{String, ToString};

use crate::Threadwood;

/// Printed in place of a listing when the tree holds no entry.
const EMPTY_TREE: &str = "Empty Tree";

/// Order in which a [`Listing`] enumerates the keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Human readable listing of the keys of a tree, joined by arrows: `1 -> 3 -> 4`.
///
/// Meant for diagnostics, the format is not stable.
pub struct Listing<'a, K, V> {
    tree: &'a Threadwood<K, V>,
    direction: Direction,
}

impl<K: fmt::Display, V> fmt::Display for Listing<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tree.is_empty() {
            return f.write_str(EMPTY_TREE);
        }

        match self.direction {
            Direction::Ascending => write_joined(f, self.tree.keys()),
            Direction::Descending => write_joined(f, self.tree.keys().rev()),
        }
    }
}

fn write_joined<'a, K: fmt::Display + 'a>(
    f: &mut fmt::Formatter<'_>,
    mut keys: impl Iterator<Item = &'a K>,
) -> fmt::Result {
    if let Some(first) = keys.next() {
        write!(f, "{first}")?;
    }
    for key in keys {
        write!(f, " -> {key}")?;
    }

    Ok(())
}

impl<K, V> Threadwood<K, V> {
    pub fn listing(&self, direction: Direction) -> Listing<'_, K, V> {
        Listing {
            tree: self,
            direction,
        }
    }
}

impl<K: fmt::Display, V> Threadwood<K, V> {
    /// Lists the keys in the given order, or `Empty Tree`.
    pub fn to_string_with(&self, direction: Direction) -> String {
        self.listing(direction).to_string()
    }
}

impl<K: fmt::Display, V> fmt::Display for Threadwood<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.listing(Direction::Ascending), f)
    }
}
