use alloc::vec::Vec;

use thiserror::Error;

use crate::{NodeIndex, Threadwood};

/// A broken structural invariant, reported by [`Threadwood::validate`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root node is red")]
    RedRoot,
    #[error("red node has a red child")]
    RedChildOfRed,
    #[error("paths below a node hold {left} and {right} black nodes")]
    BlackHeight { left: usize, right: usize },
    #[error("tree keys are not in ascending in-order sequence")]
    TreeOrder,
    #[error("node does not point back to its parent")]
    ParentLink,
    #[error("order list does not follow the in-order sequence of the tree")]
    ListOrder,
    #[error("order list holds {list} nodes while the tree holds {tree}")]
    ListLength { list: usize, tree: usize },
    #[error("`prev` link does not mirror the `next` link")]
    ListSymmetry,
    #[error("order list endpoints are not the smallest and biggest nodes")]
    ListEndpoints,
    #[error("tree counts {counted} entries but holds {tree}")]
    Length { counted: usize, tree: usize },
}

impl<K: Ord, V> Threadwood<K, V> {
    /// Checks every structural invariant: red-black coloring and black height, search order,
    /// parent links and the order list.
    ///
    /// Runs in O(n), meant for tests and debugging.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut in_order = Vec::with_capacity(self.len());

        if let Some(root) = self.root {
            if self.node(root).parent.is_some() {
                return Err(InvariantViolation::ParentLink);
            }
            if self.node(root).is_red() {
                return Err(InvariantViolation::RedRoot);
            }

            self.validate_subtree(root, &mut in_order)?;
        }

        if in_order
            .windows(2)
            .any(|pair| self.node(pair[0]).key >= self.node(pair[1]).key)
        {
            return Err(InvariantViolation::TreeOrder);
        }

        if in_order.len() != self.len() {
            return Err(InvariantViolation::Length {
                counted: self.len(),
                tree: in_order.len(),
            });
        }

        self.validate_order_list(&in_order)
    }

    /// Returns the black height of the subtree rooted at `idx`, null links counting as one.
    fn validate_subtree(
        &self,
        idx: NodeIndex,
        in_order: &mut Vec<NodeIndex>,
    ) -> Result<usize, InvariantViolation> {
        let node = self.node(idx);

        let left = self.validate_child(idx, node.left, in_order)?;
        in_order.push(idx);
        let right = self.validate_child(idx, node.right, in_order)?;

        if left != right {
            return Err(InvariantViolation::BlackHeight { left, right });
        }

        Ok(left + usize::from(!node.is_red()))
    }

    fn validate_child(
        &self,
        parent: NodeIndex,
        child: Option<NodeIndex>,
        in_order: &mut Vec<NodeIndex>,
    ) -> Result<usize, InvariantViolation> {
        let Some(child) = child else {
            return Ok(1);
        };

        if self.node(child).parent != Some(parent) {
            return Err(InvariantViolation::ParentLink);
        }
        if self.node(parent).is_red() && self.node(child).is_red() {
            return Err(InvariantViolation::RedChildOfRed);
        }

        self.validate_subtree(child, in_order)
    }

    fn validate_order_list(&self, in_order: &[NodeIndex]) -> Result<(), InvariantViolation> {
        if self.smallest.is_some_and(|idx| self.node(idx).prev.is_some())
            || self.biggest.is_some_and(|idx| self.node(idx).next.is_some())
        {
            return Err(InvariantViolation::ListEndpoints);
        }

        let mut listed = 0;
        let mut previous = None;
        let mut current_node = self.smallest;

        while let Some(idx) = current_node {
            if listed == in_order.len() {
                // Longer than the tree, or cyclic.
                return Err(InvariantViolation::ListLength {
                    list: listed + 1,
                    tree: in_order.len(),
                });
            }
            if in_order[listed] != idx {
                return Err(InvariantViolation::ListOrder);
            }
            if self.node(idx).prev != previous {
                return Err(InvariantViolation::ListSymmetry);
            }

            listed += 1;
            previous = Some(idx);
            current_node = self.node(idx).next;
        }

        if listed != in_order.len() {
            return Err(InvariantViolation::ListLength {
                list: listed,
                tree: in_order.len(),
            });
        }
        if previous != self.biggest {
            return Err(InvariantViolation::ListEndpoints);
        }

        Ok(())
    }
}
