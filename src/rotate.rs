use crate::{NodeIndex, Threadwood};

// Rotations only rewire children and parents. The caller stores the returned subtree root in
// the slot the rotated node used to occupy, and takes care of colors. In-order sequence is
// unchanged, so the order list never needs fixing after a rotation.
impl<K, V> Threadwood<K, V> {
    /// Promotes the right child of `v`, returns it as the new subtree root.
    pub(crate) fn rotate_left(&mut self, v: NodeIndex) -> NodeIndex {
        let u = self
            .node(v)
            .right
            .expect("`Threadwood::rotate_left()` - node has no right child!");
        let t = self.node(u).left;

        self.node_mut(u).left = Some(v);
        self.node_mut(v).right = t;

        let grandparent = self.node(v).parent;
        self.node_mut(u).parent = grandparent;
        self.node_mut(v).parent = Some(u);
        if let Some(t) = t {
            self.node_mut(t).parent = Some(v);
        }

        u
    }

    /// Promotes the left child of `u`, returns it as the new subtree root.
    pub(crate) fn rotate_right(&mut self, u: NodeIndex) -> NodeIndex {
        let v = self
            .node(u)
            .left
            .expect("`Threadwood::rotate_right()` - node has no left child!");
        let t = self.node(v).right;

        self.node_mut(v).right = Some(u);
        self.node_mut(u).left = t;

        let grandparent = self.node(u).parent;
        self.node_mut(v).parent = grandparent;
        self.node_mut(u).parent = Some(v);
        if let Some(t) = t {
            self.node_mut(t).parent = Some(u);
        }

        v
    }

    /// Lifts the right child of `t`'s left child to the top of the subtree.
    pub(crate) fn rotate_left_right(&mut self, t: NodeIndex) -> NodeIndex {
        let left = self
            .node(t)
            .left
            .expect("`Threadwood::rotate_left_right()` - node has no left child!");

        let left = self.rotate_left(left);
        self.node_mut(t).left = Some(left);

        self.rotate_right(t)
    }

    /// Lifts the left child of `t`'s right child to the top of the subtree.
    pub(crate) fn rotate_right_left(&mut self, t: NodeIndex) -> NodeIndex {
        let right = self
            .node(t)
            .right
            .expect("`Threadwood::rotate_right_left()` - node has no right child!");

        let right = self.rotate_right(right);
        self.node_mut(t).right = Some(right);

        self.rotate_left(t)
    }
}
