//! A node table shared between pooled grids.

use std::cell::{RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use gridpath_core::{GridPos, GridRect};

use crate::node::Node;

/// Sparse position → [`Node`] table behind a shared handle.
///
/// Cloning a `NodePool` yields another handle onto the *same* table, so
/// several pooled grids (for instance successive windows over one large
/// world) reuse node allocations. A node exists exactly while its cell is
/// walkable.
///
/// The handle is `!Send`; coordinating queries that mutate one pool from
/// several places is the caller's responsibility.
#[derive(Debug, Clone, Default)]
pub struct NodePool {
    nodes: Rc<RefCell<HashMap<GridPos, Node>>>,
}

impl NodePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the node at `pos`, if the cell is walkable.
    pub fn node(&self, pos: GridPos) -> Option<Node> {
        self.nodes.borrow().get(&pos).copied()
    }

    /// Make `pos` walkable (inserting a fresh node if absent) or unwalkable
    /// (removing it). Returns the node now stored at `pos`.
    pub fn set_node(&self, pos: GridPos, walkable: bool) -> Option<Node> {
        let mut nodes = self.nodes.borrow_mut();
        if walkable {
            Some(*nodes.entry(pos).or_insert_with(|| Node::new(pos, true)))
        } else {
            nodes.remove(&pos);
            None
        }
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.nodes.borrow().contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Positions of every walkable cell, in no particular order.
    pub fn positions(&self) -> Vec<GridPos> {
        self.nodes.borrow().keys().copied().collect()
    }

    /// Whether `other` is a handle onto the same table.
    pub fn shares_with(&self, other: &NodePool) -> bool {
        Rc::ptr_eq(&self.nodes, &other.nodes)
    }

    pub(crate) fn node_mut(&self, pos: GridPos) -> Option<RefMut<'_, Node>> {
        RefMut::filter_map(self.nodes.borrow_mut(), |nodes| nodes.get_mut(&pos)).ok()
    }

    /// Clear the search state of every node.
    pub(crate) fn reset_all(&self) {
        for node in self.nodes.borrow_mut().values_mut() {
            node.reset(true);
        }
    }

    /// Clear the search state of the nodes inside `rect`.
    ///
    /// Walks whichever is smaller: the rectangle or the table.
    pub(crate) fn reset_within(&self, rect: GridRect) {
        let mut nodes = self.nodes.borrow_mut();
        if nodes.len() > rect.len() {
            for pos in rect {
                if let Some(node) = nodes.get_mut(&pos) {
                    node.reset(true);
                }
            }
        } else {
            for node in nodes.values_mut().filter(|n| rect.contains(n.pos)) {
                node.reset(true);
            }
        }
    }

    pub(crate) fn bounds(&self) -> Option<GridRect> {
        GridRect::enclosing(self.nodes.borrow().keys().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_remove() {
        let pool = NodePool::new();
        let p = GridPos::new(4, 2);
        assert!(pool.node(p).is_none());

        let n = pool.set_node(p, true).unwrap();
        assert_eq!(n.pos, p);
        assert!(n.walkable);
        assert!(pool.contains(p));
        assert_eq!(pool.len(), 1);

        assert!(pool.set_node(p, false).is_none());
        assert!(!pool.contains(p));
        assert!(pool.is_empty());
    }

    #[test]
    fn set_walkable_twice_keeps_existing_node() {
        let pool = NodePool::new();
        let p = GridPos::new(0, 0);
        pool.set_node(p, true);
        pool.node_mut(p).unwrap().g = 3.0;
        let again = pool.set_node(p, true).unwrap();
        assert_eq!(again.g, 3.0);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn clones_share_the_table() {
        let a = NodePool::new();
        let b = a.clone();
        a.set_node(GridPos::new(1, 1), true);
        assert!(b.contains(GridPos::new(1, 1)));
        assert!(a.shares_with(&b));
        assert!(!a.shares_with(&NodePool::new()));
    }

    #[test]
    fn reset_within_only_touches_rect() {
        let pool = NodePool::new();
        for x in 0..5 {
            pool.set_node(GridPos::new(x, 0), true);
            pool.node_mut(GridPos::new(x, 0)).unwrap().closed = true;
        }
        pool.reset_within(GridRect::new(0, 0, 1, 0));
        assert!(!pool.node(GridPos::new(0, 0)).unwrap().closed);
        assert!(!pool.node(GridPos::new(1, 0)).unwrap().closed);
        assert!(pool.node(GridPos::new(2, 0)).unwrap().closed);

        pool.reset_all();
        assert!(pool.positions().iter().all(|&p| !pool.node(p).unwrap().closed));
    }

    #[test]
    fn bounds_cover_all_nodes() {
        let pool = NodePool::new();
        assert!(pool.bounds().is_none());
        pool.set_node(GridPos::new(-1, 2), true);
        pool.set_node(GridPos::new(3, -4), true);
        assert_eq!(pool.bounds(), Some(GridRect::new(-1, -4, 3, 2)));
    }
}
