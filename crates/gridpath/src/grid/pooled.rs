use gridpath_core::{GridPos, GridRect};

use super::Grid;
use crate::node::Node;
use crate::pool::NodePool;

/// A sparse grid whose nodes live in a shared [`NodePool`].
///
/// Behaves like [`DynamicGrid`](super::DynamicGrid) except that every grid
/// built on the same pool sees the same cells and the same search state.
/// Other handles may change the pool at any time, so the bounds are
/// computed from the pool on each query.
#[derive(Debug, Clone)]
pub struct DynamicGridWPool {
    pool: NodePool,
}

impl DynamicGridWPool {
    /// Create a grid over `pool`. The pool may already hold walkable cells.
    pub fn new(pool: NodePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &NodePool {
        &self.pool
    }
}

impl Grid for DynamicGridWPool {
    fn width(&self) -> i32 {
        self.rect().width()
    }

    fn height(&self) -> i32 {
        self.rect().height()
    }

    fn rect(&self) -> GridRect {
        self.pool.bounds().unwrap_or(GridRect::EMPTY)
    }

    fn node_at(&self, pos: GridPos) -> Option<Node> {
        self.pool.node(pos)
    }

    fn node_at_mut(&mut self, pos: GridPos) -> Option<impl std::ops::DerefMut<Target = Node> + '_> {
        self.pool.node_mut(pos)
    }

    fn is_walkable_at(&self, pos: GridPos) -> bool {
        self.pool.contains(pos)
    }

    fn set_walkable_at(&mut self, pos: GridPos, walkable: bool) -> bool {
        self.pool.set_node(pos, walkable);
        true
    }

    fn reset(&mut self) {
        self.pool.reset_all();
    }

    /// Another grid over the same pool; walkability and search state stay shared.
    fn clone_grid(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_on_one_pool_share_cells() {
        let pool = NodePool::new();
        let mut a = DynamicGridWPool::new(pool.clone());
        let b = DynamicGridWPool::new(pool.clone());

        a.set_walkable_at(GridPos::new(2, 2), true);
        assert!(b.is_walkable_at(GridPos::new(2, 2)));
        assert!(pool.contains(GridPos::new(2, 2)));

        a.set_walkable_at(GridPos::new(2, 2), false);
        assert!(!b.is_walkable_at(GridPos::new(2, 2)));
    }

    #[test]
    fn bounds_include_preexisting_pool_cells() {
        let pool = NodePool::new();
        pool.set_node(GridPos::new(-1, -1), true);
        pool.set_node(GridPos::new(3, 0), true);
        let mut g = DynamicGridWPool::new(pool);
        assert_eq!(g.rect(), GridRect::new(-1, -1, 3, 0));

        g.set_walkable_at(GridPos::new(0, 5), true);
        assert_eq!((g.width(), g.height()), (5, 7));
    }

    #[test]
    fn bounds_follow_changes_from_other_handles() {
        let pool = NodePool::new();
        let g = DynamicGridWPool::new(pool.clone());
        assert!(g.rect().is_empty());
        pool.set_node(GridPos::new(2, 3), true);
        assert_eq!(g.rect(), GridRect::around(GridPos::new(2, 3)));
    }

    #[test]
    fn reset_clears_pool_state() {
        let pool = NodePool::new();
        let mut g = DynamicGridWPool::new(pool.clone());
        g.set_walkable_at(GridPos::ZERO, true);
        g.node_at_mut(GridPos::ZERO).unwrap().closed = true;
        assert!(pool.node(GridPos::ZERO).unwrap().closed);

        g.reset();
        assert!(!pool.node(GridPos::ZERO).unwrap().closed);
        assert!(g.is_walkable_at(GridPos::ZERO));
    }

    #[test]
    fn clone_shares_pool() {
        let g = DynamicGridWPool::new(NodePool::new());
        let c = g.clone_grid();
        assert!(c.pool().shares_with(g.pool()));
    }
}
