use gridpath_core::{GridPos, GridRect};

use super::Grid;
use crate::node::Node;
use crate::pool::NodePool;

/// A window onto a shared [`NodePool`].
///
/// Only cells inside `rect` exist for this grid: queries outside it report
/// no node and "not walkable" whatever the pool holds, and writes outside
/// it are refused.
#[derive(Debug, Clone)]
pub struct PartialGridWPool {
    pool: NodePool,
    rect: GridRect,
}

impl PartialGridWPool {
    pub fn new(pool: NodePool, rect: GridRect) -> Self {
        Self { pool, rect }
    }

    /// Move the window.
    pub fn set_rect(&mut self, rect: GridRect) {
        self.rect = rect;
    }

    pub fn pool(&self) -> &NodePool {
        &self.pool
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.rect.contains(pos)
    }
}

impl Grid for PartialGridWPool {
    fn width(&self) -> i32 {
        self.rect.width()
    }

    fn height(&self) -> i32 {
        self.rect.height()
    }

    fn rect(&self) -> GridRect {
        self.rect
    }

    fn node_at(&self, pos: GridPos) -> Option<Node> {
        if !self.contains(pos) {
            return None;
        }
        self.pool.node(pos)
    }

    fn node_at_mut(&mut self, pos: GridPos) -> Option<impl std::ops::DerefMut<Target = Node> + '_> {
        if !self.contains(pos) {
            return None;
        }
        self.pool.node_mut(pos)
    }

    fn is_walkable_at(&self, pos: GridPos) -> bool {
        self.contains(pos) && self.pool.contains(pos)
    }

    fn set_walkable_at(&mut self, pos: GridPos, walkable: bool) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.pool.set_node(pos, walkable);
        true
    }

    /// Clears the search state of the pool nodes inside the window only.
    fn reset(&mut self) {
        self.pool.reset_within(self.rect);
    }

    /// Another window of the same rectangle over the same pool.
    fn clone_grid(&self) -> Self {
        Self::new(self.pool.clone(), self.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_row(len: i32) -> NodePool {
        let pool = NodePool::new();
        for x in 0..len {
            pool.set_node(GridPos::new(x, 0), true);
        }
        pool
    }

    #[test]
    fn outside_rect_is_absent() {
        let g = PartialGridWPool::new(pool_row(10), GridRect::new(2, 0, 4, 0));
        assert!(g.is_walkable_at(GridPos::new(3, 0)));
        assert!(!g.is_walkable_at(GridPos::new(5, 0)));
        assert!(g.node_at(GridPos::new(5, 0)).is_none());
        assert!(g.pool().contains(GridPos::new(5, 0)));
        assert_eq!((g.width(), g.height()), (3, 1));
    }

    #[test]
    fn writes_outside_rect_are_refused() {
        let mut g = PartialGridWPool::new(NodePool::new(), GridRect::new(0, 0, 1, 1));
        assert!(g.set_walkable_at(GridPos::new(1, 1), true));
        assert!(!g.set_walkable_at(GridPos::new(2, 1), true));
        assert!(!g.pool().contains(GridPos::new(2, 1)));
    }

    #[test]
    fn moving_the_window() {
        let mut g = PartialGridWPool::new(pool_row(10), GridRect::new(0, 0, 2, 0));
        assert!(!g.is_walkable_at(GridPos::new(8, 0)));
        g.set_rect(GridRect::new(6, 0, 9, 0));
        assert!(g.is_walkable_at(GridPos::new(8, 0)));
        assert!(!g.is_walkable_at(GridPos::new(1, 0)));
    }

    #[test]
    fn reset_only_inside_window() {
        let pool = pool_row(6);
        for x in 0..6 {
            pool.node_mut(GridPos::new(x, 0)).unwrap().opened = true;
        }
        let mut g = PartialGridWPool::new(pool.clone(), GridRect::new(0, 0, 2, 0));
        g.reset();
        assert!(!pool.node(GridPos::new(1, 0)).unwrap().opened);
        assert!(pool.node(GridPos::new(4, 0)).unwrap().opened);
    }

    #[test]
    fn window_at_coordinate_limit() {
        let edge = GridPos::new(i32::MAX, i32::MAX);
        let pool = NodePool::new();
        for p in [edge, edge.translate(-1, 0), GridPos::new(0, 0)] {
            pool.set_node(p, true);
            pool.node_mut(p).unwrap().closed = true;
        }
        let window = GridRect::new(i32::MAX - 1, i32::MAX, i32::MAX, i32::MAX);
        let mut g = PartialGridWPool::new(pool.clone(), window);
        g.reset();
        assert!(!pool.node(edge).unwrap().closed);
        assert!(!pool.node(edge.translate(-1, 0)).unwrap().closed);
        assert!(pool.node(GridPos::new(0, 0)).unwrap().closed);

        g.set_rect(GridRect::new(0, 0, i32::MAX, i32::MAX));
        g.reset();
        assert!(!pool.node(GridPos::new(0, 0)).unwrap().closed);
        assert_eq!(g.width(), i32::MAX);
    }
}
