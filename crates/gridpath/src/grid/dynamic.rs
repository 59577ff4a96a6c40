use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use gridpath_core::{GridPos, GridRect};

use super::Grid;
use crate::node::Node;

/// Bounding box of a sparse grid, recomputed lazily.
///
/// Adding a cell grows the box in place; removing a cell on the edge only
/// marks it stale, since the new edge is unknown until the next query.
#[derive(Debug, Clone, Default)]
struct LazyBounds {
    rect: Cell<Option<GridRect>>,
    stale: Cell<bool>,
}

impl LazyBounds {
    fn added(&self, pos: GridPos) {
        if !self.stale.get() {
            let rect = self
                .rect
                .get()
                .map_or(GridRect::around(pos), |r| r.expand_to(pos));
            self.rect.set(Some(rect));
        }
    }

    fn removed(&self, pos: GridPos) {
        if self.rect.get().is_none_or(|r| r.on_edge(pos)) {
            self.stale.set(true);
        }
    }

    fn get(&self, recompute: impl FnOnce() -> Option<GridRect>) -> Option<GridRect> {
        if self.stale.get() {
            self.rect.set(recompute());
            self.stale.set(false);
        }
        self.rect.get()
    }
}

/// A sparse grid owning its node table.
///
/// A cell is walkable exactly when it has a node. The grid has no fixed
/// extent; its bounds are the bounding box of the walkable cells.
#[derive(Debug, Clone, Default)]
pub struct DynamicGrid {
    nodes: HashMap<GridPos, Node>,
    extent: LazyBounds,
}

impl DynamicGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid whose walkable cells are exactly `walkable`.
    pub fn from_walkable(walkable: impl IntoIterator<Item = GridPos>) -> Self {
        let mut grid = Self::new();
        for pos in walkable {
            grid.set_walkable_at(pos, true);
        }
        grid
    }

    /// Number of walkable cells.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear search state and make the walkable cells exactly `walkable`.
    pub fn reset_with(&mut self, walkable: &[GridPos]) {
        self.reset();
        let keep: HashSet<GridPos> = walkable.iter().copied().collect();
        let stale: Vec<GridPos> = self
            .nodes
            .keys()
            .filter(|p| !keep.contains(p))
            .copied()
            .collect();
        for pos in stale {
            self.set_walkable_at(pos, false);
        }
        for &pos in walkable {
            self.set_walkable_at(pos, true);
        }
    }

    fn bounds(&self) -> Option<GridRect> {
        self.extent
            .get(|| GridRect::enclosing(self.nodes.keys().copied()))
    }
}

impl Grid for DynamicGrid {
    fn width(&self) -> i32 {
        self.rect().width()
    }

    fn height(&self) -> i32 {
        self.rect().height()
    }

    fn rect(&self) -> GridRect {
        self.bounds().unwrap_or(GridRect::EMPTY)
    }

    fn node_at(&self, pos: GridPos) -> Option<Node> {
        self.nodes.get(&pos).copied()
    }

    fn node_at_mut(&mut self, pos: GridPos) -> Option<impl std::ops::DerefMut<Target = Node> + '_> {
        self.nodes.get_mut(&pos)
    }

    fn is_walkable_at(&self, pos: GridPos) -> bool {
        self.nodes.contains_key(&pos)
    }

    fn set_walkable_at(&mut self, pos: GridPos, walkable: bool) -> bool {
        if walkable {
            if !self.nodes.contains_key(&pos) {
                self.nodes.insert(pos, Node::new(pos, true));
                self.extent.added(pos);
            }
        } else if self.nodes.remove(&pos).is_some() {
            self.extent.removed(pos);
        }
        true
    }

    fn reset(&mut self) {
        for node in self.nodes.values_mut() {
            node.reset(true);
        }
    }

    fn clone_grid(&self) -> Self {
        Self::from_walkable(self.nodes.keys().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkable_iff_node_exists() {
        let mut g = DynamicGrid::new();
        let p = GridPos::new(5, -3);
        assert!(!g.is_walkable_at(p));
        assert!(g.node_at(p).is_none());

        g.set_walkable_at(p, true);
        assert!(g.is_walkable_at(p));
        assert!(g.node_at(p).unwrap().walkable);

        g.set_walkable_at(p, false);
        assert!(!g.is_walkable_at(p));
        assert!(g.node_at(p).is_none());
    }

    #[test]
    fn empty_grid_has_no_extent() {
        let g = DynamicGrid::new();
        assert_eq!((g.width(), g.height()), (0, 0));
        assert!(g.rect().is_empty());
    }

    #[test]
    fn bounds_grow_and_shrink() {
        let mut g = DynamicGrid::from_walkable([
            GridPos::new(0, 0),
            GridPos::new(4, 1),
            GridPos::new(2, 3),
        ]);
        assert_eq!(g.rect(), GridRect::new(0, 0, 4, 3));
        assert_eq!((g.width(), g.height()), (5, 4));

        // Removing an edge cell shrinks the box on the next query.
        g.set_walkable_at(GridPos::new(4, 1), false);
        assert_eq!(g.rect(), GridRect::new(0, 0, 2, 3));

        g.set_walkable_at(GridPos::new(-2, 1), true);
        assert_eq!(g.rect(), GridRect::new(-2, 0, 2, 3));
    }

    #[test]
    fn removing_last_cell_empties_bounds() {
        let mut g = DynamicGrid::from_walkable([GridPos::new(3, 3)]);
        assert_eq!(g.width(), 1);
        g.set_walkable_at(GridPos::new(3, 3), false);
        assert_eq!(g.width(), 0);
        g.set_walkable_at(GridPos::new(7, 1), true);
        assert_eq!(g.rect(), GridRect::around(GridPos::new(7, 1)));
    }

    #[test]
    fn reset_with_reconciles() {
        let mut g = DynamicGrid::from_walkable([GridPos::new(0, 0), GridPos::new(1, 0)]);
        g.node_at_mut(GridPos::new(0, 0)).unwrap().opened = true;
        g.reset_with(&[GridPos::new(0, 0), GridPos::new(0, 1)]);

        assert!(g.is_walkable_at(GridPos::new(0, 0)));
        assert!(!g.is_walkable_at(GridPos::new(1, 0)));
        assert!(g.is_walkable_at(GridPos::new(0, 1)));
        assert!(!g.node_at(GridPos::new(0, 0)).unwrap().opened);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn clone_drops_search_state() {
        let mut g = DynamicGrid::from_walkable([GridPos::new(1, 1), GridPos::new(2, 1)]);
        g.node_at_mut(GridPos::new(1, 1)).unwrap().closed = true;
        let c = g.clone_grid();
        assert_eq!(c.len(), 2);
        assert!(!c.node_at(GridPos::new(1, 1)).unwrap().closed);
        assert_eq!(c.rect(), g.rect());
    }
}
