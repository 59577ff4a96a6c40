//! Walkability surfaces the engines search over.
//!
//! | Grid | Storage |
//! |---|---|
//! | [`StaticGrid`] | dense `width × height` array, fixed size |
//! | [`DynamicGrid`] | sparse map owned by the grid |
//! | [`DynamicGridWPool`] | sparse map in a shared [`NodePool`](crate::NodePool) |
//! | [`PartialGridWPool`] | shared pool seen through a bounding rectangle |
//!
//! All four agree on one rule: a cell is walkable exactly when
//! [`Grid::node_at`] returns a walkable node for it.

use std::ops::DerefMut;

use gridpath_core::{GridPos, GridRect};

use crate::movement::DiagonalMovement;
use crate::node::Node;

mod dynamic;
mod partial;
mod pooled;
mod static_grid;

pub use dynamic::DynamicGrid;
pub use partial::PartialGridWPool;
pub use pooled::DynamicGridWPool;
pub use static_grid::{FLOOR, StaticGrid, WALL};

/// Orthogonal offsets: N, E, S, W.
const ORTHOGONAL: [GridPos; 4] = [
    GridPos::new(0, -1),
    GridPos::new(1, 0),
    GridPos::new(0, 1),
    GridPos::new(-1, 0),
];

/// Diagonal offsets NW, NE, SE, SW, each with the indices into
/// [`ORTHOGONAL`] of its two flanking cells.
const DIAGONAL: [(GridPos, usize, usize); 4] = [
    (GridPos::new(-1, -1), 3, 0),
    (GridPos::new(1, -1), 0, 1),
    (GridPos::new(1, 1), 1, 2),
    (GridPos::new(-1, 1), 2, 3),
];

/// A grid of cells with walkability and per-cell search state.
pub trait Grid {
    /// Number of columns spanned by the grid.
    fn width(&self) -> i32;

    /// Number of rows spanned by the grid.
    fn height(&self) -> i32;

    /// Inclusive bounds of the grid.
    fn rect(&self) -> GridRect;

    /// Copy of the node stored for `pos`, or `None` when the grid holds no
    /// node there (outside the grid, or an unwalkable sparse cell).
    fn node_at(&self, pos: GridPos) -> Option<Node>;

    /// Mutable access to the node stored for `pos`.
    fn node_at_mut(&mut self, pos: GridPos) -> Option<impl DerefMut<Target = Node> + '_>;

    fn is_walkable_at(&self, pos: GridPos) -> bool;

    /// Change the walkability of `pos`. Returns `false` when the cell cannot
    /// be addressed by this grid and nothing changed.
    fn set_walkable_at(&mut self, pos: GridPos, walkable: bool) -> bool;

    /// Clear the search state of every node, keeping walkability.
    fn reset(&mut self);

    /// A grid with the same walkability and no search state.
    fn clone_grid(&self) -> Self
    where
        Self: Sized;

    /// Append the walkable neighbours of `pos` into `buf`: orthogonal ones
    /// first (N, E, S, W), then the diagonals (NW, NE, SE, SW) permitted by
    /// `movement`. The caller clears `buf` before calling.
    fn neighbors(&self, pos: GridPos, movement: DiagonalMovement, buf: &mut Vec<GridPos>) {
        let mut open = [false; 4];
        for (i, d) in ORTHOGONAL.into_iter().enumerate() {
            let n = pos + d;
            if self.is_walkable_at(n) {
                buf.push(n);
                open[i] = true;
            }
        }
        for (d, a, b) in DIAGONAL {
            let n = pos + d;
            if movement.allows(open[a], open[b]) && self.is_walkable_at(n) {
                buf.push(n);
            }
        }
    }
}
