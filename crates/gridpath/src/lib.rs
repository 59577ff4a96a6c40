//! Shortest paths on 2D grids with A\* and Jump Point Search.
//!
//! A query is described by a parameter object that owns the grid and the
//! endpoints: [`AStarParam`] for A\* and [`JumpPointParam`] for jump point
//! search. Both return an empty `Vec` when the goal is unreachable.
//!
//! ```
//! use gridpath::{
//!     AStarParam, DiagonalMovement, EndNodeUnwalkable, Grid, GridPos, HeuristicMode,
//!     JumpPointParam, StaticGrid, full_path,
//! };
//!
//! let grid = StaticGrid::from_ascii(
//!     "....\n\
//!      .##.\n\
//!      ....",
//! )?;
//! let (start, end) = (GridPos::new(0, 1), GridPos::new(3, 1));
//!
//! let mut astar = AStarParam::new(
//!     grid.clone_grid(), start, end, 1.0, DiagonalMovement::Never, HeuristicMode::Manhattan,
//! );
//! let cells = astar.find_path();
//!
//! let mut jps = JumpPointParam::new(
//!     grid, start, end, EndNodeUnwalkable::Disallow, DiagonalMovement::Never,
//!     HeuristicMode::Manhattan,
//! );
//! assert_eq!(full_path(&jps.find_path()).len(), cells.len());
//! # Ok::<(), gridpath::GridError>(())
//! ```
//!
//! Search state lives in the grid's nodes, so a grid is reused for a new
//! query through the parameter object's `reset`.
//!
//! # Grids
//!
//! | Grid | Storage |
//! |---|---|
//! | [`StaticGrid`] | dense, fixed size |
//! | [`DynamicGrid`] | sparse, owned |
//! | [`DynamicGridWPool`] | sparse, in a shared [`NodePool`] |
//! | [`PartialGridWPool`] | shared pool seen through a rectangle |

mod astar;
mod error;
mod grid;
mod heuristic;
mod jps;
mod movement;
mod node;
mod open_list;
mod params;
mod path;
mod pool;

pub use error::GridError;
pub use grid::{DynamicGrid, DynamicGridWPool, FLOOR, Grid, PartialGridWPool, StaticGrid, WALL};
pub use gridpath_core::{GridPos, GridRect};
pub use heuristic::{HeuristicFn, HeuristicMode, chebyshev, euclidean, euclidean_squared, manhattan};
pub use movement::DiagonalMovement;
pub use node::{Node, NodeState};
pub use open_list::OpenList;
pub use params::{
    AStarParam, EndNodeUnwalkable, IterationType, JumpPointParam, ParamBase, SearchConfig,
};
pub use path::{full_path, path_length};
pub use pool::NodePool;
