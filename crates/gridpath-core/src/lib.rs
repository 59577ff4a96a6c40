//! **gridpath-core**: geometry value types for the *gridpath* engine.
//!
//! [`GridPos`] names a cell and keys the sparse node tables; [`GridRect`]
//! bounds partial grids and iterates dense regions.

pub mod geom;

pub use geom::{GridPos, GridRect, GridRectIter};
