use gridpath_core::{GridPos, GridRect};

use super::Grid;
use crate::error::GridError;
use crate::node::Node;

/// Glyph for a walkable cell in ASCII maps.
pub const FLOOR: char = '.';
/// Glyph for a blocked cell in ASCII maps.
pub const WALL: char = '#';

/// A fixed-size dense grid with O(1) cell access.
///
/// Cells span `(0, 0)..(width, height)`. Queries outside that area report
/// "not walkable" and no node instead of failing.
#[derive(Debug, Clone)]
pub struct StaticGrid {
    width: i32,
    height: i32,
    nodes: Vec<Node>,
}

impl StaticGrid {
    /// Create a grid whose cells are all unwalkable.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, false)
    }

    /// Create a grid whose cells are all walkable.
    pub fn new_walkable(width: i32, height: i32) -> Self {
        Self::filled(width, height, true)
    }

    /// Create a grid from rows of walkability flags (`matrix[y][x]`).
    pub fn with_matrix(width: i32, height: i32, matrix: &[Vec<bool>]) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height);
        grid.reset_with(matrix)?;
        Ok(grid)
    }

    /// Parse a map where `.` is walkable and `#` is blocked.
    ///
    /// Every line must have the same width. Surrounding whitespace of the
    /// whole string is ignored; that of individual lines is not.
    pub fn from_ascii(map: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = map.trim().lines().collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        let mut matrix = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::InconsistentRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            let row = line
                .chars()
                .enumerate()
                .map(|(x, ch)| match ch {
                    FLOOR => Ok(true),
                    WALL => Ok(false),
                    _ => Err(GridError::InvalidCell {
                        ch,
                        pos: GridPos::new(x as i32, y as i32),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            matrix.push(row);
        }
        Self::with_matrix(width as i32, lines.len() as i32, &matrix)
    }

    fn filled(width: i32, height: i32, walkable: bool) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        let nodes = GridRect::new(0, 0, width - 1, height - 1)
            .iter()
            .map(|p| Node::new(p, walkable))
            .collect();
        Self {
            width,
            height,
            nodes,
        }
    }

    /// Clear search state and overwrite walkability from `matrix[y][x]`.
    ///
    /// The matrix must be exactly `height` rows of `width` flags; on a
    /// mismatch nothing is overwritten.
    pub fn reset_with(&mut self, matrix: &[Vec<bool>]) -> Result<(), GridError> {
        let rows = matrix.len() as i32;
        let mismatch = matrix.iter().find(|row| row.len() as i32 != self.width);
        if rows != self.height || mismatch.is_some() {
            let cols = mismatch.or(matrix.first()).map_or(0, |row| row.len() as i32);
            return Err(GridError::DimensionMismatch {
                expected: (self.width, self.height),
                found: (cols, rows),
            });
        }
        for node in &mut self.nodes {
            node.reset(matrix[node.pos.y as usize][node.pos.x as usize]);
        }
        Ok(())
    }

    /// Whether `pos` is inside `(0, 0)..(width, height)`.
    #[inline]
    pub fn is_inside(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: GridPos) -> Option<usize> {
        if !self.is_inside(pos) {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }
}

impl Grid for StaticGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn rect(&self) -> GridRect {
        GridRect::new(0, 0, self.width - 1, self.height - 1)
    }

    fn node_at(&self, pos: GridPos) -> Option<Node> {
        self.index(pos).map(|i| self.nodes[i])
    }

    fn node_at_mut(&mut self, pos: GridPos) -> Option<impl std::ops::DerefMut<Target = Node> + '_> {
        self.index(pos).map(|i| &mut self.nodes[i])
    }

    fn is_walkable_at(&self, pos: GridPos) -> bool {
        self.index(pos).is_some_and(|i| self.nodes[i].walkable)
    }

    fn set_walkable_at(&mut self, pos: GridPos, walkable: bool) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.nodes[i].walkable = walkable;
                true
            }
            None => false,
        }
    }

    fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset(node.walkable);
        }
    }

    fn clone_grid(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            nodes: self.nodes.iter().map(|n| Node::new(n.pos, n.walkable)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeState;

    #[test]
    fn new_grid_is_blocked() {
        let g = StaticGrid::new(4, 3);
        assert_eq!((g.width(), g.height()), (4, 3));
        assert_eq!(g.rect(), GridRect::new(0, 0, 3, 2));
        assert!(!g.is_walkable_at(GridPos::new(1, 1)));
        // Dense grids hold a node for every in-bounds cell.
        assert!(g.node_at(GridPos::new(1, 1)).is_some());
    }

    #[test]
    fn out_of_bounds_queries_are_quiet() {
        let mut g = StaticGrid::new_walkable(2, 2);
        for p in [GridPos::new(-1, 0), GridPos::new(2, 0), GridPos::new(0, 2)] {
            assert!(!g.is_walkable_at(p));
            assert!(g.node_at(p).is_none());
            assert!(!g.set_walkable_at(p, true));
        }
    }

    #[test]
    fn set_and_query() {
        let mut g = StaticGrid::new(3, 3);
        assert!(g.set_walkable_at(GridPos::new(2, 1), true));
        assert!(g.is_walkable_at(GridPos::new(2, 1)));
        assert!(g.node_at(GridPos::new(2, 1)).unwrap().walkable);
    }

    #[test]
    fn matrix_is_row_major() {
        let matrix = vec![vec![true, false, true], vec![false, true, true]];
        let g = StaticGrid::with_matrix(3, 2, &matrix).unwrap();
        assert!(!g.is_walkable_at(GridPos::new(1, 0)));
        assert!(!g.is_walkable_at(GridPos::new(0, 1)));
        assert!(g.is_walkable_at(GridPos::new(2, 1)));
    }

    #[test]
    fn matrix_size_mismatch() {
        let matrix = vec![vec![true; 3]; 2];
        let err = StaticGrid::with_matrix(2, 2, &matrix).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                expected: (2, 2),
                found: (3, 2)
            }
        );

        let mut g = StaticGrid::new_walkable(3, 3);
        assert!(g.reset_with(&matrix).is_err());
        // A rejected reset leaves walkability alone.
        assert!(g.is_walkable_at(GridPos::new(2, 2)));
    }

    #[test]
    fn ascii_map() {
        let g = StaticGrid::from_ascii(
            "
            ..#
            #..
            "
            .replace(' ', "")
            .as_str(),
        )
        .unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        assert!(g.is_walkable_at(GridPos::new(0, 0)));
        assert!(!g.is_walkable_at(GridPos::new(2, 0)));
        assert!(!g.is_walkable_at(GridPos::new(0, 1)));
    }

    #[test]
    fn ascii_map_errors() {
        assert!(matches!(
            StaticGrid::from_ascii("...\n.."),
            Err(GridError::InconsistentRow { row: 1, expected: 3, found: 2 })
        ));
        assert!(matches!(
            StaticGrid::from_ascii("..\n.x"),
            Err(GridError::InvalidCell { ch: 'x', .. })
        ));
    }

    #[test]
    fn reset_keeps_walkability() {
        let mut g = StaticGrid::from_ascii(".#\n..").unwrap();
        {
            let mut n = g.node_at_mut(GridPos::new(0, 0)).unwrap();
            n.closed = true;
            n.opened = true;
            n.parent = Some(GridPos::new(1, 1));
        }
        g.reset();
        let n = g.node_at(GridPos::new(0, 0)).unwrap();
        assert_eq!(n.state(), NodeState::Unvisited);
        assert_eq!(n.parent, None);
        assert!(n.walkable);
        assert!(!g.is_walkable_at(GridPos::new(1, 0)));
    }

    #[test]
    fn clone_drops_search_state() {
        let mut g = StaticGrid::from_ascii("..\n#.").unwrap();
        g.node_at_mut(GridPos::new(1, 1)).unwrap().closed = true;
        let c = g.clone_grid();
        assert!(!c.node_at(GridPos::new(1, 1)).unwrap().closed);
        assert!(!c.is_walkable_at(GridPos::new(0, 1)));
        assert!(c.is_walkable_at(GridPos::new(1, 1)));
        // The source grid keeps its state.
        assert!(g.node_at(GridPos::new(1, 1)).unwrap().closed);
    }
}
