use std::fmt;

use gridpath_core::GridPos;

/// Errors raised while building or resetting a dense grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A walkability matrix does not match the grid's `(width, height)`.
    DimensionMismatch {
        expected: (i32, i32),
        found: (i32, i32),
    },
    /// An ASCII map row differs in width from the first row.
    InconsistentRow { row: usize, expected: usize, found: usize },
    /// An ASCII map contains a character that is neither floor nor wall.
    InvalidCell { ch: char, pos: GridPos },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "matrix size does not fit: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            Self::InconsistentRow {
                row,
                expected,
                found,
            } => write!(f, "map row {row} is {found} cells wide, expected {expected}"),
            Self::InvalidCell { ch, pos } => {
                write!(f, "map contains invalid cell \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = GridError::DimensionMismatch {
            expected: (3, 2),
            found: (2, 2),
        };
        assert_eq!(e.to_string(), "matrix size does not fit: expected 3x2, found 2x2");
        let e = GridError::InvalidCell {
            ch: '?',
            pos: GridPos::new(1, 0),
        };
        assert!(e.to_string().contains("(1, 0)"));
    }
}
