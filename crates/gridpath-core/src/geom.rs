//! Geometry primitives: [`GridPos`] and [`GridRect`].
//!
//! Both are plain `Copy` values. `GridPos` doubles as the key of the sparse
//! node tables, so it hashes and compares by coordinate only.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// GridPos
// ---------------------------------------------------------------------------

/// A cell coordinate. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a position shifted by (dx, dy).
    #[inline]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Unit step from `self` towards `other`: each axis is -1, 0 or 1.
    #[inline]
    pub const fn direction_to(self, other: GridPos) -> GridPos {
        Self::new((other.x - self.x).signum(), (other.y - self.y).signum())
    }

    /// Component-wise sign of the position, treated as a vector.
    #[inline]
    pub const fn signum(self) -> GridPos {
        Self::new(self.x.signum(), self.y.signum())
    }

    /// Whether both axes are non-zero, i.e. the vector is a diagonal one.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.x != 0 && self.y != 0
    }

    /// Absolute per-axis distance to `other`, as `(|dx|, |dy|)`.
    #[inline]
    pub const fn abs_delta(self, other: GridPos) -> (i32, i32) {
        ((other.x - self.x).abs(), (other.y - self.y).abs())
    }
}

impl PartialOrd for GridPos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GridPos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for GridPos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridPos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for GridPos {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i32> for GridPos {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// GridRect
// ---------------------------------------------------------------------------

/// An inclusive bounding box: `left..=right` by `top..=bottom`.
///
/// The default rectangle is the single cell at the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl GridRect {
    /// A rectangle covering no cell.
    pub const EMPTY: GridRect = GridRect::new(0, 0, -1, -1);

    /// Create a rectangle from its four inclusive edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The one-cell rectangle covering `p`.
    #[inline]
    pub const fn around(p: GridPos) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Smallest rectangle containing every position, or `None` if there are none.
    pub fn enclosing(positions: impl IntoIterator<Item = GridPos>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::around(first), Self::expand_to))
    }

    /// Return the rectangle grown just enough to contain `p`.
    #[inline]
    pub fn expand_to(self, p: GridPos) -> Self {
        Self {
            left: self.left.min(p.x),
            top: self.top.min(p.y),
            right: self.right.max(p.x),
            bottom: self.bottom.max(p.y),
        }
    }

    /// Number of columns covered, saturating at `i32::MAX`.
    #[inline]
    pub fn width(self) -> i32 {
        clamp_i32(span(self.left, self.right))
    }

    /// Number of rows covered, saturating at `i32::MAX`.
    #[inline]
    pub fn height(self) -> i32 {
        clamp_i32(span(self.top, self.bottom))
    }

    /// Total number of cells, zero for an inverted rectangle.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        cells(span(self.left, self.right), span(self.top, self.bottom))
    }

    /// Whether the edges are inverted so that no cell is covered.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    /// Whether `p` lies on or inside the edges.
    #[inline]
    pub fn contains(self, p: GridPos) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Whether `p` lies on one of the four edges.
    #[inline]
    pub fn on_edge(self, p: GridPos) -> bool {
        p.x == self.left || p.x == self.right || p.y == self.top || p.y == self.bottom
    }

    /// Row-major iterator over every cell in the rectangle.
    #[inline]
    pub fn iter(self) -> GridRectIter {
        GridRectIter {
            rect: self,
            cur: GridPos::new(self.left, self.top),
            done: self.is_empty(),
        }
    }
}

impl IntoIterator for GridRect {
    type Item = GridPos;
    type IntoIter = GridRectIter;
    #[inline]
    fn into_iter(self) -> GridRectIter {
        self.iter()
    }
}

impl fmt::Display for GridRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(left={}, top={}, right={}, bottom={})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

// ---------------------------------------------------------------------------
// GridRectIter
// ---------------------------------------------------------------------------

// Edge arithmetic is done in i64 so rectangles touching the i32 limits
// neither overflow nor wrap.

#[inline]
fn span(lo: i32, hi: i32) -> i64 {
    i64::from(hi) - i64::from(lo) + 1
}

#[inline]
fn clamp_i32(n: i64) -> i32 {
    n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[inline]
fn cells(cols: i64, rows: i64) -> usize {
    if cols <= 0 || rows <= 0 {
        return 0;
    }
    usize::try_from((cols as u64).saturating_mul(rows as u64)).unwrap_or(usize::MAX)
}

/// Row-major iterator over the cells of a [`GridRect`].
#[derive(Clone, Debug)]
pub struct GridRectIter {
    rect: GridRect,
    cur: GridPos,
    done: bool,
}

impl Iterator for GridRectIter {
    type Item = GridPos;

    #[inline]
    fn next(&mut self) -> Option<GridPos> {
        if self.done {
            return None;
        }
        let p = self.cur;
        if p.x < self.rect.right {
            self.cur.x += 1;
        } else if p.y < self.rect.bottom {
            self.cur = GridPos::new(self.rect.left, p.y + 1);
        } else {
            self.done = true;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let in_row = cells(span(self.cur.x, self.rect.right), 1);
        let below = cells(
            span(self.rect.left, self.rect.right),
            i64::from(self.rect.bottom) - i64::from(self.cur.y),
        );
        let total = in_row.saturating_add(below);
        (total, Some(total))
    }
}

impl ExactSizeIterator for GridRectIter {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn rect_json_shape() {
        let r = GridRect::new(0, 1, 2, 3);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"left":0,"top":1,"right":2,"bottom":3}"#);
        let back: GridRect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
