//! Utilities over finished paths.

use gridpath_core::GridPos;

/// Expand a route of jump points into a cell-by-cell path.
///
/// Between consecutive points the walk steps one cell at a time towards the
/// next point, moving diagonally while both axes still differ. Routes of
/// zero or one point are returned unchanged.
pub fn full_path(route: &[GridPos]) -> Vec<GridPos> {
    let Some(&first) = route.first() else {
        return Vec::new();
    };
    let mut path = vec![first];
    for pair in route.windows(2) {
        let (mut cur, to) = (pair[0], pair[1]);
        while cur != to {
            cur = cur + cur.direction_to(to);
            path.push(cur);
        }
    }
    path
}

/// Total Euclidean length of the segments joining consecutive cells.
pub fn path_length(path: &[GridPos]) -> f64 {
    path.windows(2)
        .map(|pair| {
            let (dx, dy) = pair[0].abs_delta(pair[1]);
            f64::from(dx).hypot(f64::from(dy))
        })
        .sum()
}
