//! Shared helpers for the gridpath demos: random maps and ASCII rendering.

use gridpath::{FLOOR, Grid, GridPos, StaticGrid, WALL};
use rand::RngExt;

/// Glyph for a cell on the path.
pub const PATH: char = '*';
/// Glyphs for the endpoints.
pub const START: char = 'S';
pub const GOAL: char = 'G';

/// A dense map where each cell is blocked with probability `wall_chance`.
pub fn random_grid(width: i32, height: i32, wall_chance: f64, rng: &mut impl RngExt) -> StaticGrid {
    let mut grid = StaticGrid::new(width, height);
    for p in grid.rect() {
        grid.set_walkable_at(p, !rng.random_bool(wall_chance));
    }
    grid
}

/// Draw `grid` with `path` overlaid, one line per row.
pub fn render(grid: &impl Grid, path: &[GridPos]) -> String {
    let rect = grid.rect();
    let mut out = String::with_capacity(rect.len() + rect.height().max(0) as usize);
    for y in rect.top..=rect.bottom {
        for x in rect.left..=rect.right {
            let p = GridPos::new(x, y);
            let ch = if path.first() == Some(&p) {
                START
            } else if path.last() == Some(&p) {
                GOAL
            } else if path.contains(&p) {
                PATH
            } else if grid.is_walkable_at(p) {
                FLOOR
            } else {
                WALL
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
