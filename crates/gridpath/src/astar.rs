use std::f64::consts::SQRT_2;

use gridpath_core::GridPos;

use crate::grid::Grid;
use crate::open_list::OpenList;
use crate::params::AStarParam;

impl<G: Grid> AStarParam<G> {
    /// Compute a path from the start to the end position using A\*.
    ///
    /// Orthogonal steps cost 1 and diagonal steps √2; the estimate to the
    /// goal is `weight × heuristic(|dx|, |dy|)`, cached per node. Returns
    /// every cell of the path, start and end included, or an empty vector
    /// when the goal is unreachable.
    ///
    /// Node state is left in the grid; call [`reset`](Self::reset) before
    /// running another query on the same grid.
    pub fn find_path(&mut self) -> Vec<GridPos> {
        let Some((start, end)) = self.base().endpoints() else {
            log::warn!("A* run on parameters without endpoints");
            return Vec::new();
        };
        let weight = self.weight();
        let movement = self.base().diagonal_movement();
        let heuristic = self.base().heuristic();
        let base = self.base_mut();

        let Some(mut node) = base.node(start) else {
            return Vec::new();
        };
        node.g = 0.0;
        node.f = 0.0;
        node.opened = true;
        base.store(node);

        let mut open = OpenList::new();
        open.push(start, 0.0);
        let mut nbuf = Vec::with_capacity(8);
        let mut expanded = 0usize;

        while let Some(pos) = open.pop() {
            let Some(mut node) = base.node(pos) else {
                continue;
            };
            // Outdated entry for a node that was improved and pushed again.
            if node.closed {
                continue;
            }
            node.closed = true;
            base.store(node);

            if pos == end {
                let path = base.backtrace(end);
                log::debug!(
                    "A* {start} -> {end}: {} cells, {expanded} nodes expanded",
                    path.len()
                );
                return path;
            }
            expanded += 1;

            nbuf.clear();
            base.grid().neighbors(pos, movement, &mut nbuf);
            for &npos in &nbuf {
                let Some(mut neighbor) = base.node(npos) else {
                    continue;
                };
                if neighbor.closed {
                    continue;
                }
                let step = if npos.x != pos.x && npos.y != pos.y {
                    SQRT_2
                } else {
                    1.0
                };
                let g = node.g + step;
                if !neighbor.opened || g < neighbor.g {
                    neighbor.g = g;
                    let (dx, dy) = npos.abs_delta(end);
                    let h = *neighbor.h.get_or_insert_with(|| weight * heuristic(dx, dy));
                    neighbor.f = g + h;
                    neighbor.parent = Some(pos);
                    neighbor.opened = true;
                    base.store(neighbor);
                    open.push(npos, neighbor.f);
                }
            }
        }

        log::debug!("A* {start} -> {end}: no path, {expanded} nodes expanded");
        Vec::new()
    }
}
