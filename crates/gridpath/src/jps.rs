//! Jump point search.
//!
//! JPS expands the same way as A\* but, instead of queueing every
//! neighbour, it prunes the neighbours a node's parent already covers and
//! scans each remaining direction in a straight line until it meets a *jump
//! point*: the goal, a cell with a forced neighbour, or (for diagonal
//! scans) a cell whose straight sub-scans find one. Only jump points enter
//! the open list, so the returned path lists jump points; expand it with
//! [`full_path`](crate::full_path).

use gridpath_core::GridPos;

use crate::grid::Grid;
use crate::movement::DiagonalMovement;
use crate::node::Node;
use crate::params::{EndNodeUnwalkable, IterationType, JumpPointParam};

impl<G: Grid> JumpPointParam<G> {
    /// Compute a path from the start to the end position using jump point
    /// search. Returns the jump points from start to end, or an empty vector
    /// when the goal is unreachable.
    ///
    /// With [`EndNodeUnwalkable::Allow`] a blocked goal is made walkable for
    /// the duration of the call and blocked again before returning.
    pub fn find_path(&mut self) -> Vec<GridPos> {
        let Some((start, end)) = self.base().endpoints() else {
            log::warn!("jump point search run on parameters without endpoints");
            return Vec::new();
        };
        let force_end = self.end_node_unwalkable() == EndNodeUnwalkable::Allow
            && !self.base().grid().is_walkable_at(end);
        if force_end {
            log::trace!("treating blocked goal {end} as walkable");
            self.base_mut().grid_mut().set_walkable_at(end, true);
        }

        let path = self.search(start, end);

        if force_end {
            log::trace!("blocking goal {end} again");
            self.base_mut().grid_mut().set_walkable_at(end, false);
        }
        path
    }

    fn search(&mut self, start: GridPos, end: GridPos) -> Vec<GridPos> {
        self.open_list.clear();
        let Some(mut node) = self.base().node(start) else {
            return Vec::new();
        };
        node.g = 0.0;
        node.f = 0.0;
        node.opened = true;
        self.base_mut().store(node);
        self.open_list.push(start, 0.0);

        let mut nbuf = Vec::with_capacity(8);
        let mut expanded = 0usize;
        while let Some(pos) = self.open_list.pop() {
            let Some(mut node) = self.base().node(pos) else {
                continue;
            };
            if node.closed {
                continue;
            }
            node.closed = true;
            self.base_mut().store(node);

            if pos == end {
                let path = self.base().backtrace(end);
                log::debug!(
                    "JPS {start} -> {end}: {} jump points, {expanded} nodes expanded",
                    path.len()
                );
                return path;
            }
            expanded += 1;
            self.identify_successors(&node, end, &mut nbuf);
        }

        log::debug!("JPS {start} -> {end}: no path, {expanded} nodes expanded");
        Vec::new()
    }

    fn identify_successors(&mut self, node: &Node, end: GridPos, nbuf: &mut Vec<GridPos>) {
        let heuristic = self.base().heuristic();
        let pos = node.pos;
        nbuf.clear();
        self.find_neighbors(node, nbuf);

        for &neighbor in nbuf.iter() {
            let Some(jump) = self.scan(end).jump_from(neighbor, pos, self.iteration()) else {
                continue;
            };
            let Some(mut jn) = self.base().node(jump) else {
                continue;
            };
            if jn.closed {
                continue;
            }
            // The jump point may be several cells away.
            let (dx, dy) = pos.abs_delta(jump);
            let g = node.g + heuristic(dx, dy);
            if !jn.opened || g < jn.g {
                jn.g = g;
                let (hx, hy) = jump.abs_delta(end);
                let h = *jn.h.get_or_insert_with(|| heuristic(hx, hy));
                jn.f = g + h;
                jn.parent = Some(pos);
                jn.opened = true;
                self.base_mut().store(jn);
                self.open_list.push(jump, jn.f);
            }
        }
    }

    fn scan(&self, end: GridPos) -> JumpScan<'_, G> {
        JumpScan::new(self.base().grid(), end, self.base().diagonal_movement())
    }

    /// Neighbours of `node` worth scanning from: all of them for the start
    /// node, otherwise the natural neighbours in the direction of travel
    /// plus any forced ones.
    fn find_neighbors(&self, node: &Node, buf: &mut Vec<GridPos>) {
        let grid = self.base().grid();
        let movement = self.base().diagonal_movement();
        let Some(parent) = node.parent else {
            grid.neighbors(node.pos, movement, buf);
            return;
        };
        let GridPos { x, y } = node.pos;
        let GridPos { x: dx, y: dy } = parent.direction_to(node.pos);
        let w = |x: i32, y: i32| grid.is_walkable_at(GridPos::new(x, y));
        let mut add = |x: i32, y: i32| buf.push(GridPos::new(x, y));

        match movement {
            DiagonalMovement::Always | DiagonalMovement::IfAtLeastOneWalkable => {
                let always = movement == DiagonalMovement::Always;
                if dx != 0 && dy != 0 {
                    let vert = w(x, y + dy);
                    let horz = w(x + dx, y);
                    if vert {
                        add(x, y + dy);
                    }
                    if horz {
                        add(x + dx, y);
                    }
                    if w(x + dx, y + dy) && (vert || horz || always) {
                        add(x + dx, y + dy);
                    }
                    if w(x - dx, y + dy) && !w(x - dx, y) && (vert || always) {
                        add(x - dx, y + dy);
                    }
                    if w(x + dx, y - dy) && !w(x, y - dy) && (horz || always) {
                        add(x + dx, y - dy);
                    }
                } else if dx != 0 {
                    let next = w(x + dx, y);
                    if next {
                        add(x + dx, y);
                    }
                    if next || always {
                        if w(x + dx, y + 1) && !w(x, y + 1) {
                            add(x + dx, y + 1);
                        }
                        if w(x + dx, y - 1) && !w(x, y - 1) {
                            add(x + dx, y - 1);
                        }
                    }
                } else {
                    let next = w(x, y + dy);
                    if next {
                        add(x, y + dy);
                    }
                    if next || always {
                        if w(x + 1, y + dy) && !w(x + 1, y) {
                            add(x + 1, y + dy);
                        }
                        if w(x - 1, y + dy) && !w(x - 1, y) {
                            add(x - 1, y + dy);
                        }
                    }
                }
            }
            DiagonalMovement::OnlyWhenNoObstacles => {
                if dx != 0 && dy != 0 {
                    let vert = w(x, y + dy);
                    let horz = w(x + dx, y);
                    if vert {
                        add(x, y + dy);
                    }
                    if horz {
                        add(x + dx, y);
                    }
                    if w(x + dx, y + dy) && vert && horz {
                        add(x + dx, y + dy);
                    }
                    if w(x - dx, y + dy) && vert && w(x - dx, y) {
                        add(x - dx, y + dy);
                    }
                    if w(x + dx, y - dy) && horz && w(x, y - dy) {
                        add(x + dx, y - dy);
                    }
                } else if dx != 0 {
                    let below = w(x, y + 1);
                    let above = w(x, y - 1);
                    if w(x + dx, y) {
                        add(x + dx, y);
                        if below && w(x + dx, y + 1) {
                            add(x + dx, y + 1);
                        }
                        if above && w(x + dx, y - 1) {
                            add(x + dx, y - 1);
                        }
                    }
                    if below {
                        add(x, y + 1);
                    }
                    if above {
                        add(x, y - 1);
                    }
                } else {
                    let right = w(x + 1, y);
                    let left = w(x - 1, y);
                    if w(x, y + dy) {
                        add(x, y + dy);
                        if right && w(x + 1, y + dy) {
                            add(x + 1, y + dy);
                        }
                        if left && w(x - 1, y + dy) {
                            add(x - 1, y + dy);
                        }
                    }
                    if right {
                        add(x + 1, y);
                    }
                    if left {
                        add(x - 1, y);
                    }
                }
            }
            DiagonalMovement::Never => {
                let ahead = if dx != 0 {
                    [(x + dx, y), (x, y + 1), (x, y - 1)]
                } else {
                    [(x, y + dy), (x + 1, y), (x - 1, y)]
                };
                for (nx, ny) in ahead {
                    if w(nx, ny) {
                        add(nx, ny);
                    }
                }
            }
        }
    }
}

/// Recursion frames a recursive jump scan may use before it finishes the
/// ray with the stack-based scan.
const MAX_JUMP_DEPTH: usize = 1024;

/// One jump scan over a grid towards a fixed goal.
///
/// The per-cell rules (`forced`, `branches`, `can_continue`) are shared by
/// the recursive and the stack-based scan so both visit cells in the same
/// order and return the same jump point.
pub(crate) struct JumpScan<'a, G> {
    grid: &'a G,
    end: GridPos,
    movement: DiagonalMovement,
}

/// Where a suspended scan frame resumes.
#[derive(Debug, Clone, Copy)]
enum Stage {
    Enter,
    /// The first branch has returned; `second` is still to scan.
    FirstBranch { second: GridPos },
    SecondBranch,
}

/// A suspended scan of `pos`, entered from the neighbouring cell `from`.
#[derive(Debug, Clone, Copy)]
struct JumpSnapshot {
    pos: GridPos,
    from: GridPos,
    stage: Stage,
}

impl<'a, G: Grid> JumpScan<'a, G> {
    pub(crate) fn new(grid: &'a G, end: GridPos, movement: DiagonalMovement) -> Self {
        Self {
            grid,
            end,
            movement,
        }
    }

    fn jump_from(&self, pos: GridPos, from: GridPos, iteration: IterationType) -> Option<GridPos> {
        match iteration {
            IterationType::Loop => self.jump_loop(pos, from),
            IterationType::Recursive => self.jump(pos, from),
        }
    }

    #[inline]
    fn walkable(&self, x: i32, y: i32) -> bool {
        self.grid.is_walkable_at(GridPos::new(x, y))
    }

    /// Whether `pos`, reached travelling in direction `d`, has a neighbour
    /// that only a path through `pos` reaches optimally.
    fn forced(&self, pos: GridPos, d: GridPos) -> bool {
        let GridPos { x, y } = pos;
        let GridPos { x: dx, y: dy } = d;
        let w = |x, y| self.walkable(x, y);
        match self.movement {
            DiagonalMovement::Always | DiagonalMovement::IfAtLeastOneWalkable => {
                if dx != 0 && dy != 0 {
                    (w(x - dx, y + dy) && !w(x - dx, y)) || (w(x + dx, y - dy) && !w(x, y - dy))
                } else if dx != 0 {
                    (w(x + dx, y + 1) && !w(x, y + 1)) || (w(x + dx, y - 1) && !w(x, y - 1))
                } else {
                    (w(x + 1, y + dy) && !w(x + 1, y)) || (w(x - 1, y + dy) && !w(x - 1, y))
                }
            }
            DiagonalMovement::OnlyWhenNoObstacles => {
                if dx != 0 && dy != 0 {
                    w(x + dx, y + dy) && (!w(x, y + dy) || !w(x + dx, y))
                } else if dx != 0 {
                    (w(x, y + 1) && !w(x - dx, y + 1)) || (w(x, y - 1) && !w(x - dx, y - 1))
                } else {
                    (w(x + 1, y) && !w(x + 1, y - dy)) || (w(x - 1, y) && !w(x - 1, y - dy))
                }
            }
            DiagonalMovement::Never => {
                if dx != 0 && dy != 0 {
                    false
                } else if dx != 0 {
                    (w(x, y - 1) && !w(x - dx, y - 1)) || (w(x, y + 1) && !w(x - dx, y + 1))
                } else {
                    (w(x - 1, y) && !w(x - 1, y - dy)) || (w(x + 1, y) && !w(x + 1, y - dy))
                }
            }
        }
    }

    /// Side scans to run from `pos` before continuing, first then second.
    ///
    /// Diagonal travel scans its horizontal then vertical component. Without
    /// diagonals, vertical travel scans right then left.
    fn branches(&self, pos: GridPos, d: GridPos) -> Option<(GridPos, GridPos)> {
        if d.x != 0 && d.y != 0 {
            Some((pos.translate(d.x, 0), pos.translate(0, d.y)))
        } else if self.movement == DiagonalMovement::Never && d.x == 0 {
            Some((pos.translate(1, 0), pos.translate(-1, 0)))
        } else {
            None
        }
    }

    /// Whether the scan may step from `pos` on to `pos + d`.
    fn can_continue(&self, pos: GridPos, d: GridPos) -> bool {
        if d.x != 0 && d.y != 0 {
            self.movement.allows(
                self.walkable(pos.x + d.x, pos.y),
                self.walkable(pos.x, pos.y + d.y),
            )
        } else {
            true
        }
    }

    /// Recursive scan of `pos`, entered from `from`.
    ///
    /// Past [`MAX_JUMP_DEPTH`] frames the rest of the scan is handed to
    /// [`jump_loop`](Self::jump_loop), which follows the same rules.
    pub(crate) fn jump(&self, pos: GridPos, from: GridPos) -> Option<GridPos> {
        self.jump_at_depth(pos, from, 0)
    }

    fn jump_at_depth(&self, pos: GridPos, from: GridPos, depth: usize) -> Option<GridPos> {
        if depth >= MAX_JUMP_DEPTH {
            log::trace!("jump: depth limit at {pos}, continuing iteratively");
            return self.jump_loop(pos, from);
        }
        if !self.grid.is_walkable_at(pos) {
            return None;
        }
        if pos == self.end {
            return Some(pos);
        }
        let d = from.direction_to(pos);
        if self.forced(pos, d) {
            return Some(pos);
        }
        if let Some((first, second)) = self.branches(pos, d) {
            if self.jump_at_depth(first, pos, depth + 1).is_some()
                || self.jump_at_depth(second, pos, depth + 1).is_some()
            {
                return Some(pos);
            }
        }
        if self.can_continue(pos, d) {
            self.jump_at_depth(pos + d, pos, depth + 1)
        } else {
            None
        }
    }

    /// Same scan as [`jump`](Self::jump) driven by an explicit stack.
    ///
    /// `found` carries the result of the frame that just finished back to
    /// its caller. A frame whose result is simply that of its continuation
    /// is replaced by the continuation instead of waiting for it.
    pub(crate) fn jump_loop(&self, pos: GridPos, from: GridPos) -> Option<GridPos> {
        let mut stack = vec![JumpSnapshot {
            pos,
            from,
            stage: Stage::Enter,
        }];
        let mut found = None;

        while let Some(frame) = stack.pop() {
            let JumpSnapshot { pos, from, stage } = frame;
            let d = from.direction_to(pos);
            match stage {
                Stage::Enter => {
                    if !self.grid.is_walkable_at(pos) {
                        found = None;
                        continue;
                    }
                    if pos == self.end || self.forced(pos, d) {
                        found = Some(pos);
                        continue;
                    }
                    if let Some((first, second)) = self.branches(pos, d) {
                        stack.push(JumpSnapshot {
                            stage: Stage::FirstBranch { second },
                            ..frame
                        });
                        stack.push(JumpSnapshot {
                            pos: first,
                            from: pos,
                            stage: Stage::Enter,
                        });
                        continue;
                    }
                }
                Stage::FirstBranch { second } => {
                    if found.is_some() {
                        found = Some(pos);
                        continue;
                    }
                    stack.push(JumpSnapshot {
                        stage: Stage::SecondBranch,
                        ..frame
                    });
                    stack.push(JumpSnapshot {
                        pos: second,
                        from: pos,
                        stage: Stage::Enter,
                    });
                    continue;
                }
                Stage::SecondBranch => {
                    if found.is_some() {
                        found = Some(pos);
                        continue;
                    }
                }
            }

            // Branches, if any, found nothing: continue the ray.
            if self.can_continue(pos, d) {
                stack.push(JumpSnapshot {
                    pos: pos + d,
                    from: pos,
                    stage: Stage::Enter,
                });
            } else {
                found = None;
            }
        }
        found
    }
}
