//! Query parameters: a grid, two endpoints and the search settings.

use gridpath_core::GridPos;

use crate::grid::Grid;
use crate::heuristic::{HeuristicFn, HeuristicMode};
use crate::movement::DiagonalMovement;
use crate::node::Node;
use crate::open_list::OpenList;

/// How the jump scan of [`JumpPointParam`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IterationType {
    /// Explicit work stack; depth is bounded only by memory.
    #[default]
    Loop,
    /// Plain recursion; depth grows with the length of each scanned ray.
    Recursive,
}

/// What jump point search does when the goal cell is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndNodeUnwalkable {
    /// Treat the goal as walkable for the duration of the query.
    #[default]
    Allow,
    /// Leave it blocked; the goal is then unreachable.
    Disallow,
}

/// Settings shared by both engines, loadable from a config file with the
/// `serde` feature.
///
/// `weight` only affects A\*; `iteration` and `end_node_unwalkable` only
/// affect jump point search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub diagonal_movement: DiagonalMovement,
    pub heuristic: HeuristicMode,
    pub weight: f64,
    pub iteration: IterationType,
    pub end_node_unwalkable: EndNodeUnwalkable,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            diagonal_movement: DiagonalMovement::default(),
            heuristic: HeuristicMode::default(),
            weight: 1.0,
            iteration: IterationType::default(),
            end_node_unwalkable: EndNodeUnwalkable::default(),
        }
    }
}

/// State common to every query: the grid searched, the endpoints and the
/// movement and heuristic settings.
///
/// An endpoint the grid holds no node for (an unwalkable cell of a sparse
/// grid, or a position off a dense grid) gets a standalone walkable node
/// owned by the parameters, so a search can still start there.
#[derive(Debug, Clone)]
pub struct ParamBase<G> {
    grid: G,
    endpoints: Option<(GridPos, GridPos)>,
    detached: Vec<Node>,
    diagonal_movement: DiagonalMovement,
    heuristic_mode: HeuristicMode,
    heuristic: HeuristicFn,
}

impl<G: Grid> ParamBase<G> {
    /// Parameters bound to `start` and `end` on `grid`.
    pub fn new(
        grid: G,
        start: GridPos,
        end: GridPos,
        diagonal_movement: DiagonalMovement,
        heuristic: HeuristicMode,
    ) -> Self {
        let mut param = Self::unbound(grid, diagonal_movement, heuristic);
        param.bind(start, end);
        param
    }

    /// Parameters without endpoints; call [`reset`](Self::reset) before
    /// searching.
    pub fn unbound(grid: G, diagonal_movement: DiagonalMovement, heuristic: HeuristicMode) -> Self {
        Self {
            grid,
            endpoints: None,
            detached: Vec::new(),
            diagonal_movement,
            heuristic_mode: heuristic,
            heuristic: heuristic.function(),
        }
    }

    /// Prepare for a new query: optionally swap the grid, clear the search
    /// state of every node and bind new endpoints.
    pub fn reset(&mut self, start: GridPos, end: GridPos, grid: Option<G>) {
        if let Some(grid) = grid {
            self.grid = grid;
        }
        self.grid.reset();
        self.bind(start, end);
    }

    fn bind(&mut self, start: GridPos, end: GridPos) {
        self.detached.clear();
        for pos in [start, end] {
            if self.grid.node_at(pos).is_none() && !self.detached.iter().any(|n| n.pos == pos) {
                self.detached.push(Node::new(pos, true));
            }
        }
        self.endpoints = Some((start, end));
    }

    /// The grid searched.
    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Mutable access to the grid, e.g. to change walkability between queries.
    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    /// Give the grid back, dropping the parameters.
    pub fn into_grid(self) -> G {
        self.grid
    }

    /// Start position, or `None` if unbound.
    pub fn start(&self) -> Option<GridPos> {
        self.endpoints.map(|(start, _)| start)
    }

    /// Goal position, or `None` if unbound.
    pub fn end(&self) -> Option<GridPos> {
        self.endpoints.map(|(_, end)| end)
    }

    pub(crate) fn endpoints(&self) -> Option<(GridPos, GridPos)> {
        self.endpoints
    }

    /// Copy of the start node.
    pub fn start_node(&self) -> Option<Node> {
        self.start().and_then(|p| self.node(p))
    }

    /// Copy of the goal node, carrying its parent link after a search.
    pub fn end_node(&self) -> Option<Node> {
        self.end().and_then(|p| self.node(p))
    }

    /// The node searched at `pos`: the grid's if it has one, otherwise a
    /// standalone endpoint node.
    pub fn node(&self, pos: GridPos) -> Option<Node> {
        self.grid
            .node_at(pos)
            .or_else(|| self.detached.iter().find(|n| n.pos == pos).copied())
    }

    /// Write `node` back to wherever [`node`](Self::node) found it.
    pub(crate) fn store(&mut self, node: Node) {
        if let Some(mut slot) = self.grid.node_at_mut(node.pos) {
            *slot = node;
            return;
        }
        if let Some(slot) = self.detached.iter_mut().find(|n| n.pos == node.pos) {
            *slot = node;
        }
    }

    /// Follow parent links back from `end` and return the chain start first.
    pub(crate) fn backtrace(&self, end: GridPos) -> Vec<GridPos> {
        let mut path = vec![end];
        let mut cur = self.node(end).and_then(|n| n.parent);
        while let Some(pos) = cur {
            path.push(pos);
            cur = self.node(pos).and_then(|n| n.parent);
        }
        path.reverse();
        path
    }

    /// When a search may step diagonally.
    pub fn diagonal_movement(&self) -> DiagonalMovement {
        self.diagonal_movement
    }

    /// Change the diagonal policy for later searches.
    pub fn set_diagonal_movement(&mut self, movement: DiagonalMovement) {
        self.diagonal_movement = movement;
    }

    /// The estimator selected.
    pub fn heuristic_mode(&self) -> HeuristicMode {
        self.heuristic_mode
    }

    /// The estimator function, resolved from [`heuristic_mode`](Self::heuristic_mode).
    pub fn heuristic(&self) -> HeuristicFn {
        self.heuristic
    }

    /// Select a different estimator.
    pub fn set_heuristic(&mut self, mode: HeuristicMode) {
        self.heuristic_mode = mode;
        self.heuristic = mode.function();
    }
}

/// Parameters for [`AStarParam::find_path`].
#[derive(Debug, Clone)]
pub struct AStarParam<G> {
    base: ParamBase<G>,
    weight: f64,
}

impl<G: Grid> AStarParam<G> {
    /// `weight` scales the heuristic; values above 1 favour speed over
    /// optimality.
    pub fn new(
        grid: G,
        start: GridPos,
        end: GridPos,
        weight: f64,
        diagonal_movement: DiagonalMovement,
        heuristic: HeuristicMode,
    ) -> Self {
        Self {
            base: ParamBase::new(grid, start, end, diagonal_movement, heuristic),
            weight,
        }
    }

    /// A* parameters without endpoints.
    pub fn unbound(
        grid: G,
        weight: f64,
        diagonal_movement: DiagonalMovement,
        heuristic: HeuristicMode,
    ) -> Self {
        Self {
            base: ParamBase::unbound(grid, diagonal_movement, heuristic),
            weight,
        }
    }

    /// Parameters taking their settings from `config`.
    pub fn with_config(grid: G, start: GridPos, end: GridPos, config: &SearchConfig) -> Self {
        Self::new(
            grid,
            start,
            end,
            config.weight,
            config.diagonal_movement,
            config.heuristic,
        )
    }

    /// See [`ParamBase::reset`].
    pub fn reset(&mut self, start: GridPos, end: GridPos, grid: Option<G>) {
        self.base.reset(start, end, grid);
    }

    /// Grid, endpoints and settings shared with every search.
    pub fn base(&self) -> &ParamBase<G> {
        &self.base
    }

    /// Mutable access to the shared state.
    pub fn base_mut(&mut self) -> &mut ParamBase<G> {
        &mut self.base
    }

    /// Heuristic scale factor.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Change the heuristic scale factor.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

/// Parameters for [`JumpPointParam::find_path`].
///
/// Cloning copies the pending open list along with the grid.
#[derive(Debug, Clone)]
pub struct JumpPointParam<G> {
    base: ParamBase<G>,
    end_node_unwalkable: EndNodeUnwalkable,
    iteration: IterationType,
    pub(crate) open_list: OpenList,
}

impl<G: Grid> JumpPointParam<G> {
    /// `end_node_unwalkable` decides whether a blocked goal is searched
    /// as if it were open.
    pub fn new(
        grid: G,
        start: GridPos,
        end: GridPos,
        end_node_unwalkable: EndNodeUnwalkable,
        diagonal_movement: DiagonalMovement,
        heuristic: HeuristicMode,
    ) -> Self {
        Self {
            base: ParamBase::new(grid, start, end, diagonal_movement, heuristic),
            end_node_unwalkable,
            iteration: IterationType::default(),
            open_list: OpenList::new(),
        }
    }

    /// Jump point parameters without endpoints.
    pub fn unbound(
        grid: G,
        end_node_unwalkable: EndNodeUnwalkable,
        diagonal_movement: DiagonalMovement,
        heuristic: HeuristicMode,
    ) -> Self {
        Self {
            base: ParamBase::unbound(grid, diagonal_movement, heuristic),
            end_node_unwalkable,
            iteration: IterationType::default(),
            open_list: OpenList::new(),
        }
    }

    /// Parameters taking their settings, scan form included, from `config`.
    pub fn with_config(grid: G, start: GridPos, end: GridPos, config: &SearchConfig) -> Self {
        let mut param = Self::new(
            grid,
            start,
            end,
            config.end_node_unwalkable,
            config.diagonal_movement,
            config.heuristic,
        );
        param.iteration = config.iteration;
        param
    }

    /// Like [`ParamBase::reset`], and also empties the open list.
    pub fn reset(&mut self, start: GridPos, end: GridPos, grid: Option<G>) {
        self.open_list.clear();
        self.base.reset(start, end, grid);
    }

    /// Grid, endpoints and settings shared with every search.
    pub fn base(&self) -> &ParamBase<G> {
        &self.base
    }

    /// Mutable access to the shared state.
    pub fn base_mut(&mut self) -> &mut ParamBase<G> {
        &mut self.base
    }

    /// Whether a blocked goal is searched as walkable.
    pub fn end_node_unwalkable(&self) -> EndNodeUnwalkable {
        self.end_node_unwalkable
    }

    /// Change the blocked-goal policy.
    pub fn set_end_node_unwalkable(&mut self, treatment: EndNodeUnwalkable) {
        self.end_node_unwalkable = treatment;
    }

    /// Which jump scan is used.
    pub fn iteration(&self) -> IterationType {
        self.iteration
    }

    /// Pick the recursive or the stack-based jump scan.
    pub fn set_iteration(&mut self, iteration: IterationType) {
        self.iteration = iteration;
    }

    /// Entries left pending by the last search.
    pub fn open_list(&self) -> &OpenList {
        &self.open_list
    }
}
