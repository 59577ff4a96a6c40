use gridpath_core::GridPos;

/// Where a node stands in the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unvisited,
    Opened,
    Closed,
}

/// Per-cell search state.
///
/// Nodes live inside a grid's storage and are addressed by position; the
/// `parent` link is the position of the predecessor, so the parent chain
/// is a tree of back-references rather than owned pointers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub pos: GridPos,
    pub walkable: bool,
    /// Accumulated cost from the start (`g`).
    pub g: f64,
    /// Cached heuristic estimate to the goal (`h`). `None` until first
    /// computed; zero is a legitimate estimate.
    pub h: Option<f64>,
    /// `g + h`, the open-list key (`f`).
    pub f: f64,
    pub opened: bool,
    pub closed: bool,
    pub parent: Option<GridPos>,
}

impl Node {
    /// Create an unvisited node.
    pub const fn new(pos: GridPos, walkable: bool) -> Self {
        Self {
            pos,
            walkable,
            g: 0.0,
            h: None,
            f: 0.0,
            opened: false,
            closed: false,
            parent: None,
        }
    }

    #[inline]
    pub const fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub const fn y(&self) -> i32 {
        self.pos.y
    }

    /// Clear all search state and set walkability.
    pub fn reset(&mut self, walkable: bool) {
        *self = Self::new(self.pos, walkable);
    }

    pub const fn state(&self) -> NodeState {
        if self.closed {
            NodeState::Closed
        } else if self.opened {
            NodeState::Opened
        } else {
            NodeState::Unvisited
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_is_unvisited() {
        let n = Node::new(GridPos::new(2, 3), true);
        assert_eq!((n.x(), n.y()), (2, 3));
        assert_eq!(n.state(), NodeState::Unvisited);
        assert_eq!(n.h, None);
        assert_eq!(n.parent, None);
    }

    #[test]
    fn state_follows_flags() {
        let mut n = Node::new(GridPos::ZERO, true);
        n.opened = true;
        assert_eq!(n.state(), NodeState::Opened);
        n.closed = true;
        assert_eq!(n.state(), NodeState::Closed);
    }

    #[test]
    fn reset_clears_search_state() {
        let mut n = Node::new(GridPos::new(1, 1), true);
        n.g = 4.0;
        n.h = Some(0.0);
        n.f = 4.0;
        n.opened = true;
        n.closed = true;
        n.parent = Some(GridPos::new(0, 0));

        n.reset(false);
        assert_eq!(n, Node::new(GridPos::new(1, 1), false));
    }
}
