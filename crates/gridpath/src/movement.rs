/// When a diagonal step between two cells is allowed.
///
/// A diagonal step is flanked by the two orthogonal cells it cuts past.
/// The policy decides how many of those flanks must be walkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagonalMovement {
    /// Diagonals are allowed even when both flanks are blocked.
    #[default]
    Always,
    /// Only orthogonal steps.
    Never,
    /// At least one flank must be walkable.
    IfAtLeastOneWalkable,
    /// Both flanks must be walkable.
    OnlyWhenNoObstacles,
}

impl DiagonalMovement {
    /// Derive a policy from the two corner-crossing switches.
    ///
    /// `cross_corner` allows cutting past a single blocked flank,
    /// `cross_adjacent_point` allows squeezing between two blocked flanks.
    pub const fn from_flags(cross_corner: bool, cross_adjacent_point: bool) -> Self {
        match (cross_corner, cross_adjacent_point) {
            (true, true) => Self::Always,
            (true, false) => Self::IfAtLeastOneWalkable,
            (false, true) => Self::OnlyWhenNoObstacles,
            (false, false) => Self::Never,
        }
    }

    /// Whether a diagonal whose flanks have walkability `a` and `b` is a
    /// candidate step. The target cell itself is checked separately.
    #[inline]
    pub const fn allows(self, a: bool, b: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::IfAtLeastOneWalkable => a || b,
            Self::OnlyWhenNoObstacles => a && b,
        }
    }
}
