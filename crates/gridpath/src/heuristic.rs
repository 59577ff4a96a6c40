//! Distance estimators over per-axis deltas.
//!
//! Every estimator takes the raw `(dx, dy)` between two cells and is
//! independent of sign.

/// Signature shared by the estimators.
pub type HeuristicFn = fn(i32, i32) -> f64;

/// Manhattan (L1) distance.
#[inline]
pub fn manhattan(dx: i32, dy: i32) -> f64 {
    f64::from(dx.abs()) + f64::from(dy.abs())
}

/// Euclidean (L2) distance.
#[inline]
pub fn euclidean(dx: i32, dy: i32) -> f64 {
    euclidean_squared(dx, dy).sqrt()
}

/// Squared Euclidean distance. Not admissible; trades optimality for speed.
#[inline]
pub fn euclidean_squared(dx: i32, dy: i32) -> f64 {
    let (dx, dy) = (f64::from(dx), f64::from(dy));
    dx * dx + dy * dy
}

/// Chebyshev (L∞) distance.
#[inline]
pub fn chebyshev(dx: i32, dy: i32) -> f64 {
    f64::from(dx.abs().max(dy.abs()))
}

/// Selects one of the estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicMode {
    Manhattan,
    #[default]
    Euclidean,
    EuclideanSquared,
    Chebyshev,
}

impl HeuristicMode {
    /// The estimator this mode stands for.
    pub fn function(self) -> HeuristicFn {
        match self {
            Self::Manhattan => manhattan,
            Self::Euclidean => euclidean,
            Self::EuclideanSquared => euclidean_squared,
            Self::Chebyshev => chebyshev,
        }
    }

    /// Evaluate the estimator directly.
    #[inline]
    pub fn distance(self, dx: i32, dy: i32) -> f64 {
        (self.function())(dx, dy)
    }
}
