//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// A point sequence has fewer points than the geometry type requires.
    #[error("expected at least {expected} points, got {actual}")]
    TooFewPoints {
        /// Required number of points.
        expected: usize,
        /// Number of points given.
        actual: usize,
    },
    /// Curve without segments.
    #[error("curve must have at least one segment")]
    EmptyCurve,
    /// Surface without patches.
    #[error("surface must have at least one patch")]
    EmptySurface,
    /// Arc string point count is not `2 * n + 1`.
    #[error("arc string must have an odd number of at least 3 points, got {0}")]
    InvalidArcString(usize),
    /// Linearization criterion cannot produce a valid approximation.
    #[error("invalid linearization criterion: {0}")]
    InvalidCriterion(String),
    /// CRS identifier could not be parsed.
    #[error("invalid CRS identifier: {0}")]
    InvalidCrs(String),
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
}
