//! Error types used by the crate.
//!
//! Errors are reserved for problems that make validation impossible. Topological defects of the validated geometry
//! are never errors, they are reported as [`ValidationEvent`](crate::event::ValidationEvent)s.

use geotopo_types::Crs;
use thiserror::Error;

use crate::predicates::PredicateError;

/// Error aborting a validation run.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// An envelope was given for validation. Envelopes are not geometric primitives.
    #[error("envelope is not a validatable geometry")]
    EnvelopeNotValidatable,
    /// Solids cannot be validated.
    #[error("validation of solids is not available")]
    SolidNotSupported,
    /// Planar predicate could not be evaluated.
    #[error("failed to evaluate planar predicate: {0}")]
    PredicateEvaluation(#[from] PredicateError),
    /// Invalid validator configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

/// Error of the CRS dimension check.
#[derive(Debug, Error, PartialEq)]
pub enum CrsError {
    /// Coordinate dimension of the geometry does not match the dimension of its CRS.
    #[error("geometry has {actual} coordinates per point, but CRS {crs} is {expected}-dimensional")]
    DimensionMismatch {
        /// CRS of the geometry.
        crs: Crs,
        /// Dimension of the CRS.
        expected: usize,
        /// Coordinate dimension of the geometry.
        actual: usize,
    },
}
