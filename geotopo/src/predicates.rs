//! Planar topological predicates used by the validator.
//!
//! All predicates work on linearized 2d coordinates. [`GeoPredicates`] implements them with the
//! [`geo`] crate; other implementations can be plugged into the validator through [`PlanarPredicates`].

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::algorithm::relate::IntersectionMatrix;
use geo::{Coord, Line, LineString, Polygon, Relate, Winding};
use thiserror::Error;

/// DE-9IM pattern of two line strings that meet only in isolated points.
const POINT_CONTACT: &str = "0********";
/// DE-9IM pattern of two overlapping areas.
const AREA_OVERLAP: &str = "T*T***T**";

/// Error evaluating a planar predicate.
#[derive(Debug, Error, PartialEq)]
pub enum PredicateError {
    /// Ring has fewer than 4 points.
    #[error("ring must have at least 4 points, got {0}")]
    RingTooShort(usize),
    /// First and last points of a ring differ.
    #[error("ring is not closed")]
    RingNotClosed,
    /// Coordinate is NaN or infinite.
    #[error("coordinate is not finite")]
    NonFiniteCoordinate,
    /// Relation between geometries could not be computed.
    #[error("failed to compute relation: {0}")]
    Relate(String),
}

/// Closed planar ring, ready for predicate evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarRing {
    line: LineString<f64>,
    area: Polygon<f64>,
}

impl PlanarRing {
    /// Creates a new ring. The sequence must have at least 4 finite coordinates, the first equal to the last.
    pub fn new(coords: Vec<Coord<f64>>) -> Result<Self, PredicateError> {
        if coords.len() < 4 {
            return Err(PredicateError::RingTooShort(coords.len()));
        }

        if !coords.iter().all(is_finite) {
            return Err(PredicateError::NonFiniteCoordinate);
        }

        if coords.first() != coords.last() {
            return Err(PredicateError::RingNotClosed);
        }

        let line = LineString::new(coords);
        let area = Polygon::new(line.clone(), vec![]);
        Ok(Self { line, area })
    }

    /// Coordinates of the ring.
    pub fn coords(&self) -> &[Coord<f64>] {
        &self.line.0
    }
}

/// Boundary to the planar geometry library.
pub trait PlanarPredicates {
    /// Returns `None` if the coordinate sequence is simple, otherwise the first found location where it is not.
    ///
    /// Consecutive repeated coordinates are ignored. Adjacent segments may share only their common vertex, and a
    /// closed sequence may touch itself only at the closing point.
    fn is_simple(&self, coords: &[Coord<f64>]) -> Result<Option<Coord<f64>>, PredicateError>;

    /// Returns true if the ring is oriented counter-clockwise.
    fn is_ccw(&self, ring: &PlanarRing) -> Result<bool, PredicateError>;

    /// Returns true if the rings meet only in isolated points and the areas they bound do not overlap.
    fn touches(&self, a: &PlanarRing, b: &PlanarRing) -> Result<bool, PredicateError>;

    /// Returns true if the rings meet in a way other than touching.
    fn intersects(&self, a: &PlanarRing, b: &PlanarRing) -> Result<bool, PredicateError>;

    /// Returns true if the ring `a` lies within the area bounded by the ring `b`.
    fn within(&self, a: &PlanarRing, b: &PlanarRing) -> Result<bool, PredicateError>;
}

/// Predicates implemented with the `geo` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoPredicates;

impl GeoPredicates {
    fn meet(a: &PlanarRing, b: &PlanarRing) -> Result<(bool, bool), PredicateError> {
        let matrix = a.line.relate(&b.line);
        if !matrix.is_intersects() {
            return Ok((false, false));
        }

        let point_contact = matches(&matrix, POINT_CONTACT)?;
        let touching = point_contact && !matches(&a.area.relate(&b.area), AREA_OVERLAP)?;

        Ok((true, touching))
    }
}

impl PlanarPredicates for GeoPredicates {
    fn is_simple(&self, coords: &[Coord<f64>]) -> Result<Option<Coord<f64>>, PredicateError> {
        if !coords.iter().all(is_finite) {
            return Err(PredicateError::NonFiniteCoordinate);
        }

        let mut points = coords.to_vec();
        points.dedup();
        if points.len() < 3 {
            return Ok(None);
        }

        let closed = points.len() > 3 && points.first() == points.last();
        let lines: Vec<Line<f64>> = points.windows(2).map(|w| Line::new(w[0], w[1])).collect();
        let count = lines.len();

        for i in 0..count {
            for j in (i + 1)..count {
                let Some(intersection) = line_intersection(lines[i], lines[j]) else {
                    continue;
                };

                match intersection {
                    LineIntersection::SinglePoint { intersection, .. } => {
                        let shared_vertex = j == i + 1 && intersection == lines[i].end;
                        let closing_point =
                            closed && i == 0 && j == count - 1 && intersection == lines[i].start;
                        if !shared_vertex && !closing_point {
                            log::debug!("Sequence is not simple at {intersection:?}");
                            return Ok(Some(intersection));
                        }
                    }
                    LineIntersection::Collinear { intersection } => {
                        log::debug!("Segments {i} and {j} overlap");
                        return Ok(Some(intersection.start));
                    }
                }
            }
        }

        Ok(None)
    }

    fn is_ccw(&self, ring: &PlanarRing) -> Result<bool, PredicateError> {
        Ok(ring.line.is_ccw())
    }

    fn touches(&self, a: &PlanarRing, b: &PlanarRing) -> Result<bool, PredicateError> {
        let (_, touching) = Self::meet(a, b)?;
        Ok(touching)
    }

    fn intersects(&self, a: &PlanarRing, b: &PlanarRing) -> Result<bool, PredicateError> {
        let (meeting, touching) = Self::meet(a, b)?;
        Ok(meeting && !touching)
    }

    fn within(&self, a: &PlanarRing, b: &PlanarRing) -> Result<bool, PredicateError> {
        Ok(a.line.relate(&b.area).is_within())
    }
}

fn matches(matrix: &IntersectionMatrix, pattern: &str) -> Result<bool, PredicateError> {
    matrix
        .matches(pattern)
        .map_err(|err| PredicateError::Relate(format!("{err:?}")))
}

fn is_finite(coord: &Coord<f64>) -> bool {
    coord.x.is_finite() && coord.y.is_finite()
}
