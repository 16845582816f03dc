//! Approximation of curved segments with straight ones.
//!
//! [`CurveLinearizer`] converts any [`Curve`] into a curve consisting only of [`LineStringSegment`]s. The fidelity
//! of the approximation is controlled by a [`LinearizationCriterion`].
//!
//! ```
//! use geotopo_types::linearization::{CurveLinearizer, LinearizationCriterion};
//! use geotopo_types::{Arc, Curve, Point};
//!
//! let arc = Arc::new(Point::new(-1.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 0.0));
//! let curve = Curve::new(vec![arc.into()])?;
//!
//! let linear = CurveLinearizer.linearize(&curve, &LinearizationCriterion::NumPoints(10));
//! assert!(linear.is_linear());
//! # Ok::<(), geotopo_types::error::GeometryError>(())
//! ```

pub mod arc;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::point::Point;
use crate::segment::{Arc, ArcString, Circle, Curve, CurveSegment, LineStringSegment};

/// Upper bound of the number of points generated for one arc, whatever the criterion says.
///
/// Ring simplicity is checked over every pair of segments, so validation cost grows with the square of this value.
pub const POINTS_LIMIT: usize = 1 << 14;

/// Defines how closely the linearized curve follows the original one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LinearizationCriterion {
    /// Fixed number of points per curved segment (per arc for arc strings).
    NumPoints(usize),
    /// Maximum distance between the original arc and its approximation.
    ///
    /// Small errors on large arcs produce many points, and the planar checks of a ring are quadratic in its number
    /// of points. Set `max_points` to keep validation time bounded; the count is never above [`POINTS_LIMIT`].
    MaxError {
        /// Maximum allowed error in CRS units.
        max_error: f64,
        /// Maximum number of points per arc, `0` for no limit.
        max_points: usize,
    },
}

impl LinearizationCriterion {
    /// Checks that the criterion can produce a valid approximation.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match *self {
            LinearizationCriterion::NumPoints(n) if n < 2 => Err(GeometryError::InvalidCriterion(
                format!("at least 2 points per segment are required, got {n}"),
            )),
            LinearizationCriterion::MaxError { max_error, .. }
                if !max_error.is_finite() || max_error <= 0.0 =>
            {
                Err(GeometryError::InvalidCriterion(format!(
                    "maximum error must be a positive number, got {max_error}"
                )))
            }
            LinearizationCriterion::MaxError { max_points, .. } if max_points == 1 => Err(
                GeometryError::InvalidCriterion("maximum number of points cannot be 1".into()),
            ),
            _ => Ok(()),
        }
    }

    fn num_points(&self, p0: &Point, p1: &Point, p2: &Point, is_circle: bool) -> usize {
        let num_points = match *self {
            LinearizationCriterion::NumPoints(n) => n,
            LinearizationCriterion::MaxError {
                max_error,
                max_points,
            } => {
                let num_points = arc::num_points_for_error(p0, p1, p2, is_circle, max_error)
                    .unwrap_or(2);
                log::debug!("Using {num_points} points for segment linearization");
                if max_points > 0 {
                    num_points.min(max_points)
                } else {
                    num_points
                }
            }
        };

        if num_points > POINTS_LIMIT {
            log::warn!(
                "Linearization would generate {num_points} points for one arc, limiting to {POINTS_LIMIT}"
            );
        }

        num_points.clamp(2, POINTS_LIMIT)
    }
}

impl Default for LinearizationCriterion {
    fn default() -> Self {
        Self::NumPoints(150)
    }
}

/// Converts curves into curves consisting of straight segments only.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurveLinearizer;

impl CurveLinearizer {
    /// Returns a curve with every segment replaced by its linear approximation. Line string segments are copied
    /// as is. Start and end points of every segment are preserved exactly.
    pub fn linearize(&self, curve: &Curve, criterion: &LinearizationCriterion) -> Curve {
        Curve::new_unchecked(
            curve
                .segments()
                .iter()
                .map(|segment| self.linearize_segment(segment, criterion).into())
                .collect(),
        )
    }

    /// Returns the linear approximation of one segment.
    pub fn linearize_segment(
        &self,
        segment: &CurveSegment,
        criterion: &LinearizationCriterion,
    ) -> LineStringSegment {
        match segment {
            CurveSegment::LineString(v) => v.clone(),
            CurveSegment::Arc(v) => self.linearize_arc(v, criterion),
            CurveSegment::Circle(v) => self.linearize_circle(v, criterion),
            CurveSegment::ArcString(v) => self.linearize_arc_string(v, criterion),
        }
    }

    /// Linear approximation of an arc. If the arc points are collinear, the result is the straight line between
    /// the start and end points.
    pub fn linearize_arc(&self, arc: &Arc, criterion: &LinearizationCriterion) -> LineStringSegment {
        LineStringSegment::new_unchecked(Self::arc_points(
            &arc.start, &arc.mid, &arc.end, criterion,
        ))
    }

    /// Linear approximation of a circle. If the circle points are collinear, the result goes from the first to the
    /// second point and back.
    pub fn linearize_circle(
        &self,
        circle: &Circle,
        criterion: &LinearizationCriterion,
    ) -> LineStringSegment {
        let (p1, p2, p3) = (&circle.p1, &circle.p2, &circle.p3);
        let points = if arc::are_collinear(p1, p2, p3) {
            vec![*p1, *p2, *p1]
        } else {
            let num_points = criterion.num_points(p1, p2, p3, true);
            arc::interpolate(p1, p2, p3, num_points, true).unwrap_or_else(|| vec![*p1, *p2, *p1])
        };

        LineStringSegment::new_unchecked(points)
    }

    /// Linear approximation of an arc string. Points shared by consecutive arcs appear only once.
    pub fn linearize_arc_string(
        &self,
        arc_string: &ArcString,
        criterion: &LinearizationCriterion,
    ) -> LineStringSegment {
        let mut points = vec![arc_string.points()[0]];
        for arc in arc_string.arcs() {
            let arc_points = if arc::are_collinear(&arc.start, &arc.mid, &arc.end) {
                vec![arc.start, arc.mid, arc.end]
            } else {
                Self::arc_points(&arc.start, &arc.mid, &arc.end, criterion)
            };
            points.extend(arc_points.into_iter().skip(1));
        }

        LineStringSegment::new_unchecked(points)
    }

    fn arc_points(
        start: &Point,
        mid: &Point,
        end: &Point,
        criterion: &LinearizationCriterion,
    ) -> Vec<Point> {
        if arc::are_collinear(start, mid, end) {
            return vec![*start, *end];
        }

        let num_points = criterion.num_points(start, mid, end, false);
        arc::interpolate(start, mid, end, num_points, false).unwrap_or_else(|| vec![*start, *end])
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn line_strings_are_unchanged() {
        let curve = Curve::line_string(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ])
        .expect("valid curve");
        let linear = CurveLinearizer.linearize(&curve, &LinearizationCriterion::default());
        assert_eq!(linear, curve);
    }

    #[test]
    fn arc_with_num_points() {
        let arc = Arc::new(
            Point::new(2.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        );
        let segment = CurveLinearizer.linearize_arc(&arc, &LinearizationCriterion::NumPoints(15));
        let points = segment.points();

        assert_eq!(points.len(), 15);
        assert_eq!(points[0], arc.start);
        assert_eq!(points[14], arc.end);
        for p in points {
            let dist = ((p.x() - 1.0).powi(2) + p.y().powi(2)).sqrt();
            assert_abs_diff_eq!(dist, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn collinear_arc() {
        let arc = Arc::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        );
        let segment = CurveLinearizer.linearize_arc(&arc, &LinearizationCriterion::NumPoints(15));
        assert_eq!(segment.points(), &[arc.start, arc.end]);
    }

    #[test]
    fn collinear_circle() {
        let circle = Circle::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        );
        let segment =
            CurveLinearizer.linearize_circle(&circle, &LinearizationCriterion::NumPoints(15));
        assert_eq!(segment.points(), &[circle.p1, circle.p2, circle.p1]);
    }

    #[test]
    fn circle_is_closed() {
        let circle = Circle::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        );
        let curve = Curve::new(vec![circle.into()]).expect("valid curve");
        let linear = CurveLinearizer.linearize(&curve, &LinearizationCriterion::NumPoints(20));

        assert!(linear.is_linear());
        assert!(linear.is_closed());
        let CurveSegment::LineString(segment) = &linear.segments()[0] else {
            panic!("not linearized");
        };
        assert_eq!(segment.points().len(), 20);
    }

    #[test]
    fn arc_string_shares_points() {
        let arc_string = ArcString::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, -1.0),
            Point::new(4.0, 0.0),
        ])
        .expect("valid arc string");
        let segment = CurveLinearizer
            .linearize_arc_string(&arc_string, &LinearizationCriterion::NumPoints(5));
        let points = segment.points();

        assert_eq!(points.len(), 9);
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[4], Point::new(2.0, 0.0));
        assert_eq!(points[8], Point::new(4.0, 0.0));
    }

    #[test]
    fn max_error_respects_max_points() {
        let arc = Arc::new(
            Point::new(-100.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 0.0),
        );
        let criterion = LinearizationCriterion::MaxError {
            max_error: 0.0001,
            max_points: 50,
        };
        let segment = CurveLinearizer.linearize_arc(&arc, &criterion);
        assert_eq!(segment.points().len(), 50);

        let criterion = LinearizationCriterion::MaxError {
            max_error: 10.0,
            max_points: 0,
        };
        let segment = CurveLinearizer.linearize_arc(&arc, &criterion);
        assert!(segment.points().len() < 10);
    }

    #[test]
    fn tiny_max_error_is_capped() {
        let arc = Arc::new(
            Point::new(-100.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 0.0),
        );
        let criterion = LinearizationCriterion::MaxError {
            max_error: 1e-12,
            max_points: 0,
        };
        let segment = CurveLinearizer.linearize_arc(&arc, &criterion);
        assert_eq!(segment.points().len(), POINTS_LIMIT);
        assert_eq!(segment.points()[0], arc.start);
        assert_eq!(segment.points()[POINTS_LIMIT - 1], arc.end);

        let segment =
            CurveLinearizer.linearize_arc(&arc, &LinearizationCriterion::NumPoints(usize::MAX));
        assert_eq!(segment.points().len(), POINTS_LIMIT);
    }

    #[test]
    fn criterion_validation() {
        assert!(LinearizationCriterion::default().validate().is_ok());
        assert_matches!(
            LinearizationCriterion::NumPoints(1).validate(),
            Err(GeometryError::InvalidCriterion(_))
        );
        assert_matches!(
            LinearizationCriterion::MaxError {
                max_error: 0.0,
                max_points: 0
            }
            .validate(),
            Err(GeometryError::InvalidCriterion(_))
        );
        assert_matches!(
            LinearizationCriterion::MaxError {
                max_error: f64::NAN,
                max_points: 0
            }
            .validate(),
            Err(GeometryError::InvalidCriterion(_))
        );
    }
}
