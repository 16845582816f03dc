use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::point::Point;

/// Straight segments connecting a sequence of control points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LineStringSegment {
    points: Vec<Point>,
}

impl LineStringSegment {
    /// Creates a new segment. At least two control points are required.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                expected: 2,
                actual: points.len(),
            });
        }

        Ok(Self { points })
    }

    pub(crate) fn new_unchecked(points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 2);
        Self { points }
    }

    /// Control points of the segment.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// First control point.
    pub fn start_point(&self) -> &Point {
        &self.points[0]
    }

    /// Last control point.
    pub fn end_point(&self) -> &Point {
        &self.points[self.points.len() - 1]
    }
}

impl TryFrom<Vec<Point>> for LineStringSegment {
    type Error = GeometryError;

    fn try_from(value: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LineStringSegment> for Vec<Point> {
    fn from(value: LineStringSegment) -> Self {
        value.points
    }
}

/// Circular arc through three points: start, any point on the arc, end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// Start point.
    pub start: Point,
    /// Point on the arc between start and end.
    pub mid: Point,
    /// End point.
    pub end: Point,
}

impl Arc {
    /// Creates a new arc.
    pub fn new(start: Point, mid: Point, end: Point) -> Self {
        Self { start, mid, end }
    }
}

/// Full circle through three distinct points. The circle starts and ends at the first point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// First point, also start and end of the segment.
    pub p1: Point,
    /// Second point on the circle.
    pub p2: Point,
    /// Third point on the circle.
    pub p3: Point,
}

impl Circle {
    /// Creates a new circle.
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        Self { p1, p2, p3 }
    }
}

/// Chain of arcs, every arc sharing its end point with the start of the next one.
///
/// Points `[2k, 2k + 1, 2k + 2]` define the `k`-th arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct ArcString {
    points: Vec<Point>,
}

impl ArcString {
    /// Creates a new arc string. The number of points must be odd and at least 3.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 3 || points.len() % 2 == 0 {
            return Err(GeometryError::InvalidArcString(points.len()));
        }

        Ok(Self { points })
    }

    /// Control points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterates over the arcs of the string.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.points
            .windows(3)
            .step_by(2)
            .map(|w| Arc::new(w[0], w[1], w[2]))
    }
}

impl TryFrom<Vec<Point>> for ArcString {
    type Error = GeometryError;

    fn try_from(value: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ArcString> for Vec<Point> {
    fn from(value: ArcString) -> Self {
        value.points
    }
}

/// Part of a [`Curve`] with a uniform interpolation method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurveSegment {
    /// Linear interpolation.
    LineString(LineStringSegment),
    /// Circular arc.
    Arc(Arc),
    /// Full circle.
    Circle(Circle),
    /// Chain of circular arcs.
    ArcString(ArcString),
}

impl CurveSegment {
    /// First point of the segment.
    pub fn start_point(&self) -> &Point {
        match self {
            CurveSegment::LineString(v) => v.start_point(),
            CurveSegment::Arc(v) => &v.start,
            CurveSegment::Circle(v) => &v.p1,
            CurveSegment::ArcString(v) => &v.points[0],
        }
    }

    /// Last point of the segment.
    pub fn end_point(&self) -> &Point {
        match self {
            CurveSegment::LineString(v) => v.end_point(),
            CurveSegment::Arc(v) => &v.end,
            CurveSegment::Circle(v) => &v.p1,
            CurveSegment::ArcString(v) => &v.points[v.points.len() - 1],
        }
    }

    /// Returns true for segments that need no linearization.
    pub fn is_linear(&self) -> bool {
        matches!(self, CurveSegment::LineString(_))
    }
}

impl From<LineStringSegment> for CurveSegment {
    fn from(value: LineStringSegment) -> Self {
        Self::LineString(value)
    }
}

impl From<Arc> for CurveSegment {
    fn from(value: Arc) -> Self {
        Self::Arc(value)
    }
}

impl From<Circle> for CurveSegment {
    fn from(value: Circle) -> Self {
        Self::Circle(value)
    }
}

impl From<ArcString> for CurveSegment {
    fn from(value: ArcString) -> Self {
        Self::ArcString(value)
    }
}

/// One-dimensional geometry consisting of one or more segments.
///
/// Segments are expected to be continuous (end of one segment is the start of the next one), but this is not
/// enforced on construction. Checking it is the job of the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurveSegment>", into = "Vec<CurveSegment>")]
pub struct Curve {
    segments: Vec<CurveSegment>,
}

impl Curve {
    /// Creates a new curve. At least one segment is required.
    pub fn new(segments: Vec<CurveSegment>) -> Result<Self, GeometryError> {
        if segments.is_empty() {
            return Err(GeometryError::EmptyCurve);
        }

        Ok(Self { segments })
    }

    /// Creates a curve with a single line string segment.
    pub fn line_string(points: Vec<Point>) -> Result<Self, GeometryError> {
        Ok(Self {
            segments: vec![LineStringSegment::new(points)?.into()],
        })
    }

    pub(crate) fn new_unchecked(segments: Vec<CurveSegment>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    /// Segments of the curve.
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// Start point of the first segment.
    pub fn start_point(&self) -> &Point {
        self.segments[0].start_point()
    }

    /// End point of the last segment.
    pub fn end_point(&self) -> &Point {
        self.segments[self.segments.len() - 1].end_point()
    }

    /// Returns true if the start and end points of the curve are exactly equal.
    pub fn is_closed(&self) -> bool {
        self.start_point() == self.end_point()
    }

    /// Returns true if all segments are line strings.
    pub fn is_linear(&self) -> bool {
        self.segments.iter().all(CurveSegment::is_linear)
    }
}

impl TryFrom<Vec<CurveSegment>> for Curve {
    type Error = GeometryError;

    fn try_from(value: Vec<CurveSegment>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Curve> for Vec<CurveSegment> {
    fn from(value: Curve) -> Self {
        value.segments
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn line(points: &[(f64, f64)]) -> LineStringSegment {
        LineStringSegment::new(points.iter().copied().map(Point::from).collect())
            .expect("valid segment")
    }

    #[test]
    fn line_string_requires_two_points() {
        assert_matches!(
            LineStringSegment::new(vec![Point::new(0.0, 0.0)]),
            Err(GeometryError::TooFewPoints {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn arc_string_point_count() {
        let p = Point::new(0.0, 0.0);
        assert!(ArcString::new(vec![p; 3]).is_ok());
        assert!(ArcString::new(vec![p; 5]).is_ok());
        assert_matches!(
            ArcString::new(vec![p; 4]),
            Err(GeometryError::InvalidArcString(4))
        );
        assert_matches!(
            ArcString::new(vec![p; 1]),
            Err(GeometryError::InvalidArcString(1))
        );
    }

    #[test]
    fn arc_string_arcs() {
        let points: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 0.0)).collect();
        let arcs: Vec<Arc> = ArcString::new(points).expect("valid").arcs().collect();
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].start, Point::new(0.0, 0.0));
        assert_eq!(arcs[0].end, Point::new(2.0, 0.0));
        assert_eq!(arcs[1].start, Point::new(2.0, 0.0));
        assert_eq!(arcs[1].end, Point::new(4.0, 0.0));
    }

    #[test]
    fn curve_end_points() {
        let curve = Curve::new(vec![
            line(&[(0.0, 0.0), (1.0, 1.0)]).into(),
            Arc::new(
                Point::new(1.0, 1.0),
                Point::new(2.0, 2.0),
                Point::new(3.0, 1.0),
            )
            .into(),
        ])
        .expect("valid curve");

        assert_eq!(curve.start_point(), &Point::new(0.0, 0.0));
        assert_eq!(curve.end_point(), &Point::new(3.0, 1.0));
        assert!(!curve.is_closed());
        assert!(!curve.is_linear());
    }

    #[test]
    fn circle_is_closed() {
        let circle = Circle::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        );
        let curve = Curve::new(vec![circle.into()]).expect("valid curve");
        assert!(curve.is_closed());
    }

    #[test]
    fn empty_curve() {
        assert_matches!(Curve::new(vec![]), Err(GeometryError::EmptyCurve));
    }

    #[test]
    fn deserialization_checks_invariants() {
        assert!(serde_json::from_str::<Curve>("[]").is_err());
        assert!(serde_json::from_str::<LineStringSegment>(r#"[{"x":0.0,"y":0.0,"z":null}]"#).is_err());

        let segment: LineStringSegment =
            serde_json::from_str(r#"[{"x":0.0,"y":0.0,"z":null},{"x":1.0,"y":0.0,"z":null}]"#)
                .expect("valid segment");
        assert_eq!(segment.end_point(), &Point::new(1.0, 0.0));
    }
}
