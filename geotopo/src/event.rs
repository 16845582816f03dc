//! Topological anomalies reported by the validator.

use std::fmt::{Display, Formatter};

use geotopo_types::{Curve, Point, PolygonPatch};
use serde::{Deserialize, Serialize};

/// Kind of a topological anomaly. The set is closed: the validator never reports anything else.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationEventKind {
    /// Two successive control points of a line string segment are equal.
    SegmentDuplicatePoints,
    /// End point of a segment is not the start point of the next one.
    CurveDiscontinuity,
    /// Curve intersects itself.
    CurveSelfIntersection,
    /// Curve turns at an acute angle. Reserved, never reported by the validator.
    CurveAcuteAngle,
    /// Start and end points of a ring differ.
    RingNotClosed,
    /// Ring intersects itself.
    RingSelfIntersection,
    /// Exterior ring of a polygon patch is not counter-clockwise.
    ExteriorRingClockwise,
    /// Interior ring of a polygon patch is not clockwise.
    InteriorRingCounterClockwise,
    /// Two interior rings touch in isolated points.
    InteriorRingsTouch,
    /// Two interior rings intersect.
    InteriorRingsIntersect,
    /// One interior ring lies inside another.
    InteriorRingsWithin,
    /// Interior ring touches the exterior ring in isolated points.
    InteriorRingTouchesExterior,
    /// Interior ring intersects the exterior ring.
    InteriorRingIntersectsExterior,
    /// Interior ring is not inside the exterior ring, or the exterior ring is inside the interior one.
    InteriorRingOutsideExterior,
}

impl ValidationEventKind {
    /// All event kinds.
    pub const ALL: [ValidationEventKind; 14] = [
        Self::SegmentDuplicatePoints,
        Self::CurveDiscontinuity,
        Self::CurveSelfIntersection,
        Self::CurveAcuteAngle,
        Self::RingNotClosed,
        Self::RingSelfIntersection,
        Self::ExteriorRingClockwise,
        Self::InteriorRingCounterClockwise,
        Self::InteriorRingsTouch,
        Self::InteriorRingsIntersect,
        Self::InteriorRingsWithin,
        Self::InteriorRingTouchesExterior,
        Self::InteriorRingIntersectsExterior,
        Self::InteriorRingOutsideExterior,
    ];

    /// Constant-style name of the kind, e.g. `RING_NOT_CLOSED`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SegmentDuplicatePoints => "SEGMENT_DUPLICATE_POINTS",
            Self::CurveDiscontinuity => "CURVE_DISCONTINUITY",
            Self::CurveSelfIntersection => "CURVE_SELF_INTERSECTION",
            Self::CurveAcuteAngle => "CURVE_ACUTE_ANGLE",
            Self::RingNotClosed => "RING_NOT_CLOSED",
            Self::RingSelfIntersection => "RING_SELF_INTERSECTION",
            Self::ExteriorRingClockwise => "EXTERIOR_RING_CLOCKWISE",
            Self::InteriorRingCounterClockwise => "INTERIOR_RING_COUNTER_CLOCKWISE",
            Self::InteriorRingsTouch => "INTERIOR_RINGS_TOUCH",
            Self::InteriorRingsIntersect => "INTERIOR_RINGS_INTERSECT",
            Self::InteriorRingsWithin => "INTERIOR_RINGS_WITHIN",
            Self::InteriorRingTouchesExterior => "INTERIOR_RING_TOUCHES_EXTERIOR",
            Self::InteriorRingIntersectsExterior => "INTERIOR_RING_INTERSECTS_EXTERIOR",
            Self::InteriorRingOutsideExterior => "INTERIOR_RING_OUTSIDE_EXTERIOR",
        }
    }
}

impl Display for ValidationEventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One occurrence of a topological anomaly, with the geometry it was found in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationEvent<'a> {
    /// See [`ValidationEventKind::SegmentDuplicatePoints`].
    DuplicatePoints {
        /// Curve with the duplicate points.
        curve: &'a Curve,
        /// The repeated point.
        point: &'a Point,
    },
    /// See [`ValidationEventKind::CurveDiscontinuity`].
    CurveDiscontinuity {
        /// Discontinuous curve.
        curve: &'a Curve,
        /// Index of the segment that does not start where the previous one ends.
        segment_index: usize,
    },
    /// See [`ValidationEventKind::CurveSelfIntersection`].
    CurveSelfIntersection {
        /// Self-intersecting curve.
        curve: &'a Curve,
        /// First found intersection location, in linearized coordinates.
        location: Option<Point>,
    },
    /// See [`ValidationEventKind::CurveAcuteAngle`].
    CurveAcuteAngle {
        /// Curve with the acute angle.
        curve: &'a Curve,
        /// Vertex of the angle.
        point: &'a Point,
    },
    /// See [`ValidationEventKind::RingNotClosed`].
    RingNotClosed {
        /// Ring that is not closed.
        ring: &'a Curve,
    },
    /// See [`ValidationEventKind::RingSelfIntersection`].
    RingSelfIntersection {
        /// Self-intersecting ring.
        ring: &'a Curve,
        /// First found intersection location, in linearized coordinates.
        location: Option<Point>,
    },
    /// See [`ValidationEventKind::ExteriorRingClockwise`].
    ExteriorRingClockwise {
        /// Patch with the wrongly oriented exterior ring.
        patch: &'a PolygonPatch,
    },
    /// See [`ValidationEventKind::InteriorRingCounterClockwise`].
    InteriorRingCounterClockwise {
        /// Patch with the wrongly oriented interior ring.
        patch: &'a PolygonPatch,
        /// Index of the interior ring.
        ring_index: usize,
    },
    /// See [`ValidationEventKind::InteriorRingsTouch`].
    InteriorRingsTouch {
        /// Patch with the touching rings.
        patch: &'a PolygonPatch,
        /// Index of the first interior ring.
        ring1: usize,
        /// Index of the second interior ring.
        ring2: usize,
    },
    /// See [`ValidationEventKind::InteriorRingsIntersect`].
    InteriorRingsIntersect {
        /// Patch with the intersecting rings.
        patch: &'a PolygonPatch,
        /// Index of the first interior ring.
        ring1: usize,
        /// Index of the second interior ring.
        ring2: usize,
    },
    /// See [`ValidationEventKind::InteriorRingsWithin`].
    InteriorRingsWithin {
        /// Patch with the nested rings.
        patch: &'a PolygonPatch,
        /// Index of the containing interior ring.
        outer: usize,
        /// Index of the contained interior ring.
        inner: usize,
    },
    /// See [`ValidationEventKind::InteriorRingTouchesExterior`].
    InteriorRingTouchesExterior {
        /// Patch with the touching rings.
        patch: &'a PolygonPatch,
        /// Index of the interior ring.
        ring_index: usize,
    },
    /// See [`ValidationEventKind::InteriorRingIntersectsExterior`].
    InteriorRingIntersectsExterior {
        /// Patch with the intersecting rings.
        patch: &'a PolygonPatch,
        /// Index of the interior ring.
        ring_index: usize,
    },
    /// See [`ValidationEventKind::InteriorRingOutsideExterior`].
    InteriorRingOutsideExterior {
        /// Patch with the misplaced ring.
        patch: &'a PolygonPatch,
        /// Index of the interior ring.
        ring_index: usize,
    },
}

impl ValidationEvent<'_> {
    /// Kind of the event.
    pub fn kind(&self) -> ValidationEventKind {
        match self {
            Self::DuplicatePoints { .. } => ValidationEventKind::SegmentDuplicatePoints,
            Self::CurveDiscontinuity { .. } => ValidationEventKind::CurveDiscontinuity,
            Self::CurveSelfIntersection { .. } => ValidationEventKind::CurveSelfIntersection,
            Self::CurveAcuteAngle { .. } => ValidationEventKind::CurveAcuteAngle,
            Self::RingNotClosed { .. } => ValidationEventKind::RingNotClosed,
            Self::RingSelfIntersection { .. } => ValidationEventKind::RingSelfIntersection,
            Self::ExteriorRingClockwise { .. } => ValidationEventKind::ExteriorRingClockwise,
            Self::InteriorRingCounterClockwise { .. } => {
                ValidationEventKind::InteriorRingCounterClockwise
            }
            Self::InteriorRingsTouch { .. } => ValidationEventKind::InteriorRingsTouch,
            Self::InteriorRingsIntersect { .. } => ValidationEventKind::InteriorRingsIntersect,
            Self::InteriorRingsWithin { .. } => ValidationEventKind::InteriorRingsWithin,
            Self::InteriorRingTouchesExterior { .. } => {
                ValidationEventKind::InteriorRingTouchesExterior
            }
            Self::InteriorRingIntersectsExterior { .. } => {
                ValidationEventKind::InteriorRingIntersectsExterior
            }
            Self::InteriorRingOutsideExterior { .. } => {
                ValidationEventKind::InteriorRingOutsideExterior
            }
        }
    }
}

fn fmt_location(location: &Option<Point>) -> String {
    match location {
        Some(p) => format!(" at ({}, {})", p.x(), p.y()),
        None => String::new(),
    }
}

impl Display for ValidationEvent<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePoints { point, .. } => write!(
                f,
                "duplicate successive control points at ({}, {})",
                point.x(),
                point.y()
            ),
            Self::CurveDiscontinuity { segment_index, .. } => write!(
                f,
                "segment {segment_index} does not start at the end of segment {}",
                segment_index.saturating_sub(1)
            ),
            Self::CurveSelfIntersection { location, .. } => {
                write!(f, "curve intersects itself{}", fmt_location(location))
            }
            Self::CurveAcuteAngle { point, .. } => {
                write!(f, "acute angle at ({}, {})", point.x(), point.y())
            }
            Self::RingNotClosed { .. } => write!(f, "ring is not closed"),
            Self::RingSelfIntersection { location, .. } => {
                write!(f, "ring intersects itself{}", fmt_location(location))
            }
            Self::ExteriorRingClockwise { .. } => {
                write!(f, "exterior ring is not oriented counter-clockwise")
            }
            Self::InteriorRingCounterClockwise { ring_index, .. } => {
                write!(f, "interior ring {ring_index} is not oriented clockwise")
            }
            Self::InteriorRingsTouch { ring1, ring2, .. } => {
                write!(f, "interior rings {ring1} and {ring2} touch")
            }
            Self::InteriorRingsIntersect { ring1, ring2, .. } => {
                write!(f, "interior rings {ring1} and {ring2} intersect")
            }
            Self::InteriorRingsWithin { outer, inner, .. } => {
                write!(f, "interior ring {inner} lies within interior ring {outer}")
            }
            Self::InteriorRingTouchesExterior { ring_index, .. } => {
                write!(f, "interior ring {ring_index} touches the exterior ring")
            }
            Self::InteriorRingIntersectsExterior { ring_index, .. } => {
                write!(f, "interior ring {ring_index} intersects the exterior ring")
            }
            Self::InteriorRingOutsideExterior { ring_index, .. } => {
                write!(f, "interior ring {ring_index} is not inside the exterior ring")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_unique() {
        let mut names: Vec<&str> = ValidationEventKind::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ValidationEventKind::ALL.len());
    }

    #[test]
    fn kind_serialization_uses_names() {
        for kind in ValidationEventKind::ALL {
            let json = serde_json::to_string(&kind).expect("serializable");
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn display() {
        let ring = Curve::line_string(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
            .expect("valid curve");
        let patch = PolygonPatch::new(ring.clone(), vec![]);

        let event = ValidationEvent::RingSelfIntersection {
            ring: &ring,
            location: Some(Point::new(2.0, 2.0)),
        };
        assert_eq!(event.to_string(), "ring intersects itself at (2, 2)");
        assert_eq!(event.kind(), ValidationEventKind::RingSelfIntersection);

        let event = ValidationEvent::InteriorRingsWithin {
            patch: &patch,
            outer: 1,
            inner: 0,
        };
        assert_eq!(event.to_string(), "interior ring 0 lies within interior ring 1");

        let event = ValidationEvent::CurveDiscontinuity {
            curve: &ring,
            segment_index: 1,
        };
        assert_eq!(
            event.to_string(),
            "segment 1 does not start at the end of segment 0"
        );
    }
}
