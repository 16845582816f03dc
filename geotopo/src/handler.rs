//! Handlers decide whether a topological anomaly disqualifies the validated geometry.
//!
//! The validator reports every anomaly it finds to a [`ValidationEventHandler`]. The handler answers `true` if the
//! anomaly is acceptable, or `false` if it makes the geometry invalid. Validation never stops early, so a handler sees
//! all anomalies of the geometry, whatever it answers.
//!
//! Any closure taking a [`ValidationEvent`] and a [`ValidationContext`] is a handler:
//!
//! ```
//! use geotopo::{GeometryValidator, ValidationContext, ValidationEvent, ValidationEventKind};
//! use geotopo::geotopo_types::{Curve, Point};
//!
//! let ring = Curve::line_string(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(2.0, 2.0),
//!     Point::new(2.0, 0.0),
//!     Point::new(0.0, 2.0),
//! ])?;
//!
//! let mut events = vec![];
//! let mut handler = |event: &ValidationEvent<'_>, _: &ValidationContext<'_>| {
//!     events.push(event.kind());
//!     true
//! };
//!
//! let is_valid = GeometryValidator::new().validate(&ring.into(), &mut handler)?;
//! assert!(is_valid);
//! assert_eq!(events, vec![ValidationEventKind::CurveSelfIntersection]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use geotopo_types::{Curve, Point, PolygonPatch};

use crate::context::ValidationContext;
use crate::event::{ValidationEvent, ValidationEventKind};

/// Decides about every anomaly found by the validator.
///
/// Every anomaly kind has its own method. By default all of them build a [`ValidationEvent`] and pass it to
/// [`ValidationEventHandler::handle`], so a handler can either treat all anomalies in one place or override the
/// methods of the kinds it is interested in.
pub trait ValidationEventHandler {
    /// Handles an anomaly. Returns `true` if the anomaly is acceptable.
    fn handle(&mut self, event: &ValidationEvent<'_>, ctx: &ValidationContext<'_>) -> bool;

    /// Two successive control points of a line string segment of the `curve` are equal to `point`.
    fn duplicate_points(
        &mut self,
        curve: &Curve,
        point: &Point,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(&ValidationEvent::DuplicatePoints { curve, point }, ctx)
    }

    /// Segment with the `segment_index` does not start at the end point of the previous segment.
    fn curve_discontinuity(
        &mut self,
        curve: &Curve,
        segment_index: usize,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::CurveDiscontinuity {
                curve,
                segment_index,
            },
            ctx,
        )
    }

    /// The `curve` intersects itself.
    fn curve_self_intersection(
        &mut self,
        curve: &Curve,
        location: Option<Point>,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::CurveSelfIntersection { curve, location },
            ctx,
        )
    }

    /// The `curve` turns at an acute angle at `point`.
    fn curve_acute_angle(
        &mut self,
        curve: &Curve,
        point: &Point,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(&ValidationEvent::CurveAcuteAngle { curve, point }, ctx)
    }

    /// Start and end points of the `ring` differ.
    fn ring_not_closed(&mut self, ring: &Curve, ctx: &ValidationContext<'_>) -> bool {
        self.handle(&ValidationEvent::RingNotClosed { ring }, ctx)
    }

    /// The `ring` intersects itself.
    fn ring_self_intersection(
        &mut self,
        ring: &Curve,
        location: Option<Point>,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::RingSelfIntersection { ring, location },
            ctx,
        )
    }

    /// Exterior ring of the `patch` is not oriented counter-clockwise.
    fn exterior_ring_orientation(
        &mut self,
        patch: &PolygonPatch,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(&ValidationEvent::ExteriorRingClockwise { patch }, ctx)
    }

    /// Interior ring with the `ring_index` is not oriented clockwise.
    fn interior_ring_orientation(
        &mut self,
        patch: &PolygonPatch,
        ring_index: usize,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::InteriorRingCounterClockwise { patch, ring_index },
            ctx,
        )
    }

    /// Interior rings `ring1` and `ring2` touch.
    fn interior_rings_touch(
        &mut self,
        patch: &PolygonPatch,
        ring1: usize,
        ring2: usize,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::InteriorRingsTouch {
                patch,
                ring1,
                ring2,
            },
            ctx,
        )
    }

    /// Interior rings `ring1` and `ring2` intersect.
    fn interior_rings_intersect(
        &mut self,
        patch: &PolygonPatch,
        ring1: usize,
        ring2: usize,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::InteriorRingsIntersect {
                patch,
                ring1,
                ring2,
            },
            ctx,
        )
    }

    /// Interior ring `inner` lies within the interior ring `outer`.
    fn interior_rings_within(
        &mut self,
        patch: &PolygonPatch,
        outer: usize,
        inner: usize,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::InteriorRingsWithin {
                patch,
                outer,
                inner,
            },
            ctx,
        )
    }

    /// Interior ring with the `ring_index` touches the exterior ring.
    fn interior_ring_touches_exterior(
        &mut self,
        patch: &PolygonPatch,
        ring_index: usize,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::InteriorRingTouchesExterior { patch, ring_index },
            ctx,
        )
    }

    /// Interior ring with the `ring_index` intersects the exterior ring.
    fn interior_ring_intersects_exterior(
        &mut self,
        patch: &PolygonPatch,
        ring_index: usize,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::InteriorRingIntersectsExterior { patch, ring_index },
            ctx,
        )
    }

    /// Interior ring with the `ring_index` is not inside the exterior ring.
    fn interior_ring_outside_exterior(
        &mut self,
        patch: &PolygonPatch,
        ring_index: usize,
        ctx: &ValidationContext<'_>,
    ) -> bool {
        self.handle(
            &ValidationEvent::InteriorRingOutsideExterior { patch, ring_index },
            ctx,
        )
    }
}

impl<T> ValidationEventHandler for T
where
    T: for<'e, 'c> FnMut(&ValidationEvent<'e>, &ValidationContext<'c>) -> bool,
{
    fn handle(&mut self, event: &ValidationEvent<'_>, ctx: &ValidationContext<'_>) -> bool {
        self(event, ctx)
    }
}

/// Handler that considers every anomaly a defect.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictHandler;

impl ValidationEventHandler for StrictHandler {
    fn handle(&mut self, event: &ValidationEvent<'_>, ctx: &ValidationContext<'_>) -> bool {
        log::debug!("{} (depth {}): {event}", event.kind(), ctx.len());
        false
    }
}

/// Handler that accepts every anomaly and logs it as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct LenientHandler;

impl ValidationEventHandler for LenientHandler {
    fn handle(&mut self, event: &ValidationEvent<'_>, ctx: &ValidationContext<'_>) -> bool {
        log::warn!("{} (depth {}): {event}", event.kind(), ctx.len());
        true
    }
}

/// Anomaly recorded by [`RecordingHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Kind of the anomaly.
    pub kind: ValidationEventKind,
    /// Human readable description.
    pub message: String,
    /// Number of geometries on the validation path when the anomaly was found.
    pub depth: usize,
}

/// Handler that records all anomalies in the order they are reported.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    events: Vec<RecordedEvent>,
    verdict: bool,
}

impl RecordingHandler {
    /// Creates a handler that considers every anomaly a defect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the answer given for every anomaly.
    pub fn with_verdict(mut self, verdict: bool) -> Self {
        self.verdict = verdict;
        self
    }

    /// Recorded anomalies.
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Kinds of the recorded anomalies.
    pub fn kinds(&self) -> Vec<ValidationEventKind> {
        self.events.iter().map(|e| e.kind).collect()
    }

    /// Number of recorded anomalies of the given kind.
    pub fn count(&self, kind: ValidationEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Forgets all recorded anomalies.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ValidationEventHandler for RecordingHandler {
    fn handle(&mut self, event: &ValidationEvent<'_>, ctx: &ValidationContext<'_>) -> bool {
        self.events.push(RecordedEvent {
            kind: event.kind(),
            message: event.to_string(),
            depth: ctx.len(),
        });
        self.verdict
    }
}
