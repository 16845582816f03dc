//! Recursive topological validation of geometries.

use geo::Coord;
use geotopo_types::linearization::{CurveLinearizer, LinearizationCriterion};
use geotopo_types::{
    CompositeGeometry, Curve, CurveSegment, Geometry, MultiGeometry, Point, PolygonPatch,
    Primitive, Surface, SurfacePatch,
};
use serde::{Deserialize, Serialize};

use crate::context::{GeometryParticle, ValidationContext};
use crate::error::ValidationError;
use crate::handler::ValidationEventHandler;
use crate::predicates::{GeoPredicates, PlanarPredicates, PlanarRing, PredicateError};

/// What to do when a planar predicate fails while a polygon patch is validated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredicateErrorPolicy {
    /// Stop validating the patch, log a warning and use the verdicts collected for the patch so far.
    #[default]
    Interrupt,
    /// Abort validation with [`ValidationError::PredicateEvaluation`].
    Propagate,
}

/// Configuration of a [`GeometryValidator`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Criterion used to linearize curves before the planar checks.
    pub linearization: LinearizationCriterion,
    /// Handling of predicate failures inside polygon patches.
    pub predicate_errors: PredicateErrorPolicy,
}

/// Role of a curve in the validated geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurveRole {
    Curve,
    Ring,
}

/// Validates the topology of geometries and reports found anomalies to a [`ValidationEventHandler`].
///
/// The validator keeps no state between runs, so one instance can be used for any number of geometries, also from
/// several threads.
///
/// ```
/// use geotopo::{GeometryValidator, RecordingHandler, ValidationEventKind};
/// use geotopo::geotopo_types::{Curve, Point, Surface};
///
/// let exterior = Curve::line_string(vec![
///     Point::new(0.0, 0.0),
///     Point::new(4.0, 4.0),
///     Point::new(4.0, 0.0),
///     Point::new(0.0, 0.0),
/// ])?;
/// let surface = Surface::polygon(exterior, vec![]);
///
/// let mut handler = RecordingHandler::new();
/// let is_valid = GeometryValidator::new().validate(&surface.into(), &mut handler)?;
///
/// assert!(!is_valid);
/// assert_eq!(handler.kinds(), vec![ValidationEventKind::ExteriorRingClockwise]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeometryValidator<P = GeoPredicates> {
    config: ValidatorConfig,
    predicates: P,
    linearizer: CurveLinearizer,
}

impl GeometryValidator {
    /// Creates a validator with the default configuration.
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
            predicates: GeoPredicates,
            linearizer: CurveLinearizer,
        }
    }

    /// Returns a builder to configure a validator.
    pub fn builder() -> GeometryValidatorBuilder {
        GeometryValidatorBuilder::default()
    }
}

impl Default for GeometryValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PlanarPredicates> GeometryValidator<P> {
    /// Configuration of the validator.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates the geometry. Returns `Ok(true)` if the handler accepted every found anomaly.
    ///
    /// All checks are executed even after an anomaly is rejected, so the handler is notified about every anomaly in
    /// the geometry.
    ///
    /// Fails if the geometry is or contains an envelope or a solid, or if a planar predicate fails outside a polygon
    /// patch (or inside one with [`PredicateErrorPolicy::Propagate`]).
    pub fn validate(
        &self,
        geometry: &Geometry,
        handler: &mut impl ValidationEventHandler,
    ) -> Result<bool, ValidationError> {
        self.validate_geometry(geometry, handler, &ValidationContext::new())
    }

    fn validate_geometry<'a, H: ValidationEventHandler + ?Sized>(
        &self,
        geometry: &'a Geometry,
        handler: &mut H,
        ctx: &ValidationContext<'a>,
    ) -> Result<bool, ValidationError> {
        match geometry {
            Geometry::Primitive(primitive) => self.validate_primitive(primitive, handler, ctx),
            Geometry::Composite(composite) => self.validate_composite(composite, handler, ctx),
            Geometry::Multi(multi) => self.validate_multi(multi, handler, ctx),
            Geometry::Envelope(_) => Err(ValidationError::EnvelopeNotValidatable),
        }
    }

    fn validate_primitive<'a, H: ValidationEventHandler + ?Sized>(
        &self,
        primitive: &'a Primitive,
        handler: &mut H,
        ctx: &ValidationContext<'a>,
    ) -> Result<bool, ValidationError> {
        match primitive {
            Primitive::Point(_) => Ok(true),
            Primitive::Curve(curve) => {
                Ok(self.validate_curve(curve, CurveRole::Curve, handler, ctx)?)
            }
            Primitive::Surface(surface) => self.validate_surface(surface, handler, ctx),
            Primitive::Solid(_) => Err(ValidationError::SolidNotSupported),
        }
    }

    fn validate_composite<'a, H: ValidationEventHandler + ?Sized>(
        &self,
        composite: &'a CompositeGeometry,
        handler: &mut H,
        ctx: &ValidationContext<'a>,
    ) -> Result<bool, ValidationError> {
        log::warn!("Topology between members of composite geometries is not validated");

        let ctx = ctx.with(GeometryParticle::Composite(composite));
        let mut is_valid = true;
        for member in composite.members() {
            is_valid &= self.validate_primitive(member, handler, &ctx)?;
        }

        Ok(is_valid)
    }

    fn validate_multi<'a, H: ValidationEventHandler + ?Sized>(
        &self,
        multi: &'a MultiGeometry,
        handler: &mut H,
        ctx: &ValidationContext<'a>,
    ) -> Result<bool, ValidationError> {
        let ctx = ctx.with(GeometryParticle::Multi(multi));
        let mut is_valid = true;
        for member in multi.members() {
            is_valid &= self.validate_geometry(member, handler, &ctx)?;
        }

        Ok(is_valid)
    }

    fn validate_curve<'a, H: ValidationEventHandler + ?Sized>(
        &self,
        curve: &'a Curve,
        role: CurveRole,
        handler: &mut H,
        ctx: &ValidationContext<'a>,
    ) -> Result<bool, PredicateError> {
        let ctx = ctx.with(GeometryParticle::Curve(curve));
        let mut is_valid = true;

        for segment in curve.segments() {
            let CurveSegment::LineString(line_string) = segment else {
                log::debug!("Duplicate points check is only done for line string segments");
                continue;
            };

            for pair in line_string.points().windows(2) {
                if pair[0] == pair[1] {
                    is_valid &= handler.duplicate_points(curve, &pair[1], &ctx);
                }
            }
        }

        for (index, pair) in curve.segments().windows(2).enumerate() {
            let (end, start) = (pair[0].end_point(), pair[1].start_point());
            if end.x() != start.x() || end.y() != start.y() {
                is_valid &= handler.curve_discontinuity(curve, index + 1, &ctx);
            }
        }

        let intersection = self.predicates.is_simple(&self.planar_coords(curve))?;
        if let Some(coord) = intersection {
            let location = Some(Point::new(coord.x, coord.y));
            is_valid &= handler.curve_self_intersection(curve, location, &ctx);
            if role == CurveRole::Ring {
                is_valid &= handler.ring_self_intersection(curve, location, &ctx);
            }
        }

        if role == CurveRole::Ring && !curve.is_closed() {
            is_valid &= handler.ring_not_closed(curve, &ctx);
        }

        Ok(is_valid)
    }

    fn validate_surface<'a, H: ValidationEventHandler + ?Sized>(
        &self,
        surface: &'a Surface,
        handler: &mut H,
        ctx: &ValidationContext<'a>,
    ) -> Result<bool, ValidationError> {
        if surface.patches().len() > 1 {
            log::warn!(
                "Surface has {} patches, topology between patches is not validated",
                surface.patches().len()
            );
        }

        let ctx = ctx.with(GeometryParticle::Surface(surface));
        let mut is_valid = true;
        for patch in surface.patches() {
            match patch {
                SurfacePatch::Polygon(polygon) => {
                    is_valid &= self.validate_patch(polygon, handler, &ctx)?;
                }
                SurfacePatch::Gridded(gridded) => {
                    log::warn!(
                        "Validation of {:?} patches is not supported, skipping",
                        gridded.kind()
                    );
                }
            }
        }

        Ok(is_valid)
    }

    fn validate_patch<'a, H: ValidationEventHandler + ?Sized>(
        &self,
        patch: &'a PolygonPatch,
        handler: &mut H,
        ctx: &ValidationContext<'a>,
    ) -> Result<bool, ValidationError> {
        let ctx = ctx.with(GeometryParticle::Patch(patch));
        let mut is_valid = true;

        match self.check_patch(patch, handler, &ctx, &mut is_valid) {
            Ok(()) => Ok(is_valid),
            Err(err) => match self.config.predicate_errors {
                PredicateErrorPolicy::Interrupt => {
                    log::warn!("Validation of polygon patch interrupted: {err}");
                    Ok(is_valid)
                }
                PredicateErrorPolicy::Propagate => Err(err.into()),
            },
        }
    }

    fn check_patch<'a, H: ValidationEventHandler + ?Sized>(
        &self,
        patch: &'a PolygonPatch,
        handler: &mut H,
        ctx: &ValidationContext<'a>,
        is_valid: &mut bool,
    ) -> Result<(), PredicateError> {
        let exterior = patch.exterior_ring();
        *is_valid &= self.validate_curve(exterior, CurveRole::Ring, handler, ctx)?;

        let exterior = self.planar_ring(exterior)?;
        if let Some(exterior) = &exterior {
            if !self.predicates.is_ccw(exterior)? {
                *is_valid &= handler.exterior_ring_orientation(patch, ctx);
            }
        }

        let mut interiors = Vec::with_capacity(patch.interior_rings().len());
        for (index, interior) in patch.interior_rings().iter().enumerate() {
            *is_valid &= self.validate_curve(interior, CurveRole::Ring, handler, ctx)?;

            let Some(ring) = self.planar_ring(interior)? else {
                continue;
            };
            if self.predicates.is_ccw(&ring)? {
                *is_valid &= handler.interior_ring_orientation(patch, index, ctx);
            }

            interiors.push((index, ring));
        }

        if let Some(exterior) = &exterior {
            for (index, interior) in &interiors {
                let index = *index;
                if self.predicates.touches(interior, exterior)? {
                    *is_valid &= handler.interior_ring_touches_exterior(patch, index, ctx);
                }
                if self.predicates.intersects(interior, exterior)? {
                    *is_valid &= handler.interior_ring_intersects_exterior(patch, index, ctx);
                }
                if !self.predicates.within(interior, exterior)? {
                    *is_valid &= handler.interior_ring_outside_exterior(patch, index, ctx);
                }
                if self.predicates.within(exterior, interior)? {
                    *is_valid &= handler.interior_ring_outside_exterior(patch, index, ctx);
                }
            }
        }

        for (position, (i, first)) in interiors.iter().enumerate() {
            for (j, second) in interiors.iter().skip(position + 1) {
                let (i, j) = (*i, *j);
                if self.predicates.touches(first, second)? {
                    *is_valid &= handler.interior_rings_touch(patch, i, j, ctx);
                }
                if self.predicates.intersects(first, second)? {
                    *is_valid &= handler.interior_rings_intersect(patch, i, j, ctx);
                }
                if self.predicates.within(first, second)? {
                    *is_valid &= handler.interior_rings_within(patch, j, i, ctx);
                }
                if self.predicates.within(second, first)? {
                    *is_valid &= handler.interior_rings_within(patch, i, j, ctx);
                }
            }
        }

        Ok(())
    }

    /// Planar form of a ring, or `None` if the ring is not closed or too short to bound an area. An unclosed ring
    /// is reported by the curve checks, and neither kind can be compared with other rings.
    fn planar_ring(&self, ring: &Curve) -> Result<Option<PlanarRing>, PredicateError> {
        match PlanarRing::new(self.planar_coords(ring)) {
            Ok(ring) => Ok(Some(ring)),
            Err(err @ (PredicateError::RingNotClosed | PredicateError::RingTooShort(_))) => {
                log::debug!("Skipping planar checks of ring: {err}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn planar_coords(&self, curve: &Curve) -> Vec<Coord<f64>> {
        let mut coords = vec![];
        for segment in curve.segments() {
            let linear = self
                .linearizer
                .linearize_segment(segment, &self.config.linearization);
            coords.extend(linear.points().iter().map(|p| Coord { x: p.x(), y: p.y() }));
        }

        coords
    }
}

/// Configures and creates a [`GeometryValidator`].
///
/// ```
/// use geotopo::{GeometryValidator, PredicateErrorPolicy};
/// use geotopo::geotopo_types::linearization::LinearizationCriterion;
///
/// let validator = GeometryValidator::builder()
///     .with_criterion(LinearizationCriterion::MaxError { max_error: 0.01, max_points: 1000 })
///     .with_predicate_error_policy(PredicateErrorPolicy::Propagate)
///     .build()?;
///
/// assert_eq!(validator.config().predicate_errors, PredicateErrorPolicy::Propagate);
/// # Ok::<(), geotopo::error::ValidationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeometryValidatorBuilder<P = GeoPredicates> {
    config: ValidatorConfig,
    predicates: P,
}

impl Default for GeometryValidatorBuilder {
    fn default() -> Self {
        Self {
            config: ValidatorConfig::default(),
            predicates: GeoPredicates,
        }
    }
}

impl<P: PlanarPredicates> GeometryValidatorBuilder<P> {
    /// Sets the criterion used to linearize curves.
    ///
    /// Defaults to 150 points per curved segment.
    pub fn with_criterion(mut self, criterion: LinearizationCriterion) -> Self {
        self.config.linearization = criterion;
        self
    }

    /// Sets the handling of predicate failures inside polygon patches.
    ///
    /// Defaults to [`PredicateErrorPolicy::Interrupt`].
    pub fn with_predicate_error_policy(mut self, policy: PredicateErrorPolicy) -> Self {
        self.config.predicate_errors = policy;
        self
    }

    /// Replaces the whole configuration. Overrides the values set by the other methods.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the implementation of planar predicates.
    pub fn with_predicates<Q: PlanarPredicates>(self, predicates: Q) -> GeometryValidatorBuilder<Q> {
        GeometryValidatorBuilder {
            config: self.config,
            predicates,
        }
    }

    /// Creates the validator.
    ///
    /// Fails if the linearization criterion is invalid.
    pub fn build(self) -> Result<GeometryValidator<P>, ValidationError> {
        self.config
            .linearization
            .validate()
            .map_err(|err| ValidationError::Configuration(err.to_string()))?;

        Ok(GeometryValidator {
            config: self.config,
            predicates: self.predicates,
            linearizer: CurveLinearizer,
        })
    }
}
