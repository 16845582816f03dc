//! Chain of geometries enclosing the one being validated.

use geotopo_types::{CompositeGeometry, Curve, MultiGeometry, PolygonPatch, Surface};

/// Reference to one geometry on the validation path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryParticle<'a> {
    /// Curve or ring.
    Curve(&'a Curve),
    /// Surface.
    Surface(&'a Surface),
    /// Polygon patch of a surface.
    Patch(&'a PolygonPatch),
    /// Composite geometry.
    Composite(&'a CompositeGeometry),
    /// Multi geometry.
    Multi(&'a MultiGeometry),
}

/// Ordered list of the aggregates, curves, surfaces and patches enclosing the current check, outermost first.
///
/// Points, envelopes and solids never appear, as no check is made inside them.
///
/// The context is never modified in place. [`ValidationContext::with`] returns an extended copy, so every branch of
/// the validation sees only its own ancestors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationContext<'a> {
    particles: Vec<GeometryParticle<'a>>,
}

impl<'a> ValidationContext<'a> {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the context with the `particle` appended.
    pub fn with(&self, particle: GeometryParticle<'a>) -> Self {
        let mut particles = Vec::with_capacity(self.particles.len() + 1);
        particles.extend_from_slice(&self.particles);
        particles.push(particle);
        Self { particles }
    }

    /// All particles, root first.
    pub fn particles(&self) -> &[GeometryParticle<'a>] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if the context has no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The innermost particle.
    pub fn current(&self) -> Option<&GeometryParticle<'a>> {
        self.particles.last()
    }
}
