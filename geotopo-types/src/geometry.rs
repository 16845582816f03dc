use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::segment::Curve;
use crate::surface::Surface;

/// Volume bounded by surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    exterior: Surface,
    interiors: Vec<Surface>,
}

impl Solid {
    /// Creates a new solid.
    pub fn new(exterior: Surface, interiors: Vec<Surface>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Exterior shell.
    pub fn exterior(&self) -> &Surface {
        &self.exterior
    }

    /// Interior shells (voids).
    pub fn interiors(&self) -> &[Surface] {
        &self.interiors
    }
}

/// Geometric primitive: a single, connected geometry of a given topological dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// 0-dimensional primitive.
    Point(Point),
    /// 1-dimensional primitive.
    Curve(Curve),
    /// 2-dimensional primitive.
    Surface(Surface),
    /// 3-dimensional primitive.
    Solid(Solid),
}

impl Primitive {
    fn first_point(&self) -> Option<&Point> {
        match self {
            Primitive::Point(v) => Some(v),
            Primitive::Curve(v) => Some(v.start_point()),
            Primitive::Surface(v) => v.patches().iter().find_map(|p| p.first_point()),
            Primitive::Solid(v) => v.exterior().patches().iter().find_map(|p| p.first_point()),
        }
    }
}

/// Set of primitives forming a single connected topological complex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeGeometry {
    members: Vec<Primitive>,
}

impl CompositeGeometry {
    /// Creates a new composite.
    pub fn new(members: Vec<Primitive>) -> Self {
        Self { members }
    }

    /// Member primitives.
    pub fn members(&self) -> &[Primitive] {
        &self.members
    }
}

/// Collection of independent geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiGeometry {
    members: Vec<Geometry>,
}

impl MultiGeometry {
    /// Creates a new multi geometry.
    pub fn new(members: Vec<Geometry>) -> Self {
        Self { members }
    }

    /// Member geometries.
    pub fn members(&self) -> &[Geometry] {
        &self.members
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    min: Point,
    max: Point,
}

impl Envelope {
    /// Creates a new envelope from its lower and upper corners.
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Lower corner.
    pub fn min(&self) -> &Point {
        &self.min
    }

    /// Upper corner.
    pub fn max(&self) -> &Point {
        &self.max
    }
}

/// Any geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Single primitive.
    Primitive(Primitive),
    /// Composite of primitives.
    Composite(CompositeGeometry),
    /// Collection of geometries.
    Multi(MultiGeometry),
    /// Bounding box.
    Envelope(Envelope),
}

impl Geometry {
    /// Coordinate dimension of the geometry, taken from the first point found in it.
    ///
    /// Returns `None` for geometries without any points (e.g. an empty multi geometry).
    pub fn coordinate_dimension(&self) -> Option<usize> {
        self.first_point().map(Point::dimension)
    }

    fn first_point(&self) -> Option<&Point> {
        match self {
            Geometry::Primitive(v) => v.first_point(),
            Geometry::Composite(v) => v.members.iter().find_map(Primitive::first_point),
            Geometry::Multi(v) => v.members.iter().find_map(Geometry::first_point),
            Geometry::Envelope(v) => Some(&v.min),
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Self::Primitive(Primitive::Point(value))
    }
}

impl From<Curve> for Geometry {
    fn from(value: Curve) -> Self {
        Self::Primitive(Primitive::Curve(value))
    }
}

impl From<Surface> for Geometry {
    fn from(value: Surface) -> Self {
        Self::Primitive(Primitive::Surface(value))
    }
}

impl From<Solid> for Geometry {
    fn from(value: Solid) -> Self {
        Self::Primitive(Primitive::Solid(value))
    }
}

impl From<Primitive> for Geometry {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<CompositeGeometry> for Geometry {
    fn from(value: CompositeGeometry) -> Self {
        Self::Composite(value)
    }
}

impl From<MultiGeometry> for Geometry {
    fn from(value: MultiGeometry) -> Self {
        Self::Multi(value)
    }
}

impl From<Envelope> for Geometry {
    fn from(value: Envelope) -> Self {
        Self::Envelope(value)
    }
}
