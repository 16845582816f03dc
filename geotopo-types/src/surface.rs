use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::point::Point;
use crate::segment::Curve;

/// Planar patch bounded by one exterior ring and zero or more interior rings (holes).
///
/// Rings are ordinary [`Curve`]s. By the Simple Feature convention the exterior ring is expected to go
/// counter-clockwise and the interior rings clockwise, none of the rings should intersect any other ring and all
/// interior rings should lie inside the exterior one. None of these is enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPatch {
    exterior: Curve,
    interiors: Vec<Curve>,
}

impl PolygonPatch {
    /// Creates a new patch.
    pub fn new(exterior: Curve, interiors: Vec<Curve>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Exterior ring.
    pub fn exterior_ring(&self) -> &Curve {
        &self.exterior
    }

    /// Interior rings.
    pub fn interior_rings(&self) -> &[Curve] {
        &self.interiors
    }
}

/// Kind of a [`GriddedPatch`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GriddedKind {
    /// Cone.
    Cone,
    /// Cylinder.
    Cylinder,
    /// Sphere.
    Sphere,
}

/// Patch interpolated over a grid of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GriddedPatch {
    kind: GriddedKind,
    rows: Vec<Vec<Point>>,
}

impl GriddedPatch {
    /// Creates a new patch.
    pub fn new(kind: GriddedKind, rows: Vec<Vec<Point>>) -> Self {
        Self { kind, rows }
    }

    /// Patch kind.
    pub fn kind(&self) -> GriddedKind {
        self.kind
    }

    /// Grid rows.
    pub fn rows(&self) -> &[Vec<Point>] {
        &self.rows
    }
}

/// Part of a [`Surface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfacePatch {
    /// Polygon patch.
    Polygon(PolygonPatch),
    /// Gridded patch.
    Gridded(GriddedPatch),
}

impl SurfacePatch {
    /// Some point of the patch, if it has any.
    pub fn first_point(&self) -> Option<&Point> {
        match self {
            SurfacePatch::Polygon(v) => Some(v.exterior.start_point()),
            SurfacePatch::Gridded(v) => v.rows.iter().flatten().next(),
        }
    }
}

impl From<PolygonPatch> for SurfacePatch {
    fn from(value: PolygonPatch) -> Self {
        Self::Polygon(value)
    }
}

impl From<GriddedPatch> for SurfacePatch {
    fn from(value: GriddedPatch) -> Self {
        Self::Gridded(value)
    }
}

/// Two-dimensional geometry consisting of one or more patches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SurfacePatch>", into = "Vec<SurfacePatch>")]
pub struct Surface {
    patches: Vec<SurfacePatch>,
}

impl Surface {
    /// Creates a new surface. At least one patch is required.
    pub fn new(patches: Vec<SurfacePatch>) -> Result<Self, GeometryError> {
        if patches.is_empty() {
            return Err(GeometryError::EmptySurface);
        }

        Ok(Self { patches })
    }

    /// Creates a surface with one polygon patch.
    pub fn polygon(exterior: Curve, interiors: Vec<Curve>) -> Self {
        Self {
            patches: vec![PolygonPatch::new(exterior, interiors).into()],
        }
    }

    /// Patches of the surface.
    pub fn patches(&self) -> &[SurfacePatch] {
        &self.patches
    }
}

impl TryFrom<Vec<SurfacePatch>> for Surface {
    type Error = GeometryError;

    fn try_from(value: Vec<SurfacePatch>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Surface> for Vec<SurfacePatch> {
    fn from(value: Surface) -> Self {
        value.patches
    }
}
