//! Check that the coordinates of a geometry match the dimension of its coordinate reference system.
//!
//! This check is independent of the topological validation and is usually run before it, as a topology of a geometry
//! with misread coordinates makes little sense.

use std::collections::HashMap;

use geotopo_types::{Crs, Geometry};

use crate::error::CrsError;

const KNOWN_2D_EPSG: [&str; 10] = [
    "4326", "4258", "3857", "3035", "25832", "25833", "32632", "31467", "2056", "28992",
];
const KNOWN_3D_EPSG: [&str; 4] = ["4979", "4978", "4937", "4936"];

/// Resolves the number of dimensions of a coordinate reference system.
pub trait CrsResolver {
    /// Dimension of the CRS, or `None` if the CRS is not known.
    fn dimension(&self, crs: &Crs) -> Option<usize>;
}

/// Fixed table of commonly used coordinate reference systems.
#[derive(Debug, Clone)]
pub struct KnownCrsRegistry {
    dimensions: HashMap<Crs, usize>,
}

impl KnownCrsRegistry {
    /// Registers an additional CRS, replacing the dimension of an already known one.
    pub fn with_crs(mut self, crs: Crs, dimension: usize) -> Self {
        self.dimensions.insert(crs, dimension);
        self
    }
}

impl Default for KnownCrsRegistry {
    fn default() -> Self {
        let mut dimensions: HashMap<Crs, usize> = KNOWN_2D_EPSG
            .iter()
            .map(|code| (Crs::new("EPSG", code), 2))
            .chain(KNOWN_3D_EPSG.iter().map(|code| (Crs::new("EPSG", code), 3)))
            .collect();
        dimensions.insert(Crs::CRS84, 2);

        Self { dimensions }
    }
}

impl CrsResolver for KnownCrsRegistry {
    fn dimension(&self, crs: &Crs) -> Option<usize> {
        self.dimensions.get(crs).copied()
    }
}

/// Compares the coordinate dimension of geometries with the dimension of their CRS.
#[derive(Debug, Clone, Default)]
pub struct CrsDimensionCheck<R = KnownCrsRegistry> {
    resolver: R,
}

impl<R: CrsResolver> CrsDimensionCheck<R> {
    /// Creates a check using the given resolver.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Fails if the CRS is known and its dimension differs from the dimension of the first point of the geometry.
    ///
    /// Geometries in unknown CRSs and geometries without points pass the check.
    pub fn check(&self, geometry: &Geometry, crs: &Crs) -> Result<(), CrsError> {
        let Some(expected) = self.resolver.dimension(crs) else {
            log::warn!("Dimension of CRS {crs} is unknown, skipping dimension check");
            return Ok(());
        };

        let Some(actual) = geometry.coordinate_dimension() else {
            return Ok(());
        };

        if actual != expected {
            log::debug!("Geometry dimension {actual} does not match CRS {crs}");
            return Err(CrsError::DimensionMismatch {
                crs: crs.clone(),
                expected,
                actual,
            });
        }

        Ok(())
    }
}
