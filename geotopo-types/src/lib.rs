//! Geometry model used by the `geotopo` topological validator.
//!
//! The model follows the ISO 19107 / GML view of geometries rather than the flat Simple Feature one:
//!
//! * [`Curve`]s are sequences of [`CurveSegment`]s, which can be straight ([`LineStringSegment`]) or curved
//!   ([`Arc`], [`Circle`], [`ArcString`]);
//! * [`Surface`]s are sequences of [`SurfacePatch`]es, polygon patches being bounded by one exterior and
//!   zero or more interior rings;
//! * [`CompositeGeometry`] and [`MultiGeometry`] aggregate other geometries.
//!
//! A *ring* is not a separate type. It is a [`Curve`] used as a boundary of a [`PolygonPatch`], and is expected
//! (but not guaranteed) to be closed.
//!
//! Curved segments can be approximated with straight ones using the [`linearization`] module.
//!
//! # Features
//!
//! * `geo-types` (default) - conversions from [`geo_types`](https://docs.rs/geo-types) geometries.

pub mod crs;
pub mod error;
mod geometry;
pub mod linearization;
mod point;
mod segment;
mod surface;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use crs::Crs;
pub use geometry::{CompositeGeometry, Envelope, Geometry, MultiGeometry, Primitive, Solid};
pub use point::Point;
pub use segment::{Arc, ArcString, Circle, Curve, CurveSegment, LineStringSegment};
pub use surface::{GriddedKind, GriddedPatch, PolygonPatch, Surface, SurfacePatch};
