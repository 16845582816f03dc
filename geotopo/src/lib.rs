//! Topological validation of ISO 19107 / Simple Feature geometries.
//!
//! [`GeometryValidator`] walks a [`Geometry`](geotopo_types::Geometry) and checks that
//!
//! * curves are continuous, have no repeated control points and do not intersect themselves;
//! * polygon rings are closed, exterior rings are counter-clockwise and interior rings clockwise;
//! * interior rings lie inside the exterior ring and do not touch, cross or contain each other.
//!
//! Every found anomaly is reported to a [`ValidationEventHandler`], which decides whether the anomaly makes the
//! geometry invalid. The validator never stops at the first anomaly, so a handler can collect all of them:
//!
//! ```
//! use geotopo::{GeometryValidator, RecordingHandler, ValidationEventKind};
//! use geotopo::geotopo_types::{Curve, Point, Surface};
//!
//! let exterior = Curve::line_string(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//!     Point::new(0.0, 0.0),
//! ])?;
//! let hole = Curve::line_string(vec![
//!     Point::new(12.0, 2.0),
//!     Point::new(12.0, 4.0),
//!     Point::new(14.0, 4.0),
//!     Point::new(14.0, 2.0),
//!     Point::new(12.0, 2.0),
//! ])?;
//!
//! let mut handler = RecordingHandler::new();
//! let is_valid = GeometryValidator::new()
//!     .validate(&Surface::polygon(exterior, vec![hole]).into(), &mut handler)?;
//!
//! assert!(!is_valid);
//! assert_eq!(handler.kinds(), vec![ValidationEventKind::InteriorRingOutsideExterior]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Curved segments are linearized before the planar checks, see
//! [`GeometryValidatorBuilder::with_criterion`].
//!
//! Independently of the topology, [`CrsDimensionCheck`] verifies that the coordinates of a geometry have as many
//! dimensions as its coordinate reference system.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod context;
pub mod crs_check;
pub mod error;
pub mod event;
pub mod handler;
pub mod predicates;
pub mod validator;

pub use context::{GeometryParticle, ValidationContext};
pub use crs_check::{CrsDimensionCheck, CrsResolver, KnownCrsRegistry};
pub use event::{ValidationEvent, ValidationEventKind};
pub use geotopo_types;
pub use handler::{
    LenientHandler, RecordedEvent, RecordingHandler, StrictHandler, ValidationEventHandler,
};
pub use predicates::{GeoPredicates, PlanarPredicates, PlanarRing};
pub use validator::{
    GeometryValidator, GeometryValidatorBuilder, PredicateErrorPolicy, ValidatorConfig,
};
