//! Coordinate reference system identifiers.
//!
//! Only the identity of a CRS is modelled here. What the CRS actually is (its dimension, axes, datum) is resolved
//! elsewhere, see `geotopo::crs_check`.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Authority-qualified CRS identifier, e.g. `EPSG:4326`.
///
/// The many spellings of the same identifier used by OGC services are normalized by [`Crs::parse`], so
/// `EPSG:4326`, `urn:ogc:def:crs:EPSG::4326` and `http://www.opengis.net/def/crs/EPSG/0/4326` are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs {
    authority: Cow<'static, str>,
    code: Cow<'static, str>,
}

impl Crs {
    /// WGS 84 geographic 2D, latitude first.
    pub const EPSG4326: Crs = Crs::borrowed("EPSG", "4326");
    /// WGS 84 geographic 3D.
    pub const EPSG4979: Crs = Crs::borrowed("EPSG", "4979");
    /// WGS 84 / Pseudo-Mercator.
    pub const EPSG3857: Crs = Crs::borrowed("EPSG", "3857");
    /// WGS 84 geographic 2D, longitude first.
    pub const CRS84: Crs = Crs::borrowed("OGC", "CRS84");

    const fn borrowed(authority: &'static str, code: &'static str) -> Self {
        Self {
            authority: Cow::Borrowed(authority),
            code: Cow::Borrowed(code),
        }
    }

    /// Creates an identifier from its parts. The authority is upper-cased.
    pub fn new(authority: &str, code: &str) -> Self {
        Self {
            authority: Cow::Owned(authority.to_uppercase()),
            code: Cow::Owned(code.to_string()),
        }
    }

    /// Parses one of the usual spellings of a CRS identifier:
    ///
    /// * `EPSG:4326`, `CRS:84`, `OGC:CRS84`;
    /// * `urn:ogc:def:crs:EPSG::4326`, `urn:ogc:def:crs:EPSG:6.6:4326`, `urn:x-ogc:def:crs:EPSG:4326`;
    /// * `http://www.opengis.net/def/crs/EPSG/0/4326`;
    /// * `http://www.opengis.net/gml/srs/epsg.xml#4326`.
    pub fn parse(identifier: &str) -> Result<Self, GeometryError> {
        let identifier = identifier.trim();
        let invalid = || GeometryError::InvalidCrs(identifier.to_string());

        if identifier.eq_ignore_ascii_case("CRS:84") {
            return Ok(Self::CRS84);
        }

        let (authority, code) = if let Some((_, code)) = identifier.split_once("epsg.xml#") {
            ("EPSG", code)
        } else if identifier.starts_with("http://") || identifier.starts_with("https://") {
            let mut parts = identifier.rsplit('/');
            let code = parts.next().ok_or_else(invalid)?;
            let _version = parts.next().ok_or_else(invalid)?;
            let authority = parts.next().ok_or_else(invalid)?;
            (authority, code)
        } else if identifier.to_ascii_lowercase().starts_with("urn:") {
            let parts: Vec<&str> = identifier.split(':').collect();
            let crs_position = parts
                .iter()
                .position(|p| p.eq_ignore_ascii_case("crs"))
                .ok_or_else(invalid)?;
            let authority = parts.get(crs_position + 1).ok_or_else(invalid)?;
            let code = parts.last().ok_or_else(invalid)?;
            if parts.len() < crs_position + 3 {
                return Err(invalid());
            }
            (*authority, *code)
        } else {
            identifier.split_once(':').ok_or_else(invalid)?
        };

        if authority.is_empty() || code.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(authority, code))
    }

    /// Authority, e.g. `EPSG`.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Code within the authority, e.g. `4326`.
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

impl std::str::FromStr for Crs {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
