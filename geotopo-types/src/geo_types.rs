//! Conversions from [`geo_types`] geometries.
//!
//! `geo_types` geometries are always linear and 2d, so conversions produce curves with a single line string segment
//! and surfaces with a single polygon patch. `geo_types` closes polygon rings on construction, so converted
//! polygons always have closed rings.
//!
//! Inside a `geo_types::Geometry` a `Rect` is an area and becomes a surface. A standalone `Rect` can also be
//! converted into an [`Envelope`].

use geo_types::{
    Coord, GeometryCollection, Line, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Polygon, Rect, Triangle,
};

use crate::error::GeometryError;
use crate::{Curve, Envelope, Geometry, MultiGeometry, Point, Surface};

impl From<Coord<f64>> for Point {
    fn from(value: Coord<f64>) -> Self {
        Point::new(value.x, value.y)
    }
}

impl From<geo_types::Point<f64>> for Point {
    fn from(value: geo_types::Point<f64>) -> Self {
        value.0.into()
    }
}

impl From<Line<f64>> for Curve {
    fn from(value: Line<f64>) -> Self {
        Curve::new_unchecked(vec![crate::LineStringSegment::new_unchecked(vec![
            value.start.into(),
            value.end.into(),
        ])
        .into()])
    }
}

impl TryFrom<&LineString<f64>> for Curve {
    type Error = GeometryError;

    fn try_from(value: &LineString<f64>) -> Result<Self, Self::Error> {
        Curve::line_string(value.coords().map(|c| Point::from(*c)).collect()).map_err(|err| {
            GeometryError::Conversion(format!("cannot convert line string: {err}"))
        })
    }
}

impl TryFrom<LineString<f64>> for Curve {
    type Error = GeometryError;

    fn try_from(value: LineString<f64>) -> Result<Self, Self::Error> {
        Curve::try_from(&value)
    }
}

impl TryFrom<&Polygon<f64>> for Surface {
    type Error = GeometryError;

    fn try_from(value: &Polygon<f64>) -> Result<Self, Self::Error> {
        let exterior = Curve::try_from(value.exterior())?;
        let interiors = value
            .interiors()
            .iter()
            .map(Curve::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Surface::polygon(exterior, interiors))
    }
}

impl TryFrom<Polygon<f64>> for Surface {
    type Error = GeometryError;

    fn try_from(value: Polygon<f64>) -> Result<Self, Self::Error> {
        Surface::try_from(&value)
    }
}

impl TryFrom<Triangle<f64>> for Surface {
    type Error = GeometryError;

    fn try_from(value: Triangle<f64>) -> Result<Self, Self::Error> {
        Surface::try_from(value.to_polygon())
    }
}

impl From<Rect<f64>> for Envelope {
    fn from(value: Rect<f64>) -> Self {
        Envelope::new(value.min().into(), value.max().into())
    }
}

impl TryFrom<geo_types::Geometry<f64>> for Geometry {
    type Error = GeometryError;

    fn try_from(value: geo_types::Geometry<f64>) -> Result<Self, Self::Error> {
        Ok(match value {
            geo_types::Geometry::Point(v) => Point::from(v).into(),
            geo_types::Geometry::Line(v) => Curve::from(v).into(),
            geo_types::Geometry::LineString(v) => Curve::try_from(v)?.into(),
            geo_types::Geometry::Polygon(v) => Surface::try_from(v)?.into(),
            geo_types::Geometry::MultiPoint(v) => multi_point(v).into(),
            geo_types::Geometry::MultiLineString(v) => multi_line_string(v)?.into(),
            geo_types::Geometry::MultiPolygon(v) => multi_polygon(v)?.into(),
            geo_types::Geometry::GeometryCollection(v) => collection(v)?.into(),
            geo_types::Geometry::Rect(v) => Surface::try_from(v.to_polygon())?.into(),
            geo_types::Geometry::Triangle(v) => Surface::try_from(v)?.into(),
        })
    }
}

fn multi_point(value: MultiPoint<f64>) -> MultiGeometry {
    MultiGeometry::new(value.into_iter().map(|p| Point::from(p).into()).collect())
}

fn multi_line_string(value: MultiLineString<f64>) -> Result<MultiGeometry, GeometryError> {
    Ok(MultiGeometry::new(
        value
            .into_iter()
            .map(|l| Curve::try_from(l).map(Geometry::from))
            .collect::<Result<_, _>>()?,
    ))
}

fn multi_polygon(value: MultiPolygon<f64>) -> Result<MultiGeometry, GeometryError> {
    Ok(MultiGeometry::new(
        value
            .into_iter()
            .map(|p| Surface::try_from(p).map(Geometry::from))
            .collect::<Result<_, _>>()?,
    ))
}

fn collection(value: GeometryCollection<f64>) -> Result<MultiGeometry, GeometryError> {
    Ok(MultiGeometry::new(
        value
            .into_iter()
            .map(Geometry::try_from)
            .collect::<Result<_, _>>()?,
    ))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use geo_types::{coord, line_string, point, polygon};

    use super::*;
    use crate::{CurveSegment, Primitive, SurfacePatch};

    #[test]
    fn point() {
        let geometry = Geometry::try_from(geo_types::Geometry::Point(point!(x: 1.0, y: 2.0)))
            .expect("convertible");
        assert_eq!(geometry, Point::new(1.0, 2.0).into());
    }

    #[test]
    fn line_string() {
        let curve = Curve::try_from(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)])
            .expect("convertible");
        assert_eq!(curve.segments().len(), 1);
        assert_matches!(&curve.segments()[0], CurveSegment::LineString(s) if s.points().len() == 2);
    }

    #[test]
    fn too_short_line_string() {
        assert_matches!(
            Curve::try_from(LineString::<f64>::new(vec![coord! {x: 0.0, y: 0.0}])),
            Err(GeometryError::Conversion(_))
        );
    }

    #[test]
    fn polygon_with_hole() {
        let polygon = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
            interiors: [[(x: 2.0, y: 2.0), (x: 2.0, y: 4.0), (x: 4.0, y: 4.0), (x: 4.0, y: 2.0)]],
        );
        let surface = Surface::try_from(polygon).expect("convertible");
        let SurfacePatch::Polygon(patch) = &surface.patches()[0] else {
            panic!("expected polygon patch");
        };

        assert!(patch.exterior_ring().is_closed());
        assert_eq!(patch.interior_rings().len(), 1);
        assert!(patch.interior_rings()[0].is_closed());
    }

    #[test]
    fn rect_as_envelope() {
        let envelope = Envelope::from(Rect::new(coord! {x: 2.0, y: 0.0}, coord! {x: 0.0, y: 1.0}));
        assert_eq!(envelope.min(), &Point::new(0.0, 0.0));
        assert_eq!(envelope.max(), &Point::new(2.0, 1.0));
    }

    #[test]
    fn collection() {
        let collection = geo_types::Geometry::GeometryCollection(GeometryCollection::new_from(vec![
            point!(x: 1.0, y: 2.0).into(),
            Rect::new(coord! {x: 0.0, y: 0.0}, coord! {x: 1.0, y: 1.0}).into(),
        ]));
        let Geometry::Multi(multi) = Geometry::try_from(collection).expect("convertible") else {
            panic!("expected multi geometry");
        };

        assert_eq!(multi.members().len(), 2);
        assert_matches!(multi.members()[0], Geometry::Primitive(Primitive::Point(_)));
        assert_matches!(
            multi.members()[1],
            Geometry::Primitive(Primitive::Surface(_))
        );
    }
}
