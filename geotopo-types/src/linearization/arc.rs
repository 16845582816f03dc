//! Circular arc math used for linearization.
//!
//! All computations are done on points shifted to the centre of their bounding box to reduce floating point errors
//! for large coordinates (e.g. projected CRS with coordinates in millions of meters).

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::point::Point;

const COLLINEARITY_EPSILON: f64 = 1e-6;
const FULL_CIRCLE_EPSILON: f64 = 1e-10;
const TWO_PI: f64 = PI * 2.0;

/// Shift that moves the bounding box centre of the three points to the origin.
fn shift(p0: &Point, p1: &Point, p2: &Point) -> (f64, f64) {
    let mid = |a: f64, b: f64, c: f64| (a.min(b).min(c) + a.max(b).max(c)) / 2.0;
    (
        mid(p0.x(), p1.x(), p2.x()),
        mid(p0.y(), p1.y(), p2.y()),
    )
}

fn shifted(p: &Point, (dx, dy): (f64, f64)) -> Vector3<f64> {
    Vector3::new(p.x() - dx, p.y() - dy, 0.0)
}

/// Twice the signed area of the triangle, positive for counter-clockwise order.
fn signed_area_2(p0: &Point, p1: &Point, p2: &Point) -> f64 {
    let s = shift(p0, p1, p2);
    let (a, b, c) = (shifted(p0, s), shifted(p1, s), shifted(p2, s));
    (b - a).cross(&(c - a)).z
}

/// Returns true if the three points lie (almost) on one line.
pub fn are_collinear(p0: &Point, p1: &Point, p2: &Point) -> bool {
    (signed_area_2(p0, p1, p2) / 2.0).abs() < COLLINEARITY_EPSILON
}

/// Returns true if going `p0 -> p1 -> p2` turns clockwise.
///
/// The result is meaningless for collinear points.
pub fn is_clockwise(p0: &Point, p1: &Point, p2: &Point) -> bool {
    signed_area_2(p0, p1, p2) < 0.0
}

/// Centre of the circle through the three points. Returns `None` if the points are collinear.
pub fn circle_center(p0: &Point, p1: &Point, p2: &Point) -> Option<(f64, f64)> {
    if are_collinear(p0, p1, p2) {
        return None;
    }

    let s = shift(p0, p1, p2);
    let (a, b, c) = (shifted(p0, s), shifted(p1, s), shifted(p2, s));

    let ab = a - b;
    let ac = a - c;
    let bc = b - c;
    let ba = b - a;
    let ca = c - a;
    let cb = c - b;

    let cross_sq = 2.0 * ab.cross(&bc).norm_squared();

    let alpha = bc.norm_squared() * ab.dot(&ac) / cross_sq;
    let beta = ac.norm_squared() * ba.dot(&bc) / cross_sq;
    let gamma = ab.norm_squared() * ca.dot(&cb) / cross_sq;

    let center = a * alpha + b * beta + c * gamma;
    Some((center.x + s.0, center.y + s.1))
}

struct ArcGeometry {
    center: (f64, f64),
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    clockwise: bool,
}

impl ArcGeometry {
    fn new(p0: &Point, p1: &Point, p2: &Point, is_circle: bool) -> Option<Self> {
        let center = circle_center(p0, p1, p2)?;
        let dx = p0.x() - center.0;
        let dy = p0.y() - center.1;
        let start_angle = dy.atan2(dx);
        let end_angle = if is_circle {
            start_angle
        } else {
            (p2.y() - center.1).atan2(p2.x() - center.0)
        };

        Some(Self {
            center,
            radius: (dx * dx + dy * dy).sqrt(),
            start_angle,
            end_angle,
            clockwise: is_clockwise(p0, p1, p2),
        })
    }

    /// Absolute angle covered by the arc.
    fn sweep(&self) -> f64 {
        let diff = self.start_angle - self.end_angle;
        if diff.abs() < FULL_CIRCLE_EPSILON {
            return TWO_PI;
        }

        match (self.clockwise, diff < 0.0) {
            (true, true) => diff + TWO_PI,
            (true, false) => diff,
            (false, true) => -diff,
            (false, false) => TWO_PI - diff,
        }
    }

    fn angle_step(&self, num_points: usize) -> f64 {
        let step = self.sweep() / (num_points - 1) as f64;
        if self.clockwise {
            -step
        } else {
            step
        }
    }
}

/// Interpolates `num_points` points on the arc (or circle) through the three points. The first and the last points
/// of the result are exactly the given start and end points.
///
/// Returns `None` if the points are collinear.
pub fn interpolate(
    p0: &Point,
    p1: &Point,
    p2: &Point,
    num_points: usize,
    is_circle: bool,
) -> Option<Vec<Point>> {
    let arc = ArcGeometry::new(p0, p1, p2, is_circle)?;
    let num_points = num_points.max(2);
    let step = arc.angle_step(num_points);

    let mut points = Vec::with_capacity(num_points);
    points.push(*p0);
    for i in 1..num_points - 1 {
        let angle = arc.start_angle + i as f64 * step;
        points.push(Point::with_z_of(
            arc.center.0 + angle.cos() * arc.radius,
            arc.center.1 + angle.sin() * arc.radius,
            p0,
        ));
    }
    points.push(if is_circle { *p0 } else { *p2 });

    Some(points)
}

/// Number of points needed so that no chord of the approximation deviates from the arc by more than `max_error`.
///
/// Returns `None` if the points are collinear.
pub fn num_points_for_error(
    p0: &Point,
    p1: &Point,
    p2: &Point,
    is_circle: bool,
    max_error: f64,
) -> Option<usize> {
    let arc = ArcGeometry::new(p0, p1, p2, is_circle)?;
    let angle_step = 2.0 * (1.0 - max_error / arc.radius).max(-1.0).acos();
    // float to int casts saturate, a zero step ends up as usize::MAX
    Some(((arc.sweep() / angle_step).ceil() + 2.0) as usize)
}
