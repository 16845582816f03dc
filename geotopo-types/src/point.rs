use serde::{Deserialize, Serialize};

/// A position with 2 or 3 coordinates.
///
/// Points are compared by exact coordinate equality: two points are equal only if they have the same dimension and
/// all their coordinates are bitwise-equal floats (with the usual `NaN != NaN` caveat).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
    z: Option<f64>,
}

impl Point {
    /// Creates a new 2d point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a new 3d point.
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z coordinate, if the point is 3d.
    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// Number of coordinates of the point.
    pub fn dimension(&self) -> usize {
        if self.z.is_some() {
            3
        } else {
            2
        }
    }

    /// Returns true if all coordinates of the point are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.map_or(true, f64::is_finite)
    }

    /// Returns a point with the same planar coordinates and the `z` coordinate taken from `like`.
    ///
    /// Used to give interpolated points the same dimension as the points they were interpolated from.
    pub(crate) fn with_z_of(x: f64, y: f64, like: &Point) -> Self {
        Self { x, y, z: like.z }
    }
}

impl From<[f64; 2]> for Point {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<[f64; 3]> for Point {
    fn from(value: [f64; 3]) -> Self {
        Self::new_3d(value[0], value[1], value[2])
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
