//! Landmark and face region types

use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Number of points in the standard facial landmark scheme
pub const LANDMARK_COUNT: usize = 68;

/// Landmark indices for the left eye
pub const LEFT_EYE: [usize; 6] = [36, 37, 38, 39, 40, 41];

/// Landmark indices for the right eye
pub const RIGHT_EYE: [usize; 6] = [42, 43, 44, 45, 46, 47];

/// Landmark indices for the inner lip (left, top, right, bottom)
pub const INNER_LIP: [usize; 4] = [60, 62, 64, 66];

/// Landmark indices for the outer lip (left, top, right, bottom)
pub const OUTER_LIP: [usize; 4] = [48, 51, 54, 57];

/// 2D pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Midpoint of two points (integer coordinates, truncating)
    pub fn midpoint(a: Point, b: Point) -> Point {
        Point {
            x: (a.x + b.x) / 2,
            y: (a.y + b.y) / 2,
        }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }
}

/// Ordered 68-point landmark set for one face in one frame.
///
/// Immutable once constructed; owned by the orchestrator for the
/// frame's lifetime and never persisted across frames. Serialized as a
/// bare point sequence; deserialization goes through the same length
/// check as the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    /// Build a landmark set, rejecting anything but exactly 68 points
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() != LANDMARK_COUNT {
            return Err(GeometryError::LandmarkCount(points.len()));
        }
        Ok(Self { points })
    }

    /// Point at a landmark index
    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    /// Select six points by landmark index (eye convention)
    pub fn select6(&self, indices: [usize; 6]) -> [Point; 6] {
        indices.map(|i| self.point(i))
    }

    /// Select four points by landmark index (lip convention)
    pub fn select4(&self, indices: [usize; 4]) -> [Point; 4] {
        indices.map(|i| self.point(i))
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = GeometryError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<LandmarkSet> for Vec<Point> {
    fn from(set: LandmarkSet) -> Self {
        set.points
    }
}

/// Face bounding region in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRegion {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FaceRegion {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Bounding box as `[left, top, right, bottom]`
    pub fn as_bbox(&self) -> [i32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    /// Intersection-over-union overlap with another region.
    ///
    /// Returns 0.0 when the union is empty.
    pub fn iou(&self, other: &FaceRegion) -> f64 {
        let ileft = self.left.max(other.left);
        let itop = self.top.max(other.top);
        let iright = self.right.min(other.right);
        let ibottom = self.bottom.min(other.bottom);

        let iw = (iright - ileft).max(0) as i64;
        let ih = (ibottom - itop).max(0) as i64;
        let intersection = iw * ih;

        let union = self.area() + other.area() - intersection;
        if union <= 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}
