//! Aspect ratio computation
//!
//! Scalar proxies for eye closure and mouth opening derived from landmark
//! distances. Note the eye ratio is horizontal/vertical, the inverse of the
//! usual EAR convention: a larger value means the eye is MORE closed.

use serde::{Deserialize, Serialize};

use crate::landmarks::{LandmarkSet, Point, INNER_LIP, LEFT_EYE, OUTER_LIP, RIGHT_EYE};

/// Per-face ratio pair for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceRatios {
    /// Mean of left/right eye aspect ratios (larger = more closed)
    pub blink: f64,
    /// Mean of inner/outer lip aspect ratios (larger = more open)
    pub mouth: f64,
}

impl FaceRatios {
    /// Compute both ratios from a landmark set
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        Self {
            blink: blink_ratio(landmarks),
            mouth: mouth_open_ratio(landmarks),
        }
    }
}

/// Eye aspect ratio over six ordered points.
///
/// Points: [0] left corner, [3] right corner, [1]/[2] upper lid pair,
/// [5]/[4] lower lid pair. Returns horizontal corner distance over the
/// vertical distance between the lid-pair midpoints. Returns infinity
/// when the lid midpoints coincide (zero vertical opening).
pub fn eye_aspect_ratio(points: &[Point; 6]) -> f64 {
    let horizontal = points[0].distance_to(points[3]);
    let top = Point::midpoint(points[1], points[2]);
    let bottom = Point::midpoint(points[5], points[4]);
    let vertical = top.distance_to(bottom);

    if vertical == 0.0 {
        return f64::INFINITY;
    }
    horizontal / vertical
}

/// Mouth aspect ratio over four ordered points.
///
/// Points: [0] left corner, [2] right corner, [1] top center,
/// [3] bottom center. Returns vertical opening over horizontal width.
/// When the corners coincide the raw vertical distance is returned
/// instead of dividing.
pub fn mouth_aspect_ratio(points: &[Point; 4]) -> f64 {
    let horizontal = points[0].distance_to(points[2]);
    let vertical = points[1].distance_to(points[3]);

    if horizontal == 0.0 {
        return vertical;
    }
    vertical / horizontal
}

/// Blink ratio for a face: mean of the two eye aspect ratios
pub fn blink_ratio(landmarks: &LandmarkSet) -> f64 {
    let left = eye_aspect_ratio(&landmarks.select6(LEFT_EYE));
    let right = eye_aspect_ratio(&landmarks.select6(RIGHT_EYE));
    (left + right) / 2.0
}

/// Mouth opening ratio for a face: mean of inner and outer lip ratios
pub fn mouth_open_ratio(landmarks: &LandmarkSet) -> f64 {
    let inner = mouth_aspect_ratio(&landmarks.select4(INNER_LIP));
    let outer = mouth_aspect_ratio(&landmarks.select4(OUTER_LIP));
    (inner + outer) / 2.0
}
