//! Facial Landmark Geometry
//!
//! Pure geometric primitives for drowsiness analysis:
//! - 68-point facial landmark sets
//! - Face regions with IoU overlap
//! - Eye and mouth aspect ratios

pub mod landmarks;
pub mod ratios;

pub use landmarks::{FaceRegion, LandmarkSet, Point, LANDMARK_COUNT};
pub use ratios::{blink_ratio, eye_aspect_ratio, mouth_aspect_ratio, mouth_open_ratio, FaceRatios};

use thiserror::Error;

/// Geometry error types
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Expected 68 landmarks, got {0}")]
    LandmarkCount(usize),
}
