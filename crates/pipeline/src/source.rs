//! Frame input seam
//!
//! Capture transport and landmark inference live outside the core. A
//! `FrameSource` hands the orchestrator fully observed frames: face
//! regions with their 68-point landmark sets, stamped with the frame
//! clock. Implementations own their detector/predictor models, loaded
//! once at construction and borrowed read-only for every frame after.

use face_geometry::{FaceRegion, LandmarkSet, Point, LANDMARK_COUNT};
use face_geometry::landmarks::{INNER_LIP, LEFT_EYE, OUTER_LIP, RIGHT_EYE};
use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// One detected face in one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceObservation {
    pub region: FaceRegion,
    pub landmarks: LandmarkSet,
}

/// All observations for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameObservations {
    /// Milliseconds since session start (frame clock)
    pub timestamp_ms: u64,
    pub faces: Vec<FaceObservation>,
}

/// Blocking frame supplier.
///
/// `Ok(None)` signals end-of-stream (user closed the video) and is the
/// processing loop's sole exit condition.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<FrameObservations>, PipelineError>;
}

/// Replays a pre-built sequence of frames.
///
/// Stands in for a live detector in the demo binary and in tests, the
/// same way the production source would wrap a webcam plus landmark
/// predictor.
pub struct ScriptedSource {
    frames: std::vec::IntoIter<FrameObservations>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<FrameObservations>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }

    /// A session that starts awake and then sustains drowsy ratios long
    /// enough to fire the alarm: 5 fps, 10 s awake, 30 s drowsy.
    pub fn drowsy_session() -> Self {
        let region = FaceRegion::new(200, 120, 440, 360);
        let frames = (0..200)
            .map(|i| {
                let timestamp_ms = i * 200;
                let (blink, mouth) = if timestamp_ms < 10_000 {
                    (3.0, 0.1)
                } else {
                    (4.5, 0.1)
                };
                FrameObservations {
                    timestamp_ms,
                    faces: vec![FaceObservation {
                        region,
                        landmarks: synthetic_landmarks(blink, mouth),
                    }],
                }
            })
            .collect();
        Self::new(frames)
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<FrameObservations>, PipelineError> {
        Ok(self.frames.next())
    }
}

/// Build a landmark set whose blink and mouth ratios come out at the
/// requested values (to 0.1 / 0.01 precision, integer pixel grid).
///
/// Both eyes get a 10 px vertical opening with the horizontal width
/// scaled to hit the blink target; both lip rings get a 100 px width
/// with the vertical opening scaled to hit the mouth target. All other
/// landmarks stay at the origin; the ratio calculator never reads them.
pub fn synthetic_landmarks(blink: f64, mouth: f64) -> LandmarkSet {
    let mut points = vec![Point::default(); LANDMARK_COUNT];

    let eye_width = (blink * 10.0).round() as i32;
    for eye in [LEFT_EYE, RIGHT_EYE] {
        points[eye[0]] = Point::new(0, 0);
        points[eye[1]] = Point::new(0, -5);
        points[eye[2]] = Point::new(0, -5);
        points[eye[3]] = Point::new(eye_width, 0);
        points[eye[4]] = Point::new(0, 5);
        points[eye[5]] = Point::new(0, 5);
    }

    let lip_opening = (mouth * 100.0).round() as i32;
    for lip in [INNER_LIP, OUTER_LIP] {
        points[lip[0]] = Point::new(0, 0);
        points[lip[1]] = Point::new(50, -(lip_opening - lip_opening / 2));
        points[lip[2]] = Point::new(100, 0);
        points[lip[3]] = Point::new(50, lip_opening / 2);
    }

    LandmarkSet::new(points).expect("landmark count is fixed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_geometry::FaceRatios;

    #[test]
    fn test_synthetic_landmarks_hit_targets() {
        let ratios = FaceRatios::from_landmarks(&synthetic_landmarks(4.5, 0.4));
        assert!((ratios.blink - 4.5).abs() < 1e-9);
        assert!((ratios.mouth - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_synthetic_landmarks_odd_opening() {
        let ratios = FaceRatios::from_landmarks(&synthetic_landmarks(4.3, 0.25));
        assert!((ratios.blink - 4.3).abs() < 1e-9);
        assert!((ratios.mouth - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_scripted_source_drains() {
        let mut source = ScriptedSource::new(vec![FrameObservations {
            timestamp_ms: 0,
            faces: vec![],
        }]);
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }
}
