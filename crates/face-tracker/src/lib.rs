//! Face Tracker
//!
//! Assigns stable identities to face regions across frames using greedy
//! IoU association, so per-face drowsiness state survives frame-to-frame
//! jitter. Tracks unseen for longer than the absence timeout are evicted.

mod tracker;

pub use tracker::{FaceTracker, TrackId, TrackerConfig};
