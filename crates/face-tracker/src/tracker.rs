//! Greedy IoU tracker implementation

use std::collections::HashMap;

use face_geometry::FaceRegion;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Stable face identity across frames
pub type TrackId = u64;

/// Tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Minimum IoU overlap to match a region to an existing track
    pub iou_threshold: f64,
    /// Evict a track unseen for this long (milliseconds, frame clock)
    pub absence_timeout_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.3,
            absence_timeout_ms: 5000,
        }
    }
}

/// One live track
#[derive(Debug, Clone)]
struct Track {
    region: FaceRegion,
    last_seen_ms: u64,
}

/// IoU-based face tracker.
///
/// Timestamps come from the frame clock (milliseconds since session
/// start), not wall clock, so replayed footage behaves deterministically.
pub struct FaceTracker {
    config: TrackerConfig,
    tracks: HashMap<TrackId, Track>,
    next_id: TrackId,
}

impl FaceTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            tracks: HashMap::new(),
            next_id: 1,
        }
    }

    /// Assign a track id to each detected region.
    ///
    /// Each region greedily claims the unclaimed live track with the
    /// highest IoU above the threshold; unmatched regions open new tracks.
    /// Returns ids in the same order as the input regions.
    pub fn assign(&mut self, regions: &[FaceRegion], now_ms: u64) -> Vec<TrackId> {
        let mut claimed: Vec<TrackId> = Vec::with_capacity(regions.len());
        let mut ids = Vec::with_capacity(regions.len());

        for region in regions {
            let best = self
                .tracks
                .iter()
                .filter(|(id, _)| !claimed.contains(*id))
                .map(|(id, track)| (*id, track.region.iou(region)))
                .filter(|(_, iou)| *iou >= self.config.iou_threshold)
                .max_by(|a, b| a.1.total_cmp(&b.1));

            let id = match best {
                Some((id, iou)) => {
                    debug!(track = id, iou, "matched face region to track");
                    id
                }
                None => {
                    let id = self.next_id;
                    self.next_id += 1;
                    info!(track = id, "opened new face track");
                    id
                }
            };

            self.tracks.insert(
                id,
                Track {
                    region: *region,
                    last_seen_ms: now_ms,
                },
            );
            claimed.push(id);
            ids.push(id);
        }

        ids
    }

    /// Evict tracks unseen for longer than the absence timeout.
    ///
    /// Returns the evicted ids so callers can drop dependent state.
    pub fn evict_stale(&mut self, now_ms: u64) -> Vec<TrackId> {
        let timeout = self.config.absence_timeout_ms;
        let stale: Vec<TrackId> = self
            .tracks
            .iter()
            .filter(|(_, track)| now_ms.saturating_sub(track.last_seen_ms) > timeout)
            .map(|(id, _)| *id)
            .collect();

        for id in &stale {
            self.tracks.remove(id);
            info!(track = id, "evicted stale face track");
        }
        stale
    }

    /// Number of live tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(left: i32, top: i32) -> FaceRegion {
        FaceRegion::new(left, top, left + 100, top + 100)
    }

    #[test]
    fn test_identity_stable_under_jitter() {
        let mut tracker = FaceTracker::new(TrackerConfig::default());
        let first = tracker.assign(&[region(200, 100)], 0);
        // Same face, shifted a few pixels
        let second = tracker.assign(&[region(205, 103)], 33);
        assert_eq!(first, second);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_distant_region_opens_new_track() {
        let mut tracker = FaceTracker::new(TrackerConfig::default());
        let first = tracker.assign(&[region(0, 0)], 0);
        let second = tracker.assign(&[region(500, 500)], 33);
        assert_ne!(first, second);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_two_faces_keep_separate_ids() {
        let mut tracker = FaceTracker::new(TrackerConfig::default());
        let ids = tracker.assign(&[region(0, 0), region(400, 0)], 0);
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);

        // Next frame, same two faces slightly moved, reversed order
        let ids2 = tracker.assign(&[region(402, 2), region(2, 1)], 33);
        assert_eq!(ids2[0], ids[1]);
        assert_eq!(ids2[1], ids[0]);
    }

    #[test]
    fn test_eviction_after_absence_timeout() {
        let mut tracker = FaceTracker::new(TrackerConfig::default());
        let ids = tracker.assign(&[region(0, 0)], 0);

        // Still within the timeout
        assert!(tracker.evict_stale(4000).is_empty());
        assert_eq!(tracker.len(), 1);

        let evicted = tracker.evict_stale(6000);
        assert_eq!(evicted, ids);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_reappearance_after_eviction_gets_fresh_id() {
        let mut tracker = FaceTracker::new(TrackerConfig::default());
        let first = tracker.assign(&[region(0, 0)], 0);
        tracker.evict_stale(10_000);
        let second = tracker.assign(&[region(0, 0)], 10_033);
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_frame_changes_nothing() {
        let mut tracker = FaceTracker::new(TrackerConfig::default());
        tracker.assign(&[region(0, 0)], 0);
        let ids = tracker.assign(&[], 33);
        assert!(ids.is_empty());
        assert_eq!(tracker.len(), 1);
    }
}
