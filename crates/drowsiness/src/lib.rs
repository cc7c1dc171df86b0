//! Drowsiness State Machine
//!
//! Converts noisy per-frame geometric ratios into a stable alarm signal:
//! - threshold predicate over blink and mouth-opening ratios
//! - non-blocking confirmation debounce (spaced observations in a window)
//! - non-decaying hit counter with modulo wrap on alarm
//!
//! State is kept per tracked face, so multiple simultaneous faces get
//! independent alarm decisions.

pub mod config;
pub mod state;

pub use config::DrowsinessConfig;
pub use state::{AlarmDecision, TrackState};

use std::collections::HashMap;

use face_geometry::FaceRatios;
use face_tracker::TrackId;
use tracing::info;

/// Drowsiness monitor: one state machine per tracked face
pub struct DrowsinessMonitor {
    config: DrowsinessConfig,
    states: HashMap<TrackId, TrackState>,
}

impl DrowsinessMonitor {
    pub fn new(config: DrowsinessConfig) -> Self {
        Self {
            config,
            states: HashMap::new(),
        }
    }

    /// Step one track's state machine with this frame's ratios and return
    /// the alarm decision. State is created on first sighting.
    pub fn observe(&mut self, track: TrackId, ratios: FaceRatios, now_ms: u64) -> AlarmDecision {
        let drowsy = self.config.is_drowsy(ratios);
        let state = self.states.entry(track).or_default();
        state.observe(drowsy, now_ms, &self.config);

        let decision = state.decide(&self.config);
        if decision == AlarmDecision::Drowsy {
            info!(track, hits = state.hits(), "drowsiness alarm");
        }
        decision
    }

    /// Drop state for an evicted track
    pub fn drop_track(&mut self, track: TrackId) {
        self.states.remove(&track);
    }

    /// State for one track, if it has been observed
    pub fn state(&self, track: TrackId) -> Option<&TrackState> {
        self.states.get(&track)
    }

    /// Number of tracks with live state
    pub fn tracked(&self) -> usize {
        self.states.len()
    }

    /// Clear all per-track state (on session change)
    pub fn reset(&mut self) {
        self.states.clear();
    }
}

impl Default for DrowsinessMonitor {
    fn default() -> Self {
        Self::new(DrowsinessConfig::default())
    }
}
