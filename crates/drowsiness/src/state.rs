//! Per-track drowsiness state

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DrowsinessConfig;

/// Per-frame alarm decision, derived from the hit counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlarmDecision {
    #[default]
    Normal,
    Drowsy,
}

impl AlarmDecision {
    /// Overlay label text
    pub fn label(&self) -> &'static str {
        match self {
            AlarmDecision::Drowsy => "Drowsy",
            AlarmDecision::Normal => "Normal",
        }
    }
}

/// State for one tracked face.
///
/// The hit counter never decays: predicate-false frames leave it
/// unchanged, and an alarm wraps it modulo the configured value rather
/// than resetting it, so sustained drowsy input re-fires the alarm every
/// few confirmed hits.
#[derive(Debug, Clone, Default)]
pub struct TrackState {
    /// Confirmed drowsiness hits (never decremented, wraps on alarm)
    hits: u32,
    /// Accepted predicate-true observation timestamps, oldest first (ms)
    accepted: Vec<u64>,
}

impl TrackState {
    /// Record one frame's predicate outcome.
    ///
    /// A predicate-true observation is accepted when it is the first
    /// pending one or lies at least the configured spacing after the
    /// previously accepted one. Once the configured number of accepted
    /// observations sit inside the sliding window, the hit counter
    /// increments by exactly one and the pending set clears.
    ///
    /// Predicate-false frames change nothing except window expiry.
    pub fn observe(&mut self, drowsy: bool, now_ms: u64, config: &DrowsinessConfig) {
        // Expire observations that fell out of the sliding window
        let window = config.confirmation_window_ms;
        self.accepted
            .retain(|&ts| now_ms.saturating_sub(ts) <= window);

        if !drowsy {
            return;
        }

        let spaced = match self.accepted.last() {
            Some(&last) => now_ms.saturating_sub(last) >= config.confirmation_spacing_ms,
            None => true,
        };
        if !spaced {
            return;
        }

        self.accepted.push(now_ms);
        debug!(
            pending = self.accepted.len(),
            at_ms = now_ms,
            "accepted drowsiness confirmation"
        );

        if self.accepted.len() >= config.confirmations as usize {
            self.hits += 1;
            self.accepted.clear();
            debug!(hits = self.hits, "drowsiness hit confirmed");
        }
    }

    /// Derive this frame's alarm decision and apply the wrap.
    ///
    /// On an alarm frame the counter becomes `hits % alarm_wrap`, so the
    /// alarm re-fires after that many further confirmed hits.
    pub fn decide(&mut self, config: &DrowsinessConfig) -> AlarmDecision {
        if self.hits > config.alarm_threshold {
            self.hits %= config.alarm_wrap;
            AlarmDecision::Drowsy
        } else {
            AlarmDecision::Normal
        }
    }

    /// Confirmed hit count
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Pending accepted observations awaiting confirmation
    pub fn pending(&self) -> usize {
        self.accepted.len()
    }

    #[cfg(test)]
    pub(crate) fn with_hits(hits: u32) -> Self {
        Self {
            hits,
            ..Default::default()
        }
    }
}
