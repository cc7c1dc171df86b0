//! Drowsiness configuration

use face_geometry::FaceRatios;
use serde::{Deserialize, Serialize};

/// Drowsiness state machine configuration.
///
/// Threshold constants match the field-tuned values of the reference
/// detector: a wide-open mouth only counts together with mostly-closed
/// eyes, while a high enough blink ratio counts on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrowsinessConfig {
    /// Mouth opening ratio threshold (combined clause)
    pub mouth_open_threshold: f64,

    /// Blink ratio threshold (combined clause)
    pub blink_threshold: f64,

    /// Blink ratio threshold that is drowsy on its own
    pub blink_solo_threshold: f64,

    /// Predicate-true observations required to confirm one hit
    pub confirmations: u32,

    /// Minimum spacing between accepted observations (milliseconds)
    pub confirmation_spacing_ms: u64,

    /// Sliding window; accepted observations older than this expire
    /// (milliseconds)
    pub confirmation_window_ms: u64,

    /// Alarm fires when the hit counter exceeds this
    pub alarm_threshold: u32,

    /// Counter wraps modulo this when the alarm fires
    pub alarm_wrap: u32,
}

impl Default for DrowsinessConfig {
    fn default() -> Self {
        Self {
            mouth_open_threshold: 0.4,
            blink_threshold: 4.0,
            blink_solo_threshold: 4.3,
            confirmations: 3,
            confirmation_spacing_ms: 2000,
            confirmation_window_ms: 12_000,
            alarm_threshold: 3,
            alarm_wrap: 3,
        }
    }
}

impl DrowsinessConfig {
    /// Create strict config (faster confirmation)
    pub fn strict() -> Self {
        Self {
            confirmation_spacing_ms: 1000,
            confirmation_window_ms: 6000,
            ..Default::default()
        }
    }

    /// Create lenient config (slower confirmation, later alarm)
    pub fn lenient() -> Self {
        Self {
            confirmation_spacing_ms: 3000,
            confirmation_window_ms: 18_000,
            alarm_threshold: 5,
            ..Default::default()
        }
    }

    /// The per-frame drowsy predicate
    pub fn is_drowsy(&self, ratios: FaceRatios) -> bool {
        (ratios.mouth > self.mouth_open_threshold && ratios.blink > self.blink_threshold)
            || ratios.blink > self.blink_solo_threshold
    }
}
