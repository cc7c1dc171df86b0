//! Alarm side channel
//!
//! When a face goes drowsy on a frame, an external audio-cue trigger is
//! invoked fire-and-forget: no acknowledgment, no core-side state.

use face_tracker::TrackId;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// One alarm firing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmEvent {
    pub track: TrackId,
    pub timestamp_ms: u64,
}

/// Audio-cue trigger seam
pub trait AlarmSink {
    fn trigger(&self, event: AlarmEvent);
}

/// Sends alarm events to an async consumer (the buzzer player).
///
/// Unbounded so the synchronous frame loop never blocks; a dropped
/// receiver silently discards events, matching the fire-and-forget
/// contract.
#[derive(Debug, Clone)]
pub struct BuzzerChannel {
    sender: mpsc::UnboundedSender<AlarmEvent>,
}

/// Create a buzzer channel and its receiving end
pub fn channel() -> (BuzzerChannel, mpsc::UnboundedReceiver<AlarmEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (BuzzerChannel { sender }, receiver)
}

impl AlarmSink for BuzzerChannel {
    fn trigger(&self, event: AlarmEvent) {
        let _ = self.sender.send(event);
    }
}

/// Logs alarms instead of playing audio
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlarmSink;

impl AlarmSink for LogAlarmSink {
    fn trigger(&self, event: AlarmEvent) {
        warn!(
            track = event.track,
            timestamp_ms = event.timestamp_ms,
            "drowsiness alarm"
        );
    }
}
