//! Frame Orchestrator
//!
//! Per incoming frame: assign track identities to detected faces, compute
//! geometric ratios, step each face's drowsiness state machine, emit one
//! overlay instruction per face, and invoke the audio-cue side channel on
//! alarm frames. Single-threaded and synchronous: the loop blocks on
//! frame acquisition and processes faces serially.

pub mod alarm;
pub mod config;
pub mod render;
pub mod source;

pub use alarm::{AlarmEvent, AlarmSink, BuzzerChannel, LogAlarmSink};
pub use config::PipelineConfig;
pub use render::{LogRenderSink, RenderInstruction, RenderSink};
pub use source::{FaceObservation, FrameObservations, FrameSource, ScriptedSource};

use drowsiness::{AlarmDecision, DrowsinessMonitor};
use face_geometry::FaceRatios;
use face_tracker::FaceTracker;
use thiserror::Error;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Pipeline error types
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Frame source failed: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] face_geometry::GeometryError),
}

/// The frame-by-frame drowsiness pipeline
pub struct Pipeline<A: AlarmSink> {
    tracker: FaceTracker,
    monitor: DrowsinessMonitor,
    alarm: A,
}

impl<A: AlarmSink> Pipeline<A> {
    pub fn new(config: PipelineConfig, alarm: A) -> Self {
        Self {
            tracker: FaceTracker::new(config.tracker),
            monitor: DrowsinessMonitor::new(config.drowsiness),
            alarm,
        }
    }

    /// Process one frame's observations into overlay instructions.
    ///
    /// A frame with no faces performs no state transition and yields an
    /// empty instruction set; existing track state is left untouched
    /// until the absence timeout evicts it.
    pub fn process_frame(&mut self, frame: &FrameObservations) -> Vec<RenderInstruction> {
        let now_ms = frame.timestamp_ms;

        for evicted in self.tracker.evict_stale(now_ms) {
            self.monitor.drop_track(evicted);
        }

        if frame.faces.is_empty() {
            return Vec::new();
        }

        let regions: Vec<_> = frame.faces.iter().map(|f| f.region).collect();
        let ids = self.tracker.assign(&regions, now_ms);

        let mut instructions = Vec::with_capacity(frame.faces.len());
        for (face, &track) in frame.faces.iter().zip(ids.iter()) {
            let ratios = FaceRatios::from_landmarks(&face.landmarks);
            debug!(track, blink = ratios.blink, mouth = ratios.mouth, "face ratios");

            let decision = self.monitor.observe(track, ratios, now_ms);
            if decision == AlarmDecision::Drowsy {
                self.alarm.trigger(AlarmEvent {
                    track,
                    timestamp_ms: now_ms,
                });
            }
            instructions.push(RenderInstruction::new(&face.region, decision));
        }
        instructions
    }

    /// Drive the pipeline until the source signals end-of-stream.
    ///
    /// Returns the number of frames processed.
    pub fn run<S: FrameSource, R: RenderSink>(
        &mut self,
        source: &mut S,
        display: &mut R,
    ) -> Result<u64, PipelineError> {
        let mut frames = 0u64;
        while let Some(frame) = source.next_frame()? {
            let instructions = self.process_frame(&frame);
            display.render(frame.timestamp_ms, &instructions);
            frames += 1;
        }
        info!(frames, "capture stream ended");
        Ok(frames)
    }
}

/// Install the global tracing subscriber
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CollectingRenderSink;
    use crate::source::synthetic_landmarks;
    use face_geometry::{FaceRegion, LandmarkSet};
    use std::sync::mpsc as std_mpsc;

    struct TestAlarmSink(std_mpsc::Sender<AlarmEvent>);

    impl AlarmSink for TestAlarmSink {
        fn trigger(&self, event: AlarmEvent) {
            self.0.send(event).unwrap();
        }
    }

    fn frame(timestamp_ms: u64, blink: f64, mouth: f64) -> FrameObservations {
        FrameObservations {
            timestamp_ms,
            faces: vec![FaceObservation {
                region: FaceRegion::new(200, 120, 440, 360),
                landmarks: synthetic_landmarks(blink, mouth),
            }],
        }
    }

    fn pipeline() -> (Pipeline<TestAlarmSink>, std_mpsc::Receiver<AlarmEvent>) {
        let (tx, rx) = std_mpsc::channel();
        (
            Pipeline::new(PipelineConfig::default(), TestAlarmSink(tx)),
            rx,
        )
    }

    #[test]
    fn test_empty_frame_yields_no_instructions() {
        let (mut pipeline, rx) = pipeline();
        let instructions = pipeline.process_frame(&FrameObservations {
            timestamp_ms: 0,
            faces: vec![],
        });
        assert!(instructions.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_awake_face_renders_normal_green() {
        let (mut pipeline, rx) = pipeline();
        let instructions = pipeline.process_frame(&frame(0, 3.0, 0.1));
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].label, "Normal");
        assert_eq!(instructions[0].color, render::NORMAL_COLOR);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_sustained_drowsiness_fires_alarm_once_per_alarm_frame() {
        let (mut pipeline, rx) = pipeline();

        let mut drowsy_frames = Vec::new();
        for i in 0..15 {
            let instructions = pipeline.process_frame(&frame(i * 2000, 4.5, 0.1));
            if instructions[0].label == "Drowsy" {
                drowsy_frames.push(i);
            }
        }

        // 4 hits of 3 spaced confirmations land the alarm on frame 11
        assert_eq!(drowsy_frames, vec![11]);
        let event = rx.try_recv().unwrap();
        assert_eq!(event.timestamp_ms, 11 * 2000);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_alarm_frame_renders_red_box() {
        let (mut pipeline, _rx) = pipeline();
        let mut alarm_instruction = None;
        for i in 0..15 {
            let instructions = pipeline.process_frame(&frame(i * 2000, 4.5, 0.1));
            if instructions[0].label == "Drowsy" {
                alarm_instruction = Some(instructions[0].clone());
                break;
            }
        }
        let instruction = alarm_instruction.expect("no alarm frame");
        assert_eq!(instruction.color, render::DROWSY_COLOR);
        assert_eq!(instruction.bbox, [200, 120, 440, 360]);
    }

    #[test]
    fn test_face_absence_preserves_state_until_timeout() {
        let (mut pipeline, _rx) = pipeline();

        // Two confirmed hits
        for i in 0..7 {
            pipeline.process_frame(&frame(i * 2000, 4.5, 0.1));
        }

        // Short absence: state survives
        pipeline.process_frame(&FrameObservations {
            timestamp_ms: 15_000,
            faces: vec![],
        });

        // Same face reappears within the timeout, same track resumes
        let instructions = pipeline.process_frame(&frame(16_000, 3.0, 0.1));
        assert_eq!(instructions[0].label, "Normal");
    }

    #[test]
    fn test_run_exits_on_end_of_stream() {
        let (mut pipeline, _rx) = pipeline();
        let mut source = ScriptedSource::new(vec![
            frame(0, 3.0, 0.1),
            frame(200, 3.0, 0.1),
            frame(400, 3.0, 0.1),
        ]);
        let mut display = CollectingRenderSink::default();

        let frames = pipeline.run(&mut source, &mut display).unwrap();
        assert_eq!(frames, 3);
        assert_eq!(display.frames.len(), 3);
    }

    struct DisconnectedSource;

    impl FrameSource for DisconnectedSource {
        fn next_frame(&mut self) -> Result<Option<FrameObservations>, PipelineError> {
            Err(PipelineError::Source("camera disconnected".to_string()))
        }
    }

    /// Models a landmark predictor handing back a truncated point list
    struct TruncatedLandmarkSource;

    impl FrameSource for TruncatedLandmarkSource {
        fn next_frame(&mut self) -> Result<Option<FrameObservations>, PipelineError> {
            let landmarks = LandmarkSet::new(vec![])?;
            Ok(Some(FrameObservations {
                timestamp_ms: 0,
                faces: vec![FaceObservation {
                    region: FaceRegion::new(0, 0, 100, 100),
                    landmarks,
                }],
            }))
        }
    }

    #[test]
    fn test_run_propagates_source_failure() {
        let (mut pipeline, _rx) = pipeline();
        let mut display = CollectingRenderSink::default();
        let err = pipeline
            .run(&mut DisconnectedSource, &mut display)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Source(_)));
        assert!(display.frames.is_empty());
    }

    #[test]
    fn test_run_surfaces_geometry_errors() {
        let (mut pipeline, _rx) = pipeline();
        let mut display = CollectingRenderSink::default();
        let err = pipeline
            .run(&mut TruncatedLandmarkSource, &mut display)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Geometry(_)));
    }

    #[test]
    fn test_scripted_drowsy_session_alarms() {
        let (mut pipeline, rx) = pipeline();
        let mut source = ScriptedSource::drowsy_session();
        let mut display = CollectingRenderSink::default();

        pipeline.run(&mut source, &mut display).unwrap();
        let event = rx.try_recv().expect("demo session should alarm");
        assert!(event.timestamp_ms >= 10_000);
    }
}
