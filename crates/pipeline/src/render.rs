//! Overlay render instructions

use drowsiness::AlarmDecision;
use face_geometry::FaceRegion;
use serde::{Deserialize, Serialize};

/// Box color for an alarmed face (red)
pub const DROWSY_COLOR: [u8; 3] = [255, 0, 0];

/// Box color for a normal face (green)
pub const NORMAL_COLOR: [u8; 3] = [0, 255, 0];

/// One overlay drawing command for the display collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInstruction {
    /// Face bounding box `[left, top, right, bottom]`
    pub bbox: [i32; 4],
    /// RGB box color
    pub color: [u8; 3],
    /// Label text keyed to the box
    pub label: String,
}

impl RenderInstruction {
    pub fn new(region: &FaceRegion, decision: AlarmDecision) -> Self {
        let color = match decision {
            AlarmDecision::Drowsy => DROWSY_COLOR,
            AlarmDecision::Normal => NORMAL_COLOR,
        };
        Self {
            bbox: region.as_bbox(),
            color,
            label: decision.label().to_string(),
        }
    }
}

/// Display seam: receives this frame's overlay instructions
pub trait RenderSink {
    fn render(&mut self, timestamp_ms: u64, instructions: &[RenderInstruction]);
}

/// Logs instructions as JSON lines (stand-in for the browser overlay)
#[derive(Debug, Default)]
pub struct LogRenderSink;

impl RenderSink for LogRenderSink {
    fn render(&mut self, timestamp_ms: u64, instructions: &[RenderInstruction]) {
        for instruction in instructions {
            match serde_json::to_string(instruction) {
                Ok(json) => tracing::info!(timestamp_ms, overlay = %json, "render"),
                Err(e) => tracing::warn!("failed to serialize render instruction: {}", e),
            }
        }
    }
}

/// Collects instructions for inspection in tests
#[derive(Debug, Default)]
pub struct CollectingRenderSink {
    pub frames: Vec<(u64, Vec<RenderInstruction>)>,
}

impl RenderSink for CollectingRenderSink {
    fn render(&mut self, timestamp_ms: u64, instructions: &[RenderInstruction]) {
        self.frames.push((timestamp_ms, instructions.to_vec()));
    }
}
