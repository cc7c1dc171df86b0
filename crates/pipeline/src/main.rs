//! Drowsiness Monitor - Demo Entry Point
//!
//! Runs the pipeline against a scripted frame source: awake for 10 s,
//! then sustained drowsy ratios until the alarm fires. A real deployment
//! swaps in a frame source wrapping the camera and landmark predictor.

use pipeline::{alarm, init_logging, LogRenderSink, Pipeline, PipelineConfig, ScriptedSource};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Drowsiness Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1);
    let config = PipelineConfig::load(config_path.as_deref())?;

    let (buzzer, mut alarms) = alarm::channel();
    let player = tokio::spawn(async move {
        while let Some(event) = alarms.recv().await {
            // Audio playback is external; the cue itself is the contract
            warn!(
                track = event.track,
                timestamp_ms = event.timestamp_ms,
                "BUZZER: driver drowsy"
            );
        }
    });

    let mut monitor = Pipeline::new(config, buzzer);
    let mut source = ScriptedSource::drowsy_session();
    let mut display = LogRenderSink;

    let frames = monitor.run(&mut source, &mut display)?;
    info!(frames, "session finished");

    drop(monitor);
    player.await?;
    Ok(())
}
