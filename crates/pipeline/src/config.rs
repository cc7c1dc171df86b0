//! Pipeline configuration

use drowsiness::DrowsinessConfig;
use face_tracker::TrackerConfig;
use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// Top-level configuration for the frame pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub drowsiness: DrowsinessConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

impl PipelineConfig {
    /// Load configuration: defaults, overlaid by an optional file,
    /// overlaid by `DROWSY__`-prefixed environment variables
    /// (e.g. `DROWSY__DROWSINESS__ALARM_THRESHOLD=5`).
    pub fn load(path: Option<&str>) -> Result<Self, PipelineError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("DROWSY").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
