use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// Recording switch and optional frame limit override.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Record from the first tick.
    pub enabled: bool,
    /// Overrides the sketch's own limit when set.
    pub frame_limit: Option<u64>,
}

/// Runner configuration.
///
/// Every field has a default, so `{}` is a valid document.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub fps: Fps,
    pub recording: RecordingConfig,
    /// Switch recording on once this many ticks have run, unless a recording control was
    /// already issued.
    pub auto_record_after_frames: Option<u64>,
    /// Seed for the sketch random stream; entropy when absent.
    pub seed: Option<u64>,
}

impl RunConfig {
    pub fn validate(&self) -> ReelResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.recording.frame_limit == Some(0) {
            return Err(ReelError::validation("recording frame_limit must be > 0"));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ReelError::serde(format!("run config parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReelError::serde(format!("run config encode error: {e}")))
    }

    pub fn load(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read run config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn recording_from_start(mut self) -> Self {
        self.recording.enabled = true;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
