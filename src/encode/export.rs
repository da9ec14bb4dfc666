use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};

/// How recorded frames are named: `{prefix}{number:0digits}.{extension}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilenamePattern {
    pub prefix: String,
    pub digits: u8,
    pub extension: String,
    /// Number given to the first recorded frame.
    #[serde(default)]
    pub first_number: u64,
}

impl FilenamePattern {
    pub fn new(prefix: impl Into<String>, digits: u8) -> Self {
        Self {
            prefix: prefix.into(),
            digits,
            extension: "png".to_owned(),
            first_number: 0,
        }
    }

    pub fn starting_at(mut self, first_number: u64) -> Self {
        self.first_number = first_number;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.prefix.is_empty() {
            return Err(ReelError::validation("filename prefix must be non-empty"));
        }
        if self.digits == 0 || self.digits > 9 {
            return Err(ReelError::validation("filename digits must be in 1..=9"));
        }
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(ReelError::validation(
                "filename extension must be non-empty and carry no dot",
            ));
        }
        Ok(())
    }

    /// File name for the `sequence`-th recorded frame (0-based).
    ///
    /// Numbers wider than `digits` are printed in full, never truncated.
    pub fn render(&self, sequence: u64) -> String {
        let n = self.first_number + sequence;
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            n,
            self.extension,
            width = usize::from(self.digits)
        )
    }
}

/// A single rendered frame destined for external image output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameExportRequest {
    /// Timeline frame the request was produced on.
    pub frame: FrameIndex,
    /// 0-based position within the current recording.
    pub sequence: u64,
    pub filename: String,
}

/// Consumer of export requests, one per recorded tick.
///
/// `export` is called in strictly increasing `sequence` order between `begin` and `end`.
pub trait FrameExporter {
    fn begin(&mut self, _pattern: &FilenamePattern) -> ReelResult<()> {
        Ok(())
    }

    fn export(&mut self, request: &FrameExportRequest) -> ReelResult<()>;

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

/// In-memory exporter for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryExporter {
    pattern: Option<FilenamePattern>,
    pub(crate) requests: Vec<FrameExportRequest>,
    ended: bool,
}

impl InMemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(&self) -> Option<&FilenamePattern> {
        self.pattern.as_ref()
    }

    pub fn requests(&self) -> &[FrameExportRequest] {
        &self.requests
    }

    pub fn filenames(&self) -> Vec<&str> {
        self.requests.iter().map(|r| r.filename.as_str()).collect()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameExporter for InMemoryExporter {
    fn begin(&mut self, pattern: &FilenamePattern) -> ReelResult<()> {
        self.pattern = Some(pattern.clone());
        self.ended = false;
        Ok(())
    }

    fn export(&mut self, request: &FrameExportRequest) -> ReelResult<()> {
        self.requests.push(request.clone());
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Logs each request at `info` level instead of writing it anywhere.
#[derive(Debug, Default)]
pub struct LogExporter {
    exported: u64,
}

impl LogExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exported(&self) -> u64 {
        self.exported
    }
}

impl FrameExporter for LogExporter {
    fn begin(&mut self, pattern: &FilenamePattern) -> ReelResult<()> {
        tracing::info!(prefix = %pattern.prefix, digits = pattern.digits, "export started");
        Ok(())
    }

    fn export(&mut self, request: &FrameExportRequest) -> ReelResult<()> {
        self.exported += 1;
        tracing::info!(
            frame = request.frame.0,
            sequence = request.sequence,
            file = %request.filename,
            "frame exported"
        );
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        tracing::info!(frames = self.exported, "export finished");
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordState {
    Idle,
    Recording,
    /// The frame limit was reached; recording cannot restart.
    Complete,
}

/// Recording flag, frame numbering and frame limit.
#[derive(Clone, Debug)]
pub struct Recorder {
    pattern: FilenamePattern,
    limit: Option<u64>,
    recorded: u64,
    state: RecordState,
}

impl Recorder {
    pub fn new(pattern: FilenamePattern, limit: Option<u64>) -> ReelResult<Self> {
        pattern.validate()?;
        if limit == Some(0) {
            return Err(ReelError::validation("recording frame limit must be > 0"));
        }
        Ok(Self {
            pattern,
            limit,
            recorded: 0,
            state: RecordState::Idle,
        })
    }

    pub fn pattern(&self) -> &FilenamePattern {
        &self.pattern
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecordState::Recording
    }

    pub fn is_complete(&self) -> bool {
        self.state == RecordState::Complete
    }

    /// Frames recorded so far. Numbering resumes from here after a stop/start.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    /// Returns `true` if this call switched recording on.
    pub fn start(&mut self) -> bool {
        if self.state != RecordState::Idle {
            return false;
        }
        self.state = RecordState::Recording;
        true
    }

    /// Returns `true` if this call switched recording off.
    pub fn stop(&mut self) -> bool {
        if self.state != RecordState::Recording {
            return false;
        }
        self.state = RecordState::Idle;
        true
    }

    /// Produce the request for this tick, if recording. Reaching the limit completes the
    /// recording after the request is issued.
    pub fn capture(&mut self, frame: FrameIndex) -> Option<FrameExportRequest> {
        if !self.is_recording() {
            return None;
        }
        let sequence = self.recorded;
        self.recorded += 1;
        if self.limit.is_some_and(|limit| self.recorded >= limit) {
            self.state = RecordState::Complete;
        }
        Some(FrameExportRequest {
            frame,
            sequence,
            filename: self.pattern.render(sequence),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
