use crate::foundation::core::{Canvas, FrameIndex, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::draw::{DrawOp, Frame};

/// Consumer of per-tick draw operations; owns the persistent canvas.
///
/// Ordering contract: `composite` is called once per tick in strictly increasing `FrameIndex`
/// order, after `begin`.
pub trait Compositor {
    /// Called once before the first frame, with the sketch's fixed canvas.
    fn begin(&mut self, canvas: Canvas) -> ReelResult<()>;
    /// Project one frame onto the canvas.
    fn composite(&mut self, idx: FrameIndex, frame: &Frame) -> ReelResult<()>;
}

/// Discards every frame. Useful for headless runs that only care about sketch state.
#[derive(Debug, Default)]
pub struct NullCompositor {
    frames: u64,
}

impl NullCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames
    }
}

impl Compositor for NullCompositor {
    fn begin(&mut self, _canvas: Canvas) -> ReelResult<()> {
        self.frames = 0;
        Ok(())
    }

    fn composite(&mut self, _idx: FrameIndex, _frame: &Frame) -> ReelResult<()> {
        self.frames += 1;
        Ok(())
    }
}

/// In-memory compositor for tests and debugging.
///
/// Tracks the persistent canvas as "last clear colour plus every op since". Optionally retains
/// each incoming frame too.
#[derive(Debug, Default)]
pub struct CapturingCompositor {
    canvas: Option<Canvas>,
    retain_frames: bool,
    last: Option<FrameIndex>,
    background: Option<Rgba8>,
    layered: Vec<DrawOp>,
    /// Frames in timeline order (only when retaining).
    pub(crate) frames: Vec<(FrameIndex, Frame)>,
}

impl CapturingCompositor {
    /// Keep every frame as well as the persistent canvas.
    pub fn new() -> Self {
        Self {
            retain_frames: true,
            ..Self::default()
        }
    }

    /// Keep only the persistent canvas.
    pub fn canvas_only() -> Self {
        Self::default()
    }

    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    pub fn frames(&self) -> &[(FrameIndex, Frame)] {
        &self.frames
    }

    /// Colour of the most recent clear, if any frame cleared.
    pub fn background(&self) -> Option<Rgba8> {
        self.background
    }

    /// Everything painted since the most recent clear, back to front.
    pub fn layered_ops(&self) -> &[DrawOp] {
        &self.layered
    }
}

impl Compositor for CapturingCompositor {
    fn begin(&mut self, canvas: Canvas) -> ReelResult<()> {
        self.canvas = Some(canvas);
        self.last = None;
        self.background = None;
        self.layered.clear();
        self.frames.clear();
        Ok(())
    }

    fn composite(&mut self, idx: FrameIndex, frame: &Frame) -> ReelResult<()> {
        if self.canvas.is_none() {
            return Err(ReelError::composite("composite called before begin"));
        }
        if let Some(last) = self.last.filter(|last| idx <= *last) {
            return Err(ReelError::composite(format!(
                "frame {} composited after frame {}",
                idx.0, last.0
            )));
        }
        self.last = Some(idx);

        if let Some(c) = frame.clear {
            self.background = Some(c);
            self.layered.clear();
        }
        self.layered.extend(frame.ops.iter().cloned());
        if self.retain_frames {
            self.frames.push((idx, frame.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compositor.rs"]
mod tests;
