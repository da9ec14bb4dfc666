use std::time::Duration;

use crate::encode::export::FilenamePattern;
use crate::foundation::core::{Canvas, FrameIndex, Point};
use crate::foundation::error::ReelResult;
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

/// What the sketch wants the runner to do after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SketchFlow {
    Continue,
    /// Stop the loop after this tick's frame is composited and exported.
    Halt,
}

/// Per-tick context handed to [`Sketch::update`].
pub struct TickCtx<'a> {
    pub frame: FrameIndex,
    pub elapsed: Duration,
    pub canvas: Canvas,
    pub rng: &'a mut SketchRng,
    /// Frames recorded before this tick, or `None` while not recording.
    pub recorded: Option<u64>,
}

impl TickCtx<'_> {
    pub fn is_recording(&self) -> bool {
        self.recorded.is_some()
    }
}

/// A self-contained animation: owns its simulation state, advances it in `update` and projects
/// it to draw operations in `draw`.
pub trait Sketch {
    fn name(&self) -> &str;

    fn canvas(&self) -> Canvas;

    /// Naming scheme for recorded frames.
    fn filename_pattern(&self) -> FilenamePattern;

    /// Frames after which recording completes and the loop halts.
    fn recording_limit(&self) -> Option<u64> {
        None
    }

    /// One-time initialisation before the first tick.
    fn setup(&mut self, _rng: &mut SketchRng) -> ReelResult<()> {
        Ok(())
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) -> SketchFlow;

    fn draw(&self, painter: &mut Painter<'_>);

    /// Pointer press at canvas coordinates. Ignored unless overridden.
    fn on_pointer(&mut self, _pos: Point) {}
}

impl<S: Sketch + ?Sized> Sketch for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn canvas(&self) -> Canvas {
        (**self).canvas()
    }

    fn filename_pattern(&self) -> FilenamePattern {
        (**self).filename_pattern()
    }

    fn recording_limit(&self) -> Option<u64> {
        (**self).recording_limit()
    }

    fn setup(&mut self, rng: &mut SketchRng) -> ReelResult<()> {
        (**self).setup(rng)
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) -> SketchFlow {
        (**self).update(ctx)
    }

    fn draw(&self, painter: &mut Painter<'_>) {
        (**self).draw(painter)
    }

    fn on_pointer(&mut self, pos: Point) {
        (**self).on_pointer(pos)
    }
}
