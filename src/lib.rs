//! reelgen is a fixed-timestep engine for generative animation sketches.
//!
//! A sketch owns its state and implements [`Sketch`]. A [`SketchRunner`] drives it:
//!
//! - Queue [`Control`] commands, applied at the top of the next tick
//! - Tick the timebase and let the sketch update its entities
//! - Build a [`Frame`] of draw operations through a [`Painter`] and hand it to a [`Compositor`]
//! - While recording, emit one [`FrameExportRequest`] per tick to a [`FrameExporter`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
/// Frame naming, recording and export sinks.
pub mod encode;
/// Timebase, entities, sketches and the runner loop.
pub mod engine;
pub mod foundation;
/// Draw operations and the compositor boundary.
pub mod scene;
pub mod sketches;

pub use crate::animation::ease::Ease;
pub use crate::animation::phase::{Phase, PhaseChange, PhaseMachine};
pub use crate::config::{RecordingConfig, RunConfig};
pub use crate::encode::export::{
    FilenamePattern, FrameExportRequest, FrameExporter, InMemoryExporter, LogExporter, Recorder,
};
pub use crate::engine::control::Control;
pub use crate::engine::entity::{Entity, EntityStore};
pub use crate::engine::runner::{RunStats, SketchRunner, TickOutcome};
pub use crate::engine::sketch::{Sketch, SketchFlow, TickCtx};
pub use crate::engine::timebase::{FixedRateDriver, LoopTimer, Timebase, UpdateGate};
pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::foundation::rng::SketchRng;
pub use crate::scene::compositor::{CapturingCompositor, Compositor, NullCompositor};
pub use crate::scene::draw::{DrawOp, Frame, Paint, Primitive};
pub use crate::scene::painter::Painter;
