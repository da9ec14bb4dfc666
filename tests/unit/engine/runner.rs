use super::*;
use crate::encode::export::{FilenamePattern, FrameExportRequest, InMemoryExporter};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::ReelError;
use crate::scene::compositor::CapturingCompositor;

#[derive(Default)]
struct Counter {
    updates: u64,
    halt_after: Option<u64>,
    limit: Option<u64>,
    recorded_seen: Vec<Option<u64>>,
    pointer: Option<Point>,
    seeded_draw: f64,
}

impl Sketch for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn canvas(&self) -> Canvas {
        Canvas::LANDSCAPE
    }

    fn filename_pattern(&self) -> FilenamePattern {
        FilenamePattern::new("counter", 3).starting_at(1)
    }

    fn recording_limit(&self) -> Option<u64> {
        self.limit
    }

    fn setup(&mut self, rng: &mut SketchRng) -> ReelResult<()> {
        self.seeded_draw = rng.unit();
        Ok(())
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) -> SketchFlow {
        self.updates += 1;
        self.recorded_seen.push(ctx.recorded);
        match self.halt_after {
            Some(n) if self.updates >= n => SketchFlow::Halt,
            _ => SketchFlow::Continue,
        }
    }

    fn draw(&self, painter: &mut Painter<'_>) {
        painter.circle(self.updates as f64, 0.0, 1.0);
    }

    fn on_pointer(&mut self, pos: Point) {
        self.pointer = Some(pos);
    }
}

type TestRunner = SketchRunner<Counter, CapturingCompositor, InMemoryExporter>;

fn runner(sketch: Counter, config: RunConfig) -> TestRunner {
    SketchRunner::new(
        sketch,
        CapturingCompositor::new(),
        InMemoryExporter::new(),
        config,
    )
    .unwrap()
}

#[test]
fn ticks_update_draw_and_composite_in_order() {
    let mut r = runner(Counter::default(), RunConfig::default());
    let stats = r.run_frames(5).unwrap();
    assert_eq!(stats.ticks, 5);
    assert_eq!(stats.frames_composited, 5);
    assert_eq!(r.sketch().updates, 5);
    let idx: Vec<u64> = r.compositor().frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    assert_eq!(r.compositor().canvas(), Some(Canvas::LANDSCAPE));
    assert!(r.exporter().requests().is_empty());
}

#[test]
fn recording_limit_halts_the_loop() {
    let sketch = Counter {
        limit: Some(3),
        ..Counter::default()
    };
    let mut r = runner(sketch, RunConfig::default().recording_from_start());
    let stats = r.run_frames(10).unwrap();
    assert!(r.is_halted());
    assert_eq!(stats.ticks, 3);
    assert_eq!(stats.frames_exported, 3);
    assert_eq!(
        r.exporter().filenames(),
        vec!["counter001.png", "counter002.png", "counter003.png"]
    );
    assert!(r.exporter().is_ended());
    assert_eq!(r.sketch().recorded_seen, vec![Some(0), Some(1), Some(2)]);
    assert_eq!(r.tick().unwrap(), TickOutcome::Halted);
}

#[test]
fn config_limit_overrides_sketch_limit() {
    let sketch = Counter {
        limit: Some(100),
        ..Counter::default()
    };
    let mut cfg = RunConfig::default().recording_from_start();
    cfg.recording.frame_limit = Some(2);
    let mut r = runner(sketch, cfg);
    r.run_frames(10).unwrap();
    assert_eq!(r.exporter().requests().len(), 2);
}

#[test]
fn sketch_halt_stops_after_compositing_that_frame() {
    let sketch = Counter {
        halt_after: Some(4),
        ..Counter::default()
    };
    let mut r = runner(sketch, RunConfig::default().recording_from_start());
    r.run_frames(50).unwrap();
    assert_eq!(r.stats().frames_composited, 4);
    assert_eq!(r.stats().frames_exported, 4);
    assert!(r.exporter().is_ended());
}

#[test]
fn controls_apply_at_top_of_next_tick() {
    let mut r = runner(Counter::default(), RunConfig::default());
    r.tick().unwrap();
    r.send(Control::ToggleRecording);
    r.send(Control::Pointer(Point::new(3.0, 4.0)));
    assert!(!r.recorder().is_recording());
    r.tick().unwrap();
    assert!(r.recorder().is_recording());
    assert_eq!(r.sketch().pointer, Some(Point::new(3.0, 4.0)));
    let req = &r.exporter().requests()[0];
    assert_eq!(req.frame, FrameIndex(1));
    assert_eq!(req.sequence, 0);
}

#[test]
fn pause_holds_the_timebase() {
    let mut r = runner(Counter::default(), RunConfig::default());
    r.tick().unwrap();
    r.send(Control::Pause);
    assert_eq!(r.tick().unwrap(), TickOutcome::Paused);
    assert_eq!(r.tick().unwrap(), TickOutcome::Paused);
    assert_eq!(r.frames_ticked(), 1);
    r.send(Control::Resume);
    assert_eq!(r.tick().unwrap(), TickOutcome::Advanced(FrameIndex(1)));
    assert_eq!(r.stats().paused_ticks, 2);
}

#[test]
fn stop_control_halts_and_closes_recording() {
    let mut r = runner(Counter::default(), RunConfig::default().recording_from_start());
    r.tick().unwrap();
    r.send(Control::Stop);
    assert_eq!(r.tick().unwrap(), TickOutcome::Halted);
    assert!(r.exporter().is_ended());
    assert_eq!(r.stats().ticks, 1);
}

#[test]
fn auto_record_starts_after_threshold() {
    let cfg = RunConfig {
        auto_record_after_frames: Some(2),
        ..RunConfig::default()
    };
    let mut r = runner(Counter::default(), cfg);
    r.run_frames(4).unwrap();
    let frames: Vec<u64> = r.exporter().requests().iter().map(|q| q.frame.0).collect();
    assert_eq!(frames, vec![2, 3]);
}

#[test]
fn manual_recording_control_wins_over_auto_record() {
    let cfg = RunConfig {
        auto_record_after_frames: Some(2),
        ..RunConfig::default()
    };
    let mut r = runner(Counter::default(), cfg);
    r.send(Control::StopRecording);
    r.run_frames(6).unwrap();
    assert!(r.exporter().requests().is_empty());
    assert!(!r.recorder().is_recording());
}

struct FailingExporter {
    attempts: u64,
}

impl FrameExporter for FailingExporter {
    fn export(&mut self, _request: &FrameExportRequest) -> ReelResult<()> {
        self.attempts += 1;
        Err(ReelError::export("disk full"))
    }
}

#[test]
fn export_failures_are_counted_not_fatal() {
    let mut r = SketchRunner::new(
        Counter::default(),
        CapturingCompositor::canvas_only(),
        FailingExporter { attempts: 0 },
        RunConfig::default().recording_from_start(),
    )
    .unwrap();
    let stats = r.run_frames(3).unwrap();
    assert_eq!(stats.ticks, 3);
    assert_eq!(stats.export_failures, 3);
    assert_eq!(stats.frames_exported, 0);
    assert_eq!(r.exporter().attempts, 3);
}

struct BrokenCompositor;

impl Compositor for BrokenCompositor {
    fn begin(&mut self, _canvas: Canvas) -> ReelResult<()> {
        Ok(())
    }

    fn composite(&mut self, _idx: FrameIndex, _frame: &Frame) -> ReelResult<()> {
        Err(ReelError::composite("device lost"))
    }
}

#[test]
fn compositor_errors_propagate() {
    let mut r = SketchRunner::new(
        Counter::default(),
        BrokenCompositor,
        InMemoryExporter::new(),
        RunConfig::default(),
    )
    .unwrap();
    assert!(matches!(r.tick(), Err(ReelError::Composite(_))));
}

#[test]
fn seeded_runs_set_up_identically() {
    let a = runner(Counter::default(), RunConfig::default().with_seed(11));
    let b = runner(Counter::default(), RunConfig::default().with_seed(11));
    assert_eq!(a.sketch().seeded_draw, b.sketch().seeded_draw);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = RunConfig {
        fps: crate::foundation::core::Fps { num: 0, den: 1 },
        ..RunConfig::default()
    };
    let res = SketchRunner::new(
        Counter::default(),
        CapturingCompositor::new(),
        InMemoryExporter::new(),
        cfg,
    );
    assert!(res.is_err());
}
