use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::RunConfig;
use crate::encode::export::{FrameExporter, Recorder};
use crate::engine::control::Control;
use crate::engine::sketch::{Sketch, SketchFlow, TickCtx};
use crate::engine::timebase::{FixedRateDriver, Timebase};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::ReelResult;
use crate::foundation::rng::SketchRng;
use crate::scene::compositor::Compositor;
use crate::scene::draw::Frame;
use crate::scene::painter::Painter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated run counters.
pub struct RunStats {
    /// Ticks that advanced the timebase.
    pub ticks: u64,
    /// Ticks skipped while paused.
    pub paused_ticks: u64,
    pub frames_composited: u64,
    pub frames_exported: u64,
    /// Export requests the exporter rejected. Never retried.
    pub export_failures: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced(FrameIndex),
    Paused,
    Halted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Running,
    Paused,
    Halted,
}

/// Owns one sketch and drives it: controls, timebase, update, draw, composite, export.
pub struct SketchRunner<S, C, X> {
    sketch: S,
    compositor: C,
    exporter: X,
    config: RunConfig,
    timebase: Timebase,
    recorder: Recorder,
    rng: SketchRng,
    controls: VecDeque<Control>,
    state: RunState,
    stats: RunStats,
    /// A recording control was applied; auto-record stands down.
    manual_recording: bool,
    auto_record_fired: bool,
}

impl<S: Sketch, C: Compositor, X: FrameExporter> SketchRunner<S, C, X> {
    /// Validate the configuration, run the sketch's setup and open the compositor.
    pub fn new(mut sketch: S, mut compositor: C, exporter: X, config: RunConfig) -> ReelResult<Self> {
        config.validate()?;
        let limit = config.recording.frame_limit.or(sketch.recording_limit());
        let recorder = Recorder::new(sketch.filename_pattern(), limit)?;
        let mut rng = match config.seed {
            Some(seed) => SketchRng::seeded(seed),
            None => SketchRng::from_entropy(),
        };

        sketch.setup(&mut rng)?;
        compositor.begin(sketch.canvas())?;
        tracing::debug!(
            sketch = sketch.name(),
            width = sketch.canvas().width,
            height = sketch.canvas().height,
            "sketch ready"
        );

        let mut runner = Self {
            sketch,
            compositor,
            exporter,
            timebase: Timebase::new(config.fps),
            recorder,
            rng,
            controls: VecDeque::new(),
            state: RunState::Running,
            stats: RunStats::default(),
            manual_recording: false,
            auto_record_fired: false,
            config,
        };
        if runner.config.recording.enabled {
            runner.start_recording();
        }
        Ok(runner)
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    pub fn sketch_mut(&mut self) -> &mut S {
        &mut self.sketch
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    pub fn exporter(&self) -> &X {
        &self.exporter
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn frames_ticked(&self) -> u64 {
        self.timebase.ticks()
    }

    pub fn is_halted(&self) -> bool {
        self.state == RunState::Halted
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    /// Queue a command for the top of the next tick.
    pub fn send(&mut self, control: Control) {
        self.controls.push_back(control);
    }

    /// Tick with perfectly paced simulated time.
    pub fn tick(&mut self) -> ReelResult<TickOutcome> {
        let now = self.timebase.nominal_elapsed();
        self.tick_at(now)
    }

    /// One logical tick at elapsed time `now`.
    ///
    /// Compositor errors propagate; exporter errors are logged and counted.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick_at(&mut self, now: Duration) -> ReelResult<TickOutcome> {
        if self.is_halted() {
            return Ok(TickOutcome::Halted);
        }

        self.apply_controls();
        self.maybe_auto_record();
        match self.state {
            RunState::Halted => return Ok(TickOutcome::Halted),
            RunState::Paused => {
                self.stats.paused_ticks += 1;
                return Ok(TickOutcome::Paused);
            }
            RunState::Running => {}
        }

        let tick = self.timebase.tick(now);
        self.stats.ticks += 1;

        let recorded = self
            .recorder
            .is_recording()
            .then(|| self.recorder.recorded());
        let mut ctx = TickCtx {
            frame: tick.frame,
            elapsed: tick.elapsed,
            canvas: self.sketch.canvas(),
            rng: &mut self.rng,
            recorded,
        };
        let flow = self.sketch.update(&mut ctx);

        let mut frame = Frame::new();
        {
            let mut painter = Painter::new(self.sketch.canvas(), &mut frame);
            self.sketch.draw(&mut painter);
        }
        self.compositor.composite(tick.frame, &frame)?;
        self.stats.frames_composited += 1;

        self.export(tick.frame);

        if flow == SketchFlow::Halt {
            tracing::info!(sketch = self.sketch.name(), frame = tick.frame.0, "sketch halted");
            self.halt();
        }
        Ok(TickOutcome::Advanced(tick.frame))
    }

    /// Run up to `n` ticks on simulated time, stopping early if the loop halts.
    #[tracing::instrument(skip(self), fields(sketch = self.sketch.name()))]
    pub fn run_frames(&mut self, n: u64) -> ReelResult<RunStats> {
        for _ in 0..n {
            if self.tick()? == TickOutcome::Halted {
                break;
            }
        }
        Ok(self.stats)
    }

    /// Run at the configured rate on wall-clock time until halted or `max_ticks` have run.
    #[tracing::instrument(skip(self), fields(sketch = self.sketch.name()))]
    pub fn run_realtime(&mut self, max_ticks: Option<u64>) -> ReelResult<RunStats> {
        let start = Instant::now();
        let mut driver = FixedRateDriver::new(self.config.fps);
        let mut done = 0u64;
        while max_ticks.is_none_or(|max| done < max) {
            driver.wait();
            if self.tick_at(start.elapsed())? == TickOutcome::Halted {
                break;
            }
            done += 1;
        }
        Ok(self.stats)
    }

    fn apply_controls(&mut self) {
        while let Some(control) = self.controls.pop_front() {
            if control.is_recording_control() {
                self.manual_recording = true;
            }
            match control {
                Control::ToggleRecording => {
                    if self.recorder.is_recording() {
                        self.stop_recording();
                    } else {
                        self.start_recording();
                    }
                }
                Control::StartRecording => self.start_recording(),
                Control::StopRecording => self.stop_recording(),
                Control::Pause => {
                    if self.state == RunState::Running {
                        self.state = RunState::Paused;
                    }
                }
                Control::Resume => {
                    if self.state == RunState::Paused {
                        self.state = RunState::Running;
                    }
                }
                Control::Stop => self.halt(),
                Control::Pointer(pos) => self.sketch.on_pointer(pos),
            }
        }
    }

    fn maybe_auto_record(&mut self) {
        let Some(after) = self.config.auto_record_after_frames else {
            return;
        };
        if self.auto_record_fired || self.manual_recording || self.timebase.ticks() < after {
            return;
        }
        self.auto_record_fired = true;
        self.start_recording();
    }

    fn start_recording(&mut self) {
        if !self.recorder.start() {
            return;
        }
        tracing::info!(
            sketch = self.sketch.name(),
            prefix = %self.recorder.pattern().prefix,
            limit = ?self.recorder.limit(),
            "recording started"
        );
        if let Err(e) = self.exporter.begin(self.recorder.pattern()) {
            tracing::warn!(error = %e, "exporter failed to begin");
        }
    }

    fn stop_recording(&mut self) {
        if !self.recorder.stop() {
            return;
        }
        tracing::info!(recorded = self.recorder.recorded(), "recording stopped");
        self.end_exporter();
    }

    fn export(&mut self, frame: FrameIndex) {
        let Some(request) = self.recorder.capture(frame) else {
            return;
        };
        match self.exporter.export(&request) {
            Ok(()) => self.stats.frames_exported += 1,
            Err(e) => {
                self.stats.export_failures += 1;
                tracing::warn!(file = %request.filename, error = %e, "frame export failed");
            }
        }
        if self.recorder.is_complete() {
            tracing::info!(
                recorded = self.recorder.recorded(),
                "recording complete, halting"
            );
            self.end_exporter();
            self.halt();
        }
    }

    fn end_exporter(&mut self) {
        if let Err(e) = self.exporter.end() {
            tracing::warn!(error = %e, "exporter failed to end");
        }
    }

    fn halt(&mut self) {
        if self.recorder.stop() {
            self.end_exporter();
        }
        self.state = RunState::Halted;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runner.rs"]
mod tests;
