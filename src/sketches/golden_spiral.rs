//! Golden-ratio spiral sweep.
//!
//! A ping-pong scalar `a` walks `[min, max]` and back. Each accepted update places one point on
//! the spiral (`angle = a·2π/φ`, `radius = a·scale`), joins it to the previous point with a
//! smoothed cubic and stamps a dot. The canvas is never cleared after the first frame, so the
//! marks accumulate.

use std::f64::consts::TAU;

use crate::animation::pingpong::{Bound, PingPong};
use crate::encode::export::FilenamePattern;
use crate::engine::entity::Entity;
use crate::engine::sketch::{Sketch, SketchFlow, TickCtx};
use crate::engine::timebase::UpdateGate;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::PHI;
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

/// Pastel rainbow the colour counter cycles through.
pub const PASTELS: [Rgba8; 7] = [
    Rgba8::rgb(255, 180, 180),
    Rgba8::rgb(255, 210, 160),
    Rgba8::rgb(255, 255, 180),
    Rgba8::rgb(180, 255, 180),
    Rgba8::rgb(180, 240, 255),
    Rgba8::rgb(180, 180, 255),
    Rgba8::rgb(210, 180, 255),
];

/// Updates per palette entry.
const COLOR_RUN: u64 = 10;
/// Width of one brightness/thickness bucket along `a`.
const BUCKET: i64 = 100;
const CONTROL_PULL: f64 = 0.3;
const DOT: f64 = 6.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    pub canvas: Canvas,
    pub min: i64,
    pub max: i64,
    /// Pixels of radius per unit of `a`.
    pub scale: f64,
    /// Minimum wall-clock time between two sweep updates.
    pub update_interval_ms: f64,
    pub background: Rgba8,
    /// Stop after this many `min -> max -> min` loops; a trailing half stops on `max`.
    pub max_loops: Option<f64>,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::LANDSCAPE,
            min: 1,
            max: 500,
            scale: 1.2,
            update_interval_ms: 6.67,
            background: Rgba8::WHITE,
            max_loops: None,
        }
    }
}

impl SpiralConfig {
    /// Longer, thinner sweep on black that stops after ten loops.
    pub fn looping() -> Self {
        Self {
            max: 1000,
            scale: 0.6,
            update_interval_ms: 2.0,
            background: Rgba8::BLACK,
            max_loops: Some(10.0),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.min > self.max {
            return Err(ReelError::validation("spiral min must be <= max"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ReelError::validation("spiral scale must be > 0"));
        }
        if let Some(n) = self.max_loops {
            if !(n.is_finite() && n > 0.0) {
                return Err(ReelError::validation("spiral max_loops must be > 0"));
            }
        }
        UpdateGate::from_millis_f64(self.update_interval_ms)?;
        Ok(())
    }
}

/// Brightness/thickness bucket of `a`.
pub fn bucket(a: i64, min: i64) -> i64 {
    (a - min).max(0) / BUCKET
}

/// Colour of the mark drawn at `a` on the `counter`-th update.
pub fn mark_color(a: i64, min: i64, counter: u64) -> Rgba8 {
    let base = PASTELS[((counter / COLOR_RUN) % PASTELS.len() as u64) as usize];
    let brightness = (1.0 - 0.15 * bucket(a, min) as f64).max(0.0);
    base.scaled(brightness)
}

pub fn mark_thickness(a: i64, min: i64) -> f64 {
    (bucket(a, min) + 1) as f64
}

/// One update's worth of drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralMark {
    /// Previous point, when there is one.
    pub from: Option<Point>,
    /// Cubic control points; `None` draws a straight segment.
    pub controls: Option<(Point, Point)>,
    pub to: Point,
    pub color: Rgba8,
    pub thickness: f64,
}

/// The sweeping spiral point.
#[derive(Clone, Debug)]
pub struct SpiralSweep {
    param: PingPong,
    center: Point,
    scale: f64,
    max_loops: Option<f64>,
    counter: u64,
    last: Option<Point>,
    second_last: Option<Point>,
    mark: Option<SpiralMark>,
    complete: bool,
}

impl SpiralSweep {
    pub fn new(config: &SpiralConfig) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            param: PingPong::new(config.min, config.max)?,
            center: config.canvas.center(),
            scale: config.scale,
            max_loops: config.max_loops,
            counter: 0,
            last: None,
            second_last: None,
            mark: None,
            complete: false,
        })
    }

    pub fn param(&self) -> &PingPong {
        &self.param
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Mark produced by the most recent update.
    pub fn mark(&self) -> Option<&SpiralMark> {
        self.mark.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn point_at(&self, a: i64) -> Point {
        let a = a as f64;
        let angle = a * TAU / PHI;
        let radius = a * self.scale;
        Point::new(
            self.center.x + angle.cos() * radius,
            self.center.y + angle.sin() * radius,
        )
    }

    /// Emit the mark for the current `a`, then move `a` one step.
    pub fn advance(&mut self) -> Option<SpiralMark> {
        if self.complete {
            self.mark = None;
            return None;
        }
        let a = self.param.value();
        let min = self.param.min();
        let to = self.point_at(a);
        let controls = match (self.last, self.second_last) {
            (Some(last), Some(second)) => Some((
                last + (last - second) * CONTROL_PULL,
                to - (to - last) * CONTROL_PULL,
            )),
            _ => None,
        };
        let mark = SpiralMark {
            from: self.last,
            controls,
            to,
            color: mark_color(a, min, self.counter),
            thickness: mark_thickness(a, min),
        };

        self.second_last = self.last;
        self.last = Some(to);
        self.counter += 1;

        let done = match (self.param.step(), self.max_loops) {
            (Some(Bound::Max), Some(max)) => self.param.loops() as f64 + 0.5 >= max,
            (Some(Bound::Min), Some(max)) => self.param.loops() as f64 >= max,
            _ => false,
        };
        if done {
            tracing::debug!(loops = self.param.half_loops() as f64 / 2.0, "spiral sweep complete");
            self.complete = true;
        }

        self.mark = Some(mark);
        Some(mark)
    }
}

impl Entity for SpiralSweep {
    type Env = ();

    fn step(&mut self, _env: &(), _rng: &mut SketchRng) {
        self.advance();
    }

    fn is_expired(&self) -> bool {
        self.complete
    }

    fn render(&self, p: &mut Painter<'_>) {
        let Some(mark) = self.mark else {
            return;
        };
        if let Some(from) = mark.from {
            p.push();
            p.stroke(mark.color);
            p.stroke_weight(mark.thickness);
            p.no_fill();
            match mark.controls {
                Some((c1, c2)) => p.bezier(from, c1, c2, mark.to),
                None => p.line(from.x, from.y, mark.to.x, mark.to.y),
            }
            p.pop();
        }
        p.push();
        p.fill(mark.color);
        p.no_stroke();
        p.circle(mark.to.x, mark.to.y, DOT);
        p.pop();
    }
}

/// Sketch wrapper: gates sweep updates on wall-clock time and paints onto a persistent canvas.
pub struct GoldenSpiral {
    name: &'static str,
    config: SpiralConfig,
    sweep: SpiralSweep,
    gate: UpdateGate,
    updated: bool,
    first_frame: bool,
}

impl GoldenSpiral {
    pub fn new(config: SpiralConfig) -> ReelResult<Self> {
        let name = if config.max_loops.is_some() {
            "golden-spiral-loops"
        } else {
            "golden-spiral"
        };
        Ok(Self {
            name,
            sweep: SpiralSweep::new(&config)?,
            gate: UpdateGate::from_millis_f64(config.update_interval_ms)?,
            updated: false,
            first_frame: true,
            config,
        })
    }

    pub fn sweep(&self) -> &SpiralSweep {
        &self.sweep
    }
}

impl Sketch for GoldenSpiral {
    fn name(&self) -> &str {
        self.name
    }

    fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    fn filename_pattern(&self) -> FilenamePattern {
        FilenamePattern::new("spiral", 4)
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) -> SketchFlow {
        self.first_frame = ctx.frame.0 == 0;
        self.updated = false;
        if !self.sweep.is_complete() && self.gate.poll(ctx.elapsed) {
            self.sweep.step(&(), ctx.rng);
            self.updated = true;
        }
        SketchFlow::Continue
    }

    fn draw(&self, p: &mut Painter<'_>) {
        if self.first_frame {
            p.background(self.config.background);
        }
        if self.updated {
            self.sweep.render(p);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/golden_spiral.rs"]
mod tests;
