//! Fibonacci spiral growing over a fixed number of frames.

use std::f64::consts::{PI, TAU};

use crate::encode::export::FilenamePattern;
use crate::engine::sketch::{Sketch, SketchFlow, TickCtx};
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{PHI, map_range};
use crate::scene::painter::Painter;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FibonacciConfig {
    pub canvas: Canvas,
    /// Frames the growth takes.
    pub total_frames: u32,
    /// Full turns at the end of the growth.
    pub turns: f64,
    /// Angular spacing of the dots (radians).
    pub angle_step: f64,
    pub base_radius: f64,
    pub base_dot_width: f64,
    /// Dot height over dot width.
    pub dot_aspect: f64,
}

impl Default for FibonacciConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::REEL,
            total_frames: 300,
            turns: 25.0,
            angle_step: 0.02,
            base_radius: 3.0,
            base_dot_width: 1.5,
            dot_aspect: 3.0,
        }
    }
}

impl FibonacciConfig {
    pub fn validate(&self) -> ReelResult<()> {
        if self.total_frames == 0 {
            return Err(ReelError::validation("fibonacci total_frames must be > 0"));
        }
        if !(self.angle_step.is_finite() && self.angle_step > 0.0) {
            return Err(ReelError::validation("fibonacci angle_step must be > 0"));
        }
        if !(self.turns.is_finite() && self.turns >= 0.0) {
            return Err(ReelError::validation("fibonacci turns must be >= 0"));
        }
        Ok(())
    }

    pub fn max_angle(&self) -> f64 {
        TAU * self.turns
    }
}

/// Growth factor `φ^(θ/4π)` shared by radius and dot size.
pub fn growth(angle: f64) -> f64 {
    PHI.powf(angle / (PI * 4.0))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    /// Offset from the canvas centre.
    pub pos: Point,
    pub width: f64,
    pub height: f64,
}

pub struct FibonacciSpiral {
    config: FibonacciConfig,
    frame: u32,
    angle: f64,
    complete: bool,
}

impl FibonacciSpiral {
    pub fn new(config: FibonacciConfig) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            frame: 0,
            angle: 0.0,
            complete: false,
        })
    }

    pub fn growth_frame(&self) -> u32 {
        self.frame
    }

    pub fn current_angle(&self) -> f64 {
        self.angle
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Dots from the centre out to the current angle, exclusive.
    pub fn dots(&self) -> impl Iterator<Item = Dot> + '_ {
        let step = self.config.angle_step;
        (0u64..)
            .map(move |i| i as f64 * step)
            .take_while(move |&angle| angle < self.angle)
            .map(move |angle| {
                let g = growth(angle);
                let radius = self.config.base_radius * g;
                let width = self.config.base_dot_width * g;
                Dot {
                    pos: Point::new(radius * angle.cos(), radius * angle.sin()),
                    width,
                    height: width * self.config.dot_aspect,
                }
            })
    }
}

impl Sketch for FibonacciSpiral {
    fn name(&self) -> &str {
        "fibonacci"
    }

    fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    fn filename_pattern(&self) -> FilenamePattern {
        FilenamePattern::new("Fibonacci", 3).starting_at(1)
    }

    fn recording_limit(&self) -> Option<u64> {
        Some(u64::from(self.config.total_frames))
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) -> SketchFlow {
        if !self.complete && self.frame < self.config.total_frames {
            self.frame += 1;
            self.angle = map_range(
                f64::from(self.frame),
                0.0,
                f64::from(self.config.total_frames),
                0.0,
                self.config.max_angle(),
            );
            return SketchFlow::Continue;
        }
        self.complete = true;
        if ctx.is_recording() {
            SketchFlow::Halt
        } else {
            SketchFlow::Continue
        }
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.background(Rgba8::from_hsb(0.0, 0.0, 5.0));
        let c = p.canvas().center();
        p.translate(c.x, c.y);
        p.stroke(Rgba8::BLACK);
        p.stroke_weight(1.0);
        p.fill(Rgba8::WHITE);
        for dot in self.dots() {
            p.ellipse(dot.pos.x, dot.pos.y, dot.width, dot.height);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/fibonacci.rs"]
mod tests;
