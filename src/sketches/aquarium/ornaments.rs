//! Tank decor: gradient water, seeded gravel, cave with clam, castle with chest, plants and
//! light rays. The clam and chest share one hinge state machine.

use std::f64::consts::{PI, TAU};

use crate::animation::phase::{Phase, PhaseMachine};
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::lerp;
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

const HINGE_EASE: f64 = 0.05;
/// Open when within this angle of the target; shut below it.
const HINGE_SNAP: f64 = 0.1;

/// Height of the gravel bed.
pub const GRAVEL_DEPTH: f64 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HingeState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl Phase for HingeState {
    fn duration(self) -> Option<u32> {
        None
    }

    fn next(self) -> Self {
        match self {
            Self::Closed => Self::Opening,
            Self::Opening => Self::Open,
            Self::Open => Self::Closing,
            Self::Closing => Self::Closed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HingeParams {
    /// Ticks spent shut before opening.
    pub rest_ticks: u32,
    /// Fully open angle (radians).
    pub open_angle: f64,
    /// Ticks held open before closing.
    pub hold_ticks: u32,
    /// Bubbles released when the lid reaches open.
    pub bubbles: usize,
}

impl HingeParams {
    pub fn clam() -> Self {
        Self {
            rest_ticks: 180,
            open_angle: PI / 3.0,
            hold_ticks: 90,
            bubbles: 10,
        }
    }

    pub fn chest() -> Self {
        Self {
            rest_ticks: 200,
            open_angle: PI / 2.5,
            hold_ticks: 100,
            bubbles: 12,
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        if !(self.open_angle.is_finite() && self.open_angle > HINGE_SNAP) {
            return Err(ReelError::validation("hinge open_angle must exceed the snap angle"));
        }
        Ok(())
    }
}

/// A lid that rests shut, eases open, puffs out bubbles, holds and eases shut again.
#[derive(Clone, Debug)]
pub struct Hinge {
    params: HingeParams,
    machine: PhaseMachine<HingeState>,
    angle: f64,
}

impl Hinge {
    pub fn new(params: HingeParams) -> Self {
        Self {
            params,
            machine: PhaseMachine::new(HingeState::Closed),
            angle: 0.0,
        }
    }

    pub fn state(&self) -> HingeState {
        self.machine.phase()
    }

    /// Current lid angle (radians).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// One tick. Returns the number of bubbles to release, non-zero only on the tick the lid
    /// reaches open.
    pub fn step(&mut self) -> usize {
        self.machine.advance();
        let local = self.machine.local_frame();
        match self.machine.phase() {
            HingeState::Closed if local > self.params.rest_ticks => {
                self.machine.enter(HingeState::Opening);
            }
            HingeState::Opening => {
                self.angle = lerp(self.angle, self.params.open_angle, HINGE_EASE);
                if self.angle > self.params.open_angle - HINGE_SNAP {
                    self.machine.enter(HingeState::Open);
                    return self.params.bubbles;
                }
            }
            HingeState::Open if local > self.params.hold_ticks => {
                self.machine.enter(HingeState::Closing);
            }
            HingeState::Closing => {
                self.angle = lerp(self.angle, 0.0, HINGE_EASE);
                if self.angle < HINGE_SNAP {
                    self.angle = 0.0;
                    self.machine.enter(HingeState::Closed);
                }
            }
            _ => {}
        }
        0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stone {
    pub pos: Point,
    pub size: f64,
    pub color: Rgba8,
}

const STONE_COLORS: [Rgba8; 6] = [
    Rgba8::rgb(180, 140, 100),
    Rgba8::rgb(150, 120, 90),
    Rgba8::rgb(200, 160, 120),
    Rgba8::rgb(100, 100, 100),
    Rgba8::rgb(80, 120, 160),
    Rgba8::rgb(160, 100, 140),
];

/// Lay out the gravel bed from its own seed, leaving the sketch stream untouched.
pub fn scatter_gravel(canvas: Canvas, count: usize, seed: u64) -> Vec<Stone> {
    SketchRng::with_seed(seed, |rng| {
        (0..count)
            .map(|_| {
                let pos = Point::new(
                    rng.range(0.0, canvas.w()),
                    canvas.h() - GRAVEL_DEPTH + rng.range(0.0, GRAVEL_DEPTH),
                );
                let size = rng.range(5.0, 15.0);
                let color = rng.pick(&STONE_COLORS).copied().unwrap_or(STONE_COLORS[0]);
                Stone { pos, size, color }
            })
            .collect()
    })
}

pub fn draw_water(p: &mut Painter<'_>) {
    let top = Rgba8::rgb(135, 206, 235);
    let deep = Rgba8::rgb(25, 60, 90);
    let (w, h) = (p.width(), p.height());
    p.push();
    p.stroke_weight(1.0);
    let rows = h as u32;
    for y in 0..rows {
        let y = f64::from(y);
        p.stroke(top.lerp(deep, y / h));
        p.line(0.0, y, w, y);
    }
    p.pop();
}

pub fn draw_gravel(p: &mut Painter<'_>, stones: &[Stone]) {
    let (w, h) = (p.width(), p.height());
    p.push();
    p.no_stroke();
    p.fill(Rgba8::rgb(101, 67, 33));
    p.rect(0.0, h - GRAVEL_DEPTH, w, GRAVEL_DEPTH);
    for stone in stones {
        p.fill(stone.color);
        p.ellipse(stone.pos.x, stone.pos.y, stone.size, stone.size * 0.8);
    }
    p.pop();
}

pub fn draw_cave(p: &mut Painter<'_>, at: Point) {
    p.push();
    p.translate(at.x, at.y);
    p.fill(Rgba8::rgb(80, 70, 60));
    p.stroke(Rgba8::rgb(60, 50, 40));
    p.stroke_weight(2.0);
    p.polygon(&[
        Point::new(-80.0, 0.0),
        Point::new(-90.0, -80.0),
        Point::new(-60.0, -130.0),
        Point::new(0.0, -140.0),
        Point::new(60.0, -130.0),
        Point::new(90.0, -80.0),
        Point::new(80.0, 0.0),
    ]);
    p.fill(Rgba8::rgb(20, 20, 25));
    p.ellipse(0.0, -50.0, 70.0, 80.0);

    p.no_stroke();
    p.fill(Rgba8::rgba(100, 90, 80, 100));
    p.ellipse(-40.0, -70.0, 30.0, 25.0);
    p.ellipse(35.0, -90.0, 25.0, 20.0);
    p.ellipse(-20.0, -110.0, 20.0, 18.0);
    p.fill(Rgba8::rgba(40, 80, 40, 120));
    p.ellipse(-50.0, -30.0, 35.0, 20.0);
    p.ellipse(40.0, -40.0, 30.0, 18.0);
    p.pop();
}

pub fn draw_clam(p: &mut Painter<'_>, at: Point, open: f64) {
    p.push();
    p.translate(at.x, at.y);
    p.fill(Rgba8::rgb(180, 160, 140));
    p.stroke(Rgba8::rgb(140, 120, 100));
    p.stroke_weight(2.0);
    p.arc(0.0, 0.0, 80.0, 50.0, 0.0, PI);

    p.push();
    p.rotate(-open);
    p.fill(Rgba8::rgb(190, 170, 150));
    p.stroke(Rgba8::rgb(150, 130, 110));
    p.arc(0.0, 0.0, 80.0, 50.0, PI, TAU);
    p.stroke(Rgba8::rgb(130, 110, 90));
    p.stroke_weight(1.0);
    for i in (-30..30).step_by(10) {
        let x = f64::from(i);
        p.line(x, -5.0, x, -20.0);
    }
    p.pop();

    if open > 0.3 {
        p.no_stroke();
        p.fill(Rgba8::rgb(255, 250, 240));
        p.circle(0.0, -5.0, 15.0);
        p.fill(Rgba8::rgba(255, 255, 255, 200));
        p.circle(-2.0, -7.0, 6.0);
    }
    p.pop();
}

pub fn draw_castle(p: &mut Painter<'_>, at: Point) {
    p.push();
    p.translate(at.x, at.y);
    p.fill(Rgba8::rgb(160, 160, 180));
    p.stroke(Rgba8::rgb(120, 120, 140));
    p.stroke_weight(2.0);
    p.rect(-100.0, -80.0, 200.0, 80.0);
    p.rect(-90.0, -180.0, 60.0, 100.0);
    p.rect(30.0, -180.0, 60.0, 100.0);
    p.rect(-30.0, -140.0, 60.0, 60.0);

    p.fill(Rgba8::rgb(140, 140, 160));
    for (from, to, y) in [(-90, -30, -190.0), (30, 90, -190.0), (-30, 30, -150.0)] {
        for x in (from..to).step_by(15) {
            p.rect(f64::from(x), y, 10.0, 10.0);
        }
    }

    p.fill(Rgba8::rgb(60, 60, 80));
    p.rect(-70.0, -150.0, 20.0, 30.0);
    p.rect(50.0, -150.0, 20.0, 30.0);
    p.rect(-10.0, -120.0, 20.0, 25.0);

    p.fill(Rgba8::rgb(80, 60, 40));
    p.arc(0.0, -40.0, 40.0, 60.0, PI, TAU);
    p.rect(-20.0, -40.0, 40.0, 40.0);

    p.no_stroke();
    p.fill(Rgba8::rgba(40, 80, 40, 120));
    p.ellipse(-80.0, -50.0, 30.0, 20.0);
    p.ellipse(60.0, -60.0, 35.0, 22.0);
    p.pop();
}

pub fn draw_chest(p: &mut Painter<'_>, at: Point, open: f64) {
    let brass = Rgba8::rgb(180, 160, 100);
    p.push();
    p.translate(at.x, at.y);
    p.fill(Rgba8::rgb(101, 67, 33));
    p.stroke(Rgba8::rgb(70, 45, 20));
    p.stroke_weight(2.0);
    p.rounded_rect(-40.0, -20.0, 80.0, 40.0, 5.0);

    p.push();
    p.translate(0.0, -20.0);
    p.rotate(-open);
    p.fill(Rgba8::rgb(110, 75, 38));
    p.stroke(Rgba8::rgb(75, 50, 23));
    p.arc(0.0, 0.0, 80.0, 40.0, PI, TAU);
    p.rect(-40.0, 0.0, 80.0, 10.0);
    p.stroke(brass);
    p.stroke_weight(3.0);
    for x in [-30.0, 30.0, 0.0] {
        p.line(x, -15.0, x, 5.0);
    }
    p.pop();

    p.fill(brass);
    p.stroke(Rgba8::rgb(140, 120, 70));
    p.stroke_weight(2.0);
    p.circle(0.0, -10.0, 12.0);

    if open > 0.5 {
        p.fill(Rgba8::rgb(255, 215, 0));
        p.circle(-10.0, -25.0, 12.0);
        p.circle(5.0, -28.0, 10.0);
        p.circle(-5.0, -30.0, 11.0);
        p.fill(Rgba8::rgb(255, 50, 100));
        p.circle(10.0, -26.0, 8.0);
        p.fill(Rgba8::rgb(50, 150, 255));
        p.circle(15.0, -23.0, 7.0);
    }
    p.pop();
}

/// A cluster of three swaying stems rooted at `(x, base)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Plant {
    pub x: f64,
    pub color: Rgba8,
    pub height: f64,
}

pub fn default_plants() -> Vec<Plant> {
    [
        (120.0, Rgba8::rgb(34, 139, 34), 1200.0),
        (350.0, Rgba8::rgb(50, 150, 50), 960.0),
        (700.0, Rgba8::rgb(40, 130, 40), 1400.0),
        (900.0, Rgba8::rgb(45, 140, 45), 1100.0),
        (500.0, Rgba8::rgb(60, 160, 60), 1000.0),
        (650.0, Rgba8::rgb(55, 145, 55), 1300.0),
    ]
    .into_iter()
    .map(|(x, color, height)| Plant { x, color, height })
    .collect()
}

/// Horizontal sway of stem `phase` at height `j` of a plant `tall` pixels high.
pub fn stem_sway(frame: u64, phase: f64, j: f64, tall: f64) -> f64 {
    let t = frame as f64;
    let amount = (j / tall) * 20.0;
    (t * 0.015 + phase + j * 0.003).sin() * amount
        + (t * 0.008 + phase * 2.0 + j * 0.002).sin() * amount * 0.5
}

pub fn draw_plant(p: &mut Painter<'_>, plant: &Plant, base: f64, frame: u64) {
    let tall = plant.height.max(1.0);
    let t = frame as f64;
    p.push();
    p.stroke(plant.color);
    p.no_fill();
    for i in 0..3 {
        let offset = f64::from(i - 1) * 15.0;
        let phase = f64::from(i) * 1.5;
        let root = plant.x + offset;

        p.stroke_weight(4.0);
        let stem: Vec<Point> = (0..=(tall as u32) / 10)
            .map(|k| {
                let j = f64::from(k * 10);
                Point::new(root + stem_sway(frame, phase, j, tall), base - j)
            })
            .collect();
        p.polyline(&stem);

        p.stroke_weight(2.0);
        let mut j = 20.0;
        while j < tall {
            let x = root + stem_sway(frame, phase, j, tall);
            let y = base - j;
            let flutter = (t * 0.025 + f64::from(i) + j * 0.01).sin() * 5.0;
            for side in [-1.0, 1.0] {
                p.bezier(
                    Point::new(x, y),
                    Point::new(x + side * (20.0 - flutter), y - 5.0),
                    Point::new(x + side * (25.0 - flutter), y - 10.0),
                    Point::new(x + side * (20.0 - flutter * 0.5), y - 15.0),
                );
            }
            j += 25.0;
        }
    }
    p.pop();
}

pub fn draw_light_rays(p: &mut Painter<'_>, frame: u64) {
    let (w, h) = (p.width(), p.height());
    let t = frame as f64;
    p.push();
    p.no_stroke();
    p.fill(Rgba8::rgba(255, 255, 255, 10));
    for i in 0..5 {
        let i = f64::from(i);
        let x = (w / 6.0) * (i + 0.5);
        let sway = (t * 0.01 + i).sin() * 30.0;
        p.triangle(
            Point::new(x + sway, 0.0),
            Point::new(x - 50.0 + sway, h - GRAVEL_DEPTH),
            Point::new(x + 50.0 + sway, h - GRAVEL_DEPTH),
        );
    }
    p.pop();
}

#[cfg(test)]
#[path = "../../../tests/unit/sketches/aquarium/ornaments.rs"]
mod tests;
