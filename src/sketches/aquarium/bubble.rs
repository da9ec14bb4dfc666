use std::f64::consts::TAU;

use crate::engine::entity::Entity;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::math::{lerp, map_range};
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

/// Bubbles above this line are gone.
pub const CEILING: f64 = -20.0;
const ACCELERATION: f64 = 0.05;

/// A rising air bubble. Starts at rest and eases up to its base speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub pos: Point,
    size: f64,
    base_speed: f64,
    speed: f64,
    wobble: f64,
    wobble_offset: f64,
    wobble_amp: f64,
    age: u32,
    max_age: f64,
    current_size: f64,
}

impl Bubble {
    /// Release a bubble near `at`.
    pub fn new(at: Point, rng: &mut SketchRng) -> Self {
        let size = rng.range(5.0, 12.0);
        Self {
            pos: Point::new(at.x + rng.range(-10.0, 10.0), at.y),
            size,
            base_speed: rng.range(1.2, 2.5),
            speed: 0.0,
            wobble: rng.range(0.015, 0.035),
            wobble_offset: rng.range(0.0, TAU),
            wobble_amp: rng.range(0.8, 1.5),
            age: 0,
            max_age: rng.range(120.0, 180.0),
            current_size: size,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn current_size(&self) -> f64 {
        self.current_size
    }
}

impl Entity for Bubble {
    /// Scene frame count, which drives the wobble phase.
    type Env = u64;

    fn step(&mut self, frame: &u64, _rng: &mut SketchRng) {
        self.age += 1;
        self.speed = lerp(self.speed, self.base_speed, ACCELERATION);
        self.pos.y -= self.speed;

        let t = *frame as f64;
        let drift = (t * self.wobble + self.wobble_offset).sin() * self.wobble_amp
            + (t * self.wobble * 0.5 + self.wobble_offset * 1.3).sin() * self.wobble_amp * 0.3;
        self.pos.x += drift;

        let pulse = (f64::from(self.age) * 0.1).sin() * 0.1;
        self.current_size = self.size * (1.0 + pulse);
    }

    fn is_expired(&self) -> bool {
        self.pos.y < CEILING
    }

    fn render(&self, p: &mut Painter<'_>) {
        let s = self.current_size;
        let alpha = map_range(f64::from(self.age), 0.0, self.max_age, 80.0, 120.0);
        let shimmer = (f64::from(self.age) * 0.15).sin() * 30.0 + 200.0;

        p.push();
        p.no_stroke();
        p.fill(Rgba8::WHITE.with_alpha(alpha));
        p.circle(self.pos.x, self.pos.y, s);
        p.fill(Rgba8::WHITE.with_alpha(shimmer));
        p.circle(self.pos.x - s * 0.25, self.pos.y - s * 0.25, s * 0.35);
        p.fill(Rgba8::WHITE.with_alpha(shimmer * 0.7));
        p.circle(self.pos.x + s * 0.15, self.pos.y - s * 0.15, s * 0.15);
        p.pop();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/sketches/aquarium/bubble.rs"]
mod tests;
