//! Guppies: flocking swimmers that switch to seeking food while a wave is in the water.

use std::f64::consts::{PI, TAU};

use crate::animation::steer::{FlockParams, Neighbor, flock_forces, flock_heading, seek_heading};
use crate::engine::entity::EntityStore;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::math::unit;
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

use super::food::{FlakeId, FoodFlake};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuppyPalette {
    pub body: Rgba8,
    pub tail: Rgba8,
}

pub const PALETTES: [GuppyPalette; 6] = [
    GuppyPalette {
        body: Rgba8::rgb(255, 100, 50),
        tail: Rgba8::rgb(255, 150, 0),
    },
    GuppyPalette {
        body: Rgba8::rgb(50, 150, 255),
        tail: Rgba8::rgb(100, 200, 255),
    },
    GuppyPalette {
        body: Rgba8::rgb(255, 200, 50),
        tail: Rgba8::rgb(255, 220, 100),
    },
    GuppyPalette {
        body: Rgba8::rgb(150, 50, 200),
        tail: Rgba8::rgb(200, 100, 255),
    },
    GuppyPalette {
        body: Rgba8::rgb(255, 50, 150),
        tail: Rgba8::rgb(255, 100, 200),
    },
    GuppyPalette {
        body: Rgba8::rgb(50, 200, 150),
        tail: Rgba8::rgb(100, 255, 200),
    },
];

/// Swimming and feeding tunables.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FishParams {
    pub flock: FlockParams,
    /// Fish stay below this fraction of the canvas height.
    pub band_top: f64,
    /// Fish stay above `height - band_floor`.
    pub band_floor: f64,
    /// Maximum push back into the band after crossing an edge.
    pub band_bounce: f64,
    /// Fish only notice food below this fraction of the canvas height.
    pub detect_row: f64,
    /// Distance at which a fish starts eating.
    pub eat_radius: f64,
    pub seek_smoothing: f64,
    /// Fraction of the gap to the food closed per tick while eating.
    pub glide: f64,
    /// Speed multiplier while chasing food.
    pub chase_speed: f64,
}

impl Default for FishParams {
    fn default() -> Self {
        Self {
            flock: FlockParams::default(),
            band_top: 0.5,
            band_floor: 170.0,
            band_bounce: 20.0,
            detect_row: 0.33,
            eat_radius: 20.0,
            seek_smoothing: 0.1,
            glide: 0.1,
            chase_speed: 2.0,
        }
    }
}

/// Read-only world state for one fish update. `school` is the snapshot of every fish taken
/// at the start of the tick, indexed like the school itself.
pub struct SchoolEnv<'a> {
    pub frame: u64,
    pub canvas: Canvas,
    pub params: &'a FishParams,
    pub school: &'a [Neighbor],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Guppy {
    index: usize,
    letter: usize,
    pub pos: Point,
    pub heading: f64,
    speed: f64,
    wobble: f64,
    size: f64,
    palette: GuppyPalette,
    wiggle: f64,
    fin_offset: f64,
    target: Option<FlakeId>,
    eating: bool,
}

impl Guppy {
    /// Fish number `index`, assigned round-robin to one of `letters` letters.
    pub fn spawn(index: usize, letters: usize, canvas: Canvas, rng: &mut SketchRng) -> Self {
        let pos = Point::new(
            rng.range(0.0, canvas.w()),
            rng.range(canvas.h() / 2.0, canvas.h() - 200.0),
        );
        let heading = rng.range(0.0, TAU);
        Self::new(index, index % letters.max(1), pos, heading, rng)
    }

    pub fn new(index: usize, letter: usize, pos: Point, heading: f64, rng: &mut SketchRng) -> Self {
        Self {
            index,
            letter,
            pos,
            heading,
            speed: rng.range(1.5, 2.5),
            wobble: rng.range(0.03, 0.06),
            size: rng.range(8.0, 14.0),
            palette: rng.pick(&PALETTES).copied().unwrap_or(PALETTES[0]),
            wiggle: 0.0,
            fin_offset: rng.range(0.0, TAU),
            target: None,
            eating: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn letter(&self) -> usize {
        self.letter
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn target(&self) -> Option<FlakeId> {
        self.target
    }

    pub fn is_eating(&self) -> bool {
        self.eating
    }

    pub fn neighbor(&self) -> Neighbor {
        Neighbor {
            pos: self.pos,
            heading: self.heading,
        }
    }

    /// Forget the current food target without touching the flake.
    pub fn drop_target(&mut self) {
        self.target = None;
        self.eating = false;
    }

    pub fn swim(&mut self, env: &SchoolEnv<'_>, rng: &mut SketchRng) {
        let flock = &env.params.flock;
        let others = env
            .school
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != self.index)
            .map(|(_, n)| *n);
        let forces = flock_forces(self.pos, others, flock);
        self.heading = flock_heading(self.heading, &forces, flock);
        self.heading += rng.range(-flock.jitter, flock.jitter);

        let pace = 1.0 + (env.frame as f64 * 0.05 + self.index as f64).sin() * 0.3;
        self.pos += unit(self.heading) * (self.speed * pace);

        let (w, h) = (env.canvas.w(), env.canvas.h());
        if self.pos.x < -self.size {
            self.pos.x = w + self.size;
        }
        if self.pos.x > w + self.size {
            self.pos.x = -self.size;
        }

        let top = h * env.params.band_top;
        let floor = h - env.params.band_floor;
        if self.pos.y < top {
            self.pos.y = top + rng.range(0.0, env.params.band_bounce);
            self.heading = rng.range(0.0, PI);
        }
        if self.pos.y > floor {
            self.pos.y = floor - rng.range(0.0, env.params.band_bounce);
            self.heading = rng.range(PI, TAU);
        }

        self.wiggle += self.wobble;
    }

    /// Chase and eat the nearest visible flake of this fish's letter, or swim when there is
    /// none.
    pub fn feed(
        &mut self,
        flakes: &mut EntityStore<FoodFlake>,
        env: &SchoolEnv<'_>,
        rng: &mut SketchRng,
    ) {
        if let Some(id) = self.target {
            match flakes.iter_mut().find(|f| f.id() == id) {
                Some(flake) if !flake.is_eaten() => {}
                Some(flake) => {
                    flake.release();
                    self.drop_target();
                }
                None => self.drop_target(),
            }
        }

        if self.target.is_none() {
            let visible_from = env.canvas.h() * env.params.detect_row;
            let closest = flakes
                .iter()
                .filter(|f| f.letter() == self.letter && f.pos.y >= visible_from && !f.is_eaten())
                .min_by(|a, b| {
                    self.pos
                        .distance(a.pos)
                        .total_cmp(&self.pos.distance(b.pos))
                });
            match closest {
                Some(flake) => {
                    self.target = Some(flake.id());
                    self.eating = false;
                }
                None => {
                    self.swim(env, rng);
                    return;
                }
            }
        }

        let Some(id) = self.target else {
            return;
        };
        let Some(flake) = flakes.iter_mut().find(|f| f.id() == id) else {
            return;
        };

        let food = flake.pos;
        self.heading = seek_heading(self.heading, self.pos, food, env.params.seek_smoothing);
        if self.pos.distance(food) < env.params.eat_radius {
            if !self.eating {
                flake.claim();
                self.eating = true;
            }
            self.pos = self.pos.lerp(food, env.params.glide);
            self.wiggle += self.wobble * 0.5;
        } else {
            self.pos += unit(self.heading) * (self.speed * env.params.chase_speed);
            self.wiggle += self.wobble;
        }
    }

    pub fn render(&self, p: &mut Painter<'_>) {
        let s = self.size;
        let w = self.wiggle;
        let tail = self.palette.tail;
        let body = self.palette.body;

        p.push();
        p.translate(self.pos.x, self.pos.y);
        p.rotate(self.heading);

        let flick = (w * 2.0).sin() * 0.25 + (w * 3.5).sin() * 0.15;
        p.fill(tail);
        p.stroke(tail.scaled(0.7));
        p.stroke_weight(1.0);
        p.polygon(&[
            Point::new(-s * 0.8, 0.0),
            Point::new(-s * 1.4, -s * 0.6 + flick),
            Point::new(-s * 1.5, flick * 0.3),
            Point::new(-s * 1.4, s * 0.6 - flick),
        ]);

        let stretch = 1.0 + (w * 2.0).sin() * 0.05;
        p.fill(body);
        p.stroke(body.scaled(0.7));
        p.ellipse(0.0, 0.0, s * 1.5 * stretch, s / stretch);

        let wave = (w * 1.5 + self.fin_offset).sin() * 0.15
            + (w * 2.8 + self.fin_offset * 1.3).sin() * 0.08;
        p.fill(tail);
        p.no_stroke();
        p.triangle(
            Point::new(-s * 0.2, -s * 0.5),
            Point::new(s * 0.1, -s * 0.8 + wave),
            Point::new(s * 0.3, -s * 0.5),
        );

        let flap = (w * 1.2).sin() * 0.1;
        for (side, angle) in [(1.0, flap), (-1.0, -flap)] {
            p.push();
            p.translate(s * 0.2, side * s * 0.4);
            p.rotate(angle);
            p.ellipse(0.0, 0.0, s * 0.4, s * 0.6);
            p.pop();
        }

        let glance = (w * 0.5).sin() * 0.02;
        p.fill(Rgba8::WHITE);
        p.circle(s * 0.4 + glance, -s * 0.15, s * 0.3);
        p.fill(Rgba8::BLACK);
        p.circle(s * 0.45 + glance, -s * 0.15, s * 0.15);
        p.pop();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/sketches/aquarium/fish.rs"]
mod tests;
