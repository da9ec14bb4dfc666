//! Falling food pieces that settle into letter shapes.

use std::f64::consts::TAU;

use crate::engine::entity::Entity;
use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
use crate::foundation::math::lerp;
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

use super::letters;

/// Stable identity of a flake; fish hold these instead of references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlakeId(pub u64);

const DRIFT: f64 = 0.02;
const SETTLE_PULL: f64 = 0.15;
const SETTLE_SNAP: f64 = 2.0;

/// Layout of one food wave.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaveLayout {
    pub pieces_per_letter: usize,
    /// Horizontal distance between letter centres.
    pub letter_spacing: f64,
    /// Pixels per letter-cell unit.
    pub letter_scale: f64,
    /// Height the pieces are dropped from.
    pub drop_y: f64,
    /// Fraction of the canvas height where letter centres sit.
    pub letter_row: f64,
    /// Eat rate per fish per tick for the first wave.
    pub first_wave_eat_rate: f64,
    /// Eat rate per fish per tick for every later wave.
    pub later_wave_eat_rate: f64,
}

impl Default for WaveLayout {
    fn default() -> Self {
        Self {
            pieces_per_letter: 15,
            letter_spacing: 150.0,
            letter_scale: 60.0,
            drop_y: 50.0,
            letter_row: 0.5,
            first_wave_eat_rate: 0.015,
            later_wave_eat_rate: 0.003,
        }
    }
}

impl WaveLayout {
    /// Centre of letter `index` of [`letters::WORD`].
    pub fn letter_center(&self, canvas: Canvas, index: usize) -> Point {
        let count = letters::WORD.len();
        let span = (count.saturating_sub(1)) as f64 * self.letter_spacing;
        Point::new(
            (canvas.w() - span) / 2.0 + index as f64 * self.letter_spacing,
            canvas.h() * self.letter_row,
        )
    }

    /// Where piece `piece` of letter `index` comes to rest.
    pub fn settle_target(&self, canvas: Canvas, index: usize, piece: usize) -> Point {
        let center = self.letter_center(canvas, index);
        let letter = letters::WORD.chars().nth(index).unwrap_or(' ');
        match letters::settle_point(letter, piece) {
            Some((x, y)) => center + Vec2::new(x * self.letter_scale, y * self.letter_scale),
            None => center,
        }
    }

    pub fn eat_rate(&self, wave: u32) -> f64 {
        if wave <= 1 {
            self.first_wave_eat_rate
        } else {
            self.later_wave_eat_rate
        }
    }
}

/// One food piece.
#[derive(Clone, Debug, PartialEq)]
pub struct FoodFlake {
    id: FlakeId,
    letter: usize,
    wave: u32,
    start_x: f64,
    pub pos: Point,
    target: Point,
    size: f64,
    fall_speed: f64,
    wobble: f64,
    wobble_offset: f64,
    eat_rate: f64,
    eaters: u32,
    eaten: f64,
    settled: bool,
    color: Rgba8,
}

impl FoodFlake {
    pub fn new(
        id: FlakeId,
        letter: usize,
        wave: u32,
        start: Point,
        target: Point,
        eat_rate: f64,
        rng: &mut SketchRng,
    ) -> Self {
        Self {
            id,
            letter,
            wave,
            start_x: start.x,
            pos: start,
            target,
            size: rng.range(6.0, 9.0),
            fall_speed: rng.range(2.5, 3.2),
            wobble: rng.range(0.01, 0.03),
            wobble_offset: rng.range(0.0, TAU),
            eat_rate,
            eaters: 0,
            eaten: 0.0,
            settled: false,
            color: Rgba8::from_hsb(
                rng.range(20.0, 40.0),
                rng.range(70.0, 90.0),
                rng.range(60.0, 80.0),
            ),
        }
    }

    pub fn id(&self) -> FlakeId {
        self.id
    }

    /// Index of the letter this piece belongs to.
    pub fn letter(&self) -> usize {
        self.letter
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn eaters(&self) -> u32 {
        self.eaters
    }

    /// Eaten fraction in `[0, 1]`.
    pub fn eaten(&self) -> f64 {
        self.eaten
    }

    pub fn is_eaten(&self) -> bool {
        self.eaten >= 1.0
    }

    pub fn claim(&mut self) {
        self.eaters += 1;
    }

    pub fn release(&mut self) {
        self.eaters = self.eaters.saturating_sub(1);
    }

    fn fall(&mut self, frame: u64) {
        self.pos.y += self.fall_speed;
        let progress = if self.target.y > 0.0 {
            (self.pos.y / self.target.y).min(1.0)
        } else {
            1.0
        };
        let lane = lerp(self.start_x, self.target.x, progress);
        self.pos.x += (lane - self.pos.x) * DRIFT;
        self.pos.x += (frame as f64 * self.wobble + self.wobble_offset).sin() * 0.5;

        if self.pos.y >= self.target.y {
            self.pos.y = self.target.y;
            self.pos.x = lerp(self.pos.x, self.target.x, SETTLE_PULL);
            if (self.pos.x - self.target.x).abs() < SETTLE_SNAP {
                self.settled = true;
                self.pos.x = self.target.x;
            }
        }
    }
}

impl Entity for FoodFlake {
    type Env = u64;

    fn step(&mut self, frame: &u64, _rng: &mut SketchRng) {
        if !self.settled {
            self.fall(*frame);
        }
        if self.eaters > 0 {
            self.eaten = (self.eaten + self.eat_rate * f64::from(self.eaters)).min(1.0);
        }
    }

    fn is_expired(&self) -> bool {
        self.is_eaten()
    }

    fn render(&self, p: &mut Painter<'_>) {
        if self.is_eaten() {
            return;
        }
        let d = self.size * (1.0 - self.eaten);
        p.push();
        p.no_stroke();
        p.fill(self.color);
        p.circle(self.pos.x, self.pos.y, d);
        p.pop();
    }
}

/// Drop one wave: `pieces_per_letter` flakes above each letter of [`letters::WORD`].
///
/// Ids are taken from `next_id`, which is advanced past the last one used.
pub fn drop_wave(
    layout: &WaveLayout,
    canvas: Canvas,
    wave: u32,
    next_id: &mut u64,
    rng: &mut SketchRng,
) -> Vec<FoodFlake> {
    let letter_count = letters::WORD.len();
    let mut flakes = Vec::with_capacity(letter_count * layout.pieces_per_letter);
    for letter in 0..letter_count {
        let column = layout.letter_center(canvas, letter).x;
        for piece in 0..layout.pieces_per_letter {
            let start = Point::new(
                column + rng.range(-15.0, 15.0),
                layout.drop_y + rng.range(-10.0, 10.0),
            );
            let target = layout.settle_target(canvas, letter, piece);
            let id = FlakeId(*next_id);
            *next_id += 1;
            flakes.push(FoodFlake::new(
                id,
                letter,
                wave,
                start,
                target,
                layout.eat_rate(wave),
                rng,
            ));
        }
    }
    tracing::debug!(wave, pieces = flakes.len(), "food wave dropped");
    flakes
}

#[cfg(test)]
#[path = "../../../tests/unit/sketches/aquarium/food.rs"]
mod tests;
