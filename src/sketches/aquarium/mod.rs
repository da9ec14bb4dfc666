//! Aquarium reel: a school of guppies that gathers around food settling into the letters of
//! "GENUARY", over a seamless 300-frame loop.
//!
//! Timeline (loop frames): the school swims freely, food waves drop at `feeding_start` and
//! `second_wave`, and at `feeding_end` the leftovers vanish and the school disperses again.

pub mod bubble;
pub mod fish;
pub mod food;
pub mod letters;
pub mod ornaments;

use crate::animation::steer::Neighbor;
use crate::encode::export::FilenamePattern;
use crate::engine::entity::EntityStore;
use crate::engine::sketch::{Sketch, SketchFlow, TickCtx};
use crate::engine::timebase::LoopTimer;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

use bubble::Bubble;
use fish::{FishParams, Guppy, SchoolEnv};
use food::{FoodFlake, WaveLayout, drop_wave};
use ornaments::{GRAVEL_DEPTH, Hinge, HingeParams, Plant, Stone};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AquariumConfig {
    pub canvas: Canvas,
    /// School size is drawn from `[fish_min, fish_max)`.
    pub fish_min: usize,
    pub fish_max: usize,
    pub loop_frames: u32,
    pub feeding_start: u32,
    pub second_wave: u32,
    pub feeding_end: u32,
    pub recording_frames: u64,
    pub waves: WaveLayout,
    pub fish: FishParams,
    pub clam: HingeParams,
    pub chest: HingeParams,
    pub gravel_seed: u64,
    pub gravel_stones: usize,
    pub plants: Vec<Plant>,
}

impl Default for AquariumConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::REEL,
            fish_min: 400,
            fish_max: 500,
            loop_frames: 300,
            feeding_start: 30,
            second_wave: 120,
            feeding_end: 270,
            recording_frames: 300,
            waves: WaveLayout::default(),
            fish: FishParams::default(),
            clam: HingeParams::clam(),
            chest: HingeParams::chest(),
            gravel_seed: 12345,
            gravel_stones: 200,
            plants: ornaments::default_plants(),
        }
    }
}

impl AquariumConfig {
    pub fn validate(&self) -> ReelResult<()> {
        if self.fish_min == 0 || self.fish_min > self.fish_max {
            return Err(ReelError::validation(
                "aquarium needs 0 < fish_min <= fish_max",
            ));
        }
        if !(self.feeding_start < self.second_wave
            && self.second_wave < self.feeding_end
            && self.feeding_end < self.loop_frames)
        {
            return Err(ReelError::validation(
                "aquarium timeline must satisfy feeding_start < second_wave < feeding_end < loop_frames",
            ));
        }
        if self.recording_frames == 0 {
            return Err(ReelError::validation("aquarium recording_frames must be > 0"));
        }
        self.clam.validate()?;
        self.chest.validate()?;
        Ok(())
    }

    fn clam_at(&self) -> Point {
        Point::new(280.0, self.canvas.h() - GRAVEL_DEPTH)
    }

    fn chest_at(&self) -> Point {
        Point::new(self.canvas.w() - 350.0, self.canvas.h() - GRAVEL_DEPTH)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedState {
    Swimming,
    Feeding,
}

pub struct Aquarium {
    config: AquariumConfig,
    fish: Vec<Guppy>,
    flakes: EntityStore<FoodFlake>,
    bubbles: EntityStore<Bubble>,
    clam: Hinge,
    chest: Hinge,
    gravel: Vec<Stone>,
    timer: LoopTimer,
    state: FeedState,
    waves_dropped: u32,
    next_flake: u64,
    /// Scene frame count, starting at 1 on the first update.
    frame: u64,
}

impl Aquarium {
    pub fn new(config: AquariumConfig) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            fish: Vec::new(),
            flakes: EntityStore::new(),
            bubbles: EntityStore::new(),
            clam: Hinge::new(config.clam.clone()),
            chest: Hinge::new(config.chest.clone()),
            gravel: Vec::new(),
            timer: LoopTimer::new(config.loop_frames)?,
            state: FeedState::Swimming,
            waves_dropped: 0,
            next_flake: 0,
            frame: 0,
            config,
        })
    }

    pub fn config(&self) -> &AquariumConfig {
        &self.config
    }

    pub fn fish(&self) -> &[Guppy] {
        &self.fish
    }

    pub fn flakes(&self) -> &EntityStore<FoodFlake> {
        &self.flakes
    }

    pub fn bubbles(&self) -> &EntityStore<Bubble> {
        &self.bubbles
    }

    pub fn gravel(&self) -> &[Stone] {
        &self.gravel
    }

    pub fn clam(&self) -> &Hinge {
        &self.clam
    }

    pub fn chest(&self) -> &Hinge {
        &self.chest
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    /// Position inside the loop.
    pub fn loop_frame(&self) -> u32 {
        self.timer.frame()
    }

    pub fn waves_dropped(&self) -> u32 {
        self.waves_dropped
    }

    /// Step or sync the loop position. Wrapping, or a recording that rewinds the loop, starts the
    /// timeline over.
    fn advance_timer(&mut self, recorded: Option<u64>) {
        let restarted = match recorded {
            Some(n) => self.timer.set(n),
            None => self.timer.advance(),
        };
        if restarted {
            tracing::trace!(recorded = ?recorded, "aquarium loop restarted");
            self.waves_dropped = 0;
            self.state = FeedState::Swimming;
            self.clear_food();
        }
    }

    fn clear_food(&mut self) {
        self.flakes.clear();
        for fish in &mut self.fish {
            fish.drop_target();
        }
    }

    fn drop_food(&mut self, rng: &mut SketchRng) {
        self.waves_dropped += 1;
        let wave = drop_wave(
            &self.config.waves,
            self.config.canvas,
            self.waves_dropped,
            &mut self.next_flake,
            rng,
        );
        self.flakes.extend(wave);
    }

    fn step_school(&mut self, rng: &mut SketchRng) {
        let school: Vec<Neighbor> = self.fish.iter().map(Guppy::neighbor).collect();
        let env = SchoolEnv {
            frame: self.frame,
            canvas: self.config.canvas,
            params: &self.config.fish,
            school: &school,
        };
        let feeding = self.state == FeedState::Feeding && !self.flakes.is_empty();
        for fish in &mut self.fish {
            if feeding {
                fish.feed(&mut self.flakes, &env, rng);
            } else {
                fish.swim(&env, rng);
            }
        }
    }

    fn vent(&mut self, at: Point, count: usize, rng: &mut SketchRng) {
        for _ in 0..count {
            self.bubbles.spawn(Bubble::new(at, rng));
        }
    }
}

impl Sketch for Aquarium {
    fn name(&self) -> &str {
        "aquarium"
    }

    fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    fn filename_pattern(&self) -> FilenamePattern {
        FilenamePattern::new("GenuaryFishes", 3).starting_at(1)
    }

    fn recording_limit(&self) -> Option<u64> {
        Some(self.config.recording_frames)
    }

    fn setup(&mut self, rng: &mut SketchRng) -> ReelResult<()> {
        let count = rng.range_usize(self.config.fish_min, self.config.fish_max);
        let letters = letters::WORD.len();
        let canvas = self.config.canvas;
        self.fish = (0..count)
            .map(|i| Guppy::spawn(i, letters, canvas, rng))
            .collect();
        self.gravel = ornaments::scatter_gravel(
            canvas,
            self.config.gravel_stones,
            self.config.gravel_seed,
        );
        tracing::debug!(fish = count, "aquarium stocked");
        Ok(())
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) -> SketchFlow {
        self.frame = ctx.frame.0 + 1;
        self.advance_timer(ctx.recorded);

        let t = self.timer.frame();
        if t == self.config.feeding_start {
            self.state = FeedState::Feeding;
        } else if t == self.config.feeding_end {
            self.state = FeedState::Swimming;
            self.clear_food();
        }

        self.bubbles.step_all(&self.frame, ctx.rng);
        self.bubbles.prune();

        if self.state == FeedState::Feeding {
            if t == self.config.feeding_start && self.waves_dropped == 0 {
                self.drop_food(ctx.rng);
            }
            if t == self.config.second_wave && self.waves_dropped == 1 {
                self.drop_food(ctx.rng);
            }
        }

        self.flakes.step_all(&self.frame, ctx.rng);
        self.flakes.prune();
        self.step_school(ctx.rng);

        let puffs = self.clam.step();
        let at = self.config.clam_at();
        self.vent(at, puffs, ctx.rng);
        let puffs = self.chest.step();
        let at = self.config.chest_at();
        self.vent(at, puffs, ctx.rng);

        SketchFlow::Continue
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let canvas = self.config.canvas;
        let floor = canvas.h() - GRAVEL_DEPTH;

        ornaments::draw_water(p);
        ornaments::draw_gravel(p, &self.gravel);
        ornaments::draw_cave(p, Point::new(200.0, floor));
        ornaments::draw_clam(p, self.config.clam_at(), self.clam.angle());
        ornaments::draw_castle(p, Point::new(canvas.w() - 200.0, floor));
        ornaments::draw_chest(p, self.config.chest_at(), self.chest.angle());

        self.bubbles.render_all(p);
        for plant in &self.config.plants {
            ornaments::draw_plant(p, plant, floor, self.frame);
        }
        self.flakes.render_all(p);
        for fish in &self.fish {
            fish.render(p);
        }
        ornaments::draw_light_rays(p, self.frame);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/sketches/aquarium/mod.rs"]
mod tests;
