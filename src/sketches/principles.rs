//! Character reel demonstrating the classic animation principles.
//!
//! A figure presses a wall button, a trap door swings open, a ball drops out, bounces once
//! across the floor and splashes into a pool; the figure lifts a wet leg and frowns, the ball
//! sinks and the scene resets. The whole reel is a [`PhaseMachine`] over [`ScenePhase`]; each
//! phase maps its local frame counter onto pose parameters through easing curves.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::time::Duration;

use crate::animation::ease::{Ease, window_progress};
use crate::animation::phase::{Phase, PhaseMachine};
use crate::encode::export::FilenamePattern;
use crate::engine::entity::{Entity, EntityStore};
use crate::engine::sketch::{Sketch, SketchFlow, TickCtx};
use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{lerp, map_clamped, map_range};
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

const SKIN: Rgba8 = Rgba8::rgb(255, 200, 150);
const WATER: Rgba8 = Rgba8::rgb(50, 150, 200);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenePhase {
    /// Waiting for the auto-start timer or a press on the button.
    Idle,
    LookAtButton,
    ButtonPress,
    DoorOpen,
    /// Left when the ball hits the water.
    BallFall,
    Splash,
    SplashReaction,
    Sink,
}

impl Phase for ScenePhase {
    fn duration(self) -> Option<u32> {
        match self {
            Self::Idle | Self::BallFall => None,
            Self::LookAtButton => Some(20),
            Self::ButtonPress => Some(18),
            Self::DoorOpen => Some(10),
            Self::Splash => Some(15),
            Self::SplashReaction => Some(35),
            Self::Sink => Some(30),
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Idle => Self::LookAtButton,
            Self::LookAtButton => Self::ButtonPress,
            Self::ButtonPress => Self::DoorOpen,
            Self::DoorOpen => Self::BallFall,
            Self::BallFall => Self::Splash,
            Self::Splash => Self::SplashReaction,
            Self::SplashReaction => Self::Sink,
            Self::Sink => Self::LookAtButton,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Expression {
    #[default]
    Neutral,
    Smile,
    Frown,
}

/// Keyframed parameters of the figure and its props.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rig {
    pub head_rotation: f64,
    pub right_arm: f64,
    pub left_arm: f64,
    /// Vertical crouch before the press (negative is down in figure space).
    pub anticipation: f64,
    pub leg_lift: f64,
    pub expression: Expression,
    pub button_depth: f64,
    pub door_angle: f64,
}

impl Rig {
    /// Pose for frame `local` of `phase`. Phases without keyframes leave the rig untouched.
    pub fn animate(&mut self, phase: ScenePhase, local: u32) {
        let eio = Ease::InOutQuad;
        match phase {
            ScenePhase::LookAtButton => {
                if local < 10 {
                    self.head_rotation = eio.tween(0.0, 0.3, window_progress(local, 0, 10));
                    self.expression = Expression::Smile;
                } else {
                    self.head_rotation = eio.tween(0.3, 0.0, window_progress(local, 10, 20));
                }
            }
            ScenePhase::ButtonPress => {
                self.expression = Expression::Smile;
                if local < 8 {
                    let t = window_progress(local, 0, 8);
                    self.anticipation = lerp(0.0, -15.0, t);
                    self.right_arm = lerp(0.0, -0.3, t);
                } else if local < 13 {
                    let t = eio.apply(window_progress(local, 8, 13));
                    self.right_arm = lerp(-0.3, 0.5, t);
                    self.button_depth = lerp(0.0, 10.0, t);
                    self.anticipation = lerp(-15.0, 0.0, t);
                } else {
                    let t = Ease::OutQuad.apply(window_progress(local, 13, 18));
                    self.right_arm = lerp(0.5, 0.0, t);
                    self.button_depth = lerp(10.0, 0.0, t);
                }
            }
            ScenePhase::DoorOpen => {
                self.door_angle = eio.tween(0.0, FRAC_PI_2, window_progress(local, 0, 10));
            }
            ScenePhase::SplashReaction => {
                if local < 10 {
                    let t = eio.apply(window_progress(local, 0, 10));
                    self.head_rotation = lerp(0.0, -0.4, t);
                    self.leg_lift = lerp(0.0, -20.0, t);
                    self.expression = Expression::Frown;
                } else if local < 25 {
                    self.head_rotation = -0.4;
                    self.leg_lift = -20.0;
                    self.expression = Expression::Frown;
                } else {
                    let t = eio.apply(window_progress(local, 25, 35));
                    self.head_rotation = lerp(-0.4, 0.0, t);
                    self.leg_lift = lerp(-20.0, 0.0, t);
                    self.expression = Expression::Neutral;
                }
            }
            ScenePhase::Idle
            | ScenePhase::BallFall
            | ScenePhase::Splash
            | ScenePhase::Sink => {}
        }
    }
}

/// The water pool, centred horizontally on `center_x` with its surface at `surface_y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pool {
    pub center_x: f64,
    pub surface_y: f64,
    pub width: f64,
    pub depth: f64,
}

impl Pool {
    pub fn spans(&self, x: f64) -> bool {
        (x - self.center_x).abs() < self.width / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallEvent {
    Flying,
    Bounced,
    Splashed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ball {
    pub pos: Point,
    pub vel: Vec2,
    pub radius: f64,
    pub squash_x: f64,
    pub squash_y: f64,
    pub rotation: f64,
    pub spin: f64,
    pub bounces: u32,
    pub alpha: f64,
}

impl Ball {
    pub fn new(at: Point, radius: f64) -> Self {
        Self {
            pos: at,
            vel: Vec2::ZERO,
            radius,
            squash_x: 1.0,
            squash_y: 1.0,
            rotation: 0.0,
            spin: 0.0,
            bounces: 0,
            alpha: 255.0,
        }
    }

    /// One step of free flight under `cfg`, bouncing off the floor until `max_bounces` and
    /// splashing into `pool` afterwards.
    pub fn fall(&mut self, floor_y: f64, pool: &Pool, cfg: &PrinciplesConfig) -> FallEvent {
        self.vel.y += cfg.gravity;
        self.pos += self.vel;
        self.rotation += self.spin;

        let speed = self.vel.y.abs();
        self.squash_y = map_range(speed, 0.0, 20.0, 1.0, 1.3);
        self.squash_x = map_range(speed, 0.0, 20.0, 1.0, 0.8);

        let bottom = self.pos.y + self.radius;
        let over_water = pool.spans(self.pos.x);
        if over_water && bottom >= pool.surface_y && self.bounces >= cfg.bounces {
            return FallEvent::Splashed;
        }

        let mut event = FallEvent::Flying;
        if !over_water && bottom >= floor_y && self.bounces < cfg.bounces {
            self.vel.y *= -cfg.bounce_damping;
            self.vel.x *= cfg.bounce_friction;
            self.pos.y = floor_y - self.radius;
            self.bounces += 1;
            self.spin *= cfg.spin_damping;
            self.squash_y = 0.5;
            self.squash_x = 1.5;
            event = FallEvent::Bounced;
        }
        self.relax(0.15);
        event
    }

    /// Ease the squash factors back toward round.
    pub fn relax(&mut self, rate: f64) {
        self.squash_x = lerp(self.squash_x, 1.0, rate);
        self.squash_y = lerp(self.squash_y, 1.0, rate);
    }

    fn render(&self, p: &mut Painter<'_>) {
        let d = self.radius * 2.0;
        p.push();
        p.translate(self.pos.x, self.pos.y);
        p.rotate(self.rotation);
        p.scale(self.squash_x, self.squash_y);
        p.no_stroke();
        p.fill(Rgba8::rgb(255, 100, 50).with_alpha(self.alpha));
        p.circle(0.0, 0.0, d);
        p.fill(Rgba8::rgb(255, 150, 100).with_alpha(self.alpha * 0.6));
        p.circle(-self.radius * 0.3, -self.radius * 0.3, self.radius * 0.8);
        p.pop();
    }
}

/// A water droplet thrown up by the splash.
#[derive(Clone, Debug, PartialEq)]
pub struct SplashDrop {
    pub pos: Point,
    pub vel: Vec2,
    pub size: f64,
    pub life: u32,
}

impl SplashDrop {
    /// `count` droplets fanned upward from `origin` between 27° and 153°.
    pub fn burst(origin: Point, count: usize, life: u32, rng: &mut SketchRng) -> Vec<Self> {
        (0..count)
            .map(|i| {
                let angle = map_range(i as f64, 0.0, count as f64, PI * 0.15, PI * 0.85);
                let speed = rng.range(4.0, 10.0);
                Self {
                    pos: origin,
                    vel: Vec2::new(angle.cos() * speed, -angle.sin() * speed),
                    size: rng.range(4.0, 12.0),
                    life,
                }
            })
            .collect()
    }
}

impl Entity for SplashDrop {
    /// Downward acceleration per tick.
    type Env = f64;

    fn step(&mut self, gravity: &f64, _rng: &mut SketchRng) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.life = self.life.saturating_sub(1);
    }

    fn is_expired(&self) -> bool {
        self.life == 0
    }

    fn render(&self, p: &mut Painter<'_>) {
        p.push();
        p.no_stroke();
        p.fill(WATER.with_alpha(map_range(f64::from(self.life), 0.0, 30.0, 0.0, 200.0)));
        p.circle(self.pos.x, self.pos.y, self.size);
        p.pop();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RippleRates {
    pub growth: f64,
    pub fade: f64,
}

/// Expanding ring on the pool surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub center: Point,
    pub size: f64,
    pub alpha: f64,
}

impl Entity for Ripple {
    type Env = RippleRates;

    fn step(&mut self, rates: &RippleRates, _rng: &mut SketchRng) {
        self.size += rates.growth;
        self.alpha -= rates.fade;
    }

    fn is_expired(&self) -> bool {
        self.alpha <= 0.0
    }

    fn render(&self, p: &mut Painter<'_>) {
        p.push();
        p.no_fill();
        p.stroke(Rgba8::rgba(100, 180, 220, 100));
        p.stroke_weight(2.0);
        p.ellipse(self.center.x, self.center.y, self.size, self.size * 0.3);
        p.pop();
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PrinciplesConfig {
    pub canvas: Canvas,
    /// Leave `Idle` on its own this long after launch.
    pub auto_start_ms: f64,
    pub recording_frames: u64,
    pub ball_radius: f64,
    pub gravity: f64,
    pub launch_speed: f64,
    pub launch_spin: f64,
    /// Floor bounces before the ball may enter the water.
    pub bounces: u32,
    pub bounce_damping: f64,
    pub bounce_friction: f64,
    pub spin_damping: f64,
    pub splash_drops: usize,
    pub drop_life: u32,
    pub drop_gravity: f64,
    pub ripples: RippleRates,
    pub pool_width: f64,
    /// Pointer presses closer than this to the button start the reel.
    pub button_reach: f64,
}

impl Default for PrinciplesConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::REEL,
            auto_start_ms: 500.0,
            recording_frames: 300,
            ball_radius: 30.0,
            gravity: 1.0,
            launch_speed: 8.0,
            launch_spin: 0.2,
            bounces: 1,
            bounce_damping: 0.55,
            bounce_friction: 0.88,
            spin_damping: 0.8,
            splash_drops: 30,
            drop_life: 35,
            drop_gravity: 0.3,
            ripples: RippleRates {
                growth: 2.0,
                fade: 5.0,
            },
            pool_width: 200.0,
            button_reach: 30.0,
        }
    }
}

impl PrinciplesConfig {
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.auto_start_ms.is_finite() && self.auto_start_ms >= 0.0) {
            return Err(ReelError::validation("auto_start_ms must be a finite, non-negative number"));
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(ReelError::validation("ball gravity must be > 0"));
        }
        if !(self.ball_radius > 0.0 && self.pool_width > 0.0) {
            return Err(ReelError::validation("ball radius and pool width must be > 0"));
        }
        if self.ripples.fade <= 0.0 {
            return Err(ReelError::validation("ripple fade must be > 0"));
        }
        if self.recording_frames == 0 {
            return Err(ReelError::validation("recording_frames must be > 0"));
        }
        Ok(())
    }
}

/// Fixed prop positions derived from the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    pub floor_y: f64,
    pub figure: Point,
    pub button: Point,
    pub door: Point,
    pub ball_start: Point,
    pub pool: Pool,
}

impl Stage {
    pub fn new(canvas: Canvas, pool_width: f64) -> Self {
        let (w, h) = (canvas.w(), canvas.h());
        let floor_y = h * 0.85;
        let door = Point::new(80.0, h * 0.45);
        Self {
            floor_y,
            figure: Point::new(w - 200.0, floor_y - 95.0),
            button: Point::new(w - 110.0, floor_y - 75.0),
            door,
            ball_start: Point::new(door.x, door.y + 50.0),
            pool: Pool {
                center_x: w * 0.55,
                surface_y: floor_y,
                width: pool_width,
                depth: h * 0.15,
            },
        }
    }
}

pub struct Principles {
    config: PrinciplesConfig,
    stage: Stage,
    machine: PhaseMachine<ScenePhase>,
    rig: Rig,
    ball: Ball,
    drops: EntityStore<SplashDrop>,
    ripples: EntityStore<Ripple>,
    auto_start: Duration,
    auto_started: bool,
    cycles: u64,
}

impl Principles {
    pub fn new(config: PrinciplesConfig) -> ReelResult<Self> {
        config.validate()?;
        let stage = Stage::new(config.canvas, config.pool_width);
        Ok(Self {
            machine: PhaseMachine::new(ScenePhase::Idle),
            rig: Rig::default(),
            ball: Ball::new(stage.ball_start, config.ball_radius),
            drops: EntityStore::new(),
            ripples: EntityStore::new(),
            auto_start: Duration::from_secs_f64(config.auto_start_ms / 1000.0),
            auto_started: false,
            cycles: 0,
            stage,
            config,
        })
    }

    pub fn phase(&self) -> ScenePhase {
        self.machine.phase()
    }

    pub fn local_frame(&self) -> u32 {
        self.machine.local_frame()
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn drops(&self) -> &EntityStore<SplashDrop> {
        &self.drops
    }

    pub fn ripples(&self) -> &EntityStore<Ripple> {
        &self.ripples
    }

    /// Completed reels.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Leave `Idle`. Returns `false` when the reel is already running.
    pub fn start(&mut self) -> bool {
        if !self.machine.is(ScenePhase::Idle) {
            return false;
        }
        self.machine.enter(ScenePhase::LookAtButton);
        self.on_enter(ScenePhase::LookAtButton);
        tracing::debug!("principles reel started");
        true
    }

    fn reset_scene(&mut self) {
        self.ball = Ball::new(self.stage.ball_start, self.config.ball_radius);
        self.rig.door_angle = 0.0;
        self.drops.clear();
        self.ripples.clear();
    }

    fn on_enter(&mut self, phase: ScenePhase) {
        match phase {
            ScenePhase::LookAtButton => self.reset_scene(),
            ScenePhase::DoorOpen => self.rig.expression = Expression::Neutral,
            ScenePhase::BallFall => {
                self.ball.vel = Vec2::new(self.config.launch_speed, 0.0);
                self.ball.spin = self.config.launch_spin;
            }
            _ => {}
        }
    }

    fn add_ripple(&mut self, alpha: f64) {
        self.ripples.spawn(Ripple {
            center: Point::new(self.stage.pool.center_x, self.stage.pool.surface_y),
            size: 0.0,
            alpha,
        });
    }

    fn splash(&mut self, rng: &mut SketchRng) {
        let origin = Point::new(self.ball.pos.x, self.stage.pool.surface_y);
        self.drops.extend(SplashDrop::burst(
            origin,
            self.config.splash_drops,
            self.config.drop_life,
            rng,
        ));
        self.add_ripple(100.0);
    }

    /// Phase-specific work for one tick. Returns `true` when the phase was left early.
    fn act(&mut self, phase: ScenePhase, local: u32, rng: &mut SketchRng) -> bool {
        match phase {
            ScenePhase::BallFall => {
                let event = self.ball.fall(self.stage.floor_y, &self.stage.pool, &self.config);
                if event == FallEvent::Splashed {
                    self.machine.enter(ScenePhase::Splash);
                    self.splash(rng);
                    return true;
                }
            }
            ScenePhase::Splash => {
                self.ball.pos.y = self.stage.pool.surface_y + (f64::from(local) * 0.4).sin() * 3.0;
                self.ball.relax(0.2);
                if local % 4 == 0 {
                    self.add_ripple(80.0);
                }
            }
            ScenePhase::Sink => {
                let t = Ease::InQuad.apply(window_progress(local, 0, 30));
                let bottom = self.config.canvas.h() + self.ball.radius * 2.0;
                self.ball.pos.y = lerp(self.stage.pool.surface_y, bottom, t);
                self.ball.alpha = map_clamped(f64::from(local), 10.0, 30.0, 255.0, 0.0);
            }
            _ => self.rig.animate(phase, local),
        }
        false
    }

    fn ball_visible(&self) -> bool {
        !matches!(
            self.machine.phase(),
            ScenePhase::Idle | ScenePhase::ButtonPress | ScenePhase::DoorOpen
        )
    }

    fn draw_figure(&self, p: &mut Painter<'_>) {
        let rig = &self.rig;
        let body_squash = map_range(rig.anticipation, -15.0, 0.0, 0.9, 1.0);

        p.push();
        p.translate(self.stage.figure.x, self.stage.figure.y + rig.anticipation);
        p.scale(1.5, 1.5);

        draw_arm(p, -1.0, rig.left_arm);

        p.fill(Rgba8::rgb(60, 80, 120));
        p.stroke(Rgba8::rgb(50, 70, 110));
        p.stroke_weight(2.0);
        p.rounded_rect(2.0, 25.0, 10.0, 35.0, 2.0);
        p.push();
        p.translate(0.0, rig.leg_lift);
        p.rounded_rect(-12.0, 25.0, 10.0, 35.0, 2.0);
        p.fill(Rgba8::rgb(40, 40, 40));
        p.ellipse(-7.0, 62.0, 14.0, 8.0);
        p.pop();
        p.fill(Rgba8::rgb(40, 40, 40));
        p.ellipse(7.0, 62.0, 14.0, 8.0);

        p.no_stroke();
        p.fill(Rgba8::rgb(80, 100, 140));
        p.rounded_rect(-15.0, -5.0, 30.0, 35.0 * body_squash, 5.0);
        p.fill(SKIN);
        p.rect(-5.0, -15.0, 10.0, 15.0);

        p.push();
        p.translate(0.0, -25.0);
        p.rotate(rig.head_rotation);
        p.fill(SKIN);
        p.ellipse(0.0, 0.0, 30.0, 35.0);
        p.fill(Rgba8::rgb(60, 40, 30));
        p.arc(0.0, -3.0, 32.0, 30.0, PI, TAU);
        p.fill(Rgba8::rgb(50, 50, 50));
        p.ellipse(-6.0, -1.0, 3.0, 4.0);
        p.ellipse(6.0, -1.0, 3.0, 4.0);
        p.fill(Rgba8::rgb(240, 180, 130));
        p.ellipse(0.0, 5.0, 4.0, 5.0);

        p.stroke(Rgba8::rgb(50, 50, 50));
        p.stroke_weight(1.0);
        p.no_fill();
        match rig.expression {
            Expression::Smile => p.arc(0.0, 9.0, 10.0, 8.0, 0.0, PI),
            Expression::Frown => p.arc(0.0, 13.0, 10.0, 6.0, PI, TAU),
            Expression::Neutral => p.line(-4.0, 11.0, 4.0, 11.0),
        }
        p.pop();

        draw_arm(p, 1.0, rig.right_arm);
        p.pop();
    }

    fn draw_button(&self, p: &mut Painter<'_>) {
        let depth = self.rig.button_depth;
        p.push();
        p.translate(self.stage.button.x, self.stage.button.y);
        p.no_stroke();
        p.fill(Rgba8::rgb(80, 80, 90));
        p.rounded_rect(-5.0, -20.0, 35.0, 40.0, 3.0);
        p.fill(Rgba8::rgb(60, 60, 70));
        p.circle(12.0, 0.0, 25.0);

        let cap = 18.0 - depth * 0.2;
        p.fill(Rgba8::rgb(200, 50, 50));
        p.stroke(Rgba8::rgb(180, 40, 40));
        p.stroke_weight(2.0);
        p.circle(12.0 - depth * 0.3, depth, cap);
        p.no_stroke();
        p.fill(Rgba8::rgba(255, 100, 100, 150));
        p.circle(12.0 - depth * 0.3 - 3.0, depth - 3.0, 6.0);
        p.pop();
    }

    fn draw_trap_door(&self, p: &mut Painter<'_>) {
        p.push();
        p.translate(self.stage.door.x, self.stage.door.y);
        p.no_stroke();
        p.fill(Rgba8::rgb(80, 60, 40));
        p.rect(-60.0, -10.0, 120.0, 20.0);
        p.rect(-60.0, -10.0, 20.0, 100.0);
        p.rect(40.0, -10.0, 20.0, 100.0);

        p.push();
        p.rotate(self.rig.door_angle);
        p.fill(Rgba8::rgb(100, 80, 60));
        p.rect(-50.0, 0.0, 100.0, 15.0);
        p.fill(Rgba8::rgb(60, 50, 40));
        p.rect(-40.0, 3.0, 20.0, 8.0);
        p.rect(20.0, 3.0, 20.0, 8.0);
        p.pop();
        p.pop();
    }

    fn draw_pool(&self, p: &mut Painter<'_>) {
        let pool = &self.stage.pool;
        p.push();
        p.no_stroke();
        p.fill(WATER.with_alpha(150.0));
        p.rounded_rect(
            pool.center_x - pool.width / 2.0,
            pool.surface_y,
            pool.width,
            pool.depth,
            10.0,
        );
        p.pop();
        self.ripples.render_all(p);
    }
}

/// Arm on the figure's `side` (-1 left, 1 right), swung by `angle` around the shoulder.
fn draw_arm(p: &mut Painter<'_>, side: f64, angle: f64) {
    p.push();
    p.translate(side * 10.0, 0.0);
    p.rotate(angle);
    p.stroke(SKIN);
    p.stroke_weight(8.0);
    p.no_fill();
    p.bezier(
        Point::new(0.0, -5.0),
        Point::new(side * 15.0, 0.0),
        Point::new(side * 25.0, 15.0),
        Point::new(side * 30.0, 35.0),
    );
    p.no_stroke();
    p.fill(SKIN);
    p.ellipse(side * 30.0, 35.0, 10.0, 12.0);
    p.pop();
}

impl Sketch for Principles {
    fn name(&self) -> &str {
        "animation-principles"
    }

    fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    fn filename_pattern(&self) -> FilenamePattern {
        FilenamePattern::new("AnimationPrinciples", 3).starting_at(1)
    }

    fn recording_limit(&self) -> Option<u64> {
        Some(self.config.recording_frames)
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) -> SketchFlow {
        if !self.auto_started && ctx.elapsed >= self.auto_start {
            self.auto_started = true;
            self.start();
        }

        let phase = self.machine.phase();
        let local = self.machine.local_frame();
        let left_early = self.act(phase, local, ctx.rng);

        self.drops.step_all(&self.config.drop_gravity, ctx.rng);
        self.drops.prune();
        self.ripples.step_all(&self.config.ripples, ctx.rng);
        self.ripples.prune();

        if !left_early {
            if let Some(change) = self.machine.advance() {
                if change.from == ScenePhase::Sink {
                    self.cycles += 1;
                    tracing::debug!(cycles = self.cycles, "principles reel looped");
                }
                self.on_enter(change.to);
            }
        }
        SketchFlow::Continue
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let (w, h) = (p.width(), p.height());
        p.background(Rgba8::rgb(30, 35, 45));
        p.no_stroke();
        p.fill(Rgba8::rgb(40, 45, 55));
        p.rect(0.0, self.stage.floor_y, w, h - self.stage.floor_y);

        self.draw_trap_door(p);
        self.draw_pool(p);
        if self.ball_visible() {
            self.ball.render(p);
        }
        self.draw_figure(p);
        self.draw_button(p);
        self.drops.render_all(p);
    }

    fn on_pointer(&mut self, pos: Point) {
        if pos.distance(self.stage.button) < self.config.button_reach {
            self.start();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/principles.rs"]
mod tests;
