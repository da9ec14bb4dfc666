//! Lights on / lights off: a country view through a window that flips between night and day
//! with a wall switch, on a seamless 300-frame loop.

use std::f64::consts::TAU;

use crate::encode::export::FilenamePattern;
use crate::engine::sketch::{Sketch, SketchFlow, TickCtx};
use crate::engine::timebase::LoopTimer;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{lerp, map_range};
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

const FRAME_WOOD: Rgba8 = Rgba8::rgb(60, 40, 20);
const FRAME_THICKNESS: f64 = 40.0;
const POLE_HEIGHT: f64 = 100.0;
const FIGURE: f64 = 25.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub canvas: Canvas,
    pub loop_frames: u32,
    /// Loop frame at which the lights come on; they go off again at frame 0.
    pub lights_on_at: u32,
    /// Fraction of the night/day gap closed per tick.
    pub daylight_smoothing: f64,
    pub switch_smoothing: f64,
    pub stars: usize,
    pub grass_blades: usize,
    pub recording_frames: u64,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::REEL,
            loop_frames: 300,
            lights_on_at: 150,
            daylight_smoothing: 0.05,
            switch_smoothing: 0.15,
            stars: 150,
            grass_blades: 50,
            recording_frames: 300,
        }
    }
}

impl LightsConfig {
    pub fn validate(&self) -> ReelResult<()> {
        if self.lights_on_at == 0 || self.lights_on_at >= self.loop_frames {
            return Err(ReelError::validation("lights_on_at must fall inside the loop"));
        }
        for (name, k) in [
            ("daylight_smoothing", self.daylight_smoothing),
            ("switch_smoothing", self.switch_smoothing),
        ] {
            if !(k > 0.0 && k <= 1.0) {
                return Err(ReelError::validation(format!("{name} must be in (0, 1]")));
            }
        }
        if self.recording_frames == 0 {
            return Err(ReelError::validation("recording_frames must be > 0"));
        }
        Ok(())
    }
}

/// The window opening and the horizon seen through it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub pane: Rect,
    pub horizon: f64,
}

impl Window {
    pub fn new(canvas: Canvas) -> Self {
        let (w, h) = (canvas.w(), canvas.h());
        let pane = Rect::new(w * 0.15, h * 0.2, w * 0.65, h * 0.7);
        Self {
            pane,
            horizon: pane.y0 + pane.height() * 0.55,
        }
    }

    pub fn sky(&self) -> Rect {
        Rect::new(self.pane.x0, self.pane.y0, self.pane.x1, self.horizon)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub pos: Point,
    pub size: f64,
    pub twinkle: f64,
    pub brightness: f64,
}

impl Star {
    pub fn scatter(sky: Rect, rng: &mut SketchRng) -> Self {
        Self {
            pos: Point::new(rng.range(sky.x0, sky.x1), rng.range(sky.y0, sky.y1)),
            size: rng.range(1.0, 3.0),
            twinkle: rng.range(0.0, TAU),
            brightness: rng.range(0.4, 1.0),
        }
    }

    /// Opacity at `frame` given the current daylight; stars fade out by 0.6 daylight.
    pub fn alpha(&self, frame: u64, daylight: f64) -> f64 {
        if daylight >= 0.6 {
            return 0.0;
        }
        let shimmer = (frame as f64 * 0.05 + self.twinkle).sin() * 0.3 + 0.7;
        map_range(daylight, 0.0, 0.6, 255.0, 0.0) * self.brightness * shimmer
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Blade {
    root: Point,
    height: f64,
}

pub struct Lights {
    config: LightsConfig,
    window: Window,
    timer: LoopTimer,
    lights_on: bool,
    daylight: f64,
    switch: f64,
    stars: Vec<Star>,
    blades: Vec<Blade>,
    frame: u64,
}

impl Lights {
    pub fn new(config: LightsConfig) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            window: Window::new(config.canvas),
            timer: LoopTimer::new(config.loop_frames)?,
            lights_on: false,
            daylight: 0.0,
            switch: 0.0,
            stars: Vec::new(),
            blades: Vec::new(),
            frame: 0,
            config,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn loop_frame(&self) -> u32 {
        self.timer.frame()
    }

    pub fn lights_on(&self) -> bool {
        self.lights_on
    }

    /// 0 is full night, 1 full day.
    pub fn daylight(&self) -> f64 {
        self.daylight
    }

    /// Switch toggle position, 0 down (off) to 1 up (on).
    pub fn switch_position(&self) -> f64 {
        self.switch
    }

    fn draw_frame(&self, p: &mut Painter<'_>) {
        let pane = self.window.pane;
        let t = FRAME_THICKNESS;
        let (w, h) = (pane.width(), pane.height());
        p.push();
        p.no_stroke();
        p.fill(FRAME_WOOD);
        p.rect(pane.x0 - t, pane.y0 - t, w + t * 2.0, t);
        p.rect(pane.x0 - t, pane.y1, w + t * 2.0, t);
        p.rect(pane.x0 - t, pane.y0, t, h);
        p.rect(pane.x1, pane.y0, t, h);
        p.rect(pane.x0, pane.y0 + h / 2.0 - 15.0, w, 30.0);
        p.rect(pane.x0 + w / 2.0 - 15.0, pane.y0, 30.0, h);
        p.pop();
    }

    fn draw_view(&self, p: &mut Painter<'_>) {
        let pane = self.window.pane;
        let horizon = self.window.horizon;
        let day = self.daylight;

        p.push();
        p.no_stroke();
        p.fill(Rgba8::rgb(20, 20, 25).lerp(Rgba8::rgb(135, 206, 250), day));
        p.rect(pane.x0, pane.y0, pane.width(), pane.height());

        for star in &self.stars {
            let alpha = star.alpha(self.frame, day);
            if alpha > 0.0 {
                p.fill(Rgba8::WHITE.with_alpha(alpha));
                p.circle(star.pos.x, star.pos.y, star.size);
            }
        }

        p.fill(Rgba8::rgb(40, 45, 40).lerp(Rgba8::rgb(80, 180, 80), day));
        p.rect(pane.x0, horizon, pane.width(), pane.y1 - horizon);

        if day > 0.3 {
            p.stroke(Rgba8::rgb(60, 160, 60).with_alpha(map_range(day, 0.3, 1.0, 0.0, 100.0)));
            p.stroke_weight(2.0);
            for blade in &self.blades {
                p.line(blade.root.x, blade.root.y, blade.root.x, blade.root.y - blade.height);
            }
            p.no_stroke();
        }

        self.draw_streetlight(p, Point::new(pane.x0 + pane.width() * 0.65, horizon));
        if day > 0.5 {
            self.draw_kite_flyer(p);
        }
        p.pop();
    }

    fn draw_streetlight(&self, p: &mut Painter<'_>, at: Point) {
        let day = self.daylight;
        let pole = Rgba8::rgb(60, 60, 65).lerp(Rgba8::rgb(100, 100, 105), day);
        p.no_stroke();
        p.fill(pole);
        p.rect(at.x - 5.0, at.y, 10.0, POLE_HEIGHT);
        p.ellipse(at.x, at.y, 25.0, 15.0);
        p.rect(at.x - 15.0, at.y - 10.0, 30.0, 10.0);

        if day < 0.5 {
            let glow = map_range(day, 0.0, 0.5, 255.0, 0.0);
            p.fill(Rgba8::rgb(255, 255, 200).with_alpha(glow));
            p.circle(at.x, at.y + 5.0, 12.0);
            p.fill(Rgba8::rgb(255, 255, 200).with_alpha(glow * 0.2));
            p.triangle(
                Point::new(at.x - 15.0, at.y),
                Point::new(at.x + 15.0, at.y),
                Point::new(at.x, at.y + 120.0),
            );
            p.fill(Rgba8::rgb(255, 255, 150).with_alpha(glow * 0.1));
            p.triangle(
                Point::new(at.x - 25.0, at.y),
                Point::new(at.x + 25.0, at.y),
                Point::new(at.x, at.y + 150.0),
            );
        }
    }

    fn draw_kite_flyer(&self, p: &mut Painter<'_>) {
        let pane = self.window.pane;
        let (w, h) = (pane.width(), pane.height());
        let alpha = map_range(self.daylight, 0.5, 1.0, 0.0, 255.0);
        let ink = Rgba8::rgb(50, 50, 50);
        let s = FIGURE;
        let fx = pane.x0 + w * 0.25;
        let fy = self.window.horizon + 30.0;

        p.stroke(ink.with_alpha(alpha));
        p.stroke_weight(3.0);
        p.no_fill();
        p.circle(fx, fy, s * 0.4);
        p.line(fx, fy + s * 0.2, fx, fy + s * 0.7);
        p.line(fx, fy + s * 0.35, fx - s * 0.3, fy + s * 0.5);
        p.line(fx, fy + s * 0.35, fx + s * 0.4, fy + s * 0.15);
        p.line(fx, fy + s * 0.7, fx - s * 0.25, fy + s);
        p.line(fx, fy + s * 0.7, fx + s * 0.25, fy + s);

        let anchor = Point::new(pane.x0 + w * 0.4, pane.y0 + h * 0.2);
        p.stroke(ink.with_alpha(alpha * 0.5));
        p.stroke_weight(1.5);
        p.bezier(
            Point::new(fx + s * 0.4, fy + s * 0.15),
            Point::new(fx + w * 0.1, fy - h * 0.15),
            Point::new(anchor.x - 20.0, anchor.y + 30.0),
            anchor,
        );

        let t = self.frame as f64;
        let kite = Point::new(
            anchor.x + (t * 0.08).sin() * 8.0,
            anchor.y + (t * 0.06).cos() * 5.0,
        );
        let red = Rgba8::rgb(255, 100, 100);
        let dark_red = Rgba8::rgb(200, 50, 50);

        p.push();
        p.translate(kite.x, kite.y);
        p.rotate((t * 0.08).sin() * 0.15);
        p.fill(red.with_alpha(alpha));
        p.stroke(dark_red.with_alpha(alpha));
        p.stroke_weight(2.0);
        p.polygon(&[
            Point::new(0.0, -12.0),
            Point::new(9.0, 0.0),
            Point::new(0.0, 12.0),
            Point::new(-9.0, 0.0),
        ]);
        p.stroke_weight(1.5);
        p.line(0.0, -12.0, 0.0, 12.0);
        p.line(-9.0, 0.0, 9.0, 0.0);

        let mut prev = Point::new(0.0, 12.0);
        for i in 0..4 {
            let i = f64::from(i);
            let knot = Point::new((t * 0.08 + i * 0.5).sin() * 4.0, 12.0 + i * 10.0);
            p.stroke(red.with_alpha(alpha));
            p.stroke_weight(2.0);
            p.line(prev.x, prev.y, knot.x, knot.y);
            p.no_stroke();
            p.fill(Rgba8::rgb(255, 150, 150).with_alpha(alpha));
            p.circle(knot.x, knot.y, 5.0);
            prev = knot;
        }
        p.pop();
    }

    fn draw_switch(&self, p: &mut Painter<'_>) {
        let (w, h) = (p.width(), p.height());
        let (x, y, sw, sh) = (w * 0.75, h * 0.45, 60.0, 100.0);

        p.push();
        p.fill(Rgba8::rgb(230, 225, 210));
        p.stroke(Rgba8::rgb(180, 175, 160));
        p.stroke_weight(2.0);
        p.rounded_rect(x, y, sw, sh, 5.0);

        p.no_stroke();
        p.fill(Rgba8::rgb(160, 160, 165));
        for (dx, dy) in [(15.0, 15.0), (sw - 15.0, 15.0), (15.0, sh - 15.0), (sw - 15.0, sh - 15.0)] {
            p.circle(x + dx, y + dy, 6.0);
        }

        let cx = x + sw / 2.0;
        let toggle_y = lerp(y + sh * 0.65, y + sh * 0.35, self.switch);
        p.fill(Rgba8::rgb(100, 100, 100));
        p.rounded_rect(cx - 10.0, y + sh * 0.3, 20.0, sh * 0.4, 3.0);
        p.fill(Rgba8::rgb(200, 200, 190));
        p.stroke(Rgba8::rgb(120, 120, 115));
        p.stroke_weight(2.0);
        p.rounded_rect(cx - 8.0, toggle_y - 15.0, 16.0, 30.0, 2.0);
        p.pop();
    }
}

impl Sketch for Lights {
    fn name(&self) -> &str {
        "lights-on-off"
    }

    fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    fn filename_pattern(&self) -> FilenamePattern {
        FilenamePattern::new("LightsOnOff", 3).starting_at(1)
    }

    fn recording_limit(&self) -> Option<u64> {
        Some(self.config.recording_frames)
    }

    fn setup(&mut self, rng: &mut SketchRng) -> ReelResult<()> {
        let sky = self.window.sky();
        self.stars = (0..self.config.stars).map(|_| Star::scatter(sky, rng)).collect();
        Ok(())
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) -> SketchFlow {
        self.frame = ctx.frame.0 + 1;
        match ctx.recorded {
            Some(n) => {
                self.timer.set(n);
            }
            None => {
                self.timer.advance();
            }
        }

        let t = self.timer.frame();
        if t == 0 {
            self.lights_on = false;
        } else if t == self.config.lights_on_at {
            self.lights_on = true;
        }

        let target = if self.lights_on { 1.0 } else { 0.0 };
        self.daylight = lerp(self.daylight, target, self.config.daylight_smoothing);
        self.switch = lerp(self.switch, target, self.config.switch_smoothing);

        self.blades.clear();
        if self.daylight > 0.3 {
            let pane = self.window.pane;
            let horizon = self.window.horizon;
            for _ in 0..self.config.grass_blades {
                let root = Point::new(
                    pane.x0 + ctx.rng.range(0.0, pane.width()),
                    horizon + ctx.rng.range(0.0, pane.y1 - horizon),
                );
                let height = ctx.rng.range(5.0, 15.0);
                self.blades.push(Blade { root, height });
            }
        }
        SketchFlow::Continue
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.background(Rgba8::rgb(220, 210, 190));
        self.draw_frame(p);
        self.draw_view(p);
        self.draw_switch(p);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/lights.rs"]
mod tests;
