use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Integer frame rate, e.g. `Fps::whole(30)`.
    pub fn whole(num: u32) -> ReelResult<Self> {
        Self::new(num, 1)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frame_duration(self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.frame_duration_secs())
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// 1080x1920 portrait, the vertical-video reel format.
    pub const REEL: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    pub const LANDSCAPE: Canvas = Canvas {
        width: 800,
        height: 600,
    };

    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.w() / 2.0, self.h() / 2.0)
    }

    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.w(), self.h())
    }
}

/// Straight-alpha RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from floating channels in `[0, 255]`; out-of-range values are clamped.
    pub fn from_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
            a: channel(a),
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: channel(a),
            ..self
        }
    }

    /// Multiply the colour channels (not alpha) by `k`.
    pub fn scaled(self, k: f64) -> Self {
        Self::from_f64(
            f64::from(self.r) * k,
            f64::from(self.g) * k,
            f64::from(self.b) * k,
            f64::from(self.a),
        )
    }

    pub fn lerp(self, other: Rgba8, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| f64::from(a) + (f64::from(b) - f64::from(a)) * t;
        Self::from_f64(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Hue in degrees, saturation and brightness in `[0, 100]`.
    pub fn from_hsb(hue: f64, saturation: f64, brightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let v = (brightness / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        Self::from_f64((r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0, 255.0)
    }
}

fn channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
