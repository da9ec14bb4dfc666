/// Easing curves mapping linear progress in `[0, 1]` onto eased progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Accelerate from rest.
    InQuad,
    /// Decelerate into the end value.
    OutQuad,
    /// Accelerate, then decelerate into the end value.
    InOutQuad,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::InQuad => t * t,
            Self::OutQuad => {
                let u = 1.0 - t;
                1.0 - u * u
            }
            Self::InOutQuad if t < 0.5 => 2.0 * t * t,
            Self::InOutQuad => {
                let u = 1.0 - t;
                1.0 - 2.0 * u * u
            }
        }
    }

    /// Eased interpolation between `from` and `to`.
    pub fn tween(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.apply(t)
    }
}

/// Progress of local frame `frame` through the window `[start, end)`, clamped to `[0, 1]`.
pub fn window_progress(frame: u32, start: u32, end: u32) -> f64 {
    if end <= start {
        return 1.0;
    }
    let t = (f64::from(frame) - f64::from(start)) / (f64::from(end) - f64::from(start));
    t.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
