use std::f64::consts::{PI, TAU};

use crate::foundation::core::Vec2;

/// The golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Re-map `v` from `[in_lo, in_hi]` onto `[out_lo, out_hi]` without clamping.
pub fn map_range(v: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    if in_hi == in_lo {
        return out_lo;
    }
    out_lo + (out_hi - out_lo) * ((v - in_lo) / (in_hi - in_lo))
}

/// Like [`map_range`] but the result stays inside the output interval.
pub fn map_clamped(v: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    let (lo, hi) = if out_lo <= out_hi {
        (out_lo, out_hi)
    } else {
        (out_hi, out_lo)
    };
    map_range(v, in_lo, in_hi, out_lo, out_hi).clamp(lo, hi)
}

/// Wrap an angle into `(-PI, PI]`.
pub fn wrap_angle(a: f64) -> f64 {
    let w = (a + PI).rem_euclid(TAU) - PI;
    if w == -PI { PI } else { w }
}

/// Move `from` toward `to` by fraction `t` along the shortest arc.
pub fn lerp_angle(from: f64, to: f64, t: f64) -> f64 {
    from + wrap_angle(to - from) * t
}

pub fn heading(v: Vec2) -> f64 {
    v.y.atan2(v.x)
}

pub fn unit(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalize `v`, returning zero for a zero-length vector.
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > f64::EPSILON {
        v / len
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
