//! Flocking and target-seeking heading rules.
//!
//! Agents are reduced to a position and a heading angle. Every rule returns a new heading and
//! never snaps: the current heading is eased toward the desired one with a fixed blend factor.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{heading, lerp_angle, normalize_or_zero, unit};

/// Tunables for the alignment/cohesion/separation blend.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlockParams {
    /// Agents closer than this are neighbours.
    pub neighbor_radius: f64,
    /// Neighbours closer than this push the agent away.
    pub separation_radius: f64,
    pub weight_alignment: f64,
    pub weight_cohesion: f64,
    pub weight_separation: f64,
    /// Fraction of the heading error removed per tick.
    pub smoothing: f64,
    /// Half-width of the uniform random heading perturbation (radians).
    pub jitter: f64,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            neighbor_radius: 100.0,
            separation_radius: 60.0,
            weight_alignment: 0.2,
            weight_cohesion: 0.1,
            weight_separation: 0.5,
            smoothing: 0.08,
            jitter: 0.2,
        }
    }
}

/// Position and heading of another agent as seen by the one being steered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub pos: Point,
    pub heading: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlockForces {
    pub alignment: Vec2,
    pub cohesion: Vec2,
    pub separation: Vec2,
    pub neighbors: usize,
}

/// Push away from `other`: zero at or beyond `radius`, growing without bound as the distance
/// shrinks toward zero. Coincident agents exert no force (there is no direction to push).
pub fn separation_force(me: Point, other: Point, radius: f64) -> Vec2 {
    let away = me - other;
    let d = away.hypot();
    if d <= 0.0 || d >= radius {
        return Vec2::ZERO;
    }
    (away / d) * ((radius - d) / d)
}

/// Gather the three flocking vectors from every candidate inside the neighbour radius.
pub fn flock_forces(
    me: Point,
    candidates: impl IntoIterator<Item = Neighbor>,
    params: &FlockParams,
) -> FlockForces {
    let mut heading_sum = Vec2::ZERO;
    let mut centroid = Vec2::ZERO;
    let mut separation = Vec2::ZERO;
    let mut count = 0usize;

    for n in candidates {
        let d = me.distance(n.pos);
        if d >= params.neighbor_radius {
            continue;
        }
        count += 1;
        heading_sum += unit(n.heading);
        centroid += n.pos.to_vec2();
        separation += separation_force(me, n.pos, params.separation_radius);
    }

    if count == 0 {
        return FlockForces::default();
    }

    let k = count as f64;
    FlockForces {
        alignment: heading_sum / k,
        cohesion: normalize_or_zero(centroid / k - me.to_vec2()),
        separation: separation / k,
        neighbors: count,
    }
}

/// Ease `current` toward the weighted blend of the current heading and the flocking vectors.
pub fn flock_heading(current: f64, forces: &FlockForces, params: &FlockParams) -> f64 {
    if forces.neighbors == 0 {
        return current;
    }
    let desired = unit(current)
        + forces.alignment * params.weight_alignment
        + forces.cohesion * params.weight_cohesion
        + forces.separation * params.weight_separation;
    if desired.hypot() <= f64::EPSILON {
        return current;
    }
    lerp_angle(current, heading(desired), params.smoothing)
}

/// Ease `current` toward the bearing from `from` to `goal`.
pub fn seek_heading(current: f64, from: Point, goal: Point, smoothing: f64) -> f64 {
    let to_goal = goal - from;
    if to_goal.hypot() <= f64::EPSILON {
        return current;
    }
    lerp_angle(current, heading(to_goal), smoothing)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/steer.rs"]
mod tests;
