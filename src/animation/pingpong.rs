use crate::foundation::error::{ReelError, ReelResult};

/// Which bound a [`PingPong::step`] landed on, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

/// Integer scalar that sweeps `min -> max -> min` forever.
///
/// Each step moves the value by `direction` and clamps it into `[min, max]`. The direction
/// reverses exactly when the clamped value sits on a bound, so the value never skips past a
/// bound and never leaves the interval.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PingPong {
    value: i64,
    min: i64,
    max: i64,
    direction: i64,
    /// Completed `min -> max -> min` round trips.
    loops: u64,
}

impl PingPong {
    /// Start at `min`, moving up.
    pub fn new(min: i64, max: i64) -> ReelResult<Self> {
        Self::starting_at(min, min, max, 1)
    }

    pub fn starting_at(value: i64, min: i64, max: i64, direction: i64) -> ReelResult<Self> {
        if min > max {
            return Err(ReelError::validation("ping-pong min must be <= max"));
        }
        if direction != 1 && direction != -1 {
            return Err(ReelError::validation("ping-pong direction must be +1 or -1"));
        }
        Ok(Self {
            value: value.clamp(min, max),
            min,
            max,
            direction,
            loops: 0,
        })
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn direction(&self) -> i64 {
        self.direction
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn loops(&self) -> u64 {
        self.loops
    }

    /// Completed sweeps counted in half loops (reaching `max` adds one half).
    pub fn half_loops(&self) -> u64 {
        let at_max_leg = u64::from(self.direction < 0);
        self.loops * 2 + at_max_leg
    }

    pub fn step(&mut self) -> Option<Bound> {
        self.value = self
            .value
            .saturating_add(self.direction)
            .clamp(self.min, self.max);
        if self.direction > 0 && self.value == self.max {
            self.direction = -1;
            Some(Bound::Max)
        } else if self.direction < 0 && self.value == self.min {
            self.direction = 1;
            self.loops += 1;
            Some(Bound::Min)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pingpong.rs"]
mod tests;
