use std::time::{Duration, Instant};

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};

/// One logical tick as seen by a sketch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub frame: FrameIndex,
    /// Wall-clock (or simulated) time since the run started.
    pub elapsed: Duration,
}

/// Monotonic frame counter plus the elapsed time of the latest tick.
#[derive(Clone, Debug)]
pub struct Timebase {
    fps: Fps,
    next: FrameIndex,
    elapsed: Duration,
}

impl Timebase {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            next: FrameIndex(0),
            elapsed: Duration::ZERO,
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Ticks issued so far.
    pub fn ticks(&self) -> u64 {
        self.next.0
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Issue the next frame index. Elapsed time never runs backwards: an earlier `now` than
    /// the previous tick is held at the previous value.
    pub fn tick(&mut self, now: Duration) -> Tick {
        self.elapsed = self.elapsed.max(now);
        let frame = self.next;
        self.next = frame.next();
        Tick {
            frame,
            elapsed: self.elapsed,
        }
    }

    /// Elapsed time a perfectly paced run would report for the next tick.
    pub fn nominal_elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.fps.frames_to_secs(self.next.0))
    }
}

/// Paces a real-time loop at the target rate.
///
/// A late tick is never followed by a burst of catch-up ticks: the schedule restarts from the
/// moment the late tick was observed.
#[derive(Clone, Debug)]
pub struct FixedRateDriver {
    period: Duration,
    deadline: Option<Instant>,
}

impl FixedRateDriver {
    pub fn new(fps: Fps) -> Self {
        Self {
            period: fps.frame_duration(),
            deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// How long to sleep at `now` before the next tick, advancing the schedule.
    pub fn schedule(&mut self, now: Instant) -> Duration {
        match self.deadline {
            Some(deadline) if deadline > now => {
                self.deadline = Some(deadline + self.period);
                deadline - now
            }
            _ => {
                self.deadline = Some(now + self.period);
                Duration::ZERO
            }
        }
    }

    /// Block until the next tick is due.
    pub fn wait(&mut self) {
        let pause = self.schedule(Instant::now());
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }
}

/// Sub-frame-rate update gate: at most one update per poll once `interval` has passed since
/// the last accepted update. Leftover time is discarded rather than banked.
///
/// The first poll always fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateGate {
    interval: Duration,
    last: Option<Duration>,
}

impl UpdateGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_millis_f64(ms: f64) -> ReelResult<Self> {
        if !ms.is_finite() || ms < 0.0 {
            return Err(ReelError::validation(
                "update interval must be a finite, non-negative number of milliseconds",
            ));
        }
        Ok(Self::new(Duration::from_secs_f64(ms / 1000.0)))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        let due = self
            .last
            .is_none_or(|last| now.saturating_sub(last) >= self.interval);
        if due {
            self.last = Some(now);
            true
        } else {
            false
        }
    }
}

/// Frame counter that wraps to 0 at `length`, for seamless loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoopTimer {
    length: u32,
    frame: u32,
}

impl LoopTimer {
    pub fn new(length: u32) -> ReelResult<Self> {
        if length == 0 {
            return Err(ReelError::validation("loop length must be > 0"));
        }
        Ok(Self { length, frame: 0 })
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Step one frame; returns `true` when the loop wrapped back to 0.
    pub fn advance(&mut self) -> bool {
        self.frame = (self.frame + 1) % self.length;
        self.frame == 0
    }

    /// Jump to an absolute frame count, reduced modulo the loop length. Returns `true` when the
    /// position moved backwards, which callers treat like a wrap.
    pub fn set(&mut self, frames: u64) -> bool {
        let frame = (frames % u64::from(self.length)) as u32;
        let rewound = frame < self.frame;
        self.frame = frame;
        rewound
    }

    pub fn progress(&self) -> f64 {
        f64::from(self.frame) / f64::from(self.length)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/timebase.rs"]
mod tests;
