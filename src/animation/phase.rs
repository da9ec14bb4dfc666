use std::fmt::Debug;

/// A stage of a finite animation state machine.
pub trait Phase: Copy + Eq + Debug {
    /// Fixed local duration in ticks, or `None` when the phase is left through
    /// [`PhaseMachine::enter`] on some condition.
    fn duration(self) -> Option<u32>;

    /// Phase that follows once the duration elapses. Terminal phases return the initial one.
    fn next(self) -> Self;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange<P> {
    pub from: P,
    pub to: P,
}

/// Current phase plus a local frame counter that restarts at 0 on every entry.
#[derive(Clone, Debug)]
pub struct PhaseMachine<P> {
    phase: P,
    local: u32,
    entries: u64,
}

impl<P: Phase> PhaseMachine<P> {
    pub fn new(initial: P) -> Self {
        Self {
            phase: initial,
            local: 0,
            entries: 0,
        }
    }

    pub fn phase(&self) -> P {
        self.phase
    }

    pub fn local_frame(&self) -> u32 {
        self.local
    }

    /// Number of phase entries since construction.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn is(&self, phase: P) -> bool {
        self.phase == phase
    }

    /// Jump to `phase` with a fresh local counter.
    pub fn enter(&mut self, phase: P) -> PhaseChange<P> {
        let change = PhaseChange {
            from: self.phase,
            to: phase,
        };
        tracing::trace!(from = ?change.from, to = ?change.to, "phase change");
        self.phase = phase;
        self.local = 0;
        self.entries += 1;
        change
    }

    /// Count one tick in the current phase; fires the transition once the counter reaches the
    /// phase duration.
    pub fn advance(&mut self) -> Option<PhaseChange<P>> {
        self.local = self.local.saturating_add(1);
        match self.phase.duration() {
            Some(d) if self.local >= d => Some(self.enter(self.phase.next())),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/phase.rs"]
mod tests;
