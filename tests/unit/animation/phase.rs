use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reel {
    Wind,
    Press,
    Open,
    Drop,
}

impl Phase for Reel {
    fn duration(self) -> Option<u32> {
        match self {
            Self::Wind => Some(3),
            Self::Press => Some(18),
            Self::Open => Some(10),
            Self::Drop => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Wind => Self::Press,
            Self::Press => Self::Open,
            Self::Open => Self::Drop,
            Self::Drop => Self::Wind,
        }
    }
}

#[test]
fn transition_fires_exactly_at_duration() {
    let mut m = PhaseMachine::new(Reel::Press);
    for tick in 1..18 {
        assert_eq!(m.advance(), None, "early transition at tick {tick}");
        assert_eq!(m.phase(), Reel::Press);
    }
    let change = m.advance().unwrap();
    assert_eq!(change.from, Reel::Press);
    assert_eq!(change.to, Reel::Open);
    assert_eq!(m.local_frame(), 0);
}

#[test]
fn transition_happens_once_per_entry() {
    let mut m = PhaseMachine::new(Reel::Wind);
    let mut changes = Vec::new();
    for _ in 0..3 {
        if let Some(c) = m.advance() {
            changes.push(c);
        }
    }
    assert_eq!(changes.len(), 1);
    assert!(m.is(Reel::Press));
    assert_eq!(m.local_frame(), 0);
}

#[test]
fn condition_phase_waits_for_enter() {
    let mut m = PhaseMachine::new(Reel::Drop);
    for _ in 0..1000 {
        assert_eq!(m.advance(), None);
    }
    assert_eq!(m.local_frame(), 1000);
    m.enter(Reel::Wind);
    assert_eq!(m.local_frame(), 0);
    assert_eq!(m.entries(), 1);
}

#[test]
fn terminal_phase_wraps_to_initial() {
    let mut m = PhaseMachine::new(Reel::Open);
    for _ in 0..10 {
        m.advance();
    }
    assert!(m.is(Reel::Drop));
    m.enter(Reel::Drop.next());
    assert!(m.is(Reel::Wind));
}
