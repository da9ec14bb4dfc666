use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn timebase_issues_monotonic_frames() {
    let mut tb = Timebase::new(fps30());
    let a = tb.tick(Duration::from_millis(0));
    let b = tb.tick(Duration::from_millis(40));
    let c = tb.tick(Duration::from_millis(10));
    assert_eq!((a.frame, b.frame, c.frame), (FrameIndex(0), FrameIndex(1), FrameIndex(2)));
    assert_eq!(c.elapsed, Duration::from_millis(40));
    assert_eq!(tb.ticks(), 3);
}

#[test]
fn nominal_elapsed_tracks_frame_count() {
    let mut tb = Timebase::new(fps30());
    assert_eq!(tb.nominal_elapsed(), Duration::ZERO);
    for _ in 0..30 {
        let now = tb.nominal_elapsed();
        tb.tick(now);
    }
    let secs = tb.nominal_elapsed().as_secs_f64();
    assert!((secs - 1.0).abs() < 1e-6);
}

#[test]
fn update_gate_fires_at_most_once_per_poll_and_drops_leftover() {
    let mut gate = UpdateGate::new(Duration::from_millis(10));
    assert!(gate.poll(Duration::ZERO));
    assert!(!gate.poll(Duration::from_millis(5)));
    assert!(gate.poll(Duration::from_millis(35)));
    // A backlogging gate would still owe updates here.
    assert!(!gate.poll(Duration::from_millis(36)));
    assert!(!gate.poll(Duration::from_millis(44)));
    assert!(gate.poll(Duration::from_millis(45)));
}

#[test]
fn update_gate_zero_interval_always_fires() {
    let mut gate = UpdateGate::from_millis_f64(0.0).unwrap();
    assert!(gate.poll(Duration::ZERO));
    assert!(gate.poll(Duration::ZERO));
}

#[test]
fn update_gate_rejects_bad_interval() {
    assert!(UpdateGate::from_millis_f64(-1.0).is_err());
    assert!(UpdateGate::from_millis_f64(f64::NAN).is_err());
}

#[test]
fn driver_never_schedules_catch_up() {
    let mut d = FixedRateDriver::new(fps30());
    let t0 = Instant::now();
    assert_eq!(d.schedule(t0), Duration::ZERO);
    let wait = d.schedule(t0 + Duration::from_millis(10));
    assert!(wait > Duration::ZERO && wait <= d.period());
    // A long stall: the next tick runs immediately, and the one after waits a full period.
    let late = t0 + Duration::from_secs(1);
    assert_eq!(d.schedule(late), Duration::ZERO);
    assert_eq!(d.schedule(late), d.period());
}

#[test]
fn loop_timer_wraps() {
    let mut t = LoopTimer::new(3).unwrap();
    assert!(!t.advance());
    assert!(!t.advance());
    assert!(t.advance());
    assert_eq!(t.frame(), 0);
    assert!(!t.set(301));
    assert_eq!(t.frame(), 1);
    assert!(!t.set(302));
    assert!(t.set(300));
    assert_eq!(t.frame(), 0);
    assert!(LoopTimer::new(0).is_err());
}
