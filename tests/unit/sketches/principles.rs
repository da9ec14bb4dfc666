use super::*;
use crate::foundation::core::FrameIndex;
use crate::scene::draw::Frame;

fn tick(s: &mut Principles, rng: &mut SketchRng, frame: u64, elapsed_ms: u64) {
    let mut ctx = TickCtx {
        frame: FrameIndex(frame),
        elapsed: Duration::from_millis(elapsed_ms),
        canvas: s.canvas(),
        rng,
        recorded: None,
    };
    s.update(&mut ctx);
}

/// Tick until the phase changes, returning how many ticks it took.
fn run_phase(s: &mut Principles, rng: &mut SketchRng, frame: &mut u64) -> u32 {
    let start = s.phase();
    let mut n = 0;
    while s.phase() == start {
        tick(s, rng, *frame, 10_000);
        *frame += 1;
        n += 1;
        assert!(n < 1000, "stuck in {start:?}");
    }
    n
}

#[test]
fn button_press_hands_over_to_door_open_at_tick_18() {
    let mut m = PhaseMachine::new(ScenePhase::ButtonPress);
    for _ in 0..17 {
        assert_eq!(m.advance(), None);
    }
    let change = m.advance().unwrap();
    assert_eq!(change.from, ScenePhase::ButtonPress);
    assert_eq!(change.to, ScenePhase::DoorOpen);
    assert_eq!(m.local_frame(), 0);
}

#[test]
fn press_keyframes() {
    let mut rig = Rig::default();
    rig.animate(ScenePhase::ButtonPress, 0);
    assert_eq!(rig.expression, Expression::Smile);
    assert_eq!(rig.anticipation, 0.0);

    rig.animate(ScenePhase::ButtonPress, 8);
    assert!((rig.right_arm + 0.3).abs() < 1e-12);
    assert!((rig.anticipation + 15.0).abs() < 1e-12);
    assert_eq!(rig.button_depth, 0.0);

    rig.animate(ScenePhase::ButtonPress, 13);
    assert!((rig.right_arm - 0.5).abs() < 1e-12);
    assert!((rig.button_depth - 10.0).abs() < 1e-12);

    // follow-through settles quickly, then slows into rest
    rig.animate(ScenePhase::ButtonPress, 15);
    assert!((rig.right_arm - 0.18).abs() < 1e-12);
    assert!((rig.button_depth - 3.6).abs() < 1e-12);
}

#[test]
fn reaction_holds_the_frown() {
    let mut rig = Rig::default();
    for f in 10..25 {
        rig.animate(ScenePhase::SplashReaction, f);
        assert_eq!(rig.expression, Expression::Frown);
        assert_eq!(rig.leg_lift, -20.0);
        assert_eq!(rig.head_rotation, -0.4);
    }
    rig.animate(ScenePhase::SplashReaction, 25);
    assert_eq!(rig.expression, Expression::Neutral);
}

#[test]
fn waits_idle_until_auto_start() {
    let mut s = Principles::new(PrinciplesConfig::default()).unwrap();
    let mut rng = SketchRng::seeded(1);
    tick(&mut s, &mut rng, 0, 0);
    tick(&mut s, &mut rng, 1, 499);
    assert_eq!(s.phase(), ScenePhase::Idle);
    tick(&mut s, &mut rng, 2, 500);
    assert_eq!(s.phase(), ScenePhase::LookAtButton);
    assert_eq!(s.local_frame(), 1);
}

#[test]
fn pointer_on_button_starts_once() {
    let mut s = Principles::new(PrinciplesConfig::default()).unwrap();
    let far = Point::new(10.0, 10.0);
    s.on_pointer(far);
    assert_eq!(s.phase(), ScenePhase::Idle);

    let button = s.stage().button;
    s.on_pointer(Point::new(button.x + 5.0, button.y));
    assert_eq!(s.phase(), ScenePhase::LookAtButton);
    assert!(!s.start());
}

#[test]
fn full_reel_runs_through_every_phase_and_loops() {
    let mut s = Principles::new(PrinciplesConfig::default()).unwrap();
    let mut rng = SketchRng::seeded(2);
    assert!(s.start());
    let mut frame = 0;

    assert_eq!(run_phase(&mut s, &mut rng, &mut frame), 20);
    assert_eq!(s.phase(), ScenePhase::ButtonPress);
    assert_eq!(run_phase(&mut s, &mut rng, &mut frame), 18);
    assert_eq!(s.phase(), ScenePhase::DoorOpen);
    assert_eq!(s.rig().expression, Expression::Neutral);
    assert_eq!(run_phase(&mut s, &mut rng, &mut frame), 10);
    assert_eq!(s.phase(), ScenePhase::BallFall);
    assert_eq!(s.ball().vel, Vec2::new(8.0, 0.0));

    run_phase(&mut s, &mut rng, &mut frame);
    assert_eq!(s.phase(), ScenePhase::Splash);
    assert_eq!(s.ball().bounces, 1);
    assert!(s.stage().pool.spans(s.ball().pos.x));
    assert_eq!(s.drops().len(), 30);
    assert_eq!(s.ripples().len(), 1);

    assert_eq!(run_phase(&mut s, &mut rng, &mut frame), 15);
    assert_eq!(s.phase(), ScenePhase::SplashReaction);
    assert_eq!(run_phase(&mut s, &mut rng, &mut frame), 35);
    assert_eq!(s.phase(), ScenePhase::Sink);
    assert_eq!(run_phase(&mut s, &mut rng, &mut frame), 30);
    assert_eq!(s.phase(), ScenePhase::LookAtButton);
    assert_eq!(s.cycles(), 1);
    assert_eq!(s.ball().pos, s.stage().ball_start);
    assert_eq!(s.rig().door_angle, 0.0);
    assert!(s.drops().is_empty());
}

#[test]
fn ball_bounces_once_then_lands_in_the_pool() {
    let cfg = PrinciplesConfig::default();
    let stage = Stage::new(cfg.canvas, cfg.pool_width);
    let mut ball = Ball::new(stage.ball_start, cfg.ball_radius);
    ball.vel = Vec2::new(cfg.launch_speed, 0.0);

    let mut events = Vec::new();
    for _ in 0..500 {
        let e = ball.fall(stage.floor_y, &stage.pool, &cfg);
        if e != FallEvent::Flying {
            events.push(e);
        }
        if e == FallEvent::Splashed {
            break;
        }
    }
    assert_eq!(events, vec![FallEvent::Bounced, FallEvent::Splashed]);
    assert!((ball.vel.x - 8.0 * 0.88).abs() < 1e-9);
}

#[test]
fn splash_drops_fan_upward_and_expire() {
    let mut rng = SketchRng::seeded(3);
    let mut drops = EntityStore::new();
    drops.extend(SplashDrop::burst(Point::new(0.0, 100.0), 30, 35, &mut rng));
    for d in &drops {
        assert!(d.vel.y < 0.0);
    }
    for _ in 0..34 {
        drops.step_all(&0.3, &mut rng);
        assert_eq!(drops.prune(), 0);
    }
    drops.step_all(&0.3, &mut rng);
    assert_eq!(drops.prune(), 30);
}

#[test]
fn ripples_grow_and_fade_out() {
    let rates = RippleRates {
        growth: 2.0,
        fade: 5.0,
    };
    let mut r = Ripple {
        center: Point::ORIGIN,
        size: 0.0,
        alpha: 80.0,
    };
    let mut rng = SketchRng::seeded(0);
    for _ in 0..15 {
        r.step(&rates, &mut rng);
        assert!(!r.is_expired());
    }
    r.step(&rates, &mut rng);
    assert!(r.is_expired());
    assert_eq!(r.size, 32.0);
}

#[test]
fn ball_is_hidden_until_it_falls() {
    let s = Principles::new(PrinciplesConfig::default()).unwrap();
    let mut idle = Frame::new();
    s.draw(&mut Painter::new(s.canvas(), &mut idle));

    let mut s = s;
    s.start();
    let mut shown = Frame::new();
    s.draw(&mut Painter::new(s.canvas(), &mut shown));
    assert_eq!(shown.len(), idle.len() + 2);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = PrinciplesConfig {
        gravity: 0.0,
        ..PrinciplesConfig::default()
    };
    assert!(Principles::new(cfg).is_err());
}
