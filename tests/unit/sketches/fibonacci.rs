use super::*;
use crate::foundation::core::FrameIndex;
use crate::foundation::rng::SketchRng;
use crate::scene::draw::Frame;

fn tick(s: &mut FibonacciSpiral, rng: &mut SketchRng, f: u64, recorded: Option<u64>) -> SketchFlow {
    let mut ctx = TickCtx {
        frame: FrameIndex(f),
        elapsed: std::time::Duration::ZERO,
        canvas: s.canvas(),
        rng,
        recorded,
    };
    s.update(&mut ctx)
}

fn small() -> FibonacciConfig {
    FibonacciConfig {
        total_frames: 10,
        turns: 2.0,
        ..FibonacciConfig::default()
    }
}

#[test]
fn angle_maps_linearly_to_max() {
    let mut s = FibonacciSpiral::new(small()).unwrap();
    let mut rng = SketchRng::seeded(0);
    tick(&mut s, &mut rng, 0, None);
    assert!((s.current_angle() - TAU * 2.0 / 10.0).abs() < 1e-12);
    for f in 1..10 {
        tick(&mut s, &mut rng, f, None);
    }
    assert!((s.current_angle() - TAU * 2.0).abs() < 1e-9);
    assert!(!s.is_complete());
    assert_eq!(tick(&mut s, &mut rng, 10, None), SketchFlow::Continue);
    assert!(s.is_complete());
}

#[test]
fn completion_halts_only_while_recording() {
    let mut s = FibonacciSpiral::new(small()).unwrap();
    let mut rng = SketchRng::seeded(0);
    for f in 0..10 {
        assert_eq!(tick(&mut s, &mut rng, f, Some(f)), SketchFlow::Continue);
    }
    assert_eq!(tick(&mut s, &mut rng, 10, Some(10)), SketchFlow::Halt);
}

#[test]
fn dots_grow_by_golden_factor() {
    let mut s = FibonacciSpiral::new(small()).unwrap();
    let mut rng = SketchRng::seeded(0);
    tick(&mut s, &mut rng, 0, None);
    let dots: Vec<Dot> = s.dots().collect();
    let expected = (s.current_angle() / 0.02).ceil() as usize;
    assert_eq!(dots.len(), expected);
    let first = dots[0];
    assert_eq!(first.pos, Point::new(3.0, 0.0));
    assert_eq!(first.width, 1.5);
    assert_eq!(first.height, 4.5);
    // One full 4π turn multiplies sizes by φ.
    assert!((growth(4.0 * PI) - PHI).abs() < 1e-12);
}

#[test]
fn draw_emits_clear_and_one_ellipse_per_dot() {
    let mut s = FibonacciSpiral::new(small()).unwrap();
    let mut rng = SketchRng::seeded(0);
    tick(&mut s, &mut rng, 0, None);
    let mut frame = Frame::new();
    s.draw(&mut Painter::new(s.canvas(), &mut frame));
    assert_eq!(frame.clear, Some(Rgba8::rgb(13, 13, 13)));
    assert_eq!(frame.ops.len(), s.dots().count());
}

#[test]
fn zero_frames_is_invalid() {
    let cfg = FibonacciConfig {
        total_frames: 0,
        ..FibonacciConfig::default()
    };
    assert!(FibonacciSpiral::new(cfg).is_err());
}
