use super::*;
use crate::scene::draw::Frame;

#[test]
fn clam_rests_then_opens_and_puffs_once() {
    let mut hinge = Hinge::new(HingeParams::clam());
    for _ in 0..180 {
        assert_eq!(hinge.step(), 0);
    }
    assert_eq!(hinge.state(), HingeState::Closed);
    hinge.step();
    assert_eq!(hinge.state(), HingeState::Opening);

    let mut puffs = 0;
    let mut ticks = 0;
    while hinge.state() == HingeState::Opening {
        puffs += hinge.step();
        ticks += 1;
        assert!(ticks < 200);
    }
    assert_eq!(hinge.state(), HingeState::Open);
    assert_eq!(puffs, 10);
    assert!(hinge.angle() > PI / 3.0 - 0.1);
    assert!(hinge.angle() < PI / 3.0);
}

#[test]
fn hinge_holds_then_shuts_completely() {
    let params = HingeParams::chest();
    let mut hinge = Hinge::new(params.clone());
    while hinge.state() != HingeState::Open {
        hinge.step();
    }
    for _ in 0..params.hold_ticks {
        hinge.step();
        assert_eq!(hinge.state(), HingeState::Open);
    }
    hinge.step();
    assert_eq!(hinge.state(), HingeState::Closing);

    let mut ticks = 0;
    while hinge.state() == HingeState::Closing {
        assert_eq!(hinge.step(), 0);
        ticks += 1;
        assert!(ticks < 200);
    }
    assert_eq!(hinge.state(), HingeState::Closed);
    assert_eq!(hinge.angle(), 0.0);
}

#[test]
fn hinge_cycles_forever() {
    let mut hinge = Hinge::new(HingeParams::clam());
    let puffs: usize = (0..2000).map(|_| hinge.step()).sum();
    assert!(puffs >= 30);
    assert_eq!(puffs % 10, 0);
}

#[test]
fn tiny_open_angle_is_rejected() {
    let params = HingeParams {
        open_angle: 0.05,
        ..HingeParams::clam()
    };
    assert!(params.validate().is_err());
    assert!(HingeParams::chest().validate().is_ok());
}

#[test]
fn gravel_is_reproducible_and_inside_the_bed() {
    let a = scatter_gravel(Canvas::REEL, 200, 12345);
    let b = scatter_gravel(Canvas::REEL, 200, 12345);
    let c = scatter_gravel(Canvas::REEL, 200, 54321);
    assert_eq!(a.len(), 200);
    assert_eq!(a, b);
    assert_ne!(a, c);
    for s in &a {
        assert!(s.pos.y >= 1920.0 - GRAVEL_DEPTH && s.pos.y < 1920.0);
        assert!(s.pos.x >= 0.0 && s.pos.x < 1080.0);
        assert!((5.0..15.0).contains(&s.size));
        assert!(STONE_COLORS.contains(&s.color));
    }
}

#[test]
fn plant_roots_stay_put() {
    for frame in [0, 17, 300] {
        assert_eq!(stem_sway(frame, 1.5, 0.0, 1200.0), 0.0);
        assert!(stem_sway(frame, 0.0, 1200.0, 1200.0).abs() <= 30.0);
    }
}

#[test]
fn water_is_one_line_per_row() {
    let canvas = Canvas::new(20, 40).unwrap();
    let mut frame = Frame::new();
    let mut p = Painter::new(canvas, &mut frame);
    draw_water(&mut p);
    assert_eq!(frame.len(), 40);
}

#[test]
fn plants_draw_stems_and_paired_leaves() {
    let plant = Plant {
        x: 100.0,
        color: Rgba8::rgb(34, 139, 34),
        height: 100.0,
    };
    let mut frame = Frame::new();
    let mut p = Painter::new(Canvas::REEL, &mut frame);
    draw_plant(&mut p, &plant, 1770.0, 0);
    // Leaves at 20, 45, 70, 95: four pairs per stem.
    assert_eq!(frame.len(), 3 * (1 + 4 * 2));
}
