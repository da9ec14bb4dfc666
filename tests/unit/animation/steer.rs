use super::*;
use std::f64::consts::FRAC_PI_2;

#[test]
fn separation_is_zero_at_and_beyond_radius() {
    let me = Point::new(0.0, 0.0);
    assert_eq!(separation_force(me, Point::new(60.0, 0.0), 60.0), Vec2::ZERO);
    assert_eq!(separation_force(me, Point::new(0.0, 90.0), 60.0), Vec2::ZERO);
    assert_eq!(separation_force(me, me, 60.0), Vec2::ZERO);
}

#[test]
fn separation_grows_as_distance_shrinks() {
    let me = Point::new(0.0, 0.0);
    let mut prev = 0.0;
    for d in (1..60).rev() {
        let f = separation_force(me, Point::new(f64::from(d), 0.0), 60.0);
        let mag = f.hypot();
        assert!(mag > prev, "magnitude did not grow at d={d}");
        assert!(f.x < 0.0, "force must point away from the neighbour");
        prev = mag;
    }
}

#[test]
fn no_neighbors_keeps_heading() {
    let params = FlockParams::default();
    let far = Neighbor {
        pos: Point::new(500.0, 500.0),
        heading: 1.0,
    };
    let forces = flock_forces(Point::ZERO, [far], &params);
    assert_eq!(forces.neighbors, 0);
    assert_eq!(flock_heading(0.3, &forces, &params), 0.3);
}

#[test]
fn cohesion_points_at_centroid() {
    let params = FlockParams::default();
    let ns = [
        Neighbor {
            pos: Point::new(80.0, 10.0),
            heading: 0.0,
        },
        Neighbor {
            pos: Point::new(80.0, -10.0),
            heading: 0.0,
        },
    ];
    let forces = flock_forces(Point::ZERO, ns, &params);
    assert_eq!(forces.neighbors, 2);
    assert!((forces.cohesion.x - 1.0).abs() < 1e-9);
    assert!(forces.cohesion.y.abs() < 1e-9);
}

#[test]
fn heading_moves_partially_toward_alignment() {
    let params = FlockParams {
        weight_cohesion: 0.0,
        weight_separation: 0.0,
        weight_alignment: 10.0,
        ..FlockParams::default()
    };
    let n = Neighbor {
        pos: Point::new(90.0, 0.0),
        heading: FRAC_PI_2,
    };
    let forces = flock_forces(Point::ZERO, [n], &params);
    let h = flock_heading(0.0, &forces, &params);
    assert!(h > 0.0 && h < FRAC_PI_2 * params.smoothing + 1e-9);
}

#[test]
fn seek_eases_toward_goal() {
    let h = seek_heading(0.0, Point::ZERO, Point::new(0.0, 10.0), 0.1);
    assert!((h - FRAC_PI_2 * 0.1).abs() < 1e-9);
    assert_eq!(seek_heading(0.7, Point::ZERO, Point::ZERO, 0.1), 0.7);
}
