use super::*;

#[test]
fn map_range_matches_linear_interpolation() {
    assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
    assert_eq!(map_range(15.0, 10.0, 20.0, 0.3, 0.0), 0.15);
    assert_eq!(map_range(1.0, 1.0, 1.0, 7.0, 9.0), 7.0);
}

#[test]
fn map_clamped_respects_reversed_output() {
    assert_eq!(map_clamped(40.0, 0.0, 30.0, 255.0, 0.0), 0.0);
    assert_eq!(map_clamped(-5.0, 0.0, 30.0, 255.0, 0.0), 255.0);
}

#[test]
fn lerp_angle_takes_shortest_arc() {
    let from = 3.0;
    let to = -3.0;
    let mid = lerp_angle(from, to, 0.5);
    assert!((mid - PI).abs() < 1e-9, "expected to meet at PI, got {mid}");
}

#[test]
fn wrap_angle_range() {
    for a in [-10.0, -PI, 0.0, PI, 7.5, 100.0] {
        let w = wrap_angle(a);
        assert!(w > -PI && w <= PI, "{a} -> {w}");
    }
}

#[test]
fn normalize_zero_vector_is_zero() {
    assert_eq!(normalize_or_zero(Vec2::ZERO), Vec2::ZERO);
    let n = normalize_or_zero(Vec2::new(3.0, 4.0));
    assert!((n.hypot() - 1.0).abs() < 1e-12);
}
