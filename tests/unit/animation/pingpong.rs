use super::*;

#[test]
fn rejects_inverted_bounds_and_bad_direction() {
    assert!(PingPong::new(5, 1).is_err());
    assert!(PingPong::starting_at(1, 1, 5, 0).is_err());
    assert!(PingPong::starting_at(1, 1, 5, 2).is_err());
}

#[test]
fn sweep_1_to_500_flips_at_each_bound() {
    let mut p = PingPong::new(1, 500).unwrap();
    for _ in 0..498 {
        assert_eq!(p.step(), None);
    }
    assert_eq!(p.step(), Some(Bound::Max));
    assert_eq!(p.value(), 500);
    assert_eq!(p.direction(), -1);

    for _ in 0..498 {
        assert_eq!(p.step(), None);
    }
    assert_eq!(p.step(), Some(Bound::Min));
    assert_eq!(p.value(), 1);
    assert_eq!(p.direction(), 1);
    assert_eq!(p.loops(), 1);
}

#[test]
fn value_never_leaves_bounds() {
    let mut p = PingPong::starting_at(7, 3, 9, -1).unwrap();
    for _ in 0..200 {
        let before = p.value();
        p.step();
        assert!((3..=9).contains(&p.value()));
        assert_eq!((p.value() - before).abs(), 1);
    }
}

#[test]
fn start_value_is_clamped() {
    let p = PingPong::starting_at(50, 1, 10, 1).unwrap();
    assert_eq!(p.value(), 10);
}

#[test]
fn degenerate_interval_alternates_bounds() {
    let mut p = PingPong::new(4, 4).unwrap();
    assert_eq!(p.step(), Some(Bound::Max));
    assert_eq!(p.step(), Some(Bound::Min));
    assert_eq!(p.value(), 4);
}

#[test]
fn half_loops_count_each_bound() {
    let mut p = PingPong::new(0, 2).unwrap();
    assert_eq!(p.half_loops(), 0);
    p.step();
    p.step();
    assert_eq!(p.half_loops(), 1);
    p.step();
    p.step();
    assert_eq!(p.half_loops(), 2);
}

#[test]
fn bounds_at_the_integer_limits_do_not_overflow() {
    let mut top = PingPong::new(i64::MAX, i64::MAX).unwrap();
    assert_eq!(top.step(), Some(Bound::Max));
    assert_eq!(top.value(), i64::MAX);
    assert_eq!(top.step(), Some(Bound::Min));
    assert_eq!(top.value(), i64::MAX);

    let mut bottom = PingPong::starting_at(i64::MIN, i64::MIN, i64::MIN + 1, -1).unwrap();
    assert_eq!(bottom.step(), Some(Bound::Min));
    assert_eq!(bottom.value(), i64::MIN);
    assert_eq!(bottom.direction(), 1);
}
