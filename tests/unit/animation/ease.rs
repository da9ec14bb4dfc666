use super::*;

const ALL: [Ease; 3] = [Ease::InQuad, Ease::OutQuad, Ease::InOutQuad];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), ease.apply(0.0));
        assert_eq!(ease.apply(4.0), ease.apply(1.0));
    }
}

#[test]
fn in_out_quad_is_symmetric_around_half() {
    let e = Ease::InOutQuad;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    for t in [0.1, 0.2, 0.35] {
        assert!((e.apply(t) + e.apply(1.0 - t) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn quad_curves_are_monotonic() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=100 {
            let v = ease.apply(f64::from(i) / 100.0);
            assert!(v >= prev, "{ease:?} at {i}");
            prev = v;
        }
    }
}

#[test]
fn in_quad_starts_slow() {
    assert!((Ease::InQuad.apply(0.5) - 0.25).abs() < 1e-12);
    assert!((Ease::InQuad.tween(10.0, 20.0, 0.5) - 12.5).abs() < 1e-12);
}

#[test]
fn out_quad_mirrors_in_quad() {
    for t in [0.1, 0.3, 0.5, 0.8] {
        let mirrored = 1.0 - Ease::InQuad.apply(1.0 - t);
        assert!((Ease::OutQuad.apply(t) - mirrored).abs() < 1e-12);
    }
}

#[test]
fn window_progress_clamps_outside_window() {
    assert_eq!(window_progress(8, 8, 13), 0.0);
    assert_eq!(window_progress(13, 8, 13), 1.0);
    assert_eq!(window_progress(20, 8, 13), 1.0);
    assert!((window_progress(10, 8, 13) - 0.4).abs() < 1e-12);
    assert_eq!(window_progress(3, 5, 5), 1.0);
}
