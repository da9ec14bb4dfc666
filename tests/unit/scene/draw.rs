use super::*;

#[test]
fn primitive_bounds_are_local() {
    let e = Primitive::Ellipse(kurbo::Ellipse::new((10.0, 20.0), (5.0, 2.0), 0.0));
    let b = e.bounding_box();
    assert!((b.x0 - 5.0).abs() < 1e-9);
    assert!((b.x1 - 15.0).abs() < 1e-9);
    assert!((b.y0 - 18.0).abs() < 1e-9);
    assert!((b.y1 - 22.0).abs() < 1e-9);
}

#[test]
fn world_bounds_apply_transform() {
    let op = DrawOp {
        primitive: Primitive::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)),
        transform: Affine::translate((100.0, 50.0)),
        paint: Paint::default(),
    };
    let b = op.world_bounds();
    assert_eq!((b.x0, b.y0, b.x1, b.y1), (100.0, 50.0, 110.0, 60.0));
}

#[test]
fn line_flattens_to_two_point_path() {
    let p = Primitive::Line(kurbo::Line::new((0.0, 0.0), (3.0, 4.0))).to_path(0.1);
    assert_eq!(p.elements().len(), 2);
}

#[test]
fn empty_frame_and_paint_visibility() {
    let mut f = Frame::new();
    assert!(f.is_empty());
    f.clear = Some(Rgba8::BLACK);
    assert!(!f.is_empty());
    assert_eq!(f.len(), 0);

    assert!(!Paint::default().is_visible());
    let p = Paint {
        fill: None,
        stroke: Some(Stroke {
            color: Rgba8::WHITE,
            width: 2.0,
        }),
    };
    assert!(p.is_visible());
}
