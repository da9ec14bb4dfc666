use super::*;

fn canvas() -> Canvas {
    Canvas::new(200, 100).unwrap()
}

#[test]
fn background_on_empty_frame_becomes_clear() {
    let mut frame = Frame::new();
    let mut p = Painter::new(canvas(), &mut frame);
    p.background(Rgba8::rgb(1, 2, 3));
    assert_eq!(frame.clear, Some(Rgba8::rgb(1, 2, 3)));
    assert!(frame.ops.is_empty());
}

#[test]
fn background_after_shapes_paints_full_canvas_rect() {
    let mut frame = Frame::new();
    let mut p = Painter::new(canvas(), &mut frame);
    p.translate(5.0, 5.0);
    p.circle(0.0, 0.0, 10.0);
    p.background(Rgba8::BLACK);
    assert_eq!(frame.clear, None);
    assert_eq!(frame.ops.len(), 2);
    let bg = &frame.ops[1];
    assert_eq!(bg.transform, Affine::IDENTITY);
    assert_eq!(bg.primitive, Primitive::Rect(Rect::new(0.0, 0.0, 200.0, 100.0)));
}

#[test]
fn push_pop_restores_style_and_transform() {
    let mut frame = Frame::new();
    let mut p = Painter::new(canvas(), &mut frame);
    p.fill(Rgba8::rgb(255, 0, 0));
    p.push();
    p.translate(10.0, 0.0);
    p.no_stroke();
    p.fill(Rgba8::rgb(0, 255, 0));
    p.rect(0.0, 0.0, 1.0, 1.0);
    p.pop();
    assert_eq!(p.transform(), Affine::IDENTITY);
    p.rect(0.0, 0.0, 1.0, 1.0);

    let inner = &frame.ops[0];
    assert_eq!(inner.paint.fill, Some(Rgba8::rgb(0, 255, 0)));
    assert_eq!(inner.paint.stroke, None);
    assert_eq!(inner.transform, Affine::translate((10.0, 0.0)));

    let outer = &frame.ops[1];
    assert_eq!(outer.paint.fill, Some(Rgba8::rgb(255, 0, 0)));
    assert!(outer.paint.stroke.is_some());
}

#[test]
fn invisible_shapes_are_skipped() {
    let mut frame = Frame::new();
    let mut p = Painter::new(canvas(), &mut frame);
    p.no_fill();
    p.no_stroke();
    p.ellipse(0.0, 0.0, 4.0, 4.0);
    assert!(frame.ops.is_empty());
}

#[test]
fn stroke_weight_is_carried() {
    let mut frame = Frame::new();
    let mut p = Painter::new(canvas(), &mut frame);
    p.stroke(Rgba8::WHITE);
    p.stroke_weight(3.5);
    p.line(0.0, 0.0, 10.0, 10.0);
    let s = frame.ops[0].paint.stroke.unwrap();
    assert_eq!(s.width, 3.5);
    assert_eq!(s.color, Rgba8::WHITE);
}

#[test]
fn translate_then_rotate_composes_in_call_order() {
    let mut frame = Frame::new();
    let mut p = Painter::new(canvas(), &mut frame);
    p.translate(10.0, 0.0);
    p.rotate(std::f64::consts::FRAC_PI_2);
    let q = p.transform() * Point::new(1.0, 0.0);
    assert!((q.x - 10.0).abs() < 1e-9);
    assert!((q.y - 1.0).abs() < 1e-9);
}

#[test]
fn degenerate_polygons_draw_nothing() {
    let mut frame = Frame::new();
    let mut p = Painter::new(canvas(), &mut frame);
    p.polygon(&[]);
    p.polygon(&[Point::new(1.0, 1.0)]);
    p.triangle(Point::ZERO, Point::new(1.0, 0.0), Point::new(0.0, 1.0));
    assert_eq!(frame.ops.len(), 1);
}
