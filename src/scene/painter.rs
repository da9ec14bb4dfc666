//! Immediate-mode drawing front end.
//!
//! [`Painter`] mirrors the familiar sketchbook API: a current fill, stroke and transform that
//! every shape call picks up, with `push`/`pop` to save and restore them. Shapes are not
//! rasterised here; each call appends one [`DrawOp`] to the frame being built.

use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8};
use crate::scene::draw::{DrawOp, Frame, Paint, Primitive, Stroke};

#[derive(Clone, Copy, Debug)]
struct Style {
    transform: Affine,
    fill: Option<Rgba8>,
    stroke: Option<Rgba8>,
    stroke_weight: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill: Some(Rgba8::WHITE),
            stroke: Some(Rgba8::BLACK),
            stroke_weight: 1.0,
        }
    }
}

pub struct Painter<'a> {
    canvas: Canvas,
    frame: &'a mut Frame,
    style: Style,
    stack: Vec<Style>,
}

impl<'a> Painter<'a> {
    pub fn new(canvas: Canvas, frame: &'a mut Frame) -> Self {
        Self {
            canvas,
            frame,
            style: Style::default(),
            stack: Vec::new(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> f64 {
        self.canvas.w()
    }

    pub fn height(&self) -> f64 {
        self.canvas.h()
    }

    pub fn transform(&self) -> Affine {
        self.style.transform
    }

    /// Fill the whole canvas. On an empty frame this becomes the frame's clear colour; later in
    /// the frame it paints an untransformed full-canvas rectangle over what is already there.
    pub fn background(&mut self, color: Rgba8) {
        if self.frame.ops.is_empty() {
            self.frame.clear = Some(color);
            return;
        }
        self.frame.ops.push(DrawOp {
            primitive: Primitive::Rect(self.canvas.bounds()),
            transform: Affine::IDENTITY,
            paint: Paint {
                fill: Some(color),
                stroke: None,
            },
        });
    }

    pub fn push(&mut self) {
        self.stack.push(self.style);
    }

    /// Restore the state saved by the matching `push`. An unmatched `pop` resets to defaults.
    pub fn pop(&mut self) {
        self.style = self.stack.pop().unwrap_or_default();
    }

    pub fn fill(&mut self, color: Rgba8) {
        self.style.fill = Some(color);
    }

    pub fn no_fill(&mut self) {
        self.style.fill = None;
    }

    pub fn stroke(&mut self, color: Rgba8) {
        self.style.stroke = Some(color);
    }

    pub fn no_stroke(&mut self) {
        self.style.stroke = None;
    }

    pub fn stroke_weight(&mut self, w: f64) {
        self.style.stroke_weight = w.max(0.0);
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.style.transform *= Affine::translate((x, y));
    }

    pub fn rotate(&mut self, radians: f64) {
        self.style.transform *= Affine::rotate(radians);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.style.transform *= Affine::scale_non_uniform(sx, sy);
    }

    /// Ellipse centred on `(cx, cy)` with full width and height.
    pub fn ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64) {
        self.emit(Primitive::Ellipse(kurbo::Ellipse::new(
            (cx, cy),
            (w.abs() / 2.0, h.abs() / 2.0),
            0.0,
        )));
    }

    pub fn circle(&mut self, cx: f64, cy: f64, diameter: f64) {
        self.ellipse(cx, cy, diameter, diameter);
    }

    /// Axis-aligned rectangle from its top-left corner.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.emit(Primitive::Rect(Rect::new(x, y, x + w, y + h)));
    }

    /// Rectangle centred on `(cx, cy)`.
    pub fn rect_centered(&mut self, cx: f64, cy: f64, w: f64, h: f64) {
        self.rect(cx - w / 2.0, cy - h / 2.0, w, h);
    }

    pub fn rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        self.emit(Primitive::RoundedRect(kurbo::RoundedRect::new(
            x,
            y,
            x + w,
            y + h,
            radius,
        )));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.emit(Primitive::Line(kurbo::Line::new((x1, y1), (x2, y2))));
    }

    pub fn bezier(&mut self, p0: Point, p1: Point, p2: Point, p3: Point) {
        self.emit(Primitive::Cubic(kurbo::CubicBez::new(p0, p1, p2, p3)));
    }

    pub fn triangle(&mut self, a: Point, b: Point, c: Point) {
        self.polygon(&[a, b, c]);
    }

    /// Closed polygon through `points`. Fewer than two points draw nothing.
    pub fn polygon(&mut self, points: &[Point]) {
        if let Some(path) = polyline_path(points, true) {
            self.emit(Primitive::Path(path));
        }
    }

    /// Open polyline through `points`.
    pub fn polyline(&mut self, points: &[Point]) {
        if let Some(path) = polyline_path(points, false) {
            self.emit(Primitive::Path(path));
        }
    }

    /// Elliptical arc centred on `(cx, cy)` from `start` to `stop` radians, clockwise on screen.
    pub fn arc(&mut self, cx: f64, cy: f64, w: f64, h: f64, start: f64, stop: f64) {
        self.emit(Primitive::Arc(kurbo::Arc {
            center: Point::new(cx, cy),
            radii: (w.abs() / 2.0, h.abs() / 2.0).into(),
            start_angle: start,
            sweep_angle: stop - start,
            x_rotation: 0.0,
        }));
    }

    pub fn path(&mut self, path: BezPath) {
        self.emit(Primitive::Path(path));
    }

    fn emit(&mut self, primitive: Primitive) {
        let paint = Paint {
            fill: self.style.fill,
            stroke: self.style.stroke.map(|color| Stroke {
                color,
                width: self.style.stroke_weight,
            }),
        };
        if !paint.is_visible() {
            return;
        }
        self.frame.ops.push(DrawOp {
            primitive,
            transform: self.style.transform,
            paint,
        });
    }
}

fn polyline_path(points: &[Point], closed: bool) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    if closed {
        path.close_path();
    }
    Some(path)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/painter.rs"]
mod tests;
