use kurbo::Shape as _;

use crate::foundation::core::{Affine, BezPath, Rect, Rgba8};

/// Geometric primitive carried by a [`DrawOp`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Ellipse(kurbo::Ellipse),
    Rect(Rect),
    RoundedRect(kurbo::RoundedRect),
    Line(kurbo::Line),
    Cubic(kurbo::CubicBez),
    Arc(kurbo::Arc),
    Path(BezPath),
}

impl Primitive {
    /// Flatten into a path, for compositors that only rasterize paths.
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        match self {
            Self::Ellipse(s) => s.to_path(tolerance),
            Self::Rect(s) => s.to_path(tolerance),
            Self::RoundedRect(s) => s.to_path(tolerance),
            Self::Line(s) => s.to_path(tolerance),
            Self::Cubic(s) => s.to_path(tolerance),
            Self::Arc(s) => s.to_path(tolerance),
            Self::Path(p) => p.clone(),
        }
    }

    /// Bounds in local (untransformed) coordinates.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Ellipse(s) => s.bounding_box(),
            Self::Rect(s) => *s,
            Self::RoundedRect(s) => s.bounding_box(),
            Self::Line(s) => s.bounding_box(),
            Self::Cubic(s) => s.bounding_box(),
            Self::Arc(s) => s.bounding_box(),
            Self::Path(p) => p.bounding_box(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba8,
    pub width: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Paint {
    pub fill: Option<Rgba8>,
    pub stroke: Option<Stroke>,
}

impl Paint {
    pub fn is_visible(&self) -> bool {
        self.fill.is_some() || self.stroke.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One primitive, placed by `transform` and painted with `paint`.
pub struct DrawOp {
    pub primitive: Primitive,
    pub transform: Affine,
    pub paint: Paint,
}

impl DrawOp {
    /// Bounds in canvas coordinates.
    pub fn world_bounds(&self) -> Rect {
        self.transform
            .transform_rect_bbox(self.primitive.bounding_box())
    }
}

/// Draw operations for one tick, in back-to-front order.
///
/// `clear` repaints the whole canvas before the ops. A frame without a clear is layered on top
/// of whatever the canvas already holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub clear: Option<Rgba8>,
    pub ops: Vec<DrawOp>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.clear.is_none() && self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/draw.rs"]
mod tests;
