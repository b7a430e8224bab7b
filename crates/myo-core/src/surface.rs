//! Immediate-mode drawing target the effects render through.
//!
//! The web front-end implements [`Surface`] over a 2D canvas context. The
//! [`Recorder`] implementation keeps every call as a [`DrawOp`] so host tests
//! can inspect a frame.

use glam::Vec2;

/// 8-bit RGB with a float alpha, matching CSS `rgba()`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
    Radial {
        center: Vec2,
        inner: f32,
        outer: f32,
        stops: Vec<ColorStop>,
    },
}

impl Paint {
    /// Radial fade from `color` at the center to transparent at `radius`.
    pub fn glow(center: Vec2, radius: f32, color: Rgba) -> Self {
        Paint::Radial {
            center,
            inner: 0.0,
            outer: radius,
            stops: vec![
                ColorStop::new(0.0, color),
                ColorStop::new(1.0, color.with_alpha(0.0)),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
}

impl Stroke {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self {
            paint: Paint::Solid(color),
            width,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub blur: f32,
    pub color: Rgba,
}

pub trait Surface {
    /// Drawable size in CSS pixels.
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    fn quad_to(&mut self, ctrl: Vec2, p: Vec2);
    fn stroke(&mut self, stroke: &Stroke);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint);
    /// Gaussian blur applied to subsequent draws; `0.0` disables it.
    fn set_blur(&mut self, radius: f32);
    fn set_shadow(&mut self, shadow: Option<Shadow>);
}

pub fn stroke_polyline(surface: &mut dyn Surface, points: &[Vec2], stroke: &Stroke) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    surface.begin_path();
    surface.move_to(*first);
    for p in rest {
        surface.line_to(*p);
    }
    surface.stroke(stroke);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Stroke { path: Vec<Vec2>, stroke: Stroke },
    Circle { center: Vec2, radius: f32, paint: Paint },
    Rect { origin: Vec2, size: Vec2, paint: Paint },
    Blur(f32),
    Shadow(Option<Shadow>),
}

/// Surface that records calls instead of rasterizing them.
///
/// Paths keep only vertex end points (quadratic control points are dropped),
/// which is enough to check geometry in tests.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    size: Vec2,
    path: Vec<Vec2>,
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            path: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&[Vec2], &Stroke)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Stroke { path, stroke } => Some((path.as_slice(), stroke)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Circle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }

    pub fn reset(&mut self) {
        self.ops.clear();
        self.path.clear();
    }
}

impl Surface for Recorder {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Vec2) {
        self.path.push(p);
    }

    fn line_to(&mut self, p: Vec2) {
        self.path.push(p);
    }

    fn quad_to(&mut self, _ctrl: Vec2, p: Vec2) {
        self.path.push(p);
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.ops.push(DrawOp::Stroke {
            path: self.path.clone(),
            stroke: stroke.clone(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        self.ops.push(DrawOp::Rect {
            origin,
            size,
            paint: paint.clone(),
        });
    }

    fn set_blur(&mut self, radius: f32) {
        self.ops.push(DrawOp::Blur(radius));
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.ops.push(DrawOp::Shadow(shadow));
    }
}
