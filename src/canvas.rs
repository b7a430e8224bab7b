//! [`Surface`] over a `CanvasRenderingContext2d`.

use glam::Vec2;
use myo_core::surface::ColorStop;
use myo_core::{Paint, Shadow, Stroke, Surface};
use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    /// CSS size, updated by the resize listener.
    size: Rc<Cell<Vec2>>,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let surface = Self {
            canvas,
            ctx,
            size: Rc::new(Cell::new(Vec2::ZERO)),
        };
        surface.sync_size();
        Ok(surface)
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    /// Re-reads the CSS box and resizes the backing store. Returns the new
    /// CSS size.
    pub fn sync_size(&self) -> Vec2 {
        let size = crate::dom::sync_canvas_backing_size(&self.canvas, &self.ctx);
        self.size.set(size);
        size
    }

    fn linear(&self, from: Vec2, to: Vec2, stops: &[ColorStop]) -> web::CanvasGradient {
        let gradient = self.ctx.create_linear_gradient(
            from.x as f64,
            from.y as f64,
            to.x as f64,
            to.y as f64,
        );
        add_stops(&gradient, stops);
        gradient
    }

    fn radial(
        &self,
        center: Vec2,
        inner: f32,
        outer: f32,
        stops: &[ColorStop],
    ) -> Option<web::CanvasGradient> {
        let (x, y) = (center.x as f64, center.y as f64);
        let gradient = self
            .ctx
            .create_radial_gradient(x, y, inner.max(0.0) as f64, x, y, outer.max(0.0) as f64)
            .ok()?;
        add_stops(&gradient, stops);
        Some(gradient)
    }

    fn apply_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.css()),
            Paint::Linear { from, to, stops } => self
                .ctx
                .set_fill_style_canvas_gradient(&self.linear(*from, *to, stops)),
            Paint::Radial {
                center,
                inner,
                outer,
                stops,
            } => match self.radial(*center, *inner, *outer, stops) {
                Some(gradient) => self.ctx.set_fill_style_canvas_gradient(&gradient),
                None => self.ctx.set_fill_style_str("transparent"),
            },
        }
    }

    fn apply_stroke(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.css()),
            Paint::Linear { from, to, stops } => self
                .ctx
                .set_stroke_style_canvas_gradient(&self.linear(*from, *to, stops)),
            Paint::Radial {
                center,
                inner,
                outer,
                stops,
            } => match self.radial(*center, *inner, *outer, stops) {
                Some(gradient) => self.ctx.set_stroke_style_canvas_gradient(&gradient),
                None => self.ctx.set_stroke_style_str("transparent"),
            },
        }
    }
}

fn add_stops(gradient: &web::CanvasGradient, stops: &[ColorStop]) {
    for stop in stops {
        _ = gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.css());
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size.get()
    }

    fn clear(&mut self) {
        let size = self.size.get();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Vec2) {
        self.ctx.move_to(p.x as f64, p.y as f64);
    }

    fn line_to(&mut self, p: Vec2) {
        self.ctx.line_to(p.x as f64, p.y as f64);
    }

    fn quad_to(&mut self, ctrl: Vec2, p: Vec2) {
        self.ctx
            .quadratic_curve_to(ctrl.x as f64, ctrl.y as f64, p.x as f64, p.y as f64);
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.apply_stroke(&stroke.paint);
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.apply_fill(paint);
        self.ctx.fill();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        self.apply_fill(paint);
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn set_blur(&mut self, radius: f32) {
        if radius > 0.0 {
            self.ctx.set_filter(&format!("blur({:.1}px)", radius));
        } else {
            self.ctx.set_filter("none");
        }
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        match shadow {
            Some(shadow) => {
                self.ctx.set_shadow_blur(shadow.blur as f64);
                self.ctx.set_shadow_color(&shadow.color.css());
            }
            None => {
                self.ctx.set_shadow_blur(0.0);
                self.ctx.set_shadow_color("transparent");
            }
        }
    }
}
