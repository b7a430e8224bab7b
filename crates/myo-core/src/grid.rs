//! Rectilinear grid whose lines bend around the smoothed pointer.

use crate::constants::*;
use crate::effect::{Effect, FrameTime};
use crate::error::{self, ConfigError};
use crate::events::InputEvent;
use crate::falloff::{influence, radial_push};
use crate::pointer::PointerTracker;
use crate::surface::{stroke_polyline, Paint, Rgba, Stroke, Surface};
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct GridConfig {
    pub spacing: f32,
    pub sample_step: f32,
    pub distort_radius: f32,
    /// Positive pushes lines away from the pointer, negative pulls them in.
    pub distort_strength: f32,
    pub dot_radius: f32,
    pub dot_max_size: f32,
    pub smoothing: f32,
    pub line_width: f32,
    pub line_color: Rgba,
    pub dot_color: Rgba,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: GRID_SPACING,
            sample_step: GRID_SAMPLE_STEP,
            distort_radius: GRID_DISTORT_RADIUS,
            distort_strength: GRID_DISTORT_STRENGTH,
            dot_radius: GRID_DOT_RADIUS,
            dot_max_size: GRID_DOT_MAX_SIZE,
            smoothing: GRID_SMOOTHING,
            line_width: 0.5,
            line_color: INK.with_alpha(0.06),
            dot_color: TERRACOTTA.with_alpha(0.5),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::positive("spacing", self.spacing)?;
        error::positive("sample_step", self.sample_step)?;
        error::positive("distort_radius", self.distort_radius)?;
        error::positive("dot_radius", self.dot_radius)?;
        error::positive("line_width", self.line_width)?;
        error::within("smoothing", self.smoothing, f32::EPSILON, 1.0)
    }
}

pub struct GridDistortion {
    config: GridConfig,
    pointer: PointerTracker,
    size: Vec2,
}

impl GridDistortion {
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pointer: PointerTracker::new(config.smoothing),
            config,
            size: Vec2::ZERO,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    /// Offset applied to a grid sample at `point` for the current smoothed
    /// pointer position.
    pub fn displacement(&self, point: Vec2) -> Vec2 {
        radial_push(
            point,
            self.pointer.smoothed(),
            self.config.distort_radius,
            self.config.distort_strength,
        )
    }

    /// Grid line offsets `0, spacing, 2·spacing, …` up to and including `extent`.
    fn offsets(&self, extent: f32) -> impl Iterator<Item = f32> {
        let spacing = self.config.spacing;
        let count = (extent / spacing).floor().max(0.0) as usize;
        (0..=count).map(move |i| i as f32 * spacing)
    }

    fn samples(&self, extent: f32) -> impl Iterator<Item = f32> {
        let step = self.config.sample_step;
        let count = (extent / step).ceil().max(0.0) as usize;
        (0..=count).map(move |i| (i as f32 * step).min(extent))
    }

    pub fn vertical_line(&self, x: f32) -> Vec<Vec2> {
        self.samples(self.size.y)
            .map(|y| {
                let p = Vec2::new(x, y);
                p + self.displacement(p)
            })
            .collect()
    }

    pub fn horizontal_line(&self, y: f32) -> Vec<Vec2> {
        self.samples(self.size.x)
            .map(|x| {
                let p = Vec2::new(x, y);
                p + self.displacement(p)
            })
            .collect()
    }

    fn draw_dots(&self, surface: &mut dyn Surface) {
        let pointer = self.pointer.smoothed();
        let radius = self.config.dot_radius;
        let paint = Paint::Solid(self.config.dot_color);
        for x in self.offsets(self.size.x) {
            if (x - pointer.x).abs() >= radius {
                continue;
            }
            for y in self.offsets(self.size.y) {
                let p = Vec2::new(x, y);
                let weight = influence(p.distance(pointer), radius);
                if weight > 0.0 {
                    let at = p + self.displacement(p);
                    surface.fill_circle(at, self.config.dot_max_size * weight, &paint);
                }
            }
        }
    }
}

impl Effect for GridDistortion {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMove(p) => self.pointer.on_move(p.x, p.y),
            InputEvent::PointerLeave | InputEvent::Visibility(false) => self.pointer.on_leave(),
            InputEvent::Resize(size) => self.resize(*size),
            _ => {}
        }
    }

    fn frame(&mut self, _time: FrameTime, surface: &mut dyn Surface) {
        surface.clear();
        self.pointer.tick();
        let stroke = Stroke::solid(self.config.line_color, self.config.line_width);
        for x in self.offsets(self.size.x) {
            stroke_polyline(surface, &self.vertical_line(x), &stroke);
        }
        for y in self.offsets(self.size.y) {
            stroke_polyline(surface, &self.horizontal_line(y), &stroke);
        }
        if self.pointer.is_engaged() {
            self.draw_dots(surface);
        }
    }
}
