use crate::constants::POINTER_OFFSCREEN;
use glam::Vec2;

/// Raw pointer position plus a single-pole low-pass copy of it.
///
/// Effects read [`smoothed`](Self::smoothed); call [`tick`](Self::tick) once
/// per frame before computing geometry.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    raw: Vec2,
    smoothed: Vec2,
    smoothing: f32,
}

impl PointerTracker {
    pub const OFFSCREEN: Vec2 = Vec2::new(POINTER_OFFSCREEN, POINTER_OFFSCREEN);

    /// `smoothing` is the fraction of the remaining gap closed per tick and is
    /// clamped to `(0, 1]`.
    pub fn new(smoothing: f32) -> Self {
        Self {
            raw: Self::OFFSCREEN,
            smoothed: Self::OFFSCREEN,
            smoothing: smoothing.clamp(f32::EPSILON, 1.0),
        }
    }

    pub fn on_move(&mut self, x: f32, y: f32) {
        self.raw = Vec2::new(x, y);
    }

    pub fn on_leave(&mut self) {
        self.raw = Self::OFFSCREEN;
    }

    pub fn tick(&mut self) {
        self.smoothed += (self.raw - self.smoothed) * self.smoothing;
    }

    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    pub fn smoothed(&self) -> Vec2 {
        self.smoothed
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// False once the pointer has left and the smoothed copy followed it out.
    pub fn is_engaged(&self) -> bool {
        self.raw != Self::OFFSCREEN || self.smoothed.distance(Self::OFFSCREEN) > 1.0
    }
}
