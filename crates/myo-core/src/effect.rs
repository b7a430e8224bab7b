use crate::events::InputEvent;
use crate::lifecycle::Animation;
use crate::surface::Surface;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Clock values handed to a frame callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Seconds since the page clock started.
    pub now: f64,
    /// Seconds since this effect's previous frame, clamped to a sane step.
    pub dt: f32,
}

impl FrameTime {
    pub fn new(now: f64, dt: f32) -> Self {
        Self { now, dt }
    }

    /// `now` narrowed for use as an animation phase.
    pub fn t(&self) -> f32 {
        self.now as f32
    }
}

/// A canvas effect: owns all of its generated state and redraws it every
/// frame.
pub trait Effect {
    fn name(&self) -> &'static str;

    /// Regenerates every piece of derived geometry for the new size and drops
    /// anything that referenced the old geometry.
    fn resize(&mut self, size: Vec2);

    fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::Resize(size) = event {
            self.resize(*size);
        }
    }

    /// Called when the effect becomes visible.
    fn start(&mut self, _now: f64) {}

    fn stop(&mut self) {}

    fn frame(&mut self, time: FrameTime, surface: &mut dyn Surface);
}

/// An effect bound to the surface it draws on, ready to be registered with
/// the lifecycle controller.
pub struct Bound<E: Effect, S: Surface> {
    effect: Rc<RefCell<E>>,
    surface: S,
}

impl<E: Effect, S: Surface> Bound<E, S> {
    pub fn new(effect: Rc<RefCell<E>>, surface: S) -> Self {
        Self { effect, surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<E: Effect, S: Surface> Animation for Bound<E, S> {
    fn start(&mut self, now: f64) {
        self.effect.borrow_mut().start(now);
    }

    fn stop(&mut self) {
        self.effect.borrow_mut().stop();
    }

    fn frame(&mut self, time: FrameTime) {
        self.effect.borrow_mut().frame(time, &mut self.surface);
    }
}
