//! Visibility-gated frame scheduling.
//!
//! Each registered animation owns at most one pending frame request. Going
//! invisible cancels that request outright instead of leaving a callback
//! scheduled that would have to check a flag.

use crate::effect::FrameTime;

/// Largest `dt` handed to an animation; longer gaps (tab switches, stalls)
/// are treated as a single slow frame.
const MAX_FRAME_DT: f32 = 0.1;
const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

pub type EffectId = usize;

/// Opaque handle of a scheduled frame, as returned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// The host's "call me on the next frame" primitive.
pub trait FrameHost {
    /// Schedules one frame callback for `id`. `None` when the host cannot
    /// schedule (no window); the animation then stays inert.
    fn request_frame(&mut self, id: EffectId) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait Animation {
    fn start(&mut self, _now: f64) {}
    fn stop(&mut self) {}
    fn frame(&mut self, time: FrameTime);
}

struct Slot {
    name: &'static str,
    animation: Box<dyn Animation>,
    running: bool,
    pending: Option<FrameHandle>,
    last_frame: Option<f64>,
}

pub struct LifecycleController<H: FrameHost> {
    host: H,
    slots: Vec<Slot>,
}

impl<H: FrameHost> LifecycleController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            slots: Vec::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, animation: Box<dyn Animation>) -> EffectId {
        self.slots.push(Slot {
            name,
            animation,
            running: false,
            pending: None,
            last_frame: None,
        });
        log::debug!("[lifecycle] registered {} as #{}", name, self.slots.len() - 1);
        self.slots.len() - 1
    }

    pub fn set_visible(&mut self, id: EffectId, visible: bool, now: f64) {
        if visible {
            self.start(id, now);
        } else {
            self.stop(id);
        }
    }

    /// Starts the animation and schedules its first frame. No-op when it is
    /// already running.
    pub fn start(&mut self, id: EffectId, now: f64) {
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };
        if slot.running {
            return;
        }
        slot.running = true;
        slot.last_frame = None;
        slot.animation.start(now);
        if slot.pending.is_none() {
            slot.pending = self.host.request_frame(id);
        }
        log::debug!("[lifecycle] start {}", slot.name);
    }

    /// Stops the animation and cancels its pending frame.
    pub fn stop(&mut self, id: EffectId) {
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };
        if !slot.running {
            return;
        }
        slot.running = false;
        if let Some(handle) = slot.pending.take() {
            self.host.cancel_frame(handle);
        }
        slot.animation.stop();
        log::debug!("[lifecycle] stop {}", slot.name);
    }

    pub fn stop_all(&mut self) {
        for id in 0..self.slots.len() {
            self.stop(id);
        }
    }

    /// Host callback: runs one frame and re-requests exactly one more while
    /// the animation is still running.
    pub fn on_frame(&mut self, id: EffectId, now: f64) {
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };
        slot.pending = None;
        if !slot.running {
            return;
        }
        let dt = match slot.last_frame {
            Some(last) => ((now - last) as f32).clamp(0.0, MAX_FRAME_DT),
            None => FIRST_FRAME_DT,
        };
        slot.last_frame = Some(now);
        slot.animation.frame(FrameTime::new(now, dt));
        if slot.running && slot.pending.is_none() {
            slot.pending = self.host.request_frame(id);
        }
    }

    pub fn is_running(&self, id: EffectId) -> bool {
        self.slots.get(id).is_some_and(|s| s.running)
    }

    pub fn pending_frame(&self, id: EffectId) -> Option<FrameHandle> {
        self.slots.get(id).and_then(|s| s.pending)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
