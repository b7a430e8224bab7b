use instant::Instant;
use myo_core::{EffectId, FrameHandle, FrameHost, LifecycleController};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Seconds since the page controller started.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

pub type Controller = Rc<RefCell<LifecycleController<RafHost>>>;

/// `requestAnimationFrame` host. Each effect gets one callback closure,
/// created on its first request and reused for every frame after that.
pub struct RafHost {
    window: web::Window,
    clock: Clock,
    controller: Weak<RefCell<LifecycleController<RafHost>>>,
    callbacks: Vec<Option<Closure<dyn FnMut()>>>,
}

impl RafHost {
    fn callback(&mut self, id: EffectId) -> &Closure<dyn FnMut()> {
        if self.callbacks.len() <= id {
            self.callbacks.resize_with(id + 1, || None);
        }
        let controller = self.controller.clone();
        let clock = self.clock;
        self.callbacks[id].get_or_insert_with(move || {
            Closure::wrap(Box::new(move || {
                if let Some(controller) = controller.upgrade() {
                    controller.borrow_mut().on_frame(id, clock.now());
                }
            }) as Box<dyn FnMut()>)
        })
    }
}

impl FrameHost for RafHost {
    fn request_frame(&mut self, id: EffectId) -> Option<FrameHandle> {
        let window = self.window.clone();
        let callback = self.callback(id);
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => Some(FrameHandle(handle)),
            Err(e) => {
                log::error!("[frame] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0);
    }
}

/// Builds the lifecycle controller with a host that can call back into it.
pub fn controller(window: web::Window, clock: Clock) -> Controller {
    Rc::new_cyclic(|weak| {
        RefCell::new(LifecycleController::new(RafHost {
            window,
            clock,
            controller: weak.clone(),
            callbacks: Vec::new(),
        }))
    })
}
