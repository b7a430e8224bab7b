use crate::canvas::CanvasSurface;
use crate::dom;
use glam::Vec2;
use myo_core::{EventBus, InputEvent};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Everything the pointer listeners of one canvas need.
#[derive(Clone)]
pub struct InputWiring {
    /// Element receiving the pointer events, usually the canvas's section so
    /// overlaid content does not swallow them.
    pub target: web::Element,
    pub surface: CanvasSurface,
    pub bus: Rc<RefCell<EventBus>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
    wire_click(&w);
    wire_resize(&w);
}

fn canvas_point(w: &InputWiring, ev: &web::MouseEvent) -> Vec2 {
    dom::local_point(w.surface.canvas(), ev)
}

fn wire_pointermove(w: &InputWiring) {
    let w2 = w.clone();
    dom::listen(&w.target, "mousemove", move |ev: web::MouseEvent| {
        let p = canvas_point(&w2, &ev);
        w2.bus.borrow_mut().emit(&InputEvent::PointerMove(p));
    });
}

fn wire_pointerleave(w: &InputWiring) {
    let w2 = w.clone();
    dom::listen(&w.target, "mouseleave", move |_: web::MouseEvent| {
        w2.bus.borrow_mut().emit(&InputEvent::PointerLeave);
    });
}

fn wire_click(w: &InputWiring) {
    let w2 = w.clone();
    dom::listen(&w.target, "click", move |ev: web::MouseEvent| {
        let p = canvas_point(&w2, &ev);
        log::debug!("[click] canvas=({:.0},{:.0})", p.x, p.y);
        w2.bus.borrow_mut().emit(&InputEvent::Click(p));
    });
}

fn wire_resize(w: &InputWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let w2 = w.clone();
    dom::listen(&window, "resize", move |_: web::Event| {
        let size = w2.surface.sync_size();
        w2.bus.borrow_mut().emit(&InputEvent::Resize(size));
    });
}
