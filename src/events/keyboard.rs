use crate::dom;
use myo_core::{EventBus, InputEvent};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Forwards every key press on the document to the page bus.
pub fn wire_global_keydown(document: &web::Document, bus: Rc<RefCell<EventBus>>) {
    dom::listen(document, "keydown", move |ev: web::KeyboardEvent| {
        if ev.repeat() {
            return;
        }
        bus.borrow_mut().emit(&InputEvent::KeyDown(ev.key()));
    });
}
