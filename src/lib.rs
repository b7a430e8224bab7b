#![cfg(target_arch = "wasm32")]
//! Browser front-end for the Myo Labs site: binds the `myo-core` effects to
//! canvases and SVG, drives them with `requestAnimationFrame`, and wires the
//! page's DOM interactions.

use wasm_bindgen::prelude::*;

mod canvas;
mod constants;
mod diagram;
mod dom;
mod events;
mod frame;
mod interactions;
mod konami;
mod page;

pub use canvas::CanvasSurface;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("myo-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    if document.ready_state() == "loading" {
        dom::listen(&document, "DOMContentLoaded", |_: web_sys::Event| {
            if let Err(e) = mount() {
                log::error!("init error: {:?}", e);
            }
        });
        return Ok(());
    }
    mount()
}

fn mount() -> anyhow::Result<()> {
    let mut page = page::PageController::new()?;
    page.mount_all();
    // the controller lives for the rest of the page, like the listeners it wired
    std::mem::forget(page);
    Ok(())
}
