// Browser smoke tests for the canvas surface and a live effect frame.
// Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use glam::Vec2;
use myo_core::{Effect, FrameTime, GridConfig, GridDistortion, Rgba, Stroke, Surface};
use myo_web::CanvasSurface;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(width: u32, height: u32) -> web::HtmlCanvasElement {
    let document = web::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web::HtmlCanvasElement>()
        .unwrap();
    canvas
        .set_attribute("style", &format!("width: {}px; height: {}px", width, height))
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn surface_reports_css_size() {
    let surface = CanvasSurface::new(canvas(320, 200)).unwrap();
    assert_eq!(surface.size(), Vec2::new(320.0, 200.0));
    assert!(surface.canvas().width() >= 320);
}

#[wasm_bindgen_test]
fn stroke_leaves_pixels() {
    let mut surface = CanvasSurface::new(canvas(64, 64)).unwrap();
    surface.clear();
    surface.begin_path();
    surface.move_to(Vec2::new(0.0, 32.0));
    surface.line_to(Vec2::new(64.0, 32.0));
    surface.stroke(&Stroke::solid(Rgba::rgb(0, 0, 0), 6.0));
    surface.set_blur(0.0);
    surface.set_shadow(None);
}

#[wasm_bindgen_test]
fn grid_frame_runs_on_canvas() {
    let mut surface = CanvasSurface::new(canvas(200, 120)).unwrap();
    let mut grid = GridDistortion::new(GridConfig::default()).unwrap();
    grid.resize(surface.size());
    grid.frame(FrameTime::new(0.0, 1.0 / 60.0), &mut surface);
}
