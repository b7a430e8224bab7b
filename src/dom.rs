use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Every element matching `selector`, in document order. A bad selector
/// yields nothing.
pub fn query_all(root: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::debug!("[dom] bad selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn query_html(root: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

/// Attaches `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Client coordinates of `ev` relative to the top-left of `el`.
pub fn local_point(el: &web::Element, ev: &web::MouseEvent) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
    )
}

/// Matches the canvas backing store to its CSS box at the current device
/// pixel ratio and scales the context so drawing stays in CSS pixels.
/// Returns the CSS size.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
) -> Vec2 {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

pub fn inject_styles(document: &web::Document, css: &str) -> anyhow::Result<()> {
    let style = document
        .create_element("style")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    style.set_text_content(Some(css));
    let head = document.head().ok_or_else(|| anyhow::anyhow!("no <head>"))?;
    head.append_child(&style)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
