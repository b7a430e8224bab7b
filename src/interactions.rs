//! DOM glue for the page's non-canvas interactions. The maths lives in
//! `myo_core::interactions`; this module only reads layout and writes
//! styles and classes.

use crate::constants::*;
use crate::dom;
use crate::events::visibility::{self, ObserverOptions};
use glam::Vec2;
use myo_core::interactions::{
    anchor_scroll_target, dry_brush_streaks, magnetic_offset, nav_condensed, scroll_progress,
    tilt, ParallaxOrbs, SubmitPhase,
};
use myo_core::{Animation, FrameTime};
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn scroll_y(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

fn viewport(window: &web::Window) -> Vec2 {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(w as f32, h as f32)
}

fn client_point(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn rect_of(el: &web::Element) -> (Vec2, Vec2) {
    let rect = el.get_bounding_client_rect();
    (
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

fn after_ms(window: &web::Window, ms: i32, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        ms,
    );
}

pub fn wire_reveals(document: &web::Document) -> anyhow::Result<()> {
    visibility::reveal_once(
        &dom::query_all(document, REVEAL_SELECTOR),
        ObserverOptions {
            threshold: REVEAL_THRESHOLD,
            root_margin: Some(REVEAL_ROOT_MARGIN),
        },
        REVEAL_CLASS,
    )?;
    visibility::reveal_once(
        &dom::query_all(document, TEXT_REVEAL_SELECTOR),
        ObserverOptions {
            threshold: TEXT_REVEAL_THRESHOLD,
            root_margin: None,
        },
        TEXT_REVEAL_CLASS,
    )
}

pub fn wire_smooth_scroll(document: &web::Document, window: &web::Window) {
    for anchor in dom::query_all(document, ANCHOR_SELECTOR) {
        let document = document.clone();
        let window = window.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        dom::listen(&anchor, "click", move |ev: web::MouseEvent| {
            ev.prevent_default();
            // a bare "#" is not a valid selector
            let Some(target) = document.query_selector(&href).ok().flatten() else {
                return;
            };
            let nav_height = dom::query_html(&document, NAV_SELECTOR)
                .map(|nav| nav.offset_height() as f32)
                .unwrap_or(0.0);
            let top = anchor_scroll_target(
                target.get_bounding_client_rect().top() as f32,
                scroll_y(&window),
                nav_height,
            );
            let options = web::ScrollToOptions::new();
            options.set_top(top as f64);
            options.set_behavior(web::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        });
    }
}

/// Nav background switches past the condense threshold. Scroll events are
/// coalesced so the style is written at most once per frame.
pub fn wire_nav_scroll(document: &web::Document, window: &web::Window) {
    let Some(nav) = dom::query_html(document, NAV_SELECTOR) else {
        log::debug!("[nav] no {} element", NAV_SELECTOR);
        return;
    };
    let latest = Rc::new(Cell::new(0.0_f32));
    let ticking = Rc::new(Cell::new(false));
    let window2 = window.clone();
    dom::listen(window, "scroll", move |_: web::Event| {
        latest.set(scroll_y(&window2));
        if ticking.get() {
            return;
        }
        let nav = nav.clone();
        let latest = latest.clone();
        let ticking_done = ticking.clone();
        let update = Closure::once_into_js(move || {
            if nav_condensed(latest.get()) {
                dom::set_style(&nav, "background", NAV_BACKGROUND_CONDENSED);
                dom::set_style(&nav, "box-shadow", NAV_SHADOW_CONDENSED);
            } else {
                dom::set_style(&nav, "background", NAV_BACKGROUND);
                dom::set_style(&nav, "box-shadow", "none");
            }
            ticking_done.set(false);
        });
        if window2.request_animation_frame(update.unchecked_ref()).is_ok() {
            ticking.set(true);
        }
    });
}

pub fn wire_scroll_progress(document: &web::Document, window: &web::Window) -> anyhow::Result<()> {
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    let indicator = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    indicator.set_class_name(PROGRESS_CLASS);
    let bar = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    bar.set_class_name(PROGRESS_BAR_CLASS);
    indicator
        .append_child(&bar)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    body.append_child(&indicator)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let document = document.clone();
    let window2 = window.clone();
    dom::listen(window, "scroll", move |_: web::Event| {
        let doc_height = document
            .document_element()
            .map(|el| el.scroll_height() as f32)
            .unwrap_or(0.0);
        let percent = scroll_progress(scroll_y(&window2), doc_height, viewport(&window2).y);
        dom::set_style(&bar, "width", &format!("{:.2}%", percent));
    });
    Ok(())
}

pub fn wire_magnetic_buttons(document: &web::Document) {
    for button in dom::query_all(document, MAGNETIC_SELECTOR) {
        let Ok(button) = button.dyn_into::<web::HtmlElement>() else {
            continue;
        };
        let b = button.clone();
        dom::listen(&button, "mousemove", move |ev: web::MouseEvent| {
            let (origin, size) = rect_of(&b);
            let offset = magnetic_offset(client_point(&ev), origin, size);
            dom::set_style(
                &b,
                "transform",
                &format!("translate({:.2}px, {:.2}px)", offset.x, offset.y),
            );
        });
        let b = button.clone();
        dom::listen(&button, "mouseleave", move |_: web::MouseEvent| {
            dom::set_style(&b, "transform", "");
        });
    }
}

pub fn wire_enso_tilt(document: &web::Document) {
    let Some(circle) = dom::query_html(document, ENSO_SELECTOR) else {
        log::debug!("[enso] no {} element", ENSO_SELECTOR);
        return;
    };
    let hovering = Rc::new(Cell::new(false));

    let (c, h) = (circle.clone(), hovering.clone());
    dom::listen(&circle, "mouseenter", move |_: web::MouseEvent| {
        h.set(true);
        dom::set_style(&c, "animation-play-state", "paused");
    });
    let (c, h) = (circle.clone(), hovering.clone());
    dom::listen(&circle, "mouseleave", move |_: web::MouseEvent| {
        h.set(false);
        dom::set_style(&c, "animation-play-state", "running");
        dom::set_style(&c, "transform", "");
    });
    let c = circle.clone();
    dom::listen(&circle, "mousemove", move |ev: web::MouseEvent| {
        if !hovering.get() {
            return;
        }
        let (origin, size) = rect_of(&c);
        dom::set_style(&c, "transform", &tilt(client_point(&ev), origin, size).css());
    });
}

pub fn insert_dry_brush_streaks<R: Rng>(document: &web::Document, rng: &mut R) -> anyhow::Result<()> {
    let Some(container) = document
        .query_selector(STREAK_CONTAINER_SELECTOR)
        .ok()
        .flatten()
    else {
        log::debug!("[streaks] no {} container", STREAK_CONTAINER_SELECTOR);
        return Ok(());
    };
    let streaks = dry_brush_streaks(rng);
    for streak in &streaks {
        let path = document
            .create_element_ns(Some(SVG_NS), "path")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        _ = path.set_attribute("d", &streak.path_data());
        _ = path.class_list().add_1(STREAK_CLASS);
        _ = path.set_attribute(
            "style",
            &format!(
                "stroke-width: {:.2}px; animation-delay: {:.3}s; --streak-opacity: {:.3}",
                streak.width, streak.delay, streak.opacity
            ),
        );
        container
            .append_child(&path)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    log::debug!("[streaks] inserted {}", streaks.len());
    Ok(())
}

struct SubmitButton {
    window: web::Window,
    form: web::HtmlFormElement,
    button: web::HtmlButtonElement,
    original: String,
    phase: Cell<SubmitPhase>,
}

fn enter_phase(submit: Rc<SubmitButton>, phase: SubmitPhase) {
    submit.phase.set(phase);
    let button = &submit.button;
    match phase {
        SubmitPhase::Idle => {
            button.set_inner_html(&submit.original);
            button.set_disabled(false);
            dom::set_style(button, "opacity", "1");
            dom::set_style(button, "background", "");
        }
        SubmitPhase::Sending => {
            let label = phase.label().unwrap_or_default();
            button.set_inner_html(&format!("<span>{}</span>{}", label, SENDING_ICON));
            button.set_disabled(true);
            dom::set_style(button, "opacity", SUBMIT_BUSY_OPACITY);
        }
        SubmitPhase::Sent => {
            let label = phase.label().unwrap_or_default();
            button.set_inner_html(&format!("<span>{}</span>{}", label, SENT_ICON));
            dom::set_style(button, "background", SUBMIT_SENT_BACKGROUND);
            submit.form.reset();
        }
    }
    if let Some(ms) = phase.hold_ms() {
        let window = submit.window.clone();
        after_ms(&window, ms, move || enter_phase(submit, phase.next()));
    }
}

/// Focus nudges and a mocked submit that cycles through [`SubmitPhase`].
pub fn wire_contact_form(document: &web::Document, window: &web::Window) {
    let Some(form) = document
        .get_element_by_id(CONTACT_FORM_ID)
        .and_then(|el| el.dyn_into::<web::HtmlFormElement>().ok())
    else {
        log::debug!("[form] no #{}", CONTACT_FORM_ID);
        return;
    };

    if let Ok(fields) = form.query_selector_all(FORM_FIELD_SELECTOR) {
        for field in (0..fields.length()).filter_map(|i| fields.item(i)) {
            let Some(group) = field
                .dyn_ref::<web::Element>()
                .and_then(|el| el.closest(FORM_GROUP_SELECTOR).ok().flatten())
                .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
            else {
                continue;
            };
            let g = group.clone();
            dom::listen(&field, "focus", move |_: web::Event| {
                dom::set_style(&g, "transform", FORM_FOCUS_SHIFT);
            });
            dom::listen(&field, "blur", move |_: web::Event| {
                dom::set_style(&group, "transform", "translateX(0)");
            });
        }
    }

    let Some(button) = form
        .query_selector(SUBMIT_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlButtonElement>().ok())
    else {
        log::debug!("[form] no submit button");
        return;
    };
    let submit = Rc::new(SubmitButton {
        window: window.clone(),
        form: form.clone(),
        original: button.inner_html(),
        button,
        phase: Cell::new(SubmitPhase::Idle),
    });
    dom::listen(&form, "submit", move |ev: web::Event| {
        ev.prevent_default();
        if submit.phase.get() != SubmitPhase::Idle {
            return;
        }
        enter_phase(submit.clone(), SubmitPhase::Idle.next());
    });
}

/// Ambient orbs easing toward the pointer; runs under the lifecycle
/// controller like the canvas effects.
pub struct OrbParallax {
    orbs: Vec<web::HtmlElement>,
    state: Rc<RefCell<ParallaxOrbs>>,
}

impl OrbParallax {
    /// `None` when the page has no orbs.
    pub fn mount(document: &web::Document, window: &web::Window) -> Option<Self> {
        let orbs: Vec<web::HtmlElement> = dom::query_all(document, ORB_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<web::HtmlElement>().ok())
            .collect();
        if orbs.is_empty() {
            return None;
        }
        let state = Rc::new(RefCell::new(ParallaxOrbs::default()));
        let s = state.clone();
        let window2 = window.clone();
        dom::listen(document, "mousemove", move |ev: web::MouseEvent| {
            s.borrow_mut().on_pointer(client_point(&ev), viewport(&window2));
        });
        Some(Self { orbs, state })
    }
}

impl Animation for OrbParallax {
    fn frame(&mut self, _time: FrameTime) {
        let mut state = self.state.borrow_mut();
        state.tick();
        for (i, orb) in self.orbs.iter().enumerate() {
            let offset = state.offset(i);
            dom::set_style(
                orb,
                "transform",
                &format!("translate({:.2}px, {:.2}px)", offset.x, offset.y),
            );
        }
    }
}
