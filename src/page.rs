//! The page controller: built once at startup, owns every piece of page
//! state (lifecycle controller, event buses, Easter-egg matcher, injected
//! styles) and wires the DOM into it.

use crate::canvas::CanvasSurface;
use crate::constants::*;
use crate::diagram::DiagramScene;
use crate::dom;
use crate::events::keyboard;
use crate::events::pointer::{wire_input_handlers, InputWiring};
use crate::events::visibility::{self, ObserverOptions};
use crate::frame::{self, Clock, Controller};
use crate::interactions;
use crate::konami::SequenceMatcher;
use myo_core::{
    Bound, ConfigError, DiagramConfig, Effect, EffectId, EventBus, EventKind, ForceDiagram,
    GridConfig, GridDistortion, InputEvent, MyceliumConfig, MyceliumField, NetworkConfig,
    NetworkGraph, WaveConfig, WaveField,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const FORWARDED: [EventKind; 5] = [
    EventKind::PointerMove,
    EventKind::PointerLeave,
    EventKind::Click,
    EventKind::Resize,
    EventKind::Visibility,
];

pub struct PageController {
    window: web::Window,
    document: web::Document,
    clock: Clock,
    controller: Controller,
    rng: StdRng,
    /// One bus per mounted canvas.
    buses: Vec<Rc<RefCell<EventBus>>>,
    /// Document-level input (key presses).
    page_bus: Rc<RefCell<EventBus>>,
    konami: Rc<RefCell<SequenceMatcher>>,
    styles_injected: bool,
    observers: Vec<(web::IntersectionObserver, web::Element)>,
    /// Parallax runs whenever the page is shown, not per section.
    orbs: Option<EffectId>,
}

fn page_seed(clock: &Clock) -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("[page] getrandom failed ({}), seeding from the clock", e);
            clock.now().to_bits()
        }
    }
}

impl PageController {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let clock = Clock::start();
        let seed = page_seed(&clock);
        log::info!("[page] seed={:#018x}", seed);
        Ok(Self {
            controller: frame::controller(window.clone(), clock),
            window,
            document,
            clock,
            rng: StdRng::seed_from_u64(seed),
            buses: Vec::new(),
            page_bus: Rc::new(RefCell::new(EventBus::new())),
            konami: Rc::new(RefCell::new(SequenceMatcher::new(&KONAMI_SEQUENCE))),
            styles_injected: false,
            observers: Vec::new(),
            orbs: None,
        })
    }

    /// Mounts everything the page has markup for. Each piece is optional;
    /// a failure in one is logged and the rest still mount.
    pub fn mount_all(&mut self) {
        self.inject_styles();

        let grid = self.mount_canvas(GRID_CANVAS_ID, |_| {
            GridDistortion::new(GridConfig::default())
        });
        let mycelium = self.mount_canvas(MYCELIUM_CANVAS_ID, |seed| {
            MyceliumField::new(MyceliumConfig::default(), seed)
        });
        let waves = self.mount_canvas(WAVE_CANVAS_ID, |seed| {
            WaveField::new(WaveConfig::default(), seed)
        });
        let network = self.mount_canvas(NETWORK_CANVAS_ID, |seed| {
            NetworkGraph::new(NetworkConfig::default(), seed)
        });
        for (name, result) in [
            ("grid", grid),
            ("mycelium", mycelium),
            ("waves", waves),
            ("network", network),
        ] {
            if let Err(e) = result {
                log::error!("[page] {} failed to mount: {:?}", name, e);
            }
        }
        if let Err(e) = self.mount_diagram() {
            log::error!("[page] diagram failed to mount: {:?}", e);
        }

        self.mount_orbs();
        if let Err(e) = interactions::wire_reveals(&self.document) {
            log::error!("[page] reveal observers: {:?}", e);
        }
        interactions::wire_smooth_scroll(&self.document, &self.window);
        interactions::wire_nav_scroll(&self.document, &self.window);
        if let Err(e) = interactions::wire_scroll_progress(&self.document, &self.window) {
            log::error!("[page] scroll progress: {:?}", e);
        }
        interactions::wire_magnetic_buttons(&self.document);
        interactions::wire_enso_tilt(&self.document);
        interactions::wire_contact_form(&self.document, &self.window);
        if let Err(e) = interactions::insert_dry_brush_streaks(&self.document, &mut self.rng) {
            log::error!("[page] dry brush streaks: {:?}", e);
        }

        self.wire_easter_egg();
        self.wire_page_transitions();
        log::info!(
            "[page] mounted {} animations across {} canvases",
            self.controller.borrow().len(),
            self.buses.len()
        );
    }

    fn inject_styles(&mut self) {
        if self.styles_injected {
            return;
        }
        match dom::inject_styles(&self.document, INJECTED_STYLES) {
            Ok(()) => self.styles_injected = true,
            Err(e) => log::error!("[page] style injection failed: {:?}", e),
        }
    }

    /// Binds one canvas effect: builds it at the canvas size, routes the
    /// canvas's input through a fresh bus, registers it with the lifecycle
    /// controller and starts/stops it with its section's visibility.
    fn mount_canvas<E: Effect + 'static>(
        &mut self,
        canvas_id: &str,
        build: impl FnOnce(u64) -> Result<E, ConfigError>,
    ) -> anyhow::Result<Option<EffectId>> {
        let Some(canvas) = self
            .document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
        else {
            log::debug!("[page] no #{} canvas, skipping", canvas_id);
            return Ok(None);
        };
        let surface = CanvasSurface::new(canvas.clone())?;
        let mut effect = match build(self.rng.gen()) {
            Ok(effect) => effect,
            Err(e) => {
                log::warn!("[page] #{} rejected its configuration: {}", canvas_id, e);
                return Ok(None);
            }
        };
        effect.resize(surface.size());
        let name = effect.name();
        let effect = Rc::new(RefCell::new(effect));

        let bus = Rc::new(RefCell::new(EventBus::new()));
        for kind in FORWARDED {
            let effect = effect.clone();
            bus.borrow_mut()
                .subscribe(kind, move |event| effect.borrow_mut().handle_input(event));
        }
        let section: web::Element = canvas
            .parent_element()
            .unwrap_or_else(|| canvas.clone().into());
        wire_input_handlers(InputWiring {
            target: section.clone(),
            surface: surface.clone(),
            bus: bus.clone(),
        });

        let id = self
            .controller
            .borrow_mut()
            .register(name, Box::new(Bound::new(effect, surface)));
        self.observe_section(id, &section, Some(bus.clone()))?;
        self.buses.push(bus);
        log::info!("[page] mounted {} on #{}", name, canvas_id);
        Ok(Some(id))
    }

    fn observe_section(
        &mut self,
        id: EffectId,
        section: &web::Element,
        bus: Option<Rc<RefCell<EventBus>>>,
    ) -> anyhow::Result<()> {
        let controller = self.controller.clone();
        let clock = self.clock;
        let observer = visibility::observe(
            std::slice::from_ref(section),
            ObserverOptions {
                threshold: SECTION_VISIBILITY_THRESHOLD,
                root_margin: None,
            },
            move |entry, _| {
                let visible = entry.is_intersecting();
                controller
                    .borrow_mut()
                    .set_visible(id, visible, clock.now());
                if let Some(bus) = &bus {
                    bus.borrow_mut().emit(&InputEvent::Visibility(visible));
                }
            },
        )?;
        self.observers.push((observer, section.clone()));
        Ok(())
    }

    fn mount_diagram(&mut self) -> anyhow::Result<()> {
        let Some(svg) = self.document.get_element_by_id(DIAGRAM_SVG_ID) else {
            log::debug!("[page] no #{} svg, skipping", DIAGRAM_SVG_ID);
            return Ok(());
        };
        let diagram = match ForceDiagram::new(DiagramConfig::default()) {
            Ok(d) => Rc::new(RefCell::new(d)),
            Err(e) => {
                log::warn!("[page] diagram rejected its configuration: {}", e);
                return Ok(());
            }
        };
        let scene = DiagramScene::mount(&self.document, &svg, diagram)?;
        let id = self
            .controller
            .borrow_mut()
            .register("diagram", Box::new(scene));
        let section = svg.parent_element().unwrap_or(svg);
        self.observe_section(id, &section, None)
    }

    fn mount_orbs(&mut self) {
        let Some(orbs) = interactions::OrbParallax::mount(&self.document, &self.window) else {
            log::debug!("[page] no {} elements, skipping parallax", ORB_SELECTOR);
            return;
        };
        let mut controller = self.controller.borrow_mut();
        let id = controller.register("orbs", Box::new(orbs));
        controller.start(id, self.clock.now());
        self.orbs = Some(id);
    }

    fn wire_easter_egg(&mut self) {
        let matcher = self.konami.clone();
        let document = self.document.clone();
        self.page_bus
            .borrow_mut()
            .subscribe(EventKind::KeyDown, move |event| {
                let InputEvent::KeyDown(key) = event else {
                    return;
                };
                if !matcher.borrow_mut().push(key) {
                    return;
                }
                if let Some(body) = document.body() {
                    let on = body.class_list().toggle(SPORES_CLASS).unwrap_or(false);
                    log::info!("[easter] spores {}", if on { "on" } else { "off" });
                }
            });
        keyboard::wire_global_keydown(&self.document, self.page_bus.clone());
    }

    /// Stops every animation when the page is hidden. On a back/forward cache
    /// restore the sections are re-observed so visible ones start again.
    fn wire_page_transitions(&self) {
        let controller = self.controller.clone();
        dom::listen(&self.window, "pagehide", move |_: web::Event| {
            controller.borrow_mut().stop_all();
            log::info!("[page] hidden, animations stopped");
        });

        let controller = self.controller.clone();
        let (clock, orbs) = (self.clock, self.orbs);
        let observers = self.observers.clone();
        dom::listen(&self.window, "pageshow", move |ev: web::PageTransitionEvent| {
            if !ev.persisted() {
                return;
            }
            // re-observing delivers a fresh entry for every section
            for (observer, section) in &observers {
                observer.unobserve(section);
                observer.observe(section);
            }
            if let Some(id) = orbs {
                controller.borrow_mut().start(id, clock.now());
            }
        });
    }
}
