//! SVG rendering of the ownership diagram. The scene graph is built once and
//! its attributes are rewritten every frame from the simulation.

use crate::constants::SVG_NS;
use crate::dom;
use glam::Vec2;
use myo_core::constants::{INK, SAGE, TERRACOTTA};
use myo_core::{Animation, ForceDiagram, FrameTime, Rgba};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

struct NodeView {
    group: web::Element,
    circle: web::Element,
    label: web::Element,
}

pub struct DiagramScene {
    diagram: Rc<RefCell<ForceDiagram>>,
    edges: Vec<web::Element>,
    nodes: Vec<NodeView>,
    markers: Vec<web::Element>,
}

fn svg_el(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document
        .create_element_ns(Some(SVG_NS), tag)
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

fn set(el: &web::Element, name: &str, value: &str) {
    _ = el.set_attribute(name, value);
}

fn set_num(el: &web::Element, name: &str, value: f32) {
    set(el, name, &format!("{:.2}", value));
}

fn mix(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgba {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
        a: a.a + (b.a - a.a) * t,
    }
}

fn svg_size(svg: &web::Element) -> Vec2 {
    let rect = svg.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

impl DiagramScene {
    pub fn mount(
        document: &web::Document,
        svg: &web::Element,
        diagram: Rc<RefCell<ForceDiagram>>,
    ) -> anyhow::Result<Self> {
        let size = svg_size(svg);
        diagram.borrow_mut().resize(size);
        set(svg, "viewBox", &format!("0 0 {:.0} {:.0}", size.x, size.y));

        let edge_layer = svg_el(document, "g")?;
        let marker_layer = svg_el(document, "g")?;
        let node_layer = svg_el(document, "g")?;
        for layer in [&edge_layer, &marker_layer, &node_layer] {
            svg.append_child(layer)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }

        let d = diagram.borrow();
        let mut edges = Vec::with_capacity(d.edges().len());
        let mut markers = Vec::with_capacity(d.edges().len());
        for _ in d.edges() {
            let line = svg_el(document, "line")?;
            set(&line, "stroke", &SAGE.with_alpha(0.5).css());
            set(&line, "stroke-width", "1.5");
            edge_layer
                .append_child(&line)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            edges.push(line);

            let marker = svg_el(document, "circle")?;
            set(&marker, "r", "4");
            set(&marker, "fill", &TERRACOTTA.css());
            set(&marker, "opacity", "0");
            marker_layer
                .append_child(&marker)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            markers.push(marker);
        }

        let mut nodes = Vec::with_capacity(d.nodes().len());
        for node in d.nodes() {
            let group = svg_el(document, "g")?;
            let circle = svg_el(document, "circle")?;
            set_num(&circle, "r", node.radius);
            set(&circle, "fill", "#faf8f5");
            set(&circle, "stroke", &INK.css());
            set(&circle, "stroke-width", "1.5");
            let label = svg_el(document, "text")?;
            set(&label, "text-anchor", "middle");
            set(&label, "dominant-baseline", "central");
            set(&label, "fill", &INK.css());
            label.set_text_content(Some(&node.label));
            group
                .append_child(&circle)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            group
                .append_child(&label)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            node_layer
                .append_child(&group)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            nodes.push(NodeView {
                group,
                circle,
                label,
            });
        }
        drop(d);

        let scene = Self {
            diagram,
            edges,
            nodes,
            markers,
        };
        scene.wire_hover();
        scene.wire_resize(svg);
        log::info!(
            "[diagram] mounted {} nodes, {} edges",
            scene.nodes.len(),
            scene.edges.len()
        );
        Ok(scene)
    }

    fn wire_hover(&self) {
        for (i, view) in self.nodes.iter().enumerate() {
            let diagram = self.diagram.clone();
            dom::listen(&view.group, "mouseenter", move |_: web::MouseEvent| {
                diagram.borrow_mut().set_hover(Some(i));
            });
            let diagram = self.diagram.clone();
            dom::listen(&view.group, "mouseleave", move |_: web::MouseEvent| {
                let mut d = diagram.borrow_mut();
                if d.hovered() == Some(i) {
                    d.set_hover(None);
                }
            });
        }
    }

    fn wire_resize(&self, svg: &web::Element) {
        let Some(window) = web::window() else {
            return;
        };
        let diagram = self.diagram.clone();
        let svg = svg.clone();
        dom::listen(&window, "resize", move |_: web::Event| {
            let size = svg_size(&svg);
            set(&svg, "viewBox", &format!("0 0 {:.0} {:.0}", size.x, size.y));
            diagram.borrow_mut().resize(size);
        });
    }

    fn render(&self, now: f64) {
        let d = self.diagram.borrow();
        let nodes = d.nodes();
        for (line, edge) in self.edges.iter().zip(d.edges()) {
            let (a, b) = (nodes[edge.source].position, nodes[edge.target].position);
            set_num(line, "x1", a.x);
            set_num(line, "y1", a.y);
            set_num(line, "x2", b.x);
            set_num(line, "y2", b.y);
        }
        for (view, node) in self.nodes.iter().zip(nodes) {
            set_num(&view.circle, "cx", node.position.x);
            set_num(&view.circle, "cy", node.position.y);
            set_num(&view.label, "x", node.position.x);
            set_num(&view.label, "y", node.position.y);
            let color = mix(INK, TERRACOTTA, node.highlight).css();
            set(&view.circle, "stroke", &color);
            set(&view.label, "fill", &color);
        }

        for marker in &self.markers {
            set(marker, "opacity", "0");
        }
        for state in d.marker_states(now) {
            if let Some(marker) = self.markers.get(state.edge) {
                set_num(marker, "cx", state.position.x);
                set_num(marker, "cy", state.position.y);
                set_num(marker, "opacity", state.opacity);
            }
        }
    }
}

impl Animation for DiagramScene {
    fn frame(&mut self, time: FrameTime) {
        self.diagram.borrow_mut().advance(time);
        self.render(time.now);
    }
}
