//! Star-shaped ownership diagram laid out by a small force simulation.
//!
//! Node 0 is the hub and stays pinned at the center of the canvas; every
//! other node is a leaf linked to it. The simulation cools towards
//! `alpha_floor` instead of stopping so the layout keeps a faint drift.

use crate::constants::*;
use crate::ease::{smoothstep, Ease};
use crate::effect::FrameTime;
use crate::error::{self, ConfigError};
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

const COLLISION_PASSES: usize = 3;

#[derive(Clone, Debug)]
pub struct DiagramConfig {
    /// Hub label first, then one label per leaf.
    pub labels: Vec<String>,
    pub center_radius: f32,
    pub leaf_radius: f32,
    pub rest_length: f32,
    pub stiffness: f32,
    pub repulsion: f32,
    pub centering: f32,
    pub collision_margin: f32,
    pub velocity_decay: f32,
    pub alpha_decay: f32,
    pub alpha_floor: f32,
    pub marker_interval: f64,
    pub marker_duration: f64,
    pub marker_stagger: f64,
    pub marker_ease: Ease,
    /// Seconds for a hover highlight to fully switch on or off.
    pub hover_transition: f32,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            labels: ["Myo Labs", "Research", "Studio", "Ventures", "Commons", "Field"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            center_radius: 48.0,
            leaf_radius: 34.0,
            rest_length: DIAGRAM_REST_LENGTH,
            stiffness: DIAGRAM_STIFFNESS,
            repulsion: DIAGRAM_REPULSION,
            centering: DIAGRAM_CENTERING,
            collision_margin: DIAGRAM_COLLISION_MARGIN,
            velocity_decay: DIAGRAM_VELOCITY_DECAY,
            alpha_decay: DIAGRAM_ALPHA_DECAY,
            alpha_floor: DIAGRAM_ALPHA_FLOOR,
            marker_interval: DIAGRAM_MARKER_INTERVAL,
            marker_duration: DIAGRAM_MARKER_DURATION,
            marker_stagger: DIAGRAM_MARKER_STAGGER,
            marker_ease: Ease::InOutCubic,
            hover_transition: DIAGRAM_HOVER_TRANSITION,
        }
    }
}

impl DiagramConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.labels.len() < 2 {
            return Err(ConfigError::TooFew {
                field: "labels",
                len: self.labels.len(),
                min: 2,
            });
        }
        error::positive("center_radius", self.center_radius)?;
        error::positive("leaf_radius", self.leaf_radius)?;
        error::positive("rest_length", self.rest_length)?;
        error::within("stiffness", self.stiffness, 0.0, 1.0)?;
        error::within("velocity_decay", self.velocity_decay, 0.0, 1.0)?;
        error::within("alpha_decay", self.alpha_decay, 0.0, 1.0)?;
        error::within("alpha_floor", self.alpha_floor, 0.0, 1.0)?;
        error::positive("marker_interval", self.marker_interval as f32)?;
        error::positive("marker_duration", self.marker_duration as f32)?;
        error::positive("hover_transition", self.hover_transition)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiagramNode {
    pub label: String,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub pinned: bool,
    /// 0 idle, 1 fully highlighted.
    pub highlight: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagramEdge {
    pub source: usize,
    pub target: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub edge: usize,
    pub start: f64,
    pub duration: f64,
}

/// Where a marker is drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerState {
    pub edge: usize,
    pub position: Vec2,
    pub opacity: f32,
}

pub struct ForceDiagram {
    config: DiagramConfig,
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
    size: Vec2,
    alpha: f32,
    hover: Option<usize>,
    markers: Vec<Marker>,
    next_burst: Option<f64>,
}

impl ForceDiagram {
    pub fn new(config: DiagramConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let nodes = config
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| DiagramNode {
                label: label.clone(),
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
                radius: if i == 0 {
                    config.center_radius
                } else {
                    config.leaf_radius
                },
                pinned: i == 0,
                highlight: 0.0,
            })
            .collect::<Vec<_>>();
        let edges = (1..nodes.len())
            .map(|target| DiagramEdge { source: 0, target })
            .collect();
        Ok(Self {
            config,
            nodes,
            edges,
            size: Vec2::ZERO,
            alpha: 1.0,
            hover: None,
            markers: Vec::new(),
            next_burst: None,
        })
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover
    }

    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Lays the leaves out on a ring around the new center and reheats the
    /// simulation. In-flight markers are dropped.
    pub fn resize(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
        let center = self.center();
        let leaves = (self.nodes.len() - 1).max(1) as f32;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.velocity = Vec2::ZERO;
            node.position = if node.pinned {
                center
            } else {
                let angle = (i - 1) as f32 * TAU / leaves - FRAC_PI_2;
                center + Vec2::from_angle(angle) * self.config.rest_length
            };
        }
        self.alpha = 1.0;
        self.markers.clear();
        self.next_burst = None;
    }

    /// One simulation tick.
    pub fn step(&mut self) {
        let alpha = self.alpha;
        let cfg = &self.config;

        for edge in &self.edges {
            let delta = self.nodes[edge.target].position - self.nodes[edge.source].position;
            let distance = delta.length();
            if !(distance > 0.0) {
                continue;
            }
            let pull = delta * ((distance - cfg.rest_length) / distance * cfg.stiffness * alpha * 0.5);
            self.nodes[edge.target].velocity -= pull;
            self.nodes[edge.source].velocity += pull;
        }

        let n = self.nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.nodes[j].position - self.nodes[i].position;
                let distance = delta.length();
                if !(distance > 0.0) {
                    continue;
                }
                let push = delta / distance * (cfg.repulsion * alpha / distance.max(1.0).powi(2));
                self.nodes[i].velocity -= push;
                self.nodes[j].velocity += push;
            }
        }

        let center = self.size * 0.5;
        for node in self.nodes.iter_mut() {
            if node.pinned {
                node.position = center;
                node.velocity = Vec2::ZERO;
                continue;
            }
            node.velocity += (center - node.position) * cfg.centering * alpha;
            node.velocity *= 1.0 - cfg.velocity_decay;
            node.position += node.velocity;
        }

        for _ in 0..COLLISION_PASSES {
            self.resolve_collisions();
        }
        self.alpha = (self.alpha * (1.0 - self.config.alpha_decay)).max(self.config.alpha_floor);
    }

    fn resolve_collisions(&mut self) {
        let margin = self.config.collision_margin;
        let n = self.nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (&self.nodes[i], &self.nodes[j]);
                let min = a.radius + b.radius + margin;
                let delta = b.position - a.position;
                let distance = delta.length();
                if !(distance > 0.0) || distance >= min {
                    continue;
                }
                let shift = delta / distance * (min - distance);
                match (a.pinned, b.pinned) {
                    (true, true) => {}
                    (true, false) => self.nodes[j].position += shift,
                    (false, true) => self.nodes[i].position -= shift,
                    (false, false) => {
                        self.nodes[i].position -= shift * 0.5;
                        self.nodes[j].position += shift * 0.5;
                    }
                }
            }
        }
    }

    pub fn set_hover(&mut self, node: Option<usize>) {
        self.hover = node.filter(|&i| i < self.nodes.len());
    }

    /// Steps the layout, eases hover highlights and runs the marker timer.
    pub fn advance(&mut self, time: FrameTime) {
        self.step();

        let rate = time.dt / self.config.hover_transition;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            let target = if self.hover == Some(i) { 1.0 } else { 0.0 };
            let gap = target - node.highlight;
            node.highlight += gap.clamp(-rate, rate);
        }

        let now = time.now;
        let burst = *self
            .next_burst
            .get_or_insert(now + self.config.marker_interval);
        if now >= burst {
            for edge in 0..self.edges.len() {
                self.markers.push(Marker {
                    edge,
                    start: burst + edge as f64 * self.config.marker_stagger,
                    duration: self.config.marker_duration,
                });
            }
            // Skip bursts missed while paused rather than replaying them.
            let next = burst + self.config.marker_interval;
            self.next_burst = Some(if next > now {
                next
            } else {
                now + self.config.marker_interval
            });
        }
        self.markers.retain(|m| now < m.start + m.duration);
    }

    /// Position and fade of every marker that has set off by `now`.
    pub fn marker_states(&self, now: f64) -> Vec<MarkerState> {
        self.markers
            .iter()
            .filter(|m| now >= m.start)
            .filter_map(|m| {
                let edge = self.edges.get(m.edge)?;
                let t = ((now - m.start) / m.duration) as f32;
                let eased = self.config.marker_ease.apply(t);
                let from = self.nodes[edge.source].position;
                let to = self.nodes[edge.target].position;
                Some(MarkerState {
                    edge: m.edge,
                    position: from.lerp(to, eased),
                    opacity: 1.0 - smoothstep(0.75, 1.0, t),
                })
            })
            .collect()
    }
}
