//! Grid-snapped node graph with travelling pulses and click ripples.

use crate::constants::*;
use crate::effect::{Effect, FrameTime};
use crate::error::{self, ConfigError};
use crate::events::InputEvent;
use crate::surface::{stroke_polyline, ColorStop, Paint, Rgba, Stroke, Surface};
use fnv::FnvHashSet;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use std::ops::RangeInclusive;

/// Node indices picked by a click, nearest first.
pub type Nearest = SmallVec<[usize; NETWORK_CLICK_FANOUT]>;

/// Rectangle kept clear of nodes and edges, in fractions of the canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExclusionZone {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ExclusionZone {
    pub fn contains(&self, point: Vec2, size: Vec2) -> bool {
        let (x, y) = (point.x / size.x, point.y / size.y);
        x > self.left && x < self.right && y > self.top && y < self.bottom
    }
}

#[derive(Clone, Debug)]
pub struct NetworkConfig {
    pub grid: f32,
    pub exclusion: ExclusionZone,
    /// Interior rows as fractions of the height.
    pub bands: Vec<f32>,
    /// Extra nodes as fractions of the canvas size.
    pub curated: Vec<(f32, f32)>,
    pub right_columns: usize,
    pub band_skip: f32,
    pub max_horizontal_cells: i64,
    pub max_vertical_cells: i64,
    pub max_diagonal_cells: i64,
    pub edge_opacity: RangeInclusive<f32>,
    pub spawn_chance: f32,
    pub activation_delays: Vec<f64>,
    pub pulse_speed: RangeInclusive<f32>,
    pub pulse_opacity: RangeInclusive<f32>,
    pub click_radius: f32,
    pub click_fanout: usize,
    pub click_stagger: f64,
    pub ripple_speed: f32,
    pub ripple_extent: f32,
    pub ripple_opacity: f32,
    pub trail: f32,
    pub edge_color: Rgba,
    pub pulse_color: Rgba,
    pub ripple_color: Rgba,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            grid: NETWORK_GRID,
            exclusion: ExclusionZone {
                left: 0.06,
                top: 0.28,
                right: 0.52,
                bottom: 0.72,
            },
            bands: vec![0.2, 0.4, 0.6, 0.8],
            curated: vec![
                (0.62, 0.3),
                (0.7, 0.45),
                (0.78, 0.62),
                (0.58, 0.78),
                (0.86, 0.22),
                (0.66, 0.86),
                (0.3, 0.86),
                (0.2, 0.16),
            ],
            right_columns: 3,
            band_skip: 0.25,
            max_horizontal_cells: NETWORK_MAX_HORIZONTAL_CELLS,
            max_vertical_cells: NETWORK_MAX_VERTICAL_CELLS,
            max_diagonal_cells: NETWORK_MAX_DIAGONAL_CELLS,
            edge_opacity: 0.06..=0.14,
            spawn_chance: NETWORK_SPAWN_CHANCE,
            activation_delays: NETWORK_ACTIVATION_DELAYS.to_vec(),
            pulse_speed: 0.005..=0.012,
            pulse_opacity: 0.5..=0.9,
            click_radius: NETWORK_CLICK_RADIUS,
            click_fanout: NETWORK_CLICK_FANOUT,
            click_stagger: NETWORK_CLICK_STAGGER,
            ripple_speed: NETWORK_RIPPLE_SPEED,
            ripple_extent: NETWORK_RIPPLE_EXTENT,
            ripple_opacity: 0.35,
            trail: NETWORK_TRAIL,
            edge_color: INK,
            pulse_color: TERRACOTTA,
            ripple_color: SAGE,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::positive("grid", self.grid)?;
        error::positive("ripple_speed", self.ripple_speed)?;
        error::positive("ripple_extent", self.ripple_extent)?;
        error::span("edge_opacity", &self.edge_opacity)?;
        error::span("pulse_speed", &self.pulse_speed)?;
        error::positive("pulse_speed", *self.pulse_speed.start())?;
        error::span("pulse_opacity", &self.pulse_opacity)?;
        error::within("spawn_chance", self.spawn_chance, 0.0, 1.0)?;
        error::within("band_skip", self.band_skip, 0.0, 1.0)?;
        error::within("trail", self.trail, 0.0, 1.0)?;
        let zone = &self.exclusion;
        error::span("exclusion", &(zone.left..=zone.right))?;
        error::span("exclusion", &(zone.top..=zone.bottom))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkNode {
    pub position: Vec2,
    /// Grid cell of `position`.
    pub cell: (i64, i64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkEdge {
    pub from: usize,
    pub to: usize,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
    pub edge: usize,
    pub progress: f32,
    pub speed: f32,
    /// Travels `to → from` when set.
    pub reverse: bool,
    pub opacity: f32,
    pub origin: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub speed: f32,
    pub opacity: f32,
}

/// A pulse spawn deferred until `due` on the graph clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledSpawn {
    pub due: f64,
    pub from: Option<usize>,
}

pub struct NetworkGraph {
    config: NetworkConfig,
    rng: StdRng,
    seed: u64,
    size: Vec2,
    clock: f64,
    nodes: Vec<NetworkNode>,
    edges: Vec<NetworkEdge>,
    pulses: Vec<Pulse>,
    ripples: Vec<Ripple>,
    pending: Vec<ScheduledSpawn>,
}

impl NetworkGraph {
    pub fn new(config: NetworkConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            seed,
            size: Vec2::ZERO,
            clock: 0.0,
            nodes: Vec::new(),
            edges: Vec::new(),
            pulses: Vec::new(),
            ripples: Vec::new(),
            pending: Vec::new(),
        })
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[NetworkEdge] {
        &self.edges
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn pending_spawns(&self) -> &[ScheduledSpawn] {
        &self.pending
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn snap(&self, point: Vec2) -> Vec2 {
        let g = self.config.grid;
        (point / g).round() * g
    }

    fn cell_of(&self, point: Vec2) -> (i64, i64) {
        let c = (point / self.config.grid).round();
        (c.x as i64, c.y as i64)
    }

    /// Rebuilds nodes and edges for `size` and drops every pulse, ripple
    /// and scheduled spawn.
    ///
    /// Layout randomness is reseeded from the construction seed so the same
    /// size always yields the same graph.
    pub fn rebuild(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
        self.pulses.clear();
        self.ripples.clear();
        self.pending.clear();
        let mut layout = StdRng::seed_from_u64(self.seed);
        self.nodes = self.place_nodes(&mut layout);
        self.edges = self.connect(&mut layout);
        log::debug!(
            "[network] {} nodes, {} edges for {:.0}x{:.0}",
            self.nodes.len(),
            self.edges.len(),
            self.size.x,
            self.size.y
        );
    }

    fn place_nodes(&self, rng: &mut StdRng) -> Vec<NetworkNode> {
        let (w, h) = (self.size.x, self.size.y);
        let g = self.config.grid;
        if w < g * 2.0 || h < g * 2.0 {
            return Vec::new();
        }
        let mut raw = Vec::new();

        // top and bottom bands
        let mut x = g;
        while x <= w - g {
            raw.push(Vec2::new(x, g));
            raw.push(Vec2::new(x, h - g));
            x += g * rng.gen_range(2..=3) as f32;
        }

        for &band in &self.config.bands {
            let mut x = g * rng.gen_range(1..=3) as f32;
            while x <= w - g {
                if !rng.gen_bool(self.config.band_skip as f64) {
                    let jitter = rng.gen_range(-0.5f32..=0.5) * g;
                    raw.push(Vec2::new(x, band * h + jitter));
                }
                x += g * rng.gen_range(2..=4) as f32;
            }
        }

        let mut y = g * 2.0;
        while y <= h - g * 2.0 {
            raw.push(Vec2::new(g, y));
            y += g * rng.gen_range(2..=3) as f32;
        }
        for column in 0..self.config.right_columns {
            let x = w - g * (1 + column * 2) as f32;
            let mut y = g * rng.gen_range(2..=3) as f32;
            while y <= h - g * 2.0 {
                raw.push(Vec2::new(x, y));
                y += g * rng.gen_range(2..=4) as f32;
            }
        }

        raw.extend(
            self.config
                .curated
                .iter()
                .map(|&(fx, fy)| Vec2::new(fx * w, fy * h)),
        );

        let max_cell = (self.size / g).floor() * g;
        let mut seen = FnvHashSet::default();
        raw.into_iter()
            .map(|p| self.snap(p).clamp(Vec2::ZERO, max_cell))
            .filter(|p| !self.config.exclusion.contains(*p, self.size))
            .filter_map(|p| {
                let cell = self.cell_of(p);
                seen.insert(cell).then_some(NetworkNode { position: p, cell })
            })
            .collect()
    }

    fn linked(&self, a: &NetworkNode, b: &NetworkNode) -> bool {
        let dx = (a.cell.0 - b.cell.0).abs();
        let dy = (a.cell.1 - b.cell.1).abs();
        let c = &self.config;
        let horizontal = dy == 0 && dx <= c.max_horizontal_cells;
        let vertical = dx == 0 && dy <= c.max_vertical_cells;
        let diagonal = dx.max(dy) <= c.max_diagonal_cells
            && (dx == dy || (dx.min(dy) >= 2 && (dx - dy).abs() == 1));
        (dx, dy) != (0, 0) && (horizontal || vertical || diagonal)
    }

    fn connect(&self, rng: &mut StdRng) -> Vec<NetworkEdge> {
        let mut edges = Vec::new();
        let mut pairs = FnvHashSet::default();
        let opacity = self.config.edge_opacity.clone();

        for (i, a) in self.nodes.iter().enumerate() {
            for (j, b) in self.nodes.iter().enumerate().skip(i + 1) {
                if !self.linked(a, b) {
                    continue;
                }
                let mid = (a.position + b.position) * 0.5;
                if self.config.exclusion.contains(mid, self.size) {
                    continue;
                }
                pairs.insert((i, j));
                edges.push(NetworkEdge {
                    from: i,
                    to: j,
                    opacity: rng.gen_range(opacity.clone()),
                });
            }
        }

        // Chain the nodes on each border so the frame always reads as connected.
        let Some(bounds) = self.cell_bounds() else {
            return edges;
        };
        let borders: [(fn(&NetworkNode) -> i64, i64, fn(&NetworkNode) -> i64); 4] = [
            (|n| n.cell.1, bounds.1, |n| n.cell.0),
            (|n| n.cell.1, bounds.3, |n| n.cell.0),
            (|n| n.cell.0, bounds.0, |n| n.cell.1),
            (|n| n.cell.0, bounds.2, |n| n.cell.1),
        ];
        for (axis, value, along) in borders {
            let mut chain: Vec<usize> = (0..self.nodes.len())
                .filter(|&i| axis(&self.nodes[i]) == value)
                .collect();
            chain.sort_by_key(|&i| along(&self.nodes[i]));
            for pair in chain.windows(2) {
                let key = (pair[0].min(pair[1]), pair[0].max(pair[1]));
                let mid = (self.nodes[key.0].position + self.nodes[key.1].position) * 0.5;
                if self.config.exclusion.contains(mid, self.size) {
                    continue;
                }
                if pairs.insert(key) {
                    edges.push(NetworkEdge {
                        from: key.0,
                        to: key.1,
                        opacity: rng.gen_range(opacity.clone()),
                    });
                }
            }
        }
        edges
    }

    /// `(min_x, min_y, max_x, max_y)` over node cells.
    fn cell_bounds(&self) -> Option<(i64, i64, i64, i64)> {
        let first = self.nodes.first()?.cell;
        Some(self.nodes.iter().fold(
            (first.0, first.1, first.0, first.1),
            |(x0, y0, x1, y1), n| {
                (
                    x0.min(n.cell.0),
                    y0.min(n.cell.1),
                    x1.max(n.cell.0),
                    y1.max(n.cell.1),
                )
            },
        ))
    }

    /// Starts a pulse on a random edge, preferring edges that touch `from`
    /// and then travelling away from it. Returns false when there are no
    /// edges.
    pub fn spawn_pulse(&mut self, from: Option<usize>) -> bool {
        if self.edges.is_empty() {
            return false;
        }
        let touching: SmallVec<[usize; 16]> = match from {
            Some(node) => self
                .edges
                .iter()
                .enumerate()
                .filter(|(_, e)| e.from == node || e.to == node)
                .map(|(i, _)| i)
                .collect(),
            None => SmallVec::new(),
        };
        let (edge, reverse) = match touching.choose(&mut self.rng) {
            Some(&i) => (i, from == Some(self.edges[i].to)),
            None => (self.rng.gen_range(0..self.edges.len()), self.rng.gen_bool(0.5)),
        };
        let pulse = Pulse {
            edge,
            progress: 0.0,
            speed: self.rng.gen_range(self.config.pulse_speed.clone()),
            reverse,
            opacity: self.rng.gen_range(self.config.pulse_opacity.clone()),
            origin: from,
        };
        self.pulses.push(pulse);
        true
    }

    /// Schedules the start-up burst relative to `now`.
    pub fn activate(&mut self, now: f64) {
        self.clock = now;
        let burst: Vec<_> = self
            .config
            .activation_delays
            .iter()
            .map(|d| ScheduledSpawn {
                due: now + d,
                from: None,
            })
            .collect();
        self.pending.extend(burst);
    }

    /// Starts a ripple at the snapped click point and schedules staggered
    /// pulses from the nearest nodes, measured from the raw point.
    pub fn click(&mut self, point: Vec2) -> Nearest {
        if self.size.cmple(Vec2::ZERO).any() {
            return Nearest::new();
        }
        self.ripples.push(Ripple {
            center: self.snap(point),
            radius: 0.0,
            max_radius: self.size.max_element() * self.config.ripple_extent,
            speed: self.config.ripple_speed,
            opacity: self.config.ripple_opacity,
        });

        let fanout = self.config.click_fanout;
        let mut nearest: SmallVec<[(f32, usize); NETWORK_CLICK_FANOUT]> = SmallVec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            let d = node.position.distance(point);
            if d > self.config.click_radius {
                continue;
            }
            let at = nearest.partition_point(|(other, _)| *other <= d);
            if at < fanout {
                nearest.insert(at, (d, i));
                nearest.truncate(fanout);
            }
        }

        let picked: Nearest = nearest.iter().map(|&(_, i)| i).collect();
        for (k, &node) in picked.iter().enumerate() {
            self.pending.push(ScheduledSpawn {
                due: self.clock + k as f64 * self.config.click_stagger,
                from: Some(node),
            });
        }
        log::debug!("[network] click ripple at {:?}, {} nodes", point, picked.len());
        picked
    }

    /// Advances ripples and pulses one step, then fires due spawns and the
    /// ambient spawn.
    pub fn update(&mut self, now: f64) {
        self.clock = now;

        for ripple in &mut self.ripples {
            ripple.radius += ripple.speed;
        }
        self.ripples.retain(|r| r.radius < r.max_radius);

        for pulse in &mut self.pulses {
            pulse.progress += pulse.speed;
        }
        self.pulses.retain(|p| p.progress < 1.0);

        let (due, later): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = later;
        for spawn in due {
            self.spawn_pulse(spawn.from);
        }

        if self.rng.gen::<f32>() < self.config.spawn_chance {
            self.spawn_pulse(None);
        }
    }

    fn draw_ripples(&self, surface: &mut dyn Surface) {
        let g = self.config.grid;
        for ripple in &self.ripples {
            let r = ripple.radius;
            if r <= 0.0 {
                continue;
            }
            let fade = ripple.opacity * (1.0 - r / ripple.max_radius);
            let steps = (r / g).floor() as i32;
            for k in -steps..=steps {
                let offset = k as f32 * g;
                let extent = (r * r - offset * offset).max(0.0).sqrt();
                let alpha = fade * (1.0 - offset.abs() / r);
                let stroke = Stroke::solid(self.config.ripple_color.with_alpha(alpha), 0.6);
                let c = ripple.center;
                stroke_polyline(
                    surface,
                    &[
                        Vec2::new(c.x - extent, c.y + offset),
                        Vec2::new(c.x + extent, c.y + offset),
                    ],
                    &stroke,
                );
                stroke_polyline(
                    surface,
                    &[
                        Vec2::new(c.x + offset, c.y - extent),
                        Vec2::new(c.x + offset, c.y + extent),
                    ],
                    &stroke,
                );
            }
        }
    }

    /// Opacity boost for an edge whose midpoint sits near a ripple front.
    fn ripple_boost(&self, mid: Vec2) -> f32 {
        let band = self.config.grid * 2.0;
        self.ripples
            .iter()
            .map(|r| {
                let proximity = 1.0 - (mid.distance(r.center) - r.radius).abs() / band;
                proximity.max(0.0) * (1.0 - r.radius / r.max_radius)
            })
            .fold(0.0, f32::max)
    }

    fn draw_edges(&self, surface: &mut dyn Surface) {
        for edge in &self.edges {
            let (a, b) = (self.nodes[edge.from].position, self.nodes[edge.to].position);
            let alpha = edge.opacity + self.ripple_boost((a + b) * 0.5) * 0.5;
            let stroke = Stroke::solid(self.config.edge_color.with_alpha(alpha), 0.8);
            stroke_polyline(surface, &[a, b], &stroke);
        }
    }

    fn draw_pulses(&self, surface: &mut dyn Surface) {
        let color = self.config.pulse_color;
        for pulse in &self.pulses {
            let Some(edge) = self.edges.get(pulse.edge) else {
                continue;
            };
            let (mut a, mut b) = (self.nodes[edge.from].position, self.nodes[edge.to].position);
            if pulse.reverse {
                std::mem::swap(&mut a, &mut b);
            }
            let head = a.lerp(b, pulse.progress);
            let tail = a.lerp(b, (pulse.progress - self.config.trail).max(0.0));
            let paint = Paint::Linear {
                from: tail,
                to: head,
                stops: vec![
                    ColorStop::new(0.0, color.with_alpha(0.0)),
                    ColorStop::new(1.0, color.with_alpha(pulse.opacity)),
                ],
            };
            stroke_polyline(surface, &[tail, head], &Stroke { paint, width: 1.5 });
            surface.fill_circle(head, 2.0, &Paint::Solid(color.with_alpha(pulse.opacity)));
        }
    }
}

impl Effect for NetworkGraph {
    fn name(&self) -> &'static str {
        "network"
    }

    fn resize(&mut self, size: Vec2) {
        self.rebuild(size);
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Click(p) => {
                self.click(*p);
            }
            InputEvent::Resize(size) => self.rebuild(*size),
            _ => {}
        }
    }

    fn start(&mut self, now: f64) {
        self.activate(now);
    }

    fn frame(&mut self, time: FrameTime, surface: &mut dyn Surface) {
        surface.clear();
        self.update(time.now);
        self.draw_ripples(surface);
        self.draw_edges(surface);
        self.draw_pulses(surface);
    }
}
