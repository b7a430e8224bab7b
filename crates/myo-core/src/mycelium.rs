//! Branching "mycelium" network grown once per viewport size and animated
//! every frame.
//!
//! Growth is a recursive random walk: spores emit radial arms, arms wander
//! and fork, forks are thinner and deeper. Stored points never move; all
//! motion (breathing, noise drift, pointer repulsion) is applied at draw
//! time.

use crate::constants::*;
use crate::effect::{Effect, FrameTime};
use crate::error::{self, ConfigError};
use crate::events::InputEvent;
use crate::falloff::radial_push;
use crate::noise::NoiseField;
use crate::pointer::PointerTracker;
use crate::surface::{Paint, Rgba, Stroke, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::ops::RangeInclusive;

#[derive(Clone, Debug)]
pub struct MyceliumConfig {
    pub spores: RangeInclusive<usize>,
    pub arms_per_spore: RangeInclusive<usize>,
    pub edge_seeds: usize,
    pub trunk_thickness: RangeInclusive<f32>,
    pub segment_length: RangeInclusive<f32>,
    /// Walk length of a depth-0 branch; deeper branches scale by
    /// `length_decay^depth`.
    pub base_length: RangeInclusive<f32>,
    pub length_decay: f32,
    pub wander: f32,
    pub edge_margin: f32,
    pub edge_push: f32,
    pub bounds_margin: f32,
    pub branch_chance: f32,
    pub branch_chance_per_depth: f32,
    pub branch_angle: RangeInclusive<f32>,
    pub side_thickness: f32,
    pub taper_chance: f32,
    pub taper_thickness: f32,
    pub max_depth: u32,
    pub min_thickness: f32,
    pub max_branches: usize,
    pub pulse_speed: RangeInclusive<f32>,
    pub noise: NoiseField,
    pub movement: f32,
    pub breathe: f32,
    pub pointer_radius: f32,
    pub pointer_strength: f32,
    pub smoothing: f32,
    pub color: Rgba,
    pub glow_color: Rgba,
    pub glow_radius: f32,
}

impl Default for MyceliumConfig {
    fn default() -> Self {
        Self {
            spores: 6..=9,
            arms_per_spore: 4..=7,
            edge_seeds: MYCELIUM_EDGE_SEEDS,
            trunk_thickness: 1.2..=2.4,
            segment_length: 8.0..=14.0,
            base_length: 140.0..=280.0,
            length_decay: 0.72,
            wander: MYCELIUM_WANDER,
            edge_margin: MYCELIUM_EDGE_MARGIN,
            edge_push: 0.15,
            bounds_margin: MYCELIUM_BOUNDS_MARGIN,
            branch_chance: MYCELIUM_BRANCH_CHANCE,
            branch_chance_per_depth: MYCELIUM_BRANCH_CHANCE_PER_DEPTH,
            branch_angle: 0.4..=1.0,
            side_thickness: MYCELIUM_SIDE_THICKNESS,
            taper_chance: MYCELIUM_TAPER_CHANCE,
            taper_thickness: MYCELIUM_TAPER_THICKNESS,
            max_depth: MYCELIUM_MAX_DEPTH,
            min_thickness: MYCELIUM_MIN_THICKNESS,
            max_branches: MYCELIUM_MAX_BRANCHES,
            pulse_speed: 0.4..=1.2,
            noise: NoiseField::new(0.008, 0.3),
            movement: MYCELIUM_MOVEMENT,
            breathe: 0.6,
            pointer_radius: MYCELIUM_POINTER_RADIUS,
            pointer_strength: MYCELIUM_POINTER_STRENGTH,
            smoothing: MYCELIUM_SMOOTHING,
            color: SAGE,
            glow_color: SAGE.with_alpha(0.08),
            glow_radius: 220.0,
        }
    }
}

impl MyceliumConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::count_span("spores", &self.spores)?;
        error::count_span("arms_per_spore", &self.arms_per_spore)?;
        error::span("trunk_thickness", &self.trunk_thickness)?;
        error::span("segment_length", &self.segment_length)?;
        error::positive("segment_length", *self.segment_length.start())?;
        error::span("base_length", &self.base_length)?;
        error::span("branch_angle", &self.branch_angle)?;
        error::within("wander", self.wander, 0.0, PI)?;
        error::span("pulse_speed", &self.pulse_speed)?;
        error::within("length_decay", self.length_decay, 0.0, 1.0)?;
        error::within("side_thickness", self.side_thickness, 0.0, 1.0)?;
        error::within("taper_thickness", self.taper_thickness, 0.0, 1.0)?;
        error::within("branch_chance", self.branch_chance, 0.0, 1.0)?;
        error::within("taper_chance", self.taper_chance, 0.0, 1.0)?;
        error::positive("edge_margin", self.edge_margin)?;
        error::positive("min_thickness", self.min_thickness)?;
        error::within("smoothing", self.smoothing, f32::EPSILON, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchPoint {
    pub position: Vec2,
    pub phase: f32,
}

#[derive(Clone, Debug)]
pub struct Branch {
    pub points: Vec<BranchPoint>,
    pub thickness: f32,
    pub depth: u32,
    pub opacity: f32,
    pub pulse_speed: f32,
    pub pulse_phase: f32,
    /// Branch this one forked from; `None` for spore arms and edge seeds.
    pub parent: Option<usize>,
}

impl Branch {
    /// Base opacity modulated by `0.6 + 0.4·pulse`.
    pub fn breathing_opacity(&self, t: f32) -> f32 {
        let pulse = ((t * self.pulse_speed + self.pulse_phase).sin() + 1.0) / 2.0;
        self.opacity * (0.6 + 0.4 * pulse)
    }
}

/// Grows a complete network for a `size` viewport.
pub fn grow<R: Rng>(size: Vec2, config: &MyceliumConfig, rng: &mut R) -> Vec<Branch> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let mut grower = Grower {
        config,
        size,
        rng,
        branches: Vec::new(),
    };
    grower.seed_spores();
    grower.seed_edges();
    grower.branches
}

struct Grower<'a, R: Rng> {
    config: &'a MyceliumConfig,
    size: Vec2,
    rng: &'a mut R,
    branches: Vec<Branch>,
}

impl<R: Rng> Grower<'_, R> {
    fn seed_spores(&mut self) {
        let spores = self.rng.gen_range(self.config.spores.clone());
        for _ in 0..spores {
            let origin = Vec2::new(
                self.rng.gen_range(self.size.x * 0.1..=self.size.x * 0.9),
                self.rng.gen_range(self.size.y * 0.1..=self.size.y * 0.9),
            );
            let arms = self.rng.gen_range(self.config.arms_per_spore.clone());
            for arm in 0..arms {
                let angle = arm as f32 / arms as f32 * TAU + self.rng.gen_range(-0.3..=0.3);
                let thickness = self.rng.gen_range(self.config.trunk_thickness.clone());
                self.grow_branch(origin, angle, thickness, 0, None);
            }
        }
    }

    fn seed_edges(&mut self) {
        let (w, h) = (self.size.x, self.size.y);
        for _ in 0..self.config.edge_seeds {
            let (origin, inward) = match self.rng.gen_range(0..4) {
                0 => (Vec2::new(self.rng.gen_range(0.0..=w), 0.0), FRAC_PI_2),
                1 => (Vec2::new(w, self.rng.gen_range(0.0..=h)), PI),
                2 => (Vec2::new(self.rng.gen_range(0.0..=w), h), -FRAC_PI_2),
                _ => (Vec2::new(0.0, self.rng.gen_range(0.0..=h)), 0.0),
            };
            let angle = inward + self.rng.gen_range(-0.5..=0.5);
            let thickness = self.rng.gen_range(self.config.trunk_thickness.clone()) * 0.8;
            self.grow_branch(origin, angle, thickness, 0, None);
        }
    }

    fn outside(&self, p: Vec2) -> bool {
        let m = self.config.bounds_margin;
        p.x < -m || p.y < -m || p.x > self.size.x + m || p.y > self.size.y + m
    }

    /// Bends `angle` away from any edge closer than `edge_margin`.
    fn steer(&self, p: Vec2, angle: f32) -> f32 {
        let m = self.config.edge_margin;
        let mut push = Vec2::ZERO;
        if p.x < m {
            push.x += 1.0 - p.x / m;
        }
        if p.x > self.size.x - m {
            push.x -= 1.0 - (self.size.x - p.x) / m;
        }
        if p.y < m {
            push.y += 1.0 - p.y / m;
        }
        if p.y > self.size.y - m {
            push.y -= 1.0 - (self.size.y - p.y) / m;
        }
        if push == Vec2::ZERO {
            return angle;
        }
        let heading = Vec2::new(angle.cos(), angle.sin()) + push * self.config.edge_push;
        heading.y.atan2(heading.x)
    }

    fn grow_branch(
        &mut self,
        origin: Vec2,
        mut angle: f32,
        thickness: f32,
        depth: u32,
        parent: Option<usize>,
    ) {
        let cfg = self.config;
        if depth > cfg.max_depth
            || thickness < cfg.min_thickness
            || self.branches.len() >= cfg.max_branches
            || self.outside(origin)
        {
            return;
        }
        let index = self.branches.len();
        let phase = self.rng.gen_range(0.0..TAU);
        self.branches.push(Branch {
            points: vec![BranchPoint {
                position: origin,
                phase,
            }],
            thickness,
            depth,
            opacity: (0.12 + thickness * 0.22).min(0.7),
            pulse_speed: self.rng.gen_range(cfg.pulse_speed.clone()),
            pulse_phase: self.rng.gen_range(0.0..TAU),
            parent,
        });

        let length = self.rng.gen_range(cfg.base_length.clone()) * cfg.length_decay.powi(depth as i32);
        let mut walked = 0.0;
        let mut pos = origin;
        while walked < length {
            let step = self.rng.gen_range(cfg.segment_length.clone());
            angle += self.rng.gen_range(-cfg.wander..=cfg.wander);
            angle = self.steer(pos, angle);
            pos += Vec2::new(angle.cos(), angle.sin()) * step;
            walked += step;
            if self.outside(pos) {
                break;
            }
            let phase = self.rng.gen_range(0.0..TAU);
            self.branches[index].points.push(BranchPoint {
                position: pos,
                phase,
            });

            let chance = cfg.branch_chance + cfg.branch_chance_per_depth * depth as f32;
            if self.rng.gen::<f32>() < chance {
                let side = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                let fork = angle + side * self.rng.gen_range(cfg.branch_angle.clone());
                self.grow_branch(pos, fork, thickness * cfg.side_thickness, depth + 1, Some(index));
            }
        }

        if self.rng.gen::<f32>() < cfg.taper_chance {
            let tips = self.rng.gen_range(1..=2);
            for _ in 0..tips {
                let fork = angle + self.rng.gen_range(-0.6..=0.6);
                self.grow_branch(pos, fork, thickness * cfg.taper_thickness, depth + 1, Some(index));
            }
        }
    }
}

pub struct MyceliumField {
    config: MyceliumConfig,
    pointer: PointerTracker,
    rng: StdRng,
    size: Vec2,
    branches: Vec<Branch>,
    /// Branch indices, deepest first, so trunks land on top.
    draw_order: Vec<usize>,
}

impl MyceliumField {
    pub fn new(config: MyceliumConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pointer: PointerTracker::new(config.smoothing),
            config,
            rng: StdRng::seed_from_u64(seed),
            size: Vec2::ZERO,
            branches: Vec::new(),
            draw_order: Vec::new(),
        })
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn draw_order(&self) -> &[usize] {
        &self.draw_order
    }

    pub fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    fn regenerate(&mut self) {
        self.branches = grow(self.size, &self.config, &mut self.rng);
        let mut order: Vec<usize> = (0..self.branches.len()).collect();
        order.sort_by(|a, b| self.branches[*b].depth.cmp(&self.branches[*a].depth));
        self.draw_order = order;
        log::debug!(
            "[mycelium] grew {} branches for {:.0}x{:.0}",
            self.branches.len(),
            self.size.x,
            self.size.y
        );
    }

    fn displace(&self, point: &BranchPoint, thickness: f32, t: f32) -> Vec2 {
        let p = point.position;
        let breathe = (t * 0.8 + point.phase).sin() * self.config.breathe;
        let drift = Vec2::new(
            self.config.noise.sample(p.x, p.y, t) * self.config.movement + breathe,
            self.config.noise.sample(p.y, p.x, t + 100.0) * self.config.movement + breathe,
        );
        let push = radial_push(
            p,
            self.pointer.smoothed(),
            self.config.pointer_radius,
            self.config.pointer_strength * thickness,
        );
        p + drift + push
    }
}

impl Effect for MyceliumField {
    fn name(&self) -> &'static str {
        "mycelium"
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
        self.regenerate();
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMove(p) => self.pointer.on_move(p.x, p.y),
            InputEvent::PointerLeave | InputEvent::Visibility(false) => self.pointer.on_leave(),
            InputEvent::Resize(size) => self.resize(*size),
            _ => {}
        }
    }

    fn frame(&mut self, time: FrameTime, surface: &mut dyn Surface) {
        surface.clear();
        self.pointer.tick();
        let t = time.t();

        if self.pointer.is_engaged() {
            let center = self.pointer.smoothed();
            let radius = self.config.glow_radius;
            surface.fill_circle(center, radius, &Paint::glow(center, radius, self.config.glow_color));
        }

        for &index in &self.draw_order {
            let branch = &self.branches[index];
            if branch.points.len() < 2 {
                continue;
            }
            let alpha = branch.breathing_opacity(t);
            let mut prev = self.displace(&branch.points[0], branch.thickness, t);
            surface.begin_path();
            surface.move_to(prev);
            for point in &branch.points[1..] {
                let cur = self.displace(point, branch.thickness, t);
                surface.quad_to(prev, (prev + cur) * 0.5);
                prev = cur;
            }
            surface.line_to(prev);
            surface.stroke(&Stroke::solid(
                self.config.color.with_alpha(alpha),
                branch.thickness,
            ));
        }
    }
}
