//! Depth-layered flowing wave field with drifting glow particles.

use crate::constants::*;
use crate::ease::smoothstep;
use crate::effect::{Effect, FrameTime};
use crate::error::{self, ConfigError};
use crate::events::InputEvent;
use crate::falloff::influence;
use crate::noise::NoiseField;
use crate::pointer::PointerTracker;
use crate::surface::{ColorStop, Paint, Rgba, Shadow, Stroke, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::ops::RangeInclusive;

/// Depth band of a wave layer, in back-to-front draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    Back,
    Mid,
    Front,
    Hero,
}

impl LayerKind {
    pub const ALL: [LayerKind; 4] = [
        LayerKind::Back,
        LayerKind::Mid,
        LayerKind::Front,
        LayerKind::Hero,
    ];
}

#[derive(Clone, Debug)]
pub struct BandConfig {
    pub count: usize,
    /// Baseline as a fraction of the canvas height.
    pub base_y: RangeInclusive<f32>,
    pub amplitude: RangeInclusive<f32>,
    pub frequency: RangeInclusive<f32>,
    pub speed: RangeInclusive<f32>,
    pub opacity: RangeInclusive<f32>,
    pub line_width: RangeInclusive<f32>,
    pub blur: RangeInclusive<f32>,
    /// Weight of the pointer repulsion term for this band.
    pub interaction: f32,
    pub color: Rgba,
}

impl BandConfig {
    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        error::span(field, &self.base_y)?;
        error::span(field, &self.amplitude)?;
        error::span(field, &self.frequency)?;
        error::span(field, &self.speed)?;
        error::span(field, &self.opacity)?;
        error::span(field, &self.line_width)?;
        error::span(field, &self.blur)?;
        error::within(field, self.interaction, 0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowConfig {
    pub blur: f32,
    pub color: Rgba,
}

#[derive(Clone, Debug)]
pub struct WaveConfig {
    pub back: BandConfig,
    pub mid: BandConfig,
    pub front: BandConfig,
    pub hero: BandConfig,
    pub hero_glow: GlowConfig,
    pub noise: NoiseField,
    pub noise_weight: f32,
    pub pointer_radius: f32,
    pub pointer_push: f32,
    pub smoothing: f32,
    pub sample_step: f32,
    pub particle_spacing: f32,
    pub particle_size: RangeInclusive<f32>,
    pub particle_speed: RangeInclusive<f32>,
    pub particle_brightness: RangeInclusive<f32>,
    pub particle_color: Rgba,
    pub ambient_color: Rgba,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            back: BandConfig {
                count: 4,
                base_y: 0.3..=0.7,
                amplitude: 30.0..=60.0,
                frequency: 0.002..=0.004,
                speed: 0.15..=0.3,
                opacity: 0.05..=0.1,
                line_width: 3.0..=6.0,
                blur: 4.0..=8.0,
                interaction: 0.2,
                color: MIST,
            },
            mid: BandConfig {
                count: 5,
                base_y: 0.35..=0.65,
                amplitude: 20.0..=45.0,
                frequency: 0.003..=0.006,
                speed: 0.25..=0.45,
                opacity: 0.1..=0.2,
                line_width: 1.5..=3.0,
                blur: 1.0..=3.0,
                interaction: 0.5,
                color: SAGE,
            },
            front: BandConfig {
                count: 4,
                base_y: 0.4..=0.6,
                amplitude: 15.0..=35.0,
                frequency: 0.004..=0.008,
                speed: 0.35..=0.6,
                opacity: 0.2..=0.35,
                line_width: 1.0..=1.8,
                blur: 0.0..=0.0,
                interaction: 1.0,
                color: SAGE,
            },
            hero: BandConfig {
                count: 1,
                base_y: 0.48..=0.52,
                amplitude: 30.0..=45.0,
                frequency: 0.003..=0.004,
                speed: 0.4..=0.5,
                opacity: 0.6..=0.75,
                line_width: 2.0..=2.5,
                blur: 0.0..=0.0,
                interaction: 1.0,
                color: TERRACOTTA,
            },
            hero_glow: GlowConfig {
                blur: 18.0,
                color: TERRACOTTA.with_alpha(0.6),
            },
            noise: NoiseField::new(0.004, 0.5),
            noise_weight: WAVE_NOISE_WEIGHT,
            pointer_radius: WAVE_POINTER_RADIUS,
            pointer_push: WAVE_POINTER_PUSH,
            smoothing: WAVE_SMOOTHING,
            sample_step: WAVE_SAMPLE_STEP,
            particle_spacing: WAVE_PARTICLE_SPACING,
            particle_size: 1.0..=2.5,
            particle_speed: 0.1..=0.4,
            particle_brightness: 0.3..=0.8,
            particle_color: GLOW,
            ambient_color: GLOW.with_alpha(0.12),
        }
    }
}

impl WaveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.back.validate("back")?;
        self.mid.validate("mid")?;
        self.front.validate("front")?;
        self.hero.validate("hero")?;
        error::positive("pointer_radius", self.pointer_radius)?;
        error::positive("sample_step", self.sample_step)?;
        error::positive("particle_spacing", self.particle_spacing)?;
        error::span("particle_size", &self.particle_size)?;
        error::span("particle_speed", &self.particle_speed)?;
        error::span("particle_brightness", &self.particle_brightness)?;
        error::within("smoothing", self.smoothing, f32::EPSILON, 1.0)
    }

    pub fn band(&self, kind: LayerKind) -> &BandConfig {
        match kind {
            LayerKind::Back => &self.back,
            LayerKind::Mid => &self.mid,
            LayerKind::Front => &self.front,
            LayerKind::Hero => &self.hero,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WaveLayer {
    pub kind: LayerKind,
    pub base_y: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
    pub speed: f32,
    pub opacity: f32,
    pub line_width: f32,
    pub blur: f32,
    pub interaction: f32,
    pub glow: Option<GlowConfig>,
    pub color: Rgba,
}

impl WaveLayer {
    /// Sum of the three harmonics, without noise or pointer terms.
    pub fn harmonics(&self, x: f32, t: f32) -> f32 {
        let (f2, a2) = WAVE_SECOND_HARMONIC;
        let (f3, a3) = WAVE_THIRD_HARMONIC;
        let (f, s, p, a) = (self.frequency, self.speed, self.phase, self.amplitude);
        (x * f + t * s + p).sin() * a - (x * f * f2 + t * s * 1.3 + p * 1.5).sin() * a * a2
            + (x * f * f3 - t * s * 0.7 + p * 0.5).sin() * a * a3
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub base_y: f32,
    pub size: f32,
    pub speed: f32,
    pub brightness: f32,
    pub pulse_speed: f32,
    pub pulse_phase: f32,
    /// 0 drifts straight, 1 rides the hero wave.
    pub wave_affinity: f32,
}

const PARTICLE_WRAP_MARGIN: f32 = 20.0;

pub struct WaveField {
    config: WaveConfig,
    pointer: PointerTracker,
    rng: StdRng,
    size: Vec2,
    layers: Vec<WaveLayer>,
    particles: Vec<Particle>,
}

impl WaveField {
    pub fn new(config: WaveConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pointer: PointerTracker::new(config.smoothing),
            config,
            rng: StdRng::seed_from_u64(seed),
            size: Vec2::ZERO,
            layers: Vec::new(),
            particles: Vec::new(),
        })
    }

    pub fn layers(&self) -> &[WaveLayer] {
        &self.layers
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn hero(&self) -> Option<&WaveLayer> {
        self.layers.iter().find(|l| l.kind == LayerKind::Hero)
    }

    pub fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    fn regenerate(&mut self) {
        let mut layers = Vec::new();
        for kind in LayerKind::ALL {
            let band = self.config.band(kind).clone();
            for _ in 0..band.count {
                layers.push(WaveLayer {
                    kind,
                    base_y: self.rng.gen_range(band.base_y.clone()) * self.size.y,
                    amplitude: self.rng.gen_range(band.amplitude.clone()),
                    frequency: self.rng.gen_range(band.frequency.clone()),
                    phase: self.rng.gen_range(0.0..TAU),
                    speed: self.rng.gen_range(band.speed.clone()),
                    opacity: self.rng.gen_range(band.opacity.clone()),
                    line_width: self.rng.gen_range(band.line_width.clone()),
                    blur: self.rng.gen_range(band.blur.clone()),
                    interaction: band.interaction,
                    glow: (kind == LayerKind::Hero).then_some(self.config.hero_glow),
                    color: band.color,
                });
            }
        }
        layers.sort_by_key(|l| l.kind);
        self.layers = layers;

        let count = (self.size.x / self.config.particle_spacing).floor().max(0.0) as usize;
        let cfg = &self.config;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle {
                x: rng.gen_range(0.0..=self.size.x),
                base_y: rng.gen_range(self.size.y * 0.2..=self.size.y * 0.8),
                size: rng.gen_range(cfg.particle_size.clone()),
                speed: rng.gen_range(cfg.particle_speed.clone()),
                brightness: rng.gen_range(cfg.particle_brightness.clone()),
                pulse_speed: rng.gen_range(0.5..=2.0),
                pulse_phase: rng.gen_range(0.0..TAU),
                wave_affinity: rng.gen_range(0.0..=1.0),
            })
            .collect();
        log::debug!(
            "[waves] {} layers, {} particles for {:.0}x{:.0}",
            self.layers.len(),
            self.particles.len(),
            self.size.x,
            self.size.y
        );
    }

    /// Noise weight envelope: zero at both canvas edges and full strength
    /// everywhere past the outer taper band, so every curve enters and
    /// leaves the frame on its harmonic baseline.
    fn edge_envelope(&self, x: f32) -> f32 {
        let width = self.size.x;
        if width <= 0.0 {
            return 0.0;
        }
        let band = width * WAVE_NOISE_TAPER;
        smoothstep(0.0, band, x) * smoothstep(0.0, band, width - x)
    }

    /// Height of `layer` at `x` and time `t`, including noise and pointer
    /// repulsion.
    pub fn wave_y(&self, layer: &WaveLayer, x: f32, t: f32) -> f32 {
        let a = layer.amplitude;
        let mut y = layer.base_y
            + layer.harmonics(x, t)
            + self.config.noise.sample(x, layer.base_y, t)
                * self.config.noise_weight
                * a
                * self.edge_envelope(x);

        if layer.interaction > 0.0 {
            let pointer = self.pointer.smoothed();
            let delta = Vec2::new(x, y) - pointer;
            let distance = delta.length();
            let weight = influence(distance, self.config.pointer_radius);
            if weight > 0.0 && distance > 0.0 {
                y += delta.y / distance * weight * layer.interaction * self.config.pointer_push;
            }
        }
        y
    }

    fn draw_ambient(&self, t: f32, surface: &mut dyn Surface) {
        let center = self.size * 0.5;
        let radius = self.size.max_element() * 0.6 * (1.0 + 0.1 * (t * 0.5).sin());
        let alpha = self.config.ambient_color.a * (0.8 + 0.2 * (t * 0.7).sin());
        let paint = Paint::glow(center, radius, self.config.ambient_color.with_alpha(alpha));
        surface.fill_rect(Vec2::ZERO, self.size, &paint);
    }

    fn draw_layer(&self, layer: &WaveLayer, t: f32, surface: &mut dyn Surface) {
        let step = self.config.sample_step;
        let count = (self.size.x / step).ceil() as usize;
        surface.begin_path();
        for i in 0..=count {
            let x = (i as f32 * step).min(self.size.x);
            let p = Vec2::new(x, self.wave_y(layer, x, t));
            if i == 0 {
                surface.move_to(p);
            } else {
                surface.line_to(p);
            }
        }

        let color = layer.color;
        let paint = Paint::Linear {
            from: Vec2::ZERO,
            to: Vec2::new(self.size.x, 0.0),
            stops: vec![
                ColorStop::new(0.0, color.with_alpha(0.0)),
                ColorStop::new(0.2, color.with_alpha(layer.opacity * 0.6)),
                ColorStop::new(0.5, color.with_alpha(layer.opacity)),
                ColorStop::new(0.8, color.with_alpha(layer.opacity * 0.6)),
                ColorStop::new(1.0, color.with_alpha(0.0)),
            ],
        };
        let stroke = Stroke {
            paint,
            width: layer.line_width,
        };

        if let Some(glow) = layer.glow {
            surface.set_shadow(Some(Shadow {
                blur: glow.blur,
                color: glow.color,
            }));
            surface.stroke(&stroke);
            surface.set_shadow(Some(Shadow {
                blur: glow.blur * 2.0,
                color: glow.color.with_alpha(glow.color.a * 0.5),
            }));
            surface.stroke(&Stroke {
                paint: fade(&stroke.paint, 0.5),
                width: stroke.width,
            });
            surface.set_shadow(None);
        } else if layer.blur > 0.0 {
            surface.set_blur(layer.blur);
            surface.stroke(&stroke);
            surface.set_blur(0.0);
        } else {
            surface.stroke(&stroke);
        }
    }

    fn draw_particles(&mut self, t: f32, surface: &mut dyn Surface) {
        let width = self.size.x;
        for p in &mut self.particles {
            p.x += p.speed;
            if p.x > width + PARTICLE_WRAP_MARGIN {
                p.x = -PARTICLE_WRAP_MARGIN;
            }
        }
        let hero = self.hero();
        let color = self.config.particle_color;
        for p in &self.particles {
            let ride = hero.map_or(0.0, |h| h.harmonics(p.x, t));
            let y = p.base_y + ride * p.wave_affinity;
            let pulse = ((t * p.pulse_speed + p.pulse_phase).sin() + 1.0) / 2.0;
            let size = p.size * (0.8 + 0.4 * pulse);
            let brightness = p.brightness * (0.6 + 0.4 * pulse);
            let center = Vec2::new(p.x, y);
            surface.fill_circle(
                center,
                size * 4.0,
                &Paint::glow(center, size * 4.0, color.with_alpha(brightness * 0.25)),
            );
            surface.fill_circle(center, size, &Paint::Solid(color.with_alpha(brightness)));
        }
    }
}

fn fade(paint: &Paint, factor: f32) -> Paint {
    let scale = |stops: &[ColorStop]| {
        stops
            .iter()
            .map(|s| ColorStop::new(s.offset, s.color.with_alpha(s.color.a * factor)))
            .collect()
    };
    match paint {
        Paint::Solid(c) => Paint::Solid(c.with_alpha(c.a * factor)),
        Paint::Linear { from, to, stops } => Paint::Linear {
            from: *from,
            to: *to,
            stops: scale(stops),
        },
        Paint::Radial {
            center,
            inner,
            outer,
            stops,
        } => Paint::Radial {
            center: *center,
            inner: *inner,
            outer: *outer,
            stops: scale(stops),
        },
    }
}

impl Effect for WaveField {
    fn name(&self) -> &'static str {
        "waves"
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
        self.draw_ambient(t, surface);
        for layer in &self.layers {
            self.draw_layer(layer, t, surface);
        }
        self.draw_particles(t, surface);
    }
}
