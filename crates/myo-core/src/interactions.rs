//! Pure math behind the page's DOM interactions: parallax orbs, magnetic
//! buttons, the ensō tilt, scroll progress, nav condensation, anchor
//! offsets, the dry-brush streaks and the contact form mock.
//!
//! The web front-end only reads DOM geometry, calls into here and writes the
//! resulting style strings back.

use crate::constants::ORB_SMOOTHING;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::PI;

pub const ORB_TRAVEL: f32 = 15.0; // px per orb index at full deflection
pub const MAGNETIC_PULL: f32 = 0.2;
pub const TILT_DEGREES: f32 = 15.0;
pub const TILT_SCALE: f32 = 1.05;
pub const NAV_CONDENSE_AT: f32 = 100.0;
pub const ANCHOR_GAP: f32 = 20.0;

/// Pointer-driven drift for the ambient background orbs.
#[derive(Clone, Debug)]
pub struct ParallaxOrbs {
    target: Vec2,
    current: Vec2,
    smoothing: f32,
}

impl Default for ParallaxOrbs {
    fn default() -> Self {
        Self::new(ORB_SMOOTHING)
    }
}

impl ParallaxOrbs {
    pub fn new(smoothing: f32) -> Self {
        Self {
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            smoothing: smoothing.clamp(f32::EPSILON, 1.0),
        }
    }

    /// Records the pointer as a `[-1, 1]` offset from the viewport center.
    pub fn on_pointer(&mut self, client: Vec2, viewport: Vec2) {
        if viewport.cmple(Vec2::ZERO).any() {
            return;
        }
        self.target = (client / viewport - 0.5) * 2.0;
    }

    pub fn tick(&mut self) {
        self.current += (self.target - self.current) * self.smoothing;
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Translation of orb `index`; deeper orbs travel further.
    pub fn offset(&self, index: usize) -> Vec2 {
        self.current * ((index + 1) as f32 * ORB_TRAVEL)
    }
}

/// Offset that pulls a button towards the pointer.
pub fn magnetic_offset(pointer: Vec2, origin: Vec2, size: Vec2) -> Vec2 {
    (pointer - (origin + size * 0.5)) * MAGNETIC_PULL
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
}

impl Tilt {
    pub fn css(&self) -> String {
        format!(
            "perspective(1000px) rotateX({:.2}deg) rotateY({:.2}deg) scale({})",
            self.rotate_x, self.rotate_y, self.scale
        )
    }
}

/// 3D tilt of the ensō towards the pointer. Degenerate rects give no tilt.
pub fn tilt(pointer: Vec2, origin: Vec2, size: Vec2) -> Tilt {
    if size.cmple(Vec2::ZERO).any() {
        return Tilt {
            rotate_x: 0.0,
            rotate_y: 0.0,
            scale: TILT_SCALE,
        };
    }
    let delta = (pointer - (origin + size * 0.5)) / size;
    Tilt {
        rotate_x: delta.y * TILT_DEGREES,
        rotate_y: -delta.x * TILT_DEGREES,
        scale: TILT_SCALE,
    }
}

/// Percentage of the document scrolled, in `[0, 100]`.
pub fn scroll_progress(scroll_top: f32, doc_height: f32, viewport_height: f32) -> f32 {
    let scrollable = doc_height - viewport_height;
    if !(scrollable > 0.0) {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn nav_condensed(scroll_y: f32) -> bool {
    scroll_y > NAV_CONDENSE_AT
}

/// Document offset to scroll to so an anchor lands just below the nav.
pub fn anchor_scroll_target(element_top: f32, scroll_y: f32, nav_height: f32) -> f32 {
    (element_top + scroll_y - nav_height - ANCHOR_GAP).max(0.0)
}

/// One gap in the ensō's brush stroke, as a quadratic SVG path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Streak {
    pub angle: f32,
    pub start: Vec2,
    pub ctrl: Vec2,
    pub end: Vec2,
    pub width: f32,
    /// Animation delay in seconds.
    pub delay: f32,
    pub opacity: f32,
}

impl Streak {
    pub fn path_data(&self) -> String {
        format!(
            "M {:.1} {:.1} Q {:.1} {:.1}, {:.1} {:.1}",
            self.start.x, self.start.y, self.ctrl.x, self.ctrl.y, self.end.x, self.end.y
        )
    }
}

pub const STREAK_CENTER: Vec2 = Vec2::new(100.0, 100.0);
pub const STREAK_RADIUS: f32 = 70.0;

fn streak_angle<R: Rng>(rng: &mut R) -> Option<f32> {
    let roll: f32 = rng.gen();
    if roll < 0.6 {
        // right and bottom-right, where the brush runs dry
        Some(-PI / 3.0 + rng.gen::<f32>() * PI * 0.8)
    } else if roll < 0.85 {
        Some(-PI / 2.0 + rng.gen::<f32>() * PI * 0.4 - PI * 0.2)
    } else {
        let angle = rng.gen::<f32>() * PI * 2.0;
        // the left side is still wet ink
        (!(angle > PI * 0.6 && angle < PI * 1.4)).then_some(angle)
    }
}

/// Rolls 18–25 candidates around the ensō; candidates that land on the
/// fresh-ink left side are dropped.
pub fn dry_brush_streaks<R: Rng>(rng: &mut R) -> Vec<Streak> {
    let candidates = rng.gen_range(18..=25);
    let mut streaks = Vec::with_capacity(candidates);
    for _ in 0..candidates {
        let Some(angle) = streak_angle(rng) else {
            continue;
        };
        let start = STREAK_CENTER + Vec2::from_angle(angle) * STREAK_RADIUS;
        let tangent = Vec2::from_angle(angle + PI / 2.0);
        let length = rng.gen_range(8.0f32..=28.0);
        let curve = rng.gen_range(-5.0f32..=5.0);
        let ctrl = start + tangent * length * 0.5 + Vec2::splat(curve);
        let end = start + tangent * length;

        let end_section = angle > -PI / 4.0 && angle < PI / 2.0;
        let width = if end_section {
            rng.gen_range(1.5f32..=4.0)
        } else {
            rng.gen_range(0.8f32..=2.3)
        };
        let normalized = (angle + PI) / (PI * 2.0);
        let delay = 0.08 + normalized * 0.35 + rng.gen_range(-0.025f32..=0.025);
        streaks.push(Streak {
            angle,
            start,
            ctrl,
            end,
            width,
            delay,
            opacity: rng.gen_range(0.6f32..=0.95),
        });
    }
    streaks
}

/// Contact form submit button states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Sending,
    Sent,
}

impl SubmitPhase {
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Sending => Some("Sending..."),
            Self::Sent => Some("Message Sent!"),
        }
    }

    /// How long the phase is shown before [`next`](Self::next).
    pub fn hold_ms(self) -> Option<i32> {
        match self {
            Self::Idle => None,
            Self::Sending => Some(1500),
            Self::Sent => Some(3000),
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Idle => Self::Sending,
            Self::Sending => Self::Sent,
            Self::Sent => Self::Idle,
        }
    }
}
