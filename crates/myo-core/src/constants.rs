/// Default tuning for the canvas effects.
///
/// Each effect's `*Config::default()` is assembled from these values; page
/// variants override individual fields rather than copying the effect.
use crate::surface::Rgba;

// Pointer
pub const POINTER_OFFSCREEN: f32 = -1000.0; // raw position after the pointer leaves
pub const GRID_SMOOTHING: f32 = 0.1;
pub const MYCELIUM_SMOOTHING: f32 = 0.05;
pub const WAVE_SMOOTHING: f32 = 0.08;
pub const ORB_SMOOTHING: f32 = 0.02;

// Grid distortion
pub const GRID_SPACING: f32 = 40.0;
pub const GRID_SAMPLE_STEP: f32 = 5.0; // px between samples along a line
pub const GRID_DISTORT_RADIUS: f32 = 150.0;
pub const GRID_DISTORT_STRENGTH: f32 = 30.0;
pub const GRID_DOT_RADIUS: f32 = 100.0;
pub const GRID_DOT_MAX_SIZE: f32 = 2.5;

// Mycelium growth
pub const MYCELIUM_MAX_DEPTH: u32 = 5;
pub const MYCELIUM_MIN_THICKNESS: f32 = 0.1;
pub const MYCELIUM_EDGE_MARGIN: f32 = 100.0; // soft repulsion band along each edge
pub const MYCELIUM_BOUNDS_MARGIN: f32 = 50.0; // growth stops this far outside
pub const MYCELIUM_WANDER: f32 = 0.2; // rad per segment
pub const MYCELIUM_BRANCH_CHANCE: f32 = 0.08;
pub const MYCELIUM_BRANCH_CHANCE_PER_DEPTH: f32 = 0.02;
pub const MYCELIUM_SIDE_THICKNESS: f32 = 0.7;
pub const MYCELIUM_TAPER_CHANCE: f32 = 0.6;
pub const MYCELIUM_TAPER_THICKNESS: f32 = 0.6;
pub const MYCELIUM_EDGE_SEEDS: usize = 8;
pub const MYCELIUM_MAX_BRANCHES: usize = 1200;
pub const MYCELIUM_POINTER_RADIUS: f32 = 180.0;
pub const MYCELIUM_POINTER_STRENGTH: f32 = 14.0; // scaled by branch thickness
pub const MYCELIUM_MOVEMENT: f32 = 3.0;

// Wave field
pub const WAVE_PARTICLE_SPACING: f32 = 60.0; // one particle per this many px of width
pub const WAVE_POINTER_RADIUS: f32 = 200.0;
pub const WAVE_POINTER_PUSH: f32 = 50.0;
pub const WAVE_NOISE_WEIGHT: f32 = 0.4; // fraction of amplitude
pub const WAVE_NOISE_TAPER: f32 = 0.05; // fraction of width faded at each edge
pub const WAVE_SAMPLE_STEP: f32 = 4.0;
pub const WAVE_SECOND_HARMONIC: (f32, f32) = (1.7, 0.35); // (frequency ratio, amplitude ratio)
pub const WAVE_THIRD_HARMONIC: (f32, f32) = (2.3, 0.15);

// Network graph
pub const NETWORK_GRID: f32 = 40.0;
pub const NETWORK_MAX_HORIZONTAL_CELLS: i64 = 8;
pub const NETWORK_MAX_VERTICAL_CELLS: i64 = 5;
pub const NETWORK_MAX_DIAGONAL_CELLS: i64 = 4;
pub const NETWORK_SPAWN_CHANCE: f32 = 0.025; // ambient pulse spawn per frame
pub const NETWORK_ACTIVATION_DELAYS: [f64; 3] = [0.1, 0.4, 0.8]; // seconds after start
pub const NETWORK_CLICK_RADIUS: f32 = 200.0;
pub const NETWORK_CLICK_FANOUT: usize = 5;
pub const NETWORK_CLICK_STAGGER: f64 = 0.05; // seconds between click-triggered pulses
pub const NETWORK_RIPPLE_SPEED: f32 = 4.0; // px per frame
pub const NETWORK_RIPPLE_EXTENT: f32 = 0.6; // of the larger viewport dimension
pub const NETWORK_TRAIL: f32 = 0.25; // pulse trail as a fraction of the edge

// Ownership diagram
pub const DIAGRAM_REST_LENGTH: f32 = 170.0;
pub const DIAGRAM_STIFFNESS: f32 = 0.3;
pub const DIAGRAM_REPULSION: f32 = 2600.0;
pub const DIAGRAM_CENTERING: f32 = 0.02;
pub const DIAGRAM_COLLISION_MARGIN: f32 = 12.0;
pub const DIAGRAM_VELOCITY_DECAY: f32 = 0.4;
pub const DIAGRAM_ALPHA_DECAY: f32 = 0.0228;
pub const DIAGRAM_ALPHA_FLOOR: f32 = 0.02; // keeps the layout gently alive
pub const DIAGRAM_MARKER_INTERVAL: f64 = 2.5;
pub const DIAGRAM_MARKER_DURATION: f64 = 1.5;
pub const DIAGRAM_MARKER_STAGGER: f64 = 0.15;
pub const DIAGRAM_HOVER_TRANSITION: f32 = 0.25;

// Palette
pub const INK: Rgba = Rgba::rgb(45, 42, 38);
pub const SAGE: Rgba = Rgba::rgb(122, 138, 114);
pub const TERRACOTTA: Rgba = Rgba::rgb(193, 120, 86);
pub const MIST: Rgba = Rgba::rgb(168, 190, 205);
pub const GLOW: Rgba = Rgba::rgb(236, 226, 208);
