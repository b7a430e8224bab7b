//! Procedural animation core for the Myo Labs site.
//!
//! Nothing in this crate touches the browser: effects draw through the
//! [`Surface`] trait, receive input through the [`EventBus`], and are paced by
//! the [`LifecycleController`]. The web front-end supplies the canvas, the
//! `requestAnimationFrame` host and the DOM listeners.

pub mod constants;
pub mod diagram;
pub mod ease;
pub mod effect;
pub mod error;
pub mod events;
pub mod falloff;
pub mod grid;
pub mod interactions;
pub mod lifecycle;
pub mod mycelium;
pub mod network;
pub mod noise;
pub mod pointer;
pub mod surface;
pub mod waves;

pub use diagram::{DiagramConfig, ForceDiagram};
pub use ease::Ease;
pub use effect::{Bound, Effect, FrameTime};
pub use error::ConfigError;
pub use events::{EventBus, EventKind, InputEvent, Subscription};
pub use grid::{GridConfig, GridDistortion};
pub use lifecycle::{Animation, EffectId, FrameHandle, FrameHost, LifecycleController};
pub use mycelium::{MyceliumConfig, MyceliumField};
pub use network::{NetworkConfig, NetworkGraph};
pub use noise::NoiseField;
pub use pointer::PointerTracker;
pub use surface::{Paint, Recorder, Rgba, Shadow, Stroke, Surface};
pub use waves::{WaveConfig, WaveField};
