//! Sparkle particle effect component.
//!
//! Renders twinkling four-pointed stars on an HTML canvas:
//! - A capped pool of particles that drift, spin and fade out
//! - Frame pacing that admits at most one frame per 1/60 s
//! - Ambient sparkles plus bursts on click and trails on drag
//! - Motion trails from a translucent background fade
//!
//! The simulation core ([`SparklePool`], [`SparkleLoop`]) draws through the
//! [`Surface`] trait and has no browser dependency of its own.
//!
//! # Example
//!
//! ```ignore
//! use sparkle_canvas::SparkleCanvas;
//!
//! view! { <SparkleCanvas fullscreen=true capacity=Some(150) /> }
//! ```

mod component;
pub mod config;
mod frame_loop;
mod particles;
mod render;
pub mod surface;
pub mod theme;

pub use component::SparkleCanvas;
pub use config::SparkleConfig;
pub use frame_loop::{FramePacer, InputEvent, LoopState, SparkleLoop};
pub use particles::{Particle, SparklePool};
pub use surface::{RadialGradient, Surface};
pub use theme::{Color, SparkleTheme};
