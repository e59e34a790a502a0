//! sparkle-canvas: Animated sparkle particles on an HTML canvas.
//!
//! This crate provides a WASM-based canvas component that renders drifting,
//! spinning, fading star-shaped sparkles, spawning more on click and drag.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::sparkles::{
	Color, InputEvent, Particle, SparkleCanvas, SparkleConfig, SparkleLoop, SparklePool,
	SparkleTheme, Surface,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("sparkle-canvas: logging initialized");
}

/// Main application component.
/// Fills the viewport with the sparkle effect.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Sparkles" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-sparkles" style="background: rgb(15, 15, 30);">
			<SparkleCanvas fullscreen=true />
		</div>
	}
}
