//! Colors and visual style for the sparkle effect.

use rand::Rng;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Functional `rgba()` notation, accepted by every canvas style setter.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// The fixed set of colors a sparkle can be born with.
#[derive(Clone, Debug)]
pub struct SparklePalette {
	pub colors: Vec<Color>,
}

impl SparklePalette {
	/// Six bright tones that read well against a dark background.
	pub fn classic() -> Self {
		Self {
			colors: vec![
				Color::rgb(255, 255, 255), // White
				Color::rgb(255, 223, 0),   // Gold
				Color::rgb(135, 206, 250), // Sky blue
				Color::rgb(255, 182, 193), // Light pink
				Color::rgb(144, 238, 144), // Light green
				Color::rgb(255, 165, 0),   // Orange
			],
		}
	}

	/// Uniformly pick one palette color.
	pub fn pick<R: Rng>(&self, rng: &mut R) -> Color {
		if self.colors.is_empty() {
			return Color::rgb(255, 255, 255);
		}
		self.colors[rng.random_range(0..self.colors.len())]
	}
}

impl Default for SparklePalette {
	fn default() -> Self {
		Self::classic()
	}
}

/// Style of the live particle count readout.
#[derive(Clone, Debug)]
pub struct CounterStyle {
	pub color: Color,
	/// CSS font shorthand (e.g., "14px Arial").
	pub font: String,
	pub x: f64,
	pub y: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct SparkleTheme {
	/// Overlay painted over the whole surface each frame. A low alpha leaves
	/// fading trails behind moving sparkles instead of a hard clear.
	pub background_fade: Color,
	pub counter: CounterStyle,
	pub palette: SparklePalette,
}

impl Default for SparkleTheme {
	fn default() -> Self {
		Self {
			background_fade: Color::rgba(15, 15, 30, 0.1),
			counter: CounterStyle {
				color: Color::rgba(255, 255, 255, 0.5),
				font: "14px Arial".to_string(),
				x: 10.0,
				y: 20.0,
			},
			palette: SparklePalette::classic(),
		}
	}
}
