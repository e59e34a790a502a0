//! Tunable constants of the sparkle effect.

/// Pool capacity, frame pacing, and spawn rates.
///
/// Defaults reproduce the stock effect: at most 100 sparkles, 60 admitted
/// frames per second, a 30% chance of 3 ambient sparkles per frame, bursts of
/// 10 on click and 5 per drag move.
#[derive(Clone, Debug, PartialEq)]
pub struct SparkleConfig {
	/// Maximum number of live sparkles. Extra spawn requests are dropped.
	pub capacity: usize,
	/// Upper bound on admitted frames per second.
	pub target_fps: f64,
	/// Probability of an ambient burst on each admitted frame.
	pub ambient_chance: f64,
	pub ambient_batch: usize,
	pub click_batch: usize,
	pub drag_batch: usize,
	/// Draw the live sparkle count in the corner.
	pub show_counter: bool,
}

impl SparkleConfig {
	/// Minimum time between admitted frames, in milliseconds.
	pub fn frame_interval(&self) -> f64 {
		1000.0 / self.target_fps
	}
}

impl Default for SparkleConfig {
	fn default() -> Self {
		Self {
			capacity: 100,
			target_fps: 60.0,
			ambient_chance: 0.3,
			ambient_batch: 3,
			click_batch: 10,
			drag_batch: 5,
			show_counter: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_interval_is_sixty_fps() {
		let config = SparkleConfig::default();
		assert!((config.frame_interval() - 16.666_666).abs() < 1e-5);
	}
}
