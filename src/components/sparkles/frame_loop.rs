//! Frame pacing and the per-frame sparkle routine.
//!
//! The host scheduler calls [`SparkleLoop::tick`] once per display refresh.
//! [`FramePacer`] admits at most `target_fps` of those ticks per second; each
//! admitted frame fades the surface, maybe spawns ambient sparkles, then
//! updates and draws the pool.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::SparkleConfig;
use super::particles::SparklePool;
use super::render;
use super::surface::Surface;
use super::theme::SparkleTheme;

/// Caps how often scheduler ticks turn into frames.
#[derive(Clone, Debug)]
pub struct FramePacer {
	frame_interval: f64,
	last_admitted: Option<f64>,
}

impl FramePacer {
	/// `frame_interval` is the minimum spacing between frames, in ms.
	pub fn new(frame_interval: f64) -> Self {
		Self {
			frame_interval,
			last_admitted: None,
		}
	}

	/// Decide whether the tick at timestamp `t` (ms) becomes a frame.
	///
	/// The first tick is always admitted. Later ticks need at least one
	/// interval since the last admitted frame; the leftover fraction of an
	/// interval is carried over so the phase does not drift.
	pub fn admit(&mut self, t: f64) -> bool {
		let Some(last) = self.last_admitted else {
			self.last_admitted = Some(t);
			return true;
		};

		let delta = t - last;
		if delta < self.frame_interval {
			return false;
		}

		self.last_admitted = Some(t - delta % self.frame_interval);
		true
	}

	pub fn frame_interval(&self) -> f64 {
		self.frame_interval
	}
}

/// Lifecycle of the loop. There is no way back from `Stopped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	Running,
	Stopped,
}

/// Pointer and geometry notifications, in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
	Press { x: f64, y: f64 },
	Release { x: f64, y: f64 },
	Move { x: f64, y: f64, held: bool },
	/// The pointer left the surface.
	Leave,
	Resize { width: f64, height: f64 },
}

/// Everything one sparkle surface needs between frames.
pub struct SparkleLoop {
	pub pool: SparklePool,
	pacer: FramePacer,
	config: SparkleConfig,
	theme: SparkleTheme,
	state: LoopState,
	pressed: bool,
}

impl SparkleLoop {
	pub fn new(
		config: SparkleConfig,
		theme: SparkleTheme,
		width: f64,
		height: f64,
		seed: u64,
	) -> Self {
		let pool = SparklePool::new(
			SmallRng::seed_from_u64(seed),
			config.capacity,
			theme.palette.clone(),
			width,
			height,
		);
		info!(
			"sparkles: loop started on {}x{} surface (capacity {}, {} fps)",
			width, height, config.capacity, config.target_fps
		);

		Self {
			pool,
			pacer: FramePacer::new(config.frame_interval()),
			config,
			theme,
			state: LoopState::Running,
			pressed: false,
		}
	}

	/// Handle one scheduler tick. Returns whether a frame was drawn.
	pub fn tick(&mut self, t: f64, surface: &mut impl Surface) -> bool {
		if self.state == LoopState::Stopped || !self.pacer.admit(t) {
			return false;
		}

		render::fade_background(surface, self.theme.background_fade);

		if self.pool.chance(self.config.ambient_chance) {
			self.pool.spawn(self.config.ambient_batch, None, None);
		}

		self.pool.draw_frame(surface);

		if self.config.show_counter {
			render::draw_counter(surface, &self.theme.counter, self.pool.count());
		}
		true
	}

	pub fn handle_input(&mut self, event: InputEvent) {
		if self.state == LoopState::Stopped {
			return;
		}

		match event {
			InputEvent::Press { .. } => self.pressed = true,
			InputEvent::Release { x, y } => {
				if self.pressed {
					debug!("sparkles: click burst at ({:.0}, {:.0})", x, y);
					self.pool.spawn_at(self.config.click_batch, x, y);
				}
				self.pressed = false;
			}
			InputEvent::Move { x, y, held } => {
				if held {
					self.pool.spawn_at(self.config.drag_batch, x, y);
				}
			}
			// Leaving ends the gesture; a release after re-entering is not a click.
			InputEvent::Leave => self.pressed = false,
			InputEvent::Resize { width, height } => {
				debug!("sparkles: surface resized to {}x{}", width, height);
				self.pool.resize(width, height);
			}
		}
	}

	/// Stop admitting frames and input. The host should stop scheduling ticks.
	pub fn stop(&mut self) {
		if self.state == LoopState::Running {
			info!("sparkles: loop stopped with {} live sparkles", self.pool.count());
		}
		self.state = LoopState::Stopped;
	}

	pub fn state(&self) -> LoopState {
		self.state
	}

	pub fn is_running(&self) -> bool {
		self.state == LoopState::Running
	}
}

#[cfg(test)]
mod tests {
	use super::super::surface::{DrawOp, RecordingSurface};
	use super::*;

	fn quiet_config() -> SparkleConfig {
		SparkleConfig {
			ambient_chance: 0.0,
			..SparkleConfig::default()
		}
	}

	fn sparkle_loop(config: SparkleConfig) -> SparkleLoop {
		SparkleLoop::new(config, SparkleTheme::default(), 400.0, 300.0, 9)
	}

	#[test]
	fn pacer_skips_ticks_inside_interval() {
		let mut pacer = FramePacer::new(1000.0 / 60.0);
		let admitted: Vec<f64> = [0.0, 5.0, 10.0, 16.0, 20.0]
			.into_iter()
			.filter(|t| pacer.admit(*t))
			.collect();
		assert_eq!(admitted, vec![0.0, 20.0]);
	}

	#[test]
	fn pacer_carries_remainder() {
		let mut pacer = FramePacer::new(10.0);
		assert!(pacer.admit(100.0));
		// 25ms late: next frame is due relative to 120, not 125.
		assert!(pacer.admit(125.0));
		assert!(!pacer.admit(129.0));
		assert!(pacer.admit(130.0));
	}

	#[test]
	fn pacer_caps_fast_scheduler() {
		let mut pacer = FramePacer::new(1000.0 / 60.0);
		// 240 Hz scheduler for one second.
		let frames = (0..240)
			.map(|i| i as f64 * 1000.0 / 240.0)
			.filter(|t| pacer.admit(*t))
			.count();
		assert!((59..=61).contains(&frames), "admitted {frames} frames");
	}

	#[test]
	fn skipped_tick_draws_nothing() {
		let mut sl = sparkle_loop(quiet_config());
		let mut surface = RecordingSurface::new(400.0, 300.0);

		assert!(sl.tick(0.0, &mut surface));
		let drawn = surface.ops.len();
		assert!(!sl.tick(4.0, &mut surface));
		assert_eq!(surface.ops.len(), drawn);
	}

	#[test]
	fn admitted_frame_fades_then_counts() {
		let mut sl = sparkle_loop(quiet_config());
		let mut surface = RecordingSurface::new(400.0, 300.0);
		sl.pool.spawn(2, None, None);

		assert!(sl.tick(0.0, &mut surface));

		let fade = SparkleTheme::default().background_fade;
		assert_eq!(
			surface.ops.first(),
			Some(&DrawOp::FillRect(0.0, 0.0, 400.0, 300.0, fade))
		);
		assert_eq!(surface.count(|op| matches!(op, DrawOp::FillGradient(_))), 2);
		match surface.ops.last() {
			Some(DrawOp::FillText(text, ..)) => assert_eq!(text, "Sparkles: 2"),
			other => panic!("expected counter text last, got {other:?}"),
		}
	}

	#[test]
	fn counter_can_be_hidden() {
		let mut sl = sparkle_loop(SparkleConfig {
			show_counter: false,
			..quiet_config()
		});
		let mut surface = RecordingSurface::new(400.0, 300.0);
		sl.tick(0.0, &mut surface);
		assert_eq!(surface.count(|op| matches!(op, DrawOp::FillText(..))), 0);
	}

	#[test]
	fn ambient_spawn_when_trial_succeeds() {
		let mut sl = sparkle_loop(SparkleConfig {
			ambient_chance: 1.0,
			..SparkleConfig::default()
		});
		let mut surface = RecordingSurface::new(400.0, 300.0);
		sl.tick(0.0, &mut surface);
		// Fresh sparkles survive their first update.
		assert_eq!(sl.pool.count(), 3);
	}

	#[test]
	fn no_ambient_spawn_when_trial_fails() {
		let mut sl = sparkle_loop(quiet_config());
		let mut surface = RecordingSurface::new(400.0, 300.0);
		for i in 0..10 {
			sl.tick(i as f64 * 20.0, &mut surface);
		}
		assert_eq!(sl.pool.count(), 0);
	}

	#[test]
	fn click_spawns_burst() {
		let mut sl = sparkle_loop(quiet_config());
		sl.handle_input(InputEvent::Press { x: 50.0, y: 60.0 });
		assert_eq!(sl.pool.count(), 0);
		sl.handle_input(InputEvent::Release { x: 50.0, y: 60.0 });

		assert_eq!(sl.pool.count(), 10);
		assert!(sl.pool.particles().iter().all(|p| (p.x, p.y) == (50.0, 60.0)));
	}

	#[test]
	fn release_without_press_is_ignored() {
		let mut sl = sparkle_loop(quiet_config());
		sl.handle_input(InputEvent::Release { x: 1.0, y: 1.0 });
		assert_eq!(sl.pool.count(), 0);
	}

	#[test]
	fn leaving_surface_cancels_click() {
		let mut sl = sparkle_loop(quiet_config());
		sl.handle_input(InputEvent::Press { x: 1.0, y: 1.0 });
		sl.handle_input(InputEvent::Leave);
		sl.handle_input(InputEvent::Move { x: 2.0, y: 2.0, held: false });
		sl.handle_input(InputEvent::Release { x: 2.0, y: 2.0 });
		assert_eq!(sl.pool.count(), 0);

		// A fresh press after re-entering clicks as usual.
		sl.handle_input(InputEvent::Press { x: 2.0, y: 2.0 });
		sl.handle_input(InputEvent::Release { x: 2.0, y: 2.0 });
		assert_eq!(sl.pool.count(), 10);
	}

	#[test]
	fn nan_ambient_chance_does_not_panic() {
		let mut sl = sparkle_loop(SparkleConfig {
			ambient_chance: f64::NAN,
			..SparkleConfig::default()
		});
		let mut surface = RecordingSurface::new(400.0, 300.0);
		assert!(sl.tick(0.0, &mut surface));
		assert_eq!(sl.pool.count(), 0);
	}

	#[test]
	fn drag_spawns_only_while_held() {
		let mut sl = sparkle_loop(quiet_config());
		sl.handle_input(InputEvent::Move { x: 5.0, y: 5.0, held: false });
		assert_eq!(sl.pool.count(), 0);

		sl.handle_input(InputEvent::Move { x: 5.0, y: 5.0, held: true });
		sl.handle_input(InputEvent::Move { x: 6.0, y: 5.0, held: true });
		assert_eq!(sl.pool.count(), 10);
	}

	#[test]
	fn input_respects_capacity() {
		let mut sl = sparkle_loop(quiet_config());
		for i in 0..50 {
			sl.handle_input(InputEvent::Move { x: i as f64, y: 0.0, held: true });
		}
		assert_eq!(sl.pool.count(), 100);
	}

	#[test]
	fn resize_changes_spawn_area() {
		let mut sl = sparkle_loop(quiet_config());
		sl.handle_input(InputEvent::Resize { width: 4.0, height: 4.0 });
		sl.pool.spawn(20, None, None);
		assert!(sl.pool.particles().iter().all(|p| p.x < 4.0 && p.y < 4.0));
	}

	#[test]
	fn stopped_loop_is_inert() {
		let mut sl = sparkle_loop(SparkleConfig {
			ambient_chance: 1.0,
			..SparkleConfig::default()
		});
		assert!(sl.is_running());
		sl.stop();
		assert_eq!(sl.state(), LoopState::Stopped);

		let mut surface = RecordingSurface::new(400.0, 300.0);
		assert!(!sl.tick(0.0, &mut surface));
		assert!(surface.ops.is_empty());

		sl.handle_input(InputEvent::Press { x: 1.0, y: 1.0 });
		sl.handle_input(InputEvent::Release { x: 1.0, y: 1.0 });
		assert_eq!(sl.pool.count(), 0);
	}
}
