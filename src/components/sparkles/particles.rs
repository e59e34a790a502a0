//! Sparkle particle pool.
//!
//! Particles move one velocity step per update tick rather than per unit of
//! wall-clock time. The render loop caps the tick rate, which keeps animation
//! speed stable.

use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::SmallRng;

use super::render;
use super::surface::Surface;
use super::theme::{Color, SparklePalette};

/// A single sparkle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Outer radius of the star.
	pub size: f64,
	/// Remaining life in `[0, 1]`; also the draw opacity.
	pub life: f64,
	/// Life lost per tick.
	pub decay: f64,
	pub color: Color,
	pub rotation: f64,
	pub rotation_speed: f64,
}

impl Particle {
	/// Build a randomized sparkle at the given position.
	fn random<R: Rng>(rng: &mut R, x: f64, y: f64, palette: &SparklePalette) -> Self {
		Self {
			x,
			y,
			vx: rng.random_range(-1.0..1.0),
			vy: rng.random_range(-1.0..1.0),
			size: rng.random_range(1.0..4.0),
			life: 1.0,
			decay: rng.random_range(0.005..0.025),
			color: palette.pick(rng),
			rotation: rng.random_range(0.0..TAU),
			rotation_speed: rng.random_range(-0.05..0.05),
		}
	}

	fn is_alive(&self) -> bool {
		self.life > 0.0
	}
}

/// Owns every live sparkle and advances them tick by tick.
pub struct SparklePool<R = SmallRng> {
	particles: Vec<Particle>,
	capacity: usize,
	palette: SparklePalette,
	width: f64,
	height: f64,
	rng: R,
}

impl<R: Rng> SparklePool<R> {
	/// Create an empty pool spawning over a `width` x `height` surface.
	pub fn new(rng: R, capacity: usize, palette: SparklePalette, width: f64, height: f64) -> Self {
		Self {
			particles: Vec::with_capacity(capacity),
			capacity,
			palette,
			width,
			height,
			rng,
		}
	}

	/// Request `count` new sparkles. A missing coordinate is randomized per
	/// sparkle over the surface; a given one is shared by the whole batch.
	/// Requests beyond capacity are dropped.
	pub fn spawn(&mut self, count: usize, x: Option<f64>, y: Option<f64>) {
		let room = self.capacity.saturating_sub(self.particles.len());
		for _ in 0..count.min(room) {
			let px = x.unwrap_or_else(|| self.rng.random::<f64>() * self.width);
			let py = y.unwrap_or_else(|| self.rng.random::<f64>() * self.height);
			let particle = Particle::random(&mut self.rng, px, py, &self.palette);
			self.particles.push(particle);
		}
	}

	/// Spawn a burst at a single point.
	pub fn spawn_at(&mut self, count: usize, x: f64, y: f64) {
		self.spawn(count, Some(x), Some(y));
	}

	/// Advance every sparkle by one tick and drop the expired ones.
	pub fn update(&mut self) {
		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;
			p.rotation += p.rotation_speed;
			p.life -= p.decay;
		}
		self.particles.retain(Particle::is_alive);
	}

	pub fn render(&self, surface: &mut impl Surface) {
		for p in &self.particles {
			render::draw_sparkle(surface, p);
		}
	}

	/// Update, then render.
	pub fn draw_frame(&mut self, surface: &mut impl Surface) {
		self.update();
		self.render(surface);
	}

	pub fn count(&self) -> usize {
		self.particles.len()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn clear(&mut self) {
		self.particles.clear();
	}

	/// Change the area used for randomized spawn positions. Live sparkles keep
	/// their positions.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Run a Bernoulli trial on the pool's random source. Non-finite
	/// probabilities never succeed.
	pub fn chance(&mut self, probability: f64) -> bool {
		if !probability.is_finite() {
			return false;
		}
		self.rng.random_bool(probability.clamp(0.0, 1.0))
	}
}
