//! Drawing routines for sparkles, background trails and the counter readout.

use std::f64::consts::PI;

use super::particles::Particle;
use super::surface::{RadialGradient, Surface};
use super::theme::{CounterStyle, Color};

/// Number of points on a sparkle star.
pub const SPIKES: usize = 4;

/// Vertices of a star centered on the origin, alternating outer and inner
/// radius. Vertex `k` sits at angle `k * PI / SPIKES`.
pub fn star_vertices(outer_radius: f64) -> [(f64, f64); SPIKES * 2] {
	let inner_radius = outer_radius / 2.0;
	let mut vertices = [(0.0, 0.0); SPIKES * 2];
	for (i, v) in vertices.iter_mut().enumerate() {
		let radius = if i % 2 == 0 {
			outer_radius
		} else {
			inner_radius
		};
		let angle = PI / SPIKES as f64 * i as f64;
		*v = (angle.cos() * radius, angle.sin() * radius);
	}
	vertices
}

/// Gradient that is solid at the center and fully transparent at the tips.
pub fn sparkle_gradient(color: Color, outer_radius: f64) -> RadialGradient {
	RadialGradient::centered(
		outer_radius,
		vec![
			(0.0, color.with_alpha(1.0)),
			(0.5, color.with_alpha(0.5)),
			(1.0, color.with_alpha(0.0)),
		],
	)
}

/// Draw one sparkle. Drawing state is restored afterwards.
pub fn draw_sparkle(surface: &mut impl Surface, p: &Particle) {
	surface.save();
	surface.set_global_alpha(p.life);
	surface.translate(p.x, p.y);
	surface.rotate(p.rotation);

	surface.begin_path();
	for (i, (x, y)) in star_vertices(p.size).into_iter().enumerate() {
		if i == 0 {
			surface.move_to(x, y);
		} else {
			surface.line_to(x, y);
		}
	}
	surface.close_path();
	surface.fill_radial_gradient(&sparkle_gradient(p.color, p.size));

	surface.restore();
}

/// Paint a translucent overlay across the whole surface.
pub fn fade_background(surface: &mut impl Surface, color: Color) {
	let (w, h) = surface.size();
	surface.fill_rect(0.0, 0.0, w, h, color);
}

pub fn draw_counter(surface: &mut impl Surface, style: &CounterStyle, count: usize) {
	surface.fill_text(
		&format!("Sparkles: {}", count),
		style.x,
		style.y,
		&style.font,
		style.color,
	);
}
