//! Drawing surface abstraction.
//!
//! The simulation only needs a handful of 2D primitives, so it talks to this
//! trait instead of the browser canvas directly. The canvas implementation
//! lives here; tests use [`RecordingSurface`] to observe what was drawn.

use log::warn;
use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// A radial gradient between two circles, with color stops in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
	pub inner: (f64, f64, f64),
	pub outer: (f64, f64, f64),
	pub stops: Vec<(f64, Color)>,
}

impl RadialGradient {
	/// Concentric gradient centered on the local origin, from a point to `radius`.
	pub fn centered(radius: f64, stops: Vec<(f64, Color)>) -> Self {
		Self {
			inner: (0.0, 0.0, 0.0),
			outer: (0.0, 0.0, radius),
			stops,
		}
	}
}

/// Primitive 2D drawing operations required by the sparkle renderer.
///
/// Every method is infallible. Implementations that wrap a fallible host API
/// skip the primitive when the host refuses it.
pub trait Surface {
	/// Pixel dimensions `(width, height)`.
	fn size(&self) -> (f64, f64);
	fn save(&mut self);
	fn restore(&mut self);
	fn translate(&mut self, x: f64, y: f64);
	fn rotate(&mut self, angle: f64);
	fn set_global_alpha(&mut self, alpha: f64);
	fn begin_path(&mut self);
	fn move_to(&mut self, x: f64, y: f64);
	fn line_to(&mut self, x: f64, y: f64);
	fn close_path(&mut self);
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
	/// Fill the current path with a radial gradient.
	fn fill_radial_gradient(&mut self, gradient: &RadialGradient);
	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn size(&self) -> (f64, f64) {
		self.canvas()
			.map(|c| (c.width() as f64, c.height() as f64))
			.unwrap_or((0.0, 0.0))
	}

	fn save(&mut self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&mut self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn translate(&mut self, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::translate(self, x, y);
	}

	fn rotate(&mut self, angle: f64) {
		let _ = CanvasRenderingContext2d::rotate(self, angle);
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		CanvasRenderingContext2d::set_global_alpha(self, alpha);
	}

	fn begin_path(&mut self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn close_path(&mut self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
		let (x0, y0, r0) = gradient.inner;
		let (x1, y1, r1) = gradient.outer;
		let canvas_gradient = match self.create_radial_gradient(x0, y0, r0, x1, y1, r1) {
			Ok(g) => g,
			Err(e) => {
				warn!("sparkles: radial gradient rejected: {:?}", e);
				return;
			}
		};

		for (offset, color) in &gradient.stops {
			if let Err(e) = canvas_gradient.add_color_stop(*offset as f32, &color.to_css()) {
				warn!("sparkles: color stop {} rejected: {:?}", offset, e);
				return;
			}
		}

		#[allow(deprecated)]
		self.set_fill_style(&canvas_gradient);
		self.fill();
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.set_font(font);
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}
}

/// A primitive call captured by [`RecordingSurface`].
#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	Save,
	Restore,
	Translate(f64, f64),
	Rotate(f64),
	GlobalAlpha(f64),
	BeginPath,
	MoveTo(f64, f64),
	LineTo(f64, f64),
	ClosePath,
	FillRect(f64, f64, f64, f64, Color),
	FillGradient(RadialGradient),
	FillText(String, f64, f64, String, Color),
}

/// In-memory surface that records every primitive for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub width: f64,
	pub height: f64,
	pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl RecordingSurface {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			ops: Vec::new(),
		}
	}

	pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
		self.ops.iter().filter(|op| pred(op)).count()
	}
}

#[cfg(test)]
impl Surface for RecordingSurface {
	fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn save(&mut self) {
		self.ops.push(DrawOp::Save);
	}

	fn restore(&mut self) {
		self.ops.push(DrawOp::Restore);
	}

	fn translate(&mut self, x: f64, y: f64) {
		self.ops.push(DrawOp::Translate(x, y));
	}

	fn rotate(&mut self, angle: f64) {
		self.ops.push(DrawOp::Rotate(angle));
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		self.ops.push(DrawOp::GlobalAlpha(alpha));
	}

	fn begin_path(&mut self) {
		self.ops.push(DrawOp::BeginPath);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.ops.push(DrawOp::MoveTo(x, y));
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.ops.push(DrawOp::LineTo(x, y));
	}

	fn close_path(&mut self) {
		self.ops.push(DrawOp::ClosePath);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.ops.push(DrawOp::FillRect(x, y, width, height, color));
	}

	fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
		self.ops.push(DrawOp::FillGradient(gradient.clone()));
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) {
		self.ops.push(DrawOp::FillText(
			text.to_string(),
			x,
			y,
			font.to_string(),
			color,
		));
	}
}
