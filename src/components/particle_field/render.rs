//! Drawing for the particle field.
//!
//! One pass per frame: clear the surface, fill every particle, then stroke a
//! line for each pair closer than the link distance. Drawing goes through the
//! [`Painter`] trait so the frame logic does not depend on a live canvas.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::theme::{Color, FieldPalette};

/// The handful of 2d drawing primitives a frame needs.
pub trait Painter {
	fn clear(&mut self, width: f64, height: f64);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.begin_path();
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Draws one frame of the field in its current state.
pub fn render(
	field: &ParticleField,
	palette: &FieldPalette,
	config: &FieldConfig,
	painter: &mut impl Painter,
) {
	let size = field.size();
	painter.clear(size.width as f64, size.height as f64);

	for p in &field.particles {
		painter.fill_circle(p.x, p.y, p.radius, palette.particle);
	}

	let Some(threshold) = config.threshold() else {
		return;
	};
	for link in field.links(threshold, palette.base_line_opacity()) {
		let (a, b) = (&field.particles[link.from], &field.particles[link.to]);
		painter.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			config.line_width,
			palette.line.with_alpha(link.opacity),
		);
	}
}
