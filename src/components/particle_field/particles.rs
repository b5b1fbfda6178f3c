//! Particle data and per-frame motion.
//!
//! Particles live in one contiguous `Vec` that is thrown away and rebuilt
//! whenever the surface changes size. Motion is a constant velocity with a
//! reflective boundary: the sign flips once the particle is already past an
//! edge, so it may sit just outside the surface for one frame.

use rand::Rng;

use super::config::FieldConfig;

/// Pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
	pub width: u32,
	pub height: u32,
}

impl SurfaceSize {
	pub const fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}

	/// Build from CSS pixel measurements. Negative or non-finite values become zero.
	pub fn from_css(width: f64, height: f64) -> Self {
		let clamp = |v: f64| if v.is_finite() && v > 0.0 { v as u32 } else { 0 };
		Self {
			width: clamp(width),
			height: clamp(height),
		}
	}

	pub fn area(self) -> f64 {
		self.width as f64 * self.height as f64
	}
}

/// A single moving point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
}

impl Particle {
	/// Move by one frame of velocity, then flip any axis that left `[0, bound]`.
	pub fn advance(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 || self.x > width {
			self.vx = -self.vx;
		}
		if self.y < 0.0 || self.y > height {
			self.vy = -self.vy;
		}
	}

	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// A connection between two particles that are close enough to be joined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub from: usize,
	pub to: usize,
	pub distance: f64,
	pub opacity: f64,
}

/// Opacity of a line between two points `distance` apart.
///
/// `base * (1 - distance / threshold)` for distances below the threshold,
/// `None` at or beyond it.
pub fn link_opacity(distance: f64, threshold: f64, base: f64) -> Option<f64> {
	if !(distance < threshold) || threshold <= 0.0 {
		return None;
	}
	Some((base * (1.0 - distance / threshold)).max(0.0))
}

/// The full particle set for one surface size.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	pub particles: Vec<Particle>,
	size: SurfaceSize,
}

impl ParticleField {
	/// Generate `config.particle_count(area)` particles scattered over the surface.
	pub fn new<R: Rng>(size: SurfaceSize, config: &FieldConfig, rng: &mut R) -> Self {
		let count = config.particle_count(size.area());
		let (width, height) = (size.width as f64, size.height as f64);
		let (radius_min, radius_max) = config.radius_range();
		let speed = config.speed();

		let mut particles = Vec::with_capacity(count);
		for _ in 0..count {
			particles.push(Particle {
				x: rng.gen_range(0.0..1.0) * width,
				y: rng.gen_range(0.0..1.0) * height,
				vx: (rng.gen_range(0.0..1.0) - 0.5) * 2.0 * speed,
				vy: (rng.gen_range(0.0..1.0) - 0.5) * 2.0 * speed,
				radius: radius_min + rng.gen_range(0.0..1.0) * (radius_max - radius_min),
			});
		}

		Self { particles, size }
	}

	pub fn size(&self) -> SurfaceSize {
		self.size
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Advance every particle by one frame.
	pub fn update(&mut self) {
		let (width, height) = (self.size.width as f64, self.size.height as f64);
		for p in &mut self.particles {
			p.advance(width, height);
		}
	}

	/// Every unordered pair closer than `threshold`, self-pairs excluded.
	pub fn links(&self, threshold: f64, base_opacity: f64) -> impl Iterator<Item = Link> + '_ {
		let particles = &self.particles;
		(0..particles.len()).flat_map(move |i| {
			(i + 1..particles.len()).filter_map(move |j| {
				let distance = particles[i].distance_to(&particles[j]);
				link_opacity(distance, threshold, base_opacity).map(|opacity| Link {
					from: i,
					to: j,
					distance,
					opacity,
				})
			})
		})
	}
}
