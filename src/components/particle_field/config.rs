//! Tunable constants for the particle field.
//!
//! Loaded from JSON so a page can override density or link distance without a
//! rebuild. Every field has a default; invalid values are normalised by the
//! accessors rather than rejected.

use serde::Deserialize;

/// Hard upper bound on the particle count, whatever the config says.
///
/// The link pass is quadratic, so this keeps a frame within budget.
pub const PARTICLE_CEILING: usize = 1_000;

/// Field configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Pixels of surface area per particle.
	pub density: f64,
	/// Optional upper bound on the particle count.
	pub max_particles: Option<usize>,
	/// Pairs closer than this (in pixels) are joined by a line.
	pub link_distance: f64,
	/// Stroke width of connection lines.
	pub line_width: f64,
	/// Smallest particle radius (inclusive).
	pub radius_min: f64,
	/// Largest particle radius (exclusive).
	pub radius_max: f64,
	/// Velocity components are drawn from `[-max_speed, max_speed)`.
	pub max_speed: f64,
	/// Fixed RNG seed. `None` lets the host pick one.
	pub seed: Option<u64>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			density: 20_000.0,
			max_particles: None,
			link_distance: 150.0,
			line_width: 0.5,
			radius_min: 1.0,
			radius_max: 3.0,
			max_speed: 0.25,
			seed: None,
		}
	}
}

impl FieldConfig {
	/// Number of particles for a surface of the given area: `floor(area / density)`,
	/// capped at `max_particles` and at [`PARTICLE_CEILING`]. Zero for empty
	/// surfaces or unusable densities.
	pub fn particle_count(&self, area: f64) -> usize {
		if !(self.density.is_finite() && self.density > 0.0) || !(area > 0.0) {
			return 0;
		}
		let ceiling = self
			.max_particles
			.map_or(PARTICLE_CEILING, |max| max.min(PARTICLE_CEILING));
		let count = (area / self.density).floor();
		if count >= ceiling as f64 {
			ceiling
		} else {
			count as usize
		}
	}

	/// Connection threshold, or `None` when no line can ever be drawn.
	pub fn threshold(&self) -> Option<f64> {
		(self.link_distance.is_finite() && self.link_distance > 0.0).then_some(self.link_distance)
	}

	/// Radius range with `radius_max` collapsed onto `radius_min` when inverted.
	pub fn radius_range(&self) -> (f64, f64) {
		let min = self.radius_min.max(0.0);
		(min, self.radius_max.max(min))
	}

	/// Absolute speed bound.
	pub fn speed(&self) -> f64 {
		if self.max_speed.is_finite() {
			self.max_speed.abs()
		} else {
			0.0
		}
	}
}
