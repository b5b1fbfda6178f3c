//! Renderer state: particle set, palette and animation loop.
//!
//! [`ParticleRenderer`] owns everything the field needs between frames and is
//! the only thing that mutates it. Hosts talk to it through five calls:
//! `initialize`, `resize`, `tick`, `set_mode` and `teardown`. The painter and
//! frame scheduler are passed in per call, so the renderer itself stays `Send`
//! and can be shared with reactive cleanup hooks.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::FieldConfig;
use super::error::FieldError;
use super::particles::{ParticleField, SurfaceSize};
use super::render::{self, Painter};
use super::scheduler::{FrameLoop, FrameScheduler, LoopState};
use super::theme::{DisplayMode, FieldPalette};

/// Animated particle background.
pub struct ParticleRenderer {
	config: FieldConfig,
	rng: StdRng,
	field: Option<ParticleField>,
	mode: DisplayMode,
	palette: FieldPalette,
	frames: FrameLoop,
}

impl ParticleRenderer {
	/// Create a stopped renderer. `seed` is used unless the config pins its own.
	pub fn new(config: FieldConfig, seed: u64) -> Self {
		let rng = StdRng::seed_from_u64(config.seed.unwrap_or(seed));
		Self {
			config,
			rng,
			field: None,
			mode: DisplayMode::default(),
			palette: FieldPalette::default(),
			frames: FrameLoop::default(),
		}
	}

	/// Populate the field for `surface` and start animating.
	///
	/// With no surface this does nothing and returns
	/// [`FieldError::SurfaceUnavailable`]; call again once the surface exists.
	pub fn initialize(
		&mut self,
		surface: Option<SurfaceSize>,
		mode: DisplayMode,
		scheduler: &impl FrameScheduler,
	) -> Result<(), FieldError> {
		let size = surface.ok_or(FieldError::SurfaceUnavailable)?;
		self.set_mode(mode);
		self.rebuild(size);
		self.frames.start(scheduler);
		info!(
			"particle-field: initialized {}x{} with {} particles ({})",
			size.width,
			size.height,
			self.particle_count(),
			mode.as_str()
		);
		Ok(())
	}

	/// Replace the surface size and regenerate every particle.
	///
	/// Does not touch the loop state.
	pub fn resize(&mut self, size: SurfaceSize) -> Result<(), FieldError> {
		if self.field.is_none() {
			return Err(FieldError::SurfaceUnavailable);
		}
		self.rebuild(size);
		debug!(
			"particle-field: resized to {}x{}, {} particles",
			size.width,
			size.height,
			self.particle_count()
		);
		Ok(())
	}

	/// Run one frame: move, draw, and schedule the next frame.
	///
	/// Returns `false` without drawing if the loop has been torn down.
	pub fn tick(&mut self, painter: &mut impl Painter, scheduler: &impl FrameScheduler) -> bool {
		if !self.frames.begin_frame() {
			return false;
		}
		if let Some(field) = self.field.as_mut() {
			field.update();
			render::render(field, &self.palette, &self.config, painter);
		}
		self.frames.arm(scheduler);
		true
	}

	/// Swap the palette. Positions and velocities are kept.
	pub fn set_mode(&mut self, mode: DisplayMode) {
		self.mode = mode;
		self.palette = FieldPalette::for_mode(mode);
	}

	/// Cancel the pending frame. Safe to call any number of times.
	pub fn teardown(&mut self, scheduler: &impl FrameScheduler) {
		if self.frames.is_running() {
			info!(
				"particle-field: teardown after {} frames",
				self.frames.frames()
			);
		}
		self.frames.stop(scheduler);
	}

	pub fn state(&self) -> LoopState {
		self.frames.state()
	}

	pub fn is_running(&self) -> bool {
		self.frames.is_running()
	}

	pub fn mode(&self) -> DisplayMode {
		self.mode
	}

	pub fn palette(&self) -> &FieldPalette {
		&self.palette
	}

	pub fn field(&self) -> Option<&ParticleField> {
		self.field.as_ref()
	}

	pub fn particle_count(&self) -> usize {
		self.field.as_ref().map_or(0, ParticleField::len)
	}

	fn rebuild(&mut self, size: SurfaceSize) {
		self.field = Some(ParticleField::new(size, &self.config, &mut self.rng));
	}
}

#[cfg(test)]
mod tests {
	use super::super::render::tests::RecordingPainter;
	use super::super::scheduler::FrameHandle;
	use super::super::scheduler::tests::ManualScheduler;
	use super::*;

	fn renderer() -> ParticleRenderer {
		ParticleRenderer::new(FieldConfig::default(), 99)
	}

	#[test]
	fn test_initialize_without_surface_is_noop() {
		let scheduler = ManualScheduler::default();
		let mut r = renderer();

		let res = r.initialize(None, DisplayMode::Dark, &scheduler);
		assert_eq!(res, Err(FieldError::SurfaceUnavailable));
		assert_eq!(r.state(), LoopState::Stopped);
		assert!(r.field().is_none());
		assert!(scheduler.pending.borrow().is_empty());

		r.initialize(Some(SurfaceSize::new(400, 300)), DisplayMode::Dark, &scheduler)
			.unwrap();
		assert!(r.is_running());
		assert_eq!(r.particle_count(), 6);
	}

	#[test]
	fn test_resize_before_initialize_fails() {
		let mut r = renderer();
		assert_eq!(
			r.resize(SurfaceSize::new(800, 600)),
			Err(FieldError::SurfaceUnavailable)
		);
	}

	#[test]
	fn test_resize_rebuilds_set_and_keeps_state() {
		let scheduler = ManualScheduler::default();
		let mut r = renderer();
		r.initialize(Some(SurfaceSize::new(400, 300)), DisplayMode::Dark, &scheduler)
			.unwrap();
		let before = r.field().unwrap().particles.clone();
		let state = r.state();

		r.resize(SurfaceSize::new(800, 600)).unwrap();
		assert_eq!(r.particle_count(), 24);
		assert_eq!(r.field().unwrap().size(), SurfaceSize::new(800, 600));
		assert_eq!(r.state(), state);

		r.resize(SurfaceSize::new(400, 300)).unwrap();
		assert_eq!(r.particle_count(), 6);
		assert_ne!(r.field().unwrap().particles, before);

		r.resize(SurfaceSize::new(0, 0)).unwrap();
		assert_eq!(r.particle_count(), 0);
	}

	#[test]
	fn test_tick_moves_draws_and_rearms() {
		let scheduler = ManualScheduler::default();
		let mut r = renderer();
		r.initialize(Some(SurfaceSize::new(400, 300)), DisplayMode::Dark, &scheduler)
			.unwrap();
		let before = r.field().unwrap().particles.clone();

		scheduler.fire().unwrap();
		let mut painter = RecordingPainter::default();
		assert!(r.tick(&mut painter, &scheduler));

		let after = &r.field().unwrap().particles;
		for (old, new) in before.iter().zip(after) {
			assert_eq!(new.x, old.x + old.vx);
			assert_eq!(new.y, old.y + old.vy);
		}
		assert_eq!(painter.circles(), 6);
		assert_eq!(*scheduler.pending.borrow(), vec![FrameHandle(2)]);
	}

	#[test]
	fn test_empty_field_still_reschedules() {
		let scheduler = ManualScheduler::default();
		let mut r = renderer();
		r.initialize(Some(SurfaceSize::new(10, 10)), DisplayMode::Light, &scheduler)
			.unwrap();
		assert_eq!(r.particle_count(), 0);

		scheduler.fire().unwrap();
		let mut painter = RecordingPainter::default();
		assert!(r.tick(&mut painter, &scheduler));
		assert_eq!(painter.circles(), 0);
		assert_eq!(scheduler.pending.borrow().len(), 1);
	}

	#[test]
	fn test_teardown_prevents_further_ticks() {
		let scheduler = ManualScheduler::default();
		let mut r = renderer();
		r.initialize(Some(SurfaceSize::new(400, 300)), DisplayMode::Dark, &scheduler)
			.unwrap();

		r.teardown(&scheduler);
		assert_eq!(r.state(), LoopState::Stopped);
		assert!(scheduler.pending.borrow().is_empty());

		let mut painter = RecordingPainter::default();
		assert!(!r.tick(&mut painter, &scheduler));
		assert!(painter.calls.is_empty());
		assert!(scheduler.pending.borrow().is_empty());

		r.teardown(&scheduler);
		assert_eq!(r.state(), LoopState::Stopped);
		assert_eq!(scheduler.cancelled.borrow().len(), 1);
	}

	#[test]
	fn test_set_mode_only_swaps_colors() {
		let scheduler = ManualScheduler::default();
		let mut r = renderer();
		r.initialize(Some(SurfaceSize::new(400, 300)), DisplayMode::Dark, &scheduler)
			.unwrap();
		let before = r.field().unwrap().particles.clone();

		r.set_mode(DisplayMode::Light);
		assert_eq!(r.mode(), DisplayMode::Light);
		assert_eq!(*r.palette(), FieldPalette::for_mode(DisplayMode::Light));
		assert_eq!(r.field().unwrap().particles, before);

		scheduler.fire().unwrap();
		let mut painter = RecordingPainter::default();
		r.tick(&mut painter, &scheduler);
		let light = FieldPalette::for_mode(DisplayMode::Light).particle;
		assert!(painter.calls.iter().all(|c| match c {
			super::super::render::tests::Stroke::Circle { color, .. } => *color == light,
			_ => true,
		}));
	}

	#[test]
	fn test_fixed_seed_is_reproducible() {
		let config = FieldConfig {
			seed: Some(5),
			..FieldConfig::default()
		};
		let scheduler = ManualScheduler::default();
		let mut a = ParticleRenderer::new(config.clone(), 1);
		let mut b = ParticleRenderer::new(config, 2);
		let size = Some(SurfaceSize::new(640, 480));
		a.initialize(size, DisplayMode::Dark, &scheduler).unwrap();
		b.initialize(size, DisplayMode::Dark, &scheduler).unwrap();
		assert_eq!(a.field().unwrap().particles, b.field().unwrap().particles);
	}
}
