//! Frame scheduling for the animation loop.
//!
//! The loop re-arms itself once per frame through a [`FrameScheduler`] and
//! keeps the handle of the pending frame so teardown has something concrete
//! to cancel. In the browser the scheduler is `requestAnimationFrame`; tests
//! drive it by hand.

use log::warn;

use super::error::FieldError;

/// Token returned by the host for a scheduled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Host primitive that runs a callback before the next repaint.
pub trait FrameScheduler {
	/// Schedule the frame callback once.
	fn request_frame(&self) -> Result<FrameHandle, FieldError>;
	/// Cancel a frame previously returned by [`request_frame`](Self::request_frame).
	fn cancel_frame(&self, handle: FrameHandle);
}

/// Whether the loop is animating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
	#[default]
	Stopped,
	/// `pending` is the frame that will run next, if one is armed.
	Running { pending: Option<FrameHandle> },
}

/// Running/Stopped machine around a [`FrameScheduler`].
#[derive(Debug, Default)]
pub struct FrameLoop {
	state: LoopState,
	frames: u64,
}

impl FrameLoop {
	pub fn state(&self) -> LoopState {
		self.state
	}

	pub fn is_running(&self) -> bool {
		matches!(self.state, LoopState::Running { .. })
	}

	/// Number of frames that have run since construction.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Stopped -> Running, arming the first frame. No-op while already running.
	pub fn start(&mut self, scheduler: &impl FrameScheduler) {
		if self.is_running() {
			return;
		}
		self.state = LoopState::Running { pending: None };
		self.arm(scheduler);
	}

	/// Called when a scheduled frame fires. Returns `false` if the loop was
	/// stopped in the meantime and the frame must not run.
	pub fn begin_frame(&mut self) -> bool {
		match self.state {
			LoopState::Running { .. } => {
				self.state = LoopState::Running { pending: None };
				self.frames += 1;
				true
			}
			LoopState::Stopped => false,
		}
	}

	/// Schedule the next frame if still running.
	pub fn arm(&mut self, scheduler: &impl FrameScheduler) {
		let LoopState::Running { pending } = self.state else {
			return;
		};
		if pending.is_some() {
			return;
		}
		match scheduler.request_frame() {
			Ok(handle) => {
				self.state = LoopState::Running {
					pending: Some(handle),
				};
			}
			Err(e) => {
				warn!("particle-field: stopping animation, {}", e);
				self.state = LoopState::Stopped;
			}
		}
	}

	/// Cancel the pending frame and stop. Idempotent.
	pub fn stop(&mut self, scheduler: &impl FrameScheduler) {
		if let LoopState::Running {
			pending: Some(handle),
		} = self.state
		{
			scheduler.cancel_frame(handle);
		}
		self.state = LoopState::Stopped;
	}
}
