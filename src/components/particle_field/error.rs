//! Error type for the particle field.
//!
//! None of these are fatal. Callers log them and either retry on the next
//! reactive run or draw nothing for the frame.

use thiserror::Error;

/// Conditions under which the field cannot proceed right now.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
	/// The canvas is not mounted yet, or the renderer has not been initialized.
	#[error("drawing surface is not available")]
	SurfaceUnavailable,
	/// The canvas exists but refused to hand out a 2d context.
	#[error("2d rendering context is not available")]
	ContextUnavailable,
	/// The host declined to schedule the next frame.
	#[error("failed to request animation frame: {0}")]
	FrameRequest(String),
}
