//! Particle-field background component.
//!
//! Draws a field of slowly drifting points on an HTML canvas, joining pairs
//! that come within a fixed distance with a faint line:
//! - Particle count follows surface area and is regenerated on every resize
//! - Particles bounce off the surface edges
//! - Colours follow the light/dark display mode
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{DisplayMode, ParticleFieldCanvas};
//!
//! let (mode, _) = signal(DisplayMode::Dark);
//!
//! view! { <ParticleFieldCanvas mode=mode /> }
//! ```

mod component;
pub mod config;
mod error;
pub mod particles;
mod render;
pub mod scheduler;
mod state;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use error::FieldError;
pub use particles::{Particle, ParticleField, SurfaceSize};
pub use render::{Painter, render};
pub use scheduler::{FrameHandle, FrameLoop, FrameScheduler, LoopState};
pub use state::ParticleRenderer;
pub use theme::{Color, DisplayMode, FieldPalette};
