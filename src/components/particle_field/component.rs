//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a canvas element that sits behind its siblings and
//! drives a [`ParticleRenderer`] from `requestAnimationFrame`. Size changes
//! arrive through `leptos-use` signals (window or element), display-mode
//! changes through the `mode` prop, and unmounting tears the loop down.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use leptos_use::{UseElementSizeReturn, UseWindowSizeReturn, use_element_size, use_window_size};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::FieldConfig;
use super::error::FieldError;
use super::particles::SurfaceSize;
use super::scheduler::{FrameHandle, FrameScheduler};
use super::state::ParticleRenderer;
use super::theme::DisplayMode;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` as a [`FrameScheduler`].
///
/// Without a callback it can still cancel, which is all teardown needs.
struct AnimationFrames<'a> {
	callback: Option<&'a Closure<dyn FnMut()>>,
}

impl FrameScheduler for AnimationFrames<'_> {
	fn request_frame(&self) -> Result<FrameHandle, FieldError> {
		let callback = self
			.callback
			.ok_or_else(|| FieldError::FrameRequest("no frame callback".into()))?;
		let window =
			web_sys::window().ok_or_else(|| FieldError::FrameRequest("no window".into()))?;
		window
			.request_animation_frame(callback.as_ref().unchecked_ref())
			.map(FrameHandle)
			.map_err(|e| FieldError::FrameRequest(format!("{:?}", e)))
	}

	fn cancel_frame(&self, handle: FrameHandle) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle.0);
		}
	}
}

fn window_inner_size() -> Option<(f64, f64)> {
	let window = web_sys::window()?;
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Work out the surface size: explicit props win, then the window (fullscreen),
/// then the parent element.
fn measure(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> SurfaceSize {
	let window = if fullscreen { window_inner_size() } else { None };
	let parent = canvas.parent_element();
	let w = width.or(window.map(|(w, _)| w)).unwrap_or_else(|| {
		parent
			.as_ref()
			.map(|p| p.client_width() as f64)
			.unwrap_or(800.0)
	});
	let h = height.or(window.map(|(_, h)| h)).unwrap_or_else(|| {
		parent
			.as_ref()
			.map(|p| p.client_height() as f64)
			.unwrap_or(600.0)
	});
	SurfaceSize::from_css(w, h)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, FieldError> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
		.ok_or(FieldError::ContextUnavailable)
}

/// What the canvas follows after mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SizeSource {
	Window,
	Element,
	Fixed,
}

impl SizeSource {
	fn pick(fullscreen: bool, width: Option<f64>, height: Option<f64>) -> Self {
		match (width, height) {
			(None, None) if fullscreen => Self::Window,
			(None, None) => Self::Element,
			_ => Self::Fixed,
		}
	}
}

fn apply_size(canvas: &HtmlCanvasElement, size: SurfaceSize) {
	canvas.set_width(size.width);
	canvas.set_height(size.height);
}

/// Animated particle background.
///
/// Renders an absolutely positioned canvas meant to sit behind the content of
/// its parent. With `fullscreen` (the default) it tracks the window size;
/// otherwise it tracks its own box, which fills the parent. Explicit
/// `width`/`height` fix the size and disable resizing.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] mode: Signal<DisplayMode>,
	#[prop(optional)] config: FieldConfig,
	#[prop(default = true)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let renderer = Arc::new(Mutex::new(ParticleRenderer::new(config, seed)));
	let animate: FrameCallback = Rc::new(RefCell::new(None));

	let (renderer_init, animate_init) = (renderer.clone(), animate.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if renderer_init.lock().map_or(true, |r| r.is_running()) {
			return;
		}

		let mut ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(e) => {
				debug!("particle-field: {}, will retry", e);
				return;
			}
		};
		let size = measure(&canvas, fullscreen, width, height);
		apply_size(&canvas, size);

		let (renderer_anim, animate_inner) = (renderer_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let callback = animate_inner.borrow();
			let frames = AnimationFrames {
				callback: callback.as_ref(),
			};
			if let Ok(mut r) = renderer_anim.lock() {
				r.tick(&mut ctx, &frames);
			}
		}));

		let callback = animate_init.borrow();
		let frames = AnimationFrames {
			callback: callback.as_ref(),
		};
		if let Ok(mut r) = renderer_init.lock() {
			if let Err(e) = r.initialize(Some(size), mode.get_untracked(), &frames) {
				debug!("particle-field: initialize skipped, {}", e);
			}
		}
	});

	let tracked_size = match SizeSource::pick(fullscreen, width, height) {
		SizeSource::Window => {
			let UseWindowSizeReturn { width, height } = use_window_size();
			Some((width, height))
		}
		SizeSource::Element => {
			let UseElementSizeReturn { width, height } = use_element_size(canvas_ref);
			Some((width, height))
		}
		SizeSource::Fixed => None,
	};
	if let Some((tracked_width, tracked_height)) = tracked_size {
		let renderer_resize = renderer.clone();
		Effect::watch(
			move || (tracked_width.get(), tracked_height.get()),
			move |&(w, h), _, _| {
				let size = SurfaceSize::from_css(w, h);
				if let Some(canvas) = canvas_ref.get_untracked() {
					let canvas: HtmlCanvasElement = canvas.into();
					apply_size(&canvas, size);
				}
				if let Ok(mut r) = renderer_resize.lock() {
					if let Err(e) = r.resize(size) {
						debug!("particle-field: resize skipped, {}", e);
					}
				}
			},
			false,
		);
	}

	let renderer_mode = renderer.clone();
	Effect::new(move |_| {
		let mode = mode.get();
		if let Ok(mut r) = renderer_mode.lock() {
			r.set_mode(mode);
		}
	});

	on_cleanup(move || match renderer.lock() {
		Ok(mut r) => r.teardown(&AnimationFrames { callback: None }),
		Err(_) => warn!("particle-field: renderer poisoned during teardown"),
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style="position: absolute; inset: 0; width: 100%; height: 100%; z-index: -10; pointer-events: none;"
		/>
	}
}
