//! particle-field: animated particle background for a single-page portfolio.
//!
//! This crate provides a WASM canvas component that renders a drifting field
//! of points joined by faint lines, sized to the viewport and coloured by the
//! light/dark display mode.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_use::use_preferred_dark;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{DisplayMode, FieldConfig, ParticleFieldCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Parse field configuration JSON, falling back to defaults when malformed.
pub fn parse_field_config(json_text: &str) -> FieldConfig {
	match serde_json::from_str::<FieldConfig>(json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config (density {}, link distance {})",
				config.density, config.link_distance
			);
			config
		}
		Err(e) => {
			warn!("particle-field: failed to parse config: {}", e);
			FieldConfig::default()
		}
	}
}

/// Load field configuration from a script element with id="particle-field-config".
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	Some(parse_field_config(&json_text))
}

/// Main application component.
/// Hosts the particle field behind the hero heading, with a light/dark toggle.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();
	let prefers_dark = use_preferred_dark();
	let (mode, set_mode) = signal(DisplayMode::from_dark(prefers_dark.get_untracked()));
	let toggle = move |_| set_mode.update(|m| *m = m.toggled());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=move || mode.get().as_str() />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section id="home" class="hero" style="position: relative; min-height: 100vh; overflow: hidden;">
			<ParticleFieldCanvas mode=mode config=config />
			<div class="hero-content">
				<h1>"Hello, I build things for the web."</h1>
				<button class="mode-toggle" on:click=toggle>
					{move || match mode.get() {
						DisplayMode::Dark => "Light mode",
						DisplayMode::Light => "Dark mode",
					}}
				</button>
			</div>
		</section>
	}
}
