//! Colours for the particle field.
//!
//! The field only ever needs two colours: the particle fill and the connection
//! line. Both are picked from the current [`DisplayMode`].

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same colour with alpha replaced, clamped to `[0, 1]`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Light/dark colour scheme flag.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
	Light,
	#[default]
	Dark,
}

impl DisplayMode {
	pub fn from_dark(is_dark: bool) -> Self {
		if is_dark { Self::Dark } else { Self::Light }
	}

	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}
}

/// Brand violet shared by both modes.
const ACCENT: Color = Color::rgb(123, 74, 226);

/// The two colours used to draw a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPalette {
	/// Fill for particle discs.
	pub particle: Color,
	/// Connection line colour. Its alpha is the opacity of a zero-length link.
	pub line: Color,
}

impl FieldPalette {
	pub fn for_mode(mode: DisplayMode) -> Self {
		match mode {
			DisplayMode::Dark => Self {
				particle: ACCENT.with_alpha(0.7),
				line: ACCENT.with_alpha(0.15),
			},
			DisplayMode::Light => Self {
				particle: ACCENT.with_alpha(0.5),
				line: ACCENT.with_alpha(0.1),
			},
		}
	}

	/// Opacity a link starts from before distance falloff.
	pub fn base_line_opacity(&self) -> f64 {
		self.line.a
	}
}

impl Default for FieldPalette {
	fn default() -> Self {
		Self::for_mode(DisplayMode::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_palette_per_mode() {
		let dark = FieldPalette::for_mode(DisplayMode::Dark);
		assert_eq!(dark.particle.to_css(), "rgba(123, 74, 226, 0.7)");
		assert_eq!(dark.line.to_css(), "rgba(123, 74, 226, 0.15)");

		let light = FieldPalette::for_mode(DisplayMode::Light);
		assert_eq!(light.particle.to_css(), "rgba(123, 74, 226, 0.5)");
		assert_eq!(light.base_line_opacity(), 0.1);
	}

	#[test]
	fn test_color_css() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(2.0).to_css(), "#010203");
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(-1.0).a, 0.0);
	}

	#[test]
	fn test_display_mode() {
		assert_eq!(DisplayMode::from_dark(true), DisplayMode::Dark);
		assert_eq!(DisplayMode::Light.toggled(), DisplayMode::Dark);
		assert_eq!(DisplayMode::Dark.as_str(), "dark");
		let mode: DisplayMode = serde_json::from_str(r#""light""#).unwrap();
		assert_eq!(mode, DisplayMode::Light);
	}
}
