use serde_json::json;

use super::Color;

// === Text === //

pub const FONT_HEIGHT: i32 = 9;

/// A chat component that can be drawn on screen.
pub trait Text {
	fn to_json(&self) -> String;

	fn color(&self) -> Color;

	fn drop_shadow(&self) -> bool;
}

/// The JSON form of a bare string, as sent by the plain-string text factories.
pub fn raw_text_json(text: &str) -> String {
	// The receiving side expects the `"text": ` spacing.
	format!("{{\"text\": {}}}", json!(text))
}

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct PlainText {
	pub text: String,
	pub color: Color,
	pub drop_shadow: bool,
}

impl PlainText {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			color: Color::WHITE,
			drop_shadow: false,
		}
	}

	pub fn empty() -> Self {
		Self::new("")
	}

	pub fn with_color(mut self, color: Color) -> Self {
		self.color = color;
		self
	}

	pub fn with_drop_shadow(mut self, drop_shadow: bool) -> Self {
		self.drop_shadow = drop_shadow;
		self
	}
}

impl Text for PlainText {
	fn to_json(&self) -> String {
		json!({
			"text": self.text,
			"color": format!("#{:06x}", self.color.rgb_bits()),
		})
		.to_string()
	}

	fn color(&self) -> Color {
		self.color
	}

	fn drop_shadow(&self) -> bool {
		self.drop_shadow
	}
}

/// A pre-serialized chat component, passed through untouched.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct JsonText {
	pub json: String,
	pub color: Color,
	pub drop_shadow: bool,
}

impl JsonText {
	pub fn new(json: impl Into<String>) -> Self {
		Self {
			json: json.into(),
			color: Color::WHITE,
			drop_shadow: false,
		}
	}
}

impl Text for JsonText {
	fn to_json(&self) -> String {
		self.json.clone()
	}

	fn color(&self) -> Color {
		self.color
	}

	fn drop_shadow(&self) -> bool {
		self.drop_shadow
	}
}
