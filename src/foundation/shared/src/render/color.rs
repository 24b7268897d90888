use std::fmt;

use crate::validate::{alpha, ArgumentError};

// === Color === //

/// A packed 32-bit `0xAARRGGBB` color.
#[derive(Copy, Clone, Hash, Eq, PartialEq)]
pub struct Color(u32);

impl Color {
	pub const WHITE: Self = Self(0xFFFFFFFF);
	pub const BLACK: Self = Self(0xFF000000);
	pub const RED: Self = Self(0xFFFF0000);
	pub const GREEN: Self = Self(0xFF00FF00);
	pub const BLUE: Self = Self(0xFF0000FF);
	pub const TRANSPARENT: Self = Self(0);

	pub const fn from_argb(argb: u32) -> Self {
		Self(argb)
	}

	/// An opaque color from its `0xRRGGBB` bits. Any alpha bits are overwritten.
	pub const fn from_rgb_u32(rgb: u32) -> Self {
		Self(rgb | 0xFF000000)
	}

	pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
		Self::from_rgb_u32(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
	}

	pub fn with_alpha(self, value: i32) -> Result<Self, ArgumentError> {
		let value = alpha("alpha", value)?;
		Ok(Self((self.0 & 0x00FFFFFF) | ((value as u32) << 24)))
	}

	pub const fn argb(self) -> u32 {
		self.0
	}

	pub const fn rgb_bits(self) -> u32 {
		self.0 & 0x00FFFFFF
	}

	/// The signed form colors take inside parameter lists.
	pub const fn packed(self) -> i32 {
		self.0 as i32
	}

	pub const fn from_packed(packed: i32) -> Self {
		Self(packed as u32)
	}

	pub const fn alpha(self) -> u8 {
		(self.0 >> 24) as u8
	}

	pub const fn red(self) -> u8 {
		(self.0 >> 16) as u8
	}

	pub const fn green(self) -> u8 {
		(self.0 >> 8) as u8
	}

	pub const fn blue(self) -> u8 {
		self.0 as u8
	}
}

impl fmt::Debug for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Color(#{:08x})", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn components() {
		let color = Color::rgb(0x12, 0x34, 0x56);
		assert_eq!(color.argb(), 0xFF123456);
		assert_eq!((color.red(), color.green(), color.blue()), (0x12, 0x34, 0x56));
		assert_eq!(color.alpha(), 0xFF);
		assert_eq!(Color::WHITE.packed(), -1);
	}

	#[test]
	fn alpha_replaces_top_byte() {
		let color = Color::RED.with_alpha(0x80).unwrap();
		assert_eq!(color.argb(), 0x80FF0000);
		assert_eq!(color.rgb_bits(), 0xFF0000);
		assert!(Color::RED.with_alpha(300).is_err());
	}
}
