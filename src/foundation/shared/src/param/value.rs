use std::{
	fmt,
	hash::{Hash, Hasher},
	mem,
};

use glam::{Mat4, Quat};
use uuid::Uuid;

use crate::{
	identifier::Identifier,
	instruction::RenderInstruction,
	render::{Color, DrawingContext, RenderBuffer},
	screen::{Overlay, Toast},
};

use super::Uri;

// === ParamValue === //

/// Every kind of value that can travel inside a parameter list.
#[derive(Debug, Clone, Default)]
pub enum ParamValue {
	#[default]
	Null,
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	Bool(bool),
	Str(String),
	Bytes(Vec<u8>),
	Identifier(Identifier),
	Uri(Uri),
	Uuid(Uuid),
	Quat(Quat),
	Mat4(Mat4),
	Context(DrawingContext),
	Overlay(Overlay),
	Toast(Toast),
	Buffer(RenderBuffer),
	Renderer(RenderInstruction),
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ParamKind {
	Null,
	Int,
	Long,
	Float,
	Double,
	Bool,
	Str,
	Bytes,
	Identifier,
	Uri,
	Uuid,
	Quat,
	Mat4,
	Context,
	Overlay,
	Toast,
	Buffer,
	Renderer,
}

impl ParamKind {
	pub const fn name(self) -> &'static str {
		match self {
			ParamKind::Null => "null",
			ParamKind::Int => "int",
			ParamKind::Long => "long",
			ParamKind::Float => "float",
			ParamKind::Double => "double",
			ParamKind::Bool => "bool",
			ParamKind::Str => "string",
			ParamKind::Bytes => "byte string",
			ParamKind::Identifier => "identifier",
			ParamKind::Uri => "uri",
			ParamKind::Uuid => "uuid",
			ParamKind::Quat => "quaternion",
			ParamKind::Mat4 => "matrix",
			ParamKind::Context => "drawing context",
			ParamKind::Overlay => "overlay",
			ParamKind::Toast => "toast",
			ParamKind::Buffer => "render buffer",
			ParamKind::Renderer => "render instruction",
		}
	}
}

impl fmt::Display for ParamKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl ParamValue {
	pub fn kind(&self) -> ParamKind {
		match self {
			ParamValue::Null => ParamKind::Null,
			ParamValue::Int(_) => ParamKind::Int,
			ParamValue::Long(_) => ParamKind::Long,
			ParamValue::Float(_) => ParamKind::Float,
			ParamValue::Double(_) => ParamKind::Double,
			ParamValue::Bool(_) => ParamKind::Bool,
			ParamValue::Str(_) => ParamKind::Str,
			ParamValue::Bytes(_) => ParamKind::Bytes,
			ParamValue::Identifier(_) => ParamKind::Identifier,
			ParamValue::Uri(_) => ParamKind::Uri,
			ParamValue::Uuid(_) => ParamKind::Uuid,
			ParamValue::Quat(_) => ParamKind::Quat,
			ParamValue::Mat4(_) => ParamKind::Mat4,
			ParamValue::Context(_) => ParamKind::Context,
			ParamValue::Overlay(_) => ParamKind::Overlay,
			ParamValue::Toast(_) => ParamKind::Toast,
			ParamValue::Buffer(_) => ParamKind::Buffer,
			ParamValue::Renderer(_) => ParamKind::Renderer,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, ParamValue::Null)
	}
}

// === Equality === //

// Floating point components are compared by bit pattern so that `Eq` and `Hash` agree.

fn quat_bits(quat: &Quat) -> [u32; 4] {
	quat.to_array().map(f32::to_bits)
}

fn mat4_bits(mat: &Mat4) -> [u32; 16] {
	mat.to_cols_array().map(f32::to_bits)
}

impl PartialEq for ParamValue {
	fn eq(&self, other: &Self) -> bool {
		use ParamValue as V;

		match (self, other) {
			(V::Null, V::Null) => true,
			(V::Int(a), V::Int(b)) => a == b,
			(V::Long(a), V::Long(b)) => a == b,
			(V::Float(a), V::Float(b)) => a.to_bits() == b.to_bits(),
			(V::Double(a), V::Double(b)) => a.to_bits() == b.to_bits(),
			(V::Bool(a), V::Bool(b)) => a == b,
			(V::Str(a), V::Str(b)) => a == b,
			(V::Bytes(a), V::Bytes(b)) => a == b,
			(V::Identifier(a), V::Identifier(b)) => a == b,
			(V::Uri(a), V::Uri(b)) => a == b,
			(V::Uuid(a), V::Uuid(b)) => a == b,
			(V::Quat(a), V::Quat(b)) => quat_bits(a) == quat_bits(b),
			(V::Mat4(a), V::Mat4(b)) => mat4_bits(a) == mat4_bits(b),
			(V::Context(a), V::Context(b)) => a == b,
			(V::Overlay(a), V::Overlay(b)) => a == b,
			(V::Toast(a), V::Toast(b)) => a == b,
			(V::Buffer(a), V::Buffer(b)) => a == b,
			(V::Renderer(a), V::Renderer(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for ParamValue {}

impl Hash for ParamValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		use ParamValue as V;

		mem::discriminant(self).hash(state);

		match self {
			V::Null => {}
			V::Int(v) => v.hash(state),
			V::Long(v) => v.hash(state),
			V::Float(v) => v.to_bits().hash(state),
			V::Double(v) => v.to_bits().hash(state),
			V::Bool(v) => v.hash(state),
			V::Str(v) => v.hash(state),
			V::Bytes(v) => v.hash(state),
			V::Identifier(v) => v.hash(state),
			V::Uri(v) => v.hash(state),
			V::Uuid(v) => v.hash(state),
			V::Quat(v) => quat_bits(v).hash(state),
			V::Mat4(v) => mat4_bits(v).hash(state),
			V::Context(v) => v.hash(state),
			V::Overlay(v) => v.hash(state),
			V::Toast(v) => v.hash(state),
			V::Buffer(v) => v.hash(state),
			V::Renderer(v) => v.hash(state),
		}
	}
}

// === Conversions === //

macro_rules! impl_from {
	($($ty:ty => $variant:ident),*$(,)?) => {$(
		impl From<$ty> for ParamValue {
			fn from(value: $ty) -> Self {
				ParamValue::$variant(value)
			}
		}
	)*};
}

impl_from!(
	i32 => Int,
	i64 => Long,
	f32 => Float,
	f64 => Double,
	bool => Bool,
	String => Str,
	Vec<u8> => Bytes,
	Identifier => Identifier,
	Uri => Uri,
	Uuid => Uuid,
	Quat => Quat,
	Mat4 => Mat4,
	DrawingContext => Context,
	Overlay => Overlay,
	Toast => Toast,
	RenderBuffer => Buffer,
	RenderInstruction => Renderer,
);

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		ParamValue::Str(value.to_string())
	}
}

impl From<&[u8]> for ParamValue {
	fn from(value: &[u8]) -> Self {
		ParamValue::Bytes(value.to_vec())
	}
}

impl From<Color> for ParamValue {
	fn from(value: Color) -> Self {
		ParamValue::Int(value.packed())
	}
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(ParamValue::Null, Into::into)
	}
}
