use glam::{Mat4, Quat};
use uuid::Uuid;

use crate::{
	identifier::Identifier,
	instruction::RenderInstruction,
	render::{DrawingContext, RenderBuffer},
	screen::{Overlay, Toast},
};

use super::{ParamError, ParamKind, ParamValue, ParameterList, Uri};

// === FromParam === //

/// A Rust type that a single [`ParamValue`] kind can be read as.
pub trait FromParam<'a>: Sized {
	const KIND: ParamKind;

	fn from_param(value: &'a ParamValue) -> Option<Self>;
}

macro_rules! impl_from_param {
	(copy: $($ty:ty => $variant:ident),*$(,)?) => {$(
		impl<'a> FromParam<'a> for $ty {
			const KIND: ParamKind = ParamKind::$variant;

			fn from_param(value: &'a ParamValue) -> Option<Self> {
				match value {
					ParamValue::$variant(inner) => Some(*inner),
					_ => None,
				}
			}
		}
	)*};
	(ref: $($ty:ty => $variant:ident),*$(,)?) => {$(
		impl<'a> FromParam<'a> for &'a $ty {
			const KIND: ParamKind = ParamKind::$variant;

			fn from_param(value: &'a ParamValue) -> Option<Self> {
				match value {
					ParamValue::$variant(inner) => Some(inner),
					_ => None,
				}
			}
		}
	)*};
}

impl_from_param!(copy:
	i32 => Int,
	i64 => Long,
	f32 => Float,
	f64 => Double,
	bool => Bool,
	Uuid => Uuid,
	Quat => Quat,
	Mat4 => Mat4,
);

impl_from_param!(ref:
	Identifier => Identifier,
	Uri => Uri,
	DrawingContext => Context,
	Overlay => Overlay,
	Toast => Toast,
	RenderBuffer => Buffer,
	RenderInstruction => Renderer,
);

impl<'a> FromParam<'a> for &'a str {
	const KIND: ParamKind = ParamKind::Str;

	fn from_param(value: &'a ParamValue) -> Option<Self> {
		match value {
			ParamValue::Str(inner) => Some(inner.as_str()),
			_ => None,
		}
	}
}

impl<'a> FromParam<'a> for &'a [u8] {
	const KIND: ParamKind = ParamKind::Bytes;

	fn from_param(value: &'a ParamValue) -> Option<Self> {
		match value {
			ParamValue::Bytes(inner) => Some(inner.as_slice()),
			_ => None,
		}
	}
}

fn cast<'a, T: FromParam<'a>>(index: usize, value: &'a ParamValue) -> Result<T, ParamError> {
	T::from_param(value).ok_or(ParamError::TypeMismatch {
		index,
		expected: T::KIND,
		found: value.kind(),
	})
}

// === Parameterized === //

macro_rules! typed_getters {
	($($ty:ty, $zero:expr => $get:ident, $get_or:ident, $first:ident, $last:ident;)*) => {$(
		fn $get(&self, index: usize) -> Result<$ty, ParamError> {
			self.parameter_or(index, $zero)
		}

		fn $get_or(&self, index: usize, default: $ty) -> Result<$ty, ParamError> {
			self.parameter_or(index, default)
		}

		fn $first(&self) -> Result<$ty, ParamError> {
			self.first_parameter_as()
		}

		fn $last(&self) -> Result<$ty, ParamError> {
			self.last_parameter_as()
		}
	)*};
}

/// Positional, typed read access to an ordered parameter list.
///
/// Every getter is pure. Index-based getters fail with [`ParamError::OutOfRange`] past the end
/// of the list, and with [`ParamError::TypeMismatch`] when the stored value has a different kind.
/// The `*_or` getters and the plain typed getters fall back to a default only when the stored
/// value is [`ParamValue::Null`].
pub trait Parameterized {
	fn parameters(&self) -> &ParameterList;

	fn parameter(&self, index: usize) -> Result<&ParamValue, ParamError> {
		self.parameters().get(index)
	}

	fn parameter_as<'a, T: FromParam<'a>>(&'a self, index: usize) -> Result<T, ParamError> {
		cast(index, self.parameter(index)?)
	}

	fn parameter_or<'a, T: FromParam<'a>>(&'a self, index: usize, default: T) -> Result<T, ParamError> {
		let value = self.parameter(index)?;

		if value.is_null() {
			Ok(default)
		} else {
			cast(index, value)
		}
	}

	fn first_parameter(&self) -> Result<&ParamValue, ParamError> {
		self.parameters().first()
	}

	fn last_parameter(&self) -> Result<&ParamValue, ParamError> {
		self.parameters().last()
	}

	fn first_parameter_as<'a, T: FromParam<'a>>(&'a self) -> Result<T, ParamError> {
		cast(0, self.first_parameter()?)
	}

	fn last_parameter_as<'a, T: FromParam<'a>>(&'a self) -> Result<T, ParamError> {
		let value = self.last_parameter()?;
		cast(self.parameters().len() - 1, value)
	}

	typed_getters! {
		i32, 0 => int_parameter, int_parameter_or, first_int_parameter, last_int_parameter;
		i64, 0 => long_parameter, long_parameter_or, first_long_parameter, last_long_parameter;
		f32, 0.0 => float_parameter, float_parameter_or, first_float_parameter, last_float_parameter;
		f64, 0.0 => double_parameter, double_parameter_or, first_double_parameter, last_double_parameter;
		bool, false => bool_parameter, bool_parameter_or, first_bool_parameter, last_bool_parameter;
	}

	fn string_parameter(&self, index: usize) -> Result<&str, ParamError> {
		self.parameter_or(index, "")
	}

	fn string_parameter_or<'a>(&'a self, index: usize, default: &'a str) -> Result<&'a str, ParamError> {
		self.parameter_or(index, default)
	}

	fn first_string_parameter(&self) -> Result<&str, ParamError> {
		self.first_parameter_as()
	}

	fn last_string_parameter(&self) -> Result<&str, ParamError> {
		self.last_parameter_as()
	}
}
