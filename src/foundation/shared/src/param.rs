mod access;
mod uri;
mod value;

pub use access::*;
pub use uri::*;
pub use value::*;

use std::{ops::Index, slice};

use thiserror::Error;

// === ParamError === //

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParamError {
	#[error("parameter index {index} is out of range for a list of {len} parameter(s)")]
	OutOfRange { index: usize, len: usize },
	#[error("parameter {index} is a {found} but a {expected} was requested")]
	TypeMismatch {
		index: usize,
		expected: ParamKind,
		found: ParamKind,
	},
	#[error("parameter list is empty")]
	Empty,
}

// === ParameterList === //

/// An ordered list of wire values. Lists are built once and never mutated.
#[derive(Debug, Clone, Default, Hash, Eq, PartialEq)]
pub struct ParameterList {
	values: Vec<ParamValue>,
}

#[macro_export]
macro_rules! params {
	($($value:expr),* $(,)?) => {
		$crate::param::ParameterList::from(::std::vec![
			$($crate::param::ParamValue::from($value)),*
		])
	};
}

impl ParameterList {
	pub const fn new() -> Self {
		Self { values: Vec::new() }
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn get(&self, index: usize) -> Result<&ParamValue, ParamError> {
		self.values.get(index).ok_or(ParamError::OutOfRange {
			index,
			len: self.values.len(),
		})
	}

	pub fn first(&self) -> Result<&ParamValue, ParamError> {
		self.values.first().ok_or(ParamError::Empty)
	}

	pub fn last(&self) -> Result<&ParamValue, ParamError> {
		self.values.last().ok_or(ParamError::Empty)
	}

	pub fn as_slice(&self) -> &[ParamValue] {
		&self.values
	}

	pub fn iter(&self) -> slice::Iter<'_, ParamValue> {
		self.values.iter()
	}
}

impl From<Vec<ParamValue>> for ParameterList {
	fn from(values: Vec<ParamValue>) -> Self {
		Self { values }
	}
}

impl FromIterator<ParamValue> for ParameterList {
	fn from_iter<I: IntoIterator<Item = ParamValue>>(iter: I) -> Self {
		Self {
			values: iter.into_iter().collect(),
		}
	}
}

impl Index<usize> for ParameterList {
	type Output = ParamValue;

	fn index(&self, index: usize) -> &Self::Output {
		&self.values[index]
	}
}

impl<'a> IntoIterator for &'a ParameterList {
	type Item = &'a ParamValue;
	type IntoIter = slice::Iter<'a, ParamValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.iter()
	}
}

impl Parameterized for ParameterList {
	fn parameters(&self) -> &ParameterList {
		self
	}
}

#[cfg(test)]
mod tests {
	use glam::Quat;

	use super::*;
	use crate::identifier::Identifier;

	fn sample() -> ParameterList {
		params![7, 9_000_000_000i64, 0.5f32, true, "hello", ParamValue::Null]
	}

	#[test]
	fn positional_access() {
		let list = sample();

		assert_eq!(list.len(), 6);
		assert_eq!(list.get(0), Ok(&ParamValue::Int(7)));
		assert_eq!(list.first(), Ok(&ParamValue::Int(7)));
		assert_eq!(list.last(), Ok(&ParamValue::Null));
		assert_eq!(list.get(6), Err(ParamError::OutOfRange { index: 6, len: 6 }));
		assert_eq!(ParameterList::new().first(), Err(ParamError::Empty));
	}

	#[test]
	fn typed_casts_are_strict() {
		let list = sample();

		assert_eq!(list.parameter_as::<i32>(0), Ok(7));
		assert_eq!(list.parameter_as::<&str>(4), Ok("hello"));
		assert_eq!(
			list.parameter_as::<i64>(0),
			Err(ParamError::TypeMismatch {
				index: 0,
				expected: ParamKind::Long,
				found: ParamKind::Int,
			})
		);
	}

	#[test]
	fn defaults_only_apply_to_null() {
		let list = sample();

		assert_eq!(list.parameter_or(5, 42), Ok(42));
		assert_eq!(list.parameter_or(0, 42), Ok(7));
		assert!(list.parameter_or(4, 42).is_err());
		assert!(list.parameter_or(10, 42).is_err());

		assert_eq!(list.int_parameter(5), Ok(0));
		assert_eq!(list.string_parameter(5), Ok(""));
		assert_eq!(list.bool_parameter_or(5, true), Ok(true));
		assert_eq!(list.long_parameter(1), Ok(9_000_000_000));
	}

	#[test]
	fn first_and_last_typed() {
		let list = params!["fill", 1, 2, 500i64];

		assert_eq!(list.first_string_parameter(), Ok("fill"));
		assert_eq!(list.last_long_parameter(), Ok(500));
		assert!(list.last_int_parameter().is_err());
		assert!(ParameterList::new().first_int_parameter().is_err());
	}

	#[test]
	fn floats_compare_by_bits() {
		assert_eq!(params![f32::NAN], params![f32::NAN]);
		assert_ne!(params![0.0f64], params![-0.0f64]);
		assert_eq!(params![Quat::IDENTITY], params![Quat::IDENTITY]);
	}

	#[test]
	fn borrowed_domain_values() {
		let id = Identifier::minecraft("stone").unwrap();
		let list = params![id.clone(), vec![1u8, 2, 3]];

		assert_eq!(list.parameter_as::<&Identifier>(0), Ok(&id));
		assert_eq!(list.last_parameter_as::<&[u8]>(), Ok(&[1u8, 2, 3][..]));
	}
}
