use std::fmt;

use thiserror::Error;

// === ArgumentError === //

#[derive(Debug, Clone, Hash, Eq, PartialEq, Error)]
#[error("argument `{argument}` {constraint}")]
pub struct ArgumentError {
	pub argument: &'static str,
	pub constraint: Constraint,
}

impl ArgumentError {
	pub fn new(argument: &'static str, constraint: Constraint) -> Self {
		Self {
			argument,
			constraint,
		}
	}

	pub fn invalid(argument: &'static str, reason: &'static str) -> Self {
		Self::new(argument, Constraint::Invalid(reason))
	}
}

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum Constraint {
	Negative,
	NotPositive,
	OutOfRange { min: i64, max: i64 },
	Empty,
	Inverted { max: &'static str },
	Invalid(&'static str),
}

impl fmt::Display for Constraint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Constraint::Negative => f.write_str("cannot be negative"),
			Constraint::NotPositive => f.write_str("must be greater than 0"),
			Constraint::OutOfRange { min, max } => write!(f, "must be between {min} and {max}"),
			Constraint::Empty => f.write_str("cannot be empty"),
			Constraint::Inverted { max } => write!(f, "cannot be greater than `{max}`"),
			Constraint::Invalid(reason) => f.write_str(reason),
		}
	}
}

// === Checks === //

pub fn non_negative<T>(argument: &'static str, value: T) -> Result<T, ArgumentError>
where
	T: Copy + Default + PartialOrd,
{
	match value.partial_cmp(&T::default()) {
		Some(std::cmp::Ordering::Less) => Err(ArgumentError::new(argument, Constraint::Negative)),
		Some(_) => Ok(value),
		None => Err(ArgumentError::invalid(argument, "must be a number")),
	}
}

pub fn positive<T>(argument: &'static str, value: T) -> Result<T, ArgumentError>
where
	T: Copy + Default + PartialOrd,
{
	if value > T::default() {
		Ok(value)
	} else {
		Err(ArgumentError::new(argument, Constraint::NotPositive))
	}
}

pub fn in_range(argument: &'static str, value: i32, min: i32, max: i32) -> Result<i32, ArgumentError> {
	if (min..=max).contains(&value) {
		Ok(value)
	} else {
		Err(ArgumentError::new(
			argument,
			Constraint::OutOfRange {
				min: min.into(),
				max: max.into(),
			},
		))
	}
}

pub fn alpha(argument: &'static str, value: i32) -> Result<u8, ArgumentError> {
	in_range(argument, value, 0, 255).map(|value| value as u8)
}

pub fn not_empty<'a>(argument: &'static str, value: &'a str) -> Result<&'a str, ArgumentError> {
	if value.is_empty() {
		Err(ArgumentError::new(argument, Constraint::Empty))
	} else {
		Ok(value)
	}
}

/// Checks that `min` does not exceed `max`, blaming the `min` argument.
pub fn ordered(
	min_argument: &'static str,
	min: i32,
	max_argument: &'static str,
	max: i32,
) -> Result<(), ArgumentError> {
	if min > max {
		Err(ArgumentError::new(
			min_argument,
			Constraint::Inverted { max: max_argument },
		))
	} else {
		Ok(())
	}
}
