use std::{fmt, str::FromStr};

use crate::validate::{not_empty, ArgumentError};

// === Uri === //

/// An absolute URI. Only the scheme is checked; the remainder is carried verbatim.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Uri {
	text: String,
	scheme_len: usize,
}

impl Uri {
	pub fn parse(text: impl Into<String>) -> Result<Self, ArgumentError> {
		let text = text.into();
		not_empty("uri", &text)?;

		if text.chars().any(char::is_whitespace) {
			return Err(ArgumentError::invalid("uri", "cannot contain whitespace"));
		}

		let Some((scheme, rest)) = text.split_once(':') else {
			return Err(ArgumentError::invalid("uri", "must be absolute"));
		};

		let mut chars = scheme.chars();
		let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
			&& chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

		if !valid_scheme {
			return Err(ArgumentError::invalid("uri", "has a malformed scheme"));
		}

		if rest.is_empty() {
			return Err(ArgumentError::invalid("uri", "has no content after its scheme"));
		}

		let scheme_len = scheme.len();
		Ok(Self { text, scheme_len })
	}

	pub fn scheme(&self) -> &str {
		&self.text[..self.scheme_len]
	}

	/// Everything after the `scheme:` prefix.
	pub fn specific_part(&self) -> &str {
		&self.text[self.scheme_len + 1..]
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}
}

impl fmt::Display for Uri {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

impl FromStr for Uri {
	type Err = ArgumentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
