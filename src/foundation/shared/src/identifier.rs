use std::{fmt, str::FromStr};

use crate::validate::{not_empty, ArgumentError};

// === Identifier === //

pub const MINECRAFT_NAMESPACE: &str = "minecraft";
pub const SOCKETMC_NAMESPACE: &str = "socketmc";

/// A namespaced resource name of the form `namespace:path`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Identifier {
	namespace: String,
	path: String,
}

impl Identifier {
	pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, ArgumentError> {
		let namespace = namespace.into();
		let path = path.into();

		not_empty("namespace", &namespace)?;
		not_empty("path", &path)?;

		if !namespace.chars().all(is_namespace_char) {
			return Err(ArgumentError::invalid(
				"namespace",
				"may only contain `a-z`, `0-9`, `_`, `-` and `.`",
			));
		}

		if !path.chars().all(|c| is_namespace_char(c) || c == '/') {
			return Err(ArgumentError::invalid(
				"path",
				"may only contain `a-z`, `0-9`, `_`, `-`, `.` and `/`",
			));
		}

		Ok(Self { namespace, path })
	}

	pub fn minecraft(path: impl Into<String>) -> Result<Self, ArgumentError> {
		Self::new(MINECRAFT_NAMESPACE, path)
	}

	/// Produces a fresh identifier in the `socketmc` namespace with a random 128-bit path.
	pub fn random() -> Self {
		Self {
			namespace: SOCKETMC_NAMESPACE.to_string(),
			path: format!("{:032x}", fastrand::u128(..)),
		}
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn path(&self) -> &str {
		&self.path
	}
}

fn is_namespace_char(c: char) -> bool {
	matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

impl fmt::Display for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.namespace, self.path)
	}
}

impl FromStr for Identifier {
	type Err = ArgumentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.split_once(':') {
			Some((namespace, path)) => Self::new(namespace, path),
			None => Self::minecraft(s),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::validate::Constraint;

	#[test]
	fn parses_namespaced_names() {
		let id: Identifier = "socketmc:textures/beam.png".parse().unwrap();
		assert_eq!(id.namespace(), "socketmc");
		assert_eq!(id.path(), "textures/beam.png");
		assert_eq!(id.to_string(), "socketmc:textures/beam.png");

		let bare: Identifier = "stone".parse().unwrap();
		assert_eq!(bare, Identifier::minecraft("stone").unwrap());
	}

	#[test]
	fn rejects_malformed_names() {
		assert_eq!(
			Identifier::new("", "stone").unwrap_err().constraint,
			Constraint::Empty
		);
		assert_eq!(Identifier::new("ns", "").unwrap_err().argument, "path");
		assert!("Socket:stone".parse::<Identifier>().is_err());
		assert!("ns:a:b".parse::<Identifier>().is_err());
	}

	#[test]
	fn random_identifiers_are_distinct() {
		let a = Identifier::random();
		let b = Identifier::random();

		assert_ne!(a, b);
		assert_eq!(a.namespace(), SOCKETMC_NAMESPACE);
		assert_eq!(a.path().len(), 32);
		assert_eq!(a.to_string().parse::<Identifier>().unwrap(), a);
	}
}
