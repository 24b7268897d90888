use std::{borrow::Cow, fmt};

use semver::Version;
use smallvec::SmallVec;

// === SocketPlugin === //

/// The server plugin an instruction originates from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SocketPlugin {
	pub id: Cow<'static, str>,
	pub api_version: Version,
	pub meta: PluginMeta,
}

impl SocketPlugin {
	/// Stands in for senders that never identified themselves.
	pub const UNKNOWN: Self = Self {
		id: Cow::Borrowed("unknown"),
		api_version: Version::new(0, 0, 0),
		meta: PluginMeta::EMPTY,
	};

	pub fn new(id: impl Into<Cow<'static, str>>, api_version: Version) -> Self {
		Self {
			id: id.into(),
			api_version,
			meta: PluginMeta::EMPTY,
		}
	}

	pub fn with_meta(mut self, meta: PluginMeta) -> Self {
		self.meta = meta;
		self
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	/// The human readable name, falling back to the id.
	pub fn display_name(&self) -> &str {
		self.meta.name.as_deref().unwrap_or(&self.id)
	}
}

impl fmt::Display for SocketPlugin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.meta.version {
			Some(version) => write!(f, "{} v{version}", self.display_name()),
			None => f.write_str(self.display_name()),
		}
	}
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct PluginMeta {
	pub name: Option<Cow<'static, str>>,
	pub version: Option<Cow<'static, str>>,
	pub description: Option<Cow<'static, str>>,
	pub authors: Option<SmallVec<[Cow<'static, str>; 1]>>,
	pub website: Option<Cow<'static, str>>,
}

impl PluginMeta {
	pub const EMPTY: Self = Self {
		name: None,
		version: None,
		description: None,
		authors: None,
		website: None,
	};

	pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
		self.version = Some(version.into());
		self
	}

	pub fn with_description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn with_authors(
		mut self,
		authors: impl IntoIterator<Item = impl Into<Cow<'static, str>>>,
	) -> Self {
		self.authors = Some(SmallVec::from_iter(authors.into_iter().map(Into::into)));
		self
	}

	pub fn with_website(mut self, website: impl Into<Cow<'static, str>>) -> Self {
		self.website = Some(website.into());
		self
	}
}

// === DefinePlugin === //

/// Statically describes a plugin so it can be constructed without repeating its metadata.
pub trait DefinePlugin {
	const ID: &'static str;
	const API_VERSION: Version;

	fn meta() -> PluginMeta;

	fn plugin() -> SocketPlugin {
		SocketPlugin::new(Self::ID, Self::API_VERSION).with_meta(Self::meta())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Scoreboard;

	impl DefinePlugin for Scoreboard {
		const ID: &'static str = "scoreboard";
		const API_VERSION: Version = Version::new(1, 0, 0);

		fn meta() -> PluginMeta {
			PluginMeta::default()
				.with_name("Scoreboard")
				.with_version("2.3.1")
				.with_authors(["alex", "sam"])
		}
	}

	#[test]
	fn definitions_build_plugins() {
		let plugin = Scoreboard::plugin();

		assert_eq!(plugin.id(), "scoreboard");
		assert_eq!(plugin.api_version, Version::new(1, 0, 0));
		assert_eq!(plugin.meta.authors.as_deref().map(<[_]>::len), Some(2));
		assert_eq!(plugin.to_string(), "Scoreboard v2.3.1");
	}

	#[test]
	fn unknown_plugins_fall_back_to_their_id() {
		assert_eq!(SocketPlugin::UNKNOWN.display_name(), "unknown");
		assert_eq!(SocketPlugin::UNKNOWN.meta, PluginMeta::default());
	}
}
