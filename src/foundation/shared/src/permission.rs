use std::{fmt, str::FromStr};

use thiserror::Error;

// === ModPermission === //

/// A capability a player grants to server plugins. Every instruction requires exactly one.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum ModPermission {
	Required,
	UseGui,
	UseScreens,
	UseAudio,
	OpenLinks,
	ExternalApplications,
	ReadSystemProperties,
	ReadGuiProperties,
	ReadGameProperties,
	ChangeGamePreferences,
}

#[derive(Debug, Clone, Error)]
#[error("unknown permission {0:?}")]
pub struct UnknownPermissionError(pub String);

impl ModPermission {
	pub const ALL: [Self; 10] = [
		Self::Required,
		Self::UseGui,
		Self::UseScreens,
		Self::UseAudio,
		Self::OpenLinks,
		Self::ExternalApplications,
		Self::ReadSystemProperties,
		Self::ReadGuiProperties,
		Self::ReadGameProperties,
		Self::ChangeGamePreferences,
	];

	pub const fn name(self) -> &'static str {
		match self {
			Self::Required => "required",
			Self::UseGui => "use_gui",
			Self::UseScreens => "use_screens",
			Self::UseAudio => "use_audio",
			Self::OpenLinks => "open_links",
			Self::ExternalApplications => "external_applications",
			Self::ReadSystemProperties => "read_system_properties",
			Self::ReadGuiProperties => "read_gui_properties",
			Self::ReadGameProperties => "read_game_properties",
			Self::ChangeGamePreferences => "change_game_preferences",
		}
	}

	/// Whether the permission is granted before the player touches any setting.
	pub const fn default_value(self) -> bool {
		match self {
			Self::Required
			| Self::UseGui
			| Self::UseScreens
			| Self::UseAudio
			| Self::OpenLinks
			| Self::ReadGuiProperties
			| Self::ReadGameProperties => true,
			Self::ExternalApplications | Self::ReadSystemProperties | Self::ChangeGamePreferences => {
				false
			}
		}
	}

	pub const fn is_changeable(self) -> bool {
		!matches!(self, Self::Required)
	}

	pub fn key(self) -> String {
		format!("gui.socketmc.permission.{}", self.name())
	}

	pub fn tooltip_key(self) -> String {
		format!("{}.tooltip", self.key())
	}
}

impl fmt::Display for ModPermission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for ModPermission {
	type Err = UnknownPermissionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|perm| perm.name() == s)
			.ok_or_else(|| UnknownPermissionError(s.to_string()))
	}
}
