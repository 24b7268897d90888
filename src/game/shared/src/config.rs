use std::{collections::BTreeMap, fs, io, path::Path};

use serde::{Deserialize, Serialize};
use socketmc_foundation_shared::permission::{ModPermission, UnknownPermissionError};
use socketmc_util::mem::hash::FxHashMap;
use thiserror::Error;

// === Errors === //

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config file")]
	Io(#[from] io::Error),
	#[error("malformed config file")]
	Parse(#[from] toml::de::Error),
	#[error("failed to serialize config")]
	Serialize(#[from] toml::ser::Error),
	#[error(transparent)]
	UnknownPermission(#[from] UnknownPermissionError),
	#[error("permission {0} cannot be disabled")]
	Unchangeable(ModPermission),
}

// === PermissionConfig === //

/// On-disk form of [`PermissionConfig`].
///
/// ```toml
/// [permissions]
/// external_applications = true
///
/// [plugins.scoreboard]
/// use_audio = false
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawPermissionConfig {
	permissions: BTreeMap<String, bool>,
	plugins: BTreeMap<String, BTreeMap<String, bool>>,
}

type PermissionTable = FxHashMap<ModPermission, bool>;

/// The permissions a player has granted, globally and per plugin.
///
/// Lookups fall back from the plugin override to the global toggle and then to
/// [`ModPermission::default_value`]. Permissions that are not changeable are always granted.
#[derive(Debug, Clone, Default)]
pub struct PermissionConfig {
	global: PermissionTable,
	plugins: FxHashMap<String, PermissionTable>,
}

impl PermissionConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		Self::from_toml_str(&fs::read_to_string(path)?)
	}

	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		let raw = toml::from_str::<RawPermissionConfig>(text)?;
		let mut config = Self::default();

		for (name, enabled) in raw.permissions {
			config.set_global(name.parse()?, enabled)?;
		}

		for (plugin, table) in raw.plugins {
			for (name, enabled) in table {
				config.set_for_plugin(plugin.clone(), name.parse()?, enabled)?;
			}
		}

		Ok(config)
	}

	pub fn to_toml_string(&self) -> Result<String, ConfigError> {
		fn raw_table(table: &PermissionTable) -> BTreeMap<String, bool> {
			table
				.iter()
				.map(|(perm, &enabled)| (perm.name().to_string(), enabled))
				.collect()
		}

		let raw = RawPermissionConfig {
			permissions: raw_table(&self.global),
			plugins: self
				.plugins
				.iter()
				.map(|(plugin, table)| (plugin.clone(), raw_table(table)))
				.collect(),
		};

		Ok(toml::to_string(&raw)?)
	}

	fn check_changeable(permission: ModPermission, enabled: bool) -> Result<(), ConfigError> {
		if !enabled && !permission.is_changeable() {
			return Err(ConfigError::Unchangeable(permission));
		}
		Ok(())
	}

	pub fn set_global(&mut self, permission: ModPermission, enabled: bool) -> Result<(), ConfigError> {
		Self::check_changeable(permission, enabled)?;
		self.global.insert(permission, enabled);
		Ok(())
	}

	pub fn set_for_plugin(
		&mut self,
		plugin: impl Into<String>,
		permission: ModPermission,
		enabled: bool,
	) -> Result<(), ConfigError> {
		Self::check_changeable(permission, enabled)?;
		self.plugins
			.entry(plugin.into())
			.or_default()
			.insert(permission, enabled);
		Ok(())
	}

	pub fn with_global(mut self, permission: ModPermission, enabled: bool) -> Result<Self, ConfigError> {
		self.set_global(permission, enabled)?;
		Ok(self)
	}

	pub fn with_plugin(
		mut self,
		plugin: impl Into<String>,
		permission: ModPermission,
		enabled: bool,
	) -> Result<Self, ConfigError> {
		self.set_for_plugin(plugin, permission, enabled)?;
		Ok(self)
	}

	/// Drops every override, global and per plugin.
	pub fn reset(&mut self) {
		self.global.clear();
		self.plugins.clear();
	}

	pub fn is_enabled(&self, plugin: &str, permission: ModPermission) -> bool {
		if !permission.is_changeable() {
			return true;
		}

		self.plugins
			.get(plugin)
			.and_then(|table| table.get(&permission))
			.or_else(|| self.global.get(&permission))
			.copied()
			.unwrap_or_else(|| permission.default_value())
	}
}
