//! Process-wide settings for the registry.
//!
//! A thread reads the settings when it opens its outermost scope, so installing
//! new settings affects scopes opened afterwards and never rewrites indexes
//! already built.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use serde::Deserialize;

use crate::error::ConfigError;

/// Accessor naming convention used to derive property indexes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// Prefix marking a getter (`getName` -> `name`), which takes no
	/// parameters after the host.
	pub getter_prefix: String,
	/// Prefix marking a setter (`setName` -> `name`), which takes exactly one.
	pub setter_prefix: String,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			getter_prefix: "get".to_owned(),
			setter_prefix: "set".to_owned(),
		}
	}
}

/// Which property index an accessor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
	Getter,
	Setter,
}

impl Settings {
	/// Parses settings from TOML; missing keys take their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let settings: Settings = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.getter_prefix.is_empty() {
			return Err(ConfigError::EmptyPrefix {
				field: "getter_prefix",
			});
		}
		if self.setter_prefix.is_empty() {
			return Err(ConfigError::EmptyPrefix {
				field: "setter_prefix",
			});
		}
		Ok(())
	}

	/// Classifies a member as a property accessor.
	///
	/// `arity` counts parameters after the host parameter. Returns the kind and
	/// the property name with its first character lowercased.
	pub fn accessor(&self, member: &str, arity: usize) -> Option<(AccessorKind, String)> {
		let (kind, rest) = if arity == 0 {
			(AccessorKind::Getter, member.strip_prefix(self.getter_prefix.as_str())?)
		} else if arity == 1 {
			(AccessorKind::Setter, member.strip_prefix(self.setter_prefix.as_str())?)
		} else {
			return None;
		};

		let mut chars = rest.chars();
		let first = chars.next()?;
		let property = first.to_lowercase().chain(chars).collect();
		Some((kind, property))
	}
}

static SETTINGS: LazyLock<ArcSwap<Settings>> =
	LazyLock::new(|| ArcSwap::from_pointee(Settings::default()));

/// Settings currently in effect.
pub fn current() -> Arc<Settings> {
	SETTINGS.load_full()
}

/// Replaces the process-wide settings after validating them.
pub fn install(settings: Settings) -> Result<(), ConfigError> {
	if let Err(err) = settings.validate() {
		tracing::warn!(%err, "rejected registry settings");
		return Err(err);
	}
	SETTINGS.store(Arc::new(settings));
	Ok(())
}
