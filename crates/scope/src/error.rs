pub use mixin_types::InvokeError;

/// Errors raised while loading [`crate::Settings`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("accessor prefix `{field}` must not be empty")]
	EmptyPrefix { field: &'static str },
}
