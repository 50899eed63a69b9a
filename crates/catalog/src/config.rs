//! Catalog configuration.
//!
//! A catalog is configured by the ID validation pattern, the separator that
//! splits variant qualifiers off a query, and the conventional suffix removed
//! from entity type names. Values come from [`CatalogConfig::default`] or a
//! TOML document such as:
//!
//! ```toml
//! id_pattern = "^[a-z0-9_-]+$"
//! variant_separator = ":"
//! entity_suffix = "Dataset"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default ID pattern: lowercase ASCII letters, digits and hyphens.
pub const DEFAULT_ID_PATTERN: &str = r"^[a-z0-9-]+$";
/// Default separator between a base ID and its variant.
pub const DEFAULT_VARIANT_SEPARATOR: &str = "/";
/// Default suffix stripped from entity type names.
pub const DEFAULT_ENTITY_SUFFIX: &str = "Dataset";

/// Errors that can occur when loading or compiling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or fields.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The ID pattern is not a valid regular expression.
	#[error("invalid id pattern {pattern:?}: {error}")]
	InvalidPattern {
		/// The rejected pattern.
		pattern: String,
		/// The compile error.
		error: regex::Error,
	},

	/// The variant separator is empty.
	#[error("variant separator must not be empty")]
	EmptySeparator,
}

/// Catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
	/// Regular expression every canonical ID must match in full.
	pub id_pattern: String,
	/// Separator between a base ID and its variant qualifier.
	pub variant_separator: String,
	/// Suffix removed from entity short names when deriving IDs.
	pub entity_suffix: String,
}

impl Default for CatalogConfig {
	fn default() -> Self {
		Self {
			id_pattern: DEFAULT_ID_PATTERN.to_string(),
			variant_separator: DEFAULT_VARIANT_SEPARATOR.to_string(),
			entity_suffix: DEFAULT_ENTITY_SUFFIX.to_string(),
		}
	}
}

impl CatalogConfig {
	/// Parses configuration from TOML text. Missing fields take defaults.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a TOML configuration file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml_str(&text)?;
		tracing::debug!(path = %path.display(), "loaded catalog config");
		Ok(config)
	}

	/// Sets the ID pattern.
	pub fn with_id_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.id_pattern = pattern.into();
		self
	}

	/// Sets the variant separator.
	pub fn with_variant_separator(mut self, separator: impl Into<String>) -> Self {
		self.variant_separator = separator.into();
		self
	}

	/// Sets the entity suffix.
	pub fn with_entity_suffix(mut self, suffix: impl Into<String>) -> Self {
		self.entity_suffix = suffix.into();
		self
	}
}
