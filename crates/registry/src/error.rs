use thiserror::Error;

use crate::canon::StrategyTag;

/// Failure category shared by every registry error.
///
/// Callers branch on this instead of matching message text. The taxonomy is
/// shared with crates built on [`Registry`](crate::Registry):
/// [`RegistryError`] only produces the first four kinds, while
/// `MissingInfoProvider` and `Config` are reported by the catalog layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The canonical ID is already present.
	DuplicateKey,
	/// The canonical ID is not present.
	KeyNotFound,
	/// The key failed the configured ID pattern.
	InvalidId,
	/// Two registries with different canonicalization strategies were merged.
	IncompatibleCanonicalizer,
	/// An entity was registered without an info provider.
	MissingInfoProvider,
	/// Catalog configuration could not be loaded or compiled.
	Config,
}

impl std::fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			ErrorKind::DuplicateKey => "duplicate-key",
			ErrorKind::KeyNotFound => "key-not-found",
			ErrorKind::InvalidId => "invalid-id",
			ErrorKind::IncompatibleCanonicalizer => "incompatible-canonicalizer",
			ErrorKind::MissingInfoProvider => "missing-info-provider",
			ErrorKind::Config => "config",
		};
		f.write_str(s)
	}
}

/// Errors raised by [`Registry`](crate::Registry) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// Registration is single-shot; the canonical ID is already taken.
	#[error("already registered in {registry}: {key}")]
	DuplicateKey {
		/// Label of the registry that rejected the key.
		registry: &'static str,
		/// Canonical ID that collided.
		key: String,
	},
	/// Lookup or removal of an absent canonical ID.
	#[error("not found in {registry}: {key}{}", suggestion_suffix(.suggestion))]
	KeyNotFound {
		/// Label of the registry that was searched.
		registry: &'static str,
		/// Canonical ID that was looked up.
		key: String,
		/// Closest registered ID, if one is near enough.
		suggestion: Option<String>,
	},
	/// Canonicalization produced an ID that fails the validation pattern.
	#[error("{value} does not match {pattern}")]
	InvalidId {
		/// The canonicalized value.
		value: String,
		/// The pattern it was checked against.
		pattern: String,
	},
	/// Union of registries whose canonicalization strategies differ.
	#[error("cannot merge {registry} registries with different canonicalizers: {left} vs {right}")]
	IncompatibleCanonicalizer {
		/// Label of the left-hand registry.
		registry: &'static str,
		/// Strategy of the left-hand registry.
		left: StrategyTag,
		/// Strategy of the right-hand registry.
		right: StrategyTag,
	},
}

impl RegistryError {
	/// Returns the failure category.
	pub fn kind(&self) -> ErrorKind {
		match self {
			RegistryError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
			RegistryError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
			RegistryError::InvalidId { .. } => ErrorKind::InvalidId,
			RegistryError::IncompatibleCanonicalizer { .. } => ErrorKind::IncompatibleCanonicalizer,
		}
	}
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
	match suggestion {
		Some(s) => format!(" (did you mean '{s}'?)"),
		None => String::new(),
	}
}
