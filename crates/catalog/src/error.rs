use tessera_registry::{ErrorKind, RegistryError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
	/// A failure from one of the underlying registries.
	#[error(transparent)]
	Registry(#[from] RegistryError),
	/// An entity was registered without an info provider.
	#[error("entity {id} has no info provider and none was given")]
	MissingInfoProvider {
		/// Canonical ID of the rejected entity.
		id: String,
	},
	/// The catalog configuration is unusable.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl CatalogError {
	/// Returns the failure category.
	pub fn kind(&self) -> ErrorKind {
		match self {
			CatalogError::Registry(e) => e.kind(),
			CatalogError::MissingInfoProvider { .. } => ErrorKind::MissingInfoProvider,
			CatalogError::Config(_) => ErrorKind::Config,
		}
	}
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
