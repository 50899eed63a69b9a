//! In-process catalog of entities and their info providers.
//!
//! A [`CatalogManager`] couples two [`Registry`](tessera_registry::Registry)
//! instances, one for entities and one for zero-argument info providers,
//! under shared ID rules:
//! - IDs are canonicalized by [`IdRules`] from strings or [`Named`] handles
//! - the ID space is flat across both registries
//! - catalogs merge with the right-hand side taking precedence, or fork
//!   into independent copies
//! - queries split into a base ID and a variant qualifier
//!
//! # Example
//!
//! ```
//! use tessera_catalog::{CatalogManager, TypeHandle, provider};
//!
//! struct CityscapesDataset;
//!
//! let mut catalog = CatalogManager::<TypeHandle, &'static str>::new();
//! catalog
//! 	.register_entity(None, TypeHandle::of::<CityscapesDataset>(), Some(provider(|| "urban scenes")))
//! 	.unwrap();
//!
//! let (entity, variants) = catalog.resolve("cityscapes/fine").unwrap();
//! assert!(entity.is::<CityscapesDataset>());
//! assert_eq!(variants, ["fine"]);
//! assert_eq!(catalog.get_info("cityscapes").unwrap(), "urban scenes");
//! ```

mod config;
mod error;
mod key;
mod manager;
mod shared;

pub use config::{
	CatalogConfig, ConfigError, DEFAULT_ENTITY_SUFFIX, DEFAULT_ID_PATTERN, DEFAULT_VARIANT_SEPARATOR,
};
pub use error::{CatalogError, Result};
pub use key::{IdRules, KeyInput, Named, TypeHandle, short_type_name};
pub use manager::{CatalogManager, ENTITIES, InfoProvider, PROVIDERS, ProviderBinding, provider};
pub use shared::{SharedCatalog, SharedInfo};
pub use tessera_registry::{ErrorKind, RegistryError, StrategyTag};
