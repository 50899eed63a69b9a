//! The catalog manager: entities and their info providers under one ID space.

use std::sync::Arc;

use tessera_registry::{Registry, RegistryError};

use crate::config::{CatalogConfig, ConfigError};
use crate::error::{CatalogError, Result};
use crate::key::{IdRules, KeyInput, Named};

#[cfg(test)]
mod tests;

/// Label of the entity registry in errors and log events.
pub const ENTITIES: &str = "entities";
/// Label of the provider registry in errors and log events.
pub const PROVIDERS: &str = "providers";

/// Zero-argument callable producing an entity's info value.
pub type InfoProvider<I> = Arc<dyn Fn() -> I + Send + Sync>;

/// Wraps a closure as an [`InfoProvider`].
pub fn provider<I, F>(f: F) -> InfoProvider<I>
where
	F: Fn() -> I + Send + Sync + 'static,
{
	Arc::new(f)
}

/// Catalog of entities (`E`) and info providers yielding `I`.
///
/// Both registries canonicalize keys with the same [`IdRules`], and the ID
/// space is flat across them: an entity ID can never be claimed by a
/// provider registered separately, and registering an entity commits its
/// provider under the same ID.
///
/// The manager has no internal locking; see [`SharedCatalog`] for a
/// synchronized handle.
///
/// [`SharedCatalog`]: crate::SharedCatalog
pub struct CatalogManager<E, I> {
	config: CatalogConfig,
	rules: IdRules,
	entities: Registry<E, IdRules>,
	providers: Registry<InfoProvider<I>, IdRules>,
}

impl<E, I> CatalogManager<E, I> {
	/// Creates an empty catalog with the default configuration.
	pub fn new() -> Self {
		let config = CatalogConfig::default();
		let rules = IdRules::default();
		Self::from_parts(config, rules)
	}

	/// Creates an empty catalog from `config`.
	pub fn with_config(config: CatalogConfig) -> std::result::Result<Self, ConfigError> {
		if config.variant_separator.is_empty() {
			return Err(ConfigError::EmptySeparator);
		}
		let rules = IdRules::compile(&config)?;
		Ok(Self::from_parts(config, rules))
	}

	fn from_parts(config: CatalogConfig, rules: IdRules) -> Self {
		Self {
			entities: Registry::with_strategy(ENTITIES, rules.clone()),
			providers: Registry::with_strategy(PROVIDERS, rules.clone()),
			config,
			rules,
		}
	}

	/// The configuration this catalog was built from.
	pub fn config(&self) -> &CatalogConfig {
		&self.config
	}

	/// The shared canonicalization rules.
	pub fn rules(&self) -> &IdRules {
		&self.rules
	}

	/// Converts a string or entity key to its canonical ID.
	pub fn parse_key<'a>(&self, key: impl Into<KeyInput<'a>>, check_valid: bool) -> Result<String> {
		Ok(self.rules.parse_key(key.into(), check_valid)?)
	}

	/// Splits a query into its base ID and variant tokens.
	///
	/// Splits once, at the first separator: the remainder is a single variant
	/// token even if it contains further separators. A query without the
	/// separator has no variants.
	pub fn split_query<'q>(&self, query: &'q str) -> (&'q str, Vec<&'q str>) {
		match query.split_once(self.config.variant_separator.as_str()) {
			Some((base, variant)) => (base, vec![variant]),
			None => (query, Vec::new()),
		}
	}

	/// Registers `entity` together with its info provider.
	///
	/// The ID is `id` if given, else derived from the entity's short name.
	/// Every check runs before any write, so a failed registration leaves the
	/// catalog untouched:
	/// - the ID must be valid
	/// - it must not exist as an entity or as a provider
	/// - `provider` must be given
	pub fn register_entity(&mut self, id: Option<&str>, entity: E, provider: Option<InfoProvider<I>>) -> Result<&E>
	where
		E: Named,
	{
		let id = match id {
			Some(id) => self.rules.parse_key(KeyInput::Id(id), true)?,
			None => self.rules.parse_key(KeyInput::entity(&entity), true)?,
		};

		if self.entities.contains_id(&id) {
			return Err(RegistryError::DuplicateKey { registry: ENTITIES, key: id }.into());
		}
		if self.providers.contains_id(&id) {
			return Err(RegistryError::DuplicateKey { registry: PROVIDERS, key: id }.into());
		}

		let Some(provider) = provider else {
			return Err(CatalogError::MissingInfoProvider { id });
		};

		self.providers.set(id.as_str(), provider)?;
		Ok(self.entities.register(id.as_str(), entity)?)
	}

	/// Returns the entity registered under `query`.
	///
	/// Variant qualifiers are not stripped; see [`CatalogManager::resolve`].
	pub fn get_entity<'a>(&self, query: impl Into<KeyInput<'a>>) -> Result<&E> {
		Ok(self.entities.get(query)?)
	}

	/// Splits `query` and returns the entity for its base ID with the variants.
	pub fn resolve<'q>(&self, query: &'q str) -> Result<(&E, Vec<&'q str>)> {
		let (base, variants) = self.split_query(query);
		Ok((self.get_entity(base)?, variants))
	}

	/// Entity IDs in registration order.
	pub fn list_entities(&self) -> Vec<&str> {
		self.entities.keys().collect()
	}

	/// Removes an entity. Its info provider stays registered.
	pub fn remove_entity<'a>(&mut self, id: impl Into<KeyInput<'a>>) -> Result<E> {
		Ok(self.entities.delete(id)?)
	}

	/// Registers an info provider under `id` only.
	///
	/// Unlike [`CatalogManager::register_entity`] this does not check the
	/// entity registry. The returned binding re-resolves the provider by ID on
	/// every call, so later replacements are observed.
	pub fn register_provider<'a, F>(&mut self, id: impl Into<KeyInput<'a>>, provider: F) -> Result<ProviderBinding>
	where
		F: Fn() -> I + Send + Sync + 'static,
	{
		let id = self.rules.parse_key(id.into(), true)?;
		self.providers.set(id.as_str(), Arc::new(provider) as InfoProvider<I>)?;
		Ok(ProviderBinding { id })
	}

	/// Overwrites (or adds) the provider for `id`, returning the previous one.
	pub fn replace_provider<'a, F>(&mut self, id: impl Into<KeyInput<'a>>, provider: F) -> Result<Option<InfoProvider<I>>>
	where
		F: Fn() -> I + Send + Sync + 'static,
	{
		Ok(self.providers.replace(id, Arc::new(provider) as InfoProvider<I>)?)
	}

	/// Removes the provider for `id`.
	pub fn remove_provider<'a>(&mut self, id: impl Into<KeyInput<'a>>) -> Result<InfoProvider<I>> {
		Ok(self.providers.delete(id)?)
	}

	/// Returns the provider registered under `query` without invoking it.
	pub fn info_provider<'a>(&self, query: impl Into<KeyInput<'a>>) -> Result<&InfoProvider<I>> {
		Ok(self.providers.get(query)?)
	}

	/// Invokes the provider registered under `query`.
	pub fn get_info<'a>(&self, query: impl Into<KeyInput<'a>>) -> Result<I> {
		let provider = self.info_provider(query)?;
		Ok(provider())
	}

	/// Provider IDs in registration order.
	pub fn list_providers(&self) -> Vec<&str> {
		self.providers.keys().collect()
	}

	/// Merges `other` into `self`; `other` wins on conflicting IDs.
	///
	/// Fails without modifying `self` if the two catalogs use different ID
	/// rules.
	pub fn merge_assign(&mut self, other: &Self) -> Result<&mut Self>
	where
		E: Clone,
	{
		self.entities.check_compatible(&other.entities)?;
		self.providers.check_compatible(&other.providers)?;
		self.entities.union_assign(&other.entities)?;
		self.providers.union_assign(&other.providers)?;
		Ok(self)
	}

	/// Returns a new catalog holding both; `other` wins on conflicting IDs.
	pub fn merge(&self, other: &Self) -> Result<Self>
	where
		E: Clone,
	{
		let mut merged = self.fork();
		merged.merge_assign(other)?;
		Ok(merged)
	}

	/// Returns an independent copy: a fresh catalog with the same
	/// configuration holding all of `self`'s entries.
	pub fn fork(&self) -> Self
	where
		E: Clone,
	{
		tracing::debug!(entities = self.entities.len(), providers = self.providers.len(), "forking catalog");
		Self {
			config: self.config.clone(),
			rules: self.rules.clone(),
			entities: self.entities.clone(),
			providers: self.providers.clone(),
		}
	}
}

impl<E, I> Default for CatalogManager<E, I> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E, I> std::fmt::Debug for CatalogManager<E, I> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CatalogManager")
			.field("config", &self.config)
			.field("entities", &self.entities)
			.field("providers", &self.providers)
			.finish()
	}
}

/// Accessor returned by [`CatalogManager::register_provider`].
///
/// Holds only the canonical ID; each call looks the provider up again in the
/// catalog it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderBinding {
	id: String,
}

impl ProviderBinding {
	/// The canonical ID this binding resolves.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Resolves the provider in `catalog` and invokes it.
	pub fn get<E, I>(&self, catalog: &CatalogManager<E, I>) -> Result<I> {
		catalog.get_info(self.id.as_str())
	}
}
