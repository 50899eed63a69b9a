//! Synchronized catalog handle.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::key::{KeyInput, Named};
use crate::manager::{CatalogManager, InfoProvider};

/// Cloneable, lock-protected handle to one [`CatalogManager`].
///
/// Clones share the same catalog. Providers are invoked after the lock is
/// released, so a provider may itself read or write the catalog.
pub struct SharedCatalog<E, I>(Arc<RwLock<CatalogManager<E, I>>>);

impl<E, I> Clone for SharedCatalog<E, I> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}

impl<E, I> SharedCatalog<E, I> {
	/// Wraps `catalog` for shared access.
	pub fn new(catalog: CatalogManager<E, I>) -> Self {
		Self(Arc::new(RwLock::new(catalog)))
	}

	/// Runs `f` with shared access to the catalog.
	pub fn with<R>(&self, f: impl FnOnce(&CatalogManager<E, I>) -> R) -> R {
		let guard = self.0.read();
		f(&guard)
	}

	/// Runs `f` with exclusive access to the catalog.
	pub fn with_mut<R>(&self, f: impl FnOnce(&mut CatalogManager<E, I>) -> R) -> R {
		let mut guard = self.0.write();
		f(&mut guard)
	}

	/// Returns true if both handles point at the same catalog.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	/// See [`CatalogManager::register_entity`].
	pub fn register_entity(&self, id: Option<&str>, entity: E, provider: Option<InfoProvider<I>>) -> Result<()>
	where
		E: Named,
	{
		self.with_mut(|c| c.register_entity(id, entity, provider).map(|_| ()))
	}

	/// See [`CatalogManager::get_entity`].
	pub fn get_entity<'a>(&self, query: impl Into<KeyInput<'a>>) -> Result<E>
	where
		E: Clone,
	{
		self.with(|c| c.get_entity(query).cloned())
	}

	/// See [`CatalogManager::list_entities`].
	pub fn list_entities(&self) -> Vec<String> {
		self.with(|c| c.list_entities().into_iter().map(str::to_string).collect())
	}

	/// Registers a provider and returns a binding that needs no arguments.
	pub fn register_provider<'a, F>(&self, id: impl Into<KeyInput<'a>>, provider: F) -> Result<SharedInfo<E, I>>
	where
		F: Fn() -> I + Send + Sync + 'static,
	{
		let binding = self.with_mut(|c| c.register_provider(id, provider))?;
		Ok(SharedInfo {
			catalog: self.clone(),
			id: binding.id().to_string(),
		})
	}

	/// See [`CatalogManager::get_info`].
	pub fn get_info<'a>(&self, query: impl Into<KeyInput<'a>>) -> Result<I> {
		let provider = self.with(|c| c.info_provider(query).cloned())?;
		Ok(provider())
	}

	/// See [`CatalogManager::list_providers`].
	pub fn list_providers(&self) -> Vec<String> {
		self.with(|c| c.list_providers().into_iter().map(str::to_string).collect())
	}

	/// Merges a snapshot of `other` into this catalog; `other` wins.
	pub fn merge_assign(&self, other: &Self) -> Result<()>
	where
		E: Clone,
	{
		if self.ptr_eq(other) {
			return Ok(());
		}
		let snapshot = other.with(CatalogManager::fork);
		self.with_mut(|c| c.merge_assign(&snapshot).map(|_| ()))
	}

	/// Returns a handle to an independent copy of the catalog.
	pub fn fork(&self) -> Self
	where
		E: Clone,
	{
		Self::new(self.with(CatalogManager::fork))
	}
}

impl<E, I> From<CatalogManager<E, I>> for SharedCatalog<E, I> {
	fn from(catalog: CatalogManager<E, I>) -> Self {
		Self::new(catalog)
	}
}

impl<E, I> std::fmt::Debug for SharedCatalog<E, I> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.with(|c| f.debug_tuple("SharedCatalog").field(c).finish())
	}
}

/// Provider binding over a [`SharedCatalog`], invoked with no arguments.
///
/// Each call looks the provider up by ID, so replacements made through any
/// handle to the same catalog are observed.
pub struct SharedInfo<E, I> {
	catalog: SharedCatalog<E, I>,
	id: String,
}

impl<E, I> Clone for SharedInfo<E, I> {
	fn clone(&self) -> Self {
		Self {
			catalog: self.catalog.clone(),
			id: self.id.clone(),
		}
	}
}

impl<E, I> SharedInfo<E, I> {
	/// The canonical ID this binding resolves.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Resolves the provider and invokes it.
	pub fn get(&self) -> Result<I> {
		self.catalog.get_info(self.id.as_str())
	}
}

impl<E, I> std::fmt::Debug for SharedInfo<E, I> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SharedInfo").field("id", &self.id).finish()
	}
}
