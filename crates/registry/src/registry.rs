use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::canon::{Canonicalize, Strategy, Verbatim};
use crate::error::RegistryError;


/// Maximum edit distance for "did you mean" suggestions.
const SUGGESTION_DISTANCE: usize = 3;

/// Canonical-ID keyed store with single-shot registration.
///
/// Every stored key is the output of the registry's [`Canonicalize`]
/// strategy, never a raw input. Entries keep insertion order.
///
/// The registry is a plain container without internal locking. Callers that
/// share one across threads serialize access themselves.
#[derive(Clone)]
pub struct Registry<V, C = Verbatim> {
	label: &'static str,
	strategy: C,
	entries: IndexMap<String, V>,
}

impl<V> Registry<V, Verbatim> {
	/// Creates an empty registry that stores keys in their string form.
	pub fn new(label: &'static str) -> Self {
		Self::with_strategy(label, Verbatim)
	}
}

impl<V, C: Strategy> Registry<V, C> {
	/// Creates an empty registry using `strategy` to canonicalize keys.
	pub fn with_strategy(label: &'static str, strategy: C) -> Self {
		Self {
			label,
			strategy,
			entries: IndexMap::new(),
		}
	}

	/// Returns the label used in errors and log events.
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns the canonicalization strategy.
	pub fn strategy(&self) -> &C {
		&self.strategy
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if the registry holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Canonical IDs in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.keys().map(String::as_str)
	}

	/// Entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Membership test on an already canonical ID.
	pub fn contains_id(&self, id: &str) -> bool {
		self.entries.contains_key(id)
	}

	/// Canonicalizes `key` and looks it up.
	pub fn get<Q>(&self, key: Q) -> Result<&V, RegistryError>
	where
		C: Canonicalize<Q>,
	{
		let id = self.strategy.canonical_id(key)?;
		match self.entries.get(&id) {
			Some(value) => Ok(value),
			None => Err(self.not_found(id)),
		}
	}

	/// Canonicalizes `key` and returns a mutable reference to its value.
	pub fn get_mut<Q>(&mut self, key: Q) -> Result<&mut V, RegistryError>
	where
		C: Canonicalize<Q>,
	{
		let id = self.strategy.canonical_id(key)?;
		let Some(index) = self.entries.get_index_of(&id) else {
			return Err(self.not_found(id));
		};
		Ok(&mut self.entries[index])
	}

	/// Canonicalizes `key` and stores `value` under it.
	///
	/// Fails with [`RegistryError::DuplicateKey`] if the ID is already present;
	/// use [`Registry::replace`] to overwrite.
	pub fn set<Q>(&mut self, key: Q, value: V) -> Result<(), RegistryError>
	where
		C: Canonicalize<Q>,
	{
		let id = self.strategy.canonical_id(key)?;
		match self.entries.entry(id) {
			Entry::Occupied(o) => Err(RegistryError::DuplicateKey {
				registry: self.label,
				key: o.key().clone(),
			}),
			Entry::Vacant(v) => {
				tracing::debug!(registry = self.label, id = v.key().as_str(), "registered");
				v.insert(value);
				Ok(())
			}
		}
	}

	/// Stores `value` under `key` and hands back a reference to the stored value.
	///
	/// Builder-style form of [`Registry::set`] for registration call chains.
	pub fn register<Q>(&mut self, key: Q, value: V) -> Result<&V, RegistryError>
	where
		C: Canonicalize<Q>,
	{
		self.set(key, value)?;
		// `set` appends, so the new entry is last.
		Ok(&self.entries[self.entries.len() - 1])
	}

	/// Inserts or overwrites the value for `key`, returning the previous value.
	///
	/// An overwritten entry keeps its original position.
	pub fn replace<Q>(&mut self, key: Q, value: V) -> Result<Option<V>, RegistryError>
	where
		C: Canonicalize<Q>,
	{
		let id = self.strategy.canonical_id(key)?;
		tracing::debug!(registry = self.label, id = id.as_str(), "replaced");
		Ok(self.entries.insert(id, value))
	}

	/// Canonicalizes `key` and removes its entry.
	pub fn delete<Q>(&mut self, key: Q) -> Result<V, RegistryError>
	where
		C: Canonicalize<Q>,
	{
		let id = self.strategy.canonical_id(key)?;
		match self.entries.shift_remove(&id) {
			Some(value) => {
				tracing::debug!(registry = self.label, id = id.as_str(), "removed");
				Ok(value)
			}
			None => Err(self.not_found(id)),
		}
	}

	/// Membership test. Keys that fail canonicalization are reported absent.
	pub fn contains<Q>(&self, key: Q) -> bool
	where
		C: Canonicalize<Q>,
	{
		self.strategy
			.canonical_id(key)
			.is_ok_and(|id| self.entries.contains_key(&id))
	}

	/// Copies `other`'s entries into `self`; `other` wins on conflicting IDs.
	///
	/// Both registries must share a canonicalization strategy tag. On failure
	/// `self` is left unchanged.
	pub fn union_assign(&mut self, other: &Self) -> Result<&mut Self, RegistryError>
	where
		V: Clone,
	{
		self.check_compatible(other)?;

		let overridden = other.entries.keys().filter(|k| self.entries.contains_key(*k)).count();
		if overridden > 0 {
			tracing::warn!(registry = self.label, overridden, "merge overrides existing entries");
		}
		tracing::debug!(registry = self.label, left = self.len(), right = other.len(), "merging");

		for (id, value) in &other.entries {
			self.entries.insert(id.clone(), value.clone());
		}
		Ok(self)
	}

	/// Returns a new registry holding the entries of both; `other` wins on
	/// conflicting IDs.
	pub fn union(&self, other: &Self) -> Result<Self, RegistryError>
	where
		V: Clone,
		C: Clone,
	{
		let mut merged = self.clone();
		merged.union_assign(other)?;
		Ok(merged)
	}

	/// Fails unless `other` canonicalizes keys the same way.
	pub fn check_compatible(&self, other: &Self) -> Result<(), RegistryError> {
		let (left, right) = (self.strategy.tag(), other.strategy.tag());
		if left != right {
			return Err(RegistryError::IncompatibleCanonicalizer {
				registry: self.label,
				left,
				right,
			});
		}
		Ok(())
	}

	/// Returns the registered ID closest to `id`, if within a few edits.
	pub fn suggest(&self, id: &str) -> Option<&str> {
		self.keys()
			.map(|k| (k, strsim::levenshtein(id, k)))
			.filter(|&(_, distance)| distance <= SUGGESTION_DISTANCE)
			.min_by_key(|&(_, distance)| distance)
			.map(|(k, _)| k)
	}

	fn not_found(&self, key: String) -> RegistryError {
		let suggestion = self.suggest(&key).map(str::to_string);
		RegistryError::KeyNotFound {
			registry: self.label,
			key,
			suggestion,
		}
	}
}

impl<V, C: Strategy> std::fmt::Debug for Registry<V, C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("label", &self.label)
			.field("strategy", &self.strategy.tag())
			.field("keys", &self.entries.keys().collect::<Vec<_>>())
			.finish()
	}
}
