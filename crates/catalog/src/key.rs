//! Key shapes accepted by the catalog and the rules that canonicalize them.

use std::any::TypeId;

use regex::Regex;
use tessera_registry::{Canonicalize, RegistryError, Strategy, StrategyTag};

use crate::config::{CatalogConfig, ConfigError};

/// Anything usable as an entity handle exposes a short, unqualified name.
pub trait Named {
	/// The short name IDs are derived from, e.g. `"CityscapesDataset"`.
	fn short_name(&self) -> &str;
}

/// A key given to the catalog: either an ID string or an entity's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput<'a> {
	/// A string ID, lower-cased as-is.
	Id(&'a str),
	/// An entity short name, suffix-stripped then lower-cased.
	Entity(&'a str),
}

impl<'a> KeyInput<'a> {
	/// Key derived from an entity handle.
	pub fn entity<E: Named + ?Sized>(entity: &'a E) -> Self {
		Self::Entity(entity.short_name())
	}
}

impl<'a> From<&'a str> for KeyInput<'a> {
	fn from(id: &'a str) -> Self {
		Self::Id(id)
	}
}

impl<'a> From<&'a String> for KeyInput<'a> {
	fn from(id: &'a String) -> Self {
		Self::Id(id)
	}
}

impl<'a, E: Named + ?Sized> From<&'a E> for KeyInput<'a> {
	fn from(entity: &'a E) -> Self {
		Self::entity(entity)
	}
}

impl From<TypeHandle> for KeyInput<'static> {
	fn from(handle: TypeHandle) -> Self {
		Self::Entity(handle.name)
	}
}

/// Copyable handle naming a Rust type, used to register types as entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHandle {
	name: &'static str,
	type_id: TypeId,
}

impl TypeHandle {
	/// Handle for `T`.
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			name: short_type_name::<T>(),
			type_id: TypeId::of::<T>(),
		}
	}

	/// Returns true if this handle names `T`.
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.type_id == TypeId::of::<T>()
	}

	/// The [`TypeId`] of the named type.
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}
}

impl Named for TypeHandle {
	fn short_name(&self) -> &str {
		self.name
	}
}

/// Unqualified name of `T` without generic arguments.
///
/// `my_crate::data::CocoDataset<u8>` becomes `CocoDataset`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
	let full = std::any::type_name::<T>();
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}

/// Compiled ID rules shared by both registries of a catalog.
#[derive(Debug, Clone)]
pub struct IdRules {
	pattern: String,
	anchored: Regex,
	suffix: String,
}

impl IdRules {
	/// Compiles the rules from configuration.
	pub fn compile(config: &CatalogConfig) -> Result<Self, ConfigError> {
		let anchored =
			Regex::new(&format!("^(?:{})$", config.id_pattern)).map_err(|error| ConfigError::InvalidPattern {
				pattern: config.id_pattern.clone(),
				error,
			})?;
		Ok(Self {
			pattern: config.id_pattern.clone(),
			anchored,
			suffix: config.entity_suffix.clone(),
		})
	}

	/// The configured ID pattern.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// The suffix stripped from entity names.
	pub fn suffix(&self) -> &str {
		&self.suffix
	}

	/// Converts `key` to a canonical ID.
	///
	/// Strings are lower-cased. Entity names lose a trailing suffix, then are
	/// lower-cased. With `check_valid` the result must match the whole pattern.
	pub fn parse_key(&self, key: KeyInput<'_>, check_valid: bool) -> Result<String, RegistryError> {
		let id = match key {
			KeyInput::Id(id) => id.to_lowercase(),
			KeyInput::Entity(name) => name.strip_suffix(self.suffix.as_str()).unwrap_or(name).to_lowercase(),
		};
		if check_valid && !self.anchored.is_match(&id) {
			return Err(RegistryError::InvalidId {
				value: id,
				pattern: self.pattern.clone(),
			});
		}
		Ok(id)
	}
}

impl Default for IdRules {
	fn default() -> Self {
		Self::compile(&CatalogConfig::default()).expect("default id pattern compiles")
	}
}

impl Strategy for IdRules {
	fn tag(&self) -> StrategyTag {
		StrategyTag::custom(format!("catalog(pattern={},suffix={})", self.pattern, self.suffix))
	}
}

impl<'a, Q: Into<KeyInput<'a>>> Canonicalize<Q> for IdRules {
	fn canonical_id(&self, key: Q) -> Result<String, RegistryError> {
		self.parse_key(key.into(), true)
	}
}
