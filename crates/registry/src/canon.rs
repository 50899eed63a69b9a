//! Canonicalization strategies.
//!
//! A strategy turns an arbitrary key into the canonical string a [`Registry`]
//! stores. Strategies are compared structurally through their [`StrategyTag`],
//! so two independently constructed strategies with the same rules are
//! interchangeable for merging.
//!
//! [`Registry`]: crate::Registry

use std::borrow::Cow;
use std::fmt::Display;

use crate::error::RegistryError;

/// Structural identity of a canonicalization strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StrategyTag {
	/// Plain string conversion of the key.
	Verbatim,
	/// A named custom strategy.
	Custom(Cow<'static, str>),
}

impl StrategyTag {
	/// Creates a custom tag.
	pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
		Self::Custom(name.into())
	}
}

impl Display for StrategyTag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Verbatim => f.write_str("default"),
			Self::Custom(name) => write!(f, "custom:{name}"),
		}
	}
}

/// A canonicalization strategy with a comparable identity.
pub trait Strategy {
	/// Returns the tag that decides merge compatibility.
	fn tag(&self) -> StrategyTag;
}

/// Converts keys of shape `Q` into canonical IDs.
///
/// A strategy may accept several key shapes by implementing this trait more
/// than once.
pub trait Canonicalize<Q>: Strategy {
	/// Produces the canonical ID for `key`.
	fn canonical_id(&self, key: Q) -> Result<String, RegistryError>;
}

/// The default strategy: the key's string form, unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verbatim;

impl Strategy for Verbatim {
	fn tag(&self) -> StrategyTag {
		StrategyTag::Verbatim
	}
}

impl<Q: Display> Canonicalize<Q> for Verbatim {
	fn canonical_id(&self, key: Q) -> Result<String, RegistryError> {
		Ok(key.to_string())
	}
}
