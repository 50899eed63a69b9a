//! Canonical-ID keyed registries.
//!
//! This crate provides the storage layer of the catalog:
//! - [`Registry`]: insertion-ordered map from canonical ID to value with
//!   single-shot registration and precedence-based merging
//! - [`Canonicalize`] / [`Strategy`]: pluggable key canonicalization with a
//!   structural [`StrategyTag`] identity
//! - [`RegistryError`] / [`ErrorKind`]: the failure taxonomy

pub mod canon;
mod error;
mod registry;

pub use canon::{Canonicalize, Strategy, StrategyTag, Verbatim};
pub use error::{ErrorKind, RegistryError};
pub use registry::Registry;
