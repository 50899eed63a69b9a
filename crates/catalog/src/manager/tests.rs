use pretty_assertions::assert_eq;
use tessera_registry::ErrorKind;

use super::*;
use crate::key::TypeHandle;

#[allow(dead_code)]
struct FooDataset;
#[allow(dead_code)]
struct BarDataset;

type Catalog = CatalogManager<TypeHandle, String>;

fn info(text: &'static str) -> Option<InfoProvider<String>> {
	Some(provider(move || text.to_string()))
}

#[test]
fn test_parse_key_from_handle_strips_suffix() {
	let catalog = Catalog::new();
	assert_eq!(catalog.parse_key(&TypeHandle::of::<FooDataset>(), true).unwrap(), "foo");
}

#[test]
fn test_parse_key_lowercases_strings() {
	let catalog = Catalog::new();
	assert_eq!(catalog.parse_key("Coco-2017", true).unwrap(), "coco-2017");
}

#[test]
fn test_parse_key_rejects_invalid() {
	let catalog = Catalog::new();
	let err = catalog.parse_key("foo bar", true).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidId);
	assert_eq!(err.to_string(), "foo bar does not match ^[a-z0-9-]+$");
	// Validation can be skipped.
	assert_eq!(catalog.parse_key("foo bar", false).unwrap(), "foo bar");
}

#[test]
fn test_split_query() {
	let catalog = Catalog::new();
	assert_eq!(catalog.split_query("foo"), ("foo", vec![]));
	assert_eq!(catalog.split_query("foo/bar"), ("foo", vec!["bar"]));
	assert_eq!(catalog.split_query("foo/bar/baz"), ("foo", vec!["bar/baz"]));
	assert_eq!(catalog.split_query("foo/"), ("foo", vec![""]));
}

#[test]
fn test_split_query_custom_separator() {
	let config = CatalogConfig::default().with_variant_separator("::");
	let catalog = Catalog::with_config(config).unwrap();
	assert_eq!(catalog.split_query("foo::bar"), ("foo", vec!["bar"]));
	assert_eq!(catalog.split_query("foo/bar"), ("foo/bar", vec![]));
}

#[test]
fn test_empty_separator_rejected() {
	let config = CatalogConfig::default().with_variant_separator("");
	assert!(matches!(Catalog::with_config(config), Err(ConfigError::EmptySeparator)));
}

#[test]
fn test_register_entity_derives_id() {
	let mut catalog = Catalog::new();
	let handle = TypeHandle::of::<FooDataset>();
	let stored = *catalog.register_entity(None, handle, info("foo info")).unwrap();
	assert_eq!(stored, handle);

	assert_eq!(catalog.list_entities(), vec!["foo"]);
	assert_eq!(catalog.list_providers(), vec!["foo"]);
	assert!(catalog.get_entity("foo").unwrap().is::<FooDataset>());
	assert!(catalog.get_entity(&handle).unwrap().is::<FooDataset>());
	assert_eq!(catalog.get_info("foo").unwrap(), "foo info");
}

#[test]
fn test_register_entity_explicit_id_is_canonicalized() {
	let mut catalog = Catalog::new();
	catalog
		.register_entity(Some("Foo-V2"), TypeHandle::of::<FooDataset>(), info("v2"))
		.unwrap();
	assert_eq!(catalog.list_entities(), vec!["foo-v2"]);
	assert_eq!(catalog.get_info("FOO-V2").unwrap(), "v2");
}

#[test]
fn test_register_entity_twice_is_duplicate() {
	let mut catalog = Catalog::new();
	catalog.register_entity(None, TypeHandle::of::<FooDataset>(), info("a")).unwrap();

	let err = catalog
		.register_entity(None, TypeHandle::of::<FooDataset>(), info("b"))
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::DuplicateKey);
	assert_eq!(catalog.get_info("foo").unwrap(), "a");
}

#[test]
fn test_register_entity_collides_with_provider() {
	let mut catalog = Catalog::new();
	catalog.register_provider("m", || "provider only".to_string()).unwrap();

	let err = catalog
		.register_entity(Some("m"), TypeHandle::of::<FooDataset>(), info("entity"))
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::DuplicateKey);
	assert!(matches!(
		err,
		CatalogError::Registry(RegistryError::DuplicateKey { registry: PROVIDERS, .. })
	));
	assert!(catalog.list_entities().is_empty());
	assert_eq!(catalog.get_info("m").unwrap(), "provider only");
}

#[test]
fn test_register_provider_does_not_check_entities() {
	let mut catalog = Catalog::new();
	catalog.register_entity(None, TypeHandle::of::<FooDataset>(), info("a")).unwrap();

	// The provider registry already holds "foo" from the entity registration.
	let err = catalog.register_provider("foo", || "b".to_string()).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::DuplicateKey);

	catalog.remove_provider("foo").unwrap();
	catalog.register_provider("foo", || "b".to_string()).unwrap();
	assert_eq!(catalog.get_info("foo").unwrap(), "b");
}

#[test]
fn test_missing_provider_leaves_catalog_untouched() {
	let mut catalog = Catalog::new();
	let err = catalog
		.register_entity(None, TypeHandle::of::<FooDataset>(), None)
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::MissingInfoProvider);
	assert!(catalog.list_entities().is_empty());
	assert!(catalog.list_providers().is_empty());

	// Nothing was half-committed, so a corrected registration succeeds.
	catalog.register_entity(None, TypeHandle::of::<FooDataset>(), info("ok")).unwrap();
	assert_eq!(catalog.list_entities(), vec!["foo"]);
}

#[test]
fn test_invalid_entity_id_leaves_catalog_untouched() {
	let mut catalog = Catalog::new();
	let err = catalog
		.register_entity(Some("not valid"), TypeHandle::of::<FooDataset>(), info("x"))
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidId);
	assert!(catalog.list_providers().is_empty());
}

#[test]
fn test_lookups_of_unknown_ids_fail() {
	let catalog = Catalog::new();
	assert_eq!(catalog.get_entity("nope").unwrap_err().kind(), ErrorKind::KeyNotFound);
	assert_eq!(catalog.get_info("nope").unwrap_err().kind(), ErrorKind::KeyNotFound);
}

#[test]
fn test_get_entity_does_not_split_variants() {
	let mut catalog = Catalog::new();
	catalog.register_entity(None, TypeHandle::of::<FooDataset>(), info("a")).unwrap();

	// "/" is outside the ID pattern, so the raw query is rejected.
	let err = catalog.get_entity("foo/bar").unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidId);

	let (entity, variants) = catalog.resolve("foo/bar").unwrap();
	assert!(entity.is::<FooDataset>());
	assert_eq!(variants, vec!["bar"]);
}

#[test]
fn test_provider_binding_observes_replacement() {
	let mut catalog = Catalog::new();
	let binding = catalog.register_provider("meta", || "first".to_string()).unwrap();
	assert_eq!(binding.id(), "meta");
	assert_eq!(binding.get(&catalog).unwrap(), "first");

	let previous = catalog.replace_provider("meta", || "second".to_string()).unwrap();
	assert!(previous.is_some());
	assert_eq!(binding.get(&catalog).unwrap(), "second");

	catalog.remove_provider("meta").unwrap();
	assert_eq!(binding.get(&catalog).unwrap_err().kind(), ErrorKind::KeyNotFound);
}

#[test]
fn test_provider_binding_observes_merge_override() {
	let mut catalog = Catalog::new();
	let binding = catalog.register_provider("meta", || "base".to_string()).unwrap();

	let mut overlay = Catalog::new();
	overlay.register_provider("meta", || "overlay".to_string()).unwrap();

	catalog.merge_assign(&overlay).unwrap();
	assert_eq!(binding.get(&catalog).unwrap(), "overlay");
}

#[test]
fn test_remove_entity_keeps_provider() {
	let mut catalog = Catalog::new();
	catalog.register_entity(None, TypeHandle::of::<FooDataset>(), info("a")).unwrap();

	let removed = catalog.remove_entity("foo").unwrap();
	assert!(removed.is::<FooDataset>());
	assert!(catalog.list_entities().is_empty());
	assert_eq!(catalog.list_providers(), vec!["foo"]);
	assert_eq!(catalog.remove_entity("foo").unwrap_err().kind(), ErrorKind::KeyNotFound);
}

#[test]
fn test_merge_other_takes_precedence() {
	let mut left = Catalog::new();
	left.register_entity(Some("a"), TypeHandle::of::<FooDataset>(), info("left-a")).unwrap();
	left.register_entity(Some("b"), TypeHandle::of::<FooDataset>(), info("left-b")).unwrap();

	let mut right = Catalog::new();
	right.register_entity(Some("b"), TypeHandle::of::<BarDataset>(), info("right-b")).unwrap();
	right.register_entity(Some("c"), TypeHandle::of::<BarDataset>(), info("right-c")).unwrap();

	let merged = left.merge(&right).unwrap();
	assert_eq!(merged.list_entities(), vec!["a", "b", "c"]);
	assert!(merged.get_entity("b").unwrap().is::<BarDataset>());
	assert_eq!(merged.get_info("b").unwrap(), "right-b");

	// Non-mutating.
	assert_eq!(left.list_entities(), vec!["a", "b"]);
	assert_eq!(left.get_info("b").unwrap(), "left-b");
}

#[test]
fn test_merge_requires_same_rules() {
	let mut left = Catalog::new();
	left.register_entity(Some("a"), TypeHandle::of::<FooDataset>(), info("a")).unwrap();
	let right = Catalog::with_config(CatalogConfig::default().with_id_pattern("^[a-z]+$")).unwrap();

	let err = left.merge(&right).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::IncompatibleCanonicalizer);

	let err = left.merge_assign(&right).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::IncompatibleCanonicalizer);
	assert_eq!(left.list_entities(), vec!["a"]);
}

#[test]
fn test_merge_accepts_independently_built_rules() {
	let config = CatalogConfig::default().with_variant_separator(":");
	let mut left = Catalog::with_config(config.clone()).unwrap();
	let mut right = Catalog::with_config(config).unwrap();
	left.register_entity(Some("a"), TypeHandle::of::<FooDataset>(), info("a")).unwrap();
	right.register_entity(Some("b"), TypeHandle::of::<BarDataset>(), info("b")).unwrap();

	left.merge_assign(&right).unwrap();
	assert_eq!(left.list_entities(), vec!["a", "b"]);
}

#[test]
fn test_fork_is_independent() {
	let mut original = Catalog::new();
	original.register_entity(Some("x"), TypeHandle::of::<FooDataset>(), info("x")).unwrap();

	let mut fork = original.fork();
	fork.register_entity(Some("y"), TypeHandle::of::<BarDataset>(), info("y")).unwrap();
	assert_eq!(fork.list_entities(), vec!["x", "y"]);
	assert_eq!(original.list_entities(), vec!["x"]);

	original.remove_entity("x").unwrap();
	assert_eq!(fork.list_entities(), vec!["x", "y"]);
}

#[test]
fn test_fork_keeps_configuration() {
	let config = CatalogConfig::default().with_variant_separator("@");
	let original = Catalog::with_config(config.clone()).unwrap();
	let fork = original.fork();
	assert_eq!(fork.config(), &config);
	assert_eq!(fork.split_query("a@b"), ("a", vec!["b"]));
	assert_eq!(fork.rules().pattern(), original.rules().pattern());
	assert_eq!(fork.rules().suffix(), "Dataset");
}
