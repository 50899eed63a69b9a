// Shared catalog handles and their provider bindings.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use pretty_assertions::assert_eq;
use tessera_catalog::{CatalogManager, ErrorKind, SharedCatalog, TypeHandle, provider};

#[allow(dead_code)]
struct CocoDataset;

fn shared() -> SharedCatalog<TypeHandle, String> {
	SharedCatalog::new(CatalogManager::new())
}

#[test]
fn binding_needs_no_arguments_and_observes_overrides() {
	let catalog = shared();
	let binding = catalog.register_provider("coco", || "v1".to_string()).unwrap();
	assert_eq!(binding.get().unwrap(), "v1");

	catalog
		.with_mut(|c| c.replace_provider("coco", || "v2".to_string()))
		.unwrap();
	assert_eq!(binding.get().unwrap(), "v2");

	let other_handle = catalog.clone();
	other_handle.with_mut(|c| c.remove_provider("coco")).unwrap();
	assert_eq!(binding.get().unwrap_err().kind(), ErrorKind::KeyNotFound);
}

#[test]
fn provider_may_read_the_catalog() {
	let catalog = shared();
	let inner = catalog.clone();
	catalog
		.register_provider("listing", move || inner.list_providers().join(","))
		.unwrap();
	catalog.register_provider("other", String::new).unwrap();

	assert_eq!(catalog.get_info("listing").unwrap(), "listing,other");
}

#[test]
fn fork_detaches_from_source() {
	let catalog = shared();
	catalog
		.register_entity(None, TypeHandle::of::<CocoDataset>(), Some(provider(|| "coco".to_string())))
		.unwrap();

	let fork = catalog.fork();
	assert!(!fork.ptr_eq(&catalog));
	fork.register_provider("extra", || "x".to_string()).unwrap();

	assert_eq!(catalog.list_providers(), vec!["coco"]);
	assert_eq!(fork.list_providers(), vec!["coco", "extra"]);
	assert!(fork.get_entity("coco").unwrap().is::<CocoDataset>());
}

#[test]
fn merge_assign_with_itself_is_a_no_op() {
	let catalog = shared();
	catalog.register_provider("a", || "a".to_string()).unwrap();
	catalog.merge_assign(&catalog.clone()).unwrap();
	assert_eq!(catalog.list_providers(), vec!["a"]);
}

#[test]
fn merge_assign_takes_other_precedence() {
	let base = shared();
	base.register_provider("a", || "base".to_string()).unwrap();
	let overlay = shared();
	overlay.register_provider("a", || "overlay".to_string()).unwrap();
	overlay.register_provider("b", || "b".to_string()).unwrap();

	base.merge_assign(&overlay).unwrap();
	assert_eq!(base.get_info("a").unwrap(), "overlay");
	assert_eq!(base.list_providers(), vec!["a", "b"]);
}

#[test]
fn concurrent_registration() {
	let catalog = shared();
	let calls = Arc::new(AtomicUsize::new(0));

	let handles: Vec<_> = (0..8)
		.map(|i| {
			let catalog = catalog.clone();
			let calls = Arc::clone(&calls);
			thread::spawn(move || {
				let id = format!("source-{i}");
				catalog
					.register_provider(id.as_str(), move || {
						calls.fetch_add(1, Ordering::SeqCst);
						format!("info-{i}")
					})
					.unwrap()
			})
		})
		.collect();

	let bindings: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
	assert_eq!(catalog.list_providers().len(), 8);
	for binding in &bindings {
		let expected = binding.id().replace("source", "info");
		assert_eq!(binding.get().unwrap(), expected);
	}
	assert_eq!(calls.load(Ordering::SeqCst), 8);
}
