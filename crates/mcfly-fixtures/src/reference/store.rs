//! Key → entity storage behind the reference repository.

use indexmap::IndexMap;

use super::ReferenceKey;
use crate::entity::EntityRef;
use crate::error::{FixtureError, FixtureResult};

/// Storage primitive for references.
///
/// Implementations must keep entries in insertion order; replacing an entry
/// keeps its original position.
pub trait ReferenceStore: Send + Sync {
	/// Inserts or replaces an entry. Returns the replaced entity, if any.
	fn set(&mut self, key: ReferenceKey, entity: EntityRef) -> Option<EntityRef>;

	/// Inserts an entry, failing if the key is already present.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::DuplicateReference`] and leaves the existing
	/// entry untouched when the key exists.
	fn add(&mut self, key: ReferenceKey, entity: EntityRef) -> FixtureResult<()>;

	/// Returns true if the key is present.
	fn has(&self, key: &ReferenceKey) -> bool;

	/// Returns the entity for the key.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::ReferenceNotFound`] when the key is absent.
	fn get(&self, key: &ReferenceKey) -> FixtureResult<&EntityRef>;

	/// Returns every entry of `class`, in insertion order.
	fn all_by_class(&self, class: &str) -> Vec<(&ReferenceKey, &EntityRef)>;

	/// Iterates over every entry in insertion order.
	fn iter(&self) -> Box<dyn Iterator<Item = (&ReferenceKey, &EntityRef)> + '_>;

	/// Number of entries.
	fn len(&self) -> usize;

	/// Returns true if the store holds no entry.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// In-memory, insertion-ordered reference store.
#[derive(Debug, Default)]
pub struct MemoryReferenceStore {
	entries: IndexMap<ReferenceKey, EntityRef>,
}

impl MemoryReferenceStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}
}

impl ReferenceStore for MemoryReferenceStore {
	fn set(&mut self, key: ReferenceKey, entity: EntityRef) -> Option<EntityRef> {
		self.entries.insert(key, entity)
	}

	fn add(&mut self, key: ReferenceKey, entity: EntityRef) -> FixtureResult<()> {
		match self.entries.entry(key) {
			indexmap::map::Entry::Occupied(entry) => {
				Err(FixtureError::DuplicateReference(entry.key().to_string()))
			}
			indexmap::map::Entry::Vacant(entry) => {
				entry.insert(entity);
				Ok(())
			}
		}
	}

	fn has(&self, key: &ReferenceKey) -> bool {
		self.entries.contains_key(key)
	}

	fn get(&self, key: &ReferenceKey) -> FixtureResult<&EntityRef> {
		self.entries
			.get(key)
			.ok_or_else(|| FixtureError::ReferenceNotFound(key.to_string()))
	}

	fn all_by_class(&self, class: &str) -> Vec<(&ReferenceKey, &EntityRef)> {
		self.entries
			.iter()
			.filter(|(key, _)| key.class() == class)
			.collect()
	}

	fn iter(&self) -> Box<dyn Iterator<Item = (&ReferenceKey, &EntityRef)> + '_> {
		Box::new(self.entries.iter())
	}

	fn len(&self) -> usize {
		self.entries.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::test_entities::{Order, Product, handle};
	use rstest::rstest;

	#[rstest]
	fn test_set_replaces_in_place() {
		let mut store = MemoryReferenceStore::new();
		let first = handle(Product::default());
		let second = handle(Product::default());

		assert!(
			store
				.set(ReferenceKey::new("Product", 0u64), EntityRef::new(&first))
				.is_none()
		);
		store.set(ReferenceKey::new("Product", 1u64), EntityRef::new(&first));
		let replaced = store.set(ReferenceKey::new("Product", 0u64), EntityRef::new(&second));

		assert!(replaced.unwrap().is(&first));
		let keys: Vec<String> = store.iter().map(|(key, _)| key.to_string()).collect();
		assert_eq!(keys, vec!["Product:0", "Product:1"]);
		assert!(store.get(&ReferenceKey::new("Product", 0u64)).unwrap().is(&second));
	}

	#[rstest]
	fn test_add_rejects_existing_key() {
		let mut store = MemoryReferenceStore::new();
		let first = handle(Product::default());
		let second = handle(Product::default());
		let key = ReferenceKey::new("Product", "x");

		store.add(key.clone(), EntityRef::new(&first)).unwrap();
		let result = store.add(key.clone(), EntityRef::new(&second));

		assert!(matches!(result, Err(FixtureError::DuplicateReference(ref k)) if k == "Product:x"));
		assert!(store.get(&key).unwrap().is(&first));
		assert_eq!(store.len(), 1);
	}

	#[rstest]
	fn test_get_missing() {
		let store = MemoryReferenceStore::new();
		let result = store.get(&ReferenceKey::new("Product", "nope"));
		assert!(matches!(result, Err(FixtureError::ReferenceNotFound(_))));
		assert!(store.is_empty());
	}

	#[rstest]
	fn test_all_by_class() {
		let mut store = MemoryReferenceStore::new();
		let product = handle(Product::default());
		let order = handle(Order::default());

		store.set(ReferenceKey::new("Product", 0u64), EntityRef::new(&product));
		store.set(ReferenceKey::new("Order", 0u64), EntityRef::new(&order));
		store.set(ReferenceKey::new("Product", "x"), EntityRef::new(&product));

		let products = store.all_by_class("Product");
		assert_eq!(products.len(), 2);
		assert!(products.iter().all(|(key, _)| key.class() == "Product"));
		assert!(store.has(&ReferenceKey::new("Order", 0u64)));
	}
}
