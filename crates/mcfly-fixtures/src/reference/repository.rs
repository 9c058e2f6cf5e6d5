//! Class-namespaced access to a [`ReferenceStore`].

use rand::Rng;

use super::{LocalName, MemoryReferenceStore, ReferenceKey, ReferenceStore};
use crate::entity::{Entity, EntityHandle, EntityRef};
use crate::error::{FixtureError, FixtureResult};
use crate::random::random_value_with;

/// Translates `(name, class)` pairs into [`ReferenceKey`]s and delegates to
/// the underlying store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mcfly_fixtures::reference::ReferenceRepository;
/// use mcfly_fixtures::Entity;
/// use parking_lot::RwLock;
///
/// struct Product;
/// impl Entity for Product {
///     const CLASS_NAME: &'static str = "Product";
/// }
///
/// let mut references = ReferenceRepository::new();
/// let lamp = Arc::new(RwLock::new(Product));
/// references.set_reference("lamp", &lamp);
///
/// assert!(references.has_reference::<Product>("lamp"));
/// assert!(references.has_reference_in("Product", "lamp"));
/// ```
pub struct ReferenceRepository {
	store: Box<dyn ReferenceStore>,
}

impl ReferenceRepository {
	/// Creates a repository backed by a [`MemoryReferenceStore`].
	pub fn new() -> Self {
		Self::with_store(MemoryReferenceStore::new())
	}

	/// Creates a repository backed by the given store.
	pub fn with_store(store: impl ReferenceStore + 'static) -> Self {
		Self {
			store: Box::new(store),
		}
	}

	/// Registers `entity` under `name` for its class, replacing any previous
	/// entry with the same key.
	pub fn set_reference<T: Entity>(&mut self, name: impl Into<LocalName>, entity: &EntityHandle<T>) {
		self.set_entity_ref(name, EntityRef::new(entity));
	}

	/// Type-erased form of [`set_reference`](Self::set_reference).
	pub fn set_entity_ref(&mut self, name: impl Into<LocalName>, entity: EntityRef) {
		let key = ReferenceKey::new(entity.class(), name);
		let rendered = key.to_string();
		let replaced = self.store.set(key, entity).is_some();
		tracing::debug!(reference = %rendered, replaced, "Set fixture reference");
	}

	/// Registers `entity` under `name` for its class.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::DuplicateReference`] if the key already exists;
	/// the existing entry is kept.
	pub fn add_reference<T: Entity>(
		&mut self,
		name: impl Into<LocalName>,
		entity: &EntityHandle<T>,
	) -> FixtureResult<()> {
		self.add_entity_ref(name, EntityRef::new(entity))
	}

	/// Type-erased form of [`add_reference`](Self::add_reference).
	pub fn add_entity_ref(
		&mut self,
		name: impl Into<LocalName>,
		entity: EntityRef,
	) -> FixtureResult<()> {
		let key = ReferenceKey::new(entity.class(), name);
		let rendered = key.to_string();
		self.store.add(key, entity)?;
		tracing::debug!(reference = %rendered, "Added fixture reference");
		Ok(())
	}

	/// Returns true if `name` is registered for `T`.
	pub fn has_reference<T: Entity>(&self, name: impl Into<LocalName>) -> bool {
		self.has_reference_in(T::CLASS_NAME, name)
	}

	/// Returns true if `name` is registered for the class named `class`.
	pub fn has_reference_in(&self, class: &str, name: impl Into<LocalName>) -> bool {
		self.store.has(&ReferenceKey::new(class, name))
	}

	/// Returns the `T` registered under `name`.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::ReferenceNotFound`] if nothing is registered, or
	/// [`FixtureError::ReferenceTypeMismatch`] if the entry holds another type.
	pub fn get_reference<T: Entity>(
		&self,
		name: impl Into<LocalName>,
	) -> FixtureResult<EntityHandle<T>> {
		let key = ReferenceKey::new(T::CLASS_NAME, name);
		let entity = self.store.get(&key)?;
		downcast(&key, entity)
	}

	/// Returns the entity registered under `name` for the class named `class`.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::ReferenceNotFound`] if nothing is registered.
	pub fn get_reference_in(
		&self,
		class: &str,
		name: impl Into<LocalName>,
	) -> FixtureResult<EntityRef> {
		self.store.get(&ReferenceKey::new(class, name)).cloned()
	}

	/// Returns every auto-indexed `T`, in registry order.
	///
	/// Entries registered only under non-numeric names are left out.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::ReferenceTypeMismatch`] if an entry of the class
	/// holds another Rust type.
	pub fn get_references_by_class<T: Entity>(&self) -> FixtureResult<Vec<EntityHandle<T>>> {
		self.store
			.all_by_class(T::CLASS_NAME)
			.into_iter()
			.filter(|(key, _)| key.is_auto_indexed_for(T::CLASS_NAME))
			.map(|(key, entity)| downcast(key, entity))
			.collect()
	}

	/// Type-erased form of [`get_references_by_class`](Self::get_references_by_class).
	pub fn get_references_by_class_name(&self, class: &str) -> Vec<EntityRef> {
		self.store
			.all_by_class(class)
			.into_iter()
			.filter(|(key, _)| key.is_auto_indexed_for(class))
			.map(|(_, entity)| entity.clone())
			.collect()
	}

	/// Picks one auto-indexed `T` uniformly at random.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::NoReferenceFound`] if the class has no
	/// auto-indexed entry.
	pub fn get_random_reference_by_class<T, R>(&self, rng: &mut R) -> FixtureResult<EntityHandle<T>>
	where
		T: Entity,
		R: Rng + ?Sized,
	{
		let candidates = self.get_references_by_class::<T>()?;
		random_value_with(rng, &candidates)
			.cloned()
			.ok_or_else(|| FixtureError::NoReferenceFound(T::CLASS_NAME.to_string()))
	}

	/// Type-erased form of
	/// [`get_random_reference_by_class`](Self::get_random_reference_by_class).
	pub fn get_random_reference_by_class_name<R>(
		&self,
		class: &str,
		rng: &mut R,
	) -> FixtureResult<EntityRef>
	where
		R: Rng + ?Sized,
	{
		let candidates = self.get_references_by_class_name(class);
		random_value_with(rng, &candidates)
			.cloned()
			.ok_or_else(|| FixtureError::NoReferenceFound(class.to_string()))
	}

	/// Iterates over every registered entry in registry order.
	pub fn references(&self) -> impl Iterator<Item = (&ReferenceKey, &EntityRef)> + '_ {
		self.store.iter()
	}

	/// Number of registered entries.
	pub fn len(&self) -> usize {
		self.store.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.store.is_empty()
	}
}

impl Default for ReferenceRepository {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ReferenceRepository {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ReferenceRepository")
			.field("len", &self.store.len())
			.finish()
	}
}

fn downcast<T: Entity>(key: &ReferenceKey, entity: &EntityRef) -> FixtureResult<EntityHandle<T>> {
	entity
		.downcast::<T>()
		.ok_or_else(|| FixtureError::ReferenceTypeMismatch {
			key: key.to_string(),
			expected: std::any::type_name::<T>(),
			found: entity.type_name(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::test_entities::{Order, Product, handle};
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use rstest::{fixture, rstest};
	use std::sync::Arc;

	#[fixture]
	fn references() -> ReferenceRepository {
		ReferenceRepository::new()
	}

	#[rstest]
	fn test_set_get_round_trip(mut references: ReferenceRepository) {
		let lamp = handle(Product::default());
		references.set_reference("lamp", &lamp);

		let found = references.get_reference::<Product>("lamp").unwrap();
		assert!(Arc::ptr_eq(&found, &lamp));
	}

	#[rstest]
	fn test_set_overwrites(mut references: ReferenceRepository) {
		let first = handle(Product::default());
		let second = handle(Product::default());
		references.set_reference("default", &first);
		references.set_reference("default", &second);

		let found = references.get_reference::<Product>("default").unwrap();
		assert!(Arc::ptr_eq(&found, &second));
		assert_eq!(references.len(), 1);
	}

	#[rstest]
	fn test_add_twice_fails_and_keeps_first(mut references: ReferenceRepository) {
		let first = handle(Product::default());
		let second = handle(Product::default());

		references.add_reference("x", &first).unwrap();
		let result = references.add_reference("x", &second);

		assert!(matches!(result, Err(FixtureError::DuplicateReference(_))));
		let found = references.get_reference::<Product>("x").unwrap();
		assert!(Arc::ptr_eq(&found, &first));
	}

	#[rstest]
	fn test_same_name_different_classes(mut references: ReferenceRepository) {
		let product = handle(Product::default());
		let order = handle(Order::default());

		references.add_reference("x", &product).unwrap();
		references.add_reference("x", &order).unwrap();

		assert!(references.has_reference::<Product>("x"));
		assert!(references.has_reference::<Order>("x"));
		assert_eq!(references.len(), 2);
	}

	#[rstest]
	fn test_get_missing_reference(references: ReferenceRepository) {
		let result = references.get_reference::<Product>("missing");
		assert!(
			matches!(result, Err(FixtureError::ReferenceNotFound(ref key)) if key == "Product:missing")
		);
		assert!(!references.has_reference_in("Product", "missing"));
	}

	#[rstest]
	fn test_get_reference_in(mut references: ReferenceRepository) {
		let order = handle(Order::default());
		references.set_reference(3u64, &order);

		let entity = references.get_reference_in("Order", "3").unwrap();
		assert_eq!(entity.class(), "Order");
		assert!(entity.is(&order));
	}

	#[rstest]
	fn test_references_by_class_only_numeric(mut references: ReferenceRepository) {
		let first = handle(Product::default());
		let second = handle(Product::default());
		let alias_only = handle(Product::default());
		let order = handle(Order::default());

		references.set_reference("default", &first);
		references.set_reference(0u64, &first);
		references.set_reference(1u64, &order);
		references.set_reference(2u64, &second);
		references.set_reference("alias", &alias_only);

		let products = references.get_references_by_class::<Product>().unwrap();
		assert_eq!(products.len(), 2);
		assert!(Arc::ptr_eq(&products[0], &first));
		assert!(Arc::ptr_eq(&products[1], &second));

		let orders = references.get_references_by_class_name("Order");
		assert_eq!(orders.len(), 1);
		assert!(orders[0].is(&order));
	}

	#[rstest]
	#[case("05")]
	#[case("007")]
	#[case("18446744073709551616")]
	fn test_references_by_class_any_digit_name(
		mut references: ReferenceRepository,
		#[case] name: &str,
	) {
		let numbered = handle(Product::default());
		references.set_reference(name, &numbered);
		references.set_reference("5a", &handle(Product::default()));

		let products = references.get_references_by_class::<Product>().unwrap();
		assert_eq!(products.len(), 1);
		assert!(Arc::ptr_eq(&products[0], &numbered));
		assert_eq!(references.get_references_by_class_name("Product").len(), 1);

		let mut rng = StdRng::seed_from_u64(5);
		let picked = references
			.get_random_reference_by_class::<Product, _>(&mut rng)
			.unwrap();
		assert!(Arc::ptr_eq(&picked, &numbered));
	}

	#[rstest]
	fn test_raw_variants_share_keys_with_parsed_names(mut references: ReferenceRepository) {
		let first = handle(Product::default());
		let second = handle(Product::default());

		references.set_reference(5u64, &first);
		references.set_reference(LocalName::Named("5".to_string()), &second);
		references.set_reference(LocalName::Named("default".to_string()), &second);
		references.set_reference("default", &first);

		let keys: Vec<String> = references
			.references()
			.map(|(key, _)| key.to_string())
			.collect();
		assert_eq!(keys, vec!["Product:5", "Product:default"]);
		assert!(Arc::ptr_eq(&references.get_reference::<Product>("5").unwrap(), &second));
		assert!(Arc::ptr_eq(
			&references.get_reference::<Product>(LocalName::Default).unwrap(),
			&first
		));

		let result = references.add_reference(LocalName::Named("5".to_string()), &first);
		assert!(matches!(result, Err(FixtureError::DuplicateReference(ref key)) if key == "Product:5"));
	}

	#[rstest]
	fn test_random_reference_empty(references: ReferenceRepository) {
		let mut rng = StdRng::seed_from_u64(3);
		let result = references.get_random_reference_by_class::<Product, _>(&mut rng);
		assert!(matches!(result, Err(FixtureError::NoReferenceFound(ref class)) if class == "Product"));

		let result = references.get_random_reference_by_class_name("Order", &mut rng);
		assert!(matches!(result, Err(FixtureError::NoReferenceFound(_))));
	}

	#[rstest]
	fn test_random_reference_ignores_aliases(mut references: ReferenceRepository) {
		let numbered = handle(Product::default());
		let alias_only = handle(Product::default());
		references.set_reference(0u64, &numbered);
		references.set_reference("alias", &alias_only);

		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..20 {
			let picked = references
				.get_random_reference_by_class::<Product, _>(&mut rng)
				.unwrap();
			assert!(Arc::ptr_eq(&picked, &numbered));
		}
	}

	#[rstest]
	fn test_type_mismatch(mut references: ReferenceRepository) {
		struct Impostor;
		impl Entity for Impostor {
			const CLASS_NAME: &'static str = "Product";
		}

		references.set_reference(0u64, &handle(Impostor));
		let result = references.get_reference::<Product>(0u64);
		match result {
			Err(FixtureError::ReferenceTypeMismatch {
				key,
				expected,
				found,
			}) => {
				assert_eq!(key, "Product:0");
				assert!(expected.ends_with("Product"));
				assert!(found.ends_with("Impostor"));
			}
			other => panic!("unexpected result: {:?}", other),
		}
	}
}
