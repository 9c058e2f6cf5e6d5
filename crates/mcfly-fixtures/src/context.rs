//! Fixture context: counter, references, persistence and randomness for one
//! fixture run.

use std::sync::Arc;

use parking_lot::RwLock;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::entity::{Buildable, Entity, EntityHandle, EntityRef, PropertyMap, merge_properties};
use crate::error::FixtureResult;
use crate::faker::Faker;
use crate::persistence::PersistenceManager;
use crate::random::random_value_with;
use crate::reference::{LocalName, ReferenceKey, ReferenceRepository, ReferenceStore, References};
use crate::settings::FixtureSettings;

/// State shared by every fixture of a run.
///
/// The context owns the entity counter and the reference registry, so a fresh
/// context starts a fresh numbering. Every mutating operation takes
/// `&mut self`; counting, registering and incrementing therefore happen as one
/// unit.
///
/// # Example
///
/// ```ignore
/// use mcfly_fixtures::prelude::*;
///
/// let manager = MemoryPersistenceManager::new();
/// let mut context = FixtureContext::new(manager.clone());
///
/// let lamp = context.create_and_save::<Product>(
///     properties! { "name" => "Lamp" },
///     properties! { "price" => 20 },
///     "lamp",
/// )?;
///
/// assert!(context.has_reference::<Product>("default"));
/// assert!(context.has_reference::<Product>(0));
/// assert!(context.has_reference::<Product>("lamp"));
/// assert_eq!(context.count(), 1);
/// ```
pub struct FixtureContext {
	references: ReferenceRepository,
	manager: Box<dyn PersistenceManager>,
	faker: Faker,
	rng: StdRng,
	count: u64,
}

impl FixtureContext {
	/// Creates a context with default settings and an in-memory reference store.
	pub fn new(manager: impl PersistenceManager + 'static) -> Self {
		Self::from_settings(manager, &FixtureSettings::default())
	}

	/// Creates a context configured by `settings`.
	///
	/// With a seed, the faker and random selection are reproducible.
	pub fn from_settings(
		manager: impl PersistenceManager + 'static,
		settings: &FixtureSettings,
	) -> Self {
		let (faker, rng) = match settings.seed {
			Some(seed) => (
				Faker::seeded(settings.locale, seed),
				StdRng::seed_from_u64(seed.wrapping_add(1)),
			),
			None => (Faker::new(settings.locale), StdRng::from_entropy()),
		};
		tracing::debug!(locale = %settings.locale, seed = ?settings.seed, "Created fixture context");
		Self {
			references: ReferenceRepository::new(),
			manager: Box::new(manager),
			faker,
			rng,
			count: 0,
		}
	}

	/// Replaces the reference store.
	///
	/// Entries registered so far are dropped with the previous store.
	pub fn with_store(mut self, store: impl ReferenceStore + 'static) -> Self {
		self.references = ReferenceRepository::with_store(store);
		self
	}

	/// Replaces the faker.
	pub fn with_faker(mut self, faker: Faker) -> Self {
		self.faker = faker;
		self
	}

	/// Number of entities saved through this context.
	pub fn count(&self) -> u64 {
		self.count
	}

	/// Generator for property defaults.
	pub fn faker(&mut self) -> &mut Faker {
		&mut self.faker
	}

	/// Replaces the generator for property defaults.
	pub fn set_faker(&mut self, faker: Faker) {
		self.faker = faker;
	}

	/// Read access to the reference registry.
	pub fn references(&self) -> &ReferenceRepository {
		&self.references
	}

	/// Builds, persists and registers a `T`.
	///
	/// `properties` override `defaults`. The entity is registered under its
	/// counter value, under `"default"` if it is the first entity saved by the
	/// context, and under each of `references`.
	///
	/// # Errors
	///
	/// Build and persistence failures are returned unchanged; in that case
	/// nothing is registered and the counter does not move.
	pub fn create_and_save<T: Buildable>(
		&mut self,
		properties: PropertyMap,
		defaults: PropertyMap,
		references: impl Into<References>,
	) -> FixtureResult<EntityHandle<T>> {
		let entity = T::build_from(merge_properties(defaults, properties))?;
		let handle = Arc::new(RwLock::new(entity));
		self.save(&handle, references)?;
		Ok(handle)
	}

	/// Persists an already built entity and registers it.
	///
	/// Registration uses add-or-update semantics, so an explicit `"default"`
	/// in `references` replaces the automatic one.
	///
	/// # Errors
	///
	/// Persistence failures are returned unchanged, before any registration.
	pub fn save<T: Entity>(
		&mut self,
		handle: &EntityHandle<T>,
		references: impl Into<References>,
	) -> FixtureResult<()> {
		let entity = EntityRef::new(handle);
		self.manager.persist(&entity)?;

		let first = self.count == 0;
		if first {
			self.references
				.set_entity_ref(LocalName::Default, entity.clone());
		}
		self.references.set_entity_ref(self.count, entity.clone());

		let references: References = references.into();
		for name in references {
			self.references.set_entity_ref(name, entity.clone());
		}

		tracing::trace!(
			reference = %ReferenceKey::new(T::CLASS_NAME, self.count),
			first,
			"Saved fixture entity"
		);
		self.count += 1;
		Ok(())
	}

	/// See [`ReferenceRepository::set_reference`].
	pub fn set_reference<T: Entity>(&mut self, name: impl Into<LocalName>, entity: &EntityHandle<T>) {
		self.references.set_reference(name, entity);
	}

	/// See [`ReferenceRepository::add_reference`].
	pub fn add_reference<T: Entity>(
		&mut self,
		name: impl Into<LocalName>,
		entity: &EntityHandle<T>,
	) -> FixtureResult<()> {
		self.references.add_reference(name, entity)
	}

	/// See [`ReferenceRepository::has_reference`].
	pub fn has_reference<T: Entity>(&self, name: impl Into<LocalName>) -> bool {
		self.references.has_reference::<T>(name)
	}

	/// See [`ReferenceRepository::get_reference`].
	pub fn get_reference<T: Entity>(
		&self,
		name: impl Into<LocalName>,
	) -> FixtureResult<EntityHandle<T>> {
		self.references.get_reference(name)
	}

	/// See [`ReferenceRepository::get_references_by_class`].
	pub fn get_references_by_class<T: Entity>(&self) -> FixtureResult<Vec<EntityHandle<T>>> {
		self.references.get_references_by_class()
	}

	/// Picks one auto-indexed `T` using the context generator.
	///
	/// See [`ReferenceRepository::get_random_reference_by_class`].
	pub fn get_random_reference_by_class<T: Entity>(&mut self) -> FixtureResult<EntityHandle<T>> {
		self.references
			.get_random_reference_by_class(&mut self.rng)
	}

	/// Picks one element of `items` using the context generator.
	pub fn random_value<'a, V>(&mut self, items: &'a [V]) -> Option<&'a V> {
		random_value_with(&mut self.rng, items)
	}

	/// Generator used for random selection.
	pub fn rng(&mut self) -> &mut StdRng {
		&mut self.rng
	}

	/// Asks the persistence manager to write every scheduled entity.
	pub fn flush(&mut self) -> FixtureResult<()> {
		tracing::debug!(count = self.count, "Flushing fixture context");
		self.manager.flush()
	}
}

impl std::fmt::Debug for FixtureContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FixtureContext")
			.field("count", &self.count)
			.field("references", &self.references)
			.field("faker", &self.faker)
			.finish_non_exhaustive()
	}
}
