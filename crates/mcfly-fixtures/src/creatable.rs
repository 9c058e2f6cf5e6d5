//! Capability implemented by concrete fixtures.

use crate::context::FixtureContext;
use crate::entity::{Buildable, EntityHandle, PropertyMap};
use crate::error::FixtureResult;
use crate::faker::Faker;
use crate::reference::References;

/// A fixture that creates persisted entities pre-filled with random data.
///
/// Implementors only describe defaults; creation, persistence and indexing
/// come from [`FixtureContext::create_and_save`]. Explicit properties override
/// the defaults, and the returned handle can still be mutated.
///
/// # Example
///
/// ```ignore
/// struct ProductFixture;
///
/// impl Creatable for ProductFixture {
///     type Entity = Product;
///
///     fn defaults(&self, faker: &mut Faker) -> PropertyMap {
///         properties! {
///             "name" => faker.word(),
///             "price" => faker.number_between(1, 500),
///         }
///     }
/// }
///
/// let fixture = ProductFixture;
/// let any = fixture.create(&mut context, PropertyMap::new(), References::none())?;
/// let cheap = fixture.create(&mut context, properties! { "price" => 1 }, "cheap")?;
/// cheap.write().name = "Pencil".to_string();
/// let tagged = fixture.create(&mut context, PropertyMap::new(), ["price:100", "duration:60"])?;
/// ```
pub trait Creatable {
	/// Entity type produced by this fixture.
	type Entity: Buildable;

	/// Default property values, usually drawn from `faker`.
	fn defaults(&self, faker: &mut Faker) -> PropertyMap;

	/// Creates, persists and registers one entity.
	///
	/// `references` accepts a single name (`"x"`, `1`) or several
	/// (`["a", "b"]`); every entity is also indexed by its counter value.
	fn create(
		&self,
		context: &mut FixtureContext,
		properties: PropertyMap,
		references: impl Into<References>,
	) -> FixtureResult<EntityHandle<Self::Entity>> {
		let defaults = self.defaults(context.faker());
		context.create_and_save(properties, defaults, references)
	}

	/// Creates `count` entities with default properties only.
	fn create_batch(
		&self,
		context: &mut FixtureContext,
		count: usize,
	) -> FixtureResult<Vec<EntityHandle<Self::Entity>>> {
		(0..count)
			.map(|_| self.create(context, PropertyMap::new(), References::none()))
			.collect()
	}

	/// Number of entities saved so far in `context`, across every class.
	fn count(context: &FixtureContext) -> u64 {
		context.count()
	}
}
