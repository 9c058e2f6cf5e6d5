//! Fixture authoring helpers for seeding a persistence layer.
//!
//! This crate sits between fixture code and a persistence manager and adds:
//!
//! - **Reference registry**: entities are indexed by a name scoped to their
//!   class, so `Product:1` and `Order:1` never collide
//! - **Entity factory**: entities are built from property maps merged over
//!   defaults, persisted, then indexed automatically
//! - **Random helpers**: pick a random element, or a random entity of a class
//!
//! # Features
//!
//! - `macros` - `#[derive(Buildable)]` support (enabled by default)
//!
//! # Quick Start
//!
//! ```ignore
//! use mcfly_fixtures::prelude::*;
//!
//! #[derive(Debug, Default, Buildable)]
//! pub struct Product {
//!     name: String,
//!     price: u32,
//! }
//!
//! struct ProductFixture;
//!
//! impl Creatable for ProductFixture {
//!     type Entity = Product;
//!
//!     fn defaults(&self, faker: &mut Faker) -> PropertyMap {
//!         properties! {
//!             "name" => faker.word(),
//!             "price" => faker.number_between(1, 500),
//!         }
//!     }
//! }
//!
//! let manager = MemoryPersistenceManager::new();
//! let mut context = FixtureContext::new(manager.clone());
//!
//! let first = ProductFixture.create(&mut context, PropertyMap::new(), References::none())?;
//! let cheap = ProductFixture.create(&mut context, properties! { "price" => 1 }, "cheap")?;
//!
//! // Product:default, Product:0, Product:1 and Product:cheap are registered
//! let same = context.get_reference::<Product>("default")?;
//! let random = context.get_random_reference_by_class::<Product>()?;
//!
//! context.flush()?;
//! ```
//!
//! # Architecture
//!
//! - [`FixtureContext`] - Counter, registry, persistence manager and faker of a run
//! - [`ReferenceRepository`](reference::ReferenceRepository) - Class-namespaced lookups
//! - [`ReferenceStore`](reference::ReferenceStore) - Storage primitive behind the registry
//! - [`Buildable`] - Construction of an entity from a [`PropertyMap`]
//! - [`Creatable`] - Capability implemented by concrete fixtures
//! - [`PersistenceManager`](persistence::PersistenceManager) - Durability of created entities

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod context;
pub mod creatable;
pub mod entity;
pub mod error;
pub mod faker;
pub mod persistence;
pub mod prelude;
pub mod random;
pub mod reference;
pub mod settings;

// Re-export commonly used types at crate root
pub use context::FixtureContext;
pub use creatable::Creatable;
pub use entity::{Buildable, Entity, EntityHandle, EntityRef, PropertyMap, merge_properties};
pub use error::{FixtureError, FixtureResult};
pub use faker::{Faker, Locale};
pub use random::random_value;
pub use settings::FixtureSettings;

// Re-export derive macro when available
#[cfg(feature = "macros")]
pub use mcfly_fixtures_macros::Buildable;

#[doc(hidden)]
pub mod __private {
	pub use serde_json;
}

/// Builds a [`PropertyMap`] from `name => value` pairs.
///
/// Values are converted with `serde_json::json!`.
///
/// # Example
///
/// ```
/// use mcfly_fixtures::properties;
///
/// let map = properties! { "name" => "Lamp", "price" => 20 };
/// assert_eq!(map["price"], serde_json::json!(20));
/// assert!(properties!().is_empty());
/// ```
#[macro_export]
macro_rules! properties {
	() => {
		$crate::PropertyMap::new()
	};
	($($name:expr => $value:expr),+ $(,)?) => {{
		let mut map = $crate::PropertyMap::new();
		$(
			map.insert(
				::std::string::String::from($name),
				$crate::__private::serde_json::json!($value),
			);
		)+
		map
	}};
}
