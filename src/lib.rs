//! # mcfly
//!
//! Helpers for writing persistence fixtures.
//!
//! Fixture code creates entities pre-filled with fake data, persists them
//! through a [`PersistenceManager`](fixtures::persistence::PersistenceManager)
//! and indexes each one under names scoped to its class, so other fixtures
//! can look them up again (`Product:default`, `Product:0`, `Order:cheap`).
//!
//! ## Feature Flags
//!
//! - `macros` (default) - `#[derive(Buildable)]` for entity structs
//!
//! ## Quick Example
//!
//! ```ignore
//! use mcfly::prelude::*;
//!
//! #[derive(Debug, Default, Buildable)]
//! #[buildable(crate = "mcfly::fixtures")]
//! pub struct Product {
//!     name: String,
//!     price: u32,
//! }
//!
//! let mut context = FixtureContext::new(MemoryPersistenceManager::new());
//! let lamp: EntityHandle<Product> = context.create_and_save(
//!     properties! { "name" => "Lamp" },
//!     properties! { "price" => 20 },
//!     "lamp",
//! )?;
//! assert!(context.has_reference::<Product>("default"));
//! ```

pub use mcfly_fixtures as fixtures;

pub use mcfly_fixtures::{
	Buildable, Creatable, Entity, EntityHandle, EntityRef, Faker, FixtureContext, FixtureError,
	FixtureResult, FixtureSettings, Locale, PropertyMap, properties, random_value,
};

/// Convenience re-exports for common usage.
pub mod prelude {
	pub use mcfly_fixtures::prelude::*;
}
