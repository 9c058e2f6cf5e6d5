//! Entity capabilities used by the factory and the reference registry.
//!
//! Entities are plain structs. Instead of runtime reflection, each type
//! exposes a [`Buildable`] adapter (usually derived) that can produce a blank
//! instance and assign fields by name.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::FixtureResult;

/// Property name → value map used to build entities.
pub type PropertyMap = IndexMap<String, Value>;

/// Shared handle to a created entity.
///
/// The caller, the reference registry and the persistence manager all hold
/// the same instance, so mutations made after creation are visible everywhere.
pub type EntityHandle<T> = Arc<RwLock<T>>;

/// A type that can be registered as a fixture reference.
pub trait Entity: Send + Sync + 'static {
	/// Class name used to namespace references (e.g. `"Product"`).
	const CLASS_NAME: &'static str;
}

/// An entity that can be built from a [`PropertyMap`] without going through
/// its regular constructor.
///
/// # Example
///
/// ```ignore
/// use mcfly_fixtures::Buildable;
///
/// #[derive(Debug, Default, Buildable)]
/// pub struct Product {
///     name: String,
///     price: u32,
/// }
/// ```
pub trait Buildable: Entity + Sized {
	/// Returns a blank instance. No constructor logic runs.
	fn instantiate() -> Self;

	/// Names accepted by [`set_property`](Buildable::set_property).
	fn property_names() -> &'static [&'static str];

	/// Assigns a single property from a JSON value.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::UnknownProperty`](crate::FixtureError::UnknownProperty)
	/// if the type has no such property, or
	/// [`FixtureError::InvalidPropertyValue`](crate::FixtureError::InvalidPropertyValue)
	/// if the value does not deserialize into the field type.
	fn set_property(&mut self, name: &str, value: Value) -> FixtureResult<()>;

	/// Returns true if `name` is a settable property.
	fn has_property(name: &str) -> bool {
		Self::property_names().contains(&name)
	}

	/// Builds an instance from a property map.
	///
	/// Properties are assigned in map order; the first failure aborts.
	fn build_from(properties: PropertyMap) -> FixtureResult<Self> {
		let mut entity = Self::instantiate();
		for (name, value) in properties {
			entity.set_property(&name, value)?;
		}
		Ok(entity)
	}
}

/// Merges `properties` over `defaults`. Keys from `properties` win.
///
/// Default keys keep their position; keys only present in `properties` are
/// appended in their own order.
pub fn merge_properties(defaults: PropertyMap, properties: PropertyMap) -> PropertyMap {
	let mut merged = defaults;
	merged.extend(properties);
	merged
}

/// Type-erased reference to a registered entity.
#[derive(Clone)]
pub struct EntityRef {
	class: &'static str,
	type_name: &'static str,
	inner: Arc<dyn Any + Send + Sync>,
}

impl EntityRef {
	/// Wraps an entity handle.
	pub fn new<T: Entity>(handle: &EntityHandle<T>) -> Self {
		Self {
			class: T::CLASS_NAME,
			type_name: std::any::type_name::<T>(),
			inner: handle.clone(),
		}
	}

	/// Class name of the wrapped entity.
	pub fn class(&self) -> &'static str {
		self.class
	}

	/// Rust type name of the wrapped entity.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Returns the typed handle if the entity is a `T`.
	pub fn downcast<T: Entity>(&self) -> Option<EntityHandle<T>> {
		self.inner.clone().downcast::<RwLock<T>>().ok()
	}

	/// Returns true if both references point to the same instance.
	pub fn ptr_eq(&self, other: &EntityRef) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// Returns true if this reference points to `handle`.
	pub fn is<T: Entity>(&self, handle: &EntityHandle<T>) -> bool {
		self.downcast::<T>()
			.map(|own| Arc::ptr_eq(&own, handle))
			.unwrap_or(false)
	}
}

impl fmt::Debug for EntityRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EntityRef")
			.field("class", &self.class)
			.field("type_name", &self.type_name)
			.finish_non_exhaustive()
	}
}

impl<T: Entity> From<&EntityHandle<T>> for EntityRef {
	fn from(handle: &EntityHandle<T>) -> Self {
		Self::new(handle)
	}
}

#[cfg(test)]
pub(crate) mod test_entities {
	use super::*;
	use crate::error::FixtureError;

	#[derive(Debug, Default, Clone, PartialEq)]
	pub(crate) struct Product {
		pub(crate) name: String,
		pub(crate) price: u32,
	}

	impl Entity for Product {
		const CLASS_NAME: &'static str = "Product";
	}

	impl Buildable for Product {
		fn instantiate() -> Self {
			Self::default()
		}

		fn property_names() -> &'static [&'static str] {
			&["name", "price"]
		}

		fn set_property(&mut self, name: &str, value: Value) -> FixtureResult<()> {
			let invalid = |source: serde_json::Error| FixtureError::InvalidPropertyValue {
				class: Self::CLASS_NAME.to_string(),
				property: name.to_string(),
				source,
			};
			match name {
				"name" => self.name = serde_json::from_value(value).map_err(invalid)?,
				"price" => self.price = serde_json::from_value(value).map_err(invalid)?,
				_ => {
					return Err(FixtureError::UnknownProperty {
						class: Self::CLASS_NAME.to_string(),
						property: name.to_string(),
					});
				}
			}
			Ok(())
		}
	}

	#[derive(Debug, Default, Clone, PartialEq)]
	pub(crate) struct Order {
		pub(crate) reference: String,
	}

	impl Entity for Order {
		const CLASS_NAME: &'static str = "Order";
	}

	impl Buildable for Order {
		fn instantiate() -> Self {
			Self::default()
		}

		fn property_names() -> &'static [&'static str] {
			&["reference"]
		}

		fn set_property(&mut self, name: &str, value: Value) -> FixtureResult<()> {
			match name {
				"reference" => {
					self.reference = serde_json::from_value(value).map_err(|source| {
						FixtureError::InvalidPropertyValue {
							class: Self::CLASS_NAME.to_string(),
							property: name.to_string(),
							source,
						}
					})?
				}
				_ => {
					return Err(FixtureError::UnknownProperty {
						class: Self::CLASS_NAME.to_string(),
						property: name.to_string(),
					});
				}
			}
			Ok(())
		}
	}

	pub(crate) fn handle<T>(value: T) -> EntityHandle<T> {
		Arc::new(RwLock::new(value))
	}
}
