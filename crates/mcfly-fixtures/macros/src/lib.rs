//! Procedural macros for mcfly-fixtures.
//!
//! This crate provides the `#[derive(Buildable)]` macro, which lets an entity
//! be built from a property map without calling its constructor.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attr_parser;
mod buildable_derive;

/// Derives `Entity` and `Buildable` for a struct with named fields.
///
/// # Attributes
///
/// ## Struct-level attributes
///
/// - `#[buildable(class = "Name")]` - Class name used to namespace references
///   (defaults to the struct name)
/// - `#[buildable(crate = "path")]` - Path to `mcfly_fixtures` when it is only
///   reachable through a re-export, such as `mcfly::fixtures`
///
/// ## Field-level attributes
///
/// - `#[buildable(rename = "name")]` - Property name to accept instead of the field name
/// - `#[buildable(skip)]` - Keep the field out of the settable properties
///
/// Every field must implement `Default`; settable fields must also implement
/// `serde::de::DeserializeOwned`.
///
/// # Example
///
/// ```ignore
/// use mcfly_fixtures::Buildable;
///
/// #[derive(Debug, Default, Buildable)]
/// #[buildable(class = "Product")]
/// pub struct Product {
///     name: String,
///
///     #[buildable(rename = "unitPrice")]
///     price: u32,
///
///     #[buildable(skip)]
///     cache: Option<String>,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl mcfly_fixtures::Entity for Product {
///     const CLASS_NAME: &'static str = "Product";
/// }
///
/// impl mcfly_fixtures::Buildable for Product {
///     fn instantiate() -> Self {
///         Self {
///             name: Default::default(),
///             price: Default::default(),
///             cache: Default::default(),
///         }
///     }
///
///     fn property_names() -> &'static [&'static str] {
///         &["name", "unitPrice"]
///     }
///
///     fn set_property(&mut self, name: &str, value: serde_json::Value) -> FixtureResult<()> {
///         match name {
///             "name" => { self.name = serde_json::from_value(value)?; Ok(()) }
///             "unitPrice" => { self.price = serde_json::from_value(value)?; Ok(()) }
///             _ => Err(FixtureError::UnknownProperty { .. }),
///         }
///     }
/// }
/// ```
#[proc_macro_derive(Buildable, attributes(buildable))]
pub fn derive_buildable(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	buildable_derive::derive_buildable_impl(input)
		.unwrap_or_else(|err| err.to_compile_error())
		.into()
}
