//! Error types for fixture authoring.
//!
//! Every failure aborts the current operation and is returned to the caller
//! unchanged. Nothing in this crate retries.

use thiserror::Error;

use crate::settings::SettingsError;

/// Errors that can occur while creating, saving or looking up fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// A reference was added with a key that is already registered.
	#[error("Duplicate reference: {0}")]
	DuplicateReference(String),

	/// A strict lookup found no entry for the key.
	#[error("Reference not found: {0}")]
	ReferenceNotFound(String),

	/// Random selection was requested over a class with no auto-indexed entries.
	#[error("No reference found for class {0}")]
	NoReferenceFound(String),

	/// The entity class has no property with this name.
	#[error("Unknown property: {class}::{property}")]
	UnknownProperty {
		/// Class of the entity being built.
		class: String,
		/// Property name that was not found.
		property: String,
	},

	/// The value given for a property does not fit the property's type.
	#[error("Invalid value for property {class}::{property}: {source}")]
	InvalidPropertyValue {
		/// Class of the entity being built.
		class: String,
		/// Property the value was meant for.
		property: String,
		/// Underlying deserialization failure.
		#[source]
		source: serde_json::Error,
	},

	/// A reference exists but holds an entity of another Rust type.
	#[error("Reference {key} holds a {found}, not a {expected}")]
	ReferenceTypeMismatch {
		/// Rendered reference key.
		key: String,
		/// Type name that was requested.
		expected: &'static str,
		/// Type name of the stored entity.
		found: &'static str,
	},

	/// The persistence manager refused the entity.
	#[error("Persistence error: {0}")]
	Persistence(String),

	/// Settings could not be loaded or were invalid.
	#[error(transparent)]
	Settings(#[from] SettingsError),
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_duplicate_reference_error() {
		let error = FixtureError::DuplicateReference("Product:default".to_string());
		assert_eq!(error.to_string(), "Duplicate reference: Product:default");
	}

	#[rstest]
	fn test_unknown_property_error() {
		let error = FixtureError::UnknownProperty {
			class: "Product".to_string(),
			property: "colour".to_string(),
		};
		assert_eq!(error.to_string(), "Unknown property: Product::colour");
	}

	#[rstest]
	fn test_invalid_property_value_keeps_source() {
		let source = serde_json::from_value::<u32>(serde_json::json!("12")).unwrap_err();
		let error = FixtureError::InvalidPropertyValue {
			class: "Product".to_string(),
			property: "price".to_string(),
			source,
		};
		assert!(error.to_string().starts_with("Invalid value for property Product::price"));
		assert!(std::error::Error::source(&error).is_some());
	}

	#[rstest]
	fn test_settings_error_from() {
		let settings_error = SettingsError::Validation("seed".to_string());
		let error: FixtureError = settings_error.into();
		assert!(matches!(error, FixtureError::Settings(_)));
	}
}
