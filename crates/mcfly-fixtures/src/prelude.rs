//! Convenience re-exports for common usage.
//!
//! # Example
//!
//! ```ignore
//! use mcfly_fixtures::prelude::*;
//!
//! // Now you have access to:
//! // - FixtureContext and the Creatable trait
//! // - Entity traits and property maps
//! // - Reference and persistence types
//! // - Error types
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult};

// Context and fixtures
pub use crate::context::FixtureContext;
pub use crate::creatable::Creatable;
pub use crate::settings::FixtureSettings;

// Entities
pub use crate::entity::{Buildable, Entity, EntityHandle, EntityRef, PropertyMap};

// References
pub use crate::reference::{
	LocalName, MemoryReferenceStore, ReferenceKey, ReferenceRepository, ReferenceStore, References,
};

// Persistence
pub use crate::persistence::{MemoryPersistenceManager, PersistenceManager};

// Random data
pub use crate::faker::{Faker, Locale};
pub use crate::random::{random_value, random_value_with};

pub use crate::properties;

// Re-export the Buildable derive macro when available
#[cfg(feature = "macros")]
pub use mcfly_fixtures_macros::Buildable;
