//! Class-namespaced reference registry.
//!
//! Entities are indexed by a [`ReferenceKey`] made of their class name and a
//! [`LocalName`]. The [`ReferenceRepository`] is the entry point; the
//! [`ReferenceStore`] trait is the storage primitive it delegates to.

mod key;
mod repository;
mod store;

pub use key::{DEFAULT_NAME, LocalName, ReferenceKey, References};
pub use repository::ReferenceRepository;
pub use store::{MemoryReferenceStore, ReferenceStore};
