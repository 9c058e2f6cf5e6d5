//! Persistence manager interface.
//!
//! The fixture context only schedules entities for storage. Writing them
//! (`flush`) is left to the host once every fixture has run.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::entity::EntityRef;
use crate::error::FixtureResult;

/// Object manager that owns durability of created entities.
pub trait PersistenceManager: Send + Sync {
	/// Schedules an entity for storage.
	///
	/// # Errors
	///
	/// Implementations return [`FixtureError::Persistence`](crate::FixtureError::Persistence)
	/// when the entity cannot be scheduled. The error reaches the caller of
	/// `create_and_save` unchanged.
	fn persist(&mut self, entity: &EntityRef) -> FixtureResult<()>;

	/// Writes every scheduled entity.
	fn flush(&mut self) -> FixtureResult<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
	scheduled: Vec<EntityRef>,
	flushed: Vec<EntityRef>,
}

/// Persistence manager that keeps entities in memory.
///
/// Clones share the same state, so a copy kept by the caller can inspect what
/// a [`FixtureContext`](crate::FixtureContext) persisted.
///
/// # Example
///
/// ```
/// use mcfly_fixtures::persistence::MemoryPersistenceManager;
/// use mcfly_fixtures::FixtureContext;
///
/// let manager = MemoryPersistenceManager::new();
/// let mut context = FixtureContext::new(manager.clone());
/// context.flush().unwrap();
/// assert_eq!(manager.flushed_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistenceManager {
	state: Arc<RwLock<MemoryState>>,
}

impl MemoryPersistenceManager {
	/// Creates an empty manager.
	pub fn new() -> Self {
		Self::default()
	}

	/// Entities scheduled and not flushed yet.
	pub fn scheduled(&self) -> Vec<EntityRef> {
		self.state.read().scheduled.clone()
	}

	/// Entities written by previous flushes, in persist order.
	pub fn flushed(&self) -> Vec<EntityRef> {
		self.state.read().flushed.clone()
	}

	/// Number of entities waiting for a flush.
	pub fn scheduled_count(&self) -> usize {
		self.state.read().scheduled.len()
	}

	/// Number of entities written so far.
	pub fn flushed_count(&self) -> usize {
		self.state.read().flushed.len()
	}
}

impl PersistenceManager for MemoryPersistenceManager {
	fn persist(&mut self, entity: &EntityRef) -> FixtureResult<()> {
		let mut state = self.state.write();
		// Persisting the same instance twice schedules it once.
		if !state.scheduled.iter().any(|known| known.ptr_eq(entity)) {
			state.scheduled.push(entity.clone());
		}
		Ok(())
	}

	fn flush(&mut self) -> FixtureResult<()> {
		let mut state = self.state.write();
		let pending = std::mem::take(&mut state.scheduled);
		tracing::debug!(count = pending.len(), "Flushing fixture entities");
		state.flushed.extend(pending);
		Ok(())
	}
}
