//! Persistence port - how a store loads and saves its whole state.

use crate::error::StorageError;

/// State persistence trait, one implementation per stored state type.
///
/// Stores call `load` once when opened and `save` after every mutation
/// that changed something. Both are synchronous.
pub trait StatePersistence<S>: Send + Sync {
    /// Load the last saved state. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> Result<Option<S>, StorageError>;

    /// Save the full state, replacing what was there.
    fn save(&self, state: &S) -> Result<(), StorageError>;
}
