//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that storage adapters must implement.

mod persistence;
mod storage;

pub use persistence::StatePersistence;
pub use storage::KeyValueStore;
