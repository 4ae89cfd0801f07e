//! # Rookie Infrastructure
//!
//! Concrete implementations of the ports defined in `rookie-core`:
//! key-value storage backends, the JSON persistence adapter and the image
//! attachment helper.
//!
//! ## Feature Flags
//!
//! - `file` (default) - Directory-backed storage, one JSON file per key
//! - without `file` - In-memory storage only

pub mod image;
pub mod persistence;
pub mod storage;

// Re-exports
pub use persistence::{JsonPersistence, keys};
pub use storage::InMemoryStorage;

#[cfg(feature = "file")]
pub use storage::FileStorage;
