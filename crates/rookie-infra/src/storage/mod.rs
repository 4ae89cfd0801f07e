//! Key-value storage implementations - a data directory and an in-memory fallback.

mod memory;

#[cfg(feature = "file")]
mod file;

pub use memory::InMemoryStorage;

#[cfg(feature = "file")]
pub use file::FileStorage;
