use crate::error::StorageError;

/// Key-value storage trait - abstraction over local storage backends
/// (a directory of files, an in-memory map).
///
/// Values are opaque strings; callers own the encoding.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
