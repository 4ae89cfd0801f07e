//! JSON persistence adapter - stores a whole state under one storage key.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use rookie_core::StorageError;
use rookie_core::ports::{KeyValueStore, StatePersistence};

/// Storage keys used by the application stores.
pub mod keys {
    pub const POSTS: &str = "post-store";
    pub const SESSION: &str = "user-store";
    pub const COMMENTS: &str = "rookie-hub-comments";
}

/// Layout version written next to every saved state.
pub const STATE_VERSION: u32 = 0;

/// Stored shape: `{ "state": ..., "version": 0 }`.
#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// Persists a state type as a JSON envelope in a [`KeyValueStore`].
pub struct JsonPersistence<S> {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    _state: PhantomData<fn() -> S>,
}

impl<S> JsonPersistence<S> {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            _state: PhantomData,
        }
    }
}

impl<S> StatePersistence<S> for JsonPersistence<S>
where
    S: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<S>, StorageError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };

        let envelope: Envelope<S> = serde_json::from_str(&raw)?;
        if envelope.version > STATE_VERSION {
            tracing::warn!(
                key = %self.key,
                version = envelope.version,
                "Stored state has a newer layout version"
            );
        }
        Ok(Some(envelope.state))
    }

    fn save(&self, state: &S) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&Envelope {
            state,
            version: STATE_VERSION,
        })?;
        self.storage.set_item(&self.key, &raw)
    }
}
