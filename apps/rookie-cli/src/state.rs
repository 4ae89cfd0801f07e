//! Application state - the stores every command works against.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use rookie_core::domain::PostId;
use rookie_core::ports::KeyValueStore;
use rookie_core::store::{
    CommentState, CommentStore, PostState, PostStore, SessionState, SessionStore,
};
use rookie_infra::{InMemoryStorage, JsonPersistence, keys};

#[cfg(feature = "file")]
use rookie_infra::FileStorage;

use crate::config::{AppConfig, StorageKind};

/// The application's data layer, built once at startup and passed by
/// reference to command handlers.
pub struct AppState {
    pub posts: PostStore,
    pub session: SessionStore,
    pub comments: CommentStore,
    pub anonymous_author: String,
}

impl AppState {
    /// Build the state with the storage backend the configuration asks for.
    pub fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn KeyValueStore> = match config.storage {
            StorageKind::Memory => {
                tracing::info!("Using in-memory storage, nothing will be saved");
                Arc::new(InMemoryStorage::new())
            }
            #[cfg(feature = "file")]
            StorageKind::File => Arc::new(
                FileStorage::open(&config.data_dir).with_context(|| {
                    format!("failed to open data directory {}", config.data_dir.display())
                })?,
            ),
            #[cfg(not(feature = "file"))]
            StorageKind::File => {
                tracing::warn!("Built without file storage - using in-memory fallback");
                Arc::new(InMemoryStorage::new())
            }
        };

        Ok(Self::with_storage(storage, config))
    }

    /// Build the state on top of an existing storage backend.
    pub fn with_storage(storage: Arc<dyn KeyValueStore>, config: &AppConfig) -> Self {
        let initial = if config.seed_welcome_post {
            PostState::with_welcome_post(Utc::now())
        } else {
            PostState::default()
        };

        let posts = PostStore::open(
            Arc::new(JsonPersistence::<PostState>::new(storage.clone(), keys::POSTS)),
            initial,
        );
        let session = SessionStore::open(Arc::new(JsonPersistence::<SessionState>::new(
            storage.clone(),
            keys::SESSION,
        )));
        let comments = CommentStore::open(Arc::new(JsonPersistence::<CommentState>::new(
            storage,
            keys::COMMENTS,
        )));

        tracing::debug!("Application state initialized");

        Self {
            posts,
            session,
            comments,
            anonymous_author: config.anonymous_author.clone(),
        }
    }

    /// Delete a post together with its comments.
    pub fn delete_post(&mut self, id: PostId) -> bool {
        let removed = self.posts.delete_post(id);
        if removed {
            self.comments.purge_post(id);
        }
        removed
    }

    /// Return every store to its initial state.
    pub fn reset(&mut self) {
        self.posts.reset();
        self.session.reset();
        self.comments.reset();
    }
}

#[cfg(test)]
mod tests {
    use rookie_core::domain::{Category, CommentInput, NewPost};

    use super::*;

    fn config(seed: bool) -> AppConfig {
        AppConfig {
            seed_welcome_post: seed,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_fresh_state_seeds_welcome_post() {
        let state = AppState::with_storage(Arc::new(InMemoryStorage::new()), &config(true));
        assert_eq!(state.posts.posts().len(), 1);
        assert_eq!(state.posts.state().next_id, 2);
        assert_eq!(state.session.current_user(), None);
    }

    #[test]
    fn test_state_reloads_from_shared_storage() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(InMemoryStorage::new());
        let mut state = AppState::with_storage(storage.clone(), &config(false));
        state.session.login("kim");
        state.posts.add_post(NewPost::new("t", "c", Category::Job), "kim");

        let reloaded = AppState::with_storage(storage, &config(false));
        assert_eq!(reloaded.session.current_user(), Some("kim"));
        assert_eq!(reloaded.posts.posts().len(), 1);
    }

    #[test]
    fn test_delete_post_purges_comments() {
        let mut state = AppState::with_storage(Arc::new(InMemoryStorage::new()), &config(false));
        let id = state.posts.add_post(NewPost::new("t", "c", Category::Study), "kim").id;
        state.comments.add_comment(CommentInput::new(id, "lee", "nice"));

        assert!(state.delete_post(id));
        assert!(state.comments.comments_for(id).is_empty());
        assert!(!state.delete_post(id));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = AppState::with_storage(Arc::new(InMemoryStorage::new()), &config(true));
        state.session.login("kim");
        state.posts.add_post(NewPost::new("t", "c", Category::Study), "kim");
        state.comments.add_comment(CommentInput::new(1, "kim", "hi"));

        state.reset();
        assert_eq!(state.posts.posts().len(), 1);
        assert_eq!(state.session.current_user(), None);
        assert!(state.comments.comments().is_empty());
    }

    #[cfg(feature = "file")]
    #[test]
    fn test_open_with_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("data"),
            ..config(false)
        };

        let mut state = AppState::open(&config).unwrap();
        state.session.login("park");
        assert!(dir.path().join("data").join("user-store.json").exists());
    }
}
