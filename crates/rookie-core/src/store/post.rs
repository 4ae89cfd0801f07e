use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Listener, Listeners, SubscriptionId, load_or, persist};
use crate::domain::{Category, NewPost, Post, PostId, PostPatch};
use crate::listing::PostFilter;
use crate::ports::StatePersistence;

const STORE: &str = "post-store";

/// Everything the post store persists.
///
/// Posts are kept newest first. The three id sets record which posts this
/// session has already viewed, liked or bookmarked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostState {
    pub posts: Vec<Post>,
    pub next_id: PostId,
    pub liked_post_ids: BTreeSet<PostId>,
    pub viewed_post_ids: BTreeSet<PostId>,
    pub bookmarked_post_ids: BTreeSet<PostId>,
}

impl Default for PostState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            next_id: 1,
            liked_post_ids: BTreeSet::new(),
            viewed_post_ids: BTreeSet::new(),
            bookmarked_post_ids: BTreeSet::new(),
        }
    }
}

impl PostState {
    /// Initial state holding a single welcome post with id 1.
    pub fn with_welcome_post(now: DateTime<Utc>) -> Self {
        let mut data = NewPost::new(
            "Welcome to Rookie Hub",
            "A small hub for sharing study notes, error fixes and job hunting tips.",
            Category::Study,
        );
        data.tags = vec!["Rust".to_string(), "Getting started".to_string()];

        Self {
            posts: vec![Post::new(1, data, "admin", now)],
            next_id: 2,
            ..Self::default()
        }
    }

    /// Repair a loaded state so the store invariants hold.
    ///
    /// Drops repeated post ids (first wins), raises `next_id` above every
    /// live id and prunes interaction ids that no longer name a post.
    /// Returns `false` when no id is left to hand out, in which case the
    /// state is unusable.
    pub fn normalize(&mut self) -> bool {
        let mut seen = HashSet::new();
        self.posts.retain(|post| {
            let fresh = seen.insert(post.id);
            if !fresh {
                tracing::warn!(post_id = post.id, "Dropping post with duplicate id");
            }
            fresh
        });

        let max_id = self.posts.iter().map(|p| p.id).max().unwrap_or(0);
        let Some(after_max) = max_id.checked_add(1) else {
            return false;
        };
        self.next_id = self.next_id.max(after_max).max(1);
        if self.next_id == PostId::MAX {
            return false;
        }

        for set in [
            &mut self.liked_post_ids,
            &mut self.viewed_post_ids,
            &mut self.bookmarked_post_ids,
        ] {
            set.retain(|id| seen.contains(id));
        }
        true
    }

    fn contains(&self, id: PostId) -> bool {
        self.posts.iter().any(|p| p.id == id)
    }
}

/// Post store - sole owner of the post collection and interaction sets.
///
/// Operations on a missing id are no-ops; the return value tells the
/// caller whether anything happened.
pub struct PostStore {
    state: PostState,
    initial: PostState,
    persistence: Arc<dyn StatePersistence<PostState>>,
    listeners: Listeners<PostState>,
}

impl PostStore {
    /// Open the store, loading persisted state or falling back to `initial`.
    pub fn open(persistence: Arc<dyn StatePersistence<PostState>>, initial: PostState) -> Self {
        let mut state = load_or(&persistence, STORE, &initial);
        if !state.normalize() {
            tracing::warn!(store = STORE, "Persisted post ids are exhausted, using initial state");
            state = initial.clone();
            state.normalize();
        }

        tracing::info!(posts = state.posts.len(), next_id = state.next_id, "Post store opened");

        Self {
            state,
            initial,
            persistence,
            listeners: Listeners::new(),
        }
    }

    pub fn state(&self) -> &PostState {
        &self.state
    }

    /// The collection, newest first.
    pub fn posts(&self) -> &[Post] {
        &self.state.posts
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.state.posts.iter().find(|p| p.id == id)
    }

    pub fn is_viewed(&self, id: PostId) -> bool {
        self.state.viewed_post_ids.contains(&id)
    }

    pub fn is_liked(&self, id: PostId) -> bool {
        self.state.liked_post_ids.contains(&id)
    }

    pub fn is_bookmarked(&self, id: PostId) -> bool {
        self.state.bookmarked_post_ids.contains(&id)
    }

    /// Create a post with the next sequential id and put it first.
    pub fn add_post(&mut self, data: NewPost, author: impl Into<String>) -> Post {
        let id = self.state.next_id;
        let post = Post::new(id, data, author, Utc::now());

        self.state.posts.insert(0, post.clone());
        self.state.next_id = id.saturating_add(1);

        tracing::debug!(post_id = id, category = %post.category, "Post added");
        self.commit();
        post
    }

    /// Merge `patch` into post `id` and refresh its `updated_at`.
    pub fn update_post(&mut self, id: PostId, patch: PostPatch) -> bool {
        let Some(post) = self.state.posts.iter_mut().find(|p| p.id == id) else {
            tracing::debug!(post_id = id, "Update skipped, post not found");
            return false;
        };

        post.apply(patch, Utc::now());
        tracing::debug!(post_id = id, "Post updated");
        self.commit();
        true
    }

    /// Remove post `id` and purge it from every interaction set.
    pub fn delete_post(&mut self, id: PostId) -> bool {
        let before = self.state.posts.len();
        self.state.posts.retain(|p| p.id != id);
        if self.state.posts.len() == before {
            tracing::debug!(post_id = id, "Delete skipped, post not found");
            return false;
        }

        self.state.liked_post_ids.remove(&id);
        self.state.viewed_post_ids.remove(&id);
        self.state.bookmarked_post_ids.remove(&id);

        tracing::debug!(post_id = id, "Post deleted");
        self.commit();
        true
    }

    /// Count one view per session. Returns `true` when the counter moved.
    pub fn increase_views(&mut self, id: PostId) -> bool {
        if self.state.viewed_post_ids.contains(&id) {
            return false;
        }
        let Some(post) = self.state.posts.iter_mut().find(|p| p.id == id) else {
            return false;
        };

        post.views += 1;
        self.state.viewed_post_ids.insert(id);

        tracing::debug!(post_id = id, "View counted");
        self.commit();
        true
    }

    /// Count one like per session. Returns `true` when the counter moved.
    pub fn increase_likes(&mut self, id: PostId) -> bool {
        if self.state.liked_post_ids.contains(&id) {
            return false;
        }
        let Some(post) = self.state.posts.iter_mut().find(|p| p.id == id) else {
            return false;
        };

        post.likes += 1;
        self.state.liked_post_ids.insert(id);

        tracing::debug!(post_id = id, "Like counted");
        self.commit();
        true
    }

    /// Flip the bookmark on post `id`.
    ///
    /// Returns the new membership, or `None` if the post does not exist.
    pub fn toggle_bookmark(&mut self, id: PostId) -> Option<bool> {
        if !self.state.contains(id) {
            return None;
        }

        let bookmarked = if self.state.bookmarked_post_ids.remove(&id) {
            false
        } else {
            self.state.bookmarked_post_ids.insert(id);
            true
        };

        tracing::debug!(post_id = id, bookmarked, "Bookmark toggled");
        self.commit();
        Some(bookmarked)
    }

    /// Filtered, sorted snapshot of the collection.
    pub fn list_posts(&self, filter: &PostFilter) -> Vec<Post> {
        filter.apply(&self.state.posts).into_iter().cloned().collect()
    }

    /// Bookmarked posts in collection order.
    pub fn bookmarked_posts(&self) -> Vec<Post> {
        self.state
            .posts
            .iter()
            .filter(|p| self.state.bookmarked_post_ids.contains(&p.id))
            .cloned()
            .collect()
    }

    pub fn subscribe(&mut self, listener: Listener<PostState>) -> SubscriptionId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    /// Restore the initial state and persist it.
    pub fn reset(&mut self) {
        self.state = self.initial.clone();
        tracing::info!("Post store reset");
        self.commit();
    }

    fn commit(&self) {
        persist(&self.persistence, STORE, &self.state);
        self.listeners.notify(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::TagList;
    use crate::listing::SortKey;
    use crate::store::testing::{BrokenPersistence, MemoryPersistence};

    fn open_empty() -> (PostStore, Arc<MemoryPersistence<PostState>>) {
        let persistence = Arc::new(MemoryPersistence::new());
        let store = PostStore::open(persistence.clone(), PostState::default());
        (store, persistence)
    }

    fn study(title: &str) -> NewPost {
        NewPost::new(title, "body", Category::Study)
    }

    #[test]
    fn test_add_post_assigns_increasing_ids_newest_first() {
        let (mut store, _) = open_empty();
        let a = store.add_post(study("a"), "kim");
        let b = store.add_post(study("b"), "kim");
        let c = store.add_post(study("c"), "lee");

        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
        let order: Vec<_> = store.posts().iter().map(|p| p.id).collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert_eq!(store.state().next_id, 4);
    }

    #[test]
    fn test_update_missing_post_is_noop() {
        let (mut store, persistence) = open_empty();
        assert!(!store.update_post(42, PostPatch::default().with_title("x")));
        assert_eq!(persistence.save_count(), 0);
    }

    #[test]
    fn test_update_keeps_author_and_refreshes_updated_at() {
        let (mut store, _) = open_empty();
        let post = store.add_post(study("draft"), "kim");
        let patch = PostPatch::default()
            .with_title("final")
            .with_category(Category::Job)
            .with_tags(TagList::from_inputs(["career"]).unwrap());

        assert!(store.update_post(post.id, patch));
        let updated = store.get(post.id).unwrap();
        assert_eq!(updated.title, "final");
        assert_eq!(updated.category, Category::Job);
        assert_eq!(updated.author, "kim");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn test_views_and_likes_count_once() {
        let (mut store, _) = open_empty();
        let id = store.add_post(study("x"), "kim").id;

        assert!(store.increase_views(id));
        assert!(!store.increase_views(id));
        assert!(store.increase_likes(id));
        assert!(!store.increase_likes(id));

        let post = store.get(id).unwrap();
        assert_eq!((post.views, post.likes), (1, 1));
        assert!(store.is_viewed(id) && store.is_liked(id));
    }

    #[test]
    fn test_counting_missing_post_leaves_sets_clean() {
        let (mut store, _) = open_empty();
        assert!(!store.increase_views(9));
        assert!(!store.increase_likes(9));
        assert!(store.state().viewed_post_ids.is_empty());
        assert!(store.state().liked_post_ids.is_empty());
    }

    #[test]
    fn test_toggle_bookmark_is_an_involution() {
        let (mut store, _) = open_empty();
        let id = store.add_post(study("x"), "kim").id;

        assert_eq!(store.toggle_bookmark(id), Some(true));
        assert_eq!(store.bookmarked_posts().len(), 1);
        assert_eq!(store.toggle_bookmark(id), Some(false));
        assert!(!store.is_bookmarked(id));
        assert_eq!(store.toggle_bookmark(99), None);
    }

    #[test]
    fn test_delete_purges_interaction_sets() {
        let (mut store, _) = open_empty();
        let id = store.add_post(study("x"), "kim").id;
        store.increase_views(id);
        store.increase_likes(id);
        store.toggle_bookmark(id);

        assert!(store.delete_post(id));
        assert!(store.get(id).is_none());
        assert!(!store.is_viewed(id) && !store.is_liked(id) && !store.is_bookmarked(id));

        assert!(!store.increase_views(id));
        assert_eq!(store.toggle_bookmark(id), None);
        assert!(!store.delete_post(id));
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let (mut store, _) = open_empty();
        let first = store.add_post(study("a"), "kim").id;
        store.delete_post(first);
        let second = store.add_post(study("b"), "kim").id;
        assert!(second > first);
    }

    #[test]
    fn test_list_posts_filters_category() {
        let (mut store, _) = open_empty();
        store.add_post(study("rust"), "kim");
        store.add_post(NewPost::new("resume", "tips", Category::Job), "kim");
        let id = store.add_post(study("async"), "kim").id;
        store.increase_views(id);

        let filter = PostFilter::new()
            .with_category(Category::Study)
            .sorted_by(SortKey::Views);
        let titles: Vec<_> = store.list_posts(&filter).into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["async", "rust"]);
    }

    #[test]
    fn test_mutations_persist_and_reopen() {
        let (mut store, persistence) = open_empty();
        let id = store.add_post(study("kept"), "kim").id;
        store.increase_likes(id);
        assert_eq!(persistence.save_count(), 2);

        let reopened = PostStore::open(persistence.clone(), PostState::default());
        assert_eq!(reopened.state(), store.state());
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let mut store = PostStore::open(Arc::new(BrokenPersistence), PostState::default());
        let id = store.add_post(study("volatile"), "kim").id;
        assert!(store.increase_views(id));
        assert_eq!(store.get(id).unwrap().views, 1);
    }

    #[test]
    fn test_open_normalizes_loaded_state() {
        let now = Utc::now();
        let mut state = PostState::with_welcome_post(now);
        state.next_id = 1;
        state.bookmarked_post_ids.insert(77);
        state.liked_post_ids.insert(1);

        let store = PostStore::open(Arc::new(MemoryPersistence::with_state(state)), PostState::default());
        assert_eq!(store.state().next_id, 2);
        assert!(store.state().bookmarked_post_ids.is_empty());
        assert!(store.is_liked(1));
    }

    #[test]
    fn test_open_falls_back_when_ids_are_exhausted() {
        let mut state = PostState::default();
        let mut post = Post::new(1, study("last"), "kim", Utc::now());
        post.id = PostId::MAX;
        state.posts.push(post);
        state.next_id = 5;

        let initial = PostState::with_welcome_post(Utc::now());
        let store = PostStore::open(Arc::new(MemoryPersistence::with_state(state)), initial.clone());
        assert_eq!(store.state(), &initial);

        let exhausted = PostState {
            next_id: PostId::MAX,
            ..PostState::default()
        };
        let mut store =
            PostStore::open(Arc::new(MemoryPersistence::with_state(exhausted)), PostState::default());
        assert_eq!(store.state().next_id, 1);
        assert_eq!(store.add_post(study("fresh"), "kim").id, 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let persistence = Arc::new(MemoryPersistence::new());
        let initial = PostState::with_welcome_post(Utc::now());
        let mut store = PostStore::open(persistence, initial.clone());
        store.add_post(study("temp"), "kim");
        store.toggle_bookmark(1);

        store.reset();
        assert_eq!(store.state(), &initial);
    }

    #[test]
    fn test_subscribers_see_each_change() {
        let (mut store, _) = open_empty();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let sub = store.subscribe(Box::new(move |state: &PostState| {
            sink.lock().unwrap().push(state.posts.len());
        }));

        let id = store.add_post(study("a"), "kim").id;
        store.increase_views(id);
        store.increase_views(id);
        assert!(store.unsubscribe(sub));
        store.add_post(study("b"), "kim");

        assert_eq!(*seen.lock().unwrap(), vec![1, 1]);
    }
}
