use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{load_or, persist};
use crate::domain::{Comment, CommentId, CommentInput, PostId};
use crate::ports::StatePersistence;

const STORE: &str = "rookie-hub-comments";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentState {
    pub comments: Vec<Comment>,
}

/// Comment store - comments attached to posts, oldest first.
pub struct CommentStore {
    state: CommentState,
    persistence: Arc<dyn StatePersistence<CommentState>>,
}

impl CommentStore {
    pub fn open(persistence: Arc<dyn StatePersistence<CommentState>>) -> Self {
        let state = load_or(&persistence, STORE, &CommentState::default());
        Self { state, persistence }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.state.comments
    }

    pub fn comments_for(&self, post_id: PostId) -> Vec<&Comment> {
        self.state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .collect()
    }

    /// Append a comment with id = highest existing id + 1.
    pub fn add_comment(&mut self, input: CommentInput) -> Comment {
        let id: CommentId = self
            .state
            .comments
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(1, |max| max + 1);

        let comment = Comment {
            id,
            post_id: input.post_id,
            author: input.author,
            content: input.content,
            created_at: Utc::now(),
        };
        self.state.comments.push(comment.clone());

        tracing::debug!(comment_id = id, post_id = comment.post_id, "Comment added");
        self.commit();
        comment
    }

    pub fn delete_comment(&mut self, id: CommentId) -> bool {
        let before = self.state.comments.len();
        self.state.comments.retain(|c| c.id != id);
        let removed = self.state.comments.len() != before;
        if removed {
            tracing::debug!(comment_id = id, "Comment deleted");
            self.commit();
        }
        removed
    }

    /// Drop every comment on `post_id`. Returns how many were removed.
    pub fn purge_post(&mut self, post_id: PostId) -> usize {
        let before = self.state.comments.len();
        self.state.comments.retain(|c| c.post_id != post_id);
        let removed = before - self.state.comments.len();
        if removed > 0 {
            tracing::debug!(post_id, removed, "Comments purged");
            self.commit();
        }
        removed
    }

    pub fn reset(&mut self) {
        self.state = CommentState::default();
        self.commit();
    }

    fn commit(&self) {
        persist(&self.persistence, STORE, &self.state);
    }
}
