use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PostId;

pub type CommentId = u64;

/// Comment entity - a short reply attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for a new comment (no id, no timestamp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentInput {
    pub post_id: PostId,
    pub author: String,
    pub content: String,
}

impl CommentInput {
    pub fn new(post_id: PostId, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            post_id,
            author: author.into(),
            content: content.into(),
        }
    }
}
