//! Data Transfer Objects - read-only views of store data.

use serde::{Deserialize, Serialize};

use rookie_core::domain::{Category, Comment, Post, PostId};
use rookie_core::listing::{HomeSummary, TagCount};

/// Full view of a post, as shown on its detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author: String,
    pub has_image: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentInfo>,
    pub created_at: String,
    pub updated_at: String,
    pub views: u64,
    pub likes: u64,
    pub liked: bool,
    pub bookmarked: bool,
    pub can_edit: bool,
}

/// What is known about an attached image without shipping its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    pub mime: String,
    pub size: usize,
}

/// Flags describing the current session's relation to a post.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostFlags {
    pub liked: bool,
    pub bookmarked: bool,
    pub can_edit: bool,
}

impl PostResponse {
    pub fn new(post: &Post, flags: PostFlags) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            category: post.category,
            tags: post.tags.clone(),
            author: post.author.clone(),
            has_image: post.image_url.is_some(),
            attachment: None,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
            views: post.views,
            likes: post.likes,
            liked: flags.liked,
            bookmarked: flags.bookmarked,
            can_edit: flags.can_edit,
        }
    }

    pub fn with_attachment(mut self, attachment: Option<AttachmentInfo>) -> Self {
        self.attachment = attachment;
        self
    }
}

/// One row of a post listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: PostId,
    pub title: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author: String,
    pub created_at: String,
    pub views: u64,
    pub likes: u64,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            category: post.category,
            tags: post.tags.clone(),
            author: post.author.clone(),
            created_at: post.created_at.format("%Y-%m-%d").to_string(),
            views: post.views,
            likes: post.likes,
        }
    }
}

/// A post with its comments, oldest comment first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: u64,
    pub post_id: PostId,
    pub author: String,
    pub content: String,
    pub created_at: String,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author: comment.author.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

/// Home page digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub total_posts: usize,
    pub latest: Vec<PostSummary>,
    pub recent_study: Vec<PostSummary>,
    pub recent_job: Vec<PostSummary>,
    pub popular_tags: Vec<TagCount>,
}

impl From<&HomeSummary> for HomeResponse {
    fn from(summary: &HomeSummary) -> Self {
        fn rows(posts: &[Post]) -> Vec<PostSummary> {
            posts.iter().map(PostSummary::from).collect()
        }

        Self {
            total_posts: summary.total_posts,
            latest: rows(&summary.latest),
            recent_study: rows(&summary.recent_study),
            recent_job: rows(&summary.recent_job),
            popular_tags: summary.popular_tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub nickname: Option<String>,
}
