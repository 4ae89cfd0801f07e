use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Sequential post identifier, starting at 1.
pub type PostId = u64;

/// Closed set of post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Study,
    Job,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Study => "study",
            Category::Job => "job",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "study" => Ok(Category::Study),
            "job" => Ok(Category::Job),
            other => Err(DomainError::Validation(format!(
                "unknown category '{other}', expected study or job"
            ))),
        }
    }
}

/// Post entity - a single user-authored entry with engagement counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
}

impl Post {
    /// Create a post from user input with zeroed counters.
    pub fn new(id: PostId, data: NewPost, author: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: data.title,
            content: data.content,
            category: data.category,
            tags: data.tags,
            author: author.into(),
            image_url: data.image_url,
            created_at: now,
            updated_at: now,
            views: 0,
            likes: 0,
        }
    }

    /// Merge the supplied fields and refresh `updated_at`.
    ///
    /// `updated_at` never moves before `created_at`, even if the clock does.
    pub fn apply(&mut self, patch: PostPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        self.updated_at = now.max(self.created_at);
    }

    /// Case-insensitive substring match over title, content and tags.
    ///
    /// The keyword is trimmed first; an empty keyword matches every post.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystack = format!("{} {} {}", self.title, self.content, self.tags.join(" "));
        haystack.to_lowercase().contains(&needle)
    }
}

/// Input for a new post. Validation is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category,
            tags: Vec::new(),
            image_url: None,
        }
    }

    pub fn with_tags(mut self, tags: TagList) -> Self {
        self.tags = tags.into_vec();
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Reject blank titles and contents.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("content must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Partial update of a post. `None` leaves the field untouched.
///
/// `image_url` is doubly optional: `Some(None)` removes the attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<Option<String>>,
}

impl PostPatch {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_tags(mut self, tags: TagList) -> Self {
        self.tags = Some(tags.into_vec());
        self
    }

    pub fn with_image(mut self, image_url: Option<String>) -> Self {
        self.image_url = Some(image_url);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.image_url.is_none()
    }

    /// Reject a patch that would blank out the title or content.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if self.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(DomainError::Validation("content must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Ordered tag input that trims entries and rejects duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from raw inputs, failing on the first blank or repeated tag.
    pub fn from_inputs<I, S>(inputs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags = Self::new();
        for raw in inputs {
            tags.push(raw.as_ref())?;
        }
        Ok(tags)
    }

    /// Append a trimmed tag, keeping insertion order.
    pub fn push(&mut self, raw: &str) -> Result<(), DomainError> {
        let tag = raw.trim();
        if tag.is_empty() {
            return Err(DomainError::Validation("tag must not be empty".to_string()));
        }
        if self.0.iter().any(|t| t == tag) {
            return Err(DomainError::Duplicate(format!("tag '{tag}' already added")));
        }
        self.0.push(tag.to_string());
        Ok(())
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
