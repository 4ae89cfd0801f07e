//! Read-side helpers: list filtering/sorting and the home dashboard.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Post};
use crate::error::DomainError;

const LATEST_LIMIT: usize = 5;
const CATEGORY_LIMIT: usize = 3;
const POPULAR_TAG_LIMIT: usize = 6;

/// Category filter for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Study,
    Job,
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Study => category == Category::Study,
            CategoryFilter::Job => category == Category::Job,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        match category {
            Category::Study => CategoryFilter::Study,
            Category::Job => CategoryFilter::Job,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(Into::into)
    }
}

/// Sort key for listings. All orders are descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest `created_at` first.
    #[default]
    Latest,
    Views,
    Likes,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Latest => "latest",
            SortKey::Views => "views",
            SortKey::Likes => "likes",
        })
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(SortKey::Latest),
            "views" => Ok(SortKey::Views),
            "likes" => Ok(SortKey::Likes),
            other => Err(DomainError::Validation(format!(
                "unknown sort key '{other}', expected latest, views or likes"
            ))),
        }
    }
}

/// Listing query: category, free-text keyword and sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: CategoryFilter,
    pub keyword: String,
    pub sort: SortKey,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Apply the filter to a collection.
    ///
    /// The sort is stable, so ties keep the collection order.
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let mut list: Vec<&Post> = posts
            .iter()
            .filter(|p| self.category.matches(p.category))
            .filter(|p| p.matches_keyword(&self.keyword))
            .collect();

        match self.sort {
            SortKey::Latest => list.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Views => list.sort_by(|a, b| b.views.cmp(&a.views)),
            SortKey::Likes => list.sort_by(|a, b| b.likes.cmp(&a.likes)),
        }

        list
    }
}

/// A tag with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Home page digest of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeSummary {
    pub total_posts: usize,
    pub latest: Vec<Post>,
    pub recent_study: Vec<Post>,
    pub recent_job: Vec<Post>,
    pub popular_tags: Vec<TagCount>,
}

impl HomeSummary {
    pub fn from_posts(posts: &[Post]) -> Self {
        let sorted = PostFilter::new().apply(posts);

        let recent = |category: Category| -> Vec<Post> {
            sorted
                .iter()
                .filter(|p| p.category == category)
                .take(CATEGORY_LIMIT)
                .map(|p| (*p).clone())
                .collect()
        };

        Self {
            total_posts: posts.len(),
            latest: sorted.iter().take(LATEST_LIMIT).map(|p| (*p).clone()).collect(),
            recent_study: recent(Category::Study),
            recent_job: recent(Category::Job),
            popular_tags: popular_tags(posts, POPULAR_TAG_LIMIT),
        }
    }
}

/// Most used tags, count descending, ties in order of first appearance.
pub fn popular_tags(posts: &[Post], limit: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in posts.iter().flat_map(|p| p.tags.iter()) {
        match index.get(tag.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(tag.as_str(), counts.len());
                counts.push(TagCount {
                    tag: tag.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
