//! Discourse API payload shapes.
//!
//! Only the fields the crawler reads are modeled; everything else in the
//! responses is ignored. Defaults keep a missing field from failing a
//! whole page of results.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /categories.json`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub category_list: CategoryList,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Category {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// `GET /c/{slug}.json?page=N`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TopicListResponse {
    #[serde(default)]
    pub topic_list: TopicList,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TopicList {
    #[serde(default)]
    pub topics: Vec<TopicSummary>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TopicSummary {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category_id: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub posts_count: u32,
}

/// `GET /t/{slug}/{id}.json`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TopicResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub post_stream: PostStream,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PostStream {
    #[serde(default)]
    pub posts: Vec<RawPost>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPost {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub created_at: String,
    /// Rendered HTML of the post body.
    #[serde(default)]
    pub cooked: String,
    /// Markdown source, used when `cooked` is absent.
    #[serde(default)]
    pub raw: String,
}

/// A topic selected for scraping — metadata from the category listing
/// plus the canonical topic URL.
#[derive(Debug, Clone)]
pub struct TopicRef {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub category_id: u64,
    pub created_at: DateTime<Utc>,
    pub posts_count: u32,
    pub url: String,
}
