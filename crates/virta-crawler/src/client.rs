//! Discourse API client — category discovery, topic listing, post fetch.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use virta_core::error::{Result, VirtaError};
use virta_core::types::{CorpusPost, PostReply};

use crate::extract::html_to_text;
use crate::types::{CategoriesResponse, TopicListResponse, TopicRef, TopicResponse};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Delay between consecutive API requests — polite rate limiting.
const REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Category names containing any of these are considered course-related.
const COURSE_KEYWORDS: &[&str] = &["tools", "data", "science", "tds", "python", "programming"];

/// Categories tried when no course-related one is found.
const FALLBACK_CATEGORIES: &[&str] = &["general", "support", "questions", "help"];

/// Replies shorter than this are noise (thanks, +1, emoji).
const MIN_REPLY_CHARS: usize = 10;
const MAX_REPLIES: usize = 5;
const REPLY_PREVIEW_CHARS: usize = 500;

/// HTTP client for a single Discourse instance.
pub struct DiscourseClient {
    base_url: String,
    client: reqwest::Client,
}

impl DiscourseClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| VirtaError::Crawl(format!("HTTP client error: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Find category slugs related to the course.
    ///
    /// Falls back to general categories when nothing matches, and to
    /// `general` alone when the categories endpoint is unreachable.
    pub async fn find_course_categories(&self) -> Vec<String> {
        let url = format!("{}/categories.json", self.base_url);
        let data: CategoriesResponse = match self.get_json(&url).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Error finding course categories: {e}");
                return vec!["general".to_string()];
            }
        };

        let mut slugs = Vec::new();
        for category in data.category_list.categories {
            let name = category.name.to_lowercase();
            if COURSE_KEYWORDS.iter().any(|k| name.contains(k)) {
                tracing::info!(
                    "Found course-related category: {} ({})",
                    category.name,
                    category.slug
                );
                slugs.push(category.slug);
            }
        }

        if slugs.is_empty() {
            tracing::info!("Using general categories as fallback");
            slugs = FALLBACK_CATEGORIES.iter().map(|s| (*s).to_string()).collect();
        }
        slugs
    }

    /// List topics in a category created within `[start, end]`, walking
    /// pages until an empty one.
    pub async fn category_topics(
        &self,
        slug: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<TopicRef> {
        let mut topics = Vec::new();
        let mut page: u32 = 0;

        loop {
            let url = format!("{}/c/{}.json?page={}", self.base_url, slug, page);
            let data: TopicListResponse = match self.get_json(&url).await {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!("Error fetching category {slug}, page {page}: {e}");
                    break;
                }
            };

            if data.topic_list.topics.is_empty() {
                break;
            }

            for topic in data.topic_list.topics {
                let Ok(created_at) = DateTime::parse_from_rfc3339(&topic.created_at) else {
                    continue;
                };
                let created_at = created_at.with_timezone(&Utc);
                if start <= created_at && created_at <= end {
                    topics.push(TopicRef {
                        url: format!("{}/t/{}/{}", self.base_url, topic.slug, topic.id),
                        id: topic.id,
                        title: topic.title,
                        slug: topic.slug,
                        category_id: topic.category_id,
                        created_at,
                        posts_count: topic.posts_count,
                    });
                }
            }

            page += 1;
            tokio::time::sleep(REQUEST_DELAY).await;
        }

        topics
    }

    /// Fetch a topic's full content — main post plus meaningful replies.
    pub async fn topic_post(&self, topic: &TopicRef) -> Result<CorpusPost> {
        let url = format!("{}/t/{}/{}.json", self.base_url, topic.slug, topic.id);
        let data: TopicResponse = self.get_json(&url).await?;

        let posts = data.post_stream.posts;
        let Some(main) = posts.first() else {
            return Err(VirtaError::Crawl(format!("topic {} has no posts", topic.id)));
        };

        let content = post_text(&main.cooked, &main.raw);

        let mut replies = Vec::new();
        for post in posts.iter().skip(1) {
            let text = post_text(&post.cooked, &post.raw);
            if text.chars().count() > MIN_REPLY_CHARS {
                replies.push(PostReply {
                    id: post.id,
                    username: display_username(&post.username),
                    created_at: post.created_at.clone(),
                    content: text.chars().take(REPLY_PREVIEW_CHARS).collect(),
                });
                if replies.len() == MAX_REPLIES {
                    break;
                }
            }
        }

        Ok(CorpusPost {
            id: topic.id,
            title: if data.title.is_empty() { topic.title.clone() } else { data.title },
            content,
            url: topic.url.clone(),
            created_at: main.created_at.clone(),
            username: display_username(&main.username),
            tags: data.tags,
            replies,
        })
    }

    /// Scrape posts created within the date range, capped at `max_posts`.
    /// Per-topic failures are logged and skipped; the run never aborts.
    pub async fn scrape(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        max_posts: usize,
    ) -> Vec<CorpusPost> {
        tracing::info!("Starting scrape from {start} to {end}");

        let categories = self.find_course_categories().await;
        tracing::info!("Scraping categories: {categories:?}");

        let mut all_posts = Vec::new();
        'categories: for category in &categories {
            let topics = self.category_topics(category, start, end).await;
            tracing::info!("Found {} topics in {category}", topics.len());

            for topic in &topics {
                if all_posts.len() >= max_posts {
                    break 'categories;
                }
                match self.topic_post(topic).await {
                    Ok(post) => {
                        tracing::info!(
                            "Scraped: {}",
                            post.title.chars().take(50).collect::<String>()
                        );
                        all_posts.push(post);
                    }
                    Err(e) => tracing::warn!("⚠️ Skipping topic {}: {e}", topic.id),
                }
                tokio::time::sleep(REQUEST_DELAY).await;
            }
        }

        tracing::info!("Scraped {} posts total", all_posts.len());
        all_posts
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| VirtaError::Crawl(format!("GET {url}: {e}")))?;
        response
            .json::<T>()
            .await
            .map_err(|e| VirtaError::Crawl(format!("Decode {url}: {e}")))
    }
}

fn post_text(cooked: &str, raw: &str) -> String {
    let text = if cooked.is_empty() {
        raw.to_string()
    } else {
        html_to_text(cooked)
    };
    text.trim().to_string()
}

fn display_username(username: &str) -> String {
    if username.is_empty() {
        "Unknown".to_string()
    } else {
        username.to_string()
    }
}

/// Write the scraped corpus to disk as a pretty JSON array.
pub fn save_posts(posts: &[CorpusPost], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(posts)?;
    std::fs::write(path, json)?;
    tracing::info!("💾 Saved {} posts to {}", posts.len(), path.display());
    Ok(())
}
