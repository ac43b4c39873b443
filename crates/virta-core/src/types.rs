//! Domain types shared by the engine, gateway, and crawler.
//!
//! Corpus records are deserialized from JSON files produced by the crawler
//! (posts) or curated by hand (course content). Every field carries
//! `#[serde(default)]` so a missing or renamed field degrades to an empty
//! value and a weaker score, never a load failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A forum post in the retrieval corpus. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorpusPost {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub replies: Vec<PostReply>,
}

/// A reply under a forum post. Carried for context, not scored directly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostReply {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub content: String,
}

/// A course-content entry in the retrieval corpus. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CourseContentItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

/// A supporting link attached to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub text: String,
}

/// The payload returned for every question. Generated fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    pub links: Vec<Link>,
}

/// Knowledge-base statistics — observational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub post_count: usize,
    pub content_count: usize,
    pub total_count: usize,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_missing_fields_default_empty() {
        let post: CorpusPost = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(post.id, 7);
        assert!(post.title.is_empty());
        assert!(post.content.is_empty());
        assert!(post.replies.is_empty());
    }

    #[test]
    fn test_content_item_tolerates_extra_fields() {
        let item: CourseContentItem =
            serde_json::from_str(r#"{"title": "Week 1", "week": 1, "module": "intro"}"#).unwrap();
        assert_eq!(item.title, "Week 1");
        assert!(item.description.is_empty());
    }
}
