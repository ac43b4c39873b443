//! Corpus loading — JSON files on disk, read once at engine start.
//!
//! A missing, unreadable, or malformed file degrades to an empty corpus
//! with a warning. Retrieval over an empty corpus returns no matches;
//! load problems are never fatal.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use virta_core::types::{CorpusPost, CourseContentItem};

/// An immutable view of both corpora. Shared read-only across requests;
/// a reload publishes a fresh snapshot instead of mutating in place.
#[derive(Debug, Default)]
pub struct CorpusSnapshot {
    pub posts: Vec<CorpusPost>,
    pub content: Vec<CourseContentItem>,
}

impl CorpusSnapshot {
    /// Load both corpora from their configured files.
    pub fn load(posts_path: &Path, content_path: &Path) -> Arc<Self> {
        let posts: Vec<CorpusPost> = load_records(posts_path, "forum posts");
        let content: Vec<CourseContentItem> = load_records(content_path, "course content items");
        tracing::info!(
            "📚 Corpus loaded: {} forum posts, {} course content items",
            posts.len(),
            content.len()
        );
        Arc::new(Self { posts, content })
    }
}

fn load_records<T: DeserializeOwned>(path: &Path, what: &str) -> Vec<T> {
    if !path.exists() {
        tracing::warn!("⚠️ {} file not found: {}", what, path.display());
        return Vec::new();
    }
    match std::fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("⚠️ Failed to parse {}: {e}", path.display());
            Vec::new()
        }),
        Err(e) => {
            tracing::warn!("⚠️ Failed to read {}: {e}", path.display());
            Vec::new()
        }
    }
}
