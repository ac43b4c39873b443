//! # Virta QA Engine
//!
//! Retrieval-and-ranking over two static corpora — forum posts and course
//! content. No embeddings, no learning loop, no per-query state.
//!
//! ## Design
//! - **Fuzzy matching** — windowed partial-ratio (0–100) over normalized text
//! - **Keyword bonus** — additive reward for exact domain-term overlap
//! - **Threshold + top-k** — per-corpus cutoffs, stable descending sort
//! - **Templated answers** — deterministic prose + supporting links
//! - Corpora load once into a snapshot; reload swaps the snapshot atomically
//!
//! ## How it works
//! ```text
//! Question: "How do I load a CSV with pandas?"
//!   ↓ normalize + extract keywords
//! Score every post and content item (fuzzy + keyword bonus)
//!   ↓ threshold filter, sort, top-k
//! Ranked matches
//!   ↓
//! Templated answer + up to 5 supporting links
//! ```

pub mod answer;
pub mod corpus;
pub mod keywords;
pub mod normalize;
pub mod retrieve;
pub mod score;

use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use virta_core::config::{CorpusConfig, EngineConfig};
use virta_core::error::{Result, VirtaError};
use virta_core::types::{AnswerPayload, CorpusPost, CourseContentItem, KnowledgeStats};

use crate::answer::{collect_links, generate_answer};
use crate::corpus::CorpusSnapshot;
use crate::retrieve::{find_relevant_content, find_similar_posts};

const BLANK_QUESTION_ANSWER: &str = "Please provide a valid question.";

/// The question-answering engine.
///
/// Holds read-only corpora behind an atomically swappable snapshot, so any
/// number of concurrent requests can query while a reload publishes fresh
/// data. The query surface never returns errors — degraded input produces
/// weaker results instead.
pub struct QaEngine {
    config: EngineConfig,
    corpus_files: Option<CorpusConfig>,
    snapshot: RwLock<Arc<CorpusSnapshot>>,
}

impl QaEngine {
    /// Build an engine from corpora already in memory. Used by tests and
    /// callers that manage corpus storage themselves; `reload` is not
    /// available on engines built this way.
    pub fn new(
        posts: Vec<CorpusPost>,
        content: Vec<CourseContentItem>,
        config: EngineConfig,
    ) -> Self {
        Self {
            config,
            corpus_files: None,
            snapshot: RwLock::new(Arc::new(CorpusSnapshot { posts, content })),
        }
    }

    /// Build an engine backed by corpus files. Missing or malformed files
    /// degrade to empty corpora with a warning.
    pub fn from_files(corpus: &CorpusConfig, config: EngineConfig) -> Self {
        let snapshot = CorpusSnapshot::load(
            Path::new(&corpus.posts_path),
            Path::new(&corpus.content_path),
        );
        Self {
            config,
            corpus_files: Some(corpus.clone()),
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Answer a question. Never errors: a blank question returns a fixed
    /// prompt, and a question nothing matches returns the fallback answer.
    pub fn get_answer(&self, question: &str) -> AnswerPayload {
        if question.trim().is_empty() {
            return AnswerPayload {
                answer: BLANK_QUESTION_ANSWER.to_string(),
                links: Vec::new(),
            };
        }

        let snapshot = self.current_snapshot();
        let posts = find_similar_posts(
            &snapshot.posts,
            question,
            self.config.post_threshold,
            self.config.post_top_k,
        );
        let content = find_relevant_content(
            &snapshot.content,
            question,
            self.config.content_threshold,
            self.config.content_top_k,
        );

        let answer = generate_answer(&posts, &content);
        let links = collect_links(&content, &posts, self.config.max_links);
        AnswerPayload { answer, links }
    }

    /// Knowledge-base statistics.
    pub fn get_stats(&self) -> KnowledgeStats {
        let snapshot = self.current_snapshot();
        KnowledgeStats {
            post_count: snapshot.posts.len(),
            content_count: snapshot.content.len(),
            total_count: snapshot.posts.len() + snapshot.content.len(),
            last_updated: Utc::now(),
        }
    }

    /// Re-read the corpus files and publish a fresh snapshot. Readers in
    /// flight keep the snapshot they already hold.
    pub fn reload(&self) -> Result<KnowledgeStats> {
        let corpus = self.corpus_files.as_ref().ok_or_else(|| {
            VirtaError::Corpus("engine was built without corpus files; nothing to reload".into())
        })?;
        let fresh = CorpusSnapshot::load(
            Path::new(&corpus.posts_path),
            Path::new(&corpus.content_path),
        );
        let mut guard = self.snapshot.write().unwrap_or_else(|p| p.into_inner());
        *guard = fresh;
        drop(guard);
        Ok(self.get_stats())
    }

    fn current_snapshot(&self) -> Arc<CorpusSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}
