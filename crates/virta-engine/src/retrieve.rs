//! Threshold filtering and top-k selection over the corpora.
//!
//! A sequential scan: the question is normalized once, keywords are
//! extracted once, every item is scored, survivors are sorted (stable, so
//! ties keep corpus order) and truncated. An empty result is a normal
//! outcome, not an error.

use std::cmp::Ordering;

use virta_core::types::{CorpusPost, CourseContentItem};

use crate::keywords::extract_keywords;
use crate::normalize::normalize;
use crate::score::{ScoredContent, ScoredPost, score_content, score_post};

/// Find forum posts similar to the question.
pub fn find_similar_posts(
    posts: &[CorpusPost],
    question: &str,
    threshold: f64,
    top_k: usize,
) -> Vec<ScoredPost> {
    if posts.is_empty() {
        return Vec::new();
    }
    let question_norm = normalize(question);
    let keywords = extract_keywords(question);

    let mut hits: Vec<ScoredPost> = posts
        .iter()
        .map(|p| score_post(&question_norm, &keywords, p))
        .filter(|s| s.score >= threshold)
        .collect();
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.truncate(top_k);
    hits
}

/// Find course-content items relevant to the question.
pub fn find_relevant_content(
    content: &[CourseContentItem],
    question: &str,
    threshold: f64,
    top_k: usize,
) -> Vec<ScoredContent> {
    if content.is_empty() {
        return Vec::new();
    }
    let question_norm = normalize(question);
    let keywords = extract_keywords(question);

    let mut hits: Vec<ScoredContent> = content
        .iter()
        .map(|c| score_content(&question_norm, &keywords, c))
        .filter(|s| s.score >= threshold)
        .collect();
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.truncate(top_k);
    hits
}
