//! Answer synthesis and link aggregation.
//!
//! Deterministic template rendering — no randomness, no external calls.
//! The answer prose shows at most two items per corpus while the link list
//! may surface every retrieved item (up to the cap); the prose stays short
//! on purpose.

use virta_core::types::Link;

use crate::score::{ScoredContent, ScoredPost};

const FALLBACK_ANSWER: &str = "I couldn't find specific information related to your question in the current knowledge base. Please try rephrasing your question or contact the course instructor for assistance.";

const LEAD_IN: &str =
    "Based on the available course materials and forum discussions, here's what I found:";

const CLOSING: &str =
    "For more detailed information, please check the supporting links provided below.";

/// Maximum items rendered as prose bullets per corpus.
const MAX_PROSE_ITEMS: usize = 2;

/// Characters of a content description shown in a bullet.
const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Characters of a post body scanned for its first sentence.
const POST_PREVIEW_CHARS: usize = 300;

/// Render the answer text from the ranked results.
pub fn generate_answer(posts: &[ScoredPost], content: &[ScoredContent]) -> String {
    if posts.is_empty() && content.is_empty() {
        return FALLBACK_ANSWER.to_string();
    }

    let mut parts = vec![LEAD_IN.to_string()];

    if !content.is_empty() {
        parts.push("\n**Course Content:**".to_string());
        for hit in content.iter().take(MAX_PROSE_ITEMS) {
            let title = display_title(&hit.item.title, "Untitled");
            if hit.item.description.is_empty() {
                parts.push(format!("• **{title}**"));
            } else {
                let preview = char_prefix(&hit.item.description, DESCRIPTION_PREVIEW_CHARS);
                parts.push(format!("• **{title}**: {preview}..."));
            }
        }
    }

    if !posts.is_empty() {
        parts.push("\n**Related Forum Discussions:**".to_string());
        for hit in posts.iter().take(MAX_PROSE_ITEMS) {
            let title = display_title(&hit.post.title, "Untitled Post");
            if hit.post.content.is_empty() {
                parts.push(format!("• **{title}**"));
            } else {
                let preview = first_sentence(&hit.post.content, POST_PREVIEW_CHARS);
                parts.push(format!("• **{title}**: {preview}."));
            }
        }
    }

    parts.push(format!("\n{CLOSING}"));
    parts.join("\n")
}

/// Build the supporting-link list: ranked content items first, then ranked
/// posts, skipping items without a URL, capped at `max_links` total.
/// Repeated URLs are preserved — no dedup.
pub fn collect_links(
    content: &[ScoredContent],
    posts: &[ScoredPost],
    max_links: usize,
) -> Vec<Link> {
    let mut links = Vec::new();

    for hit in content {
        if !hit.item.url.is_empty() {
            links.push(Link {
                url: hit.item.url.clone(),
                text: format!("Course Material: {}", display_title(&hit.item.title, "Untitled")),
            });
        }
    }
    for hit in posts {
        if !hit.post.url.is_empty() {
            links.push(Link {
                url: hit.post.url.clone(),
                text: format!(
                    "Forum Discussion: {}",
                    display_title(&hit.post.title, "Untitled Post")
                ),
            });
        }
    }

    links.truncate(max_links);
    links
}

fn display_title<'a>(title: &'a str, fallback: &'a str) -> &'a str {
    if title.is_empty() { fallback } else { title }
}

/// First `max` characters of `text` (char-boundary safe).
fn char_prefix(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Text up to the first '.' within the first `max` characters.
fn first_sentence(text: &str, max: usize) -> String {
    let prefix = char_prefix(text, max);
    prefix.split('.').next().unwrap_or_default().to_string()
}
