//! # Virta Crawler
//!
//! Builds the forum-post corpus consumed by the QA engine: walks a
//! Discourse instance's JSON API (categories → topics → posts), filters
//! topics by creation date, extracts readable text from cooked HTML, and
//! writes an ordered JSON array with the field names the engine's scorer
//! reads (`title`, `content`, `url`).

pub mod client;
pub mod extract;
pub mod types;

pub use client::{DiscourseClient, save_posts};
pub use types::TopicRef;
