//! Virta error type.

use thiserror::Error;

/// Result alias used across all Virta crates.
pub type Result<T> = std::result::Result<T, VirtaError>;

/// Errors that can occur inside Virta.
///
/// The engine's query surface deliberately never returns these — bad
/// corpus data degrades to weaker results instead (see `virta-engine`).
/// They surface at the boundaries: config parsing, corpus files, the
/// crawler, and the gateway.
#[derive(Debug, Error)]
pub enum VirtaError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Crawl error: {0}")]
    Crawl(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
