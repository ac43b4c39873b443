//! Virta configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, VirtaError};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VirtaConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

impl VirtaConfig {
    /// Load config from the default path (~/.virta/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VirtaError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| VirtaError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| VirtaError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".virta")
            .join("config.toml")
    }

    /// Get the Virta home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".virta")
    }
}

/// Retrieval engine configuration — thresholds, top-k, and link cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum fused score for a forum post to be retrieved.
    #[serde(default = "default_post_threshold")]
    pub post_threshold: f64,
    /// Minimum fused score for a course-content item to be retrieved.
    #[serde(default = "default_content_threshold")]
    pub content_threshold: f64,
    /// Maximum forum posts returned per query.
    #[serde(default = "default_post_top_k")]
    pub post_top_k: usize,
    /// Maximum course-content items returned per query.
    #[serde(default = "default_content_top_k")]
    pub content_top_k: usize,
    /// Maximum supporting links in a single answer.
    #[serde(default = "default_max_links")]
    pub max_links: usize,
}

fn default_post_threshold() -> f64 { 60.0 }
fn default_content_threshold() -> f64 { 50.0 }
fn default_post_top_k() -> usize { 5 }
fn default_content_top_k() -> usize { 3 }
fn default_max_links() -> usize { 5 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            post_threshold: default_post_threshold(),
            content_threshold: default_content_threshold(),
            post_top_k: default_post_top_k(),
            content_top_k: default_content_top_k(),
            max_links: default_max_links(),
        }
    }
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request processing deadline in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8000 }
fn default_request_timeout_secs() -> u64 { 30 }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Corpus file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_posts_path")]
    pub posts_path: String,
    #[serde(default = "default_content_path")]
    pub content_path: String,
}

fn default_posts_path() -> String { "data/forum_posts.json".into() }
fn default_content_path() -> String { "data/course_content.json".into() }

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            posts_path: default_posts_path(),
            content_path: default_content_path(),
        }
    }
}

/// Forum crawler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Base URL of the Discourse forum to crawl.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum number of posts to collect in one run.
    #[serde(default = "default_max_posts")]
    pub max_posts: usize,
}

fn default_base_url() -> String { "https://discourse.onlinedegree.iitm.ac.in".into() }
fn default_max_posts() -> usize { 100 }

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_posts: default_max_posts(),
        }
    }
}
