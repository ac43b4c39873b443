//! # Virta — Virtual Teaching Assistant
//!
//! Answers student questions from a forum-post corpus and a course-content
//! corpus using fuzzy retrieval, served over HTTP.
//!
//! Usage:
//!   virta serve                          # Start the gateway (default port 8000)
//!   virta serve --port 8080 --posts data/forum_posts.json
//!   virta crawl --start-date 2025-01-01 --end-date 2025-04-14
//!   virta crawl --base-url https://discourse.example.edu --max-posts 200

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use virta_core::VirtaConfig;
use virta_crawler::{DiscourseClient, save_posts};
use virta_engine::QaEngine;

#[derive(Parser)]
#[command(name = "virta", version, about = "🎓 Virta — Virtual Teaching Assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Config file path (default ~/.virta/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(long)]
        port: Option<u16>,

        /// Forum posts corpus file
        #[arg(long)]
        posts: Option<String>,

        /// Course content corpus file
        #[arg(long)]
        content: Option<String>,
    },

    /// Crawl the course forum and build the posts corpus
    Crawl {
        /// Discourse base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long, default_value = "2025-01-01")]
        start_date: String,

        /// End date (YYYY-MM-DD)
        #[arg(long, default_value = "2025-04-14")]
        end_date: String,

        /// Maximum number of posts to scrape
        #[arg(long)]
        max_posts: Option<usize>,

        /// Output file path
        #[arg(long, default_value = "data/forum_posts.json")]
        output: String,
    },
}

fn expand_path(p: &str) -> String {
    shellexpand::tilde(p).to_string()
}

fn parse_date(s: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    let date = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date '{s}' (expected YYYY-MM-DD): {e}"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid date '{s}'"))?;
    Ok(midnight.and_utc())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug,hyper=info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Command::Serve { config, host, port, posts, content } => {
            let mut cfg = match config {
                Some(path) => VirtaConfig::load_from(Path::new(&expand_path(&path)))?,
                None => VirtaConfig::load()?,
            };
            if let Some(host) = host {
                cfg.gateway.host = host;
            }
            if let Some(port) = port {
                cfg.gateway.port = port;
            }
            if let Some(posts) = posts {
                cfg.corpus.posts_path = expand_path(&posts);
            }
            if let Some(content) = content {
                cfg.corpus.content_path = expand_path(&content);
            }

            let engine = Arc::new(QaEngine::from_files(&cfg.corpus, cfg.engine.clone()));
            let stats = engine.get_stats();

            println!("🎓 Virta v{}", env!("CARGO_PKG_VERSION"));
            println!("   🌐 API:    http://{}:{}/api/", cfg.gateway.host, cfg.gateway.port);
            println!("   📊 Stats:  http://{}:{}/api/stats", cfg.gateway.host, cfg.gateway.port);
            println!(
                "   📚 Corpus: {} forum posts, {} content items",
                stats.post_count, stats.content_count
            );
            println!();

            virta_gateway::start(&cfg.gateway, engine, None).await?;
        }

        Command::Crawl { base_url, start_date, end_date, max_posts, output } => {
            let cfg = VirtaConfig::load()?;
            let base_url = base_url.unwrap_or(cfg.crawler.base_url);
            let max_posts = max_posts.unwrap_or(cfg.crawler.max_posts);
            let start = parse_date(&start_date)?;
            let end = parse_date(&end_date)?;

            let client = DiscourseClient::new(&base_url)?;
            let posts = client.scrape(start, end, max_posts).await;

            let output = expand_path(&output);
            save_posts(&posts, Path::new(&output))?;

            println!("✅ Crawl completed: {} posts saved to {output}", posts.len());
        }
    }

    Ok(())
}
