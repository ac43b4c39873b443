//! # Virta Gateway
//!
//! HTTP layer in front of the QA engine: question endpoint, stats, health
//! check, CORS, request tracing, and the OCR augmentation seam. The engine
//! is injected through `AppState`, so tests run against synthetic corpora
//! without touching the network or the filesystem.

pub mod ocr;
pub mod routes;
pub mod server;

pub use ocr::ImageTextExtractor;
pub use server::{AppState, build_router, start};
