//! # Virta Core
//!
//! Shared foundation for the Virta virtual teaching assistant:
//! configuration, the error type, and the corpus/answer domain types
//! used by the engine, gateway, and crawler crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::VirtaConfig;
pub use error::{Result, VirtaError};
