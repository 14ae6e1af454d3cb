//! commit-reel Common Utilities
//!
//! Shared infrastructure for all commit-reel crates:
//! - Error types and result aliases
//! - Movie configuration loading
//! - Synchronous external tool invocation
//! - Tracing/logging initialization

pub mod config;
pub mod error;
pub mod logging;
pub mod process;

pub use config::*;
pub use error::*;
pub use process::*;
