//! Handsign Common Utilities
//!
//! Shared infrastructure for all Handsign crates:
//! - Error taxonomy and result alias
//! - Frame clock for pacing and latency measurement
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
