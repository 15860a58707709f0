//! Logging for the downsampler
//!
//! This module provides:
//! - Bracketed event formatting with the active span chain
//! - Logging to stderr, plus an optional timestamped log file

mod formatter;
mod setup;

pub use setup::setup_logging;
