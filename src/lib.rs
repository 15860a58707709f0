//! Negative-sample downsampler for YOLO datasets
//!
//! Reads a dataset laid out as `images/<split>` and `labels/<split>`, keeps every
//! sample with a non-empty label file, keeps a random fraction of the samples
//! with empty label files, and writes the result to a sibling
//! `<name>_downsampled` directory.

pub mod config;
pub mod core;
pub mod infrastructure;

// Re-export commonly used types and functions
pub use config::{Args, DownsampleConfig, OverwritePolicy};
pub use crate::core::{
    downsample_negatives, downsample_negatives_with_rng, DatasetSplit, DownsampleError,
    DownsampleReport, SplitStats,
};
