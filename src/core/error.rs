use std::path::PathBuf;
use thiserror::Error;

use crate::core::dataset::DatasetSplit;

/// Result type for downsampling operations
pub type Result<T> = std::result::Result<T, DownsampleError>;

/// Error types for downsampling a dataset
#[derive(Debug, Error)]
pub enum DownsampleError {
    #[error("source dataset directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("cannot derive an output directory name from {path}")]
    InvalidSourceName { path: PathBuf },

    /// Image was enumerated but its `<stem>.txt` annotation does not exist
    #[error("missing annotation for image {image}: expected {expected}")]
    MissingAnnotation { image: PathBuf, expected: PathBuf },

    #[error("[{split}] cannot keep {requested} negatives, only {available} available")]
    SampleTooLarge {
        split: DatasetSplit,
        requested: usize,
        available: usize,
    },

    #[error("keep fraction {value} does not produce a valid sample size")]
    InvalidKeepFraction { value: f64 },

    #[error("destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DownsampleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownsampleError::Io {
            path: path.into(),
            source,
        }
    }

    /// `path` has no file name or stem to work with
    pub(crate) fn unnamed(path: impl Into<PathBuf>) -> Self {
        Self::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_annotation_message_names_both_paths() {
        let err = DownsampleError::MissingAnnotation {
            image: PathBuf::from("images/train/img001.jpg"),
            expected: PathBuf::from("labels/train/img001.txt"),
        };
        let msg = err.to_string();
        assert!(msg.contains("img001.jpg"));
        assert!(msg.contains("labels/train/img001.txt"));
    }

    #[test]
    fn test_unnamed_path_is_invalid_input() {
        match DownsampleError::unnamed("images/train/..") {
            DownsampleError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("images/train/.."));
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidInput);
            }
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_sample_too_large_message() {
        let err = DownsampleError::SampleTooLarge {
            split: DatasetSplit::Val,
            requested: 6,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "[val] cannot keep 6 negatives, only 4 available"
        );
    }
}
