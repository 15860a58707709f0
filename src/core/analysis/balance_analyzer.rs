use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::DownsampleConfig;
use crate::core::dataset::{enumerate_files, DatasetLayout, DatasetSplit};
use crate::core::error::{DownsampleError, Result};

/// Categories for classifying samples by their annotation file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleCategory {
    /// Annotation file has content (at least one labeled object)
    Positive,
    /// Annotation file is empty (background only)
    Negative,
}

impl SampleCategory {
    pub fn as_str(&self) -> &str {
        match self {
            SampleCategory::Positive => "Positive",
            SampleCategory::Negative => "Negative",
        }
    }
}

/// An image and its annotation file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub image_path: PathBuf,
    pub label_path: PathBuf,
}

/// Samples of one split, partitioned by category in enumeration order
#[derive(Debug, Clone, Default)]
pub struct SplitInventory {
    pub positives: Vec<Sample>,
    pub negatives: Vec<Sample>,
}

impl SplitInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.positives.len() + self.negatives.len()
    }

    pub fn push(&mut self, sample: Sample, category: SampleCategory) {
        match category {
            SampleCategory::Positive => self.positives.push(sample),
            SampleCategory::Negative => self.negatives.push(sample),
        }
    }
}

/// Categorize a sample by the byte length of its annotation file.
///
/// Only the size is inspected, never the content. A missing annotation is a
/// `MissingAnnotation` error naming both the image and the expected label path.
pub fn categorize_sample(image_path: &Path, label_path: &Path) -> Result<SampleCategory> {
    match fs::metadata(label_path) {
        Ok(metadata) if metadata.len() == 0 => Ok(SampleCategory::Negative),
        Ok(_) => Ok(SampleCategory::Positive),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(DownsampleError::MissingAnnotation {
            image: image_path.to_path_buf(),
            expected: label_path.to_path_buf(),
        }),
        Err(e) => Err(DownsampleError::io(label_path, e)),
    }
}

/// Annotation path for an image, or an `InvalidInput` error naming the image
/// when it has no stem to build one from.
fn label_path_for_image(
    layout: &DatasetLayout,
    split: DatasetSplit,
    image_path: &Path,
    config: &DownsampleConfig,
) -> Result<PathBuf> {
    layout
        .label_path_for(split, image_path, &config.label_extension)
        .ok_or_else(|| DownsampleError::unnamed(image_path))
}

/// Enumerate and categorize every image in a split.
///
/// The caller is expected to have checked `DatasetLayout::has_split`.
pub fn scan_split(
    layout: &DatasetLayout,
    split: DatasetSplit,
    config: &DownsampleConfig,
) -> Result<SplitInventory> {
    let images_dir = layout.images_dir(split);
    info!("Scanning split {} in {:?}", split, images_dir);

    let image_paths = enumerate_files(&images_dir, &config.image_extensions)?;
    let mut inventory = SplitInventory::new();

    for image_path in image_paths {
        let label_path = label_path_for_image(layout, split, &image_path, config)?;

        let category = categorize_sample(&image_path, &label_path)?;
        debug!("{:?} -> {}", image_path, category.as_str());

        inventory.push(
            Sample {
                image_path,
                label_path,
            },
            category,
        );
    }

    info!(
        "Scan complete: {} images ({} positive, {} negative)",
        inventory.total(),
        inventory.positives.len(),
        inventory.negatives.len()
    );

    Ok(inventory)
}
