use std::path::PathBuf;

use crate::core::dataset::DatasetSplit;

/// What to do when a destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Replace the existing file
    #[default]
    Overwrite,
    /// Fail with `DestinationExists`
    Refuse,
}

/// Downsampling configuration containing all tunable values
///
/// Defaults match a standard YOLO dataset: `jpg`/`jpeg`/`png` images,
/// `txt` labels and `yaml` descriptors next to the split directories.
#[derive(Debug, Clone)]
pub struct DownsampleConfig {
    /// Fraction of negatives to retain in each split
    pub keep_fraction: f64,
    /// Seed for the generator that picks the retained negatives
    pub seed: u64,
    pub splits: Vec<DatasetSplit>,
    /// Image extensions, enumerated as separate groups in this order
    pub image_extensions: Vec<String>,
    pub label_extension: String,
    pub descriptor_extensions: Vec<String>,
    /// Appended to the dataset directory name and inserted into descriptor names
    pub output_suffix: String,
    pub overwrite: OverwritePolicy,
    /// Where to write a JSON run report, if anywhere
    pub report_path: Option<PathBuf>,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self {
            keep_fraction: 0.2,
            seed: 42,
            splits: DatasetSplit::all().to_vec(),
            image_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            label_extension: "txt".to_string(),
            descriptor_extensions: vec!["yaml".to_string()],
            output_suffix: "_downsampled".to_string(),
            overwrite: OverwritePolicy::Overwrite,
            report_path: None,
        }
    }
}

impl DownsampleConfig {
    pub fn with_keep_fraction(mut self, keep_fraction: f64) -> Self {
        self.keep_fraction = keep_fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = DownsampleConfig::default();
        assert_eq!(config.keep_fraction, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.splits, DatasetSplit::all().to_vec());
        assert_eq!(config.image_extensions, vec!["jpg", "jpeg", "png"]);
        assert_eq!(config.output_suffix, "_downsampled");
        assert_eq!(config.overwrite, OverwritePolicy::Overwrite);
        assert!(config.report_path.is_none());
    }
}
