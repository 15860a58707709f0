use clap::Parser;
use std::path::PathBuf;

use super::{DownsampleConfig, OverwritePolicy};

/// Downsample negative (background-only) samples in a YOLO dataset.
///
/// Writes a sibling `<name>_downsampled` dataset holding every positive sample
/// and a random fraction of the negatives.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Path to the source YOLO dataset directory
    pub src_dataset_dir: PathBuf,

    /// Fraction of negatives to keep
    #[arg(long = "keep-fraction", default_value_t = 0.2)]
    pub keep_fraction: f64,

    /// Seed for selecting which negatives are kept
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,

    /// Fail instead of overwriting files that already exist in the output
    #[arg(long = "no-clobber")]
    pub no_clobber: bool,

    /// Write a JSON summary of the run to this path
    #[arg(long = "report")]
    pub report: Option<PathBuf>,

    /// Also write a timestamped log file into this directory
    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    pub fn to_config(&self) -> DownsampleConfig {
        let mut config = DownsampleConfig::default()
            .with_keep_fraction(self.keep_fraction)
            .with_seed(self.seed);
        if self.no_clobber {
            config.overwrite = OverwritePolicy::Refuse;
        }
        config.report_path = self.report.clone();
        config
    }
}
