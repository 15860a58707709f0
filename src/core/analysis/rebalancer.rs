//! Dataset rebalancing module for thinning out negative samples.
//!
//! Each split is scanned, its negatives are sampled down to a fraction of
//! their count, and the survivors are copied together with every positive into
//! a sibling output dataset. One random generator is shared across splits and
//! advanced in split order, so a fixed seed reproduces the same output.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

use crate::config::{DownsampleConfig, OverwritePolicy};
use crate::core::dataset::{destination_dir_for, DatasetLayout, DatasetSplit};
use crate::core::error::{DownsampleError, Result};
use crate::core::operations::{copy_descriptor_files, copy_into_dir, ensure_dir};

use super::{scan_split, Sample, SplitInventory};

/// Per-split counts, printed as the progress line for that split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitStats {
    pub split: DatasetSplit,
    pub positives: usize,
    pub negatives: usize,
    pub kept_negatives: usize,
    pub final_total: usize,
}

impl fmt::Display for SplitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] positives: {}, negatives: {} → kept {}, final total: {}",
            self.split, self.positives, self.negatives, self.kept_negatives, self.final_total
        )
    }
}

/// The retained samples of one split
#[derive(Debug, Clone)]
pub struct SplitPlan {
    pub split: DatasetSplit,
    pub positives: Vec<Sample>,
    /// Negatives in the order they were drawn
    pub kept_negatives: Vec<Sample>,
    /// Number of negatives before sampling
    pub negatives_found: usize,
}

impl SplitPlan {
    /// Positives first, then the kept negatives
    pub fn final_samples(&self) -> impl Iterator<Item = &Sample> {
        self.positives.iter().chain(self.kept_negatives.iter())
    }

    pub fn len(&self) -> usize {
        self.positives.len() + self.kept_negatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> SplitStats {
        SplitStats {
            split: self.split,
            positives: self.positives.len(),
            negatives: self.negatives_found,
            kept_negatives: self.kept_negatives.len(),
            final_total: self.len(),
        }
    }
}

/// Summary of a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownsampleReport {
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
    pub keep_fraction: f64,
    pub seed: u64,
    pub splits: Vec<SplitStats>,
    /// Splits without both an image and a label directory
    pub skipped_splits: Vec<DatasetSplit>,
    pub descriptors: Vec<PathBuf>,
}

impl DownsampleReport {
    pub fn get(&self, split: DatasetSplit) -> Option<&SplitStats> {
        self.splits.iter().find(|s| s.split == split)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| DownsampleError::Report {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, json).map_err(|e| DownsampleError::io(path, e))?;
        info!("Report written to {:?}", path);
        Ok(())
    }
}

/// Number of negatives to keep: `floor(negatives * keep_fraction)`.
///
/// Fractions above 1.0 pass through and are rejected later by the sampler.
/// NaN, infinite, or negative sample sizes are rejected here.
pub fn num_to_keep(negatives: usize, keep_fraction: f64) -> Result<usize> {
    let wanted = (negatives as f64 * keep_fraction).trunc();
    if !wanted.is_finite() || wanted < 0.0 {
        return Err(DownsampleError::InvalidKeepFraction {
            value: keep_fraction,
        });
    }
    Ok(wanted as usize)
}

/// Draw `num_keep` distinct negatives uniformly at random, without replacement.
///
/// The result is in draw order. An empty pool always yields an empty sample.
pub fn sample_negatives<R: Rng + ?Sized>(
    rng: &mut R,
    negatives: &[Sample],
    num_keep: usize,
    split: DatasetSplit,
) -> Result<Vec<Sample>> {
    if negatives.is_empty() {
        return Ok(Vec::new());
    }
    if num_keep > negatives.len() {
        return Err(DownsampleError::SampleTooLarge {
            split,
            requested: num_keep,
            available: negatives.len(),
        });
    }

    Ok(index::sample(rng, negatives.len(), num_keep)
        .into_iter()
        .map(|i| negatives[i].clone())
        .collect())
}

/// Decide which samples of a split survive
pub fn plan_split<R: Rng + ?Sized>(
    inventory: SplitInventory,
    split: DatasetSplit,
    keep_fraction: f64,
    rng: &mut R,
) -> Result<SplitPlan> {
    let negatives_found = inventory.negatives.len();
    let num_keep = num_to_keep(negatives_found, keep_fraction)?;
    let kept_negatives = sample_negatives(rng, &inventory.negatives, num_keep, split)?;

    debug!(
        "Keeping {} of {} negatives in {}",
        kept_negatives.len(),
        negatives_found,
        split
    );

    Ok(SplitPlan {
        split,
        positives: inventory.positives,
        kept_negatives,
        negatives_found,
    })
}

/// Copy every retained image and label into the output split directories.
///
/// The directories must already exist. Nothing is rolled back on failure.
pub fn execute_split_plan(
    plan: &SplitPlan,
    dst_layout: &DatasetLayout,
    policy: OverwritePolicy,
) -> Result<()> {
    let dst_images = dst_layout.images_dir(plan.split);
    let dst_labels = dst_layout.labels_dir(plan.split);

    for sample in plan.final_samples() {
        copy_into_dir(&sample.image_path, &dst_images, policy)?;
        copy_into_dir(&sample.label_path, &dst_labels, policy)?;
    }

    info!("Copied {} samples into {:?}", plan.len(), dst_images);
    Ok(())
}

// ============================================================================
// TOP-LEVEL RUN
// ============================================================================

/// Downsample the negatives of the dataset at `src`, seeding a fresh generator
/// from `config.seed`.
///
/// # Returns
/// * The run report; `destination_dir` is the new dataset's path
pub fn downsample_negatives(src: &Path, config: &DownsampleConfig) -> Result<DownsampleReport> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    downsample_negatives_with_rng(src, config, &mut rng)
}

/// Downsample with a caller-supplied generator.
///
/// Splits are processed in `config.splits` order and each draw advances `rng`,
/// so later splits see the state left by earlier ones.
pub fn downsample_negatives_with_rng<R: Rng + ?Sized>(
    src: &Path,
    config: &DownsampleConfig,
    rng: &mut R,
) -> Result<DownsampleReport> {
    if !src.is_dir() {
        return Err(DownsampleError::SourceNotFound {
            path: src.to_path_buf(),
        });
    }

    let dst = destination_dir_for(src, &config.output_suffix)?;
    let _run = info_span!("downsample").entered();
    info!(
        "Downsampling {:?} -> {:?} (keep_fraction={}, seed={})",
        src, dst, config.keep_fraction, config.seed
    );

    let src_layout = DatasetLayout::new(src);
    let dst_layout = DatasetLayout::new(&dst);

    let mut report = DownsampleReport {
        source_dir: src.to_path_buf(),
        destination_dir: dst.clone(),
        keep_fraction: config.keep_fraction,
        seed: config.seed,
        splits: Vec::new(),
        skipped_splits: Vec::new(),
        descriptors: Vec::new(),
    };

    for &split in &config.splits {
        let _split_span = info_span!("split", name = split.as_str()).entered();

        if !src_layout.has_split(split) {
            info!("Skipping split {}: image or label directory missing", split);
            report.skipped_splits.push(split);
            continue;
        }

        ensure_dir(&dst_layout.images_dir(split))?;
        ensure_dir(&dst_layout.labels_dir(split))?;

        let inventory = scan_split(&src_layout, split, config)?;
        let plan = plan_split(inventory, split, config.keep_fraction, rng)?;

        let stats = plan.stats();
        println!("{}", stats);
        info!("{}", stats);
        if plan.is_empty() {
            warn!("Split {} has no retained samples", split);
        }

        execute_split_plan(&plan, &dst_layout, config.overwrite)?;
        report.splits.push(stats);
    }

    report.descriptors = copy_descriptor_files(src, &dst, config)?;

    if let Some(report_path) = &config.report_path {
        report.write_json(report_path)?;
    }

    info!("Saved downsampled dataset at {:?}", dst);
    Ok(report)
}
