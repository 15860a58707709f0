use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use yolo_downsample::infrastructure::logging::setup_logging;
use yolo_downsample::{downsample_negatives, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.log_dir.as_deref()).context("failed to set up logging")?;
    debug!("Parsed arguments: {:?}", args);

    let config = args.to_config();
    let report = downsample_negatives(&args.src_dataset_dir, &config).with_context(|| {
        format!(
            "failed to downsample dataset {}",
            args.src_dataset_dir.display()
        )
    })?;

    println!(
        "Saved downsampled YOLO dataset at: {}",
        report.destination_dir.display()
    );
    Ok(())
}
