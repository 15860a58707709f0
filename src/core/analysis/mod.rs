mod balance_analyzer;
mod rebalancer;

pub use balance_analyzer::{
    categorize_sample, scan_split, Sample, SampleCategory, SplitInventory,
};
pub use rebalancer::{
    downsample_negatives, downsample_negatives_with_rng, execute_split_plan, num_to_keep,
    plan_split, sample_negatives, DownsampleReport, SplitPlan, SplitStats,
};
