mod app_config;
mod cli;

pub use app_config::{DownsampleConfig, OverwritePolicy};
pub use cli::Args;
