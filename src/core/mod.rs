pub mod analysis;
pub mod dataset;
pub mod error;
pub mod operations;

pub use analysis::*;
pub use dataset::*;
pub use error::{DownsampleError, Result};
pub use operations::*;
