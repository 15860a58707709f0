mod layout;
mod split;

pub use layout::{descriptor_name, destination_dir_for, enumerate_files, DatasetLayout};
pub use split::DatasetSplit;
