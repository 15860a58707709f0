mod file_ops;

pub use file_ops::{copy_descriptor_files, copy_into_dir, copy_preserving_metadata, ensure_dir};
