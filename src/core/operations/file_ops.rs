use std::fs::{self, File, FileTimes, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{DownsampleConfig, OverwritePolicy};
use crate::core::dataset::{descriptor_name, enumerate_files};
use crate::core::error::{DownsampleError, Result};

/// Create `path` and any missing parents. Existing directories are fine.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| DownsampleError::io(path, e))
}

/// Copy a file, then carry over its access and modification times.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest` - Destination file path
/// * `policy` - Whether an existing `dest` may be replaced
///
/// # Returns
/// * `Ok(())` if the copy and timestamp update succeeded
/// * `Err(DownsampleError::DestinationExists)` if `dest` exists under `OverwritePolicy::Refuse`
pub fn copy_preserving_metadata(src: &Path, dest: &Path, policy: OverwritePolicy) -> Result<()> {
    if dest.exists() {
        match policy {
            OverwritePolicy::Refuse => {
                return Err(DownsampleError::DestinationExists {
                    path: dest.to_path_buf(),
                })
            }
            OverwritePolicy::Overwrite => debug!("Overwriting existing file {:?}", dest),
        }
    }

    fs::copy(src, dest).map_err(|e| DownsampleError::io(src, e))?;

    let metadata = fs::metadata(src).map_err(|e| DownsampleError::io(src, e))?;
    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }

    // fs::copy also copies permissions, so a read-only source yields a read-only dest
    let file = OpenOptions::new()
        .write(true)
        .open(dest)
        .or_else(|_| File::open(dest))
        .map_err(|e| DownsampleError::io(dest, e))?;
    file.set_times(times).map_err(|e| DownsampleError::io(dest, e))?;

    debug!("Copied {:?} -> {:?}", src, dest);
    Ok(())
}

/// Copy `src` into `dest_dir` under its original file name.
pub fn copy_into_dir(src: &Path, dest_dir: &Path, policy: OverwritePolicy) -> Result<PathBuf> {
    let file_name = src.file_name().ok_or_else(|| DownsampleError::unnamed(src))?;
    let dest = dest_dir.join(file_name);
    copy_preserving_metadata(src, &dest, policy)?;
    Ok(dest)
}

/// Copy every top-level descriptor file from `src_root` into `dest_root`,
/// inserting the output suffix before the extension.
///
/// # Returns
/// * The destination paths written, in source name order
pub fn copy_descriptor_files(
    src_root: &Path,
    dest_root: &Path,
    config: &DownsampleConfig,
) -> Result<Vec<PathBuf>> {
    let descriptors = enumerate_files(src_root, &config.descriptor_extensions)?;
    if descriptors.is_empty() {
        debug!("No descriptor files found in {:?}", src_root);
        return Ok(Vec::new());
    }

    ensure_dir(dest_root)?;

    let mut written = Vec::with_capacity(descriptors.len());
    for descriptor in &descriptors {
        let file_name = descriptor
            .file_name()
            .map(Path::new)
            .ok_or_else(|| DownsampleError::unnamed(descriptor))?;
        let new_name = descriptor_name(file_name, &config.output_suffix)
            .ok_or_else(|| DownsampleError::unnamed(descriptor))?;
        let dest = dest_root.join(new_name);
        copy_preserving_metadata(descriptor, &dest, config.overwrite)?;
        info!("Copied descriptor {:?} -> {:?}", descriptor, dest);
        written.push(dest);
    }

    Ok(written)
}
