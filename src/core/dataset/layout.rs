//! Path conventions for a YOLO dataset laid out as `images/<split>` and
//! `labels/<split>` under a common root.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::DatasetSplit;
use crate::core::error::{DownsampleError, Result};

/// Root of a dataset and the per-split directories beneath it
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn images_dir(&self, split: DatasetSplit) -> PathBuf {
        self.root.join("images").join(split.as_str())
    }

    pub fn labels_dir(&self, split: DatasetSplit) -> PathBuf {
        self.root.join("labels").join(split.as_str())
    }

    /// A split only counts when both its image and label directories exist
    pub fn has_split(&self, split: DatasetSplit) -> bool {
        self.images_dir(split).is_dir() && self.labels_dir(split).is_dir()
    }

    /// Annotation path for an image: same stem, `label_extension`, in the split's label dir
    pub fn label_path_for(
        &self,
        split: DatasetSplit,
        image_path: &Path,
        label_extension: &str,
    ) -> Option<PathBuf> {
        let stem = image_path.file_stem()?;
        let mut name = OsString::from(stem);
        name.push(".");
        name.push(label_extension);
        Some(self.labels_dir(split).join(name))
    }
}

/// Output directory for `src`: a sibling named `<src-name><suffix>`.
pub fn destination_dir_for(src: &Path, suffix: &str) -> Result<PathBuf> {
    // "." and "dir/.." have no file name of their own
    let resolved = match src.file_name() {
        Some(_) => src.to_path_buf(),
        None => fs::canonicalize(src).map_err(|e| DownsampleError::io(src, e))?,
    };

    let name = resolved
        .file_name()
        .ok_or_else(|| DownsampleError::InvalidSourceName {
            path: src.to_path_buf(),
        })?;

    let mut dst_name = OsString::from(name);
    dst_name.push(suffix);

    let parent = resolved.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(dst_name))
}

/// Insert `suffix` before the extension: `dataset.yaml` -> `dataset_downsampled.yaml`
pub fn descriptor_name(file_name: &Path, suffix: &str) -> Option<OsString> {
    let stem = file_name.file_stem()?;
    let mut name = OsString::from(stem);
    name.push(suffix);
    if let Some(ext) = file_name.extension() {
        name.push(".");
        name.push(ext);
    }
    Some(name)
}

/// List files in `dir` whose extension matches one of `extensions` exactly.
///
/// Files are grouped by extension in the order given, and sorted by name
/// within each group so the listing does not depend on directory order.
pub fn enumerate_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DownsampleError::io(dir, e))? {
        let entry = entry.map_err(|e| DownsampleError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            entries.push(path);
        }
    }

    let mut files = Vec::with_capacity(entries.len());
    for ext in extensions {
        let mut group: Vec<PathBuf> = entries
            .iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(ext.as_str()))
            .cloned()
            .collect();
        group.sort();
        files.extend(group);
    }

    debug!("Found {} matching files in {:?}", files.len(), dir);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_split_paths() {
        let layout = DatasetLayout::new("/data/set");
        assert_eq!(
            layout.images_dir(DatasetSplit::Train),
            PathBuf::from("/data/set/images/train")
        );
        assert_eq!(
            layout.labels_dir(DatasetSplit::Test),
            PathBuf::from("/data/set/labels/test")
        );
    }

    #[test]
    fn test_label_path_for_image() {
        let layout = DatasetLayout::new("/data/set");
        let image = PathBuf::from("/data/set/images/val/frame.01.png");
        assert_eq!(
            layout.label_path_for(DatasetSplit::Val, &image, "txt"),
            Some(PathBuf::from("/data/set/labels/val/frame.01.txt"))
        );
    }

    #[test]
    fn test_destination_is_sibling() {
        let dst = destination_dir_for(Path::new("/data/coco"), "_downsampled").unwrap();
        assert_eq!(dst, PathBuf::from("/data/coco_downsampled"));

        let dst = destination_dir_for(Path::new("relative/set/"), "_downsampled").unwrap();
        assert_eq!(dst, PathBuf::from("relative/set_downsampled"));
    }

    #[test]
    fn test_descriptor_name() {
        assert_eq!(
            descriptor_name(Path::new("dataset.yaml"), "_downsampled"),
            Some(OsString::from("dataset_downsampled.yaml"))
        );
        assert_eq!(
            descriptor_name(Path::new("coco.v2.yaml"), "_downsampled"),
            Some(OsString::from("coco.v2_downsampled.yaml"))
        );
    }

    #[test]
    fn test_enumerate_groups_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "c.jpeg", "z.jpg", "y.jpg", "upper.JPG", "notes.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let exts: Vec<String> = ["jpg", "jpeg", "png"].iter().map(|s| s.to_string()).collect();

        let names: Vec<String> = enumerate_files(dir.path(), &exts)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["y.jpg", "z.jpg", "c.jpeg", "a.png", "b.png"]);
    }
}
