use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;

/// Default filter when `RUST_LOG` is unset: our crate at info, dependencies at warn
const DEFAULT_FILTER: &str = "warn,yolo_downsample=info";

/// Install the global subscriber.
///
/// Events always go to stderr, leaving stdout for progress lines and the final
/// destination path. With `log_dir`, a timestamped log file is written there too.
///
/// # Returns
/// * The log file path, if one was created
pub fn setup_logging(log_dir: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let (file_layer, log_path) = match log_dir {
        Some(dir) => {
            let (file, path) = create_log_file(dir)?;
            let layer = fmt::layer()
                .event_format(BracketedFormatter)
                .with_writer(Mutex::new(file))
                .with_ansi(false);
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(file_layer)
        .with(stderr_layer)
        .init();

    if let Some(path) = &log_path {
        info!("Log file created at: {:?}", path);
    }

    Ok(log_path)
}

fn create_log_file(dir: &Path) -> io::Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("downsample_{}.log", timestamp));

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;

    Ok((file, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_created_in_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs").join("nested");

        let (_file, path) = create_log_file(&log_dir).unwrap();

        assert!(path.exists());
        assert_eq!(path.parent().unwrap(), log_dir);
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("downsample_"));
        assert!(name.ends_with(".log"));
    }
}
