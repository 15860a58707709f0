use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_cli(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yolo-downsample"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn yolo-downsample")
}

/// `<tmp>/dataset` with one positive and ten negatives in `train`
fn train_dataset() -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("dataset");
    let images = root.join("images/train");
    let labels = root.join("labels/train");
    fs::create_dir_all(&images).unwrap();
    fs::create_dir_all(&labels).unwrap();

    fs::write(images.join("pos.jpg"), "img").unwrap();
    fs::write(labels.join("pos.txt"), "0 0.5 0.5 0.2 0.2\n").unwrap();
    for i in 0..10 {
        fs::write(images.join(format!("neg{}.jpg", i)), "img").unwrap();
        fs::write(labels.join(format!("neg{}.txt", i)), "").unwrap();
    }
    (tmp, root)
}

#[test]
fn test_success_prints_progress_and_destination_only() {
    let (tmp, root) = train_dataset();

    let output = run_cli(&[&root]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr: {}", stderr);
    let expected = format!(
        "[train] positives: 1, negatives: 10 → kept 2, final total: 3\n\
         Saved downsampled YOLO dataset at: {}\n",
        tmp.path().join("dataset_downsampled").display()
    );
    assert_eq!(stdout, expected);

    // Log events belong on stderr
    assert!(!stdout.contains("[INFO ]"));
    assert!(stderr.contains("[INFO ]"));
}

#[test]
fn test_missing_source_fails_on_stderr() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope");

    let output = run_cli(&[&missing]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("failed to downsample dataset"));
    assert!(stderr.contains("source dataset directory not found"));
}

#[test]
fn test_image_without_label_fails_on_stderr() {
    let (_tmp, root) = train_dataset();
    fs::write(root.join("images/train/orphan.png"), "img").unwrap();

    let output = run_cli(&[&root]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("missing annotation for image"));
    assert!(stderr.contains("orphan.png"));
    assert!(!stdout.contains("Saved downsampled YOLO dataset"));
}
