//! CLI Integration Tests
//!
//! Tests for the CLI interface using assert_cmd

use assert_cmd::Command;
use edge_crop::exit_codes;
use image::{GrayImage, Luma};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn edge_crop_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_edge-crop"))
}

/// White frame of `margin` pixels around a black block
fn write_framed(path: &Path, size: u32, margin: u32) {
    let img = GrayImage::from_fn(size, size, |x, y| {
        let inside = (margin..size - margin).contains(&x) && (margin..size - margin).contains(&y);
        if inside {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    img.save(path).unwrap();
}

fn write_uniform(path: &Path, size: u32) {
    GrayImage::from_pixel(size, size, Luma([200])).save(path).unwrap();
}

fn fixture(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn test_help_command() {
    edge_crop_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("edge-crop"))
        .stdout(predicate::str::contains("crop"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn test_version_command() {
    edge_crop_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_info_command() {
    edge_crop_cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("edge-crop"))
        .stdout(predicate::str::contains("Default Thresholds"))
        .stdout(predicate::str::contains("System Information"))
        .stdout(predicate::str::contains("edgecrop.toml"));
}

#[test]
fn test_crop_no_input_argument() {
    edge_crop_cmd()
        .arg("crop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_unknown_flag_is_invalid_args() {
    edge_crop_cmd()
        .args(["crop", "scan.png", "--no-such-flag"])
        .assert()
        .code(exit_codes::INVALID_ARGS)
        .stderr(predicate::str::contains("--no-such-flag"));
}

#[test]
fn test_crop_missing_input() {
    edge_crop_cmd()
        .args(["crop", "/nonexistent/scan.png", "-o", "/tmp/out.png"])
        .assert()
        .code(exit_codes::INPUT_NOT_FOUND)
        .stderr(predicate::str::contains("Input path does not exist"));
}

#[test]
fn test_crop_single_image() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(&temp_dir, "framed.png");
    let output = fixture(&temp_dir, "cropped.png");
    write_framed(&input, 10, 2);

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("10x10 -> 6x6"))
        .stdout(predicate::str::contains("Saved"));

    let cropped = image::open(&output).unwrap().to_luma8();
    assert_eq!(cropped.dimensions(), (6, 6));
    assert!(cropped.pixels().all(|p| p.0[0] == 0));
}

#[test]
fn test_crop_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(&temp_dir, "framed.png");
    let output = fixture(&temp_dir, "cropped.png");
    write_framed(&input, 10, 2);

    let assert = edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["cropped_size"], serde_json::json!([6, 6]));
    assert_eq!(report["bounding_box"]["row_start"], 2);
    assert_eq!(report["bounding_box"]["column_end"], 8);
    assert_eq!(report["background"], 255);
}

#[test]
fn test_detect_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(&temp_dir, "framed.png");
    write_framed(&input, 10, 2);

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("detect")
        .arg(&input)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"row_start\": 2"))
        .stdout(predicate::str::contains("\"row_end\": 8"))
        .stdout(predicate::str::contains("\"background\": 255"));
}

#[test]
fn test_detect_text() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(&temp_dir, "framed.png");
    write_framed(&input, 40, 5);

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("detect")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Background intensity: 255"))
        .stdout(predicate::str::contains("Rows: 5..35"))
        .stdout(predicate::str::contains("Content size: 30x30"));
}

#[test]
fn test_uniform_image_has_no_legal_region() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(&temp_dir, "uniform.png");
    let output = fixture(&temp_dir, "cropped.png");
    write_uniform(&input, 16);

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(exit_codes::NO_LEGAL_REGION)
        .stderr(predicate::str::contains("No legal region"));

    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_is_output_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(&temp_dir, "framed.png");
    write_framed(&input, 10, 2);

    // A directory already sits where the cropped file should go
    let output = fixture(&temp_dir, "taken.png");
    std::fs::create_dir(&output).unwrap();

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(exit_codes::OUTPUT_ERROR)
        .stderr(predicate::str::contains("Failed to save"))
        .stderr(predicate::str::contains("Invalid image").not());
}

#[test]
fn test_preview_written() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(&temp_dir, "framed.png");
    let output = fixture(&temp_dir, "cropped.png");
    let preview = fixture(&temp_dir, "preview.png");
    write_framed(&input, 20, 4);

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--preview")
        .arg(&preview)
        .assert()
        .success();

    let rendered = image::open(&preview).unwrap();
    assert!(rendered.width() > 20 + 12);
    assert_eq!(rendered.height(), 20);
}

#[test]
fn test_config_file_thresholds() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(&temp_dir, "narrow.png");
    let output = fixture(&temp_dir, "cropped.png");

    // Content 10 columns wide: its rows stay mostly white
    GrayImage::from_fn(40, 40, |x, y| {
        if (15..25).contains(&x) && (10..30).contains(&y) {
            Luma([0])
        } else {
            Luma([255])
        }
    })
    .save(&input)
    .unwrap();

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("40x40 -> 10x20"));

    let config = fixture(&temp_dir, "wide.toml");
    std::fs::write(&config, "[thresholds]\nrow_effective_length = 35\n").unwrap();

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(exit_codes::NO_LEGAL_REGION)
        .stderr(predicate::str::contains("rows"));
}

#[test]
fn test_cli_overrides_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(&temp_dir, "framed.png");
    let output = fixture(&temp_dir, "cropped.png");
    write_framed(&input, 10, 2);

    let config = fixture(&temp_dir, "edgecrop.toml");
    std::fs::write(&config, "[output]\npath = \"from_config.png\"\n").unwrap();

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists());
    assert!(!temp_dir.path().join("from_config.png").exists());
}

#[test]
fn test_crop_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("scans");
    let output_dir = temp_dir.path().join("out");
    std::fs::create_dir(&input_dir).unwrap();
    write_framed(&input_dir.join("a.png"), 10, 2);
    write_framed(&input_dir.join("b.png"), 12, 3);
    std::fs::write(input_dir.join("notes.txt"), "not an image").unwrap();

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input_dir)
        .arg("-o")
        .arg(&output_dir)
        .arg("--threads")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 cropped, 0 failed"));

    let a = image::open(output_dir.join("a.png")).unwrap();
    let b = image::open(output_dir.join("b.png")).unwrap();
    assert_eq!((a.width(), a.height()), (6, 6));
    assert_eq!((b.width(), b.height()), (6, 6));
    assert!(!output_dir.join("notes.txt").exists());
}

#[test]
fn test_crop_directory_isolates_failures() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("scans");
    std::fs::create_dir(&input_dir).unwrap();
    write_framed(&input_dir.join("good.png"), 10, 2);
    write_uniform(&input_dir.join("blank.png"), 10);

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input_dir)
        .assert()
        .code(exit_codes::GENERAL_ERROR)
        .stdout(predicate::str::contains("1 cropped, 1 failed"))
        .stderr(predicate::str::contains("blank.png"));

    assert!(input_dir.join("cropped").join("good.png").exists());
    assert!(!input_dir.join("cropped").join("blank.png").exists());
}

#[test]
fn test_crop_directory_refuses_to_overwrite_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("scans");
    std::fs::create_dir(&input_dir).unwrap();
    let source = input_dir.join("a.png");
    write_framed(&source, 10, 2);

    edge_crop_cmd()
        .current_dir(temp_dir.path())
        .arg("crop")
        .arg(&input_dir)
        .arg("-o")
        .arg(&input_dir)
        .assert()
        .code(exit_codes::INVALID_ARGS)
        .stderr(predicate::str::contains("would overwrite"));

    // Source image untouched
    let kept = image::open(&source).unwrap();
    assert_eq!((kept.width(), kept.height()), (10, 10));
}
