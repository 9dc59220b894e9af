//! Integration tests for the wordtally CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn wordtally(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wordtally").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .env_remove("WORDTALLY_CHUNKING__MIN_CHUNK_SIZE")
        .env_remove("WORDTALLY_CHUNKING__DELIMITER")
        .env_remove("WORDTALLY_WORKERS__THREADS")
        .env_remove("WORDTALLY_OUTPUT__FORMAT");
    cmd
}

fn matrix_file(count: i32, order: i32, values: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&count.to_ne_bytes());
    bytes.extend_from_slice(&order.to_ne_bytes());
    for value in values {
        bytes.extend_from_slice(&value.to_ne_bytes());
    }
    bytes
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    wordtally(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("count").and(predicate::str::contains("det")));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    wordtally(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordtally"));
}

#[test]
fn test_invalid_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    wordtally(temp_dir.path())
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_count_requires_files() {
    let temp_dir = TempDir::new().unwrap();
    wordtally(temp_dir.path()).arg("count").assert().failure();
}

#[test]
fn test_count_rejects_zero_threads() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "ola").unwrap();

    wordtally(temp_dir.path())
        .args(["count", "-n", "0", "a.txt"])
        .assert()
        .failure();
}

#[test]
fn test_count_text_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("casa.txt"), "Eu vou a casa hoje").unwrap();

    wordtally(temp_dir.path())
        .args(["count", "-n", "2", "casa.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File name: casa.txt"))
        .stdout(predicate::str::contains("Number of words = 5"))
        .stdout(predicate::str::contains("Number of words beginning with a vowel = 2"))
        .stdout(predicate::str::contains("Number of words ending with a consonant = 0"))
        .stdout(predicate::str::contains("Elapsed time"));
}

#[test]
fn test_count_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let text = "Olá, mundo! Estás bem? Ção já. ".repeat(50);
    fs::write(temp_dir.path().join("ola.txt"), &text).unwrap();

    let assert = wordtally(temp_dir.path())
        .args(["count", "-n", "4", "--min-chunk", "8", "--format", "json", "ola.txt"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["success"], true);
    assert_eq!(report["workers"], 4);

    let file = &report["files"][0];
    assert_eq!(file["word_count"], 300);
    assert_eq!(file["words_start_vowel"], 100);
    assert_eq!(file["words_end_consonant"], 100);
    assert_eq!(file["bytes"], text.len() as u64);
    assert_eq!(file["status"]["state"], "done");
}

#[test]
fn test_count_reports_zeros_for_missing_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("good.txt"), "hello world").unwrap();

    let assert = wordtally(temp_dir.path())
        .args(["count", "missing.txt", "good.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping").not())
        .stdout(predicate::str::contains("Number of words ending with a consonant = 1"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let missing = stdout.find("File name: missing.txt").unwrap();
    let good = stdout.find("File name: good.txt").unwrap();
    assert!(missing < good);
    assert!(stdout[missing..good].contains("Number of words = 0"));
    assert!(stdout[good..].contains("Number of words = 2"));
}

#[test]
fn test_user_config_is_read_from_home() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join(".config").join("wordtally");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[chunking]\nmin_chunk_size = 64\n").unwrap();

    wordtally(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("min_chunk_size = 64"));
}

#[test]
fn test_count_honours_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "um dois").unwrap();
    fs::write(temp_dir.path().join("tally.toml"), "[output]\nformat = \"json\"\n").unwrap();

    wordtally(temp_dir.path())
        .args(["--config", "tally.toml", "count", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"word_count\": 2"));
}

#[test]
fn test_invalid_delimiter_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "um dois").unwrap();

    wordtally(temp_dir.path())
        .env("WORDTALLY_CHUNKING__DELIMITER", "x")
        .args(["count", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunking.delimiter"));
}

#[test]
fn test_det_output() {
    let temp_dir = TempDir::new().unwrap();
    let values = [1.0, 2.0, 3.0, 4.0, 0.0, 1.0, 1.0, 0.0];
    fs::write(temp_dir.path().join("mat.bin"), matrix_file(2, 2, &values)).unwrap();

    wordtally(temp_dir.path())
        .args(["det", "-n", "2", "mat.bin", "nope.bin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Determinants for file 'mat.bin'"))
        .stdout(predicate::str::contains("Number of matrices: 2"))
        .stdout(predicate::str::contains("Order of the matrices: 2"))
        .stdout(predicate::str::contains("Determinant for matrix 1 is -2.000000e+00."))
        .stdout(predicate::str::contains("Determinant for matrix 2 is -1.000000e+00."))
        .stdout(predicate::str::contains("Skipping"));
}

#[test]
fn test_config_show() {
    let temp_dir = TempDir::new().unwrap();

    wordtally(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("min_chunk_size = 4096"));

    wordtally(temp_dir.path())
        .env("WORDTALLY_CHUNKING__MIN_CHUNK_SIZE", "128")
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min_chunk_size\": 128"));
}
