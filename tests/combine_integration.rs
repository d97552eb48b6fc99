//! Integration tests for the combine subcommand.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const RATE: u32 = 32_000;

fn write_wav(path: &Path, samples: &[i16]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &s in samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
}

fn read_wav(path: &Path) -> Vec<i16> {
    let mut reader = hound::WavReader::open(path).unwrap();
    reader.samples::<i16>().map(Result::unwrap).collect()
}

/// Workspace with an empty config file and an input directory.
struct Fixture {
    root: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("in")).unwrap();
        std::fs::write(root.path().join("config.toml"), "").unwrap();
        Self { root }
    }

    fn input(&self) -> std::path::PathBuf {
        self.root.path().join("in")
    }

    fn output(&self) -> std::path::PathBuf {
        self.root.path().join("out")
    }

    fn command(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("wavbatch");
        cmd.env_remove("RUST_LOG")
            .env_remove("WAVBATCH_CONFIG")
            .env_remove("WAVBATCH_INPUT_DIR")
            .env_remove("WAVBATCH_OUTPUT_DIR")
            .env_remove("WAVBATCH_GROUP_SIZE")
            .env_remove("WAVBATCH_PREFIX")
            .arg("combine")
            .arg("--config")
            .arg(self.root.path().join("config.toml"))
            .arg("--input-dir")
            .arg(self.input())
            .arg("--output-dir")
            .arg(self.output())
            .arg("--no-progress");
        cmd
    }
}

#[test]
fn test_corrupted_file_is_skipped_and_reported() {
    let fx = Fixture::new();
    // Odd length with RIFF only at offset 0: fails every loading strategy
    std::fs::write(fx.input().join("SBW1520_20240101_000000.wav"), b"RIFFxxxxJUNK!").unwrap();
    let valid: Vec<i16> = (0..1000).map(|i| (i % 200) as i16).collect();
    write_wav(&fx.input().join("SBW1520_20240101_000100.wav"), &valid);

    fx.command()
        .arg("--group-size")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed files: 1"))
        .stdout(predicate::str::contains("SBW1520_20240101_000000.wav"));

    let merged = fx.output().join("SBW1520_20240101_000000_TO_000100.wav");
    assert_eq!(read_wav(&merged), valid);

    let log = std::fs::read_to_string(fx.output().join("combine_log.txt")).unwrap();
    assert!(log.contains("SBW1520_20240101_000000.wav"));
    assert!(!log.contains("\u{1b}["));
}

#[test]
fn test_groups_follow_timestamps_not_names() {
    let fx = Fixture::new();
    // Lexical order differs from chronological order across days
    write_wav(&fx.input().join("SBW1520_20240102_000000.wav"), &[3; 10]);
    write_wav(&fx.input().join("SBW1520_20240101_120000.wav"), &[2; 10]);
    write_wav(&fx.input().join("SBW1520_20240101_000000.wav"), &[1; 10]);

    fx.command().arg("--group-size").arg("2").assert().success();

    let first = read_wav(&fx.output().join("SBW1520_20240101_000000_TO_120000.wav"));
    assert_eq!(first[..10], [1; 10]);
    assert_eq!(first[10..], [2; 10]);
    let second = read_wav(&fx.output().join("SBW1520_20240102_000000_TO_000000.wav"));
    assert_eq!(second, vec![3; 10]);
}

#[test]
fn test_non_matching_names_are_ignored() {
    let fx = Fixture::new();
    write_wav(&fx.input().join("SBW1520_20240101_000000.wav"), &[1; 10]);
    write_wav(&fx.input().join("OTHER_20240101_000000.wav"), &[9; 10]);
    std::fs::write(fx.input().join("notes.txt"), "hello").unwrap();

    fx.command().assert().success();

    let outputs: Vec<_> = std::fs::read_dir(fx.output())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".wav"))
        .collect();
    assert_eq!(outputs, vec!["SBW1520_20240101_000000_TO_000000.wav"]);
}

fn write_stereo_16k(path: &Path, frames: usize, level: i16) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..frames * 2 {
        writer.write_sample(level).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_resamples_to_target_format() {
    let fx = Fixture::new();
    write_stereo_16k(&fx.input().join("SBW1520_20240101_000000.wav"), 8000, 10_000);
    write_stereo_16k(&fx.input().join("SBW1520_20240101_000100.wav"), 8000, 10_000);

    fx.command().assert().success();

    let merged = fx.output().join("SBW1520_20240101_000000_TO_000100.wav");
    let spec = hound::WavReader::open(&merged).unwrap().spec();
    assert_eq!(spec.sample_rate, RATE);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);

    // Two 0.5 s files, joined without a gap at 16000
    let samples = read_wav(&merged);
    assert_eq!(samples.len(), 32_000);
    assert!(samples[20..15_980].iter().all(|&s| (i32::from(s) - 10_000).abs() < 1000));
    assert!(samples[16_020..31_980].iter().all(|&s| (i32::from(s) - 10_000).abs() < 1000));
    assert!(samples[15_990] > 5000 && samples[16_010] > 5000);
}

#[test]
fn test_zero_group_size_rejected() {
    let fx = Fixture::new();
    fx.command()
        .arg("--group-size")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("group size must be at least 1"));
}

#[test]
fn test_missing_input_dir_fails() {
    let fx = Fixture::new();
    std::fs::remove_dir(fx.input()).unwrap();
    fx.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
