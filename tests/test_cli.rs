//! Tests for CLI argument parsing and the end-to-end binary

use assert_cmd::Command;
use causaprep::cli::Cli;
use clap::Parser;
use predicates::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["causaprep"]);

    assert_eq!(
        cli.config,
        PathBuf::from("config.json"),
        "Default config path should be config.json"
    );
    assert!(cli.input.is_none(), "Input override should default to none");
    assert!(cli.seed.is_none(), "Seed override should default to none");
    assert!(!cli.show_all_columns, "Default show_all_columns should be false");
    assert!(cli.report.is_none(), "Report export should default to off");
    assert_eq!(
        cli.infer_schema_length, 10000,
        "Default schema inference should be 10000"
    );
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "causaprep",
        "--config",
        "run.json",
        "--input",
        "raw.csv",
        "--seed",
        "7",
        "--show-all-columns",
        "--report",
        "report.json",
    ]);

    assert_eq!(cli.config, PathBuf::from("run.json"));
    assert_eq!(cli.input, Some(PathBuf::from("raw.csv")));
    assert_eq!(cli.seed, Some(7));
    assert!(cli.show_all_columns);
    assert_eq!(cli.report, Some(PathBuf::from("report.json")));
}

/// Write a raw survey CSV with 12 eligible and 2 ineligible rows.
///
/// The eligible hours are 5,10,...,60 (median 32.5), so binarization yields
/// 6 treated and 6 control rows and each class splits 4/1/1.
fn write_fixture_csv(path: &Path) {
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "age_bracket,citizenship,cost,working_hrs,capital_gain,union_member,region").unwrap();
    for i in 0..12 {
        let hours = 5 * (i + 1);
        let region = ["north", "south", "east"][i % 3];
        writeln!(
            file,
            "{},0,{},{},{},{},{}",
            1 + i % 4,
            2 + i,
            hours,
            100 * i,
            i % 2,
            region
        )
        .unwrap();
    }
    // Ineligible rows: age bracket too high, then non-zero citizenship
    writeln!(file, "9,0,50,40,0,1,west").unwrap();
    writeln!(file, "2,1,50,40,0,0,west").unwrap();
    drop(file);
}

fn write_fixture_config(dir: &Path, csv: &Path) -> PathBuf {
    let out_dir = dir.join("out");
    let config_path = dir.join("config.json");
    let contents = format!(
        r#"{{
            "datasets": {{
                "raw": "{raw}",
                "processed": {{
                    "train": "{out}/train.csv",
                    "valid": "{out}/valid.csv",
                    "test": "{out}/test.csv"
                }}
            }},
            "features": {{
                "age_col": "age_bracket",
                "citizen_col": "citizenship",
                "cost_col": "cost",
                "hour_col": "working_hrs",
                "gain_col": "capital_gain",
                "binary_cols": ["union_member"],
                "categorical_cols": ["region"]
            }}
        }}"#,
        raw = csv.display(),
        out = out_dir.display()
    );
    std::fs::write(&config_path, contents).unwrap();
    config_path
}

#[test]
fn test_binary_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("raw.csv");
    write_fixture_csv(&csv_path);
    let config_path = write_fixture_config(temp_dir.path(), &csv_path);

    Command::cargo_bin("causaprep")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("preparation complete"));

    let out_dir = temp_dir.path().join("out");
    for name in ["train.csv", "valid.csv", "test.csv"] {
        assert!(
            out_dir.join(name).exists(),
            "expected output partition {} to be written",
            name
        );
    }

    // 12 eligible rows -> 8 train, 2 valid, 2 test (plus a header line each)
    let train = std::fs::read_to_string(out_dir.join("train.csv")).unwrap();
    let valid = std::fs::read_to_string(out_dir.join("valid.csv")).unwrap();
    let test = std::fs::read_to_string(out_dir.join("test.csv")).unwrap();
    assert_eq!(train.lines().count(), 9);
    assert_eq!(valid.lines().count(), 3);
    assert_eq!(test.lines().count(), 3);

    // Encoding before splitting guarantees one shared column schema
    let headers: Vec<&str> = [&train, &valid, &test]
        .iter()
        .map(|c| c.lines().next().unwrap())
        .collect();
    assert_eq!(headers[0], headers[1]);
    assert_eq!(headers[1], headers[2]);
    assert!(
        headers[0].contains("region_north"),
        "categorical columns must be one-hot encoded in the outputs: {}",
        headers[0]
    );
}

#[test]
fn test_binary_is_reproducible_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("raw.csv");
    write_fixture_csv(&csv_path);
    let config_path = write_fixture_config(temp_dir.path(), &csv_path);
    let train_path = temp_dir.path().join("out").join("train.csv");

    Command::cargo_bin("causaprep")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();
    let first = std::fs::read_to_string(&train_path).unwrap();

    Command::cargo_bin("causaprep")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();
    let second = std::fs::read_to_string(&train_path).unwrap();

    assert_eq!(first, second, "a fixed seed must reproduce the split exactly");
}

#[test]
fn test_binary_writes_run_report() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("raw.csv");
    write_fixture_csv(&csv_path);
    let config_path = write_fixture_config(temp_dir.path(), &csv_path);
    let report_path = temp_dir.path().join("report.json");

    Command::cargo_bin("causaprep")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();

    assert_eq!(report["metadata"]["seed"], 42);
    assert_eq!(report["summary"]["eligible_rows"], 12);
    assert_eq!(report["summary"]["treated"], 6);
    assert_eq!(report["summary"]["control"], 6);
    assert_eq!(report["summary"]["partitions"]["train"], 8);
    assert_eq!(report["summary"]["partitions"]["valid"], 2);
    assert_eq!(report["summary"]["partitions"]["test"], 2);
}

#[test]
fn test_binary_fails_on_missing_column() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("raw.csv");

    // No capital_gain column
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "age_bracket,citizenship,cost,working_hrs,union_member,region").unwrap();
    writeln!(file, "1,0,5,40,1,north").unwrap();
    drop(file);

    let config_path = write_fixture_config(temp_dir.path(), &csv_path);

    Command::cargo_bin("causaprep")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("capital_gain"));
}
