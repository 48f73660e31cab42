use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LAND_CSV: &str = "\
Id,Country,Year,Series,Value,Footnotes,Source
4,France,2000,Forest cover (thousand hectares),15353,,FAO
4,France,2000,Land area (thousand hectares),54756,,FAO
4,France,2010,Forest cover (thousand hectares),16424,,FAO
4,France,2010,Land area (thousand hectares),54756,,FAO
724,Spain,2000,Forest cover (thousand hectares),16988,,FAO
410,\"Korea, Republic of\",2000,Land area (thousand hectares),9745,,FAO
410,\"Korea, Republic of\",2000,Forest cover (thousand hectares),...,,FAO
410,truncated
";

/// Write the sample land-use table into the given directory.
fn create_test_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("land.csv");
    std::fs::write(&path, LAND_CSV).unwrap();
    path
}

fn cmd() -> Command {
    Command::cargo_bin("land-treemap").unwrap()
}

fn read_json(path: PathBuf) -> serde_json::Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

// --- Parse subcommand ---

#[test]
fn test_parse_writes_mapping() {
    let dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&dir);
    let json_path = dir.path().join("land.json");

    cmd()
        .args([
            "parse",
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success"));

    let mapping = read_json(json_path);
    assert_eq!(mapping["2000"]["France"][0]["value"], 15353.0);
    assert!(mapping["2000"]["Korea, Republic of"][1]["value"].is_null());
    assert_eq!(mapping["2010"]["France"].as_array().unwrap().len(), 2);
}

#[test]
fn test_parse_strict_fails_on_malformed_row() {
    let dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&dir);
    let json_path = dir.path().join("land.json");

    cmd()
        .args([
            "parse",
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            json_path.to_str().unwrap(),
            "--strict",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed record on line 9"));
}

// --- Run subcommand ---

#[test]
fn test_run_writes_all_documents() {
    let dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&dir);
    let out = dir.path().join("out");

    cmd()
        .args([
            "run",
            "--input",
            csv_path.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("First parse complete"));

    assert!(out.join("land.json").exists());
    for name in [
        "land_forest_2000.json",
        "land_forest_2010.json",
        "land_all_area_2000.json",
        "land_all_area_2010.json",
    ] {
        assert!(out.join(name).exists(), "missing {name}");
    }

    let forest = read_json(out.join("land_forest_2000.json"));
    assert_eq!(forest["name"], "Land_forest_2000");
    let countries = forest["children"].as_array().unwrap();
    // Spain has no land-area record; Korea's forest value is non-numeric.
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0]["name"], "France");
    assert_eq!(
        countries[0]["children"][0]["name"],
        "France - Forest cover (thousand hectares)"
    );
    assert!(countries[1]["children"].as_array().unwrap().is_empty());
}

#[test]
fn test_run_with_config_file() {
    let dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&dir);
    let config_path = dir.path().join("pipeline.toml");
    std::fs::write(
        &config_path,
        "output_prefix = \"un\"\nnon_numeric = \"zero\"\n\n[[views]]\nlabel = \"trees\"\nmeasurement = \"Forest cover (thousand hectares)\"\n",
    )
    .unwrap();

    cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "run",
            "--input",
            csv_path.to_str().unwrap(),
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(dir.path().join("un.json").exists());
    let doc = read_json(dir.path().join("un_trees_2000.json"));
    assert_eq!(doc["name"], "Land_trees_2000");
    assert_eq!(doc["children"][1]["children"][0]["value"], 0.0);
    assert!(!dir.path().join("un_all_area_2000.json").exists());
}

// --- Extract subcommand ---

#[test]
fn test_extract_from_json_with_custom_view() {
    let dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&dir);
    let json_path = dir.path().join("land.json");

    cmd()
        .args([
            "parse",
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    cmd()
        .args([
            "extract",
            "--input",
            json_path.to_str().unwrap(),
            "--output-dir",
            dir.path().to_str().unwrap(),
            "--view",
            "area=Land area (thousand hectares)",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("'area' documents"));

    let doc = read_json(dir.path().join("land_area_2010.json"));
    assert_eq!(doc["name"], "Land_area_2010");
    assert_eq!(doc["children"][0]["children"][0]["value"], 54756.0);
}

#[test]
fn test_extract_rejects_bad_view() {
    let dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&dir);

    cmd()
        .args([
            "extract",
            "--input",
            csv_path.to_str().unwrap(),
            "--view",
            "no-separator",
        ])
        .assert()
        .failure();
}

// --- Summary subcommand ---

#[test]
fn test_summary_output() {
    let dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&dir);

    cmd()
        .args([
            "summary",
            "--input",
            csv_path.to_str().unwrap(),
            "--year",
            "2000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Land-Use Table"))
        .stdout(predicate::str::contains("Parse Issues"))
        .stdout(predicate::str::contains("Land_forest_2000"))
        .stdout(predicate::str::contains("Land_all_area_2010"));
}

// --- Error cases ---

#[test]
fn test_missing_file() {
    cmd()
        .args(["summary", "--input", "nonexistent.csv"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let csv_path = create_test_csv(&dir);
    let config_path = dir.path().join("bad.toml");
    std::fs::write(&config_path, "unknown_key = 1\n").unwrap();

    cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "summary",
            "--input",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_no_subcommand() {
    cmd().assert().failure();
}

#[test]
fn test_missing_input_flag() {
    cmd().args(["parse"]).assert().failure();
}

// --- Help and version ---

#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Land-Use Treemap Builder"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("land-treemap"));
}
