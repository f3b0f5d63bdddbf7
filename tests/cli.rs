use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("vizstyle").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("vizstyle"));
}

#[test]
fn demo_writes_six_charts() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("vizstyle").unwrap();
    cmd.args([
        "demo",
        "--out-dir",
        dir.path().to_str().unwrap(),
        "--format",
        "svg",
    ]);
    cmd.assert().success();

    for name in [
        "demo_01_line",
        "demo_02_scatter",
        "demo_03_bar",
        "demo_04_histogram",
        "demo_05_heatmap",
        "demo_06_box",
    ] {
        let path = dir.path().join(format!("{name}.svg"));
        let meta = std::fs::metadata(&path)
            .unwrap_or_else(|_| panic!("missing {}", path.display()));
        assert!(meta.len() > 0, "{name} is empty");
    }
}

#[test]
fn init_style_writes_loadable_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("style.json");
    let mut cmd = Command::cargo_bin("vizstyle").unwrap();
    cmd.args(["init-style", path.to_str().unwrap()]);
    cmd.assert().success();

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["colors"]["primary"], "#2E86AB");
    assert_eq!(json["figure"]["width"], 1000);
}

#[test]
fn demo_accepts_custom_style() {
    let dir = tempfile::tempdir().unwrap();
    let style_path = dir.path().join("style.json");

    let mut init = Command::cargo_bin("vizstyle").unwrap();
    init.args(["init-style", style_path.to_str().unwrap()]);
    init.assert().success();

    let mut cmd = Command::cargo_bin("vizstyle").unwrap();
    cmd.args([
        "demo",
        "--out-dir",
        dir.path().to_str().unwrap(),
        "--style",
        style_path.to_str().unwrap(),
    ]);
    cmd.assert().success();
    assert!(dir.path().join("demo_01_line.svg").exists());
}
