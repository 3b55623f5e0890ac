use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let path = repo_root().join("fixtures").join("example.json");
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn protodoc() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("protodoc"));
    cmd.current_dir(repo_root());
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run protodoc");
    assert!(
        output.status.success(),
        "protodoc failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn cli_lays_out_every_file_by_default() {
    let value = stdout_json(protodoc().arg(fixture()));

    let files: Vec<&str> = value
        .as_array()
        .expect("array of diagrams")
        .iter()
        .filter_map(|d| d["file"].as_str())
        .collect();
    assert_eq!(files, vec!["booking.proto", "vehicle.proto"]);
}

#[test]
fn cli_layout_of_one_file_matches_library_positions() {
    let value = stdout_json(protodoc().args([
        "layout",
        "--pretty",
        "--file",
        "vehicle.proto",
        fixture().to_string_lossy().as_ref(),
    ]));

    let diagram = &value[0];
    assert_eq!(diagram["direction"], "TB");
    let vehicle = diagram["nodes"]
        .as_array()
        .and_then(|nodes| nodes.iter().find(|n| n["id"] == "com.example.Vehicle"))
        .expect("vehicle node");
    assert_eq!(vehicle["x"], 67.5);
    assert_eq!(vehicle["y"], 0.0);
    assert_eq!(diagram["bounds"]["width"], 267.5);
}

#[test]
fn cli_graph_reads_stdin_and_lists_references() {
    let text = fs::read_to_string(fixture()).expect("read fixture");
    let output = protodoc()
        .args(["graph", "--file", "booking.proto", "-"])
        .write_stdin(text)
        .output()
        .expect("run protodoc");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON");
    let edges = value[0]["graph"]["edges"].as_array().expect("edges");
    assert_eq!(edges.len(), 4);
    assert!(edges.iter().any(|e| e["source"] == e["target"]));
}

#[test]
fn cli_direction_flag_overrides_config_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("diagram.yaml");
    fs::write(&config, "direction: BT\nnodeWidth: 120\n").expect("write config");

    let value = stdout_json(protodoc().args([
        "--config",
        config.to_string_lossy().as_ref(),
        "--direction",
        "LR",
        "--file",
        "vehicle.proto",
        fixture().to_string_lossy().as_ref(),
    ]));

    assert_eq!(value[0]["direction"], "LR");
    let widths: Vec<f64> = value[0]["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .filter_map(|n| n["width"].as_f64())
        .collect();
    assert_eq!(widths, vec![120.0, 120.0, 120.0]);
}

#[test]
fn cli_renders_svg_to_out_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("vehicle.svg");

    protodoc()
        .args([
            "render",
            "--file",
            "vehicle.proto",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Manufacturer"));
    assert_eq!(svg.matches(r#"class="node""#).count(), 3);
}

#[test]
fn cli_reports_unknown_file() {
    let output = protodoc()
        .args(["--file", "missing.proto", fixture().to_string_lossy().as_ref()])
        .output()
        .expect("run protodoc");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.proto"));
}

#[test]
fn cli_rejects_invalid_json_and_bad_usage() {
    let output = protodoc()
        .arg("-")
        .write_stdin("{ not json")
        .output()
        .expect("run protodoc");
    assert_eq!(output.status.code(), Some(1));

    let output = protodoc()
        .args(["--direction", "diagonal"])
        .output()
        .expect("run protodoc");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}
