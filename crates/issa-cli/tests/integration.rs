//! Integration tests for issa CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn issa(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_issa"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn write_bfile(dir: &Path, name: &str, terms: &[i64]) {
    let mut text = format!("# {} test b-file\n", name);
    for (i, v) in terms.iter().enumerate() {
        text.push_str(&format!("{} {}\n", i, v));
    }
    fs::write(dir.join(name), text).unwrap();
}

#[test]
fn modes_command_lists_all_modes() {
    let output = issa(&["modes"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["revolution", "distant", "linear", "multiplicative"] {
        assert!(stdout.contains(name), "Should list '{}'", name);
    }
}

#[test]
fn spiral_command_produces_json() {
    let output = issa(&["spiral", "-n", "5", "--height", "10", "--width", "10"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let xs = json["x"].as_array().unwrap();
    let ys = json["y"].as_array().unwrap();
    assert_eq!(xs.len(), 5);
    assert_eq!(ys.len(), 5);
    assert_eq!(xs[0], -5.0);
    assert_eq!(ys[0], -5.0);
    assert_eq!(xs[4].as_f64().unwrap().abs(), 0.0);
    assert_eq!(ys[4].as_f64().unwrap().abs(), 0.0);
    assert_eq!(json["spacing"], 8.0);
}

#[test]
fn spiral_command_produces_svg() {
    let output = issa(&["spiral", "-n", "40", "-s", "3", "--scaling", "multiplicative", "-f", "svg"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<polyline"), "Should have the spiral path");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn distant_spacing_fails() {
    let output = issa(&["spiral", "--equi", "distant"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not implemented"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty(), "no partial output expected");
}

#[test]
fn unknown_scaling_is_rejected() {
    let output = issa(&["spiral", "--scaling", "quadratic"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("quadratic"), "stderr: {}", stderr);
    assert!(stderr.contains("linear, multiplicative"), "stderr: {}", stderr);
}

#[test]
fn too_few_points_fails() {
    let output = issa(&["spiral", "-n", "1"]);
    assert!(!output.status.success());
}

#[test]
fn sequence_command_summarizes_bfile() {
    let dir = tempfile::tempdir().unwrap();
    write_bfile(dir.path(), "b001057.txt", &[0, 1, -1, 2, -2, 3, -3]);

    let output = issa(&["sequence", "A001057", "-d", dir.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A001057"));
    assert!(stdout.contains("Terms: 7"));
    assert!(stdout.contains("Non-negative: false"));
}

#[test]
fn sequence_command_validates_metadata() {
    let dir = tempfile::tempdir().unwrap();
    write_bfile(dir.path(), "b000045.txt", &[0, 1, 1, 2, 3, 5, 8, 13]);
    let meta = dir.path().join("meta.json");
    fs::write(&meta, r#"{"count": 1, "results": [{"number": 45, "name": "Fibonacci numbers", "data": "0,1,1,2,3"}]}"#).unwrap();

    let output = issa(&[
        "sequence",
        "45",
        "-d",
        dir.path().to_str().unwrap(),
        "--meta",
        meta.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["seq_id"], "A000045");
    assert_eq!(record["data_longer"].as_array().unwrap().len(), 8);
    assert_eq!(record["is_positive"], true);
}

#[test]
fn missing_sequence_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = issa(&["sequence", "A000000", "-d", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {}", stderr);
    assert!(stderr.contains(dir.path().to_str().unwrap()), "stderr: {}", stderr);
    assert!(stderr.contains("b000000.txt"), "stderr: {}", stderr);
}

#[test]
fn render_command_pairs_terms_with_points() {
    let dir = tempfile::tempdir().unwrap();
    write_bfile(dir.path(), "b000040.txt", &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);

    let output = issa(&[
        "render",
        "A000040",
        "-d",
        dir.path().to_str().unwrap(),
        "-f",
        "csv",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "index,x,y,value");
    assert_eq!(lines.len(), 11);
    assert!(lines[10].ends_with(",29"));
}

#[test]
fn render_command_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    write_bfile(dir.path(), "b000027.txt", &(1..=60).collect::<Vec<_>>());
    let png = dir.path().join("out.png");

    let output = issa(&[
        "render",
        "A27",
        "-d",
        dir.path().to_str().unwrap(),
        "-s",
        "4",
        "--size",
        "128",
        "-o",
        png.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let bytes = fs::read(&png).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn render_rejects_more_points_than_terms() {
    let dir = tempfile::tempdir().unwrap();
    write_bfile(dir.path(), "b000012.txt", &[1, 1, 1]);

    let output = issa(&["render", "A000012", "-d", dir.path().to_str().unwrap(), "-n", "10"]);
    assert!(!output.status.success());
}

#[test]
fn recipe_example_and_render() {
    let output = issa(&["recipe", "--example"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("spiral_type"));

    let dir = tempfile::tempdir().unwrap();
    let recipe = dir.path().join("plain.yaml");
    fs::write(
        &recipe,
        "name: plain\ncanvas:\n  width: 30\n  height: 20\nspiral:\n  num_points: 64\n  num_spirals: 5\n  spiral_type: multiplicative\n",
    )
    .unwrap();
    let svg = dir.path().join("plain.svg");

    let output = issa(&["recipe", recipe.to_str().unwrap(), "-o", svg.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let content = fs::read_to_string(&svg).unwrap();
    assert!(content.contains("<polyline"));
}
