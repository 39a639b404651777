//! CLI integration tests
//!
//! These tests run the built binary and verify:
//! - Argument parsing and validation
//! - Output formatting
//! - Error handling and exit codes

mod support;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use support::{copy_fixture, expected_demo_entries};

fn doxyplat() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_doxyplat"));
    for var in [
        "DOXYPLAT_VARIABLE",
        "DOXYPLAT_TEMPLATE",
        "DOXYPLAT_OUTPUT",
        "DOXYPLAT_FIELD",
        "DOXYPLAT_LOG_LEVEL",
        "DOXYPLAT_LOG_JSON",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Runs the binary from the fixture's `doc` directory, where the default
/// template and output names apply
fn run_in_doc(dir: &Path, args: &[&str]) -> Output {
    doxyplat()
        .current_dir(dir.join("doc"))
        .args(args)
        .output()
        .expect("Failed to execute doxyplat")
}

#[test]
fn test_cli_help() {
    let output = doxyplat()
        .arg("--help")
        .output()
        .expect("Failed to execute doxyplat");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("doxyplat"));
    assert!(stdout.contains("MAKEFILE"));
    assert!(stdout.contains("--template"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_cli_version() {
    let output = doxyplat()
        .arg("--version")
        .output()
        .expect("Failed to execute doxyplat");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("doxyplat"));
}

#[test]
fn test_no_arguments_is_usage_error() {
    let output = doxyplat().output().expect("Failed to execute doxyplat");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_two_positionals_is_usage_error() {
    let output = doxyplat()
        .args(["Makefile", "Makefile.other"])
        .output()
        .expect("Failed to execute doxyplat");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_generates_config_with_defaults() {
    let dir = copy_fixture("chibios-demo");

    let output = run_in_doc(dir.path(), &["-q", "../demo/Makefile"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(dir.path().join("doc/Doxyfile_html")).unwrap();
    for entry in expected_demo_entries(&dir.path().join("chibios")) {
        assert!(written.contains(&entry), "missing {}", entry);
    }
    assert!(written.starts_with("# Doxyfile 1.8.11\n"));
}

#[test]
fn test_human_report() {
    let dir = copy_fixture("chibios-demo");

    let output = run_in_doc(dir.path(), &["../demo/Makefile"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Root Path:"));
    assert!(stdout.contains("Entries:    13 (8 discovered, 5 mandatory)"));
    assert!(stdout.contains("doxygen"));
}

#[test]
fn test_dry_run_json_report() {
    let dir = copy_fixture("chibios-demo");

    let output = run_in_doc(dir.path(), &["--dry-run", "--format", "json", "../demo/Makefile"]);

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(report["written"], false);
    assert_eq!(report["discovered"], 8);
    assert_eq!(report["entries"].as_array().map(Vec::len), Some(13));
    assert!(!dir.path().join("doc/Doxyfile_html").exists());
}

#[test]
fn test_explicit_template_and_output() {
    let dir = copy_fixture("chibios-demo");
    let template = dir.path().join("doc/Doxyfile_html.template");
    let target = dir.path().join("out.doxyfile");

    let output = doxyplat()
        .arg("-q")
        .arg("--template")
        .arg(&template)
        .arg("--output")
        .arg(&target)
        .arg(dir.path().join("demo/Makefile"))
        .output()
        .expect("Failed to execute doxyplat");

    assert!(output.status.success());
    assert!(target.exists());
    assert!(!dir.path().join("doc/Doxyfile_html").exists());
}

#[test]
fn test_config_file_overrides_output() {
    let dir = copy_fixture("chibios-demo");
    let config = dir.path().join("doxyplat.toml");
    fs::write(
        &config,
        format!(
            "output = \"{}\"\nmandatory_dirs = [\"os/hal/dox\"]\n",
            dir.path().join("from-config").display()
        ),
    )
    .unwrap();

    let output = doxyplat()
        .current_dir(dir.path().join("doc"))
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "../demo/Makefile"])
        .output()
        .expect("Failed to execute doxyplat");

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["entries"].as_array().map(Vec::len), Some(9));
    assert!(dir.path().join("from-config").exists());
}

#[test]
fn test_missing_field_exits_with_error() {
    let dir = copy_fixture("chibios-demo");

    let output = run_in_doc(dir.path(), &["--field", "EXAMPLE_PATH", "../demo/Makefile"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("EXAMPLE_PATH"));
    assert!(!dir.path().join("doc/Doxyfile_html").exists());
}

#[test]
fn test_missing_makefile_exits_with_error() {
    let dir = copy_fixture("chibios-demo");

    let output = run_in_doc(dir.path(), &["../demo/Missing.mk"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing.mk"));
}

#[test]
fn test_environment_selects_output() {
    let dir = copy_fixture("chibios-demo");

    let output = doxyplat()
        .current_dir(dir.path().join("doc"))
        .env("DOXYPLAT_OUTPUT", "Doxyfile_env")
        .args(["-q", "../demo/Makefile"])
        .output()
        .expect("Failed to execute doxyplat");

    assert!(output.status.success());
    assert!(dir.path().join("doc/Doxyfile_env").exists());
}
