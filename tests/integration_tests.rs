//! Integration tests for the preflight CLI

use std::fs;
use std::process::Command;

fn preflight() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_preflight"));
    command.env_remove("RUST_LOG");
    command
}

/// Test that the CLI shows help with explicit help flag
#[test]
fn test_cli_explicit_help() {
    let output = preflight()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("preflight"));
    assert!(stdout.contains("METAR"));
    assert!(stdout.contains("--runway"));
    assert!(stdout.contains("--table-dataset"));
}

/// Test that the airport identifier is required
#[test]
fn test_cli_requires_ident() {
    let output = preflight().output().expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("IDENT") || stderr.contains("ident"));
}

/// Test that an unknown airport fails before any weather request
#[test]
fn test_unknown_airport() {
    let dir = tempfile::tempdir().unwrap();
    let airports = dir.path().join("airports.csv");
    let runways = dir.path().join("runways.csv");
    fs::write(&airports, "ident,name,elevation_ft\nKXYZ,Test Field,1000\n").unwrap();
    fs::write(&runways, "airport_ident,length_ft,closed,le_ident\n").unwrap();

    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "[weather]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_seconds = 1\n\n[reference]\nairports_path = {:?}\nrunways_path = {:?}\n",
            airports.display().to_string(),
            runways.display().to_string()
        ),
    )
    .unwrap();

    let output = preflight()
        .arg("ZZZZ")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No airport record for 'ZZZZ'"));
}

/// Test that an invalid configuration file is reported
#[test]
fn test_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[logging]\nlevel = \"loud\"\n").unwrap();

    let output = preflight()
        .arg("KXYZ")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid log level"));
}
