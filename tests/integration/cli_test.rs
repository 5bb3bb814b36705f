//! Integration tests for the huectl binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write a config file into a temp dir. Logging is silenced so stderr only
/// carries real errors.
fn config_file(extra: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, format!("[log]\nlevel = \"off\"\n\n{}", extra)).unwrap();
    (dir, path)
}

fn huectl(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("huectl").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_exits_0_and_describes_tool() {
    Command::cargo_bin("huectl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LED strip"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn run_help_lists_overrides() {
    Command::cargo_bin("huectl")
        .unwrap()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--tick-ms"))
        .stdout(predicate::str::contains("--strip-device"));
}

// ============================================================================
// Resolve Tests
// ============================================================================

#[test]
fn resolve_explicit_triple_prints_color_and_hex() {
    let (_dir, config) = config_file("");
    huectl(&config)
        .args(["resolve", "0, 128,128"])
        .assert()
        .success()
        .stdout("(0, 128, 128) #008080\n");
}

#[test]
fn resolve_out_of_range_fails() {
    let (_dir, config) = config_file("");
    huectl(&config)
        .args(["resolve", "300,0,0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("out of range"));
}

#[cfg(unix)]
#[test]
fn resolve_name_uses_configured_search_command() {
    let (_dir, config) = config_file(
        "[search]\ncommand = [\"echo\", \"Teal hex #008080, rgb 0, 128, 128\"]\ntimeout_secs = 5\n",
    );
    huectl(&config)
        .args(["resolve", "teal"])
        .assert()
        .success()
        .stdout("(0, 128, 128) #008080\n");
}

#[cfg(unix)]
#[test]
fn resolve_name_without_triple_fails() {
    let (_dir, config) = config_file("[search]\ncommand = [\"echo\", \"no idea\"]\n");
    huectl(&config)
        .args(["resolve", "mauve"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no RGB triple found"));
}

#[cfg(unix)]
#[test]
fn resolve_accepts_huge_search_timeout() {
    let (_dir, config) = config_file(
        "[search]\ncommand = [\"echo\", \"rgb 1, 2, 3\"]\ntimeout_secs = 9223372036854775807\n",
    );
    huectl(&config)
        .args(["resolve", "navy"])
        .assert()
        .success()
        .stdout("(1, 2, 3) #010203\n");
}

#[test]
fn resolve_name_without_search_command_fails_as_lookup() {
    let (_dir, config) = config_file("[search]\ncommand = []\n");
    huectl(&config)
        .args(["resolve", "teal"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("color lookup failed"));
}

// ============================================================================
// Interactive Session Tests
// ============================================================================

#[test]
fn run_applies_commands_and_exits_cleanly() {
    let (_dir, config) = config_file("[render]\ntick_ms = 5\n");
    huectl(&config)
        .args(["run", "--no-display"])
        .write_stdin("set to 0,255,0\nset to 1,2,300\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("AI: Set color to RGB: (0, 255, 0)"))
        .stdout(predicate::str::contains("blue channel is 300"))
        .stdout(predicate::str::ends_with("Goodbye!\n"));
}

#[test]
fn run_without_search_command_still_applies_triples() {
    let (_dir, config) = config_file("[search]\ncommand = []\n");
    huectl(&config)
        .args(["run", "--no-display", "--tick-ms", "5"])
        .write_stdin("set to 4,5,6\nmake it teal\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("AI: Set color to RGB: (4, 5, 6)"))
        .stdout(predicate::str::contains("Could not look up 'teal'"));
}

#[test]
fn run_is_the_default_command() {
    let (_dir, config) = config_file("");
    huectl(&config)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn missing_strip_device_is_fatal() {
    let (dir, config) = config_file("");
    let device = dir.path().join("no-such-tty");
    huectl(&config)
        .args(["run", "--strip-device"])
        .arg(&device)
        .write_stdin("exit\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open LED strip"));
}

#[test]
fn strip_device_receives_adalight_frames() {
    let (dir, config) = config_file("[strip]\nled_count = 2\nbrightness = 1.0\nclear_on_exit = true\n");
    let device = dir.path().join("strip.bin");
    fs::write(&device, b"").unwrap();

    huectl(&config)
        .args(["run", "--no-display", "--tick-ms", "5", "--strip-device"])
        .arg(&device)
        .write_stdin("set to 10,20,30\nexit\n")
        .assert()
        .success();

    let bytes = fs::read(&device).unwrap();
    assert!(bytes.starts_with(b"Ada"));
    // Teardown blanks the strip
    assert!(bytes.ends_with(&[0, 0, 0, 0, 0, 0]));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_show_prints_effective_toml() {
    let (_dir, config) = config_file("[render]\ntick_ms = 20\n");
    huectl(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[render]"))
        .stdout(predicate::str::contains("tick_ms = 20"));
}

#[test]
fn invalid_config_file_is_reported() {
    let (_dir, config) = config_file("[render]\ntick_ms = \"fast\"\n");
    huectl(&config)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config"));
}
