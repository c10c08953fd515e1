//! CLI integration tests for exio.
//!
//! These tests verify the command-line interface behavior using assert_cmd.

use std::fs;
use std::os::unix::process::ExitStatusExt;

use predicates::prelude::*;

use crate::integration::fixtures::{create_home, exio, write_config_file, write_user_config};

// ==================== Help and Version ====================

#[test]
fn test_help_output() {
    let home = create_home();
    exio(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("read-line"))
        .stdout(predicate::str::contains("xdg-path"))
        .stdout(predicate::str::contains("signals"));
}

#[test]
fn test_version_output() {
    let home = create_home();
    exio(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("exio"))
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

#[test]
fn test_subcommand_defaults_in_help() {
    let home = create_home();
    exio(&home)
        .args(["confirm", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Continue? [y/n]"));

    exio(&home)
        .args(["guard", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--raise <SIGNAL>"))
        .stdout(predicate::str::contains("[default: TERM]"));

    exio(&home)
        .args(["xdg-path", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--var <NAME>"))
        .stdout(predicate::str::contains("[default: XDG_DATA_HOME]"))
        .stdout(predicate::str::contains("--fallback <DIR>"));
}

#[test]
fn test_no_command_prints_help() {
    let home = create_home();
    exio(&home)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_completions_bash() {
    let home = create_home();
    exio(&home)
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exio"));
}

#[test]
fn test_unknown_subcommand() {
    let home = create_home();
    exio(&home).arg("frobnicate").assert().failure().code(2);
}

// ==================== Messages ====================

#[test]
fn test_message_error() {
    let home = create_home();
    exio(&home)
        .args(["--colour", "never", "message", "error", "disk full"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr("error: disk full\n");
}

#[test]
fn test_message_warning_and_info() {
    let home = create_home();
    exio(&home)
        .args(["message", "warning", "low space", "--colour", "never"])
        .assert()
        .success()
        .stderr("warning: low space\n");

    exio(&home)
        .args(["message", "info", "done", "--colour", "never"])
        .assert()
        .success()
        .stderr("info: done\n");
}

#[test]
fn test_message_auto_colour_is_plain_when_piped() {
    let home = create_home();
    exio(&home)
        .args(["message", "error", "boom"])
        .assert()
        .success()
        .stderr("error: boom\n");
}

#[test]
fn test_message_colour_always() {
    let home = create_home();
    exio(&home)
        .args(["--colour", "always", "message", "error", "boom"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\x1b["))
        .stderr(predicate::str::ends_with("boom\n"));
}

// ==================== Confirm ====================

#[test]
fn test_confirm_yes() {
    let home = create_home();
    exio(&home)
        .args(["confirm", "Delete? "])
        .write_stdin("y\n")
        .assert()
        .success()
        .stderr("Delete? ");
}

#[test]
fn test_confirm_no() {
    let home = create_home();
    exio(&home)
        .arg("confirm")
        .write_stdin("n\n")
        .assert()
        .code(1);
}

#[test]
fn test_confirm_reprompts_until_valid() {
    let home = create_home();
    exio(&home)
        .args(["confirm", "ok? "])
        .write_stdin("yes\nY\n\ny\n")
        .assert()
        .success()
        .stderr("ok? ok? ok? ok? ");
}

#[test]
fn test_confirm_eof_is_no() {
    let home = create_home();
    exio(&home)
        .arg("confirm")
        .write_stdin("")
        .assert()
        .code(1);
}

// ==================== Read Line ====================

#[test]
fn test_read_line_prints_line() {
    let home = create_home();
    exio(&home)
        .args(["read-line", "--prompt", "Name: "])
        .write_stdin("alice\nignored\n")
        .assert()
        .success()
        .stdout("alice\n")
        .stderr("Name: ");
}

#[test]
fn test_read_line_length() {
    let home = create_home();
    exio(&home)
        .args(["read-line", "--length"])
        .write_stdin("hunter2\n")
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn test_read_line_empty_line() {
    let home = create_home();
    exio(&home)
        .args(["read-line", "-l"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_read_line_eof() {
    let home = create_home();
    exio(&home)
        .arg("read-line")
        .write_stdin("")
        .assert()
        .code(6)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("End of input"));
}

#[test]
fn test_read_line_without_terminator_fails() {
    let home = create_home();
    exio(&home)
        .arg("read-line")
        .write_stdin("partial")
        .assert()
        .code(6)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_read_line_hide_requires_terminal() {
    let home = create_home();
    exio(&home)
        .args(["read-line", "--hide"])
        .write_stdin("secret\n")
        .assert()
        .code(7)
        .stdout(predicate::str::contains("secret").not())
        .stderr(predicate::str::contains("Tip:"));
}

#[test]
fn test_read_line_hide_from_config() {
    let home = create_home();
    write_user_config(&home, "[input]\nhide = true\n");

    exio(&home)
        .arg("read-line")
        .write_stdin("secret\n")
        .assert()
        .code(7);

    // --show wins over the config file
    exio(&home)
        .args(["read-line", "--show"])
        .write_stdin("secret\n")
        .assert()
        .success()
        .stdout("secret\n");
}

// ==================== Paths ====================

#[test]
fn test_xdg_path_from_variable() {
    let home = create_home();
    let data = home.path().join("data");
    exio(&home)
        .args(["xdg-path", "myapp/history"])
        .env("XDG_DATA_HOME", &data)
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}/myapp/history\n", data.display())));
}

#[test]
fn test_xdg_path_home_fallback() {
    let home = create_home();
    exio(&home)
        .args(["xdg-path", "myapp", "--var", "XDG_STATE_HOME"])
        .args(["--fallback", ".local/state"])
        .env_remove("XDG_STATE_HOME")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}/.local/state/myapp\n", home.path().display())));
}

#[test]
fn test_xdg_path_relative_variable_falls_back() {
    let home = create_home();
    exio(&home)
        .args(["xdg-path", "myapp"])
        .env("XDG_DATA_HOME", "relative/dir")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}/.local/share/myapp\n", home.path().display())));
}

#[test]
fn test_xdg_path_missing_environment() {
    let home = create_home();
    exio(&home)
        .args(["xdg-path", "myapp"])
        .env_remove("XDG_DATA_HOME")
        .env_remove("HOME")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("XDG_DATA_HOME"));
}

#[test]
fn test_xdg_path_too_long() {
    let home = create_home();
    let long = "a/".repeat(4096);
    exio(&home)
        .args(["xdg-path", &long])
        .env("XDG_DATA_HOME", "/data")
        .assert()
        .code(4);
}

#[test]
fn test_xdg_path_create() {
    let home = create_home();
    let data = home.path().join("data");
    exio(&home)
        .args(["xdg-path", "myapp/cache", "--create"])
        .env("XDG_DATA_HOME", &data)
        .assert()
        .success();

    assert!(data.join("myapp/cache").is_dir());
}

#[test]
fn test_mkpath_creates_parents() {
    let home = create_home();
    let target = home.path().join("a/b/c");
    exio(&home).arg("mkpath").arg(&target).assert().success();
    assert!(target.is_dir());

    // Existing directories are fine
    exio(&home).arg("mkpath").arg(&target).assert().success();
}

#[test]
fn test_mkpath_relative_is_resolved_against_cwd() {
    let home = create_home();
    exio(&home)
        .args(["mkpath", "rel/dir"])
        .current_dir(home.path())
        .assert()
        .success();
    assert!(home.path().join("rel/dir").is_dir());
}

#[test]
fn test_mkpath_through_file_fails() {
    let home = create_home();
    let file = home.path().join("file");
    fs::write(&file, "x").unwrap();

    exio(&home)
        .arg("mkpath")
        .arg(file.join("sub"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("create directory"));
}

#[test]
fn test_fsize() {
    let home = create_home();
    let file = home.path().join("data.bin");
    fs::write(&file, vec![0u8; 1234]).unwrap();

    exio(&home)
        .arg("fsize")
        .arg(&file)
        .assert()
        .success()
        .stdout("1234\n");
}

#[test]
fn test_fsize_missing_file() {
    let home = create_home();
    exio(&home)
        .args(["fsize", "/nonexistent/exio-test-file"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open"));
}

// ==================== Signals ====================

#[test]
fn test_signals_lists_catalogs() {
    let home = create_home();
    exio(&home)
        .arg("signals")
        .assert()
        .success()
        .stdout(predicate::str::contains("segfault:"))
        .stdout(predicate::str::contains("termination:"))
        .stdout(predicate::str::is_match(r"(?m)^  SIGSEGV\s+\S+$").unwrap())
        .stdout(predicate::str::is_match(r"(?m)^  SIGTERM\s+default$").unwrap())
        // The Rust runtime ignores SIGPIPE
        .stdout(predicate::str::is_match(r"(?m)^  SIGPIPE\s+ignore$").unwrap());
}

#[test]
fn test_guard_reraises_with_default_action() {
    let home = create_home();
    let output = exio(&home)
        .args(["guard", "--raise", "TERM"])
        .output()
        .unwrap();

    assert_eq!(output.status.signal(), Some(libc::SIGTERM));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exio: caught SIGTERM"), "stderr: {stderr}");
}

#[test]
fn test_guard_user_signal() {
    let home = create_home();
    let output = exio(&home)
        .args(["guard", "--raise", "usr1"])
        .output()
        .unwrap();

    assert_eq!(output.status.signal(), Some(libc::SIGUSR1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("exio: caught SIGUSR1"));
}

#[test]
fn test_guard_ignored_signal_survives() {
    let home = create_home();
    exio(&home)
        .args(["--colour", "never", "guard", "--raise", "PIPE"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("warning: SIGPIPE is ignored"))
        .stderr(predicate::str::contains("exio: caught").not());
}

#[test]
fn test_guard_unknown_signal() {
    let home = create_home();
    exio(&home)
        .args(["guard", "--raise", "NOPE"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown signal 'NOPE'"));
}

// ==================== Config and Debug ====================

#[test]
fn test_invalid_cli_config() {
    let home = create_home();
    let path = write_config_file(&home, "bad.toml", "[messages\ncolour = ");
    exio(&home)
        .arg("--config")
        .arg(&path)
        .args(["message", "info", "hi"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_missing_cli_config() {
    let home = create_home();
    exio(&home)
        .args(["--config", "/nonexistent/exio.toml", "message", "info", "hi"])
        .assert()
        .code(2);
}

#[test]
fn test_broken_user_config_only_warns() {
    let home = create_home();
    write_user_config(&home, "not = [valid");
    exio(&home)
        .args(["--colour", "never", "message", "info", "hi"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: Failed to load user config"))
        .stderr(predicate::str::contains("info: hi"));
}

#[test]
fn test_config_colour_always() {
    let home = create_home();
    let path = write_config_file(&home, "colour.toml", "[messages]\ncolour = \"always\"\n");
    exio(&home)
        .arg("--config")
        .arg(&path)
        .args(["message", "info", "hi"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\x1b["));

    // CLI flag wins over the file
    exio(&home)
        .arg("--config")
        .arg(&path)
        .args(["--colour", "never", "message", "info", "hi"])
        .assert()
        .success()
        .stderr("info: hi\n");
}

#[test]
fn test_no_config_skips_files() {
    let home = create_home();
    write_user_config(&home, "[input]\nhide = true\n");
    exio(&home)
        .args(["--no-config", "read-line"])
        .write_stdin("visible\n")
        .assert()
        .success()
        .stdout("visible\n");
}

#[test]
fn test_debug_output() {
    let home = create_home();
    exio(&home)
        .args(["--debug", "--colour", "never", "message", "info", "hi"])
        .assert()
        .success()
        .stderr(predicate::str::contains("=== exio debug mode ==="))
        .stderr(predicate::str::contains("Debug: Effective config"));
}

#[test]
fn test_signals_output_format() {
    let home = create_home();
    let output = exio(&home).arg("signals").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let entry = regex::Regex::new(r"^  (SIG[A-Z0-9]+)\s+(default|ignore|handler)$").unwrap();

    let mut names = Vec::new();
    for line in stdout.lines().filter(|l| !l.ends_with(':')) {
        let caps = entry
            .captures(line)
            .unwrap_or_else(|| panic!("unexpected line: {line:?}"));
        names.push(caps[1].to_string());
    }

    assert_eq!(
        names.len(),
        exio::signals::SEGFAULT_SIGNALS.len() + exio::signals::TERMINATION_SIGNALS.len()
    );
    assert_eq!(names[0], "SIGSEGV");
}
