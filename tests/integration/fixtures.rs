//! Test fixtures shared by the integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// Get a Command for the exio binary, isolated from the user's config.
///
/// `XDG_CONFIG_HOME` points into `home` so no real config file is picked up.
pub fn exio(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("exio");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("NO_COLOR");
    cmd
}

/// Create an empty home directory.
pub fn create_home() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Write `content` as the user-level config file inside `home`.
pub fn write_user_config(home: &TempDir, content: &str) -> PathBuf {
    let dir = home.path().join(".config").join("exio");
    fs::create_dir_all(&dir).expect("Failed to create config dir");
    let path = dir.join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

/// Write `content` to a config file outside the config directory.
pub fn write_config_file(home: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = home.path().join(name);
    fs::write(&path, content).expect("Failed to write config");
    path
}
