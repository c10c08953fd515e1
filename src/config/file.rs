//! Configuration file loading and parsing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;
use crate::message;

/// Load configuration from the specified path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Load configuration with proper priority and merging.
///
/// Searches for config files in order of priority (lowest to highest):
/// 1. `~/.config/exio/config.toml` (user-level, lowest priority)
/// 2. CLI argument `--config <path>` (highest priority)
///
/// # Errors
///
/// Returns an error if the file given on the command line cannot be read or
/// parsed. Problems with the user-level file only produce a warning.
pub fn load_config(cli_config_path: Option<&Path>) -> Result<Config> {
    let user_config_path = Config::user_config_path();
    load_config_layers(user_config_path.as_deref(), cli_config_path)
}

/// Load and merge the user-level and CLI-specified config files.
///
/// A missing user-level file is not an error.
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_layers(user_path: Option<&Path>, cli_path: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(user_path) = user_path.filter(|p| p.exists()) {
        match load_config_from_path(user_path) {
            Ok(user_config) => config.merge(user_config),
            Err(e) => {
                // Broken user config falls back to defaults
                message::warn(format_args!(
                    "Failed to load user config at {}: {:#}",
                    user_path.display(),
                    e
                ));
            }
        }
    }

    if let Some(cli_path) = cli_path {
        let cli_config = load_config_from_path(cli_path).with_context(|| {
            format!(
                "Failed to load config from CLI-specified path: {}",
                cli_path.display()
            )
        })?;
        config.merge(cli_config);
    }

    Ok(config)
}

/// Generate an example configuration file with all options documented.
pub fn generate_example_config() -> String {
    r#"# exio Configuration File
# Place this file at ~/.config/exio/config.toml

[messages]
# Colour the "error:", "warning:" and "info:" prefixes
# Options: "auto", "always", "never"
colour = "auto"

[input]
# Hide typed characters in `exio read-line` unless --show is given
hide = false
"#
    .to_string()
}
