//! Configuration type definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::input::InputMode;
use crate::message::ColourMode;

/// Diagnostic message settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// When to colour message prefixes.
    #[serde(default)]
    pub colour: Option<ColourMode>,
}

/// Line input settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Hide input by default in `exio read-line`.
    #[serde(default)]
    pub hide: Option<bool>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Message settings.
    #[serde(default)]
    pub messages: MessagesConfig,
    /// Input settings.
    #[serde(default)]
    pub input: InputConfig,
}

impl Config {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the config file path for the user's home directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("exio").join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for set values).
    pub fn merge(&mut self, other: Config) {
        if other.messages.colour.is_some() {
            self.messages.colour = other.messages.colour;
        }
        if other.input.hide.is_some() {
            self.input.hide = other.input.hide;
        }
    }

    /// The effective colour mode.
    pub fn colour(&self) -> ColourMode {
        self.messages.colour.unwrap_or_default()
    }

    /// The effective default input mode.
    pub fn input_mode(&self) -> InputMode {
        match self.input.hide {
            Some(true) => InputMode::Hide,
            _ => InputMode::Show,
        }
    }
}
