//! Configuration module for exio.
//!
//! Handles loading and merging configuration from multiple sources:
//! - CLI arguments (highest priority)
//! - A file given with `--config <PATH>`
//! - User-level `~/.config/exio/config.toml`

pub mod file;
mod types;

pub use file::{generate_example_config, load_config, load_config_layers};
pub use types::{Config, InputConfig, MessagesConfig};
