//! exio - extended IO for command-line programs
//!
//! Small process-level utilities that most command-line programs end up
//! writing themselves, done carefully once.
//!
//! # Features
//!
//! - **Diagnostics**: `error:`/`warning:`/`info:` messages on stderr
//! - **Confirmation**: strict `y`/`n` prompts
//! - **Secure input**: line reads with terminal echo disabled, restored on every path
//! - **Paths**: XDG-style application paths, `mkdir -p`, file size by descriptor
//! - **Signals**: fatal-signal handler installation with whole-group masking
//!
//! POSIX only.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface of the `exio` binary
//! - [`config`] - Configuration file loading and types
//! - [`confirm`] - Yes/no prompts
//! - [`error`] - Error types and result helpers
//! - [`input`] - Secure line input
//! - [`message`] - Diagnostic messages
//! - [`paths`] - Application paths, directory creation, file sizes
//! - [`signals`] - Fatal-signal handlers
//!
//! # Example
//!
//! ```no_run
//! use std::ffi::c_int;
//!
//! use exio::input::{read_line, InputMode};
//! use exio::signals::{install_termination_handlers, reset_and_raise};
//!
//! extern "C" fn on_fatal(signo: c_int) {
//!     // Only async-signal-safe work here
//!     if let Ok(signal) = nix::sys::signal::Signal::try_from(signo) {
//!         let _ = reset_and_raise(signal);
//!     }
//! }
//!
//! let report = install_termination_handlers(on_fatal);
//! if !report.is_complete() {
//!     exio::message::warn(format_args!("{} signals not covered", report.failed.len()));
//! }
//!
//! let password = read_line("Password: ", InputMode::Hide)?;
//! println!("read {} bytes", password.len());
//! # Ok::<(), exio::ExioError>(())
//! ```

/// CLI argument definitions.
pub mod cli;

/// Configuration system for loading and merging settings.
pub mod config;

/// Yes/no confirmation prompts.
pub mod confirm;

/// Error types and result helpers.
pub mod error;

/// Secure line input.
pub mod input;

/// Diagnostic messages.
pub mod message;

/// Application paths, directory creation and file sizes.
pub mod paths;

/// Fatal-signal handlers.
pub mod signals;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Config;
pub use confirm::confirm;
pub use error::{ExioError, Result};
pub use input::{read_line, InputMode, UserLine};
pub use message::{err, info, warn};
pub use paths::{fsize, mkpath, xdg_path};
pub use signals::{install_segfault_handler, install_termination_handlers, reset_handler};
