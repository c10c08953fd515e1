//! Custom error types for exio.
//!
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use nix::errno::Errno;
use nix::sys::signal::Signal;
use thiserror::Error;

/// Exit codes for the exio binary.
pub mod exit_code {
    /// Success.
    pub const SUCCESS: i32 = 0;
    /// General error.
    pub const GENERAL_ERROR: i32 = 1;
    /// The user answered "no" to a confirmation prompt.
    pub const DENIED: i32 = 1;
    /// Invalid configuration.
    pub const INVALID_CONFIG: i32 = 2;
    /// Required environment variables are missing.
    pub const ENVIRONMENT: i32 = 3;
    /// A composed path exceeds the platform limit.
    pub const PATH_TOO_LONG: i32 = 4;
    /// A signal disposition could not be changed.
    pub const SIGNAL: i32 = 5;
    /// Input ended before a full line was read.
    pub const END_OF_INPUT: i32 = 6;
    /// Standard input is not a terminal supporting termios.
    pub const TERMINAL_UNSUPPORTED: i32 = 7;
}

/// Main error type for exio.
#[derive(Error, Debug)]
pub enum ExioError {
    /// Input ended before a line terminator was read.
    ///
    /// `partial` is set when some bytes were read before the end of input.
    #[error("End of input reached{}", partial_suffix(.partial))]
    EndOfInput { partial: bool },

    /// The terminal does not support the termios interface, or access was denied.
    #[error("Terminal does not support hiding input: {0}\n\nTip: Run from an interactive terminal or read with echo enabled.")]
    TerminalUnsupported(#[source] Errno),

    /// Neither the XDG variable nor HOME is set.
    #[error("Environment variable {var} is not set and HOME is not set either")]
    MissingEnvironment { var: String },

    /// A composed path would exceed the platform path limit.
    #[error("Path of {len} bytes exceeds the platform limit of {max} bytes")]
    PathTooLong { len: usize, max: usize },

    /// A path that must be absolute was relative.
    #[error("Path '{path}' is not absolute")]
    NotAbsolute { path: PathBuf },

    /// Changing a signal disposition was rejected by the OS.
    #[error("Failed to change the disposition of {signal}: {source}")]
    Signal {
        signal: Signal,
        #[source]
        source: Errno,
    },

    /// IO error with path context.
    #[error("Failed to {operation} '{path}': {source}")]
    IoWithContext {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExioError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExioError::EndOfInput { .. } => exit_code::END_OF_INPUT,
            ExioError::TerminalUnsupported(_) => exit_code::TERMINAL_UNSUPPORTED,
            ExioError::MissingEnvironment { .. } => exit_code::ENVIRONMENT,
            ExioError::PathTooLong { .. } => exit_code::PATH_TOO_LONG,
            ExioError::NotAbsolute { .. } => exit_code::GENERAL_ERROR,
            ExioError::Signal { .. } => exit_code::SIGNAL,
            ExioError::IoWithContext { .. } => exit_code::GENERAL_ERROR,
            ExioError::Io(_) => exit_code::GENERAL_ERROR,
        }
    }

    /// Whether this error marks the end of input rather than a failure.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ExioError::EndOfInput { .. })
    }
}

impl From<Errno> for ExioError {
    fn from(errno: Errno) -> Self {
        ExioError::Io(errno.into())
    }
}

fn partial_suffix(partial: &bool) -> &'static str {
    if *partial {
        " before the end of the line"
    } else {
        ""
    }
}

/// Result type alias for exio operations.
pub type Result<T> = std::result::Result<T, ExioError>;
