//! Diagnostic messages on standard error.
//!
//! Every message is written as `<prefix><message>\n`, where the prefix names
//! the severity (`error: `, `warning: `, `info: `). Prefixes can be coloured
//! with ANSI escapes; the message body never is.

use std::env;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use crossterm::style::{StyledContent, Stylize};
use serde::{Deserialize, Serialize};

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something failed.
    Error,
    /// Something looks wrong but execution continues.
    Warning,
    /// Plain information.
    Info,
}

impl Severity {
    /// The plain-text prefix for this severity.
    pub fn prefix(self) -> &'static str {
        match self {
            Severity::Error => "error: ",
            Severity::Warning => "warning: ",
            Severity::Info => "info: ",
        }
    }

    /// The prefix in bold red, yellow or blue.
    fn styled_prefix(self) -> StyledContent<&'static str> {
        let prefix = self.prefix();
        match self {
            Severity::Error => prefix.red().bold(),
            Severity::Warning => prefix.yellow().bold(),
            Severity::Info => prefix.blue().bold(),
        }
    }
}

/// When to colour message prefixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourMode {
    /// Colour when stderr is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

impl ColourMode {
    /// Resolve the mode against the current stderr and environment.
    pub fn enabled(self) -> bool {
        match self {
            ColourMode::Always => true,
            ColourMode::Never => false,
            ColourMode::Auto => env::var_os("NO_COLOR").is_none() && io::stderr().is_terminal(),
        }
    }
}

/// Write one message to `out`.
///
/// # Errors
///
/// Returns the first write error. Nothing is retried.
pub fn write_message<W: Write>(
    out: &mut W,
    severity: Severity,
    colour: bool,
    message: impl Display,
) -> io::Result<()> {
    if colour {
        write!(out, "{}", severity.styled_prefix())?;
    } else {
        out.write_all(severity.prefix().as_bytes())?;
    }
    writeln!(out, "{message}")?;
    out.flush()
}

/// Diagnostics writer bound to a colour choice.
///
/// The free functions [`err`], [`warn`] and [`info`] use [`ColourMode::Auto`];
/// this type lets a program apply its configured mode instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    colour: bool,
}

impl Diagnostics {
    /// Create a writer for the given colour mode.
    pub fn new(mode: ColourMode) -> Self {
        Self {
            colour: mode.enabled(),
        }
    }

    /// Whether prefixes are coloured.
    pub fn colour(&self) -> bool {
        self.colour
    }

    /// Write a message with the given severity to stderr.
    ///
    /// Returns `true` if every write succeeded.
    pub fn emit(&self, severity: Severity, message: impl Display) -> bool {
        let mut stderr = io::stderr().lock();
        write_message(&mut stderr, severity, self.colour, message).is_ok()
    }

    /// Write an error message.
    pub fn err(&self, message: impl Display) -> bool {
        self.emit(Severity::Error, message)
    }

    /// Write a warning message.
    pub fn warn(&self, message: impl Display) -> bool {
        self.emit(Severity::Warning, message)
    }

    /// Write an informational message.
    pub fn info(&self, message: impl Display) -> bool {
        self.emit(Severity::Info, message)
    }
}

/// Write `error: <message>` to stderr. Returns `true` on success.
pub fn err(message: impl Display) -> bool {
    Diagnostics::new(ColourMode::Auto).err(message)
}

/// Write `warning: <message>` to stderr. Returns `true` on success.
pub fn warn(message: impl Display) -> bool {
    Diagnostics::new(ColourMode::Auto).warn(message)
}

/// Write `info: <message>` to stderr. Returns `true` on success.
pub fn info(message: impl Display) -> bool {
    Diagnostics::new(ColourMode::Auto).info(message)
}
