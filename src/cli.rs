//! CLI argument definitions for exio.
//!
//! Uses clap with derive macros for argument parsing.
//!
//! # Example
//!
//! ```no_run
//! use exio::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! println!("Command: {:?}", cli.command);
//! ```

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::input::InputMode;
use crate::message::{ColourMode, Severity};

/// Process-level IO helpers for shell scripts and testing.
#[derive(Parser, Debug)]
#[command(name = "exio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Colour message prefixes
    #[arg(long, value_name = "WHEN", value_enum, global = true)]
    pub colour: Option<CliColour>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<CliShell>,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a diagnostic message to stderr
    Message {
        /// Message severity
        #[arg(value_enum)]
        severity: CliSeverity,
        /// Message text
        text: String,
    },

    /// Ask a y/n question; exit 0 on yes, 1 on no
    Confirm {
        /// Prompt to display
        #[arg(default_value = "Continue? [y/n] ")]
        prompt: String,
    },

    /// Read one line and print it to stdout
    ReadLine(ReadLineArgs),

    /// Print a standard application path
    XdgPath {
        /// Application-specific path inside the standard directory
        sub_path: String,
        /// Environment variable naming the standard directory
        #[arg(long = "var", value_name = "NAME", default_value = "XDG_DATA_HOME")]
        xdg_var: String,
        /// Directory under $HOME used when the variable is unset
        #[arg(long, value_name = "DIR", default_value = ".local/share")]
        fallback: String,
        /// Also create the directory
        #[arg(long)]
        create: bool,
    },

    /// Create a directory and its parents
    Mkpath {
        /// Absolute path to create
        path: PathBuf,
    },

    /// Print the size of a file in bytes
    Fsize {
        /// File to measure
        file: PathBuf,
    },

    /// List the fatal signal catalogs and their current dispositions
    Signals,

    /// Install termination handlers and raise a signal to exercise them
    Guard {
        /// Signal to raise, e.g. TERM or SIGUSR1
        #[arg(long, value_name = "SIGNAL", default_value = "TERM")]
        raise: String,
    },
}

/// Arguments of `exio read-line`.
#[derive(Args, Debug, Clone)]
pub struct ReadLineArgs {
    /// Prompt written to stderr before reading
    #[arg(short, long, default_value = "")]
    pub prompt: String,

    /// Disable terminal echo while reading
    #[arg(long, conflicts_with = "show")]
    pub hide: bool,

    /// Keep terminal echo on even if the config says otherwise
    #[arg(long)]
    pub show: bool,

    /// Print the length of the line instead of its content
    #[arg(short, long)]
    pub length: bool,
}

impl ReadLineArgs {
    /// Input mode from the flags, if one was given.
    pub fn mode(&self) -> Option<InputMode> {
        if self.hide {
            Some(InputMode::Hide)
        } else if self.show {
            Some(InputMode::Show)
        } else {
            None
        }
    }
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliShell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    Powershell,
    /// Elvish shell
    Elvish,
}

/// Colour mode for CLI parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliColour {
    /// Colour when stderr is a terminal.
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

impl From<CliColour> for ColourMode {
    fn from(colour: CliColour) -> Self {
        match colour {
            CliColour::Auto => ColourMode::Auto,
            CliColour::Always => ColourMode::Always,
            CliColour::Never => ColourMode::Never,
        }
    }
}

/// Message severity for CLI parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliSeverity {
    Error,
    Warning,
    Info,
}

impl From<CliSeverity> for Severity {
    fn from(severity: CliSeverity) -> Self {
        match severity {
            CliSeverity::Error => Severity::Error,
            CliSeverity::Warning => Severity::Warning,
            CliSeverity::Info => Severity::Info,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the colour override.
    pub fn colour_override(&self) -> Option<ColourMode> {
        self.colour.map(Into::into)
    }

    /// Generate shell completions and write to stdout.
    pub fn generate_completions(shell: CliShell) {
        let mut cmd = Cli::command();
        let shell = match shell {
            CliShell::Bash => Shell::Bash,
            CliShell::Zsh => Shell::Zsh,
            CliShell::Fish => Shell::Fish,
            CliShell::Powershell => Shell::PowerShell,
            CliShell::Elvish => Shell::Elvish,
        };
        generate(shell, &mut cmd, "exio", &mut std::io::stdout());
    }
}
