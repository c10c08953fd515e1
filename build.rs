//! Build script for exio.
//!
//! Generates man pages using clap_mangen.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

/// Minimal CLI struct for man page generation.
///
/// This duplicates the CLI definition to avoid build dependency issues.
#[derive(Parser)]
#[command(name = "exio")]
#[command(author, version, about)]
#[command(
    long_about = "exio exposes the exio library from the shell: diagnostic messages, \
    y/n confirmation, line input with terminal echo disabled, XDG-style paths, \
    mkdir -p, file sizes and fatal-signal handling.\n\n\
    Use `exio read-line --hide` to read a password without echoing it."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Colour message prefixes
    #[arg(long, value_name = "WHEN", value_enum, global = true)]
    colour: Option<Colour>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    no_config: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a diagnostic message to stderr
    Message {
        /// Message severity
        #[arg(value_enum)]
        severity: Severity,
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
    ReadLine {
        /// Prompt written to stderr before reading
        #[arg(short, long, default_value = "")]
        prompt: String,
        /// Disable terminal echo while reading
        #[arg(long, conflicts_with = "show")]
        hide: bool,
        /// Keep terminal echo on even if the config says otherwise
        #[arg(long)]
        show: bool,
        /// Print the length of the line instead of its content
        #[arg(short, long)]
        length: bool,
    },
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

#[derive(Clone, Copy, ValueEnum)]
enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum Colour {
    /// Colour when stderr is a terminal.
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shell {
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

fn main() {
    // Only generate man pages for release builds or when explicitly requested
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile != "release" && env::var("EXIO_GEN_MANPAGE").is_err() {
        return;
    }

    let out_dir = match env::var_os("OUT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => return,
    };

    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);

    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to generate man page");

    // Write to the build output directory
    let man_path = out_dir.join("exio.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    // Also copy to docs directory for distribution
    if let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") {
        let docs_dir = PathBuf::from(manifest_dir).join("docs");
        if docs_dir.exists() {
            let _ = fs::copy(&man_path, docs_dir.join("exio.1"));
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}
