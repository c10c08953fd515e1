//! exio - extended IO
//!
//! Entry point for the exio CLI application.

use std::ffi::c_int;
use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::CommandFactory;
use nix::sys::signal::{self, Signal};

use exio::cli::{Cli, Command, ReadLineArgs};
use exio::config::{load_config, Config};
use exio::confirm::confirm;
use exio::error::{exit_code, ExioError};
use exio::input::read_line;
use exio::message::{ColourMode, Diagnostics};
use exio::paths::{fsize, mkpath, xdg_path};
use exio::signals::{
    disposition, install_termination_handlers, parse_signal, reset_and_raise, Disposition,
    SEGFAULT_SIGNALS, TERMINATION_SIGNALS,
};

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            let diag = Diagnostics::new(ColourMode::Auto);
            if err.downcast_ref::<ConfigFailure>().is_some() {
                diag.err(format_args!("{err:#}"));
                return ExitCode::from(exit_code::INVALID_CONFIG as u8);
            }
            // Check if it's one of our custom errors with good formatting
            if let Some(exio_err) = err.downcast_ref::<ExioError>() {
                diag.err(exio_err);
                return ExitCode::from(exio_err.exit_code() as u8);
            }
            diag.err(format_args!("{err:#}"));
            ExitCode::from(exit_code::GENERAL_ERROR as u8)
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    // Handle shell completions early
    if let Some(shell) = cli.completions {
        Cli::generate_completions(shell);
        return Ok(exit_code::SUCCESS);
    }

    if cli.debug {
        print_debug_header();
        eprintln!("Debug: CLI arguments = {cli:#?}");
    }

    let mut config = if cli.no_config {
        Config::default()
    } else {
        load_config(cli.config.as_deref()).context(ConfigFailure)?
    };
    if let Some(colour) = cli.colour_override() {
        config.messages.colour = Some(colour);
    }

    if cli.debug {
        print_debug_config(&config);
    }

    let diag = Diagnostics::new(config.colour());

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(exit_code::GENERAL_ERROR);
    };

    match command {
        Command::Message { severity, text } => {
            if diag.emit(severity.into(), &text) {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::GENERAL_ERROR)
            }
        }
        Command::Confirm { prompt } => {
            let yes = confirm(&prompt).context("Failed to read confirmation")?;
            Ok(if yes {
                exit_code::SUCCESS
            } else {
                exit_code::DENIED
            })
        }
        Command::ReadLine(args) => read_line_command(&args, &config),
        Command::XdgPath {
            sub_path,
            xdg_var,
            fallback,
            create,
        } => {
            let path = xdg_path(&sub_path, &xdg_var, &fallback)?;
            if create {
                mkpath(&path)?;
            }
            println!("{}", path.display());
            Ok(exit_code::SUCCESS)
        }
        Command::Mkpath { path } => {
            let path = if path.is_absolute() {
                path
            } else {
                std::env::current_dir()
                    .context("Failed to get current directory")?
                    .join(path)
            };
            mkpath(&path)?;
            Ok(exit_code::SUCCESS)
        }
        Command::Fsize { file } => {
            let handle = File::open(&file).map_err(|source| ExioError::IoWithContext {
                operation: "open".to_string(),
                path: file.clone(),
                source,
            })?;
            println!("{}", fsize(&handle)?);
            Ok(exit_code::SUCCESS)
        }
        Command::Signals => list_signals(),
        Command::Guard { raise } => guard(&raise, &diag, cli.debug),
    }
}

/// Marker attached to configuration errors so they map to their exit code.
#[derive(Debug)]
struct ConfigFailure;

impl std::fmt::Display for ConfigFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Invalid configuration")
    }
}

/// Read a line and echo it (or its length) to stdout.
fn read_line_command(args: &ReadLineArgs, config: &Config) -> Result<i32> {
    let mode = args.mode().unwrap_or_else(|| config.input_mode());
    let line = read_line(&args.prompt, mode)?;

    let mut stdout = io::stdout().lock();
    if args.length {
        writeln!(stdout, "{}", line.len())?;
    } else {
        stdout.write_all(line.as_bytes())?;
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;

    Ok(exit_code::SUCCESS)
}

/// Print both catalogs with their current dispositions.
fn list_signals() -> Result<i32> {
    let mut stdout = io::stdout().lock();

    for (title, catalog) in [
        ("segfault", SEGFAULT_SIGNALS),
        ("termination", TERMINATION_SIGNALS),
    ] {
        writeln!(stdout, "{title}:")?;
        for &sig in catalog {
            let state = disposition(sig)
                .map(|d| d.to_string())
                .unwrap_or_else(|errno| format!("unknown ({errno})"));
            writeln!(stdout, "  {:<10} {}", sig.as_str(), state)?;
        }
    }

    Ok(exit_code::SUCCESS)
}

/// Install the reporting handler and raise `name` at ourselves.
fn guard(name: &str, diag: &Diagnostics, debug: bool) -> Result<i32> {
    let sig = parse_signal(name).with_context(|| format!("Unknown signal '{name}'"))?;

    let report = install_termination_handlers(report_and_reraise);
    if debug {
        eprintln!("Debug: installed = {:?}", report.installed);
        eprintln!("Debug: skipped (ignored) = {:?}", report.skipped_ignored);
        eprintln!("Debug: failed = {:?}", report.failed);
    }
    for (failed, errno) in &report.failed {
        diag.warn(format_args!("no handler for {failed}: {errno}"));
    }

    if disposition(sig)? == Disposition::Ignore {
        diag.warn(format_args!("{sig} is ignored by this process"));
    }

    signal::raise(sig).map_err(|source| ExioError::Signal { signal: sig, source })?;

    // Reached only if the signal did not end the process
    diag.info(format_args!("{sig} did not terminate the process"));
    Ok(exit_code::GENERAL_ERROR)
}

/// Report the signal on stderr, then let the default action happen.
extern "C" fn report_and_reraise(signo: c_int) {
    const PREFIX: &[u8] = b"exio: caught ";

    let sig = Signal::try_from(signo).ok();
    let name = sig.map(Signal::as_str).unwrap_or("unknown signal");

    // SAFETY: write(2) is async-signal-safe and the buffers are static.
    unsafe {
        libc::write(libc::STDERR_FILENO, PREFIX.as_ptr().cast(), PREFIX.len());
        libc::write(libc::STDERR_FILENO, name.as_ptr().cast(), name.len());
        libc::write(libc::STDERR_FILENO, b"\n".as_ptr().cast(), 1);
    }

    if let Some(sig) = sig {
        let _ = reset_and_raise(sig);
    }
}

// ==================== Debug Functions ====================

/// Print debug header with version info.
fn print_debug_header() {
    eprintln!("=== exio debug mode ===");
    eprintln!("Version: {}", env!("CARGO_PKG_VERSION"));
    eprintln!();
}

/// Print debug information about configuration.
fn print_debug_config(config: &Config) {
    eprintln!("Debug: File locations:");

    if let Some(cfg) = Config::user_config_path() {
        let exists = cfg.exists();
        eprintln!("  User config: {} (exists: {})", cfg.display(), exists);
    } else {
        eprintln!("  User config: <not available>");
    }

    eprintln!("Debug: Effective config = {config:?}");
    eprintln!();
}
