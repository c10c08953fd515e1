//! Secure line input.
//!
//! Reads one line from the user, optionally with terminal echo disabled so
//! that passwords and other secrets are not displayed.
//!
//! # Process-wide state
//!
//! Hidden reads mutate the termios attributes of the terminal behind stdin
//! (the `ECHO` local flag) and restore the captured attributes before
//! returning, on every path. Do not hide input from two threads at once, and
//! be aware that other code touching the same terminal (line editors, TUI
//! libraries) will observe the temporary state.
//!
//! # Residual risk
//!
//! The line buffer grows to fit the input. On failure it is released, but its
//! contents are not zeroed: the buffer may have been reallocated while growing
//! and the earlier allocations are out of reach. Callers that need stronger
//! guarantees must bound their input instead.

use std::ffi::{CStr, CString};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::os::fd::AsFd;

use nix::sys::termios::{self, LocalFlags, SetArg, Termios};

use crate::error::{ExioError, Result};

/// Whether typed characters are echoed while reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Echo input as usual.
    #[default]
    Show,
    /// Disable echo for the duration of the read.
    Hide,
}

/// A device whose echo can be switched off and restored.
///
/// Implemented by [`Tty`] for real terminals.
pub trait Terminal {
    /// Snapshot of the device attributes.
    type State: Clone;

    /// Capture the current attributes.
    fn state(&self) -> nix::Result<Self::State>;

    /// Apply `state`, flushing pending input and output first.
    fn set_state(&self, state: &Self::State) -> nix::Result<()>;

    /// `state` with echo turned off.
    fn without_echo(&self, state: &Self::State) -> Self::State;
}

/// Terminal attributes captured with `tcgetattr`.
#[derive(Clone)]
pub struct TerminalState(Termios);

impl TerminalState {
    /// Whether the `ECHO` local flag is set.
    pub fn echo_enabled(&self) -> bool {
        self.0.local_flags.contains(LocalFlags::ECHO)
    }

    /// The underlying termios attributes.
    pub fn termios(&self) -> &Termios {
        &self.0
    }
}

impl fmt::Debug for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalState")
            .field("local_flags", &self.0.local_flags)
            .finish_non_exhaustive()
    }
}

/// A terminal reached through a file descriptor.
#[derive(Debug)]
pub struct Tty<F> {
    fd: F,
}

impl<F: AsFd> Tty<F> {
    /// Wrap a descriptor referring to a terminal.
    pub fn new(fd: F) -> Self {
        Self { fd }
    }
}

impl Tty<io::Stdin> {
    /// The terminal behind standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<F: AsFd> Terminal for Tty<F> {
    type State = TerminalState;

    fn state(&self) -> nix::Result<TerminalState> {
        termios::tcgetattr(self.fd.as_fd()).map(TerminalState)
    }

    fn set_state(&self, state: &TerminalState) -> nix::Result<()> {
        termios::tcsetattr(self.fd.as_fd(), SetArg::TCSAFLUSH, &state.0)
    }

    fn without_echo(&self, state: &TerminalState) -> TerminalState {
        let mut hidden = state.clone();
        hidden.0.local_flags.remove(LocalFlags::ECHO);
        hidden
    }
}

/// Echo suppression that is undone exactly once.
///
/// [`EchoGuard::restore`] reports a failed restore; dropping the guard
/// without calling it restores silently.
pub struct EchoGuard<'a, T: Terminal> {
    terminal: &'a T,
    saved: Option<T::State>,
}

impl<'a, T: Terminal> EchoGuard<'a, T> {
    /// Capture the terminal state and switch echo off.
    ///
    /// # Errors
    ///
    /// Returns [`ExioError::TerminalUnsupported`] if the attributes cannot be
    /// read or written. The terminal is left unchanged in that case.
    pub fn engage(terminal: &'a T) -> Result<Self> {
        let saved = terminal.state().map_err(ExioError::TerminalUnsupported)?;
        terminal
            .set_state(&terminal.without_echo(&saved))
            .map_err(ExioError::TerminalUnsupported)?;

        Ok(Self {
            terminal,
            saved: Some(saved),
        })
    }

    /// Restore the captured state.
    ///
    /// # Errors
    ///
    /// Returns the error of the restoring `tcsetattr` call.
    pub fn restore(mut self) -> nix::Result<()> {
        match self.saved.take() {
            Some(saved) => self.terminal.set_state(&saved),
            None => Ok(()),
        }
    }
}

impl<T: Terminal> Drop for EchoGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            let _ = self.terminal.set_state(&saved);
        }
    }
}

/// A line read from the user.
///
/// The buffer keeps the line terminator as a boundary after the content.
/// [`UserLine::as_bytes`] excludes it and may contain NUL bytes;
/// [`UserLine::into_c_string`] gives plain C-string semantics instead.
pub struct UserLine {
    buf: Vec<u8>,
    len: usize,
}

impl UserLine {
    /// Length of the line without its terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The line content without its terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Take the content without its terminator.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf.truncate(self.len);
        self.buf
    }

    /// Take the content as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns the bytes back if they are not valid UTF-8.
    pub fn into_string(self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.into_bytes())
    }

    /// Overwrite the terminator with NUL and take the result as a C string.
    ///
    /// The string ends at the first NUL, so content after an embedded NUL
    /// byte is dropped.
    pub fn into_c_string(mut self) -> CString {
        self.buf[self.len] = 0;
        match CStr::from_bytes_until_nul(&self.buf) {
            Ok(line) => line.to_owned(),
            Err(_) => CString::default(),
        }
    }
}

impl fmt::Debug for UserLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLine")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Read a line from stdin, showing `prompt` on stderr.
///
/// With [`InputMode::Hide`] echo is disabled on the terminal behind stdin for
/// the duration of the read, and a newline is written to stderr afterwards
/// since the user's own newline was not echoed.
///
/// # Errors
///
/// - [`ExioError::TerminalUnsupported`] if stdin is not a terminal (hidden
///   mode only); nothing has been read.
/// - [`ExioError::EndOfInput`] if input ended before a line terminator.
/// - [`ExioError::Io`] for read or write failures.
pub fn read_line(prompt: &str, mode: InputMode) -> Result<UserLine> {
    let tty = Tty::stdin();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stderr = io::stderr().lock();
    read_line_with(&mut input, &mut stderr, &tty, prompt, mode)
}

/// Like [`read_line`], reading from `input`, prompting on `diag` and hiding
/// echo on `terminal`.
///
/// # Errors
///
/// See [`read_line`].
pub fn read_line_with<R, W, T>(
    input: &mut R,
    diag: &mut W,
    terminal: &T,
    prompt: &str,
    mode: InputMode,
) -> Result<UserLine>
where
    R: BufRead,
    W: Write,
    T: Terminal,
{
    let guard = match mode {
        InputMode::Hide => Some(EchoGuard::engage(terminal)?),
        InputMode::Show => None,
    };

    let mut buf = Vec::new();
    let read = write_prompt(diag, prompt).and_then(|()| input.read_until(b'\n', &mut buf));
    let complete = matches!(read, Ok(n) if n > 0 && buf.last() == Some(&b'\n'));

    if guard.is_some() || !complete {
        // Stand in for the newline the terminal did not echo
        let _ = diag.write_all(b"\n").and_then(|()| diag.flush());
    }

    match read {
        Err(e) => return Err(e.into()),
        Ok(0) => return Err(ExioError::EndOfInput { partial: false }),
        Ok(_) if !complete => return Err(ExioError::EndOfInput { partial: true }),
        Ok(_) => {}
    }

    if let Some(guard) = guard {
        guard.restore().map_err(ExioError::from)?;
    }

    let len = buf.len() - 1;
    Ok(UserLine { buf, len })
}

fn write_prompt<W: Write>(diag: &mut W, prompt: &str) -> io::Result<()> {
    diag.write_all(prompt.as_bytes())?;
    diag.flush()
}
