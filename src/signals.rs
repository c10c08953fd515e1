//! Fatal-signal handler installation and removal.
//!
//! Two fixed catalogs are handled: [`SEGFAULT_SIGNALS`] (memory access
//! violations) and [`TERMINATION_SIGNALS`] (everything else that terminates
//! the process by default). Catalog membership is decided at compile time by
//! the target's signal table.
//!
//! # Process-wide state
//!
//! Every function here reads or replaces signal dispositions, which are shared
//! by all threads of the process. Install handlers once, early in `main`,
//! before spawning threads.
//!
//! # Writing handlers
//!
//! A [`SignalHandler`] runs asynchronously at an arbitrary point of the
//! program. It may only call async-signal-safe functions (`write(2)`,
//! `_exit(2)`, [`reset_and_raise`], ...): no allocation, no locks, no
//! buffered IO. It must end the process rather than return for `SIGSEGV`,
//! `SIGBUS`, `SIGFPE`, `SIGILL` and `SIGABRT`; returning from those is
//! undefined behaviour. The usual pattern is to clean up, then call
//! [`reset_and_raise`] so that the default action (core dump, termination)
//! takes place.

use std::ffi::c_int;
use std::fmt;
use std::mem::MaybeUninit;
use std::ptr;
use std::str::FromStr;

use nix::errno::Errno;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::error::{ExioError, Result};

/// A signal-context-safe handler, called with the signal number.
pub type SignalHandler = extern "C" fn(c_int);

/// Signals raised on memory access violations.
pub const SEGFAULT_SIGNALS: &[Signal] = &[Signal::SIGSEGV];

/// Signals, other than `SIGSEGV`, whose default action ends the process.
///
/// The five ISO C signals are always present. The others are listed only on
/// targets that define them.
pub const TERMINATION_SIGNALS: &[Signal] = &[
    // ISO C
    Signal::SIGINT,
    Signal::SIGTERM,
    Signal::SIGABRT,
    Signal::SIGFPE,
    Signal::SIGILL,
    // POSIX.1-1990
    Signal::SIGHUP,
    Signal::SIGQUIT,
    Signal::SIGPIPE,
    Signal::SIGUSR1,
    Signal::SIGUSR2,
    Signal::SIGALRM,
    // POSIX.1-2001
    Signal::SIGBUS,
    // BSD
    #[cfg(not(target_os = "haiku"))]
    Signal::SIGIO,
    Signal::SIGVTALRM,
    Signal::SIGXCPU,
    Signal::SIGXFSZ,
];

/// The current action for a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The platform default action.
    Default,
    /// The signal is ignored.
    Ignore,
    /// A handler at the given address.
    Handler(usize),
}

impl Disposition {
    /// The disposition installed for `handler`.
    pub fn of(handler: SignalHandler) -> Self {
        Disposition::Handler(handler as usize)
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Default => f.write_str("default"),
            Disposition::Ignore => f.write_str("ignore"),
            Disposition::Handler(_) => f.write_str("handler"),
        }
    }
}

/// Outcome of [`install_termination_handlers`] per catalog signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Signals now routed to the handler.
    pub installed: Vec<Signal>,
    /// Signals left alone because they were already ignored.
    pub skipped_ignored: Vec<Signal>,
    /// Signals whose disposition could not be queried or changed.
    pub failed: Vec<(Signal, Errno)>,
}

impl InstallReport {
    /// Whether no signal failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Whether `signal` was routed to the handler.
    pub fn is_installed(&self, signal: Signal) -> bool {
        self.installed.contains(&signal)
    }
}

/// Query the disposition of `signal` without changing it.
///
/// # Errors
///
/// Returns `EINVAL` for signals the platform rejects.
pub fn disposition(signal: Signal) -> nix::Result<Disposition> {
    let mut current = MaybeUninit::<libc::sigaction>::uninit();
    // SAFETY: a null new action makes sigaction a pure query.
    let res = unsafe { libc::sigaction(signal as c_int, ptr::null(), current.as_mut_ptr()) };
    Errno::result(res)?;
    // SAFETY: initialized by the successful call above.
    let current = unsafe { current.assume_init() };

    Ok(match current.sa_sigaction {
        libc::SIG_DFL => Disposition::Default,
        libc::SIG_IGN => Disposition::Ignore,
        address => Disposition::Handler(address),
    })
}

/// Set `handler` as the disposition of `SIGSEGV`.
///
/// All signals are blocked while the handler runs. The handler must not
/// return.
///
/// # Errors
///
/// Returns [`ExioError::Signal`] if the OS rejects the new disposition.
pub fn install_segfault_handler(handler: SignalHandler) -> Result<()> {
    let action = SigAction::new(SigHandler::Handler(handler), SaFlags::empty(), SigSet::all());

    for &sig in SEGFAULT_SIGNALS {
        // SAFETY: the handler contract is documented on `SignalHandler`.
        unsafe { signal::sigaction(sig, &action) }.map_err(|source| ExioError::Signal {
            signal: sig,
            source,
        })?;
    }

    Ok(())
}

/// Set `handler` for every termination signal not already ignored.
///
/// Signals that are ignored when this runs keep being ignored, which
/// preserves suppression set up by the embedding application or inherited
/// from the parent process. While any handler of the group runs, the whole
/// group is blocked. Interrupted system calls are restarted (`SA_RESTART`).
///
/// Installation is best effort: a signal that cannot be changed is recorded
/// in [`InstallReport::failed`] and the remaining ones are still processed.
pub fn install_termination_handlers(handler: SignalHandler) -> InstallReport {
    let action = SigAction::new(
        SigHandler::Handler(handler),
        SaFlags::SA_RESTART,
        termination_mask(),
    );
    let mut report = InstallReport::default();

    for &sig in TERMINATION_SIGNALS {
        match disposition(sig) {
            Ok(Disposition::Ignore) => report.skipped_ignored.push(sig),
            Ok(_) => {
                // SAFETY: the handler contract is documented on `SignalHandler`.
                match unsafe { signal::sigaction(sig, &action) } {
                    Ok(_) => report.installed.push(sig),
                    Err(errno) => report.failed.push((sig, errno)),
                }
            }
            Err(errno) => report.failed.push((sig, errno)),
        }
    }

    report
}

/// Restore the default disposition of `signal`, with an empty mask and no
/// flags.
///
/// Safe to call from a signal handler.
///
/// # Errors
///
/// Returns [`ExioError::Signal`] if the OS rejects the change.
pub fn reset_handler(signal: Signal) -> Result<()> {
    let action = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());

    // SAFETY: installing SIG_DFL runs no user code.
    unsafe { signal::sigaction(signal, &action) }
        .map(drop)
        .map_err(|source| ExioError::Signal { signal, source })
}

/// Reset `signal` to its default disposition and raise it again.
///
/// Meant for the end of a handler, after cleanup. If called from a handler
/// for the same signal, the signal stays pending until the handler returns
/// and is then delivered with its default action.
///
/// # Errors
///
/// Returns [`ExioError::Signal`] if the reset or the raise fails.
pub fn reset_and_raise(signal: Signal) -> Result<()> {
    reset_handler(signal)?;
    signal::raise(signal).map_err(|source| ExioError::Signal { signal, source })
}

/// Parse a signal given as `TERM`, `SIGTERM`, `sigterm` or `15`.
pub fn parse_signal(name: &str) -> Option<Signal> {
    if let Ok(number) = name.parse::<c_int>() {
        return Signal::try_from(number).ok();
    }

    let upper = name.to_ascii_uppercase();
    let full = if upper.starts_with("SIG") {
        upper
    } else {
        format!("SIG{upper}")
    };
    Signal::from_str(&full).ok()
}

/// The mask applied while a termination handler runs.
pub fn termination_mask() -> SigSet {
    let mut mask = SigSet::empty();
    for &sig in TERMINATION_SIGNALS {
        mask.add(sig);
    }
    mask
}
