//! Application paths, directory creation and file sizes.

use std::ffi::{OsStr, OsString};
use std::fs::DirBuilder;
use std::os::fd::{AsFd, AsRawFd};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::sys::stat;

use crate::error::{ExioError, Result};

/// Longest path accepted by [`xdg_path`], in bytes.
pub const PATH_MAX: usize = libc::PATH_MAX as usize;

/// Permissions for directories created by [`mkpath`], before the umask.
pub const DIR_MODE: u32 = 0o777;

/// Build a standard application path.
///
/// Uses `$xdg_var/sub_path` when the variable is set to an absolute path,
/// and `$HOME/fallback_dir/sub_path` otherwise. Components may be given with
/// or without leading and trailing `/`.
///
/// ```no_run
/// use exio::paths::xdg_path;
///
/// // ~/.local/state/myapp/history unless XDG_STATE_HOME is set
/// let path = xdg_path("myapp/history", "XDG_STATE_HOME", ".local/state")?;
/// # Ok::<(), exio::ExioError>(())
/// ```
///
/// # Errors
///
/// - [`ExioError::MissingEnvironment`] if neither variable is set.
/// - [`ExioError::PathTooLong`] if the result exceeds [`PATH_MAX`].
pub fn xdg_path(sub_path: &str, xdg_var: &str, fallback_dir: &str) -> Result<PathBuf> {
    xdg_path_from(|name| std::env::var_os(name), sub_path, xdg_var, fallback_dir)
}

/// Like [`xdg_path`], reading variables through `lookup`.
///
/// # Errors
///
/// See [`xdg_path`].
pub fn xdg_path_from<F>(
    lookup: F,
    sub_path: &str,
    xdg_var: &str,
    fallback_dir: &str,
) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    // Empty or relative XDG values are invalid and fall back to HOME
    let xdg = lookup(xdg_var).filter(|dir| Path::new(dir).is_absolute());

    let path = if let Some(xdg) = xdg {
        join(&xdg, &[sub_path])
    } else if let Some(home) = lookup("HOME").filter(|home| !home.is_empty()) {
        join(&home, &[fallback_dir, sub_path])
    } else {
        return Err(ExioError::MissingEnvironment {
            var: xdg_var.to_string(),
        });
    };

    let len = path.as_os_str().len();
    if len > PATH_MAX {
        return Err(ExioError::PathTooLong { len, max: PATH_MAX });
    }

    Ok(path)
}

/// Concatenate `parts` onto `base` with exactly one `/` between them.
fn join(base: &OsStr, parts: &[&str]) -> PathBuf {
    let mut bytes = base.as_bytes().to_vec();

    for part in parts {
        let part = part.trim_matches('/');
        if part.is_empty() {
            continue;
        }
        if bytes.last() != Some(&b'/') {
            bytes.push(b'/');
        }
        bytes.extend_from_slice(part.as_bytes());
    }

    PathBuf::from(OsString::from_vec(bytes))
}

/// Create `path` and all missing parents, like `mkdir -p`.
///
/// Existing directories along the path are left alone. New directories get
/// [`DIR_MODE`] minus the process umask.
///
/// # Errors
///
/// - [`ExioError::NotAbsolute`] if `path` is relative.
/// - [`ExioError::IoWithContext`] if a directory cannot be created, or if a
///   component exists but is not a directory.
pub fn mkpath(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_absolute() {
        return Err(ExioError::NotAbsolute {
            path: path.to_path_buf(),
        });
    }

    DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(path)
        .map_err(|source| ExioError::IoWithContext {
            operation: "create directory".to_string(),
            path: path.to_path_buf(),
            source,
        })
}

/// Size in bytes of the file behind `fd`.
///
/// Uses `fstat(2)`; the file offset is never touched.
///
/// # Errors
///
/// Returns the `fstat` error, e.g. `EBADF`.
pub fn fsize(fd: impl AsFd) -> Result<u64> {
    let st = stat::fstat(fd.as_fd().as_raw_fd())?;

    u64::try_from(st.st_size).map_err(|_| Errno::EOVERFLOW.into())
}
