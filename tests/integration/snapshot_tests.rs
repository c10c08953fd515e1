//! Snapshot tests using insta.
//!
//! These tests pin the exact wording of user-facing output.

use exio::error::ExioError;
use nix::errno::Errno;
use nix::sys::signal::Signal;

use crate::integration::fixtures::{create_home, exio};

fn stderr_of(args: &[&str], stdin: &str) -> String {
    let home = create_home();
    let output = exio(&home)
        .args(args)
        .write_stdin(stdin)
        .output()
        .expect("Failed to run exio");
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

// ==================== Messages ====================

#[test]
fn test_snapshot_message() {
    let stderr = stderr_of(&["--colour", "never", "message", "warning", "low disk"], "");
    insta::assert_snapshot!(stderr, @"warning: low disk");
}

#[test]
fn test_snapshot_end_of_input() {
    let stderr = stderr_of(&["--colour", "never", "read-line"], "");
    insta::assert_snapshot!(stderr, @"error: End of input reached");
}

#[test]
fn test_snapshot_partial_line() {
    let stderr = stderr_of(&["--colour", "never", "read-line"], "abc");
    insta::assert_snapshot!(stderr, @"error: End of input reached before the end of the line");
}

// ==================== Error Display ====================

#[test]
fn test_snapshot_error_display() {
    let err = ExioError::PathTooLong { len: 5000, max: 4096 };
    insta::assert_snapshot!(err.to_string(), @"Path of 5000 bytes exceeds the platform limit of 4096 bytes");

    let err = ExioError::MissingEnvironment {
        var: "XDG_DATA_HOME".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"Environment variable XDG_DATA_HOME is not set and HOME is not set either");

    let err = ExioError::Signal {
        signal: Signal::SIGKILL,
        source: Errno::EINVAL,
    };
    insta::assert_snapshot!(err.to_string(), @"Failed to change the disposition of SIGKILL: EINVAL: Invalid argument");
}
