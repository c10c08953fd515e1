//! Yes/no confirmation prompts.

use std::io::{self, BufRead, Write};

/// Answer that confirms.
pub const CHAR_YES: u8 = b'y';

/// Answer that denies.
pub const CHAR_NO: u8 = b'n';

/// Ask the user for confirmation on stdin, displaying `prompt` on stderr.
///
/// Only `y` and `n` (case sensitive) followed by a newline are accepted; any
/// other line is discarded and the prompt is shown again, with no limit on the
/// number of attempts.
///
/// Returns `Ok(false)` if input ends before an answer is given.
///
/// # Errors
///
/// Returns an error if reading stdin or writing the prompt fails.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stderr = io::stderr().lock();
    confirm_with(&mut input, &mut stderr, prompt)
}

/// Like [`confirm`], reading from `input` and prompting on `diag`.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `diag` fails.
pub fn confirm_with<R, W>(input: &mut R, diag: &mut W, prompt: &str) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    let mut line = Vec::with_capacity(3);

    loop {
        diag.write_all(prompt.as_bytes())?;
        diag.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Ok(false);
        }

        match line.as_slice() {
            [answer, b'\n'] if *answer == CHAR_YES => return Ok(true),
            [answer, b'\n'] if *answer == CHAR_NO => return Ok(false),
            _ => continue,
        }
    }
}
