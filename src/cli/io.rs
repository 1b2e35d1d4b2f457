//! Terminal I/O for client commands
//!
//! - Results go to stdout
//! - Prompts and form errors go to stderr

use std::io::{self, BufRead, Write};

use super::errors::CliResult;

/// Ask a yes/no question on stderr and read the answer from `input`.
/// Anything but `y` or `yes` counts as no.
pub fn confirm_from<R: BufRead>(prompt: &str, input: &mut R) -> CliResult<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{} [y/N] ", prompt)?;
    stderr.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(is_yes(&line))
}

/// [`confirm_from`] on stdin
pub fn confirm(prompt: &str) -> CliResult<bool> {
    let stdin = io::stdin();
    let mut lock = stdin.lock();
    confirm_from(prompt, &mut lock)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Write a block of text to stdout
pub fn write_output(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;
    Ok(())
}

/// Write a block of text to stderr
pub fn write_diagnostic(text: &str) -> CliResult<()> {
    let mut stderr = io::stderr();
    writeln!(stderr, "{}", text)?;
    Ok(())
}
