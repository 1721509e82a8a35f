//! Small shared helpers.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Whether stdin is attached to a terminal.
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Ask the user to confirm before a lifecycle transition. Returns false
/// (do nothing) on anything except an explicit yes. Non-interactive
/// sessions never confirm; callers pass `--yes` there instead.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !is_interactive() {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Read one line from stdin with a prompt (used for credentials).
pub fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
