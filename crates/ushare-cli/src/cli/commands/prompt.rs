//! Interactive input on stdin; prompts go to stderr so stdout stays clean.

use std::io::{self, Write};

use anyhow::{bail, Result};

fn read_line(prompt: &str) -> Result<String> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("no input on stdin");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// `given`, or a password read from stdin.
pub fn password(given: Option<String>) -> Result<String> {
    match given {
        Some(p) => Ok(p),
        None => read_line("Password: "),
    }
}

pub fn confirm(question: &str) -> Result<bool> {
    let answer = read_line(&format!("{question} [y/N] "))?;
    Ok(is_yes(&answer))
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
