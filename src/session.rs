// src/session.rs
//! Interactive id lookup over any reader/writer pair.

use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;

use tracing::debug;

use crate::lookup::Lookup;
use crate::process::PersonTable;

pub const PROMPT: &str = "Please Enter an ID For Lookup";

/// What one line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A positive integer; holds the line as typed, used verbatim as the key.
    Lookup(String),
    /// Zero or negative.
    Quit,
    /// Not an integer. Re-prompt without output.
    Ignore,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let key = line.trim_end_matches(['\r', '\n']);
        match key.trim().parse::<i64>() {
            Ok(n) if n > 0 => Command::Lookup(key.to_string()),
            Ok(_) => Command::Quit,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Command::Lookup(key.to_string()),
                IntErrorKind::NegOverflow => Command::Quit,
                _ => Command::Ignore,
            },
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub lookups: usize,
    pub hits: usize,
    pub ignored: usize,
}

/// Prompt, read, answer until the user enters a non-positive integer or input
/// runs out.
pub fn run<R: BufRead, W: Write>(
    table: &PersonTable,
    mut input: R,
    mut output: W,
) -> io::Result<SessionStats> {
    let mut stats = SessionStats::default();
    let mut line = String::new();

    loop {
        writeln!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("input closed");
            break;
        }

        match Command::parse(&line) {
            Command::Lookup(id) => {
                let found = table.lookup(&id);
                stats.lookups += 1;
                if matches!(found, Lookup::Found { .. }) {
                    stats.hits += 1;
                }
                writeln!(output, "{}", found)?;
            }
            Command::Quit => break,
            Command::Ignore => stats.ignored += 1,
        }
    }

    debug!(?stats, "session finished");
    Ok(stats)
}
