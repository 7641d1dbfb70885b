//! # Shell Adapter
//!
//! The line-oriented front end. Reads keys from command-line arguments or
//! stdin, feeds them to a `CalculatorEngine`, and prints the display.
//!
//! This is the only module that does terminal I/O. It plays the part a
//! keypad UI would: press a button, then re-read `display_text()`.
//!
//! ```text
//! $ tally 12 × 3 =
//! 36
//! $ tally --mode trace 5 ÷ 0 =
//! 5   5
//! ÷   5
//! 0   0
//! =   Error
//! ```

use log::{debug, info, warn};
use std::fmt;
use std::io::{self, BufRead, Write};

use crate::OutputMode;
use crate::core::action::{ParseKeyError, parse_keys};
use crate::core::state::CalculatorEngine;

/// Lines that end an interactive session.
const QUIT_COMMANDS: [&str; 2] = ["q", "quit"];

#[derive(Debug)]
pub enum ShellError {
    Io(io::Error),
    Keys(ParseKeyError),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Io(e) => write!(f, "I/O error: {e}"),
            ShellError::Keys(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ShellError {}

impl From<io::Error> for ShellError {
    fn from(e: io::Error) -> Self {
        ShellError::Io(e)
    }
}

impl From<ParseKeyError> for ShellError {
    fn from(e: ParseKeyError) -> Self {
        ShellError::Keys(e)
    }
}

/// Applies every key in `line` to `engine`, prints the display and flushes.
///
/// Keys are parsed up front, so a line with a bad key leaves the engine untouched.
pub fn apply_line<W: Write>(
    engine: &mut CalculatorEngine,
    line: &str,
    mode: OutputMode,
    out: &mut W,
) -> Result<(), ShellError> {
    let buttons = parse_keys(line)?;
    debug!("Applying {} keys", buttons.len());

    for button in buttons {
        engine.apply(button);
        if mode == OutputMode::Trace {
            writeln!(out, "{:<4}{}", button.title(), engine.display_text())?;
        }
    }

    if let Some(err) = engine.last_error() {
        warn!("Engine reported {}", err);
    }
    if mode == OutputMode::Final {
        writeln!(out, "{}", engine.display_text())?;
    }
    out.flush()?;
    Ok(())
}

/// Reads lines until EOF or a quit command, applying each to one long-lived engine.
///
/// Lines with unknown keys are reported on `err` and skipped.
pub fn run_interactive<R: BufRead, W: Write, E: Write>(
    engine: &mut CalculatorEngine,
    input: R,
    mode: OutputMode,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    info!("Interactive session started");

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&trimmed) {
            break;
        }

        match apply_line(engine, trimmed, mode, out) {
            Ok(()) => {}
            Err(ShellError::Keys(e)) => {
                warn!("Skipping line {:?}: {}", trimmed, e);
                writeln!(err, "error: {e}")?;
            }
            Err(ShellError::Io(e)) => return Err(e),
        }
    }

    info!("Interactive session ended");
    Ok(())
}
