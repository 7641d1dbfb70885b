//! Tally library exports for embedding and testing

use clap::ValueEnum;

pub mod core;
pub mod shell;

#[cfg(test)]
pub mod test_support;

/// How much of the display the shell prints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Only the display after the whole line has been applied
    #[default]
    Final,
    /// The display after every key
    Trace,
}
