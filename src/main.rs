use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use tally::OutputMode;
use tally::core::config::{self, ResolvedConfig};
use tally::core::state::CalculatorEngine;
use tally::shell;

#[derive(Parser)]
#[command(name = "tally", about = "Keypad calculator for the terminal")]
struct Args {
    /// Keys to press, e.g. `12 × 3 =` or `5+/-%`. Reads stdin when omitted.
    #[arg(allow_hyphen_values = true)]
    keys: Vec<String>,

    /// What to print
    #[arg(short, long, default_value_t, value_enum)]
    mode: OutputMode,

    /// Config file to use instead of ~/.tally/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum digits in a typed operand
    #[arg(long)]
    max_digits: Option<usize>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let loaded = match loaded {
        Ok(l) => l,
        Err(e) => {
            eprintln!("tally: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&loaded.config, args.max_digits, args.verbose);

    init_logging(&resolved);
    log::info!("Tally starting up in {:?} mode", args.mode);

    // Config is read before the logger exists; replay what it found now.
    for note in loaded.notes.iter().chain(&resolved.notes) {
        note.log();
        if note.is_warning() {
            eprintln!("tally: {note}");
        }
    }
    log::debug!("Config: {:?}", loaded.config);
    log::debug!("Resolved config: {:?}", resolved);

    let mut engine = CalculatorEngine::with_max_digits(resolved.max_digits);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.keys.is_empty() {
        let stdin = io::stdin();
        let mut err = io::stderr();
        if let Err(e) = shell::run_interactive(&mut engine, stdin.lock(), args.mode, &mut out, &mut err) {
            eprintln!("tally: {e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let line = args.keys.join(" ");
    match shell::apply_line(&mut engine, &line, args.mode, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tally: {e}");
            ExitCode::FAILURE
        }
    }
}

// Initialize file logger - writes to the configured log file
fn init_logging(resolved: &ResolvedConfig) {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
}
