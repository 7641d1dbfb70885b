//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tally/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::state::DEFAULT_MAX_DIGITS;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    pub max_digits: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Beyond this many digits an `f64` no longer holds the typed integer exactly.
pub const MAX_DIGITS_LIMIT: usize = 15;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_FILE: &str = "tally.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub max_digits: usize,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    /// Fallbacks taken while resolving (bad env values, clamped limits).
    pub notes: Vec<ConfigNote>,
}

// ============================================================================
// Notes (config is read before the logger exists)
// ============================================================================

/// Something worth logging that happened while loading or resolving config.
///
/// The log file and level come from the config itself, so these are
/// collected and replayed with `log()` once the logger is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNote {
    Info(String),
    Warn(String),
}

impl ConfigNote {
    pub fn is_warning(&self) -> bool {
        matches!(self, ConfigNote::Warn(_))
    }

    pub fn log(&self) {
        match self {
            ConfigNote::Info(msg) => info!("{}", msg),
            ConfigNote::Warn(msg) => warn!("{}", msg),
        }
    }
}

impl fmt::Display for ConfigNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigNote::Info(msg) | ConfigNote::Warn(msg) => f.write_str(msg),
        }
    }
}

/// A parsed config file plus the notes gathered while finding it.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: TallyConfig,
    pub notes: Vec<ConfigNote>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tally/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tally").join("config.toml"))
}

/// Load config from `~/.tally/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TallyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(LoadedConfig {
            config: TallyConfig::default(),
            notes: vec![ConfigNote::Warn(
                "Could not determine home directory, using default config".to_string(),
            )],
        });
    };

    if !path.exists() {
        let mut notes = vec![ConfigNote::Info(format!(
            "No config file found, generating default at {}",
            path.display()
        ))];
        if let Err(e) = generate_default_config(&path) {
            notes.push(ConfigNote::Warn(format!("Failed to write default config: {e}")));
        }
        return Ok(LoadedConfig {
            config: TallyConfig::default(),
            notes,
        });
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TallyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok(LoadedConfig {
        config,
        notes: vec![ConfigNote::Info(format!("Loaded config from {}", path.display()))],
    })
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# Tally Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [engine]
# max_digits = 9                     # Or set TALLY_MAX_DIGITS (1-15)

# [log]
# level = "info"                     # "off", "error", "warn", "info", "debug", "trace"
# file = "tally.log"                 # Or set TALLY_LOG_FILE
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_max_digits` comes from `--max-digits`; `verbose` raises the log level
/// to at least Debug.
pub fn resolve(config: &TallyConfig, cli_max_digits: Option<usize>, verbose: bool) -> ResolvedConfig {
    resolve_with(config, cli_max_digits, verbose, |key| std::env::var(key).ok())
}

/// `resolve()` with the environment supplied by the caller.
pub fn resolve_with<F>(
    config: &TallyConfig,
    cli_max_digits: Option<usize>,
    verbose: bool,
    env: F,
) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut notes = Vec::new();

    // Max digits: CLI → env → config → default
    let max_digits = cli_max_digits
        .or_else(|| env_parsed(&env, "TALLY_MAX_DIGITS", &mut notes))
        .or(config.engine.max_digits)
        .unwrap_or(DEFAULT_MAX_DIGITS);

    // Log level: env → config → default, then --verbose
    let level_name = env("TALLY_LOG_LEVEL").or_else(|| config.log.level.clone());
    let mut log_level = match level_name {
        Some(name) => parse_level(&name, &mut notes),
        None => DEFAULT_LOG_LEVEL,
    };
    if verbose {
        log_level = log_level.max(LevelFilter::Debug);
    }

    // Log file: env → config → default
    let log_file = env("TALLY_LOG_FILE")
        .or_else(|| config.log.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        max_digits: clamp_max_digits(max_digits, &mut notes),
        log_level,
        log_file: PathBuf::from(log_file),
        notes,
    }
}

fn env_parsed<F>(env: &F, key: &str, notes: &mut Vec<ConfigNote>) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            notes.push(ConfigNote::Warn(format!("Ignoring {key}={raw:?}: {e}")));
            None
        }
    }
}

fn parse_level(name: &str, notes: &mut Vec<ConfigNote>) -> LevelFilter {
    name.trim().parse().unwrap_or_else(|_| {
        notes.push(ConfigNote::Warn(format!(
            "Unknown log level {name:?}, using {DEFAULT_LOG_LEVEL}"
        )));
        DEFAULT_LOG_LEVEL
    })
}

fn clamp_max_digits(max_digits: usize, notes: &mut Vec<ConfigNote>) -> usize {
    let clamped = max_digits.clamp(1, MAX_DIGITS_LIMIT);
    if clamped != max_digits {
        notes.push(ConfigNote::Warn(format!(
            "max_digits {max_digits} out of range, using {clamped}"
        )));
    }
    clamped
}
