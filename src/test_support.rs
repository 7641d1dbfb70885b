//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::action::{ButtonKind, parse_keys};
use crate::core::state::CalculatorEngine;

/// Parses a key string, panicking on anything that isn't a button.
pub fn keys(input: &str) -> Vec<ButtonKind> {
    parse_keys(input).expect("test keys should parse")
}

/// Creates a default engine and presses every key in `input`.
pub fn engine_after(input: &str) -> CalculatorEngine {
    let mut engine = CalculatorEngine::new();
    engine.apply_all(keys(input));
    engine
}
