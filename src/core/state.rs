//! # Calculator State
//!
//! The arithmetic state machine behind the keypad. This module contains
//! domain logic only; no terminal or UI types.
//!
//! ```text
//! CalculatorEngine
//! ├── display: String               // what the user sees
//! ├── stored_value: f64             // left-hand operand
//! ├── current_value: f64            // operand being entered or last result
//! ├── pending: Option<Operation>    // operator waiting for its right operand
//! ├── is_typing: bool               // composing an operand digit by digit
//! ├── armed_for_reset: bool         // next digit starts a fresh operand
//! ├── max_digits: usize             // cap on typed digits
//! └── last_error: Option<EngineError>
//! ```
//!
//! State changes only happen through `apply()`. Callers re-read
//! `display_text()` after each input.

use log::{debug, trace};
use std::fmt;

use crate::core::action::{ButtonKind, Operation};
use crate::core::format::format_number;

/// Default cap on the number of digits in a typed operand.
pub const DEFAULT_MAX_DIGITS: usize = 9;

/// Text shown after a division by zero.
pub const ERROR_DISPLAY: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    DivisionByZero,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for EngineError {}

#[derive(Debug, Clone)]
pub struct CalculatorEngine {
    display: String,
    stored_value: f64,
    current_value: f64,
    pending: Option<Operation>,
    is_typing: bool,
    armed_for_reset: bool,
    max_digits: usize,
    /// Set by the input that produced the error display; cleared by the next one.
    last_error: Option<EngineError>,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self::with_max_digits(DEFAULT_MAX_DIGITS)
    }

    /// Creates a cleared engine that accepts up to `max_digits` typed digits (at least one).
    pub fn with_max_digits(max_digits: usize) -> Self {
        Self {
            display: String::from("0"),
            stored_value: 0.0,
            current_value: 0.0,
            pending: None,
            is_typing: false,
            armed_for_reset: false,
            max_digits: max_digits.max(1),
            last_error: None,
        }
    }

    pub fn display_text(&self) -> &str {
        &self.display
    }

    pub fn pending_operation(&self) -> Option<Operation> {
        self.pending
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn is_armed_for_reset(&self) -> bool {
        self.armed_for_reset
    }

    pub fn max_digits(&self) -> usize {
        self.max_digits
    }

    /// The error behind the current display, if the last input produced one.
    pub fn last_error(&self) -> Option<EngineError> {
        self.last_error
    }

    /// True when the engine is in the freshly cleared configuration.
    pub fn is_cleared(&self) -> bool {
        self.display == "0"
            && self.stored_value == 0.0
            && self.current_value == 0.0
            && self.pending.is_none()
            && !self.is_typing
            && !self.armed_for_reset
    }

    /// Feeds one button press through the state machine.
    pub fn apply(&mut self, input: ButtonKind) {
        trace!("apply {:?} (display {:?})", input, self.display);
        self.last_error = None;

        match input {
            ButtonKind::Digit(d) => self.enter_digit(d),
            ButtonKind::Decimal => self.enter_decimal(),
            ButtonKind::Add => self.choose_operation(Operation::Add),
            ButtonKind::Subtract => self.choose_operation(Operation::Subtract),
            ButtonKind::Multiply => self.choose_operation(Operation::Multiply),
            ButtonKind::Divide => self.choose_operation(Operation::Divide),
            ButtonKind::Equals => self.evaluate(),
            ButtonKind::Clear => self.clear(),
            ButtonKind::Negate => self.transform_display(|v| -v),
            ButtonKind::Percent => self.transform_display(|v| v / 100.0),
        }
    }

    /// Applies a sequence of presses in order.
    pub fn apply_all<I>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = ButtonKind>,
    {
        for input in inputs {
            self.apply(input);
        }
    }

    fn enter_digit(&mut self, digit: u8) {
        // There is no button for anything past 9.
        let Some(digit) = char::from_digit(u32::from(digit), 10) else {
            debug!("Ignoring out-of-range digit {}", digit);
            return;
        };

        if self.armed_for_reset {
            self.start_operand(digit.to_string());
        } else if self.is_typing {
            if self.display == "0" {
                self.display = digit.to_string();
            } else if self.typed_digits() < self.max_digits {
                self.display.push(digit);
            }
        } else {
            self.start_operand(digit.to_string());
        }
    }

    fn enter_decimal(&mut self) {
        if self.armed_for_reset || !self.is_typing {
            self.start_operand(String::from("0."));
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn start_operand(&mut self, text: String) {
        self.display = text;
        self.armed_for_reset = false;
        self.is_typing = true;
    }

    // Sign and decimal point don't count toward the digit cap.
    fn typed_digits(&self) -> usize {
        self.display.chars().filter(char::is_ascii_digit).count()
    }

    fn choose_operation(&mut self, operation: Operation) {
        self.commit_typed_operand();

        // A second operand was actually entered: fold the pending operation in.
        // Otherwise this is the first operator, or a replacement of the last one.
        if self.pending.is_some() && !self.armed_for_reset {
            self.evaluate();
        } else {
            self.stored_value = self.current_value;
        }

        self.pending = Some(operation);
        self.armed_for_reset = true;
    }

    fn commit_typed_operand(&mut self) {
        if self.is_typing {
            self.current_value = self.parse_display().unwrap_or(0.0);
            self.is_typing = false;
        }
    }

    fn evaluate(&mut self) {
        let Some(operation) = self.pending else {
            return;
        };

        if self.is_typing {
            self.current_value = self.parse_display().unwrap_or(0.0);
        }

        match operation.apply(self.stored_value, self.current_value) {
            Ok(result) => {
                self.current_value = result;
                self.stored_value = result;
                self.display = format_number(result);
                self.pending = None;
                self.is_typing = false;
                self.armed_for_reset = true;
            }
            Err(err) => {
                debug!("{} evaluating {} {:?} 0, resetting", err, self.stored_value, operation);
                self.clear();
                self.display = String::from(ERROR_DISPLAY);
                self.last_error = Some(err);
            }
        }
    }

    fn clear(&mut self) {
        let max_digits = self.max_digits;
        *self = Self::with_max_digits(max_digits);
    }

    fn transform_display(&mut self, transform: impl FnOnce(f64) -> f64) {
        if let Some(value) = self.parse_display() {
            let value = transform(value);
            self.display = format_number(value);
            self.current_value = value;
        }
    }

    fn parse_display(&self) -> Option<f64> {
        self.display.parse::<f64>().ok()
    }
}
