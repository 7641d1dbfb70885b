//! # Actions
//!
//! Everything that can happen to the calculator becomes a `ButtonKind`.
//! User taps `7`? That's `ButtonKind::Digit(7)`.
//! User taps `×`? That's `ButtonKind::Multiply`.
//!
//! The engine takes the current state and a button, then mutates itself
//! into the next state. No I/O here.
//!
//! ```text
//! State + ButtonKind  →  apply()  →  New State
//! ```
//!
//! Front ends that read keys as text go through `parse_keys()`, which accepts
//! the keypad titles plus a few ASCII aliases.

use std::fmt;
use std::str::FromStr;

use crate::core::state::EngineError;

/// One button on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Digit(u8),
    Decimal,
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
    Clear,
    Negate,
    Percent,
}

impl ButtonKind {
    /// Every button on the keypad.
    pub const ALL: [ButtonKind; 19] = [
        ButtonKind::Digit(0),
        ButtonKind::Digit(1),
        ButtonKind::Digit(2),
        ButtonKind::Digit(3),
        ButtonKind::Digit(4),
        ButtonKind::Digit(5),
        ButtonKind::Digit(6),
        ButtonKind::Digit(7),
        ButtonKind::Digit(8),
        ButtonKind::Digit(9),
        ButtonKind::Decimal,
        ButtonKind::Add,
        ButtonKind::Subtract,
        ButtonKind::Multiply,
        ButtonKind::Divide,
        ButtonKind::Equals,
        ButtonKind::Clear,
        ButtonKind::Negate,
        ButtonKind::Percent,
    ];

    /// The label printed on the button. Digits past 9 have no button and read `?`.
    pub fn title(&self) -> &'static str {
        match self {
            ButtonKind::Digit(d) => DIGIT_TITLES.get(usize::from(*d)).copied().unwrap_or("?"),
            ButtonKind::Decimal => ".",
            ButtonKind::Add => "+",
            ButtonKind::Subtract => "−",
            ButtonKind::Multiply => "×",
            ButtonKind::Divide => "÷",
            ButtonKind::Equals => "=",
            ButtonKind::Clear => "AC",
            ButtonKind::Negate => "+/-",
            ButtonKind::Percent => "%",
        }
    }

    /// The arithmetic operation behind an operator button, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ButtonKind::Add => Some(Operation::Add),
            ButtonKind::Subtract => Some(Operation::Subtract),
            ButtonKind::Multiply => Some(Operation::Multiply),
            ButtonKind::Divide => Some(Operation::Divide),
            _ => None,
        }
    }

    pub fn is_operator(&self) -> bool {
        self.operation().is_some()
    }
}

const DIGIT_TITLES: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A binary operation waiting for its right-hand operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Applies `lhs <op> rhs`. Division by exactly zero is the only failure.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EngineError> {
        match self {
            Operation::Add => Ok(lhs + rhs),
            Operation::Subtract => Ok(lhs - rhs),
            Operation::Multiply => Ok(lhs * rhs),
            Operation::Divide => {
                if rhs == 0.0 {
                    return Err(EngineError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }
}

// ============================================================================
// Key Parsing
// ============================================================================

/// A key string contained something that isn't a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError {
    /// Character offset of the offending key within the input.
    pub position: usize,
    pub found: char,
}

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' at position {}", self.found, self.position)
    }
}

impl std::error::Error for ParseKeyError {}

// Multi-character titles, checked before single keys so `+/-` never reads as `+`.
const LONG_KEYS: [(&str, ButtonKind); 3] = [
    ("+/-", ButtonKind::Negate),
    ("AC", ButtonKind::Clear),
    ("ac", ButtonKind::Clear),
];

fn single_key(c: char) -> Option<ButtonKind> {
    let button = match c {
        '0'..='9' => ButtonKind::Digit(c as u8 - b'0'),
        '.' | ',' => ButtonKind::Decimal,
        '+' => ButtonKind::Add,
        '-' | '−' => ButtonKind::Subtract,
        '*' | 'x' | '×' => ButtonKind::Multiply,
        '/' | '÷' => ButtonKind::Divide,
        '=' => ButtonKind::Equals,
        'c' | 'C' => ButtonKind::Clear,
        'n' | '±' => ButtonKind::Negate,
        '%' => ButtonKind::Percent,
        _ => return None,
    };
    Some(button)
}

/// Parses a run of keys such as `"12 × 3 ="` or `"5+/-%"` into button presses.
///
/// Whitespace is ignored. On failure the error names the first key that
/// could not be read; nothing is returned for the keys before it.
pub fn parse_keys(input: &str) -> Result<Vec<ButtonKind>, ParseKeyError> {
    let mut buttons = Vec::new();
    let mut rest = input;
    let mut position = 0;

    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            position += 1;
            continue;
        }

        if let Some((title, button)) = LONG_KEYS.iter().find(|(title, _)| rest.starts_with(title)) {
            buttons.push(*button);
            rest = &rest[title.len()..];
            position += title.chars().count();
            continue;
        }

        match single_key(c) {
            Some(button) => buttons.push(button),
            None => return Err(ParseKeyError { position, found: c }),
        }
        rest = &rest[c.len_utf8()..];
        position += 1;
    }

    Ok(buttons)
}

impl FromStr for ButtonKind {
    type Err = ParseKeyError;

    /// Parses exactly one button.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let buttons = parse_keys(s)?;
        match buttons.as_slice() {
            [button] => Ok(*button),
            _ => {
                // Empty input or more than one key: point at what follows the first.
                let trimmed = s.trim_start();
                let offset = s.chars().count() - trimmed.chars().count();
                let first_len = buttons.first().map_or(0, |b| b.title().chars().count());
                let found = trimmed.chars().nth(first_len).unwrap_or(' ');
                Err(ParseKeyError {
                    position: offset + first_len,
                    found,
                })
            }
        }
    }
}
