//! # Core Calculator Logic
//!
//! This module contains Tally's arithmetic engine.
//! It knows nothing about any specific front end.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • state (engine)       │
//!                    │  • action (buttons)     │
//!                    │  • format (display)     │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   Shell    │      │   Keypad   │      │  Embedded  │
//!     │  Adapter   │      │     UI     │      │   caller   │
//!     │ (stdin/cli)│      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `CalculatorEngine` struct, all arithmetic state in one place
//! - [`action`]: The `ButtonKind` enum, every button that can be pressed
//! - [`format`]: How computed values are written to the display
//! - [`config`]: Settings file and override resolution

pub mod action;
pub mod config;
pub mod format;
pub mod state;

pub use action::{ButtonKind, Operation, ParseKeyError, parse_keys};
pub use format::format_number;
pub use state::{CalculatorEngine, EngineError};
