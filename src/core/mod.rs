//! Core calculator types and pure logic.
//!
//! This module contains the side-effect-free pieces the engine is built on:
//! - Phases via the `State` trait
//! - Operators and their arithmetic
//! - Display formatting and parsing
//! - Bounded phase transition history

mod error;
mod format;
mod history;
mod operator;
mod state;

pub use error::{ArithmeticError, InputError};
pub use format::{format_number, parse_display, FRACTION_DIGITS};
pub use history::{PhaseHistory, PhaseTransition, DEFAULT_HISTORY_CAPACITY};
pub use operator::Operator;
pub use state::{Phase, State};
