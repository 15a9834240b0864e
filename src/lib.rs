//! Tally: a four-function running-total calculator engine.
//!
//! The engine is a small state machine over a display string, a stored
//! operand, a pending operator and a "just evaluated" flag. Front ends map
//! each key to one engine call and render the returned text verbatim.
//!
//! # Core Concepts
//!
//! - **Phase**: `Entering`, `JustEvaluated` or `Error`, via the `State` trait
//! - **Engine**: owns the state and exposes one method per key
//! - **Action**: the shared key map front ends dispatch through
//!
//! Operators fold left to right with no precedence. Division by zero never
//! surfaces as an error value; the display simply reads `"Error"`.
//!
//! # Example
//!
//! ```rust
//! use tally::CalculatorEngine;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.input_digit('5');
//! engine.input_operator('+');
//! engine.input_digit('3');
//! engine.input_operator('+');
//! engine.input_digit('2');
//! assert_eq!(engine.equals(), "10");
//!
//! engine.input_operator('/');
//! engine.input_digit('0');
//! assert_eq!(engine.equals(), "Error");
//! ```

pub mod core;
pub mod engine;
pub mod input;

// Re-export commonly used types
pub use crate::core::{format_number, ArithmeticError, InputError, Operator, Phase, State};
pub use engine::{CalculatorEngine, CalculatorState, ERROR_DISPLAY};
pub use input::{parse_sequence, Action};
