//! Error types for arithmetic and input parsing.

use thiserror::Error;

/// Failure while folding an operator into the running total.
///
/// The engine never returns this to its caller; it turns it into the
/// `"Error"` display.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    Overflow,
}

/// Errors raised when translating front-end input into actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unmapped key '{0}'")]
    UnknownKey(char),

    #[error("Unknown button label '{0}'")]
    UnknownLabel(String),

    #[error("Unknown named key '{0}'")]
    UnknownNamedKey(String),
}
