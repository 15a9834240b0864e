//! Binary operators of the running total.

use super::error::ArithmeticError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four operators a pending operation can hold.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Parse an operator from its key symbol.
    ///
    /// Returns `None` for anything other than `+`, `-`, `*` or `/`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tally::core::Operator;
    ///
    /// assert_eq!(Operator::from_symbol('*'), Some(Operator::Mul));
    /// assert_eq!(Operator::from_symbol('^'), None);
    /// ```
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Compute `lhs op rhs`.
    ///
    /// Division by exactly zero fails with [`ArithmeticError::DivisionByZero`].
    /// Any other result that is not finite fails with
    /// [`ArithmeticError::Overflow`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use tally::core::{ArithmeticError, Operator};
    ///
    /// assert_eq!(Operator::Sub.apply(5.0, 3.0), Ok(2.0));
    /// assert_eq!(Operator::Div.apply(5.0, 0.0), Err(ArithmeticError::DivisionByZero));
    /// ```
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, ArithmeticError> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    return Err(ArithmeticError::DivisionByZero);
                }
                lhs / rhs
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ArithmeticError::Overflow)
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
