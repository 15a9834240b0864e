//! The mutable record behind the engine.

use crate::core::{Operator, Phase};
use serde::{Deserialize, Serialize};

/// Text shown after an arithmetic failure.
pub const ERROR_DISPLAY: &str = "Error";

/// Everything the calculator remembers between keystrokes.
///
/// Owned by [`CalculatorEngine`](super::CalculatorEngine); callers only see
/// it through shared references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Text currently shown. Never empty.
    pub display: String,
    /// Left operand of the operation in progress.
    pub stored_value: Option<f64>,
    /// Operator waiting for its right-hand operand.
    pub pending_operator: Option<Operator>,
    /// Set after an operator or equals; the next digit starts a new number.
    pub just_evaluated: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            stored_value: None,
            pending_operator: None,
            just_evaluated: false,
        }
    }
}

impl CalculatorState {
    /// The state with `"Error"` shown and nothing else retained.
    pub fn error() -> Self {
        Self {
            display: ERROR_DISPLAY.to_string(),
            ..Self::default()
        }
    }

    /// Phase implied by the current fields.
    pub fn phase(&self) -> Phase {
        if self.display == ERROR_DISPLAY {
            Phase::Error
        } else if self.just_evaluated {
            Phase::JustEvaluated
        } else {
            Phase::Entering
        }
    }
}
