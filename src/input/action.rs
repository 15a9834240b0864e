//! Actions and their key bindings.

use crate::core::{InputError, Operator};
use crate::engine::CalculatorEngine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One calculator key press.
///
/// Each variant corresponds to exactly one engine operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Digit(char),
    Decimal,
    ToggleSign,
    Percent,
    ClearEntry,
    AllClear,
    Operator(Operator),
    Equals,
}

impl Action {
    /// Map a typed character to an action.
    ///
    /// Besides the visible keys this understands Enter (`'\n'`, `'\r'`),
    /// Backspace (`'\u{8}'`, `'\u{7f}'`), Escape (`'\u{1b}'`) and the sign
    /// shortcuts `~` and `_`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tally::{Action, Operator};
    ///
    /// assert_eq!(Action::from_key('7').unwrap(), Action::Digit('7'));
    /// assert_eq!(Action::from_key('/').unwrap(), Action::Operator(Operator::Div));
    /// assert!(Action::from_key('x').is_err());
    /// ```
    pub fn from_key(key: char) -> Result<Self, InputError> {
        if key.is_ascii_digit() {
            return Ok(Self::Digit(key));
        }
        if let Some(operator) = Operator::from_symbol(key) {
            return Ok(Self::Operator(operator));
        }

        match key {
            '.' => Ok(Self::Decimal),
            '=' | '\n' | '\r' => Ok(Self::Equals),
            '%' => Ok(Self::Percent),
            '~' | '_' => Ok(Self::ToggleSign),
            '\u{8}' | '\u{7f}' => Ok(Self::ClearEntry),
            '\u{1b}' => Ok(Self::AllClear),
            other => Err(InputError::UnknownKey(other)),
        }
    }

    /// Map a button label to an action.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tally::Action;
    ///
    /// assert_eq!(Action::from_label("AC").unwrap(), Action::AllClear);
    /// assert_eq!(Action::from_label("±").unwrap(), Action::ToggleSign);
    /// ```
    pub fn from_label(label: &str) -> Result<Self, InputError> {
        match label {
            "AC" => Ok(Self::AllClear),
            "CE" => Ok(Self::ClearEntry),
            "±" | "+/-" => Ok(Self::ToggleSign),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(key), None) if key.is_ascii_graphic() => Self::from_key(key)
                        .map_err(|_| InputError::UnknownLabel(label.to_string())),
                    _ => Err(InputError::UnknownLabel(label.to_string())),
                }
            }
        }
    }

    /// Map a named special key to an action.
    pub fn from_named_key(name: &str) -> Result<Self, InputError> {
        match name {
            "Return" | "Enter" | "KP_Enter" => Ok(Self::Equals),
            "BackSpace" | "Backspace" => Ok(Self::ClearEntry),
            "Escape" | "Esc" => Ok(Self::AllClear),
            _ => Err(InputError::UnknownNamedKey(name.to_string())),
        }
    }

    /// Run the matching engine operation and return the new display.
    pub fn dispatch(self, engine: &mut CalculatorEngine) -> &str {
        match self {
            Self::Digit(digit) => engine.input_digit(digit),
            Self::Decimal => engine.input_decimal(),
            Self::ToggleSign => engine.toggle_sign(),
            Self::Percent => engine.percent(),
            Self::ClearEntry => engine.clear_entry(),
            Self::AllClear => engine.all_clear(),
            Self::Operator(operator) => engine.push_operator(operator),
            Self::Equals => engine.equals(),
        }
    }

    /// Label of the button that triggers this action.
    pub fn label(&self) -> String {
        match self {
            Self::Digit(digit) => digit.to_string(),
            Self::Decimal => ".".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::AllClear => "AC".to_string(),
            Self::Operator(operator) => operator.to_string(),
            Self::Equals => "=".to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.label())
    }
}

/// Split a keystroke script into actions.
///
/// Whitespace separates tokens. A token that is a named key (`Enter`,
/// `Escape`, ...) or a multi-character label (`AC`, `CE`, `+/-`) is one
/// action; any other token is read one key per character.
///
/// # Example
///
/// ```rust
/// use tally::{parse_sequence, CalculatorEngine};
///
/// let mut engine = CalculatorEngine::new();
/// for action in parse_sequence("12+30 Enter").unwrap() {
///     action.dispatch(&mut engine);
/// }
/// assert_eq!(engine.display(), "42");
/// ```
pub fn parse_sequence(script: &str) -> Result<Vec<Action>, InputError> {
    let mut actions = Vec::new();
    for token in script.split_whitespace() {
        if let Ok(action) = Action::from_named_key(token).or_else(|_| Action::from_label(token)) {
            actions.push(action);
            continue;
        }
        for key in token.chars() {
            actions.push(Action::from_key(key)?);
        }
    }
    Ok(actions)
}
