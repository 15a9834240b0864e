//! Calculator state machine.

use super::state::CalculatorState;
use crate::core::{
    format_number, parse_display, ArithmeticError, Operator, Phase, PhaseHistory,
    PhaseTransition, State,
};
use chrono::Utc;
use tracing::{debug, trace, warn};

/// Running-total calculator.
///
/// Operators fold left to right as soon as the next operator or equals is
/// pressed; there is no precedence.
///
/// # Example
///
/// ```rust
/// use tally::CalculatorEngine;
///
/// let mut engine = CalculatorEngine::new();
/// engine.input_digit('5');
/// engine.input_operator('+');
/// engine.input_digit('3');
/// engine.input_operator('*');
/// engine.input_digit('2');
/// assert_eq!(engine.equals(), "16");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CalculatorEngine {
    state: CalculatorState,
    history: PhaseHistory<Phase>,
}

impl CalculatorEngine {
    /// Create an engine in the all-clear state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose phase history keeps at most `capacity` entries.
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            state: CalculatorState::default(),
            history: PhaseHistory::with_capacity(capacity),
        }
    }

    /// Current display text (pure)
    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// Current phase (pure)
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn stored_value(&self) -> Option<f64> {
        self.state.stored_value
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.state.pending_operator
    }

    pub fn is_just_evaluated(&self) -> bool {
        self.state.just_evaluated
    }

    /// Read-only view of the whole state record, e.g. for serialization.
    pub fn snapshot(&self) -> &CalculatorState {
        &self.state
    }

    /// Phase transitions recorded so far (pure)
    pub fn history(&self) -> &PhaseHistory<Phase> {
        &self.history
    }

    /// Type one digit.
    ///
    /// Anything other than `'0'..='9'` is ignored. After a result the digit
    /// starts a new number; after an error the whole engine is reset first.
    /// A lone `"0"` or `"-0"` has its zero replaced instead of extended.
    pub fn input_digit(&mut self, digit: char) -> &str {
        if !digit.is_ascii_digit() {
            return self.display();
        }

        let before = self.phase();
        self.begin_entry(before);

        let display = &mut self.state.display;
        if display.as_str() == "0" {
            *display = digit.to_string();
        } else if display.as_str() == "-0" {
            *display = format!("-{digit}");
        } else {
            display.push(digit);
        }

        self.finish("input_digit", before)
    }

    /// Type the decimal point.
    ///
    /// Starts `"0."` after a result or an error. A second point in the same
    /// number is ignored.
    pub fn input_decimal(&mut self) -> &str {
        let before = self.phase();
        if before != Phase::Entering {
            self.begin_entry(before);
            self.state.display = "0.".to_string();
        } else if !self.state.display.contains('.') {
            self.state.display.push('.');
        }

        self.finish("input_decimal", before)
    }

    /// Flip the sign of the displayed number.
    ///
    /// A bare `"0"` and the error display are left alone.
    pub fn toggle_sign(&mut self) -> &str {
        let before = self.phase();
        if before.is_error() {
            return self.display();
        }

        let display = &mut self.state.display;
        if display.starts_with('-') {
            display.remove(0);
        } else if display.as_str() != "0" {
            display.insert(0, '-');
        }

        self.finish("toggle_sign", before)
    }

    /// Divide the displayed number by 100.
    ///
    /// The stored operand and pending operator are untouched.
    pub fn percent(&mut self) -> &str {
        let before = self.phase();
        let value = match self.current_value() {
            Some(Ok(value)) => value,
            Some(Err(err)) => return self.fail(err, "percent", before),
            None => return self.display(),
        };

        self.state.display = format_number(value / 100.0);
        self.finish("percent", before)
    }

    /// Delete the last typed character.
    ///
    /// After a result or an error this clears everything instead. The
    /// display collapses to `"0"` rather than becoming empty or a bare `"-"`.
    pub fn clear_entry(&mut self) -> &str {
        let before = self.phase();
        if before != Phase::Entering {
            self.state = CalculatorState::default();
            return self.finish("clear_entry", before);
        }

        let display = &mut self.state.display;
        if display.len() <= 1 || (display.len() == 2 && display.starts_with('-')) {
            *display = "0".to_string();
        } else {
            display.pop();
        }

        self.finish("clear_entry", before)
    }

    /// Reset to the construction state and show `"0"`.
    pub fn all_clear(&mut self) -> &str {
        let before = self.phase();
        self.state = CalculatorState::default();
        self.finish("all_clear", before)
    }

    /// Press an operator key by symbol.
    ///
    /// Symbols other than `+`, `-`, `*` and `/` are ignored.
    pub fn input_operator(&mut self, symbol: char) -> &str {
        match Operator::from_symbol(symbol) {
            Some(operator) => self.push_operator(operator),
            None => self.display(),
        }
    }

    /// Press an operator key.
    ///
    /// Folds the previously pending operator into the stored value, then
    /// makes `operator` pending and shows the running total.
    pub fn push_operator(&mut self, operator: Operator) -> &str {
        let before = self.phase();
        let value = match self.current_value() {
            Some(Ok(value)) => value,
            Some(Err(err)) => return self.fail(err, "input_operator", before),
            None => return self.display(),
        };

        let total = if self.state.stored_value.is_some() {
            match self.apply_pending(value) {
                Ok(total) => total,
                Err(err) => return self.fail(err, "input_operator", before),
            }
        } else {
            value
        };

        self.state.stored_value = Some(total);
        self.state.pending_operator = Some(operator);
        self.state.display = format_number(total);
        self.state.just_evaluated = true;

        self.finish("input_operator", before)
    }

    /// Fold the pending operator and show the result.
    ///
    /// With nothing pending the displayed number is its own result.
    pub fn equals(&mut self) -> &str {
        let before = self.phase();
        let value = match self.current_value() {
            Some(Ok(value)) => value,
            Some(Err(err)) => return self.fail(err, "equals", before),
            None => return self.display(),
        };

        let result = match self.apply_pending(value) {
            Ok(result) => result,
            Err(err) => return self.fail(err, "equals", before),
        };

        self.state.display = format_number(result);
        self.state.stored_value = None;
        self.state.pending_operator = None;
        self.state.just_evaluated = true;

        self.finish("equals", before)
    }

    /// Displayed number, or `None` when the display is not numeric.
    ///
    /// An entry too long to fit in an `f64` is an overflow.
    fn current_value(&self) -> Option<Result<f64, ArithmeticError>> {
        if self.phase().is_error() {
            return None;
        }
        let value = parse_display(&self.state.display)?;
        if value.is_finite() {
            Some(Ok(value))
        } else {
            Some(Err(ArithmeticError::Overflow))
        }
    }

    fn apply_pending(&self, rhs: f64) -> Result<f64, ArithmeticError> {
        match (self.state.stored_value, self.state.pending_operator) {
            (Some(lhs), Some(operator)) => operator.apply(lhs, rhs),
            _ => Ok(rhs),
        }
    }

    /// Prepare for a fresh number after a result or an error.
    fn begin_entry(&mut self, phase: Phase) {
        match phase {
            Phase::Error => self.state = CalculatorState::default(),
            Phase::JustEvaluated => {
                self.state.just_evaluated = false;
                self.state.display = "0".to_string();
            }
            Phase::Entering => {}
        }
    }

    fn fail(&mut self, err: ArithmeticError, operation: &'static str, before: Phase) -> &str {
        warn!(operation, error = %err, "arithmetic failure, resetting");
        self.state = CalculatorState::error();
        self.finish(operation, before)
    }

    fn finish(&mut self, operation: &'static str, before: Phase) -> &str {
        let after = self.phase();
        if after != before {
            trace!(operation, from = before.name(), to = after.name(), "phase transition");
            self.history.record(PhaseTransition {
                from: before,
                to: after,
                operation: operation.to_string(),
                timestamp: Utc::now(),
            });
        }
        debug!(operation, display = %self.state.display, "display updated");
        &self.state.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ERROR_DISPLAY;

    fn engine_with(keys: &str) -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        for key in keys.chars() {
            match key {
                '0'..='9' => engine.input_digit(key),
                '.' => engine.input_decimal(),
                '=' => engine.equals(),
                '%' => engine.percent(),
                '~' => engine.toggle_sign(),
                '<' => engine.clear_entry(),
                _ => engine.input_operator(key),
            };
        }
        engine
    }

    #[test]
    fn new_engine_shows_zero() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.phase(), Phase::Entering);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(engine.input_digit('7'), "7");
        assert_eq!(engine.input_digit('0'), "70");
    }

    #[test]
    fn zero_does_not_repeat() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit('0');
        assert_eq!(engine.input_digit('0'), "0");
    }

    #[test]
    fn negative_zero_keeps_sign() {
        let mut engine = engine_with("0.~<");
        assert_eq!(engine.display(), "-0");
        assert_eq!(engine.input_digit('5'), "-5");
    }

    #[test]
    fn non_digit_is_ignored() {
        let mut engine = engine_with("12");
        assert_eq!(engine.input_digit('a'), "12");
        assert_eq!(engine.input_digit('.'), "12");
    }

    #[test]
    fn decimal_only_once() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit('1');
        engine.input_decimal();
        assert_eq!(engine.input_decimal(), "1.");
        assert_eq!(engine.input_digit('5'), "1.5");
        assert_eq!(engine.input_decimal(), "1.5");
    }

    #[test]
    fn decimal_after_result_starts_fresh() {
        let mut engine = engine_with("2+3=");
        assert_eq!(engine.input_decimal(), "0.");
        assert!(!engine.is_just_evaluated());
    }

    #[test]
    fn digit_after_result_starts_fresh() {
        let mut engine = engine_with("2+3=");
        assert_eq!(engine.display(), "5");
        assert_eq!(engine.input_digit('9'), "9");
        assert_eq!(engine.phase(), Phase::Entering);
    }

    #[test]
    fn chained_operators_fold_left_to_right() {
        let engine = engine_with("5+3+2=");
        assert_eq!(engine.display(), "10");
    }

    #[test]
    fn no_precedence_between_operators() {
        let engine = engine_with("2+3*4=");
        assert_eq!(engine.display(), "20");
    }

    #[test]
    fn operator_shows_running_total() {
        let mut engine = engine_with("5+3");
        assert_eq!(engine.input_operator('-'), "8");
        assert_eq!(engine.stored_value(), Some(8.0));
        assert_eq!(engine.pending_operator(), Some(Operator::Sub));
        assert!(engine.is_just_evaluated());
    }

    #[test]
    fn unknown_operator_is_ignored() {
        let mut engine = engine_with("5");
        assert_eq!(engine.input_operator('^'), "5");
        assert_eq!(engine.pending_operator(), None);
        assert_eq!(engine.stored_value(), None);
    }

    #[test]
    fn equals_without_operator_is_identity() {
        let mut engine = engine_with("42");
        assert_eq!(engine.equals(), "42");
        assert!(engine.is_just_evaluated());
    }

    #[test]
    fn equals_clears_chain() {
        let engine = engine_with("6/4=");
        assert_eq!(engine.display(), "1.5");
        assert_eq!(engine.stored_value(), None);
        assert_eq!(engine.pending_operator(), None);
    }

    #[test]
    fn result_can_start_new_chain() {
        let engine = engine_with("2+3=*4=");
        assert_eq!(engine.display(), "20");
    }

    #[test]
    fn division_by_zero_shows_error() {
        let engine = engine_with("5/0=");
        assert_eq!(engine.display(), ERROR_DISPLAY);
        assert_eq!(engine.phase(), Phase::Error);
        assert_eq!(engine.stored_value(), None);
        assert_eq!(engine.pending_operator(), None);
    }

    #[test]
    fn division_by_zero_while_chaining_shows_error() {
        let engine = engine_with("5/0+");
        assert_eq!(engine.display(), ERROR_DISPLAY);
        assert_eq!(engine.pending_operator(), None);
    }

    #[test]
    fn digit_after_error_resets_everything() {
        let mut engine = engine_with("5/0=");
        assert_eq!(engine.input_digit('9'), "9");
        assert_eq!(engine.stored_value(), None);
        assert_eq!(engine.pending_operator(), None);
        assert_eq!(engine.phase(), Phase::Entering);
    }

    #[test]
    fn zero_after_error_is_single_zero() {
        let mut engine = engine_with("5/0=");
        assert_eq!(engine.input_digit('0'), "0");
    }

    #[test]
    fn decimal_after_error_starts_fraction() {
        let mut engine = engine_with("5/0=");
        assert_eq!(engine.input_decimal(), "0.");
        assert_eq!(engine.stored_value(), None);
    }

    #[test]
    fn error_ignores_non_entry_keys() {
        let mut engine = engine_with("5/0=");
        assert_eq!(engine.percent(), ERROR_DISPLAY);
        assert_eq!(engine.toggle_sign(), ERROR_DISPLAY);
        assert_eq!(engine.input_operator('+'), ERROR_DISPLAY);
        assert_eq!(engine.equals(), ERROR_DISPLAY);
    }

    #[test]
    fn clear_entry_leaves_error() {
        let mut engine = engine_with("5/0=");
        assert_eq!(engine.clear_entry(), "0");
        assert_eq!(engine.phase(), Phase::Entering);
    }

    #[test]
    fn percent_divides_by_hundred() {
        let mut engine = engine_with("50");
        assert_eq!(engine.percent(), "0.5");
    }

    #[test]
    fn percent_keeps_pending_operation() {
        let mut engine = engine_with("200+10");
        assert_eq!(engine.percent(), "0.1");
        assert_eq!(engine.stored_value(), Some(200.0));
        assert_eq!(engine.pending_operator(), Some(Operator::Add));
        assert_eq!(engine.equals(), "200.1");
    }

    #[test]
    fn toggle_sign_round_trips() {
        let mut engine = engine_with("12.5");
        assert_eq!(engine.toggle_sign(), "-12.5");
        assert_eq!(engine.toggle_sign(), "12.5");
    }

    #[test]
    fn toggle_sign_on_zero_is_noop() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(engine.toggle_sign(), "0");
    }

    #[test]
    fn negative_operand_participates() {
        let engine = engine_with("8~-2=");
        assert_eq!(engine.display(), "-10");
    }

    #[test]
    fn clear_entry_removes_last_character() {
        let mut engine = engine_with("123");
        assert_eq!(engine.clear_entry(), "12");
        assert_eq!(engine.clear_entry(), "1");
        assert_eq!(engine.clear_entry(), "0");
        assert_eq!(engine.clear_entry(), "0");
    }

    #[test]
    fn clear_entry_never_leaves_bare_minus() {
        let mut engine = engine_with("5~");
        assert_eq!(engine.display(), "-5");
        assert_eq!(engine.clear_entry(), "0");
    }

    #[test]
    fn clear_entry_after_result_clears_all() {
        let mut engine = engine_with("5+3");
        engine.input_operator('+');
        assert_eq!(engine.clear_entry(), "0");
        assert_eq!(engine.stored_value(), None);
        assert_eq!(engine.pending_operator(), None);
    }

    #[test]
    fn all_clear_resets_everything() {
        let mut engine = engine_with("5+3");
        assert_eq!(engine.all_clear(), "0");
        assert_eq!(engine.snapshot(), &CalculatorState::default());
    }

    #[test]
    fn fractional_results_are_trimmed() {
        let engine = engine_with("0.1+0.2=");
        assert_eq!(engine.display(), "0.3");
    }

    #[test]
    fn overflow_shows_error() {
        let mut engine = CalculatorEngine::new();
        engine.input_digit('9');
        for _ in 0..307 {
            engine.input_digit('9');
        }
        engine.input_operator('*');
        engine.input_digit('9');
        engine.input_digit('9');
        engine.input_digit('9');
        assert_eq!(engine.equals(), ERROR_DISPLAY);
    }

    fn engine_with_oversized_entry() -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        for _ in 0..400 {
            engine.input_digit('9');
        }
        engine
    }

    #[test]
    fn oversized_entry_equals_shows_error() {
        let mut engine = engine_with_oversized_entry();
        assert_eq!(engine.equals(), ERROR_DISPLAY);
        assert_eq!(engine.phase(), Phase::Error);
    }

    #[test]
    fn oversized_entry_operator_shows_error() {
        let mut engine = engine_with_oversized_entry();
        assert_eq!(engine.input_operator('+'), ERROR_DISPLAY);
        assert_eq!(engine.stored_value(), None);
        assert_eq!(engine.pending_operator(), None);
    }

    #[test]
    fn oversized_entry_percent_shows_error() {
        let mut engine = engine_with_oversized_entry();
        assert_eq!(engine.percent(), ERROR_DISPLAY);
    }

    #[test]
    fn history_records_phase_changes() {
        let engine = engine_with("5/0=9");
        let path = engine.history().get_path();
        assert_eq!(
            path,
            vec![
                &Phase::Entering,
                &Phase::JustEvaluated,
                &Phase::Entering,
                &Phase::Error,
                &Phase::Entering,
            ]
        );
        let operations: Vec<&str> = engine
            .history()
            .transitions()
            .map(|t| t.operation.as_str())
            .collect();
        assert_eq!(
            operations,
            vec!["input_operator", "input_digit", "equals", "input_digit"]
        );
    }

    #[test]
    fn history_capacity_is_configurable() {
        let mut engine = CalculatorEngine::with_history_capacity(1);
        engine.input_digit('1');
        engine.equals();
        engine.input_digit('2');
        assert_eq!(engine.history().len(), 1);
    }
}
