//! Phase trait and the calculator's entry phases.
//!
//! The engine is always in exactly one [`Phase`]. Phases are plain values
//! with pure inspection methods; the engine decides when to move between them.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for history tracking
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for snapshots
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Where the calculator is in its entry cycle.
///
/// # Example
///
/// ```rust
/// use tally::core::{Phase, State};
///
/// assert_eq!(Phase::default(), Phase::Entering);
/// assert!(Phase::Error.is_error());
/// assert!(!Phase::JustEvaluated.is_error());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Digits and the decimal point accumulate into the display.
    #[default]
    Entering,
    /// A result or chain pivot is shown; the next digit starts a new number.
    JustEvaluated,
    /// An arithmetic failure occurred and `"Error"` is shown.
    Error,
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::Entering => "Entering",
            Self::JustEvaluated => "JustEvaluated",
            Self::Error => "Error",
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}
