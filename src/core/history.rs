//! Phase transition trace.
//!
//! Records when the engine moved between phases and which operation moved
//! it. The log is bounded and only ever read for diagnostics; it cannot be
//! replayed or rewound.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions a [`PhaseHistory`] keeps.
pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

/// Record of a single phase change.
///
/// # Example
///
/// ```rust
/// use tally::core::{Phase, PhaseTransition};
/// use chrono::Utc;
///
/// let transition = PhaseTransition {
///     from: Phase::Entering,
///     to: Phase::JustEvaluated,
///     operation: "equals".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.operation, "equals");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PhaseTransition<S: State> {
    /// The phase being left
    pub from: S,
    /// The phase being entered
    pub to: S,
    /// Name of the engine operation that caused the change
    pub operation: String,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded log of phase transitions.
///
/// When full, recording drops the oldest entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PhaseHistory<S: State> {
    transitions: VecDeque<PhaseTransition<S>>,
    capacity: usize,
}

impl<S: State> Default for PhaseHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> PhaseHistory<S> {
    /// Create an empty history holding up to [`DEFAULT_HISTORY_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty history holding up to `capacity` entries.
    ///
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Append a transition, evicting the oldest one if the log is full.
    pub fn record(&mut self, transition: PhaseTransition<S>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of phases traversed.
    ///
    /// Returns the `from` phase of the oldest retained transition followed
    /// by the `to` phase of every transition.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tally::core::{Phase, PhaseHistory, PhaseTransition};
    /// use chrono::Utc;
    ///
    /// let mut history = PhaseHistory::new();
    /// history.record(PhaseTransition {
    ///     from: Phase::Entering,
    ///     to: Phase::JustEvaluated,
    ///     operation: "input_operator".to_string(),
    ///     timestamp: Utc::now(),
    /// });
    /// history.record(PhaseTransition {
    ///     from: Phase::JustEvaluated,
    ///     to: Phase::Entering,
    ///     operation: "input_digit".to_string(),
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// let path = history.get_path();
    /// assert_eq!(path, vec![&Phase::Entering, &Phase::JustEvaluated, &Phase::Entering]);
    /// ```
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the oldest and newest retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Iterate over retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &PhaseTransition<S>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
