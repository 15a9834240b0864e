//! The calculator engine.
//!
//! [`CalculatorEngine`] owns a [`CalculatorState`] and exposes one method per
//! calculator key. Every method returns the text the front end should show.

mod machine;
mod state;

pub use machine::CalculatorEngine;
pub use state::{CalculatorState, ERROR_DISPLAY};
