//! Front-end key mapping.
//!
//! A front end maps each button or key to exactly one [`Action`] and calls
//! [`Action::dispatch`], then renders the returned text as-is. This module
//! holds that mapping so every front end shares it.

mod action;

pub use action::{parse_sequence, Action};
