//! Stacking buff/debuff state with resistance rolls.

mod engine;
mod key;

pub use engine::{StatusEngine, StatusInstance};
pub use key::{StatusKey, StatusParams, StatusPolarity};
