//! Dice definitions, validation, and selection.

mod die;
mod probability;
mod set;

pub use die::{Die, Face};
pub use probability::{win_probability, ProbabilityTable};
pub use set::DiceSet;
