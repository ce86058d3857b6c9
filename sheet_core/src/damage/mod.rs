//! Damage - dice formulas and the per-character damage accumulator

mod accumulator;
mod dice;

pub use accumulator::{DamageAccumulatorEntry, RollDispatcher, ACCUMULATORS_PATH};
pub use dice::{multiply_costs, multiply_formula, DiceFormula};
