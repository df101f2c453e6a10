//! Choice gating for branching narratives.
//!
//! Conditions decide whether a choice is shown or enabled; effects and costs
//! describe how taking a choice (or entering a node) changes player state.

mod condition;
mod cost;
mod effect;

pub use condition::{ComparisonOperator, Condition, InventoryOperator, evaluate};
pub use cost::Cost;
pub use effect::{EffectSet, ModifyOperation, Modification, apply};
