//! Effects that modify player state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::PlayerState;
use crate::value::Value;

/// A declarative batch of state changes, applied on node entry or when a
/// choice is taken.
///
/// Parts apply in a fixed order: `set_variables`, `modify_variables`,
/// `add_inventory`, `remove_inventory`, `unlock_achievements`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSet {
    /// Variables overwritten with literal values.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub set_variables: BTreeMap<String, Value>,
    /// Arithmetic on the (post-set) current values.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub modify_variables: BTreeMap<String, Modification>,
    /// Items appended to the inventory.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_inventory: Vec<String>,
    /// Items removed from the inventory, every occurrence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_inventory: Vec<String>,
    /// Achievements unlocked, skipping ones already held.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unlock_achievements: Vec<String>,
}

/// One arithmetic update in `modify_variables`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    /// Operation to perform.
    #[serde(default)]
    pub operation: ModifyOperation,
    /// Operand, or the new value for [`ModifyOperation::Set`].
    pub value: Value,
}

/// Arithmetic operations for `modify_variables`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifyOperation {
    /// `current + value`.
    Add,
    /// `current - value`.
    Subtract,
    /// `current * value`.
    Multiply,
    /// Replace with `value`. Also used for unrecognized operations.
    #[default]
    #[serde(other)]
    Set,
}

impl Modification {
    /// Compute the new value from the current one.
    ///
    /// An unset or non-numeric current value counts as 0, as does a
    /// non-numeric operand.
    pub fn apply_to(&self, current: Option<&Value>) -> Value {
        let lhs = || current.and_then(Value::as_number).unwrap_or(0.0);
        let rhs = || self.value.as_number().unwrap_or(0.0);
        match self.operation {
            ModifyOperation::Add => Value::Number(lhs() + rhs()),
            ModifyOperation::Subtract => Value::Number(lhs() - rhs()),
            ModifyOperation::Multiply => Value::Number(lhs() * rhs()),
            ModifyOperation::Set => self.value.clone(),
        }
    }
}

impl EffectSet {
    /// Whether the set changes nothing.
    pub fn is_empty(&self) -> bool {
        self.set_variables.is_empty()
            && self.modify_variables.is_empty()
            && self.add_inventory.is_empty()
            && self.remove_inventory.is_empty()
            && self.unlock_achievements.is_empty()
    }

    /// Apply the effects, returning the updated state. The input is left
    /// untouched.
    pub fn apply(&self, state: &PlayerState) -> PlayerState {
        let mut next = state.clone();

        for (name, value) in &self.set_variables {
            next.set_variable(name.clone(), value.clone());
        }

        for (name, modification) in &self.modify_variables {
            let updated = modification.apply_to(next.variable(name));
            next.set_variable(name.clone(), updated);
        }

        next.inventory.extend(self.add_inventory.iter().cloned());

        if !self.remove_inventory.is_empty() {
            next.inventory
                .retain(|item| !self.remove_inventory.contains(item));
        }

        for id in &self.unlock_achievements {
            next.unlock(id.clone());
        }

        next
    }
}

/// Apply an effect set to a state. See [`EffectSet::apply`].
pub fn apply(effects: &EffectSet, state: &PlayerState) -> PlayerState {
    effects.apply(state)
}
