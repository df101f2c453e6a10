//! Costs deducted when a choice is taken.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::PlayerState;
use crate::value::Value;

/// Resources spent by taking a choice.
///
/// Affordability is never checked: variables may go negative and missing
/// items are skipped. Gate a choice with conditions to require payment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cost {
    /// Amounts subtracted from variables.
    pub variables: BTreeMap<String, f64>,
    /// Items consumed, one occurrence each.
    pub inventory: Vec<String>,
}

impl Cost {
    /// Deduct the cost, returning the updated state.
    ///
    /// Unlike `remove_inventory`, only the first occurrence of each listed
    /// item is removed.
    pub fn apply(&self, state: &PlayerState) -> PlayerState {
        let mut next = state.clone();

        for (name, amount) in &self.variables {
            let current = next
                .variable(name)
                .and_then(Value::as_number)
                .unwrap_or(0.0);
            next.set_variable(name.clone(), current - amount);
        }

        for item in &self.inventory {
            next.remove_first(item);
        }

        next
    }
}
