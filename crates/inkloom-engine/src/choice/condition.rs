//! Condition evaluation for choice gates.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::state::PlayerState;
use crate::value::Value;

const DEFAULT_PROBABILITY: f64 = 0.5;

/// A predicate over player state.
///
/// Unrecognized `type` tags parse as [`Condition::Unknown`] and always pass,
/// as does any condition that cannot be read at all (no `type`, wrong field
/// shapes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Compare a variable against a literal.
    Variable {
        /// Variable name.
        variable: String,
        /// Comparison to apply. Missing means it always passes.
        #[serde(default)]
        operator: ComparisonOperator,
        /// Right-hand literal. Absent compares against "unset".
        #[serde(default)]
        value: Option<Value>,
    },
    /// Test inventory membership.
    Inventory {
        /// Membership test. Missing means it always passes.
        #[serde(default)]
        operator: InventoryOperator,
        /// Item id, matched exactly.
        item: String,
    },
    /// True once the achievement is unlocked.
    Achievement {
        /// Achievement id.
        achievement: String,
    },
    /// True with the given probability.
    ///
    /// Drawn afresh on every evaluation, so two checks of the same state
    /// can disagree.
    Random {
        /// Chance of passing, defaulting to 0.5.
        #[serde(default)]
        probability: Option<f64>,
    },
    /// Any unrecognized condition type.
    #[serde(other)]
    Unknown,
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Condition::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Condition::deserialize(raw).unwrap_or_else(|error| {
            debug!(%error, "unreadable condition treated as passing");
            Condition::Unknown
        }))
    }
}

/// Operators for [`Condition::Variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// Strict equality.
    #[serde(rename = "==")]
    Eq,
    /// Strict inequality.
    #[serde(rename = "!=")]
    Ne,
    /// Less than.
    #[serde(rename = "<")]
    Lt,
    /// Greater than.
    #[serde(rename = ">")]
    Gt,
    /// Less than or equal.
    #[serde(rename = "<=")]
    Le,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    Ge,
    /// Substring test on the stringified values.
    #[serde(rename = "contains")]
    Contains,
    /// Unrecognized or missing operator; always passes.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Operators for [`Condition::Inventory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryOperator {
    /// The item is held.
    Has,
    /// The item is not held.
    NotHas,
    /// Unrecognized or missing operator; always passes.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ComparisonOperator {
    /// Apply the operator to a possibly-unset variable and a literal.
    pub fn compare(self, current: Option<&Value>, target: Option<&Value>) -> bool {
        match self {
            Self::Eq => current == target,
            Self::Ne => current != target,
            Self::Lt => ordering(current, target).is_some_and(|o| o.is_lt()),
            Self::Gt => ordering(current, target).is_some_and(|o| o.is_gt()),
            Self::Le => ordering(current, target).is_some_and(|o| o.is_le()),
            Self::Ge => ordering(current, target).is_some_and(|o| o.is_ge()),
            Self::Contains => stringify(current).contains(&stringify(target)),
            Self::Unknown => true,
        }
    }
}

// Unset operands have no ordering.
fn ordering(a: Option<&Value>, b: Option<&Value>) -> Option<std::cmp::Ordering> {
    a?.loose_cmp(b?)
}

fn stringify(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_default()
}

impl Condition {
    /// Evaluate the condition against player state.
    pub fn evaluate(&self, state: &PlayerState, rng: &mut StdRng) -> bool {
        match self {
            Condition::Variable {
                variable,
                operator,
                value,
            } => operator.compare(state.variable(variable), value.as_ref()),
            Condition::Inventory { operator, item } => match operator {
                InventoryOperator::Has => state.has_item(item),
                InventoryOperator::NotHas => !state.has_item(item),
                InventoryOperator::Unknown => true,
            },
            Condition::Achievement { achievement } => state.has_achievement(achievement),
            Condition::Random { probability } => {
                rng.random::<f64>() < probability.unwrap_or(DEFAULT_PROBABILITY)
            }
            Condition::Unknown => true,
        }
    }
}

/// Evaluate a gate: every condition must pass. An empty gate passes.
pub fn evaluate(conditions: &[Condition], state: &PlayerState, rng: &mut StdRng) -> bool {
    conditions.iter().all(|c| c.evaluate(state, rng))
}
