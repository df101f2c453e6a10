//! Variable values held in player state.
//!
//! Story variables are loosely typed: a value is a number, a string, or a
//! boolean. Equality is strict (values of different kinds are never equal),
//! while ordering coerces to numbers unless both sides are strings.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A story variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A number. Integers and floats share one representation.
    Number(f64),
    /// A text value.
    Text(String),
}

impl Value {
    /// Whether the value counts as "set" in a conditional block.
    ///
    /// `false`, `0`, `NaN`, and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Numeric view of the value.
    ///
    /// Booleans map to 1/0, blank strings to 0, and numeric strings parse.
    /// Returns `None` for strings that are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse().ok()
                }
            }
        }
    }

    /// Loose ordering used by `<`, `>`, `<=`, `>=`.
    ///
    /// Two strings compare lexicographically; anything else compares
    /// numerically. Returns `None` when either side has no numeric view or
    /// is `NaN`, in which case every ordering test fails.
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => self.as_number()?.partial_cmp(&other.as_number()?),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            // -0 prints as 0
            Self::Number(n) if *n == 0.0 => write!(f, "0"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
