//! Player state management.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::story::StoryDocument;
use crate::value::Value;

/// Progress of one playthrough.
///
/// Serializes to the save format handed to the persistence layer:
/// `{ currentNode, variables, inventory, history, achievements, timestamp }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// The node the player is on. Empty before the first node is entered.
    #[serde(rename = "currentNode", default)]
    pub current_node_id: String,
    /// Variable bindings.
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    /// Items held, in acquisition order. Duplicates are allowed.
    #[serde(default)]
    pub inventory: Vec<String>,
    /// Every node entered, repeats included.
    #[serde(default)]
    pub history: Vec<String>,
    /// Unlocked achievement ids, in unlock order, without duplicates.
    #[serde(default)]
    pub achievements: Vec<String>,
    /// When this state was created or last snapshotted.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_node_id: String::new(),
            variables: BTreeMap::new(),
            inventory: Vec::new(),
            history: Vec::new(),
            achievements: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}

impl PlayerState {
    /// Create an empty player state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the opening state for a document: variables bound to their
    /// initial values, everything else empty.
    pub fn fresh(document: &StoryDocument) -> Self {
        let variables = document
            .variable_definitions()
            .iter()
            .filter_map(|(name, def)| def.initial_value.clone().map(|v| (name.clone(), v)))
            .collect();
        Self {
            variables,
            ..Self::default()
        }
    }

    /// Parse a saved state.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidSave(e.to_string()))
    }

    /// Encode this state for the persistence layer.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Get a variable value.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Set a variable value.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Check if the player holds at least one of an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Append an item to the inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Remove every occurrence of an item. Returns how many were removed.
    pub fn remove_all(&mut self, item: &str) -> usize {
        let before = self.inventory.len();
        self.inventory.retain(|i| i != item);
        before - self.inventory.len()
    }

    /// Remove the first occurrence of an item.
    pub fn remove_first(&mut self, item: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|i| i == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check if an achievement is unlocked.
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    /// Unlock an achievement. Returns false if it was already unlocked.
    pub fn unlock(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.has_achievement(&id) {
            return false;
        }
        self.achievements.push(id);
        true
    }

    /// Move to a node and record it in the history.
    pub(crate) fn visit(&mut self, node_id: &str) {
        self.current_node_id = node_id.to_string();
        self.history.push(node_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_state_new() {
        let state = PlayerState::new();
        assert!(state.current_node_id.is_empty());
        assert!(state.variables.is_empty());
        assert!(state.inventory.is_empty());
        assert!(state.history.is_empty());
        assert!(state.achievements.is_empty());
    }

    #[test]
    fn inventory_keeps_duplicates() {
        let mut state = PlayerState::new();
        state.add_item("sword");
        state.add_item("sword");
        state.add_item("shield");
        assert_eq!(state.inventory, vec!["sword", "sword", "shield"]);
        assert!(state.has_item("shield"));
        assert!(!state.has_item("Sword"));
    }

    #[test]
    fn remove_first_versus_remove_all() {
        let mut state = PlayerState::new();
        state.inventory = vec!["sword".into(), "torch".into(), "sword".into()];

        assert!(state.remove_first("sword"));
        assert_eq!(state.inventory, vec!["torch", "sword"]);

        state.add_item("sword");
        assert_eq!(state.remove_all("sword"), 2);
        assert_eq!(state.inventory, vec!["torch"]);

        assert!(!state.remove_first("sword"));
        assert_eq!(state.remove_all("sword"), 0);
    }

    #[test]
    fn achievements_deduplicate() {
        let mut state = PlayerState::new();
        assert!(state.unlock("first_steps"));
        assert!(state.unlock("explorer"));
        assert!(!state.unlock("first_steps"));
        assert_eq!(state.achievements, vec!["first_steps", "explorer"]);
    }

    #[test]
    fn visit_appends_history() {
        let mut state = PlayerState::new();
        state.visit("start");
        state.visit("cave");
        state.visit("start");
        assert_eq!(state.current_node_id, "start");
        assert_eq!(state.history, vec!["start", "cave", "start"]);
    }

    #[test]
    fn save_format_field_names() {
        let mut state = PlayerState::new();
        state.visit("end");
        state.set_variable("gold", 10);
        state.add_item("torch");

        let json: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
        assert_eq!(json["currentNode"], "end");
        assert_eq!(json["variables"]["gold"], 10.0);
        assert_eq!(json["inventory"][0], "torch");
        assert_eq!(json["history"][0], "end");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn partial_save_fills_defaults() {
        let state = PlayerState::from_json(r#"{"currentNode": "end", "inventory": ["torch"]}"#)
            .unwrap();
        assert_eq!(state.current_node_id, "end");
        assert_eq!(state.inventory, vec!["torch"]);
        assert!(state.history.is_empty());
        assert!(state.variables.is_empty());
    }

    #[test]
    fn malformed_save_is_rejected() {
        let err = PlayerState::from_json("{\"inventory\": 3}").unwrap_err();
        assert!(matches!(err, EngineError::InvalidSave(_)));
    }
}
