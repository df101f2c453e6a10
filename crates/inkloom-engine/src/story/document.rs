//! Nodes, choices, and the story document.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::assets::{Assets, AudioAsset, ImageAsset};
use crate::choice::{Condition, Cost, EffectSet};
use crate::error::{AssetKind, EngineError, EngineResult};
use crate::value::Value;

const DEFAULT_START_NODE: &str = "start";

/// The authored content of one story.
///
/// Choice targets are not checked at load time; a dangling target surfaces
/// as [`EngineError::NodeNotFound`] when it is taken. Use
/// [`validate`](crate::validate::validate) to lint a document ahead of play.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryDocument {
    #[serde(default = "default_start_node")]
    start_node: String,
    nodes: HashMap<String, Node>,
    #[serde(default)]
    game_state: Definitions,
    #[serde(default)]
    assets: Assets,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Definitions {
    #[serde(default)]
    variables: BTreeMap<String, VariableDefinition>,
    #[serde(default)]
    achievements: BTreeMap<String, AchievementDefinition>,
}

fn default_start_node() -> String {
    DEFAULT_START_NODE.to_string()
}

impl StoryDocument {
    /// Load a story from JSON.
    ///
    /// Accepts a bare story object or a store package carrying the story
    /// under `story`.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let mut root: serde_json::Value =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidDocument(e.to_string()))?;
        let bare = root.get("nodes").is_some();
        if let Some(story) = root.get_mut("story").filter(|_| !bare) {
            root = story.take();
        }
        Self::from_value(root)
    }

    /// Load a story from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> EngineResult<Self> {
        let document: Self = serde_json::from_value(value)
            .map_err(|e| EngineError::InvalidDocument(e.to_string()))?;
        document.finish()
    }

    /// Assign node ids from their keys and check the start node exists.
    pub(crate) fn finish(mut self) -> EngineResult<Self> {
        for (id, node) in &mut self.nodes {
            node.id.clone_from(id);
        }
        if !self.nodes.contains_key(&self.start_node) {
            return Err(EngineError::InvalidDocument(format!(
                "start node '{}' is not defined",
                self.start_node
            )));
        }
        Ok(self)
    }

    /// The id of the opening node.
    pub fn start_node(&self) -> &str {
        &self.start_node
    }

    /// Look up a node.
    pub fn node(&self, id: &str) -> EngineResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| EngineError::NodeNotFound(id.to_string()))
    }

    /// All nodes, keyed by id.
    pub fn nodes(&self) -> &HashMap<String, Node> {
        &self.nodes
    }

    /// Variable definitions, keyed by variable name.
    pub fn variable_definitions(&self) -> &BTreeMap<String, VariableDefinition> {
        &self.game_state.variables
    }

    /// Achievement definitions, keyed by achievement id.
    pub fn achievement_definitions(&self) -> &BTreeMap<String, AchievementDefinition> {
        &self.game_state.achievements
    }

    /// Look up an achievement's metadata.
    pub fn achievement(&self, id: &str) -> Option<&AchievementDefinition> {
        self.game_state.achievements.get(id)
    }

    /// The asset indices.
    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Look up an image asset.
    pub fn image(&self, id: &str) -> EngineResult<&ImageAsset> {
        self.assets
            .images
            .get(id)
            .ok_or_else(|| EngineError::AssetNotFound {
                kind: AssetKind::Image,
                id: id.to_string(),
            })
    }

    /// Look up an audio asset.
    pub fn audio(&self, id: &str) -> EngineResult<&AudioAsset> {
        self.assets
            .audio
            .get(id)
            .ok_or_else(|| EngineError::AssetNotFound {
                kind: AssetKind::Audio,
                id: id.to_string(),
            })
    }
}

/// Declaration of a story variable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableDefinition {
    /// Value bound when a playthrough starts. `None` leaves it unset.
    #[serde(default)]
    pub initial_value: Option<Value>,
}

/// Display metadata for an achievement.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AchievementDefinition {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Icon asset id or glyph.
    #[serde(default)]
    pub icon: Option<String>,
}

/// A single narrative beat.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    /// The node id (its key in the document).
    #[serde(default)]
    pub id: String,
    /// Optional heading.
    #[serde(default)]
    pub title: Option<String>,
    /// Text and media.
    #[serde(default)]
    pub content: Content,
    /// Outgoing choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Effects applied every time the node is entered.
    #[serde(default)]
    pub effects: Option<EffectSet>,
    /// Explicit ending marker.
    #[serde(default)]
    pub ending: bool,
}

impl Node {
    /// Whether the story stops here.
    pub fn is_ending(&self) -> bool {
        self.ending || self.choices.is_empty()
    }

    /// Find a choice by id.
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }
}

/// Node text and media references.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Content {
    /// Narrative text, possibly containing placeholders.
    #[serde(default)]
    pub text: String,
    /// Image asset id.
    #[serde(default)]
    pub image: Option<String>,
    /// Audio asset id.
    #[serde(default)]
    pub audio: Option<String>,
}

/// A player-selectable transition to another node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Choice {
    /// Choice id, unique within its node.
    pub id: String,
    /// Label shown to the player.
    #[serde(default)]
    pub text: String,
    /// Id of the node this choice leads to.
    pub target: String,
    /// Visibility and enablement gates.
    #[serde(default)]
    pub conditions: ChoiceGates,
    /// Effects applied when taken.
    #[serde(default)]
    pub effects: Option<EffectSet>,
    /// Deductions applied when taken.
    #[serde(default)]
    pub cost: Option<Cost>,
}

/// The two gates on a choice.
///
/// In JSON either a plain list of conditions (an enable gate) or an object
/// with optional `show_if` and `enable_if` lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "GatesRepr")]
pub struct ChoiceGates {
    /// Conditions under which the choice is shown.
    pub show_if: Vec<Condition>,
    /// Conditions under which a shown choice can be selected.
    pub enable_if: Vec<Condition>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GatesRepr {
    List(Vec<Condition>),
    Split {
        #[serde(default)]
        show_if: Vec<Condition>,
        #[serde(default)]
        enable_if: Vec<Condition>,
    },
}

impl From<GatesRepr> for ChoiceGates {
    fn from(repr: GatesRepr) -> Self {
        match repr {
            GatesRepr::List(enable_if) => Self {
                show_if: Vec::new(),
                enable_if,
            },
            GatesRepr::Split { show_if, enable_if } => Self { show_if, enable_if },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "start_node": "gate",
            "game_state": {
                "variables": { "gold": { "initial_value": 5 }, "name": { "initial_value": "Ash" } },
                "achievements": { "opened": { "name": "Door Opener" } }
            },
            "assets": {
                "images": { "door": { "path": "img/door.png", "alt_text": "A door" } },
                "audio": { "wind": { "path": "audio/wind.mp3", "loop": "true" } }
            },
            "nodes": {
                "gate": {
                    "title": "The Gate",
                    "content": { "text": "A gate.", "image": "door", "audio": "wind" },
                    "choices": [
                        { "id": "open", "text": "Open it", "target": "yard",
                          "conditions": [{ "type": "inventory", "operator": "has", "item": "key" }] },
                        { "id": "peek", "text": "Peek", "target": "yard",
                          "conditions": { "show_if": [{ "type": "achievement", "achievement": "opened" }] } }
                    ]
                },
                "yard": { "content": { "text": "Grass." }, "choices": [], "ending": true }
            }
        })
    }

    #[test]
    fn loads_bare_story() {
        let doc = StoryDocument::from_value(sample()).unwrap();
        assert_eq!(doc.start_node(), "gate");
        assert_eq!(doc.nodes().len(), 2);
        assert_eq!(doc.node("yard").unwrap().id, "yard");
        assert_eq!(doc.variable_definitions().len(), 2);
        assert_eq!(doc.achievement("opened").unwrap().name, "Door Opener");
        assert!(doc.audio("wind").unwrap().looping);
    }

    #[test]
    fn loads_packaged_story() {
        let package = json!({ "id": "g1", "title": "Gate", "story": sample() });
        let doc = StoryDocument::from_json(&package.to_string()).unwrap();
        assert_eq!(doc.start_node(), "gate");
    }

    #[test]
    fn start_node_defaults_to_start() {
        let doc = StoryDocument::from_value(json!({
            "nodes": { "start": { "content": { "text": "Hi" } } }
        }))
        .unwrap();
        assert_eq!(doc.start_node(), "start");
    }

    #[test]
    fn missing_start_node_is_rejected() {
        let err = StoryDocument::from_value(json!({
            "start_node": "nowhere",
            "nodes": { "start": {} }
        }))
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDocument(_)));
    }

    #[test]
    fn both_gate_shapes_parse() {
        let doc = StoryDocument::from_value(sample()).unwrap();
        let gate = doc.node("gate").unwrap();

        let open = gate.choice("open").unwrap();
        assert!(open.conditions.show_if.is_empty());
        assert_eq!(open.conditions.enable_if.len(), 1);

        let peek = gate.choice("peek").unwrap();
        assert_eq!(peek.conditions.show_if.len(), 1);
        assert!(peek.conditions.enable_if.is_empty());
    }

    #[test]
    fn malformed_conditions_do_not_reject_the_story() {
        let doc = StoryDocument::from_value(json!({
            "nodes": {
                "start": {
                    "choices": [
                        { "id": "a", "text": "A", "target": "start",
                          "conditions": [{ "variable": "x", "operator": "==", "value": 1 }] },
                        { "id": "b", "text": "B", "target": "start",
                          "conditions": { "enable_if": [{ "type": "variable", "variable": "x", "value": 1 }] } }
                    ]
                }
            }
        }))
        .unwrap();
        let start = doc.node("start").unwrap();
        assert_eq!(start.choice("a").unwrap().conditions.enable_if.len(), 1);
        assert_eq!(start.choice("b").unwrap().conditions.enable_if.len(), 1);
    }

    #[test]
    fn endings() {
        let doc = StoryDocument::from_value(sample()).unwrap();
        assert!(!doc.node("gate").unwrap().is_ending());
        assert!(doc.node("yard").unwrap().is_ending());
    }

    #[test]
    fn asset_lookups_report_missing_ids() {
        let doc = StoryDocument::from_value(sample()).unwrap();
        assert_eq!(doc.image("door").unwrap().alt_text.as_deref(), Some("A door"));
        let err = doc.image("window").unwrap_err();
        assert!(matches!(
            err,
            EngineError::AssetNotFound { kind: AssetKind::Image, ref id } if id == "window"
        ));
        assert!(doc.audio("thunder").is_err());
    }

    #[test]
    fn node_lookup_reports_missing_ids() {
        let doc = StoryDocument::from_value(sample()).unwrap();
        assert!(matches!(doc.node("cellar"), Err(EngineError::NodeNotFound(id)) if id == "cellar"));
    }
}
