//! Render-ready projections of the engine state.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::EnginePhase;
use crate::value::Value;

/// What the host renders for the current node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryView {
    /// Current node id.
    pub node_id: String,
    /// Node heading.
    pub title: Option<String>,
    /// Node text with every directive resolved.
    pub resolved_text: String,
    /// Image asset id, present only if the document defines it.
    pub image: Option<String>,
    /// Audio asset id, present only if the document defines it and sound
    /// is enabled.
    pub audio: Option<String>,
    /// Choices whose show gate passed, in document order. Empty at an
    /// ending.
    pub visible_choices: Vec<VisibleChoice>,
    /// Whether the story can continue.
    pub phase: EnginePhase,
    /// Inventory at the time of the view.
    pub inventory: Vec<String>,
    /// Variables at the time of the view.
    pub variables: BTreeMap<String, Value>,
    /// Unlocked achievements at the time of the view.
    pub achievements: Vec<String>,
}

/// A choice as presented to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleChoice {
    /// Choice id, passed back to `select_choice`.
    pub id: String,
    /// Label with directives resolved.
    pub text: String,
    /// Whether the enable gate passed.
    pub enabled: bool,
}

impl StoryView {
    /// Enablement of each visible choice, in order.
    pub fn enabled_flags(&self) -> Vec<bool> {
        self.visible_choices.iter().map(|c| c.enabled).collect()
    }

    /// Whether this view is an ending.
    pub fn is_ending(&self) -> bool {
        self.phase == EnginePhase::Ended
    }
}
