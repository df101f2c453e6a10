//! Events emitted by engine transitions.
//!
//! The engine performs no I/O. Anything the host should react to (toasts,
//! haptics) is reported as an event on the [`Transition`] that caused it.

use serde::Serialize;

/// Something the host application may want to present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A node was entered.
    NodeEntered {
        /// The node id.
        node_id: String,
    },
    /// An achievement was unlocked for the first time.
    AchievementUnlocked {
        /// The achievement id.
        id: String,
        /// Display name, or the id if the document does not define one.
        name: String,
    },
    /// Haptic feedback hint. Only emitted when vibration is enabled.
    Haptic {
        /// Pattern to play.
        kind: HapticKind,
    },
}

/// Strength of a haptic hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HapticKind {
    /// A light tap on node entry.
    Light,
    /// A success pattern on achievement unlock.
    Success,
}

/// The outcome of a state-changing engine call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    /// Node before the call, if any.
    pub from: Option<String>,
    /// Node after the call.
    pub to: String,
    /// Events in the order they happened.
    pub events: Vec<EngineEvent>,
}

impl Transition {
    /// Ids of achievements unlocked during this transition.
    pub fn unlocked_achievements(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::AchievementUnlocked { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}
