//! The engine controller.
//!
//! `StoryEngine` owns one playthrough: the immutable document, the player
//! state, and the RNG used by random conditions and text. Calls run to
//! completion synchronously; a single caller drives each instance.
//!
//! Every state-changing call builds the next state off to the side and only
//! commits it once the whole transition succeeded, so a failed call leaves
//! the player where they were.

use chrono::Utc;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::choice::{EffectSet, evaluate};
use crate::config::EngineConfig;
use crate::error::{AssetKind, EngineError, EngineResult};
use crate::event::{EngineEvent, HapticKind, Transition};
use crate::state::PlayerState;
use crate::story::{Node, StoryDocument};
use crate::text::TextRenderer;
use crate::view::{StoryView, VisibleChoice};

/// Where a playthrough stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    /// The current node offers choices.
    Ready,
    /// The current node is an ending: flagged as one, or without choices.
    Ended,
}

/// An active playthrough of one story.
#[derive(Debug)]
pub struct StoryEngine {
    document: StoryDocument,
    config: EngineConfig,
    renderer: TextRenderer,
    state: PlayerState,
    rng: StdRng,
    last: Transition,
}

impl StoryEngine {
    /// Start or resume a playthrough.
    ///
    /// Without a saved state the player starts at the document's start node
    /// with variables at their initial values. A saved state is taken as-is
    /// and its current node is entered again, so node effects re-apply and
    /// the node is appended to the history once more.
    pub fn initialize(
        document: StoryDocument,
        saved: Option<PlayerState>,
        config: EngineConfig,
    ) -> EngineResult<Self> {
        let restored = saved.is_some();
        let state = saved.unwrap_or_else(|| PlayerState::fresh(&document));
        let target = if state.current_node_id.is_empty() {
            document.start_node().to_string()
        } else {
            state.current_node_id.clone()
        };

        let mut events = Vec::new();
        let state = enter(&document, &config, &target, state, &mut events)?;
        info!(node = %target, restored, "story initialized");

        Ok(Self {
            renderer: TextRenderer::new().stripping_typewriter(config.strip_typewriter),
            rng: config.rng(),
            document,
            config,
            state,
            last: Transition {
                from: None,
                to: target,
                events,
            },
        })
    }

    /// Resume from a save produced by [`StoryEngine::serialize`].
    pub fn restore(document: StoryDocument, saved: &str, config: EngineConfig) -> EngineResult<Self> {
        Self::initialize(document, Some(PlayerState::from_json(saved)?), config)
    }

    /// Take a choice on the current node.
    ///
    /// The choice's cost is deducted, then its effects apply, then its
    /// target is entered. Fails without changing state if the choice does
    /// not exist, is hidden or disabled, or leads to a missing node.
    pub fn select_choice(&mut self, choice_id: &str) -> EngineResult<Transition> {
        let from = self.state.current_node_id.clone();
        let node = self.document.node(&from)?;
        if node.is_ending() {
            return Err(EngineError::StoryEnded(from));
        }
        let choice = node
            .choice(choice_id)
            .ok_or_else(|| EngineError::ChoiceNotFound(choice_id.to_string()))?;

        let gates = &choice.conditions;
        if !evaluate(&gates.show_if, &self.state, &mut self.rng)
            || !evaluate(&gates.enable_if, &self.state, &mut self.rng)
        {
            debug!(node = %from, choice = choice_id, "choice gate failed");
            return Err(EngineError::ChoiceUnavailable(choice_id.to_string()));
        }

        let mut events = Vec::new();
        let mut next = match &choice.cost {
            Some(cost) => cost.apply(&self.state),
            None => self.state.clone(),
        };
        if let Some(effects) = &choice.effects {
            next = apply_effects(&self.document, &self.config, effects, &next, &mut events);
        }
        let next = enter(&self.document, &self.config, &choice.target, next, &mut events)?;
        debug!(from = %from, to = %choice.target, choice = choice_id, "choice taken");

        self.state = next;
        self.last = Transition {
            from: Some(from),
            to: self.state.current_node_id.clone(),
            events,
        };
        Ok(self.last.clone())
    }

    /// Project the current node for rendering.
    ///
    /// Text is rendered and gates are evaluated afresh, so `{random:...}`
    /// text and random conditions may differ between calls.
    pub fn view(&mut self) -> EngineResult<StoryView> {
        let node = self.document.node(&self.state.current_node_id)?;
        let phase = phase_of(node);
        let resolved_text = self
            .renderer
            .render(&node.content.text, &self.state, &mut self.rng);

        let mut visible_choices = Vec::new();
        if phase == EnginePhase::Ready {
            for choice in &node.choices {
                if !evaluate(&choice.conditions.show_if, &self.state, &mut self.rng) {
                    continue;
                }
                let enabled = evaluate(&choice.conditions.enable_if, &self.state, &mut self.rng);
                visible_choices.push(VisibleChoice {
                    id: choice.id.clone(),
                    text: self.renderer.render(&choice.text, &self.state, &mut self.rng),
                    enabled,
                });
            }
        }

        let image = node
            .content
            .image
            .as_deref()
            .and_then(|id| self.known_asset(node, AssetKind::Image, id));
        let audio = node
            .content
            .audio
            .as_deref()
            .filter(|_| self.config.sound_enabled)
            .and_then(|id| self.known_asset(node, AssetKind::Audio, id));

        Ok(StoryView {
            node_id: node.id.clone(),
            title: node.title.clone(),
            resolved_text,
            image,
            audio,
            visible_choices,
            phase,
            inventory: self.state.inventory.clone(),
            variables: self.state.variables.clone(),
            achievements: self.state.achievements.clone(),
        })
    }

    /// Throw away all progress and enter the start node again.
    pub fn reset_to_start(&mut self) -> EngineResult<Transition> {
        let from = self.state.current_node_id.clone();
        let start = self.document.start_node().to_string();

        let mut events = Vec::new();
        let fresh = PlayerState::fresh(&self.document);
        self.state = enter(&self.document, &self.config, &start, fresh, &mut events)?;
        info!(from = %from, "playthrough reset to start");

        self.last = Transition {
            from: Some(from),
            to: start,
            events,
        };
        Ok(self.last.clone())
    }

    /// Where the playthrough stands.
    pub fn phase(&self) -> EnginePhase {
        self.document
            .node(&self.state.current_node_id)
            .map_or(EnginePhase::Ended, phase_of)
    }

    /// A copy of the player state, stamped with the current time, for the
    /// persistence layer.
    pub fn snapshot(&self) -> PlayerState {
        let mut snapshot = self.state.clone();
        snapshot.timestamp = Utc::now();
        snapshot
    }

    /// The snapshot encoded as JSON.
    pub fn serialize(&self) -> EngineResult<String> {
        self.snapshot().to_json()
    }

    /// The node the player is on.
    pub fn current_node(&self) -> EngineResult<&Node> {
        self.document.node(&self.state.current_node_id)
    }

    /// The live player state.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Nodes entered so far, repeats included.
    pub fn history(&self) -> &[String] {
        &self.state.history
    }

    /// The story being played.
    pub fn document(&self) -> &StoryDocument {
        &self.document
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The most recent transition, starting with the opening entry.
    pub fn last_transition(&self) -> &Transition {
        &self.last
    }

    fn known_asset(&self, node: &Node, kind: AssetKind, id: &str) -> Option<String> {
        let found = match kind {
            AssetKind::Image => self.document.image(id).map(|_| ()),
            AssetKind::Audio => self.document.audio(id).map(|_| ()),
        };
        match found {
            Ok(()) => Some(id.to_string()),
            Err(error) => {
                warn!(node = %node.id, %error, "omitting missing asset from view");
                None
            }
        }
    }
}

fn phase_of(node: &Node) -> EnginePhase {
    if node.is_ending() {
        EnginePhase::Ended
    } else {
        EnginePhase::Ready
    }
}

/// Enter a node: record the visit, then apply the node's effects.
fn enter(
    document: &StoryDocument,
    config: &EngineConfig,
    node_id: &str,
    state: PlayerState,
    events: &mut Vec<EngineEvent>,
) -> EngineResult<PlayerState> {
    let node = document.node(node_id)?;
    let mut next = state;
    next.visit(node_id);
    debug!(node = node_id, visits = next.history.len(), "entered node");

    events.push(EngineEvent::NodeEntered {
        node_id: node_id.to_string(),
    });
    if config.vibration {
        events.push(EngineEvent::Haptic {
            kind: HapticKind::Light,
        });
    }

    if let Some(effects) = &node.effects {
        next = apply_effects(document, config, effects, &next, events);
    }
    Ok(next)
}

/// Apply effects and report achievements they unlocked.
fn apply_effects(
    document: &StoryDocument,
    config: &EngineConfig,
    effects: &EffectSet,
    state: &PlayerState,
    events: &mut Vec<EngineEvent>,
) -> PlayerState {
    let next = effects.apply(state);
    for id in next.achievements.iter().skip(state.achievements.len()) {
        let name = document
            .achievement(id)
            .map(|a| a.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(id)
            .to_string();
        info!(achievement = %id, name = %name, "achievement unlocked");
        events.push(EngineEvent::AchievementUnlocked {
            id: id.clone(),
            name,
        });
        if config.vibration {
            events.push(EngineEvent::Haptic {
                kind: HapticKind::Success,
            });
        }
    }
    next
}
