//! Story engine for InkLoom.
//!
//! Walks a directed graph of narrative nodes, gates choices with conditions
//! evaluated against a mutable player state (variables, inventory,
//! achievements), applies declarative effects and costs, and resolves text
//! placeholders for rendering. Fetching, unpacking, persisting, and playing
//! back stories belongs to the host application; the engine only consumes a
//! story document and produces views and state snapshots.

/// Choice gating: conditions, effects, and costs.
pub mod choice;
/// Engine configuration.
pub mod config;
/// The engine controller and its state machine.
pub mod engine;
/// Error types for the story engine.
pub mod error;
/// Events emitted by engine transitions.
pub mod event;
/// Player state management.
pub mod state;
/// Story document model.
pub mod story;
/// Text interpolation for narrative strings.
pub mod text;
/// Story document linting.
pub mod validate;
/// Variable values.
pub mod value;
/// Render-ready projections of the engine state.
pub mod view;

pub use choice::{Condition, Cost, EffectSet, evaluate};
pub use config::EngineConfig;
pub use engine::{EnginePhase, StoryEngine};
pub use error::{AssetKind, EngineError, EngineResult};
pub use event::{EngineEvent, HapticKind, Transition};
pub use state::PlayerState;
pub use story::{Choice, Node, StoryDocument, StoryPackage};
pub use text::TextRenderer;
pub use validate::{Severity, ValidationIssue, ValidationReport, validate};
pub use value::Value;
pub use view::{StoryView, VisibleChoice};
