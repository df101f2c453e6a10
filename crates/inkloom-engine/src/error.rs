//! Error types for the story engine.

use std::fmt;

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// The kind of asset a lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// An entry in `assets.images`.
    Image,
    /// An entry in `assets.audio`.
    Audio,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

/// Errors that can occur while loading or playing a story.
///
/// Unknown condition types and operators are not errors: they evaluate as
/// passing.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A current or target node id is absent from the document.
    #[error("story node not found: {0}")]
    NodeNotFound(String),

    /// No choice with this id exists on the current node.
    #[error("choice not found: {0}")]
    ChoiceNotFound(String),

    /// The choice exists but its gate currently fails.
    #[error("choice is not available right now: {0}")]
    ChoiceUnavailable(String),

    /// The current node is an ending; no further choices can be taken.
    #[error("the story has ended at node {0}")]
    StoryEnded(String),

    /// An asset id is absent from the document's asset index.
    #[error("{kind} asset not found: {id}")]
    AssetNotFound {
        /// Which asset index was searched.
        kind: AssetKind,
        /// The missing asset id.
        id: String,
    },

    /// The story document does not have the expected shape.
    #[error("invalid story document: {0}")]
    InvalidDocument(String),

    /// A saved player state could not be read.
    #[error("invalid saved state: {0}")]
    InvalidSave(String),

    /// JSON encoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
