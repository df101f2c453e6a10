//! Story document model.
//!
//! A story is an immutable graph of nodes keyed by id, plus variable and
//! achievement definitions and an asset index. Documents are loaded from
//! JSON, either bare or wrapped in a [`StoryPackage`].

mod assets;
mod document;
mod package;

pub use assets::{Assets, AudioAsset, ImageAsset};
pub use document::{
    AchievementDefinition, Choice, ChoiceGates, Content, Node, StoryDocument, VariableDefinition,
};
pub use package::StoryPackage;
