//! Store packages wrapping a story with listing metadata.

use serde::Deserialize;

use super::document::StoryDocument;
use crate::error::{EngineError, EngineResult};

/// A story as distributed by a store or library: listing metadata plus the
/// story itself.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryPackage {
    /// Library id.
    #[serde(default)]
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Author credit.
    #[serde(default)]
    pub author: String,
    /// Blurb.
    #[serde(default)]
    pub description: String,
    /// Thumbnail path or URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Listing tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form play time estimate, e.g. "20 min".
    #[serde(default)]
    pub estimated_play_time: Option<String>,
    /// Free-form rating.
    #[serde(default)]
    pub rating: Option<String>,
    /// The story content.
    pub story: StoryDocument,
}

impl StoryPackage {
    /// Load a package from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let package: Self =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidDocument(e.to_string()))?;
        Ok(Self {
            story: package.story.finish()?,
            ..package
        })
    }
}
