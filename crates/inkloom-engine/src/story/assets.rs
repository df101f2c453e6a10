//! Image and audio asset indices.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::value::Value;

/// Asset indices of a story, keyed by asset id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Assets {
    /// Image assets.
    #[serde(default)]
    pub images: BTreeMap<String, ImageAsset>,
    /// Audio assets.
    #[serde(default)]
    pub audio: BTreeMap<String, AudioAsset>,
}

/// An image referenced by node content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageAsset {
    /// Path relative to the story's extraction root.
    pub path: String,
    /// Accessibility text.
    #[serde(default)]
    pub alt_text: Option<String>,
    /// File format, e.g. `png`.
    #[serde(default)]
    pub format: Option<String>,
}

/// An audio track referenced by node content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioAsset {
    /// Path relative to the story's extraction root.
    pub path: String,
    /// Whether playback loops.
    #[serde(default, rename = "loop", deserialize_with = "lenient_bool")]
    pub looping: bool,
    /// Playback volume in `0.0..=1.0`.
    #[serde(default = "default_volume", deserialize_with = "lenient_volume")]
    pub volume: f64,
    /// File format, e.g. `mp3`.
    #[serde(default)]
    pub format: Option<String>,
}

fn default_volume() -> f64 {
    0.5
}

// Story files in the wild spell these as strings ("true", "0.5").
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        other => other.is_truthy(),
    })
}

fn lenient_volume<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_number()
        .filter(|v| v.is_finite())
        .map_or_else(default_volume, |v| v.clamp(0.0, 1.0)))
}
