//! Configuration for a story engine.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::error::EngineResult;

/// Configuration for a playthrough.
///
/// Deserializes from the host application's settings blob; keys the engine
/// does not use (text size, dark mode, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// RNG seed for random conditions and `{random:...}` text.
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Whether node audio is surfaced in views.
    pub sound_enabled: bool,
    /// Whether transitions emit haptic hints.
    pub vibration: bool,
    /// Remove `{typewriter}` markers while rendering.
    pub strip_typewriter: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sound_enabled: true,
            vibration: true,
            strip_typewriter: false,
        }
    }
}

impl EngineConfig {
    /// Parse a settings blob.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable audio in views.
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Enable or disable haptic hints.
    pub fn with_vibration(mut self, enabled: bool) -> Self {
        self.vibration = enabled;
        self
    }

    /// Strip typewriter markers for headless rendering.
    pub fn with_strip_typewriter(mut self, strip: bool) -> Self {
        self.strip_typewriter = strip;
        self
    }

    /// Build the RNG this configuration describes.
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
