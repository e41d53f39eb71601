//! Morpher configuration.

use serde::{Deserialize, Serialize};

use crate::error::MorphError;
use crate::playback::{validate_speed, PlaybackMode};

/// Playback settings for one morpher.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MorpherConfig {
    pub mode: PlaybackMode,
    /// Multiplier applied to every tick delta.
    pub speed: f64,
    /// Initial capacity hint for the keyframe set.
    pub keyframe_capacity: usize,
}

impl Default for MorpherConfig {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::Loop,
            speed: 1.0,
            keyframe_capacity: 16,
        }
    }
}

impl MorpherConfig {
    pub fn with_mode(mode: PlaybackMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MorphError> {
        validate_speed(self.speed)
    }

    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = MorpherConfig::from_json(r#"{ "mode": "Once" }"#).unwrap();
        assert_eq!(cfg.mode, PlaybackMode::Once);
        assert_eq!(cfg.speed, 1.0);
        assert_eq!(cfg.keyframe_capacity, 16);
    }

    #[test]
    fn rejects_negative_speed() {
        let cfg = MorpherConfig {
            speed: -2.0,
            ..MorpherConfig::default()
        };
        assert_eq!(cfg.validate(), Err(MorphError::InvalidSpeed { speed: -2.0 }));
    }
}
