//! Error types for the morpher.

use serde::{Deserialize, Serialize};

use crate::ids::ListenerId;
use crate::keyframes::Time;

/// Every way a morpher call can be rejected.
///
/// A call that returns an error leaves keyframes, clock and output object
/// exactly as they were before the call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MorphError {
    /// Fewer than two keyframes were registered when playback needed a segment.
    #[error("at least two keyframes are required, found {count}")]
    NotEnoughKeyframes { count: usize },

    /// A keyframe was appended with a time earlier than the last one.
    #[error("keyframe time {time} is earlier than previous keyframe time {previous}")]
    OutOfOrderKeyframe { time: Time, previous: Time },

    /// Keyframe time is negative, NaN or infinite.
    #[error("invalid keyframe time: {time}")]
    InvalidTime { time: Time },

    /// Tick delta is negative, NaN or infinite.
    #[error("invalid tick delta: {delta}")]
    InvalidDelta { delta: Time },

    /// Playback speed is negative, NaN or infinite.
    #[error("invalid playback speed: {speed}")]
    InvalidSpeed { speed: f64 },

    /// Keyframes can only be added before the first tick.
    #[error("keyframes cannot be added once playback has started")]
    PlaybackStarted,

    /// A reader still held the output object when the tick tried to write it.
    #[error("output object is still borrowed by a reader")]
    OutputBorrowed,

    /// A listener driven by a ticker failed.
    #[error("tick listener {id:?} failed: {source}")]
    Listener {
        id: ListenerId,
        source: Box<MorphError>,
    },
}

impl MorphError {
    /// Coarse grouping for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotEnoughKeyframes { .. }
            | Self::OutOfOrderKeyframe { .. }
            | Self::InvalidTime { .. } => "configuration",
            Self::InvalidDelta { .. } | Self::InvalidSpeed { .. } => "input",
            Self::PlaybackStarted | Self::OutputBorrowed => "playback",
            Self::Listener { source, .. } => source.category(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(
            MorphError::NotEnoughKeyframes { count: 1 }.category(),
            "configuration"
        );
        assert_eq!(MorphError::InvalidDelta { delta: -1.0 }.category(), "input");
        assert_eq!(MorphError::OutputBorrowed.category(), "playback");
    }

    #[test]
    fn listener_error_reports_inner_category() {
        let err = MorphError::Listener {
            id: ListenerId(3),
            source: Box::new(MorphError::OutOfOrderKeyframe {
                time: 1.0,
                previous: 2.0,
            }),
        };
        assert_eq!(err.category(), "configuration");
        assert!(err.to_string().contains("earlier than previous"));
    }

    #[test]
    fn serialization() {
        let error = MorphError::InvalidTime { time: -4.0 };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: MorphError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
