//! Per-tick report returned by the morpher.
//!
//! The morphed value itself travels through the output handle; the report only
//! carries where on the timeline the tick landed and any semantic event.

use serde::{Deserialize, Serialize};

use crate::keyframes::Time;
use crate::playback::PlaybackState;

/// Discrete signals raised by a tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum MorphEvent {
    /// Once playback reached the last keyframe on this tick.
    Finished { time: Time },
    /// Loop / PingPong crossed one or more period boundaries on this tick.
    Wrapped { cycles: u64 },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TickReport {
    pub cursor: Time,
    /// Index of the active segment's left keyframe.
    pub segment: usize,
    pub fraction: f32,
    pub state: PlaybackState,
    /// False when the tick was a terminal no-op and the output was left alone.
    pub wrote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<MorphEvent>,
}
