//! MetaMorpher core (engine-agnostic)
//!
//! Animates one object through an ordered set of keyframes. A host feeds the
//! elapsed time once per frame; the morpher resolves the active segment under
//! its playback mode, blends the two bracketing states with a pluggable
//! interpolation strategy and writes the result into a long-lived output
//! object that the host's scene graph reads after the tick.

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod interp;
pub mod keyframes;
pub mod morpher;
pub mod output;
pub mod playback;
pub mod ticker;
pub mod value;

// Re-exports for hosts
pub use config::MorpherConfig;
pub use error::MorphError;
pub use events::{MorphEvent, TickReport};
pub use ids::ListenerId;
pub use interp::{
    ColorInterpolation, Eased, Easing, FnInterpolation, InterpolationStrategy, QuatInterpolation,
    ScalarInterpolation, StepInterpolation, TransformInterpolation, ValueInterpolation,
};
pub use keyframes::{Keyframe, KeyframeSet, Segment, Time};
pub use morpher::MetaMorpher;
pub use output::OutputHandle;
pub use playback::{PlaybackClock, PlaybackMode, PlaybackState};
pub use ticker::{TickListener, Ticker};
pub use value::{Rgba, Transform, Value};
