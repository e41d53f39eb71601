//! Playback clock: turns per-tick deltas into a timeline cursor.
//!
//! The clock only accumulates scaled time; the cursor is derived from the
//! total, so it never depends on how that total was split into ticks:
//! - Once: saturates at the span; reaching it is terminal.
//! - Loop: period = span. The first pass includes its end, so exactly one span
//!   shows the last keyframe; past that the total is taken modulo the span.
//! - PingPong: period = 2 * span; the second half of the period runs backwards.

use serde::{Deserialize, Serialize};

use crate::error::MorphError;
use crate::keyframes::Time;

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlaybackMode {
    Once,
    #[default]
    Loop,
    PingPong,
}

impl PlaybackMode {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Loop => "loop",
            Self::PingPong => "ping-pong",
        }
    }
}

/// Playback state of a clock. Finished is only reachable in Once and is terminal
/// until the clock is reset.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    Playing,
    Finished,
}

impl PlaybackState {
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// Reflect a position in [0, 2 * span] onto [0, span].
fn ping_pong(position: Time, span: Time) -> Time {
    if span <= 0.0 {
        return 0.0;
    }
    if position <= span {
        position
    } else {
        (2.0 * span - position).max(0.0)
    }
}

pub(crate) fn validate_speed(speed: f64) -> Result<(), MorphError> {
    if !speed.is_finite() || speed < 0.0 {
        return Err(MorphError::InvalidSpeed { speed });
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackClock {
    mode: PlaybackMode,
    speed: f64,
    first_time: Time,
    span: Time,
    /// Total scaled time fed into the clock since the last reset.
    elapsed: Time,
}

impl PlaybackClock {
    /// Create a clock for keyframes starting at `first_time` and lasting `span`.
    pub fn new(mode: PlaybackMode, speed: f64, first_time: Time, span: Time) -> Self {
        Self {
            mode,
            speed,
            first_time,
            span: span.max(0.0),
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn span(&self) -> Time {
        self.span
    }

    #[inline]
    pub fn first_time(&self) -> Time {
        self.first_time
    }

    #[inline]
    pub fn elapsed(&self) -> Time {
        self.elapsed
    }

    /// Completed periods in Loop / PingPong (a PingPong period is there and back).
    pub fn cycles(&self) -> u64 {
        let period = self.period();
        match self.mode {
            PlaybackMode::Once => 0,
            _ if period <= 0.0 || self.elapsed <= period => 0,
            _ => (self.elapsed / period).floor() as u64,
        }
    }

    fn period(&self) -> Time {
        match self.mode {
            PlaybackMode::Once | PlaybackMode::Loop => self.span,
            PlaybackMode::PingPong => 2.0 * self.span,
        }
    }

    /// Position inside the current period, derived from `elapsed` alone.
    fn position(&self) -> Time {
        let period = self.period();
        if period <= 0.0 {
            return 0.0;
        }
        match self.mode {
            PlaybackMode::Once => self.elapsed.min(period),
            PlaybackMode::Loop | PlaybackMode::PingPong if self.elapsed <= period => self.elapsed,
            PlaybackMode::Loop | PlaybackMode::PingPong => self.elapsed.rem_euclid(period),
        }
    }

    /// Add `delta * speed` to the clock. Returns how many period boundaries
    /// were crossed by this call.
    pub fn advance(&mut self, delta: Time) -> Result<u64, MorphError> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(MorphError::InvalidDelta { delta });
        }
        let before = self.cycles();
        self.elapsed += delta * self.speed;
        Ok(self.cycles().saturating_sub(before))
    }

    /// Timeline position after applying the playback mode.
    pub fn resolved_cursor(&self) -> Time {
        if self.span <= 0.0 {
            return self.first_time;
        }
        match self.mode {
            PlaybackMode::Once | PlaybackMode::Loop => self.first_time + self.position(),
            PlaybackMode::PingPong => self.first_time + ping_pong(self.position(), self.span),
        }
    }

    pub fn state(&self) -> PlaybackState {
        match self.mode {
            PlaybackMode::Once if self.elapsed >= self.span => PlaybackState::Finished,
            _ => PlaybackState::Playing,
        }
    }

    /// Switch mode from the next tick on; the accumulated time is kept and
    /// reinterpreted under the new mode.
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.mode = mode;
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), MorphError> {
        validate_speed(speed)?;
        self.speed = speed;
        Ok(())
    }

    /// Rewind to the first keyframe and resume playing.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
