//! MetaMorpher: owns keyframes, a playback clock and one live output object.
//!
//! Methods:
//! - new / with_config, add (setup only), object (stable output handle)
//! - on_tick: advance clock -> resolve cursor -> find segment -> blend -> write

use log::{debug, info, trace, warn};

use crate::config::MorpherConfig;
use crate::error::MorphError;
use crate::events::{MorphEvent, TickReport};
use crate::interp::InterpolationStrategy;
use crate::keyframes::{KeyframeSet, Time};
use crate::output::OutputHandle;
use crate::playback::{validate_speed, PlaybackClock, PlaybackMode, PlaybackState};

/// Animates one object of type `T` through a keyframe set using strategy `S`.
///
/// Setup appends keyframes with [`MetaMorpher::add`]; the first successful
/// [`MetaMorpher::on_tick`] freezes them. The output handle returned by
/// [`MetaMorpher::object`] can be embedded once and read after every tick.
#[derive(Debug)]
pub struct MetaMorpher<T, S> {
    cfg: MorpherConfig,
    keyframes: KeyframeSet<T>,
    strategy: S,
    /// Created on the first successful tick, once the keyframes are final.
    clock: Option<PlaybackClock>,
    output: OutputHandle<T>,
}

impl<T, S: InterpolationStrategy<T>> MetaMorpher<T, S> {
    /// Morpher with the default config; `initial` is what readers see before the first tick.
    pub fn new(initial: T, strategy: S) -> Self {
        let cfg = MorpherConfig::default();
        Self {
            keyframes: KeyframeSet::with_capacity(cfg.keyframe_capacity),
            cfg,
            strategy,
            clock: None,
            output: OutputHandle::new(initial),
        }
    }

    pub fn with_config(initial: T, strategy: S, cfg: MorpherConfig) -> Result<Self, MorphError> {
        cfg.validate()?;
        Ok(Self {
            keyframes: KeyframeSet::with_capacity(cfg.keyframe_capacity),
            cfg,
            strategy,
            clock: None,
            output: OutputHandle::new(initial),
        })
    }

    /// Append a keyframe. Only valid before playback starts.
    pub fn add(&mut self, state: T, time: Time) -> Result<(), MorphError> {
        if self.clock.is_some() {
            warn!("rejected keyframe at {time}: playback already started");
            return Err(MorphError::PlaybackStarted);
        }
        self.keyframes.add(state, time).map_err(|e| {
            warn!("rejected keyframe at {time}: {e}");
            e
        })?;
        debug!(
            "keyframe #{} added at {time}",
            self.keyframes.len().saturating_sub(1)
        );
        Ok(())
    }

    /// Stable handle to the output object.
    pub fn object(&self) -> OutputHandle<T> {
        self.output.clone()
    }

    /// Advance by `delta` and write the blended state into the output object.
    ///
    /// On error nothing is advanced or written. Once a Once playback has
    /// finished, further ticks leave the output untouched.
    pub fn on_tick(&mut self, delta: Time) -> Result<TickReport, MorphError> {
        if !delta.is_finite() || delta < 0.0 {
            warn!("rejected tick delta {delta}");
            return Err(MorphError::InvalidDelta { delta });
        }
        self.keyframes.ensure_playable()?;
        if !self.output.is_writable() {
            warn!("output object still borrowed at tick; skipping write");
            return Err(MorphError::OutputBorrowed);
        }

        let fresh = self.clock.is_none();
        let first_time = self.keyframes.first_time().unwrap_or(0.0);
        let span = self.keyframes.span();
        let (mode, speed) = (self.cfg.mode, self.cfg.speed);
        let clock = self.clock.get_or_insert_with(|| {
            debug!(
                "playback starts: mode={} span={span} keyframes={}",
                mode.name(),
                self.keyframes.len()
            );
            PlaybackClock::new(mode, speed, first_time, span)
        });

        if !fresh && clock.state().is_finished() {
            let cursor = clock.resolved_cursor();
            let segment = self.keyframes.find_segment(cursor)?;
            return Ok(TickReport {
                cursor,
                segment: segment.index,
                fraction: segment.fraction,
                state: PlaybackState::Finished,
                wrote: false,
                event: None,
            });
        }

        let wraps = clock.advance(delta)?;
        let cursor = clock.resolved_cursor();
        let state = clock.state();
        let segment = self.keyframes.find_segment(cursor)?;
        trace!(
            "tick delta={delta} cursor={cursor} segment={} fraction={}",
            segment.index,
            segment.fraction
        );

        let (low, high) = self.keyframes.endpoints(&segment);
        let strategy = &self.strategy;
        self.output
            .write_with(|out| strategy.blend_into(low, high, segment.fraction, out))?;

        let event = if state.is_finished() {
            info!("playback finished at {cursor}");
            Some(MorphEvent::Finished { time: cursor })
        } else if wraps > 0 {
            debug!("playback wrapped {wraps} time(s), {} total", clock.cycles());
            Some(MorphEvent::Wrapped {
                cycles: clock.cycles(),
            })
        } else {
            None
        };

        Ok(TickReport {
            cursor,
            segment: segment.index,
            fraction: segment.fraction,
            state,
            wrote: true,
            event,
        })
    }

    pub fn keyframes(&self) -> &KeyframeSet<T> {
        &self.keyframes
    }

    /// Playback clock, once the first tick has started playback.
    pub fn clock(&self) -> Option<&PlaybackClock> {
        self.clock.as_ref()
    }

    pub fn has_started(&self) -> bool {
        self.clock.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        self.clock
            .as_ref()
            .map_or(PlaybackState::Playing, |c| c.state())
    }

    pub fn mode(&self) -> PlaybackMode {
        self.cfg.mode
    }

    pub fn config(&self) -> &MorpherConfig {
        &self.cfg
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Change playback mode; applies from the next tick.
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.cfg.mode = mode;
        if let Some(clock) = self.clock.as_mut() {
            clock.set_mode(mode);
        }
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), MorphError> {
        validate_speed(speed)?;
        self.cfg.speed = speed;
        if let Some(clock) = self.clock.as_mut() {
            clock.set_speed(speed)?;
        }
        Ok(())
    }

    /// Rewind to the first keyframe. Keyframes stay frozen.
    pub fn reset(&mut self) {
        if let Some(clock) = self.clock.as_mut() {
            clock.reset();
        }
    }
}
